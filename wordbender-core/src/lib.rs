pub mod dialogue;
pub mod episodes;
pub mod error;
pub mod report;
pub mod roster;
pub mod wordcloud;
pub mod words;

pub use dialogue::{DialogueTable, ScrapeOptions, make_dialogue_table};
pub use episodes::{Episode, EpisodeListing};
pub use error::DialogueError;
pub use roster::{Palette, Roster};
pub use words::count_words;
