pub mod error;
pub mod fetcher;
pub mod result;
pub mod transcript;

pub use error::ScanError;
pub use fetcher::Fetcher;
pub use result::{EpisodeRecord, ParseReport, RowOutcome, SkipReason};
pub use transcript::{INTRO_BANNER, OTHER_BUCKET, clean_dialogue, parse_transcript};
