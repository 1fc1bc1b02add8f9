use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One scraped episode and the dialogue collected for each tracked speaker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub season: u32,
    pub episode: u32,
    pub title: String,
    pub dialogue: BTreeMap<String, Vec<String>>,
}

impl EpisodeRecord {
    /// Creates a record with an empty bucket for every name in `buckets`.
    pub fn new<I, S>(season: u32, episode: u32, title: String, buckets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            season,
            episode,
            title,
            dialogue: buckets
                .into_iter()
                .map(|name| (name.into(), Vec::new()))
                .collect(),
        }
    }

    pub fn lines(&self, speaker: &str) -> &[String] {
        self.dialogue
            .get(speaker)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn total_lines(&self) -> usize {
        self.dialogue.values().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The speaker cell is not a single run of text.
    NoSpeakerText,
    MissingDialogueCell,
    /// Speaker has no bucket in the record.
    UnknownSpeaker(String),
}

/// What happened to a single transcript row that carried a speaker cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Collected { speaker: String },
    Skipped(SkipReason),
    /// The intro banner was reached; the rest of the table was discarded.
    IntroBanner,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub tables_found: usize,
    pub outcomes: Vec<RowOutcome>,
}

impl ParseReport {
    pub fn collected(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RowOutcome::Collected { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RowOutcome::Skipped(_)))
            .count()
    }

    pub fn hit_intro_banner(&self) -> bool {
        self.outcomes.contains(&RowOutcome::IntroBanner)
    }
}
