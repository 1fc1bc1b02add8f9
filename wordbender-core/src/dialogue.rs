use crate::episodes::EpisodeListing;
use crate::error::{DialogueError, Result};
use crate::roster::Roster;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;
use wordbender_scanner::{EpisodeRecord, Fetcher, ParseReport, parse_transcript};

pub const DEFAULT_URL_TEMPLATE: &str = "http://avatar.fandom.com/wiki/Transcript:{title}";

/// Leading columns of every dialogue table, before the character columns.
pub const EPISODE_COLUMNS: [&str; 3] = ["Season", "Episode", "Title"];

/// Options for building a dialogue table
pub struct ScrapeOptions {
    pub roster: Roster,
    /// Collect lines from speakers outside the roster under "other"
    pub other: bool,
    /// Transcript URL with a `{title}` placeholder
    pub url_template: String,
    pub show_progress_bars: bool,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            roster: Roster::default(),
            other: false,
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            show_progress_bars: false,
        }
    }
}

pub fn transcript_url(template: &str, title: &str) -> String {
    template.replace("{title}", title)
}

/// One row per episode, one dialogue column per tracked character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueTable {
    pub characters: Vec<String>,
    pub rows: Vec<EpisodeRecord>,
}

impl DialogueTable {
    pub fn new(characters: Vec<String>) -> Self {
        Self {
            characters,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> Vec<String> {
        EPISODE_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(self.characters.iter().cloned())
            .collect()
    }

    pub fn has_character(&self, character: &str) -> bool {
        self.characters.iter().any(|c| c == character)
    }

    /// A character's lines for every episode, in row order.
    pub fn column(&self, character: &str) -> Result<Vec<&[String]>> {
        if !self.has_character(character) {
            return Err(DialogueError::UnknownCharacter(character.to_string()));
        }
        Ok(self.rows.iter().map(|row| row.lines(character)).collect())
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The table plus what the parser made of each page.
pub struct DialogueScrape {
    pub table: DialogueTable,
    pub reports: Vec<ParseReport>,
}

/// Fetches every episode's transcript and folds the dialogue into a table.
///
/// The listing is validated before any request goes out. A single failed
/// fetch fails the whole call.
pub async fn make_dialogue_table(
    listing: &EpisodeListing,
    options: &ScrapeOptions,
) -> Result<DialogueScrape> {
    let episodes = listing.episodes()?;
    let urls: Vec<String> = episodes
        .iter()
        .map(|e| transcript_url(&options.url_template, &e.title))
        .collect();

    let progress_bar = if options.show_progress_bars {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Fetching {} transcripts...", urls.len()));
        Some(Arc::new(pb))
    } else {
        None
    };

    let mut fetcher = Fetcher::new()?;
    if let Some(ref pb) = progress_bar {
        let pb_clone = pb.clone();
        let fetched = Arc::new(AtomicUsize::new(0));
        let total = urls.len();
        fetcher = fetcher.with_progress_callback(Arc::new(move |_idx: usize, _url: String| {
            let count = fetched.fetch_add(1, Ordering::Relaxed) + 1;
            pb_clone.set_message(format!("Fetched {}/{} transcripts", count, total));
            pb_clone.tick();
        }));
    }

    let pages = match fetcher.fetch_all(&urls).await {
        Ok(pages) => pages,
        Err(e) => {
            if let Some(ref pb) = progress_bar {
                pb.finish_and_clear();
            }
            return Err(e.into());
        }
    };

    let buckets = options.roster.buckets(options.other);
    let mut table = DialogueTable::new(buckets.clone());
    let mut reports = Vec::with_capacity(pages.len());

    for (episode, html) in episodes.into_iter().zip(pages) {
        let mut record = EpisodeRecord::new(
            episode.season,
            episode.episode,
            episode.title,
            buckets.iter().cloned(),
        );
        let report = parse_transcript(&html, &mut record, options.roster.characters(), options.other);
        info!(
            "S{}E{} {}: {} lines collected, {} rows skipped",
            record.season,
            record.episode,
            record.title,
            report.collected(),
            report.skipped()
        );
        table.rows.push(record);
        reports.push(report);
    }

    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!("Scraped {} episodes", table.rows.len()));
    }

    Ok(DialogueScrape { table, reports })
}
