use crate::error::{DialogueError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::mem::take;
use std::path::Path;

/// A row of the episode listing after validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub season: u32,
    pub episode: u32,
    pub title: String,
}

/// Column-named table of episodes as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodeListing {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl EpisodeListing {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Reads a CSV file whose first row names the columns.
    pub fn from_csv_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_csv(&text)
    }

    pub fn from_csv(text: &str) -> Result<Self> {
        let mut rows = parse_rows(text, ',');
        if rows.is_empty() {
            return Err(DialogueError::EmptyListing);
        }
        let columns = rows
            .remove(0)
            .into_iter()
            .map(|c| c.trim().to_string())
            .collect();
        Ok(Self { columns, rows })
    }

    /// Case-insensitive column lookup.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.trim().eq_ignore_ascii_case(name))
    }

    /// Validates the listing and returns its episodes in row order.
    ///
    /// Fails if the title, season or episode column is missing, or if a
    /// season/episode cell is not a number.
    pub fn episodes(&self) -> Result<Vec<Episode>> {
        let title_idx = self
            .column_index("title")
            .ok_or_else(|| DialogueError::MissingColumn("Title".to_string()))?;
        let season_idx = self
            .column_index("season")
            .ok_or_else(|| DialogueError::MissingColumn("Season".to_string()))?;
        let episode_idx = self
            .column_index("episode")
            .ok_or_else(|| DialogueError::MissingColumn("Episode".to_string()))?;

        self.rows
            .iter()
            .enumerate()
            .map(|(row_num, row)| {
                if row.len() < self.columns.len() {
                    return Err(DialogueError::RaggedRow {
                        row: row_num + 1,
                        found: row.len(),
                        expected: self.columns.len(),
                    });
                }
                Ok(Episode {
                    season: parse_number(row_num, "Season", &row[season_idx])?,
                    episode: parse_number(row_num, "Episode", &row[episode_idx])?,
                    title: row[title_idx].trim().to_string(),
                })
            })
            .collect()
    }
}

fn parse_number(row_num: usize, column: &str, cell: &str) -> Result<u32> {
    cell.trim()
        .parse::<u32>()
        .map_err(|_| DialogueError::InvalidCell {
            row: row_num + 1,
            column: column.to_string(),
            value: cell.to_string(),
        })
}

/// Minimal CSV parser: quoted fields, doubled-quote escapes, CRLF tolerant.
/// Blank lines are dropped.
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = String::new();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && matches!(chars.peek(), Some('"')) {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = !in_quotes;
                }
            }
            c if c == sep && !in_quotes => row.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) {
                    chars.next();
                }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].trim().is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Last line without a trailing newline.
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}
