// Report generation from dialogue tables

use crate::dialogue::{DialogueTable, EPISODE_COLUMNS};
use crate::error::Result;
use crate::words::{count_words, count_words_across};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Csv,
    Markdown,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "csv" => Some(ReportFormat::Csv),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSummary {
    pub character: String,
    pub lines: usize,
    pub words: usize,
    /// Episodes in which the character has at least one line
    pub episodes: usize,
}

/// Per-character totals, in column order.
pub fn summarize(table: &DialogueTable) -> Vec<CharacterSummary> {
    table
        .characters
        .iter()
        .map(|character| {
            let per_episode: Vec<&[String]> =
                table.rows.iter().map(|row| row.lines(character)).collect();
            CharacterSummary {
                character: character.clone(),
                lines: per_episode.iter().map(|lines| lines.len()).sum(),
                words: count_words_across(per_episode.iter().copied()),
                episodes: per_episode.iter().filter(|lines| !lines.is_empty()).count(),
            }
        })
        .collect()
}

pub fn generate_report(table: &DialogueTable, format: &ReportFormat) -> Result<String> {
    Ok(match format {
        ReportFormat::Text => generate_text_report(table),
        ReportFormat::Json => table.to_json()?,
        ReportFormat::Csv => generate_csv_report(table),
        ReportFormat::Markdown => generate_markdown_report(table),
    })
}

pub fn generate_text_report(table: &DialogueTable) -> String {
    let mut report = String::new();

    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    report.push_str("              WORDBENDER DIALOGUE REPORT\n");
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    report.push_str(&format!(
        "Generated:    {}\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    report.push_str(&format!("Episodes:     {}\n", table.rows.len()));
    report.push_str(&format!("Characters:   {}\n\n", table.characters.len()));

    let width = table
        .characters
        .iter()
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0)
        .max("Character".len());

    report.push_str(&format!(
        "  {:<width$}  {:>8}  {:>8}  {:>8}\n",
        "Character",
        "Lines",
        "Words",
        "Episodes",
        width = width
    ));
    for summary in summarize(table) {
        report.push_str(&format!(
            "  {:<width$}  {:>8}  {:>8}  {:>8}\n",
            summary.character,
            summary.lines,
            summary.words,
            summary.episodes,
            width = width
        ));
    }

    report
}

/// One row per episode; each character cell holds that episode's word count.
pub fn generate_csv_report(table: &DialogueTable) -> String {
    let mut csv = table
        .columns()
        .iter()
        .map(|c| escape_csv(c))
        .collect::<Vec<_>>()
        .join(",");
    csv.push('\n');

    for row in &table.rows {
        let mut fields = vec![
            row.season.to_string(),
            row.episode.to_string(),
            escape_csv(&row.title),
        ];
        fields.extend(
            table
                .characters
                .iter()
                .map(|c| count_words(row.lines(c)).to_string()),
        );
        csv.push_str(&fields.join(","));
        csv.push('\n');
    }

    csv
}

pub fn generate_markdown_report(table: &DialogueTable) -> String {
    let mut md = String::new();
    md.push_str("# Dialogue Report\n\n");
    md.push_str(&format!(
        "{} episodes, {} characters.\n\n",
        table.rows.len(),
        table.characters.len()
    ));

    md.push_str("| Character | Lines | Words | Episodes |\n");
    md.push_str("|---|---:|---:|---:|\n");
    for summary in summarize(table) {
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            summary.character, summary.lines, summary.words, summary.episodes
        ));
    }

    md.push_str(&format!("\n## Words per episode\n\n| {} |\n", EPISODE_COLUMNS.join(" | ")));
    md.push_str("|---|---|---|\n");
    for row in &table.rows {
        let total: usize = table
            .characters
            .iter()
            .map(|c| count_words(row.lines(c)))
            .sum();
        md.push_str(&format!(
            "| {} | {} | {} ({} words) |\n",
            row.season,
            row.episode,
            row.title.replace('|', "\\|"),
            total
        ));
    }

    md
}

fn escape_csv(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
