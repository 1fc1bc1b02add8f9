use crate::result::{EpisodeRecord, ParseReport, RowOutcome, SkipReason};
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Opening line of the spoken intro. Transcripts that include the intro table
/// stop being collected from here to the end of that table.
pub const INTRO_BANNER: &str = "Water. Earth. Fire. Air.";

/// Bucket that collects speakers outside the roster.
pub const OTHER_BUCKET: &str = "other";

static STAGE_DIRECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.+?)\]").expect("invalid regex: stage direction"));

static TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body table").expect("invalid selector: table"));
static ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("invalid selector: tr"));
static SPEAKER_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th").expect("invalid selector: th"));
static DIALOGUE_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("invalid selector: td"));

/// Strips `[...]` stage directions and newlines, then trims.
///
/// Newlines go first so a direction broken across lines is still removed and
/// a second pass never finds a span the first one left behind.
pub fn clean_dialogue(text: &str) -> String {
    let flat = text.replace('\n', "");
    STAGE_DIRECTION.replace_all(&flat, "").trim().to_string()
}

/// Lower-cases a speaker label and folds "Young Zuko" into "zuko".
pub fn normalize_speaker(raw: &str) -> String {
    raw.to_lowercase()
        .replace('\n', "")
        .replace("young", "")
        .trim()
        .to_string()
}

/// Text of an element made of exactly one string, looking through
/// single-child wrappers such as `<th><a>Aang</a></th>`.
fn sole_string(element: ElementRef<'_>) -> Option<String> {
    let mut children = element.children();
    let only = children.next()?;
    if children.next().is_some() {
        return None;
    }

    match only.value() {
        Node::Text(text) => Some((**text).to_owned()),
        Node::Element(_) => ElementRef::wrap(only).and_then(sole_string),
        _ => None,
    }
}

/// Parses every table on a transcript page and appends each line to the
/// speaker's bucket in `record`.
///
/// All tables on the page are scanned, so episodes that carry a deleted-scenes
/// table will count those lines too. Rows that cannot be attributed are
/// reported as skipped instead of failing the page.
pub fn parse_transcript(
    html: &str,
    record: &mut EpisodeRecord,
    roster: &[String],
    other: bool,
) -> ParseReport {
    let document = Html::parse_document(html);
    let mut report = ParseReport::default();

    for table in document.select(&TABLE) {
        report.tables_found += 1;

        for row in table.select(&ROW) {
            let Some(speaker_cell) = row.select(&SPEAKER_CELL).next() else {
                continue;
            };

            let outcome = parse_row(row, speaker_cell, record, roster, other);
            if let RowOutcome::Skipped(ref reason) = outcome {
                debug!("{}: skipped row ({:?})", record.title, reason);
            }

            let stop = outcome == RowOutcome::IntroBanner;
            report.outcomes.push(outcome);
            if stop {
                break;
            }
        }
    }

    if report.tables_found == 0 {
        warn!("{}: no dialogue tables found", record.title);
    }

    report
}

fn parse_row(
    row: ElementRef<'_>,
    speaker_cell: ElementRef<'_>,
    record: &mut EpisodeRecord,
    roster: &[String],
    other: bool,
) -> RowOutcome {
    let Some(raw_speaker) = sole_string(speaker_cell) else {
        return RowOutcome::Skipped(SkipReason::NoSpeakerText);
    };

    let mut speaker = normalize_speaker(&raw_speaker);
    if other && !roster.is_empty() && !roster.contains(&speaker) {
        speaker = OTHER_BUCKET.to_string();
    }

    let Some(dialogue_cell) = row.select(&DIALOGUE_CELL).next() else {
        return RowOutcome::Skipped(SkipReason::MissingDialogueCell);
    };
    let dialogue = clean_dialogue(&dialogue_cell.text().collect::<String>());

    if dialogue.starts_with(INTRO_BANNER) {
        return RowOutcome::IntroBanner;
    }

    match record.dialogue.get_mut(&speaker) {
        Some(lines) => {
            lines.push(dialogue);
            RowOutcome::Collected { speaker }
        }
        None => RowOutcome::Skipped(SkipReason::UnknownSpeaker(speaker)),
    }
}
