// End-to-end tests for building dialogue tables

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wordbender_core::dialogue::{
    DialogueTable, ScrapeOptions, make_dialogue_table, transcript_url,
};
use wordbender_core::{DialogueError, EpisodeListing, Roster};

const IMPRISONED: &str = r#"<html><body>
<table class="wikitable">
  <tr><th>Katara</th><td>[Walking through the village.] Haru, wait!</td></tr>
  <tr><th>Aang</th><td>We can help you.</td></tr>
  <tr><td>Scene change to the prison rig.</td></tr>
  <tr><th>Haru</th><td>Thank you.</td></tr>
  <tr><th>Katara</th><td>Earthbenders, take back your courage!
  </td></tr>
</table>
</body></html>"#;

const WINTER_SOLSTICE: &str = r#"<html><body>
<table>
  <tr><th>Aang</th><td>Roku?</td></tr>
  <tr><th>Aang</th><td>[Flying on Appa.] I have to get to the temple!</td></tr>
  <tr><th>Sokka</th><td>Hang on!</td></tr>
</table>
</body></html>"#;

fn listing(rows: &[(&str, &str, &str)]) -> EpisodeListing {
    EpisodeListing::new(
        vec!["Season".into(), "Episode".into(), "Title".into()],
        rows.iter()
            .map(|(s, e, t)| vec![s.to_string(), e.to_string(), t.to_string()])
            .collect(),
    )
}

async fn serve(server: &MockServer, title: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/wiki/Transcript:{}", title)))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

fn options_for(server: &MockServer, roster: Roster, other: bool) -> ScrapeOptions {
    ScrapeOptions {
        roster,
        other,
        url_template: format!("{}/wiki/Transcript:{{title}}", server.uri()),
        show_progress_bars: false,
    }
}

#[test]
fn test_transcript_url() {
    assert_eq!(
        transcript_url("http://avatar.fandom.com/wiki/Transcript:{title}", "Imprisoned"),
        "http://avatar.fandom.com/wiki/Transcript:Imprisoned"
    );
}

#[tokio::test]
async fn test_two_episode_table() {
    let server = MockServer::start().await;
    serve(&server, "Imprisoned", IMPRISONED).await;
    serve(&server, "Winter_Solstice", WINTER_SOLSTICE).await;

    let listing = listing(&[("1", "6", "Imprisoned"), ("1", "7", "Winter_Solstice")]);
    let options = options_for(&server, Roster::new(["aang", "katara"]), false);

    let scrape = make_dialogue_table(&listing, &options).await.unwrap();
    let table = scrape.table;

    assert_eq!(table.rows.len(), 2);
    assert_eq!(
        table.columns(),
        vec!["Season", "Episode", "Title", "aang", "katara"]
    );

    let first = &table.rows[0];
    assert_eq!((first.season, first.episode), (1, 6));
    assert_eq!(first.title, "Imprisoned");
    assert_eq!(first.lines("aang"), ["We can help you.".to_string()]);
    assert_eq!(
        first.lines("katara"),
        [
            "Haru, wait!".to_string(),
            "Earthbenders, take back your courage!".to_string()
        ]
    );

    let second = &table.rows[1];
    assert_eq!(second.title, "Winter_Solstice");
    assert_eq!(
        second.lines("aang"),
        [
            "Roku?".to_string(),
            "I have to get to the temple!".to_string()
        ]
    );
    assert!(second.lines("katara").is_empty());

    assert_eq!(scrape.reports.len(), 2);
    // Haru is not tracked and the other bucket is off.
    assert_eq!(scrape.reports[0].skipped(), 1);
}

#[tokio::test]
async fn test_other_bucket_column() {
    let server = MockServer::start().await;
    serve(&server, "Imprisoned", IMPRISONED).await;

    let listing = listing(&[("1", "6", "Imprisoned")]);
    let options = options_for(&server, Roster::new(["aang", "katara"]), true);

    let table = make_dialogue_table(&listing, &options).await.unwrap().table;

    assert_eq!(
        table.columns(),
        vec!["Season", "Episode", "Title", "aang", "katara", "other"]
    );
    assert_eq!(table.rows[0].lines("other"), ["Thank you.".to_string()]);
}

#[tokio::test]
async fn test_missing_title_column_fails_before_fetching() {
    let server = MockServer::start().await;
    serve(&server, "Imprisoned", IMPRISONED).await;

    let listing = EpisodeListing::new(
        vec!["Season".into(), "Episode".into(), "Name".into()],
        vec![vec!["1".into(), "6".into(), "Imprisoned".into()]],
    );
    let options = options_for(&server, Roster::new(["aang"]), false);

    let err = make_dialogue_table(&listing, &options).await.err().unwrap();

    assert!(matches!(err, DialogueError::MissingColumn(ref c) if c == "Title"));
    assert!(err.to_string().contains("missing expected \"Title\" column"));
    let received = server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}

#[tokio::test]
async fn test_lowercase_title_column_accepted() {
    let server = MockServer::start().await;
    serve(&server, "Imprisoned", IMPRISONED).await;

    let listing = EpisodeListing::new(
        vec!["season".into(), "EPISODE".into(), "title".into()],
        vec![vec!["1".into(), "6".into(), "Imprisoned".into()]],
    );
    let options = options_for(&server, Roster::new(["aang"]), false);

    let table = make_dialogue_table(&listing, &options).await.unwrap().table;
    assert_eq!(table.rows[0].lines("aang"), ["We can help you.".to_string()]);
}

#[tokio::test]
async fn test_missing_page_gives_empty_row() {
    let server = MockServer::start().await;
    serve(&server, "Imprisoned", IMPRISONED).await;
    Mock::given(method("GET"))
        .and(path("/wiki/Transcript:Missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string("<html><body><p>No such page</p></body></html>"),
        )
        .mount(&server)
        .await;

    let listing = listing(&[("1", "6", "Imprisoned"), ("1", "99", "Missing")]);
    let options = options_for(&server, Roster::new(["aang"]), false);

    let scrape = make_dialogue_table(&listing, &options).await.unwrap();

    assert_eq!(scrape.table.rows.len(), 2);
    assert_eq!(scrape.table.rows[0].lines("aang"), ["We can help you.".to_string()]);
    let missing = &scrape.table.rows[1];
    assert_eq!(missing.title, "Missing");
    assert!(missing.lines("aang").is_empty());
    assert_eq!(scrape.reports[1].tables_found, 0);
}

#[tokio::test]
async fn test_unreachable_host_aborts_aggregation() {
    let listing = listing(&[("1", "6", "Imprisoned")]);
    let options = ScrapeOptions {
        roster: Roster::new(["aang"]),
        other: false,
        url_template: "http://127.0.0.1:1/wiki/Transcript:{title}".to_string(),
        show_progress_bars: false,
    };

    let err = make_dialogue_table(&listing, &options).await.err().unwrap();
    assert!(matches!(err, DialogueError::Scan(_)));
}

#[test]
fn test_unknown_character_column() {
    let table = DialogueTable::new(vec!["aang".to_string()]);
    assert!(table.column("aang").unwrap().is_empty());
    assert!(matches!(
        table.column("appa"),
        Err(DialogueError::UnknownCharacter(_))
    ));
}

#[test]
fn test_table_json_round_trip() {
    let table = DialogueTable::new(vec!["aang".to_string(), "katara".to_string()]);
    let json = table.to_json().unwrap();
    let back: DialogueTable = serde_json::from_str(&json).unwrap();
    assert_eq!(back, table);
}
