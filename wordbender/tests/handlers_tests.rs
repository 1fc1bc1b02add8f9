use std::io::Write;
use tempfile::NamedTempFile;
use wordbender::handlers::*;

#[test]
fn test_roster_from_arg_default() {
    let roster = roster_from_arg(None).unwrap();
    assert!(roster.characters().contains(&"aang".to_string()));
    assert_eq!(roster.characters().len(), 10);
}

#[test]
fn test_roster_from_arg_list() {
    let list = "Aang, Katara".to_string();
    let roster = roster_from_arg(Some(&list)).unwrap();
    assert_eq!(roster.characters(), ["aang", "katara"]);
}

#[test]
fn test_roster_from_arg_empty_list() {
    let list = " , ,".to_string();
    let result = roster_from_arg(Some(&list));
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("No character names"));
}

#[test]
fn test_validate_url_template() {
    assert!(validate_url_template("http://avatar.fandom.com/wiki/Transcript:{title}").is_ok());
    assert!(validate_url_template("http://avatar.fandom.com/wiki/Transcript").is_err());
    assert!(validate_url_template("not a url {title}").is_err());
}

#[test]
fn test_expand_assets_dir_relative() {
    assert_eq!(
        expand_assets_dir("../atla files"),
        std::path::PathBuf::from("../atla files")
    );
}

#[test]
fn test_load_table() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    write!(
        temp_file,
        r#"{{"characters":["aang"],"rows":[{{"season":1,"episode":1,"title":"The Boy in the Iceberg","dialogue":{{"aang":["Hi!"]}}}}]}}"#
    )?;

    let table = load_table(temp_file.path())?;

    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].lines("aang"), ["Hi!".to_string()]);
    Ok(())
}

#[test]
fn test_load_table_missing_file() {
    let err = load_table(std::path::Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to load dialogue table"));
}
