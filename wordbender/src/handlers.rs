use anyhow::{Context, Result, anyhow, bail};
use clap::ArgMatches;
use colored::Colorize;
use image::{DynamicImage, GenericImageView, Rgb};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;
use wordbender_core::dialogue::{DialogueTable, ScrapeOptions, make_dialogue_table, transcript_url};
use wordbender_core::report::{ReportFormat, generate_report, save_report, summarize};
use wordbender_core::wordcloud::{CloudOptions, CloudSurface, make_wordcloud};
use wordbender_core::{EpisodeListing, Palette, Roster};

/// Installs the fmt subscriber; `RUST_LOG` overrides the default `warn`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be set when running under tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Goes to stderr so stdout carries nothing but command output.
pub fn print_banner() {
    eprintln!(
        "{}",
        "  ~ wordbender ~  transcript dialogue & word clouds"
            .bright_cyan()
            .bold()
    );
    eprintln!();
}

/// Roster from a comma separated list, or the main cast when none is given.
pub fn roster_from_arg(characters: Option<&String>) -> Result<Roster> {
    match characters {
        None => Ok(Roster::default()),
        Some(list) => {
            let roster = Roster::parse_list(list);
            if roster.is_empty() {
                bail!("No character names found in '{}'", list);
            }
            Ok(roster)
        }
    }
}

/// The template must carry `{title}` and expand to a valid URL.
pub fn validate_url_template(template: &str) -> Result<()> {
    if !template.contains("{title}") {
        bail!("URL template '{}' has no {{title}} placeholder", template);
    }
    let sample = transcript_url(template, "Title");
    Url::parse(&sample).with_context(|| format!("URL template '{}' is not a valid URL", template))?;
    Ok(())
}

pub fn expand_assets_dir(dir: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(dir).as_ref())
}

pub fn load_table(path: &Path) -> Result<DialogueTable> {
    DialogueTable::load_json(path)
        .with_context(|| format!("Failed to load dialogue table {}", path.display()))
}

pub async fn handle_scrape(args: &ArgMatches, quiet: bool) -> Result<()> {
    let episodes_path = args
        .get_one::<PathBuf>("episodes")
        .ok_or_else(|| anyhow!("--episodes is required"))?;
    let roster = roster_from_arg(args.get_one::<String>("characters"))?;
    let other = args.get_flag("other");
    let url_template = args
        .get_one::<String>("url-template")
        .cloned()
        .unwrap_or_default();
    let format_name = args
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("json");
    let format = ReportFormat::from_str(format_name)
        .ok_or_else(|| anyhow!("Unknown report format '{}'", format_name))?;

    validate_url_template(&url_template)?;
    let listing = EpisodeListing::from_csv_file(episodes_path)
        .with_context(|| format!("Failed to read episode listing {}", episodes_path.display()))?;

    info!(
        "Scraping {} episodes for {} characters",
        listing.rows.len(),
        roster.characters().len()
    );

    let options = ScrapeOptions {
        roster,
        other,
        url_template,
        show_progress_bars: !quiet,
    };
    let scrape = make_dialogue_table(&listing, &options).await?;

    if !quiet {
        let skipped: usize = scrape.reports.iter().map(|r| r.skipped()).sum();
        let collected: usize = scrape.reports.iter().map(|r| r.collected()).sum();
        eprintln!(
            "{} {} episodes, {} lines collected, {} rows skipped",
            "✓".green().bold(),
            scrape.table.rows.len(),
            collected,
            skipped
        );
    }

    let report = generate_report(&scrape.table, &format)?;
    match args.get_one::<PathBuf>("output") {
        Some(path) => {
            save_report(&report, path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if !quiet {
                eprintln!("{} Report saved to {}", "✓".green().bold(), path.display());
            }
        }
        None => print!("{}", report),
    }

    Ok(())
}

/// Prints what was drawn; the image itself only lands on disk with `--save`.
pub struct TerminalSurface {
    pub title: Option<String>,
    pub size: Option<(u32, u32)>,
}

impl CloudSurface for TerminalSurface {
    fn draw(&mut self, image: &DynamicImage) {
        self.size = Some(image.dimensions());
    }

    fn set_title(&mut self, title: &str, color: Rgb<u8>) {
        let Rgb([r, g, b]) = color;
        println!("{}", title.truecolor(r, g, b).bold());
        self.title = Some(title.to_string());
    }
}

pub fn handle_cloud(args: &ArgMatches) -> Result<()> {
    let table_path = args
        .get_one::<PathBuf>("table")
        .ok_or_else(|| anyhow!("--table is required"))?;
    let character = args
        .get_one::<String>("character")
        .ok_or_else(|| anyhow!("--character is required"))?
        .to_lowercase();
    let mask = args
        .get_one::<String>("mask")
        .ok_or_else(|| anyhow!("--mask is required"))?;
    let assets_dir = args
        .get_one::<String>("assets")
        .map(|d| expand_assets_dir(d))
        .unwrap_or_default();

    let table = load_table(table_path)?;
    let options = CloudOptions {
        assets_dir,
        save: args.get_flag("save"),
        palette: Palette::default(),
    };

    let mut surface = TerminalSurface {
        title: None,
        size: None,
    };
    let saved = make_wordcloud(&mut surface, &table, &character, mask, &options)?;

    if let Some((width, height)) = surface.size {
        println!("  {}x{} px", width, height);
    }
    if let Some(path) = saved {
        println!("{} Saved to {}", "✓".green().bold(), path.display());
    }

    Ok(())
}

pub fn handle_count(args: &ArgMatches) -> Result<()> {
    let table_path = args
        .get_one::<PathBuf>("table")
        .ok_or_else(|| anyhow!("--table is required"))?;
    let table = load_table(table_path)?;
    let palette = Palette::default();

    for summary in summarize(&table) {
        let Rgb([r, g, b]) = palette.color_for(&summary.character);
        println!(
            "{:<10} {:>6} lines {:>7} words",
            summary.character.truecolor(r, g, b).bold(),
            summary.lines,
            summary.words
        );
    }

    Ok(())
}
