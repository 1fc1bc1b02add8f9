use crate::CLAP_STYLING;
use clap::{arg, command};
use wordbender_core::dialogue::DEFAULT_URL_TEMPLATE;
use wordbender_core::wordcloud::DEFAULT_ASSETS_DIR;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("wordbender")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("wordbender")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("scrape")
                .about(
                    "Fetch the transcript of every episode in a listing and build the \
                dialogue table.",
                )
                .arg(
                    arg!(-e --"episodes" <PATH>)
                        .required(true)
                        .help("CSV file with Season, Episode and Title columns")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-c --"characters" <NAMES>)
                        .required(false)
                        .help("Comma separated characters to track (default: the main cast)"),
                )
                .arg(
                    arg!(--"other")
                        .required(false)
                        .help("Collect lines from everyone else under an \"other\" column")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"url-template" <TEMPLATE>)
                        .required(false)
                        .help("Transcript URL with a {title} placeholder")
                        .default_value(DEFAULT_URL_TEMPLATE),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: json, csv, text, markdown")
                        .value_parser(["json", "csv", "text", "markdown", "md"])
                        .default_value("json"),
                ),
        )
        .subcommand(
            command!("cloud")
                .about("Render a character's word cloud inside a silhouette mask")
                .arg(
                    arg!(-t --"table" <PATH>)
                        .required(true)
                        .help("Dialogue table saved by `scrape --format json`")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-c --"character" <NAME>)
                        .required(true)
                        .help("Character column to draw"),
                )
                .arg(
                    arg!(-m --"mask" <FILE>)
                        .required(true)
                        .help("Mask image file name inside the assets directory"),
                )
                .arg(
                    arg!(--"assets" <DIR>)
                        .required(false)
                        .help("Directory holding mask images and saved clouds")
                        .default_value(DEFAULT_ASSETS_DIR),
                )
                .arg(
                    arg!(--"save")
                        .required(false)
                        .help("Write \"<character> wordcloud.png\" to the assets directory")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            command!("count")
                .about("Print line and word totals per character")
                .arg(
                    arg!(-t --"table" <PATH>)
                        .required(true)
                        .help("Dialogue table saved by `scrape --format json`")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        )
}
