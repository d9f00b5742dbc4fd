use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;

#[derive(Clone, Debug, Parser)]
#[command(author, version, about = "Terminal client for livemarkdown live document previews", long_about = None)]
pub struct Config {
    /// Base URL of the livemarkdown server
    #[arg(short, long, env, default_value = "http://localhost:4444")]
    pub base_url: String,

    /// Navigation path of the view to enhance, e.g. /document/{id}.
    /// Paths outside the document-view prefix disable the live preview.
    #[arg(short, long, env)]
    pub path: String,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }
}
