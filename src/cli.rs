use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "seolens",
    version,
    about = "Score a page with an on-page SEO analysis API and render the results as cards"
)]
pub struct Cli {
    /// Path to a seolens.toml config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log progress and effective settings to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyse a URL and render its SEO, performance and best-practice scores
    Analyze(AnalyzeArgs),
}

#[derive(Debug, Clone, Args)]
pub struct AnalyzeArgs {
    /// Page to analyse, including the scheme (e.g. https://example.com/blog)
    #[arg(long)]
    pub url: String,

    /// Score a saved API response instead of calling the API
    #[arg(long)]
    pub payload: Option<PathBuf>,

    /// API login (HTTP Basic user)
    #[arg(long, env = "DATAFORSEO_LOGIN", hide_env_values = true)]
    pub login: Option<String>,

    /// API password (HTTP Basic password)
    #[arg(long, env = "DATAFORSEO_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Override the analysis endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 120)]
    pub timeout: u64,

    /// Decimal places for on-page result values
    #[arg(long, default_value_t = 2)]
    pub decimal_places: u32,

    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,

    /// Write the output to a file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Pretty,
}

pub fn parse() -> Cli {
    Cli::parse()
}
