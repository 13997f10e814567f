use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use panel_engine::DEFAULT_BASE_URL;

use crate::config::AppConfig;
use crate::platform::{self, LogDestination};

#[derive(Parser, Debug)]
#[command(
    name = "ats-panel",
    about = "Check how well a résumé matches a job description using the ATS scoring service",
    version
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the interactive panel (default command)
    Interactive,
    /// Upload a résumé, score it against a job description and print the result
    Score(ScoreArgs),
}

#[derive(Args, Debug)]
pub(crate) struct GlobalArgs {
    /// Root URL of the parsing/scoring backend
    #[arg(long, env = "ATS_PANEL_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub(crate) base_url: String,

    /// Per-request timeout in whole seconds
    #[arg(long, env = "ATS_PANEL_TIMEOUT_SECS", default_value_t = 60, global = true)]
    pub(crate) timeout_secs: u64,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogDestination::File, global = true)]
    pub(crate) log: LogDestination,

    /// Minimum level that is logged
    #[arg(long, default_value = "info", global = true)]
    pub(crate) log_level: LevelFilter,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Résumé PDF to upload
    #[arg(long)]
    pub(crate) resume: PathBuf,

    /// File holding the job description, or `-` for stdin
    #[arg(long)]
    pub(crate) job: PathBuf,
}

pub(crate) fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = AppConfig::from_args(&cli.global).context("invalid configuration")?;

    platform::logging::initialize(config.log_destination, config.log_level);

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => platform::run_interactive(&config),
        Command::Score(args) => platform::run_score(&config, &args),
    }
}
