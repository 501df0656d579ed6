mod chain;
mod config;
mod home_directory;
mod init;
mod notify;
mod query;
mod tracing_filter;
mod tx;
mod wallet;

use {
    crate::{
        chain::open_session, config::Config, home_directory::HomeDirectory, init::InitCmd,
        query::QueryCmd, tracing_filter::CustomLevelFilter, tx::TxCmd, wallet::WalletCmd,
    },
    clap::Parser,
    config_parser::parse_config,
    std::{path::PathBuf, process::ExitCode},
    tracing_subscriber::{fmt, prelude::*, registry},
};

#[derive(Parser)]
#[command(author, version, about, next_display_order = None)]
struct Cli {
    /// Directory for the config file and the connected wallet [default: ~/.voting]
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Write a default config file into the home directory
    Init(InitCmd),

    /// Connect or disconnect the wallet [alias: w]
    #[command(subcommand, next_display_order = None, alias = "w")]
    Wallet(WalletCmd),

    /// Show the current voting [alias: q]
    #[command(next_display_order = None, alias = "q")]
    Query(QueryCmd),

    /// Send transactions
    #[command(subcommand, next_display_order = None)]
    Tx(TxCmd),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // A missing `.env` file is fine.
    dotenvy::dotenv().ok();

    // Parse CLI arguments.
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        notify::error(format!("{err:#}"));

        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Find the home directory from the CLI `--home` flag.
    let app_dir = HomeDirectory::new_or_default(cli.home)?;

    // Parse the config file.
    let cfg: Config = parse_config(app_dir.config_file())?;

    // Set up tracing. Logs go to stderr, leaving stdout to the voting view.
    registry()
        .with(cfg.log_level.parse::<CustomLevelFilter>()?)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Init(cmd) => cmd.run(&app_dir),
        Command::Wallet(cmd) => cmd.run(open_session(&app_dir, &cfg)?).await,
        Command::Query(cmd) => cmd.run(open_session(&app_dir, &cfg)?).await,
        Command::Tx(cmd) => cmd.run(open_session(&app_dir, &cfg)?).await,
    }
}
