use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use researchdesk_core::{Config, ResearchService, tools::append_research_block};
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "researchdesk-cli",
    version,
    about = "Run ResearchDesk queries from the terminal"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one research query and print the report.
    Run(RunArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Query to research.
    #[arg(long)]
    query: String,

    /// Optional configuration file (defaults to RESEARCHDESK_CONFIG or
    /// ./config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also append the rendered report to this file.
    #[arg(long)]
    save: Option<PathBuf>,
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,researchdesk_core=info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let rt = Runtime::new()?;
    rt.block_on(async move {
        match cli.command {
            Command::Run(args) => run_command(args).await?,
        }
        Ok::<(), anyhow::Error>(())
    })?;

    Ok(())
}

async fn run_command(args: RunArgs) -> Result<()> {
    info!(query = %args.query, "starting research query");

    let config = Config::load(args.config)?;
    let service = ResearchService::from_config(config);

    let report = service.run(&args.query).await;
    println!("{report}");

    if let Some(path) = args.save {
        append_research_block(&path, &report)?;
        info!(path = %path.display(), "report appended");
    }

    Ok(())
}
