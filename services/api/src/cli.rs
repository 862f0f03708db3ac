use crate::demo::{
    run_bid_comparison, run_bid_ranking, run_demo, run_search, CompareArgs, DemoArgs, RankArgs,
    SearchArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use procure_core::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "procure-api",
    about = "Serve and explore the procurement marketplace bid and search engines",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank and compare the bids submitted against an RFQ
    Bids {
        #[command(subcommand)]
        command: BidsCommand,
    },
    /// Run one marketplace search and print or export the page
    Search(SearchArgs),
    /// Walk through ranking, comparison, and search on the bundled dataset
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum BidsCommand {
    /// Print the scored bid board with analytics
    Rank(RankArgs),
    /// Print a side-by-side comparison of selected bids
    Compare(CompareArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// JSON dataset used to seed the in-memory backends
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Bids {
            command: BidsCommand::Rank(args),
        } => run_bid_ranking(args).await,
        Command::Bids {
            command: BidsCommand::Compare(args),
        } => run_bid_comparison(args).await,
        Command::Search(args) => run_search(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}
