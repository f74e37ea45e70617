use crate::demo::{
    run_demo, run_portfolio_export, run_score, DemoArgs, PortfolioExportArgs, ScoreArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use credit_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "CreditAI",
    about = "Score borrowers and serve the CreditAI dashboard API from the command line",
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
    /// Score one questionnaire and print the result, optionally writing a text report
    Score(ScoreArgs),
    /// Work with the generated demo portfolio
    Portfolio {
        #[command(subcommand)]
        command: PortfolioCommand,
    },
    /// Score a set of sample borrowers and summarize the demo portfolio
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum PortfolioCommand {
    /// Export the portfolio borrowers as CSV
    Export(PortfolioExportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Portfolio {
            command: PortfolioCommand::Export(args),
        } => run_portfolio_export(args),
        Command::Demo(args) => run_demo(args),
    }
}
