use crate::commands::{run_promotion_quote, run_scorecard, PromotionQuoteArgs, ScorecardArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use estate_desk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Estate Desk",
    about = "Serve and query the estate-desk performance and promotion decisions",
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
    /// Listing promotion pricing
    Promotion {
        #[command(subcommand)]
        command: PromotionCommand,
    },
    /// Agent performance criteria
    Performance {
        #[command(subcommand)]
        command: PerformanceCommand,
    },
}

#[derive(Subcommand, Debug)]
enum PromotionCommand {
    /// Price a plan against a credit balance
    Quote(PromotionQuoteArgs),
}

#[derive(Subcommand, Debug)]
enum PerformanceCommand {
    /// Evaluate measured metrics against the criteria set
    Scorecard(ScorecardArgs),
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
        Command::Promotion {
            command: PromotionCommand::Quote(args),
        } => run_promotion_quote(args),
        Command::Performance {
            command: PerformanceCommand::Scorecard(args),
        } => run_scorecard(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["estate-desk"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_promotion_quote() {
        let cli = Cli::try_parse_from([
            "estate-desk",
            "promotion",
            "quote",
            "--credits",
            "120",
            "--plan",
            "featured",
            "--duration",
            "15_days",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Promotion {
                command: PromotionCommand::Quote(args),
            }) => {
                assert_eq!(args.credits, 120);
                assert_eq!(args.plan.map(|plan| plan.label()), Some("featured"));
            }
            other => panic!("expected promotion quote, got {other:?}"),
        }
    }
}
