use crate::demo::{run_bonus, run_demo, run_stats, BonusArgs, StatsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use creator_hub::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Creator Hub",
    about = "Serve the creator hub API or run bonus and stats calculations from the command line",
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
    /// Classify a set of metrics against the bonus tier table
    Bonus(BonusArgs),
    /// Derive dashboard stats and the current tier from a creator record (JSON)
    Stats(StatsArgs),
    /// Walk through the seeded roster, bonus tiers, and onboarding quiz
    Demo,
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
        Command::Bonus(args) => run_bonus(args),
        Command::Stats(args) => run_stats(args),
        Command::Demo => run_demo(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["creator-hub-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn bonus_accepts_negative_inputs() {
        let cli = Cli::try_parse_from([
            "creator-hub-api",
            "bonus",
            "--days",
            "-3",
            "--hours",
            "40.9",
            "--diamonds",
            "120000",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Bonus(args)) => {
                assert_eq!(args.days, -3);
                assert_eq!(args.hours, 40.9);
                assert!(args.tiers.is_none());
            }
            other => panic!("expected bonus command, got {other:?}"),
        }
    }
}
