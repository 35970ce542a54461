use crate::quote::{run_batch, run_quote, run_rates, BatchArgs, QuoteArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use premium_rating::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Premium Rating Engine",
    about = "Quote motor insurance premiums from the command line or over HTTP",
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
    /// Quote a single driver profile
    Quote(QuoteArgs),
    /// Quote every driver profile in a CSV file
    Batch(BatchArgs),
    /// Print the active rate table
    Rates,
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
        Command::Quote(args) => run_quote(args),
        Command::Batch(args) => run_batch(args),
        Command::Rates => run_rates(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["premium-rating-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn quote_arguments_parse() {
        let cli = Cli::try_parse_from([
            "premium-rating-api",
            "quote",
            "--age",
            "18",
            "--accidents",
            "2",
            "--make",
            "Toyota",
            "--model",
            "Camry",
            "--json",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Quote(args)) => {
                assert_eq!(args.age, 18);
                assert_eq!(args.accidents, 2);
                assert_eq!(args.make, "Toyota");
                assert!(args.json);
            }
            other => panic!("expected quote command, got {other:?}"),
        }
    }

    #[test]
    fn negative_accident_counts_are_rejected() {
        let parsed = Cli::try_parse_from([
            "premium-rating-api",
            "quote",
            "--age",
            "30",
            "--accidents=-1",
            "--make",
            "Honda",
            "--model",
            "Civic",
        ]);
        assert!(parsed.is_err());
    }
}
