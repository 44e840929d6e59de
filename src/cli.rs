use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "agrisense",
    version,
    about = "Crop health and irrigation decisions from field sensors"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate one set of readings and print the result
    Evaluate(EvaluateArgs),
    /// Ask the farmer assistant a question
    Ask {
        /// Question or command, e.g. "when to water"
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Print the effective crop profile table
    Profiles,
    /// Re-run interactive setup
    Init,
    /// Validate config and crop profile overrides
    Check,
}

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Read the snapshot from a JSON file instead of flags
    #[arg(long, conflicts_with_all = ["moisture", "temperature", "humidity"])]
    pub snapshot: Option<PathBuf>,

    /// Soil moisture (%)
    #[arg(short, long, required_unless_present = "snapshot")]
    pub moisture: Option<f64>,

    /// Air temperature (°C)
    #[arg(short, long, required_unless_present = "snapshot")]
    pub temperature: Option<f64>,

    /// Relative humidity (%)
    #[arg(short = 'H', long, required_unless_present = "snapshot")]
    pub humidity: Option<f64>,

    /// Crop type (defaults to the configured crop)
    #[arg(long)]
    pub crop: Option<String>,

    /// Irrigation threshold (%) (defaults to the configured threshold)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Leave the pump under manual control
    #[arg(long)]
    pub manual: bool,

    /// Comma-separated soil moisture history, oldest first
    #[arg(long, value_delimiter = ',')]
    pub history: Vec<f64>,

    /// Print the evaluation as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_evaluate_flags() {
        let cli = Cli::parse_from([
            "agrisense",
            "evaluate",
            "-m",
            "30",
            "-t",
            "40",
            "-H",
            "20",
            "--history",
            "40,42,44",
            "--json",
        ]);
        match cli.command {
            Some(Commands::Evaluate(args)) => {
                assert_eq!(args.moisture, Some(30.0));
                assert_eq!(args.history, vec![40.0, 42.0, 44.0]);
                assert!(args.json);
                assert!(!args.manual);
            }
            _ => panic!("expected evaluate"),
        }
    }

    #[test]
    fn evaluate_requires_readings_or_snapshot() {
        assert!(Cli::try_parse_from(["agrisense", "evaluate", "-m", "30"]).is_err());
        assert!(Cli::try_parse_from(["agrisense", "evaluate", "--snapshot", "s.json"]).is_ok());
    }

    #[test]
    fn ask_joins_words() {
        let cli = Cli::parse_from(["agrisense", "-v", "ask", "turn", "on", "pump"]);
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Some(Commands::Ask { text }) => assert_eq!(text.join(" "), "turn on pump"),
            _ => panic!("expected ask"),
        }
    }
}
