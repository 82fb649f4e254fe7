//! Application orchestration and command routing.
//!
//! Handles command-line argument parsing and delegates to appropriate command handlers.

use crate::commands;
use crate::config;
use crate::logging;
use crate::transcription::OperatingPoint;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

/// Voice search transcription for the genrx generic-medicine finder
#[derive(Parser)]
#[command(name = "genrx-voice")]
#[command(version)]
#[command(
    long_about = "Voice search transcription for the genrx generic-medicine finder.\n\nUploads a recorded voice query to a batch speech-to-text service, waits for\nthe job to finish and prints the transcript.\n\nEXAMPLES:\n    # Transcribe a recording and print the text\n    $ genrx-voice transcribe query.webm\n\n    # Use the standard tier in Hindi and write the result to a file\n    $ genrx-voice transcribe query.webm --language hi --operating-point standard -o query.txt\n\n    # Show the effective configuration\n    $ genrx-voice config"
)]
#[command(
    after_help = "CONFIGURATION:\n    Config file:        ~/.config/genrx-voice/genrx-voice.toml\n    API key:            SPEECHMATICS_API_KEY (environment or .env)\n    Logs:               ~/.local/state/genrx-voice/genrx-voice.log.*"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Quality tier accepted on the command line.
#[derive(Clone, Copy, ValueEnum)]
enum OperatingPointArg {
    Standard,
    Enhanced,
}

impl From<OperatingPointArg> for OperatingPoint {
    fn from(arg: OperatingPointArg) -> Self {
        match arg {
            OperatingPointArg::Standard => OperatingPoint::Standard,
            OperatingPointArg::Enhanced => OperatingPoint::Enhanced,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Transcribe an audio file
    ///
    /// Uploads the file as a transcription job, polls until the job finishes
    /// and prints the transcript. Press Ctrl-C to cancel.
    #[command(visible_alias = "t")]
    Transcribe {
        /// Path to the audio file to transcribe
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write transcription to file instead of stdout
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<String>,

        /// Language code, overriding the configured one
        #[arg(short, long, value_name = "CODE")]
        language: Option<String>,

        /// Quality tier, overriding the configured one
        #[arg(long, value_enum)]
        operating_point: Option<OperatingPointArg>,
    },

    /// Show the effective configuration
    #[command(visible_alias = "c")]
    Config {
        /// Write a default configuration file if none exists
        #[arg(long)]
        init: bool,
    },

    /// Show recent log entries from the application
    Logs {
        /// Number of lines to show
        #[arg(short = 'n', long, default_value_t = 50)]
        lines: usize,
    },

    /// Generate shell completion script
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Runs the main application based on command-line arguments.
///
/// # Errors
/// - If logging initialization fails
/// - If command execution fails
pub async fn run() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Commands that don't need logging
    match &cli.command {
        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "genrx-voice", &mut io::stdout());
            return Ok(());
        }
        Commands::Logs { lines } => return commands::handle_logs(*lines),
        _ => {}
    }

    logging::init_logging()?;
    config::load_dotenv();

    match cli.command {
        Commands::Transcribe {
            file,
            output,
            language,
            operating_point,
        } => {
            commands::handle_transcribe(file, output, language, operating_point.map(Into::into))
                .await?;
        }
        Commands::Config { init } => {
            commands::handle_config(init)?;
        }
        Commands::Completions { .. } | Commands::Logs { .. } => {
            unreachable!("These commands are handled earlier")
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_transcribe_arguments() {
        let cli = Cli::try_parse_from([
            "genrx-voice",
            "transcribe",
            "query.webm",
            "--language",
            "hi",
            "--operating-point",
            "standard",
        ])
        .unwrap();

        match cli.command {
            Commands::Transcribe {
                file,
                output,
                language,
                operating_point,
            } => {
                assert_eq!(file, PathBuf::from("query.webm"));
                assert_eq!(output, None);
                assert_eq!(language.as_deref(), Some("hi"));
                assert_eq!(
                    operating_point.map(OperatingPoint::from),
                    Some(OperatingPoint::Standard)
                );
            }
            _ => panic!("expected transcribe command"),
        }
    }
    #[test]
    fn test_config_accepts_init_only() {
        let cli = Cli::try_parse_from(["genrx-voice", "config", "--init"]).unwrap();
        assert!(matches!(cli.command, Commands::Config { init: true }));

        assert!(Cli::try_parse_from(["genrx-voice", "config", "--edit"]).is_err());
    }
}
