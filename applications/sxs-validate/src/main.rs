/// SxS Validate - validates SxS evaluation recordings
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use sxs_core::limits;
use sxs_validate::{
    commands::{self, ValidateOptions},
    ValidatorConfig,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sxs-validate")]
#[command(about = "Validate audio recordings for side-by-side model evaluation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one or more audio files and print a JSON report
    Validate {
        /// Audio files to validate
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Expected spoken language (e.g. ko-KR)
        #[arg(short, long, env = "SXS_LANGUAGE")]
        language: Option<String>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Upload valid files and submit the evaluation record
        #[arg(long)]
        submit: bool,
    },
    /// List supported file extensions
    Formats,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sxs_validate=info,sxs_audio=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            files,
            language,
            config,
            submit,
        } => {
            let config = ValidatorConfig::load(config.as_deref())?;
            let options = ValidateOptions {
                files,
                expected_language: language,
                submit,
            };

            let report = commands::validate_files(&options, &config).await?;
            println!("{}", report.to_json(config.output.pretty)?);

            if report.all_valid() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Formats => {
            for extension in limits::SUPPORTED_EXTENSIONS {
                println!("{}", extension);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
