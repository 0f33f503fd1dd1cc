use clap::{error::ErrorKind, Parser, Subcommand};
use csv_text_mapper::{AppConfig, Extractor, MissingIdPolicy, ReconstructMode, Reconstructor};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "csv-text-mapper", version)]
#[command(about = "Number the unique texts of a ;-delimited table and rebuild it from an edited mapping", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a mapping file and a numbered table from a source table
    Extract {
        input_csv: PathBuf,
        output_mapping_file: PathBuf,
        output_numbered_csv: PathBuf,
        /// Encoding of the input table (default from config, usually utf-8)
        encoding: Option<String>,
    },

    /// Rebuild a table from a numbered table and a translated mapping file
    Reconstruct {
        numbered_csv: PathBuf,
        translated_mapping_file: PathBuf,
        output_csv: PathBuf,
        #[arg(long, value_enum)]
        mode: Option<ReconstructMode>,
        /// Behaviour for identifiers without a mapping entry
        #[arg(long, value_enum)]
        missing_ids: Option<MissingIdPolicy>,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(1);
        }
    };

    let (config, config_error) = AppConfig::load_or_default(&cli.config);

    if let Err(e) = init_tracing(&config.logging.level) {
        eprintln!("Failed to initialise logging: {}", e);
    }
    if let Some(e) = config_error {
        tracing::warn!("Ignoring {}: {}", cli.config.display(), e);
    }

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(format!("csv_text_mapper={}", level).parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}

fn run(command: Commands, config: &AppConfig) -> anyhow::Result<()> {
    match command {
        Commands::Extract {
            input_csv,
            output_mapping_file,
            output_numbered_csv,
            encoding,
        } => {
            let encoding = encoding.unwrap_or_else(|| config.extract.default_encoding.clone());
            Extractor::new(config.extract.missing_ids)
                .with_latin1_fallback(config.extract.latin1_fallback)
                .extract_file(&input_csv, &output_mapping_file, &output_numbered_csv, &encoding)?;
        }
        Commands::Reconstruct {
            numbered_csv,
            translated_mapping_file,
            output_csv,
            mode,
            missing_ids,
        } => {
            let reconstructor = Reconstructor::new(
                mode.unwrap_or(config.reconstruct.mode),
                missing_ids.unwrap_or(config.reconstruct.missing_ids),
            );
            reconstructor.reconstruct_file(&numbered_csv, &translated_mapping_file, &output_csv)?;
        }
    }
    Ok(())
}
