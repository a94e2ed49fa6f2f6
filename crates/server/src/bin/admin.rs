//! Administrative commands: schema migration, CSV import and row count.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::error;

use lessons_core::lesson::migrations;
use lessons_core::{CsvImporter, LessonStore, SqliteLessonStore};
use lessons_server::startup::{init_tracing_with_writer, load_runtime_config};

/// Lesson catalog administration.
#[derive(Debug, Parser)]
#[command(name = "lessons-admin", version, about = "Lesson catalog administration")]
struct Cli {
    /// Config file (defaults to $LESSONS_CONFIG, then config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Manage the lessons table schema.
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Import lessons from a CSV file with a header row.
    Import {
        /// Path to the CSV file
        file: PathBuf,
        /// Rows inserted per batch (overrides import.batch_size)
        #[arg(short, long)]
        batch_size: Option<usize>,
    },
    /// Print the number of stored lessons.
    Count,
}

#[derive(Debug, Subcommand)]
enum MigrateAction {
    /// Create the lessons table.
    Up,
    /// Drop the lessons table.
    Down,
    /// Show whether the migration is applied.
    Status,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing_with_writer(std::io::stderr);

    let mut config = load_runtime_config(cli.config)?;
    let db_path = config.database.path.clone();

    match cli.command {
        Commands::Migrate { action } => match action {
            MigrateAction::Up => {
                let applied = migrations::up_at(&db_path).context("Migration failed")?;
                if applied {
                    println!("Applied {}", migrations::CREATE_LESSONS_VERSION);
                } else {
                    println!("Already applied: {}", migrations::CREATE_LESSONS_VERSION);
                }
            }
            MigrateAction::Down => {
                let reverted = migrations::down_at(&db_path).context("Rollback failed")?;
                if reverted {
                    println!("Reverted {}", migrations::CREATE_LESSONS_VERSION);
                } else {
                    println!("Not applied: {}", migrations::CREATE_LESSONS_VERSION);
                }
            }
            MigrateAction::Status => {
                let status = migrations::status_at(&db_path).context("Status check failed")?;
                match status.applied_at {
                    Some(at) => println!("{} applied at {}", status.version, at.to_rfc3339()),
                    None => println!("{} pending", status.version),
                }
            }
        },
        Commands::Import { file, batch_size } => {
            if let Some(size) = batch_size {
                config.import.batch_size = size;
            }
            let store: Arc<dyn LessonStore> = Arc::new(
                SqliteLessonStore::new(&db_path).context("Failed to open lesson store")?,
            );
            let importer = CsvImporter::new(store, config.import.clone());
            let report = importer
                .import_path(&file)
                .with_context(|| format!("Import of {:?} failed", file))?;

            println!(
                "Inserted {} lessons in {} batches, skipped {}",
                report.inserted,
                report.batches,
                report.skipped.len()
            );
            for row in &report.skipped {
                match row.line {
                    Some(line) => println!("  line {}: {}", line, row.message),
                    None => println!("  {}", row.message),
                }
            }
        }
        Commands::Count => {
            let store = SqliteLessonStore::new(&db_path).context("Failed to open lesson store")?;
            println!("{}", store.count().context("Count failed")?);
        }
    }

    Ok(())
}
