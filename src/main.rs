use clap::{Parser, Subcommand};
use std::path::PathBuf;

use voice_memo_backup::backup;
use voice_memo_backup::config::BackupConfig;
use voice_memo_backup::db::SyncDb;

#[derive(Parser, Debug)]
#[command(author, version, about = "Copy Voice Memos into dated, human-readable folders")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Copy every recording into the output location
    Backup {
        /// Path to config file (TOML format)
        #[arg(short, long, default_value = "config.toml")]
        config: PathBuf,
    },
    /// Print the recordings found in the database as JSON lines
    List {
        /// Path to config file (TOML format)
        #[arg(short, long, default_value = "config.toml")]
        config: PathBuf,
    },
    /// Show the tables and columns of the recording database
    Inspect {
        /// Path to config file (TOML format)
        #[arg(short, long, default_value = "config.toml")]
        config: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match args.command {
        Command::Backup { config } => run_backup(config),
        Command::List { config } => list(config),
        Command::Inspect { config } => inspect(config),
    }
}

fn run_backup(config_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = BackupConfig::from_file(&config_path)?;
    let summary = backup::run(&config)?;

    println!(
        "Done: {} moved, {} missing source, {} failed",
        summary.moved.len(),
        summary.missing.len(),
        summary.failed.len()
    );

    if summary.has_failures() {
        return Err(format!("{} recording(s) failed to copy", summary.failed.len()).into());
    }
    Ok(())
}

fn list(config_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = BackupConfig::from_file(&config_path)?;
    let library = backup::load_library(&config)?;

    for recording in &library.recordings {
        println!("{}", serde_json::to_string(recording)?);
    }
    Ok(())
}

fn inspect(config_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = BackupConfig::from_file(&config_path)?;
    let db_path = config.database_path();
    let db = SyncDb::connect(&db_path)?;

    println!("SQLite database: {}", db_path.display());
    let result = (|| -> voice_memo_backup::Result<()> {
        for table in db.list_tables()? {
            println!("{}", table);
            for column in db.table_columns(&table)? {
                println!(
                    "  {} {}{}{}",
                    column.name,
                    column.declared_type,
                    if column.not_null { " NOT NULL" } else { "" },
                    if column.primary_key > 0 { " PRIMARY KEY" } else { "" }
                );
            }
        }
        Ok(())
    })();
    db.close();

    result?;
    Ok(())
}
