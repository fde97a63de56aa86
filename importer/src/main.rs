//! Scout Import CLI - load the planning workbooks into Supabase
//!
//! ```bash
//! scout-import                       # Import everything
//! scout-import --tam --dry-run       # Preview the TAM import
//! scout-import --pipeline --data-dir ./exports
//! ```

use clap::Parser;
use scout_import::config::{DEFAULT_DATA_DIR, DEFAULT_ENV_FILE};
use scout_import::logs::{log_error, log_success};
use scout_import::{Config, ImportSelection, ImportSettings, Importer, SourceFiles, SupabaseClient};
use std::path::PathBuf;

const RULE_WIDTH: usize = 60;

#[derive(Parser)]
#[command(name = "scout-import")]
#[command(
    about = "Import TAM accounts, goals and pipeline deals from the planning workbooks",
    long_about = None
)]
struct Cli {
    /// Import TAM accounts
    #[arg(long)]
    tam: bool,

    /// Import goals
    #[arg(long)]
    goals: bool,

    /// Import pipeline deals
    #[arg(long)]
    pipeline: bool,

    /// Preview without inserting
    #[arg(long)]
    dry_run: bool,

    /// Import all data (default when no import is selected)
    #[arg(long)]
    all: bool,

    /// Directory holding the workbooks
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Env file with the Supabase credentials
    #[arg(long, default_value = DEFAULT_ENV_FILE)]
    env_file: PathBuf,

    /// Year stamped on imported goals
    #[arg(long, default_value = "2026")]
    target_year: i32,

    /// Year for close quarters that name none (default: current year)
    #[arg(long)]
    fallback_year: Option<i32>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let rule = "=".repeat(RULE_WIDTH);

    let config = match Config::from_env_file(&cli.env_file) {
        Ok(config) => config,
        Err(e) => {
            log_error(format!("Error: {}", e));
            std::process::exit(1);
        }
    };

    println!("{}", rule);
    println!("C2A Data Import");
    println!("{}", rule);
    println!("Supabase URL: {}", config.credentials.url);
    println!("Dry Run: {}", cli.dry_run);

    let backend = SupabaseClient::new(&config.credentials);

    let defaults = ImportSettings::default();
    let settings = ImportSettings {
        sources: SourceFiles::in_dir(&cli.data_dir),
        target_year: cli.target_year,
        fallback_quarter_year: cli.fallback_year.unwrap_or(defaults.fallback_quarter_year),
    };
    let selection = ImportSelection::from_flags(cli.tam, cli.goals, cli.pipeline, cli.all);

    let result = Importer::new(&backend, &settings, cli.dry_run).run(selection).await;

    if let Err(e) = result {
        log_error(format!("Error: {}", e));
        std::process::exit(1);
    }

    println!();
    println!("{}", rule);
    log_success("Import complete!");
    println!("{}", rule);
}
