use anyhow::Result;
use clap::{Parser, Subcommand};
use ratebook::cli::commands::{self, GenerateOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ratebook")]
#[command(about = "Schedule-of-Rates workbook engine: inspect rate books, compose estimate workbooks")]
#[command(long_about = "Ratebook - Schedule-of-Rates workbook tooling

Backends are admin-authored .xlsx rate books carrying a 'Master Datas' sheet
(item blocks marked by yellow/red headings) and a 'Groups' sheet (item ->
group/unit/prefix metadata).

COMMANDS:
  inspect     - List detected item blocks and group tables
  generate    - Compose an output workbook from selected items
  day-rates   - Extract the per-day rate table (temporary works backends)

EXAMPLES:
  ratebook inspect buildings.xlsx
  ratebook generate --backend buildings.xlsx -i \"Door - 1.2m\" out.xlsx
  ratebook generate --base-dir /data/backends --category buildings \\
      --module EST --user alice --items-file selection.txt out.xlsx
  ratebook day-rates temporary_works.xlsx --json")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List detected item blocks and group tables of a backend workbook
    Inspect {
        /// Path to the backend .xlsx file
        file: PathBuf,

        /// Emit machine-readable JSON instead of a listing
        #[arg(long)]
        json: bool,
    },

    /// Compose an output workbook from selected items
    Generate {
        /// Backend workbook to read; bypasses --base-dir resolution
        #[arg(long)]
        backend: Option<PathBuf>,

        /// Directory holding registered backends and backends.yaml
        #[arg(long)]
        base_dir: Option<PathBuf>,

        /// Directory of bundled per-category fallback files
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Backend category (required with --base-dir)
        #[arg(long)]
        category: Option<String>,

        /// Module code for default-backend lookup
        #[arg(long)]
        module: Option<String>,

        /// Explicit registered backend id
        #[arg(long)]
        backend_id: Option<u32>,

        /// User name for preference lookup
        #[arg(long)]
        user: Option<String>,

        /// Item names to include (repeatable, comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        items: Vec<String>,

        /// File with one item name per line
        #[arg(long)]
        items_file: Option<PathBuf>,

        /// Output .xlsx path
        output: PathBuf,
    },

    /// Extract the per-day rate table of a temporary-works backend
    DayRates {
        /// Path to the backend .xlsx file
        file: PathBuf,

        /// Emit machine-readable JSON instead of a listing
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { file, json } => commands::run_inspect(&file, json),
        Commands::Generate {
            backend,
            base_dir,
            static_dir,
            category,
            module,
            backend_id,
            user,
            items,
            items_file,
            output,
        } => commands::run_generate(GenerateOptions {
            backend_file: backend,
            base_dir,
            static_dir,
            category,
            module,
            backend_id,
            user,
            items,
            items_file,
            output,
        }),
        Commands::DayRates { file, json } => commands::run_day_rates(&file, json),
    }
}
