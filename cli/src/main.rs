use std::path::PathBuf;

use clap::{Parser, Subcommand};
use raidsight_cli::commands::{self, EffectKind, UptimeOptions};
use raidsight_cli::provider::FileProvider;
use raidsight_core::{AppConfig, FightScope};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Buff and debuff uptime analysis for combat log reports")]
struct Cli {
    /// Path to a report dump (JSON)
    #[arg(short, long)]
    report: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the fights in the report
    Fights,
    /// Aggregate effect uptimes over a fight scope
    Uptimes {
        /// most-recent, last-3, last-5, all-fights or boss-only
        #[arg(short, long)]
        scope: Option<FightScope>,

        #[arg(short, long, value_enum, default_value_t = EffectKind::Debuffs)]
        kind: EffectKind,

        /// Restrict to these target ids (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        targets: Vec<i64>,

        /// Restrict to these ability ids (default: every effect seen)
        #[arg(short, long, value_delimiter = ',')]
        abilities: Vec<i64>,

        /// Only show the curated important effects
        #[arg(long)]
        important: bool,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load_or_default();
    let provider = FileProvider::open(&cli.report)?;

    match cli.command {
        Commands::Fights => commands::list_fights(provider).await,
        Commands::Uptimes {
            scope,
            kind,
            targets,
            abilities,
            important,
            json,
        } => {
            let opts = UptimeOptions {
                scope: scope.unwrap_or(config.default_scope),
                kind,
                targets,
                abilities,
                important,
                important_ids: commands::important_ids_for(kind, &config),
                show_empty: config.show_empty_effects,
                json,
            };
            commands::uptimes(provider, opts).await
        }
    }
}
