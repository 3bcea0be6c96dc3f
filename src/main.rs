use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use liftlog::catalog::ExerciseCatalog;
use liftlog::config::{self, AppConfig};
use liftlog::render;
use liftlog::session::Session;
use liftlog::WorkoutStore;

#[derive(Parser)]
#[command(name = "liftlog")]
#[command(about = "Log workouts and track weekly and monthly goals")]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (the default)
    Session,
    /// Print the exercise catalog
    Catalog {
        /// Only list exercises whose name contains this text
        #[arg(short, long)]
        query: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        init: bool,
    },
}

/// Initialize tracing on stderr so stdout stays clean for the session
fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_filter.clone()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref());
    init_tracing(&config);

    let catalog = ExerciseCatalog::builtin();
    tracing::debug!(exercises = catalog.len(), "Loaded exercise catalog");

    match cli.command {
        Some(Commands::Catalog { query, json }) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&catalog.tree())?);
            } else if let Some(query) = query {
                for exercise in catalog.search(&query) {
                    println!("{} ({})", exercise.name, exercise.category.as_str());
                }
            } else {
                print!("{}", render::render_catalog_tree(&catalog.tree()));
            }
        }
        Some(Commands::Config { init }) => {
            let path = match cli.config {
                Some(path) => path,
                None => config::get_config_path()?,
            };
            if init {
                config
                    .save_to(&path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Wrote {}", path.display());
            } else {
                println!("# {}", path.display());
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        }
        Some(Commands::Session) | None => {
            let mut store = WorkoutStore::from_config(&config);
            tracing::info!("Starting session; workouts are kept in memory only");

            let stdin = io::stdin();
            let stdout = io::stdout();
            Session::new(&mut store, &catalog, &config).run(stdin.lock(), stdout.lock())?;

            tracing::info!(
                completed = store.workout_history().len(),
                "Session ended"
            );
        }
    }

    Ok(())
}
