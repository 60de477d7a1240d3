//! `bedrock`: command-line front end for the toolkit.

use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use bedrock_dir_watcher::{
    ChangeBatch, ChangeResponder, FileSystemChangeProcessor, ObserverConfig,
};
use bedrock_scaffold::{ProjectKind, ScaffoldOptions};
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(name = "bedrock")]
#[command(about = "Personal development toolkit: scaffolding and directory watching")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project from an embedded template
    New {
        /// Package name in snake_case (e.g. meal_planner)
        name: String,

        /// Create a command-line application instead of a library
        #[arg(long)]
        app: bool,

        /// Directory to create the project under
        #[arg(long, default_value = ".")]
        dest: PathBuf,

        /// Replace the project directory if it already exists
        #[arg(long)]
        overwrite: bool,
    },

    /// Watch directories and log each debounced change batch
    Watch {
        /// Directories to watch
        #[arg(required = true)]
        directories: Vec<PathBuf>,

        /// Only report paths matching these glob patterns
        #[arg(long = "include")]
        include: Vec<String>,

        /// Never report paths matching these glob patterns
        #[arg(long = "exclude")]
        exclude: Vec<String>,

        /// Suspend processing while this file exists in a watched directory
        #[arg(long = "lock-file")]
        lock_file: Option<String>,

        /// Logging filter directives (e.g. "debug" or "bedrock_dir_watcher=trace")
        #[arg(long = "log-filter")]
        log_filter: Option<String>,
    },
}

/// Logs every batch it is handed; accepts every path.
struct LoggingResponder;

#[async_trait]
impl ChangeResponder for LoggingResponder {
    fn should_process_change(&self, _path: &Path) -> bool {
        true
    }

    async fn handle_directory_change(&mut self, changes: ChangeBatch) -> anyhow::Result<()> {
        for event in &changes {
            info!("{:?} {}", event.kind(), event.path().display());
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::New { name, app, dest, overwrite } => {
            bedrock_logging::init();
            let kind = if app { ProjectKind::App } else { ProjectKind::Package };
            let mut options = ScaffoldOptions::new(name.as_str(), dest).kind(kind);
            if overwrite {
                options = options.overwrite();
            }
            let project_dir = bedrock_scaffold::scaffold(&options)
                .await
                .with_context(|| format!("could not scaffold '{name}'"))?;
            println!("Created {}", project_dir.display());
        }

        Commands::Watch { directories, include, exclude, lock_file, log_filter } => {
            match log_filter {
                Some(directives) => bedrock_logging::init_with_filter(&directives),
                None => bedrock_logging::init(),
            }

            let mut config = ObserverConfig::new(directories);
            for pattern in include {
                config = config.include(pattern);
            }
            for pattern in exclude {
                config = config.exclude(pattern);
            }
            if let Some(name) = lock_file {
                config = config.with_lock_file(name);
            }

            let mut processor = FileSystemChangeProcessor::new(config, LoggingResponder);
            let stop = processor.stop_handle();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("stopping after the current iteration");
                    stop.stop();
                }
            });

            info!("watching; press Ctrl-C to stop");
            processor.process_changes().await?;
        }
    }

    Ok(())
}
