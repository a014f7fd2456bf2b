//! funcsync CLI
//!
//! Entry point for the `funcsync` command-line tool.

use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::{Parser, Subcommand};

use funcsync::console::{ConsoleDecisions, ConsoleOutput};
use funcsync::local::{ProjectConfig, CONFIG_FILE_NAME, SETTINGS_FILE_NAME};
use funcsync::pipeline::{
    download_app_settings, upload_app_settings, verify_app_settings, SyncError, SyncResult,
};
use funcsync::{SeriesGate, SimulatedApp};
use funcsync_settings::{ProjectLanguage, RuntimeVersion};

#[derive(Parser)]
#[command(name = "funcsync")]
#[command(about = "App settings sync and deploy preflight for function apps", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the app's settings into the local settings file
    Download {
        /// Path to the app state file (default: app_state in funcsync.toml)
        #[arg(long)]
        app_state: Option<PathBuf>,

        /// Path to the local settings file
        #[arg(long, default_value = SETTINGS_FILE_NAME)]
        settings_file: PathBuf,

        /// Path to the project config file
        #[arg(long, short = 'c', default_value = CONFIG_FILE_NAME)]
        config: PathBuf,

        /// Choose the settings in one picker instead of per-key prompts
        #[arg(long)]
        picker: bool,

        /// Output the summary in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Upload modified local settings to the app
    Upload {
        /// Path to the app state file (default: app_state in funcsync.toml)
        #[arg(long)]
        app_state: Option<PathBuf>,

        /// Path to the local settings file
        #[arg(long, default_value = SETTINGS_FILE_NAME)]
        settings_file: PathBuf,

        /// Path to the project config file
        #[arg(long, short = 'c', default_value = CONFIG_FILE_NAME)]
        config: PathBuf,

        /// Output the summary in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Verify the app's settings before a deploy
    Verify {
        /// Path to the app state file (default: app_state in funcsync.toml)
        #[arg(long)]
        app_state: Option<PathBuf>,

        /// Path to the project config file
        #[arg(long, short = 'c', default_value = CONFIG_FILE_NAME)]
        config: PathBuf,

        /// Local runtime version, e.g. "~3" (default: version in funcsync.toml)
        #[arg(long)]
        runtime_version: Option<RuntimeVersion>,

        /// Local project language, e.g. "javascript" (default: language in funcsync.toml)
        #[arg(long)]
        language: Option<ProjectLanguage>,

        /// Request a remote build for the deploy
        #[arg(long)]
        remote_build: bool,

        /// Output the summary in JSON format
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let cancel_flag = Arc::new(AtomicBool::new(false));
    {
        let flag = cancel_flag.clone();
        if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
            eprintln!("Warning: failed to install Ctrl-C handler: {e}");
        }
    }

    match run(cli, cancel_flag) {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli, cancel_flag: Arc<AtomicBool>) -> SyncResult<()> {
    let gate = SeriesGate::new();
    let mut decisions = ConsoleDecisions::new(cancel_flag);
    let mut out = ConsoleOutput::new();

    match cli.command {
        Commands::Download {
            app_state,
            settings_file,
            config,
            picker,
            json,
        } => {
            let mut app = open_app(app_state, &config)?;
            let summary = download_app_settings(
                &mut app,
                &settings_file,
                &config,
                picker,
                &gate,
                &mut decisions,
                &mut out,
            )?;

            if json {
                print_json(&summary);
            } else {
                println!(
                    "Downloaded settings for app \"{}\" into {}: {} added, {} updated, \
                     {} matching, {} ignored.",
                    summary.app,
                    settings_file.display(),
                    summary.report.added.len(),
                    summary.report.updated.len(),
                    summary.report.matching.len(),
                    summary.report.user_ignored.len() + summary.report.security_ignored.len(),
                );
            }
        }

        Commands::Upload {
            app_state,
            settings_file,
            config,
            json,
        } => {
            let mut app = open_app(app_state, &config)?;
            let summary = upload_app_settings(
                &mut app,
                &settings_file,
                &config,
                &gate,
                &mut decisions,
                &mut out,
            )?;

            if json {
                print_json(&summary);
            } else {
                println!(
                    "Uploaded settings to app \"{}\": {} added, {} updated, {} matching, \
                     {} ignored.",
                    summary.app,
                    summary.report.added.len(),
                    summary.report.updated.len(),
                    summary.report.matching.len(),
                    summary.report.user_ignored.len() + summary.report.security_ignored.len(),
                );
            }
        }

        Commands::Verify {
            app_state,
            config,
            runtime_version,
            language,
            remote_build,
            json,
        } => {
            let project = ProjectConfig::load(&config)?;
            let version = runtime_version
                .or(project.version)
                .ok_or(SyncError::MissingMetadata("runtime version"))?;
            let language = language
                .or(project.language)
                .ok_or(SyncError::MissingMetadata("project language"))?;
            let remote_build = if remote_build {
                Some(true)
            } else {
                project.remote_build
            };

            let mut app = open_app(app_state, &config)?;
            let summary = verify_app_settings(
                &mut app,
                version,
                language,
                remote_build,
                &gate,
                &mut decisions,
                &mut out,
            )?;

            if json {
                print_json(&summary);
            } else if summary.settings_updated {
                println!(
                    "Settings verified for app \"{}\"; an updated settings map was pushed.",
                    summary.app
                );
            } else {
                println!("Settings verified for app \"{}\"; no changes needed.", summary.app);
            }
        }
    }

    Ok(())
}

/// Open the simulated app from the flag, falling back to the project config.
fn open_app(app_state: Option<PathBuf>, config_path: &Path) -> SyncResult<SimulatedApp> {
    let path = match app_state {
        Some(path) => path,
        None => ProjectConfig::load(config_path)?
            .app_state
            .ok_or(SyncError::MissingMetadata("app state path"))?,
    };
    Ok(SimulatedApp::load(&path)?)
}

fn print_json(summary: &impl serde::Serialize) {
    match serde_json::to_string_pretty(summary) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing output: {e}");
            process::exit(1);
        }
    }
}
