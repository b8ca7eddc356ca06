//! retro-lpl CLI
//!
//! Command-line interface for checking RetroArch playlists against their
//! files and the RetroArch databases.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

use retro_lpl_lib::{Settings, settings};

mod commands;
mod error;

use error::CliError;

#[derive(Parser)]
#[command(name = "retro-lpl")]
#[command(about = "Validate RetroArch playlists", long_about = None)]
struct Cli {
    /// Serial helper for compressed disc images (overrides settings)
    #[arg(long, global = true)]
    chd_serial: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// The playlist a command works on.
#[derive(Args, Clone)]
struct PlaylistArg {
    /// Path to a `.lpl` playlist
    playlist: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare declared CRCs and serials with the files
    ValidateCrc {
        #[command(flatten)]
        target: PlaylistArg,
    },

    /// Rewrite declared CRCs and serials that do not match the files
    UpdateCrc {
        #[command(flatten)]
        target: PlaylistArg,
    },

    /// Look entries up in the RetroArch databases
    CheckDb {
        #[command(flatten)]
        target: PlaylistArg,

        /// Directory holding the `.rdb` files (overrides settings)
        #[arg(long)]
        rdb_dir: Option<PathBuf>,
    },

    /// Check that entry paths exist and match their labels
    ValidatePaths {
        #[command(flatten)]
        target: PlaylistArg,
    },

    /// List files next to playlist entries that the playlist does not include
    FindMissing {
        #[command(flatten)]
        target: PlaylistArg,
    },

    /// Add entries for files the playlist does not include
    AddMissing {
        #[command(flatten)]
        target: PlaylistArg,
    },

    /// Inspect settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the settings file path
    Path,

    /// Show resolved settings and their sources
    Show,
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

fn load_settings(chd_serial: Option<PathBuf>, rdb_dir: Option<PathBuf>) -> Result<Settings, CliError> {
    let file = settings::load_settings()?;
    Ok(Settings::resolve(file, chd_serial, rdb_dir))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::ValidateCrc { target } => {
            let settings = load_settings(cli.chd_serial, None)?;
            commands::crc::run_validate_crc(&target.playlist, settings.chd_serial.path())
        }
        Commands::UpdateCrc { target } => {
            let settings = load_settings(cli.chd_serial, None)?;
            commands::crc::run_update_crc(&target.playlist, settings.chd_serial.path())
        }
        Commands::CheckDb { target, rdb_dir } => {
            let settings = load_settings(cli.chd_serial, rdb_dir)?;
            commands::db::run_check_db(&target.playlist, settings.rdb_dir.path())
        }
        Commands::ValidatePaths { target } => commands::paths::run_validate_paths(&target.playlist),
        Commands::FindMissing { target } => {
            let settings = load_settings(cli.chd_serial, None)?;
            commands::missing::run_find_missing(&target.playlist, &settings.missing)
        }
        Commands::AddMissing { target } => {
            let settings = load_settings(cli.chd_serial, None)?;
            commands::missing::run_add_missing(&target.playlist, &settings.missing)
        }
        Commands::Config { action } => match action {
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
            ConfigAction::Show => {
                let settings = load_settings(cli.chd_serial, None)?;
                commands::config::run_config_show(&settings);
                Ok(())
            }
        },
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        log::error!("Error: {}", e);
        std::process::exit(1);
    }
}
