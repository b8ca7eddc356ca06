use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use retro_lpl_lib::Settings;
use retro_lpl_lib::settings::{Resolved, settings_path};

pub(crate) fn run_config_path() {
    log::info!("{}", settings_path().display());
}

fn show_path_setting(name: &str, setting: &Resolved) {
    let source_str = format!("({})", setting.source);
    match setting.path() {
        Some(p) => {
            log::info!(
                "  {} {} {}",
                format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                p.display(),
                source_str.if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  {} {}",
                format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                "not set".if_supports_color(Stdout, |t| t.yellow()),
            );
        }
    }
}

fn show_list_setting(name: &str, values: &[String]) {
    let shown = if values.is_empty() {
        "(none)".to_string()
    } else {
        values.join(", ")
    };
    log::info!(
        "  {} {}",
        format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
        shown,
    );
}

/// Show resolved settings and where each one came from.
pub(crate) fn run_config_show(settings: &Settings) {
    let path = settings_path();

    log::info!(
        "{}",
        "retro-lpl Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    if path.exists() {
        log::info!(
            "  Config file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Config file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.yellow()),
        );
    }
    log::info!("");

    show_path_setting("chd_serial", &settings.chd_serial);
    show_path_setting("rdb_dir", &settings.rdb_dir);
    show_list_setting("name_exclusions", &settings.missing.name_exclusions);
    show_list_setting("extension_exclusions", &settings.missing.extension_exclusions);
}
