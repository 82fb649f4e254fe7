//! Configuration command.
//!
//! Shows the effective configuration, or writes a default file with `--init`.

use std::path::Path;

use crate::config::{self, GenrxConfig};

/// Handles the `config` command.
///
/// # Arguments
/// * `init` - Write a default configuration file if none exists
///
/// # Errors
/// - If the config file cannot be read, written or parsed
pub fn handle_config(init: bool) -> anyhow::Result<()> {
    let config_path = config::get_config_path()?;

    if init {
        if config_path.exists() {
            tracing::debug!("Config file already exists: {}", config_path.display());
        } else {
            GenrxConfig::default().save()?;
            println!("Wrote default configuration to {}", config_path.display());
        }
    }

    let settings = GenrxConfig::load()?;
    let report = render_config(
        &settings,
        &config_path,
        config_path.exists(),
        config::get_api_key().is_some(),
    )?;
    println!("{report}");

    Ok(())
}

/// Formats the effective configuration for display. The key itself is never shown.
fn render_config(
    settings: &GenrxConfig,
    config_path: &Path,
    file_present: bool,
    key_set: bool,
) -> anyhow::Result<String> {
    let rendered = toml::to_string_pretty(settings)?;

    let mut report = format!("Config file: {}\n", config_path.display());
    if !file_present {
        report.push_str("(not present, showing defaults; run with --init to create it)\n");
    }
    report.push('\n');
    report.push_str(rendered.trim_end());
    report.push_str("\n\n");

    let key_state = if key_set { "set" } else { "not set" };
    report.push_str(&format!("{}: {key_state}", config::API_KEY_ENV));
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_defaults_without_file() {
        let report = render_config(
            &GenrxConfig::default(),
            Path::new("/tmp/genrx-voice.toml"),
            false,
            false,
        )
        .unwrap();

        assert!(report.starts_with("Config file: /tmp/genrx-voice.toml\n"));
        assert!(report.contains("run with --init"));
        assert!(report.contains("[speechmatics]"));
        assert!(report.ends_with("SPEECHMATICS_API_KEY: not set"));
    }

    #[test]
    fn test_render_existing_file_with_key() {
        let report = render_config(
            &GenrxConfig::default(),
            Path::new("/tmp/genrx-voice.toml"),
            true,
            true,
        )
        .unwrap();

        assert!(!report.contains("run with --init"));
        assert!(report.ends_with("SPEECHMATICS_API_KEY: set"));
    }
}
