use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Terminal dashboard for SGCor insurance production reports
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sgcor-dashboard",
    about = "Terminal dashboard for SGCor insurance production reports",
    version
)]
pub struct Settings {
    /// Path to the delimited production export to load
    pub file: Option<PathBuf>,

    /// Initial view
    #[arg(long, default_value = "overview", value_parser = ["overview", "detailed", "kpis", "comparative", "companies"])]
    pub view: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.sgcor/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    /// Uses `~/.sgcor/last_used.json`.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".sgcor").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to an explicit path, creating parent
    /// directories if needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        // Write to a temp file then rename for atomicity.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Full implementation – accepts args and an explicit config path so that
    /// tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        // Build raw ArgMatches so we can query ValueSource.
        let matches = Settings::command().get_matches_from(args.clone());

        let mut settings = Settings::parse_from(args);

        if settings.clear {
            let _ = LastUsedParams::clear_at(config_path);
            return Self::resolve_flags(settings);
        }

        let last = LastUsedParams::load_from(config_path);

        // Merge last-used values for fields that were NOT explicitly set on
        // the command line (CLI always wins).
        if !is_arg_explicitly_set(&matches, "view") {
            if let Some(v) = last.view {
                settings.view = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }

        settings = Self::resolve_flags(settings);

        // Persist current settings for next run.
        let params = LastUsedParams::from(&settings);
        let _ = params.save_to(config_path);

        settings
    }

    /// Apply the `--debug` flag.
    fn resolve_flags(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            theme: Some(s.theme.clone()),
            view: Some(s.view.clone()),
        }
    }
}

/// `true` when the user supplied the argument on the command line, as opposed
/// to it taking its default or a merged value.
fn is_arg_explicitly_set(matches: &clap::ArgMatches, id: &str) -> bool {
    matches.value_source(id) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Vec<OsString> {
        std::iter::once("sgcor-dashboard")
            .chain(list.iter().copied())
            .map(OsString::from)
            .collect()
    }

    #[test]
    fn test_defaults() {
        let tmp = TempDir::new().unwrap();
        let cfg = LastUsedParams::config_path_in(tmp.path());
        let s = Settings::load_with_last_used_impl(args(&[]), &cfg);
        assert_eq!(s.view, "overview");
        assert_eq!(s.theme, "auto");
        assert_eq!(s.log_level, "INFO");
        assert!(s.file.is_none());
    }

    #[test]
    fn test_positional_file() {
        let tmp = TempDir::new().unwrap();
        let cfg = LastUsedParams::config_path_in(tmp.path());
        let s = Settings::load_with_last_used_impl(args(&["producao.csv"]), &cfg);
        assert_eq!(s.file, Some(PathBuf::from("producao.csv")));
    }

    #[test]
    fn test_last_used_merge_and_cli_precedence() {
        let tmp = TempDir::new().unwrap();
        let cfg = LastUsedParams::config_path_in(tmp.path());

        // First run persists the chosen view/theme.
        let s = Settings::load_with_last_used_impl(
            args(&["--view", "kpis", "--theme", "dark"]),
            &cfg,
        );
        assert_eq!(s.view, "kpis");
        assert!(cfg.exists());

        // Second run without flags picks up the persisted values.
        let s = Settings::load_with_last_used_impl(args(&[]), &cfg);
        assert_eq!(s.view, "kpis");
        assert_eq!(s.theme, "dark");

        // Explicit CLI value wins over last-used.
        let s = Settings::load_with_last_used_impl(args(&["--view", "detailed"]), &cfg);
        assert_eq!(s.view, "detailed");
    }

    #[test]
    fn test_clear_removes_config() {
        let tmp = TempDir::new().unwrap();
        let cfg = LastUsedParams::config_path_in(tmp.path());
        LastUsedParams {
            theme: Some("dark".into()),
            view: Some("kpis".into()),
        }
        .save_to(&cfg)
        .unwrap();
        assert!(cfg.exists());

        let s = Settings::load_with_last_used_impl(args(&["--clear"]), &cfg);
        assert!(!cfg.exists());
        // Cleared run falls back to compiled defaults.
        assert_eq!(s.view, "overview");
    }

    #[test]
    fn test_debug_flag_overrides_log_level() {
        let tmp = TempDir::new().unwrap();
        let cfg = LastUsedParams::config_path_in(tmp.path());
        let s = Settings::load_with_last_used_impl(args(&["--debug"]), &cfg);
        assert_eq!(s.log_level, "DEBUG");
    }

    #[test]
    fn test_load_from_garbage_returns_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("last_used.json");
        std::fs::write(&path, "{not json").unwrap();
        let params = LastUsedParams::load_from(&path);
        assert!(params.theme.is_none());
        assert!(params.view.is_none());
    }
}
