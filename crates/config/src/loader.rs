use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use tracing::{debug, warn};

use crate::{env_subst::substitute_env, schema::StrongroomConfig};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &["strongroom.toml", "strongroom.json"];

/// Override for the config directory, set via `set_config_dir()`.
static CONFIG_DIR_OVERRIDE: Mutex<Option<PathBuf>> = Mutex::new(None);

/// Set a custom config directory. When set, config discovery only looks in
/// this directory (project-local and user-global paths are skipped).
/// Can be called multiple times (e.g. in tests) — each call replaces the
/// previous override.
pub fn set_config_dir(path: PathBuf) {
    if let Ok(mut dir) = CONFIG_DIR_OVERRIDE.lock() {
        *dir = Some(path);
    }
}

/// Clear the config directory override, restoring default discovery.
pub fn clear_config_dir() {
    if let Ok(mut dir) = CONFIG_DIR_OVERRIDE.lock() {
        *dir = None;
    }
}

fn config_dir_override() -> Option<PathBuf> {
    CONFIG_DIR_OVERRIDE.lock().ok().and_then(|d| d.clone())
}

/// Load config from the given path (TOML or JSON by extension).
pub fn load_config(path: &Path) -> anyhow::Result<StrongroomConfig> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let raw = substitute_env(&raw);
    parse_config(&raw, path)
}

fn parse_config(raw: &str, path: &Path) -> anyhow::Result<StrongroomConfig> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    match ext {
        "json" => serde_json::from_str(raw)
            .map_err(|e| anyhow::anyhow!("invalid JSON in {}: {e}", path.display())),
        _ => toml::from_str(raw)
            .map_err(|e| anyhow::anyhow!("invalid TOML in {}: {e}", path.display())),
    }
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./strongroom.{toml,json}` (project-local)
/// 2. `~/.config/strongroom/strongroom.{toml,json}` (user-global)
///
/// Returns `StrongroomConfig::default()` if no config file is found or the
/// file fails to parse. A broken config degrades to defaults, never aborts.
pub fn discover_and_load() -> StrongroomConfig {
    if let Some(path) = find_config_file() {
        debug!(path = %path.display(), "loading config");
        match load_config(&path) {
            Ok(cfg) => return cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            },
        }
    } else {
        debug!("no config file found, using defaults");
    }
    StrongroomConfig::default()
}

/// Find the first config file in standard locations.
///
/// When a config dir override is set, only that directory is searched —
/// project-local and user-global paths are skipped for isolation.
fn find_config_file() -> Option<PathBuf> {
    if let Some(dir) = config_dir_override() {
        for name in CONFIG_FILENAMES {
            let p = dir.join(name);
            if p.exists() {
                return Some(p);
            }
        }
        // Override is set — don't fall through to other locations.
        return None;
    }

    // Project-local
    for name in CONFIG_FILENAMES {
        let p = PathBuf::from(name);
        if p.exists() {
            return Some(p);
        }
    }

    // User-global: ~/.config/strongroom/
    if let Some(dir) = home_dir().map(|h| h.join(".config").join("strongroom")) {
        for name in CONFIG_FILENAMES {
            let p = dir.join(name);
            if p.exists() {
                return Some(p);
            }
        }
    }

    None
}

/// Returns the config directory: override, or `~/.config/strongroom/`.
pub fn config_dir() -> Option<PathBuf> {
    if let Some(dir) = config_dir_override() {
        return Some(dir);
    }
    home_dir().map(|h| h.join(".config").join("strongroom"))
}

fn home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;

    #[test]
    fn loads_toml_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strongroom.toml");
        std::fs::write(&path, "[domains]\npublic = \"deposit.example.com\"\n").unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.domains.public, "deposit.example.com");
    }

    #[test]
    fn loads_json_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strongroom.json");
        std::fs::write(&path, r#"{"payments": {"default_currency": "usd"}}"#).unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.payments.default_currency, "usd");
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strongroom.toml");
        std::fs::write(&path, "this is not toml = [").unwrap();

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn env_substitution_applies_to_values() {
        unsafe { std::env::set_var("STRONGROOM_TEST_PUBLIC", "pub.example.com") };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strongroom.toml");
        std::fs::write(&path, "[domains]\npublic = \"${STRONGROOM_TEST_PUBLIC}\"\n").unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.domains.public, "pub.example.com");
        unsafe { std::env::remove_var("STRONGROOM_TEST_PUBLIC") };
    }
}
