//! Where the CLI keeps its files: `$BUDGET_HOME` if set, else `~/.budget`.

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const CONFIG_FILE: &str = "config.toml";

fn resolve_home(budget_home: Option<String>, home: Option<String>) -> Result<PathBuf> {
    if let Some(dir) = budget_home.filter(|d| !d.trim().is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = home.context("neither BUDGET_HOME nor HOME is set")?;
    Ok(PathBuf::from(home).join(".budget"))
}

pub fn budget_home() -> Result<PathBuf> {
    resolve_home(env::var("BUDGET_HOME").ok(), env::var("HOME").ok())
}

/// The config file path; its directory may not exist yet.
pub fn config_file() -> Result<PathBuf> {
    Ok(budget_home()?.join(CONFIG_FILE))
}

/// [`config_file`], creating the budget directory first.
pub fn ensure_config_file() -> Result<PathBuf> {
    let path = config_file()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_home_override_wins() {
        let dir = resolve_home(Some("/srv/budget".into()), Some("/home/luana".into())).unwrap();
        assert_eq!(dir, PathBuf::from("/srv/budget"));
    }

    #[test]
    fn test_defaults_to_dot_budget_under_home() {
        let dir = resolve_home(Some("  ".into()), Some("/home/luana".into())).unwrap();
        assert_eq!(dir, PathBuf::from("/home/luana/.budget"));
        assert!(resolve_home(None, None).is_err());
    }
}
