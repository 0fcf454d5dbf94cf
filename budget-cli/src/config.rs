use anyhow::{Context, Result, anyhow};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::home::{config_file, ensure_config_file};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplaySection,
    #[serde(default)]
    pub session: SessionSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// Printed before every amount, e.g. `CAD 1.234,56`.
    pub currency_prefix: String,
    /// Columns taken by the longest chart bar.
    pub chart_width: usize,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            currency_prefix: "CAD".to_string(),
            chart_width: 40,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSection {
    /// IANA zone used to pick the month the shell opens on.
    pub timezone: String,
    pub log_level: String,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            timezone: "America/Toronto".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl SessionSection {
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow!("timezone \"{}\": {e}", self.timezone))
    }
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_file()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config) -> Result<PathBuf> {
    let p = ensure_config_file()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(p)
}

pub fn init_config() -> Result<()> {
    let p = config_file()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let p = save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config(cfg: &Config) -> Result<()> {
    println!("# {}", config_file()?.display());
    print!("{}", toml::to_string_pretty(cfg).context("serialize config")?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let cfg: Config = toml::from_str("[display]\nchart_width = 20\n").unwrap();
        assert_eq!(cfg.display.chart_width, 20);
        assert_eq!(cfg.display.currency_prefix, "CAD");
        assert_eq!(cfg.session.timezone, "America/Toronto");
        assert_eq!(cfg.session.log_level, "warn");
    }

    #[test]
    fn test_timezone_is_validated() {
        let mut session = SessionSection::default();
        assert_eq!(session.tz().unwrap(), chrono_tz::America::Toronto);
        session.timezone = "Mars/Olympus".into();
        assert!(session.tz().is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let p = std::env::temp_dir().join("budget-no-such-config.toml");
        let cfg = load_config_from(&p).unwrap();
        assert_eq!(cfg.display.currency_prefix, "CAD");
    }

    #[test]
    fn test_defaults_survive_a_write_read_cycle() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(text.contains("[display]"));
        assert!(text.contains("currency_prefix = \"CAD\""));
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.session.timezone, "America/Toronto");
    }
}
