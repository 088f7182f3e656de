//! Optional TOML configuration file.
//!
//! ```toml
//! utc_offset = -5.0
//! elevation = 10.0
//!
//! [settings]
//! method = "mwl"
//! asr = "hanafi"
//! hijri_correction = -1
//! ```
//!
//! Command-line flags take precedence over file values.

use std::path::Path;

use anyhow::{Context, Result};
use salat_base::PrayerSettings;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Default zone offset, hours east of UTC.
    pub utc_offset: Option<f64>,
    /// Default observer elevation, metres.
    pub elevation: Option<f64>,
    pub settings: PrayerSettings,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.settings.validate()?;
        Ok(config)
    }
}
