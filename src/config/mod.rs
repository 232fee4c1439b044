//! Persisted user defaults for the CLI front end.
//!
//! The engine itself never reads these; the CLI merges them with flags and
//! passes an explicit options struct into each run.

use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ForecastError;
use crate::forecast::calendar::{ScaleStrategy, WeekStart};

const DEFAULT_DIR_NAME: &str = ".fincal";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// User defaults mirrored into every forecast run unless overridden.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub starting_balance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_calendar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debit_calendar: Option<String>,
    #[serde(default)]
    pub week_start: WeekStart,
    #[serde(default)]
    pub scale: ScaleStrategy,
    #[serde(default = "Settings::default_start_from_tomorrow")]
    pub start_from_tomorrow: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            starting_balance: 0.0,
            end_date: None,
            credit_calendar: None,
            debit_calendar: None,
            week_start: WeekStart::default(),
            scale: ScaleStrategy::default(),
            start_from_tomorrow: true,
        }
    }
}

impl Settings {
    fn default_start_from_tomorrow() -> bool {
        true
    }
}

/// Returns the application data directory, defaulting to `~/.fincal`.
/// `FINCAL_HOME` overrides it.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("FINCAL_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Loads and saves the settings file with atomic writes.
pub struct SettingsManager {
    path: PathBuf,
}

impl SettingsManager {
    pub fn new() -> Result<Self, ForecastError> {
        Self::from_base(app_data_dir())
    }

    pub fn with_base_dir(base: impl Into<PathBuf>) -> Result<Self, ForecastError> {
        Self::from_base(base.into())
    }

    fn from_base(base: PathBuf) -> Result<Self, ForecastError> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    /// Missing files load as defaults; a present-but-corrupt file is an error
    /// rather than a silent reset.
    pub fn load(&self) -> Result<Settings, ForecastError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Settings::default())
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<(), ForecastError> {
        let json = serde_json::to_string_pretty(settings)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), ForecastError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
