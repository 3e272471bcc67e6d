//! Command-line configuration.
//!
//! Arguments are strict `--key value` pairs; there are no positional
//! arguments and no boolean switches.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::catalog::ScenarioId;
use crate::error::{Error, Result};
use crate::presenter::BarPalette;

pub const USAGE: &str = "usage: lampu-tui [--mode interactive|snapshot|json] [--scenario <id>] \
[--palette bucketed|uniform] [--width N] [--height N] [--tick-ms N] \
[--log-level <filter>] [--log-file <path>]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Interactive,
    Snapshot,
    Json,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "interactive" => Ok(Mode::Interactive),
            "snapshot" => Ok(Mode::Snapshot),
            "json" => Ok(Mode::Json),
            _ => Err(invalid("mode", s)),
        }
    }
}

impl FromStr for BarPalette {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bucketed" => Ok(BarPalette::Bucketed),
            "uniform" => Ok(BarPalette::Uniform),
            _ => Err(invalid("palette", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    pub scenario: ScenarioId,
    pub palette: BarPalette,
    pub width: u16,
    pub height: u16,
    pub tick: Duration,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Interactive,
            scenario: ScenarioId::TwoWay,
            palette: BarPalette::Bucketed,
            width: 120,
            height: 32,
            tick: Duration::from_millis(100),
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_args(std::env::args().skip(1))
    }

    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let m = parse_args(args)?;
        let mut config = Config::default();

        if let Some(mode) = m.get("mode") {
            config.mode = mode.parse()?;
        }
        if let Some(scenario) = m.get("scenario") {
            config.scenario = scenario.parse()?;
        }
        if let Some(palette) = m.get("palette") {
            config.palette = palette.parse()?;
        }
        if m.contains_key("width") {
            config.width = get_u16(&m, "width")?;
        }
        if m.contains_key("height") {
            config.height = get_u16(&m, "height")?;
        }
        if m.contains_key("tick-ms") {
            let ms = get_u64(&m, "tick-ms")?;
            if ms == 0 {
                return Err(invalid("tick-ms", "0"));
            }
            config.tick = Duration::from_millis(ms);
        }
        if let Ok(level) = get_str(&m, "log-level") {
            config.log_level = level.to_string();
        }
        if let Ok(path) = get_str(&m, "log-file") {
            config.log_file = Some(PathBuf::from(path));
        }
        Ok(config)
    }
}

fn parse_args<I, S>(args: I) -> Result<HashMap<String, String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out = HashMap::new();
    let mut args = args.into_iter().map(Into::into);
    while let Some(a) = args.next() {
        if !a.starts_with("--") {
            return Err(Error::UnexpectedArg(a));
        }
        let key = a.trim_start_matches("--").to_string();
        let val = args
            .next()
            .ok_or_else(|| Error::MissingValue(key.clone()))?;
        out.insert(key, val);
    }
    Ok(out)
}

fn get_str<'a>(m: &'a HashMap<String, String>, k: &str) -> Result<&'a str> {
    m.get(k)
        .map(|s| s.as_str())
        .ok_or_else(|| Error::MissingValue(k.to_string()))
}

fn get_u64(m: &HashMap<String, String>, k: &str) -> Result<u64> {
    let raw = get_str(m, k)?;
    raw.parse::<u64>().map_err(|_| invalid(k, raw))
}

fn get_u16(m: &HashMap<String, String>, k: &str) -> Result<u16> {
    let raw = get_str(m, k)?;
    raw.parse::<u16>().map_err(|_| invalid(k, raw))
}

fn invalid(key: &str, value: &str) -> Error {
    Error::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}
