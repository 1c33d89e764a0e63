use crate::calendar::IntensityScale;
use std::{env, path::PathBuf};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/state.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub scale: IntensityScale,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let data_path = lookup("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let defaults = IntensityScale::default();
        let scale = IntensityScale {
            floor: ratio(&lookup, "HEATMAP_FLOOR", defaults.floor),
            span: ratio(&lookup, "HEATMAP_SPAN", defaults.span),
            ceiling: ratio(&lookup, "HEATMAP_CEILING", defaults.ceiling),
            empty: ratio(&lookup, "HEATMAP_EMPTY", defaults.empty),
        };

        Self {
            port,
            data_path,
            scale,
        }
    }
}

fn ratio(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: f64) -> f64 {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if (0.0..=1.0).contains(&value) => value,
        _ => {
            warn!("ignoring {key}={raw}: expected a number between 0 and 1");
            default
        }
    }
}
