use crate::fares::FareTable;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub fares: FareTable,
    pub payment: PaymentConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PaymentConfig {
    /// Simulated gateway settlement delay.
    pub processing_delay_ms: u64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: 2000,
        }
    }
}

impl Config {
    /// Layered load: optional `config/default` file, optional per-mode
    /// file selected by RUN_MODE, then `VIMANA__*` environment overrides
    /// (e.g. `VIMANA__FARES__GST_RATE=0.12`). Every key has a default,
    /// so a bare environment works.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::Environment::with_prefix("VIMANA").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
