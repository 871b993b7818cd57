use std::fs::File;

use anyhow::{Context, Result};
use serde::Deserialize;

use self::{api::ApiConfig, db::DbConfig, log::LogConfig};

pub mod api;
pub mod db;
pub mod log;

#[derive(Deserialize)]
pub struct Config {
    #[serde(default)]
    log: LogConfig,
    db: DbConfig,
    api: ApiConfig,
}

impl Config {
    pub fn log(&self) -> &LogConfig {
        &self.log
    }

    pub fn db(&self) -> &DbConfig {
        &self.db
    }

    pub fn api(&self) -> &ApiConfig {
        &self.api
    }
}

pub fn from_path(path: &str) -> Result<Config> {
    let file = File::open(path).with_context(|| format!("Failed to open config file {path}"))?;
    from_reader(file).with_context(|| format!("Failed to parse config file {path}"))
}

pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Config> {
    let config = serde_yaml::from_reader::<_, Config>(reader)?;
    config.db.validate()?;
    Ok(config)
}
