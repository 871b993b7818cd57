use std::fs;

use anyhow::{bail, Result};

const CONFIG_PATH_ENV: &str = "MD_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yml";

pub fn get() -> Result<String> {
    let config_path = match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) => path,
        Err(_) => DEFAULT_CONFIG_PATH.to_owned(),
    };

    if fs::metadata(&config_path).is_err() {
        bail!("{config_path} specified in {CONFIG_PATH_ENV} environment variable or current directory must exist")
    }

    Ok(config_path)
}
