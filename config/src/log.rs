use serde::Deserialize;

const DEFAULT_LEVEL_FILTER: &str = "info";

/// Both keys may be omitted; levels are shown and `info` is the default filter.
#[derive(Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_display_level")]
    display_level: bool,
    #[serde(default = "default_level_filter")]
    level_filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            display_level: default_display_level(),
            level_filter: default_level_filter(),
        }
    }
}

impl LogConfig {
    pub fn display_level(&self) -> &bool {
        &self.display_level
    }

    pub fn level_filter(&self) -> &str {
        &self.level_filter
    }
}

fn default_display_level() -> bool {
    true
}

fn default_level_filter() -> String {
    DEFAULT_LEVEL_FILTER.to_owned()
}
