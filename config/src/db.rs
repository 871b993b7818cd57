use anyhow::{Error, Result};
use serde::Deserialize;

use self::{mysql::DbMysqlConfig, postgres::DbPostgresConfig};

pub mod mysql;
pub mod postgres;

#[derive(Deserialize)]
pub struct DbConfig {
    mysql: Option<DbMysqlConfig>,
    postgres: Option<DbPostgresConfig>,
}

impl DbConfig {
    pub fn mysql(&self) -> &Option<DbMysqlConfig> {
        &self.mysql
    }

    pub fn postgres(&self) -> &Option<DbPostgresConfig> {
        &self.postgres
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match (&self.mysql, &self.postgres) {
            (Some(_), None) | (None, Some(_)) => Ok(()),
            (None, None) => Err(Error::msg("No database configuration is specified")),
            (Some(_), Some(_)) => Err(Error::msg(
                "Only one of db.mysql and db.postgres can be specified",
            )),
        }
    }
}
