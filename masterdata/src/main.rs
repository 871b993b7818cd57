use std::sync::Arc;

use anyhow::{bail, Error, Result};
use md_api_rest::{
    context::{ApiRestCtx, ApiRestDaoCtx},
    ApiRestServer,
};
use md_dao::Db;
use md_db_mysql::db::MysqlDb;
use md_db_postgresql::db::PostgresDb;

mod config_path;

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = config_path::get()?;
    let config = md_config::from_path(&config_path)?;

    md_log::init(config.log().display_level(), config.log().level_filter())
        .map_err(|err| Error::msg(err.to_string()))?;

    md_log::info(Some("🚀"), "[Masterdata] Starting");

    if let Err(err) = Db::init_schemas() {
        md_log::error(None, format!("[Masterdata] {err}"));
        return Err(err.into());
    }

    let db = if let Some(mysql) = config.db().mysql() {
        Db::MysqlDb(MysqlDb::new(&mysql.url(), mysql.max_connections()).await?)
    } else if let Some(postgres) = config.db().postgres() {
        Db::PostgresqlDb(PostgresDb::new(&postgres.url(), postgres.max_connections()).await?)
    } else {
        bail!("[Masterdata] No database configuration is specified");
    };

    let api_rest_server = ApiRestServer::new(
        config.api().rest().host(),
        config.api().rest().port(),
        ApiRestCtx::new(ApiRestDaoCtx::new(Arc::new(db))),
    );

    match api_rest_server.run().await {
        Ok(_) => {
            md_log::info(Some("👋"), "[Masterdata] Turned off");
            Ok(())
        }
        Err(err) => {
            md_log::warn(
                Some("👋"),
                format!("[Masterdata] Turned off with error: {err}"),
            );
            Err(err)
        }
    }
}
