use anyhow::Result;
use sqlx::{Executor, MySql, Pool};

use crate::{db::MysqlDb, model::movie::MovieModel};

const INSERT: &str = "INSERT INTO `movies` (`id`, `name`, `watched`) VALUES (?, ?, ?)";
const SELECT: &str = "SELECT `id`, `name`, `watched` FROM `movies` WHERE `id` = ? LIMIT 1";
const SELECT_ALL: &str = "SELECT `id`, `name`, `watched` FROM `movies`";
const DELETE: &str = "DELETE FROM `movies` WHERE `id` = ?";

pub async fn init(pool: &Pool<MySql>) -> Result<()> {
    md_log::info(Some("🔧"), "[MySQL] Setting up movies table");

    pool.execute("CREATE TABLE IF NOT EXISTS `movies` (`id` varchar(40), `name` varchar(100) NOT NULL, `watched` boolean NOT NULL DEFAULT FALSE, PRIMARY KEY (`id`))").await?;

    tokio::try_join!(
        pool.prepare(INSERT),
        pool.prepare(SELECT),
        pool.prepare(SELECT_ALL),
        pool.prepare(DELETE),
    )?;

    Ok(())
}

impl MysqlDb {
    pub async fn insert_movie(&self, value: &MovieModel) -> Result<u64> {
        Ok(self
            .execute(
                sqlx::query(INSERT)
                    .bind(value.id())
                    .bind(value.name())
                    .bind(value.watched()),
            )
            .await?
            .rows_affected())
    }

    pub async fn select_movie(&self, id: &str) -> Result<Option<MovieModel>> {
        Ok(self.fetch_optional(sqlx::query_as(SELECT).bind(id)).await?)
    }

    pub async fn select_all_movies(&self) -> Result<Vec<MovieModel>> {
        Ok(self.fetch_all(sqlx::query_as(SELECT_ALL)).await?)
    }

    pub async fn delete_movie(&self, id: &str) -> Result<u64> {
        Ok(self
            .execute(sqlx::query(DELETE).bind(id))
            .await?
            .rows_affected())
    }
}
