use anyhow::Result;
use sqlx::{Executor, Pool, Postgres};

use crate::{db::PostgresDb, model::user::UserModel};

const INSERT: &str = "INSERT INTO \"users\" (\"id\", \"username\", \"email\", \"phone\", \"date_of_birth\") VALUES ($1, $2, $3, $4, $5)";
const SELECT: &str = "SELECT \"id\", \"username\", \"email\", \"phone\", \"date_of_birth\" FROM \"users\" WHERE \"id\" = $1 LIMIT 1";
const SELECT_ALL: &str = "SELECT \"id\", \"username\", \"email\", \"phone\", \"date_of_birth\" FROM \"users\"";
const DELETE: &str = "DELETE FROM \"users\" WHERE \"id\" = $1";

pub async fn init(pool: &Pool<Postgres>) -> Result<()> {
    md_log::info(Some("🔧"), "[PostgreSQL] Setting up users table");

    pool.execute("CREATE TABLE IF NOT EXISTS \"users\" (\"id\" varchar(40), \"username\" varchar(100), \"email\" varchar(100), \"phone\" varchar(18), \"date_of_birth\" date, PRIMARY KEY (\"id\"))").await?;

    tokio::try_join!(
        pool.prepare(INSERT),
        pool.prepare(SELECT),
        pool.prepare(SELECT_ALL),
        pool.prepare(DELETE),
    )?;

    Ok(())
}

impl PostgresDb {
    pub async fn insert_user(&self, value: &UserModel) -> Result<u64> {
        Ok(self
            .execute(
                sqlx::query(INSERT)
                    .bind(value.id())
                    .bind(value.username())
                    .bind(value.email())
                    .bind(value.phone())
                    .bind(value.date_of_birth()),
            )
            .await?
            .rows_affected())
    }

    pub async fn select_user(&self, id: &str) -> Result<Option<UserModel>> {
        Ok(self.fetch_optional(sqlx::query_as(SELECT).bind(id)).await?)
    }

    pub async fn select_all_users(&self) -> Result<Vec<UserModel>> {
        Ok(self.fetch_all(sqlx::query_as(SELECT_ALL)).await?)
    }

    pub async fn delete_user(&self, id: &str) -> Result<u64> {
        Ok(self
            .execute(sqlx::query(DELETE).bind(id))
            .await?
            .rows_affected())
    }
}
