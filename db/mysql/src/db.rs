use anyhow::Result;
use md_query::Statement;
use sqlx::{
    mysql::{MySqlArguments, MySqlPoolOptions, MySqlQueryResult, MySqlRow},
    query::{Query, QueryAs},
    Error, MySql, Pool,
};

use crate::{
    query::{movie, user},
    value::arguments,
};

const COMPONENT: &str = "MySQL";
const PING: &str = "SELECT 1";

pub struct MysqlDb {
    pool: Pool<MySql>,
}

impl MysqlDb {
    pub async fn new(url: &str, max_connections: &u32) -> Result<Self> {
        md_log::info(Some("⚡"), "MySQL: Initializing component");

        let pool = MySqlPoolOptions::new()
            .max_connections(*max_connections)
            .connect(url)
            .await?;

        Self::init(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn execute(
        &self,
        query: Query<'_, MySql, MySqlArguments>,
    ) -> Result<MySqlQueryResult, Error> {
        query.execute(&self.pool).await
    }

    pub async fn fetch_optional<T: Send + Unpin + for<'r> sqlx::FromRow<'r, MySqlRow>>(
        &self,
        query: QueryAs<'_, MySql, T, MySqlArguments>,
    ) -> Result<Option<T>, Error> {
        query.fetch_optional(&self.pool).await
    }

    pub async fn fetch_all<T: Send + Unpin + for<'r> sqlx::FromRow<'r, MySqlRow>>(
        &self,
        query: QueryAs<'_, MySql, T, MySqlArguments>,
    ) -> Result<Vec<T>, Error> {
        query.fetch_all(&self.pool).await
    }

    pub async fn ping(&self) -> Result<()> {
        self.execute(sqlx::query(PING)).await?;
        Ok(())
    }

    /// Runs a built statement and returns the affected row count.
    pub async fn execute_statement(&self, statement: Statement) -> Result<u64> {
        let (sql, params) = statement.into_parts();
        md_log::statement(COMPONENT, &sql, params.len());

        Ok(self
            .execute(sqlx::query_with(&sql, arguments(params)))
            .await?
            .rows_affected())
    }

    pub async fn fetch_all_statement<T: Send + Unpin + for<'r> sqlx::FromRow<'r, MySqlRow>>(
        &self,
        statement: Statement,
    ) -> Result<Vec<T>> {
        let (sql, params) = statement.into_parts();
        md_log::statement(COMPONENT, &sql, params.len());

        Ok(self
            .fetch_all(sqlx::query_as_with(&sql, arguments(params)))
            .await?)
    }

    /// Runs a built `SELECT COUNT(*)` statement.
    pub async fn fetch_count(&self, statement: Statement) -> Result<i64> {
        let (sql, params) = statement.into_parts();
        md_log::statement(COMPONENT, &sql, params.len());

        Ok(sqlx::query_scalar_with(&sql, arguments(params))
            .fetch_one(&self.pool)
            .await?)
    }

    async fn init(pool: &Pool<MySql>) -> Result<()> {
        user::init(pool).await?;
        movie::init(pool).await?;
        Ok(())
    }
}
