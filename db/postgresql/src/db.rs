use anyhow::Result;
use md_query::Statement;
use sqlx::{
    postgres::{PgArguments, PgPoolOptions, PgQueryResult, PgRow},
    query::{Query, QueryAs},
    Error, Pool, Postgres,
};

use crate::{
    query::{movie, user},
    value::arguments,
};

const COMPONENT: &str = "PostgreSQL";
const PING: &str = "SELECT 1";

pub struct PostgresDb {
    pool: Pool<Postgres>,
}

impl PostgresDb {
    pub async fn new(url: &str, max_connections: &u32) -> Result<Self> {
        md_log::info(Some("⚡"), "PostgreSQL: Initializing component");

        let pool = PgPoolOptions::new()
            .max_connections(*max_connections)
            .connect(url)
            .await?;

        Self::init(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn execute(
        &self,
        query: Query<'_, Postgres, PgArguments>,
    ) -> Result<PgQueryResult, Error> {
        query.execute(&self.pool).await
    }

    pub async fn fetch_optional<T: Send + Unpin + for<'r> sqlx::FromRow<'r, PgRow>>(
        &self,
        query: QueryAs<'_, Postgres, T, PgArguments>,
    ) -> Result<Option<T>, Error> {
        query.fetch_optional(&self.pool).await
    }

    pub async fn fetch_all<T: Send + Unpin + for<'r> sqlx::FromRow<'r, PgRow>>(
        &self,
        query: QueryAs<'_, Postgres, T, PgArguments>,
    ) -> Result<Vec<T>, Error> {
        query.fetch_all(&self.pool).await
    }

    pub async fn ping(&self) -> Result<()> {
        self.execute(sqlx::query(PING)).await?;
        Ok(())
    }

    pub async fn execute_statement(&self, statement: Statement) -> Result<u64> {
        let (sql, params) = statement.into_parts();
        md_log::statement(COMPONENT, &sql, params.len());

        Ok(self
            .execute(sqlx::query_with(&sql, arguments(params)))
            .await?
            .rows_affected())
    }

    pub async fn fetch_all_statement<T: Send + Unpin + for<'r> sqlx::FromRow<'r, PgRow>>(
        &self,
        statement: Statement,
    ) -> Result<Vec<T>> {
        let (sql, params) = statement.into_parts();
        md_log::statement(COMPONENT, &sql, params.len());

        Ok(self
            .fetch_all(sqlx::query_as_with(&sql, arguments(params)))
            .await?)
    }

    pub async fn fetch_count(&self, statement: Statement) -> Result<i64> {
        let (sql, params) = statement.into_parts();
        md_log::statement(COMPONENT, &sql, params.len());

        Ok(sqlx::query_scalar_with(&sql, arguments(params))
            .fetch_one(&self.pool)
            .await?)
    }

    async fn init(pool: &Pool<Postgres>) -> Result<()> {
        user::init(pool).await?;
        movie::init(pool).await?;
        Ok(())
    }
}
