use anyhow::Result;
use md_db_mysql::db::MysqlDb;
use md_db_postgresql::db::PostgresDb;
use md_query::{Placeholder, QueryError, Record, Statement};
use movie::MovieDao;
use user::UserDao;

pub mod movie;
pub mod user;
mod util;

pub enum Db {
    MysqlDb(MysqlDb),
    PostgresqlDb(PostgresDb),
}

impl Db {
    /// Placeholder style of the connected dialect.
    pub fn placeholder(&self) -> Placeholder {
        match self {
            Self::MysqlDb(_) => Placeholder::Question,
            Self::PostgresqlDb(_) => Placeholder::Numbered,
        }
    }

    pub async fn ping(&self) -> Result<()> {
        match self {
            Self::MysqlDb(db) => db.ping().await,
            Self::PostgresqlDb(db) => db.ping().await,
        }
    }

    /// Derives the column map of every record type, failing on the first malformed schema.
    pub fn init_schemas() -> Result<(), QueryError> {
        for map in [UserDao::column_map()?, MovieDao::column_map()?] {
            md_log::info(
                Some("🧩"),
                format!(
                    "Dao: Mapped {} fields of {} to table {}",
                    map.len(),
                    map.record(),
                    map.table()
                ),
            );
        }
        Ok(())
    }

    async fn execute_statement(&self, statement: Statement) -> Result<u64> {
        match self {
            Self::MysqlDb(db) => db.execute_statement(statement).await,
            Self::PostgresqlDb(db) => db.execute_statement(statement).await,
        }
    }

    async fn fetch_count(&self, statement: Statement) -> Result<i64> {
        match self {
            Self::MysqlDb(db) => db.fetch_count(statement).await,
            Self::PostgresqlDb(db) => db.fetch_count(statement).await,
        }
    }
}
