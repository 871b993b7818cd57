use std::sync::OnceLock;

use anyhow::Result;
use md_db_mysql::model::movie::MovieModel as MovieMysqlModel;
use md_db_postgresql::model::movie::MovieModel as MoviePostgresModel;
use md_query::{
    build_count, build_patch, build_query, ColumnMap, FieldDef, FieldKind, Filter, MatchRule,
    PatchDocument, QueryError, Record, RecordSchema, Value,
};

use crate::{util::id_or_generate, Db};

const MOVIE_FIELDS: &[FieldDef] = &[
    FieldDef::new("id", "id", FieldKind::Text).primary_key(),
    FieldDef::new("name", "name", FieldKind::Text)
        .rule(MatchRule::Contains)
        .not_null(),
    FieldDef::new("watched", "watched", FieldKind::Bool).not_null(),
];

pub static MOVIE_SCHEMA: RecordSchema = RecordSchema::new("movie", "movies", MOVIE_FIELDS);

pub struct MovieDao {
    id: String,
    name: String,
    watched: bool,
}

impl Record for MovieDao {
    fn schema() -> &'static RecordSchema {
        &MOVIE_SCHEMA
    }

    fn column_map() -> Result<&'static ColumnMap, QueryError> {
        static MAP: OnceLock<Result<ColumnMap, QueryError>> = OnceLock::new();
        ColumnMap::cached(&MAP, &MOVIE_SCHEMA)
    }
}

impl MovieDao {
    pub fn new(id: &Option<String>, name: &str, watched: &bool) -> Self {
        Self {
            id: id_or_generate(id),
            name: name.to_owned(),
            watched: *watched,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn watched(&self) -> &bool {
        &self.watched
    }

    pub fn to_patch_document(&self) -> PatchDocument {
        PatchDocument::with_capacity(MOVIE_FIELDS.len())
            .with("id", self.id.as_str())
            .with("name", self.name.as_str())
            .with("watched", self.watched)
    }

    pub async fn db_insert(&self, db: &Db) -> Result<u64> {
        match db {
            Db::MysqlDb(db) => db.insert_movie(&self.to_mysqldb_model()).await,
            Db::PostgresqlDb(db) => db.insert_movie(&self.to_postgresdb_model()).await,
        }
    }

    pub async fn db_select(db: &Db, id: &str) -> Result<Option<Self>> {
        match db {
            Db::MysqlDb(db) => Ok(db
                .select_movie(id)
                .await?
                .map(|movie| Self::from_mysqldb_model(&movie))),
            Db::PostgresqlDb(db) => Ok(db
                .select_movie(id)
                .await?
                .map(|movie| Self::from_postgresdb_model(&movie))),
        }
    }

    pub async fn db_select_all(db: &Db) -> Result<Vec<Self>> {
        match db {
            Db::MysqlDb(db) => {
                let movies = db.select_all_movies().await?;
                let mut movies_data = Vec::with_capacity(movies.len());
                for movie in &movies {
                    movies_data.push(Self::from_mysqldb_model(movie));
                }
                Ok(movies_data)
            }
            Db::PostgresqlDb(db) => {
                let movies = db.select_all_movies().await?;
                let mut movies_data = Vec::with_capacity(movies.len());
                for movie in &movies {
                    movies_data.push(Self::from_postgresdb_model(movie));
                }
                Ok(movies_data)
            }
        }
    }

    pub async fn db_update(&self, db: &Db) -> Result<u64> {
        Self::db_patch(db, &self.to_patch_document()).await
    }

    pub async fn db_patch(db: &Db, document: &PatchDocument) -> Result<u64> {
        let statement = build_patch(document, Self::column_map()?, &db.placeholder())?;
        db.execute_statement(statement).await
    }

    pub async fn db_delete(db: &Db, id: &str) -> Result<u64> {
        match db {
            Db::MysqlDb(db) => db.delete_movie(id).await,
            Db::PostgresqlDb(db) => db.delete_movie(id).await,
        }
    }

    pub async fn db_search(db: &Db, filter: &MovieFilter) -> Result<(Vec<Self>, i64)> {
        let map = Self::column_map()?;
        let placeholder = db.placeholder();
        let query = build_query(filter, map, &placeholder);
        let count = build_count(filter, map, &placeholder);

        match db {
            Db::MysqlDb(mysql_db) => {
                let (movies, total) = tokio::try_join!(
                    mysql_db.fetch_all_statement::<MovieMysqlModel>(query),
                    db.fetch_count(count)
                )?;
                let mut movies_data = Vec::with_capacity(movies.len());
                for movie in &movies {
                    movies_data.push(Self::from_mysqldb_model(movie));
                }
                Ok((movies_data, total))
            }
            Db::PostgresqlDb(postgres_db) => {
                let (movies, total) = tokio::try_join!(
                    postgres_db.fetch_all_statement::<MoviePostgresModel>(query),
                    db.fetch_count(count)
                )?;
                let mut movies_data = Vec::with_capacity(movies.len());
                for movie in &movies {
                    movies_data.push(Self::from_postgresdb_model(movie));
                }
                Ok((movies_data, total))
            }
        }
    }

    fn from_mysqldb_model(model: &MovieMysqlModel) -> Self {
        Self {
            id: model.id().to_owned(),
            name: model.name().to_owned(),
            watched: *model.watched(),
        }
    }

    fn to_mysqldb_model(&self) -> MovieMysqlModel {
        MovieMysqlModel::new(&self.id, &self.name, &self.watched)
    }

    fn from_postgresdb_model(model: &MoviePostgresModel) -> Self {
        Self {
            id: model.id().to_owned(),
            name: model.name().to_owned(),
            watched: *model.watched(),
        }
    }

    fn to_postgresdb_model(&self) -> MoviePostgresModel {
        MoviePostgresModel::new(&self.id, &self.name, &self.watched)
    }
}

pub struct MovieFilter {
    id: Option<String>,
    name: Option<String>,
    watched: Option<bool>,
    page_index: i64,
    page_size: i64,
}

impl MovieFilter {
    pub fn new(
        id: &Option<String>,
        name: &Option<String>,
        watched: &Option<bool>,
        page_index: &Option<i64>,
        page_size: &Option<i64>,
    ) -> Self {
        Self {
            id: id.clone(),
            name: name.clone(),
            watched: *watched,
            page_index: page_index.unwrap_or_default(),
            page_size: page_size.unwrap_or_default(),
        }
    }
}

impl Filter for MovieFilter {
    fn value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => self.id.clone().map(Value::from),
            "name" => self.name.clone().map(Value::from),
            "watched" => self.watched.map(Value::from),
            _ => None,
        }
    }

    fn page_index(&self) -> i64 {
        self.page_index
    }

    fn page_size(&self) -> i64 {
        self.page_size
    }
}

#[cfg(test)]
mod tests {
    use md_query::Placeholder;

    use super::*;

    #[test]
    fn unwatched_is_still_a_constraint() {
        let filter = MovieFilter::new(
            &None,
            &Some("ring".to_owned()),
            &Some(false),
            &None,
            &Some(5),
        );
        let map = MovieDao::column_map().unwrap();

        let query = build_query(&filter, map, &Placeholder::Numbered);
        let count = build_count(&filter, map, &Placeholder::Numbered);

        assert_eq!(
            query.sql(),
            "SELECT * FROM movies WHERE name like $1 AND watched = $2 LIMIT 5"
        );
        assert_eq!(query.params(), &[Value::from("%ring%"), Value::Bool(false)]);
        assert_eq!(
            count.sql(),
            "SELECT COUNT(*) FROM movies WHERE name like $1 AND watched = $2"
        );
    }

    #[test]
    fn patch_targets_the_movies_table() {
        let document = PatchDocument::new().with("watched", true).with("id", "m1");

        let statement = build_patch(
            &document,
            MovieDao::column_map().unwrap(),
            &Placeholder::Question,
        )
        .unwrap();

        assert_eq!(statement.sql(), "UPDATE movies SET watched = ? WHERE id = ?");
        assert_eq!(statement.params(), &[Value::Bool(true), Value::from("m1")]);
    }

    #[test]
    fn patch_without_id_is_rejected() {
        let document = PatchDocument::new().with("name", "Alien");

        assert_eq!(
            build_patch(
                &document,
                MovieDao::column_map().unwrap(),
                &Placeholder::Question
            ),
            Err(QueryError::missing_key("movie", "id"))
        );
    }

    #[test]
    fn full_update_keeps_document_order() {
        let movie = MovieDao::new(&Some("m1".to_owned()), "Alien", &true);

        let statement = build_patch(
            &movie.to_patch_document(),
            MovieDao::column_map().unwrap(),
            &Placeholder::Numbered,
        )
        .unwrap();

        assert_eq!(
            statement.sql(),
            "UPDATE movies SET name = $1, watched = $2 WHERE id = $3"
        );
    }
}
