use std::sync::OnceLock;

use anyhow::Result;
use chrono::NaiveDate;
use md_db_mysql::model::user::UserModel as UserMysqlModel;
use md_db_postgresql::model::user::UserModel as UserPostgresModel;
use md_query::{
    build_count, build_patch, build_query, ColumnMap, FieldDef, FieldKind, Filter, MatchRule,
    PatchDocument, QueryError, Record, RecordSchema, Value,
};

use crate::{util::id_or_generate, Db};

const USER_FIELDS: &[FieldDef] = &[
    FieldDef::new("id", "id", FieldKind::Text).primary_key(),
    FieldDef::new("username", "username", FieldKind::Text).rule(MatchRule::Prefix),
    FieldDef::new("email", "email", FieldKind::Text).rule(MatchRule::Prefix),
    FieldDef::new("phone", "phone", FieldKind::Text).rule(MatchRule::Contains),
    FieldDef::new("dateOfBirth", "date_of_birth", FieldKind::Date),
];

pub static USER_SCHEMA: RecordSchema = RecordSchema::new("user", "users", USER_FIELDS);

pub struct UserDao {
    id: String,
    username: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    date_of_birth: Option<NaiveDate>,
}

impl Record for UserDao {
    fn schema() -> &'static RecordSchema {
        &USER_SCHEMA
    }

    fn column_map() -> Result<&'static ColumnMap, QueryError> {
        static MAP: OnceLock<Result<ColumnMap, QueryError>> = OnceLock::new();
        ColumnMap::cached(&MAP, &USER_SCHEMA)
    }
}

impl UserDao {
    pub fn new(
        id: &Option<String>,
        username: &Option<String>,
        email: &Option<String>,
        phone: &Option<String>,
        date_of_birth: &Option<NaiveDate>,
    ) -> Self {
        Self {
            id: id_or_generate(id),
            username: username.clone(),
            email: email.clone(),
            phone: phone.clone(),
            date_of_birth: *date_of_birth,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn username(&self) -> &Option<String> {
        &self.username
    }

    pub fn email(&self) -> &Option<String> {
        &self.email
    }

    pub fn phone(&self) -> &Option<String> {
        &self.phone
    }

    pub fn date_of_birth(&self) -> &Option<NaiveDate> {
        &self.date_of_birth
    }

    /// Every field of the user, so a full update goes through the patch builder.
    pub fn to_patch_document(&self) -> PatchDocument {
        PatchDocument::with_capacity(USER_FIELDS.len())
            .with("id", self.id.as_str())
            .with("username", self.username.clone())
            .with("email", self.email.clone())
            .with("phone", self.phone.clone())
            .with("dateOfBirth", self.date_of_birth)
    }

    pub async fn db_insert(&self, db: &Db) -> Result<u64> {
        match db {
            Db::MysqlDb(db) => db.insert_user(&self.to_mysqldb_model()).await,
            Db::PostgresqlDb(db) => db.insert_user(&self.to_postgresdb_model()).await,
        }
    }

    pub async fn db_select(db: &Db, id: &str) -> Result<Option<Self>> {
        match db {
            Db::MysqlDb(db) => Ok(db
                .select_user(id)
                .await?
                .map(|user| Self::from_mysqldb_model(&user))),
            Db::PostgresqlDb(db) => Ok(db
                .select_user(id)
                .await?
                .map(|user| Self::from_postgresdb_model(&user))),
        }
    }

    pub async fn db_select_all(db: &Db) -> Result<Vec<Self>> {
        match db {
            Db::MysqlDb(db) => {
                let users = db.select_all_users().await?;
                let mut users_data = Vec::with_capacity(users.len());
                for user in &users {
                    users_data.push(Self::from_mysqldb_model(user));
                }
                Ok(users_data)
            }
            Db::PostgresqlDb(db) => {
                let users = db.select_all_users().await?;
                let mut users_data = Vec::with_capacity(users.len());
                for user in &users {
                    users_data.push(Self::from_postgresdb_model(user));
                }
                Ok(users_data)
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
            Db::MysqlDb(db) => db.delete_user(id).await,
            Db::PostgresqlDb(db) => db.delete_user(id).await,
        }
    }

    /// One page of matching users plus the total number of matches.
    pub async fn db_search(db: &Db, filter: &UserFilter) -> Result<(Vec<Self>, i64)> {
        let map = Self::column_map()?;
        let placeholder = db.placeholder();
        let query = build_query(filter, map, &placeholder);
        let count = build_count(filter, map, &placeholder);

        match db {
            Db::MysqlDb(mysql_db) => {
                let (users, total) = tokio::try_join!(
                    mysql_db.fetch_all_statement::<UserMysqlModel>(query),
                    db.fetch_count(count)
                )?;
                let mut users_data = Vec::with_capacity(users.len());
                for user in &users {
                    users_data.push(Self::from_mysqldb_model(user));
                }
                Ok((users_data, total))
            }
            Db::PostgresqlDb(postgres_db) => {
                let (users, total) = tokio::try_join!(
                    postgres_db.fetch_all_statement::<UserPostgresModel>(query),
                    db.fetch_count(count)
                )?;
                let mut users_data = Vec::with_capacity(users.len());
                for user in &users {
                    users_data.push(Self::from_postgresdb_model(user));
                }
                Ok((users_data, total))
            }
        }
    }

    fn from_mysqldb_model(model: &UserMysqlModel) -> Self {
        Self {
            id: model.id().to_owned(),
            username: model.username().clone(),
            email: model.email().clone(),
            phone: model.phone().clone(),
            date_of_birth: *model.date_of_birth(),
        }
    }

    fn to_mysqldb_model(&self) -> UserMysqlModel {
        UserMysqlModel::new(
            &self.id,
            &self.username,
            &self.email,
            &self.phone,
            &self.date_of_birth,
        )
    }

    fn from_postgresdb_model(model: &UserPostgresModel) -> Self {
        Self {
            id: model.id().to_owned(),
            username: model.username().clone(),
            email: model.email().clone(),
            phone: model.phone().clone(),
            date_of_birth: *model.date_of_birth(),
        }
    }

    fn to_postgresdb_model(&self) -> UserPostgresModel {
        UserPostgresModel::new(
            &self.id,
            &self.username,
            &self.email,
            &self.phone,
            &self.date_of_birth,
        )
    }
}

#[derive(Default)]
pub struct UserFilter {
    id: Option<String>,
    username: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    date_of_birth: Option<NaiveDate>,
    page_index: i64,
    page_size: i64,
}

impl UserFilter {
    pub fn new(
        id: &Option<String>,
        username: &Option<String>,
        email: &Option<String>,
        phone: &Option<String>,
        date_of_birth: &Option<NaiveDate>,
        page_index: &Option<i64>,
        page_size: &Option<i64>,
    ) -> Self {
        Self {
            id: id.clone(),
            username: username.clone(),
            email: email.clone(),
            phone: phone.clone(),
            date_of_birth: *date_of_birth,
            page_index: page_index.unwrap_or_default(),
            page_size: page_size.unwrap_or_default(),
        }
    }
}

impl Filter for UserFilter {
    fn value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => self.id.clone().map(Value::from),
            "username" => self.username.clone().map(Value::from),
            "email" => self.email.clone().map(Value::from),
            "phone" => self.phone.clone().map(Value::from),
            "dateOfBirth" => self.date_of_birth.map(Value::from),
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
