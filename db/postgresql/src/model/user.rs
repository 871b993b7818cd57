use chrono::NaiveDate;
use sqlx::prelude::FromRow;

#[derive(FromRow)]
pub struct UserModel {
    id: String,
    username: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    date_of_birth: Option<NaiveDate>,
}

impl UserModel {
    pub fn new(
        id: &str,
        username: &Option<String>,
        email: &Option<String>,
        phone: &Option<String>,
        date_of_birth: &Option<NaiveDate>,
    ) -> Self {
        Self {
            id: id.to_owned(),
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
}
