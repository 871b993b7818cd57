use sqlx::prelude::FromRow;

#[derive(FromRow)]
pub struct MovieModel {
    id: String,
    name: String,
    watched: bool,
}

impl MovieModel {
    pub fn new(id: &str, name: &str, watched: &bool) -> Self {
        Self {
            id: id.to_owned(),
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
}
