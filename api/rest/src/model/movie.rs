use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Deserialize)]
pub struct MovieReqPath {
    id: String,
}

impl MovieReqPath {
    pub fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Deserialize, Validate)]
pub struct MovieReqJson {
    #[validate(length(max = 40))]
    id: Option<String>,
    #[validate(length(min = 1, max = 100))]
    name: String,
    #[serde(default)]
    watched: bool,
}

impl MovieReqJson {
    pub fn id(&self) -> &Option<String> {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn watched(&self) -> &bool {
        &self.watched
    }
}

/// Field-level checks for partial bodies; absent fields are left alone.
#[derive(Deserialize, Validate)]
pub struct PatchMovieReqJson {
    #[validate(length(max = 40))]
    id: Option<String>,
    #[validate(length(min = 1, max = 100))]
    name: Option<String>,
}

impl PatchMovieReqJson {
    pub fn id(&self) -> &Option<String> {
        &self.id
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchMovieReqJson {
    #[validate(length(max = 40))]
    id: Option<String>,
    #[validate(length(max = 100))]
    name: Option<String>,
    watched: Option<bool>,
    #[validate(range(min = 0))]
    page_index: Option<i64>,
    #[validate(range(min = 0))]
    page_size: Option<i64>,
}

impl SearchMovieReqJson {
    pub fn id(&self) -> &Option<String> {
        &self.id
    }

    pub fn name(&self) -> &Option<String> {
        &self.name
    }

    pub fn watched(&self) -> &Option<bool> {
        &self.watched
    }

    pub fn page_index(&self) -> &Option<i64> {
        &self.page_index
    }

    pub fn page_size(&self) -> &Option<i64> {
        &self.page_size
    }
}

#[derive(Serialize)]
pub struct MovieResJson {
    id: String,
    name: String,
    watched: bool,
}

impl MovieResJson {
    pub fn new(id: &str, name: &str, watched: &bool) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            watched: *watched,
        }
    }
}
