use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Deserialize)]
pub struct UserReqPath {
    id: String,
}

impl UserReqPath {
    pub fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserReqJson {
    #[validate(length(max = 40))]
    id: Option<String>,
    #[validate(length(max = 100))]
    username: Option<String>,
    #[validate(email, length(max = 100))]
    email: Option<String>,
    #[validate(length(max = 18))]
    phone: Option<String>,
    date_of_birth: Option<NaiveDate>,
}

impl UserReqJson {
    pub fn id(&self) -> &Option<String> {
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

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchUserReqJson {
    #[validate(length(max = 40))]
    id: Option<String>,
    #[validate(length(max = 100))]
    username: Option<String>,
    #[validate(length(max = 100))]
    email: Option<String>,
    #[validate(length(max = 18))]
    phone: Option<String>,
    date_of_birth: Option<NaiveDate>,
    #[validate(range(min = 0))]
    page_index: Option<i64>,
    #[validate(range(min = 0))]
    page_size: Option<i64>,
}

impl SearchUserReqJson {
    pub fn id(&self) -> &Option<String> {
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

    pub fn page_index(&self) -> &Option<i64> {
        &self.page_index
    }

    pub fn page_size(&self) -> &Option<i64> {
        &self.page_size
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResJson {
    id: String,
    username: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    date_of_birth: Option<NaiveDate>,
}

impl UserResJson {
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
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_camel_case_bodies() {
        let user: UserReqJson = serde_json::from_value(json!({
            "id": "u1",
            "email": "jo@example.com",
            "dateOfBirth": "1990-04-01"
        }))
        .unwrap();

        assert!(user.validate().is_ok());
        assert_eq!(user.id().as_deref(), Some("u1"));
        assert_eq!(user.date_of_birth(), &NaiveDate::from_ymd_opt(1990, 4, 1));
        assert!(user.username().is_none());
    }

    #[test]
    fn rejects_invalid_fields() {
        let user: UserReqJson = serde_json::from_value(json!({
            "email": "not-an-email",
            "phone": "0123456789012345678901"
        }))
        .unwrap();

        let errors = user.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("phone"));
    }

    #[test]
    fn search_rejects_negative_pages() {
        let filter: SearchUserReqJson =
            serde_json::from_value(json!({ "username": "jo", "pageSize": -1 })).unwrap();
        assert!(filter.validate().is_err());

        let filter: SearchUserReqJson =
            serde_json::from_value(json!({ "username": "jo", "pageIndex": 2, "pageSize": 10 }))
                .unwrap();
        assert!(filter.validate().is_ok());
        assert_eq!(filter.page_index(), &Some(2));
    }

    #[test]
    fn writes_camel_case_bodies() {
        let user = UserResJson::new("u1", &Some("jo".to_owned()), &None, &None, &None);
        assert_eq!(
            serde_json::to_value(user).unwrap(),
            json!({
                "id": "u1",
                "username": "jo",
                "email": null,
                "phone": null,
                "dateOfBirth": null
            })
        );
    }
}
