use actix_web::{http::StatusCode, HttpResponse, HttpResponseBuilder};
use md_error::Error;
use md_query::QueryError;
use serde::Serialize;

pub mod movie;
pub mod user;

#[derive(Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorRes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pagination: Option<PaginationRes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

impl Response {
    pub fn data<T: Serialize>(
        status_code: &StatusCode,
        pagination: &Option<PaginationRes>,
        data: T,
    ) -> HttpResponse {
        match serde_json::to_value(data) {
            Ok(data) => HttpResponseBuilder::new(*status_code).json(Self {
                error: None,
                pagination: *pagination,
                data: Some(data),
            }),
            Err(err) => Self::error(&Error::InternalServerError(err.to_string())),
        }
    }

    pub fn error(err: &Error) -> HttpResponse {
        let (status_code, message) = match err {
            Error::BadRequest(msg) => (&StatusCode::BAD_REQUEST, msg),
            Error::NotFound(msg) => (&StatusCode::NOT_FOUND, msg),
            Error::InternalServerError(msg) => (&StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        Self::error_raw(status_code, message)
    }

    /// Maps a dao failure; query builder rejections are the caller's fault.
    pub fn dao_error(err: &anyhow::Error) -> HttpResponse {
        match err.downcast_ref::<QueryError>() {
            Some(err) => Self::error(&Error::from(err.clone())),
            None => Self::error(&Error::InternalServerError(err.to_string())),
        }
    }

    pub fn error_raw(status_code: &StatusCode, message: &str) -> HttpResponse {
        if status_code.is_server_error() {
            md_log::error(None, message);
        } else {
            md_log::warn(None, message);
        }

        HttpResponseBuilder::new(*status_code).json(Self {
            error: Some(ErrorRes {
                status: match status_code.canonical_reason() {
                    Some(status_code) => status_code.to_owned(),
                    None => "Unknown".to_owned(),
                },
                message: message.to_owned(),
            }),
            pagination: None,
            data: None,
        })
    }
}

#[derive(Serialize)]
pub struct ErrorRes {
    status: String,
    message: String,
}

#[derive(Serialize, Clone, Copy)]
pub struct PaginationRes {
    count: usize,
    total: i64,
}

impl PaginationRes {
    pub fn new(count: &usize, total: &i64) -> Self {
        Self {
            count: *count,
            total: *total,
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use serde_json::json;

    use super::*;

    async fn body_json(res: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(res.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn data_envelope_carries_pagination() {
        let res = Response::data(
            &StatusCode::OK,
            &Some(PaginationRes::new(&1, &12)),
            vec!["u1"],
        );

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            body_json(res).await,
            json!({ "pagination": { "count": 1, "total": 12 }, "data": ["u1"] })
        );
    }

    #[actix_web::test]
    async fn error_envelope_uses_the_reason_phrase() {
        let res = Response::error(&Error::NotFound("User u1 not found".to_owned()));

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(res).await,
            json!({ "error": { "status": "Not Found", "message": "User u1 not found" } })
        );
    }

    #[actix_web::test]
    async fn query_errors_become_bad_requests() {
        let err = anyhow::Error::new(QueryError::no_updatable_fields("movie"));
        assert_eq!(Response::dao_error(&err).status(), StatusCode::BAD_REQUEST);

        let err = anyhow::Error::msg("connection refused");
        assert_eq!(
            Response::dao_error(&err).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
