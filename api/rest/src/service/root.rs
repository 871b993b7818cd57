use actix_web::{http::StatusCode, web, HttpResponse};
use serde::Serialize;

use crate::{context::ApiRestCtx, model::Response};

pub fn root_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/health", web::get().to(health));
}

async fn root() -> HttpResponse {
    Response::data(&StatusCode::OK, &None, "Masterdata is running")
}

#[derive(Serialize)]
struct HealthResJson {
    status: &'static str,
}

async fn health(ctx: web::Data<ApiRestCtx>) -> HttpResponse {
    match ctx.dao().db().ping().await {
        Ok(_) => Response::data(&StatusCode::OK, &None, HealthResJson { status: "UP" }),
        Err(err) => Response::error_raw(
            &StatusCode::SERVICE_UNAVAILABLE,
            &format!("Database is unreachable: {err}"),
        ),
    }
}
