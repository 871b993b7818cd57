use actix_web::{http::StatusCode, web, HttpResponse};
use md_dao::user::{UserDao, UserFilter};
use md_error::Error;
use validator::Validate;

use crate::{
    context::ApiRestCtx,
    model::{
        user::{SearchUserReqJson, UserReqJson, UserReqPath, UserResJson},
        PaginationRes, Response,
    },
    util::{patch_document, require_id, resolve_id},
};

pub fn user_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/users", web::get().to(all))
        .route("/users", web::post().to(insert))
        .route("/users/search", web::post().to(search))
        .route("/users/{id}", web::get().to(load))
        .route("/users/{id}", web::put().to(update))
        .route("/users/{id}", web::patch().to(patch))
        .route("/users/{id}", web::delete().to(delete));
}

async fn all(ctx: web::Data<ApiRestCtx>) -> HttpResponse {
    let users_data = match UserDao::db_select_all(ctx.dao().db()).await {
        Ok(data) => data,
        Err(err) => return Response::dao_error(&err),
    };

    let mut users = Vec::with_capacity(users_data.len());
    for user_data in &users_data {
        users.push(to_res_json(user_data));
    }

    Response::data(&StatusCode::OK, &None, users)
}

async fn load(ctx: web::Data<ApiRestCtx>, path: web::Path<UserReqPath>) -> HttpResponse {
    let id = match require_id(path.id()) {
        Ok(id) => id,
        Err(err) => return Response::error(&err),
    };

    match UserDao::db_select(ctx.dao().db(), id).await {
        Ok(Some(user_data)) => Response::data(&StatusCode::OK, &None, to_res_json(&user_data)),
        Ok(None) => Response::error(&Error::NotFound(format!("User {id} not found"))),
        Err(err) => Response::dao_error(&err),
    }
}

async fn insert(ctx: web::Data<ApiRestCtx>, data: web::Json<UserReqJson>) -> HttpResponse {
    if let Err(err) = data.validate() {
        return Response::error_raw(&StatusCode::BAD_REQUEST, &err.to_string());
    }

    let user_data = UserDao::new(
        data.id(),
        data.username(),
        data.email(),
        data.phone(),
        data.date_of_birth(),
    );

    match user_data.db_insert(ctx.dao().db()).await {
        Ok(count) => Response::data(&StatusCode::CREATED, &None, count),
        Err(err) => Response::dao_error(&err),
    }
}

async fn update(
    ctx: web::Data<ApiRestCtx>,
    path: web::Path<UserReqPath>,
    data: web::Json<UserReqJson>,
) -> HttpResponse {
    let id = match resolve_id(path.id(), data.id()) {
        Ok(id) => id,
        Err(err) => return Response::error(&err),
    };

    if let Err(err) = data.validate() {
        return Response::error_raw(&StatusCode::BAD_REQUEST, &err.to_string());
    }

    let user_data = UserDao::new(
        &Some(id),
        data.username(),
        data.email(),
        data.phone(),
        data.date_of_birth(),
    );

    match user_data.db_update(ctx.dao().db()).await {
        Ok(count) => Response::data(&StatusCode::OK, &None, count),
        Err(err) => Response::dao_error(&err),
    }
}

async fn patch(
    ctx: web::Data<ApiRestCtx>,
    path: web::Path<UserReqPath>,
    data: web::Json<serde_json::Map<String, serde_json::Value>>,
) -> HttpResponse {
    let data = data.into_inner();

    let fields: UserReqJson = match serde_json::from_value(serde_json::Value::Object(data.clone()))
    {
        Ok(fields) => fields,
        Err(err) => return Response::error_raw(&StatusCode::BAD_REQUEST, &err.to_string()),
    };

    let id = match resolve_id(path.id(), fields.id()) {
        Ok(id) => id,
        Err(err) => return Response::error(&err),
    };

    if let Err(err) = fields.validate() {
        return Response::error_raw(&StatusCode::BAD_REQUEST, &err.to_string());
    }

    let document = match patch_document::<UserDao>(id, data) {
        Ok(document) => document,
        Err(err) => return Response::error(&err),
    };

    match UserDao::db_patch(ctx.dao().db(), &document).await {
        Ok(count) => Response::data(&StatusCode::OK, &None, count),
        Err(err) => Response::dao_error(&err),
    }
}

async fn delete(ctx: web::Data<ApiRestCtx>, path: web::Path<UserReqPath>) -> HttpResponse {
    let id = match require_id(path.id()) {
        Ok(id) => id,
        Err(err) => return Response::error(&err),
    };

    match UserDao::db_delete(ctx.dao().db(), id).await {
        Ok(count) => Response::data(&StatusCode::OK, &None, count),
        Err(err) => Response::dao_error(&err),
    }
}

async fn search(ctx: web::Data<ApiRestCtx>, data: web::Json<SearchUserReqJson>) -> HttpResponse {
    if let Err(err) = data.validate() {
        return Response::error_raw(&StatusCode::BAD_REQUEST, &err.to_string());
    }

    let filter = UserFilter::new(
        data.id(),
        data.username(),
        data.email(),
        data.phone(),
        data.date_of_birth(),
        data.page_index(),
        data.page_size(),
    );

    let (users_data, total) = match UserDao::db_search(ctx.dao().db(), &filter).await {
        Ok(data) => data,
        Err(err) => return Response::dao_error(&err),
    };

    let mut users = Vec::with_capacity(users_data.len());
    for user_data in &users_data {
        users.push(to_res_json(user_data));
    }

    Response::data(
        &StatusCode::OK,
        &Some(PaginationRes::new(&users.len(), &total)),
        users,
    )
}

fn to_res_json(user_data: &UserDao) -> UserResJson {
    UserResJson::new(
        user_data.id(),
        user_data.username(),
        user_data.email(),
        user_data.phone(),
        user_data.date_of_birth(),
    )
}
