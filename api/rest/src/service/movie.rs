use actix_web::{http::StatusCode, web, HttpResponse};
use md_dao::movie::{MovieDao, MovieFilter};
use md_error::Error;
use validator::Validate;

use crate::{
    context::ApiRestCtx,
    model::{
        movie::{MovieReqJson, MovieReqPath, MovieResJson, PatchMovieReqJson, SearchMovieReqJson},
        PaginationRes, Response,
    },
    util::{patch_document, require_id, resolve_id},
};

pub fn movie_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/movies", web::get().to(all))
        .route("/movies", web::post().to(insert))
        .route("/movies/search", web::post().to(search))
        .route("/movies/{id}", web::get().to(load))
        .route("/movies/{id}", web::put().to(update))
        .route("/movies/{id}", web::patch().to(patch))
        .route("/movies/{id}", web::delete().to(delete));
}

async fn all(ctx: web::Data<ApiRestCtx>) -> HttpResponse {
    let movies_data = match MovieDao::db_select_all(ctx.dao().db()).await {
        Ok(data) => data,
        Err(err) => return Response::dao_error(&err),
    };

    let mut movies = Vec::with_capacity(movies_data.len());
    for movie_data in &movies_data {
        movies.push(to_res_json(movie_data));
    }

    Response::data(&StatusCode::OK, &None, movies)
}

async fn load(ctx: web::Data<ApiRestCtx>, path: web::Path<MovieReqPath>) -> HttpResponse {
    let id = match require_id(path.id()) {
        Ok(id) => id,
        Err(err) => return Response::error(&err),
    };

    match MovieDao::db_select(ctx.dao().db(), id).await {
        Ok(Some(movie_data)) => Response::data(&StatusCode::OK, &None, to_res_json(&movie_data)),
        Ok(None) => Response::error(&Error::NotFound(format!("Movie {id} not found"))),
        Err(err) => Response::dao_error(&err),
    }
}

async fn insert(ctx: web::Data<ApiRestCtx>, data: web::Json<MovieReqJson>) -> HttpResponse {
    if let Err(err) = data.validate() {
        return Response::error_raw(&StatusCode::BAD_REQUEST, &err.to_string());
    }

    let movie_data = MovieDao::new(data.id(), data.name(), data.watched());

    match movie_data.db_insert(ctx.dao().db()).await {
        Ok(count) => Response::data(&StatusCode::CREATED, &None, count),
        Err(err) => Response::dao_error(&err),
    }
}

async fn update(
    ctx: web::Data<ApiRestCtx>,
    path: web::Path<MovieReqPath>,
    data: web::Json<MovieReqJson>,
) -> HttpResponse {
    let id = match resolve_id(path.id(), data.id()) {
        Ok(id) => id,
        Err(err) => return Response::error(&err),
    };

    if let Err(err) = data.validate() {
        return Response::error_raw(&StatusCode::BAD_REQUEST, &err.to_string());
    }

    let movie_data = MovieDao::new(&Some(id), data.name(), data.watched());

    match movie_data.db_update(ctx.dao().db()).await {
        Ok(count) => Response::data(&StatusCode::OK, &None, count),
        Err(err) => Response::dao_error(&err),
    }
}

async fn patch(
    ctx: web::Data<ApiRestCtx>,
    path: web::Path<MovieReqPath>,
    data: web::Json<serde_json::Map<String, serde_json::Value>>,
) -> HttpResponse {
    let data = data.into_inner();

    let fields: PatchMovieReqJson =
        match serde_json::from_value(serde_json::Value::Object(data.clone())) {
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

    let document = match patch_document::<MovieDao>(id, data) {
        Ok(document) => document,
        Err(err) => return Response::error(&err),
    };

    match MovieDao::db_patch(ctx.dao().db(), &document).await {
        Ok(count) => Response::data(&StatusCode::OK, &None, count),
        Err(err) => Response::dao_error(&err),
    }
}

async fn delete(ctx: web::Data<ApiRestCtx>, path: web::Path<MovieReqPath>) -> HttpResponse {
    let id = match require_id(path.id()) {
        Ok(id) => id,
        Err(err) => return Response::error(&err),
    };

    match MovieDao::db_delete(ctx.dao().db(), id).await {
        Ok(count) => Response::data(&StatusCode::OK, &None, count),
        Err(err) => Response::dao_error(&err),
    }
}

async fn search(ctx: web::Data<ApiRestCtx>, data: web::Json<SearchMovieReqJson>) -> HttpResponse {
    if let Err(err) = data.validate() {
        return Response::error_raw(&StatusCode::BAD_REQUEST, &err.to_string());
    }

    let filter = MovieFilter::new(
        data.id(),
        data.name(),
        data.watched(),
        data.page_index(),
        data.page_size(),
    );

    let (movies_data, total) = match MovieDao::db_search(ctx.dao().db(), &filter).await {
        Ok(data) => data,
        Err(err) => return Response::dao_error(&err),
    };

    let mut movies = Vec::with_capacity(movies_data.len());
    for movie_data in &movies_data {
        movies.push(to_res_json(movie_data));
    }

    Response::data(
        &StatusCode::OK,
        &Some(PaginationRes::new(&movies.len(), &total)),
        movies,
    )
}

fn to_res_json(movie_data: &MovieDao) -> MovieResJson {
    MovieResJson::new(movie_data.id(), movie_data.name(), movie_data.watched())
}
