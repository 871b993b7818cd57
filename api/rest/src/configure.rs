use actix_web::web;

use crate::service::{movie::movie_api, root::root_api, user::user_api};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(root_api)
        .configure(user_api)
        .configure(movie_api);
}
