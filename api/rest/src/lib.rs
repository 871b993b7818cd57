use actix_web::{
    middleware::{ErrorHandlers, Logger},
    web, App, HttpServer,
};
use anyhow::Result;
use configure::configure;
use context::ApiRestCtx;
use error_handler::default_error_handler;

mod configure;
pub mod context;
mod error_handler;
mod model;
mod service;
mod util;

const LOGGER_FORMAT: &str = "%a \"%r\" %s %b %Dms";

pub struct ApiRestServer {
    address: String,
    context: web::Data<ApiRestCtx>,
}

impl ApiRestServer {
    pub fn new(host: &str, port: &u16, ctx: ApiRestCtx) -> Self {
        md_log::info(Some("⚡"), "ApiRestServer: Initializing component");

        let address = format!("{host}:{port}");
        let context = web::Data::new(ctx);

        Self { address, context }
    }

    pub async fn run(self) -> Result<()> {
        md_log::info(
            Some("💫"),
            format!("ApiRestServer: Running component on {}", self.address),
        );

        Ok(HttpServer::new(move || {
            App::new()
                .wrap(Logger::new(LOGGER_FORMAT))
                .wrap(ErrorHandlers::new().default_handler(default_error_handler))
                .app_data(self.context.clone())
                .configure(configure)
        })
        .bind(self.address)?
        .run()
        .await?)
    }
}
