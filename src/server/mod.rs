// src/server/mod.rs

//! HTTP boundary built on `actix-web`.
//!
//! Endpoints:
//!
//! - `PUT|POST /exec`        - submit a command (optionally waiting for it)
//! - `GET /status/{id}`      - current record of an execution
//! - `PUT|POST /findandstop` - kill the first process with the given name
//!
//! Handlers translate requests into [`Agent`] calls; errors are rendered by
//! `AgentError`'s `ResponseError` impl.

use actix_web::{App, HttpServer, web};
use tracing::info;

use crate::engine::Agent;
use crate::errors::Result;

pub mod handlers;

/// Register every route on an actix `ServiceConfig`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/exec")
            .route(web::put().to(handlers::exec))
            .route(web::post().to(handlers::exec))
            .default_service(web::route().to(handlers::only_put_or_post)),
    )
    .service(
        web::resource("/status/")
            .route(web::get().to(handlers::missing_status_id))
            .default_service(web::route().to(handlers::only_get)),
    )
    .service(
        web::resource("/status/{id}")
            .route(web::get().to(handlers::status))
            .default_service(web::route().to(handlers::only_get)),
    )
    .service(
        web::resource("/findandstop")
            .route(web::put().to(handlers::find_and_stop))
            .route(web::post().to(handlers::find_and_stop))
            .default_service(web::route().to(handlers::only_put_or_post)),
    );
}

/// Serve `agent` on `bind:port` until the server is stopped (Ctrl-C).
pub async fn serve(agent: web::Data<Agent>, bind: &str, port: u16) -> Result<()> {
    info!(%bind, port, "execagent listening");

    HttpServer::new(move || App::new().app_data(agent.clone()).configure(configure))
        .bind((bind, port))?
        .run()
        .await?;

    info!("http server stopped");
    Ok(())
}
