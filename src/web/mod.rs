//! HTTP front end: routes, request extractors, and page rendering.

pub mod auth;
mod error;
mod notes;
pub mod render;
pub mod urls;

pub use error::WebError;

use actix_web::{App, HttpServer, middleware::Logger, web};
use log::info;

use crate::store::SqliteStore;
use render::Templates;

/// Tunables for the HTTP layer.
#[derive(Debug, Clone)]
pub struct WebSettings {
    /// Idle lifetime of a login session; each authenticated request extends it.
    pub session_ttl: chrono::Duration,
    /// Mark the session cookie `Secure` (serve behind HTTPS).
    pub secure_cookies: bool,
}

impl Default for WebSettings {
    fn default() -> Self {
        Self {
            session_ttl: chrono::Duration::hours(24),
            secure_cookies: false,
        }
    }
}

/// Shared state handed to every handler.
pub struct AppState {
    pub store: SqliteStore,
    pub settings: WebSettings,
    pub templates: Templates,
}

impl AppState {
    pub fn new(store: SqliteStore, settings: WebSettings) -> Result<Self, WebError> {
        Ok(Self {
            store,
            settings,
            templates: Templates::new()?,
        })
    }
}

/// Registers every route on an app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource(urls::HOME).route(web::get().to(notes::home)))
        .service(web::resource(urls::LIST).route(web::get().to(notes::list)))
        .service(
            web::resource(urls::ADD)
                .route(web::get().to(notes::add_form))
                .route(web::post().to(notes::add)),
        )
        .service(web::resource(urls::SUCCESS).route(web::get().to(notes::success)))
        .service(web::resource(urls::DETAIL).route(web::get().to(notes::detail)))
        .service(
            web::resource(urls::EDIT)
                .route(web::get().to(notes::edit_form))
                .route(web::post().to(notes::edit)),
        )
        .service(
            web::resource(urls::DELETE)
                .route(web::get().to(notes::delete_confirm))
                .route(web::post().to(notes::delete))
                .route(web::delete().to(notes::delete)),
        )
        .service(
            web::resource(urls::LOGIN)
                .route(web::get().to(auth::login_form))
                .route(web::post().to(auth::login)),
        )
        .service(
            web::resource(urls::LOGOUT)
                .route(web::get().to(auth::logout))
                .route(web::post().to(auth::logout)),
        )
        .service(
            web::resource(urls::SIGNUP)
                .route(web::get().to(auth::signup_form))
                .route(web::post().to(auth::signup)),
        )
        .default_service(web::to(notes::not_found));
}

/// Runs the HTTP server until it is shut down.
pub async fn serve(state: web::Data<AppState>, bind: &str) -> std::io::Result<()> {
    info!("listening on http://{}", bind);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(configure)
    })
    .bind(bind)?
    .run()
    .await
}
