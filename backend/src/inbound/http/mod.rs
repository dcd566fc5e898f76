//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod state;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register the `/api` scope with every users endpoint and the extractor
/// configuration that renders decode failures as JSON error envelopes.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use std::sync::Arc;
/// use userinfo::inbound::http::{configure, state::HttpState};
/// use userinfo::outbound::persistence::InMemoryUserRepository;
///
/// let state = HttpState::from_repository(Arc::new(InMemoryUserRepository::default()));
/// let app = App::new()
///     .app_data(web::Data::new(state))
///     .configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::path_config())
        .service(
            web::scope("/api")
                .service(users::list_users)
                .service(users::get_user)
                .service(users::create_user)
                .service(users::update_user)
                .service(users::delete_user),
        );
}
