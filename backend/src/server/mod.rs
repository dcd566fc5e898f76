//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use userinfo::Trace;
#[cfg(debug_assertions)]
use userinfo::doc::ApiDoc;
use userinfo::inbound::http::configure;
use userinfo::inbound::http::health::{HealthState, live, ready};
use userinfo::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Readiness flips once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        bind_addr,
        http_state,
    } = config;

    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use std::sync::Arc;
    use userinfo::TRACE_ID_HEADER;
    use userinfo::outbound::persistence::InMemoryUserRepository;

    fn deps() -> (web::Data<HealthState>, web::Data<HttpState>) {
        let health = web::Data::new(HealthState::new());
        let http = web::Data::new(HttpState::from_repository(Arc::new(
            InMemoryUserRepository::default(),
        )));
        (health, http)
    }

    #[actix_web::test]
    async fn routes_users_and_probes_through_the_trace_middleware() {
        let (health, http) = deps();
        health.mark_ready();
        let app = test::init_service(build_app(health, http)).await;

        for uri in ["/api/users", "/health/ready", "/health/live"] {
            let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(res.status(), StatusCode::OK, "{uri}");
            assert!(res.headers().contains_key(TRACE_ID_HEADER), "{uri}");
        }
    }

    #[actix_web::test]
    async fn unknown_routes_are_not_found() {
        let (health, http) = deps();
        let app = test::init_service(build_app(health, http)).await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/api/v1/users").to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
