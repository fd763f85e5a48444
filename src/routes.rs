// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::admin_guard};

pub fn build_router(app_state: AppState) -> Router {
    // Rotas públicas (diretório e cadastro self-service)
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/api/alumni",
            get(handlers::alumni::search_alumni).post(handlers::alumni::create_alumni),
        )
        .route("/api/alumni/connect", post(handlers::alumni::connect))
        .route("/api/admin/register", post(handlers::admin::register))
        .route("/api/admin/login", post(handlers::admin::login));

    // Rotas de admin: tudo aqui passa pelo admin_guard e fica preso à instituição do token
    let admin_routes = Router::new()
        .route("/api/admin/me", get(handlers::admin::get_me))
        .route(
            "/api/admin/alumni",
            get(handlers::alumni::search_institution_alumni)
                .post(handlers::alumni::create_institution_alumni),
        )
        .route("/api/admin/alumni/{id}/consent", patch(handlers::alumni::update_consent))
        .route(
            "/api/admin/students",
            post(handlers::students::create_student).get(handlers::students::list_students),
        )
        .route(
            "/api/admin/students/{id}",
            get(handlers::students::get_student).delete(handlers::students::delete_student),
        )
        .route_layer(axum_middleware::from_fn_with_state(app_state.clone(), admin_guard));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}
