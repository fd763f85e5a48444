// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Health ---
        handlers::health::health,

        // --- Diretório público ---
        handlers::alumni::search_alumni,
        handlers::alumni::create_alumni,
        handlers::alumni::connect,

        // --- Admin Auth ---
        handlers::admin::register,
        handlers::admin::login,
        handlers::admin::get_me,

        // --- Admin Alumni ---
        handlers::alumni::search_institution_alumni,
        handlers::alumni::create_institution_alumni,
        handlers::alumni::update_consent,

        // --- Students ---
        handlers::students::create_student,
        handlers::students::list_students,
        handlers::students::get_student,
        handlers::students::delete_student,
    ),
    components(
        schemas(
            // --- Geo ---
            models::geo::LatLng,

            // --- Alumni ---
            models::alumni::LocationVisibility,
            models::alumni::ConsentRecord,
            models::alumni::ConsentInput,
            models::alumni::DirectoryEntry,
            models::alumni::CreateAlumniPayload,
            models::alumni::CreateAlumniResponse,
            models::alumni::ConnectResponse,
            models::alumni::UpdateConsentPayload,

            // --- Admin ---
            models::admin::Institution,
            models::admin::Admin,
            models::admin::RegisterAdminPayload,
            models::admin::LoginAdminPayload,
            models::admin::AuthResponse,
            handlers::admin::MeResponse,

            // --- Students ---
            models::student::Student,
            models::student::CreateStudentPayload,
        )
    ),
    tags(
        (name = "Health", description = "Verificação de saúde"),
        (name = "Alumni", description = "Diretório público de ex-alunos"),
        (name = "Admin Auth", description = "Registro e login de administradores"),
        (name = "Admin Alumni", description = "Ex-alunos da instituição do admin"),
        (name = "Students", description = "Estudantes da instituição do admin")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in ["/health", "/api/alumni", "/api/alumni/connect", "/api/admin/students/{id}"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
