use super::{
    handlers::{antenatal, auth, care_notes, health, patients, profile, users},
    middleware::{
        auth::{require_admin, require_user},
        request_id::request_id_middleware,
    },
    state::AppState,
};
use axum::{
    Router, middleware,
    routing::{get, post, put},
};

pub fn create_router(state: AppState) -> Router {
    // Layers run bottom-up: `require_user` resolves the actor first.
    let admin_routes = Router::new()
        .route(
            "/api/v1/admin/users",
            get(users::list_users).post(users::create_user),
        )
        .route(
            "/api/v1/admin/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    let clinician_routes = Router::new()
        // Session
        .route("/api/v1/auth/me", get(auth::me))
        .route("/api/v1/profile", get(profile::my_profile))
        .route(
            "/api/v1/profile/records/{kind}",
            get(profile::my_recent_records),
        )
        // Patients
        .route(
            "/api/v1/patients",
            get(patients::list_patients).post(patients::register_patient),
        )
        .route(
            "/api/v1/patients/{id}",
            get(patients::view_patient)
                .put(patients::update_patient)
                .delete(patients::delete_patient),
        )
        // Antenatal care
        .route(
            "/api/v1/patients/{id}/anc",
            get(antenatal::list_patient_anc),
        )
        .route(
            "/api/v1/patients/{id}/anc/intake",
            post(antenatal::add_intake),
        )
        .route(
            "/api/v1/patients/{id}/anc/visits",
            post(antenatal::add_visit),
        )
        .route(
            "/api/v1/anc/{id}",
            get(antenatal::view_anc).delete(antenatal::delete_anc),
        )
        .route("/api/v1/anc/{id}/intake", put(antenatal::update_intake))
        .route("/api/v1/anc/{id}/visit", put(antenatal::update_visit))
        // Labour/delivery and postnatal notes
        .route(
            "/api/v1/patients/{id}/notes/{kind}",
            get(care_notes::list_patient_notes).post(care_notes::add_note),
        )
        .route(
            "/api/v1/notes/{kind}/{id}",
            get(care_notes::view_note)
                .put(care_notes::update_note)
                .delete(care_notes::delete_note),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/v1/auth/login", post(auth::login))
        .merge(clinician_routes)
        .merge(admin_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
