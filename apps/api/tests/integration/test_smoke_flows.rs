//! End-to-end flows against a real Postgres. Run with
//! `DATABASE_URL=... cargo test -- --ignored`.

use super::helpers::{
    empty_request, expect_status, json_request, login, read_json, send, spawn_app, unique_name,
};
use axum::http::StatusCode;
use serde_json::{Value, json};

async fn create_clinician(app: &super::helpers::TestApp, admin_token: &str) -> (String, String) {
    let username = unique_name("nurse");
    let res = send(
        &app.app,
        json_request(
            "POST",
            "/api/v1/admin/users",
            Some(admin_token),
            json!({
                "username": username,
                "password": "ClinicianPass1!",
                "confirmation": "ClinicianPass1!",
            }),
        ),
    )
    .await;
    expect_status(res, StatusCode::CREATED).await;
    let token = login(&app.app, &username, "ClinicianPass1!").await;
    (username, token)
}

#[tokio::test]
#[ignore = "requires a Postgres database"]
async fn smoke_patient_antenatal_and_notes_flow() {
    let app = spawn_app().await;
    let admin = login(&app.app, &app.admin_username, &app.admin_password).await;
    let (_, nurse) = create_clinician(&app, &admin).await;
    let (_, other_nurse) = create_clinician(&app, &admin).await;

    let patient_name = unique_name("Amina");
    let res = send(
        &app.app,
        json_request(
            "POST",
            "/api/v1/patients",
            Some(&nurse),
            json!({
                "name": patient_name,
                "sex": "female",
                "date_of_birth": "1995-08-21",
                "phone": "+254 712 000 111",
                "address": "Kisumu, Ward 3",
            }),
        ),
    )
    .await;
    let patient: Value = read_json(expect_status(res, StatusCode::CREATED).await).await;
    let patient_id = patient["id"].as_str().unwrap().to_string();

    let res = send(
        &app.app,
        empty_request(
            "GET",
            &format!("/api/v1/patients?q={}&page=abc", patient_name.to_uppercase()),
            Some(&nurse),
        ),
    )
    .await;
    let page: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(page["page_number"], 1);
    assert_eq!(page["total_items"], 1);
    assert_eq!(page["items"][0]["id"], patient_id.as_str());

    let res = send(
        &app.app,
        json_request(
            "POST",
            &format!("/api/v1/patients/{}/anc/intake", patient_id),
            Some(&nurse),
            json!({
                "expected_delivery_date": "2026-12-01",
                "height": "160",
                "last_menstrual_period": "2026-02-24",
                "parity": "1",
                "living_children": "1",
                "gravida": "2",
            }),
        ),
    )
    .await;
    let intake: Value = read_json(expect_status(res, StatusCode::CREATED).await).await;
    let intake_id = intake["id"].as_str().unwrap().to_string();

    let res = send(
        &app.app,
        json_request(
            "POST",
            &format!("/api/v1/patients/{}/anc/visits", patient_id),
            Some(&nurse),
            json!({ "weight": "" }),
        ),
    )
    .await;
    let err: Value = read_json(expect_status(res, StatusCode::BAD_REQUEST).await).await;
    assert_eq!(err["error"], "Can not submit an empty form.");

    let res = send(
        &app.app,
        json_request(
            "POST",
            &format!("/api/v1/patients/{}/anc/visits", patient_id),
            Some(&nurse),
            json!({ "weight": "64", "vaccination": true }),
        ),
    )
    .await;
    let visit: Value = read_json(expect_status(res, StatusCode::CREATED).await).await;
    let visit_id = visit["id"].as_str().unwrap().to_string();

    let res = send(
        &app.app,
        empty_request(
            "GET",
            &format!("/api/v1/patients/{}/anc", patient_id),
            Some(&other_nurse),
        ),
    )
    .await;
    let history: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(history["current_info"]["id"], intake_id.as_str());
    assert_eq!(history["records"]["total_items"], 2);
    assert_eq!(history["records"]["items"][0]["id"], visit_id.as_str());
    assert!(history["records"]["items"][0]["author_username"].is_string());

    let res = send(
        &app.app,
        empty_request("GET", &format!("/api/v1/anc/{}", visit_id), Some(&other_nurse)),
    )
    .await;
    expect_status(res, StatusCode::FORBIDDEN).await;

    let res = send(
        &app.app,
        json_request(
            "PUT",
            &format!("/api/v1/anc/{}/intake", visit_id),
            Some(&nurse),
            json!({}),
        ),
    )
    .await;
    expect_status(res, StatusCode::BAD_REQUEST).await;

    let res = send(
        &app.app,
        json_request(
            "POST",
            &format!("/api/v1/patients/{}/notes/ldr", patient_id),
            Some(&nurse),
            json!({ "category": "Delivery", "description": "SVD at 03:10" }),
        ),
    )
    .await;
    let note: Value = read_json(expect_status(res, StatusCode::CREATED).await).await;
    let note_id = note["id"].as_str().unwrap().to_string();

    let res = send(
        &app.app,
        empty_request("GET", &format!("/api/v1/notes/pnc/{}", note_id), Some(&nurse)),
    )
    .await;
    expect_status(res, StatusCode::NOT_FOUND).await;

    let res = send(
        &app.app,
        empty_request("GET", "/api/v1/profile", Some(&nurse)),
    )
    .await;
    let profile: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(profile["record_counts"]["anc"], 2);
    assert_eq!(profile["record_counts"]["ldr"], 1);

    let res = send(
        &app.app,
        empty_request("GET", "/api/v1/profile/records/0?page=7", Some(&nurse)),
    )
    .await;
    let recent: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(recent["kind"], "anc");
    assert_eq!(recent["records"]["page_number"], 1);
    assert_eq!(recent["records"]["items"][0]["patient_name"], patient_name.as_str());

    let res = send(
        &app.app,
        empty_request("DELETE", &format!("/api/v1/patients/{}", patient_id), Some(&nurse)),
    )
    .await;
    expect_status(res, StatusCode::FORBIDDEN).await;

    let res = send(
        &app.app,
        empty_request("DELETE", &format!("/api/v1/patients/{}", patient_id), Some(&admin)),
    )
    .await;
    expect_status(res, StatusCode::NO_CONTENT).await;

    let res = send(
        &app.app,
        empty_request("GET", &format!("/api/v1/anc/{}", intake_id), Some(&nurse)),
    )
    .await;
    expect_status(res, StatusCode::NOT_FOUND).await;
}

#[tokio::test]
#[ignore = "requires a Postgres database"]
async fn smoke_user_administration() {
    let app = spawn_app().await;
    let admin = login(&app.app, &app.admin_username, &app.admin_password).await;
    let (username, nurse) = create_clinician(&app, &admin).await;

    let res = send(
        &app.app,
        json_request(
            "POST",
            "/api/v1/admin/users",
            Some(&admin),
            json!({ "username": username, "password": "x", "confirmation": "x" }),
        ),
    )
    .await;
    let err: Value = read_json(expect_status(res, StatusCode::BAD_REQUEST).await).await;
    assert_eq!(err["error"], format!("User {} is already registered.", username));

    let res = send(&app.app, empty_request("GET", "/api/v1/admin/users", Some(&nurse))).await;
    expect_status(res, StatusCode::FORBIDDEN).await;

    let res = send(&app.app, empty_request("GET", "/api/v1/auth/me", Some(&admin))).await;
    let me: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    let admin_id = me["user_id"].as_str().unwrap().to_string();

    let res = send(
        &app.app,
        empty_request("DELETE", &format!("/api/v1/admin/users/{}", admin_id), Some(&admin)),
    )
    .await;
    expect_status(res, StatusCode::BAD_REQUEST).await;

    let res = send(
        &app.app,
        json_request(
            "POST",
            "/api/v1/auth/login",
            None,
            json!({ "username": username, "password": "wrong" }),
        ),
    )
    .await;
    expect_status(res, StatusCode::FORBIDDEN).await;
}
