use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use bloodbank_api::{AppState, build_router};
use bloodbank_services::Stores;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

fn fixture_app() -> Router {
    build_router(AppState::new(Stores::in_memory()), None)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

fn donor_body(name: &str) -> Value {
    json!({
        "name": name,
        "bloodType": "O-",
        "phone": "555-0101",
        "email": format!("{}@example.com", name.to_lowercase()),
        "address": "12 Harbour Rd"
    })
}

fn request_body(patient: &str) -> Value {
    json!({
        "patientName": patient,
        "bloodType": "AB+",
        "unitsNeeded": 2,
        "priority": "High",
        "hospital": "St. Luke"
    })
}

async fn create_donor(app: &Router, name: &str) -> Value {
    let (status, body) = send(app, Method::POST, "/api/donors", Some(donor_body(name))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["donor"].clone()
}

#[tokio::test]
async fn test_created_donor_appears_in_list() {
    let app = fixture_app();

    let (status, created) = send(&app, Method::POST, "/api/donors", Some(donor_body("Ada"))).await;
    let (_, listed) = send(&app, Method::GET, "/api/donors", None).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["success"], json!(true));
    assert!(created["donor"]["_id"].is_string());
    assert!(created["donor"]["createdAt"].is_string());
    assert_eq!(listed, json!([created["donor"]]));
}

#[tokio::test]
async fn test_missing_required_field_is_rejected() {
    let app = fixture_app();
    let mut body = donor_body("Ada");
    body.as_object_mut().unwrap().remove("bloodType");

    let (status, error) = send(&app, Method::POST, "/api/donors", Some(body)).await;
    let (_, listed) = send(&app, Method::GET, "/api/donors", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["success"], json!(false));
    assert_eq!(error["message"], json!("Donor validation failed: `bloodType` is required"));
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_malformed_json_is_a_validation_error() {
    let app = fixture_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/requests")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"patientName\": "))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_priority_is_rejected() {
    let app = fixture_app();
    let mut body = request_body("J. Mensah");
    body["priority"] = json!("Urgent");

    let (status, error) = send(&app, Method::POST, "/api/requests", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], json!("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_delete_unknown_identifier_is_not_found_everywhere() {
    let app = fixture_app();
    create_donor(&app, "Ada").await;

    for path in ["/api/donors/missing", "/api/inventory/missing", "/api/requests/missing"] {
        let (status, body) = send(&app, Method::DELETE, path, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "Path: {}", path);
        assert_eq!(body["success"], json!(false), "Path: {}", path);
    }

    let (_, listed) = send(&app, Method::GET, "/api/donors", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_donor_leaves_inventory_reference() {
    let app = fixture_app();
    let donor = create_donor(&app, "Ada").await;
    let donor_id = donor["_id"].as_str().unwrap();
    send(
        &app,
        Method::POST,
        "/api/inventory",
        Some(json!({ "bloodType": "O-", "donorId": donor_id, "collectionDate": "2024-03-01" })),
    )
    .await;

    let (status, body) = send(&app, Method::DELETE, &format!("/api/donors/{donor_id}"), None).await;
    let (_, inventory) = send(&app, Method::GET, "/api/inventory", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "message": "Donor deleted successfully" }));
    assert_eq!(inventory[0]["donorId"], json!(donor_id));
}

#[tokio::test]
async fn test_inventory_expiry_and_last_donation() {
    let app = fixture_app();
    let donor = create_donor(&app, "Ada").await;
    let donor_id = donor["_id"].as_str().unwrap();

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/inventory",
        Some(json!({ "bloodType": "O-", "donorId": donor_id, "collectionDate": "2024-01-01" })),
    )
    .await;
    let (_, donors) = send(&app, Method::GET, "/api/donors", None).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["success"], json!(true));
    assert_eq!(created["bloodUnit"]["expiryDate"], json!("2024-02-05"));
    assert_eq!(created["bloodUnit"]["status"], json!("Available"));
    assert_eq!(donors[0]["lastDonation"], json!("2024-01-01"));
}

#[tokio::test]
async fn test_inventory_with_unknown_donor_still_created() {
    let app = fixture_app();
    let donor = create_donor(&app, "Ada").await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/inventory",
        Some(json!({ "bloodType": "B+", "donorId": "no-such-donor", "collectionDate": "2024-01-01" })),
    )
    .await;
    let (_, donors) = send(&app, Method::GET, "/api/donors", None).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["bloodUnit"]["donorId"], json!("no-such-donor"));
    assert_eq!(donors, json!([donor]));
}

#[tokio::test]
async fn test_request_status_transitions_are_unrestricted() {
    let app = fixture_app();
    let (_, created) = send(&app, Method::POST, "/api/requests", Some(request_body("J. Mensah"))).await;
    let id = created["request"]["_id"].as_str().unwrap().to_string();
    assert_eq!(created["request"]["status"], json!("Pending"));

    let (fulfilled_status, fulfilled) =
        send(&app, Method::PUT, &format!("/api/requests/{id}"), Some(json!({ "status": "Fulfilled" })))
            .await;
    let (cancelled_status, cancelled) =
        send(&app, Method::PUT, &format!("/api/requests/{id}"), Some(json!({ "status": "Cancelled" })))
            .await;

    assert_eq!(fulfilled_status, StatusCode::OK);
    assert_eq!(fulfilled["request"]["status"], json!("Fulfilled"));
    assert_eq!(cancelled_status, StatusCode::OK);
    assert_eq!(cancelled["request"]["status"], json!("Cancelled"));
    assert_eq!(cancelled["request"]["requestDate"], created["request"]["requestDate"]);
}

#[tokio::test]
async fn test_request_update_errors() {
    let app = fixture_app();
    let (_, created) = send(&app, Method::POST, "/api/requests", Some(request_body("J. Mensah"))).await;
    let id = created["request"]["_id"].as_str().unwrap().to_string();

    let (missing_status, _) =
        send(&app, Method::PUT, "/api/requests/missing", Some(json!({ "status": "Fulfilled" }))).await;
    let (invalid_status, _) =
        send(&app, Method::PUT, &format!("/api/requests/{id}"), Some(json!({ "hospital": "" }))).await;
    let (bad_enum_status, _) =
        send(&app, Method::PUT, &format!("/api/requests/{id}"), Some(json!({ "status": "Lost" }))).await;
    let (_, listed) = send(&app, Method::GET, "/api/requests", None).await;

    assert_eq!(missing_status, StatusCode::NOT_FOUND);
    assert_eq!(invalid_status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_enum_status, StatusCode::BAD_REQUEST);
    assert_eq!(listed, json!([created["request"]]));
}

#[tokio::test]
async fn test_lists_are_newest_first() {
    let app = fixture_app();
    create_donor(&app, "First").await;
    create_donor(&app, "Second").await;
    send(&app, Method::POST, "/api/requests", Some(request_body("Older"))).await;
    send(&app, Method::POST, "/api/requests", Some(request_body("Newer"))).await;

    let (_, donors) = send(&app, Method::GET, "/api/donors", None).await;
    let (_, requests) = send(&app, Method::GET, "/api/requests", None).await;

    let actual_donors: Vec<&str> =
        donors.as_array().unwrap().iter().map(|d| d["name"].as_str().unwrap()).collect();
    let actual_requests: Vec<&str> =
        requests.as_array().unwrap().iter().map(|r| r["patientName"].as_str().unwrap()).collect();

    assert_eq!(actual_donors, vec!["Second", "First"]);
    assert_eq!(actual_requests, vec!["Newer", "Older"]);
}

#[tokio::test]
async fn test_health_and_unknown_api_route() {
    let app = fixture_app();

    let (health_status, health) = send(&app, Method::GET, "/api/health", None).await;
    let (missing_status, missing) = send(&app, Method::GET, "/api/unknown", None).await;

    assert_eq!(health_status, StatusCode::OK);
    assert_eq!(health["status"], json!("healthy"));
    assert_eq!(missing_status, StatusCode::NOT_FOUND);
    assert_eq!(missing["success"], json!(false));
}

#[tokio::test]
async fn test_spa_fallback_serves_index() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<html>bloodbank</html>").unwrap();
    let app = build_router(AppState::new(Stores::in_memory()), Some(dir.path()));

    let request = Request::builder().uri("/dashboard/donors").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(&bytes[..], b"<html>bloodbank</html>");
}
