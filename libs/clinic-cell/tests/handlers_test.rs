use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use clinic_cell::router::clinic_routes;
use clinic_cell::services::ClinicService;
use clinic_cell::AppState;
use shared_gateway::ClinicGateway;
use shared_utils::test_utils::{MockClinicResponses, TestConfig};

fn app_for(server: &MockServer) -> Router {
    let config = TestConfig::with_base_url(&server.uri()).to_clinic_config();
    let clinic = ClinicService::new(Arc::new(ClinicGateway::new(&config)));
    clinic_routes(Arc::new(AppState::new(config, clinic)))
}

async fn mount_token_endpoint(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockClinicResponses::token(3600)))
        .mount(server)
        .await;
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn list_patients_route_returns_the_envelope() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/integration/facilities/77/patients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockClinicResponses::patient_items(
            json!([{ "id": 3, "name": "Jo", "mobile": null }]),
        )))
        .mount(&server)
        .await;

    let app = app_for(&server);
    let response = app
        .oneshot(Request::get("/patients").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"][0]["id"], json!(3));
}

#[tokio::test]
async fn slots_route_fails_locally_when_parameters_are_missing() {
    let server = MockServer::start().await;
    let app = app_for(&server);

    let response = app
        .oneshot(
            Request::get("/slots?doctorId=8&addressId=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // 200 with success:false - the envelope is the contract
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn cancel_booking_route_passes_the_default_external_id() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    Mock::given(method("DELETE"))
        .and(path(
            "/api/v1/integration/facilities/77/doctors/8/addresses/1/bookings/42",
        ))
        .and(query_param("externalId", "1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_for(&server);
    let response = app
        .oneshot(
            Request::delete("/bookings/42?doctorId=8&addressId=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
}

#[tokio::test]
async fn create_patient_route_echoes_the_upstream_body() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/integration/facilities/77/patients"))
        .respond_with(ResponseTemplate::new(200)
            .set_body_json(json!({ "result": { "id": 88, "upstream_only": "kept" } })))
        .mount(&server)
        .await;

    let app = app_for(&server);
    let response = app
        .oneshot(
            Request::post("/patients")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({ "name": "Jo", "cpf": "12345678900" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    // raw pass-through, nothing stripped
    assert_eq!(body["data"]["result"]["upstream_only"], json!("kept"));
}
