//! Function server tests over the in-memory CRM

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use core_kernel::LocationId;
use domain_rental::{CrmPort, MockCrmPort, MockOperation};
use interface_api::create_router;
use test_utils::{assert_error_payload, seeded_crm, IdFixtures, RecordFixtures, VehicleBuilder};

fn server(crm: MockCrmPort) -> TestServer {
    let crm: Arc<dyn CrmPort> = Arc::new(crm);
    TestServer::new(create_router(crm)).unwrap()
}

async fn invoke(server: &TestServer, name: &str, parameters: Value) -> Value {
    let response = server
        .post(&format!("/functions/{}", name))
        .json(&json!({ "parameters": parameters }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "SUCCESS");
    body["response"].clone()
}

#[tokio::test]
async fn test_health() {
    let server = server(MockCrmPort::new());

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_reports_crm_health() {
    let server = server(MockCrmPort::new());

    let response = server.get("/health/ready").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["crm"]["status"], "healthy");
}

#[tokio::test]
async fn test_vehicles_for_location_only_available() {
    let crm = seeded_crm().await;
    crm.insert_vehicle(
        VehicleBuilder::new()
            .with_id("10002")
            .available(false)
            .build(),
    )
    .await;
    crm.insert_vehicle(
        VehicleBuilder::new()
            .with_id("10003")
            .at_location(LocationId::new("99999"))
            .build(),
    )
    .await;
    let server = server(crm);

    let payload = invoke(
        &server,
        "getVehiclesForLocation",
        json!({"locationId": IdFixtures::location_id()}),
    )
    .await;

    assert_eq!(payload["total"], 1);
    assert_eq!(payload["results"][0]["id"], "10001");
    assert_eq!(payload["results"][0]["make"], "Toyota");
}

#[tokio::test]
async fn test_vehicle_search_failure_is_error_payload() {
    let crm = seeded_crm().await;
    crm.fail_on(MockOperation::SearchVehicles).await;
    let server = server(crm);

    let payload = invoke(&server, "getVehiclesForLocation", json!({"locationId": "30001"})).await;

    assert_error_payload(&payload);
}

#[tokio::test]
async fn test_create_rental_agreement() {
    let crm = seeded_crm().await;
    let server = server(crm.clone());

    let payload = invoke(
        &server,
        "createRentalAgreement",
        json!({
            "vehicleId": "10001",
            "contactId": "20001",
            "startDate": {"year": 2024, "month": 0, "date": 1, "formattedDate": "01/01/2024"},
            "endDate": "2024-01-05",
            "insurance": true
        }),
    )
    .await;

    assert_eq!(payload, json!({"success": true, "rentalAgreementId": "rental-1"}));

    let rentals = crm.rental_agreements().await;
    assert_eq!(rentals.len(), 1);
    assert_eq!(rentals[0].name, "Toyota Camry 2022 - Jane Doe");
    assert_eq!(rentals[0].total_days, 4);

    let vehicle = crm.vehicle(&IdFixtures::vehicle_id()).await.unwrap();
    assert!(!vehicle.available);
}

#[tokio::test]
async fn test_create_with_reversed_dates_makes_no_crm_call() {
    let crm = seeded_crm().await;
    let server = server(crm.clone());

    let payload = invoke(
        &server,
        "createRentalAgreement",
        json!({
            "vehicleId": "10001",
            "contactId": "20001",
            "startDate": "2024-01-05",
            "endDate": "2024-01-01"
        }),
    )
    .await;

    assert_error_payload(&payload);
    assert!(crm.calls().await.is_empty());
}

#[tokio::test]
async fn test_create_with_out_of_range_picker_month_is_error_payload() {
    let crm = seeded_crm().await;
    let server = server(crm.clone());

    let payload = invoke(
        &server,
        "createRentalAgreement",
        json!({
            "vehicleId": "10001",
            "contactId": "20001",
            "startDate": {"year": 2024, "month": 4294967295u32, "date": 5},
            "endDate": "2024-01-10"
        }),
    )
    .await;

    assert_error_payload(&payload);
    assert!(crm.calls().await.is_empty());
}

#[tokio::test]
async fn test_failed_availability_patch_keeps_rental() {
    let crm = seeded_crm().await;
    crm.fail_on(MockOperation::SetVehicleAvailability).await;
    let server = server(crm.clone());

    let payload = invoke(
        &server,
        "createRentalAgreement",
        json!({
            "vehicleId": "10001",
            "contactId": "20001",
            "startDate": "2024-01-01",
            "endDate": "2024-01-05"
        }),
    )
    .await;

    assert_error_payload(&payload);
    assert!(payload["error"].as_str().unwrap().contains("rental-1"));
    assert_eq!(crm.rental_agreements().await.len(), 1);
    assert!(crm.vehicle(&IdFixtures::vehicle_id()).await.unwrap().available);
}

#[tokio::test]
async fn test_get_locations() {
    let crm = MockCrmPort::new();
    for location in RecordFixtures::locations(3, "02139") {
        crm.insert_location(location).await;
    }
    crm.insert_location(RecordFixtures::downtown()).await;
    let server = server(crm);

    let payload = invoke(&server, "getLocations", json!({"zipCode": "02139"})).await;

    assert_eq!(payload["total"], 4);
    assert_eq!(payload["results"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_missing_parameters_is_error_payload() {
    let server = server(seeded_crm().await);

    let payload = invoke(&server, "getLocations", json!({})).await;

    assert_error_payload(&payload);
}

#[tokio::test]
async fn test_unknown_function_is_not_found() {
    let server = server(MockCrmPort::new());

    let response = server
        .post("/functions/deleteEverything")
        .json(&json!({"parameters": {}}))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "not_found");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let server = server(MockCrmPort::new());

    let response = server
        .post("/functions/getLocations")
        .text("{not json")
        .content_type("application/json")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "bad_request");
}
