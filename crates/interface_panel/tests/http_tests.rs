//! The card against a real function server over HTTP

use std::sync::Arc;

use tokio::net::TcpListener;

use domain_rental::{CrmPort, MockCrmPort, MockOperation};
use interface_panel::{AlertLog, HttpServerFunctions, PanelError, RentalPanel, ServerFunctions};
use test_utils::{seeded_crm, DateFixtures, IdFixtures};

async fn spawn_server(crm: MockCrmPort) -> String {
    let port: Arc<dyn CrmPort> = Arc::new(crm);
    let app = interface_api::create_router(port);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_full_rental_flow_over_http() {
    let crm = seeded_crm().await;
    let base_url = spawn_server(crm.clone()).await;
    let alerts = Arc::new(AlertLog::new());
    let panel = RentalPanel::new(
        IdFixtures::contact_id(),
        Arc::new(HttpServerFunctions::new(base_url).unwrap()),
        alerts.clone(),
    );

    panel.set_zip_code("02139").await;
    panel.search_locations().await.unwrap();
    assert_eq!(panel.location_rows().await.len(), 1);

    panel.select_location(IdFixtures::location_id()).await.unwrap();
    assert_eq!(panel.vehicle_rows().await[0].description, "Toyota Camry 2022");

    panel.pick_vehicle(IdFixtures::vehicle_id()).await.unwrap();
    panel.set_start_date(DateFixtures::jan_1_2024()).await;
    panel.set_end_date(DateFixtures::jan_5_2024()).await;
    let rental_id = panel.submit().await.unwrap();

    assert_eq!(rental_id.as_str(), "rental-1");
    let rentals = crm.rental_agreements().await;
    assert_eq!(rentals[0].name, "Toyota Camry 2022 - Jane Doe");
    assert_eq!(rentals[0].total_days, 4);
    assert!(!crm.vehicle(&IdFixtures::vehicle_id()).await.unwrap().available);
}

#[tokio::test]
async fn test_error_payload_becomes_function_error() {
    let crm = seeded_crm().await;
    crm.fail_on(MockOperation::SearchVehicles).await;
    let functions = HttpServerFunctions::new(spawn_server(crm).await).unwrap();

    let result = functions.get_vehicles_for_location(&IdFixtures::location_id()).await;

    match result {
        Err(PanelError::Function { function, message }) => {
            assert_eq!(function, "getVehiclesForLocation");
            assert!(message.contains("CRM request failed"));
        }
        other => panic!("expected a function error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let functions = HttpServerFunctions::new("http://127.0.0.1:1").unwrap();

    let result = functions.get_locations("02139").await;

    assert!(matches!(result, Err(PanelError::Transport(_))));
}
