//! Rental card behaviour tests

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use core_kernel::{DateInput, LocationId, RentalAgreementId};
use domain_rental::functions::{CreateRentalAgreementParams, LocationResults, RentalCreated, VehicleResults};
use domain_rental::{CrmPort, MockOperation, SearchPage};
use interface_panel::{
    AlertKind, AlertLog, LocalServerFunctions, PanelError, PanelPhase, RentalForm,
    RentalPanel, ServerFunctions,
};
use test_utils::{seeded_crm, DateFixtures, IdFixtures, RecordFixtures, VehicleBuilder};

/// Scripted functions that record every invocation
#[derive(Default)]
struct FakeFunctions {
    location_count: usize,
    fail_vehicles: bool,
    fail_create: bool,
    slow_location: Option<LocationId>,
    zip_codes: Mutex<Vec<String>>,
    created: Mutex<Vec<CreateRentalAgreementParams>>,
}

impl FakeFunctions {
    fn with_locations(location_count: usize) -> Self {
        Self {
            location_count,
            ..Default::default()
        }
    }

    fn zip_codes(&self) -> Vec<String> {
        self.zip_codes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ServerFunctions for FakeFunctions {
    async fn get_locations(&self, zip_code: &str) -> Result<LocationResults, PanelError> {
        self.zip_codes.lock().unwrap().push(zip_code.to_string());
        let results = RecordFixtures::locations(self.location_count, zip_code);
        Ok(SearchPage {
            total: results.len() as u64,
            results,
        })
    }

    async fn get_vehicles_for_location(
        &self,
        location_id: &LocationId,
    ) -> Result<VehicleResults, PanelError> {
        if self.slow_location.as_ref() == Some(location_id) {
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
        if self.fail_vehicles {
            return Err(PanelError::function("getVehiclesForLocation", "CRM unavailable"));
        }
        let vehicle = if *location_id == IdFixtures::location_id() {
            RecordFixtures::camry()
        } else {
            VehicleBuilder::new()
                .with_id("10002")
                .with_make_model_year("Honda", "Civic", 2021)
                .at_location(location_id.clone())
                .build()
        };
        Ok(SearchPage {
            results: vec![vehicle],
            total: 1,
        })
    }

    async fn create_rental_agreement(
        &self,
        params: CreateRentalAgreementParams,
    ) -> Result<RentalCreated, PanelError> {
        self.created.lock().unwrap().push(params);
        if self.fail_create {
            return Err(PanelError::function("createRentalAgreement", "CRM unavailable"));
        }
        Ok(RentalCreated::new(RentalAgreementId::new("50001")))
    }
}

fn panel_with(functions: Arc<FakeFunctions>) -> (RentalPanel, Arc<AlertLog>) {
    let alerts = Arc::new(AlertLog::new());
    let panel = RentalPanel::new(IdFixtures::contact_id(), functions, alerts.clone());
    (panel, alerts)
}

/// Drives a panel up to a filled rental form for the Camry
async fn fill_form(panel: &RentalPanel) {
    panel.set_zip_code("02139").await;
    panel.search_locations().await.unwrap();
    panel.select_location(IdFixtures::location_id()).await.unwrap();
    panel.pick_vehicle(IdFixtures::vehicle_id()).await.unwrap();
    panel.set_start_date(DateFixtures::jan_1_2024()).await;
    panel.set_end_date(DateFixtures::jan_5_2024()).await;
    panel.set_insurance(true).await;
}

#[tokio::test]
async fn test_thirty_two_locations_paginate_to_three_pages() {
    let (panel, alerts) = panel_with(Arc::new(FakeFunctions::with_locations(32)));

    panel.set_zip_code("02139").await;
    panel.search_locations().await.unwrap();

    assert_eq!(panel.phase().await, PanelPhase::LocationsShown);
    assert_eq!(panel.page_count().await, 3);
    assert_eq!(panel.location_rows().await.len(), 15);

    assert!(panel.change_page(3).await);
    let rows = panel.location_rows().await;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, "loc-030");

    assert!(!panel.change_page(4).await);
    assert_eq!(panel.current_page().await, 3);

    let alerts = alerts.drain();
    assert_eq!(alerts[0].message, "Fetching locations...");
    assert_eq!(alerts[0].kind, AlertKind::Info);
}

#[tokio::test]
async fn test_new_search_resets_to_first_page() {
    let (panel, _) = panel_with(Arc::new(FakeFunctions::with_locations(32)));
    panel.search_locations().await.unwrap();
    panel.change_page(2).await;

    panel.search_locations().await.unwrap();

    assert_eq!(panel.current_page().await, 1);
}

#[tokio::test]
async fn test_location_rows_render_address() {
    let (panel, _) = panel_with(Arc::new(FakeFunctions::with_locations(1)));
    panel.set_zip_code("02139").await;
    panel.search_locations().await.unwrap();

    let row = &panel.location_rows().await[0];
    assert_eq!(row.postal_code, "02139");
    assert_eq!(row.address, "100 Main St Cambridge, MA");
    assert_eq!(row.available_vehicles, 3);
}

#[tokio::test(start_paused = true)]
async fn test_rapid_zip_entry_runs_one_search_with_last_zip() {
    let functions = Arc::new(FakeFunctions::with_locations(4));
    let (panel, _) = panel_with(functions.clone());

    let mut handles = Vec::new();
    for zip in ["0", "02", "021", "0213", "02139"] {
        handles.push(panel.enter_zip_code(zip).await);
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(functions.zip_codes(), vec!["02139".to_string()]);
    assert_eq!(panel.page_count().await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_pauses_longer_than_debounce_search_each_time() {
    let functions = Arc::new(FakeFunctions::with_locations(1));
    let (panel, _) = panel_with(functions.clone());
    let panel = panel.with_debounce(Duration::from_millis(200));

    let first = panel.enter_zip_code("10001").await;
    tokio::time::sleep(Duration::from_millis(300)).await;
    let second = panel.enter_zip_code("94105").await;

    assert!(first.await.unwrap());
    assert!(second.await.unwrap());
    assert_eq!(functions.zip_codes(), vec!["10001".to_string(), "94105".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_search_button_drops_pending_debounced_search() {
    let functions = Arc::new(FakeFunctions::with_locations(2));
    let (panel, _) = panel_with(functions.clone());

    let pending = panel.enter_zip_code("02139").await;
    panel.search_locations().await.unwrap();

    assert!(!pending.await.unwrap());
    assert_eq!(functions.zip_codes(), vec!["02139".to_string()]);
    assert_eq!(panel.phase().await, PanelPhase::LocationsShown);
}

#[tokio::test(start_paused = true)]
async fn test_slow_vehicle_fetch_does_not_replace_newer_selection() {
    let slow = IdFixtures::location_id();
    let fast = LocationId::new("30002");
    let functions = Arc::new(FakeFunctions {
        slow_location: Some(slow.clone()),
        ..Default::default()
    });
    let (panel, _) = panel_with(functions);

    let first = {
        let panel = panel.clone();
        tokio::spawn(async move { panel.select_location(slow).await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    panel.select_location(fast.clone()).await.unwrap();
    first.await.unwrap().unwrap();

    assert_eq!(panel.selected_location().await, Some(fast));
    assert_eq!(panel.phase().await, PanelPhase::VehiclesShown);
    let rows = panel.vehicle_rows().await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, "Honda Civic 2021");
}

#[tokio::test]
async fn test_vehicle_modal_lists_vehicles() {
    let (panel, _) = panel_with(Arc::new(FakeFunctions::with_locations(1)));

    panel.select_location(IdFixtures::location_id()).await.unwrap();

    assert!(panel.is_modal_open().await);
    assert_eq!(panel.phase().await, PanelPhase::VehiclesShown);
    let rows = panel.vehicle_rows().await;
    assert_eq!(rows[0].description, "Toyota Camry 2022");
    assert_eq!(rows[0].daily_rate, "$45.00");
}

#[tokio::test]
async fn test_vehicle_fetch_failure_alerts() {
    let functions = Arc::new(FakeFunctions {
        fail_vehicles: true,
        ..Default::default()
    });
    let (panel, alerts) = panel_with(functions);

    let result = panel.select_location(IdFixtures::location_id()).await;

    assert!(result.is_err());
    assert!(panel.vehicle_rows().await.is_empty());
    let alerts = alerts.drain();
    assert_eq!(alerts.last().unwrap().message, "Error fetching vehicles");
    assert_eq!(alerts.last().unwrap().kind, AlertKind::Error);
}

#[tokio::test]
async fn test_submit_requires_both_dates() {
    let functions = Arc::new(FakeFunctions::with_locations(1));
    let (panel, _) = panel_with(functions.clone());
    panel.select_location(IdFixtures::location_id()).await.unwrap();
    panel.pick_vehicle(IdFixtures::vehicle_id()).await.unwrap();
    panel.set_start_date(DateFixtures::jan_1_2024()).await;

    assert!(!panel.can_submit().await);
    assert!(matches!(panel.submit().await, Err(PanelError::FormIncomplete)));
    assert!(functions.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_pick_vehicle_outside_list_rejected() {
    let (panel, _) = panel_with(Arc::new(FakeFunctions::with_locations(1)));
    panel.select_location(IdFixtures::location_id()).await.unwrap();

    let result = panel.pick_vehicle("99999".into()).await;

    assert!(matches!(result, Err(PanelError::UnknownVehicle(_))));
    assert!(!panel.form().await.is_visible());
}

#[tokio::test]
async fn test_submit_success_closes_modal_and_resets_form() {
    let functions = Arc::new(FakeFunctions::with_locations(1));
    let (panel, alerts) = panel_with(functions.clone());
    fill_form(&panel).await;
    assert!(panel.can_submit().await);

    let rental_id = panel.submit().await.unwrap();

    assert_eq!(rental_id.as_str(), "50001");
    assert_eq!(panel.phase().await, PanelPhase::Succeeded);
    assert!(!panel.is_modal_open().await);
    assert_eq!(panel.form().await, RentalForm::default());
    assert_eq!(alerts.drain().last().unwrap().message, "Rental agreement created successfully!");

    let created = functions.created.lock().unwrap();
    assert_eq!(created[0].contact_id, IdFixtures::contact_id());
    assert_eq!(created[0].vehicle_id, IdFixtures::vehicle_id());
    assert!(created[0].insurance);
}

#[tokio::test]
async fn test_submit_failure_keeps_form() {
    let functions = Arc::new(FakeFunctions {
        location_count: 1,
        fail_create: true,
        ..Default::default()
    });
    let (panel, alerts) = panel_with(functions);
    fill_form(&panel).await;

    let result = panel.submit().await;

    assert!(result.is_err());
    assert_eq!(panel.phase().await, PanelPhase::Failed);
    assert!(panel.is_modal_open().await);
    let form = panel.form().await;
    assert_eq!(form.vehicle_id, Some(IdFixtures::vehicle_id()));
    assert_eq!(form.start_date, Some(DateInput::from(DateFixtures::jan_1_2024())));
    assert_eq!(alerts.drain().last().unwrap().message, "Error creating rental agreement");
}

#[tokio::test]
async fn test_closing_modal_keeps_form() {
    let (panel, _) = panel_with(Arc::new(FakeFunctions::with_locations(1)));
    fill_form(&panel).await;

    panel.close_modal().await;

    assert!(!panel.is_modal_open().await);
    assert!(panel.can_submit().await);
}

#[tokio::test]
async fn test_local_functions_create_rental_in_crm() {
    let crm = seeded_crm().await;
    let port: Arc<dyn CrmPort> = Arc::new(crm.clone());
    let alerts = Arc::new(AlertLog::new());
    let panel = RentalPanel::new(
        IdFixtures::contact_id(),
        Arc::new(LocalServerFunctions::new(port)),
        alerts.clone(),
    );

    fill_form(&panel).await;
    let rental_id = panel.submit().await.unwrap();

    assert_eq!(rental_id.as_str(), "rental-1");
    assert!(!crm.vehicle(&IdFixtures::vehicle_id()).await.unwrap().available);
}

#[tokio::test]
async fn test_local_functions_reversed_dates_fail_without_crm_write() {
    let crm = seeded_crm().await;
    let port: Arc<dyn CrmPort> = Arc::new(crm.clone());
    let panel = RentalPanel::new(
        IdFixtures::contact_id(),
        Arc::new(LocalServerFunctions::new(port)),
        Arc::new(AlertLog::new()),
    );

    fill_form(&panel).await;
    panel
        .set_start_date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
        .await;

    assert!(panel.submit().await.is_err());
    assert!(crm.rental_agreements().await.is_empty());
    assert!(!crm.calls().await.contains(&MockOperation::CreateRentalAgreement));
}
