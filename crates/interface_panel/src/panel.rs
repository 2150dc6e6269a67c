//! The rental card view-model
//!
//! [`RentalPanel`] holds everything the card shows and exposes one method
//! per user action. It is cheap to clone; clones share state, which lets a
//! debounced search run on a spawned task.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use core_kernel::{ContactId, DateInput, LocationId, RentalAgreementId, VehicleId};
use domain_rental::functions::CreateRentalAgreementParams;
use domain_rental::{Location, Vehicle};

use crate::alerts::{
    Alert, AlertSink, FETCHING_LOCATIONS, LOCATIONS_FAILED, RENTAL_CREATED, RENTAL_FAILED,
    VEHICLES_FAILED,
};
use crate::debounce::Debouncer;
use crate::error::PanelError;
use crate::functions::ServerFunctions;
use crate::pagination::Paginator;
use crate::rows::{LocationRow, VehicleRow};

/// Where the card is in its flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelPhase {
    Idle,
    SearchingLocations,
    LocationsShown,
    VehiclesLoading,
    VehiclesShown,
    RentalFormFilled,
    Submitting,
    Succeeded,
    Failed,
}

/// Contents of the rental form inside the vehicle modal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RentalForm {
    pub vehicle_id: Option<VehicleId>,
    pub start_date: Option<DateInput>,
    pub end_date: Option<DateInput>,
    pub insurance: bool,
}

impl RentalForm {
    /// The form is shown once a vehicle is picked
    pub fn is_visible(&self) -> bool {
        self.vehicle_id.is_some()
    }

    pub fn has_dates(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some()
    }
}

#[derive(Debug)]
struct PanelState {
    phase: PanelPhase,
    zip_code: String,
    locations: Vec<Location>,
    pages: Paginator,
    modal_open: bool,
    selected_location: Option<LocationId>,
    vehicles: Vec<Vehicle>,
    form: RentalForm,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            phase: PanelPhase::Idle,
            zip_code: String::new(),
            locations: Vec::new(),
            pages: Paginator::default(),
            modal_open: false,
            selected_location: None,
            vehicles: Vec::new(),
            form: RentalForm::default(),
        }
    }
}

/// View-model of the card shown on a contact record
#[derive(Clone)]
pub struct RentalPanel {
    contact_id: ContactId,
    functions: Arc<dyn ServerFunctions>,
    alerts: Arc<dyn AlertSink>,
    debouncer: Debouncer,
    state: Arc<Mutex<PanelState>>,
}

impl RentalPanel {
    /// A panel for the contact record with the given id
    pub fn new(
        contact_id: ContactId,
        functions: Arc<dyn ServerFunctions>,
        alerts: Arc<dyn AlertSink>,
    ) -> Self {
        Self {
            contact_id,
            functions,
            alerts,
            debouncer: Debouncer::default(),
            state: Arc::new(Mutex::new(PanelState::default())),
        }
    }

    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debouncer = Debouncer::new(delay);
        self
    }

    pub fn contact_id(&self) -> &ContactId {
        &self.contact_id
    }

    pub async fn phase(&self) -> PanelPhase {
        self.state.lock().await.phase
    }

    pub async fn zip_code(&self) -> String {
        self.state.lock().await.zip_code.clone()
    }

    pub async fn set_zip_code(&self, zip_code: impl Into<String>) {
        self.state.lock().await.zip_code = zip_code.into();
    }

    /// Searches locations for the current zip code right away
    ///
    /// A debounced search still waiting on its quiet period is dropped.
    pub async fn search_locations(&self) -> Result<(), PanelError> {
        self.debouncer.cancel();
        self.run_location_search().await
    }

    async fn run_location_search(&self) -> Result<(), PanelError> {
        let zip_code = {
            let mut state = self.state.lock().await;
            state.phase = PanelPhase::SearchingLocations;
            state.zip_code.clone()
        };
        self.alerts.send(Alert::info(FETCHING_LOCATIONS));

        let result = self.functions.get_locations(&zip_code).await;

        let mut state = self.state.lock().await;
        match result {
            Ok(page) => {
                info!(zip_code = %zip_code, count = page.results.len(), total = page.total, "Locations loaded");
                state.pages.reset(page.results.len());
                state.locations = page.results;
                state.phase = PanelPhase::LocationsShown;
                Ok(())
            }
            Err(e) => {
                warn!(zip_code = %zip_code, error = %e, "Location search failed");
                state.phase = if state.locations.is_empty() {
                    PanelPhase::Idle
                } else {
                    PanelPhase::LocationsShown
                };
                drop(state);
                self.alerts.send(Alert::error(LOCATIONS_FAILED));
                Err(e)
            }
        }
    }

    /// Types a zip code and searches once typing pauses
    ///
    /// Only the last search scheduled within the quiet period runs, and it
    /// uses the zip code current at that moment.
    pub async fn enter_zip_code(&self, zip_code: impl Into<String>) -> JoinHandle<bool> {
        self.set_zip_code(zip_code).await;
        let panel = self.clone();
        self.debouncer.schedule(async move {
            // Failures already raised an alert
            let _ = panel.run_location_search().await;
        })
    }

    pub async fn page_count(&self) -> usize {
        self.state.lock().await.pages.page_count()
    }

    pub async fn current_page(&self) -> usize {
        self.state.lock().await.pages.current_page()
    }

    /// Returns false and keeps the page when `page` is out of range
    pub async fn change_page(&self, page: usize) -> bool {
        self.state.lock().await.pages.change_page(page)
    }

    /// Rows of the current location page
    pub async fn location_rows(&self) -> Vec<LocationRow> {
        let state = self.state.lock().await;
        state
            .pages
            .slice(&state.locations)
            .iter()
            .map(LocationRow::from)
            .collect()
    }

    /// Opens the vehicle modal for a location and loads its vehicles
    ///
    /// When another location is selected before the fetch returns, the
    /// result is discarded and the newer selection's vehicles stay.
    pub async fn select_location(&self, location_id: LocationId) -> Result<(), PanelError> {
        {
            let mut state = self.state.lock().await;
            state.modal_open = true;
            state.selected_location = Some(location_id.clone());
            state.vehicles.clear();
            state.phase = PanelPhase::VehiclesLoading;
        }

        let result = self.functions.get_vehicles_for_location(&location_id).await;

        let mut state = self.state.lock().await;
        if state.selected_location.as_ref() != Some(&location_id) {
            debug!(location_id = %location_id, "Discarding vehicles for a superseded selection");
            return Ok(());
        }
        state.phase = PanelPhase::VehiclesShown;
        match result {
            Ok(page) => {
                info!(location_id = %location_id, count = page.results.len(), "Vehicles loaded");
                state.vehicles = page.results;
                Ok(())
            }
            Err(e) => {
                warn!(location_id = %location_id, error = %e, "Vehicle search failed");
                drop(state);
                self.alerts.send(Alert::error(VEHICLES_FAILED));
                Err(e)
            }
        }
    }

    pub async fn is_modal_open(&self) -> bool {
        self.state.lock().await.modal_open
    }

    pub async fn selected_location(&self) -> Option<LocationId> {
        self.state.lock().await.selected_location.clone()
    }

    pub async fn vehicle_rows(&self) -> Vec<VehicleRow> {
        self.state.lock().await.vehicles.iter().map(VehicleRow::from).collect()
    }

    /// Picks a vehicle from the modal list, revealing the rental form
    pub async fn pick_vehicle(&self, vehicle_id: VehicleId) -> Result<(), PanelError> {
        let mut state = self.state.lock().await;
        if !state.vehicles.iter().any(|v| v.id == vehicle_id) {
            return Err(PanelError::UnknownVehicle(vehicle_id.to_string()));
        }
        state.form.vehicle_id = Some(vehicle_id);
        state.phase = PanelPhase::RentalFormFilled;
        Ok(())
    }

    pub async fn set_start_date(&self, date: impl Into<DateInput>) {
        self.state.lock().await.form.start_date = Some(date.into());
    }

    pub async fn set_end_date(&self, date: impl Into<DateInput>) {
        self.state.lock().await.form.end_date = Some(date.into());
    }

    pub async fn set_insurance(&self, insurance: bool) {
        self.state.lock().await.form.insurance = insurance;
    }

    pub async fn form(&self) -> RentalForm {
        self.state.lock().await.form.clone()
    }

    /// The create button is enabled once a vehicle and both dates are set
    pub async fn can_submit(&self) -> bool {
        let state = self.state.lock().await;
        state.form.is_visible() && state.form.has_dates()
    }

    /// Creates the rental agreement for the picked vehicle and this contact
    ///
    /// On success the modal closes and the form resets. On failure the form
    /// keeps its contents so the agent can retry.
    pub async fn submit(&self) -> Result<RentalAgreementId, PanelError> {
        let params = {
            let mut state = self.state.lock().await;
            let form = &state.form;
            let vehicle_id = form.vehicle_id.clone().ok_or(PanelError::NoVehicleSelected)?;
            let (Some(start_date), Some(end_date)) = (form.start_date.clone(), form.end_date.clone()) else {
                return Err(PanelError::FormIncomplete);
            };
            let params = CreateRentalAgreementParams {
                vehicle_id,
                contact_id: self.contact_id.clone(),
                start_date,
                end_date,
                insurance: form.insurance,
            };
            state.phase = PanelPhase::Submitting;
            params
        };

        let result = self.functions.create_rental_agreement(params).await;

        let mut state = self.state.lock().await;
        match result {
            Ok(created) => {
                info!(rental_id = %created.rental_agreement_id, contact_id = %self.contact_id, "Rental agreement submitted");
                state.phase = PanelPhase::Succeeded;
                state.modal_open = false;
                state.form = RentalForm::default();
                drop(state);
                self.alerts.send(Alert::success(RENTAL_CREATED));
                Ok(created.rental_agreement_id)
            }
            Err(e) => {
                warn!(contact_id = %self.contact_id, error = %e, "Rental agreement submission failed");
                state.phase = PanelPhase::Failed;
                drop(state);
                self.alerts.send(Alert::error(RENTAL_FAILED));
                Err(e)
            }
        }
    }

    /// Closes the modal; the form keeps its contents
    pub async fn close_modal(&self) {
        self.state.lock().await.modal_open = false;
    }
}
