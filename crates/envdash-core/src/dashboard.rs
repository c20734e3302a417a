//! Dashboard view state.
//!
//! [`Dashboard`] owns everything a front end renders: the property list, the
//! current reading, the history window with its chart series, both config
//! records, the loading indicators and the active tab.
//!
//! State changes happen in two steps. [`Dashboard::begin`] (or one of the
//! helpers that call it) marks a resource as loading and returns the request
//! to issue; [`Dashboard::handle_event`] applies the outcome. Front ends with
//! a background worker send the request to the worker and feed its events
//! back; simple callers use [`Dashboard::load`], which does both inline.
//!
//! Overlapping fetches of one resource are not sequenced: whichever outcome
//! is handled last wins.

use tracing::{debug, warn};

use envdash_types::{EnvironmentReading, HistoryEntry, Properties};

use crate::indicator::{Indicators, LoaderState, Resource};
use crate::loader::{FetchRequest, Payload, fetch};
use crate::messages::DashboardEvent;
use crate::reconcile::ConfigReconciler;
use crate::series::{ChartSeries, HistoryView};
use crate::tabs::{Tab, TabController};
use crate::traits::DeviceApi;

/// All view state of the dashboard.
#[derive(Debug, Clone)]
pub struct Dashboard {
    properties: Properties,
    env: EnvironmentReading,
    history: Vec<HistoryEntry>,
    series: ChartSeries,
    config: ConfigReconciler,
    indicators: Indicators,
    tabs: TabController,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(Tab::default())
    }
}

impl Dashboard {
    /// Create a dashboard showing placeholders, with `tab` active.
    #[must_use]
    pub fn new(tab: Tab) -> Self {
        Self {
            properties: Properties::placeholder(),
            env: EnvironmentReading::placeholder(),
            history: Vec::new(),
            series: ChartSeries::default(),
            config: ConfigReconciler::new(),
            indicators: Indicators::new(),
            tabs: TabController::new(tab),
        }
    }

    /// Create a dashboard whose initial tab comes from a URL fragment.
    #[must_use]
    pub fn from_fragment(fragment: Option<&str>) -> Self {
        Self::new(TabController::from_fragment(fragment).active())
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn env(&self) -> &EnvironmentReading {
        &self.env
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn series(&self) -> &ChartSeries {
        &self.series
    }

    pub fn config(&self) -> &ConfigReconciler {
        &self.config
    }

    /// Mutable access for local config edits.
    pub fn config_mut(&mut self) -> &mut ConfigReconciler {
        &mut self.config
    }

    pub fn indicators(&self) -> &Indicators {
        &self.indicators
    }

    /// Indicator state of `resource`.
    pub fn state(&self, resource: Resource) -> LoaderState {
        self.indicators.state(resource)
    }

    pub fn active_tab(&self) -> Tab {
        self.tabs.active()
    }

    /// Location for the active tab, `base` with the fragment replaced.
    pub fn location(&self, base: &str) -> String {
        self.tabs.location(base)
    }

    /// Mark `request`'s resource as loading and hand the request back.
    pub fn begin(&mut self, request: FetchRequest) -> FetchRequest {
        self.indicators
            .set_state(request.resource(), LoaderState::Loading);
        request
    }

    /// Select the tab named `id`.
    ///
    /// Returns the fetch to issue, already marked as loading, or `None` if
    /// `id` is not a tab (nothing changes in that case).
    pub fn select_tab(&mut self, id: &str) -> Option<FetchRequest> {
        let request = self.tabs.select(id)?;
        Some(self.begin(request))
    }

    /// Select `tab` and return its fetch, marked as loading.
    pub fn open(&mut self, tab: Tab) -> FetchRequest {
        let request = self.tabs.select_tab(tab);
        self.begin(request)
    }

    /// Re-fetch the active tab's resource.
    pub fn refresh(&mut self) -> FetchRequest {
        self.open(self.tabs.active())
    }

    /// Build the save request from the local config, marked as loading.
    ///
    /// The body is captured now; later local edits do not change it.
    pub fn save_config(&mut self) -> FetchRequest {
        let update = self.config.save_request();
        self.begin(FetchRequest::SaveConfig(update))
    }

    /// The fetches issued at startup: status (for the host name and
    /// address), then the active tab's resource. Both are marked as loading.
    pub fn startup(&mut self) -> [FetchRequest; 2] {
        let status = self.begin(FetchRequest::Status);
        let tab = self.open(self.tabs.active());
        [status, tab]
    }

    /// Apply the outcome of a fetch.
    ///
    /// A success replaces the resource's slice wholesale and marks it done.
    /// A failure only marks it as errored.
    pub fn handle_event(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::Loaded(payload) => {
                let resource = payload.resource();
                self.apply(payload);
                self.indicators.set_state(resource, LoaderState::Done);
            }
            DashboardEvent::Failed { request, error } => {
                let resource = request.resource();
                debug!("Fetching {resource} failed: {error}");
                self.indicators.set_state(resource, LoaderState::Error);
            }
        }
    }

    fn apply(&mut self, payload: Payload) {
        match payload {
            Payload::Status(properties) => self.properties = properties,
            Payload::Env(reading) => self.env = reading,
            Payload::History(HistoryView { entries, series }) => {
                self.history = entries;
                self.series = series;
            }
            Payload::Config(response) | Payload::ConfigSaved(response) => {
                self.config.apply_response(&response)
            }
        }
    }

    /// Issue `request` against `api` and apply the outcome.
    ///
    /// Returns `true` if the fetch succeeded. Failures are logged and only
    /// show up on the resource's indicator.
    pub async fn load<A: DeviceApi + ?Sized>(&mut self, api: &A, request: FetchRequest) -> bool {
        let request = self.begin(request);
        let event = match fetch(api, &request).await {
            Ok(payload) => DashboardEvent::Loaded(payload),
            Err(e) => {
                warn!("Request for {} failed: {e}", request.resource());
                DashboardEvent::Failed {
                    request,
                    error: e.to_string(),
                }
            }
        };
        let ok = matches!(event, DashboardEvent::Loaded(_));
        self.handle_event(event);
        ok
    }

    /// Select the tab named `id` and load it.
    ///
    /// Returns `None` if `id` is not a tab, otherwise whether the fetch
    /// succeeded.
    pub async fn open_tab<A: DeviceApi + ?Sized>(&mut self, api: &A, id: &str) -> Option<bool> {
        let request = self.select_tab(id)?;
        Some(self.load(api, request).await)
    }

    /// Save the local config and apply the device's confirmation.
    pub async fn save<A: DeviceApi + ?Sized>(&mut self, api: &A) -> bool {
        let request = self.save_config();
        self.load(api, request).await
    }

    /// Run the startup fetches in order.
    pub async fn start<A: DeviceApi + ?Sized>(&mut self, api: &A) {
        for request in self.startup() {
            self.load(api, request).await;
        }
    }
}
