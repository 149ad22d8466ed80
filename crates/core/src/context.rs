//! Service wiring for one planner instance.

use log::debug;
use planorama_weather::{OpenMeteoProvider, WeatherProvider};
use std::sync::Arc;

use crate::checklists::{ChecklistKind, ChecklistService, ChecklistServiceTrait};
use crate::config::PlanoramaConfig;
use crate::events::{EventDependents, EventService, EventServiceTrait};
use crate::guests::{GuestService, GuestServiceTrait};
use crate::session::{AuthProvider, InMemoryAuthProvider, SessionService, SessionServiceTrait};
use crate::store::{DocumentStore, InMemoryDocumentStore, TimeoutDocumentStore};
use crate::weather::{WeatherService, WeatherServiceTrait};

/// Every facade of the planner, sharing one session.
pub struct PlannerContext {
    config: PlanoramaConfig,
    session_service: Arc<SessionService>,
    event_service: Arc<EventService>,
    guest_service: Arc<GuestService>,
    food_service: Arc<ChecklistService>,
    task_service: Arc<ChecklistService>,
    weather_service: Arc<WeatherService>,
}

impl PlannerContext {
    pub fn new(
        config: PlanoramaConfig,
        auth: Arc<dyn AuthProvider>,
        store: Arc<dyn DocumentStore>,
        weather_provider: Arc<dyn WeatherProvider>,
    ) -> Self {
        let timeout = config.remote_timeout;
        let store: Arc<dyn DocumentStore> = Arc::new(TimeoutDocumentStore::new(store, timeout));

        let session_service = Arc::new(SessionService::new(auth, store.clone(), timeout));
        let session: Arc<dyn SessionServiceTrait> = session_service.clone();

        let guest_service = Arc::new(GuestService::new(store.clone(), session.clone()));
        let food_service = Arc::new(ChecklistService::new(
            ChecklistKind::Food,
            store.clone(),
            session.clone(),
        ));
        let task_service = Arc::new(ChecklistService::new(
            ChecklistKind::Tasks,
            store.clone(),
            session.clone(),
        ));

        let dependents: Vec<Arc<dyn EventDependents>> = vec![
            guest_service.clone() as Arc<dyn EventDependents>,
            food_service.clone() as Arc<dyn EventDependents>,
            task_service.clone() as Arc<dyn EventDependents>,
        ];
        let event_service = Arc::new(EventService::new(store, session, dependents));

        session_service.register_scoped(event_service.clone());
        session_service.register_scoped(guest_service.clone());
        session_service.register_scoped(food_service.clone());
        session_service.register_scoped(task_service.clone());

        let weather_service = Arc::new(WeatherService::new(
            weather_provider,
            config.weather_location,
            timeout,
        ));
        debug!("Planner context ready (remote timeout {:?})", timeout);

        Self {
            config,
            session_service,
            event_service,
            guest_service,
            food_service,
            task_service,
            weather_service,
        }
    }

    /// Context backed by the in-memory auth and store; weather still goes
    /// to the configured provider URL.
    pub fn in_memory(config: PlanoramaConfig) -> Self {
        let weather = Arc::new(OpenMeteoProvider::with_base_url(&config.weather_base_url));
        Self::new(
            config,
            Arc::new(InMemoryAuthProvider::new()),
            Arc::new(InMemoryDocumentStore::new()),
            weather,
        )
    }

    pub fn config(&self) -> &PlanoramaConfig {
        &self.config
    }

    pub fn session_service(&self) -> Arc<dyn SessionServiceTrait> {
        self.session_service.clone()
    }

    pub fn event_service(&self) -> Arc<dyn EventServiceTrait> {
        self.event_service.clone()
    }

    pub fn guest_service(&self) -> Arc<dyn GuestServiceTrait> {
        self.guest_service.clone()
    }

    pub fn food_service(&self) -> Arc<dyn ChecklistServiceTrait> {
        self.food_service.clone()
    }

    pub fn task_service(&self) -> Arc<dyn ChecklistServiceTrait> {
        self.task_service.clone()
    }

    pub fn weather_service(&self) -> Arc<dyn WeatherServiceTrait> {
        self.weather_service.clone()
    }
}
