//! Application context - dependency injection container

use std::sync::Arc;

use frontdesk_core::{
    AppointmentService, CallService, ChangeFeed, ClientService, LiveAppointments, LiveCalls,
    TenantScope, UserService, WatchHandle,
};
use frontdesk_domain::constants::{TABLE_APPOINTMENTS, TABLE_CALLS};
use frontdesk_domain::{Config, Result};
use frontdesk_infra::{
    AuthClient, RealtimeClient, RealtimeClientConfig, StoreAppointments, StoreCalls, StoreClient,
    StoreClients, StoreUsers,
};
use parking_lot::Mutex;
use tracing::{info, warn};

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub auth: Arc<AuthClient>,
    pub appointments: Arc<AppointmentService>,
    pub calls: Arc<CallService>,
    pub clients: Arc<ClientService>,
    pub users: Arc<UserService>,

    /// Cross-tenant live caches backing the analytics view; kept current by
    /// the change feed when realtime is enabled.
    pub live_appointments: Arc<LiveAppointments>,
    pub live_calls: Arc<LiveCalls>,

    // Keep the change-feed applier tasks alive for the context's lifetime;
    // dropping the context cancels them.
    watch_handles: Mutex<Vec<WatchHandle>>,
}

impl AppContext {
    /// Wire the full dependency graph from configuration.
    pub async fn new(config: Config) -> Result<Arc<Self>> {
        let store = Arc::new(StoreClient::new(&config.store)?);

        let appointment_store = Arc::new(StoreAppointments::new(Arc::clone(&store)));
        let call_store = Arc::new(StoreCalls::new(Arc::clone(&store)));
        let client_directory = Arc::new(StoreClients::new(Arc::clone(&store)));
        let user_directory = Arc::new(StoreUsers::new(Arc::clone(&store)));

        let auth = Arc::new(AuthClient::new(&config.auth, user_directory.clone())?);

        let appointments = Arc::new(AppointmentService::new(appointment_store));
        let calls = Arc::new(CallService::new(call_store));
        let clients = Arc::new(ClientService::new(client_directory));
        let users = Arc::new(UserService::new(user_directory));

        let live_appointments =
            Arc::new(LiveAppointments::new(Arc::clone(&appointments), TenantScope::All));
        let live_calls = Arc::new(LiveCalls::new(Arc::clone(&calls), TenantScope::All));

        let context = Arc::new(Self {
            config,
            auth,
            appointments,
            calls,
            clients,
            users,
            live_appointments,
            live_calls,
            watch_handles: Mutex::new(Vec::new()),
        });

        if context.config.realtime.enabled {
            context.start_live_caches().await;
        }

        info!("application context initialized");
        Ok(context)
    }

    /// Whether the live caches are wired to the change feed.
    pub fn realtime_enabled(&self) -> bool {
        self.config.realtime.enabled
    }

    /// Prime the live caches and attach them to the change feed.
    ///
    /// Startup tolerates a store or feed hiccup: the caches refresh lazily
    /// on the next mutation and the feed reconnects with backoff.
    async fn start_live_caches(&self) {
        if let Err(err) = self.live_appointments.refresh().await {
            warn!(error = %err, "initial appointment cache load failed");
        }
        if let Err(err) = self.live_calls.refresh().await {
            warn!(error = %err, "initial call cache load failed");
        }

        let feed_config =
            RealtimeClientConfig::from_config(&self.config.store, &self.config.realtime);
        let feed = match RealtimeClient::new(&feed_config) {
            Ok(feed) => feed,
            Err(err) => {
                warn!(error = %err, "realtime client unavailable, live caches stay poll-only");
                return;
            }
        };

        let appointment_feed = feed.subscribe(TABLE_APPOINTMENTS, &TenantScope::All).await;
        let call_feed = feed.subscribe(TABLE_CALLS, &TenantScope::All).await;

        let mut handles = self.watch_handles.lock();
        match appointment_feed {
            Ok(subscription) => handles.push(self.live_appointments.watch(subscription)),
            Err(err) => warn!(error = %err, "appointment change feed unavailable"),
        }
        match call_feed {
            Ok(subscription) => handles.push(self.live_calls.watch(subscription)),
            Err(err) => warn!(error = %err, "call change feed unavailable"),
        }
    }
}
