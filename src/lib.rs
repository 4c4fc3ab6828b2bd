pub mod config;
pub mod identity;
pub mod metrics;
pub mod observability;
pub mod rest;
pub mod tasks;

use std::sync::Arc;

use config::ServiceConfig;
use identity::IdentityStore;
use metrics::ServiceMetrics;
use tasks::TaskStore;

/// Shared application state passed to every route handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServiceConfig>,
    /// Registered users; validates credentials and resolves tokens.
    pub identity: Arc<IdentityStore>,
    /// All task records and the next-id counter.
    pub tasks: Arc<TaskStore>,
    /// In-process Prometheus-style counters.
    pub metrics: Arc<ServiceMetrics>,
    pub started_at: std::time::Instant,
}

impl AppContext {
    /// Build a context with empty stores from a config.
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config: Arc::new(config),
            identity: Arc::new(IdentityStore::new()),
            tasks: Arc::new(TaskStore::new()),
            metrics: Arc::new(ServiceMetrics::new()),
            started_at: std::time::Instant::now(),
        }
    }
}
