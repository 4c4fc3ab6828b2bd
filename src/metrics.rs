// SPDX-License-Identifier: MIT
//! Simple in-process counters exposed as `GET /api/v1/metrics` in Prometheus
//! text format. No external library needed — all counters are `AtomicU64`
//! incremented inline.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// In-process performance counters shared across all requests.
#[derive(Debug)]
pub struct ServiceMetrics {
    /// Total users registered since service start.
    pub users_registered: AtomicU64,
    /// Total successful logins since service start.
    pub logins_total: AtomicU64,
    /// Total requests rejected by the auth gate since service start.
    pub unauthorized_total: AtomicU64,
    /// Total tasks created since service start.
    pub tasks_created: AtomicU64,
    /// Total complete operations applied since service start.
    pub tasks_completed: AtomicU64,
    /// Service start time — used to calculate uptime in the metrics response.
    pub started_at: Instant,
}

impl ServiceMetrics {
    pub fn new() -> Self {
        Self {
            users_registered: AtomicU64::new(0),
            logins_total: AtomicU64::new(0),
            unauthorized_total: AtomicU64::new(0),
            tasks_created: AtomicU64::new(0),
            tasks_completed: AtomicU64::new(0),
            started_at: Instant::now(),
        }
    }

    pub fn inc_users_registered(&self) {
        self.users_registered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_logins(&self) {
        self.logins_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_unauthorized(&self) {
        self.unauthorized_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_tasks_created(&self) {
        self.tasks_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_tasks_completed(&self) {
        self.tasks_completed.fetch_add(1, Ordering::Relaxed);
    }

    /// Render counters in Prometheus text format.
    ///
    /// Store sizes are passed in because they require the store locks
    /// (not stored here).
    pub fn render_prometheus(&self, user_count: u64, task_count: u64) -> String {
        let uptime = self.started_at.elapsed().as_secs();
        let users_registered = self.users_registered.load(Ordering::Relaxed);
        let logins_total = self.logins_total.load(Ordering::Relaxed);
        let unauthorized_total = self.unauthorized_total.load(Ordering::Relaxed);
        let tasks_created = self.tasks_created.load(Ordering::Relaxed);
        let tasks_completed = self.tasks_completed.load(Ordering::Relaxed);

        format!(
            "# HELP taskd_uptime_seconds Service uptime in seconds.\n\
             # TYPE taskd_uptime_seconds gauge\n\
             taskd_uptime_seconds {uptime}\n\
             # HELP taskd_users Current number of registered users.\n\
             # TYPE taskd_users gauge\n\
             taskd_users {user_count}\n\
             # HELP taskd_tasks Current number of stored tasks.\n\
             # TYPE taskd_tasks gauge\n\
             taskd_tasks {task_count}\n\
             # HELP taskd_users_registered_total Users registered since start.\n\
             # TYPE taskd_users_registered_total counter\n\
             taskd_users_registered_total {users_registered}\n\
             # HELP taskd_logins_total Successful logins since start.\n\
             # TYPE taskd_logins_total counter\n\
             taskd_logins_total {logins_total}\n\
             # HELP taskd_unauthorized_total Requests rejected by the auth gate since start.\n\
             # TYPE taskd_unauthorized_total counter\n\
             taskd_unauthorized_total {unauthorized_total}\n\
             # HELP taskd_tasks_created_total Tasks created since start.\n\
             # TYPE taskd_tasks_created_total counter\n\
             taskd_tasks_created_total {tasks_created}\n\
             # HELP taskd_tasks_completed_total Complete operations applied since start.\n\
             # TYPE taskd_tasks_completed_total counter\n\
             taskd_tasks_completed_total {tasks_completed}\n"
        )
    }
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}
