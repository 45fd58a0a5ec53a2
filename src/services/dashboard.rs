//! Dashboard service: aggregate metrics with tolerant defaults.
//!
//! The stats payload is sparse-friendly — any field the backend omits
//! renders as zero. Revenue is secondary: its failure degrades to "no
//! revenue card" rather than failing the dashboard.

use std::sync::Arc;

use crate::api::Api;
use crate::error::PageError;
use crate::types::{DashboardStats, RevenueStats};

/// Result of a dashboard load, tagged for the shell.
#[derive(Debug, serde::Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DashboardResult {
    Success {
        stats: DashboardStats,
        revenue: Option<RevenueStats>,
    },
    Error {
        error: PageError,
    },
}

pub struct DashboardPage {
    api: Arc<dyn Api>,
}

impl DashboardPage {
    pub fn new(api: Arc<dyn Api>) -> Self {
        Self { api }
    }

    pub async fn load(&self) -> DashboardResult {
        let stats = match self.api.dashboard_stats().await {
            Ok(stats) => stats,
            Err(err) => {
                log::warn!("Failed to load dashboard: {}", err);
                return DashboardResult::Error { error: err.into() };
            }
        };

        let revenue = match self.api.revenue_stats().await {
            Ok(revenue) => Some(revenue),
            Err(err) => {
                log::warn!("Failed to load revenue stats: {}", err);
                None
            }
        };

        DashboardResult::Success { stats, revenue }
    }
}
