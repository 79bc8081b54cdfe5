//! Client-side aggregation for the dashboard landing screen.
//!
//! The remote service has no summary endpoint; the dashboard derives its
//! figures from the four list resources.

use serde::Serialize;

use crate::api::ApiClient;
use crate::errors::ClientResult;
use crate::models::{Machine, MachineStatus, MaintenanceRecord, MaintenanceStatus, Part, Team};
use crate::services::machine_service::MachineService;
use crate::services::maintenance_service::MaintenanceService;
use crate::services::part_service::PartService;
use crate::services::team_service::TeamService;

/// Figures shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub machines_total: usize,
    pub machines_operational: usize,
    pub machines_in_maintenance: usize,
    pub machines_broken: usize,
    pub machines_retired: usize,
    /// Pending plus in-progress requests.
    pub open_maintenance: usize,
    /// Codes of parts whose stock fell below the threshold.
    pub low_stock_parts: Vec<String>,
    pub team_count: usize,
}

pub struct DashboardService<'a> {
    client: &'a ApiClient,
    low_stock_threshold: u32,
}

impl<'a> DashboardService<'a> {
    pub fn new(client: &'a ApiClient, low_stock_threshold: u32) -> Self {
        Self {
            client,
            low_stock_threshold,
        }
    }

    /// Fans out the four list calls concurrently and folds the results.
    pub async fn summary(&self) -> ClientResult<DashboardSummary> {
        let machine_service = MachineService::new(self.client);
        let maintenance_service = MaintenanceService::new(self.client);
        let part_service = PartService::new(self.client);
        let team_service = TeamService::new(self.client);
        let (machines, maintenance, parts, teams) = tokio::try_join!(
            machine_service.list(),
            maintenance_service.list(None),
            part_service.list(),
            team_service.list(),
        )?;

        Ok(fold(
            &machines,
            &maintenance,
            &parts,
            &teams,
            self.low_stock_threshold,
        ))
    }
}

fn fold(
    machines: &[Machine],
    maintenance: &[MaintenanceRecord],
    parts: &[Part],
    teams: &[Team],
    low_stock_threshold: u32,
) -> DashboardSummary {
    let mut summary = DashboardSummary {
        machines_total: machines.len(),
        team_count: teams.len(),
        ..DashboardSummary::default()
    };

    for machine in machines {
        match machine.status {
            MachineStatus::Operational => summary.machines_operational += 1,
            MachineStatus::Maintenance => summary.machines_in_maintenance += 1,
            MachineStatus::Broken => summary.machines_broken += 1,
            MachineStatus::Retired => summary.machines_retired += 1,
        }
    }

    summary.open_maintenance = maintenance
        .iter()
        .filter(|record| {
            matches!(
                record.status,
                MaintenanceStatus::Pending | MaintenanceStatus::InProgress
            )
        })
        .count();

    summary.low_stock_parts = parts
        .iter()
        .filter(|part| part.quantity < low_stock_threshold)
        .map(|part| part.code.clone())
        .collect();

    summary
}
