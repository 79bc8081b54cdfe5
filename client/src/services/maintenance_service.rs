//! Maintenance request operations.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use validator::Validate;

use crate::api::ApiClient;
use crate::errors::{ClientError, ClientResult};
use crate::models::{MaintenanceRecord, MaintenanceStatus, MaintenanceUpdate, NewMaintenance};

pub struct MaintenanceService<'a> {
    client: &'a ApiClient,
}

/// Body for `POST /maintenance`: the caller's fields plus the creation
/// defaults (pending status, stamped request date).
#[derive(Debug, Serialize)]
struct CreateMaintenanceBody<'a> {
    #[serde(flatten)]
    request: &'a NewMaintenance,
    request_date: NaiveDate,
    status: MaintenanceStatus,
}

impl<'a> MaintenanceService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Lists maintenance records, optionally restricted to one machine via
    /// the `machine_id` query filter.
    pub async fn list(&self, machine_id: Option<&str>) -> ClientResult<Vec<MaintenanceRecord>> {
        let query: Vec<(&str, &str)> = match machine_id {
            Some(serial) => vec![("machine_id", serial)],
            None => Vec::new(),
        };
        self.client.get_list(&["maintenance"], &query).await
    }

    pub async fn get(&self, id: i64) -> ClientResult<MaintenanceRecord> {
        let id = id.to_string();
        self.client.get(&["maintenance", &id]).await
    }

    /// Files a new request. Records start pending, stamped with the
    /// current date; the id comes back from the server.
    pub async fn create(&self, request: NewMaintenance) -> ClientResult<MaintenanceRecord> {
        if let Err(errors) = request.validate() {
            return Err(ClientError::from_validation(errors));
        }

        let body = CreateMaintenanceBody {
            request: &request,
            request_date: Utc::now().date_naive(),
            status: MaintenanceStatus::Pending,
        };
        self.client.post(&["maintenance"], &body).await
    }

    pub async fn update(
        &self,
        id: i64,
        update: MaintenanceUpdate,
    ) -> ClientResult<MaintenanceRecord> {
        let id = id.to_string();
        self.client.put(&["maintenance", &id], &update).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        let id = id.to_string();
        self.client.delete(&["maintenance", &id]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;

    #[test]
    fn test_create_body_starts_pending() {
        let request = NewMaintenance {
            machine_id: "SN-01".to_string(),
            assigned_team: "Alpha".to_string(),
            problem_description: "Leaking valve".to_string(),
            priority: Priority::High,
        };
        let body = CreateMaintenanceBody {
            request: &request,
            request_date: Utc::now().date_naive(),
            status: MaintenanceStatus::Pending,
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["status"], "pending");
        assert_eq!(value["priority"], "high");
        assert!(value.get("request_date").is_some());
        // No id travels with the create; the server assigns it.
        assert!(value.get("maintenance_register_id").is_none());
    }
}
