//! Machine registry operations.

use serde::Serialize;
use validator::Validate;

use crate::api::ApiClient;
use crate::errors::{ClientError, ClientResult};
use crate::models::{Machine, MachineStatus, MachineUpdate, NewMachine};

pub struct MachineService<'a> {
    client: &'a ApiClient,
}

/// Body for `POST /machines`: the caller's fields plus creation defaults.
#[derive(Debug, Serialize)]
struct CreateMachineBody<'a> {
    #[serde(flatten)]
    machine: &'a NewMachine,
    status: MachineStatus,
    maintenance_history: Vec<String>,
}

impl<'a> MachineService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ClientResult<Vec<Machine>> {
        self.client.get_list(&["machines"], &[]).await
    }

    pub async fn get(&self, serial_number: &str) -> ClientResult<Machine> {
        self.client.get(&["machines", serial_number]).await
    }

    /// Registers a machine. New machines start operational with an empty
    /// maintenance history; the serial number comes back from the server.
    pub async fn create(&self, machine: NewMachine) -> ClientResult<Machine> {
        if let Err(errors) = machine.validate() {
            return Err(ClientError::from_validation(errors));
        }

        let body = CreateMachineBody {
            machine: &machine,
            status: MachineStatus::Operational,
            maintenance_history: Vec::new(),
        };
        self.client.post(&["machines"], &body).await
    }

    /// Sends only the fields the caller set; everything else stays as-is
    /// on the server.
    pub async fn update(
        &self,
        serial_number: &str,
        update: MachineUpdate,
    ) -> ClientResult<Machine> {
        self.client.put(&["machines", serial_number], &update).await
    }

    pub async fn delete(&self, serial_number: &str) -> ClientResult<()> {
        self.client.delete(&["machines", serial_number]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_body_applies_defaults() {
        let machine = NewMachine {
            name: "Press 1".to_string(),
            machine_type: "Press".to_string(),
            model: "P100".to_string(),
            manufacture_date: None,
            location: "Floor 2".to_string(),
        };
        let body = CreateMachineBody {
            machine: &machine,
            status: MachineStatus::Operational,
            maintenance_history: Vec::new(),
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Press 1",
                "type": "Press",
                "model": "P100",
                "location": "Floor 2",
                "status": "operational",
                "maintenance_history": []
            })
        );
    }
}
