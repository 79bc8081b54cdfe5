//! Rust structs that represent the records exchanged with the remote
//! service.
//!
//! These are passthrough shapes: the client does not transform them beyond
//! date handling and the list coercion done at the transport boundary. The
//! backend went through several drifted revisions of these records; one
//! canonical shape per entity is supported here.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

// ---------------------------------------------------------------------------
// Machines
// ---------------------------------------------------------------------------

/// A registered machine, keyed by its serial number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub serial_number: String,
    pub name: String,
    #[serde(rename = "type")]
    pub machine_type: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacture_date: Option<NaiveDate>,
    pub location: String,
    pub status: MachineStatus,
    /// Ordered maintenance note history, oldest first.
    #[serde(default)]
    pub maintenance_history: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MachineStatus {
    #[default]
    Operational,
    Maintenance,
    Broken,
    Retired,
}

impl FromStr for MachineStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "operational" => Ok(MachineStatus::Operational),
            "maintenance" => Ok(MachineStatus::Maintenance),
            "broken" => Ok(MachineStatus::Broken),
            "retired" => Ok(MachineStatus::Retired),
            _ => Err(format!("Unknown machine status: {}", s)),
        }
    }
}

impl fmt::Display for MachineStatus {
    /// Labels as shown in the UI.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MachineStatus::Operational => write!(f, "Operando"),
            MachineStatus::Maintenance => write!(f, "Em manutenção"),
            MachineStatus::Broken => write!(f, "Quebrado"),
            MachineStatus::Retired => write!(f, "Desativada"),
        }
    }
}

/// Caller-supplied fields for machine registration. The serial number is
/// assigned by the server; status and history get creation defaults.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewMachine {
    #[validate(length(min = 1, message = "Machine name is required"))]
    pub name: String,

    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Machine type is required"))]
    pub machine_type: String,

    #[validate(length(min = 1, message = "Machine model is required"))]
    pub model: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacture_date: Option<NaiveDate>,

    #[validate(length(min = 1, message = "Machine location is required"))]
    pub location: String,
}

/// Partial machine update; `None` fields are left untouched by the server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MachineUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub machine_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacture_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MachineStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_history: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Maintenance records
// ---------------------------------------------------------------------------

/// A maintenance request, referencing a machine by serial number and a
/// team by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    #[serde(rename = "maintenance_register_id")]
    pub id: i64,
    pub machine_id: String,
    pub assigned_team: String,
    pub problem_description: String,
    pub request_date: NaiveDate,
    pub priority: Priority,
    pub status: MaintenanceStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "Baixa"),
            Priority::Medium => write!(f, "Média"),
            Priority::High => write!(f, "Alta"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl FromStr for MaintenanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(MaintenanceStatus::Pending),
            "in_progress" => Ok(MaintenanceStatus::InProgress),
            "completed" => Ok(MaintenanceStatus::Completed),
            "cancelled" => Ok(MaintenanceStatus::Cancelled),
            _ => Err(format!("Unknown maintenance status: {}", s)),
        }
    }
}

impl fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaintenanceStatus::Pending => write!(f, "Pendente"),
            MaintenanceStatus::InProgress => write!(f, "Em andamento"),
            MaintenanceStatus::Completed => write!(f, "Concluída"),
            MaintenanceStatus::Cancelled => write!(f, "Cancelada"),
        }
    }
}

/// Caller-supplied fields for a new maintenance request. The id is
/// assigned by the server; the status starts at pending and the request
/// date is stamped on creation.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewMaintenance {
    #[validate(length(min = 1, message = "Machine id is required"))]
    pub machine_id: String,

    #[validate(length(min = 1, message = "Assigned team is required"))]
    pub assigned_team: String,

    #[validate(length(min = 1, message = "Problem description is required"))]
    pub problem_description: String,

    pub priority: Priority,
}

/// Partial maintenance update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MaintenanceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MaintenanceStatus>,
}

// ---------------------------------------------------------------------------
// Parts
// ---------------------------------------------------------------------------

/// A spare part, keyed by its code. The quantity is mutated only through
/// the stock ledger (entry/exit), never by a direct field edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub code: String,
    pub name: String,
    pub supplier: String,
    pub quantity: u32,
    pub unit_price: f64,
}

/// Caller-supplied fields for part registration. New parts start with an
/// empty stock; the ledger is the only way to raise it.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewPart {
    #[validate(length(min = 1, message = "Part code is required"))]
    pub code: String,

    #[validate(length(min = 1, message = "Part name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Supplier is required"))]
    pub supplier: String,

    #[validate(range(min = 0.0, message = "Unit price must not be negative"))]
    pub unit_price: f64,
}

/// Partial part update. Deliberately carries no quantity field.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PartUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
}

/// Stock-ledger entry posted to `/parts/{code}/entry`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockEntry {
    pub quantity: u32,
    pub entry_date: NaiveDate,
}

/// Stock-ledger exit posted to `/parts/{code}/exit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockExit {
    pub quantity: u32,
    pub exit_date: NaiveDate,
}

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

/// A repair team, keyed by its name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    /// Ordered member identifiers.
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewTeam {
    #[validate(length(min = 1, message = "Team name is required"))]
    pub name: String,

    pub members: Vec<String>,

    pub specialties: Vec<String>,
}

/// Partial team update; the name is the key and cannot change here.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TeamUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialties: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_machine_wire_shape() {
        let machine: Machine = serde_json::from_value(json!({
            "serial_number": "SN-01",
            "name": "Press 1",
            "type": "Press",
            "model": "P100",
            "location": "Floor 2",
            "status": "operational"
        }))
        .unwrap();
        assert_eq!(machine.machine_type, "Press");
        assert_eq!(machine.status, MachineStatus::Operational);
        // Absent history deserializes to an empty vec.
        assert!(machine.maintenance_history.is_empty());
    }

    #[test]
    fn test_maintenance_id_wire_name() {
        let record: MaintenanceRecord = serde_json::from_value(json!({
            "maintenance_register_id": 7,
            "machine_id": "SN-01",
            "assigned_team": "Alpha",
            "problem_description": "Leaking valve",
            "request_date": "2025-03-04",
            "priority": "high",
            "status": "in_progress"
        }))
        .unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.status, MaintenanceStatus::InProgress);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["maintenance_register_id"], 7);
        assert_eq!(value["status"], "in_progress");
    }

    #[test]
    fn test_status_display_labels() {
        assert_eq!(MachineStatus::Maintenance.to_string(), "Em manutenção");
        assert_eq!(Priority::High.to_string(), "Alta");
        assert_eq!(MaintenanceStatus::Pending.to_string(), "Pendente");
    }

    #[test]
    fn test_status_from_str_roundtrip() {
        assert_eq!(
            "In_Progress".parse::<MaintenanceStatus>().unwrap(),
            MaintenanceStatus::InProgress
        );
        assert!("limping".parse::<MachineStatus>().is_err());
    }

    #[test]
    fn test_partial_update_omits_unset_fields() {
        let update = MachineUpdate {
            location: Some("Floor 3".to_string()),
            ..MachineUpdate::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, json!({"location": "Floor 3"}));
    }

    #[test]
    fn test_part_update_has_no_quantity_field() {
        let update = PartUpdate {
            name: Some("Bearing".to_string()),
            supplier: Some("Acme".to_string()),
            unit_price: Some(9.5),
        };
        let value = serde_json::to_value(&update).unwrap();
        assert!(value.get("quantity").is_none());
    }
}
