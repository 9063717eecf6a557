//! Report content: the structured sections an inspector fills in.
//!
//! These are plain data; the only rule that applies to them is the lock
//! guard enforced by [`crate::Inventory`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an inventory document.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InventoryStatus {
    #[default]
    Draft,
    Sent,
    Signed,
    Archived,
}

impl InventoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InventoryStatus::Draft => "draft",
            InventoryStatus::Sent => "sent",
            InventoryStatus::Signed => "signed",
            InventoryStatus::Archived => "archived",
        }
    }
}

impl core::fmt::Display for InventoryStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_property_type() -> String {
    "Residential".to_string()
}

fn default_count() -> i64 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyOverview {
    pub address: String,
    #[serde(default = "default_property_type")]
    pub property_type: String,
    pub landlord_name: String,
    pub tenant_names: Vec<String>,
    pub inspection_date: String,
    #[serde(default)]
    pub general_description: String,
    /// Blob paths of the property photos.
    #[serde(default)]
    pub property_photos: Vec<String>,
}

/// A utility meter reading location (electric, gas, water).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterInfo {
    pub meter_type: String,
    pub serial_number: String,
    pub location: String,
    #[serde(default)]
    pub photo: Option<String>,
}

/// Smoke alarm, CO detector, fuse box, stopcock, ...
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyItem {
    pub item_type: String,
    pub location: String,
    #[serde(default = "default_count")]
    pub count: i64,
    #[serde(default)]
    pub photo: Option<String>,
}

/// Alarm compliance answers; `None` means "not checked".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmComplianceChecks {
    #[serde(default)]
    pub smoke_alarms_all_floors: Option<bool>,
    #[serde(default)]
    pub smoke_alarms_test_buttons: Option<bool>,
    #[serde(default)]
    pub smoke_alarms_missing_areas: Option<bool>,
    #[serde(default)]
    pub co_alarms_present: Option<bool>,
    #[serde(default)]
    pub co_alarms_test_buttons: Option<bool>,
    #[serde(default)]
    pub co_alarms_missing_areas: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthSafety {
    #[serde(default)]
    pub meters: Vec<MeterInfo>,
    #[serde(default)]
    pub safety_items: Vec<SafetyItem>,
    /// Blob paths of uploaded certificates and other compliance documents.
    #[serde(default)]
    pub compliance_documents: Vec<String>,
    #[serde(default)]
    pub alarm_compliance_checks: Option<AlarmComplianceChecks>,
}

/// Condition of one item in a room ("Walls", "Carpet", "Window", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCondition {
    pub item_name: String,
    pub condition: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub photos: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub room_name: String,
    #[serde(default)]
    pub general_notes: String,
    #[serde(default)]
    pub items: Vec<ItemCondition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoMetadata {
    pub file_path: String,
    pub room_reference: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}
