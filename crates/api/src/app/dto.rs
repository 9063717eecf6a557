use serde::Deserialize;

use propinv_infra::{InventoryUpdate, SignatureInput};
use propinv_inventory::{
    HealthSafety, InventoryStatus, NewInventory, PhotoMetadata, PropertyOverview, Room,
    SignerRole,
};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateInventoryRequest {
    pub property_overview: PropertyOverview,
    #[serde(default)]
    pub health_safety: HealthSafety,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub photo_vault: Vec<PhotoMetadata>,
}

impl From<CreateInventoryRequest> for NewInventory {
    fn from(body: CreateInventoryRequest) -> Self {
        NewInventory {
            property_overview: body.property_overview,
            health_safety: body.health_safety,
            rooms: body.rooms,
            photo_vault: body.photo_vault,
        }
    }
}

/// Partial update; absent or `null` fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateInventoryRequest {
    pub property_overview: Option<PropertyOverview>,
    pub health_safety: Option<HealthSafety>,
    pub rooms: Option<Vec<Room>>,
    pub status: Option<InventoryStatus>,
}

impl From<UpdateInventoryRequest> for InventoryUpdate {
    fn from(body: UpdateInventoryRequest) -> Self {
        InventoryUpdate {
            property_overview: body.property_overview,
            health_safety: body.health_safety,
            rooms: body.rooms,
            status: body.status,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitSignatureRequest {
    pub signer_name: String,
    pub signer_role: SignerRole,
    pub signature_data: String,
    pub email: Option<String>,
    pub tenant_present: Option<bool>,
    pub ip_address: Option<String>,
}

impl From<SubmitSignatureRequest> for SignatureInput {
    fn from(body: SubmitSignatureRequest) -> Self {
        SignatureInput {
            signer_name: body.signer_name,
            signer_role: body.signer_role,
            signature_data: body.signature_data,
            email: body.email,
            tenant_present: body.tenant_present,
            ip_address: body.ip_address,
        }
    }
}

// -------------------------
// Response helpers
// -------------------------

/// Content type served for a stored upload, from its extension.
pub fn content_type_for(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "pdf" => "application/pdf",
        "txt" => "text/plain; charset=utf-8",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}
