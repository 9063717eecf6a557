//! Property inventory domain module.
//!
//! This crate contains the inventory report document and the rules of its
//! signing lifecycle, implemented purely as deterministic domain logic
//! (no IO, no HTTP, no storage).

pub mod document;
pub mod report;
pub mod rooms;
pub mod signature;

pub use document::{
    ContentUpdated, IssueShareLink, Inventory, InventoryCommand, InventoryEvent, InventoryId,
    LockSignature, NewInventory, ShareLinkIssued, SignatureLocked, SignatureSubmitted,
    SubmitSignature, UpdateContent, Verification,
};
pub use report::{
    AlarmComplianceChecks, HealthSafety, InventoryStatus, ItemCondition, MeterInfo,
    PhotoMetadata, PropertyOverview, Room, SafetyItem,
};
pub use rooms::PREDEFINED_ROOMS;
pub use signature::{ShareToken, Signature, SignatureEntry, SignerRole};
