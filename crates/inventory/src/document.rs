use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use propinv_core::{Aggregate, AggregateId, AggregateRoot, DomainError, DomainResult};

use crate::report::{HealthSafety, InventoryStatus, PhotoMetadata, PropertyOverview, Room};
use crate::signature::{ShareToken, Signature, SignatureEntry, SignerRole};

/// Inventory identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryId(pub AggregateId);

impl InventoryId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }

    pub fn generate() -> Self {
        Self(AggregateId::new())
    }
}

impl core::fmt::Display for InventoryId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl core::str::FromStr for InventoryId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Content supplied when a report is first created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInventory {
    pub property_overview: PropertyOverview,
    #[serde(default)]
    pub health_safety: HealthSafety,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub photo_vault: Vec<PhotoMetadata>,
}

/// Aggregate root: Inventory (a property condition report).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    id: InventoryId,
    property_overview: PropertyOverview,
    health_safety: HealthSafety,
    rooms: Vec<Room>,
    photo_vault: Vec<PhotoMetadata>,
    status: InventoryStatus,
    shareable_link: Option<ShareToken>,
    signature: Option<Signature>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    version: u64,
}

impl Inventory {
    /// Create a draft report.
    pub fn new(id: InventoryId, content: NewInventory, now: DateTime<Utc>) -> Self {
        Self {
            id,
            property_overview: content.property_overview,
            health_safety: content.health_safety,
            rooms: content.rooms,
            photo_vault: content.photo_vault,
            status: InventoryStatus::Draft,
            shareable_link: None,
            signature: None,
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    pub fn id_typed(&self) -> InventoryId {
        self.id
    }

    pub fn property_overview(&self) -> &PropertyOverview {
        &self.property_overview
    }

    pub fn health_safety(&self) -> &HealthSafety {
        &self.health_safety
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn photo_vault(&self) -> &[PhotoMetadata] {
        &self.photo_vault
    }

    pub fn status(&self) -> InventoryStatus {
        self.status
    }

    pub fn shareable_link(&self) -> Option<&ShareToken> {
        self.shareable_link.as_ref()
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_locked(&self) -> bool {
        self.signature.as_ref().is_some_and(|s| s.is_locked)
    }

    pub fn signature_count(&self) -> usize {
        self.signature.as_ref().map_or(0, Signature::entry_count)
    }

    /// Build the authenticity record for this document.
    ///
    /// The only check performed is that at least one signature entry exists;
    /// signature images are not validated cryptographically.
    pub fn verification(&self) -> DomainResult<Verification> {
        match &self.signature {
            Some(signature) if signature.has_entries() => Ok(Verification {
                inventory_id: self.id,
                property_address: self.property_overview.address.clone(),
                signature: signature.clone(),
                status: Verification::VERIFIED.to_string(),
                is_authentic: true,
            }),
            _ => Err(DomainError::NotSigned),
        }
    }
}

impl AggregateRoot for Inventory {
    type Id = InventoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Authenticity record returned to anyone holding the share token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub inventory_id: InventoryId,
    pub property_address: String,
    pub signature: Signature,
    pub status: String,
    pub is_authentic: bool,
}

impl Verification {
    pub const VERIFIED: &'static str = "verified";
}

/// Command: UpdateContent (only `Some` fields are replaced).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateContent {
    pub property_overview: Option<PropertyOverview>,
    pub health_safety: Option<HealthSafety>,
    pub rooms: Option<Vec<Room>>,
    pub status: Option<InventoryStatus>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: IssueShareLink.
///
/// Allowed in any state, locked included. Applying it always sets
/// `status = sent`, so a locked, signed document that gets a fresh link ends
/// up `sent` while staying locked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueShareLink {
    pub token: ShareToken,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SubmitSignature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitSignature {
    pub signer_name: String,
    pub signer_role: SignerRole,
    pub signature_data: String,
    pub ip_address: String,
    pub email: String,
    pub tenant_present: Option<bool>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: LockSignature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockSignature {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryCommand {
    UpdateContent(UpdateContent),
    IssueShareLink(IssueShareLink),
    SubmitSignature(SubmitSignature),
    LockSignature(LockSignature),
}

impl InventoryCommand {
    pub fn name(&self) -> &'static str {
        match self {
            InventoryCommand::UpdateContent(_) => "update_content",
            InventoryCommand::IssueShareLink(_) => "issue_share_link",
            InventoryCommand::SubmitSignature(_) => "submit_signature",
            InventoryCommand::LockSignature(_) => "lock_signature",
        }
    }
}

/// Event: ContentUpdated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentUpdated {
    pub property_overview: Option<PropertyOverview>,
    pub health_safety: Option<HealthSafety>,
    pub rooms: Option<Vec<Room>>,
    pub status: Option<InventoryStatus>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ShareLinkIssued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLinkIssued {
    pub token: ShareToken,
    pub occurred_at: DateTime<Utc>,
}

/// Event: SignatureSubmitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureSubmitted {
    pub entry: SignatureEntry,
    pub tenant_present: Option<bool>,
}

/// Event: SignatureLocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureLocked {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryEvent {
    ContentUpdated(ContentUpdated),
    ShareLinkIssued(ShareLinkIssued),
    SignatureSubmitted(SignatureSubmitted),
    SignatureLocked(SignatureLocked),
}

impl Aggregate for Inventory {
    type Command = InventoryCommand;
    type Event = InventoryEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            InventoryEvent::ContentUpdated(e) => {
                if let Some(overview) = &e.property_overview {
                    self.property_overview = overview.clone();
                }
                if let Some(health_safety) = &e.health_safety {
                    self.health_safety = health_safety.clone();
                }
                if let Some(rooms) = &e.rooms {
                    self.rooms = rooms.clone();
                }
                if let Some(status) = e.status {
                    self.status = status;
                }
                self.updated_at = e.occurred_at;
            }
            InventoryEvent::ShareLinkIssued(e) => {
                self.shareable_link = Some(e.token.clone());
                self.status = InventoryStatus::Sent;
            }
            InventoryEvent::SignatureSubmitted(e) => {
                let signature = self.signature.get_or_insert_with(Signature::default);
                signature.signatures.push(e.entry.clone());
                if let Some(present) = e.tenant_present {
                    signature.tenant_present_during_inspection = Some(present);
                }
                // Submitting never locks; locking is its own command.
                signature.is_locked = false;
                self.status = InventoryStatus::Signed;
            }
            InventoryEvent::SignatureLocked(_) => {
                self.signature.get_or_insert_with(Signature::default).is_locked = true;
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            InventoryCommand::UpdateContent(cmd) => self.handle_update(cmd),
            InventoryCommand::IssueShareLink(cmd) => self.handle_issue_link(cmd),
            InventoryCommand::SubmitSignature(cmd) => self.handle_submit(cmd),
            InventoryCommand::LockSignature(cmd) => self.handle_lock(cmd),
        }
    }
}

impl Inventory {
    fn ensure_unlocked(&self, what: &str) -> Result<(), DomainError> {
        if self.is_locked() {
            return Err(DomainError::forbidden(format!(
                "inventory {} is locked; cannot {what}",
                self.id
            )));
        }
        Ok(())
    }

    fn handle_update(&self, cmd: &UpdateContent) -> Result<Vec<InventoryEvent>, DomainError> {
        self.ensure_unlocked("modify signed inventory")?;

        Ok(vec![InventoryEvent::ContentUpdated(ContentUpdated {
            property_overview: cmd.property_overview.clone(),
            health_safety: cmd.health_safety.clone(),
            rooms: cmd.rooms.clone(),
            status: cmd.status,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_issue_link(&self, cmd: &IssueShareLink) -> Result<Vec<InventoryEvent>, DomainError> {
        if cmd.token.as_str().trim().is_empty() {
            return Err(DomainError::validation("share token cannot be empty"));
        }

        Ok(vec![InventoryEvent::ShareLinkIssued(ShareLinkIssued {
            token: cmd.token.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_submit(&self, cmd: &SubmitSignature) -> Result<Vec<InventoryEvent>, DomainError> {
        self.ensure_unlocked("add signatures")?;

        let entry = SignatureEntry {
            signer_name: cmd.signer_name.clone(),
            signer_role: cmd.signer_role.clone(),
            signature_data: cmd.signature_data.clone(),
            signed_at: cmd.occurred_at,
            ip_address: cmd.ip_address.clone(),
            email: cmd.email.clone(),
        };

        Ok(vec![InventoryEvent::SignatureSubmitted(SignatureSubmitted {
            entry,
            tenant_present: cmd.tenant_present,
        })])
    }

    fn handle_lock(&self, cmd: &LockSignature) -> Result<Vec<InventoryEvent>, DomainError> {
        if self.is_locked() {
            return Ok(vec![]);
        }

        Ok(vec![InventoryEvent::SignatureLocked(SignatureLocked {
            occurred_at: cmd.occurred_at,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn test_overview(address: &str) -> PropertyOverview {
        PropertyOverview {
            address: address.to_string(),
            property_type: "Residential".to_string(),
            landlord_name: "Test Landlord".to_string(),
            tenant_names: vec!["Test Tenant".to_string()],
            inspection_date: "2024-01-15".to_string(),
            general_description: String::new(),
            property_photos: vec![],
        }
    }

    fn draft(address: &str) -> Inventory {
        Inventory::new(
            InventoryId::generate(),
            NewInventory {
                property_overview: test_overview(address),
                health_safety: HealthSafety::default(),
                rooms: vec![],
                photo_vault: vec![],
            },
            test_time(),
        )
    }

    fn submit(name: &str, role: &str, tenant_present: Option<bool>) -> InventoryCommand {
        InventoryCommand::SubmitSignature(SubmitSignature {
            signer_name: name.to_string(),
            signer_role: SignerRole::from(role),
            signature_data: "data:image/png;base64,AAAA".to_string(),
            ip_address: String::new(),
            email: String::new(),
            tenant_present,
            occurred_at: test_time(),
        })
    }

    fn lock() -> InventoryCommand {
        InventoryCommand::LockSignature(LockSignature {
            occurred_at: test_time(),
        })
    }

    fn empty_update() -> UpdateContent {
        UpdateContent {
            property_overview: None,
            health_safety: None,
            rooms: None,
            status: None,
            occurred_at: test_time(),
        }
    }

    #[test]
    fn new_inventory_is_a_draft_without_link_or_signature() {
        let inv = draft("123 Test St");
        assert_eq!(inv.status(), InventoryStatus::Draft);
        assert!(inv.shareable_link().is_none());
        assert!(inv.signature().is_none());
        assert!(!inv.is_locked());
        assert_eq!(inv.version(), 0);
        assert_eq!(inv.created_at(), inv.updated_at());
    }

    #[test]
    fn issuing_a_link_moves_to_sent_and_replaces_old_token() {
        let mut inv = draft("123 Test St");

        let first = ShareToken::generate();
        inv.execute(&InventoryCommand::IssueShareLink(IssueShareLink {
            token: first.clone(),
            occurred_at: test_time(),
        }))
        .unwrap();
        assert_eq!(inv.status(), InventoryStatus::Sent);
        assert_eq!(inv.shareable_link(), Some(&first));

        let second = ShareToken::generate();
        inv.execute(&InventoryCommand::IssueShareLink(IssueShareLink {
            token: second.clone(),
            occurred_at: test_time(),
        }))
        .unwrap();
        assert_eq!(inv.shareable_link(), Some(&second));
    }

    #[test]
    fn submit_appends_entry_and_marks_signed() {
        let mut inv = draft("123 Test St");

        let events = inv.execute(&submit("Tina Tenant", "Tenant", Some(true))).unwrap();
        assert_eq!(events.len(), 1);
        match &events[0] {
            InventoryEvent::SignatureSubmitted(e) => {
                assert_eq!(e.entry.signer_name, "Tina Tenant");
                assert_eq!(e.entry.signer_role, SignerRole::Tenant);
            }
            _ => panic!("Expected SignatureSubmitted event"),
        }

        assert_eq!(inv.status(), InventoryStatus::Signed);
        assert_eq!(inv.signature_count(), 1);
        let sig = inv.signature().unwrap();
        assert!(!sig.is_locked);
        assert_eq!(sig.tenant_present_during_inspection, Some(true));
    }

    #[test]
    fn tenant_present_is_kept_when_not_supplied() {
        let mut inv = draft("123 Test St");
        inv.execute(&submit("Tina Tenant", "Tenant", Some(false))).unwrap();
        inv.execute(&submit("Ian Inspector", "Inspector", None)).unwrap();

        let sig = inv.signature().unwrap();
        assert_eq!(sig.tenant_present_during_inspection, Some(false));
        assert_eq!(sig.signatures.len(), 2);
        assert_eq!(sig.signatures[0].signer_name, "Tina Tenant");
        assert_eq!(sig.signatures[1].signer_name, "Ian Inspector");
    }

    #[test]
    fn tenant_present_is_overridden_when_supplied() {
        let mut inv = draft("123 Test St");
        inv.execute(&submit("Tina Tenant", "Tenant", Some(false))).unwrap();
        inv.execute(&submit("Ian Inspector", "Inspector", Some(true))).unwrap();

        assert_eq!(
            inv.signature().unwrap().tenant_present_during_inspection,
            Some(true)
        );
    }

    #[test]
    fn submit_accepts_empty_signer_name() {
        let mut inv = draft("123 Test St");
        inv.execute(&submit("", "Tenant", None)).unwrap();
        inv.execute(&submit("   ", "Inspector", None)).unwrap();

        let sig = inv.signature().unwrap();
        assert_eq!(sig.signatures.len(), 2);
        assert_eq!(sig.signatures[0].signer_name, "");
        assert_eq!(sig.signatures[1].signer_name, "   ");
    }

    #[test]
    fn submit_after_lock_is_forbidden_and_keeps_entries() {
        let mut inv = draft("123 Test St");
        inv.execute(&submit("Tina Tenant", "Tenant", None)).unwrap();
        inv.execute(&lock()).unwrap();
        assert!(inv.is_locked());

        let before = inv.clone();
        let err = inv.execute(&submit("Late Signer", "Tenant", None)).unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
        assert_eq!(inv, before);
        assert_eq!(inv.signature_count(), 1);
    }

    #[test]
    fn update_after_lock_is_forbidden_even_when_empty() {
        let mut inv = draft("123 Test St");
        inv.execute(&lock()).unwrap();

        let err = inv
            .execute(&InventoryCommand::UpdateContent(empty_update()))
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[test]
    fn update_replaces_only_supplied_fields() {
        let mut inv = draft("123 Test St");
        let rooms_before = inv.rooms().to_vec();

        let mut cmd = empty_update();
        cmd.property_overview = Some(test_overview("456 New Rd"));
        cmd.status = Some(InventoryStatus::Archived);
        let at = cmd.occurred_at;
        inv.execute(&InventoryCommand::UpdateContent(cmd)).unwrap();

        assert_eq!(inv.property_overview().address, "456 New Rd");
        assert_eq!(inv.status(), InventoryStatus::Archived);
        assert_eq!(inv.rooms(), rooms_before.as_slice());
        assert_eq!(inv.health_safety(), &HealthSafety::default());
        assert_eq!(inv.updated_at(), at);
    }

    #[test]
    fn lock_without_signatures_creates_locked_empty_block() {
        let mut inv = draft("123 Test St");
        inv.execute(&lock()).unwrap();

        let sig = inv.signature().unwrap();
        assert!(sig.is_locked);
        assert!(sig.signatures.is_empty());
        assert_eq!(inv.status(), InventoryStatus::Draft);
        assert_eq!(inv.verification().unwrap_err(), DomainError::NotSigned);
    }

    #[test]
    fn lock_is_idempotent() {
        let mut inv = draft("123 Test St");
        inv.execute(&submit("Tina Tenant", "Tenant", None)).unwrap();
        assert_eq!(inv.execute(&lock()).unwrap().len(), 1);
        let version = inv.version();

        assert!(inv.execute(&lock()).unwrap().is_empty());
        assert_eq!(inv.version(), version);
        assert!(inv.is_locked());
    }

    #[test]
    fn verification_requires_a_signature() {
        let mut inv = draft("123 Test St");
        assert_eq!(inv.verification().unwrap_err(), DomainError::NotSigned);

        inv.execute(&submit("Tina Tenant", "Tenant", None)).unwrap();
        let v = inv.verification().unwrap();
        assert_eq!(v.inventory_id, inv.id_typed());
        assert_eq!(v.property_address, "123 Test St");
        assert_eq!(v.status, "verified");
        assert!(v.is_authentic);
        assert_eq!(v.signature.signatures.len(), 1);
    }

    #[test]
    fn link_can_be_reissued_after_lock() {
        let mut inv = draft("123 Test St");
        inv.execute(&submit("Tina Tenant", "Tenant", None)).unwrap();
        inv.execute(&lock()).unwrap();

        let token = ShareToken::generate();
        inv.execute(&InventoryCommand::IssueShareLink(IssueShareLink {
            token: token.clone(),
            occurred_at: test_time(),
        }))
        .unwrap();

        assert_eq!(inv.shareable_link(), Some(&token));
        assert_eq!(inv.status(), InventoryStatus::Sent);
        assert!(inv.is_locked());
        assert_eq!(inv.signature_count(), 1);
    }

    #[test]
    fn version_increments_on_apply() {
        let mut inv = draft("123 Test St");
        inv.execute(&submit("Tina Tenant", "Tenant", None)).unwrap();
        assert_eq!(inv.version(), 1);
        inv.execute(&lock()).unwrap();
        assert_eq!(inv.version(), 2);
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let inv = draft("123 Test St");
        let before = inv.clone();

        let events1 = inv.handle(&submit("Tina Tenant", "Tenant", None)).unwrap();
        let events2 = inv.handle(&lock()).unwrap();

        assert_eq!(inv, before);
        assert_eq!(events1.len(), 1);
        assert_eq!(events2.len(), 1);
    }

    #[test]
    fn document_json_uses_wire_field_names() {
        let mut inv = draft("123 Test St");
        inv.execute(&submit("Tina Tenant", "Tenant", Some(true))).unwrap();

        let json = serde_json::to_value(&inv).unwrap();
        assert_eq!(json["status"], "signed");
        assert_eq!(json["property_overview"]["address"], "123 Test St");
        assert_eq!(json["signature"]["is_locked"], false);
        assert_eq!(json["signature"]["signatures"][0]["signer_role"], "Tenant");
        assert!(json["shareable_link"].is_null());

        let back: Inventory = serde_json::from_value(json).unwrap();
        assert_eq!(back, inv);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Step {
            Submit(String, bool),
            Lock,
            Update,
            IssueLink,
        }

        fn step() -> impl Strategy<Value = Step> {
            prop_oneof![
                ("[A-Za-z ]{0,20}", any::<bool>()).prop_map(|(n, t)| Step::Submit(n, t)),
                Just(Step::Lock),
                Just(Step::Update),
                Just(Step::IssueLink),
            ]
        }

        fn status() -> impl Strategy<Value = InventoryStatus> {
            prop_oneof![
                Just(InventoryStatus::Draft),
                Just(InventoryStatus::Sent),
                Just(InventoryStatus::Signed),
                Just(InventoryStatus::Archived),
            ]
        }

        fn room() -> impl Strategy<Value = Room> {
            ("[A-Za-z ]{1,12}", "[a-z ]{0,20}").prop_map(|(room_name, general_notes)| Room {
                room_name,
                general_notes,
                items: vec![],
            })
        }

        fn health_safety() -> impl Strategy<Value = HealthSafety> {
            prop::collection::vec("[a-z/]{1,16}", 0..3).prop_map(|compliance_documents| {
                HealthSafety {
                    compliance_documents,
                    ..HealthSafety::default()
                }
            })
        }

        fn update() -> impl Strategy<Value = UpdateContent> {
            (
                prop::option::of("[0-9]{1,3} [A-Za-z ]{1,16}".prop_map(|a| test_overview(&a))),
                prop::option::of(health_safety()),
                prop::option::of(prop::collection::vec(room(), 0..4)),
                prop::option::of(status()),
            )
                .prop_map(|(property_overview, health_safety, rooms, status)| UpdateContent {
                    property_overview,
                    health_safety,
                    rooms,
                    status,
                    occurred_at: test_time(),
                })
        }

        fn to_command(step: &Step) -> InventoryCommand {
            match step {
                Step::Submit(name, tenant) => {
                    submit(name, if *tenant { "Tenant" } else { "Inspector" }, None)
                }
                Step::Lock => lock(),
                Step::Update => InventoryCommand::UpdateContent(empty_update()),
                Step::IssueLink => InventoryCommand::IssueShareLink(IssueShareLink {
                    token: ShareToken::generate(),
                    occurred_at: test_time(),
                }),
            }
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: updates fail with Forbidden iff the document is locked,
            /// whichever fields they carry; a rejected update changes nothing.
            #[test]
            fn update_forbidden_iff_locked(
                steps in prop::collection::vec(step(), 0..12),
                cmd in update(),
            ) {
                let mut inv = draft("123 Test St");
                for s in &steps {
                    let _ = inv.execute(&to_command(s));
                }

                let before = inv.clone();
                let result = inv.execute(&InventoryCommand::UpdateContent(cmd));
                if before.is_locked() {
                    prop_assert!(matches!(result, Err(DomainError::Forbidden(_))));
                    prop_assert_eq!(&inv, &before);
                } else {
                    prop_assert!(result.is_ok());
                }
            }

            /// Property: a submission adds exactly one entry when unlocked and
            /// none when locked; existing entries are never removed.
            #[test]
            fn submit_appends_exactly_one_or_is_rejected(
                steps in prop::collection::vec(step(), 0..12),
                name in prop_oneof![Just(String::new()), "[ \t]{1,4}", "[A-Za-z ]{0,20}"],
            ) {
                let mut inv = draft("123 Test St");
                for s in &steps {
                    let _ = inv.execute(&to_command(s));
                }

                let before = inv.signature().map(|s| s.signatures.clone()).unwrap_or_default();
                let was_locked = inv.is_locked();
                let result = inv.execute(&submit(&name, "Tenant", None));
                let after = inv.signature().map(|s| s.signatures.clone()).unwrap_or_default();

                if was_locked {
                    prop_assert!(matches!(result, Err(DomainError::Forbidden(_))));
                    prop_assert_eq!(after, before);
                } else {
                    prop_assert!(result.is_ok());
                    prop_assert_eq!(after.len(), before.len() + 1);
                    prop_assert_eq!(&after[..before.len()], &before[..]);
                }
            }

            /// Property: once locked, the document stays locked.
            #[test]
            fn lock_is_terminal(steps in prop::collection::vec(step(), 0..12)) {
                let mut inv = draft("123 Test St");
                inv.execute(&lock()).unwrap();
                for s in &steps {
                    let _ = inv.execute(&to_command(s));
                    prop_assert!(inv.is_locked());
                }
            }
        }
    }
}
