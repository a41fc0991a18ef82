//! Metering point aggregate and its state machine.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::master_data::{MasterData, MasterDataUpdater};
use super::validators;
use super::values::{EffectiveDate, GridAreaLinkId, GsrnNumber, MeteringPointType};
use crate::domain::events::{
    MasterDataUpdatedEvent, MeteringPointClosedDownEvent, MeteringPointConnectedEvent,
    MeteringPointCreatedEvent, MeteringPointDisconnectedEvent, MeteringPointEvent,
    MeteringPointReconnectedEvent,
};
use crate::domain::validation::rules::{
    MeteringPointMustBeConnectedRule, MeteringPointMustBeDisconnectedRule,
    MeteringPointMustBeNewRule, MustHaveEnergySupplierRule, NotClosedDownRule,
};
use crate::domain::validation::BusinessRulesValidationResult;
use crate::shared::{DomainError, DomainResult};

/// Opaque metering point identifier. Assigned at creation, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeteringPointId(Uuid);

impl MeteringPointId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MeteringPointId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MeteringPointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Physical/connection state of a metering point.
///
/// New → {Connected, ClosedDown}; Connected ↔ Disconnected; any state →
/// ClosedDown; ClosedDown is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhysicalState {
    New,
    Connected,
    Disconnected,
    ClosedDown,
}

impl fmt::Display for PhysicalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::New => "new",
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
            Self::ClosedDown => "closed_down",
        };
        f.write_str(s)
    }
}

/// An energy supplier assigned to the metering point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergySupplier {
    /// GLN of the supplier.
    pub gln: String,
    /// When the supply contract starts.
    pub start_of_supply: DateTime<Utc>,
}

/// Link from a child metering point to its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentLink {
    pub id: MeteringPointId,
    pub gsrn: GsrnNumber,
}

/// Details for a connection-state transition.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionDetails {
    pub effective_date: EffectiveDate,
}

/// Everything needed to create a metering point.
#[derive(Debug, Clone)]
pub struct MeteringPointDetails {
    pub gsrn: GsrnNumber,
    pub metering_point_type: MeteringPointType,
    pub grid_area: GridAreaLinkId,
    pub effective_date: EffectiveDate,
    pub master_data: MasterData,
}

/// The metering point aggregate root. Owns the state machine and raises
/// domain events on committed transitions; it never publishes them itself.
#[derive(Debug, Clone)]
pub struct MeteringPoint {
    id: MeteringPointId,
    gsrn: GsrnNumber,
    metering_point_type: MeteringPointType,
    grid_area: GridAreaLinkId,
    effective_date: EffectiveDate,
    master_data: MasterData,
    physical_state: PhysicalState,
    parent: Option<ParentLink>,
    energy_suppliers: Vec<EnergySupplier>,
    pending_events: Vec<MeteringPointEvent>,
}

impl MeteringPoint {
    /// Runs the creation rule set for the requested type: the general rules
    /// plus the type-specific additions.
    pub fn can_create(details: &MeteringPointDetails) -> BusinessRulesValidationResult {
        validators::validate(
            details.metering_point_type.group(),
            &details.master_data,
            None,
        )
    }

    /// Creates the aggregate, re-running `can_create` first. A failed
    /// re-check is a contract violation: creation must never produce a
    /// half-valid aggregate.
    pub fn create(details: MeteringPointDetails) -> DomainResult<Self> {
        let check = Self::can_create(&details);
        if !check.success() {
            return Err(DomainError::CreationRulesViolated {
                gsrn: details.gsrn.to_string(),
                details: join_errors(&check),
            });
        }

        let mut point = Self {
            id: MeteringPointId::new(),
            gsrn: details.gsrn,
            metering_point_type: details.metering_point_type,
            grid_area: details.grid_area,
            effective_date: details.effective_date,
            master_data: details.master_data,
            physical_state: PhysicalState::New,
            parent: None,
            energy_suppliers: Vec::new(),
            pending_events: Vec::new(),
        };
        let snapshot = point.created_snapshot();
        point.record(MeteringPointEvent::Created(snapshot));
        Ok(point)
    }

    pub fn id(&self) -> MeteringPointId {
        self.id
    }

    pub fn gsrn(&self) -> &GsrnNumber {
        &self.gsrn
    }

    pub fn metering_point_type(&self) -> MeteringPointType {
        self.metering_point_type
    }

    pub fn grid_area(&self) -> &GridAreaLinkId {
        &self.grid_area
    }

    pub fn effective_date(&self) -> EffectiveDate {
        self.effective_date
    }

    pub fn master_data(&self) -> &MasterData {
        &self.master_data
    }

    pub fn physical_state(&self) -> PhysicalState {
        self.physical_state
    }

    pub fn parent(&self) -> Option<&ParentLink> {
        self.parent.as_ref()
    }

    pub fn energy_suppliers(&self) -> &[EnergySupplier] {
        &self.energy_suppliers
    }

    pub fn assign_energy_supplier(
        &mut self,
        gln: impl Into<String>,
        start_of_supply: DateTime<Utc>,
    ) {
        self.energy_suppliers.push(EnergySupplier {
            gln: gln.into(),
            start_of_supply,
        });
    }

    // ── State machine ──────────────────────────────────────────

    /// Connecting is only legal from `New`, and only when an energy supplier
    /// covers the effective date.
    pub fn connect_acceptable(&self, details: &ConnectionDetails) -> BusinessRulesValidationResult {
        let must_be_new = MeteringPointMustBeNewRule::new(self.physical_state);
        let supplier = MustHaveEnergySupplierRule::new(
            &self.gsrn,
            &self.energy_suppliers,
            &details.effective_date,
        );
        BusinessRulesValidationResult::from_rules(&[&must_be_new, &supplier])
    }

    /// Commits the connect transition. Callers must check
    /// `connect_acceptable` first; failing the re-check is a bug in the
    /// caller and surfaces as an error, not a validation result.
    pub fn connect(&mut self, details: &ConnectionDetails) -> DomainResult<()> {
        self.guard("connect", self.connect_acceptable(details))?;
        self.physical_state = PhysicalState::Connected;
        self.record(MeteringPointEvent::Connected(MeteringPointConnectedEvent {
            gsrn: self.gsrn.to_string(),
            effective_date: details.effective_date.instant(),
        }));
        Ok(())
    }

    pub fn disconnect_acceptable(&self) -> BusinessRulesValidationResult {
        let connected = MeteringPointMustBeConnectedRule::new(self.physical_state);
        BusinessRulesValidationResult::from_rules(&[&connected])
    }

    pub fn disconnect(&mut self, details: &ConnectionDetails) -> DomainResult<()> {
        self.guard("disconnect", self.disconnect_acceptable())?;
        self.physical_state = PhysicalState::Disconnected;
        self.record(MeteringPointEvent::Disconnected(
            MeteringPointDisconnectedEvent {
                gsrn: self.gsrn.to_string(),
                effective_date: details.effective_date.instant(),
            },
        ));
        Ok(())
    }

    pub fn reconnect_acceptable(&self) -> BusinessRulesValidationResult {
        let disconnected = MeteringPointMustBeDisconnectedRule::new(self.physical_state);
        BusinessRulesValidationResult::from_rules(&[&disconnected])
    }

    pub fn reconnect(&mut self, details: &ConnectionDetails) -> DomainResult<()> {
        self.guard("reconnect", self.reconnect_acceptable())?;
        self.physical_state = PhysicalState::Connected;
        self.record(MeteringPointEvent::Reconnected(
            MeteringPointReconnectedEvent {
                gsrn: self.gsrn.to_string(),
                effective_date: details.effective_date.instant(),
            },
        ));
        Ok(())
    }

    pub fn close_down_acceptable(&self) -> BusinessRulesValidationResult {
        let not_closed = NotClosedDownRule::new(self.physical_state);
        BusinessRulesValidationResult::from_rules(&[&not_closed])
    }

    pub fn close_down(&mut self, details: &ConnectionDetails) -> DomainResult<()> {
        self.guard("close_down", self.close_down_acceptable())?;
        self.physical_state = PhysicalState::ClosedDown;
        self.record(MeteringPointEvent::ClosedDown(MeteringPointClosedDownEvent {
            gsrn: self.gsrn.to_string(),
            effective_date: details.effective_date.instant(),
        }));
        Ok(())
    }

    // ── Master data ────────────────────────────────────────────

    /// Validates the merged (old + new) master data against the rule set for
    /// this point's type.
    pub fn can_update_master_data(
        &self,
        updater: &MasterDataUpdater,
    ) -> BusinessRulesValidationResult {
        let merged = updater.apply_to(&self.master_data);
        validators::validate(
            self.metering_point_type.group(),
            &merged,
            Some(&self.master_data),
        )
    }

    /// Merges the update (new value wins when present) and records an event
    /// carrying only the fields that actually differ.
    pub fn update_master_data(&mut self, updater: &MasterDataUpdater, effective_date: EffectiveDate) {
        let merged = updater.apply_to(&self.master_data);
        let old = &self.master_data;

        let event = MasterDataUpdatedEvent {
            gsrn: self.gsrn.to_string(),
            effective_date: effective_date.instant(),
            address: diff(&old.address, &merged.address),
            metering: diff(&old.metering, &merged.metering),
            net_settlement_group: diff(&old.net_settlement_group, &merged.net_settlement_group),
            connection_type: diff(&old.connection_type, &merged.connection_type).flatten(),
            disconnection_type: diff(&old.disconnection_type, &merged.disconnection_type).flatten(),
            capacity: diff(&old.capacity, &merged.capacity)
                .flatten()
                .map(|c| c.to_string()),
            asset_type: diff(&old.asset_type, &merged.asset_type).flatten(),
            settlement_method: diff(&old.settlement_method, &merged.settlement_method).flatten(),
            reading_occurrence: diff(&old.reading_occurrence, &merged.reading_occurrence),
            power_limit: diff(&old.power_limit, &merged.power_limit),
            scheduled_meter_reading_date: diff(
                &old.scheduled_meter_reading_date,
                &merged.scheduled_meter_reading_date,
            )
            .flatten(),
        };

        self.master_data = merged;
        self.record(MeteringPointEvent::MasterDataUpdated(event));
    }

    // ── Events ─────────────────────────────────────────────────

    /// Events accumulated by operations on this instance, in order. The
    /// external dispatcher reads and publishes them.
    pub fn events(&self) -> &[MeteringPointEvent] {
        &self.pending_events
    }

    /// Drains the accumulated events.
    pub fn take_events(&mut self) -> Vec<MeteringPointEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub(crate) fn record(&mut self, event: MeteringPointEvent) {
        self.pending_events.push(event);
    }

    pub(crate) fn set_parent(&mut self, link: Option<ParentLink>) {
        self.parent = link;
    }

    fn guard(
        &self,
        operation: &'static str,
        check: BusinessRulesValidationResult,
    ) -> DomainResult<()> {
        if check.success() {
            Ok(())
        } else {
            Err(DomainError::InvalidStateTransition {
                operation,
                gsrn: self.gsrn.to_string(),
                state: self.physical_state.to_string(),
            })
        }
    }

    fn created_snapshot(&self) -> MeteringPointCreatedEvent {
        let data = &self.master_data;
        MeteringPointCreatedEvent {
            metering_point_id: self.id.to_string(),
            gsrn: self.gsrn.to_string(),
            metering_point_type: self.metering_point_type.to_string(),
            grid_area: self.grid_area.to_string(),
            physical_state: self.physical_state.to_string(),
            effective_date: self.effective_date.instant(),
            address: data.address.clone(),
            metering: data.metering.clone(),
            net_settlement_group: data.net_settlement_group,
            connection_type: data.connection_type,
            disconnection_type: data.disconnection_type,
            capacity: data.capacity.map(|c| c.to_string()),
            asset_type: data.asset_type,
            settlement_method: data.settlement_method,
            product_type: data.product_type.as_str().to_string(),
            unit_type: data.unit_type.as_str().to_string(),
            reading_occurrence: data.reading_occurrence,
            power_limit: data.power_limit,
            scheduled_meter_reading_date: data.scheduled_meter_reading_date.clone(),
            from_grid_area: data.from_grid_area.as_ref().map(|g| g.to_string()),
            to_grid_area: data.to_grid_area.as_ref().map(|g| g.to_string()),
        }
    }
}

fn join_errors(result: &BusinessRulesValidationResult) -> String {
    result
        .errors()
        .iter()
        .map(|error| format!("{} ({})", error, error.code()))
        .collect::<Vec<_>>()
        .join("; ")
}

fn diff<T: PartialEq + Clone>(old: &T, new: &T) -> Option<T> {
    if old == new {
        None
    } else {
        Some(new.clone())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metering_points::test_support::{
        sample_details, sample_metering_point, winter_date,
    };
    use crate::domain::validation::ValidationError;

    fn connection(date: &str) -> ConnectionDetails {
        ConnectionDetails {
            effective_date: EffectiveDate::parse(date).unwrap(),
        }
    }

    #[test]
    fn create_starts_new_with_a_created_event() {
        let point = MeteringPoint::create(sample_details()).unwrap();
        assert_eq!(point.physical_state(), PhysicalState::New);
        assert_eq!(point.events().len(), 1);
        assert_eq!(point.events()[0].event_type(), "metering_point_created");
        assert_eq!(point.events()[0].gsrn(), "571234567891234605");
    }

    #[test]
    fn create_refuses_invalid_details() {
        let mut details = sample_details();
        details.master_data.address.street_name = None;
        assert!(!MeteringPoint::can_create(&details).success());
        let err = MeteringPoint::create(details).unwrap_err();
        assert!(matches!(err, DomainError::CreationRulesViolated { .. }));
    }

    #[test]
    fn connect_requires_energy_supplier_covering_effective_date() {
        let mut point = sample_metering_point();
        let details = connection("2023-06-30T22:00:00Z");

        let check = point.connect_acceptable(&details);
        assert_eq!(
            check.errors(),
            &[ValidationError::MustHaveEnergySupplier {
                gsrn: "571234567891234605".to_string()
            }]
        );

        point.assign_energy_supplier("5790000000001", winter_date("2023-01-31T23:00:00Z"));
        assert!(point.connect_acceptable(&details).success());
        point.connect(&details).unwrap();
        assert_eq!(point.physical_state(), PhysicalState::Connected);

        let connected: Vec<_> = point
            .events()
            .iter()
            .filter(|e| e.event_type() == "metering_point_connected")
            .collect();
        assert_eq!(connected.len(), 1);
    }

    #[test]
    fn connect_without_guard_passing_is_a_contract_error() {
        let mut point = sample_metering_point();
        let details = connection("2023-06-30T22:00:00Z");
        let err = point.connect(&details).unwrap_err();
        assert!(matches!(err, DomainError::InvalidStateTransition { .. }));
        // No event, no state change.
        assert_eq!(point.physical_state(), PhysicalState::New);
        assert_eq!(point.events().len(), 1); // only the created event
    }

    #[test]
    fn disconnect_only_from_connected() {
        let mut point = sample_metering_point();
        point.assign_energy_supplier("5790000000001", winter_date("2023-01-31T23:00:00Z"));
        let details = connection("2023-06-30T22:00:00Z");
        point.connect(&details).unwrap();

        point.disconnect(&details).unwrap();
        assert_eq!(point.physical_state(), PhysicalState::Disconnected);

        // Second disconnect fails with a must-be-connected error and leaves
        // no duplicate event behind.
        let check = point.disconnect_acceptable();
        assert!(matches!(
            check.errors()[0],
            ValidationError::MeteringPointMustBeConnected { .. }
        ));
        assert!(point.disconnect(&details).is_err());
        assert_eq!(point.physical_state(), PhysicalState::Disconnected);
        let disconnected = point
            .events()
            .iter()
            .filter(|e| e.event_type() == "metering_point_disconnected")
            .count();
        assert_eq!(disconnected, 1);
    }

    #[test]
    fn reconnect_mirrors_disconnect() {
        let mut point = sample_metering_point();
        point.assign_energy_supplier("5790000000001", winter_date("2023-01-31T23:00:00Z"));
        let details = connection("2023-06-30T22:00:00Z");

        assert!(!point.reconnect_acceptable().success());
        point.connect(&details).unwrap();
        assert!(!point.reconnect_acceptable().success());
        point.disconnect(&details).unwrap();
        assert!(point.reconnect_acceptable().success());
        point.reconnect(&details).unwrap();
        assert_eq!(point.physical_state(), PhysicalState::Connected);
    }

    #[test]
    fn closed_down_is_terminal() {
        let mut point = sample_metering_point();
        let details = connection("2023-06-30T22:00:00Z");
        point.close_down(&details).unwrap();
        assert_eq!(point.physical_state(), PhysicalState::ClosedDown);

        assert!(!point.close_down_acceptable().success());
        assert!(!point.connect_acceptable(&details).success());
        assert!(!point.disconnect_acceptable().success());
        assert!(!point.reconnect_acceptable().success());
    }

    #[test]
    fn master_data_update_records_only_changed_fields() {
        use crate::domain::events::MeteringPointEvent;
        use crate::domain::metering_points::values::ReadingOccurrence;

        let mut point = sample_metering_point();
        let updater = MasterDataUpdater {
            reading_occurrence: Some(ReadingOccurrence::Quarterly),
            ..Default::default()
        };
        assert!(point.can_update_master_data(&updater).success());
        point.update_master_data(&updater, EffectiveDate::parse("2023-06-30T22:00:00Z").unwrap());

        let event = point
            .events()
            .iter()
            .find_map(|e| match e {
                MeteringPointEvent::MasterDataUpdated(e) => Some(e),
                _ => None,
            })
            .expect("master data event");
        assert_eq!(event.reading_occurrence, Some(ReadingOccurrence::Quarterly));
        assert!(event.address.is_none());
        assert!(event.settlement_method.is_none());
        assert!(event.metering.is_none());
    }

    #[test]
    fn take_events_drains_the_buffer() {
        let mut point = sample_metering_point();
        assert_eq!(point.take_events().len(), 1);
        assert!(point.events().is_empty());
    }
}
