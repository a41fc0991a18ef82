//! Domain events raised by committed metering point transitions.
//!
//! Aggregates only accumulate these in memory; an external dispatcher reads
//! and publishes them. The core never publishes directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::metering_points::master_data::MeteringConfiguration;
use super::metering_points::values::{
    Address, AssetType, ConnectionType, DisconnectionType, NetSettlementGroup, PowerLimit,
    ReadingOccurrence, ScheduledMeterReadingDate, SettlementMethod,
};

/// Event types raised by the metering point aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum MeteringPointEvent {
    Created(MeteringPointCreatedEvent),
    Connected(MeteringPointConnectedEvent),
    Disconnected(MeteringPointDisconnectedEvent),
    Reconnected(MeteringPointReconnectedEvent),
    ClosedDown(MeteringPointClosedDownEvent),
    MasterDataUpdated(MasterDataUpdatedEvent),
    CoupledToParent(CoupledToParentEvent),
    DecoupledFromParent(DecoupledFromParentEvent),
}

impl MeteringPointEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Created(_) => "metering_point_created",
            Self::Connected(_) => "metering_point_connected",
            Self::Disconnected(_) => "metering_point_disconnected",
            Self::Reconnected(_) => "metering_point_reconnected",
            Self::ClosedDown(_) => "metering_point_closed_down",
            Self::MasterDataUpdated(_) => "master_data_updated",
            Self::CoupledToParent(_) => "coupled_to_parent",
            Self::DecoupledFromParent(_) => "decoupled_from_parent",
        }
    }

    pub fn gsrn(&self) -> &str {
        match self {
            Self::Created(e) => &e.gsrn,
            Self::Connected(e) => &e.gsrn,
            Self::Disconnected(e) => &e.gsrn,
            Self::Reconnected(e) => &e.gsrn,
            Self::ClosedDown(e) => &e.gsrn,
            Self::MasterDataUpdated(e) => &e.gsrn,
            Self::CoupledToParent(e) => &e.gsrn,
            Self::DecoupledFromParent(e) => &e.gsrn,
        }
    }
}

/// Full snapshot of the structural fields at creation, consumed by the
/// downstream integration-event publisher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeteringPointCreatedEvent {
    pub metering_point_id: String,
    pub gsrn: String,
    pub metering_point_type: String,
    pub grid_area: String,
    pub physical_state: String,
    pub effective_date: DateTime<Utc>,
    pub address: Address,
    pub metering: MeteringConfiguration,
    pub net_settlement_group: NetSettlementGroup,
    pub connection_type: Option<ConnectionType>,
    pub disconnection_type: Option<DisconnectionType>,
    pub capacity: Option<String>,
    pub asset_type: Option<AssetType>,
    pub settlement_method: Option<SettlementMethod>,
    pub product_type: String,
    pub unit_type: String,
    pub reading_occurrence: ReadingOccurrence,
    pub power_limit: PowerLimit,
    pub scheduled_meter_reading_date: Option<ScheduledMeterReadingDate>,
    pub from_grid_area: Option<String>,
    pub to_grid_area: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeteringPointConnectedEvent {
    pub gsrn: String,
    pub effective_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeteringPointDisconnectedEvent {
    pub gsrn: String,
    pub effective_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeteringPointReconnectedEvent {
    pub gsrn: String,
    pub effective_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeteringPointClosedDownEvent {
    pub gsrn: String,
    pub effective_date: DateTime<Utc>,
}

/// Carries only the master data fields that actually changed; unchanged
/// fields are `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterDataUpdatedEvent {
    pub gsrn: String,
    pub effective_date: DateTime<Utc>,
    pub address: Option<Address>,
    pub metering: Option<MeteringConfiguration>,
    pub net_settlement_group: Option<NetSettlementGroup>,
    pub connection_type: Option<ConnectionType>,
    pub disconnection_type: Option<DisconnectionType>,
    pub capacity: Option<String>,
    pub asset_type: Option<AssetType>,
    pub settlement_method: Option<SettlementMethod>,
    pub reading_occurrence: Option<ReadingOccurrence>,
    pub power_limit: Option<PowerLimit>,
    pub scheduled_meter_reading_date: Option<ScheduledMeterReadingDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoupledToParentEvent {
    pub gsrn: String,
    pub parent_gsrn: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecoupledFromParentEvent {
    pub gsrn: String,
    pub parent_gsrn: String,
}
