//! Structural master data and its partial-update merge.

use serde::{Deserialize, Serialize};

use super::values::{
    Address, AssetType, Capacity, ConnectionType, DisconnectionType, GridAreaLinkId,
    MeteringMethod, NetSettlementGroup, PowerLimit, ProductType, ReadingOccurrence,
    ScheduledMeterReadingDate, SettlementMethod, UnitType,
};

/// Metering method plus the meter it refers to. Physical metering requires a
/// meter id, virtual/calculated metering forbids one; the rule lives in the
/// master data validators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeteringConfiguration {
    pub method: MeteringMethod,
    pub meter_id: Option<String>,
}

/// The structural attributes of a metering point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterData {
    pub address: Address,
    pub metering: MeteringConfiguration,
    pub net_settlement_group: NetSettlementGroup,
    pub connection_type: Option<ConnectionType>,
    pub disconnection_type: Option<DisconnectionType>,
    pub capacity: Option<Capacity>,
    pub asset_type: Option<AssetType>,
    pub settlement_method: Option<SettlementMethod>,
    pub product_type: ProductType,
    pub unit_type: UnitType,
    pub reading_occurrence: ReadingOccurrence,
    pub power_limit: PowerLimit,
    pub scheduled_meter_reading_date: Option<ScheduledMeterReadingDate>,
    /// Source grid area, exchange points only.
    pub from_grid_area: Option<GridAreaLinkId>,
    /// Target grid area, exchange points only.
    pub to_grid_area: Option<GridAreaLinkId>,
}

/// A proposed master data change. Fields left as `None` retain their prior
/// values: applying an empty updater yields the original master data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MasterDataUpdater {
    pub address: Option<Address>,
    pub metering: Option<MeteringConfiguration>,
    pub net_settlement_group: Option<NetSettlementGroup>,
    pub connection_type: Option<ConnectionType>,
    pub disconnection_type: Option<DisconnectionType>,
    pub capacity: Option<Capacity>,
    pub asset_type: Option<AssetType>,
    pub settlement_method: Option<SettlementMethod>,
    pub product_type: Option<ProductType>,
    pub unit_type: Option<UnitType>,
    pub reading_occurrence: Option<ReadingOccurrence>,
    pub power_limit: Option<PowerLimit>,
    pub scheduled_meter_reading_date: Option<ScheduledMeterReadingDate>,
    pub from_grid_area: Option<GridAreaLinkId>,
    pub to_grid_area: Option<GridAreaLinkId>,
}

impl MasterDataUpdater {
    /// Merges the update over `current`: a supplied value wins, an absent
    /// one keeps the prior value.
    pub fn apply_to(&self, current: &MasterData) -> MasterData {
        MasterData {
            address: self.address.clone().unwrap_or_else(|| current.address.clone()),
            metering: self.metering.clone().unwrap_or_else(|| current.metering.clone()),
            net_settlement_group: self
                .net_settlement_group
                .unwrap_or(current.net_settlement_group),
            connection_type: self.connection_type.or(current.connection_type),
            disconnection_type: self.disconnection_type.or(current.disconnection_type),
            capacity: self.capacity.or(current.capacity),
            asset_type: self.asset_type.or(current.asset_type),
            settlement_method: self.settlement_method.or(current.settlement_method),
            product_type: self.product_type.unwrap_or(current.product_type),
            unit_type: self.unit_type.unwrap_or(current.unit_type),
            reading_occurrence: self.reading_occurrence.unwrap_or(current.reading_occurrence),
            power_limit: self.power_limit.unwrap_or(current.power_limit),
            scheduled_meter_reading_date: self
                .scheduled_meter_reading_date
                .clone()
                .or_else(|| current.scheduled_meter_reading_date.clone()),
            from_grid_area: self
                .from_grid_area
                .clone()
                .or_else(|| current.from_grid_area.clone()),
            to_grid_area: self
                .to_grid_area
                .clone()
                .or_else(|| current.to_grid_area.clone()),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_master_data() -> MasterData {
        MasterData {
            address: Address {
                street_name: Some("Kongevejen".to_string()),
                street_code: Some("0304".to_string()),
                building_number: Some("12".to_string()),
                post_code: Some("2800".to_string()),
                city: Some("Kongens Lyngby".to_string()),
                country_code: Some("DK".to_string()),
                municipality_code: None,
                geo_info_reference: None,
            },
            metering: MeteringConfiguration {
                method: MeteringMethod::Physical,
                meter_id: Some("M-12345".to_string()),
            },
            net_settlement_group: NetSettlementGroup::Zero,
            connection_type: Some(ConnectionType::Direct),
            disconnection_type: Some(DisconnectionType::Remote),
            capacity: None,
            asset_type: None,
            settlement_method: Some(SettlementMethod::Flex),
            product_type: ProductType::EnergyActive,
            unit_type: UnitType::Kwh,
            reading_occurrence: ReadingOccurrence::Hourly,
            power_limit: PowerLimit::default(),
            scheduled_meter_reading_date: None,
            from_grid_area: None,
            to_grid_area: None,
        }
    }

    #[test]
    fn empty_updater_is_identity() {
        let current = sample_master_data();
        let merged = MasterDataUpdater::default().apply_to(&current);
        assert_eq!(merged, current);
    }

    #[test]
    fn supplied_fields_win() {
        let current = sample_master_data();
        let updater = MasterDataUpdater {
            reading_occurrence: Some(ReadingOccurrence::Quarterly),
            settlement_method: Some(SettlementMethod::NonProfiled),
            ..Default::default()
        };
        let merged = updater.apply_to(&current);
        assert_eq!(merged.reading_occurrence, ReadingOccurrence::Quarterly);
        assert_eq!(merged.settlement_method, Some(SettlementMethod::NonProfiled));
        // Untouched fields retain prior values.
        assert_eq!(merged.address, current.address);
        assert_eq!(merged.metering, current.metering);
    }

    #[test]
    fn absent_optional_field_keeps_prior_value() {
        let mut current = sample_master_data();
        current.scheduled_meter_reading_date =
            Some(ScheduledMeterReadingDate::create("0101").unwrap());
        let merged = MasterDataUpdater::default().apply_to(&current);
        assert_eq!(
            merged.scheduled_meter_reading_date,
            current.scheduled_meter_reading_date
        );
    }
}
