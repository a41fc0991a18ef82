//! Regulatory classification enumerations.
//!
//! All name/value lookups are explicit static tables; the original system's
//! reflection-based enumeration registries have no counterpart here.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::validation::ValidationError;

/// Concrete metering point type. The type determines which master data
/// fields are mandatory or forbidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeteringPointType {
    Consumption,
    Production,
    Exchange,
    ExchangeReactiveEnergy,
    VeProduction,
    NetConsumption,
}

/// Validation group a metering point type belongs to. Each group has its own
/// master data rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeteringPointGroup {
    Consumption,
    Production,
    Exchange,
    Special,
}

impl MeteringPointType {
    pub fn group(&self) -> MeteringPointGroup {
        match self {
            Self::Consumption => MeteringPointGroup::Consumption,
            Self::Production => MeteringPointGroup::Production,
            Self::Exchange => MeteringPointGroup::Exchange,
            Self::ExchangeReactiveEnergy | Self::VeProduction | Self::NetConsumption => {
                MeteringPointGroup::Special
            }
        }
    }

    /// Special-group points attach to a parent; the parent itself must be
    /// one of the primary types.
    pub fn can_act_as_parent(&self) -> bool {
        !matches!(self.group(), MeteringPointGroup::Special)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Consumption => "consumption",
            Self::Production => "production",
            Self::Exchange => "exchange",
            Self::ExchangeReactiveEnergy => "exchange_reactive_energy",
            Self::VeProduction => "ve_production",
            Self::NetConsumption => "net_consumption",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "consumption" => Ok(Self::Consumption),
            "production" => Ok(Self::Production),
            "exchange" => Ok(Self::Exchange),
            "exchange_reactive_energy" => Ok(Self::ExchangeReactiveEnergy),
            "ve_production" => Ok(Self::VeProduction),
            "net_consumption" => Ok(Self::NetConsumption),
            _ => Err(ValidationError::UnknownMeteringPointType {
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for MeteringPointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the metering point is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeteringMethod {
    Physical,
    Virtual,
    Calculated,
}

impl MeteringMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Physical => "physical",
            Self::Virtual => "virtual",
            Self::Calculated => "calculated",
        }
    }
}

impl fmt::Display for MeteringMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Net settlement group for own-production settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetSettlementGroup {
    Zero,
    One,
    Two,
    Three,
    Six,
    NinetyNine,
}

impl NetSettlementGroup {
    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Zero)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zero => "0",
            Self::One => "1",
            Self::Two => "2",
            Self::Three => "3",
            Self::Six => "6",
            Self::NinetyNine => "99",
        }
    }
}

/// How often the metering point is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingOccurrence {
    Hourly,
    Quarterly,
    Monthly,
    Yearly,
}

impl ReadingOccurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Quarterly => "quarterly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for ReadingOccurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settlement method for consumption points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementMethod {
    Flex,
    Profiled,
    NonProfiled,
}

/// Generation technology of a production installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    GasTurbine,
    CombinedCycle,
    FuelCells,
    PhotovoltaicCells,
    WindTurbines,
    HydroelectricPower,
    NoTechnology,
}

/// Physical connection kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionType {
    Direct,
    Installation,
}

/// How the metering point can be disconnected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisconnectionType {
    Remote,
    Manual,
}

/// Product measured at the point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    EnergyActive,
    EnergyReactive,
    PowerActive,
    PowerReactive,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EnergyActive => "energy_active",
            Self::EnergyReactive => "energy_reactive",
            Self::PowerActive => "power_active",
            Self::PowerReactive => "power_reactive",
        }
    }
}

/// Measurement unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    Kwh,
    Kw,
    Mwh,
    Mw,
}

impl UnitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kwh => "kwh",
            Self::Kw => "kw",
            Self::Mwh => "mwh",
            Self::Mw => "mw",
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
