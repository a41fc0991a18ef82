//! Metering point lifecycle service.
//!
//! Reads configuration from TOML file
//! (~/.config/meteringpoint-service/config.toml) and runs a short
//! registration flow against the in-memory adapters.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use datahub_metering::application::{
    ConnectMeteringPointHandler, ConnectMeteringPointRequest, CreateMeteringPointHandler,
    CreateMeteringPointRequest,
};
use datahub_metering::domain::metering_points::values::{
    Address, MeteringMethod, NetSettlementGroup, PowerLimit, ProductType, ReadingOccurrence,
    SettlementMethod, UnitType, MARKET_TIMEZONE,
};
use datahub_metering::domain::metering_points::{MasterData, MeteringConfiguration};
use datahub_metering::infrastructure::{AllowAll, InMemoryMeteringPointRepository, SystemClock};
use datahub_metering::{default_config_path, AppConfig};

/// The most recent local midnight in the market timezone, as a UTC instant.
fn most_recent_market_midnight() -> String {
    let today = Utc::now().with_timezone(&MARKET_TIMEZONE).date_naive();
    let midnight = today
        .and_hms_opt(0, 0, 0)
        .and_then(|naive| naive.and_local_timezone(MARKET_TIMEZONE).single())
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);
    midnight.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

fn demo_master_data() -> MasterData {
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
        connection_type: None,
        disconnection_type: None,
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

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("METERINGPOINT_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let config = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting metering point lifecycle service...");

    let repository = Arc::new(InMemoryMeteringPointRepository::new());
    let authorization = Arc::new(AllowAll);
    let clock = Arc::new(SystemClock);

    let create = CreateMeteringPointHandler::new(
        repository.clone(),
        authorization.clone(),
        clock.clone(),
        config.policies.create.policy(),
    );
    let connect = ConnectMeteringPointHandler::new(
        repository.clone(),
        authorization.clone(),
        clock.clone(),
        config.policies.connect.policy(),
    );

    let gsrn = "571234567891234605";
    let effective_date = most_recent_market_midnight();

    let result = create
        .handle(CreateMeteringPointRequest {
            transaction_id: "demo-create".to_string(),
            gsrn: gsrn.to_string(),
            metering_point_type: "consumption".to_string(),
            grid_area: "870".to_string(),
            effective_date: effective_date.clone(),
            master_data: demo_master_data(),
        })
        .await?;
    info!(
        success = result.success,
        errors = %serde_json::to_string(&result.validation_errors)?,
        "Create processed"
    );

    // No supplier is assigned yet, so the connect is expected to be rejected
    // with the energy-supplier rule.
    let result = connect
        .handle(ConnectMeteringPointRequest {
            transaction_id: "demo-connect".to_string(),
            gsrn: gsrn.to_string(),
            effective_date,
        })
        .await?;
    info!(
        success = result.success,
        errors = %serde_json::to_string(&result.validation_errors)?,
        "Connect processed"
    );

    Ok(())
}
