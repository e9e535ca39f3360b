//! # Seed Data Generator
//!
//! Populates the database with a demo network for development.
//!
//! ## Usage
//! ```bash
//! # Generate a network with 20 substations (default)
//! cargo run -p netstore-db --bin seed
//!
//! # Generate custom size
//! cargo run -p netstore-db --bin seed -- --count 200
//!
//! # Specify database path
//! cargo run -p netstore-db --bin seed -- --db ./data/netstore.db
//!
//! # Read pool and batch settings from a config file
//! cargo run -p netstore-db --bin seed -- --config ./netstore.toml
//! ```
//!
//! Settings come from [`StoreConfig::load`]: the config file (default
//! location unless `--config` is given), then `NETSTORE_*` variables.
//! `--db` overrides the database path from either source.
//!
//! ## Generated Network
//! Each substation `S{n}` holds:
//! - Two voltage levels: `S{n}_400` (node-breaker) and `S{n}_225`
//! - A busbar section and a breaker in the 400 kV level
//! - A transformer `T{n}` between both levels
//! - A generator on the 400 kV side, a load on the 225 kV side
//!
//! Consecutive substations are joined by 400 kV lines. The initial variant
//! is then cloned into variant 1 (`study`).

use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

use chrono::Utc;
use netstore_core::attributes::*;
use netstore_core::Resource;
use netstore_db::{Database, StoreConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Energy sources cycled through the generators.
const SOURCES: &[EnergySource] = &[
    EnergySource::Nuclear,
    EnergySource::Hydro,
    EnergySource::Thermal,
    EnergySource::Wind,
    EnergySource::Solar,
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 20;
    let mut db_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(20);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--config" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Network Store Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of substations to generate (default: 20)");
                println!("  -d, --db <PATH>    Database file path (overrides the config)");
                println!("      --config <PATH> Config file (default: platform config dir)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let count = count.max(1);

    let mut config = StoreConfig::load(config_path)?;
    if let Some(path) = db_path {
        config.database.path = path;
    }

    println!("Network Store Seed Data Generator");
    println!("=================================");
    println!("Database:    {}", config.database.path.display());
    println!("Batch size:  {}", config.writes.batch_size);
    println!("Substations: {}", count);
    println!();

    let db = Database::new(config.into_db_config()).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let uuid = Uuid::new_v4();
    let start = std::time::Instant::now();

    db.networks()
        .create(&[Resource::new(
            "demo",
            0,
            NetworkAttributes::new(uuid, "DEMO", Utc::now()),
        )])
        .await?;

    let substations: Vec<_> = (0..count).map(substation).collect();
    let voltage_levels: Vec<_> = (0..count)
        .flat_map(|n| [voltage_level(n, 400), voltage_level(n, 225)])
        .collect();
    let busbar_sections: Vec<_> = (0..count).map(busbar_section).collect();
    let switches: Vec<_> = (0..count).map(breaker).collect();
    let transformers: Vec<_> = (0..count).map(transformer).collect();
    let generators: Vec<_> = (0..count).map(generator).collect();
    let loads: Vec<_> = (0..count).map(load).collect();
    let lines: Vec<_> = (1..count).map(line).collect();

    db.substations().create(uuid, &substations).await?;
    db.voltage_levels().create(uuid, &voltage_levels).await?;
    db.busbar_sections().create(uuid, &busbar_sections).await?;
    db.switches().create(uuid, &switches).await?;
    db.two_windings_transformers().create(uuid, &transformers).await?;
    db.generators().create(uuid, &generators).await?;
    db.loads().create(uuid, &loads).await?;
    db.lines().create(uuid, &lines).await?;

    let elapsed = start.elapsed();
    println!();
    println!("✓ Created network {} in {:?}", uuid, elapsed);

    let copied = db.networks().clone_variant(uuid, 0, 1, Some("study")).await?;
    info!(rows = copied, "Cloned initial variant");
    println!("✓ Cloned variant 0 into 'study' ({} rows)", copied);

    println!();
    for variant in db.networks().list_variants(uuid).await? {
        println!("Variant {} ({}):", variant.num, variant.id);
        println!(
            "  substations: {}",
            db.substations().get_all(uuid, variant.num).await?.len()
        );
        println!(
            "  voltage levels: {}",
            db.voltage_levels().get_all(uuid, variant.num).await?.len()
        );
        println!(
            "  generators: {}",
            db.generators().get_all(uuid, variant.num).await?.len()
        );
        println!("  loads: {}", db.loads().get_all(uuid, variant.num).await?.len());
        println!("  lines: {}", db.lines().get_all(uuid, variant.num).await?.len());
        println!(
            "  transformers: {}",
            db.two_windings_transformers()
                .get_all(uuid, variant.num)
                .await?
                .len()
        );
    }

    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}

fn substation(n: usize) -> Resource<SubstationAttributes> {
    Resource::new(
        format!("S{n}"),
        0,
        SubstationAttributes {
            name: Some(format!("Substation {n}")),
            country: Some("FR".to_string()),
            tso: Some("DEMO".to_string()),
            ..Default::default()
        },
    )
}

fn voltage_level(n: usize, kv: u32) -> Resource<VoltageLevelAttributes> {
    Resource::new(
        format!("S{n}_{kv}"),
        0,
        VoltageLevelAttributes {
            substation_id: format!("S{n}"),
            nominal_v: f64::from(kv),
            low_voltage_limit: Some(f64::from(kv) * 0.95),
            high_voltage_limit: Some(f64::from(kv) * 1.05),
            topology_kind: if kv == 400 {
                TopologyKind::NodeBreaker
            } else {
                TopologyKind::BusBreaker
            },
            ..Default::default()
        },
    )
}

fn busbar_section(n: usize) -> Resource<BusbarSectionAttributes> {
    Resource::new(
        format!("S{n}_BBS"),
        0,
        BusbarSectionAttributes {
            voltage_level_id: format!("S{n}_400"),
            node: 0,
            ..Default::default()
        },
    )
}

fn breaker(n: usize) -> Resource<SwitchAttributes> {
    Resource::new(
        format!("S{n}_BRK"),
        0,
        SwitchAttributes {
            voltage_level_id: format!("S{n}_400"),
            kind: SwitchKind::Breaker,
            node1: Some(0),
            node2: Some(1),
            ..Default::default()
        },
    )
}

fn transformer(n: usize) -> Resource<TwoWindingsTransformerAttributes> {
    Resource::new(
        format!("T{n}"),
        0,
        TwoWindingsTransformerAttributes {
            voltage_level_id1: format!("S{n}_400"),
            voltage_level_id2: format!("S{n}_225"),
            node1: Some(2),
            bus2: Some(format!("S{n}_225_B")),
            connectable_bus2: Some(format!("S{n}_225_B")),
            r: 0.2,
            x: 40.0,
            rated_u1: 400.0,
            rated_u2: 225.0,
            ..Default::default()
        },
    )
}

fn generator(n: usize) -> Resource<GeneratorAttributes> {
    let max_p = 500.0 + (n % 5) as f64 * 100.0;
    Resource::new(
        format!("G{n}"),
        0,
        GeneratorAttributes {
            voltage_level_id: format!("S{n}_400"),
            node: Some(1),
            energy_source: SOURCES[n % SOURCES.len()],
            min_p: 0.0,
            max_p,
            target_p: max_p * 0.8,
            target_v: Some(405.0),
            voltage_regulator_on: true,
            reactive_limits: Some(ReactiveLimits::MinMax {
                min_q: -max_p / 2.0,
                max_q: max_p / 2.0,
            }),
            properties: BTreeMap::from([("zone".to_string(), format!("Z{}", n / 10))]),
            ..Default::default()
        },
    )
}

fn load(n: usize) -> Resource<LoadAttributes> {
    Resource::new(
        format!("LD{n}"),
        0,
        LoadAttributes {
            voltage_level_id: format!("S{n}_225"),
            bus: Some(format!("S{n}_225_B")),
            connectable_bus: Some(format!("S{n}_225_B")),
            p0: 300.0 + (n % 7) as f64 * 25.0,
            q0: 50.0,
            ..Default::default()
        },
    )
}

/// Line joining substation `n - 1` to substation `n` at 400 kV.
fn line(n: usize) -> Resource<LineAttributes> {
    Resource::new(
        format!("L{}_{n}", n - 1),
        0,
        LineAttributes {
            voltage_level_id1: format!("S{}_400", n - 1),
            voltage_level_id2: format!("S{n}_400"),
            node1: Some(3),
            node2: Some(4),
            r: 1.5,
            x: 15.0,
            b1: 0.0001,
            b2: 0.0001,
            current_limits1: Some(CurrentLimits {
                permanent_limit: 2000.0,
                temporary_limits: Vec::new(),
            }),
            ..Default::default()
        },
    )
}
