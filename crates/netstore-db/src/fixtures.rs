//! Sample resources shared by the repository tests.
//!
//! Every optional field and nested value object is populated so round trips
//! exercise every column. Floats are exact binary fractions; NaN and
//! infinities have their own round-trip tests.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use netstore_core::attributes::*;
use netstore_core::Resource;
use uuid::Uuid;

use crate::pool::{Database, DbConfig};

pub async fn database() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

pub async fn database_with_batch_size(batch_size: usize) -> Database {
    Database::new(DbConfig::in_memory().batch_size(batch_size))
        .await
        .unwrap()
}

pub fn case_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
}

fn properties() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("owner".to_string(), "north".to_string()),
        ("source".to_string(), "import".to_string()),
    ])
}

fn position(label: &str) -> Option<ConnectablePosition> {
    Some(ConnectablePosition {
        label: label.to_string(),
        order: Some(10),
        direction: ConnectableDirection::Bottom,
    })
}

fn terminal(id: &str) -> Option<TerminalRef> {
    Some(TerminalRef {
        connectable_id: id.to_string(),
        side: Some("ONE".to_string()),
    })
}

fn current_limits(permanent: f64) -> Option<CurrentLimits> {
    Some(CurrentLimits {
        permanent_limit: permanent,
        temporary_limits: vec![TemporaryLimit {
            name: "IT20".to_string(),
            value: Some(permanent * 1.5),
            acceptable_duration: Some(1200),
            fictitious: false,
        }],
    })
}

fn curve() -> Option<ReactiveLimits> {
    Some(ReactiveLimits::Curve {
        points: vec![
            ReactiveCapabilityCurvePoint {
                p: 0.0,
                min_q: -100.0,
                max_q: 100.0,
            },
            ReactiveCapabilityCurvePoint {
                p: 500.0,
                min_q: -50.5,
                max_q: 50.5,
            },
        ],
    })
}

fn steps() -> Vec<TapChangerStep> {
    vec![
        TapChangerStep {
            rho: 0.75,
            r: 0.5,
            x: 1.25,
            g: 0.0,
            b: 0.0,
            alpha: None,
        },
        TapChangerStep {
            rho: 1.0,
            r: 0.5,
            x: 1.25,
            g: 0.0,
            b: 0.0,
            alpha: Some(-2.5),
        },
    ]
}

fn ratio_tap_changer() -> Option<RatioTapChanger> {
    Some(RatioTapChanger {
        low_tap_position: 0,
        tap_position: 1,
        steps: steps(),
        load_tap_changing_capabilities: true,
        regulating: true,
        target_v: Some(225.0),
        target_deadband: Some(0.5),
        regulating_terminal: terminal("T2"),
    })
}

fn phase_tap_changer() -> Option<PhaseTapChanger> {
    Some(PhaseTapChanger {
        low_tap_position: -1,
        tap_position: 0,
        steps: steps(),
        regulation_mode: PhaseTapChangerRegulationMode::CurrentLimiter,
        regulation_value: Some(930.5),
        regulating: false,
        target_deadband: None,
        regulating_terminal: None,
    })
}

// =============================================================================
// Network
// =============================================================================

pub fn network(uuid: Uuid, id: &str) -> Resource<NetworkAttributes> {
    Resource::new(
        id,
        0,
        NetworkAttributes {
            fictitious: false,
            properties: properties(),
            forecast_distance: 0,
            connected_components_valid: true,
            synchronous_components_valid: false,
            cgmes_sv_metadata: Some(CgmesSvMetadata {
                description: "sv".to_string(),
                sv_version: 2,
                dependencies: vec!["tp".to_string(), "ssh".to_string()],
                modeling_authority_set: "http://grid.example/mas".to_string(),
            }),
            cgmes_ssh_metadata: Some(CgmesSshMetadata {
                description: "ssh".to_string(),
                ssh_version: 1,
                dependencies: vec!["eq".to_string()],
                modeling_authority_set: "http://grid.example/mas".to_string(),
            }),
            cim_characteristics: Some(CimCharacteristics {
                topology_kind: CgmesTopologyKind::BusBranch,
                cim_version: 16,
            }),
            ..NetworkAttributes::new(uuid, "CGMES", case_date())
        },
    )
}

// =============================================================================
// Containers
// =============================================================================

pub fn substation(id: &str) -> Resource<SubstationAttributes> {
    Resource::new(
        id,
        0,
        SubstationAttributes {
            name: Some(format!("{id} name")),
            fictitious: false,
            properties: properties(),
            country: Some("FR".to_string()),
            tso: Some("RTE".to_string()),
            geographical_tags: vec!["A".to_string(), "B".to_string()],
            entsoe_area: None,
        },
    )
}

pub fn voltage_level(id: &str, substation_id: &str) -> Resource<VoltageLevelAttributes> {
    Resource::new(
        id,
        0,
        VoltageLevelAttributes {
            substation_id: substation_id.to_string(),
            name: Some(format!("{id} name")),
            fictitious: false,
            properties: BTreeMap::new(),
            nominal_v: 400.0,
            low_voltage_limit: Some(380.0),
            high_voltage_limit: Some(420.0),
            topology_kind: TopologyKind::NodeBreaker,
            internal_connections: vec![InternalConnection { node1: 1, node2: 2 }],
            slack_terminal: terminal("G1"),
        },
    )
}

// =============================================================================
// Injections
// =============================================================================

pub fn generator(id: &str, voltage_level_id: &str) -> Resource<GeneratorAttributes> {
    Resource::new(
        id,
        0,
        GeneratorAttributes {
            voltage_level_id: voltage_level_id.to_string(),
            name: Some(format!("{id} name")),
            fictitious: false,
            properties: properties(),
            node: Some(4),
            bus: None,
            connectable_bus: None,
            p: Some(-399.5),
            q: None,
            position: position(id),
            energy_source: EnergySource::Nuclear,
            min_p: 0.0,
            max_p: 900.0,
            rated_s: Some(1000.0),
            voltage_regulator_on: true,
            target_p: 400.0,
            target_q: 0.0,
            target_v: Some(405.5),
            reactive_limits: curve(),
            active_power_control: Some(ActivePowerControl {
                participate: true,
                droop: 4.0,
            }),
            coordinated_reactive_control: Some(CoordinatedReactiveControl { q_percent: 25.0 }),
            regulating_terminal: terminal(id),
        },
    )
}

pub fn battery(id: &str, voltage_level_id: &str) -> Resource<BatteryAttributes> {
    Resource::new(
        id,
        0,
        BatteryAttributes {
            voltage_level_id: voltage_level_id.to_string(),
            name: None,
            fictitious: true,
            properties: BTreeMap::new(),
            node: None,
            bus: Some("B1".to_string()),
            connectable_bus: Some("B1".to_string()),
            p: Some(12.5),
            q: Some(-3.25),
            position: None,
            p0: 10.0,
            q0: 2.0,
            min_p: -50.0,
            max_p: 50.0,
            reactive_limits: Some(ReactiveLimits::MinMax {
                min_q: -20.0,
                max_q: 20.0,
            }),
            active_power_control: None,
        },
    )
}

pub fn load(id: &str, voltage_level_id: &str) -> Resource<LoadAttributes> {
    Resource::new(
        id,
        0,
        LoadAttributes {
            voltage_level_id: voltage_level_id.to_string(),
            name: Some(format!("{id} name")),
            fictitious: false,
            properties: BTreeMap::new(),
            node: Some(7),
            bus: None,
            connectable_bus: None,
            p: None,
            q: None,
            position: position(id),
            load_type: LoadType::Auxiliary,
            p0: 600.0,
            q0: 200.0,
        },
    )
}

pub fn shunt_compensator(id: &str, voltage_level_id: &str) -> Resource<ShuntCompensatorAttributes> {
    Resource::new(
        id,
        0,
        ShuntCompensatorAttributes {
            voltage_level_id: voltage_level_id.to_string(),
            name: None,
            fictitious: false,
            properties: BTreeMap::new(),
            node: Some(9),
            bus: None,
            connectable_bus: None,
            p: None,
            q: Some(1.5),
            position: None,
            section_count: 1,
            model: ShuntCompensatorModel::NonLinear {
                sections: vec![
                    ShuntCompensatorSection { b: 0.5, g: 0.0 },
                    ShuntCompensatorSection { b: 1.0, g: 0.25 },
                ],
            },
            voltage_regulator_on: false,
            target_v: Some(400.0),
            target_deadband: Some(2.0),
            regulating_terminal: terminal(id),
        },
    )
}

pub fn vsc_converter_station(
    id: &str,
    voltage_level_id: &str,
) -> Resource<VscConverterStationAttributes> {
    Resource::new(
        id,
        0,
        VscConverterStationAttributes {
            voltage_level_id: voltage_level_id.to_string(),
            name: Some(format!("{id} name")),
            fictitious: false,
            properties: BTreeMap::new(),
            node: Some(11),
            bus: None,
            connectable_bus: None,
            p: None,
            q: None,
            position: None,
            loss_factor: 1.25,
            voltage_regulator_on: true,
            reactive_power_setpoint: Some(30.0),
            voltage_setpoint: Some(400.0),
            reactive_limits: curve(),
        },
    )
}

pub fn lcc_converter_station(
    id: &str,
    voltage_level_id: &str,
) -> Resource<LccConverterStationAttributes> {
    Resource::new(
        id,
        0,
        LccConverterStationAttributes {
            voltage_level_id: voltage_level_id.to_string(),
            name: None,
            fictitious: false,
            properties: BTreeMap::new(),
            node: Some(12),
            bus: None,
            connectable_bus: None,
            p: None,
            q: None,
            position: None,
            loss_factor: 1.5,
            power_factor: 0.75,
        },
    )
}

pub fn static_var_compensator(
    id: &str,
    voltage_level_id: &str,
) -> Resource<StaticVarCompensatorAttributes> {
    Resource::new(
        id,
        0,
        StaticVarCompensatorAttributes {
            voltage_level_id: voltage_level_id.to_string(),
            name: None,
            fictitious: false,
            properties: BTreeMap::new(),
            node: Some(13),
            bus: None,
            connectable_bus: None,
            p: None,
            q: None,
            position: position(id),
            bmin: -0.5,
            bmax: 0.5,
            voltage_setpoint: Some(390.0),
            reactive_power_setpoint: None,
            regulation_mode: StaticVarCompensatorRegulationMode::Voltage,
            voltage_per_reactive_power_control: Some(VoltagePerReactivePowerControl {
                slope: 0.125,
            }),
            regulating_terminal: terminal(id),
        },
    )
}

// =============================================================================
// Topology
// =============================================================================

pub fn busbar_section(id: &str, voltage_level_id: &str) -> Resource<BusbarSectionAttributes> {
    Resource::new(
        id,
        0,
        BusbarSectionAttributes {
            voltage_level_id: voltage_level_id.to_string(),
            name: Some(format!("{id} name")),
            fictitious: false,
            properties: BTreeMap::new(),
            node: 0,
            v: Some(401.5),
            angle: Some(-1.25),
            position: position(id),
        },
    )
}

pub fn switch(id: &str, voltage_level_id: &str) -> Resource<SwitchAttributes> {
    Resource::new(
        id,
        0,
        SwitchAttributes {
            voltage_level_id: voltage_level_id.to_string(),
            name: None,
            fictitious: false,
            properties: BTreeMap::new(),
            kind: SwitchKind::Disconnector,
            node1: Some(0),
            node2: Some(4),
            bus1: None,
            bus2: None,
            open: true,
            retained: false,
        },
    )
}

pub fn configured_bus(id: &str, voltage_level_id: &str) -> Resource<ConfiguredBusAttributes> {
    Resource::new(
        id,
        0,
        ConfiguredBusAttributes {
            voltage_level_id: voltage_level_id.to_string(),
            name: Some(format!("{id} name")),
            fictitious: false,
            properties: BTreeMap::new(),
            v: Some(399.0),
            angle: None,
        },
    )
}

// =============================================================================
// Branches
// =============================================================================

pub fn line(id: &str, voltage_level_id1: &str, voltage_level_id2: &str) -> Resource<LineAttributes> {
    Resource::new(
        id,
        0,
        LineAttributes {
            voltage_level_id1: voltage_level_id1.to_string(),
            voltage_level_id2: voltage_level_id2.to_string(),
            name: Some(format!("{id} name")),
            fictitious: false,
            properties: properties(),
            node1: Some(1),
            node2: Some(2),
            bus1: None,
            bus2: None,
            connectable_bus1: None,
            connectable_bus2: None,
            r: 0.5,
            x: 12.25,
            g1: 0.0,
            b1: 0.000_125,
            g2: 0.0,
            b2: 0.000_125,
            p1: Some(100.0),
            q1: None,
            p2: Some(-99.5),
            q2: None,
            position1: position("L1"),
            position2: None,
            current_limits1: current_limits(1000.0),
            current_limits2: current_limits(800.0),
        },
    )
}

pub fn two_windings_transformer(
    id: &str,
    voltage_level_id1: &str,
    voltage_level_id2: &str,
) -> Resource<TwoWindingsTransformerAttributes> {
    Resource::new(
        id,
        0,
        TwoWindingsTransformerAttributes {
            voltage_level_id1: voltage_level_id1.to_string(),
            voltage_level_id2: voltage_level_id2.to_string(),
            name: None,
            fictitious: false,
            properties: BTreeMap::new(),
            node1: Some(5),
            node2: Some(6),
            bus1: None,
            bus2: None,
            connectable_bus1: None,
            connectable_bus2: None,
            r: 0.25,
            x: 48.5,
            g: 0.0,
            b: 0.0,
            rated_u1: 400.0,
            rated_u2: 225.0,
            rated_s: Some(600.0),
            p1: None,
            q1: None,
            p2: None,
            q2: None,
            position1: position("T1"),
            position2: position("T2"),
            ratio_tap_changer: ratio_tap_changer(),
            phase_tap_changer: phase_tap_changer(),
            current_limits1: current_limits(1500.0),
            current_limits2: None,
        },
    )
}

fn leg(rated_u: f64) -> LegAttributes {
    LegAttributes {
        r: 0.5,
        x: 10.0,
        g: 0.0,
        b: 0.0,
        rated_u,
        rated_s: Some(300.0),
        ratio_tap_changer: ratio_tap_changer(),
        phase_tap_changer: None,
        current_limits: current_limits(500.0),
    }
}

pub fn three_windings_transformer(
    id: &str,
    voltage_level_ids: [&str; 3],
) -> Resource<ThreeWindingsTransformerAttributes> {
    Resource::new(
        id,
        0,
        ThreeWindingsTransformerAttributes {
            voltage_level_id1: voltage_level_ids[0].to_string(),
            voltage_level_id2: voltage_level_ids[1].to_string(),
            voltage_level_id3: voltage_level_ids[2].to_string(),
            name: Some(format!("{id} name")),
            fictitious: false,
            properties: BTreeMap::new(),
            node1: Some(20),
            node2: Some(21),
            node3: Some(22),
            bus1: None,
            bus2: None,
            bus3: None,
            rated_u0: 400.0,
            leg1: leg(400.0),
            leg2: leg(225.0),
            leg3: leg(20.0),
            p1: Some(10.0),
            q1: None,
            p2: None,
            q2: None,
            p3: None,
            q3: Some(-1.0),
            position1: None,
            position2: None,
            position3: position("T3"),
        },
    )
}

pub fn hvdc_line(id: &str, station1: &str, station2: &str) -> Resource<HvdcLineAttributes> {
    Resource::new(
        id,
        0,
        HvdcLineAttributes {
            name: Some(format!("{id} name")),
            fictitious: false,
            properties: BTreeMap::new(),
            r: 1.5,
            nominal_v: 320.0,
            active_power_setpoint: 250.0,
            max_p: 1000.0,
            converters_mode: HvdcConvertersMode::SideOneInverterSideTwoRectifier,
            converter_station_id1: station1.to_string(),
            converter_station_id2: station2.to_string(),
            angle_droop: Some(HvdcAngleDroopActivePowerControl {
                p0: 100.0,
                droop: 2.5,
                enabled: true,
            }),
            operator_range: Some(HvdcOperatorActivePowerRange {
                opr_from_cs1_to_cs2: 900.0,
                opr_from_cs2_to_cs1: 850.0,
            }),
        },
    )
}

pub fn dangling_line(id: &str, voltage_level_id: &str) -> Resource<DanglingLineAttributes> {
    Resource::new(
        id,
        0,
        DanglingLineAttributes {
            voltage_level_id: voltage_level_id.to_string(),
            name: None,
            fictitious: false,
            properties: BTreeMap::new(),
            node: Some(30),
            bus: None,
            connectable_bus: None,
            p: None,
            q: None,
            position: position(id),
            p0: 50.0,
            q0: 10.0,
            r: 0.75,
            x: 8.0,
            g: 0.0,
            b: 0.0,
            ucte_xnode_code: Some("XNODE1".to_string()),
            generation: Some(DanglingLineGeneration {
                min_p: 0.0,
                max_p: 100.0,
                target_p: 20.0,
                target_q: 5.0,
                target_v: 400.0,
                voltage_regulation_on: true,
                reactive_limits: curve(),
            }),
            current_limits: current_limits(700.0),
        },
    )
}

// =============================================================================
// Populated Network
// =============================================================================

/// Creates network `N` and one resource of every kind in variant 0.
///
/// Returns the number of equipment rows written.
pub async fn create_one_of_each(db: &Database, uuid: Uuid) -> u64 {
    db.networks().create(&[network(uuid, "N")]).await.unwrap();

    db.substations().create(uuid, &[substation("S1")]).await.unwrap();
    db.voltage_levels()
        .create(
            uuid,
            &[
                voltage_level("VL1", "S1"),
                voltage_level("VL2", "S1"),
                voltage_level("VL3", "S1"),
            ],
        )
        .await
        .unwrap();
    db.generators().create(uuid, &[generator("G1", "VL1")]).await.unwrap();
    db.batteries().create(uuid, &[battery("B1", "VL1")]).await.unwrap();
    db.loads().create(uuid, &[load("LD1", "VL1")]).await.unwrap();
    db.shunt_compensators()
        .create(uuid, &[shunt_compensator("SH1", "VL1")])
        .await
        .unwrap();
    db.vsc_converter_stations()
        .create(uuid, &[vsc_converter_station("VSC1", "VL1")])
        .await
        .unwrap();
    db.lcc_converter_stations()
        .create(uuid, &[lcc_converter_station("LCC1", "VL2")])
        .await
        .unwrap();
    db.static_var_compensators()
        .create(uuid, &[static_var_compensator("SVC1", "VL1")])
        .await
        .unwrap();
    db.busbar_sections()
        .create(uuid, &[busbar_section("BBS1", "VL1")])
        .await
        .unwrap();
    db.switches().create(uuid, &[switch("SW1", "VL1")]).await.unwrap();
    db.two_windings_transformers()
        .create(uuid, &[two_windings_transformer("T2W1", "VL1", "VL2")])
        .await
        .unwrap();
    db.three_windings_transformers()
        .create(
            uuid,
            &[three_windings_transformer("T3W1", ["VL1", "VL2", "VL3"])],
        )
        .await
        .unwrap();
    db.lines().create(uuid, &[line("L1", "VL1", "VL2")]).await.unwrap();
    db.hvdc_lines()
        .create(uuid, &[hvdc_line("HVDC1", "VSC1", "LCC1")])
        .await
        .unwrap();
    db.dangling_lines()
        .create(uuid, &[dangling_line("DL1", "VL3")])
        .await
        .unwrap();
    db.configured_buses()
        .create(uuid, &[configured_bus("CB1", "VL2")])
        .await
        .unwrap();

    19
}
