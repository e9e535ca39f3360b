//! Repository tests against an in-memory database.

use netstore_core::attributes::*;
use netstore_core::{Identifiable, Resource, ResourceType, VariantInfos};
use uuid::Uuid;

use crate::error::DbError;
use crate::fixtures::*;

/// Evaluates `$body` once per equipment repository, bound to `$repo`.
macro_rules! each_repository {
    ($db:expr, $repo:ident => $body:expr) => {{
        let $repo = $db.substations();
        $body;
        let $repo = $db.voltage_levels();
        $body;
        let $repo = $db.generators();
        $body;
        let $repo = $db.batteries();
        $body;
        let $repo = $db.loads();
        $body;
        let $repo = $db.shunt_compensators();
        $body;
        let $repo = $db.vsc_converter_stations();
        $body;
        let $repo = $db.lcc_converter_stations();
        $body;
        let $repo = $db.static_var_compensators();
        $body;
        let $repo = $db.busbar_sections();
        $body;
        let $repo = $db.switches();
        $body;
        let $repo = $db.two_windings_transformers();
        $body;
        let $repo = $db.three_windings_transformers();
        $body;
        let $repo = $db.lines();
        $body;
        let $repo = $db.hvdc_lines();
        $body;
        let $repo = $db.dangling_lines();
        $body;
        let $repo = $db.configured_buses();
        $body;
    }};
}

fn sorted<A>(mut resources: Vec<Resource<A>>) -> Vec<Resource<A>> {
    resources.sort_by(|a, b| a.id.cmp(&b.id));
    resources
}

fn ids<A>(resources: &[Resource<A>]) -> Vec<&str> {
    let mut ids: Vec<&str> = resources.iter().map(|r| r.id.as_str()).collect();
    ids.sort_unstable();
    ids
}

// =============================================================================
// Round Trips
// =============================================================================

#[tokio::test]
async fn test_every_kind_round_trips() {
    let db = database().await;
    let uuid = Uuid::new_v4();
    create_one_of_each(&db, uuid).await;

    macro_rules! assert_round_trip {
        ($($repo:ident => $fixture:expr),+ $(,)?) => {
            $(
                let expected = $fixture;
                let stored = db.$repo().get_one(uuid, 0, &expected.id).await.unwrap();
                assert_eq!(stored.as_ref(), Some(&expected), stringify!($repo));
            )+
        };
    }

    assert_round_trip!(
        substations => substation("S1"),
        voltage_levels => voltage_level("VL2", "S1"),
        generators => generator("G1", "VL1"),
        batteries => battery("B1", "VL1"),
        loads => load("LD1", "VL1"),
        shunt_compensators => shunt_compensator("SH1", "VL1"),
        vsc_converter_stations => vsc_converter_station("VSC1", "VL1"),
        lcc_converter_stations => lcc_converter_station("LCC1", "VL2"),
        static_var_compensators => static_var_compensator("SVC1", "VL1"),
        busbar_sections => busbar_section("BBS1", "VL1"),
        switches => switch("SW1", "VL1"),
        two_windings_transformers => two_windings_transformer("T2W1", "VL1", "VL2"),
        three_windings_transformers => three_windings_transformer("T3W1", ["VL1", "VL2", "VL3"]),
        lines => line("L1", "VL1", "VL2"),
        hvdc_lines => hvdc_line("HVDC1", "VSC1", "LCC1"),
        dangling_lines => dangling_line("DL1", "VL3"),
        configured_buses => configured_bus("CB1", "VL2"),
    );
}

#[tokio::test]
async fn test_network_round_trip() {
    let db = database().await;
    let uuid = Uuid::new_v4();
    db.networks().create(&[network(uuid, "N")]).await.unwrap();

    let stored = db.networks().get(uuid, 0).await.unwrap().unwrap();

    let mut expected = network(uuid, "N");
    expected.attributes.variant_id = "InitialState".to_string();
    assert_eq!(stored, expected);

    assert!(db.networks().get(uuid, 1).await.unwrap().is_none());
    assert!(db.networks().get(Uuid::new_v4(), 0).await.unwrap().is_none());
}

#[tokio::test]
async fn test_default_attributes_round_trip() {
    let db = database().await;
    let uuid = Uuid::new_v4();
    let bare = Resource::new(
        "G0",
        0,
        GeneratorAttributes {
            voltage_level_id: "VL1".to_string(),
            ..Default::default()
        },
    );

    db.generators().create(uuid, &[bare.clone()]).await.unwrap();

    assert_eq!(db.generators().get_one(uuid, 0, "G0").await.unwrap(), Some(bare));
}

#[tokio::test]
async fn test_missing_resource_is_none() {
    let db = database().await;
    let uuid = Uuid::new_v4();

    assert!(db.loads().get_one(uuid, 0, "nope").await.unwrap().is_none());
    assert!(db.loads().get_all(uuid, 0).await.unwrap().is_empty());
}

/// Generator with NaN and infinities in scalar and nested float fields.
fn unset_generator() -> Resource<GeneratorAttributes> {
    let mut generator = generator("G1", "VL1");
    generator.attributes.target_q = f64::NAN;
    generator.attributes.max_p = f64::INFINITY;
    generator.attributes.target_v = Some(f64::NAN);
    generator.attributes.p = Some(f64::NEG_INFINITY);
    generator.attributes.reactive_limits = Some(ReactiveLimits::MinMax {
        min_q: f64::NAN,
        max_q: f64::INFINITY,
    });
    generator
}

fn assert_unset_generator(stored: &Resource<GeneratorAttributes>) {
    let attributes = &stored.attributes;
    assert!(attributes.target_q.is_nan());
    assert_eq!(attributes.max_p, f64::INFINITY);
    assert!(attributes.target_v.is_some_and(f64::is_nan));
    assert_eq!(attributes.p, Some(f64::NEG_INFINITY));
    match attributes.reactive_limits {
        Some(ReactiveLimits::MinMax { min_q, max_q }) => {
            assert!(min_q.is_nan());
            assert_eq!(max_q, f64::INFINITY);
        }
        ref other => panic!("unexpected reactive limits {other:?}"),
    }
    assert_eq!(attributes.target_p, 400.0);
}

#[tokio::test]
async fn test_non_finite_floats_round_trip() {
    let db = database().await;
    let uuid = Uuid::new_v4();
    db.networks().create(&[network(uuid, "N")]).await.unwrap();
    db.generators().create(uuid, &[unset_generator()]).await.unwrap();

    let stored = db.generators().get_one(uuid, 0, "G1").await.unwrap().unwrap();
    assert_unset_generator(&stored);

    let all = db.generators().get_all(uuid, 0).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_unset_generator(&all[0]);

    let contained = db.generators().get_by_container(uuid, 0, "VL1").await.unwrap();
    assert_unset_generator(&contained[0]);

    match db.networks().get_identifiable(uuid, 0, "G1").await.unwrap() {
        Some(Identifiable::Generator(found)) => assert_unset_generator(&found),
        other => panic!("unexpected identifiable {other:?}"),
    }

    db.networks().clone_variant(uuid, 0, 1, None).await.unwrap();
    let forked = db.generators().get_one(uuid, 1, "G1").await.unwrap().unwrap();
    assert_unset_generator(&forked);
}

#[tokio::test]
async fn test_non_finite_floats_survive_update() {
    let db = database().await;
    let uuid = Uuid::new_v4();
    let mut line = line("L1", "VL1", "VL2");
    db.lines().create(uuid, &[line.clone()]).await.unwrap();

    line.attributes.r = f64::NAN;
    line.attributes.current_limits1 = Some(CurrentLimits {
        permanent_limit: f64::INFINITY,
        temporary_limits: vec![TemporaryLimit {
            name: "IT5".to_string(),
            value: Some(f64::NAN),
            acceptable_duration: Some(300),
            fictitious: false,
        }],
    });
    assert_eq!(db.lines().update(uuid, &[line]).await.unwrap(), 1);

    let stored = db.lines().get_one(uuid, 0, "L1").await.unwrap().unwrap();
    assert!(stored.attributes.r.is_nan());
    let limits = stored.attributes.current_limits1.unwrap();
    assert_eq!(limits.permanent_limit, f64::INFINITY);
    assert!(limits.temporary_limits[0].value.is_some_and(f64::is_nan));
    assert_eq!(limits.temporary_limits[0].acceptable_duration, Some(300));
}

// =============================================================================
// Batched Writes
// =============================================================================

#[tokio::test]
async fn test_batch_boundaries() {
    let db = database().await;

    for count in [1000, 1001, 1999] {
        let uuid = Uuid::new_v4();
        let generators: Vec<_> = (0..count)
            .map(|i| generator(&format!("G{i}"), "VL1"))
            .collect();

        db.generators().create(uuid, &generators).await.unwrap();

        let stored = db.generators().get_all(uuid, 0).await.unwrap();
        assert_eq!(stored.len(), count, "count {count}");
        assert_eq!(sorted(stored), sorted(generators));
    }
}

#[tokio::test]
async fn test_small_configured_batch_size() {
    let db = database_with_batch_size(3).await;
    let uuid = Uuid::new_v4();
    let loads: Vec<_> = (0..10).map(|i| load(&format!("LD{i}"), "VL1")).collect();

    db.loads().create(uuid, &loads).await.unwrap();
    assert_eq!(db.loads().get_all(uuid, 0).await.unwrap().len(), 10);

    let updated: Vec<_> = loads
        .into_iter()
        .map(|mut l| {
            l.attributes.p0 = 1.5;
            l
        })
        .collect();
    assert_eq!(db.loads().update(uuid, &updated).await.unwrap(), 10);

    let stored = db.loads().get_all(uuid, 0).await.unwrap();
    assert!(stored.iter().all(|l| l.attributes.p0 == 1.5));
}

#[tokio::test]
async fn test_failed_batch_keeps_rows_already_written() {
    let db = database_with_batch_size(3).await;
    let uuid = Uuid::new_v4();
    let mut loads: Vec<_> = (0..4).map(|i| load(&format!("LD{i}"), "VL1")).collect();
    loads.push(load("LD0", "VL2"));

    let err = db.loads().create(uuid, &loads).await.unwrap_err();
    assert!(matches!(err, DbError::UniqueViolation { .. }));

    // First batch and the head of the second are stored.
    let stored = db.loads().get_all(uuid, 0).await.unwrap();
    assert_eq!(ids(&stored), vec!["LD0", "LD1", "LD2", "LD3"]);
    assert_eq!(stored.iter().find(|l| l.id == "LD0").unwrap().attributes.voltage_level_id, "VL1");
}

#[tokio::test]
async fn test_create_rejects_invalid_input_before_writing() {
    let db = database().await;
    let uuid = Uuid::new_v4();
    let resources = vec![load("LD1", "VL1"), load("", "VL1")];

    let err = db.loads().create(uuid, &resources).await.unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(db.loads().get_all(uuid, 0).await.unwrap().is_empty());

    let negative = vec![load("LD1", "VL1").with_variant(-1)];
    assert!(db.loads().create(uuid, &negative).await.unwrap_err().is_invalid_argument());
}

#[tokio::test]
async fn test_duplicate_create_is_unique_violation() {
    let db = database().await;
    let uuid = Uuid::new_v4();
    db.loads().create(uuid, &[load("LD1", "VL1")]).await.unwrap();

    let err = db.loads().create(uuid, &[load("LD1", "VL2")]).await.unwrap_err();
    assert!(matches!(err, DbError::UniqueViolation { .. }));

    // Same id in another network or variant is fine.
    db.loads().create(Uuid::new_v4(), &[load("LD1", "VL1")]).await.unwrap();
    db.loads()
        .create(uuid, &[load("LD1", "VL1").with_variant(1)])
        .await
        .unwrap();
}

// =============================================================================
// Containers
// =============================================================================

#[tokio::test]
async fn test_substation_voltage_level_generator_scenario() {
    let db = database().await;
    let uuid = Uuid::new_v4();
    db.networks().create(&[network(uuid, "N")]).await.unwrap();
    db.substations().create(uuid, &[substation("S1")]).await.unwrap();
    db.voltage_levels()
        .create(uuid, &[voltage_level("VL1", "S1")])
        .await
        .unwrap();
    db.generators().create(uuid, &[generator("G1", "VL1")]).await.unwrap();

    let levels = db.voltage_levels().get_by_container(uuid, 0, "S1").await.unwrap();
    assert_eq!(ids(&levels), vec!["VL1"]);

    let generators = db.generators().get_by_container(uuid, 0, "VL1").await.unwrap();
    assert_eq!(generators, vec![generator("G1", "VL1")]);

    assert!(db.generators().get_by_container(uuid, 0, "VL2").await.unwrap().is_empty());
    assert!(db.generators().get_by_container(uuid, 1, "VL1").await.unwrap().is_empty());

    db.networks().clone_variant(uuid, 0, 1, None).await.unwrap();
    let mut forked = generator("G1", "VL1").with_variant(1);
    forked.attributes.target_p = 123.5;
    assert_eq!(db.generators().update(uuid, &[forked]).await.unwrap(), 1);

    let initial = db.generators().get_one(uuid, 0, "G1").await.unwrap().unwrap();
    let study = db.generators().get_one(uuid, 1, "G1").await.unwrap().unwrap();
    assert_eq!(initial.attributes.target_p, 400.0);
    assert_eq!(study.attributes.target_p, 123.5);
}

#[tokio::test]
async fn test_branches_match_either_side_once() {
    let db = database().await;
    let uuid = Uuid::new_v4();
    db.lines()
        .create(
            uuid,
            &[
                line("L1", "VL1", "VL2"),
                line("L2", "VL2", "VL1"),
                line("L3", "VL1", "VL1"),
                line("L4", "VL2", "VL3"),
            ],
        )
        .await
        .unwrap();
    db.two_windings_transformers()
        .create(
            uuid,
            &[
                two_windings_transformer("T1", "VL1", "VL1"),
                two_windings_transformer("T2", "VL3", "VL1"),
            ],
        )
        .await
        .unwrap();
    db.three_windings_transformers()
        .create(
            uuid,
            &[three_windings_transformer("T3", ["VL2", "VL1", "VL1"])],
        )
        .await
        .unwrap();

    let lines = db.lines().get_by_container(uuid, 0, "VL1").await.unwrap();
    assert_eq!(ids(&lines), vec!["L1", "L2", "L3"]);

    let transformers = db
        .two_windings_transformers()
        .get_by_container(uuid, 0, "VL1")
        .await
        .unwrap();
    assert_eq!(ids(&transformers), vec!["T1", "T2"]);

    let three = db
        .three_windings_transformers()
        .get_by_container(uuid, 0, "VL1")
        .await
        .unwrap();
    assert_eq!(ids(&three), vec!["T3"]);
}

#[tokio::test]
async fn test_container_query_on_uncontained_kind_is_internal() {
    let db = database().await;
    let uuid = Uuid::new_v4();

    let err = db.substations().get_by_container(uuid, 0, "X").await.unwrap_err();
    assert!(matches!(err, DbError::Internal(_)));

    let err = db.hvdc_lines().get_by_container(uuid, 0, "X").await.unwrap_err();
    assert!(matches!(err, DbError::Internal(_)));
}

// =============================================================================
// Update / Delete
// =============================================================================

#[tokio::test]
async fn test_update_replaces_attributes() {
    let db = database().await;
    let uuid = Uuid::new_v4();
    db.generators().create(uuid, &[generator("G1", "VL1")]).await.unwrap();

    let mut changed = generator("G1", "VL1");
    changed.attributes.target_p = 250.0;
    changed.attributes.reactive_limits = None;
    changed.attributes.properties.clear();

    assert_eq!(db.generators().update(uuid, &[changed.clone()]).await.unwrap(), 1);
    assert_eq!(
        db.generators().get_one(uuid, 0, "G1").await.unwrap(),
        Some(changed)
    );
}

#[tokio::test]
async fn test_update_matches_stored_container() {
    let db = database().await;
    let uuid = Uuid::new_v4();
    db.generators().create(uuid, &[generator("G1", "VL1")]).await.unwrap();

    let mut moved = generator("G1", "VL2");
    moved.attributes.target_p = 1.0;

    assert_eq!(db.generators().update(uuid, &[moved]).await.unwrap(), 0);
    assert_eq!(
        db.generators().get_one(uuid, 0, "G1").await.unwrap(),
        Some(generator("G1", "VL1"))
    );
}

#[tokio::test]
async fn test_update_of_missing_resource_is_skipped() {
    let db = database().await;
    let uuid = Uuid::new_v4();
    db.loads().create(uuid, &[load("LD1", "VL1")]).await.unwrap();

    let updated = db
        .loads()
        .update(uuid, &[load("LD1", "VL1"), load("LD2", "VL1")])
        .await
        .unwrap();
    assert_eq!(updated, 1);
    assert!(db.loads().get_one(uuid, 0, "LD2").await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_without_key_column() {
    let db = database().await;
    let uuid = Uuid::new_v4();
    db.hvdc_lines()
        .create(uuid, &[hvdc_line("HVDC1", "VSC1", "LCC1")])
        .await
        .unwrap();

    let mut changed = hvdc_line("HVDC1", "VSC1", "VSC2");
    changed.attributes.angle_droop = None;

    assert_eq!(db.hvdc_lines().update(uuid, &[changed.clone()]).await.unwrap(), 1);
    assert_eq!(
        db.hvdc_lines().get_one(uuid, 0, "HVDC1").await.unwrap(),
        Some(changed)
    );
}

#[tokio::test]
async fn test_delete_one() {
    let db = database().await;
    let uuid = Uuid::new_v4();
    db.switches()
        .create(uuid, &[switch("SW1", "VL1"), switch("SW2", "VL1")])
        .await
        .unwrap();

    assert_eq!(db.switches().delete(uuid, 0, "SW1").await.unwrap(), 1);
    assert_eq!(db.switches().delete(uuid, 0, "SW1").await.unwrap(), 0);

    let remaining = db.switches().get_all(uuid, 0).await.unwrap();
    assert_eq!(ids(&remaining), vec!["SW2"]);
}

// =============================================================================
// Variants
// =============================================================================

#[tokio::test]
async fn test_clone_variant_copies_every_table() {
    let db = database().await;
    let uuid = Uuid::new_v4();
    let equipment = create_one_of_each(&db, uuid).await;

    let copied = db.networks().clone_variant(uuid, 0, 1, Some("study")).await.unwrap();
    assert_eq!(copied, equipment + 1);

    each_repository!(db, repo => {
        let source: Vec<_> = repo
            .get_all(uuid, 0)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.with_variant(1))
            .collect();
        let cloned = repo.get_all(uuid, 1).await.unwrap();
        assert!(!source.is_empty());
        assert_eq!(sorted(cloned), sorted(source));
    });

    let mut expected = db.networks().get(uuid, 0).await.unwrap().unwrap();
    expected.variant_num = 1;
    expected.attributes.variant_id = "study".to_string();
    assert_eq!(db.networks().get(uuid, 1).await.unwrap(), Some(expected));
}

#[tokio::test]
async fn test_clone_variant_generates_variant_id() {
    let db = database().await;
    let uuid = Uuid::new_v4();
    db.networks().create(&[network(uuid, "N")]).await.unwrap();

    db.networks().clone_variant(uuid, 0, 3, None).await.unwrap();

    let variants = db.networks().list_variants(uuid).await.unwrap();
    assert_eq!(variants.len(), 2);
    assert_eq!(variants[0], VariantInfos { id: "InitialState".to_string(), num: 0 });
    assert_eq!(variants[1].num, 3);
    assert!(Uuid::parse_str(&variants[1].id).is_ok());
}

#[tokio::test]
async fn test_clone_variant_rejections() {
    let db = database().await;
    let uuid = Uuid::new_v4();
    db.networks().create(&[network(uuid, "N")]).await.unwrap();

    let err = db.networks().clone_variant(uuid, 0, 0, None).await.unwrap_err();
    assert!(err.is_invalid_argument());

    let err = db.networks().clone_variant(uuid, 0, -2, None).await.unwrap_err();
    assert!(err.is_invalid_argument());

    db.networks().clone_variant(uuid, 0, 1, Some("a")).await.unwrap();
    let err = db.networks().clone_variant(uuid, 0, 1, Some("b")).await.unwrap_err();
    assert!(matches!(err, DbError::UniqueViolation { .. }));

    let err = db.networks().clone_variant(uuid, 0, 2, Some("a")).await.unwrap_err();
    assert!(matches!(err, DbError::UniqueViolation { .. }));
}

#[tokio::test]
async fn test_clone_variant_stops_at_failing_table() {
    let db = database().await;
    let uuid = Uuid::new_v4();
    create_one_of_each(&db, uuid).await;
    // A generator already in the target variant makes the generator copy fail.
    db.generators()
        .create(uuid, &[generator("G1", "VL1").with_variant(1)])
        .await
        .unwrap();

    let err = db.networks().clone_variant(uuid, 0, 1, Some("study")).await.unwrap_err();
    assert!(matches!(err, DbError::UniqueViolation { .. }));

    // Tables before the failing one stay copied; later ones are untouched.
    let variants = db.networks().list_variants(uuid).await.unwrap();
    assert_eq!(variants.len(), 2);
    assert_eq!(db.substations().get_all(uuid, 1).await.unwrap().len(), 1);
    assert_eq!(db.voltage_levels().get_all(uuid, 1).await.unwrap().len(), 3);
    assert!(db.configured_buses().get_all(uuid, 1).await.unwrap().is_empty());

    db.networks().delete_variant(uuid, 1).await.unwrap();
    assert_eq!(db.networks().clone_variant(uuid, 0, 1, None).await.unwrap(), 20);
}

#[tokio::test]
async fn test_variants_are_isolated() {
    let db = database().await;
    let uuid = Uuid::new_v4();
    create_one_of_each(&db, uuid).await;
    db.networks().clone_variant(uuid, 0, 1, None).await.unwrap();

    let mut changed = generator("G1", "VL1").with_variant(1);
    changed.attributes.target_p = 12.0;
    assert_eq!(db.generators().update(uuid, &[changed.clone()]).await.unwrap(), 1);
    assert_eq!(db.loads().delete(uuid, 1, "LD1").await.unwrap(), 1);
    db.batteries()
        .create(uuid, &[battery("B2", "VL1").with_variant(1)])
        .await
        .unwrap();

    assert_eq!(
        db.generators().get_one(uuid, 0, "G1").await.unwrap(),
        Some(generator("G1", "VL1"))
    );
    assert_eq!(
        db.generators().get_one(uuid, 1, "G1").await.unwrap(),
        Some(changed)
    );
    assert!(db.loads().get_one(uuid, 0, "LD1").await.unwrap().is_some());
    assert!(db.batteries().get_one(uuid, 0, "B2").await.unwrap().is_none());
}

#[tokio::test]
async fn test_initial_variant_cannot_be_deleted() {
    let db = database().await;
    let uuid = Uuid::new_v4();
    create_one_of_each(&db, uuid).await;

    let err = db.networks().delete_variant(uuid, 0).await.unwrap_err();
    assert!(err.is_invalid_argument());

    assert!(db.networks().get(uuid, 0).await.unwrap().is_some());
    each_repository!(db, repo => {
        assert!(!repo.get_all(uuid, 0).await.unwrap().is_empty());
    });
}

#[tokio::test]
async fn test_delete_variant_removes_only_that_variant() {
    let db = database().await;
    let uuid = Uuid::new_v4();
    let equipment = create_one_of_each(&db, uuid).await;
    db.networks().clone_variant(uuid, 0, 1, None).await.unwrap();

    assert_eq!(db.networks().delete_variant(uuid, 1).await.unwrap(), equipment + 1);

    each_repository!(db, repo => {
        assert!(repo.get_all(uuid, 1).await.unwrap().is_empty());
        assert!(!repo.get_all(uuid, 0).await.unwrap().is_empty());
    });
    assert_eq!(
        db.networks().list_variants(uuid).await.unwrap(),
        vec![VariantInfos { id: "InitialState".to_string(), num: 0 }]
    );

    // The number can be reused once freed.
    db.networks().clone_variant(uuid, 0, 1, None).await.unwrap();
}

// =============================================================================
// Networks
// =============================================================================

#[tokio::test]
async fn test_list_infos() {
    let db = database().await;
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    db.networks().create(&[network(b, "B")]).await.unwrap();
    db.networks().create(&[network(a, "A")]).await.unwrap();
    db.networks().clone_variant(a, 0, 1, None).await.unwrap();

    let infos = db.networks().list_infos().await.unwrap();
    let listed: Vec<_> = infos.iter().map(|i| (i.uuid, i.id.as_str())).collect();
    assert_eq!(listed, vec![(a, "A"), (b, "B")]);
}

#[tokio::test]
async fn test_network_update_keeps_variant_id_when_empty() {
    let db = database().await;
    let uuid = Uuid::new_v4();
    db.networks().create(&[network(uuid, "N")]).await.unwrap();
    db.networks().clone_variant(uuid, 0, 1, Some("study")).await.unwrap();

    let mut changed = network(uuid, "N").with_variant(1);
    changed.attributes.fictitious = true;
    changed.attributes.forecast_distance = 30;
    assert!(changed.attributes.variant_id.is_empty());

    assert_eq!(db.networks().update(&[changed]).await.unwrap(), 1);

    let stored = db.networks().get(uuid, 1).await.unwrap().unwrap();
    assert_eq!(stored.attributes.variant_id, "study");
    assert!(stored.attributes.fictitious);
    assert_eq!(stored.attributes.forecast_distance, 30);

    let mut renamed = stored.clone();
    renamed.id = "N-study".to_string();
    renamed.attributes.variant_id = "study-2".to_string();
    assert_eq!(db.networks().update(&[renamed.clone()]).await.unwrap(), 1);
    assert_eq!(db.networks().get(uuid, 1).await.unwrap(), Some(renamed));

    // Variant 0 untouched.
    assert_eq!(db.networks().get(uuid, 0).await.unwrap().unwrap().id, "N");
}

#[tokio::test]
async fn test_delete_network_removes_every_row() {
    let db = database().await;
    let (uuid, other) = (Uuid::new_v4(), Uuid::new_v4());
    let equipment = create_one_of_each(&db, uuid).await;
    create_one_of_each(&db, other).await;
    db.networks().clone_variant(uuid, 0, 1, None).await.unwrap();

    let deleted = db.networks().delete(uuid).await.unwrap();
    assert_eq!(deleted, 2 * (equipment + 1));

    assert!(db.networks().list_variants(uuid).await.unwrap().is_empty());
    each_repository!(db, repo => {
        assert!(repo.get_all(uuid, 0).await.unwrap().is_empty());
        assert!(repo.get_all(uuid, 1).await.unwrap().is_empty());
        assert!(!repo.get_all(other, 0).await.unwrap().is_empty());
    });

    let infos = db.networks().list_infos().await.unwrap();
    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0].uuid, other);

    assert_eq!(db.networks().delete(uuid).await.unwrap(), 0);
}

#[tokio::test]
async fn test_clone_network() {
    let db = database().await;
    let (source, target) = (Uuid::new_v4(), Uuid::new_v4());
    let equipment = create_one_of_each(&db, source).await;
    db.networks().clone_variant(source, 0, 1, Some("study")).await.unwrap();
    db.networks().clone_variant(source, 0, 2, Some("other")).await.unwrap();

    let copied = db
        .networks()
        .clone_network(
            target,
            source,
            &["InitialState".to_string(), "study".to_string()],
        )
        .await
        .unwrap();
    assert_eq!(copied, 2 * (equipment + 1));

    assert_eq!(
        db.networks().list_variants(target).await.unwrap(),
        vec![
            VariantInfos { id: "InitialState".to_string(), num: 0 },
            VariantInfos { id: "study".to_string(), num: 1 },
        ]
    );

    each_repository!(db, repo => {
        for variant in [0, 1] {
            let cloned = repo.get_all(target, variant).await.unwrap();
            let original = repo.get_all(source, variant).await.unwrap();
            assert_eq!(sorted(cloned), sorted(original));
        }
        assert!(repo.get_all(target, 2).await.unwrap().is_empty());
    });

    let network = db.networks().get(target, 0).await.unwrap().unwrap();
    assert_eq!(network.attributes.uuid, target);
    assert_eq!(network.id, "N");
}

#[tokio::test]
async fn test_clone_network_rejections() {
    let db = database().await;
    let (source, target) = (Uuid::new_v4(), Uuid::new_v4());
    create_one_of_each(&db, source).await;

    let err = db
        .networks()
        .clone_network(target, source, &["InitialState".to_string(), "nope".to_string()])
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(db.networks().list_variants(target).await.unwrap().is_empty());
    assert!(db.generators().get_all(target, 0).await.unwrap().is_empty());

    let err = db
        .networks()
        .clone_network(source, source, &["InitialState".to_string()])
        .await
        .unwrap_err();
    assert!(err.is_invalid_argument());

    let err = db.networks().clone_network(target, source, &[]).await.unwrap_err();
    assert!(err.is_invalid_argument());
}

// =============================================================================
// Identifiables
// =============================================================================

#[tokio::test]
async fn test_get_identifiable() {
    let db = database().await;
    let uuid = Uuid::new_v4();
    create_one_of_each(&db, uuid).await;

    let found = db.networks().get_identifiable(uuid, 0, "G1").await.unwrap();
    assert_eq!(found, Some(Identifiable::Generator(generator("G1", "VL1"))));

    let found = db
        .networks()
        .get_identifiable(uuid, 0, "T3W1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.resource_type(), ResourceType::ThreeWindingsTransformer);
    assert_eq!(found.id(), "T3W1");

    let found = db.networks().get_identifiable(uuid, 0, "CB1").await.unwrap().unwrap();
    assert_eq!(found.resource_type(), ResourceType::ConfiguredBus);

    assert!(db.networks().get_identifiable(uuid, 0, "nope").await.unwrap().is_none());
    assert!(db.networks().get_identifiable(uuid, 1, "G1").await.unwrap().is_none());
}
