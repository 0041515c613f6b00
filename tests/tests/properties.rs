//! Properties of condition building and evaluation over random campuses.

use chrono::NaiveDate;
use proptest::prelude::*;
use warden_condition::{and, ConditionComposer, FilterConditionBuilder, PermissionConditionBuilder};
use warden_core::{capabilities, fields, Caller, FilterSpec, Predicate, RecordId, Value};
use warden_registry::campus::{campus_registry, BUILDING, DORMITORY, STUDENT};
use warden_registry::Registry;
use warden_store::Store;

/// Shape of a generated campus: per dormitory its building index, per
/// student (dormitory index, leaved, enroll year).
#[derive(Debug, Clone)]
struct Layout {
    buildings: usize,
    dormitories: Vec<usize>,
    students: Vec<(Option<usize>, bool, i32)>,
}

fn layout() -> impl Strategy<Value = Layout> {
    (1usize..4)
        .prop_flat_map(|buildings| {
            (Just(buildings), prop::collection::vec(0..buildings, 0..5))
        })
        .prop_flat_map(|(buildings, dormitories)| {
            let dorm_count = dormitories.len();
            let dorm = if dorm_count == 0 {
                Just(None).boxed()
            } else {
                prop::option::of(0..dorm_count).boxed()
            };
            (
                Just(buildings),
                Just(dormitories),
                prop::collection::vec((dorm, any::<bool>(), 2015i32..2024), 0..8),
            )
        })
        .prop_map(|(buildings, dormitories, students)| Layout {
            buildings,
            dormitories,
            students,
        })
}

struct World {
    registry: Registry,
    store: Store,
    students: Vec<RecordId>,
}

fn build(layout: &Layout) -> World {
    let registry = campus_registry().unwrap();
    let mut store = Store::new();
    let building_type = registry.get_type_id(BUILDING).unwrap();
    let dormitory_type = registry.get_type_id(DORMITORY).unwrap();
    let student_type = registry.get_type_id(STUDENT).unwrap();

    let buildings: Vec<RecordId> = (0..layout.buildings)
        .map(|i| {
            store
                .create_record(building_type, fields! { "name" => format!("B{}", i) })
                .unwrap()
        })
        .collect();
    let dormitories: Vec<RecordId> = layout
        .dormitories
        .iter()
        .enumerate()
        .map(|(i, building)| {
            store
                .create_record(
                    dormitory_type,
                    fields! {
                        "number" => format!("{}", 100 + i),
                        "building" => buildings[*building],
                    },
                )
                .unwrap()
        })
        .collect();
    let students = layout
        .students
        .iter()
        .enumerate()
        .map(|(i, (dorm, leaved, year))| {
            let dormitory: Value = dorm.map(|d| dormitories[d]).into();
            store
                .create_record(
                    student_type,
                    fields! {
                        "real_name" => format!("S{}", i),
                        "leaved" => *leaved,
                        "enroll_date" => NaiveDate::from_ymd_opt(*year, 9, 1).unwrap(),
                        "dormitory" => dormitory,
                    },
                )
                .unwrap()
        })
        .collect();

    World {
        registry,
        store,
        students,
    }
}

fn caller_for(world: &World, pick: Option<usize>, names: &[&str]) -> Caller {
    let mut caller = Caller::anonymous();
    if let Some(i) = pick.filter(|_| !world.students.is_empty()) {
        caller = caller.with_identity(world.students[i % world.students.len()]);
    }
    caller.capabilities = capabilities(names.iter().copied());
    caller
}

fn student_filter(leaved: Option<bool>, from_year: Option<i32>) -> FilterSpec {
    let mut filter = FilterSpec::new();
    if let Some(leaved) = leaved {
        filter.insert("leaved".into(), Value::Bool(leaved));
    }
    if let Some(year) = from_year {
        filter.insert(
            "enroll_date".into(),
            Value::List(vec![
                Value::Date(NaiveDate::from_ymd_opt(year, 1, 1).unwrap()),
                Value::Null,
            ]),
        );
    }
    filter
}

const CAPABILITY_SUBSETS: [&[&str]; 4] = [&[], &["Self"], &["Management"], &["Management", "Self"]];

proptest! {
    #[test]
    fn select_agrees_with_row_check(
        layout in layout(),
        pick in prop::option::of(0usize..8),
        caps in 0usize..4,
        leaved in prop::option::of(any::<bool>()),
        from_year in prop::option::of(2015i32..2024),
    ) {
        let world = build(&layout);
        let caller = caller_for(&world, pick, CAPABILITY_SUBSETS[caps]);
        let composer = ConditionComposer::new(&world.registry, &world.store);

        for type_name in [STUDENT, DORMITORY, BUILDING] {
            let type_id = world.registry.get_type_id(type_name).unwrap();
            let permission = PermissionConditionBuilder::new(&world.registry)
                .build(&capabilities(["Management", "Self"]), type_id, &caller);
            let predicate = if type_name == STUDENT {
                let filter = FilterConditionBuilder::new(&world.registry)
                    .build(type_id, &student_filter(leaved, from_year))
                    .unwrap();
                and(filter, permission)
            } else {
                permission
            };

            let selected = composer.select(type_id, &predicate).unwrap();
            for record in world.store.records_by_type(type_id) {
                let satisfied = composer.satisfies(record, &predicate).unwrap();
                prop_assert_eq!(satisfied, selected.contains(&record.id));
            }
        }
    }

    #[test]
    fn more_capabilities_never_narrow_visibility(
        layout in layout(),
        pick in prop::option::of(0usize..8),
        smaller in 0usize..4,
        extra in 0usize..4,
    ) {
        let world = build(&layout);
        let narrow: Vec<&str> = CAPABILITY_SUBSETS[smaller].to_vec();
        let mut wide = narrow.clone();
        wide.extend_from_slice(CAPABILITY_SUBSETS[extra]);
        let narrow_caller = caller_for(&world, pick, &narrow);
        let wide_caller = caller_for(&world, pick, &wide);

        let composer = ConditionComposer::new(&world.registry, &world.store);
        let builder = PermissionConditionBuilder::new(&world.registry);
        let allowed = capabilities(["Management", "Self"]);
        for type_name in [STUDENT, DORMITORY, BUILDING] {
            let type_id = world.registry.get_type_id(type_name).unwrap();
            let narrow_rows = composer
                .select(type_id, &builder.build(&allowed, type_id, &narrow_caller))
                .unwrap();
            let wide_rows = composer
                .select(type_id, &builder.build(&allowed, type_id, &wide_caller))
                .unwrap();
            prop_assert!(narrow_rows.iter().all(|id| wide_rows.contains(id)));
        }
    }

    #[test]
    fn wider_requested_set_never_narrows_visibility(
        layout in layout(),
        pick in prop::option::of(0usize..8),
        held in 0usize..4,
        smaller in 0usize..4,
        extra in 0usize..4,
    ) {
        let world = build(&layout);
        let caller = caller_for(&world, pick, CAPABILITY_SUBSETS[held]);
        let narrow = capabilities(CAPABILITY_SUBSETS[smaller].iter().copied());
        let wide = capabilities(
            CAPABILITY_SUBSETS[smaller]
                .iter()
                .chain(CAPABILITY_SUBSETS[extra])
                .copied(),
        );

        let composer = ConditionComposer::new(&world.registry, &world.store);
        let builder = PermissionConditionBuilder::new(&world.registry);
        for type_name in [STUDENT, DORMITORY, BUILDING] {
            let type_id = world.registry.get_type_id(type_name).unwrap();
            let narrow_rows = composer
                .select(type_id, &builder.build(&narrow, type_id, &caller))
                .unwrap();
            let wide_rows = composer
                .select(type_id, &builder.build(&wide, type_id, &caller))
                .unwrap();
            prop_assert!(narrow_rows.iter().all(|id| wide_rows.contains(id)));
        }
    }

    #[test]
    fn empty_filter_selects_everything_permitted(
        layout in layout(),
        pick in prop::option::of(0usize..8),
        caps in 0usize..4,
    ) {
        let world = build(&layout);
        let caller = caller_for(&world, pick, CAPABILITY_SUBSETS[caps]);
        let composer = ConditionComposer::new(&world.registry, &world.store);
        let student_type = world.registry.get_type_id(STUDENT).unwrap();

        let filter = FilterConditionBuilder::new(&world.registry)
            .build(student_type, &FilterSpec::new())
            .unwrap();
        prop_assert_eq!(&filter, &Predicate::True);

        let permission = PermissionConditionBuilder::new(&world.registry)
            .build(&capabilities(["Management", "Self"]), student_type, &caller);
        prop_assert_eq!(
            composer.select(student_type, &and(filter, permission.clone())).unwrap(),
            composer.select(student_type, &permission).unwrap()
        );
    }
}
