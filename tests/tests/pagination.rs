//! Paging through list results at the boundary.

use pretty_assertions::assert_eq;
use warden_tests::prelude::*;

/// A campus with 25 extra buildings after the seeded two.
fn campus_with_buildings() -> (Campus, Vec<u64>) {
    let campus = Campus::seed();
    let ids = (1..=25)
        .map(|i| {
            campus
                .create("building", json!({"name": format!("Hall {}", i)}), &campus.admin)
                .ok()["id"]
                .as_u64()
                .unwrap()
        })
        .collect();
    (campus, ids)
}

#[test]
fn second_and_third_pages_of_twenty_five() {
    // GIVEN 25 halls matched by a name filter
    let (campus, halls) = campus_with_buildings();
    let filter = json!({"name": "Hall"});

    // WHEN
    let page_2 = campus.list_page("building", filter.clone(), 2, 10, &campus.admin);
    let page_3 = campus.list_page("building", filter, 3, 10, &campus.admin);

    // THEN
    assert_eq!(page_2.ids(), halls[10..20].to_vec());
    assert_eq!(page_2.total(), 25);
    assert_eq!(page_3.ids(), halls[20..25].to_vec());
    assert_eq!(page_3.total(), 25);
    assert_eq!(page_3.ok()["page"], json!(3));
    assert_eq!(page_3.ok()["limit"], json!(10));
}

#[test]
fn page_past_end_is_empty_with_full_total() {
    let (campus, _) = campus_with_buildings();

    let reply = campus.list_page("building", json!({}), 10, 10, &campus.admin);

    assert!(reply.ids().is_empty());
    assert_eq!(reply.total(), 27);
}

#[test]
fn zero_page_or_limit_is_rejected() {
    let campus = Campus::seed();

    campus
        .list_page("building", json!({}), 0, 10, &campus.admin)
        .fails_with(400);
    campus
        .list_page("building", json!({}), 1, 0, &campus.admin)
        .fails_with(400);
}

#[test]
fn negative_page_is_rejected() {
    let campus = Campus::seed();

    campus
        .session
        .handle(
            "/building/list",
            &json!({"page": -1, "limit": 10, "filter": {}}),
            &campus.admin,
        )
        .fails_with(400);
}

#[test]
fn configured_limit_cap() {
    let config = SessionConfig {
        max_page_limit: Some(50),
        ..SessionConfig::default()
    };
    let campus = Campus::seed_with(config);

    campus
        .list_page("building", json!({}), 1, 51, &campus.admin)
        .fails_with(400);
    assert_eq!(
        campus.list_page("building", json!({}), 1, 50, &campus.admin).total(),
        2
    );
}

#[test]
fn total_counts_only_visible_rows() {
    let (campus, _) = campus_with_buildings();
    let alice = campus.student_caller(campus.alice);

    let reply = campus.list_page("building", json!({}), 1, 1, &alice);

    assert_eq!(reply.ids(), vec![campus.north]);
    assert_eq!(reply.total(), 1);
}
