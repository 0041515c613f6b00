//! Foreign-key checks on create and update.

use pretty_assertions::assert_eq;
use warden_tests::prelude::*;

fn new_student(department: u64, dormitory: Json) -> Json {
    json!({
        "card_id": "20200099",
        "real_name": "Dana",
        "gender": "女",
        "birth_date": "2002-02-02",
        "enroll_date": "2020-09-01",
        "graduate_date": null,
        "department": department,
        "leaved": false,
        "dormitory": dormitory,
        "password": "pw"
    })
}

#[test]
fn create_with_unwritable_reference_is_denied_and_writes_nothing() {
    // GIVEN Alice holding only Self, who can read her own building
    let campus = Campus::seed();
    let alice = campus.student_caller(campus.alice);
    let before = campus.count("dormitory");

    // WHEN she creates a dormitory in it
    let reply = campus.create(
        "dormitory",
        json!({
            "number": "103",
            "building": campus.north,
            "electricity_meter": campus.meters_101.0,
            "water_meter": campus.meters_101.1
        }),
        &alice,
    );

    // THEN
    reply.fails_with(403);
    assert_eq!(campus.count("dormitory"), before);
}

#[test]
fn create_with_missing_reference_is_not_found() {
    let campus = Campus::seed();
    let before = campus.count("student");

    campus
        .create("student", new_student(9999, Json::Null), &campus.admin)
        .fails_with(404);
    assert_eq!(campus.count("student"), before);
}

#[test]
fn create_with_reference_to_wrong_type_is_not_found() {
    let campus = Campus::seed();

    campus
        .create("student", new_student(campus.cs, json!(campus.north)), &campus.admin)
        .fails_with(404);
}

#[test]
fn null_reference_is_not_checked() {
    let campus = Campus::seed();

    let id = campus
        .create("student", new_student(campus.cs, Json::Null), &campus.admin)
        .ok()["id"]
        .as_u64()
        .unwrap();

    let listed = campus.list("student", json!({"id": id}), &campus.admin);
    assert_eq!(listed.ok()["items"][0]["dormitory"], Json::Null);
    assert_eq!(listed.ok()["items"][0]["abnormal"], json!(false));
}

#[test]
fn reference_check_precedes_row_visibility() {
    // GIVEN a filter matching nothing and a missing reference
    let campus = Campus::seed();

    // THEN the reference failure is reported first
    campus
        .update(
            "student",
            json!({"id": 9999}),
            json!({"dormitory": 9999}),
            &campus.admin,
        )
        .fails_with(404);

    // AND a manager moving Carol into a dormitory succeeds
    campus
        .update(
            "student",
            json!({"id": campus.carol}),
            json!({"dormitory": campus.dorm_202}),
            &campus.admin,
        )
        .ok();
    let carol = campus.list("student", json!({"id": campus.carol}), &campus.admin);
    assert_eq!(carol.ok()["items"][0]["dormitory"]["id"], json!(campus.dorm_202));
}

#[test]
fn failed_reference_leaves_other_fields_untouched() {
    let campus = Campus::seed();

    campus
        .update(
            "student",
            json!({"id": campus.bob}),
            json!({"real_name": "Robert", "department": 9999}),
            &campus.admin,
        )
        .fails_with(404);

    let bob = campus.list("student", json!({"id": campus.bob}), &campus.admin);
    assert_eq!(bob.ok()["items"][0]["real_name"], json!("Bob"));
}
