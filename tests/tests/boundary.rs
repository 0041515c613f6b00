//! JSON request and reply shapes.

use pretty_assertions::assert_eq;
use warden_tests::prelude::*;

#[test]
fn student_projection() {
    let campus = Campus::seed();

    let reply = campus.list("student", json!({"id": campus.alice}), &campus.admin);

    assert_eq!(
        reply.ok()["items"][0],
        json!({
            "id": campus.alice,
            "card_id": "20190001",
            "real_name": "Alice",
            "gender": "女",
            "birth_date": "2001-05-20",
            "enroll_date": "2019-09-01",
            "graduate_date": null,
            "department": {"id": campus.cs, "name": "Computer Science"},
            "leaved": false,
            "abnormal": false,
            "dormitory": {
                "id": campus.dorm_101,
                "number": "101",
                "building": {"id": campus.north, "name": "North"}
            }
        })
    );
}

#[test]
fn dormitory_projection() {
    let campus = Campus::seed();

    let reply = campus.list("dormitory", json!({"number": "202"}), &campus.admin);

    assert_eq!(
        reply.ok()["items"],
        json!([{
            "id": campus.dorm_202,
            "number": "202",
            "building": {"id": campus.south, "name": "South"},
            "electricity_meter": campus.meters_202.0,
            "water_meter": campus.meters_202.1
        }])
    );
}

#[test]
fn create_reply_carries_id() {
    let campus = Campus::seed();

    let reply = campus.create("department", json!({"name": "Physics"}), &campus.admin);

    assert_eq!(reply.code, 200);
    assert_eq!(reply.message, "success");
    assert!(reply.ok()["id"].as_u64().is_some());
}

#[test]
fn update_reply_is_empty() {
    let campus = Campus::seed();

    let reply = campus.update(
        "department",
        json!({"id": campus.math}),
        json!({"name": "Applied Mathematics"}),
        &campus.admin,
    );

    assert_eq!(reply.ok(), &Json::Null);
}

#[test]
fn filters_by_kind() {
    let campus = Campus::seed();
    let admin = &campus.admin;

    // substring on card id and name
    assert_eq!(
        campus.list("student", json!({"card_id": "0002"}), admin).ids(),
        vec![campus.bob]
    );
    assert_eq!(
        campus.list("student", json!({"real_name": "ar"}), admin).ids(),
        vec![campus.carol]
    );
    // choice label
    assert_eq!(
        campus.list("student", json!({"gender": "女"}), admin).ids(),
        vec![campus.alice, campus.carol]
    );
    // null foreign key
    assert_eq!(
        campus.list("student", json!({"dormitory": null}), admin).ids(),
        vec![campus.carol]
    );
    // date range and single date
    assert_eq!(
        campus
            .list("student", json!({"enroll_date": ["2019-01-01", null]}), admin)
            .total(),
        3
    );
    assert_eq!(
        campus
            .list("student", json!({"birth_date": [null, "2000-12-31"]}), admin)
            .total(),
        0
    );
    assert_eq!(
        campus
            .list("student", json!({"birth_date": "2001-05-20"}), admin)
            .total(),
        3
    );
    // exact room number
    assert_eq!(
        campus.list("dormitory", json!({"number": "10"}), admin).total(),
        0
    );
}

#[test]
fn validation_failures() {
    let campus = Campus::seed();
    let admin = &campus.admin;

    // unknown filter property
    campus.list("student", json!({"nickname": "x"}), admin).fails_with(400);
    // bad date
    campus.list("student", json!({"birth_date": "May 20"}), admin).fails_with(400);
    // unknown choice label
    campus.list("student", json!({"gender": "x"}), admin).fails_with(400);
    // room number must be digits
    campus
        .update("dormitory", json!({"id": campus.dorm_101}), json!({"number": "10a"}), admin)
        .fails_with(400);
    // read-only field
    campus
        .update("student", json!({"id": campus.bob}), json!({"abnormal": true}), admin)
        .fails_with(400);
    // create must carry every updatable field
    campus.create("dormitory", json!({"number": "303"}), admin).fails_with(400);
    // missing body member
    campus
        .session
        .handle("/student/update", &json!({"obj": {}}), admin)
        .fails_with(400);
}

#[test]
fn number_filters_must_be_digits() {
    let campus = Campus::seed();
    let admin = &campus.admin;

    for resource in ["dormitory", "electricity_meter", "water_meter"] {
        campus.list(resource, json!({"number": "abc"}), admin).fails_with(400);
        campus.list(resource, json!({"number": "x1"}), admin).fails_with(400);
    }
    campus
        .update("dormitory", json!({"number": "abc"}), json!({"number": "303"}), admin)
        .fails_with(400);
    assert_eq!(
        campus.list("dormitory", json!({"number": "101"}), admin).ids(),
        vec![campus.dorm_101]
    );
}

#[test]
fn password_is_hashed_and_never_projected() {
    let campus = Campus::seed();

    campus
        .update("student", json!({"id": campus.bob}), json!({"password": "new"}), &campus.admin)
        .ok();

    let bob = campus.list("student", json!({"id": campus.bob}), &campus.admin);
    let item = &bob.ok()["items"][0];
    assert!(item.get("password").is_none());
    assert!(item.get("password_hash").is_none());
}

#[test]
fn unknown_route() {
    let campus = Campus::seed();

    campus
        .session
        .handle("/canteen/list", &json!({"page": 1, "limit": 1, "filter": {}}), &campus.admin)
        .fails_with(404);
}
