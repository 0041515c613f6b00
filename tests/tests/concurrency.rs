//! Sessions shared across threads.

use pretty_assertions::assert_eq;
use std::thread;
use warden_tests::prelude::*;

#[test]
fn cloned_sessions_share_one_store() {
    // GIVEN a session cloned into four threads
    let campus = Campus::seed();
    let admin = campus.admin.clone();

    // WHEN each creates five departments
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let session = campus.session.clone();
            let admin = admin.clone();
            thread::spawn(move || {
                for i in 0..5 {
                    let reply = session.handle(
                        "/department/create",
                        &json!({"obj": {"name": format!("Dept {}-{}", t, i)}}),
                        &admin,
                    );
                    reply.ok();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // THEN every row landed with a distinct id
    let reply = campus.list_page("department", json!({"name": "Dept"}), 1, 100, &campus.admin);
    let mut ids = reply.ids();
    ids.dedup();
    assert_eq!(ids.len(), 20);
    assert_eq!(reply.total(), 20);
}

#[test]
fn readers_and_writers_interleave() {
    let campus = Campus::seed();
    let alice = campus.student_caller(campus.alice);

    let writer = {
        let session = campus.session.clone();
        let admin = campus.admin.clone();
        let bob = campus.bob;
        thread::spawn(move || {
            for i in 0..20 {
                session
                    .handle(
                        "/student/update",
                        &json!({"filter": {"id": bob}, "obj": {"real_name": format!("Bob {}", i)}}),
                        &admin,
                    )
                    .ok();
            }
        })
    };

    for _ in 0..20 {
        assert_eq!(campus.list("student", json!({}), &alice).ids(), vec![campus.alice]);
    }
    writer.join().unwrap();

    let bob = campus.list("student", json!({"id": campus.bob}), &campus.admin);
    assert_eq!(bob.ok()["items"][0]["real_name"], json!("Bob 19"));
}
