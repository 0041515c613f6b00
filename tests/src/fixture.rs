//! A small seeded campus.
//!
//! Two buildings each holding one dormitory with its own meters, two
//! departments, and three students: Alice (North 101, CS), Bob (South 202,
//! Math) and Carol (no dormitory, CS).

use serde_json::{json, Value as Json};
use warden_core::{Caller, RecordId};
use warden_registry::campus::campus_registry;
use warden_session::{Reply, Session, SessionConfig};

use crate::assertion::ReplyAssert;

pub struct Campus {
    pub session: Session,
    pub admin: Caller,

    pub north: u64,
    pub south: u64,
    pub dorm_101: u64,
    pub dorm_202: u64,
    pub meters_101: (u64, u64),
    pub meters_202: (u64, u64),
    pub cs: u64,
    pub math: u64,

    pub alice: u64,
    pub bob: u64,
    pub carol: u64,
}

impl Campus {
    pub fn seed() -> Self {
        Self::seed_with(SessionConfig::default())
    }

    pub fn seed_with(config: SessionConfig) -> Self {
        let registry = campus_registry().expect("campus registry");
        let session = Session::new(registry, config);
        let admin = Caller::manager();

        let create = |route: &str, obj: Json| -> u64 {
            let reply = session.handle(route, &json!({ "obj": obj }), &admin);
            reply.ok()["id"].as_u64().expect("created id")
        };

        let north = create("/building/create", json!({"name": "North"}));
        let south = create("/building/create", json!({"name": "South"}));

        let meters = |n: &str| {
            (
                create("/electricity_meter/create", json!({"number": format!("1{}", n)})),
                create("/water_meter/create", json!({"number": format!("2{}", n)})),
            )
        };
        let meters_101 = meters("101");
        let meters_202 = meters("202");

        let dorm = |number: &str, building: u64, (em, wm): (u64, u64)| {
            create(
                "/dormitory/create",
                json!({
                    "number": number,
                    "building": building,
                    "electricity_meter": em,
                    "water_meter": wm
                }),
            )
        };
        let dorm_101 = dorm("101", north, meters_101);
        let dorm_202 = dorm("202", south, meters_202);

        let cs = create("/department/create", json!({"name": "Computer Science"}));
        let math = create("/department/create", json!({"name": "Mathematics"}));

        let student = |card: &str, name: &str, gender: &str, department: u64, dormitory: Json| {
            create(
                "/student/create",
                json!({
                    "card_id": card,
                    "real_name": name,
                    "gender": gender,
                    "birth_date": "2001-05-20",
                    "enroll_date": "2019-09-01",
                    "graduate_date": null,
                    "department": department,
                    "leaved": false,
                    "dormitory": dormitory,
                    "password": format!("{}-password", name)
                }),
            )
        };
        let alice = student("20190001", "Alice", "女", cs, json!(dorm_101));
        let bob = student("20190002", "Bob", "男", math, json!(dorm_202));
        let carol = student("20190003", "Carol", "女", cs, Json::Null);

        Self {
            session,
            admin,
            north,
            south,
            dorm_101,
            dorm_202,
            meters_101,
            meters_202,
            cs,
            math,
            alice,
            bob,
            carol,
        }
    }

    /// A caller holding only `Self` for the given student.
    pub fn student_caller(&self, student: u64) -> Caller {
        Caller::owner(RecordId::new(student))
    }

    pub fn list(&self, resource: &str, filter: Json, caller: &Caller) -> Reply {
        self.list_page(resource, filter, 1, 100, caller)
    }

    pub fn list_page(&self, resource: &str, filter: Json, page: u64, limit: u64, caller: &Caller) -> Reply {
        self.session.handle(
            &format!("/{}/list", resource),
            &json!({"page": page, "limit": limit, "filter": filter}),
            caller,
        )
    }

    pub fn update(&self, resource: &str, filter: Json, obj: Json, caller: &Caller) -> Reply {
        self.session.handle(
            &format!("/{}/update", resource),
            &json!({"filter": filter, "obj": obj}),
            caller,
        )
    }

    pub fn create(&self, resource: &str, obj: Json, caller: &Caller) -> Reply {
        self.session
            .handle(&format!("/{}/create", resource), &json!({"obj": obj}), caller)
    }

    /// Number of rows of a resource, as seen by a manager.
    pub fn count(&self, resource: &str) -> u64 {
        self.list(resource, json!({}), &self.admin).total()
    }
}
