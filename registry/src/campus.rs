//! The dormitory campus schema.
//!
//! Six resource types and the rules `Management` and `Self` grant on each.
//! `Management` selects every row. `Self` rules walk outward from the
//! caller's student row through semi-joins, so a caller without an identity
//! selects nothing.

use crate::{FieldDef, FilterKind, Registry, RegistryBuilder, RegistryError};
use warden_core::{Caller, Capability, Predicate, RecordId, ID_FIELD};

pub const DEPARTMENT: &str = "Department";
pub const BUILDING: &str = "Building";
pub const ELECTRICITY_METER: &str = "ElectricityMeter";
pub const WATER_METER: &str = "WaterMeter";
pub const DORMITORY: &str = "Dormitory";
pub const STUDENT: &str = "Student";

const DIGITS: &str = "^[0-9]+$";

/// Build the campus registry.
pub fn campus_registry() -> Result<Registry, RegistryError> {
    let mut builder = RegistryBuilder::new();

    builder
        .add_type(DEPARTMENT)
        .display("name")
        .field(FieldDef::text("name").updatable().filter(FilterKind::Contains))
        .rule(Capability::MANAGEMENT, |_| Predicate::True)
        .rule(Capability::SELF, |caller| {
            self_reachable(caller, |me| {
                Predicate::in_subquery(ID_FIELD, STUDENT, "department", own_student(me))
            })
        })
        .done()?;

    builder
        .add_type(BUILDING)
        .display("name")
        .field(FieldDef::text("name").updatable().filter(FilterKind::Contains))
        .rule(Capability::MANAGEMENT, |_| Predicate::True)
        .rule(Capability::SELF, |caller| {
            self_reachable(caller, |me| {
                Predicate::in_subquery(ID_FIELD, DORMITORY, "building", own_dormitory(me))
            })
        })
        .done()?;

    for meter in [ELECTRICITY_METER, WATER_METER] {
        let column = if meter == ELECTRICITY_METER {
            "electricity_meter"
        } else {
            "water_meter"
        };
        builder
            .add_type(meter)
            .display("number")
            .field(
                FieldDef::text("number")
                    .updatable()
                    .with_pattern(DIGITS)
                    .filter(FilterKind::Exact),
            )
            .rule(Capability::MANAGEMENT, |_| Predicate::True)
            .rule(Capability::SELF, move |caller| {
                self_reachable(caller, |me| {
                    Predicate::in_subquery(ID_FIELD, DORMITORY, column, own_dormitory(me))
                })
            })
            .done()?;
    }

    builder
        .add_type(DORMITORY)
        .display("number")
        .field(
            FieldDef::text("number")
                .updatable()
                .with_pattern(DIGITS)
                .filter(FilterKind::Exact),
        )
        .field(
            FieldDef::reference("building", BUILDING)
                .expanded()
                .updatable()
                .filter(FilterKind::Exact),
        )
        .field(
            FieldDef::reference("electricity_meter", ELECTRICITY_METER)
                .updatable()
                .filter(FilterKind::Exact),
        )
        .field(
            FieldDef::reference("water_meter", WATER_METER)
                .updatable()
                .filter(FilterKind::Exact),
        )
        .rule(Capability::MANAGEMENT, |_| Predicate::True)
        .rule(Capability::SELF, |caller| {
            self_reachable(caller, own_dormitory)
        })
        .done()?;

    builder
        .add_type(STUDENT)
        .display("real_name")
        .field(
            FieldDef::text("card_id")
                .updatable()
                .with_pattern(DIGITS)
                .filter(FilterKind::Contains),
        )
        .field(
            FieldDef::text("real_name")
                .updatable()
                .filter(FilterKind::Contains),
        )
        .field(
            FieldDef::choice("gender", [("男", false), ("女", true)])
                .updatable()
                .filter(FilterKind::Exact),
        )
        .field(FieldDef::date("birth_date").updatable().filter(FilterKind::DateRange))
        .field(FieldDef::date("enroll_date").updatable().filter(FilterKind::DateRange))
        .field(
            FieldDef::date("graduate_date")
                .updatable()
                .nullable()
                .filter(FilterKind::DateRange),
        )
        .field(
            FieldDef::reference("department", DEPARTMENT)
                .expanded()
                .updatable()
                .filter(FilterKind::Exact),
        )
        .field(FieldDef::boolean("leaved").updatable().filter(FilterKind::Exact))
        .field(
            FieldDef::reference("dormitory", DORMITORY)
                .expanded()
                .updatable()
                .nullable()
                .filter(FilterKind::Exact),
        )
        .field(FieldDef::secret("password", "password_hash").updatable())
        .field(FieldDef::text("password_hash").hidden())
        .field(FieldDef::boolean("abnormal").with_default(false))
        .rule(Capability::MANAGEMENT, |_| Predicate::True)
        .rule(Capability::SELF, |caller| self_reachable(caller, own_student))
        .done()?;

    builder.build()
}

/// Apply `reach` to the caller's identity, or select nothing without one.
fn self_reachable(caller: &Caller, reach: impl FnOnce(RecordId) -> Predicate) -> Predicate {
    match caller.identity {
        Some(me) => reach(me),
        None => Predicate::False,
    }
}

/// The caller's own student row.
fn own_student(me: RecordId) -> Predicate {
    Predicate::eq(ID_FIELD, me)
}

/// The dormitory the caller's student row points at.
fn own_dormitory(me: RecordId) -> Predicate {
    Predicate::in_subquery(ID_FIELD, STUDENT, "dormitory", own_student(me))
}
