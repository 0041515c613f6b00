//! The Registry - immutable schema and rule lookup.

use crate::{FieldDef, Rule, TypeDef};
use regex_lite::Regex;
use std::collections::HashMap;
use warden_core::{Capability, TypeId};

/// The Registry provides runtime lookup of resource types and rules.
/// It is immutable after construction.
#[derive(Debug, Default)]
pub struct Registry {
    /// Type definitions by ID.
    types: HashMap<TypeId, TypeDef>,
    /// Type ID lookup by name.
    type_names: HashMap<String, TypeId>,
    /// Type ID lookup by route segment.
    routes: HashMap<String, TypeId>,

    /// Row-selection rules keyed by (type, capability).
    rules: HashMap<(TypeId, Capability), Rule>,

    /// Compiled field patterns keyed by (type, field).
    patterns: HashMap<(TypeId, String), Regex>,
}

impl Registry {
    pub(crate) fn new(
        types: HashMap<TypeId, TypeDef>,
        type_names: HashMap<String, TypeId>,
        routes: HashMap<String, TypeId>,
        rules: HashMap<(TypeId, Capability), Rule>,
        patterns: HashMap<(TypeId, String), Regex>,
    ) -> Self {
        Self {
            types,
            type_names,
            routes,
            rules,
            patterns,
        }
    }

    // ==================== Type Lookups ====================

    /// Get a type definition by name.
    pub fn get_type_by_name(&self, name: &str) -> Option<&TypeDef> {
        self.type_names.get(name).and_then(|id| self.types.get(id))
    }

    /// Get a type definition by ID.
    pub fn get_type(&self, id: TypeId) -> Option<&TypeDef> {
        self.types.get(&id)
    }

    /// Get a type ID by name.
    pub fn get_type_id(&self, name: &str) -> Option<TypeId> {
        self.type_names.get(name).copied()
    }

    /// Get a type definition by its route segment.
    pub fn get_type_by_route(&self, route: &str) -> Option<&TypeDef> {
        self.routes.get(route).and_then(|id| self.types.get(id))
    }

    /// Get all type definitions.
    pub fn all_types(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values()
    }

    /// Get the number of types.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Get a field definition from a type.
    pub fn get_field(&self, type_id: TypeId, field: &str) -> Option<&FieldDef> {
        self.types.get(&type_id).and_then(|t| t.get_field(field))
    }

    /// Get the compiled pattern declared on a field.
    pub fn field_pattern(&self, type_id: TypeId, field: &str) -> Option<&Regex> {
        self.patterns.get(&(type_id, field.to_string()))
    }

    // ==================== Rule Lookups ====================

    /// Get the rule a capability grants on a type.
    pub fn get_rule(&self, type_id: TypeId, capability: &Capability) -> Option<&Rule> {
        self.rules.get(&(type_id, capability.clone()))
    }

    /// Get all rules registered for a type.
    pub fn get_rules_for_type(&self, type_id: TypeId) -> Vec<&Rule> {
        let mut rules: Vec<&Rule> = self
            .rules
            .iter()
            .filter(|((t, _), _)| *t == type_id)
            .map(|(_, rule)| rule)
            .collect();
        rules.sort_by(|a, b| a.capability.cmp(&b.capability));
        rules
    }

    /// Get the number of rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}
