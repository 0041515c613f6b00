//! RegistryBuilder for constructing an immutable Registry.

use crate::{FieldDef, Registry, Rule, TypeDef};
use regex_lite::Regex;
use std::collections::HashMap;
use thiserror::Error;
use warden_core::{Capability, Caller, Predicate, TypeId, ID_FIELD};

/// Errors that can occur during registry construction.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Duplicate type name: {0}")]
    DuplicateTypeName(String),

    #[error("Duplicate route: {0}")]
    DuplicateRoute(String),

    #[error("Duplicate field {field} on type {type_name}")]
    DuplicateField { type_name: String, field: String },

    #[error("Field name 'id' is reserved on type {0}")]
    ReservedField(String),

    #[error("Field {field} on type {type_name} references unknown type {target}")]
    UnknownRefTarget {
        type_name: String,
        field: String,
        target: String,
    },

    #[error("Display field {field} is not declared on type {type_name}")]
    UnknownDisplayField { type_name: String, field: String },

    #[error("Invalid pattern on {type_name}.{field}: {message}")]
    InvalidPattern {
        type_name: String,
        field: String,
        message: String,
    },

    #[error("Unknown type in rule: {0}")]
    UnknownTypeInRule(String),

    #[error("Duplicate rule for capability {capability} on type {type_name}")]
    DuplicateRule {
        type_name: String,
        capability: String,
    },
}

/// Builder for constructing an immutable Registry.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    /// Next type ID to allocate.
    next_type_id: u32,

    /// Types being built.
    types: HashMap<TypeId, TypeDef>,
    /// Type name to ID mapping.
    type_names: HashMap<String, TypeId>,
    /// Route to ID mapping.
    routes: HashMap<String, TypeId>,

    /// Rules waiting for their type to be resolved.
    pending_rules: Vec<(String, Rule)>,
}

impl RegistryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type definition.
    pub fn add_type(&mut self, name: impl Into<String>) -> TypeBuilder<'_> {
        let name = name.into();
        let id = TypeId::new(self.next_type_id);
        self.next_type_id += 1;

        TypeBuilder {
            route: default_route(&name),
            builder: self,
            id,
            name,
            display_field: None,
            fields: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Register a row-selection rule for a type declared before or after this call.
    pub fn add_rule(
        &mut self,
        type_name: impl Into<String>,
        capability: impl Into<Capability>,
        select: impl Fn(&Caller) -> Predicate + Send + Sync + 'static,
    ) -> &mut Self {
        self.pending_rules
            .push((type_name.into(), Rule::new(capability.into(), select)));
        self
    }

    /// Build the immutable Registry.
    pub fn build(self) -> Result<Registry, RegistryError> {
        // Validate references and display fields, compile patterns
        let mut patterns = HashMap::new();
        for type_def in self.types.values() {
            if let Some(display) = &type_def.display_field {
                if !type_def.has_field(display) {
                    return Err(RegistryError::UnknownDisplayField {
                        type_name: type_def.name.clone(),
                        field: display.clone(),
                    });
                }
            }

            for field in &type_def.fields {
                if let Some(target) = field.kind.ref_target() {
                    if !self.type_names.contains_key(target) {
                        return Err(RegistryError::UnknownRefTarget {
                            type_name: type_def.name.clone(),
                            field: field.name.clone(),
                            target: target.to_string(),
                        });
                    }
                }

                if let Some(pattern) = &field.pattern {
                    let regex =
                        Regex::new(pattern).map_err(|e| RegistryError::InvalidPattern {
                            type_name: type_def.name.clone(),
                            field: field.name.clone(),
                            message: e.to_string(),
                        })?;
                    patterns.insert((type_def.id, field.name.clone()), regex);
                }
            }
        }

        // Index rules by (type, capability)
        let mut rules = HashMap::new();
        for (type_name, rule) in self.pending_rules {
            let type_id = *self
                .type_names
                .get(&type_name)
                .ok_or_else(|| RegistryError::UnknownTypeInRule(type_name.clone()))?;
            let key = (type_id, rule.capability.clone());
            if rules.contains_key(&key) {
                return Err(RegistryError::DuplicateRule {
                    type_name,
                    capability: rule.capability.to_string(),
                });
            }
            rules.insert(key, rule);
        }

        Ok(Registry::new(
            self.types,
            self.type_names,
            self.routes,
            rules,
            patterns,
        ))
    }
}

/// Builder for a type definition.
pub struct TypeBuilder<'a> {
    builder: &'a mut RegistryBuilder,
    id: TypeId,
    name: String,
    route: String,
    display_field: Option<String>,
    fields: Vec<FieldDef>,
    rules: Vec<Rule>,
}

impl<'a> TypeBuilder<'a> {
    /// Override the route segment (defaults to the snake_case type name).
    pub fn route(mut self, route: impl Into<String>) -> Self {
        self.route = route.into();
        self
    }

    /// Field shown next to the id when embedded in another projection.
    pub fn display(mut self, field: impl Into<String>) -> Self {
        self.display_field = Some(field.into());
        self
    }

    /// Add a field.
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a row-selection rule for this type.
    pub fn rule(
        mut self,
        capability: impl Into<Capability>,
        select: impl Fn(&Caller) -> Predicate + Send + Sync + 'static,
    ) -> Self {
        self.rules.push(Rule::new(capability.into(), select));
        self
    }

    /// Finish building this type.
    pub fn done(self) -> Result<TypeId, RegistryError> {
        // Check for duplicate name and route
        if self.builder.type_names.contains_key(&self.name) {
            return Err(RegistryError::DuplicateTypeName(self.name));
        }
        if self.builder.routes.contains_key(&self.route) {
            return Err(RegistryError::DuplicateRoute(self.route));
        }

        // Check field names
        let mut seen = std::collections::HashSet::new();
        for field in &self.fields {
            if field.name == ID_FIELD {
                return Err(RegistryError::ReservedField(self.name));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(RegistryError::DuplicateField {
                    type_name: self.name,
                    field: field.name.clone(),
                });
            }
        }

        let type_def = TypeDef {
            id: self.id,
            name: self.name.clone(),
            route: self.route.clone(),
            display_field: self.display_field,
            fields: self.fields,
        };

        for rule in self.rules {
            self.builder.pending_rules.push((self.name.clone(), rule));
        }
        self.builder.type_names.insert(self.name, self.id);
        self.builder.routes.insert(self.route, self.id);
        self.builder.types.insert(self.id, type_def);

        Ok(self.id)
    }
}

/// `ElectricityMeter` -> `electricity_meter`.
fn default_route(name: &str) -> String {
    let mut route = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                route.push('_');
            }
            route.extend(ch.to_lowercase());
        } else {
            route.push(ch);
        }
    }
    route
}
