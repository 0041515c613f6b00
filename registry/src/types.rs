//! Schema definition types.

use std::fmt;
use warden_core::{Capability, Caller, Predicate, TypeId, Value};

/// How a field is stored and what values it accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Integer.
    Int,
    /// Boolean.
    Bool,
    /// String, optionally constrained by the field's pattern.
    Text,
    /// Calendar date.
    Date,
    /// Foreign key to a record of `target`. `expand` projects the referenced
    /// record as a nested object instead of a bare id.
    Ref { target: String, expand: bool },
    /// Human-readable label mapped to a stored value.
    Choice { options: Vec<(String, Value)> },
    /// Write-only plaintext replaced by its hash under `stored_as`.
    Secret { stored_as: String },
}

impl FieldKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Int => "Int",
            FieldKind::Bool => "Bool",
            FieldKind::Text => "String",
            FieldKind::Date => "Date",
            FieldKind::Ref { .. } => "Ref",
            FieldKind::Choice { .. } => "Choice",
            FieldKind::Secret { .. } => "Secret",
        }
    }

    /// Referenced type name if this is a foreign key.
    pub fn ref_target(&self) -> Option<&str> {
        match self {
            FieldKind::Ref { target, .. } => Some(target),
            _ => None,
        }
    }
}

/// How a filter value on a field becomes a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Equality (ids, foreign keys, ints, bools, choices, exact strings).
    Exact,
    /// Substring match on strings.
    Contains,
    /// Inclusive date range, or equality for a single date.
    DateRange,
}

/// Field definition within a resource type.
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Field name.
    pub name: String,
    /// Storage kind.
    pub kind: FieldKind,
    /// How the field may be filtered on (None = not filterable).
    pub filter: Option<FilterKind>,
    /// Whether a mutation object may set this field.
    pub updatable: bool,
    /// Whether this field can be null.
    pub nullable: bool,
    /// Whether this field is left out of projections.
    pub hidden: bool,
    /// Default value applied on create if not provided.
    pub default: Option<Value>,
    /// Match pattern constraint (regex) for string values.
    pub pattern: Option<String>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            filter: None,
            updatable: false,
            nullable: false,
            hidden: false,
            default: None,
            pattern: None,
        }
    }

    pub fn int(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Int)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Bool)
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Date)
    }

    pub fn reference(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldKind::Ref {
                target: target.into(),
                expand: false,
            },
        )
    }

    pub fn choice<L: Into<String>, V: Into<Value>>(
        name: impl Into<String>,
        options: impl IntoIterator<Item = (L, V)>,
    ) -> Self {
        let options = options
            .into_iter()
            .map(|(label, value)| (label.into(), value.into()))
            .collect();
        Self::new(name, FieldKind::Choice { options })
    }

    pub fn secret(name: impl Into<String>, stored_as: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldKind::Secret {
                stored_as: stored_as.into(),
            },
        )
    }

    pub fn filter(mut self, kind: FilterKind) -> Self {
        self.filter = Some(kind);
        self
    }

    pub fn updatable(mut self) -> Self {
        self.updatable = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Project the referenced record as a nested object.
    pub fn expanded(mut self) -> Self {
        if let FieldKind::Ref { expand, .. } = &mut self.kind {
            *expand = true;
        }
        self
    }

    /// Stored value for a choice label.
    pub fn choice_value(&self, label: &str) -> Option<&Value> {
        match &self.kind {
            FieldKind::Choice { options } => options
                .iter()
                .find(|(l, _)| l == label)
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Label for a stored choice value.
    pub fn choice_label(&self, value: &Value) -> Option<&str> {
        match &self.kind {
            FieldKind::Choice { options } => options
                .iter()
                .find(|(_, v)| v == value)
                .map(|(l, _)| l.as_str()),
            _ => None,
        }
    }
}

/// Resource type definition.
#[derive(Debug, Clone)]
pub struct TypeDef {
    /// Unique identifier.
    pub id: TypeId,
    /// Type name.
    pub name: String,
    /// Route segment the type is served under (e.g. `student`).
    pub route: String,
    /// Field shown next to the id when the type is embedded in another projection.
    pub display_field: Option<String>,
    /// Field definitions, in declaration order.
    pub fields: Vec<FieldDef>,
}

impl TypeDef {
    pub fn new(id: TypeId, name: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            route: route.into(),
            display_field: None,
            fields: Vec::new(),
        }
    }

    /// Get a field definition by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check if this type has a field.
    pub fn has_field(&self, name: &str) -> bool {
        self.get_field(name).is_some()
    }

    /// Fields a mutation object may set.
    pub fn updatable_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.updatable)
    }

    /// Foreign-key fields.
    pub fn reference_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.kind.ref_target().is_some())
    }
}

/// Signature of a row-selection rule.
pub type RuleFn = dyn Fn(&Caller) -> Predicate + Send + Sync;

/// The rows of one type a capability grants, as a function of the caller.
pub struct Rule {
    /// Capability this rule is registered under.
    pub capability: Capability,
    select: Box<RuleFn>,
}

impl Rule {
    pub fn new(
        capability: Capability,
        select: impl Fn(&Caller) -> Predicate + Send + Sync + 'static,
    ) -> Self {
        Self {
            capability,
            select: Box::new(select),
        }
    }

    /// Build the predicate this rule grants to `caller`.
    pub fn select(&self, caller: &Caller) -> Predicate {
        (self.select)(caller)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("capability", &self.capability)
            .field("select", &"<fn>")
            .finish()
    }
}
