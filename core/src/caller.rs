//! Callers and the capabilities they hold.
//!
//! Role bindings are supplied by the authentication layer and are read-only
//! here: a caller is an optional identity plus the set of capability names
//! bound to it.

use crate::RecordId;
use std::collections::BTreeSet;
use std::fmt;

/// A named permission grant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Capability(String);

impl Capability {
    /// Full administrative access to every row.
    pub const MANAGEMENT: &'static str = "Management";
    /// Access to rows reachable from the caller's own identity.
    pub const SELF: &'static str = "Self";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn management() -> Self {
        Self::new(Self::MANAGEMENT)
    }

    pub fn own() -> Self {
        Self::new(Self::SELF)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Capability {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Ordered set of capabilities.
pub type CapabilitySet = BTreeSet<Capability>;

/// Build a capability set from names.
pub fn capabilities<'a>(names: impl IntoIterator<Item = &'a str>) -> CapabilitySet {
    names.into_iter().map(Capability::new).collect()
}

/// The party issuing a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caller {
    /// The caller's own record (a student row), if the caller has one.
    pub identity: Option<RecordId>,
    /// Capabilities bound to the caller.
    pub capabilities: CapabilitySet,
}

impl Caller {
    /// A caller with no identity and no capabilities.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A caller holding `Management`.
    pub fn manager() -> Self {
        Self::anonymous().grant(Capability::management())
    }

    /// A caller holding `Self` for the given record.
    pub fn owner(identity: RecordId) -> Self {
        Self::anonymous()
            .with_identity(identity)
            .grant(Capability::own())
    }

    pub fn with_identity(mut self, identity: RecordId) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn grant(mut self, capability: Capability) -> Self {
        self.capabilities.insert(capability);
        self
    }

    /// Check whether the caller holds a capability.
    pub fn holds(&self, capability: &Capability) -> bool {
        self.capabilities.contains(capability)
    }

    /// Capabilities in `requested` that the caller actually holds, in order.
    pub fn held_among<'a>(
        &'a self,
        requested: &'a CapabilitySet,
    ) -> impl Iterator<Item = &'a Capability> + 'a {
        requested.iter().filter(move |c| self.holds(c))
    }
}
