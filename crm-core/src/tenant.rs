//! Core multi-tenant types.

use std::fmt;

use uuid::Uuid;

/// Identifier of an organisation, the unit of data isolation.
///
/// An organisor's account *is* its organisation for scoping purposes, so
/// every tenant-owned record (agents, leads, categories) carries one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TenantId(pub Uuid);

impl TenantId {
    /// Generate a fresh tenant id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TenantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for TenantId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Context carried with every tenant-owned store call.
///
/// Services and stores take this explicitly instead of reading ambient
/// request state, so all data access is tenant-aware by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    pub tenant_id: TenantId,
    /// Optional request id for log correlation.
    pub request_id: Option<String>,
}

impl TenantContext {
    pub fn new(tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// True when a record owned by `owner` is visible in this context.
    pub fn owns(&self, owner: &TenantId) -> bool {
        &self.tenant_id == owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_only_owns_its_own_tenant() {
        let a = TenantId::new();
        let b = TenantId::new();
        let ctx = TenantContext::new(a).with_request_id("req-1");

        assert!(ctx.owns(&a));
        assert!(!ctx.owns(&b));
        assert_eq!(ctx.request_id.as_deref(), Some("req-1"));
    }
}
