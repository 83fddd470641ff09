use crm_core::TenantContext;

use crate::ids::{AgentId, OrganisationId, UserId};
use crate::model::UserRole;

/// The logged-in caller of every resolver operation.
///
/// The web layer derives this from its session once per request and passes
/// it explicitly; nothing in this crate reads ambient request state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// Full authority over its own organisation.
    Organisor {
        user: UserId,
        organisation: OrganisationId,
    },
    /// Restricted to leads explicitly assigned to `agent`.
    Agent {
        user: UserId,
        agent: AgentId,
        organisation: OrganisationId,
    },
}

impl Principal {
    pub fn organisor(user: UserId, organisation: OrganisationId) -> Self {
        Principal::Organisor { user, organisation }
    }

    pub fn agent(user: UserId, agent: AgentId, organisation: OrganisationId) -> Self {
        Principal::Agent {
            user,
            agent,
            organisation,
        }
    }

    pub fn role(&self) -> UserRole {
        match self {
            Principal::Organisor { .. } => UserRole::Organisor,
            Principal::Agent { .. } => UserRole::Agent,
        }
    }

    pub fn is_organisor(&self) -> bool {
        self.role().is_organisor()
    }

    pub fn user_id(&self) -> UserId {
        match self {
            Principal::Organisor { user, .. } | Principal::Agent { user, .. } => *user,
        }
    }

    pub fn organisation(&self) -> OrganisationId {
        match self {
            Principal::Organisor { organisation, .. } | Principal::Agent { organisation, .. } => {
                *organisation
            }
        }
    }

    pub fn agent_id(&self) -> Option<AgentId> {
        match self {
            Principal::Organisor { .. } => None,
            Principal::Agent { agent, .. } => Some(*agent),
        }
    }

    /// Tenant context for store calls made on behalf of this principal.
    pub fn tenant(&self) -> TenantContext {
        TenantContext::new(self.organisation())
    }
}
