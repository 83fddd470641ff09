//! Row predicates deciding which leads a principal may see or touch.
//!
//! Every lead query goes through a [`LeadScope`] built from the principal, so
//! the organisor/agent branching lives in exactly one place.

use crm_core::TenantContext;

use crate::ids::{AgentId, CategoryId};
use crate::model::Lead;
use crate::principal::Principal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentFilter {
    Any,
    Assigned,
    Unassigned,
    Only(AgentId),
}

impl AgentFilter {
    fn matches(&self, agent: Option<AgentId>) -> bool {
        match self {
            AgentFilter::Any => true,
            AgentFilter::Assigned => agent.is_some(),
            AgentFilter::Unassigned => agent.is_none(),
            AgentFilter::Only(id) => agent == Some(*id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    Any,
    Uncategorized,
    Only(CategoryId),
}

impl CategoryFilter {
    fn matches(&self, category: Option<CategoryId>) -> bool {
        match self {
            CategoryFilter::Any => true,
            CategoryFilter::Uncategorized => category.is_none(),
            CategoryFilter::Only(id) => category == Some(*id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadScope {
    pub tenant: TenantContext,
    pub agent: AgentFilter,
    pub category: CategoryFilter,
}

impl LeadScope {
    /// The leads `principal` is authorized to see.
    ///
    /// Organisors get their whole organisation, agents only the leads assigned
    /// to them. `include_unassigned == false` drops leads without an agent.
    pub fn for_principal(principal: &Principal, include_unassigned: bool) -> Self {
        let agent = match principal {
            Principal::Organisor { .. } if include_unassigned => AgentFilter::Any,
            Principal::Organisor { .. } => AgentFilter::Assigned,
            Principal::Agent { agent, .. } => AgentFilter::Only(*agent),
        };

        Self {
            tenant: principal.tenant(),
            agent,
            category: CategoryFilter::Any,
        }
    }

    /// Leads of the organisation with no agent yet.
    ///
    /// `None` for agents: nothing unassigned is ever inside an agent's scope.
    pub fn unassigned_for(principal: &Principal) -> Option<Self> {
        match principal {
            Principal::Organisor { .. } => Some(Self {
                tenant: principal.tenant(),
                agent: AgentFilter::Unassigned,
                category: CategoryFilter::Any,
            }),
            Principal::Agent { .. } => None,
        }
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn matches(&self, lead: &Lead) -> bool {
        self.tenant.owns(&lead.organisation)
            && self.agent.matches(lead.agent)
            && self.category.matches(lead.category)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::ids::{LeadId, OrganisationId, UserId};
    use crate::model::LeadDetails;

    fn lead(org: OrganisationId, agent: Option<AgentId>, category: Option<CategoryId>) -> Lead {
        Lead {
            id: LeadId::new(),
            organisation: org,
            agent,
            category,
            details: LeadDetails::default(),
            date_added: Utc::now(),
        }
    }

    #[test]
    fn organisor_scope_follows_include_unassigned() {
        let org = OrganisationId::new();
        let organisor = Principal::organisor(UserId::new(), org);
        let unassigned = lead(org, None, None);
        let assigned = lead(org, Some(AgentId::new()), None);

        let all = LeadScope::for_principal(&organisor, true);
        assert!(all.matches(&unassigned));
        assert!(all.matches(&assigned));

        let assigned_only = LeadScope::for_principal(&organisor, false);
        assert!(!assigned_only.matches(&unassigned));
        assert!(assigned_only.matches(&assigned));

        let leftovers = LeadScope::unassigned_for(&organisor).unwrap();
        assert!(leftovers.matches(&unassigned));
        assert!(!leftovers.matches(&assigned));
    }

    #[test]
    fn agent_scope_is_own_leads_only() {
        let org = OrganisationId::new();
        let me = AgentId::new();
        let agent = Principal::agent(UserId::new(), me, org);

        let scope = LeadScope::for_principal(&agent, true);
        assert!(scope.matches(&lead(org, Some(me), None)));
        assert!(!scope.matches(&lead(org, Some(AgentId::new()), None)));
        assert!(!scope.matches(&lead(org, None, None)));
        assert_eq!(scope, LeadScope::for_principal(&agent, false));
        assert!(LeadScope::unassigned_for(&agent).is_none());
    }

    #[test]
    fn scope_never_crosses_organisations() {
        let me = AgentId::new();
        let other_org = OrganisationId::new();
        let organisor = Principal::organisor(UserId::new(), OrganisationId::new());
        let agent = Principal::agent(UserId::new(), me, OrganisationId::new());

        assert!(!LeadScope::for_principal(&organisor, true).matches(&lead(other_org, None, None)));
        assert!(!LeadScope::for_principal(&agent, true).matches(&lead(other_org, Some(me), None)));
    }

    #[test]
    fn category_filter_narrows_scope() {
        let org = OrganisationId::new();
        let category = CategoryId::new();
        let organisor = Principal::organisor(UserId::new(), org);

        let uncategorized =
            LeadScope::for_principal(&organisor, true).with_category(CategoryFilter::Uncategorized);
        assert!(uncategorized.matches(&lead(org, None, None)));
        assert!(!uncategorized.matches(&lead(org, None, Some(category))));

        let in_category =
            LeadScope::for_principal(&organisor, true).with_category(CategoryFilter::Only(category));
        assert!(in_category.matches(&lead(org, None, Some(category))));
        assert!(!in_category.matches(&lead(org, None, Some(CategoryId::new()))));
    }
}
