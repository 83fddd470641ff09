use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use crm_core::TenantContext;
use parking_lot::RwLock;

use crate::ids::{AgentId, CategoryId, LeadId, OrganisationId, UserId};
use crate::model::{Agent, Category, Lead, Organisation, User};
use crate::scope::LeadScope;
use crate::store::{CrmStore, LeadChange, StoreError, StoreResult};

#[derive(Default)]
struct MemoryState {
    users: HashMap<UserId, User>,
    organisations: HashMap<OrganisationId, Organisation>,
    agents: HashMap<AgentId, Agent>,
    categories: HashMap<CategoryId, Category>,
    leads: HashMap<LeadId, Lead>,
}

impl MemoryState {
    /// Username is unique exactly, email case-insensitively.
    fn ensure_unique(&self, user: &User) -> StoreResult<()> {
        for existing in self.users.values().filter(|u| u.id != user.id) {
            if existing.username == user.username {
                return Err(StoreError::Duplicate {
                    field: "username",
                    value: user.username.clone(),
                });
            }
            if existing.email.eq_ignore_ascii_case(&user.email) {
                return Err(StoreError::Duplicate {
                    field: "email",
                    value: user.email.clone(),
                });
            }
        }
        Ok(())
    }

    /// Agent and category of `lead` must exist in the lead's organisation.
    fn ensure_references(&self, lead: &Lead) -> StoreResult<()> {
        let owned = |org: &OrganisationId| org == &lead.organisation;
        if let Some(id) = lead.agent {
            if !self.agents.get(&id).is_some_and(|a| owned(&a.organisation)) {
                return Err(StoreError::DanglingReference { entity: "agent" });
            }
        }
        if let Some(id) = lead.category {
            if !self.categories.get(&id).is_some_and(|c| owned(&c.organisation)) {
                return Err(StoreError::DanglingReference { entity: "category" });
            }
        }
        Ok(())
    }
}

/// In-memory store for tests and development.
///
/// All state sits behind one lock so every trait method is atomic.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total lead count across all tenants.
    pub fn lead_count(&self) -> usize {
        self.state.read().leads.len()
    }
}

#[async_trait]
impl CrmStore for MemoryStore {
    async fn insert_organisor_account(&self, user: User, organisation: Organisation) -> StoreResult<()> {
        let mut state = self.state.write();
        state.ensure_unique(&user)?;
        state.organisations.insert(organisation.id, organisation);
        state.users.insert(user.id, user);
        Ok(())
    }

    async fn insert_agent_account(&self, user: User, agent: Agent) -> StoreResult<()> {
        let mut state = self.state.write();
        state.ensure_unique(&user)?;
        state.agents.insert(agent.id, agent);
        state.users.insert(user.id, user);
        Ok(())
    }

    async fn get_user(&self, id: &UserId) -> StoreResult<Option<User>> {
        Ok(self.state.read().users.get(id).cloned())
    }

    async fn update_user(&self, user: User) -> StoreResult<()> {
        let mut state = self.state.write();
        if !state.users.contains_key(&user.id) {
            return Err(StoreError::Missing { entity: "user" });
        }
        state.ensure_unique(&user)?;
        state.users.insert(user.id, user);
        Ok(())
    }

    async fn organisation_of_owner(&self, owner: &UserId) -> StoreResult<Option<Organisation>> {
        let state = self.state.read();
        Ok(state
            .organisations
            .values()
            .find(|o| &o.owner == owner)
            .cloned())
    }

    async fn agent_for_user(&self, user: &UserId) -> StoreResult<Option<Agent>> {
        let state = self.state.read();
        Ok(state.agents.values().find(|a| &a.user == user).cloned())
    }

    async fn get_agent(&self, ctx: &TenantContext, id: &AgentId) -> StoreResult<Option<Agent>> {
        let state = self.state.read();
        Ok(state
            .agents
            .get(id)
            .filter(|a| ctx.owns(&a.organisation))
            .cloned())
    }

    async fn find_agents(&self, ctx: &TenantContext) -> StoreResult<Vec<Agent>> {
        let state = self.state.read();
        let mut agents: Vec<Agent> = state
            .agents
            .values()
            .filter(|a| ctx.owns(&a.organisation))
            .cloned()
            .collect();
        agents.sort_by_key(|a| a.id);
        Ok(agents)
    }

    async fn remove_agent(&self, ctx: &TenantContext, id: &AgentId) -> StoreResult<Option<Agent>> {
        let mut state = self.state.write();
        let owned = state
            .agents
            .get(id)
            .is_some_and(|a| ctx.owns(&a.organisation));
        if !owned {
            return Ok(None);
        }

        let removed = state.agents.remove(id);
        if let Some(agent) = &removed {
            state.users.remove(&agent.user);
            for lead in state.leads.values_mut().filter(|l| l.agent == Some(*id)) {
                lead.agent = None;
            }
        }
        Ok(removed)
    }

    async fn insert_category(&self, category: Category) -> StoreResult<()> {
        self.state.write().categories.insert(category.id, category);
        Ok(())
    }

    async fn get_category(&self, ctx: &TenantContext, id: &CategoryId) -> StoreResult<Option<Category>> {
        let state = self.state.read();
        Ok(state
            .categories
            .get(id)
            .filter(|c| ctx.owns(&c.organisation))
            .cloned())
    }

    async fn find_categories(&self, ctx: &TenantContext) -> StoreResult<Vec<Category>> {
        let state = self.state.read();
        let mut categories: Vec<Category> = state
            .categories
            .values()
            .filter(|c| ctx.owns(&c.organisation))
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(categories)
    }

    async fn remove_category(&self, ctx: &TenantContext, id: &CategoryId) -> StoreResult<Option<Category>> {
        let mut state = self.state.write();
        let owned = state
            .categories
            .get(id)
            .is_some_and(|c| ctx.owns(&c.organisation));
        if !owned {
            return Ok(None);
        }

        let removed = state.categories.remove(id);
        for lead in state.leads.values_mut().filter(|l| l.category == Some(*id)) {
            lead.category = None;
        }
        Ok(removed)
    }

    async fn insert_lead(&self, lead: Lead) -> StoreResult<()> {
        let mut state = self.state.write();
        state.ensure_references(&lead)?;
        state.leads.insert(lead.id, lead);
        Ok(())
    }

    async fn find_leads(&self, scope: &LeadScope) -> StoreResult<Vec<Lead>> {
        let state = self.state.read();
        let mut leads: Vec<Lead> = state
            .leads
            .values()
            .filter(|l| scope.matches(l))
            .cloned()
            .collect();
        leads.sort_by(|a, b| a.date_added.cmp(&b.date_added).then(a.id.cmp(&b.id)));
        Ok(leads)
    }

    async fn count_leads(&self, scope: &LeadScope) -> StoreResult<usize> {
        let state = self.state.read();
        Ok(state.leads.values().filter(|l| scope.matches(l)).count())
    }

    async fn get_lead(&self, scope: &LeadScope, id: &LeadId) -> StoreResult<Option<Lead>> {
        let state = self.state.read();
        Ok(state.leads.get(id).filter(|l| scope.matches(l)).cloned())
    }

    async fn modify_lead(
        &self,
        scope: &LeadScope,
        id: &LeadId,
        change: LeadChange,
    ) -> StoreResult<Option<Lead>> {
        let mut state = self.state.write();
        let Some(mut lead) = state.leads.get(id).filter(|l| scope.matches(l)).cloned() else {
            return Ok(None);
        };
        change.apply(&mut lead);
        state.ensure_references(&lead)?;
        state.leads.insert(lead.id, lead.clone());
        Ok(Some(lead))
    }

    async fn remove_lead(&self, scope: &LeadScope, id: &LeadId) -> StoreResult<Option<Lead>> {
        let mut state = self.state.write();
        let in_scope = state.leads.get(id).is_some_and(|l| scope.matches(l));
        if !in_scope {
            return Ok(None);
        }
        Ok(state.leads.remove(id))
    }
}
