pub mod memory;

use async_trait::async_trait;
use crm_core::TenantContext;
use thiserror::Error;

use crate::ids::{AgentId, CategoryId, LeadId, UserId};
use crate::model::{Agent, Category, Lead, LeadDetails, Organisation, User};
use crate::scope::LeadScope;

pub use memory::MemoryStore;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Infrastructure errors raised by a store backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Duplicate {field}: {value}")]
    Duplicate { field: &'static str, value: String },

    /// A lead would point at an agent or category its organisation lacks.
    #[error("Dangling {entity} reference")]
    DanglingReference { entity: &'static str },

    /// The record to update is gone.
    #[error("{entity} missing")]
    Missing { entity: &'static str },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// A single-record lead mutation, applied by the store under its own lock
/// after the scope predicate has matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadChange {
    Form {
        details: LeadDetails,
        agent: Option<AgentId>,
        category: Option<CategoryId>,
    },
    Agent(Option<AgentId>),
    Category(Option<CategoryId>),
}

impl LeadChange {
    pub fn apply(self, lead: &mut Lead) {
        match self {
            LeadChange::Form {
                details,
                agent,
                category,
            } => {
                lead.details = details;
                lead.agent = agent;
                lead.category = category;
            }
            LeadChange::Agent(agent) => lead.agent = agent,
            LeadChange::Category(category) => lead.category = category,
        }
    }
}

/// Persistence collaborator.
///
/// Tenant-owned reads and writes take the caller's [`TenantContext`] (or a
/// [`LeadScope`], which carries one) and must never return or touch records
/// of another tenant. Each method is one atomic unit: the scope check and the
/// mutation happen together.
#[async_trait]
pub trait CrmStore: Send + Sync {
    /// Create an organisor user together with its organisation.
    async fn insert_organisor_account(&self, user: User, organisation: Organisation) -> StoreResult<()>;

    /// Create an agent user together with its agent record.
    async fn insert_agent_account(&self, user: User, agent: Agent) -> StoreResult<()>;

    async fn get_user(&self, id: &UserId) -> StoreResult<Option<User>>;

    /// Replace a user's profile fields. Username/email stay unique;
    /// `Missing` if the user no longer exists.
    async fn update_user(&self, user: User) -> StoreResult<()>;

    async fn organisation_of_owner(&self, owner: &UserId) -> StoreResult<Option<Organisation>>;

    async fn agent_for_user(&self, user: &UserId) -> StoreResult<Option<Agent>>;

    async fn get_agent(&self, ctx: &TenantContext, id: &AgentId) -> StoreResult<Option<Agent>>;

    async fn find_agents(&self, ctx: &TenantContext) -> StoreResult<Vec<Agent>>;

    /// Remove an agent and its user, and unassign its leads.
    async fn remove_agent(&self, ctx: &TenantContext, id: &AgentId) -> StoreResult<Option<Agent>>;

    async fn insert_category(&self, category: Category) -> StoreResult<()>;

    async fn get_category(&self, ctx: &TenantContext, id: &CategoryId) -> StoreResult<Option<Category>>;

    async fn find_categories(&self, ctx: &TenantContext) -> StoreResult<Vec<Category>>;

    /// Remove a category and clear it from its leads.
    async fn remove_category(&self, ctx: &TenantContext, id: &CategoryId) -> StoreResult<Option<Category>>;

    /// `DanglingReference` if the lead's agent or category is not in its
    /// organisation at write time.
    async fn insert_lead(&self, lead: Lead) -> StoreResult<()>;

    /// Leads matching `scope`, ordered by `date_added` then id.
    async fn find_leads(&self, scope: &LeadScope) -> StoreResult<Vec<Lead>>;

    async fn count_leads(&self, scope: &LeadScope) -> StoreResult<usize>;

    async fn get_lead(&self, scope: &LeadScope, id: &LeadId) -> StoreResult<Option<Lead>>;

    /// Apply `change` if the lead matches `scope`; `None` when it does not.
    /// The resulting agent and category are re-checked against the lead's
    /// organisation under the same lock (`DanglingReference`).
    async fn modify_lead(
        &self,
        scope: &LeadScope,
        id: &LeadId,
        change: LeadChange,
    ) -> StoreResult<Option<Lead>>;

    async fn remove_lead(&self, scope: &LeadScope, id: &LeadId) -> StoreResult<Option<Lead>>;
}
