use chrono::Utc;
use serde_json::json;
use tracing::{info, instrument};

use super::AccessScopeResolver;
use crate::error::{AccessError, AccessResult};
use crate::ids::{AgentId, CategoryId, LeadId};
use crate::model::{Lead, LeadForm};
use crate::notify::NotificationKind;
use crate::principal::Principal;
use crate::scope::LeadScope;
use crate::store::LeadChange;

const LEAD_CREATED_SUBJECT: &str = "A lead has been created";
const LEAD_CREATED_MESSAGE: &str = "Go to the site to see the new lead";

impl AccessScopeResolver {
    /// Leads visible to `principal`; see [`LeadScope::for_principal`].
    #[instrument(skip(self, principal), fields(org = %principal.organisation(), role = ?principal.role()))]
    pub async fn scoped_leads(
        &self,
        principal: &Principal,
        include_unassigned: bool,
    ) -> AccessResult<Vec<Lead>> {
        let scope = LeadScope::for_principal(principal, include_unassigned);
        Ok(self.store.find_leads(&scope).await?)
    }

    /// The organisation's leads with no agent; always empty for agents.
    pub async fn unassigned_leads(&self, principal: &Principal) -> AccessResult<Vec<Lead>> {
        match LeadScope::unassigned_for(principal) {
            Some(scope) => Ok(self.store.find_leads(&scope).await?),
            None => Ok(Vec::new()),
        }
    }

    pub async fn lead_detail(&self, principal: &Principal, lead: LeadId) -> AccessResult<Lead> {
        let scope = LeadScope::for_principal(principal, true);
        self.store
            .get_lead(&scope, &lead)
            .await?
            .ok_or(AccessError::not_found("lead"))
    }

    /// Create a lead in the organisor's organisation.
    ///
    /// Any organisation named in `form` is ignored.
    #[instrument(skip(self, principal, form), fields(org = %principal.organisation()))]
    pub async fn create_lead(&self, principal: &Principal, form: LeadForm) -> AccessResult<Lead> {
        let ctx = Self::require_organisor(principal, "create lead")?;
        self.check_agent_ref(&ctx, form.agent).await?;
        self.check_category_ref(&ctx, form.category).await?;

        let lead = Lead {
            id: LeadId::new(),
            organisation: ctx.tenant_id,
            agent: form.agent,
            category: form.category,
            details: form.details,
            date_added: Utc::now(),
        };
        self.store.insert_lead(lead.clone()).await?;
        info!(lead = %lead.id, "lead created");

        let recipients = if self.settings.lead_created_recipients.is_empty() {
            self.store
                .get_user(&principal.user_id())
                .await?
                .map(|u| vec![u.email])
                .unwrap_or_default()
        } else {
            self.settings.lead_created_recipients.clone()
        };
        for recipient in recipients {
            self.dispatch(
                NotificationKind::LeadCreated,
                recipient,
                LEAD_CREATED_SUBJECT,
                LEAD_CREATED_MESSAGE,
                json!({ "lead_id": lead.id, "organisation": lead.organisation }),
            )
            .await;
        }

        Ok(lead)
    }

    #[instrument(skip(self, principal, form), fields(org = %principal.organisation()))]
    pub async fn update_lead(
        &self,
        principal: &Principal,
        lead: LeadId,
        form: LeadForm,
    ) -> AccessResult<Lead> {
        let ctx = Self::require_organisor(principal, "update lead")?;
        let scope = LeadScope::for_principal(principal, true);
        if self.store.get_lead(&scope, &lead).await?.is_none() {
            return Err(AccessError::not_found("lead"));
        }
        self.check_agent_ref(&ctx, form.agent).await?;
        self.check_category_ref(&ctx, form.category).await?;

        let change = LeadChange::Form {
            details: form.details,
            agent: form.agent,
            category: form.category,
        };
        let updated = self
            .store
            .modify_lead(&scope, &lead, change)
            .await?
            .ok_or(AccessError::not_found("lead"))?;
        info!(lead = %updated.id, "lead updated");
        Ok(updated)
    }

    #[instrument(skip(self, principal), fields(org = %principal.organisation()))]
    pub async fn delete_lead(&self, principal: &Principal, lead: LeadId) -> AccessResult<Lead> {
        Self::require_organisor(principal, "delete lead")?;
        let scope = LeadScope::for_principal(principal, true);
        let removed = self
            .store
            .remove_lead(&scope, &lead)
            .await?
            .ok_or(AccessError::not_found("lead"))?;
        info!(lead = %removed.id, "lead deleted");
        Ok(removed)
    }

    /// Point a lead at one of the organisation's agents. Re-assigning the
    /// current agent succeeds without changing anything.
    #[instrument(skip(self, principal), fields(org = %principal.organisation()))]
    pub async fn assign_agent(
        &self,
        principal: &Principal,
        lead: LeadId,
        agent: AgentId,
    ) -> AccessResult<Lead> {
        let ctx = Self::require_organisor(principal, "assign agent")?;
        let scope = LeadScope::for_principal(principal, true);
        if self.store.get_lead(&scope, &lead).await?.is_none() {
            return Err(AccessError::not_found("lead"));
        }
        self.check_agent_ref(&ctx, Some(agent)).await?;

        let assigned = self
            .store
            .modify_lead(&scope, &lead, LeadChange::Agent(Some(agent)))
            .await?
            .ok_or(AccessError::not_found("lead"))?;
        info!(lead = %assigned.id, agent = %agent, "agent assigned");
        Ok(assigned)
    }

    /// Set or clear a lead's category. Agents may only categorize leads
    /// assigned to them.
    #[instrument(skip(self, principal), fields(org = %principal.organisation(), role = ?principal.role()))]
    pub async fn update_lead_category(
        &self,
        principal: &Principal,
        lead: LeadId,
        category: Option<CategoryId>,
    ) -> AccessResult<Lead> {
        let scope = LeadScope::for_principal(principal, true);
        if self.store.get_lead(&scope, &lead).await?.is_none() {
            return Err(AccessError::not_found("lead"));
        }
        self.check_category_ref(&scope.tenant, category).await?;

        let updated = self
            .store
            .modify_lead(&scope, &lead, LeadChange::Category(category))
            .await?
            .ok_or(AccessError::not_found("lead"))?;
        info!(lead = %updated.id, category = ?category, "lead category updated");
        Ok(updated)
    }
}
