//! # AccessScopeResolver
//!
//! The single place that decides what a principal may see and change.
//!
//! Reads are scoped with [`LeadScope`] (organisors: the whole organisation,
//! agents: leads assigned to them). Writes check the role first, then the
//! scope, then every referenced record, and only then hand one atomic
//! change to the store.
//!
//! Error precedence for a write is therefore:
//! `PermissionDenied` → `NotFound` → `InvalidReference`.

mod accounts;
mod agents;
mod categories;
mod leads;

use std::sync::Arc;

use crm_core::TenantContext;
use serde_json::Value;

use crate::error::{AccessError, AccessResult};
use crate::ids::{AgentId, CategoryId};
use crate::notify::{Notification, NotificationKind, Notifier};
use crate::principal::Principal;
use crate::settings::LeadSettings;
use crate::store::CrmStore;

#[derive(Clone)]
pub struct AccessScopeResolver {
    store: Arc<dyn CrmStore>,
    notifier: Arc<dyn Notifier>,
    settings: Arc<LeadSettings>,
}

impl AccessScopeResolver {
    pub fn new(store: Arc<dyn CrmStore>, notifier: Arc<dyn Notifier>, settings: LeadSettings) -> Self {
        Self {
            store,
            notifier,
            settings: Arc::new(settings),
        }
    }

    pub fn store(&self) -> &Arc<dyn CrmStore> {
        &self.store
    }

    pub fn settings(&self) -> &LeadSettings {
        &self.settings
    }

    /// Tenant context of `principal` if it is an organisor.
    fn require_organisor(principal: &Principal, action: &'static str) -> AccessResult<TenantContext> {
        if principal.is_organisor() {
            Ok(principal.tenant())
        } else {
            tracing::debug!(user = %principal.user_id(), action, "organisor-only action refused");
            Err(AccessError::permission_denied(action))
        }
    }

    async fn check_agent_ref(&self, ctx: &TenantContext, agent: Option<AgentId>) -> AccessResult<()> {
        if let Some(id) = agent {
            if self.store.get_agent(ctx, &id).await?.is_none() {
                return Err(AccessError::invalid_reference("agent"));
            }
        }
        Ok(())
    }

    async fn check_category_ref(
        &self,
        ctx: &TenantContext,
        category: Option<CategoryId>,
    ) -> AccessResult<()> {
        if let Some(id) = category {
            if self.store.get_category(ctx, &id).await?.is_none() {
                return Err(AccessError::invalid_reference("category"));
            }
        }
        Ok(())
    }

    /// Fire-and-forget delivery: failures are logged, never propagated.
    async fn dispatch(
        &self,
        kind: NotificationKind,
        recipient: String,
        subject: &str,
        message: &str,
        payload: Value,
    ) {
        let notification = Notification {
            kind,
            from: self.settings.from_address.clone(),
            recipient,
            subject: subject.to_string(),
            message: message.to_string(),
            payload,
        };
        let recipient = notification.recipient.clone();

        if let Err(e) = self.notifier.notify(notification).await {
            tracing::warn!(?kind, recipient = %recipient, "notification delivery failed: {e:#}");
        }
    }
}
