use chrono::Utc;
use serde_json::json;
use tracing::{info, instrument};

use super::AccessScopeResolver;
use crate::credentials::{hash_password, one_time_password};
use crate::error::{AccessError, AccessResult};
use crate::ids::{AgentId, UserId};
use crate::model::{Agent, AgentCredentials, AgentProfile, User, UserRole};
use crate::notify::NotificationKind;
use crate::principal::Principal;

const AGENT_INVITED_SUBJECT: &str = "You are invited to be an agent";
const AGENT_INVITED_MESSAGE: &str = "You were added as an agent. Please login to start.";

impl AccessScopeResolver {
    /// Invite a new agent into the organisor's organisation.
    ///
    /// The generated one-time password only ever leaves through the
    /// `AgentInvited` notification; the store keeps its bcrypt hash.
    #[instrument(skip(self, principal, credentials), fields(org = %principal.organisation()))]
    pub async fn create_agent(
        &self,
        principal: &Principal,
        credentials: AgentCredentials,
    ) -> AccessResult<AgentProfile> {
        let ctx = Self::require_organisor(principal, "create agent")?;

        let password = one_time_password(self.settings.otp_length);
        let user = User {
            id: UserId::new(),
            username: credentials.username,
            email: credentials.email,
            first_name: credentials.first_name,
            last_name: credentials.last_name,
            role: UserRole::Agent,
            password_hash: Some(hash_password(&password, self.settings.bcrypt_cost)?),
            date_joined: Utc::now(),
        };
        let agent = Agent {
            id: AgentId::new(),
            user: user.id,
            organisation: ctx.tenant_id,
        };
        self.store
            .insert_agent_account(user.clone(), agent.clone())
            .await?;
        info!(agent = %agent.id, user = %user.id, "agent created");

        self.dispatch(
            NotificationKind::AgentInvited,
            user.email.clone(),
            AGENT_INVITED_SUBJECT,
            AGENT_INVITED_MESSAGE,
            json!({
                "username": user.username,
                "one_time_password": password,
                "organisation": agent.organisation,
            }),
        )
        .await;

        Ok(AgentProfile { agent, user })
    }

    pub async fn list_agents(&self, principal: &Principal) -> AccessResult<Vec<AgentProfile>> {
        let ctx = Self::require_organisor(principal, "list agents")?;
        let agents = self.store.find_agents(&ctx).await?;

        let mut profiles = Vec::with_capacity(agents.len());
        for agent in agents {
            let Some(user) = self.store.get_user(&agent.user).await? else {
                tracing::warn!(agent = %agent.id, "agent without user record skipped");
                continue;
            };
            profiles.push(AgentProfile { agent, user });
        }
        Ok(profiles)
    }

    pub async fn agent_detail(&self, principal: &Principal, agent: AgentId) -> AccessResult<AgentProfile> {
        let ctx = Self::require_organisor(principal, "view agent")?;
        let agent = self
            .store
            .get_agent(&ctx, &agent)
            .await?
            .ok_or(AccessError::not_found("agent"))?;
        let user = self
            .store
            .get_user(&agent.user)
            .await?
            .ok_or(AccessError::not_found("agent"))?;
        Ok(AgentProfile { agent, user })
    }

    /// Edit an agent's profile fields. Role and credential are untouched.
    #[instrument(skip(self, principal, credentials), fields(org = %principal.organisation()))]
    pub async fn update_agent(
        &self,
        principal: &Principal,
        agent: AgentId,
        credentials: AgentCredentials,
    ) -> AccessResult<AgentProfile> {
        Self::require_organisor(principal, "update agent")?;
        let AgentProfile { agent, mut user } = self.agent_detail(principal, agent).await?;

        user.username = credentials.username;
        user.email = credentials.email;
        user.first_name = credentials.first_name;
        user.last_name = credentials.last_name;
        self.store.update_user(user.clone()).await?;
        info!(agent = %agent.id, "agent updated");

        Ok(AgentProfile { agent, user })
    }

    /// Remove an agent and its login; its leads fall back to unassigned.
    #[instrument(skip(self, principal), fields(org = %principal.organisation()))]
    pub async fn delete_agent(&self, principal: &Principal, agent: AgentId) -> AccessResult<Agent> {
        let ctx = Self::require_organisor(principal, "delete agent")?;
        let removed = self
            .store
            .remove_agent(&ctx, &agent)
            .await?
            .ok_or(AccessError::not_found("agent"))?;
        info!(agent = %removed.id, "agent deleted");
        Ok(removed)
    }
}
