use chrono::Utc;
use tracing::{info, instrument};

use super::AccessScopeResolver;
use crate::credentials::hash_password;
use crate::error::{AccessError, AccessResult};
use crate::ids::{OrganisationId, UserId};
use crate::model::{Organisation, SignupForm, User, UserRole};
use crate::principal::Principal;

impl AccessScopeResolver {
    /// Register an organisor; its organisation is created alongside.
    #[instrument(skip(self, form), fields(username = %form.username))]
    pub async fn signup(&self, form: SignupForm) -> AccessResult<Principal> {
        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username: form.username,
            email: form.email,
            first_name: form.first_name,
            last_name: form.last_name,
            role: UserRole::Organisor,
            password_hash: Some(hash_password(&form.password, self.settings.bcrypt_cost)?),
            date_joined: now,
        };
        let organisation = Organisation {
            id: OrganisationId::new(),
            owner: user.id,
            created_at: now,
        };
        let principal = Principal::organisor(user.id, organisation.id);

        self.store
            .insert_organisor_account(user, organisation)
            .await?;
        info!(org = %principal.organisation(), "organisation created");
        Ok(principal)
    }

    /// Build the principal for an authenticated user id.
    ///
    /// Users the store does not know, or whose role record is missing, come
    /// back as `NotFound`.
    pub async fn principal_for_user(&self, user: UserId) -> AccessResult<Principal> {
        let user = self
            .store
            .get_user(&user)
            .await?
            .ok_or(AccessError::not_found("user"))?;

        match user.role {
            UserRole::Organisor => {
                let organisation = self
                    .store
                    .organisation_of_owner(&user.id)
                    .await?
                    .ok_or(AccessError::not_found("organisation"))?;
                Ok(Principal::organisor(user.id, organisation.id))
            }
            UserRole::Agent => {
                let agent = self
                    .store
                    .agent_for_user(&user.id)
                    .await?
                    .ok_or(AccessError::not_found("agent"))?;
                Ok(Principal::agent(user.id, agent.id, agent.organisation))
            }
        }
    }
}
