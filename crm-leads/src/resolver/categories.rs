use tracing::{info, instrument};

use super::AccessScopeResolver;
use crate::error::{AccessError, AccessResult};
use crate::ids::CategoryId;
use crate::model::{Category, CategoryDetail};
use crate::principal::Principal;
use crate::scope::{CategoryFilter, LeadScope};

impl AccessScopeResolver {
    /// Categories of the principal's organisation, for either role.
    pub async fn scoped_categories(&self, principal: &Principal) -> AccessResult<Vec<Category>> {
        Ok(self.store.find_categories(&principal.tenant()).await?)
    }

    /// How many of the principal's visible leads have no category.
    pub async fn unassigned_lead_count(&self, principal: &Principal) -> AccessResult<usize> {
        let scope =
            LeadScope::for_principal(principal, true).with_category(CategoryFilter::Uncategorized);
        Ok(self.store.count_leads(&scope).await?)
    }

    /// A category and the leads in it that the principal may see.
    pub async fn category_detail(
        &self,
        principal: &Principal,
        category: CategoryId,
    ) -> AccessResult<CategoryDetail> {
        let category = self
            .store
            .get_category(&principal.tenant(), &category)
            .await?
            .ok_or(AccessError::not_found("category"))?;

        let scope = LeadScope::for_principal(principal, true)
            .with_category(CategoryFilter::Only(category.id));
        let leads = self.store.find_leads(&scope).await?;

        Ok(CategoryDetail { category, leads })
    }

    #[instrument(skip(self, principal), fields(org = %principal.organisation()))]
    pub async fn create_category(
        &self,
        principal: &Principal,
        name: &str,
    ) -> AccessResult<Category> {
        let ctx = Self::require_organisor(principal, "create category")?;
        let category = Category {
            id: CategoryId::new(),
            organisation: ctx.tenant_id,
            name: name.to_string(),
        };
        self.store.insert_category(category.clone()).await?;
        info!(category = %category.id, "category created");
        Ok(category)
    }

    /// Delete a category; its leads become uncategorized.
    #[instrument(skip(self, principal), fields(org = %principal.organisation()))]
    pub async fn delete_category(
        &self,
        principal: &Principal,
        category: CategoryId,
    ) -> AccessResult<Category> {
        let ctx = Self::require_organisor(principal, "delete category")?;
        let removed = self
            .store
            .remove_category(&ctx, &category)
            .await?
            .ok_or(AccessError::not_found("category"))?;
        info!(category = %removed.id, "category deleted");
        Ok(removed)
    }
}
