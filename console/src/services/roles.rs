//! Role and permission administration

use shared::forms::RoleForm;
use shared::messages;
use shared::models::{Permission, Role};
use shared::types::QueryKey;

use super::ServiceContext;
use crate::error::ApiResult;

const LABEL: &str = "Rol";

pub struct RoleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RoleService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    pub async fn list(&self) -> ApiResult<Vec<Role>> {
        let api = &self.ctx.api;
        self.ctx
            .cached(QueryKey::Roles.into(), || api.list_roles())
            .await
    }

    pub async fn permissions(&self) -> ApiResult<Vec<Permission>> {
        let api = &self.ctx.api;
        self.ctx
            .cached(QueryKey::Permissions.into(), || api.list_permissions())
            .await
    }

    pub async fn get(&self, id: &str) -> ApiResult<Role> {
        let result = self.ctx.api.get_role(id).await;
        self.ctx.report(result)
    }

    pub async fn create(&self, form: &RoleForm) -> ApiResult<Role> {
        let result = self.ctx.api.create_role(form).await;
        let envelope = self.ctx.report(result)?;
        self.ctx.patch_upsert(QueryKey::Roles, &envelope.data);
        self.ctx
            .toasts
            .success(envelope.message.unwrap_or_else(|| messages::created(LABEL)));
        Ok(envelope.data)
    }

    pub async fn update(&self, id: &str, form: &RoleForm) -> ApiResult<Role> {
        let result = self.ctx.api.update_role(id, form).await;
        let envelope = self.ctx.report(result)?;
        self.ctx.patch_upsert(QueryKey::Roles, &envelope.data);
        self.ctx
            .toasts
            .success(envelope.message.unwrap_or_else(|| messages::updated(LABEL)));
        Ok(envelope.data)
    }

    pub async fn deactivate(&self, ids: &[String]) -> ApiResult<()> {
        let result = self.ctx.api.remove_roles(ids).await;
        self.ctx.report(result)?;
        self.ctx.patch_active::<Role>(QueryKey::Roles, ids, false);
        self.ctx.toasts.success(messages::deactivated(LABEL));
        Ok(())
    }

    pub async fn reactivate(&self, ids: &[String]) -> ApiResult<()> {
        let result = self.ctx.api.reactivate_roles(ids).await;
        self.ctx.report(result)?;
        self.ctx.patch_active::<Role>(QueryKey::Roles, ids, true);
        self.ctx.toasts.success(messages::reactivated(LABEL));
        Ok(())
    }
}
