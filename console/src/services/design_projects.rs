//! Design project queries and mutations

use shared::forms::DesignProjectForm;
use shared::messages;
use shared::models::DesignProject;
use shared::types::QueryKey;

use super::ServiceContext;
use crate::error::ApiResult;

const LABEL: &str = "Proyecto";

pub struct DesignProjectService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DesignProjectService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    pub async fn list(&self) -> ApiResult<Vec<DesignProject>> {
        let api = &self.ctx.api;
        self.ctx
            .cached(QueryKey::DesignProjects.into(), || {
                api.list_design_projects()
            })
            .await
    }

    pub async fn get(&self, id: &str) -> ApiResult<DesignProject> {
        let result = self.ctx.api.get_design_project(id).await;
        self.ctx.report(result)
    }

    pub async fn create(&self, form: &DesignProjectForm) -> ApiResult<DesignProject> {
        let result = self.ctx.api.create_design_project(form).await;
        let envelope = self.ctx.report(result)?;
        self.ctx.patch_upsert(QueryKey::DesignProjects, &envelope.data);
        self.ctx
            .toasts
            .success(envelope.message.unwrap_or_else(|| messages::created(LABEL)));
        Ok(envelope.data)
    }

    pub async fn update(&self, id: &str, form: &DesignProjectForm) -> ApiResult<DesignProject> {
        let result = self.ctx.api.update_design_project(id, form).await;
        let envelope = self.ctx.report(result)?;
        self.ctx.patch_upsert(QueryKey::DesignProjects, &envelope.data);
        self.ctx
            .toasts
            .success(envelope.message.unwrap_or_else(|| messages::updated(LABEL)));
        Ok(envelope.data)
    }

    pub async fn deactivate(&self, ids: &[String]) -> ApiResult<()> {
        let result = self.ctx.api.remove_design_projects(ids).await;
        self.ctx.report(result)?;
        self.ctx
            .patch_active::<DesignProject>(QueryKey::DesignProjects, ids, false);
        self.ctx.toasts.success(messages::deactivated(LABEL));
        Ok(())
    }

    pub async fn reactivate(&self, ids: &[String]) -> ApiResult<()> {
        let result = self.ctx.api.reactivate_design_projects(ids).await;
        self.ctx.report(result)?;
        self.ctx
            .patch_active::<DesignProject>(QueryKey::DesignProjects, ids, true);
        self.ctx.toasts.success(messages::reactivated(LABEL));
        Ok(())
    }
}
