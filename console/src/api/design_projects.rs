//! Design project endpoints

use shared::forms::DesignProjectForm;
use shared::models::DesignProject;
use shared::types::Envelope;

use crate::error::ApiResult;
use crate::http::ApiClient;

impl ApiClient {
    pub async fn list_design_projects(&self) -> ApiResult<Vec<DesignProject>> {
        self.get_list("/design-project").await
    }

    pub async fn get_design_project(&self, id: &str) -> ApiResult<DesignProject> {
        self.get_one(&format!("/design-project/{}", id)).await
    }

    pub async fn create_design_project(
        &self,
        form: &DesignProjectForm,
    ) -> ApiResult<Envelope<DesignProject>> {
        self.post("/design-project", form).await
    }

    pub async fn update_design_project(
        &self,
        id: &str,
        form: &DesignProjectForm,
    ) -> ApiResult<Envelope<DesignProject>> {
        self.patch(&format!("/design-project/{}", id), form).await
    }

    pub async fn remove_design_projects(&self, ids: &[String]) -> ApiResult<()> {
        self.remove_all("design-project", ids).await
    }

    pub async fn reactivate_design_projects(&self, ids: &[String]) -> ApiResult<()> {
        self.reactivate_all("design-project", ids).await
    }
}
