//! Role and permission administration endpoints

use shared::forms::RoleForm;
use shared::models::{Permission, Role};
use shared::types::Envelope;

use crate::error::ApiResult;
use crate::http::ApiClient;

impl ApiClient {
    pub async fn list_roles(&self) -> ApiResult<Vec<Role>> {
        self.get_list("/rol").await
    }

    pub async fn get_role(&self, id: &str) -> ApiResult<Role> {
        self.get_one(&format!("/rol/{}", id)).await
    }

    pub async fn create_role(&self, form: &RoleForm) -> ApiResult<Envelope<Role>> {
        self.post("/rol", form).await
    }

    pub async fn update_role(&self, id: &str, form: &RoleForm) -> ApiResult<Envelope<Role>> {
        self.patch(&format!("/rol/{}", id), form).await
    }

    pub async fn remove_roles(&self, ids: &[String]) -> ApiResult<()> {
        self.remove_all("rol", ids).await
    }

    pub async fn reactivate_roles(&self, ids: &[String]) -> ApiResult<()> {
        self.reactivate_all("rol", ids).await
    }

    pub async fn list_permissions(&self) -> ApiResult<Vec<Permission>> {
        self.get_list("/permission").await
    }
}
