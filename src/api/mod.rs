//! Backend calls the preference editor depends on.

pub mod client;

use async_trait::async_trait;

pub use client::HttpApi;

use crate::core::{
    BoardOption,
    FrameworkCategory,
    PrefError,
    UpdateUserRequest,
    UserPreference,
};

#[async_trait]
pub trait PreferenceApi: Send + Sync {
    /// Id of the organisation whose channel supplies the default frameworks.
    async fn custodian_org_id(&self) -> Result<String, PrefError>;

    async fn channel_frameworks(&self, org_id: &str) -> Result<Vec<BoardOption>, PrefError>;

    async fn framework_categories(
        &self,
        framework_id: &str,
    ) -> Result<Vec<FrameworkCategory>, PrefError>;

    async fn update_user(&self, request: &UpdateUserRequest) -> Result<(), PrefError>;

    async fn read_user(&self) -> Result<UserPreference, PrefError>;
}
