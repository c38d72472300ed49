use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::PreferenceApi;
use crate::{
    config::AppConfig,
    core::{
        http::{
            get_json,
            http_client,
            post_json,
        },
        BoardOption,
        FrameworkCategory,
        PrefError,
        UpdateUserRequest,
        UserPreference,
    },
};

const CUSTODIAN_ORG_PATH: &str = "/api/data/v1/system/settings/get/custodianOrgId";
const CHANNEL_READ_PATH: &str = "/api/channel/v1/read";
const FRAMEWORK_READ_PATH: &str = "/api/framework/v1/read";
const USER_UPDATE_PATH: &str = "/api/desktop/user/v1/update";
const USER_READ_PATH: &str = "/api/desktop/user/v1/read";
const FRAMEWORK_CATEGORIES: &str = "board,medium,gradeLevel,subject";

pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(config: &AppConfig) -> Result<Self, PrefError> {
        Ok(Self {
            client: http_client(config.request_timeout_secs)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Pulls a typed value out of a response envelope by JSON pointer.
pub(crate) fn extract<T: DeserializeOwned>(
    body: &Value,
    pointer: &'static str,
) -> Result<T, PrefError> {
    let value = body.pointer(pointer).ok_or(PrefError::MissingField(pointer))?;
    Ok(T::deserialize(value)?)
}

#[async_trait]
impl PreferenceApi for HttpApi {
    async fn custodian_org_id(&self) -> Result<String, PrefError> {
        let body = get_json(&self.client, &self.url(CUSTODIAN_ORG_PATH)).await?;
        extract(&body, "/result/response/value")
    }

    async fn channel_frameworks(&self, org_id: &str) -> Result<Vec<BoardOption>, PrefError> {
        let url = self.url(&format!("{CHANNEL_READ_PATH}/{org_id}"));
        let body = get_json(&self.client, &url).await?;
        extract(&body, "/result/channel/frameworks")
    }

    async fn framework_categories(
        &self,
        framework_id: &str,
    ) -> Result<Vec<FrameworkCategory>, PrefError> {
        let url = self.url(&format!(
            "{FRAMEWORK_READ_PATH}/{framework_id}?categories={FRAMEWORK_CATEGORIES}"
        ));
        let body = get_json(&self.client, &url).await?;
        extract(&body, "/result/framework/categories")
    }

    async fn update_user(&self, request: &UpdateUserRequest) -> Result<(), PrefError> {
        post_json(&self.client, &self.url(USER_UPDATE_PATH), request).await?;
        Ok(())
    }

    async fn read_user(&self) -> Result<UserPreference, PrefError> {
        let body = get_json(&self.client, &self.url(USER_READ_PATH)).await?;
        extract(&body, "/result")
    }
}
