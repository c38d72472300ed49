use std::time::Duration;

use reqwest::{
    header::USER_AGENT,
    Client,
    Response,
};

use crate::core::PrefError;

pub fn http_client(timeout_secs: u64) -> Result<Client, PrefError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| PrefError::Custom(format!("HTTP client build failed: {e}")))
}

pub async fn get_json(client: &Client, url: &str) -> Result<serde_json::Value, PrefError> {
    tracing::debug!(url, "GET");
    let resp = client.get(url).header(USER_AGENT, "content-prefs/0.1 (+reqwest)").send().await?;
    ensure_success(&resp)?;
    Ok(resp.json().await?)
}

pub async fn post_json<B: serde::Serialize + ?Sized>(
    client: &Client,
    url: &str,
    body: &B,
) -> Result<serde_json::Value, PrefError> {
    tracing::debug!(url, "POST");
    let resp = client
        .post(url)
        .header(USER_AGENT, "content-prefs/0.1 (+reqwest)")
        .json(body)
        .send()
        .await?;
    ensure_success(&resp)?;
    Ok(resp.json().await?)
}

fn ensure_success(resp: &Response) -> Result<(), PrefError> {
    if !resp.status().is_success() {
        return Err(PrefError::Status {
            status: resp.status().as_u16(),
            url: resp.url().to_string(),
        });
    }
    Ok(())
}
