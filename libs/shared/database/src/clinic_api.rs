use anyhow::{Result, anyhow};
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

/// Thin JSON client for the clinic records REST service. All appointment
/// reads go through here; this crate never writes appointment data.
pub struct ClinicApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ClinicApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.clinic_api_url.clone(),
            api_key: config.clinic_api_key.clone(),
        }
    }

    fn get_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Ok(key) = HeaderValue::from_str(&self.api_key) {
            headers.insert("x-api-key", key);
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        headers
    }

    pub async fn request<T>(&self, method: Method, path: &str, body: Option<Value>) -> Result<T>
    where T: DeserializeOwned {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making request to {}", url);

        let mut req = self.client.request(method, &url)
            .headers(self.get_headers());

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("API error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                401 | 403 => anyhow!("Authentication error: {}", error_text),
                404 => anyhow!("Resource not found: {}", error_text),
                _ => anyhow!("API error ({}): {}", status, error_text),
            });
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    /// Fetch every appointment assigned to a doctor, optionally excluding one
    /// appointment id (used when re-validating an edit against the schedule).
    /// Returns raw JSON values; callers decode into their own models.
    pub async fn fetch_doctor_appointments(
        &self,
        doctor_id: &str,
        exclude_id: Option<&str>,
    ) -> Result<Vec<Value>> {
        let mut query_parts = vec![format!("doctorId={}", doctor_id)];

        if let Some(exclude) = exclude_id {
            query_parts.push(format!("excludeId={}", exclude));
        }

        let path = format!("/api/appointments?{}", query_parts.join("&"));

        self.request(Method::GET, &path, None).await
    }

    pub fn get_base_url(&self) -> &str {
        &self.base_url
    }
}
