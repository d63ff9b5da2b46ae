//! Pet-care backend REST client.
//!
//! # Endpoints
//!
//! - `GET /pets` - pets with populated `breedId`
//! - `GET /reports/pets/{petId}/latest` - latest report
//! - `GET /reports/pets/{petId}?month={Month}&year={YYYY}` - reports for one period
//!
//! Report endpoints may answer with a single object, an array, or an empty
//! body; see [`ReportPayload`].

use serde_json::Value;

use super::ReportSource;
use crate::error::FetchError;
use crate::model::{PeriodLabel, Pet, ReportPayload};

/// Default base URL for the pet-care API.
pub const PETCARE_API_BASE: &str = "http://localhost:4000/api/v1/petcare";

/// Longest error body kept in a [`FetchError::Status`].
const MAX_ERROR_BODY: usize = 200;

/// Client for the pet-care REST backend.
#[derive(Clone)]
pub struct PetCareClient {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

impl Default for PetCareClient {
    fn default() -> Self {
        Self::new(None)
    }
}

impl PetCareClient {
    /// Create a client against the default base URL.
    ///
    /// # Arguments
    ///
    /// * `api_token` - Optional token, sent verbatim as the `Authorization` header.
    pub fn new(api_token: Option<String>) -> Self {
        Self::with_base_url(PETCARE_API_BASE, api_token)
    }

    /// Create a client with a custom base URL.
    pub fn with_base_url(base_url: &str, api_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request with optional authentication.
    fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        let req = self.client.get(url);
        if let Some(token) = &self.api_token {
            req.header("Authorization", token.as_str())
        } else {
            req
        }
    }

    /// GET a URL and decode the body as JSON. An empty body is `null`.
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let response = self.build_request(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn latest_report_url(&self, pet_id: &str) -> String {
        format!(
            "{}/reports/pets/{}/latest",
            self.base_url,
            urlencoding::encode(pet_id)
        )
    }

    fn period_reports_url(&self, pet_id: &str, period: PeriodLabel) -> String {
        format!(
            "{}/reports/pets/{}?month={}&year={}",
            self.base_url,
            urlencoding::encode(pet_id),
            period.full_name(),
            period.year
        )
    }
}

impl ReportSource for PetCareClient {
    async fn list_pets(&self) -> Result<Vec<Pet>, FetchError> {
        let url = format!("{}/pets", self.base_url);
        let body = self.get_json(&url).await?;
        if body.is_null() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_value(body)?)
    }

    async fn latest_report(&self, pet_id: &str) -> Result<ReportPayload, FetchError> {
        let body = self.get_json(&self.latest_report_url(pet_id)).await?;
        Ok(ReportPayload::from_value(body)?)
    }

    async fn period_reports(
        &self,
        pet_id: &str,
        period: PeriodLabel,
    ) -> Result<ReportPayload, FetchError> {
        let body = self.get_json(&self.period_reports_url(pet_id, period)).await?;
        Ok(ReportPayload::from_value(body)?)
    }
}
