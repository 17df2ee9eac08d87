use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::errors::ApiError;
use crate::external::DataSource;
use crate::models::{
    BehaviorStats, CompositionData, NewOrder, Order, OrderPatch, PerformanceData, PortfolioSummary,
};
use crate::session::Credential;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct AiSummaryResponse {
    #[serde(default)]
    summary: String,
}

// FastAPI-style error payload.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// `DataSource` implementation over the tracker's HTTP API.
pub struct HttpDataSource {
    client: Client,
    base_url: String,
}

impl HttpDataSource {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Url::parse(base_url).map_err(|e| ApiError::Network(format!("invalid base url: {e}")))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_env() -> Result<Self, ApiError> {
        let base_url = std::env::var("PORTFOLIO_API_URL")
            .map_err(|_| ApiError::Network("PORTFOLIO_API_URL not set".into()))?;
        Self::new(&base_url)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = check_status(send(request).await?).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn execute_no_body(&self, request: RequestBuilder) -> Result<(), ApiError> {
        check_status(send(request).await?).await?;
        Ok(())
    }
}

async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
    request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    if !status.is_success() {
        let message = read_detail(response).await;
        debug!(status = status.as_u16(), %message, "request failed");
        return Err(ApiError::Http {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response)
}

async fn read_detail(response: Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(body) => serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.detail)
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    format!("HTTP {status}")
                } else {
                    body
                }
            }),
        Err(_) => format!("HTTP {status}"),
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn login(&self, email: &str, password: &str) -> Result<Credential, ApiError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let token: TokenResponse = self
            .execute(self.client.post(self.url("/login")).json(&body))
            .await?;
        Ok(Credential::new(token.access_token))
    }

    async fn register(&self, email: &str, password: &str) -> Result<Credential, ApiError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let token: TokenResponse = self
            .execute(self.client.post(self.url("/register")).json(&body))
            .await?;
        Ok(Credential::new(token.access_token))
    }

    async fn portfolio_summary(&self, credential: &Credential) -> Result<PortfolioSummary, ApiError> {
        self.execute(
            self.client
                .get(self.url("/portfolio/analysis"))
                .bearer_auth(credential.as_str()),
        )
        .await
    }

    async fn composition(&self, credential: &Credential) -> Result<CompositionData, ApiError> {
        self.execute(
            self.client
                .get(self.url("/portfolio/composition"))
                .bearer_auth(credential.as_str()),
        )
        .await
    }

    async fn performance(&self, credential: &Credential) -> Result<PerformanceData, ApiError> {
        self.execute(
            self.client
                .get(self.url("/portfolio/performance"))
                .bearer_auth(credential.as_str()),
        )
        .await
    }

    async fn behavior(&self, credential: &Credential) -> Result<BehaviorStats, ApiError> {
        self.execute(
            self.client
                .get(self.url("/portfolio/behavior"))
                .bearer_auth(credential.as_str()),
        )
        .await
    }

    async fn ai_summary(&self, credential: &Credential) -> Result<String, ApiError> {
        let response: AiSummaryResponse = self
            .execute(
                self.client
                    .post(self.url("/api/ai/summary"))
                    .bearer_auth(credential.as_str())
                    .json(&serde_json::json!({})),
            )
            .await?;
        Ok(response.summary)
    }

    async fn orders(&self, credential: &Credential) -> Result<Vec<Order>, ApiError> {
        self.execute(
            self.client
                .get(self.url("/orders"))
                .bearer_auth(credential.as_str()),
        )
        .await
    }

    async fn add_order(&self, credential: &Credential, order: &NewOrder) -> Result<Order, ApiError> {
        self.execute(
            self.client
                .post(self.url("/orders/add"))
                .bearer_auth(credential.as_str())
                .json(order),
        )
        .await
    }

    async fn update_order(
        &self,
        credential: &Credential,
        order_id: &str,
        patch: &OrderPatch,
    ) -> Result<Order, ApiError> {
        self.execute(
            self.client
                .put(self.url(&format!("/orders/update/{order_id}")))
                .bearer_auth(credential.as_str())
                .json(patch),
        )
        .await
    }

    async fn delete_order(&self, credential: &Credential, order_id: &str) -> Result<(), ApiError> {
        self.execute_no_body(
            self.client
                .delete(self.url(&format!("/orders/delete/{order_id}")))
                .bearer_auth(credential.as_str()),
        )
        .await
    }

    async fn delete_all_orders(&self, credential: &Credential) -> Result<(), ApiError> {
        self.execute_no_body(
            self.client
                .delete(self.url("/orders/all"))
                .bearer_auth(credential.as_str()),
        )
        .await
    }
}
