//! REST client for a hosted Stagehand-style session API.
//!
//! Each page operation is a single `POST` against `/sessions/{id}/<op>` and
//! answers with a `{success, data, message}` envelope. Streaming responses are
//! disabled so every call resolves to one JSON document.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::browser::{
    errors::BrowserError,
    session::{
        ActOptions, AgentOutcome, BrowserSession, ObservedElement, SessionFactory,
        SessionSettings,
    },
};

const USER_AGENT: &str = "Glean/0.1";

// Extraction and agent runs are slow; this is the transport's own ceiling.
static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(300))
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to build session API client")
});

#[derive(Debug, Clone)]
pub struct RemoteSessionFactory {
    base_url: String,
}

impl RemoteSessionFactory {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl SessionFactory for RemoteSessionFactory {
    fn create(&self, settings: SessionSettings) -> Result<Box<dyn BrowserSession>, BrowserError> {
        Ok(Box::new(RemoteSession {
            client: HTTP_CLIENT.clone(),
            base_url: self.base_url.clone(),
            settings,
            session_id: None,
        }))
    }
}

pub struct RemoteSession {
    client: Client,
    base_url: String,
    settings: SessionSettings,
    session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartData {
    session_id: String,
}

#[derive(Debug, Deserialize)]
struct ActData {
    success: bool,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct ExtractData {
    #[serde(default)]
    extraction: Option<String>,
}

impl RemoteSession {
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("x-bb-api-key", &self.settings.api_key)
            .header("x-bb-project-id", &self.settings.project_id)
            .header("x-model-api-key", &self.settings.model_api_key)
            .header("x-stream-response", "false")
    }

    fn op_url(&self, op: &str) -> Result<String, BrowserError> {
        let id = self
            .session_id
            .as_deref()
            .ok_or(BrowserError::NotInitialized)?;
        Ok(format!("{}/sessions/{}/{}", self.base_url, id, op))
    }

    async fn post<T: DeserializeOwned>(
        &self,
        url: String,
        body: Value,
    ) -> Result<Option<T>, BrowserError> {
        debug!(%url, "session api call");
        let response = self
            .authorized(self.client.post(url))
            .json(&body)
            .send()
            .await
            .map_err(BrowserError::from_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            return Err(BrowserError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| BrowserError::Protocol(e.to_string()))?;

        if !envelope.success {
            return Err(BrowserError::Api {
                status: status.as_u16(),
                message: envelope
                    .message
                    .unwrap_or_else(|| "request was not successful".to_string()),
            });
        }

        Ok(envelope.data)
    }

    async fn call<T: DeserializeOwned>(&self, op: &str, body: Value) -> Result<T, BrowserError> {
        let url = self.op_url(op)?;
        self.post(url, body)
            .await?
            .ok_or_else(|| BrowserError::Protocol(format!("{} returned no data", op)))
    }
}

#[async_trait]
impl BrowserSession for RemoteSession {
    #[instrument(skip_all, fields(model = %self.settings.model_name))]
    async fn init(&mut self) -> Result<(), BrowserError> {
        let body = json!({
            "modelName": self.settings.model_name,
            "browserbaseSessionCreateParams": {
                "projectId": self.settings.project_id,
                "browserSettings": {
                    "blockAds": self.settings.block_ads,
                    "viewport": self.settings.viewport,
                },
            },
        });
        let data: StartData = self
            .post(format!("{}/sessions/start", self.base_url), body)
            .await?
            .ok_or_else(|| BrowserError::Protocol("start returned no session".to_string()))?;
        debug!(session_id = %data.session_id, "session started");
        self.session_id = Some(data.session_id);
        Ok(())
    }

    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        let body = json!({ "url": url, "options": { "waitUntil": "domcontentloaded" } });
        let url = self.op_url("navigate")?;
        self.post::<Value>(url, body).await?;
        Ok(())
    }

    async fn act(&mut self, instruction: &str, options: ActOptions) -> Result<(), BrowserError> {
        let mut body = json!({ "action": instruction });
        if let Some(timeout) = options.timeout {
            body["timeoutMs"] = json!(timeout.as_millis() as u64);
        }
        let data: ActData = self.call("act", body).await?;
        if !data.success {
            return Err(BrowserError::Api {
                status: 200,
                message: data.message,
            });
        }
        Ok(())
    }

    async fn observe(&mut self, instruction: &str) -> Result<Vec<ObservedElement>, BrowserError> {
        self.call("observe", json!({ "instruction": instruction }))
            .await
    }

    async fn extract(&mut self, instruction: &str) -> Result<String, BrowserError> {
        let data: ExtractData = self
            .call("extract", json!({ "instruction": instruction }))
            .await?;
        Ok(data.extraction.unwrap_or_default())
    }

    async fn agent_execute(
        &mut self,
        goal: &str,
        max_steps: u32,
    ) -> Result<AgentOutcome, BrowserError> {
        let body = json!({
            "agentConfig": { "model": self.settings.model_name },
            "executeOptions": { "instruction": goal, "maxSteps": max_steps },
        });
        self.call("agentExecute", body).await
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        // Nothing was allocated remotely if start never answered.
        if self.session_id.is_none() {
            return Ok(());
        }
        let url = self.op_url("end")?;
        self.post::<Value>(url, json!({})).await?;
        self.session_id = None;
        Ok(())
    }
}
