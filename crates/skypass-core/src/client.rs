//! Async HTTP client for the dashboard backend.
//!
//! Every call returns `Result<ActionResult, ActionError>` so it can be handed
//! straight to [`crate::ActionWorkflow::run`]. Bodies that are not JSON are
//! transport errors whatever the status code: the backend answers unknown ids
//! with an HTML 404 page.

use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::{ActionError, Result, SkypassError};
use crate::types::{ActionResult, ActionTarget};

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

/// Body of `GET /verificar_dispositivos/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCount {
    pub dispositivos_actuales: Option<u64>,
    #[serde(default)]
    pub limite_clientes: Option<u64>,
    /// `"normal"` or `"sobrepasado"`.
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl DeviceCount {
    pub fn over_limit(&self) -> bool {
        self.estado.as_deref() == Some("sobrepasado")
    }
}

/// The `{ success, message }` shape shared by the alert endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /probar_conexion`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionProbe {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub dispositivos: Option<u64>,
    #[serde(default)]
    pub mensaje: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// DashboardClient
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct DashboardClient {
    http: reqwest::Client,
    base_url: Url,
    verify_all_path: String,
}

impl DashboardClient {
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let mut builder = reqwest::Client::builder();
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(config.request_timeout());
        }
        Ok(Self {
            http: builder.build()?,
            base_url,
            verify_all_path: config.verify_all_path.trim_matches('/').to_string(),
        })
    }

    /// URL of the endpoint behind `target`. Identifiers go into the path as-is.
    pub fn endpoint(&self, target: &ActionTarget) -> std::result::Result<Url, ActionError> {
        let path = match target {
            ActionTarget::VerifyIsp { isp_id } => format!("verificar_dispositivos/{isp_id}"),
            ActionTarget::VerifyAll => self.verify_all_path.clone(),
            ActionTarget::ResendAlert { alerta_id } => format!("reenviar_alerta/{alerta_id}"),
            ActionTarget::SendAlertEmail { isp_id } => format!("enviar_email_alerta/{isp_id}"),
            ActionTarget::TestConnection { .. } => "probar_conexion".to_string(),
        };
        self.base_url
            .join(&path)
            .map_err(|e| ActionError::Transport(format!("cannot build url for '{path}': {e}")))
    }

    pub async fn verify_devices(&self, isp_id: u64) -> std::result::Result<ActionResult, ActionError> {
        let url = self.endpoint(&ActionTarget::VerifyIsp { isp_id })?;
        let body = fetch_json(self.http.get(url)).await?;
        let count: DeviceCount = decode(&body)?;

        let Some(devices) = count.dispositivos_actuales else {
            return Err(ActionError::Application {
                message: count.message,
            });
        };
        debug!(isp_id, devices, over_limit = count.over_limit(), "device count received");
        Ok(ActionResult::success(format!("Dispositivos actualizados: {devices}")).with_payload(body))
    }

    pub async fn verify_all(&self) -> std::result::Result<ActionResult, ActionError> {
        let url = self.endpoint(&ActionTarget::VerifyAll)?;
        status_result(fetch_json(self.http.get(url)).await?)
    }

    pub async fn resend_alert(&self, alerta_id: u64) -> std::result::Result<ActionResult, ActionError> {
        let url = self.endpoint(&ActionTarget::ResendAlert { alerta_id })?;
        status_result(fetch_json(self.http.get(url)).await?)
    }

    pub async fn send_alert_email(&self, isp_id: u64) -> std::result::Result<ActionResult, ActionError> {
        let url = self.endpoint(&ActionTarget::SendAlertEmail { isp_id })?;
        status_result(fetch_json(self.http.get(url)).await?)
    }

    /// Ask the backend to probe a GenieACS server it does not know yet.
    pub async fn test_connection(&self, genieacs_url: &str) -> std::result::Result<ActionResult, ActionError> {
        let target = ActionTarget::TestConnection {
            url: genieacs_url.to_string(),
        };
        let url = self.endpoint(&target)?;
        let request = self
            .http
            .post(url)
            .json(&serde_json::json!({ "url": genieacs_url }));
        let body = fetch_json(request).await?;
        let probe: ConnectionProbe = decode(&body)?;

        if !probe.success {
            return Err(ActionError::Application {
                message: probe.error,
            });
        }
        let message = probe.mensaje.unwrap_or_else(|| {
            format!(
                "Conexión exitosa. Se encontraron {} dispositivos.",
                probe.dispositivos.unwrap_or(0)
            )
        });
        Ok(ActionResult::success(message).with_payload(body))
    }
}

// ---------------------------------------------------------------------------
// Internal
// ---------------------------------------------------------------------------

fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim()).map_err(|e| SkypassError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(SkypassError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    // `Url::join` replaces the last segment unless the path ends with '/'.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

async fn fetch_json(request: RequestBuilder) -> std::result::Result<Value, ActionError> {
    let response = request.send().await?;
    let status = response.status();
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| {
        ActionError::Transport(format!("HTTP {status}: response is not JSON: {e}"))
    })
}

fn decode<T: DeserializeOwned>(body: &Value) -> std::result::Result<T, ActionError> {
    serde_json::from_value(body.clone())
        .map_err(|e| ActionError::Transport(format!("unexpected response shape: {e}")))
}

fn status_result(body: Value) -> std::result::Result<ActionResult, ActionError> {
    let reply: StatusReply = decode(&body)?;
    let message = reply.message.unwrap_or_default();
    let result = if reply.success {
        ActionResult::success(message)
    } else {
        ActionResult::failure(message)
    };
    Ok(result.with_payload(body))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
