use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Per-invocation state of an action. Nothing survives between invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    ConfirmationRequested,
    ConfirmationDeclined,
    Pending,
    Success,
    Failure,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::ConfirmationRequested => "confirmation_requested",
            Phase::ConfirmationDeclined => "confirmation_declined",
            Phase::Pending => "pending",
            Phase::Success => "success",
            Phase::Failure => "failure",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ActionTarget
// ---------------------------------------------------------------------------

/// The remote operation an action runs against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionTarget {
    VerifyIsp { isp_id: u64 },
    VerifyAll,
    ResendAlert { alerta_id: u64 },
    SendAlertEmail { isp_id: u64 },
    TestConnection { url: String },
}

impl ActionTarget {
    /// Identity used to refuse a second run while one is unresolved.
    ///
    /// Verifying and emailing the same ISP are different targets: the
    /// dashboard renders them as separate buttons.
    pub fn key(&self) -> String {
        match self {
            ActionTarget::VerifyIsp { isp_id } => format!("verify:isp:{isp_id}"),
            ActionTarget::VerifyAll => "verify:all".to_string(),
            ActionTarget::ResendAlert { alerta_id } => format!("resend:alerta:{alerta_id}"),
            ActionTarget::SendAlertEmail { isp_id } => format!("email:isp:{isp_id}"),
            ActionTarget::TestConnection { url } => format!("probe:{url}"),
        }
    }
}

impl fmt::Display for ActionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

// ---------------------------------------------------------------------------
// Presentation payloads
// ---------------------------------------------------------------------------

/// A blocking yes/no prompt shown before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub title: String,
    pub text: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

/// Title and body of a pending, success, or error indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    pub title: String,
    pub text: String,
}

impl Indicator {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

/// How the success indicator goes away before the follow-up refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dismissal {
    /// Closes itself after the workflow's display duration, or earlier if dismissed.
    Timed,
    /// Stays until the operator dismisses it.
    Manual,
}

// ---------------------------------------------------------------------------
// ActionRequest
// ---------------------------------------------------------------------------

/// Everything the workflow needs to drive one action. Discarded once settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub target: ActionTarget,
    /// `Some` when the operator must confirm before the call is made.
    pub confirmation: Option<Confirmation>,
    /// Describes the in-flight operation.
    pub pending: Indicator,
    pub success_title: String,
    pub success_dismissal: Dismissal,
    /// Shown when the failure carries no usable server message.
    pub failure_message: String,
}

// ---------------------------------------------------------------------------
// ActionResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Failure,
}

/// What the remote operation produced. Consumed once by the workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    pub outcome: Outcome,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl ActionResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Success,
            message: message.into(),
            payload: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Failure,
            message: message.into(),
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

// ---------------------------------------------------------------------------
// Settled
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Transport,
    Application,
}

/// Terminal state of one workflow run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Settled {
    /// The operator said no; nothing was sent.
    Declined,
    /// Another run against the same target is still unresolved.
    Busy,
    Succeeded {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        payload: Option<Value>,
    },
    Failed { kind: FailureKind, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_keys_are_distinct_per_button() {
        let verify = ActionTarget::VerifyIsp { isp_id: 3 };
        let email = ActionTarget::SendAlertEmail { isp_id: 3 };
        assert_eq!(verify.key(), "verify:isp:3");
        assert_ne!(verify.key(), email.key());
        assert_eq!(ActionTarget::VerifyAll.to_string(), "verify:all");
    }

    #[test]
    fn settled_serializes_with_state_tag() {
        let settled = Settled::Failed {
            kind: FailureKind::Application,
            message: "ISP no encontrado".into(),
        };
        let json = serde_json::to_value(&settled).unwrap();
        assert_eq!(json["state"], "failed");
        assert_eq!(json["kind"], "application");
        assert_eq!(json["message"], "ISP no encontrado");

        let declined = serde_json::to_value(Settled::Declined).unwrap();
        assert_eq!(declined, serde_json::json!({ "state": "declined" }));
    }

    #[test]
    fn succeeded_omits_missing_payload() {
        let json = serde_json::to_string(&Settled::Succeeded {
            message: "ok".into(),
            payload: None,
        })
        .unwrap();
        assert!(!json.contains("payload"));
    }
}
