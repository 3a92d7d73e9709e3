//! The dashboard's action buttons, each bound to one backend endpoint.

use crate::client::DashboardClient;
use crate::types::{
    ActionRequest, ActionTarget, Confirmation, Dismissal, Indicator, Outcome, Settled,
};
use crate::workflow::ActionWorkflow;

const CANCEL_LABEL: &str = "Cancelar";
const CONNECTION_ERROR: &str = "Error de conexión";

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub fn verify_isp_request(isp_id: u64) -> ActionRequest {
    ActionRequest {
        target: ActionTarget::VerifyIsp { isp_id },
        confirmation: None,
        pending: Indicator::new("Verificando ISP...", "Conectando con GenieACS"),
        success_title: "¡Verificado!".to_string(),
        success_dismissal: Dismissal::Timed,
        failure_message: "Error al verificar el ISP".to_string(),
    }
}

pub fn verify_all_request() -> ActionRequest {
    ActionRequest {
        target: ActionTarget::VerifyAll,
        confirmation: Some(Confirmation {
            title: "¿Verificar todos los ISPs?".to_string(),
            text: "Se verificarán todos los ISPs conectados".to_string(),
            confirm_label: "Sí, verificar".to_string(),
            cancel_label: CANCEL_LABEL.to_string(),
        }),
        pending: Indicator::new(
            "Verificando todos los ISPs...",
            "Conectando con todos los servidores GenieACS",
        ),
        success_title: "¡Verificación completada!".to_string(),
        success_dismissal: Dismissal::Timed,
        failure_message: "Error al verificar los ISPs".to_string(),
    }
}

/// `isp_name` is only shown in the prompt; the request carries the alert id.
pub fn resend_alert_request(alerta_id: u64, isp_name: &str) -> ActionRequest {
    ActionRequest {
        target: ActionTarget::ResendAlert { alerta_id },
        confirmation: Some(Confirmation {
            title: "¿Reenviar alerta?".to_string(),
            text: format!("Se reenviará la alerta a {isp_name}"),
            confirm_label: "Sí, reenviar".to_string(),
            cancel_label: CANCEL_LABEL.to_string(),
        }),
        pending: Indicator::new("Reenviando alerta...", "Por favor espera"),
        success_title: "Alerta reenviada".to_string(),
        success_dismissal: Dismissal::Manual,
        failure_message: CONNECTION_ERROR.to_string(),
    }
}

pub fn send_alert_email_request(isp_id: u64, isp_name: &str) -> ActionRequest {
    ActionRequest {
        target: ActionTarget::SendAlertEmail { isp_id },
        confirmation: Some(Confirmation {
            title: "¿Enviar alerta por email?".to_string(),
            text: format!("Se enviará un email de alerta a {isp_name}"),
            confirm_label: "Sí, enviar".to_string(),
            cancel_label: CANCEL_LABEL.to_string(),
        }),
        pending: Indicator::new("Enviando alerta...", "Por favor espera"),
        success_title: "Alerta enviada".to_string(),
        success_dismissal: Dismissal::Manual,
        failure_message: CONNECTION_ERROR.to_string(),
    }
}

pub fn test_connection_request(url: &str) -> ActionRequest {
    ActionRequest {
        target: ActionTarget::TestConnection {
            url: url.to_string(),
        },
        confirmation: None,
        pending: Indicator::new("Probando conexión...", format!("Conectando con {url}")),
        success_title: "Conexión exitosa".to_string(),
        success_dismissal: Dismissal::Timed,
        failure_message: "Error al probar la conexión".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Binds a workflow to the backend client.
pub struct Dashboard {
    workflow: ActionWorkflow,
    client: DashboardClient,
}

impl Dashboard {
    pub fn new(workflow: ActionWorkflow, client: DashboardClient) -> Self {
        Self { workflow, client }
    }

    /// Verify one ISP right away; no confirmation.
    pub async fn verify_isp(&self, isp_id: u64) -> Settled {
        self.workflow
            .run(verify_isp_request(isp_id), || self.client.verify_devices(isp_id))
            .await
    }

    pub async fn verify_all(&self) -> Settled {
        self.workflow
            .run(verify_all_request(), || async {
                self.client.verify_all().await.map(|mut result| {
                    if result.outcome == Outcome::Success && result.message.trim().is_empty() {
                        result.message = "Todos los ISPs han sido verificados".to_string();
                    }
                    result
                })
            })
            .await
    }

    pub async fn resend_alert(&self, alerta_id: u64, isp_name: &str) -> Settled {
        self.workflow
            .run(resend_alert_request(alerta_id, isp_name), || {
                self.client.resend_alert(alerta_id)
            })
            .await
    }

    pub async fn send_alert_email(&self, isp_id: u64, isp_name: &str) -> Settled {
        self.workflow
            .run(send_alert_email_request(isp_id, isp_name), || {
                self.client.send_alert_email(isp_id)
            })
            .await
    }

    pub async fn test_connection(&self, url: &str) -> Settled {
        self.workflow
            .run(test_connection_request(url), || self.client.test_connection(url))
            .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::fake::{Event, FakePresenter, FakeRefresher};
    use crate::types::FailureKind;
    use std::sync::Arc;
    use std::time::Duration;

    struct Harness {
        dashboard: Dashboard,
        presenter: Arc<FakePresenter>,
        refresher: Arc<FakeRefresher>,
    }

    fn harness(server: &mockito::ServerGuard, presenter: FakePresenter) -> Harness {
        let presenter = Arc::new(presenter);
        let refresher = Arc::new(FakeRefresher::default());
        let workflow = ActionWorkflow::new(presenter.clone(), refresher.clone())
            .with_success_display(Duration::from_millis(10));
        let client = DashboardClient::new(&Config {
            base_url: server.url(),
            ..Config::default()
        })
        .unwrap();
        Harness {
            dashboard: Dashboard::new(workflow, client),
            presenter,
            refresher,
        }
    }

    #[tokio::test]
    async fn verify_isp_runs_without_confirmation() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/verificar_dispositivos/12")
            .with_status(200)
            .with_body(r#"{"dispositivos_actuales": 5, "limite_clientes": 4, "estado": "sobrepasado"}"#)
            .expect(1)
            .create_async()
            .await;
        let h = harness(&server, FakePresenter::never_dismissed());

        let settled = h.dashboard.verify_isp(12).await;
        mock.assert_async().await;

        assert!(matches!(
            &settled,
            Settled::Succeeded { message, .. } if message == "Dispositivos actualizados: 5"
        ));
        assert_eq!(h.refresher.count(), 1);
        assert!(!h
            .presenter
            .events()
            .iter()
            .any(|e| matches!(e, Event::Confirm(_))));
    }

    #[tokio::test]
    async fn verify_isp_transport_failure_uses_generic_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/verificar_dispositivos/12")
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;
        let h = harness(&server, FakePresenter::confirming());

        let settled = h.dashboard.verify_isp(12).await;

        assert_eq!(
            settled,
            Settled::Failed {
                kind: FailureKind::Transport,
                message: "Error al verificar el ISP".into(),
            }
        );
        assert_eq!(h.refresher.count(), 0);
    }

    #[tokio::test]
    async fn declined_resend_sends_nothing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let h = harness(&server, FakePresenter::declining());

        assert_eq!(h.dashboard.resend_alert(7, "Fibra Norte").await, Settled::Declined);
        assert_eq!(h.dashboard.resend_alert(7, "Fibra Norte").await, Settled::Declined);

        mock.assert_async().await;
        assert_eq!(
            h.presenter.events(),
            vec![
                Event::Confirm("Se reenviará la alerta a Fibra Norte".into()),
                Event::Confirm("Se reenviará la alerta a Fibra Norte".into()),
            ]
        );
    }

    #[tokio::test]
    async fn resend_failure_shows_server_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/reenviar_alerta/7")
            .with_status(200)
            .with_body(r#"{"success": false, "message": "ISP no encontrado"}"#)
            .create_async()
            .await;
        let h = harness(&server, FakePresenter::confirming());

        let settled = h.dashboard.resend_alert(7, "Fibra Norte").await;

        assert_eq!(
            settled,
            Settled::Failed {
                kind: FailureKind::Application,
                message: "ISP no encontrado".into(),
            }
        );
        assert_eq!(
            h.presenter.events().last(),
            Some(&Event::Error("Error".into(), "ISP no encontrado".into()))
        );
        assert_eq!(h.refresher.count(), 0);
    }

    #[tokio::test]
    async fn resend_success_refreshes_after_dismissal() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/reenviar_alerta/7")
            .with_status(200)
            .with_body(r#"{"success": true, "message": "Alerta reenviada correctamente a Fibra Norte"}"#)
            .create_async()
            .await;
        let h = harness(&server, FakePresenter::confirming());

        let settled = h.dashboard.resend_alert(7, "Fibra Norte").await;

        assert!(matches!(settled, Settled::Succeeded { .. }));
        assert!(h.presenter.events().contains(&Event::Success(
            "Alerta reenviada".into(),
            "Alerta reenviada correctamente a Fibra Norte".into()
        )));
        assert_eq!(h.refresher.count(), 1);
    }

    #[tokio::test]
    async fn verify_all_hits_real_endpoint_after_confirmation() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/verificar_todos")
            .with_status(200)
            .with_body(r#"{"success": true, "message": "", "verificados": 4}"#)
            .expect(1)
            .create_async()
            .await;
        let h = harness(&server, FakePresenter::never_dismissed());

        let settled = h.dashboard.verify_all().await;
        mock.assert_async().await;

        assert!(matches!(
            &settled,
            Settled::Succeeded { message, .. } if message == "Todos los ISPs han sido verificados"
        ));
        assert_eq!(
            h.presenter.events().first(),
            Some(&Event::Confirm("Se verificarán todos los ISPs conectados".into()))
        );
    }

    #[tokio::test]
    async fn send_alert_email_targets_isp_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/enviar_email_alerta/31")
            .with_status(200)
            .with_body(r#"{"success": false, "message": "No hay email configurado para este ISP"}"#)
            .expect(1)
            .create_async()
            .await;
        let h = harness(&server, FakePresenter::confirming());

        let settled = h.dashboard.send_alert_email(31, "Sur Net").await;
        mock.assert_async().await;

        assert_eq!(
            settled,
            Settled::Failed {
                kind: FailureKind::Application,
                message: "No hay email configurado para este ISP".into(),
            }
        );
    }
}
