use super::http::{HttpClient, HttpRequest};
use super::{DeliveryOutcome, Payload, SubmitStrategy};
use crate::bridge::HostBridge;

/// **NETWORK DELIVERY**
///
/// `POST`s the payload as JSON; closes the mini-app on a 2xx status and
/// reports a user-facing message otherwise.
#[derive(Debug)]
pub struct NetworkDelivery<C> {
    client: C,
    endpoint: String,
}

impl<C> NetworkDelivery<C> {
    pub fn new(client: C, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl<C: HttpClient> SubmitStrategy for NetworkDelivery<C> {
    async fn deliver<B: HostBridge>(&self, bridge: &mut B, payload: &Payload) -> DeliveryOutcome {
        let body = match payload.to_json() {
            Ok(body) => body,
            Err(err) => {
                log::error!("payload encoding failed: {}", err);
                return DeliveryOutcome::Failed {
                    message: err.message(),
                };
            }
        };

        let request = HttpRequest::post_json(self.endpoint.clone(), body);
        match self.client.send(request).await {
            Ok(response) if response.is_success() => {
                log::info!("payload accepted by {} ({})", self.endpoint, response.status_code);
                bridge.close();
                DeliveryOutcome::Delivered
            }
            Ok(response) => {
                log::error!("payload rejected by {} ({})", self.endpoint, response.status_code);
                DeliveryOutcome::Failed {
                    message: response.failure_message(),
                }
            }
            Err(err) => {
                log::error!("request to {} failed: {}", self.endpoint, err);
                DeliveryOutcome::Failed {
                    message: format!("Network error: {}", err.message()),
                }
            }
        }
    }
}
