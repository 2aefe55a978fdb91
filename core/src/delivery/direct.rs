use super::{DeliveryOutcome, Payload, SubmitStrategy};
use crate::bridge::HostBridge;

/// **DIRECT BRIDGE DELIVERY**
///
/// Serializes the payload, hands it to the host and closes the mini-app
/// without waiting for any acknowledgement. The mini-app is closed even when
/// the host refuses the data; the refusal is still reported as `Failed`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectDelivery;

impl SubmitStrategy for DirectDelivery {
    async fn deliver<B: HostBridge>(&self, bridge: &mut B, payload: &Payload) -> DeliveryOutcome {
        let sent = payload.to_json().and_then(|json| bridge.send_data(&json));
        bridge.close();
        match sent {
            Ok(()) => {
                log::info!("payload with {} fields sent through host bridge", payload.len());
                DeliveryOutcome::Delivered
            }
            Err(err) => {
                log::error!("host bridge rejected payload: {}", err);
                DeliveryOutcome::Failed {
                    message: err.message(),
                }
            }
        }
    }
}
