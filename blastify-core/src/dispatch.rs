use crate::contact::Contact;
use crate::error::EngineError;
use crate::recorder::Recorder;
use crate::transport::{Channel, ChannelTransport, TransportRegistry};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

/// One submit action: a snapshot of the selected contacts, the message text
/// and the chosen channel. Immutable once dispatch begins.
#[derive(Clone, Debug)]
pub struct DeliveryRequest {
    pub id: Uuid,
    pub contacts: Vec<Contact>,
    pub message: String,
    pub channel: Channel,
}

impl DeliveryRequest {
    pub fn new(contacts: Vec<Contact>, message: String, channel: Channel) -> Self {
        Self {
            id: Uuid::now_v7(),
            contacts,
            message,
            channel,
        }
    }
}

/// Per-recipient outcome of a dispatch.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOutcome {
    pub contact_id: String,
    pub channel: Channel,
    pub success: bool,
    pub error: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
pub enum DispatchStatus {
    Completed,
    CompletedWithFailures,
}

/// Aggregate result of a dispatch. `attempted` always equals the number of
/// recipients in the request; one recipient's failure never aborts the rest.
#[derive(Clone, Debug)]
pub struct DeliveryReport {
    pub request_id: Uuid,
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub status: DispatchStatus,
    pub outcomes: Vec<DeliveryOutcome>,
}

impl DeliveryReport {
    pub fn failures(&self) -> impl Iterator<Item = &DeliveryOutcome> {
        self.outcomes.iter().filter(|o| !o.success)
    }
}

/// How often a failed send is re-attempted before its failure is recorded.
/// The default makes exactly one attempt; retrying is strictly opt-in.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    pub attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { attempts: 1 }
    }
}

pub struct DispatchEngine {
    transports: TransportRegistry,
    recorder: Arc<dyn Recorder>,
    retry: RetryPolicy,
}

impl DispatchEngine {
    pub fn new(transports: TransportRegistry, recorder: Arc<dyn Recorder>, retry: RetryPolicy) -> Self {
        Self {
            transports,
            recorder,
            retry,
        }
    }

    /// Sends the message to every recipient in request order, awaiting each
    /// send before starting the next. Failures are captured per recipient
    /// and aggregated; only a missing transport fails the dispatch itself.
    pub async fn dispatch(&self, request: DeliveryRequest) -> Result<DeliveryReport, EngineError> {
        let transport = self
            .transports
            .get(request.channel)
            .ok_or(EngineError::TransportNotFound(request.channel))?;

        let mut outcomes = Vec::with_capacity(request.contacts.len());
        for contact in &request.contacts {
            let address = contact.address(request.channel);
            let result = self
                .send_with_retry(transport.as_ref(), address, &request.message)
                .await;

            match result {
                Ok(()) => {
                    self.recorder.record_message_sent(request.id, &contact.id);
                    outcomes.push(DeliveryOutcome {
                        contact_id: contact.id.clone(),
                        channel: request.channel,
                        success: true,
                        error: None,
                    });
                }
                Err(e) => {
                    self.recorder
                        .record_message_failed(request.id, &contact.id, &e.to_string());
                    outcomes.push(DeliveryOutcome {
                        contact_id: contact.id.clone(),
                        channel: request.channel,
                        success: false,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        let succeeded = outcomes.iter().filter(|o| o.success).count();
        let failed = outcomes.len() - succeeded;
        Ok(DeliveryReport {
            request_id: request.id,
            attempted: outcomes.len(),
            succeeded,
            failed,
            status: if failed == 0 {
                DispatchStatus::Completed
            } else {
                DispatchStatus::CompletedWithFailures
            },
            outcomes,
        })
    }

    async fn send_with_retry(
        &self,
        transport: &dyn ChannelTransport,
        address: &str,
        message: &str,
    ) -> Result<(), EngineError> {
        let attempts = self.retry.attempts.max(1);
        let mut result = transport.send(address, message).await;
        for _ in 1..attempts {
            if result.is_ok() {
                break;
            }
            result = transport.send(address, message).await;
        }
        result
    }
}
