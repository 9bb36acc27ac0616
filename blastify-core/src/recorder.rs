use tracing::{error, info};
use uuid::Uuid;

pub trait Recorder: Send + Sync + 'static {
    fn record_message_sent(&self, request_id: Uuid, contact_id: &str);
    fn record_message_failed(&self, request_id: Uuid, contact_id: &str, error: &str);
}

pub struct BaseRecorder {}

impl BaseRecorder {
    pub fn new() -> Self {
        Self {}
    }
}

impl Recorder for BaseRecorder {
    fn record_message_sent(&self, request_id: Uuid, contact_id: &str) {
        info!("Message sent: {request_id}/{contact_id}");
    }

    fn record_message_failed(&self, request_id: Uuid, contact_id: &str, error: &str) {
        error!("Failed to send message: {request_id}/{contact_id} - {error}");
    }
}
