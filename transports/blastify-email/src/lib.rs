use async_trait::async_trait;
use blastify_core::error::EngineError;
use blastify_core::transport::{Channel, ChannelTransport};
use tracing::info;

/// Email delivery behind the transport seam. No provider is integrated;
/// the send is logged and reported as delivered.
pub struct EmailTransport {}

impl EmailTransport {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl ChannelTransport for EmailTransport {
    async fn send(&self, address: &str, message: &str) -> Result<(), EngineError> {
        info!("Sending email to {address}: {message}");
        Ok(())
    }

    fn channel(&self) -> Channel {
        Channel::Email
    }
}
