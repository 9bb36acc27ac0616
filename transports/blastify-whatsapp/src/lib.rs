use async_trait::async_trait;
use blastify_core::error::EngineError;
use blastify_core::transport::{Channel, ChannelTransport};
use tracing::info;

/// WhatsApp delivery behind the transport seam. No provider is integrated;
/// the send is logged and reported as delivered.
pub struct WhatsAppTransport {}

impl WhatsAppTransport {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl ChannelTransport for WhatsAppTransport {
    async fn send(&self, address: &str, message: &str) -> Result<(), EngineError> {
        // Providers address phones in msisdn form, without the leading '+'
        let msisdn = address.strip_prefix('+').unwrap_or(address);
        info!("Sending WhatsApp message to {msisdn}: {message}");
        Ok(())
    }

    fn channel(&self) -> Channel {
        Channel::WhatsApp
    }
}
