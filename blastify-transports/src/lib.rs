use blastify_core::transport::ChannelTransport;
use blastify_email::EmailTransport;
use blastify_whatsapp::WhatsAppTransport;
use std::sync::Arc;

pub fn all_transports() -> Vec<Arc<dyn ChannelTransport>> {
    let mut transports: Vec<Arc<dyn ChannelTransport>> = vec![];

    transports.push(Arc::new(EmailTransport::new()));
    transports.push(Arc::new(WhatsAppTransport::new()));

    // Add more transports here...

    transports
}
