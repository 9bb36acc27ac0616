use crate::error::EngineError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;
use utoipa::ToSchema;

/// Delivery channel selected for a dispatch.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    WhatsApp,
    Email,
}

impl Display for Channel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::WhatsApp => write!(f, "whatsapp"),
            Channel::Email => write!(f, "email"),
        }
    }
}

impl FromStr for Channel {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "whatsapp" => Ok(Channel::WhatsApp),
            "email" => Ok(Channel::Email),
            other => Err(EngineError::InvalidChannel(other.to_owned())),
        }
    }
}

/// Transport capability. The concrete provider behind a channel is an
/// external collaborator; the engine only sees this seam.
#[async_trait]
pub trait ChannelTransport: Send + Sync {
    async fn send(&self, address: &str, message: &str) -> Result<(), EngineError>;

    fn channel(&self) -> Channel;
}

#[derive(Default)]
pub struct TransportRegistry {
    transports: HashMap<Channel, Arc<dyn ChannelTransport>>,
}

impl TransportRegistry {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn register(&mut self, transport: Arc<dyn ChannelTransport>) {
        self.transports.insert(transport.channel(), transport);
    }

    pub fn get(&self, channel: Channel) -> Option<&Arc<dyn ChannelTransport>> {
        self.transports.get(&channel)
    }

    pub fn supported_channels(&self) -> impl Iterator<Item = Channel> + '_ {
        self.transports.keys().copied()
    }
}
