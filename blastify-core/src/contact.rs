use crate::transport::Channel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A recipient record produced by the file parser. The `id` is unique within
/// a single parsed batch only; re-uploads reassign ids from scratch.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Contact {
    /// The address a given channel delivers to. May be empty if the source
    /// row had no such column.
    pub fn address(&self, channel: Channel) -> &str {
        match channel {
            Channel::WhatsApp => &self.phone,
            Channel::Email => &self.email,
        }
    }
}
