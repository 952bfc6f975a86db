//! Widget configuration from TOML (`[widget]` section)

use super::ConfigValidationError;
use deskchat_domain::{Channel, DEFAULT_CONTACT_PHONE};
use serde::{Deserialize, Serialize};

/// Raw widget configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWidgetConfig {
    /// `web` or `whatsapp`
    pub channel: String,
    /// Phone number quoted when a turn fails
    pub contact_phone: String,
}

impl Default for FileWidgetConfig {
    fn default() -> Self {
        Self {
            channel: Channel::default().as_str().to_string(),
            contact_phone: DEFAULT_CONTACT_PHONE.to_string(),
        }
    }
}

impl FileWidgetConfig {
    pub fn parse_channel(&self) -> (Channel, Option<ConfigValidationError>) {
        match self.channel.parse::<Channel>() {
            Ok(channel) => (channel, None),
            Err(_) => (
                Channel::default(),
                Some(ConfigValidationError::UnknownChannel(self.channel.clone())),
            ),
        }
    }

    pub fn parse_contact_phone(&self) -> (String, Option<ConfigValidationError>) {
        let phone = self.contact_phone.trim();
        if phone.is_empty() {
            (
                DEFAULT_CONTACT_PHONE.to_string(),
                Some(ConfigValidationError::EmptyContactPhone),
            )
        } else {
            (phone.to_string(), None)
        }
    }
}
