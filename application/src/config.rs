//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave.

use deskchat_domain::DEFAULT_CONTACT_PHONE;

/// Application behavior configuration.
#[derive(Debug, Clone)]
pub struct BehaviorConfig {
    /// Phone number quoted in the fallback message after a failed turn.
    pub contact_phone: String,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            contact_phone: DEFAULT_CONTACT_PHONE.to_string(),
        }
    }
}

impl BehaviorConfig {
    pub fn with_contact_phone(mut self, phone: impl Into<String>) -> Self {
        self.contact_phone = phone.into();
        self
    }
}
