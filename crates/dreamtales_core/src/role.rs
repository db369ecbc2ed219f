//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Author of a message sent to the text provider.
///
/// # Examples
///
/// ```
/// use dreamtales_core::Role;
///
/// assert_eq!(Role::System.as_str(), "system");
/// assert_eq!(format!("{}", Role::User), "user");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System messages carry standing instructions such as content policy
    #[display("system")]
    System,
    /// User messages carry the story brief
    #[display("user")]
    User,
    /// Assistant messages are from the model
    #[display("assistant")]
    Assistant,
}

impl Role {
    /// Wire name used by chat-completion APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}
