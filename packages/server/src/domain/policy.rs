//! Self-delivery policy for broadcasts.

use super::ClientId;

/// Whether a broadcast is delivered back to the member that sent it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryPolicy {
    /// Every member receives the message, the sender included.
    #[default]
    EchoToSender,
    /// Every member except the sender receives the message.
    ExcludeSender,
}

impl DeliveryPolicy {
    /// Returns `true` if a message from `sender` should be queued for `member`.
    pub fn delivers_to(&self, sender: &ClientId, member: &ClientId) -> bool {
        match self {
            Self::EchoToSender => true,
            Self::ExcludeSender => sender != member,
        }
    }
}
