//! Hub configuration.
//!
//! Values are fixed at room and connection construction time. The server
//! binary fills them from command-line flags.

use std::num::NonZeroUsize;

use crate::domain::{ConfigError, DeliveryPolicy};

/// Bytes reserved per connection for WebSocket reads and writes
pub const DEFAULT_SOCKET_BUFFER_SIZE: usize = 1024;

/// Messages buffered per client before it is evicted as a slow consumer
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HubConfig {
    socket_buffer_size: usize,
    queue_capacity: NonZeroUsize,
    delivery_policy: DeliveryPolicy,
}

impl HubConfig {
    /// Create a validated configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the queue capacity or the socket buffer size is zero.
    pub fn new(
        socket_buffer_size: usize,
        queue_capacity: usize,
        delivery_policy: DeliveryPolicy,
    ) -> Result<Self, ConfigError> {
        if socket_buffer_size == 0 {
            return Err(ConfigError::ZeroSocketBufferSize);
        }
        let queue_capacity =
            NonZeroUsize::new(queue_capacity).ok_or(ConfigError::ZeroQueueCapacity)?;
        Ok(Self {
            socket_buffer_size,
            queue_capacity,
            delivery_policy,
        })
    }

    pub fn socket_buffer_size(&self) -> usize {
        self.socket_buffer_size
    }

    pub fn queue_capacity(&self) -> NonZeroUsize {
        self.queue_capacity
    }

    pub fn delivery_policy(&self) -> DeliveryPolicy {
        self.delivery_policy
    }
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            socket_buffer_size: DEFAULT_SOCKET_BUFFER_SIZE,
            queue_capacity: NonZeroUsize::new(DEFAULT_QUEUE_CAPACITY).unwrap_or(NonZeroUsize::MIN),
            delivery_policy: DeliveryPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        // テスト項目: デフォルト設定値
        // when (操作):
        let config = HubConfig::default();

        // then (期待する結果):
        assert_eq!(config.socket_buffer_size(), 1024);
        assert_eq!(config.queue_capacity().get(), 256);
        assert_eq!(config.delivery_policy(), DeliveryPolicy::EchoToSender);
    }

    #[test]
    fn test_new_rejects_zero_queue_capacity() {
        // テスト項目: キュー容量 0 はエラーになる
        // when (操作):
        let result = HubConfig::new(1024, 0, DeliveryPolicy::EchoToSender);

        // then (期待する結果):
        assert_eq!(result, Err(ConfigError::ZeroQueueCapacity));
    }

    #[test]
    fn test_new_rejects_zero_socket_buffer_size() {
        // テスト項目: バッファサイズ 0 はエラーになる
        // when (操作):
        let result = HubConfig::new(0, 8, DeliveryPolicy::EchoToSender);

        // then (期待する結果):
        assert_eq!(result, Err(ConfigError::ZeroSocketBufferSize));
    }

    #[test]
    fn test_new_accepts_custom_values() {
        // テスト項目: 正しい値であれば設定が作成される
        // when (操作):
        let config = HubConfig::new(4096, 2, DeliveryPolicy::ExcludeSender).unwrap();

        // then (期待する結果):
        assert_eq!(config.socket_buffer_size(), 4096);
        assert_eq!(config.queue_capacity().get(), 2);
        assert_eq!(config.delivery_policy(), DeliveryPolicy::ExcludeSender);
    }
}
