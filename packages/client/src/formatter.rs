//! Message formatting utilities for client display.

use hiroba_shared::time::timestamp_to_jst_clock;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a received text message with its arrival time
    ///
    /// # Arguments
    ///
    /// * `content` - The text as broadcast by the hub
    /// * `received_at` - Unix timestamp of arrival (milliseconds)
    pub fn format_text_message(content: &str, received_at: i64) -> String {
        match timestamp_to_jst_clock(received_at) {
            Some(clock) => format!("\n[{}] {}\n", clock, content),
            None => format!("\n{}\n", content),
        }
    }

    /// Format a notice for a received binary message
    pub fn format_binary_message(len: usize) -> String {
        format!("\n(binary message, {} bytes)\n", len)
    }

    /// Format the notice printed once connected
    pub fn format_connected(url: &str) -> String {
        format!(
            "\nConnected to {}. Type messages and press Enter to send. Press Ctrl+C to exit.\n",
            url
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_text_message_with_clock() {
        // テスト項目: 受信時刻付きでメッセージが整形される
        // given (前提条件):
        // 2023-01-01 12:34:56 JST in milliseconds
        let received_at = 1672544096000;

        // when (操作):
        let result = MessageFormatter::format_text_message("hi", received_at);

        // then (期待する結果):
        assert_eq!(result, "\n[12:34:56] hi\n");
    }

    #[test]
    fn test_format_text_message_without_clock() {
        // テスト項目: 時刻に変換できない場合は本文のみ表示される
        // when (操作):
        let result = MessageFormatter::format_text_message("hi", i64::MAX);

        // then (期待する結果):
        assert_eq!(result, "\nhi\n");
    }

    #[test]
    fn test_format_binary_message() {
        // テスト項目: バイナリメッセージはサイズのみ表示される
        // when (操作):
        let result = MessageFormatter::format_binary_message(42);

        // then (期待する結果):
        assert_eq!(result, "\n(binary message, 42 bytes)\n");
    }

    #[test]
    fn test_format_connected_mentions_url() {
        let result = MessageFormatter::format_connected("ws://127.0.0.1:8080/ws");
        assert!(result.contains("ws://127.0.0.1:8080/ws"));
    }
}
