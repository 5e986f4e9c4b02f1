//! Time-related utilities.

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};

/// JST is UTC+9
const JST_OFFSET_SECS: i32 = 9 * 3600;

fn jst() -> FixedOffset {
    // 9 hours is always within the valid offset range
    FixedOffset::east_opt(JST_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Get current Unix timestamp (milliseconds)
pub fn get_jst_timestamp() -> i64 {
    let now_jst: DateTime<FixedOffset> = Utc::now().with_timezone(&jst());
    now_jst.timestamp_millis()
}

/// Convert Unix timestamp (milliseconds) to a JST wall-clock time, `HH:MM:SS`.
///
/// Returns `None` for timestamps chrono cannot represent.
pub fn timestamp_to_jst_clock(timestamp_millis: i64) -> Option<String> {
    let dt = jst().timestamp_millis_opt(timestamp_millis).single()?;
    Some(dt.format("%H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_jst_timestamp_returns_positive_value() {
        // テスト項目: get_jst_timestamp が正の値を返す
        // when (操作):
        let timestamp = get_jst_timestamp();

        // then (期待する結果):
        assert!(timestamp > 0);
    }

    #[test]
    fn test_timestamp_to_jst_clock_format() {
        // テスト項目: タイムスタンプが JST の時刻表記に変換される
        // given (前提条件):
        // 2023-01-01 00:00:00 JST in milliseconds
        let timestamp = 1672498800123;

        // when (操作):
        let result = timestamp_to_jst_clock(timestamp);

        // then (期待する結果):
        assert_eq!(result.as_deref(), Some("00:00:00"));
    }

    #[test]
    fn test_timestamp_to_jst_clock_out_of_range() {
        // テスト項目: 表現できないタイムスタンプでは None が返される
        // when (操作):
        let result = timestamp_to_jst_clock(i64::MAX);

        // then (期待する結果):
        assert!(result.is_none());
    }
}
