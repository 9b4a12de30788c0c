use chrono::{DateTime, Utc};

/// Get current Unix timestamp in UTC (milliseconds)
pub fn get_utc_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format a Unix timestamp (milliseconds) as an RFC 3339 string in UTC.
///
/// Out-of-range values fall back to the Unix epoch.
pub fn timestamp_to_rfc3339(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_default()
        .to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_to_rfc3339() {
        // テスト項目: ミリ秒タイムスタンプを RFC 3339 文字列に変換できる
        // given (前提条件):
        let millis = 1_672_531_200_000;

        // when (操作):
        let formatted = timestamp_to_rfc3339(millis);

        // then (期待する結果):
        assert_eq!(formatted, "2023-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_get_utc_timestamp_is_recent() {
        // テスト項目: 現在時刻のタイムスタンプが 2023 年以降の値になる
        // when (操作):
        let now = get_utc_timestamp();

        // then (期待する結果):
        assert!(now > 1_672_531_200_000);
    }
}
