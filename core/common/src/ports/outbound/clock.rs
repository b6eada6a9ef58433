//! 時刻 Outbound ポート
//!
//! usecase はこの trait 経由で「現在時刻」を取得し、履歴のタイムスタンプや表示時刻に使う。

/// 時刻取得の抽象
///
/// 実装は `common::adapter::StdClock` やテスト用の固定時刻など。
pub trait Clock: Send + Sync {
    /// 現在時刻をミリ秒（Unix epoch）で返す
    fn now_ms(&self) -> u64;

    /// 現在時刻を RFC3339 (UTC) で返す
    fn now_rfc3339(&self) -> String {
        chrono::DateTime::from_timestamp_millis(self.now_ms() as i64)
            .unwrap_or_default()
            .to_rfc3339()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClock(u64);

    impl Clock for FixedClock {
        fn now_ms(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn test_now_rfc3339_from_fixed_ms() {
        let clock = FixedClock(1_700_000_000_000);
        assert_eq!(clock.now_rfc3339(), "2023-11-14T22:13:20+00:00");
    }
}
