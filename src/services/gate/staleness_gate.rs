use std::fmt;

/// 跳过本次运行的原因（不是错误）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// 代理已包含源预言机的最新数据
    AlreadySynchronized { source: u64, proxy: u64 },
    /// 代理更新时间距今不足刷新窗口
    UpdatedRecently { proxy: u64, now: u64, window_secs: u64 },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::AlreadySynchronized { source, proxy } => write!(
                f,
                "the oracle proxy is already synchronized (source {}, proxy {})",
                source, proxy
            ),
            SkipReason::UpdatedRecently {
                proxy,
                now,
                window_secs,
            } => write!(
                f,
                "the oracle proxy was updated {}s ago, less than the {}s window",
                now.saturating_sub(*proxy),
                window_secs
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    Skip(SkipReason),
}

/// 判断代理是否落后于源预言机且距上次刷新足够久
#[derive(Debug, Clone, Copy)]
pub struct StalenessGate {
    freshness_window_secs: u64,
}

impl StalenessGate {
    pub fn new(freshness_window_secs: u64) -> Self {
        Self {
            freshness_window_secs,
        }
    }

    pub fn evaluate(&self, source: u64, proxy: u64, now: u64) -> GateDecision {
        if source <= proxy {
            return GateDecision::Skip(SkipReason::AlreadySynchronized { source, proxy });
        }
        // 未来时间戳按"刚刚更新"处理
        if now < proxy || now - proxy < self.freshness_window_secs {
            return GateDecision::Skip(SkipReason::UpdatedRecently {
                proxy,
                now,
                window_secs: self.freshness_window_secs,
            });
        }
        GateDecision::Proceed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: u64 = 3600;

    #[test]
    fn source_not_newer_skips() {
        let gate = StalenessGate::new(HOUR);
        for (source, proxy) in [(500, 500), (400, 500), (0, 0)] {
            assert!(matches!(
                gate.evaluate(source, proxy, 1_000_000),
                GateDecision::Skip(SkipReason::AlreadySynchronized { .. })
            ));
        }
    }

    #[test]
    fn recent_proxy_update_skips_regardless_of_source() {
        let gate = StalenessGate::new(HOUR);
        let now = 10_000;
        for proxy in [now - HOUR + 1, now - 1, now] {
            assert!(matches!(
                gate.evaluate(u64::MAX, proxy, now),
                GateDecision::Skip(SkipReason::UpdatedRecently { .. })
            ));
        }
    }

    #[test]
    fn proxy_in_the_future_counts_as_recent() {
        let gate = StalenessGate::new(0);
        assert!(matches!(
            gate.evaluate(3_000, 2_000, 1_000),
            GateDecision::Skip(SkipReason::UpdatedRecently { .. })
        ));
    }

    #[test]
    fn stale_proxy_behind_source_proceeds() {
        let gate = StalenessGate::new(HOUR);
        assert_eq!(gate.evaluate(2_000, 500, 500 + HOUR), GateDecision::Proceed);
        assert_eq!(gate.evaluate(2_000, 500, 100_000), GateDecision::Proceed);
    }

    #[test]
    fn example_with_short_elapsed_time_skips() {
        // source=2000, proxy=500, now=2100: 1600s < 3600s
        let gate = StalenessGate::new(HOUR);
        assert!(matches!(
            gate.evaluate(2_000, 500, 2_100),
            GateDecision::Skip(SkipReason::UpdatedRecently { .. })
        ));
    }

    #[test]
    fn skip_reason_is_human_readable() {
        let reason = SkipReason::UpdatedRecently {
            proxy: 500,
            now: 2_100,
            window_secs: HOUR,
        };
        assert_eq!(
            reason.to_string(),
            "the oracle proxy was updated 1600s ago, less than the 3600s window"
        );
    }
}
