/// 当前 Unix 时间（秒）。时钟早于 epoch 时返回 0
pub fn now_unix_secs() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_after_2020() {
        assert!(now_unix_secs() > 1_577_836_800);
    }
}
