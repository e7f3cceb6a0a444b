//! 测试队列轮询

use std::time::Duration;

use chrono::{Local, NaiveDateTime, Timelike};

use crate::config::Config;
use crate::models::TestQueueEntry;

/// 轮询参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    /// `None` 表示一直等下去
    pub timeout: Option<Duration>,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for PollSettings {
    fn from(config: &Config) -> Self {
        Self {
            interval: config.poll_interval(),
            timeout: config.poll_timeout(),
        }
    }
}

/// 触发测试前记录的本地时间，截断到秒（队列页面只精确到秒）
pub fn trigger_timestamp() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// 从队列中找出本次触发的测试
///
/// 取开始时间不早于 `triggered_at` 的条目中最早的一个；同一秒开始的多个条目取ID较小者。
/// 队列里更早的历史条目不会被选中。
pub fn select_run_entry(
    entries: &[TestQueueEntry],
    triggered_at: NaiveDateTime,
) -> Option<&TestQueueEntry> {
    entries
        .iter()
        .filter(|entry| entry.start_time >= triggered_at)
        .min_by_key(|entry| (entry.start_time, entry.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 12)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn entry(id: u32, start: NaiveDateTime, end: Option<NaiveDateTime>) -> TestQueueEntry {
        TestQueueEntry {
            id,
            start_time: start,
            end_time: end,
        }
    }

    #[test]
    fn test_history_is_ignored() {
        let triggered = at(10, 0, 0);
        let queue = vec![
            entry(90, at(9, 0, 0), Some(at(9, 0, 10))),
            entry(95, at(9, 59, 59), None),
        ];
        assert_eq!(select_run_entry(&queue, triggered), None);
    }

    #[test]
    fn test_earliest_entry_after_trigger_wins() {
        let triggered = at(10, 0, 0);
        let queue = vec![
            entry(120, at(10, 5, 0), None),
            entry(90, at(9, 0, 0), Some(at(9, 0, 10))),
            entry(101, at(10, 0, 2), Some(at(10, 0, 9))),
            entry(100, at(10, 0, 0), None),
        ];

        let selected = select_run_entry(&queue, triggered).unwrap();
        assert_eq!(selected.id, 100);
        assert!(!selected.is_finished());
    }

    #[test]
    fn test_same_second_prefers_lower_id() {
        let triggered = at(10, 0, 0);
        let queue = vec![entry(7, at(10, 0, 1), None), entry(5, at(10, 0, 1), None)];
        assert_eq!(select_run_entry(&queue, triggered).unwrap().id, 5);
    }

    #[test]
    fn test_trigger_timestamp_has_whole_seconds() {
        assert_eq!(trigger_timestamp().nanosecond(), 0);
    }

    #[test]
    fn test_settings_from_config() {
        let config = Config {
            poll_interval_ms: 20,
            poll_timeout_secs: 0,
            ..Config::default()
        };
        let settings = PollSettings::from(&config);
        assert_eq!(settings.interval, Duration::from_millis(20));
        assert_eq!(settings.timeout, None);
    }
}
