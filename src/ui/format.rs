//! 同步时间标签

use chrono::{DateTime, Local};

/// 相对时间：<5s 为 JUST NOW，<60s 为秒，<1h 为分钟（截断），否则为 HH:mm
pub fn format_sync_time(now: DateTime<Local>, timestamp: DateTime<Local>) -> String {
    // 时钟回拨时按 0 处理
    let elapsed = (now - timestamp).num_seconds().max(0);

    if elapsed < 5 {
        "JUST NOW".to_string()
    } else if elapsed < 60 {
        format!("{}S AGO", elapsed)
    } else if elapsed < 3600 {
        format!("{}M AGO", elapsed / 60)
    } else {
        timestamp.format("%H:%M").to_string()
    }
}

/// 状态栏标签，尚未同步过时为 NEVER
pub fn sync_label(now: DateTime<Local>, last_sync: Option<DateTime<Local>>) -> String {
    match last_sync {
        Some(timestamp) => format_sync_time(now, timestamp),
        None => "NEVER".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn ago(secs: i64) -> String {
        let now = Local.with_ymd_and_hms(2026, 10, 19, 14, 30, 0).unwrap();
        format_sync_time(now, now - Duration::seconds(secs))
    }

    #[test]
    fn test_just_now() {
        assert_eq!(ago(0), "JUST NOW");
        assert_eq!(ago(4), "JUST NOW");
    }

    #[test]
    fn test_seconds() {
        assert_eq!(ago(5), "5S AGO");
        assert_eq!(ago(59), "59S AGO");
    }

    #[test]
    fn test_minutes_truncate() {
        assert_eq!(ago(60), "1M AGO");
        assert_eq!(ago(119), "1M AGO");
        assert_eq!(ago(3599), "59M AGO");
    }

    #[test]
    fn test_absolute_after_an_hour() {
        assert_eq!(ago(3600), "13:30");
        assert_eq!(ago(5 * 3600 + 15 * 60), "09:15");
    }

    #[test]
    fn test_sub_second_and_future() {
        let now = Local.with_ymd_and_hms(2026, 10, 19, 14, 30, 0).unwrap();
        assert_eq!(
            format_sync_time(now, now - Duration::milliseconds(4999)),
            "JUST NOW"
        );
        assert_eq!(format_sync_time(now, now + Duration::seconds(30)), "JUST NOW");
    }

    #[test]
    fn test_sync_label_never() {
        let now = Local::now();
        assert_eq!(sync_label(now, None), "NEVER");
        assert_eq!(sync_label(now, Some(now)), "JUST NOW");
    }
}
