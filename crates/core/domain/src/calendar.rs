//! 日期归一化。
//!
//! 网关返回的日期可能是 `YYYY-MM-DD`、无时区时间戳、RFC 3339 时间戳或 Unix 毫秒，
//! 统一折算为本地日历日（相当于取当天零点）。

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// 将日期字符串归一化为本地日历日；无法解析时返回 None。
pub fn normalize_local_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Some(ms) = parse_epoch_ms(raw) {
        return DateTime::from_timestamp_millis(ms)
            .map(|ts| ts.with_timezone(&Local).date_naive());
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Local).date_naive());
    }
    if let Some(ts) = parse_naive_datetime(raw) {
        return Some(ts.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// 将时间戳字符串解析为 Unix 毫秒；无时区的时间按本地时间解释。
pub fn parse_timestamp_ms(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Some(ms) = parse_epoch_ms(raw) {
        return Some(ms);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.timestamp_millis());
    }
    let naive = parse_naive_datetime(raw)?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|ts| ts.timestamp_millis())
}

/// 纯数字按 Unix 毫秒处理。
fn parse_epoch_ms(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn parse_naive_datetime(raw: &str) -> Option<NaiveDateTime> {
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}
