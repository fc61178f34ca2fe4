//! 时间格式化
//!
//! 后端返回的 `created_at` 可能是 RFC 3339，也可能是不带时区的日期时间。
//! 解析失败时原样返回，不视为错误。

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// 解析时间戳字符串，只保留日期部分
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// 列表卡片使用的长格式，例如 "Mar 5, 2024"
pub fn format_date(raw: &str) -> String {
    parse_date(raw)
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// 详情页使用的数字格式，例如 "3/5/2024"
pub fn format_date_numeric(raw: &str) -> String {
    parse_date(raw)
        .map(|d| d.format("%-m/%-d/%Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}
