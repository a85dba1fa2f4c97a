//! 时间工具函数 — 订单序号的日界
//!
//! 日键从本地挂钟时间计算，格式 `DDMMYY`。调用方在每次分配时重新计算，
//! 绝不跨日缓存。

use chrono::{Local, NaiveDate};

/// Day key for the given date, `DDMMYY` (e.g. 2025-11-19 → "191125")
pub fn day_key(date: NaiveDate) -> String {
    date.format("%d%m%y").to_string()
}

/// Day key for today, from the local wall clock
pub fn today_key() -> String {
    day_key(Local::now().date_naive())
}
