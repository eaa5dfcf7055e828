use chrono::{NaiveDate, NaiveTime};

use crate::models::MeetingSchedule;

const UI_DATE: &str = "%d/%m/%Y";
const UI_TIME: &str = "%H:%M";
const ISO_DATE: &str = "%Y-%m-%d";

/// 拆分 "YYYY-MM-DD[T ]HH:MM[:SS]" 为表单的日期和时间
///
/// 哪一半能解析就保留哪一半, 另一半为 None。
pub fn parse_meeting(raw: Option<&str>) -> MeetingSchedule {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return MeetingSchedule::default();
    };

    let (date_part, time_part) = match raw.find(['T', ' ']) {
        Some(idx) => (&raw[..idx], Some(raw[idx + 1..].trim())),
        None => (raw, None),
    };

    let date = NaiveDate::parse_from_str(date_part, ISO_DATE)
        .ok()
        .map(|d| d.format(UI_DATE).to_string());
    let time = time_part
        .and_then(parse_clock)
        .map(|t| t.format(UI_TIME).to_string());

    MeetingSchedule { date, time }
}

/// 只取 HH:MM, 允许后面跟着 :SS
fn parse_clock(text: &str) -> Option<NaiveTime> {
    let hhmm = text.get(..5)?;
    let tail = &text[5..];
    if !tail.is_empty() && !tail.starts_with(':') {
        return None;
    }
    NaiveTime::parse_from_str(hhmm, UI_TIME).ok()
}

/// 日期和时间都有效时合成 "YYYY-MM-DDTHH:MM:00", 否则 None
pub fn compose_meeting(schedule: &MeetingSchedule) -> Option<String> {
    let date = schedule.date.as_deref()?;
    let time = schedule.time.as_deref()?;

    let date = NaiveDate::parse_from_str(date.trim(), UI_DATE).ok()?;
    let time = NaiveTime::parse_from_str(time.trim(), UI_TIME).ok()?;
    Some(format!("{}T{}:00", date.format(ISO_DATE), time.format(UI_TIME)))
}

/// dd/mm/yyyy -> yyyy-mm-dd, 按 `/` 反转各段; 空值为 None
pub fn issue_date_to_iso(date: Option<&str>) -> Option<String> {
    let date = date.map(str::trim).filter(|s| !s.is_empty())?;
    let parts: Vec<&str> = date.split('/').rev().collect();
    Some(parts.join("-"))
}

/// 输入掩码: 只保留数字并整理为 dd/mm/yyyy
pub fn mask_date(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).take(8).collect();
    let mut out = String::with_capacity(10);
    for (i, c) in digits.chars().enumerate() {
        if i == 2 || i == 4 {
            out.push('/');
        }
        out.push(c);
    }
    out
}

/// 输入掩码: 只保留数字并整理为 hh:mm
pub fn mask_time(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).take(4).collect();
    let mut out = String::with_capacity(5);
    for (i, c) in digits.chars().enumerate() {
        if i == 2 {
            out.push(':');
        }
        out.push(c);
    }
    out
}
