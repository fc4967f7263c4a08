use chrono::NaiveDate;

use crate::ledger::types::DateRange;
use crate::{ClientError, ClientResult};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// First and last day of `month`, both inclusive.
pub fn month_range(year: i32, month: u32) -> ClientResult<DateRange> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| invalid_month(month))?;
    let last = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))
        .ok_or_else(|| invalid_month(month))?;
    Ok(DateRange { first, last })
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(index).copied()
}

/// Every day of the range in ascending order.
pub fn days_of(range: DateRange) -> impl Iterator<Item = NaiveDate> {
    range.first.iter_days().take_while(move |day| *day <= range.last)
}

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Strict `YYYY-MM-DD` parse. Looser forms chrono would accept are rejected.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    if !looks_like_iso_date(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

pub fn validate_month(month: u32, command: &str) -> ClientResult<u32> {
    if (1..=12).contains(&month) {
        return Ok(month);
    }
    Err(ClientError::invalid_argument_for_command(
        &format!("`month` must be between 1 and 12 (received {month})."),
        Some(command),
    ))
}

pub fn validate_year(year: i32, command: &str) -> ClientResult<i32> {
    if (1..=9999).contains(&year) {
        return Ok(year);
    }
    Err(ClientError::invalid_argument_for_command(
        &format!("`year` must be a four-digit calendar year (received {year})."),
        Some(command),
    ))
}

fn invalid_month(month: u32) -> ClientError {
    ClientError::invalid_argument(&format!(
        "`month` must be between 1 and 12 (received {month})."
    ))
}

fn looks_like_iso_date(value: &str) -> bool {
    if value.len() != 10 {
        return false;
    }
    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return false;
        }
    }
    true
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
