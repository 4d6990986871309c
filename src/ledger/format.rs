//! Human-readable rendering of timestamps, amounts and history entries

use chrono::{DateTime, Local};

use super::models::Transaction;

/// The one timestamp format used for every transaction
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Format an amount with `.` thousands groups and up to two `,` decimals.
///
/// `1500` becomes `1.500`, `1234.5` becomes `1.234,5`.
pub fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative && cents > 0 {
        out.push('-');
    }
    out.push_str(&grouped);
    if fraction > 0 {
        let digits = format!("{fraction:02}");
        out.push(',');
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

pub fn format_money(currency: &str, amount: f64) -> String {
    format!("{currency}{}", format_amount(amount))
}

/// One-line description of a history entry
pub fn describe_transaction(currency: &str, transaction: &Transaction) -> String {
    match transaction {
        Transaction::Deposit { amount, timestamp } => {
            format!("+ Deposit: {} ({timestamp})", format_money(currency, *amount))
        }
        Transaction::Reset { timestamp } => format!("Reset balance ({timestamp})"),
    }
}
