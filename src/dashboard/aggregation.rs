//! Transaction data aggregation and transformation for the dashboard.
//!
//! Provides functions to compute the trailing window of calendar months,
//! aggregate income and expenses per month, and assign chart colors to expense
//! categories.

use std::collections::HashMap;

use serde::Serialize;
use time::{Date, Month};

use crate::transaction::{Transaction, TransactionType, round_cents};

/// One month's income and expense totals in the monthly trend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrendPoint {
    /// The month as a three-letter abbreviation, e.g. "Jan".
    pub month: String,
    /// Total income for the month, zero when there were no income transactions.
    pub income: f64,
    /// Total expenses for the month, zero when there were no expenses.
    pub expense: f64,
}

/// The chart color assigned to an expense category.
///
/// Unrecognized categories fall back to a neutral gray.
pub fn category_color(category: &str) -> &'static str {
    match category {
        "Food" => "#FF6B6B",
        "Transportation" => "#4ECDC4",
        "Entertainment" => "#45B7D1",
        "Utilities" => "#FFA07A",
        "Shopping" => "#98D8C8",
        "Healthcare" => "#F7DC6F",
        "Income" => "#10B981",
        _ => "#94A3B8",
    }
}

/// The first days of the `count` calendar months ending with the month of
/// `reference`, in chronological order.
pub fn trailing_month_starts(reference: Date, count: usize) -> Vec<Date> {
    let mut month_start = reference.replace_day(1).unwrap();
    let mut months = Vec::with_capacity(count);

    for _ in 0..count {
        months.push(month_start);
        month_start = previous_month(month_start);
    }

    months.reverse();
    months
}

fn previous_month(month_start: Date) -> Date {
    let year = match month_start.month() {
        Month::January => month_start.year() - 1,
        _ => month_start.year(),
    };

    Date::from_calendar_date(year, month_start.month().previous(), 1).unwrap()
}

/// Aggregate income and expenses per calendar month.
///
/// Produces one entry per month in `months`, in the given order, zero-filling
/// months with no transactions. Transactions dated outside `months` are
/// ignored.
pub fn monthly_trend(transactions: &[Transaction], months: &[Date]) -> Vec<MonthlyTrendPoint> {
    let mut totals: HashMap<Date, (f64, f64)> = HashMap::new();

    for transaction in transactions {
        let month = transaction.date.replace_day(1).unwrap();
        let entry = totals.entry(month).or_insert((0.0, 0.0));

        match transaction.transaction_type {
            TransactionType::Income => entry.0 += transaction.amount,
            TransactionType::Expense => entry.1 += transaction.amount,
        }
    }

    months
        .iter()
        .map(|month| {
            let (income, expense) = totals.get(month).copied().unwrap_or((0.0, 0.0));

            MonthlyTrendPoint {
                month: month_abbreviation(month.month()).to_owned(),
                income: round_cents(income),
                expense: round_cents(expense),
            }
        })
        .collect()
}

fn month_abbreviation(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}
