//! The dashboard summary endpoint.

use axum::{Json, extract::State};
use serde::Serialize;
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    dashboard::{
        TREND_MONTHS,
        aggregation::{MonthlyTrendPoint, category_color, monthly_trend, trailing_month_starts},
    },
    transaction::{
        TransactionType, get_transactions_since, round_cents, sum_by_type,
        sum_expenses_by_category,
    },
};

/// One slice of the expense breakdown chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseSlice {
    /// The expense category.
    pub name: String,
    /// The summed expense amount for the category, rounded to cents.
    pub value: f64,
    /// The chart color assigned to the category.
    pub color: &'static str,
}

/// The wire format of the dashboard summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Total income over all transactions.
    #[serde(rename = "totalIncome")]
    pub total_income: f64,
    /// Total expenses over all transactions.
    #[serde(rename = "totalExpense")]
    pub total_expense: f64,
    /// Income minus expenses. May be negative.
    pub savings: f64,
    /// Expenses summed per category, largest first.
    #[serde(rename = "expenseBreakdown")]
    pub expense_breakdown: Vec<ExpenseSlice>,
    /// Income vs. expense per calendar month for the trailing year.
    #[serde(rename = "monthlyTrend")]
    pub monthly_trend: Vec<MonthlyTrendPoint>,
}

/// Compute the dashboard summary.
///
/// An empty table produces zeroed totals, an empty breakdown and a zero-filled
/// trend with status 200. Store failures surface as a 500 error envelope.
pub async fn get_dashboard_summary(
    State(state): State<AppState>,
) -> Result<Json<DashboardSummary>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let total_income = sum_by_type(TransactionType::Income, &connection)?;
    let total_expense = sum_by_type(TransactionType::Expense, &connection)?;

    let expense_breakdown = sum_expenses_by_category(&connection)?
        .into_iter()
        .map(|(category, total)| ExpenseSlice {
            color: category_color(&category),
            name: category,
            value: round_cents(total),
        })
        .collect();

    let months = trailing_month_starts(OffsetDateTime::now_utc().date(), TREND_MONTHS);
    let recent_transactions = get_transactions_since(months[0], &connection)?;

    Ok(Json(DashboardSummary {
        total_income: round_cents(total_income),
        total_expense: round_cents(total_expense),
        savings: round_cents(total_income - total_expense),
        expense_breakdown,
        monthly_trend: monthly_trend(&recent_transactions, &months),
    }))
}

#[cfg(test)]
mod summary_endpoint_tests {
    use axum::{Json, extract::State};
    use rusqlite::Connection;
    use time::{Duration, OffsetDateTime, macros::date};

    use crate::{
        AppState,
        dashboard::TREND_MONTHS,
        transaction::{NewTransaction, TransactionType, create_transaction, round_cents},
    };

    use super::get_dashboard_summary;

    fn get_test_app_state() -> AppState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");

        AppState::new(connection).expect("Could not initialize database")
    }

    fn insert_transaction(
        state: &AppState,
        description: &str,
        amount: f64,
        category: &str,
        date: time::Date,
        transaction_type: TransactionType,
    ) {
        let connection = state.db_connection.lock().unwrap();
        create_transaction(
            NewTransaction {
                description: description.to_owned(),
                amount,
                category: category.to_owned(),
                date,
                transaction_type,
            },
            &connection,
        )
        .expect("Could not create test transaction");
    }

    #[tokio::test]
    async fn summary_matches_worked_example() {
        let state = get_test_app_state();
        insert_transaction(
            &state,
            "Salary",
            3500.0,
            "Income",
            date!(2024 - 01 - 01),
            TransactionType::Income,
        );
        insert_transaction(
            &state,
            "Groceries",
            85.5,
            "Food",
            date!(2024 - 01 - 15),
            TransactionType::Expense,
        );
        insert_transaction(
            &state,
            "Gas",
            45.2,
            "Transportation",
            date!(2024 - 01 - 12),
            TransactionType::Expense,
        );

        let Json(summary) = get_dashboard_summary(State(state)).await.unwrap();

        assert_eq!(summary.total_income, 3500.0);
        assert_eq!(summary.total_expense, 130.7);
        assert_eq!(summary.savings, 3369.3);

        assert_eq!(summary.expense_breakdown.len(), 2);
        assert_eq!(summary.expense_breakdown[0].name, "Food");
        assert_eq!(summary.expense_breakdown[0].value, 85.5);
        assert_eq!(summary.expense_breakdown[0].color, "#FF6B6B");
        assert_eq!(summary.expense_breakdown[1].name, "Transportation");
        assert_eq!(summary.expense_breakdown[1].value, 45.2);
        assert_eq!(summary.expense_breakdown[1].color, "#4ECDC4");
    }

    #[tokio::test]
    async fn savings_equals_income_minus_expenses() {
        let state = get_test_app_state();
        insert_transaction(
            &state,
            "Freelance work",
            1250.55,
            "Income",
            date!(2024 - 03 - 05),
            TransactionType::Income,
        );
        insert_transaction(
            &state,
            "New laptop",
            1999.99,
            "Shopping",
            date!(2024 - 03 - 10),
            TransactionType::Expense,
        );

        let Json(summary) = get_dashboard_summary(State(state)).await.unwrap();

        assert_eq!(
            summary.savings,
            round_cents(summary.total_income - summary.total_expense)
        );
        assert!(summary.savings < 0.0);
    }

    #[tokio::test]
    async fn expense_breakdown_sums_to_total_expense() {
        let state = get_test_app_state();
        insert_transaction(
            &state,
            "Groceries",
            85.5,
            "Food",
            date!(2024 - 01 - 15),
            TransactionType::Expense,
        );
        insert_transaction(
            &state,
            "Movie night",
            32.0,
            "Entertainment",
            date!(2024 - 02 - 02),
            TransactionType::Expense,
        );
        insert_transaction(
            &state,
            "Power bill",
            120.4,
            "Utilities",
            date!(2024 - 02 - 20),
            TransactionType::Expense,
        );

        let Json(summary) = get_dashboard_summary(State(state)).await.unwrap();

        let breakdown_total: f64 = summary
            .expense_breakdown
            .iter()
            .map(|slice| slice.value)
            .sum();
        assert_eq!(round_cents(breakdown_total), summary.total_expense);
    }

    #[tokio::test]
    async fn empty_table_produces_zeroed_summary() {
        let state = get_test_app_state();

        let Json(summary) = get_dashboard_summary(State(state)).await.unwrap();

        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.total_expense, 0.0);
        assert_eq!(summary.savings, 0.0);
        assert_eq!(summary.expense_breakdown, vec![]);
        assert_eq!(summary.monthly_trend.len(), TREND_MONTHS);
        assert!(
            summary
                .monthly_trend
                .iter()
                .all(|point| point.income == 0.0 && point.expense == 0.0)
        );
    }

    #[tokio::test]
    async fn monthly_trend_includes_current_month_data() {
        let state = get_test_app_state();
        let today = OffsetDateTime::now_utc().date();
        insert_transaction(
            &state,
            "Salary",
            4200.0,
            "Income",
            today,
            TransactionType::Income,
        );
        // Dated well outside the trailing window, must not appear in the trend.
        insert_transaction(
            &state,
            "Ancient expense",
            999.0,
            "Food",
            today - Duration::days(400),
            TransactionType::Expense,
        );

        let Json(summary) = get_dashboard_summary(State(state)).await.unwrap();

        assert_eq!(summary.monthly_trend.len(), TREND_MONTHS);

        let current_month = summary.monthly_trend.last().unwrap();
        assert_eq!(current_month.income, 4200.0);

        let trend_expense_total: f64 = summary
            .monthly_trend
            .iter()
            .map(|point| point.expense)
            .sum();
        assert_eq!(trend_expense_total, 0.0);
    }
}
