//! Expense aggregation
//!
//! Per-category subtotals feed the summary cards and the footer row of
//! each category table; monthly totals feed the report page.

use std::collections::HashMap;

use sd_models::{Expense, ExpenseCategory};
use serde::Serialize;

/// Per-category and overall totals for a set of expenses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummary {
    pub labour: i64,
    pub material: i64,
    pub other: i64,
    pub total: i64,
}

impl ExpenseSummary {
    pub fn compute(expenses: &[Expense]) -> Self {
        let mut by_category: HashMap<ExpenseCategory, i64> = HashMap::new();
        for expense in expenses {
            *by_category.entry(expense.category).or_default() += expense.amount;
        }

        let labour = by_category.get(&ExpenseCategory::Labour).copied().unwrap_or(0);
        let material = by_category.get(&ExpenseCategory::Material).copied().unwrap_or(0);
        let other = by_category.get(&ExpenseCategory::Other).copied().unwrap_or(0);

        Self {
            labour,
            material,
            other,
            total: labour + material + other,
        }
    }

    pub fn for_category(&self, category: ExpenseCategory) -> i64 {
        match category {
            ExpenseCategory::Labour => self.labour,
            ExpenseCategory::Material => self.material,
            ExpenseCategory::Other => self.other,
        }
    }
}

/// One month's expense total, serialized as "YYYY-MM".
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotal {
    pub month: String,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(amount: i64, category: ExpenseCategory) -> Expense {
        Expense {
            id: None,
            client_id: 1,
            amount,
            category,
            note: None,
            spent_on: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            recorded_by: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_summary_groups_by_category() {
        let expenses = vec![
            expense(12_000, ExpenseCategory::Labour),
            expense(8_000, ExpenseCategory::Labour),
            expense(30_000, ExpenseCategory::Material),
            expense(1_500, ExpenseCategory::Other),
        ];
        let summary = ExpenseSummary::compute(&expenses);

        assert_eq!(summary.labour, 20_000);
        assert_eq!(summary.material, 30_000);
        assert_eq!(summary.other, 1_500);
        assert_eq!(summary.total, 51_500);
        assert_eq!(summary.for_category(ExpenseCategory::Labour), 20_000);
    }

    #[test]
    fn test_empty_summary_is_zero() {
        let summary = ExpenseSummary::compute(&[]);
        assert_eq!(summary.total, 0);
    }
}
