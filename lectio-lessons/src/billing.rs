use crate::models::{Lesson, LessonStatus};
use chrono::{DateTime, Datelike, FixedOffset, Utc};
use lectio_plans::Plan;
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// One billable lesson on a monthly statement
#[derive(Debug, Clone, Serialize)]
pub struct StatementLine {
    pub lesson_id: Uuid,
    pub plan_id: Uuid,
    pub plan_name: String,
    pub start_at: DateTime<Utc>,
    pub amount_minor: i32,
    pub currency: String,
}

/// Per-currency totals; plans may be priced in different currencies
#[derive(Debug, Clone, Serialize)]
pub struct CurrencyTotal {
    pub currency: String,
    pub total_minor: i64,
    pub lesson_count: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BillingStatement {
    pub student_id: Uuid,
    pub year: i32,
    pub month: u32,
    pub lines: Vec<StatementLine>,
    pub totals: Vec<CurrencyTotal>,
}

/// Builds monthly statements from completed lessons. Pure aggregation; the
/// caller supplies lessons and plans fetched from the repositories.
pub struct BillingManager;

impl BillingManager {
    pub fn new() -> Self {
        Self
    }

    /// Statement for one student and one calendar month. Month membership is
    /// decided in the given display offset, so a late-evening UTC lesson
    /// bills in the month the student actually sees on the calendar.
    pub fn monthly_statement(
        &self,
        student_id: Uuid,
        year: i32,
        month: u32,
        offset: FixedOffset,
        lessons: &[Lesson],
        plans: &HashMap<Uuid, Plan>,
    ) -> BillingStatement {
        let mut lines: Vec<StatementLine> = Vec::new();

        for lesson in lessons {
            if lesson.student_id != student_id {
                continue;
            }
            if lesson.status != LessonStatus::Completed {
                continue;
            }
            if !in_month(lesson.start_at, year, month, offset) {
                continue;
            }
            if let Some(plan) = plans.get(&lesson.plan_id) {
                lines.push(StatementLine {
                    lesson_id: lesson.id,
                    plan_id: plan.id,
                    plan_name: plan.name.clone(),
                    start_at: lesson.start_at,
                    amount_minor: plan.price_minor,
                    currency: plan.currency.clone(),
                });
            }
        }

        lines.sort_by_key(|line| line.start_at);

        let mut by_currency: HashMap<String, (i64, i32)> = HashMap::new();
        for line in &lines {
            let entry = by_currency.entry(line.currency.clone()).or_insert((0, 0));
            entry.0 += line.amount_minor as i64;
            entry.1 += 1;
        }

        let mut totals: Vec<CurrencyTotal> = by_currency
            .into_iter()
            .map(|(currency, (total_minor, lesson_count))| CurrencyTotal {
                currency,
                total_minor,
                lesson_count,
            })
            .collect();
        totals.sort_by(|a, b| a.currency.cmp(&b.currency));

        BillingStatement {
            student_id,
            year,
            month,
            lines,
            totals,
        }
    }
}

impl Default for BillingManager {
    fn default() -> Self {
        Self::new()
    }
}

fn in_month(start_at: DateTime<Utc>, year: i32, month: u32, offset: FixedOffset) -> bool {
    let local = start_at.with_timezone(&offset);
    local.year() == year && local.month() == month
}
