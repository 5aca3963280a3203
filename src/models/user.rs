use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Length of the Florescer program in days.
pub const PROGRAM_DAYS: i64 = 21;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    /// Day 1 of the user's 21-day program; None until onboarding completes.
    pub program_started_at: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub program_started_at: Option<NaiveDate>,
    /// 1..=21 once the program has started; None before.
    pub current_day: Option<i64>,
    /// Whole-percent progress through the program (0..=100).
    pub progress_pct: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn profile(self, today: NaiveDate) -> UserProfile {
        let current_day = self.program_started_at.map(|start| program_day(start, today));
        let progress_pct = current_day.map(|day| day * 100 / PROGRAM_DAYS);
        UserProfile {
            id: self.id,
            email: self.email,
            name: self.name,
            program_started_at: self.program_started_at,
            current_day,
            progress_pct,
            created_at: self.created_at,
        }
    }
}

/// Which day of the program `today` is, clamped to 1..=21. A start date in
/// the future counts as day 1; the program never runs past day 21.
pub fn program_day(start: NaiveDate, today: NaiveDate) -> i64 {
    ((today - start).num_days() + 1).clamp(1, PROGRAM_DAYS)
}
