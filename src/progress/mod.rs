//! Pure progress logic: the per-user state machine and the statistics
//! derived from stored facts. Nothing here touches the database or the
//! transport, which keeps all of it unit-testable.

use chrono::NaiveDate;

use crate::database::models::User;
use crate::plan::PLAN_DAYS;

/// Lifecycle state of a reader, derived from the stored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserState {
    /// No enrollment yet.
    New,
    /// Reading, with the next unread plan day.
    Active(i64),
    /// All 365 days completed; stays here until a reset.
    Completed,
    /// Reset confirmed, waiting for re-enrollment.
    PendingReset,
}

pub fn user_state(user: Option<&User>) -> UserState {
    match user {
        None => UserState::New,
        Some(u) if !u.is_active => UserState::PendingReset,
        Some(u) if u.current_day > PLAN_DAYS => UserState::Completed,
        Some(u) => UserState::Active(u.current_day),
    }
}

/// Outcome of asking to mark `requested` as read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkDecision {
    /// Requested day is the user's current day; record it.
    Accept {
        /// True when this completion finishes the plan.
        completes_plan: bool,
    },
    /// Stale button or double tap; reply with the actual current day and
    /// change nothing.
    RejectMismatch { current_day: i64 },
    /// Plan already finished.
    RejectCompleted,
    /// No active enrollment.
    RejectNotEnrolled,
}

/// Same-day guard for completions. Only the exact current day of an
/// active reader advances progress; everything else is a no-op.
pub fn decide_mark_read(state: UserState, requested: i64) -> MarkDecision {
    match state {
        UserState::Active(current_day) if requested == current_day => MarkDecision::Accept {
            completes_plan: requested == PLAN_DAYS,
        },
        UserState::Active(current_day) => MarkDecision::RejectMismatch { current_day },
        UserState::Completed => MarkDecision::RejectCompleted,
        UserState::New | UserState::PendingReset => MarkDecision::RejectNotEnrolled,
    }
}

/// Percentage of the plan completed, rounded to the nearest integer.
pub fn completion_percentage(completed_count: i64) -> i64 {
    ((completed_count * 100) as f64 / PLAN_DAYS as f64).round() as i64
}

/// Calendar days elapsed since enrollment, counting the start date as
/// day one.
pub fn days_since_start(start_date: NaiveDate, today: NaiveDate) -> i64 {
    (today - start_date).num_days() + 1
}

/// Positive: behind schedule by that many days. Negative: ahead. Zero:
/// on pace.
pub fn pace_delta(start_date: NaiveDate, today: NaiveDate, completed_count: i64) -> i64 {
    days_since_start(start_date, today) - completed_count
}

/// 20-cell progress bar; one cell per 5%.
pub fn progress_bar(percentage: i64) -> String {
    let filled = (percentage / 5).clamp(0, 20) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(20 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_user(current_day: i64, is_active: bool) -> User {
        User {
            telegram_id: 1,
            username: None,
            first_name: "Reader".to_string(),
            start_date: "2024-01-01".to_string(),
            current_day,
            is_active,
            created_at: "2024-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn test_state_derivation() {
        assert_eq!(user_state(None), UserState::New);
        assert_eq!(user_state(Some(&active_user(1, true))), UserState::Active(1));
        assert_eq!(
            user_state(Some(&active_user(365, true))),
            UserState::Active(365)
        );
        assert_eq!(user_state(Some(&active_user(366, true))), UserState::Completed);
        assert_eq!(
            user_state(Some(&active_user(10, false))),
            UserState::PendingReset
        );
    }

    #[test]
    fn test_mark_read_accepts_only_current_day() {
        assert_eq!(
            decide_mark_read(UserState::Active(5), 5),
            MarkDecision::Accept {
                completes_plan: false
            }
        );
        assert_eq!(
            decide_mark_read(UserState::Active(5), 4),
            MarkDecision::RejectMismatch { current_day: 5 }
        );
        assert_eq!(
            decide_mark_read(UserState::Active(5), 6),
            MarkDecision::RejectMismatch { current_day: 5 }
        );
    }

    #[test]
    fn test_marking_day_365_completes_the_plan() {
        assert_eq!(
            decide_mark_read(UserState::Active(365), 365),
            MarkDecision::Accept {
                completes_plan: true
            }
        );
    }

    #[test]
    fn test_mark_read_rejected_after_completion() {
        assert_eq!(
            decide_mark_read(UserState::Completed, 365),
            MarkDecision::RejectCompleted
        );
    }

    #[test]
    fn test_mark_read_requires_enrollment() {
        assert_eq!(
            decide_mark_read(UserState::New, 1),
            MarkDecision::RejectNotEnrolled
        );
        assert_eq!(
            decide_mark_read(UserState::PendingReset, 1),
            MarkDecision::RejectNotEnrolled
        );
    }

    #[test]
    fn test_completion_percentage_endpoints() {
        assert_eq!(completion_percentage(0), 0);
        assert_eq!(completion_percentage(365), 100);
        // 183/365 = 50.13...
        assert_eq!(completion_percentage(183), 50);
    }

    #[test]
    fn test_days_since_start_counts_inclusively() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(days_since_start(start, start), 1);
        let later = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
        assert_eq!(days_since_start(start, later), 6);
    }

    #[test]
    fn test_pace_delta_scenario() {
        // Enrolled 2024-01-01, marked days 1..=5, asking on day 6:
        // 6 calendar days elapsed, 5 completed, behind by 1.
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
        assert_eq!(pace_delta(start, today, 5), 1);
        assert_eq!(pace_delta(start, today, 6), 0);
        assert_eq!(pace_delta(start, today, 7), -1);
    }

    #[test]
    fn test_progress_bar_cell_mapping() {
        assert_eq!(progress_bar(0), "░".repeat(20));
        assert_eq!(progress_bar(100), "█".repeat(20));
        let half = progress_bar(50);
        assert_eq!(half.chars().filter(|c| *c == '█').count(), 10);
        // 4% rounds down to zero filled cells
        assert_eq!(progress_bar(4), "░".repeat(20));
        assert_eq!(progress_bar(5).chars().filter(|c| *c == '█').count(), 1);
    }
}
