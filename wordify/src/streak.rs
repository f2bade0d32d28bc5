use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Returned when there is no usable last-login date to diff against.
pub const FIRST_RUN: i64 = -1;

/// Signed number of calendar days from the stored last-login date to
/// `today`. Logging in the next calendar day yields `1`.
///
/// An empty string means no login was ever recorded; a string that does not
/// parse as `YYYY-MM-DD` is treated the same way. Both yield [`FIRST_RUN`].
pub fn streak_delta(last_login: &str, today: NaiveDate) -> i64 {
    if last_login.is_empty() {
        return FIRST_RUN;
    }
    match NaiveDate::parse_from_str(last_login, DATE_FORMAT) {
        Ok(date) => today.signed_duration_since(date).num_days(),
        Err(_) => {
            tracing::warn!(last_login, "stored last-login date does not parse, treating as first run");
            FIRST_RUN
        }
    }
}

/// What a login does to the streak counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakTransition {
    /// No prior login on record; leave the counter alone.
    FirstRun,
    /// Same calendar day as the last login.
    NoChange,
    /// Consecutive calendar day.
    Increment,
    /// A gap, or a clock that went backwards.
    Reset,
}

impl StreakTransition {
    pub fn from_delta(delta: i64) -> Self {
        match delta {
            FIRST_RUN => Self::FirstRun,
            0 => Self::NoChange,
            1 => Self::Increment,
            _ => Self::Reset,
        }
    }

    pub fn apply(self, streak: u32) -> u32 {
        match self {
            Self::FirstRun | Self::NoChange => streak,
            Self::Increment => streak + 1,
            Self::Reset => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn empty_last_login_is_first_run() {
        assert_eq!(streak_delta("", date(2025, 1, 10)), FIRST_RUN);
    }

    #[test]
    fn unparseable_last_login_is_first_run() {
        assert_eq!(streak_delta("not-a-date", date(2025, 1, 10)), FIRST_RUN);
        assert_eq!(streak_delta("10/01/2025", date(2025, 1, 10)), FIRST_RUN);
    }

    #[test]
    fn same_day_is_zero() {
        assert_eq!(streak_delta("2025-01-10", date(2025, 1, 10)), 0);
    }

    #[test]
    fn next_day_is_one() {
        assert_eq!(streak_delta("2025-01-10", date(2025, 1, 11)), 1);
        assert_eq!(streak_delta("2025-01-31", date(2025, 2, 1)), 1);
        assert_eq!(streak_delta("2024-12-31", date(2025, 1, 1)), 1);
    }

    #[test]
    fn gaps_count_every_calendar_day() {
        assert_eq!(streak_delta("2025-01-10", date(2025, 1, 17)), 7);
    }

    #[test]
    fn future_last_login_is_negative() {
        assert_eq!(streak_delta("2025-01-12", date(2025, 1, 10)), -2);
    }

    #[test]
    fn transition_mapping_follows_caller_policy() {
        assert_eq!(StreakTransition::from_delta(-1), StreakTransition::FirstRun);
        assert_eq!(StreakTransition::from_delta(0), StreakTransition::NoChange);
        assert_eq!(StreakTransition::from_delta(1), StreakTransition::Increment);
        assert_eq!(StreakTransition::from_delta(2), StreakTransition::Reset);
        assert_eq!(StreakTransition::from_delta(-2), StreakTransition::Reset);
    }

    #[test]
    fn transitions_update_the_counter() {
        assert_eq!(StreakTransition::FirstRun.apply(3), 3);
        assert_eq!(StreakTransition::NoChange.apply(3), 3);
        assert_eq!(StreakTransition::Increment.apply(3), 4);
        assert_eq!(StreakTransition::Reset.apply(3), 0);
    }
}
