//! Error types.

/// A date that does not exist in the requested calendar.
///
/// Every fallible operation in this crate reports one of these. Match on
/// the type as a whole for a generic message, or on a variant for details.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, thiserror::Error)]
pub enum BadDate {
    /// The date or instant precedes the creation of the world.
    #[error("date before creation")]
    BeforeCreation,

    /// The month number does not exist in that year, even after counting
    /// back from the end of the year.
    #[error("month {month} not in range")]
    MonthNotInRange {
        /// The month as given.
        month: i32,
    },

    /// The day does not exist in that month, even after counting back from
    /// the end of the month.
    #[error("day {day} of month {month} not in range")]
    DateNotInRange {
        /// The month, after normalization.
        month: i32,
        /// The day as given.
        day: i32,
    },

    /// The date or instant precedes the first Daf Yomi cycle.
    #[error("date before the first Daf Yomi cycle")]
    BeforeDafYomi,

    /// One of the dates skipped when Britain moved to the Gregorian
    /// calendar.
    #[error("September {day}, 1752 was skipped (3rd to 13th September 1752 are invalid)")]
    SkippedDate {
        /// The day of September 1752 that was given.
        day: i32,
    },
}

/// A name that matches no month, tractate or calendar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} name: {name:?}")]
pub struct UnknownName {
    /// What was being looked up, e.g. `"month"`.
    pub kind: &'static str,
    /// The name as given.
    pub name: String,
}
