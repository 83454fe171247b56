//! The calendar used in Britain and its colonies: Julian up to and including
//! 2 September 1752, then Gregorian from 14 September 1752.

use std::sync::OnceLock;

use crate::date::{Calendar, Date};
use crate::error::BadDate;
use crate::time::AbsTime;
use crate::year::{self, Month, MonthLength, Year};

use super::{CivilMonth, CivilYear, GregorianYear, JulianYear, civil_month_length};

/// The last Julian date, as (year, month, day).
pub const LAST_JULIAN_DATE: (i32, i32, i32) = (1752, 9, 2);
/// The first Gregorian date, as (year, month, day).
pub const FIRST_GREGORIAN_DATE: (i32, i32, i32) = (1752, 9, 14);
pub const DAYS_SKIPPED: i32 = 11;

/// Start of 1 January 1753.
const YEAR_AFTER_CHANGEOVER: AbsTime = AbsTime::new(287569, 1, 6, 0);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
enum Base {
    Julian(JulianYear),
    Gregorian(GregorianYear),
}

/// A year of the British calendar.
///
/// Year 1752 is 355 days long. Dates from 3 to 13 September 1752 do not
/// exist, and day arithmetic steps over them.
///
/// # Example
///
/// ```
/// use luach::{BritishYear, Date, Year};
///
/// let date = Date::<BritishYear>::from_ymd(1752, 9, 2).unwrap();
/// assert_eq!("14 September 1752", (date + 1).to_string());
/// assert!(Date::<BritishYear>::from_ymd(1752, 9, 3).is_err());
/// assert_eq!(355, BritishYear::new(1752).days_in_year());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BritishYear {
    base: Base,
}

impl BritishYear {
    fn is_julian_value(value: i32) -> bool {
        value <= LAST_JULIAN_DATE.0
    }
}

impl From<JulianYear> for BritishYear {
    fn from(year: JulianYear) -> Self {
        if Self::is_julian_value(year.value()) {
            Self {
                base: Base::Julian(year),
            }
        } else {
            Self::new(year.value())
        }
    }
}

impl From<GregorianYear> for BritishYear {
    fn from(year: GregorianYear) -> Self {
        if Self::is_julian_value(year.value()) {
            Self::new(year.value())
        } else {
            Self {
                base: Base::Gregorian(year),
            }
        }
    }
}

impl CivilYear for BritishYear {
    fn is_leap_year(value: i32) -> bool {
        if Self::is_julian_value(value) {
            JulianYear::is_leap_year(value)
        } else {
            GregorianYear::is_leap_year(value)
        }
    }
}

impl Year for BritishYear {
    type Month = CivilMonth;
    const CALENDAR: Calendar = Calendar::British;

    fn new(value: i32) -> Self {
        let base = if Self::is_julian_value(value) {
            Base::Julian(JulianYear::new(value))
        } else {
            Base::Gregorian(GregorianYear::new(value))
        };
        Self { base }
    }
    fn value(&self) -> i32 {
        match self.base {
            Base::Julian(y) => y.value(),
            Base::Gregorian(y) => y.value(),
        }
    }
    /// Steps within the current base calendar, or starts afresh in the
    /// other one.
    fn set_value(&mut self, value: i32) {
        self.base = match (self.base, Self::is_julian_value(value)) {
            (Base::Julian(mut y), true) => {
                y.set_value(value);
                Base::Julian(y)
            }
            (Base::Gregorian(mut y), false) => {
                y.set_value(value);
                Base::Gregorian(y)
            }
            (_, true) => Base::Julian(JulianYear::new(value)),
            (_, false) => Base::Gregorian(GregorianYear::new(value)),
        };
    }
    fn start(&self) -> AbsTime {
        match self.base {
            Base::Julian(y) => y.start(),
            Base::Gregorian(y) => y.start(),
        }
    }
    fn months_in_year(&self) -> i32 {
        12
    }
    fn month_length(&self, month: CivilMonth) -> MonthLength<Self> {
        civil_month_length(month)
    }
    fn days_in_year(&self) -> i32 {
        let days: i32 = self.months().map(|m| self.days_in_month(m)).sum();
        if self.value() == LAST_JULIAN_DATE.0 {
            days - DAYS_SKIPPED
        } else {
            days
        }
    }

    fn estimate_year(time: AbsTime) -> i32 {
        if time < YEAR_AFTER_CHANGEOVER {
            JulianYear::estimate_year(time)
        } else {
            GregorianYear::estimate_year(time)
        }
    }
    fn current_year(time: AbsTime) -> Result<Self, BadDate> {
        if time < YEAR_AFTER_CHANGEOVER {
            JulianYear::current_year(time).map(Self::from)
        } else {
            GregorianYear::current_year(time).map(Self::from)
        }
    }

    fn adjust_date(&self, month: i32, day: i32) -> Result<(CivilMonth, i32), BadDate> {
        let mut day = day;
        let (changeover, september, first) = FIRST_GREGORIAN_DATE;
        if self.value() == changeover
            && month == september
            && day < first - self.last_day(CivilMonth::September) - 1
        {
            day -= DAYS_SKIPPED;
        }
        let key = (self.value(), month, day);
        if LAST_JULIAN_DATE < key && key < FIRST_GREGORIAN_DATE {
            return Err(BadDate::SkippedDate { day });
        }
        year::validate_date(self, month, day)
    }

    fn add_days(&mut self, month: CivilMonth, day: i32, days: i64) -> (CivilMonth, i32) {
        let was_julian = (self.value(), month.number(), day) <= LAST_JULIAN_DATE;
        let (month, day) = year::step_days(self, month, day, days);
        let key = (self.value(), month.number(), day);
        if was_julian && key > LAST_JULIAN_DATE {
            year::step_days(self, month, day, i64::from(DAYS_SKIPPED))
        } else if !was_julian && key < FIRST_GREGORIAN_DATE {
            year::step_days(self, month, day, -i64::from(DAYS_SKIPPED))
        } else {
            (month, day)
        }
    }

    fn day_start(&self, month: CivilMonth, day: i32) -> AbsTime {
        match self.base {
            Base::Julian(y) if (y.value(), month.number(), day) <= LAST_JULIAN_DATE => {
                y.day_start(month, day)
            }
            Base::Julian(y) => GregorianYear::new(y.value()).day_start(month, day),
            Base::Gregorian(y) => y.day_start(month, day),
        }
    }

    fn min_date() -> Date<Self> {
        static MIN_DATE: OnceLock<Date<BritishYear>> = OnceLock::new();
        *MIN_DATE.get_or_init(year::epoch_date)
    }
}

year::year_arithmetic!(BritishYear);

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(date: Date<BritishYear>) -> (i32, i32, i32) {
        (date.value(), date.month().number(), date.day())
    }

    #[test]
    fn starts() {
        for (value, (w, d)) in [
            (-3758, (14, 4)),
            (-3757, (66, 5)),
            (-3756, (118, 6)),
            (-3755, (171, 1)),
            (-3699, (3093, 1)),
            (-3599, (8311, 0)),
            (1752, (287518, 3)),
            (1753, (287569, 1)),
            (1801, (290073, 4)),
            (2001, (300509, 1)),
        ] {
            assert_eq!(AbsTime::new(w, d, 6, 0), BritishYear::new(value).start(), "{value}");
        }
        assert_eq!(YEAR_AFTER_CHANGEOVER, GregorianYear::new(1753).start());
    }

    #[test]
    fn set_value_crosses_changeover() {
        let mut year = BritishYear::new(1700);
        for value in [1752, 1753, 1752, 2001, -3758, 1801] {
            year.set_value(value);
            assert_eq!(BritishYear::new(value), year, "{value}");
        }
    }

    #[test]
    fn from_time() {
        for (time, expected) in [
            (AbsTime::new(287553, 2, 6, 0), (1752, 9, 1)),
            (AbsTime::new(287553, 3, 6, 0), (1752, 9, 2)),
            (AbsTime::new(287553, 4, 6, 0), (1752, 9, 14)),
            (AbsTime::new(287555, 6, 6, 0), (1752, 9, 30)),
            (AbsTime::new(287556, 0, 6, 0), (1752, 10, 1)),
            (AbsTime::new(287569, 0, 6, 0), (1752, 12, 31)),
            (AbsTime::new(287569, 1, 6, 0), (1753, 1, 1)),
            (AbsTime::new(300456, 6, 6, 0), (2000, 1, 1)),
        ] {
            let date = Date::<BritishYear>::from_time(time).unwrap();
            assert_eq!(expected, ymd(date), "{time:?}");
        }
    }

    #[test]
    fn skipped_dates() {
        let year = BritishYear::new(1752);
        for day in 3..=13 {
            assert_eq!(Err(BadDate::SkippedDate { day }), year.adjust_date(9, day), "{day}");
        }
        assert!(year.adjust_date(9, 2).is_ok());
        assert!(year.adjust_date(9, 14).is_ok());
    }

    #[test]
    fn negative_days_in_september_1752() {
        let year = BritishYear::new(1752);
        for (day, expected) in [
            (-1, Some(30)),
            (-17, Some(14)),
            (-18, Some(2)),
            (-19, Some(1)),
            (-20, None),
        ] {
            let adjusted = year.adjust_date(9, day).ok().map(|(_, d)| d);
            assert_eq!(expected, adjusted, "{day}");
        }
        assert_eq!(Ok((CivilMonth::July, 25)), BritishYear::new(2000).adjust_date(7, -7));
    }

    #[test]
    fn leap_days() {
        for (value, ok) in [(1700, true), (1752, true), (1800, false), (2000, true)] {
            assert_eq!(ok, BritishYear::new(value).adjust_date(2, 29).is_ok(), "{value}");
        }
    }

    #[test]
    fn arithmetic_across_gap() {
        let sep2 = Date::<BritishYear>::from_ymd(1752, 9, 2).unwrap();
        let sep14 = Date::<BritishYear>::from_ymd(1752, 9, 14).unwrap();
        assert_eq!(sep14, sep2 + 1);
        assert_eq!(sep2, sep14 - 1);
        assert_eq!(1, sep14 - sep2);
        let aug1 = Date::<BritishYear>::from_ymd(1752, 8, 1).unwrap();
        assert_eq!((1752, 10, 11), ymd(aug1 + 60));
        assert_eq!(aug1, aug1 + 60 - 60);
        let start = Date::<BritishYear>::from_ymd(1751, 12, 31).unwrap();
        assert_eq!((1753, 1, 1), ymd(start + 356));
        assert_eq!(start, start + 356 - 356);
    }

    #[test]
    fn day_starts_are_contiguous() {
        let mut date = Date::<BritishYear>::from_ymd(1752, 8, 25).unwrap();
        for _ in 0..20 {
            let next = date + 1;
            assert_eq!(1, next - date, "{date}");
            date = next;
        }
    }

    #[test]
    fn earliest_date() {
        let min = BritishYear::min_date();
        assert_eq!((-3759, 9, 21), ymd(min));
    }
}
