//! Civil calendars: Julian, Gregorian and the British switch-over between
//! them.
//!
//! Years are astronomical (1 BC is year `0`). Civil days begin at midnight,
//! hour 6 of an [`AbsTime`] day.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::date::{Calendar, Date};
use crate::error::UnknownName;
use crate::time::{AbsTime, RelTime};
use crate::year::{self, Month, MonthLength, RegularCycle, Year};

pub mod british;

pub use british::BritishYear;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum CivilMonth {
    January = 1,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month for CivilMonth {
    const ALL: &'static [Self] = {
        use CivilMonth::*;
        &[
            January, February, March, April, May, June, July, August, September, October,
            November, December,
        ]
    };
    const FIRST: Self = CivilMonth::January;

    fn number(self) -> i32 {
        self as i32
    }
    fn name(self) -> &'static str {
        const NAMES: &[&str] = &[
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ];
        NAMES[self as usize - 1]
    }
}

impl From<CivilMonth> for i32 {
    fn from(month: CivilMonth) -> i32 {
        month.number()
    }
}

impl fmt::Display for CivilMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CivilMonth {
    type Err = UnknownName;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// A calendar with the twelve civil months, differing only in which years
/// are leap years.
pub trait CivilYear: Year<Month = CivilMonth> {
    fn is_leap_year(value: i32) -> bool;

    fn is_leap(&self) -> bool {
        Self::is_leap_year(self.value())
    }
}

fn february_days<Y: CivilYear>(year: &Y) -> u32 {
    if year.is_leap() { 29 } else { 28 }
}

/// Month lengths shared by all civil calendars.
pub(crate) fn civil_month_length<Y: CivilYear>(month: CivilMonth) -> MonthLength<Y> {
    use MonthLength::*;
    match month {
        CivilMonth::February => Computed(february_days::<Y>),
        CivilMonth::April | CivilMonth::June | CivilMonth::September | CivilMonth::November => {
            Fixed(30)
        }
        _ => Fixed(31),
    }
}

fn julian_year_length(value: i32) -> RelTime {
    RelTime::from_days(if JulianYear::is_leap_year(value) { 366 } else { 365 })
}

fn gregorian_year_length(value: i32) -> RelTime {
    RelTime::from_days(if GregorianYear::is_leap_year(value) { 366 } else { 365 })
}

const JULIAN_CYCLE: RegularCycle = RegularCycle {
    years_per_cycle: 4,
    cycle_duration: RelTime::from_days(4 * 365 + 1),
    first_year: -3758,
    first_anchor: AbsTime::new(0, 102, 6, 0),
    span: julian_year_length,
};

const GREGORIAN_CYCLE: RegularCycle = RegularCycle {
    years_per_cycle: 400,
    cycle_duration: RelTime::from_days(400 * 365 + 97),
    first_year: -3758,
    first_anchor: AbsTime::new(0, 132, 6, 0),
    span: gregorian_year_length,
};

/// A year of the Julian calendar: every fourth year is a leap year.
///
/// # Example
///
/// ```
/// use luach::{AbsTime, JulianYear, Year};
///
/// let year = JulianYear::new(-3758);
/// assert_eq!(AbsTime::new(14, 4, 6, 0), year.start());
/// assert_eq!(366, JulianYear::new(1900).days_in_year());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct JulianYear {
    value: i32,
    start: AbsTime,
}

impl CivilYear for JulianYear {
    fn is_leap_year(value: i32) -> bool {
        value.rem_euclid(4) == 0
    }
}

impl Year for JulianYear {
    type Month = CivilMonth;
    const CALENDAR: Calendar = Calendar::Julian;

    fn new(value: i32) -> Self {
        Self {
            value,
            start: JULIAN_CYCLE.anchor(value),
        }
    }
    fn value(&self) -> i32 {
        self.value
    }
    fn set_value(&mut self, value: i32) {
        self.start = JULIAN_CYCLE.seek(self.value, self.start, value);
        self.value = value;
    }
    fn start(&self) -> AbsTime {
        self.start
    }
    fn months_in_year(&self) -> i32 {
        12
    }
    fn month_length(&self, month: CivilMonth) -> MonthLength<Self> {
        civil_month_length(month)
    }
    fn estimate_year(time: AbsTime) -> i32 {
        JULIAN_CYCLE.estimate(time)
    }
    fn min_date() -> Date<Self> {
        static MIN_DATE: OnceLock<Date<JulianYear>> = OnceLock::new();
        *MIN_DATE.get_or_init(year::epoch_date)
    }
}

/// A year of the proleptic Gregorian calendar.
///
/// # Example
///
/// ```
/// use luach::{AbsTime, GregorianYear, Year};
///
/// let year = GregorianYear::new(-3758);
/// assert_eq!(AbsTime::new(18, 6, 6, 0), year.start());
/// assert_eq!(365, GregorianYear::new(1900).days_in_year());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct GregorianYear {
    value: i32,
    start: AbsTime,
}

impl CivilYear for GregorianYear {
    fn is_leap_year(value: i32) -> bool {
        value.rem_euclid(4) == 0 && value.rem_euclid(100) != 0 || value.rem_euclid(400) == 0
    }
}

impl Year for GregorianYear {
    type Month = CivilMonth;
    const CALENDAR: Calendar = Calendar::Gregorian;

    fn new(value: i32) -> Self {
        Self {
            value,
            start: GREGORIAN_CYCLE.anchor(value),
        }
    }
    fn value(&self) -> i32 {
        self.value
    }
    fn set_value(&mut self, value: i32) {
        self.start = GREGORIAN_CYCLE.seek(self.value, self.start, value);
        self.value = value;
    }
    fn start(&self) -> AbsTime {
        self.start
    }
    fn months_in_year(&self) -> i32 {
        12
    }
    fn month_length(&self, month: CivilMonth) -> MonthLength<Self> {
        civil_month_length(month)
    }
    fn estimate_year(time: AbsTime) -> i32 {
        GREGORIAN_CYCLE.estimate(time)
    }
    fn min_date() -> Date<Self> {
        static MIN_DATE: OnceLock<Date<GregorianYear>> = OnceLock::new();
        *MIN_DATE.get_or_init(year::epoch_date)
    }
}

year::year_arithmetic!(JulianYear, GregorianYear);
