//! Fixed-radix time units shared by every calendar.
//!
//! All times are counted in chalakim (1/1080 of an hour). A [`RelTime`] is a
//! signed duration; an [`AbsTime`] is an instant, kept normalized as weeks,
//! days, hours and chalakim since the start of week 0.
//!
//! Day 0 of a week is Sunday, and hour 0 of a day is 6pm of the previous
//! civil evening, so civil midnight is hour 6.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Rem, Sub, SubAssign};

pub const CHALAKIM_PER_HOUR: i64 = 1080;
pub const HOURS_PER_DAY: i64 = 24;
pub const DAYS_PER_WEEK: i64 = 7;
pub const MINUTES_PER_HOUR: i64 = 60;
pub const CHALAKIM_PER_MINUTE: i64 = CHALAKIM_PER_HOUR / MINUTES_PER_HOUR;
pub const CHALAKIM_PER_DAY: i64 = CHALAKIM_PER_HOUR * HOURS_PER_DAY;
pub const CHALAKIM_PER_WEEK: i64 = CHALAKIM_PER_DAY * DAYS_PER_WEEK;

/// A signed duration, counted in chalakim.
///
/// Equality and ordering depend only on the total count, so
/// `RelTime::new(1, 0, 0, 0) == RelTime::new(0, 7, 0, 0)`.
///
/// Division and remainder are floored, so they stay consistent for negative
/// durations.
///
/// # Example
///
/// ```
/// use luach::RelTime;
///
/// let t = RelTime::new(0, 0, -1, 0);
/// assert_eq!(-1, t.days());
/// assert_eq!((-1, RelTime::new(0, 0, 23, 0)), t.days_chalakim());
/// ```
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct RelTime {
    chalakim: i64,
}

impl RelTime {
    pub const ZERO: RelTime = RelTime::from_chalakim(0);
    pub const HOUR: RelTime = RelTime::from_chalakim(CHALAKIM_PER_HOUR);
    pub const DAY: RelTime = RelTime::from_chalakim(CHALAKIM_PER_DAY);
    pub const WEEK: RelTime = RelTime::from_chalakim(CHALAKIM_PER_WEEK);

    /// Combines the components into a single duration. Components may be
    /// negative or exceed their usual range.
    pub const fn new(weeks: i64, days: i64, hours: i64, chalakim: i64) -> Self {
        Self::from_chalakim(
            ((weeks * DAYS_PER_WEEK + days) * HOURS_PER_DAY + hours) * CHALAKIM_PER_HOUR + chalakim,
        )
    }
    pub const fn from_chalakim(chalakim: i64) -> Self {
        Self { chalakim }
    }
    pub const fn from_days(days: i64) -> Self {
        Self::from_chalakim(days * CHALAKIM_PER_DAY)
    }
    pub const fn chalakim(self) -> i64 {
        self.chalakim
    }

    /// Whole weeks, rounded towards negative infinity.
    pub const fn weeks(self) -> i64 {
        self.chalakim.div_euclid(CHALAKIM_PER_WEEK)
    }
    /// Whole days, rounded towards negative infinity.
    pub const fn days(self) -> i64 {
        self.chalakim.div_euclid(CHALAKIM_PER_DAY)
    }
    /// Splits the duration into whole days and the non-negative remainder.
    pub fn days_chalakim(self) -> (i64, RelTime) {
        self.div_rem(Self::DAY)
    }

    /// Floored division with remainder, the remainder taking the sign of
    /// `rhs`.
    pub fn div_rem(self, rhs: RelTime) -> (i64, RelTime) {
        (self / rhs, self % rhs)
    }
}

impl Add for RelTime {
    type Output = RelTime;
    fn add(self, rhs: RelTime) -> RelTime {
        RelTime::from_chalakim(self.chalakim + rhs.chalakim)
    }
}
impl Sub for RelTime {
    type Output = RelTime;
    fn sub(self, rhs: RelTime) -> RelTime {
        RelTime::from_chalakim(self.chalakim - rhs.chalakim)
    }
}
impl AddAssign for RelTime {
    fn add_assign(&mut self, rhs: RelTime) {
        self.chalakim += rhs.chalakim;
    }
}
impl SubAssign for RelTime {
    fn sub_assign(&mut self, rhs: RelTime) {
        self.chalakim -= rhs.chalakim;
    }
}
impl Neg for RelTime {
    type Output = RelTime;
    fn neg(self) -> RelTime {
        RelTime::from_chalakim(-self.chalakim)
    }
}
impl Mul<i64> for RelTime {
    type Output = RelTime;
    fn mul(self, rhs: i64) -> RelTime {
        RelTime::from_chalakim(self.chalakim * rhs)
    }
}
impl Mul<RelTime> for i64 {
    type Output = RelTime;
    fn mul(self, rhs: RelTime) -> RelTime {
        rhs * self
    }
}
impl Div for RelTime {
    type Output = i64;
    fn div(self, rhs: RelTime) -> i64 {
        div_floor(self.chalakim, rhs.chalakim)
    }
}
impl Div<i64> for RelTime {
    type Output = RelTime;
    fn div(self, rhs: i64) -> RelTime {
        RelTime::from_chalakim(div_floor(self.chalakim, rhs))
    }
}
impl Rem for RelTime {
    type Output = RelTime;
    fn rem(self, rhs: RelTime) -> RelTime {
        let quotient = div_floor(self.chalakim, rhs.chalakim);
        RelTime::from_chalakim(self.chalakim - quotient * rhs.chalakim)
    }
}
impl Rem<i64> for RelTime {
    type Output = RelTime;
    fn rem(self, rhs: i64) -> RelTime {
        RelTime::from_chalakim(self.chalakim - div_floor(self.chalakim, rhs) * rhs)
    }
}

// `div_euclid` disagrees with floored division when the divisor is negative.
fn div_floor(a: i64, b: i64) -> i64 {
    let q = a / b;
    if (a % b != 0) && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

/// An instant, normalized so that `0 <= days < 7`, `0 <= hours < 24` and
/// `0 <= chalakim < 1080`. Weeks may be any signed value.
///
/// Only `AbsTime ± RelTime` and `AbsTime - AbsTime` are defined. Adding two
/// instants does not compile:
///
/// ```compile_fail
/// use luach::AbsTime;
///
/// let t = AbsTime::new(1, 0, 0, 0) + AbsTime::new(2, 0, 0, 0);
/// ```
///
/// Neither does subtracting an instant from a duration:
///
/// ```compile_fail
/// use luach::{AbsTime, RelTime};
///
/// let t = RelTime::DAY - AbsTime::new(2, 0, 0, 0);
/// ```
///
/// # Example
///
/// ```
/// use luach::{AbsTime, RelTime};
///
/// let t = AbsTime::new(100, 5, -12, 123);
/// assert_eq!(AbsTime::new(100, 4, 12, 123), t);
/// assert_eq!((100, 4, 12, 123), (t.weeks(), t.days(), t.hours(), t.chalakim()));
///
/// let later = t + RelTime::new(0, 3, 0, 0);
/// assert_eq!(AbsTime::new(101, 0, 12, 123), later);
/// assert_eq!(RelTime::new(0, 3, 0, 0), later - t);
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct AbsTime {
    weeks: i64,
    days: u8,
    hours: u8,
    chalakim: u16,
}

impl AbsTime {
    /// Six hours into the first day of week 0: the earliest instant any
    /// calendar here will name.
    pub const CREATION: AbsTime = AbsTime::new(0, 0, 6, 0);

    /// Builds a normalized instant; out-of-range components carry into the
    /// next larger unit, borrowing when negative.
    pub const fn new(weeks: i64, days: i64, hours: i64, chalakim: i64) -> Self {
        Self::from_offset(RelTime::new(weeks, days, hours, chalakim).chalakim())
    }

    const fn from_offset(total: i64) -> Self {
        let in_week = total.rem_euclid(CHALAKIM_PER_WEEK);
        Self {
            weeks: total.div_euclid(CHALAKIM_PER_WEEK),
            days: (in_week / CHALAKIM_PER_DAY) as u8,
            hours: (in_week % CHALAKIM_PER_DAY / CHALAKIM_PER_HOUR) as u8,
            chalakim: (in_week % CHALAKIM_PER_HOUR) as u16,
        }
    }

    const fn offset(self) -> i64 {
        RelTime::new(
            self.weeks,
            self.days as i64,
            self.hours as i64,
            self.chalakim as i64,
        )
        .chalakim()
    }

    pub const fn weeks(self) -> i64 {
        self.weeks
    }
    pub const fn days(self) -> u8 {
        self.days
    }
    pub const fn hours(self) -> u8 {
        self.hours
    }
    pub const fn chalakim(self) -> u16 {
        self.chalakim
    }

    pub fn weekday(self) -> Weekday {
        Weekday::from_index(self.days)
    }

    /// Hour 0 of the same day.
    pub const fn start_of_day(self) -> AbsTime {
        AbsTime::new(self.weeks, self.days as i64, 0, 0)
    }
    /// Hour 0 of the Sunday of the same week.
    pub const fn start_of_week(self) -> AbsTime {
        AbsTime::new(self.weeks, 0, 0, 0)
    }
    /// Time elapsed since the day began.
    pub fn time_of_day(self) -> RelTime {
        RelTime::new(0, 0, self.hours as i64, self.chalakim as i64)
    }

    /// Splits the time of day into hours, minutes and the remaining chalakim
    /// (18 to the minute), as a molad is announced.
    ///
    /// # Example
    ///
    /// ```
    /// use luach::AbsTime;
    ///
    /// assert_eq!((5, 11, 6), AbsTime::new(0, 1, 5, 204).hours_minutes_parts());
    /// ```
    pub fn hours_minutes_parts(self) -> (u8, u8, u8) {
        let minutes = self.chalakim as i64 / CHALAKIM_PER_MINUTE;
        let parts = self.chalakim as i64 % CHALAKIM_PER_MINUTE;
        (self.hours, minutes as u8, parts as u8)
    }
}

impl Add<RelTime> for AbsTime {
    type Output = AbsTime;
    fn add(self, rhs: RelTime) -> AbsTime {
        AbsTime::from_offset(self.offset() + rhs.chalakim())
    }
}
impl Sub<RelTime> for AbsTime {
    type Output = AbsTime;
    fn sub(self, rhs: RelTime) -> AbsTime {
        AbsTime::from_offset(self.offset() - rhs.chalakim())
    }
}
impl AddAssign<RelTime> for AbsTime {
    fn add_assign(&mut self, rhs: RelTime) {
        *self = *self + rhs;
    }
}
impl SubAssign<RelTime> for AbsTime {
    fn sub_assign(&mut self, rhs: RelTime) {
        *self = *self - rhs;
    }
}
impl Sub for AbsTime {
    type Output = RelTime;
    fn sub(self, rhs: AbsTime) -> RelTime {
        RelTime::from_chalakim(self.offset() - rhs.offset())
    }
}

/// Day of the week, numbered as in [`AbsTime::days`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Weekday {
    Sunday = 0,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Takes the index modulo 7.
    pub fn from_index(index: u8) -> Self {
        use Weekday::*;
        [Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday][index as usize % 7]
    }
    pub fn index(self) -> u8 {
        self as u8
    }
    pub fn name(self) -> &'static str {
        const NAMES: &[&str] = &[
            "Sunday",
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
        ];
        NAMES[self as usize]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
