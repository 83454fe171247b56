//! Dates in any calendar, and conversion between calendars.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::civil::{BritishYear, GregorianYear, JulianYear};
use crate::daf_yomi::DafYomiCycle;
use crate::error::{BadDate, UnknownName};
use crate::hebrew::HebrewYear;
use crate::time::{AbsTime, RelTime, Weekday};
use crate::year::{Month, Year};

/// A valid day of some calendar: year, month and day of month.
///
/// Months and days given as integers may count back from the end of the year
/// or month; they are stored resolved.
///
/// # Example
///
/// ```
/// use luach::{Date, GregorianYear, Year};
/// use luach::hebrew::{HebrewMonth, HebrewYear};
///
/// let date = Date::new(GregorianYear::new(2015), 8, 17).unwrap();
/// let hebrew: Date<HebrewYear> = date.convert().unwrap();
/// assert_eq!((5775, HebrewMonth::Ellul, 2), (hebrew.value(), hebrew.month(), hebrew.day()));
/// assert_eq!("2 Ellul 5775", hebrew.to_string());
///
/// let last = Date::new(GregorianYear::new(2015), -1, -1).unwrap();
/// assert_eq!("31 December 2015", last.to_string());
/// ```
#[derive(Debug, Copy, Clone)]
pub struct Date<Y: Year> {
    year: Y,
    month: Y::Month,
    day: i32,
}

impl<Y: Year> Date<Y> {
    /// Validates `month` and `day` in `year`.
    pub fn new(year: Y, month: impl Into<i32>, day: i32) -> Result<Self, BadDate> {
        let (month, day) = year.adjust_date(month.into(), day)?;
        Ok(Self { year, month, day })
    }

    /// Shorthand for `Date::new(Y::new(value), month, day)`.
    pub fn from_ymd(value: i32, month: impl Into<i32>, day: i32) -> Result<Self, BadDate> {
        Self::new(Y::new(value), month, day)
    }

    /// The date containing an instant.
    pub fn from_time(time: AbsTime) -> Result<Self, BadDate> {
        Ok(DateTime::from_time(time)?.date)
    }

    pub fn year(&self) -> &Y {
        &self.year
    }
    pub fn value(&self) -> i32 {
        self.year.value()
    }
    pub fn month(&self) -> Y::Month {
        self.month
    }
    pub fn day(&self) -> i32 {
        self.day
    }

    /// The instant the day begins (6pm for Hebrew days, midnight otherwise).
    pub fn day_start(&self) -> AbsTime {
        self.year.day_start(self.month, self.day)
    }

    pub fn weekday(&self) -> Weekday {
        self.day_start().weekday()
    }

    /// The date in another calendar on the civil day of `self`.
    ///
    /// The conversion goes through six hours after `day_start`: civil
    /// midnight of a Hebrew day (which begins the evening before), or 6am of
    /// a civil day.
    pub fn convert<Z: Year>(&self) -> Result<Date<Z>, BadDate> {
        Date::from_time(self.day_start() + RelTime::HOUR * 6)
    }

    pub(crate) fn key(&self) -> (i32, i32, i32) {
        (
            self.year.value(),
            self.year.month_index(self.month),
            self.day,
        )
    }
}

impl<Y: Year> PartialEq for Date<Y> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}
impl<Y: Year> Eq for Date<Y> {}
impl<Y: Year> PartialOrd for Date<Y> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<Y: Year> Ord for Date<Y> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}
impl<Y: Year> Hash for Date<Y> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl<Y: Year> AddAssign<i32> for Date<Y> {
    fn add_assign(&mut self, rhs: i32) {
        (self.month, self.day) = self.year.add_days(self.month, self.day, i64::from(rhs));
    }
}
impl<Y: Year> SubAssign<i32> for Date<Y> {
    fn sub_assign(&mut self, rhs: i32) {
        (self.month, self.day) = self.year.add_days(self.month, self.day, -i64::from(rhs));
    }
}
impl<Y: Year> Add<i32> for Date<Y> {
    type Output = Date<Y>;
    fn add(mut self, rhs: i32) -> Self::Output {
        self += rhs;
        self
    }
}
impl<Y: Year> Sub<i32> for Date<Y> {
    type Output = Date<Y>;
    fn sub(mut self, rhs: i32) -> Self::Output {
        self -= rhs;
        self
    }
}
/// Days between two dates.
impl<Y: Year> Sub for Date<Y> {
    type Output = i64;
    fn sub(self, rhs: Date<Y>) -> Self::Output {
        (self.day_start() - rhs.day_start()).days()
    }
}

impl<Y: Year> fmt::Display for Date<Y> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.year.fmt_date(self.month, self.day, f)
    }
}

/// An instant expressed as a date and the time since that day began.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DateTime<Y: Year> {
    pub date: Date<Y>,
    pub time: RelTime,
}

impl<Y: Year> DateTime<Y> {
    /// # Example
    ///
    /// ```
    /// use luach::{AbsTime, DateTime, RelTime};
    /// use luach::hebrew::{HebrewMonth, HebrewYear};
    ///
    /// let dt = DateTime::<HebrewYear>::from_time(AbsTime::new(51, 4, 7, 30)).unwrap();
    /// assert_eq!((3, HebrewMonth::Tishri, 1), (dt.date.value(), dt.date.month(), dt.date.day()));
    /// assert_eq!(RelTime::new(0, 0, 7, 30), dt.time);
    /// ```
    pub fn from_time(time: AbsTime) -> Result<Self, BadDate> {
        let mut year = Y::current_year(time)?;
        let (days, time) = (time - year.start()).days_chalakim();
        let (month, day) = year.add_days(Y::Month::FIRST, year.first_day(), days);
        Ok(Self {
            date: Date { year, month, day },
            time,
        })
    }

    pub fn instant(&self) -> AbsTime {
        self.date.day_start() + self.time
    }
}

/// The supported calendars.
///
/// Parses from and serializes to lowercase names; `civil` is accepted for
/// the British calendar and `daf` for Daf Yomi.
///
/// # Example
///
/// ```
/// use luach::Calendar;
///
/// assert_eq!(Ok(Calendar::British), "civil".parse());
/// assert_eq!("dafyomi", Calendar::DafYomi.to_string());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Calendar {
    Gregorian,
    Julian,
    /// Julian up to 2 September 1752, Gregorian from 14 September 1752.
    #[serde(alias = "civil")]
    British,
    Hebrew,
    #[serde(alias = "daf")]
    DafYomi,
}

impl Calendar {
    pub const ALL: &'static [Calendar] = &[
        Calendar::Gregorian,
        Calendar::Julian,
        Calendar::British,
        Calendar::Hebrew,
        Calendar::DafYomi,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Calendar::Gregorian => "gregorian",
            Calendar::Julian => "julian",
            Calendar::British => "british",
            Calendar::Hebrew => "hebrew",
            Calendar::DafYomi => "dafyomi",
        }
    }

    /// The date containing `time` in this calendar.
    pub fn date_at(self, time: AbsTime) -> Result<AnyDate, BadDate> {
        Ok(match self {
            Calendar::Gregorian => AnyDate::Gregorian(Date::from_time(time)?),
            Calendar::Julian => AnyDate::Julian(Date::from_time(time)?),
            Calendar::British => AnyDate::British(Date::from_time(time)?),
            Calendar::Hebrew => AnyDate::Hebrew(Date::from_time(time)?),
            Calendar::DafYomi => AnyDate::DafYomi(Date::from_time(time)?),
        })
    }

    /// Validates a numeric date in this calendar.
    pub fn date(self, value: i32, month: i32, day: i32) -> Result<AnyDate, BadDate> {
        Ok(match self {
            Calendar::Gregorian => AnyDate::Gregorian(Date::from_ymd(value, month, day)?),
            Calendar::Julian => AnyDate::Julian(Date::from_ymd(value, month, day)?),
            Calendar::British => AnyDate::British(Date::from_ymd(value, month, day)?),
            Calendar::Hebrew => AnyDate::Hebrew(Date::from_ymd(value, month, day)?),
            Calendar::DafYomi => AnyDate::DafYomi(Date::from_ymd(value, month, day)?),
        })
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Calendar {
    type Err = UnknownName;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gregorian" => Ok(Calendar::Gregorian),
            "julian" => Ok(Calendar::Julian),
            "british" | "civil" => Ok(Calendar::British),
            "hebrew" => Ok(Calendar::Hebrew),
            "dafyomi" | "daf" => Ok(Calendar::DafYomi),
            _ => Err(UnknownName {
                kind: "calendar",
                name: s.to_owned(),
            }),
        }
    }
}

/// A date in a calendar chosen at run time.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AnyDate {
    Gregorian(Date<GregorianYear>),
    Julian(Date<JulianYear>),
    British(Date<BritishYear>),
    Hebrew(Date<HebrewYear>),
    DafYomi(Date<DafYomiCycle>),
}

impl AnyDate {
    pub fn calendar(&self) -> Calendar {
        match self {
            AnyDate::Gregorian(_) => Calendar::Gregorian,
            AnyDate::Julian(_) => Calendar::Julian,
            AnyDate::British(_) => Calendar::British,
            AnyDate::Hebrew(_) => Calendar::Hebrew,
            AnyDate::DafYomi(_) => Calendar::DafYomi,
        }
    }

    pub fn day_start(&self) -> AbsTime {
        match self {
            AnyDate::Gregorian(d) => d.day_start(),
            AnyDate::Julian(d) => d.day_start(),
            AnyDate::British(d) => d.day_start(),
            AnyDate::Hebrew(d) => d.day_start(),
            AnyDate::DafYomi(d) => d.day_start(),
        }
    }

    /// Same as [`Date::convert`].
    ///
    /// # Example
    ///
    /// ```
    /// use luach::Calendar;
    ///
    /// let date = Calendar::British.date(1752, 9, 2).unwrap();
    /// let hebrew = date.convert(Calendar::Hebrew).unwrap();
    /// assert_eq!("5 Tishri 5513", hebrew.to_string());
    /// ```
    pub fn convert(&self, to: Calendar) -> Result<AnyDate, BadDate> {
        to.date_at(self.day_start() + RelTime::HOUR * 6)
    }
}

impl fmt::Display for AnyDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyDate::Gregorian(d) => d.fmt(f),
            AnyDate::Julian(d) => d.fmt(f),
            AnyDate::British(d) => d.fmt(f),
            AnyDate::Hebrew(d) => d.fmt(f),
            AnyDate::DafYomi(d) => d.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::civil::CivilMonth;
    use crate::hebrew::HebrewMonth;

    #[test]
    fn round_trip_through_day_start() {
        for (y, m, d) in [(2015, 8, 17), (1752, 9, 2), (1752, 9, 14), (-3758, 1, 1), (1, 3, 1)] {
            let date = Date::<BritishYear>::from_ymd(y, m, d).unwrap();
            assert_eq!(date, Date::from_time(date.day_start()).unwrap(), "{y}-{m}-{d}");
        }
        for (y, m, d) in [(5775, 7, 1), (5776, 13, 29), (2, 7, 1), (1, 6, 25)] {
            let date = Date::<HebrewYear>::from_ymd(y, m, d).unwrap();
            assert_eq!(date, Date::from_time(date.day_start()).unwrap(), "{y}-{m}-{d}");
        }
    }

    #[test]
    fn day_arithmetic() {
        let date = Date::<GregorianYear>::from_ymd(2000, 2, 28).unwrap();
        assert_eq!(Date::from_ymd(2000, 3, 1).unwrap(), date + 2);
        assert_eq!(Date::from_ymd(1999, 12, 31).unwrap(), date - 59);
        assert_eq!(-59, (date - 59) - date);
        let mut d = date;
        d += 366;
        assert_eq!((2001, CivilMonth::February, 28), (d.value(), d.month(), d.day()));
        d -= 366;
        assert_eq!(date, d);
    }

    #[test]
    fn ordering() {
        let a = Date::<HebrewYear>::from_ymd(5775, HebrewMonth::Ellul, 29).unwrap();
        let b = Date::<HebrewYear>::from_ymd(5776, HebrewMonth::Tishri, 1).unwrap();
        let c = Date::<HebrewYear>::from_ymd(5776, HebrewMonth::Nissan, 1).unwrap();
        assert!(a < b && b < c);
        assert_eq!(b, a + 1);
        assert_eq!(a.max(c), c);
    }

    #[test]
    fn date_time_split() {
        let time = AbsTime::new(300456, 6, 17, 540);
        let dt = DateTime::<GregorianYear>::from_time(time).unwrap();
        assert_eq!(
            (2000, CivilMonth::January, 1),
            (dt.date.value(), dt.date.month(), dt.date.day())
        );
        assert_eq!(RelTime::new(0, 0, 11, 540), dt.time);
        assert_eq!(time, dt.instant());
    }

    #[test]
    fn calendar_names() {
        for &calendar in Calendar::ALL {
            assert_eq!(Ok(calendar), calendar.name().parse(), "{calendar}");
        }
        assert_eq!(Ok(Calendar::DafYomi), "Daf".parse::<Calendar>());
        assert!("mayan".parse::<Calendar>().is_err());
    }

    #[test]
    fn any_date() {
        let date = Calendar::Gregorian.date(2015, 8, 17).unwrap();
        assert_eq!(Calendar::Gregorian, date.calendar());
        let hebrew = date.convert(Calendar::Hebrew).unwrap();
        assert_eq!("2 Ellul 5775", hebrew.to_string());
        assert_eq!(date, hebrew.convert(Calendar::Gregorian).unwrap());
        assert_eq!(
            Err(BadDate::BeforeDafYomi),
            Calendar::Gregorian.date(1900, 1, 1).unwrap().convert(Calendar::DafYomi)
        );
    }
}
