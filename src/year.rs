//! The calendar-independent year machinery.
//!
//! Every calendar implements [`Year`]: a year number plus the instant the
//! year begins, with month and day counts, date validation, day arithmetic
//! and instant-to-year lookup. Calendars whose years repeat in a fixed cycle
//! share the stepping and estimation arithmetic of [`RegularCycle`].

use std::fmt;

use tracing::{debug, trace};

use crate::date::{Calendar, Date};
use crate::error::{BadDate, UnknownName};
use crate::time::{AbsTime, RelTime};

/// The months (or month-like divisions) of one calendar.
///
/// Months are numbered from 1 in the order of [`Month::ALL`]. The year need
/// not begin with month 1: see [`Month::FIRST`].
pub trait Month:
    Copy + Eq + Ord + std::hash::Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Every month in numeric order.
    const ALL: &'static [Self];
    /// The month a new year begins with.
    const FIRST: Self;

    fn number(self) -> i32;
    /// English name, in title case.
    fn name(self) -> &'static str;

    fn from_number(number: i32) -> Option<Self> {
        let index = usize::try_from(number.checked_sub(1)?).ok()?;
        Self::ALL.get(index).copied()
    }

    /// Looks a month up by name, ignoring case, spaces, hyphens and
    /// underscores.
    ///
    /// # Example
    ///
    /// ```
    /// use luach::Month;
    /// use luach::hebrew::HebrewMonth;
    ///
    /// assert_eq!(Ok(HebrewMonth::AdarSheni), HebrewMonth::from_name("adar_sheni"));
    /// assert!(HebrewMonth::from_name("Adar III").is_err());
    /// ```
    fn from_name(name: &str) -> Result<Self, UnknownName> {
        let wanted = fold_name(name);
        Self::ALL
            .iter()
            .copied()
            .find(|m| fold_name(m.name()) == wanted)
            .ok_or_else(|| UnknownName {
                kind: "month",
                name: name.to_owned(),
            })
    }
}

fn fold_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// The length of a month: either constant or dependent on the year.
pub enum MonthLength<Y> {
    Fixed(u32),
    Computed(fn(&Y) -> u32),
}

impl<Y> Clone for MonthLength<Y> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<Y> Copy for MonthLength<Y> {}

impl<Y> MonthLength<Y> {
    pub fn days(self, year: &Y) -> u32 {
        match self {
            MonthLength::Fixed(days) => days,
            MonthLength::Computed(f) => f(year),
        }
    }
}

/// One year (or cycle) of a calendar.
///
/// Month and day arguments given as plain integers may be negative, counting
/// back from the end of the year or month: month `-1` is the highest-numbered
/// month of the year and day `-1` the last day of the month.
pub trait Year: Copy + fmt::Debug + PartialEq + Send + Sync + 'static {
    type Month: Month;

    const CALENDAR: Calendar;
    /// The earliest instant this calendar names.
    const EPOCH: AbsTime = AbsTime::CREATION;
    /// Reported for dates and instants before [`Year::EPOCH`].
    const EPOCH_ERROR: BadDate = BadDate::BeforeCreation;

    fn new(value: i32) -> Self;
    fn value(&self) -> i32;
    /// Moves this year to another year number.
    fn set_value(&mut self, value: i32);
    /// The instant the year begins.
    fn start(&self) -> AbsTime;

    fn months_in_year(&self) -> i32;
    fn month_length(&self, month: Self::Month) -> MonthLength<Self>;

    /// A guess at the year containing `time`, refined by
    /// [`Year::current_year`]. It need not be exact.
    fn estimate_year(time: AbsTime) -> i32;

    /// The earliest valid date of this calendar, the date containing
    /// [`Year::EPOCH`]. Computed once per calendar.
    fn min_date() -> Date<Self>;

    fn days_in_month(&self, month: Self::Month) -> i32 {
        self.month_length(month).days(self) as i32
    }
    fn first_day(&self) -> i32 {
        1
    }
    fn last_day(&self, month: Self::Month) -> i32 {
        self.days_in_month(month) + self.first_day() - 1
    }
    fn days_in_year(&self) -> i32 {
        self.months().map(|m| self.days_in_month(m)).sum()
    }
    /// Time from the start of this year to the start of the next.
    fn duration(&self) -> RelTime {
        RelTime::from_days(self.days_in_year() as i64)
    }

    /// The months of this year, in calendar order.
    fn months(&self) -> impl Iterator<Item = Self::Month> {
        let count = self.months_in_year();
        (0..count).map(move |i| nth_month(count, i))
    }
    /// Position of `month` within this year, counting from 0.
    fn month_index(&self, month: Self::Month) -> i32 {
        (month.number() - Self::Month::FIRST.number()).rem_euclid(self.months_in_year())
    }

    /// Validates a month and day in this year, resolving negative
    /// (count-from-end) values.
    fn adjust_date(&self, month: i32, day: i32) -> Result<(Self::Month, i32), BadDate> {
        validate_date(self, month, day)
    }

    /// Adds `days` (possibly negative) to a valid date in this year, moving
    /// this year along when the result falls in another year.
    fn add_days(&mut self, month: Self::Month, day: i32, days: i64) -> (Self::Month, i32) {
        step_days(self, month, day, days)
    }

    /// The instant a day begins.
    fn day_start(&self, month: Self::Month, day: i32) -> AbsTime {
        let before: i32 = self
            .months()
            .take_while(|m| *m != month)
            .map(|m| self.days_in_month(m))
            .sum();
        self.start() + RelTime::from_days((before + day - self.first_day()) as i64)
    }

    /// The year containing `time`.
    fn current_year(time: AbsTime) -> Result<Self, BadDate> {
        refine_year(time, Self::estimate_year(time))
    }

    /// The name `month` goes by in this year.
    fn month_name(&self, month: Self::Month) -> &'static str {
        month.name()
    }

    /// Finds a month of this year by name, as [`Month::from_name`] does, but
    /// also accepting the names from [`Year::month_name`].
    ///
    /// # Example
    ///
    /// ```
    /// use luach::Year;
    /// use luach::hebrew::{HebrewMonth, HebrewYear};
    ///
    /// assert_eq!(Ok(HebrewMonth::AdarRishon), HebrewYear::new(5775).month_named("adar"));
    /// assert!(HebrewYear::new(5775).month_named("Adar Sheni").is_err());
    /// assert!(HebrewYear::new(5776).month_named("adar").is_err());
    /// ```
    fn month_named(&self, name: &str) -> Result<Self::Month, UnknownName> {
        let wanted = fold_name(name);
        self.months()
            .find(|&m| fold_name(self.month_name(m)) == wanted || fold_name(m.name()) == wanted)
            .ok_or_else(|| UnknownName {
                kind: "month",
                name: name.to_owned(),
            })
    }

    fn fmt_date(&self, month: Self::Month, day: i32, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", day, self.month_name(month), self.value())
    }
}

fn nth_month<M: Month>(months_in_year: i32, index: i32) -> M {
    M::ALL[(M::FIRST.number() - 1 + index).rem_euclid(months_in_year) as usize]
}

/// The checks every calendar applies in [`Year::adjust_date`].
pub fn validate_date<Y: Year>(
    year: &Y,
    month: i32,
    day: i32,
) -> Result<(Y::Month, i32), BadDate> {
    let count = year.months_in_year();
    let number = if (-count..=-1).contains(&month) {
        month + count + 1
    } else {
        month
    };
    let month = match Y::Month::from_number(number) {
        Some(m) if (1..=count).contains(&number) => m,
        _ => return Err(BadDate::MonthNotInRange { month }),
    };

    let last = year.last_day(month);
    let adjusted = if (-year.days_in_month(month)..=-1).contains(&day) {
        day + last + 1
    } else {
        day
    };
    if !(year.first_day()..=last).contains(&adjusted) {
        return Err(BadDate::DateNotInRange { month: number, day });
    }

    if (year.value(), year.month_index(month), adjusted) < Y::min_date().key() {
        return Err(Y::EPOCH_ERROR);
    }
    Ok((month, adjusted))
}

/// Day arithmetic shared by every calendar: skips whole years, moving the
/// year along, then carries through the months of the final year.
///
/// Year lengths here are the sums of the month lengths.
pub fn step_days<Y: Year>(year: &mut Y, month: Y::Month, day: i32, days: i64) -> (Y::Month, i32) {
    let before: i64 = year
        .months()
        .take_while(|m| *m != month)
        .map(|m| i64::from(year.days_in_month(m)))
        .sum();
    let mut offset = before + i64::from(day - year.first_day()) + days;
    loop {
        let length = months_length(year);
        if offset >= length {
            offset -= length;
            year.set_value(year.value() + 1);
        } else if offset < 0 {
            year.set_value(year.value() - 1);
            offset += months_length(year);
        } else {
            break;
        }
    }
    for m in year.months() {
        let length = i64::from(year.days_in_month(m));
        if offset < length {
            return (m, offset as i32 + year.first_day());
        }
        offset -= length;
    }
    unreachable!("day {offset} past the months of {year:?}")
}

fn months_length<Y: Year>(year: &Y) -> i64 {
    year.months().map(|m| i64::from(year.days_in_month(m))).sum()
}

/// Finds the year containing `time`, starting from `estimate` and stepping
/// one year at a time. Any estimate converges; a close one converges fast.
///
/// # Example
///
/// ```
/// use luach::{AbsTime, Year};
/// use luach::hebrew::HebrewYear;
///
/// let time = AbsTime::new(301225, 4, 6, 0);
/// let year: HebrewYear = luach::year::refine_year(time, 5000).unwrap();
/// assert_eq!(5775, year.value());
/// ```
pub fn refine_year<Y: Year>(time: AbsTime, estimate: i32) -> Result<Y, BadDate> {
    if time < Y::EPOCH {
        return Err(Y::EPOCH_ERROR);
    }
    let mut year = Y::new(estimate);
    while year.start() > time {
        year.set_value(year.value() - 1);
    }
    while year.start() + year.duration() <= time {
        year.set_value(year.value() + 1);
    }
    if year.value() != estimate {
        debug!(
            calendar = %Y::CALENDAR,
            ?time,
            estimate,
            actual = year.value(),
            "year estimate corrected"
        );
    }
    Ok(year)
}

/// Computes [`Year::min_date`]; implementations cache the result.
pub fn epoch_date<Y: Year>() -> Date<Y> {
    let date = Date::<Y>::from_time(Y::EPOCH)
        .unwrap_or_else(|e| panic!("{} epoch is not a date: {e}", Y::CALENDAR));
    trace!(calendar = %Y::CALENDAR, %date, "computed earliest date");
    date
}

/// Stepping arithmetic for calendars whose years repeat in a cycle of fixed
/// length.
///
/// Each year is located by an anchor instant: its start for civil years, its
/// molad for Hebrew years. `span(value)` is the distance from the anchor of
/// year `value` to that of year `value + 1`, and any `years_per_cycle`
/// consecutive spans add up to `cycle_duration`.
#[derive(Copy, Clone)]
pub struct RegularCycle {
    pub years_per_cycle: i32,
    pub cycle_duration: RelTime,
    pub first_year: i32,
    pub first_anchor: AbsTime,
    pub span: fn(i32) -> RelTime,
}

impl RegularCycle {
    /// Linear interpolation from the first year.
    pub fn estimate(&self, time: AbsTime) -> i32 {
        let years = (time - self.first_anchor) * self.years_per_cycle as i64 / self.cycle_duration;
        years as i32 + self.first_year
    }

    /// The anchor of year `target`, given the anchor of year `value`. Jumps
    /// by whole cycles, then steps year by year.
    pub fn seek(&self, value: i32, anchor: AbsTime, target: i32) -> AbsTime {
        // Whole cycles toward the target, never past it.
        let cycles = (i64::from(target) - i64::from(value)) / i64::from(self.years_per_cycle);
        let mut value = (i64::from(value) + cycles * i64::from(self.years_per_cycle)) as i32;
        let mut anchor = anchor + self.cycle_duration * cycles;
        while value < target {
            anchor += (self.span)(value);
            value += 1;
        }
        while value > target {
            value -= 1;
            anchor -= (self.span)(value);
        }
        anchor
    }

    pub fn anchor(&self, target: i32) -> AbsTime {
        self.seek(self.first_year, self.first_anchor, target)
    }
}

/// Implements `year ± n` and `year ±= n` for a [`Year`].
macro_rules! year_arithmetic {
    ($($t:ty),*) => {$(
        impl std::ops::AddAssign<i32> for $t {
            fn add_assign(&mut self, rhs: i32) {
                $crate::Year::set_value(self, $crate::Year::value(self) + rhs);
            }
        }
        impl std::ops::SubAssign<i32> for $t {
            fn sub_assign(&mut self, rhs: i32) {
                $crate::Year::set_value(self, $crate::Year::value(self) - rhs);
            }
        }
        impl std::ops::Add<i32> for $t {
            type Output = $t;
            fn add(mut self, rhs: i32) -> $t {
                self += rhs;
                self
            }
        }
        impl std::ops::Sub<i32> for $t {
            type Output = $t;
            fn sub(mut self, rhs: i32) -> $t {
                self -= rhs;
                self
            }
        }
    )*};
}
pub(crate) use year_arithmetic;
