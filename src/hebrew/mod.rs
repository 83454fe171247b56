//! The Hebrew calendar
//!
//! A lunisolar calendar fixed by calculation: every month begins near a
//! mean conjunction (molad) of constant period, and a year has 12 or 13
//! months following a 19-year cycle. The year begins on 1 Tishri, but
//! months are numbered from Nissan.
//!
//! Hebrew days begin at 6pm, hour 0 of an [`AbsTime`] day, so the weekday
//! of an instant is its Hebrew weekday.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::date::{Calendar, Date};
use crate::error::{BadDate, UnknownName};
use crate::time::{AbsTime, RelTime, Weekday};
use crate::year::{self, Month, MonthLength, RegularCycle, Year};

pub mod sedrah;

pub use sedrah::Sedrah;

/// Mean interval between two moladot: 29 days 12 hours 793 chalakim.
pub const LUNAR_CYCLE: RelTime = RelTime::new(4, 1, 12, 793);
/// Molad of Tishri of year 2, Friday 8am of the sixth day of creation.
pub const FIRST_MOLAD: AbsTime = AbsTime::new(0, 5, 14, 0);
/// The year [`FIRST_MOLAD`] belongs to.
pub const FIRST_YEAR: i32 = 2;

pub const YEARS_PER_CYCLE: i32 = 19;
pub const MONTHS_PER_CYCLE: i64 = 235;

/// Tuesday, 9 hours 204 chalakim into the day.
const GATRAD: RelTime = RelTime::new(0, 2, 9, 204);
/// Monday, 15 hours 589 chalakim into the day.
const BTUTKPAT: RelTime = RelTime::new(0, 1, 15, 589);

const SHORT_MONTH: u32 = 29;
const LONG_MONTH: u32 = 30;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum HebrewMonth {
    Nissan = 1,
    Iyar,
    Sivan,
    Tammuz,
    Av,
    Ellul,
    Tishri,
    Cheshvan,
    Kislev,
    Teveth,
    Shevat,
    /// Plain Adar in a year of 12 months.
    AdarRishon,
    AdarSheni,
}

impl Month for HebrewMonth {
    const ALL: &'static [Self] = {
        use HebrewMonth::*;
        &[
            Nissan, Iyar, Sivan, Tammuz, Av, Ellul, Tishri, Cheshvan, Kislev, Teveth, Shevat,
            AdarRishon, AdarSheni,
        ]
    };
    const FIRST: Self = HebrewMonth::Tishri;

    fn number(self) -> i32 {
        self as i32
    }
    fn name(self) -> &'static str {
        use HebrewMonth::*;
        match self {
            Nissan => "Nissan",
            Iyar => "Iyar",
            Sivan => "Sivan",
            Tammuz => "Tammuz",
            Av => "Av",
            Ellul => "Ellul",
            Tishri => "Tishri",
            Cheshvan => "Cheshvan",
            Kislev => "Kislev",
            Teveth => "Teveth",
            Shevat => "Shevat",
            AdarRishon => "Adar Rishon",
            AdarSheni => "Adar Sheni",
        }
    }
}

impl From<HebrewMonth> for i32 {
    fn from(month: HebrewMonth) -> i32 {
        month.number()
    }
}

impl fmt::Display for HebrewMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HebrewMonth {
    type Err = UnknownName;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Kind of year by length: 353, 354 or 355 days, or 383, 384 or 385 in a
/// leap year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    /// Cheshvan and Kislev both have 29 days.
    Defective,
    /// Cheshvan has 29 days and Kislev 30.
    Regular,
    /// Cheshvan and Kislev both have 30 days.
    Full,
}

/// Number of months in Hebrew year `value`.
///
/// Years 3, 6, 8, 11, 14, 17 and 19 of each 19-year cycle have 13 months.
pub fn months_in(value: i32) -> i32 {
    if (value as i64 * 7 + 1).rem_euclid(YEARS_PER_CYCLE as i64) < 7 {
        13
    } else {
        12
    }
}

/// From the molad of Tishri of year `value` to that of the next year.
fn molad_span(value: i32) -> RelTime {
    LUNAR_CYCLE * months_in(value) as i64
}

const HEBREW_CYCLE: RegularCycle = RegularCycle {
    years_per_cycle: YEARS_PER_CYCLE,
    cycle_duration: RelTime::from_chalakim(LUNAR_CYCLE.chalakim() * MONTHS_PER_CYCLE),
    first_year: FIRST_YEAR,
    first_anchor: FIRST_MOLAD,
    span: molad_span,
};

/// 1 Tishri of year `value`, whose Tishri molad is `molad`, after the
/// postponements.
fn rosh_hashanah(value: i32, molad: AbsTime) -> AbsTime {
    // A molad at or after noon moves to the next day, and Rosh Hashanah
    // never falls on Sunday, Wednesday or Friday.
    let mut day = molad + RelTime::HOUR * 6;
    if matches!(
        day.weekday(),
        Weekday::Sunday | Weekday::Wednesday | Weekday::Friday
    ) {
        day += RelTime::DAY;
    }
    let mut start = day.start_of_day();
    if start > molad {
        return start;
    }

    let week = molad.start_of_week();
    match molad.weekday() {
        // Otherwise the next year would be too long.
        Weekday::Tuesday if months_in(value) == 12 && molad >= week + GATRAD => {
            start += RelTime::DAY * 2;
        }
        // Otherwise the previous, leap year would be too short.
        Weekday::Monday if months_in(value - 1) == 13 && molad >= week + BTUTKPAT => {
            start += RelTime::DAY;
        }
        _ => {}
    }
    start
}

/// A Hebrew year.
///
/// # Example
///
/// ```
/// use luach::{AbsTime, Year};
/// use luach::hebrew::{HebrewMonth, HebrewYear, YearType};
///
/// let year = HebrewYear::new(5775);
/// assert_eq!(AbsTime::new(301225, 4, 0, 0), year.start());
/// assert_eq!(AbsTime::new(301225, 3, 14, 339), year.molad(HebrewMonth::Tishri).unwrap());
/// assert_eq!((354, YearType::Regular), (year.days_in_year(), year.year_type()));
/// assert!(!year.is_leap());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct HebrewYear {
    value: i32,
    /// Molad of Tishri.
    molad: AbsTime,
    start: AbsTime,
    days: i32,
}

impl HebrewYear {
    fn from_molad(value: i32, molad: AbsTime) -> Self {
        let start = rosh_hashanah(value, molad);
        let next = rosh_hashanah(value + 1, molad + molad_span(value));
        Self {
            value,
            molad,
            start,
            days: (next - start).days() as i32,
        }
    }

    pub fn is_leap(&self) -> bool {
        self.months_in_year() == 13
    }

    pub fn year_type(&self) -> YearType {
        match (self.days - 3).rem_euclid(5) {
            0 => YearType::Defective,
            1 => YearType::Regular,
            2 => YearType::Full,
            _ => panic!("Hebrew year {} has {} days", self.value, self.days),
        }
    }

    /// Molad of a month of this year.
    ///
    /// The month is validated as for a date, so Adar Sheni means Adar in a
    /// year of 12 months.
    pub fn molad(&self, month: impl Into<i32>) -> Result<AbsTime, BadDate> {
        let (month, _) = self.adjust_date(month.into(), 1)?;
        Ok(self.molad_of(month))
    }

    fn molad_of(&self, month: HebrewMonth) -> AbsTime {
        self.molad + LUNAR_CYCLE * self.month_index(month) as i64
    }

    /// Day of the omer counted on the evening that begins a date: 1 for
    /// 16 Nissan up to 49 for 5 Sivan, `None` for any other date.
    ///
    /// # Example
    ///
    /// ```
    /// use luach::Year;
    /// use luach::hebrew::{HebrewMonth::*, HebrewYear};
    ///
    /// let year = HebrewYear::new(5775);
    /// assert_eq!(Ok(Some(1)), year.omer_day(Nissan, 16));
    /// assert_eq!(Ok(Some(33)), year.omer_day(Iyar, 18));
    /// assert_eq!(Ok(None), year.omer_day(Sivan, 6));
    /// ```
    pub fn omer_day(&self, month: impl Into<i32>, day: i32) -> Result<Option<i32>, BadDate> {
        let (month, day) = self.adjust_date(month.into(), day)?;
        Ok(self.omer_day_of(month, day))
    }

    fn omer_day_of(&self, month: HebrewMonth, day: i32) -> Option<i32> {
        use HebrewMonth::*;
        let key = (month.number(), day);
        if (Nissan.number(), 15) < key && key < (Sivan.number(), 6) {
            let days = self.day_start(month, day) - self.day_start(Nissan, 15);
            Some(days.days() as i32)
        } else {
            None
        }
    }
}

impl Year for HebrewYear {
    type Month = HebrewMonth;
    const CALENDAR: Calendar = Calendar::Hebrew;

    fn new(value: i32) -> Self {
        Self::from_molad(value, HEBREW_CYCLE.anchor(value))
    }
    fn value(&self) -> i32 {
        self.value
    }
    fn set_value(&mut self, value: i32) {
        let molad = HEBREW_CYCLE.seek(self.value, self.molad, value);
        *self = Self::from_molad(value, molad);
    }
    fn start(&self) -> AbsTime {
        self.start
    }
    fn months_in_year(&self) -> i32 {
        months_in(self.value)
    }
    fn month_length(&self, month: HebrewMonth) -> MonthLength<Self> {
        use HebrewMonth::*;
        use MonthLength::*;
        match month {
            Nissan | Sivan | Av | Tishri | Shevat => Fixed(LONG_MONTH),
            Iyar | Tammuz | Ellul | Teveth | AdarSheni => Fixed(SHORT_MONTH),
            Cheshvan => Computed(|year: &HebrewYear| match year.year_type() {
                YearType::Full => LONG_MONTH,
                _ => SHORT_MONTH,
            }),
            Kislev => Computed(|year: &HebrewYear| match year.year_type() {
                YearType::Defective => SHORT_MONTH,
                _ => LONG_MONTH,
            }),
            AdarRishon => Computed(|year: &HebrewYear| {
                if year.is_leap() { LONG_MONTH } else { SHORT_MONTH }
            }),
        }
    }
    fn days_in_year(&self) -> i32 {
        self.days
    }

    fn estimate_year(time: AbsTime) -> i32 {
        HEBREW_CYCLE.estimate(time)
    }
    fn min_date() -> Date<Self> {
        static MIN_DATE: OnceLock<Date<HebrewYear>> = OnceLock::new();
        *MIN_DATE.get_or_init(year::epoch_date)
    }

    /// Besides the usual checks, takes Adar Sheni in a year of 12 months as
    /// Adar, and the 30th of a 29-day Cheshvan, Kislev or Adar as the first
    /// of the next month.
    fn adjust_date(&self, month: i32, day: i32) -> Result<(HebrewMonth, i32), BadDate> {
        use HebrewMonth::*;
        let result = year::validate_date(self, month, day);
        match (result, HebrewMonth::from_number(month)) {
            (Err(BadDate::MonthNotInRange { .. }), Some(AdarSheni)) => {
                year::validate_date(self, AdarRishon.number(), day)
            }
            (Err(BadDate::DateNotInRange { .. }), Some(short @ (Cheshvan | Kislev | AdarRishon)))
                if day == LONG_MONTH as i32 =>
            {
                let next = match short {
                    Cheshvan => Kislev,
                    Kislev => Teveth,
                    _ => Nissan,
                };
                year::validate_date(self, next.number(), 1)
            }
            (result, _) => result,
        }
    }

    fn month_name(&self, month: HebrewMonth) -> &'static str {
        match month {
            HebrewMonth::AdarRishon if !self.is_leap() => "Adar",
            _ => month.name(),
        }
    }
}

year::year_arithmetic!(HebrewYear);

impl Date<HebrewYear> {
    /// Molad of this date's month.
    pub fn molad(&self) -> AbsTime {
        self.year().molad_of(self.month())
    }

    /// See [`HebrewYear::omer_day`].
    pub fn omer_day(&self) -> Option<i32> {
        self.year().omer_day_of(self.month(), self.day())
    }
}

/// Displays a molad the way it is announced: the civil weekday and clock
/// time, with the chalakim left over after whole minutes.
///
/// # Example
///
/// ```
/// use luach::Year;
/// use luach::hebrew::{HebrewMonth, HebrewYear, MoladTime};
///
/// let molad = HebrewYear::new(5775).molad(HebrewMonth::Tishri).unwrap();
/// assert_eq!("Wednesday 08:18 and 15 parts", MoladTime(molad).to_string());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MoladTime(pub AbsTime);

impl fmt::Display for MoladTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let civil = self.0 - RelTime::HOUR * 6;
        let (hours, minutes, parts) = civil.hours_minutes_parts();
        write!(
            f,
            "{} {:02}:{:02} and {} parts",
            civil.weekday(),
            hours,
            minutes,
            parts
        )
    }
}

#[cfg(test)]
mod tests {
    use super::HebrewMonth::*;
    use super::*;

    fn ymd(date: Date<HebrewYear>) -> (i32, HebrewMonth, i32) {
        (date.value(), date.month(), date.day())
    }

    #[test]
    fn thresholds() {
        assert_eq!(
            RelTime::new(50, 6, 18, 0) - LUNAR_CYCLE * 12,
            GATRAD,
        );
        assert_eq!(
            RelTime::new(-55, 2, 18, 0) + LUNAR_CYCLE * 13,
            BTUTKPAT,
        );
    }

    #[test]
    fn postponement_at_thresholds() {
        // 5775 has 12 months and follows a leap year, so both rules apply.
        assert_eq!((12, 13), (months_in(5775), months_in(5774)));
        let week = AbsTime::new(1000, 0, 0, 0);
        let chalak = RelTime::from_chalakim(1);
        for (molad, expected) in [
            (week + GATRAD, Weekday::Thursday),
            (week + GATRAD - chalak, Weekday::Tuesday),
            (week + BTUTKPAT, Weekday::Tuesday),
            (week + BTUTKPAT - chalak, Weekday::Monday),
        ] {
            let start = rosh_hashanah(5775, molad);
            assert_eq!(expected, start.weekday(), "{molad:?}");
            assert_eq!(week, start.start_of_week(), "{molad:?}");
        }
    }

    #[test]
    fn leap_years() {
        let leap: Vec<_> = (1..=19).filter(|&v| months_in(v) == 13).collect();
        assert_eq!(vec![3, 6, 8, 11, 14, 17, 19], leap);
        assert_eq!(12, months_in(5775));
        assert_eq!(13, months_in(5776));
        assert_eq!(months_in(0), months_in(19));
        assert_eq!(months_in(-19), months_in(0));
    }

    #[test]
    fn starts() {
        for (value, expected) in [
            (2, AbsTime::new(0, 6, 0, 0)),
            (3, AbsTime::new(51, 4, 0, 0)),
            (7, AbsTime::new(262, 4, 0, 0)),
            (8, AbsTime::new(313, 1, 0, 0)),
            (75, AbsTime::new(3810, 2, 0, 0)),
            (5708, AbsTime::new(297728, 1, 0, 0)),
            (5775, AbsTime::new(301225, 4, 0, 0)),
        ] {
            assert_eq!(expected, HebrewYear::new(value).start(), "{value}");
        }
    }

    #[test]
    fn rosh_hashanah_weekdays() {
        for value in 5600..5900 {
            let weekday = HebrewYear::new(value).start().weekday();
            assert!(
                matches!(
                    weekday,
                    Weekday::Monday | Weekday::Tuesday | Weekday::Thursday | Weekday::Saturday
                ),
                "{value}: {weekday}"
            );
        }
    }

    #[test]
    fn year_lengths() {
        for value in 1..3000 {
            let year = HebrewYear::new(value);
            let expected: &[i32] = if year.is_leap() {
                &[383, 384, 385]
            } else {
                &[353, 354, 355]
            };
            assert!(expected.contains(&year.days_in_year()), "{value}");
            let total: i32 = year.months().map(|m| year.days_in_month(m)).sum();
            assert_eq!(year.days_in_year(), total, "{value}");
        }
    }

    #[test]
    fn year_types() {
        for (value, expected) in [
            (5775, YearType::Regular),
            (5776, YearType::Full),
            (5777, YearType::Defective),
            (5778, YearType::Regular),
        ] {
            assert_eq!(expected, HebrewYear::new(value).year_type(), "{value}");
        }
    }

    #[test]
    fn moladot() {
        let year = HebrewYear::new(2);
        for (month, expected) in [
            (7, AbsTime::new(0, 5, 14, 0)),
            (8, AbsTime::new(5, 0, 2, 793)),
            (12, AbsTime::new(21, 6, 5, 725)),
            (13, AbsTime::new(21, 6, 5, 725)),
            (-1, AbsTime::new(21, 6, 5, 725)),
            (1, AbsTime::new(26, 0, 18, 438)),
            (-12, AbsTime::new(26, 0, 18, 438)),
            (6, AbsTime::new(47, 1, 10, 83)),
        ] {
            assert_eq!(Ok(expected), year.molad(month), "{month}");
        }
        let year = HebrewYear::new(3);
        for (month, expected) in [
            (7, AbsTime::new(51, 2, 22, 876)),
            (-1, AbsTime::new(76, 5, 3, 234)),
            (-13, AbsTime::new(80, 6, 15, 1027)),
        ] {
            assert_eq!(Ok(expected), year.molad(month), "{month}");
        }
        for (value, expected) in [
            (19, AbsTime::new(886, 5, 0, 210)),
            (20, AbsTime::new(941, 3, 21, 799)),
            (21, AbsTime::new(992, 1, 6, 595)),
            (22, AbsTime::new(1042, 5, 15, 391)),
        ] {
            assert_eq!(Ok(expected), HebrewYear::new(value).molad(Tishri), "{value}");
        }
    }

    #[test]
    fn bad_moladot() {
        assert_eq!(Err(BadDate::MonthNotInRange { month: 14 }), HebrewYear::new(2).molad(14));
        assert!(HebrewYear::new(2).molad(-13).is_err());
        assert!(HebrewYear::new(3).molad(-14).is_err());
    }

    #[test]
    fn from_time() {
        for (time, expected) in [
            (AbsTime::new(0, 6, 0, 0), (2, Tishri, 1)),
            (AbsTime::new(0, 6, 23, 1079), (2, Tishri, 1)),
            (AbsTime::new(1, 0, 0, 0), (2, Tishri, 2)),
            (AbsTime::new(5, 0, 0, 0), (2, Tishri, 30)),
            (AbsTime::new(5, 1, 0, 0), (2, Cheshvan, 1)),
            (AbsTime::new(51, 3, 6, 0), (2, Ellul, 29)),
            (AbsTime::new(51, 4, 6, 0), (3, Tishri, 1)),
        ] {
            let date = Date::<HebrewYear>::from_time(time).unwrap();
            assert_eq!(expected, ymd(date), "{time:?}");
        }
    }

    #[test]
    fn earliest_date() {
        assert_eq!((1, Ellul, 24), ymd(HebrewYear::min_date()));
        assert_eq!(Err(BadDate::BeforeCreation), Date::<HebrewYear>::from_ymd(1, 6, 23));
        assert!(Date::<HebrewYear>::from_ymd(1, 6, 24).is_ok());
        assert_eq!(
            Err(BadDate::BeforeCreation),
            Date::<HebrewYear>::from_time(AbsTime::new(0, 0, 5, 1079))
        );
    }

    #[test]
    fn adjusted_dates() {
        let year = HebrewYear::new(2);
        for (month, day, expected) in [
            (13, 1, Ok((AdarRishon, 1))),
            (12, 30, Ok((Nissan, 1))),
            (10, 30, Err(BadDate::DateNotInRange { month: 10, day: 30 })),
            (7, -7, Ok((Tishri, 24))),
            (7, -31, Err(BadDate::DateNotInRange { month: 7, day: -31 })),
            (14, 1, Err(BadDate::MonthNotInRange { month: 14 })),
        ] {
            assert_eq!(expected, year.adjust_date(month, day), "{month}/{day}");
        }
        let year = HebrewYear::new(3);
        assert_eq!(YearType::Defective, year.year_type());
        assert_eq!(Ok((Kislev, 1)), year.adjust_date(8, 30));
        assert_eq!(Ok((Teveth, 1)), year.adjust_date(9, 30));
        assert_eq!(Ok((AdarSheni, 29)), year.adjust_date(13, 29));
        assert_eq!(Ok((AdarRishon, 30)), year.adjust_date(12, 30));
    }

    #[test]
    fn adar_sheni_has_29_days() {
        for value in [2, 5775, 5776, 5777] {
            let year = HebrewYear::new(value);
            let last = year.months_in_year();
            let adjusted = year.adjust_date(13, 29).map(|(m, d)| (m.number(), d));
            assert_eq!(Ok((last, 29)), adjusted, "{value}");
            assert_eq!(
                Err(BadDate::DateNotInRange {
                    month: last,
                    day: 30
                }),
                year.adjust_date(13, 30),
                "{value}"
            );
        }
    }

    #[test]
    fn omer() {
        let year = HebrewYear::new(5776);
        assert_eq!(Ok(None), year.omer_day(Nissan, 15));
        assert_eq!(Ok(Some(1)), year.omer_day(Nissan, 16));
        assert_eq!(Ok(Some(15)), year.omer_day(Nissan, 30));
        assert_eq!(Ok(Some(16)), year.omer_day(Iyar, 1));
        assert_eq!(Ok(Some(49)), year.omer_day(Sivan, 5));
        assert_eq!(Ok(None), year.omer_day(Sivan, 6));
        assert_eq!(Ok(None), year.omer_day(Tishri, 1));
        assert!(year.omer_day(Iyar, 30).is_err());
        let date = Date::new(year, Iyar, 18).unwrap();
        assert_eq!(Some(33), date.omer_day());
    }

    #[test]
    fn display() {
        for (value, month, day, expected) in [
            (5775, AdarRishon, 14, "14 Adar 5775"),
            (5776, AdarRishon, 14, "14 Adar Rishon 5776"),
            (5776, AdarSheni, 14, "14 Adar Sheni 5776"),
            (5775, Tishri, 1, "1 Tishri 5775"),
        ] {
            let date = Date::<HebrewYear>::from_ymd(value, month, day).unwrap();
            assert_eq!(expected, date.to_string());
        }
    }

    #[test]
    fn month_names() {
        assert_eq!(Ok(AdarSheni), "Adar Sheni".parse());
        assert_eq!(Ok(Cheshvan), "cheshvan".parse());
        assert!("Marcheshvan".parse::<HebrewMonth>().is_err());
        assert_eq!(Ok(AdarRishon), HebrewYear::new(5775).month_named("Adar"));
        assert_eq!(Ok(AdarRishon), HebrewYear::new(5776).month_named("adar rishon"));
    }

    #[test]
    fn date_molad() {
        let date = Date::<HebrewYear>::from_ymd(5775, Tishri, 10).unwrap();
        assert_eq!(AbsTime::new(301225, 3, 14, 339), date.molad());
        assert_eq!(
            "Wednesday 08:18 and 15 parts",
            MoladTime(date.molad()).to_string()
        );
    }

    #[test]
    fn molad_time_before_midnight() {
        // Hour 3 of a Hebrew Monday is 9pm on the civil Sunday.
        let time = AbsTime::new(10, 1, 3, 1079);
        assert_eq!("Sunday 21:59 and 17 parts", MoladTime(time).to_string());
    }
}
