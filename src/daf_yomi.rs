//! Daf Yomi
//!
//! The cycle of reading one page (daf) of the Babylonian Talmud a day,
//! begun on 11 September 1923. Here a cycle plays the part of a year, a
//! tractate that of a month and a page that of a day. Tractates start on
//! page 2.
//!
//! From the eighth cycle on, Shekalim is read in an edition of 21 pages
//! instead of 12, so cycles grew from 2702 to 2711 days.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::date::{Calendar, Date};
use crate::error::{BadDate, UnknownName};
use crate::time::{AbsTime, RelTime};
use crate::year::{self, Month, MonthLength, Year};

/// Midnight starting the first day of the first cycle.
pub const START: AbsTime = AbsTime::new(296475, 2, 6, 0);

/// The first cycle with the longer Shekalim.
pub const SHEKALIM_CHANGE: i32 = 8;
const SHEKALIM_ORIGINAL: u32 = 12;
const SHEKALIM_NOW: u32 = 21;

pub const CYCLE_DAYS_ORIGINAL: i64 = 2702;
pub const CYCLE_DAYS_NOW: i64 = CYCLE_DAYS_ORIGINAL + (SHEKALIM_NOW - SHEKALIM_ORIGINAL) as i64;

/// Tractates of the Babylonian Talmud in Daf Yomi order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Tractate {
    Berachos = 1,
    Shabbos,
    Eruvin,
    Pesachim,
    Shekalim,
    Yoma,
    Succah,
    Beitzah,
    RoshHashanah,
    Taanis,
    Megilah,
    MoedKatan,
    Chagigah,
    Yevamos,
    Kesuvos,
    Nedarim,
    Nazir,
    Sotah,
    Gitin,
    Kiddushin,
    BavaKama,
    BavaMetzia,
    BavaBasra,
    Sanhedrin,
    Makkos,
    Shevuos,
    AvodaZarah,
    Horayos,
    Zevachim,
    Menachos,
    Chulin,
    Bechoros,
    Erchin,
    Temurah,
    Kerisus,
    Meilah,
    Nidah,
}

impl Tractate {
    /// Pages in a tractate, the count rather than the last page number.
    /// Shekalim varies with the cycle.
    const DAPIM: [u32; 37] = [
        63, 156, 104, 120, 0, 87, 55, 39, 34, 30, 31, 28, 26, 121, 111, 90, 65, 48, 89, 81, 118,
        118, 175, 112, 23, 48, 75, 13, 119, 109, 141, 60, 33, 33, 27, 36, 72,
    ];
}

impl Month for Tractate {
    const ALL: &'static [Self] = {
        use Tractate::*;
        &[
            Berachos, Shabbos, Eruvin, Pesachim, Shekalim, Yoma, Succah, Beitzah, RoshHashanah,
            Taanis, Megilah, MoedKatan, Chagigah, Yevamos, Kesuvos, Nedarim, Nazir, Sotah, Gitin,
            Kiddushin, BavaKama, BavaMetzia, BavaBasra, Sanhedrin, Makkos, Shevuos, AvodaZarah,
            Horayos, Zevachim, Menachos, Chulin, Bechoros, Erchin, Temurah, Kerisus, Meilah,
            Nidah,
        ]
    };
    const FIRST: Self = Tractate::Berachos;

    fn number(self) -> i32 {
        self as i32
    }
    fn name(self) -> &'static str {
        use Tractate::*;
        match self {
            Berachos => "Berachos",
            Shabbos => "Shabbos",
            Eruvin => "Eruvin",
            Pesachim => "Pesachim",
            Shekalim => "Shekalim",
            Yoma => "Yoma",
            Succah => "Succah",
            Beitzah => "Beitzah",
            RoshHashanah => "Rosh Hashanah",
            Taanis => "Taanis",
            Megilah => "Megilah",
            MoedKatan => "Moed Katan",
            Chagigah => "Chagigah",
            Yevamos => "Yevamos",
            Kesuvos => "Kesuvos",
            Nedarim => "Nedarim",
            Nazir => "Nazir",
            Sotah => "Sotah",
            Gitin => "Gitin",
            Kiddushin => "Kiddushin",
            BavaKama => "Bava Kama",
            BavaMetzia => "Bava Metzia",
            BavaBasra => "Bava Basra",
            Sanhedrin => "Sanhedrin",
            Makkos => "Makkos",
            Shevuos => "Shevuos",
            AvodaZarah => "Avoda Zarah",
            Horayos => "Horayos",
            Zevachim => "Zevachim",
            Menachos => "Menachos",
            Chulin => "Chulin",
            Bechoros => "Bechoros",
            Erchin => "Erchin",
            Temurah => "Temurah",
            Kerisus => "Kerisus",
            Meilah => "Meilah",
            Nidah => "Nidah",
        }
    }
}

impl From<Tractate> for i32 {
    fn from(tractate: Tractate) -> i32 {
        tractate.number()
    }
}

impl fmt::Display for Tractate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tractate {
    type Err = UnknownName;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).map_err(|e| UnknownName {
            kind: "tractate",
            ..e
        })
    }
}

/// Short tractates printed at the end of Meilah.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SubTractate {
    Kinnim,
    Tamid,
    Middos,
}

impl fmt::Display for SubTractate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SubTractate::Kinnim => "Kinnim",
            SubTractate::Tamid => "Tamid",
            SubTractate::Middos => "Middos",
        })
    }
}

/// Text appearing on a page: the page's own tractate or one printed with it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Section {
    Tractate(Tractate),
    Sub(SubTractate),
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Tractate(t) => t.fmt(f),
            Section::Sub(s) => s.fmt(f),
        }
    }
}

/// What is printed on a page of Meilah in the Vilna edition, or nothing
/// outside pages 22 to 37.
///
/// # Example
///
/// ```
/// use luach::daf_yomi::{meilah_sections, Section, SubTractate, Tractate};
///
/// assert_eq!(
///     &[Section::Tractate(Tractate::Meilah), Section::Sub(SubTractate::Kinnim)],
///     meilah_sections(22)
/// );
/// assert!(meilah_sections(21).is_empty());
/// ```
pub fn meilah_sections(page: i32) -> &'static [Section] {
    use SubTractate::*;
    match page {
        22 => &[Section::Tractate(Tractate::Meilah), Section::Sub(Kinnim)],
        23 | 24 => &[Section::Sub(Kinnim)],
        25 => &[Section::Sub(Kinnim), Section::Sub(Tamid)],
        26..=33 => &[Section::Sub(Tamid)],
        34..=37 => &[Section::Sub(Middos)],
        _ => &[],
    }
}

fn shekalim_dapim(cycle: &DafYomiCycle) -> u32 {
    if cycle.value < SHEKALIM_CHANGE {
        SHEKALIM_ORIGINAL
    } else {
        SHEKALIM_NOW
    }
}

fn cycle_start(value: i32) -> AbsTime {
    let original = (value.min(SHEKALIM_CHANGE) - 1) as i64;
    let now = (value - SHEKALIM_CHANGE).max(0) as i64;
    START + RelTime::from_days(original * CYCLE_DAYS_ORIGINAL + now * CYCLE_DAYS_NOW)
}

/// One cycle of Daf Yomi, numbered from 1.
///
/// # Example
///
/// ```
/// use luach::{Date, GregorianYear};
/// use luach::daf_yomi::{DafYomiCycle, Tractate};
///
/// let date = Date::<GregorianYear>::from_ymd(2000, 1, 1).unwrap();
/// let daf: Date<DafYomiCycle> = date.convert().unwrap();
/// assert_eq!((11, Tractate::Yevamos, 32), (daf.value(), daf.month(), daf.day()));
/// assert_eq!("Yevamos 32", daf.to_string());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DafYomiCycle {
    value: i32,
    start: AbsTime,
}

impl Year for DafYomiCycle {
    type Month = Tractate;
    const CALENDAR: Calendar = Calendar::DafYomi;
    const EPOCH: AbsTime = START;
    const EPOCH_ERROR: BadDate = BadDate::BeforeDafYomi;

    fn new(value: i32) -> Self {
        Self {
            value,
            start: cycle_start(value),
        }
    }
    fn value(&self) -> i32 {
        self.value
    }
    fn set_value(&mut self, value: i32) {
        *self = Self::new(value);
    }
    fn start(&self) -> AbsTime {
        self.start
    }
    fn months_in_year(&self) -> i32 {
        Tractate::DAPIM.len() as i32
    }
    fn month_length(&self, month: Tractate) -> MonthLength<Self> {
        match month {
            Tractate::Shekalim => MonthLength::Computed(shekalim_dapim),
            _ => MonthLength::Fixed(Tractate::DAPIM[month as usize - 1]),
        }
    }
    fn first_day(&self) -> i32 {
        2
    }
    fn days_in_year(&self) -> i32 {
        if self.value < SHEKALIM_CHANGE {
            CYCLE_DAYS_ORIGINAL as i32
        } else {
            CYCLE_DAYS_NOW as i32
        }
    }

    fn estimate_year(time: AbsTime) -> i32 {
        let days = (time - START).days();
        let original = (SHEKALIM_CHANGE - 1) as i64 * CYCLE_DAYS_ORIGINAL;
        let cycles = if days < original {
            days.div_euclid(CYCLE_DAYS_ORIGINAL)
        } else {
            (SHEKALIM_CHANGE - 1) as i64 + (days - original) / CYCLE_DAYS_NOW
        };
        cycles as i32 + 1
    }
    fn min_date() -> Date<Self> {
        static MIN_DATE: OnceLock<Date<DafYomiCycle>> = OnceLock::new();
        *MIN_DATE.get_or_init(year::epoch_date)
    }

    fn fmt_date(&self, tractate: Tractate, page: i32, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{tractate}")?;
        let sections: &[Section] = match tractate {
            Tractate::Meilah => meilah_sections(page),
            _ => &[],
        };
        if let Some((first, rest)) = sections.split_first() {
            write!(f, " ({first}")?;
            for section in rest {
                write!(f, "/{section}")?;
            }
            write!(f, ")")?;
        }
        write!(f, " {page}")
    }
}

year::year_arithmetic!(DafYomiCycle);
