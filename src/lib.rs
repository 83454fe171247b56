//! Utilities for converting between dates in the Hebrew, Gregorian, Julian
//! and British calendars and the Daf Yomi cycle.
//!
//! Every calendar maps to a common time scale, [`AbsTime`], counted in
//! chalakim (1/1080 hour) from the creation of the world. A date is
//! converted by finding the instant its day begins and looking that
//! instant up in another calendar.
//!
//! # Examples
//!
//! Basic usage with [`Date`]:
//!
//! ```
//! use luach::{Date, GregorianYear, Weekday};
//! use luach::hebrew::{HebrewMonth, HebrewYear};
//!
//! let date = Date::<GregorianYear>::from_ymd(2015, 8, 17).unwrap();
//! assert_eq!(Weekday::Monday, date.weekday());
//!
//! let hebrew: Date<HebrewYear> = date.convert().unwrap();
//! assert_eq!((5775, HebrewMonth::Ellul, 2), (hebrew.value(), hebrew.month(), hebrew.day()));
//! ```
//!
//! Weekly portions and the molad:
//!
//! ```
//! use luach::{Date, Observance};
//! use luach::hebrew::{HebrewMonth, HebrewYear, MoladTime, Sedrah};
//!
//! let date = Date::<HebrewYear>::from_ymd(5734, HebrewMonth::Tishri, 1).unwrap();
//! assert_eq!(Sedrah::Haazinu, date.sedrah(Observance::new().with_israel(true)));
//! assert_eq!(
//!     "Thursday 08:02 and 12 parts",
//!     MoladTime(date.molad()).to_string()
//! );
//! ```
//!
//! Calendars chosen at run time:
//!
//! ```
//! use luach::Calendar;
//!
//! let calendar: Calendar = "civil".parse().unwrap();
//! let date = calendar.date(1752, 9, 14).unwrap();
//! assert_eq!("14 September 1752", date.to_string());
//! let err = date.convert(Calendar::DafYomi).unwrap_err();
//! assert_eq!("date before the first Daf Yomi cycle", err.to_string());
//! ```

pub mod civil;
pub mod config;
pub mod daf_yomi;
pub mod date;
pub mod error;
pub mod hebrew;
pub mod time;
pub mod year;

pub use civil::{BritishYear, CivilMonth, CivilYear, GregorianYear, JulianYear};
pub use config::Observance;
pub use date::{AnyDate, Calendar, Date, DateTime};
pub use error::{BadDate, UnknownName};
pub use time::{AbsTime, RelTime, Weekday};
pub use year::{Month, MonthLength, Year};
