//! # hytrend-calendar
//!
//! Date arithmetic for hydrological years on the proleptic Gregorian
//! calendar.
//!
//! A hydrological year starts on the first day of a configurable month
//! (September by default) and is labelled by the calendar year in which it
//! *ends*: with a September start, 2021-09-01 through 2022-08-31 is hydro
//! year 2022, displayed as `2021/22`.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["StartMonth (1..=12)"] --> B["HydroYear::from_date()"]
//!     A --> C["day_of_hydro_year()"]
//!     A --> D["hydro_month() / month_distance()"]
//!     B -->|".label()"| E["\"2021/22\""]
//!     B -->|".first_day() / .last_day()"| F["DateWindow"]
//!     G["NaiveDate"] -->|"Season::of_month()"| H["DJF / MAM / JJA / SON"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use chrono::NaiveDate;
//! use hytrend_calendar::{HydroYear, StartMonth, day_of_hydro_year};
//!
//! let start = StartMonth::default(); // September
//! let date = NaiveDate::from_ymd_opt(2021, 9, 1).unwrap();
//! let hy = HydroYear::from_date(date, start);
//! assert_eq!(hy.year(), 2022);
//! assert_eq!(hy.label(), "2021/22");
//! assert_eq!(day_of_hydro_year(date, start), 1);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `start_month` | Validated start-month newtype |
//! | `hydro_year` | Hydrological-year labels and bounds |
//! | `day` | 1-based day ordinal within a hydrological year |
//! | `season` | Meteorological seasons by calendar month |
//! | `month` | Hydrological month index and month distance |
//! | `window` | Inclusive date windows spanning whole hydrological years |
//! | `error` | Error types |

mod day;
mod error;
mod hydro_year;
mod month;
mod season;
mod start_month;
mod window;

pub use day::{day_of_hydro_year, day_of_hydro_year_opt};
pub use error::CalendarError;
pub use hydro_year::{HydroYear, hydro_year};
pub use month::{hydro_month, month_distance};
pub use season::Season;
pub use start_month::StartMonth;
pub use window::DateWindow;
