//! # hytrend-trend
//!
//! Long-term trends of hydrological-year parameters, per basin and column.
//!
//! Each `(basin, column)` series is fitted with a Theil-Sen line against the
//! hydrological year and tested with the original Mann-Kendall test. The
//! estimator only sees a [`ParameterTable`](hytrend_params::ParameterTable)
//! and column names, so it works the same for every variable family and for
//! tables read back from disk.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["ParameterTable"] --> B["columns x basins"]
//!     B -->|"rayon"| C["estimate_series()"]
//!     C --> D["theil_sen()"]
//!     C --> E["mann_kendall()"]
//!     D & E --> F["Vec&lt;TrendRow&gt;"]
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `estimate` | Trend rows and the parallel driver |
//! | `config` | Significance, confidence and minimum sample size |
//! | `error` | Error types |

mod config;
mod error;
mod estimate;

pub use config::TrendConfig;
pub use error::TrendError;
pub use estimate::{TrendRow, basin_series, estimate_series, estimate_trends};
