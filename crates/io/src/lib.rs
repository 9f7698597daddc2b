//! # hytrend-io
//!
//! File boundaries of the hytrend pipeline: daily basin series come in from
//! CSV or Parquet, parameter tables and trend results go out as CSV.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["series.csv"] -->|"CsvSeriesSource"| C["SeriesLoader"]
//!     B["series.parquet"] -->|"ParquetSeriesSource"| C
//!     C -->|"get_series()"| D["Vec&lt;TimePoint&gt;"]
//!     E["ParameterTable"] -->|"ResultWriter"| F["&lt;basin&gt;.csv / &lt;var&gt;_params_all_basins.csv"]
//!     G["Vec&lt;TrendRow&gt;"] -->|"ResultWriter"| H["trend_results_&lt;col&gt;.csv"]
//!     F -->|"read_parameter_table()"| E
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `source` | `SeriesSource` trait and in-memory store |
//! | `csv_source` | Long-format CSV series |
//! | `parquet_read` | Long-format Parquet series |
//! | `loader` | Ordered multi-source lookup with windowing |
//! | `writer` | CSV writers and their configuration |
//! | `table_reader` | Parameter CSV back to a table |
//! | `validate` | Accumulated validation |
//! | `error` | Error types |

mod csv_source;
mod error;
mod loader;
mod parquet_read;
mod source;
mod table_reader;
mod validate;
mod writer;

pub use csv_source::CsvSeriesSource;
pub use error::IoError;
pub use loader::SeriesLoader;
pub use parquet_read::ParquetSeriesSource;
pub use source::{BASIN_COLUMN, DATE_COLUMN, SeriesSource};
pub use table_reader::read_parameter_table;
pub use writer::{ALL_TRENDS_FILE, ResultWriter, WriterConfig, write_parameter_table};

use std::path::Path;

/// Opens a series file, choosing the reader by extension (`.parquet` or
/// `.pq` for Parquet, anything else as CSV).
///
/// # Errors
///
/// Propagates the errors of [`CsvSeriesSource::open`] and
/// [`ParquetSeriesSource::open`].
pub fn open_source(path: &Path) -> Result<Box<dyn SeriesSource>, IoError> {
    let is_parquet = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet") || e.eq_ignore_ascii_case("pq"));
    if is_parquet {
        Ok(Box::new(ParquetSeriesSource::open(path)?))
    } else {
        Ok(Box::new(CsvSeriesSource::open(path)?))
    }
}
