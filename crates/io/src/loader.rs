//! Ordered lookup of basin series across several sources.

use hytrend_calendar::DateWindow;
use hytrend_params::TimePoint;
use tracing::{debug, warn};

use crate::error::IoError;
use crate::source::SeriesSource;

/// Looks basins up in an ordered list of sources.
///
/// The first source that holds a basin wins, so a primary archive can be
/// backed by a secondary one (for example whole basins, then sub-basins).
#[derive(Default)]
pub struct SeriesLoader {
    sources: Vec<Box<dyn SeriesSource>>,
}

impl std::fmt::Debug for SeriesLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeriesLoader")
            .field("sources", &self.sources.iter().map(|s| s.name()).collect::<Vec<_>>())
            .finish()
    }
}

impl SeriesLoader {
    /// Loader with no sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a source with lower priority than those already added.
    pub fn with_source(mut self, source: impl SeriesSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Appends a boxed source.
    pub fn push(&mut self, source: Box<dyn SeriesSource>) {
        self.sources.push(source);
    }

    /// Number of sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether no source has been added.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Every basin id of every source, first-seen order, without repeats.
    pub fn basin_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for s in &self.sources {
            for id in s.basin_ids() {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
        ids
    }

    /// Series of one basin and variable, sorted by date.
    ///
    /// Returns `Ok(None)`, with a warning, if no source holds the basin.
    /// Points outside `window` are dropped with a warning, as are repeated
    /// dates (the first occurrence is kept).
    ///
    /// # Errors
    ///
    /// Returns [`IoError::MissingColumn`] if the source holding the basin
    /// has no `variable` column.
    pub fn get_series(
        &self,
        basin_id: &str,
        variable: &str,
        window: Option<&DateWindow>,
    ) -> Result<Option<Vec<TimePoint>>, IoError> {
        let Some(source) = self.sources.iter().find(|s| s.contains(basin_id)) else {
            warn!(basin_id, "basin not found in any source");
            return Ok(None);
        };
        let Some(raw) = source.fetch(basin_id, variable)? else {
            warn!(basin_id, source = source.name(), "basin vanished from source");
            return Ok(None);
        };
        debug!(basin_id, source = source.name(), n = raw.len(), "fetched series");
        Ok(Some(clean_series(basin_id, raw, window)))
    }
}

/// Windows, sorts and de-duplicates one basin's raw points.
fn clean_series(basin_id: &str, raw: Vec<TimePoint>, window: Option<&DateWindow>) -> Vec<TimePoint> {
    let n_raw = raw.len();
    let mut points: Vec<TimePoint> = match window {
        Some(w) => raw.into_iter().filter(|p| w.contains(p.date)).collect(),
        None => raw,
    };
    let n_outside = n_raw - points.len();
    if n_outside > 0 {
        warn!(basin_id, n_outside, "excluded points outside the analysis period");
    }

    // Stable sort keeps the first of several equal dates in front.
    points.sort_by_key(|p| p.date);
    let before = points.len();
    points.dedup_by_key(|p| p.date);
    let n_duplicates = before - points.len();
    if n_duplicates > 0 {
        warn!(basin_id, n_duplicates, "dropped repeated dates, kept first occurrence");
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct Fixed {
        name: &'static str,
        basins: Vec<(&'static str, Vec<TimePoint>)>,
    }

    impl SeriesSource for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        fn basin_ids(&self) -> Vec<String> {
            self.basins.iter().map(|(b, _)| b.to_string()).collect()
        }

        fn fetch(&self, basin_id: &str, variable: &str) -> Result<Option<Vec<TimePoint>>, IoError> {
            if variable != "swe" {
                return Err(IoError::MissingColumn {
                    name: variable.into(),
                    path: self.name.into(),
                });
            }
            Ok(self
                .basins
                .iter()
                .find(|(b, _)| *b == basin_id)
                .map(|(_, p)| p.clone()))
        }
    }

    fn loader() -> SeriesLoader {
        let primary = Fixed {
            name: "primary",
            basins: vec![(
                "a",
                vec![
                    TimePoint::new(date(2000, 1, 3), 3.0),
                    TimePoint::new(date(2000, 1, 1), 1.0),
                    TimePoint::new(date(2000, 1, 2), 2.0),
                    TimePoint::new(date(2000, 1, 1), 9.0),
                ],
            )],
        };
        let secondary = Fixed {
            name: "secondary",
            basins: vec![
                ("a", vec![TimePoint::new(date(2000, 1, 1), 100.0)]),
                ("b", vec![TimePoint::new(date(1990, 1, 1), 5.0)]),
            ],
        };
        SeriesLoader::new().with_source(primary).with_source(secondary)
    }

    #[test]
    fn first_source_wins() {
        let pts = loader().get_series("a", "swe", None).unwrap().unwrap();
        assert_eq!(pts.len(), 3);
        assert_eq!(pts[0].value, Some(1.0));
        assert!(pts.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn falls_back_to_later_source() {
        let pts = loader().get_series("b", "swe", None).unwrap().unwrap();
        assert_eq!(pts[0].value, Some(5.0));
    }

    #[test]
    fn unknown_basin_is_none() {
        assert!(loader().get_series("zzz", "swe", None).unwrap().is_none());
    }

    #[test]
    fn window_excludes_outside_points() {
        let w = DateWindow::new(date(2000, 1, 2), date(2000, 12, 31)).unwrap();
        let pts = loader().get_series("a", "swe", Some(&w)).unwrap().unwrap();
        assert_eq!(pts.len(), 2);
        assert_eq!(pts[0].date, date(2000, 1, 2));
    }

    #[test]
    fn missing_variable_is_error() {
        assert!(loader().get_series("a", "q", None).is_err());
    }

    #[test]
    fn basin_ids_union() {
        assert_eq!(loader().basin_ids(), vec!["a", "b"]);
    }
}
