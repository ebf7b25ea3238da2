//! Trajectory: the ordered (x, y) points the animation plays back.
//!
//! Built once from a two-column table, converted from input units by the
//! unit divisor (meters -> kilometers by default), immutable afterwards.

use crate::error::{LunarError, Result};
use crate::table::{read_rows, Row};
use nalgebra::Vector2;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// A trajectory point in output units (km).
pub type Point = Vector2<f64>;

/// Ordered sequence of points, indexed by frame number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    points: Vec<Point>,
}

impl Trajectory {
    /// Wraps already converted points.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Parses an in-memory table. Empty lines are skipped, rows holding only
    /// whitespace are not.
    pub fn from_rows<I>(rows: I, unit_divisor: f64) -> Result<Self>
    where
        I: IntoIterator<Item = Row>,
    {
        Self::collect(rows.into_iter().map(Ok), unit_divisor)
    }

    /// Loads a trajectory file. Fails before returning anything if the file
    /// is missing, any row is malformed, or no point was found.
    pub fn load(path: &Path, unit_divisor: f64) -> Result<Self> {
        let file = File::open(path).map_err(|e| LunarError::from_open(path, e))?;
        let trajectory = Self::collect(read_rows(BufReader::new(file)), unit_divisor)?;

        if trajectory.is_empty() {
            return Err(LunarError::EmptyTrajectory);
        }

        info!("Loaded {} points from {}", trajectory.len(), path.display());
        Ok(trajectory)
    }

    fn collect<I>(rows: I, unit_divisor: f64) -> Result<Self>
    where
        I: Iterator<Item = Result<Row>>,
    {
        let mut points = Vec::new();

        for (index, row) in rows.enumerate() {
            let row = row?;
            if row.is_empty() {
                continue;
            }
            if row.len() != 2 {
                return Err(LunarError::FieldCount {
                    row: index + 1,
                    found: row.len(),
                });
            }

            let x = parse_field(&row[0], index, 0)?;
            let y = parse_field(&row[1], index, 1)?;
            points.push(Point::new(x / unit_divisor, y / unit_divisor));
        }

        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point displayed at `frame`.
    pub fn get(&self, frame: usize) -> Option<Point> {
        self.points.get(frame).copied()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Component-wise (min, max) over all points, `None` when empty.
    pub fn extent(&self) -> Option<(Point, Point)> {
        let first = *self.points.first()?;
        Some(self.points.iter().fold((first, first), |(lo, hi), p| {
            (lo.inf(p), hi.sup(p))
        }))
    }
}

fn parse_field(raw: &str, index: usize, column: usize) -> Result<f64> {
    let trimmed = raw.trim();
    trimmed.parse().map_err(|_| LunarError::ValueParse {
        row: index + 1,
        column: column + 1,
        value: trimmed.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::round_value;
    use crate::table::split_row;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn rows(lines: &[&str]) -> Vec<Row> {
        lines.iter().map(|l| split_row(l)).collect()
    }

    #[test]
    fn test_meters_become_kilometers() {
        let trajectory =
            Trajectory::from_rows(rows(&["1000.0,2000.0", "", "3000.0,5000.0"]), 1000.0).unwrap();

        assert_eq!(trajectory.len(), 2);
        assert_eq!(trajectory.get(0), Some(Point::new(1.0, 2.0)));
        assert_eq!(trajectory.get(1), Some(Point::new(3.0, 5.0)));
        assert_eq!(trajectory.get(2), None);
    }

    #[test]
    fn test_wrong_field_count_is_fatal() {
        let err = Trajectory::from_rows(rows(&["1,2", "1,2,3"]), 1000.0).unwrap_err();
        assert!(matches!(err, LunarError::FieldCount { row: 2, found: 3 }));

        let err = Trajectory::from_rows(rows(&["7"]), 1000.0).unwrap_err();
        assert!(matches!(err, LunarError::FieldCount { row: 1, found: 1 }));
    }

    #[test]
    fn test_non_numeric_is_fatal() {
        let err = Trajectory::from_rows(rows(&["1,2", "3,north"]), 1000.0).unwrap_err();
        match err {
            LunarError::ValueParse { row, column, value } => {
                assert_eq!((row, column), (2, 2));
                assert_eq!(value, "north");
            }
            other => panic!("expected ValueParse, got {:?}", other),
        }
    }

    #[test]
    fn test_whitespace_row_is_fatal() {
        let err = Trajectory::from_rows(rows(&["1000.0,2000.0", " , ", "3000.0,5000.0"]), 1000.0)
            .unwrap_err();
        match err {
            LunarError::ValueParse { row, column, value } => {
                assert_eq!((row, column), (2, 1));
                assert_eq!(value, "");
            }
            other => panic!("expected ValueParse, got {:?}", other),
        }

        let err = Trajectory::from_rows(rows(&["1,2", "  "]), 1000.0).unwrap_err();
        assert!(matches!(err, LunarError::FieldCount { row: 2, found: 1 }));
    }

    #[test]
    fn test_extent() {
        let trajectory = Trajectory::from_points(vec![
            Point::new(1.0, 5.0),
            Point::new(-2.0, 3.0),
            Point::new(4.0, -1.0),
        ]);
        let (lo, hi) = trajectory.extent().unwrap();
        assert_eq!(lo, Point::new(-2.0, -1.0));
        assert_eq!(hi, Point::new(4.0, 5.0));
        assert!(Trajectory::default().extent().is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Trajectory::load(&dir.path().join("nope.csv"), 1000.0).unwrap_err();
        assert!(matches!(err, LunarError::InputNotFound { .. }));
    }

    #[test]
    fn test_load_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data_rounded.csv");
        std::fs::write(&path, "\n\n").unwrap();
        let err = Trajectory::load(&path, 1000.0).unwrap_err();
        assert!(matches!(err, LunarError::EmptyTrajectory));
    }

    #[test]
    fn test_load_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data_rounded.csv");
        std::fs::write(&path, "384400000.0,0.0\n0.0,-384400000.0\n").unwrap();

        let trajectory = Trajectory::load(&path, 1000.0).unwrap();
        assert_eq!(trajectory.len(), 2);
        assert_relative_eq!(trajectory.points()[0].x, 384_400.0);
        assert_relative_eq!(trajectory.points()[1].y, -384_400.0);
    }

    proptest! {
        #[test]
        fn prop_conversion_recovers_within_rounding(value in -4e8f64..4e8) {
            let rounded = round_value(value, 1);
            let row = vec![rounded.to_string(), "0".to_string()];
            let trajectory = Trajectory::from_rows(vec![row], 1000.0).unwrap();
            let back = trajectory.points()[0].x * 1000.0;
            prop_assert!((back - value).abs() <= 0.05 + 1e-6);
        }
    }
}
