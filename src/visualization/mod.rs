//! Plot data types and caller-owned sinks.
//!
//! Scenarios never draw; they produce ordered (x, y) series, labeled plot
//! specifications, and intensity grids. A [`PlotSink`] decides what to do
//! with them: write CSV, stream JSON Lines, collect in memory for tests,
//! or discard. Computation never depends on a sink succeeding; only the
//! CLI invokes sinks.
//!
//! # Example
//!
//! ```rust
//! use demostrar::visualization::{MemorySink, PlotSink, PlotSpec, Series};
//!
//! let series = Series::from_points("y = x", (0..10).map(|i| (f64::from(i), f64::from(i))));
//! let spec = PlotSpec::new("Identity", "x", "y", vec![series]);
//! let mut sink = MemorySink::new();
//! sink.plot(&spec).unwrap();
//! assert_eq!(sink.plots.len(), 1);
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write as IoWrite};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DemoError, DemoResult};

// ============================================================================
// Series and plot specifications
// ============================================================================

/// An ordered sequence of (x, y) pairs with a name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Series name for legends and export columns.
    pub name: String,
    /// Ordered (x, y) points.
    pub points: Vec<(f64, f64)>,
}

impl Series {
    /// Create an empty series.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
        }
    }

    /// Create a series from an iterator of points.
    #[must_use]
    pub fn from_points(
        name: impl Into<String>,
        points: impl IntoIterator<Item = (f64, f64)>,
    ) -> Self {
        Self {
            name: name.into(),
            points: points.into_iter().collect(),
        }
    }

    /// Append a point.
    pub fn push(&mut self, x: f64, y: f64) {
        self.points.push((x, y));
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Minimum y value, if any points exist.
    #[must_use]
    pub fn y_min(&self) -> Option<f64> {
        self.points
            .iter()
            .map(|&(_, y)| y)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }

    /// Maximum y value, if any points exist.
    #[must_use]
    pub fn y_max(&self) -> Option<f64> {
        self.points
            .iter()
            .map(|&(_, y)| y)
            .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }

    /// Write the series to a binary file (bincode).
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or serialization fails.
    pub fn to_binary(&self, path: &Path) -> DemoResult<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        bincode::serialize_into(writer, self)
            .map_err(|e| DemoError::serialization(format!("binary series write failed: {e}")))
    }

    /// Load a series from a binary file (bincode).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or decoded.
    pub fn from_binary(path: &Path) -> DemoResult<Self> {
        let file = File::open(path)?;
        let reader = io::BufReader::new(file);
        bincode::deserialize_from(reader)
            .map_err(|e| DemoError::serialization(format!("binary series read failed: {e}")))
    }
}

/// A labeled plot: title, axis labels, and one or more series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSpec {
    /// Plot title.
    pub title: String,
    /// x-axis label.
    pub x_label: String,
    /// y-axis label.
    pub y_label: String,
    /// Series to draw.
    pub series: Vec<Series>,
}

impl PlotSpec {
    /// Create a plot specification.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        series: Vec<Series>,
    ) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            series,
        }
    }
}

// ============================================================================
// Intensity grids
// ============================================================================

/// A square scalar field sampled over `[-extent, extent]²`, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntensityGrid {
    /// Grid points per side.
    pub points: usize,
    /// Half-width of the sampled square (m).
    pub extent: f64,
    /// Row-major values, `points * points` entries.
    pub values: Vec<f64>,
}

impl IntensityGrid {
    /// Create a grid from row-major values.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::InvalidArgument`] when the value count does not
    /// match `points²` or the extent is not a positive finite number.
    pub fn new(points: usize, extent: f64, values: Vec<f64>) -> DemoResult<Self> {
        if !extent.is_finite() || extent <= 0.0 {
            return Err(DemoError::invalid_argument(
                "grid extent must be positive and finite",
            ));
        }
        if values.len() != points * points {
            return Err(DemoError::invalid_argument(format!(
                "grid of {points}x{points} points requires {} values, got {}",
                points * points,
                values.len()
            )));
        }
        Ok(Self {
            points,
            extent,
            values,
        })
    }

    /// Value at (row, col), if inside the grid.
    #[must_use]
    pub fn value_at(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.points && col < self.points {
            self.values.get(row * self.points + col).copied()
        } else {
            None
        }
    }

    /// Minimum value over the grid.
    #[must_use]
    pub fn min(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }

    /// Maximum value over the grid.
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }

    /// Write the grid to a binary file (bincode).
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or serialization fails.
    pub fn to_binary(&self, path: &Path) -> DemoResult<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        bincode::serialize_into(writer, self)
            .map_err(|e| DemoError::serialization(format!("binary grid write failed: {e}")))
    }

    /// Load a grid from a binary file (bincode).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or decoded.
    pub fn from_binary(path: &Path) -> DemoResult<Self> {
        let file = File::open(path)?;
        let reader = io::BufReader::new(file);
        bincode::deserialize_from(reader)
            .map_err(|e| DemoError::serialization(format!("binary grid read failed: {e}")))
    }
}

// ============================================================================
// Sinks
// ============================================================================

/// Destination for computed plot data.
///
/// The evaluator never depends on a sink succeeding; sink errors surface
/// to the CLI, which owns the decision of how to report them.
pub trait PlotSink {
    /// Accept a labeled plot.
    ///
    /// # Errors
    ///
    /// Returns an error when the sink cannot persist the data.
    fn plot(&mut self, spec: &PlotSpec) -> DemoResult<()>;

    /// Accept an intensity grid with a title.
    ///
    /// # Errors
    ///
    /// Returns an error when the sink cannot persist the data.
    fn heatmap(&mut self, grid: &IntensityGrid, title: &str) -> DemoResult<()>;
}

/// Turn a title into a filesystem-safe stem.
fn file_stem(title: &str) -> String {
    let mut stem = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            stem.push(c.to_ascii_lowercase());
        } else if !stem.ends_with('_') {
            stem.push('_');
        }
    }
    stem.trim_matches('_').to_string()
}

/// Sink that writes one CSV file per plot into a directory.
///
/// Plot rows are `series,x,y`; heatmap rows are `row,col,value`.
#[derive(Debug, Clone)]
pub struct CsvSink {
    directory: PathBuf,
}

impl CsvSink {
    /// Create a CSV sink writing into `directory` (created if missing).
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(directory: impl Into<PathBuf>) -> DemoResult<Self> {
        let directory = directory.into();
        std::fs::create_dir_all(&directory)?;
        Ok(Self { directory })
    }
}

impl PlotSink for CsvSink {
    fn plot(&mut self, spec: &PlotSpec) -> DemoResult<()> {
        let path = self.directory.join(format!("{}.csv", file_stem(&spec.title)));
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "series,{},{}", spec.x_label, spec.y_label)?;
        for series in &spec.series {
            for &(x, y) in &series.points {
                writeln!(writer, "{},{x},{y}", series.name)?;
            }
        }
        writer.flush()?;
        Ok(())
    }

    fn heatmap(&mut self, grid: &IntensityGrid, title: &str) -> DemoResult<()> {
        let path = self.directory.join(format!("{}.csv", file_stem(title)));
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "row,col,value")?;
        for row in 0..grid.points {
            for col in 0..grid.points {
                if let Some(value) = grid.value_at(row, col) {
                    writeln!(writer, "{row},{col},{value}")?;
                }
            }
        }
        writer.flush()?;
        Ok(())
    }
}

/// Sink that writes one JSON Lines file per plot, one series per line.
#[derive(Debug, Clone)]
pub struct JsonLinesSink {
    directory: PathBuf,
}

impl JsonLinesSink {
    /// Create a JSON Lines sink writing into `directory` (created if
    /// missing).
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(directory: impl Into<PathBuf>) -> DemoResult<Self> {
        let directory = directory.into();
        std::fs::create_dir_all(&directory)?;
        Ok(Self { directory })
    }
}

impl PlotSink for JsonLinesSink {
    fn plot(&mut self, spec: &PlotSpec) -> DemoResult<()> {
        let path = self
            .directory
            .join(format!("{}.jsonl", file_stem(&spec.title)));
        let mut writer = BufWriter::new(File::create(path)?);
        for series in &spec.series {
            let json = serde_json::to_string(series)
                .map_err(|e| DemoError::serialization(format!("series to JSON failed: {e}")))?;
            writeln!(writer, "{json}")?;
        }
        writer.flush()?;
        Ok(())
    }

    fn heatmap(&mut self, grid: &IntensityGrid, title: &str) -> DemoResult<()> {
        let path = self.directory.join(format!("{}.jsonl", file_stem(title)));
        let mut writer = BufWriter::new(File::create(path)?);
        let json = serde_json::to_string(grid)
            .map_err(|e| DemoError::serialization(format!("grid to JSON failed: {e}")))?;
        writeln!(writer, "{json}")?;
        writer.flush()?;
        Ok(())
    }
}

/// Sink that collects everything in memory for inspection in tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    /// Accepted plots, in order.
    pub plots: Vec<PlotSpec>,
    /// Accepted heatmaps with their titles, in order.
    pub heatmaps: Vec<(String, IntensityGrid)>,
}

impl MemorySink {
    /// Create an empty memory sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlotSink for MemorySink {
    fn plot(&mut self, spec: &PlotSpec) -> DemoResult<()> {
        self.plots.push(spec.clone());
        Ok(())
    }

    fn heatmap(&mut self, grid: &IntensityGrid, title: &str) -> DemoResult<()> {
        self.heatmaps.push((title.to_string(), grid.clone()));
        Ok(())
    }
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl PlotSink for NullSink {
    fn plot(&mut self, _spec: &PlotSpec) -> DemoResult<()> {
        Ok(())
    }

    fn heatmap(&mut self, _grid: &IntensityGrid, _title: &str) -> DemoResult<()> {
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Read as IoRead;
    use tempfile::tempdir;

    fn ramp(name: &str) -> Series {
        Series::from_points(name, (0..5).map(|i| (f64::from(i), 2.0 * f64::from(i))))
    }

    #[test]
    fn test_series_push_and_stats() {
        let mut series = Series::new("test");
        assert!(series.is_empty());

        series.push(0.0, 3.0);
        series.push(1.0, -1.0);
        series.push(2.0, 7.0);

        assert_eq!(series.len(), 3);
        assert!((series.y_min().unwrap() + 1.0).abs() < f64::EPSILON);
        assert!((series.y_max().unwrap() - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_series_empty_stats() {
        let series = Series::new("empty");
        assert!(series.y_min().is_none());
        assert!(series.y_max().is_none());
    }

    #[test]
    fn test_series_binary_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("series.bin");

        let series = ramp("ramp");
        series.to_binary(&path).unwrap();

        let back = Series::from_binary(&path).unwrap();
        assert_eq!(series, back);
    }

    #[test]
    fn test_intensity_grid_new_checks_shape() {
        let grid = IntensityGrid::new(2, 1.0, vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        assert!((grid.value_at(1, 0).unwrap() - 2.0).abs() < f64::EPSILON);
        assert!(grid.value_at(2, 0).is_none());

        let err = IntensityGrid::new(2, 1.0, vec![0.0; 3]).unwrap_err();
        assert!(err.is_invalid_argument());

        let err = IntensityGrid::new(2, -1.0, vec![0.0; 4]).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_intensity_grid_min_max() {
        let grid = IntensityGrid::new(2, 1.0, vec![0.5, 4.0, -1.0, 2.0]).unwrap();
        assert!((grid.min().unwrap() + 1.0).abs() < f64::EPSILON);
        assert!((grid.max().unwrap() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_intensity_grid_binary_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid.bin");

        let grid = IntensityGrid::new(2, 0.002, vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        grid.to_binary(&path).unwrap();

        let back = IntensityGrid::from_binary(&path).unwrap();
        assert_eq!(grid, back);
    }

    #[test]
    fn test_file_stem_sanitizes() {
        assert_eq!(file_stem("Newton's Rings (632.8 nm)"), "newton_s_rings_632_8_nm");
        assert_eq!(file_stem("plain"), "plain");
    }

    #[test]
    fn test_csv_sink_writes_plot() {
        let dir = tempdir().unwrap();
        let mut sink = CsvSink::new(dir.path()).unwrap();

        let spec = PlotSpec::new("Beat Waveform", "time", "amplitude", vec![ramp("sum")]);
        sink.plot(&spec).unwrap();

        let mut contents = String::new();
        File::open(dir.path().join("beat_waveform.csv"))
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert!(contents.starts_with("series,time,amplitude"));
        assert!(contents.contains("sum,0,0"));
        assert_eq!(contents.lines().count(), 6);
    }

    #[test]
    fn test_csv_sink_writes_heatmap() {
        let dir = tempdir().unwrap();
        let mut sink = CsvSink::new(dir.path()).unwrap();

        let grid = IntensityGrid::new(2, 1.0, vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        sink.heatmap(&grid, "rings").unwrap();

        let mut contents = String::new();
        File::open(dir.path().join("rings.csv"))
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert!(contents.starts_with("row,col,value"));
        assert!(contents.contains("1,1,3"));
    }

    #[test]
    fn test_jsonl_sink_one_series_per_line() {
        let dir = tempdir().unwrap();
        let mut sink = JsonLinesSink::new(dir.path()).unwrap();

        let spec = PlotSpec::new(
            "Spring Comparison",
            "t",
            "x",
            vec![ramp("euler"), ramp("rk4")],
        );
        sink.plot(&spec).unwrap();

        let mut contents = String::new();
        File::open(dir.path().join("spring_comparison.jsonl"))
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents.lines().count(), 2);

        let first: Series = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        assert_eq!(first.name, "euler");
    }

    #[test]
    fn test_memory_sink_collects() {
        let mut sink = MemorySink::new();
        let spec = PlotSpec::new("a", "x", "y", vec![ramp("s")]);
        let grid = IntensityGrid::new(1, 1.0, vec![2.0]).unwrap();

        sink.plot(&spec).unwrap();
        sink.heatmap(&grid, "g").unwrap();

        assert_eq!(sink.plots.len(), 1);
        assert_eq!(sink.heatmaps.len(), 1);
        assert_eq!(sink.heatmaps[0].0, "g");
    }

    #[test]
    fn test_null_sink_accepts_everything() {
        let mut sink = NullSink;
        let spec = PlotSpec::new("a", "x", "y", vec![]);
        let grid = IntensityGrid::new(1, 1.0, vec![0.0]).unwrap();
        assert!(sink.plot(&spec).is_ok());
        assert!(sink.heatmap(&grid, "t").is_ok());
    }
}
