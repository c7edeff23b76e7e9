//! Renderers that turn the aggregated comparison into an artifact on disk.

use crate::aggregate::AggregatedSeries;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CHART_TITLE: &str = "Throughput vs Number of Stations (Combined)";
pub const X_LABEL: &str = "Number of Stations";
pub const Y_LABEL: &str = "Throughput (Mbps)";
const CHART_STEM: &str = "throughput_combined";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write chart: {0}")]
    Io(#[from] io::Error),
    #[error("failed to write chart data: {0}")]
    Csv(#[from] csv::Error),
    #[error("series {label:?} has {found} points, expected {expected}")]
    Misaligned {
        label: String,
        found: usize,
        expected: usize,
    },
    #[error("nothing to render")]
    Empty,
    #[error("failed to draw chart: {0}")]
    Draw(String),
}

/// Consumes the five aligned series and writes one chart into `dir`.
pub trait ChartRenderer {
    fn render(&self, series: &AggregatedSeries, dir: &Path) -> Result<PathBuf, RenderError>;
}

fn check_aligned(series: &AggregatedSeries) -> Result<(), RenderError> {
    if series.is_empty() {
        return Err(RenderError::Empty);
    }
    let expected = series.len();
    for s in series.all() {
        if s.len() != expected {
            return Err(RenderError::Misaligned {
                label: s.label.clone(),
                found: s.len(),
                expected,
            });
        }
    }
    Ok(())
}

/// Writes the chart data as a table: one row per station count, one column
/// per series.
pub struct CsvRenderer;

impl ChartRenderer for CsvRenderer {
    fn render(&self, series: &AggregatedSeries, dir: &Path) -> Result<PathBuf, RenderError> {
        check_aligned(series)?;
        let path = dir.join(format!("{CHART_STEM}.csv"));
        let mut wtr = csv::Writer::from_path(&path)?;

        let mut header = vec!["stations".to_string()];
        header.extend(series.all().iter().map(|s| s.label.clone()));
        header.push("failed".to_string());
        wtr.write_record(&header)?;

        for (idx, stations) in series.link1.xs().enumerate() {
            let mut row = vec![stations.to_string()];
            row.extend(series.all().iter().map(|s| s.points[idx].1.to_string()));
            row.push(series.failed_stations.contains(&stations).to_string());
            wtr.write_record(&row)?;
        }
        wtr.flush()?;
        Ok(path)
    }
}

#[cfg(feature = "plot")]
pub use plot::PlotRenderer;

#[cfg(feature = "plot")]
mod plot {
    use super::*;
    use plotters::prelude::*;
    use std::ops::Range;
    use std::path::Path;

    fn draw_err(err: impl std::fmt::Display) -> RenderError {
        RenderError::Draw(err.to_string())
    }

    fn draw(
        path: &Path,
        size: (u32, u32),
        series: &AggregatedSeries,
        x_range: Range<f64>,
        y_max: f64,
    ) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;
        let mut chart = ChartBuilder::on(&root)
            .caption(CHART_TITLE, ("sans-serif", 22))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(80)
            .build_cartesian_2d(x_range, 0.0..(y_max * 1.1))
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc(X_LABEL)
            .y_desc(Y_LABEL)
            .draw()
            .map_err(draw_err)?;

        for (i, s) in series.all().iter().enumerate() {
            let color = Palette99::pick(i).mix(0.9);
            let points: Vec<(f64, f64)> =
                s.points.iter().map(|&(x, y)| (x as f64, y)).collect();
            chart
                .draw_series(LineSeries::new(points.clone(), &color))
                .map_err(draw_err)?
                .label(s.label.clone())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
            chart
                .draw_series(points.into_iter().map(|p| Circle::new(p, 3, color.filled())))
                .map_err(draw_err)?;
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
        Ok(())
    }

    /// Line chart of all five series on shared axes, with grid and legend.
    pub struct PlotRenderer {
        pub width: u32,
        pub height: u32,
    }

    impl Default for PlotRenderer {
        fn default() -> Self {
            Self {
                width: 1024,
                height: 768,
            }
        }
    }

    impl ChartRenderer for PlotRenderer {
        fn render(&self, series: &AggregatedSeries, dir: &Path) -> Result<PathBuf, RenderError> {
            check_aligned(series)?;
            let path = dir.join(format!("{CHART_STEM}.png"));

            let x_min = series.link1.xs().min().unwrap_or(0) as f64;
            let mut x_max = series.link1.xs().max().unwrap_or(0) as f64;
            if x_max <= x_min {
                x_max = x_min + 1.0;
            }
            let mut y_max = series.y_max();
            if y_max <= 0.0 {
                y_max = 1.0;
            }

            draw(&path, (self.width, self.height), series, x_min..x_max, y_max)?;
            Ok(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::SeriesAggregator;
    use crate::parser::ParseOutcome;
    use mlo_abstract::ThroughputSample;
    use std::fs;

    fn parsed(link1: f64, link2: f64, total: f64) -> ParseOutcome {
        ParseOutcome::Parsed {
            sample: ThroughputSample::new(link1, link2, total),
        }
    }

    fn failed() -> ParseOutcome {
        ParseOutcome::Failed {
            diagnostic: "missing".to_string(),
        }
    }

    #[test]
    fn csv_has_one_row_per_point() {
        let mut agg = SeriesAggregator::new("Bianchi MCS4 40MHz", "Bianchi MCS2 20MHz");
        agg.record(5, &parsed(1.5, 2.5, 4.0), 100.0, 50.0);
        agg.record(10, &failed(), 90.0, 45.0);
        let series = agg.finish();

        let dir = tempfile::tempdir().unwrap();
        let path = CsvRenderer.render(&series, dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "throughput_combined.csv");

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "stations,ns-3 Link 1,ns-3 Link 2,ns-3 Total,Bianchi MCS4 40MHz,Bianchi MCS2 20MHz,failed"
        );
        assert_eq!(lines[1], "5,1.5,2.5,4,100,50,false");
        assert_eq!(lines[2], "10,0,0,0,90,45,true");
    }

    #[test]
    fn empty_series_are_refused() {
        let series = SeriesAggregator::new("a", "b").finish();
        let dir = tempfile::tempdir().unwrap();
        let err = CsvRenderer.render(&series, dir.path()).unwrap_err();
        assert!(matches!(err, RenderError::Empty));
    }

    #[test]
    fn misaligned_series_are_refused() {
        let mut agg = SeriesAggregator::new("a", "b");
        agg.record(5, &failed(), 1.0, 1.0);
        let mut series = agg.finish();
        series.model2.points.pop();

        let dir = tempfile::tempdir().unwrap();
        let err = CsvRenderer.render(&series, dir.path()).unwrap_err();
        assert!(matches!(err, RenderError::Misaligned { expected: 1, found: 0, .. }));
    }

    #[cfg(feature = "plot")]
    #[test]
    fn png_is_written_next_to_the_table() {
        let mut agg = SeriesAggregator::new("Bianchi MCS4 40MHz", "Bianchi MCS2 20MHz");
        agg.record(5, &parsed(40.0, 60.0, 100.0), 313.0, 78.0);
        agg.record(10, &parsed(35.0, 50.0, 85.0), 290.0, 72.0);
        let series = agg.finish();

        let dir = tempfile::tempdir().unwrap();
        let path = PlotRenderer::default().render(&series, dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "throughput_combined.png");
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }
}
