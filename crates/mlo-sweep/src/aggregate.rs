use crate::parser::ParseOutcome;
use serde::Serialize;

pub const LINK1_LABEL: &str = "ns-3 Link 1";
pub const LINK2_LABEL: &str = "ns-3 Link 2";
pub const TOTAL_LABEL: &str = "ns-3 Total";

/// One labelled line of the comparison chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub points: Vec<(u32, f64)>,
}

impl Series {
    fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            points: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn xs(&self) -> impl Iterator<Item = u32> + '_ {
        self.points.iter().map(|(x, _)| *x)
    }

    pub fn ys(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|(_, y)| *y)
    }
}

/// The five comparison series, index-aligned in sweep execution order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedSeries {
    pub link1: Series,
    pub link2: Series,
    pub total: Series,
    pub model1: Series,
    pub model2: Series,
    /// Station counts whose sample is the sentinel rather than a measurement.
    pub failed_stations: Vec<u32>,
}

impl AggregatedSeries {
    /// Series in drawing order: measured first, then the two model curves.
    pub fn all(&self) -> [&Series; 5] {
        [
            &self.link1,
            &self.link2,
            &self.total,
            &self.model1,
            &self.model2,
        ]
    }

    /// Number of executed sweep points.
    pub fn len(&self) -> usize {
        self.link1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.link1.is_empty()
    }

    /// Largest y value across every series, `0.0` when empty.
    pub fn y_max(&self) -> f64 {
        self.all()
            .iter()
            .flat_map(|s| s.ys())
            .fold(0.0, f64::max)
    }
}

/// Accumulates one entry per executed sweep point into all five series.
#[derive(Debug, Clone)]
pub struct SeriesAggregator {
    series: AggregatedSeries,
}

impl SeriesAggregator {
    pub fn new(model1_label: &str, model2_label: &str) -> Self {
        Self {
            series: AggregatedSeries {
                link1: Series::new(LINK1_LABEL),
                link2: Series::new(LINK2_LABEL),
                total: Series::new(TOTAL_LABEL),
                model1: Series::new(model1_label),
                model2: Series::new(model2_label),
                failed_stations: Vec::new(),
            },
        }
    }

    /// Record one point. A failed outcome still contributes the sentinel so
    /// the series stay aligned.
    pub fn record(&mut self, stations: u32, outcome: &ParseOutcome, model1: f64, model2: f64) {
        let s = &mut self.series;
        if !outcome.is_parsed() {
            s.failed_stations.push(stations);
        }
        let measured = outcome.sample_or_sentinel();
        s.link1.points.push((stations, measured.link1));
        s.link2.points.push((stations, measured.link2));
        s.total.points.push((stations, measured.total));
        s.model1.points.push((stations, model1));
        s.model2.points.push((stations, model2));
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn finish(self) -> AggregatedSeries {
        self.series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlo_abstract::ThroughputSample;

    fn parsed(link1: f64, link2: f64, total: f64) -> ParseOutcome {
        ParseOutcome::Parsed {
            sample: ThroughputSample::new(link1, link2, total),
        }
    }

    fn failed() -> ParseOutcome {
        ParseOutcome::Failed {
            diagnostic: "no data".to_string(),
        }
    }

    #[test]
    fn series_stay_aligned_in_execution_order() {
        let mut agg = SeriesAggregator::new("m1", "m2");
        for (i, n) in [5, 10, 15].into_iter().enumerate() {
            let v = i as f64;
            agg.record(n, &parsed(v, v, 2.0 * v), 10.0, 20.0);
        }
        let out = agg.finish();

        for series in out.all() {
            assert_eq!(series.len(), 3);
            assert_eq!(series.points[0].0, 5);
        }
        assert_eq!(out.link1.xs().collect::<Vec<_>>(), vec![5, 10, 15]);
        assert_eq!(out.total.ys().collect::<Vec<_>>(), vec![0.0, 2.0, 4.0]);
        assert!(out.failed_stations.is_empty());
    }

    #[test]
    fn caller_order_is_kept() {
        let mut agg = SeriesAggregator::new("m1", "m2");
        for n in [30, 5, 20] {
            agg.record(n, &parsed(1.0, 1.0, 1.0), 0.0, 0.0);
        }
        let out = agg.finish();
        assert_eq!(out.model2.xs().collect::<Vec<_>>(), vec![30, 5, 20]);
    }

    #[test]
    fn failed_point_contributes_sentinel() {
        let mut agg = SeriesAggregator::new("m1", "m2");
        agg.record(5, &parsed(1.0, 2.0, 3.0), 9.0, 8.0);
        agg.record(10, &failed(), 7.0, 6.0);
        let out = agg.finish();

        assert_eq!(out.len(), 2);
        assert_eq!(out.link2.points[1], (10, 0.0));
        assert_eq!(out.model1.points[1], (10, 7.0));
        assert_eq!(out.failed_stations, vec![10]);
        assert_eq!(out.y_max(), 9.0);
    }

    #[test]
    fn labels_follow_the_chart_legend() {
        let out = SeriesAggregator::new("Bianchi A", "Bianchi B").finish();
        let labels: Vec<_> = out.all().iter().map(|s| s.label.clone()).collect();
        assert_eq!(
            labels,
            vec!["ns-3 Link 1", "ns-3 Link 2", "ns-3 Total", "Bianchi A", "Bianchi B"]
        );
        assert!(out.is_empty());
    }
}
