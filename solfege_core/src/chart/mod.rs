//! Maps daily buckets onto plot geometry.
//!
//! Coordinates come out normalized: `x` runs 0..=1 from the oldest to the
//! newest day and `y` runs 0..=1 from the bottom of the scale to the top.
//! [`ChartLayout`] turns them into pixel space.

use chrono::NaiveDate;
use solfege_data::DailyBucket;

const MS_PER_SECOND: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Accuracy,
    MedianTime,
}

impl Metric {
    fn value(self, bucket: &DailyBucket) -> u64 {
        match self {
            Metric::Accuracy => bucket.accuracy as u64,
            Metric::MedianTime => bucket.median_elapsed_ms,
        }
    }

    pub fn format(self, value: u64) -> String {
        match self {
            Metric::Accuracy => format!("{value}%"),
            Metric::MedianTime => format!("{:.1}s", value as f64 / MS_PER_SECOND as f64),
        }
    }

    /// Accuracy is always 0..=100. Time rounds the largest value up to a whole
    /// second and never goes below one second.
    pub fn scale_max(self, observed_max: u64) -> u64 {
        match self {
            Metric::Accuracy => 100,
            Metric::MedianTime => observed_max
                .div_ceil(MS_PER_SECOND)
                .saturating_mul(MS_PER_SECOND)
                .max(MS_PER_SECOND),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotPoint {
    pub date: NaiveDate,
    pub value: u64,
    pub label: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub value: u64,
    pub label: String,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateLabel {
    pub date: NaiveDate,
    pub x: f64,
    pub anchor: Anchor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    pub metric: Metric,
    pub scale_max: u64,
    pub points: Vec<PlotPoint>,
    pub y_ticks: Vec<AxisTick>,
    /// First and last dates only.
    pub x_labels: Vec<DateLabel>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    NoData,
    Plot(Plot),
}

pub fn project(buckets: &[DailyBucket], metric: Metric) -> Projection {
    if buckets.is_empty() {
        return Projection::NoData;
    }

    let observed_max = buckets.iter().map(|b| metric.value(b)).max().unwrap_or(0);
    let scale_max = metric.scale_max(observed_max);
    let last = buckets.len() - 1;
    let x_span = last.max(1) as f64;
    let y_of = |value: u64| value as f64 / scale_max as f64;

    let points: Vec<PlotPoint> = buckets
        .iter()
        .enumerate()
        .map(|(i, bucket)| {
            let value = metric.value(bucket);
            PlotPoint {
                date: bucket.date,
                value,
                label: metric.format(value),
                x: i as f64 / x_span,
                y: y_of(value),
            }
        })
        .collect();

    let y_ticks = [0, scale_max / 2, scale_max]
        .into_iter()
        .map(|value| AxisTick {
            value,
            label: metric.format(value),
            y: y_of(value),
        })
        .collect();

    let mut x_labels = vec![DateLabel {
        date: points[0].date,
        x: points[0].x,
        anchor: Anchor::Start,
    }];
    if last > 0 {
        x_labels.push(DateLabel {
            date: points[last].date,
            x: points[last].x,
            anchor: Anchor::End,
        });
    }

    Projection::Plot(Plot {
        metric,
        scale_max,
        points,
        y_ticks,
        x_labels,
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Pixel frame a plot is drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub padding: Padding,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 200.0,
            padding: Padding {
                top: 10.0,
                right: 10.0,
                bottom: 20.0,
                left: 35.0,
            },
        }
    }
}

impl ChartLayout {
    pub fn plot_width(&self) -> f64 {
        (self.width - self.padding.left - self.padding.right).max(0.0)
    }

    pub fn plot_height(&self) -> f64 {
        (self.height - self.padding.top - self.padding.bottom).max(0.0)
    }

    /// Normalized coordinates to pixels, with y growing downwards.
    pub fn to_pixels(&self, x: f64, y: f64) -> (f64, f64) {
        let px = self.padding.left + x * self.plot_width();
        let py = self.padding.top + self.plot_height() - y * self.plot_height();
        (px, py)
    }
}

impl Plot {
    pub fn polyline(&self, layout: &ChartLayout) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|p| layout.to_pixels(p.x, p.y))
            .collect()
    }

    /// SVG path data (`M x y L x y ...`) through every point.
    pub fn svg_path(&self, layout: &ChartLayout) -> String {
        self.polyline(layout)
            .iter()
            .enumerate()
            .map(|(i, (x, y))| {
                let cmd = if i == 0 { 'M' } else { 'L' };
                format!("{cmd} {x:.1} {y:.1}")
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
