//! Aggregate statistics and trend series over a reading log.
//!
//! All figures are recomputed from the readings on every call. Tone-based
//! figures use the classification cached on each reading.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::classification::Tone;
use crate::context::{MeasurementContext, ALL_CONTEXTS};
use crate::reading::Reading;
use crate::reading_log::ReadingLog;
use crate::types::MgDl;

/// Number of readings averaged in the post-save quick stat.
pub const RECENT_AVERAGE_WINDOW: usize = 5;

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Headline figures for the history view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingSummary {
    pub total: usize,
    /// Mean glucose value in mg/dL.
    pub mean: f64,
    /// Share of readings with a `good` tone, as a percentage in `[0, 100]`.
    pub percent_good: f64,
}

/// Summarize a slice of readings. Returns `None` when there are none.
pub fn summarize(readings: &[Reading]) -> Option<ReadingSummary> {
    let mean = mean_value(readings)?;
    let good = readings.iter().filter(|r| r.tone() == Tone::Good).count();

    Some(ReadingSummary {
        total: readings.len(),
        mean,
        percent_good: good as f64 / readings.len() as f64 * 100.0,
    })
}

/// Mean of the last `window` readings in the log.
pub fn recent_average(log: &ReadingLog, window: usize) -> Option<f64> {
    mean_value(log.recent(window))
}

fn mean_value(readings: &[Reading]) -> Option<f64> {
    if readings.is_empty() {
        return None;
    }
    let sum: i64 = readings.iter().map(|r| i64::from(r.value())).sum();
    Some(sum as f64 / readings.len() as f64)
}

// ---------------------------------------------------------------------------
// Per-context averages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextAverage {
    pub context: MeasurementContext,
    pub label: &'static str,
    pub count: usize,
    pub mean: f64,
}

/// Mean value per measurement context, in display order.
///
/// Contexts with no readings are omitted.
pub fn average_by_context(readings: &[Reading]) -> Vec<ContextAverage> {
    ALL_CONTEXTS
        .into_iter()
        .filter_map(|context| {
            let values: Vec<i64> = readings
                .iter()
                .filter(|r| r.context() == context)
                .map(|r| i64::from(r.value()))
                .collect();
            if values.is_empty() {
                return None;
            }
            Some(ContextAverage {
                context,
                label: context.label(),
                count: values.len(),
                mean: values.iter().sum::<i64>() as f64 / values.len() as f64,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Trends
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub at: NaiveDateTime,
    pub value: MgDl,
    pub tone: Tone,
}

/// A horizontal reference band drawn behind the trend line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TargetBand {
    pub name: &'static str,
    pub label: &'static str,
    pub low: MgDl,
    pub high: MgDl,
}

pub const TARGET_BANDS: [TargetBand; 3] = [
    TargetBand {
        name: "hypoglycemia",
        label: "Hipoglicemie",
        low: 0,
        high: 70,
    },
    TargetBand {
        name: "fasting_target",
        label: "Țintă pe nemâncate",
        low: 70,
        high: 130,
    },
    TargetBand {
        name: "hyperglycemia",
        label: "Hiperglicemie",
        low: 180,
        high: 600,
    },
];

/// Points for the trend chart, in log order.
pub fn trend_series(readings: &[Reading]) -> Vec<TrendPoint> {
    readings
        .iter()
        .map(|r| TrendPoint {
            at: r.recorded_at(),
            value: r.value(),
            tone: r.tone(),
        })
        .collect()
}

/// Everything the trends view needs in one payload.
#[derive(Debug, Clone, Serialize)]
pub struct TrendReport {
    pub points: Vec<TrendPoint>,
    pub bands: [TargetBand; 3],
    pub averages_by_context: Vec<ContextAverage>,
}

pub fn trend_report(readings: &[Reading]) -> TrendReport {
    TrendReport {
        points: trend_series(readings),
        bands: TARGET_BANDS,
        averages_by_context: average_by_context(readings),
    }
}
