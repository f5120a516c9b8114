//! Chart geometry and colours for the remaining-time donut and the
//! productivity bar, plus terminal renderings of both.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::budget::round_half_up;

/// Colour band of the donut, picked from the remaining percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartBand {
    /// More than half the day left
    Healthy,
    /// More than a quarter left
    Warning,
    Critical,
}

impl ChartBand {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage > 50.0 {
            Self::Healthy
        } else if percentage > 25.0 {
            Self::Warning
        } else {
            Self::Critical
        }
    }

    /// Linear gradient stops `(from, to)`.
    pub fn gradient(&self) -> (&'static str, &'static str) {
        match self {
            Self::Healthy => ("#06b6d4", "#3b82f6"),
            Self::Warning => ("#f59e0b", "#ef4444"),
            Self::Critical => ("#ef4444", "#dc2626"),
        }
    }

    pub fn glow(&self) -> &'static str {
        match self {
            Self::Healthy => "rgba(6, 182, 212, 0.5)",
            Self::Warning | Self::Critical => "rgba(239, 68, 68, 0.5)",
        }
    }
}

/// Arc of the remaining-time donut.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DonutChart {
    pub percentage: f64,
    /// Radians; the arc starts at twelve o'clock.
    pub start_angle: f64,
    pub end_angle: f64,
    pub band: ChartBand,
}

impl DonutChart {
    pub fn from_percentage(percentage: f64) -> Self {
        let percentage = percentage.clamp(0.0, 100.0);
        let start_angle = -PI / 2.0;
        Self {
            percentage,
            start_angle,
            end_angle: start_angle + 2.0 * PI * percentage / 100.0,
            band: ChartBand::from_percentage(percentage),
        }
    }

    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// One-line bar: `[██████····] 60%`.
    pub fn render_ascii(&self, width: usize) -> String {
        format!(
            "{} {}%",
            bar(self.percentage, width),
            round_half_up(self.percentage)
        )
    }
}

/// Fill of the productivity bar.
///
/// The score itself may be outside `[0, 100]`; only the drawn width is bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressBar {
    pub score: i64,
    pub fill_percent: u8,
}

impl ProgressBar {
    pub fn from_score(score: i64) -> Self {
        Self {
            score,
            fill_percent: score.clamp(0, 100) as u8,
        }
    }

    pub fn render_ascii(&self, width: usize) -> String {
        format!("{} {}", bar(f64::from(self.fill_percent), width), self.score)
    }
}

fn bar(percentage: f64, width: usize) -> String {
    let filled = ((percentage / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("[{}{}]", "█".repeat(filled), "·".repeat(width - filled))
}
