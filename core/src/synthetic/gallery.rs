//! Canned result tables quoted by the performance and gallery pages.

use crate::math::Color;

/// One labelled horizontal bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricBar {
    pub name: &'static str,
    pub value: f32,
    pub color: Color,
}

pub const PERFORMANCE_BARS: [MetricBar; 4] = [
    MetricBar { name: "F1 Score", value: 0.999, color: Color::GREEN_500 },
    MetricBar { name: "Precision", value: 0.995, color: Color::BLUE_500 },
    MetricBar { name: "Recall", value: 0.993, color: Color::VIOLET_500 },
    MetricBar { name: "Accuracy", value: 0.992, color: Color::AMBER_500 },
];

pub const ABLATION_BARS: [MetricBar; 4] = [
    MetricBar { name: "Full model", value: 0.999, color: Color::GREEN_500 },
    MetricBar { name: "Without LESR", value: 0.847, color: Color::RED_500 },
    MetricBar { name: "PANNs features only", value: 0.923, color: Color::BLUE_500 },
    MetricBar { name: "Without M-of-N", value: 0.912, color: Color::AMBER_500 },
];

pub const BAND_SWEEP: [(usize, f32); 6] = [
    (16, 0.91),
    (24, 0.95),
    (32, 0.999),
    (40, 0.992),
    (48, 0.987),
    (64, 0.983),
];
pub const OPTIMAL_BAND_INDEX: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MofNConfig {
    pub m: u32,
    pub n: u32,
    pub usability: f32,
    pub security: f32,
}

pub const MOFN_CONFIGS: [MofNConfig; 4] = [
    MofNConfig { m: 2, n: 5, usability: 0.9, security: 0.7 },
    MofNConfig { m: 3, n: 5, usability: 0.8, security: 0.85 },
    MofNConfig { m: 4, n: 7, usability: 0.7, security: 0.9 },
    MofNConfig { m: 5, n: 10, usability: 0.6, security: 0.95 },
];
pub const RECOMMENDED_MOFN: usize = 1;

/// F1 as a function of decision threshold, peaking at 0.5.
pub fn threshold_sweep() -> Vec<(f32, f32)> {
    (0..=10)
        .map(|step| {
            let t = step as f32 / 10.0;
            (t, 1.0 - (t - 0.5).abs() * 2.0)
        })
        .collect()
}
