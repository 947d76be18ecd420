use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioId {
    #[default]
    Clean,
    Noisy,
    Attack,
    CrossDevice,
    Temporal,
}

impl ScenarioId {
    pub const ALL: [ScenarioId; 5] = [
        ScenarioId::Clean,
        ScenarioId::Noisy,
        ScenarioId::Attack,
        ScenarioId::CrossDevice,
        ScenarioId::Temporal,
    ];

    pub fn parse(id: &str) -> Option<Self> {
        match id.trim() {
            "clean" => Some(ScenarioId::Clean),
            "noisy" => Some(ScenarioId::Noisy),
            "attack" => Some(ScenarioId::Attack),
            "cross-device" => Some(ScenarioId::CrossDevice),
            "temporal" => Some(ScenarioId::Temporal),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            ScenarioId::Clean => "clean",
            ScenarioId::Noisy => "noisy",
            ScenarioId::Attack => "attack",
            ScenarioId::CrossDevice => "cross-device",
            ScenarioId::Temporal => "temporal",
        }
    }

    pub fn scenario(&self) -> &'static Scenario {
        match self {
            ScenarioId::Clean => &CLEAN,
            ScenarioId::Noisy => &NOISY,
            ScenarioId::Attack => &ATTACK,
            ScenarioId::CrossDevice => &CROSS_DEVICE,
            ScenarioId::Temporal => &TEMPORAL,
        }
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scenario().name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScenarioMetric {
    pub title: &'static str,
    pub value: &'static str,
    pub description: &'static str,
}

const fn metric(
    title: &'static str,
    value: &'static str,
    description: &'static str,
) -> ScenarioMetric {
    ScenarioMetric {
        title,
        value,
        description,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scenario {
    pub id: ScenarioId,
    pub name: &'static str,
    pub metrics: [ScenarioMetric; 6],
}

pub const CLEAN: Scenario = Scenario {
    id: ScenarioId::Clean,
    name: "Clean environment",
    metrics: [
        metric("F1 Score", "0.999", "Harmonic mean of precision and recall"),
        metric("1-EER", "0.999", "Complement of the equal error rate"),
        metric("ASR", "95.2%", "Attack success rate"),
        metric("FPR", "2.1%", "False positive rate"),
        metric("Processing Time", "23ms", "Latency of one authentication"),
        metric("Memory Usage", "12MB", "Model memory footprint"),
    ],
};

pub const NOISY: Scenario = Scenario {
    id: ScenarioId::Noisy,
    name: "Noisy environment",
    metrics: [
        metric("F1 Score", "0.967", "Overall performance under noise"),
        metric("1-EER", "0.971", "Equal error rate under interference"),
        metric("ASR", "88.7%", "Success rate under noise"),
        metric("FPR", "8.9%", "False positives added by noise"),
        metric("SNR Gain", "+6.8dB", "LESR denoising effect"),
        metric("Robustness", "91.2%", "Performance retention"),
    ],
};

pub const ATTACK: Scenario = Scenario {
    id: ScenarioId::Attack,
    name: "Attack scenarios",
    metrics: [
        metric("Replay Detection", "99.2%", "Replay attack detection rate"),
        metric("Shoulder-Surfing Protection", "100%", "No visual leakage at all"),
        metric("Random Guessing", "12.5%", "Success rate with M=3, N=5"),
        metric("Mimicry Attack", "3.7%", "Success rate of advanced mimicry"),
        metric("Attack Detection", "96.8%", "Anomalous behaviour detection rate"),
        metric("Protection Level", "High", "Overall security rating"),
    ],
};

pub const CROSS_DEVICE: Scenario = Scenario {
    id: ScenarioId::CrossDevice,
    name: "Cross-device",
    metrics: [
        metric("Device Adaptability", "89.3%", "Performance retained across devices"),
        metric("Transfer Learning", "92.1%", "Few-shot adaptation"),
        metric("Hardware Compatibility", "95.6%", "Compatibility across microphones"),
        metric("Calibration Time", "3.2s", "Time to calibrate a new device"),
        metric("Generalization", "87.9%", "Performance on unseen devices"),
        metric("Consistency", "94.1%", "Cross-device consistency"),
    ],
};

pub const TEMPORAL: Scenario = Scenario {
    id: ScenarioId::Temporal,
    name: "Temporal analysis",
    metrics: [
        metric("Short-term Stability", "98.7%", "Stability within one hour"),
        metric("Long-term Stability", "94.2%", "Retention after one month"),
        metric("Learning Effect", "+2.3%", "Gain from user adaptation"),
        metric("Template Refresh", "7 days", "Recommended update interval"),
        metric("Degradation Rate", "0.12%/day", "Natural performance decay"),
        metric("Recovery", "96.8%", "Recovered after retraining"),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for id in ScenarioId::ALL {
            assert_eq!(ScenarioId::parse(id.key()), Some(id));
            assert_eq!(id.scenario().id, id);
        }
        assert_eq!(ScenarioId::parse("underwater"), None);
    }
}
