use serde::{Deserialize, Serialize};

/// The five scoring dimensions. Declaration order is the weighting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    KeywordCoverage,
    SkillsMatch,
    RoleAlignment,
    /// Higher is better. Despite the name this is a formatting *quality* score;
    /// the key is kept for compatibility with stored runs.
    FormattingRisk,
    TenureClarity,
}

impl MetricKey {
    pub const ALL: [MetricKey; 5] = [
        MetricKey::KeywordCoverage,
        MetricKey::SkillsMatch,
        MetricKey::RoleAlignment,
        MetricKey::FormattingRisk,
        MetricKey::TenureClarity,
    ];

    /// Weight in the overall score. The five weights sum to 1.0.
    pub fn weight(self) -> f64 {
        match self {
            MetricKey::KeywordCoverage => 0.40,
            MetricKey::SkillsMatch => 0.30,
            MetricKey::RoleAlignment => 0.10,
            MetricKey::FormattingRisk => 0.15,
            MetricKey::TenureClarity => 0.05,
        }
    }
}

/// Score used when there is too little signal to compute a ratio.
pub const NEUTRAL_SCORE: f64 = 60.0;

const SECTION_WEIGHT: f64 = 0.55;
const CONTACT_WEIGHT: f64 = 0.25;
const LENGTH_WEIGHT: f64 = 0.20;

/// Every metric, each an integer in `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSet {
    pub keyword_coverage: u32,
    pub skills_match: u32,
    pub role_alignment: u32,
    pub formatting_risk: u32,
    pub tenure_clarity: u32,
}

/// Raw (unrounded) metric values straight from the analyzers.
#[derive(Debug, Clone, Copy)]
pub struct RawMetrics {
    pub keyword_coverage: f64,
    pub skills_match: f64,
    pub role_alignment: f64,
    pub formatting_risk: f64,
    pub tenure_clarity: f64,
}

impl MetricSet {
    pub fn from_raw(raw: RawMetrics) -> Self {
        Self {
            keyword_coverage: clamp_score(raw.keyword_coverage),
            skills_match: clamp_score(raw.skills_match),
            role_alignment: clamp_score(raw.role_alignment),
            formatting_risk: clamp_score(raw.formatting_risk),
            tenure_clarity: clamp_score(raw.tenure_clarity),
        }
    }

    pub fn get(&self, key: MetricKey) -> u32 {
        match key {
            MetricKey::KeywordCoverage => self.keyword_coverage,
            MetricKey::SkillsMatch => self.skills_match,
            MetricKey::RoleAlignment => self.role_alignment,
            MetricKey::FormattingRisk => self.formatting_risk,
            MetricKey::TenureClarity => self.tenure_clarity,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetricKey, u32)> + '_ {
        MetricKey::ALL.into_iter().map(move |k| (k, self.get(k)))
    }

    /// Weighted sum of the already-rounded metrics, before the final clamp.
    pub fn weighted_sum(&self) -> f64 {
        self.iter()
            .map(|(key, value)| value as f64 * key.weight())
            .sum()
    }

    pub fn overall_score(&self) -> u32 {
        clamp_score(self.weighted_sum())
    }
}

/// Rounds half away from zero, then clamps to `[0, 100]`. NaN maps to 0.
pub fn clamp_score(value: f64) -> u32 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u32
}

/// Matched / total × 100, or `fallback` when there is nothing to match against.
pub fn ratio_or(matched: usize, total: usize, fallback: f64) -> f64 {
    if total == 0 {
        fallback
    } else {
        matched as f64 / total as f64 * 100.0
    }
}

/// Formatting quality from its three sub-signals (higher is better).
pub fn formatting_score(section_score: u32, contact_score: u32, length_score: u32) -> f64 {
    section_score as f64 * SECTION_WEIGHT
        + contact_score as f64 * CONTACT_WEIGHT
        + length_score as f64 * LENGTH_WEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        let total: f64 = MetricKey::ALL.iter().map(|k| k.weight()).sum();
        assert!((total - 1.0).abs() < 1e-9, "total was {total}");
    }

    #[test]
    fn test_clamp_score_rounds_then_clamps() {
        assert_eq!(clamp_score(49.5), 50);
        assert_eq!(clamp_score(49.4), 49);
        assert_eq!(clamp_score(-3.0), 0);
        assert_eq!(clamp_score(140.2), 100);
        assert_eq!(clamp_score(f64::NAN), 0);
    }

    #[test]
    fn test_ratio_or_fallback() {
        assert_eq!(ratio_or(0, 0, NEUTRAL_SCORE), 60.0);
        assert_eq!(ratio_or(1, 4, NEUTRAL_SCORE), 25.0);
        assert_eq!(ratio_or(0, 0, 0.0), 0.0);
    }

    #[test]
    fn test_formatting_score_max_is_89() {
        // 80 (four sections) * 0.55 + 100 * 0.25 + 100 * 0.20
        assert_eq!(clamp_score(formatting_score(80, 100, 100)), 89);
    }

    #[test]
    fn test_overall_score_matches_weights() {
        let metrics = MetricSet {
            keyword_coverage: 50,
            skills_match: 40,
            role_alignment: 60,
            formatting_risk: 33,
            tenure_clarity: 10,
        };
        // 20 + 12 + 6 + 4.95 + 0.5 = 43.45
        assert_eq!(metrics.overall_score(), 43);
    }

    #[test]
    fn test_metric_set_serializes_snake_case() {
        let json = serde_json::to_value(MetricSet::default()).unwrap();
        for key in [
            "keyword_coverage",
            "skills_match",
            "role_alignment",
            "formatting_risk",
            "tenure_clarity",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_metric_key_order_is_fixed() {
        let mut keys = MetricKey::ALL.to_vec();
        keys.sort();
        assert_eq!(keys, MetricKey::ALL.to_vec());
    }
}
