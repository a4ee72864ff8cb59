use serde::Serialize;

/// Component weights for the composite selection score. The four weights
/// must sum to 1.0 so that a composite of sub-scores in [0,100] stays in
/// [0,100] without clamping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectionWeights {
    pub trend: f64,
    pub marketplace: f64,
    pub roi: f64,
    pub freshness: f64,
}

impl SelectionWeights {
    pub fn new(trend: f64, marketplace: f64, roi: f64, freshness: f64) -> Result<Self, String> {
        let sum = trend + marketplace + roi + freshness;
        if (sum - 1.0).abs() > 1e-9 {
            return Err(format!("Selection weights must sum to 1.0, got {sum}"));
        }
        if [trend, marketplace, roi, freshness].iter().any(|w| *w < 0.0) {
            return Err("Selection weights must be non-negative".into());
        }
        Ok(Self {
            trend,
            marketplace,
            roi,
            freshness,
        })
    }

    /// Weighted composite of the four sub-scores.
    pub fn composite(
        &self,
        trend_score: f64,
        marketplace_score: f64,
        roi_score: f64,
        freshness_score: f64,
    ) -> f64 {
        self.trend * trend_score
            + self.marketplace * marketplace_score
            + self.roi * roi_score
            + self.freshness * freshness_score
    }
}

impl Default for SelectionWeights {
    fn default() -> Self {
        Self {
            trend: 0.35,
            marketplace: 0.30,
            roi: 0.25,
            freshness: 0.10,
        }
    }
}
