//! Norm-referenced score transformations.

use mensura_core::models::result::NormScores;
use mensura_core::models::scale::PopulationNorms;

/// z, T and percentile for `raw` against `norms`. `None` when the norm
/// table has no spread.
pub fn norm_scores(raw: f64, norms: &PopulationNorms) -> Option<NormScores> {
    if !(norms.standard_deviation > 0.0) {
        return None;
    }
    let z_score = (raw - norms.mean) / norms.standard_deviation;
    Some(NormScores {
        z_score,
        t_score: 50.0 + 10.0 * z_score,
        percentile: (standard_normal_cdf(z_score) * 1000.0).round() / 10.0,
    })
}

/// Φ(z) via the Abramowitz–Stegun 7.1.26 approximation of erf
/// (absolute error below 1.5e-7).
pub fn standard_normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254_829_592;
    const A2: f64 = -0.284_496_736;
    const A3: f64 = 1.421_413_741;
    const A4: f64 = -1.453_152_027;
    const A5: f64 = 1.061_405_429;
    const P: f64 = 0.327_591_1;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;
    sign * (1.0 - poly * (-x * x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norms(mean: f64, sd: f64) -> PopulationNorms {
        PopulationNorms {
            mean,
            standard_deviation: sd,
            population: None,
        }
    }

    #[test]
    fn mean_score_is_fiftieth_percentile() {
        let n = norm_scores(10.0, &norms(10.0, 4.0)).unwrap();
        assert_eq!(n.z_score, 0.0);
        assert_eq!(n.t_score, 50.0);
        assert!((n.percentile - 50.0).abs() < 0.05);
    }

    #[test]
    fn two_sd_above_is_near_98th_percentile() {
        let n = norm_scores(18.0, &norms(10.0, 4.0)).unwrap();
        assert!((n.z_score - 2.0).abs() < 1e-12);
        assert!((n.t_score - 70.0).abs() < 1e-9);
        assert!((n.percentile - 97.7).abs() < 0.05);
    }

    #[test]
    fn zero_spread_has_no_norms() {
        assert!(norm_scores(5.0, &norms(5.0, 0.0)).is_none());
    }

    #[test]
    fn cdf_is_symmetric() {
        for z in [0.3, 1.0, 1.96, 2.5] {
            let sum = standard_normal_cdf(z) + standard_normal_cdf(-z);
            assert!((sum - 1.0).abs() < 1e-9);
        }
    }
}
