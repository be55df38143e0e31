pub struct MseLoss;

impl MseLoss {
    /// Summed squared error: Σ (expected - predicted)²
    pub fn sum_squared(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| (b - a).powi(2))
            .sum()
    }

    /// Scalar MSE: mean((predicted - expected)²); zero for an empty output.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        if predicted.is_empty() {
            return 0.0;
        }
        MseLoss::sum_squared(predicted, expected) / predicted.len() as f64
    }
}
