/// The logistic activation used by every node in the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sigmoid;

impl Sigmoid {
    /// σ(x) = 1 / (1 + e^(-x))
    pub fn function(x: f64) -> f64 {
        1.0 / (1.0 + (-x).exp())
    }

    /// Derivative expressed through the already-activated value `a = σ(x)`:
    /// σ'(x) = a · (1 - a).
    ///
    /// Callers pass the post-sigmoid activation, never the pre-activation sum.
    pub fn derivative(a: f64) -> f64 {
        a * (1.0 - a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_of_zero_is_exactly_half() {
        assert_eq!(Sigmoid::function(0.0), 0.5);
    }

    #[test]
    fn sigmoid_stays_inside_open_unit_interval() {
        let mut x = -30.0;
        while x <= 30.0 {
            let y = Sigmoid::function(x);
            assert!(y > 0.0 && y < 1.0, "sigmoid({x}) = {y}");
            x += 0.25;
        }
    }

    #[test]
    fn sigmoid_saturates_without_nan() {
        for x in [-1e4, -800.0, 800.0, 1e4] {
            let y = Sigmoid::function(x);
            assert!(y.is_finite());
            assert!((0.0..=1.0).contains(&y));
        }
    }

    #[test]
    fn derivative_uses_activated_value() {
        assert_eq!(Sigmoid::derivative(0.5), 0.25);
        assert_eq!(Sigmoid::derivative(0.0), 0.0);
        assert_eq!(Sigmoid::derivative(1.0), 0.0);

        // Matches the analytic derivative at a pre-activation point.
        let x = 0.7;
        let a = Sigmoid::function(x);
        let h = 1e-6;
        let numeric = (Sigmoid::function(x + h) - Sigmoid::function(x - h)) / (2.0 * h);
        assert!((Sigmoid::derivative(a) - numeric).abs() < 1e-8);
    }
}
