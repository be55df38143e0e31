#[derive(Debug, Clone, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one gradient step to a single parameter: `param += lr · signal`.
    ///
    /// `signal` is already oriented towards the target (target - output), so the
    /// step is an addition.
    pub fn step(&self, param: &mut f64, signal: f64) {
        *param += self.learning_rate * signal;
    }
}
