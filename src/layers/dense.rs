use rand::Rng;

use crate::{activation::activation::Sigmoid, optim::sgd::Sgd};

/// A fully connected sigmoid layer with `IN` inputs and `OUT` nodes.
///
/// `weights[k][j]` connects source node `k` to destination node `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dense<const IN: usize, const OUT: usize> {
    pub weights: [[f64; OUT]; IN],
    pub biases: [f64; OUT],
    /// Post-sigmoid activations of the last `feed_from` call.
    pub neurons: [f64; OUT],
}

impl<const IN: usize, const OUT: usize> Dense<IN, OUT> {
    /// Builds a layer with weights and biases drawn uniformly from [0, 1).
    pub fn random<R: Rng>(rng: &mut R) -> Dense<IN, OUT> {
        let mut layer = Dense {
            weights: [[0.0; OUT]; IN],
            biases: [0.0; OUT],
            neurons: [0.0; OUT],
        };
        layer.randomize(rng);
        layer
    }

    /// Redraws every weight and bias from uniform [0, 1).
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        for row in self.weights.iter_mut() {
            for w in row.iter_mut() {
                *w = rng.gen::<f64>();
            }
        }
        for b in self.biases.iter_mut() {
            *b = rng.gen::<f64>();
        }
    }

    /// Activations for `input` without touching the stored neurons.
    pub fn activate(&self, input: &[f64; IN]) -> [f64; OUT] {
        std::array::from_fn(|j| {
            let mut z = self.biases[j];
            for k in 0..IN {
                z += input[k] * self.weights[k][j];
            }
            Sigmoid::function(z)
        })
    }

    /// Forward pass; stores the activations for the backward pass.
    pub fn feed_from(&mut self, input: &[f64; IN]) -> &[f64; OUT] {
        self.neurons = self.activate(input);
        &self.neurons
    }

    /// Error terms of the source layer given this layer's deltas:
    /// `error[k] = Σ_j delta[j] · weights[k][j]`.
    ///
    /// Must be called before `apply_deltas` so the pre-update weights are used.
    pub fn back_propagate(&self, delta: &[f64; OUT]) -> [f64; IN] {
        std::array::from_fn(|k| {
            let mut error = 0.0;
            for j in 0..OUT {
                error += delta[j] * self.weights[k][j];
            }
            error
        })
    }

    /// Updates biases by `delta` and weights by `input ⊗ delta`, scaled by the
    /// optimizer's learning rate.
    pub fn apply_deltas(&mut self, input: &[f64; IN], delta: &[f64; OUT], optimizer: &Sgd) {
        for j in 0..OUT {
            optimizer.step(&mut self.biases[j], delta[j]);
            for k in 0..IN {
                optimizer.step(&mut self.weights[k][j], input[k] * delta[j]);
            }
        }
    }
}

/// Element-wise δ = error ⊙ σ'(a), with `a` the stored post-sigmoid activations.
pub fn sigmoid_delta<const N: usize>(error: &[f64; N], activations: &[f64; N]) -> [f64; N] {
    std::array::from_fn(|j| error[j] * Sigmoid::derivative(activations[j]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn fixed() -> Dense<2, 1> {
        Dense {
            weights: [[0.5], [-0.25]],
            biases: [0.1],
            neurons: [0.0],
        }
    }

    #[test]
    fn random_layer_is_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        let layer: Dense<3, 4> = Dense::random(&mut rng);
        for w in layer.weights.iter().flatten().chain(layer.biases.iter()) {
            assert!((0.0..1.0).contains(w));
        }
    }

    #[test]
    fn feed_from_stores_sigmoid_of_affine_sum() {
        let mut layer = fixed();
        let out = *layer.feed_from(&[1.0, 2.0]);
        let expected = Sigmoid::function(0.1 + 0.5 - 0.5);
        assert_eq!(out, [expected]);
        assert_eq!(layer.neurons, [expected]);
    }

    #[test]
    fn back_propagate_weights_deltas_per_source() {
        let layer = fixed();
        let errors = layer.back_propagate(&[2.0]);
        assert_eq!(errors, [1.0, -0.5]);
    }

    #[test]
    fn apply_deltas_moves_weights_towards_signal() {
        let mut layer = fixed();
        layer.apply_deltas(&[1.0, 0.0], &[0.2], &Sgd::new(0.5));
        assert!((layer.biases[0] - 0.2).abs() < 1e-12);
        assert!((layer.weights[0][0] - 0.6).abs() < 1e-12);
        // Zero input leaves its weight untouched.
        assert_eq!(layer.weights[1][0], -0.25);
    }
}
