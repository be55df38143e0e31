use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    layers::dense::{sigmoid_delta, Dense},
    loss::mse::MseLoss,
    optim::sgd::Sgd,
};

/// Learning rate a freshly constructed network starts with.
pub const DEFAULT_LEARNING_RATE: f64 = 0.01;

/// A feed-forward network with `I` inputs, one hidden layer of `H` sigmoid
/// nodes and `O` sigmoid outputs, trained online on a fixed set of `N`
/// examples.
///
/// All shapes are part of the type, so weights, biases and training data can
/// never disagree on their dimensions.
#[derive(Debug, Clone)]
pub struct Network<const I: usize, const H: usize, const O: usize, const N: usize, R = StdRng> {
    pub(crate) hidden: Dense<I, H>,
    pub(crate) output: Dense<H, O>,
    pub(crate) training_inputs: [[f64; I]; N],
    pub(crate) training_outputs: [[f64; O]; N],
    pub(crate) presentation_order: [usize; N],
    pub(crate) optimizer: Sgd,
    pub(crate) epochs_trained: usize,
    pub(crate) rng: R,
}

impl<const I: usize, const H: usize, const O: usize, const N: usize> Network<I, H, O, N, StdRng> {
    /// Builds a network whose weights and shuffles come from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Builds a network with a reproducible random source.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<const I: usize, const H: usize, const O: usize, const N: usize> Default
    for Network<I, H, O, N, StdRng>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<const I: usize, const H: usize, const O: usize, const N: usize, R: Rng> Network<I, H, O, N, R> {
    /// Builds a network drawing initial weights and per-epoch shuffles from `rng`.
    ///
    /// Weights and biases are uniform in [0, 1), the presentation order is the
    /// identity and the training data is all zeros until loaded.
    pub fn with_rng(mut rng: R) -> Self {
        let hidden = Dense::random(&mut rng);
        let output = Dense::random(&mut rng);
        Network {
            hidden,
            output,
            training_inputs: [[0.0; I]; N],
            training_outputs: [[0.0; O]; N],
            presentation_order: std::array::from_fn(|i| i),
            optimizer: Sgd::new(DEFAULT_LEARNING_RATE),
            epochs_trained: 0,
            rng,
        }
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        self.optimizer.learning_rate = learning_rate;
    }

    pub fn learning_rate(&self) -> f64 {
        self.optimizer.learning_rate
    }

    pub fn set_training_inputs(&mut self, training_inputs: &[[f64; I]; N]) {
        self.training_inputs = *training_inputs;
    }

    pub fn set_training_outputs(&mut self, training_outputs: &[[f64; O]; N]) {
        self.training_outputs = *training_outputs;
    }

    /// Replaces both halves of the training set.
    pub fn set_training_data(
        &mut self,
        training_inputs: &[[f64; I]; N],
        training_outputs: &[[f64; O]; N],
    ) {
        self.set_training_inputs(training_inputs);
        self.set_training_outputs(training_outputs);
    }

    /// Redraws every weight and bias from uniform [0, 1). Training data and
    /// presentation order are left alone.
    pub fn initialize_weights(&mut self) {
        self.hidden.randomize(&mut self.rng);
        self.output.randomize(&mut self.rng);
    }

    /// Forward pass for training example `i`; overwrites the hidden and output
    /// activation buffers.
    pub fn pass_forward(&mut self, i: usize) {
        let input = &self.training_inputs[i];
        let hidden = self.hidden.feed_from(input);
        self.output.feed_from(hidden);
    }

    /// Backpropagates the error of example `i` and updates weights in place.
    ///
    /// Reads the activations left by `pass_forward(i)`, which must have run
    /// immediately before for the same `i`.
    pub fn propagate_backwards(&mut self, i: usize) {
        let expected = &self.training_outputs[i];
        let output_error: [f64; O] = std::array::from_fn(|j| expected[j] - self.output.neurons[j]);
        let delta_output = sigmoid_delta(&output_error, &self.output.neurons);

        // Hidden deltas need the output weights as they were before this step.
        let hidden_error = self.output.back_propagate(&delta_output);
        let delta_hidden = sigmoid_delta(&hidden_error, &self.hidden.neurons);

        self.output
            .apply_deltas(&self.hidden.neurons, &delta_output, &self.optimizer);
        self.hidden
            .apply_deltas(&self.training_inputs[i], &delta_hidden, &self.optimizer);
    }

    /// Network output for an arbitrary input; leaves the activation buffers as
    /// they were.
    pub fn predict(&self, input: &[f64; I]) -> [f64; O] {
        self.output.activate(&self.hidden.activate(input))
    }

    /// Σ over every example and output of (expected - predicted)², using the
    /// current weights.
    pub fn total_squared_error(&self) -> f64 {
        self.training_inputs
            .iter()
            .zip(self.training_outputs.iter())
            .map(|(input, expected)| MseLoss::sum_squared(&self.predict(input), expected))
            .sum()
    }

    pub fn hidden_weights(&self) -> &[[f64; H]; I] {
        &self.hidden.weights
    }

    pub fn output_weights(&self) -> &[[f64; O]; H] {
        &self.output.weights
    }

    pub fn hidden_bias(&self) -> &[f64; H] {
        &self.hidden.biases
    }

    pub fn output_bias(&self) -> &[f64; O] {
        &self.output.biases
    }

    /// Hidden activations of the most recent forward pass.
    pub fn hidden_layer(&self) -> &[f64; H] {
        &self.hidden.neurons
    }

    /// Output activations of the most recent forward pass.
    pub fn output_layer(&self) -> &[f64; O] {
        &self.output.neurons
    }

    pub fn training_inputs(&self) -> &[[f64; I]; N] {
        &self.training_inputs
    }

    pub fn training_outputs(&self) -> &[[f64; O]; N] {
        &self.training_outputs
    }

    pub fn presentation_order(&self) -> &[usize; N] {
        &self.presentation_order
    }
}
