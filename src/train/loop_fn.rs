use std::time::Instant;

use rand::{seq::SliceRandom, Rng};
use tracing::debug_span;

use crate::loss::mse::MseLoss;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::observer::{ExampleRecord, TracingObserver, TrainingObserver};

impl<const I: usize, const H: usize, const O: usize, const N: usize, R: Rng> Network<I, H, O, N, R> {
    /// Runs `epochs` full passes over the training set, reporting diagnostics
    /// through `tracing`.
    ///
    /// State carries over between calls, so `train(a)` followed by `train(b)`
    /// is the same as `train(a + b)`.
    pub fn train(&mut self, epochs: usize) {
        self.train_with_observer(epochs, &mut TracingObserver);
    }

    /// Like `train`, but hands every example record and epoch summary to
    /// `observer`.
    pub fn train_with_observer<T: TrainingObserver + ?Sized>(&mut self, epochs: usize, observer: &mut T) {
        let _span = debug_span!("train", epochs, learning_rate = self.learning_rate()).entered();
        for _ in 0..epochs {
            self.process_epoch_with_observer(&mut *observer);
        }
    }

    /// One epoch with diagnostics routed to `tracing`.
    pub fn process_epoch(&mut self) -> EpochStats {
        self.process_epoch_with_observer(&mut TracingObserver)
    }

    /// Reshuffles the presentation order, then runs forward pass, observer
    /// callback and backward pass for every example in that order.
    pub fn process_epoch_with_observer<T: TrainingObserver + ?Sized>(
        &mut self,
        observer: &mut T,
    ) -> EpochStats {
        let t_start = Instant::now();
        let epoch = self.epochs_trained + 1;

        self.presentation_order.shuffle(&mut self.rng);

        let mut squared_error = 0.0;
        let mut total_loss = 0.0;

        let order = self.presentation_order;
        for i in order {
            self.pass_forward(i);

            let expected = &self.training_outputs[i];
            let outputs = &self.output.neurons;
            observer.on_example(&ExampleRecord {
                epoch,
                index: i,
                inputs: &self.training_inputs[i],
                outputs,
                expected,
            });
            squared_error += MseLoss::sum_squared(outputs, expected);
            total_loss += MseLoss::loss(outputs, expected);

            self.propagate_backwards(i);
        }

        self.epochs_trained = epoch;

        let stats = EpochStats {
            epoch,
            squared_error,
            mean_loss: if N == 0 { 0.0 } else { total_loss / N as f64 },
            elapsed_us: t_start.elapsed().as_micros() as u64,
        };
        observer.on_epoch_end(&stats);
        stats
    }

    /// Number of epochs run on this network so far.
    pub fn epochs_trained(&self) -> usize {
        self.epochs_trained
    }
}
