use shallow_nn::dataset::boolean::BINARY_OPERATOR_INPUTS;
use shallow_nn::train::StatsRecorder;
use shallow_nn::{BooleanOp, Network};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    for problem in [BooleanOp::And, BooleanOp::Or, BooleanOp::Xor] {
        let mut network = Network::<2, 4, 1, 4>::with_seed(2024);
        network.set_learning_rate(0.1);
        network.set_training_data(&BINARY_OPERATOR_INPUTS, problem.outputs());

        let mut recorder = StatsRecorder::default();
        // Progressive training: each call continues where the last one stopped.
        for epochs in [10, 100, 1_000, 8_890] {
            network.train_with_observer(epochs, &mut recorder);
            println!(
                "{problem}: epoch {:>5}: squared error = {:.6}",
                network.epochs_trained(),
                network.total_squared_error()
            );
        }

        for (input, expected) in BINARY_OPERATOR_INPUTS.iter().zip(problem.outputs()) {
            println!(
                "  {} {problem} {} -> {:.4} (expected {})",
                input[0],
                input[1],
                network.predict(input)[0],
                expected[0]
            );
        }
    }
}
