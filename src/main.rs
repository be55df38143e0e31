use std::fs::File;
use std::io::{self, BufWriter, Write};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shallow_nn::dataset::boolean::BINARY_OPERATOR_INPUTS;
use shallow_nn::train::{JsonLinesObserver, TracingObserver, TrainConfig, WriterObserver};
use shallow_nn::{BooleanOp, Network};

/// Two inputs, two hidden nodes, one output, four truth-table rows.
type BooleanNet = Network<2, 2, 1, 4>;

#[derive(Parser, Debug)]
#[command(name = "shallow-nn")]
#[command(about = "Train a one-hidden-layer sigmoid network on a boolean function")]
struct Args {
    /// Boolean function to learn: xor, or, and
    #[arg(short, long)]
    problem: Option<BooleanOp>,

    /// Number of training epochs
    #[arg(short, long)]
    epochs: Option<usize>,

    /// Learning rate
    #[arg(short, long)]
    learning_rate: Option<f64>,

    /// Seed for weight initialization and shuffling
    #[arg(long)]
    seed: Option<u64>,

    /// JSON run configuration; flags given on the command line take precedence
    #[arg(short, long)]
    config: Option<String>,

    /// Do not print the per-example Input/Output/Expected records
    #[arg(short, long)]
    quiet: bool,

    /// Write per-epoch statistics as JSON lines to this file
    #[arg(long)]
    stats: Option<String>,
}

impl Args {
    fn resolve_config(&self) -> shallow_nn::Result<TrainConfig> {
        let config = match &self.config {
            Some(path) => TrainConfig::load_json(path)?,
            None => TrainConfig::default(),
        };
        config.merge_overrides(self.problem, self.epochs, self.learning_rate, self.seed)
    }
}

fn main() -> shallow_nn::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shallow_nn=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.resolve_config()?;

    let mut net = match config.seed {
        Some(seed) => BooleanNet::with_seed(seed),
        None => BooleanNet::new(),
    };
    net.set_learning_rate(config.learning_rate);
    net.set_training_data(&BINARY_OPERATOR_INPUTS, config.problem.outputs());

    info!(
        problem = %config.problem,
        epochs = config.epochs,
        learning_rate = config.learning_rate,
        seed = ?config.seed,
        initial_error = net.total_squared_error(),
        "training started"
    );

    let examples = (!args.quiet).then(WriterObserver::stdout);
    let stats = match &args.stats {
        Some(path) => Some(JsonLinesObserver::new(BufWriter::new(File::create(path)?))),
        None => None,
    };
    let mut observer = ((examples, stats), TracingObserver);
    net.train_with_observer(config.epochs, &mut observer);

    let ((examples, stats), _) = observer;
    if let Some(examples) = examples {
        examples.finish()?;
    }
    if let Some(stats) = stats {
        stats.finish()?;
    }

    info!(
        epochs = net.epochs_trained(),
        final_error = net.total_squared_error(),
        "training finished"
    );

    let mut out = io::stdout().lock();
    for (input, expected) in BINARY_OPERATOR_INPUTS.iter().zip(config.problem.outputs()) {
        writeln!(
            out,
            "{} {} {} -> {:.4} (expected {})",
            input[0],
            config.problem,
            input[1],
            net.predict(input)[0],
            expected[0]
        )?;
    }
    out.flush()?;

    Ok(())
}
