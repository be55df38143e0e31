use std::fmt;
use std::io::{self, Write};

use tracing::{debug, trace, warn};

use crate::error::{Result, ShallowNnError};
use crate::train::epoch_stats::EpochStats;

/// What the network looked like for one presented example, captured between
/// its forward pass and its weight update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExampleRecord<'a> {
    pub epoch: usize,
    /// Row of the training set.
    pub index: usize,
    pub inputs: &'a [f64],
    pub outputs: &'a [f64],
    pub expected: &'a [f64],
}

impl fmt::Display for ExampleRecord<'_> {
    /// Three lines: `Input: ...`, `Output: ...`, `Expected: ...`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_row(f, "Input:", self.inputs)?;
        writeln!(f)?;
        write_row(f, "Output:", self.outputs)?;
        writeln!(f)?;
        write_row(f, "Expected:", self.expected)
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, label: &str, values: &[f64]) -> fmt::Result {
    f.write_str(label)?;
    for v in values {
        write!(f, " {v}")?;
    }
    Ok(())
}

/// Receives training diagnostics. The training loop itself performs no I/O;
/// everything it reports goes through this trait.
pub trait TrainingObserver {
    /// Called once per presented example, in presentation order.
    fn on_example(&mut self, record: &ExampleRecord<'_>);

    /// Called once after every epoch.
    fn on_epoch_end(&mut self, _stats: &EpochStats) {}
}

impl<T: TrainingObserver + ?Sized> TrainingObserver for &mut T {
    fn on_example(&mut self, record: &ExampleRecord<'_>) {
        (**self).on_example(record);
    }

    fn on_epoch_end(&mut self, stats: &EpochStats) {
        (**self).on_epoch_end(stats);
    }
}

impl<A: TrainingObserver, B: TrainingObserver> TrainingObserver for (A, B) {
    fn on_example(&mut self, record: &ExampleRecord<'_>) {
        self.0.on_example(record);
        self.1.on_example(record);
    }

    fn on_epoch_end(&mut self, stats: &EpochStats) {
        self.0.on_epoch_end(stats);
        self.1.on_epoch_end(stats);
    }
}

impl<T: TrainingObserver> TrainingObserver for Option<T> {
    fn on_example(&mut self, record: &ExampleRecord<'_>) {
        if let Some(observer) = self {
            observer.on_example(record);
        }
    }

    fn on_epoch_end(&mut self, stats: &EpochStats) {
        if let Some(observer) = self {
            observer.on_epoch_end(stats);
        }
    }
}

/// Discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl TrainingObserver for NoopObserver {
    fn on_example(&mut self, _record: &ExampleRecord<'_>) {}
}

/// Forwards records to `tracing`: examples at TRACE, epoch summaries at DEBUG.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl TrainingObserver for TracingObserver {
    fn on_example(&mut self, record: &ExampleRecord<'_>) {
        trace!(
            epoch = record.epoch,
            index = record.index,
            inputs = ?record.inputs,
            outputs = ?record.outputs,
            expected = ?record.expected,
            "example"
        );
    }

    fn on_epoch_end(&mut self, stats: &EpochStats) {
        debug!(
            epoch = stats.epoch,
            squared_error = stats.squared_error,
            mean_loss = stats.mean_loss,
            elapsed_us = stats.elapsed_us,
            "epoch finished"
        );
    }
}

/// Writes each example record in its three-line text form.
///
/// The first write error is logged and stops further output; training carries
/// on and `finish` reports the error afterwards.
pub struct WriterObserver<W: Write> {
    writer: W,
    error: Option<ShallowNnError>,
}

impl<W: Write> WriterObserver<W> {
    pub fn new(writer: W) -> Self {
        WriterObserver { writer, error: None }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Flushes the writer and reports the first error hit while writing.
    pub fn finish(mut self) -> Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl WriterObserver<io::StdoutLock<'static>> {
    pub fn stdout() -> Self {
        WriterObserver::new(io::stdout().lock())
    }
}

impl<W: Write> TrainingObserver for WriterObserver<W> {
    fn on_example(&mut self, record: &ExampleRecord<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.writer, "{record}") {
            warn!(error = %e, "diagnostic output failed, dropping further records");
            self.error = Some(e.into());
        }
    }
}

/// Writes one JSON object per epoch (`EpochStats`), one per line.
pub struct JsonLinesObserver<W: Write> {
    writer: W,
    error: Option<ShallowNnError>,
}

impl<W: Write> JsonLinesObserver<W> {
    pub fn new(writer: W) -> Self {
        JsonLinesObserver { writer, error: None }
    }

    /// Flushes the writer and reports the first error hit while writing.
    pub fn finish(mut self) -> Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_stats(&mut self, stats: &EpochStats) -> Result<()> {
        serde_json::to_writer(&mut self.writer, stats)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> TrainingObserver for JsonLinesObserver<W> {
    fn on_example(&mut self, _record: &ExampleRecord<'_>) {}

    fn on_epoch_end(&mut self, stats: &EpochStats) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.write_stats(stats) {
            warn!(error = %e, "failed to write epoch stats");
            self.error = Some(e);
        }
    }
}

/// Keeps every epoch summary in memory and counts presented examples.
#[derive(Debug, Clone, Default)]
pub struct StatsRecorder {
    pub stats: Vec<EpochStats>,
    pub examples: usize,
}

impl TrainingObserver for StatsRecorder {
    fn on_example(&mut self, _record: &ExampleRecord<'_>) {
        self.examples += 1;
    }

    fn on_epoch_end(&mut self, stats: &EpochStats) {
        self.stats.push(stats.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record<'a>(inputs: &'a [f64], outputs: &'a [f64], expected: &'a [f64]) -> ExampleRecord<'a> {
        ExampleRecord { epoch: 1, index: 0, inputs, outputs, expected }
    }

    fn stats(epoch: usize) -> EpochStats {
        EpochStats { epoch, squared_error: 0.5, mean_loss: 0.125, elapsed_us: 3 }
    }

    #[test]
    fn record_displays_three_labelled_lines() {
        let text = record(&[0.0, 1.0], &[0.75], &[1.0]).to_string();
        assert_eq!(text, "Input: 0 1\nOutput: 0.75\nExpected: 1");
    }

    #[test]
    fn writer_observer_appends_newline_per_record() {
        let mut observer = WriterObserver::new(Vec::new());
        observer.on_example(&record(&[1.0, 0.0], &[0.5], &[1.0]));
        observer.on_example(&record(&[0.0, 0.0], &[0.25], &[0.0]));
        let out = String::from_utf8(observer.finish().unwrap()).unwrap();
        assert_eq!(
            out,
            "Input: 1 0\nOutput: 0.5\nExpected: 1\nInput: 0 0\nOutput: 0.25\nExpected: 0\n"
        );
    }

    struct FailingWriter {
        attempts: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            self.attempts += 1;
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writer_observer_stops_after_first_failure() {
        let mut observer = WriterObserver::new(FailingWriter { attempts: 0 });
        observer.on_example(&record(&[1.0], &[0.5], &[1.0]));
        observer.on_example(&record(&[1.0], &[0.5], &[1.0]));
        assert_eq!(observer.into_inner().attempts, 1);
    }

    #[test]
    fn writer_observer_finish_reports_closed_output() {
        let mut observer = WriterObserver::new(FailingWriter { attempts: 0 });
        observer.on_example(&record(&[0.0, 1.0], &[0.5], &[1.0]));
        assert!(matches!(observer.finish(), Err(ShallowNnError::Io(_))));
    }

    #[test]
    fn writer_observer_finish_is_ok_without_records() {
        let observer = WriterObserver::new(Vec::new());
        assert_eq!(observer.finish().unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn json_lines_observer_writes_one_object_per_epoch() {
        let mut observer = JsonLinesObserver::new(Vec::new());
        observer.on_epoch_end(&stats(1));
        observer.on_epoch_end(&stats(2));
        let out = String::from_utf8(observer.finish().unwrap()).unwrap();
        let parsed: Vec<EpochStats> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(parsed, vec![stats(1), stats(2)]);
    }

    #[test]
    fn json_lines_observer_surfaces_write_error() {
        let mut observer = JsonLinesObserver::new(FailingWriter { attempts: 0 });
        observer.on_epoch_end(&stats(1));
        assert!(matches!(observer.finish(), Err(ShallowNnError::Json(_) | ShallowNnError::Io(_))));
    }

    #[test]
    fn pair_forwards_to_both_observers() {
        let mut pair = (StatsRecorder::default(), StatsRecorder::default());
        pair.on_example(&record(&[0.0], &[0.0], &[0.0]));
        pair.on_epoch_end(&stats(1));
        assert_eq!(pair.0.examples, 1);
        assert_eq!(pair.1.stats, vec![stats(1)]);
    }

    #[test]
    fn absent_observer_is_skipped() {
        let mut present = Some(StatsRecorder::default());
        let mut absent: Option<StatsRecorder> = None;
        present.on_example(&record(&[0.0], &[0.0], &[0.0]));
        absent.on_example(&record(&[0.0], &[0.0], &[0.0]));
        assert_eq!(present.map(|r| r.examples), Some(1));
    }
}
