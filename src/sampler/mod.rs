//! Screen sampling.
//!
//! Reading a pixel off the screen is left to an external program (for example
//! `hyprpicker`, `grim` + `convert`, or a small script). While picking mode is
//! on, a ticker task asks the sampler for a color every poll interval and
//! forwards what it gets to the app loop.

use crate::app::events::Event;
use crate::color::Rgb;
use anyhow::Context;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::{process::Command, sync::mpsc, task::JoinHandle};

pub trait Sampler: Send + Sync + 'static {
    fn sample(&self) -> impl Future<Output = anyhow::Result<Rgb>> + Send;
}

/// Runs an argv command and reads a color from the first non-empty line it
/// prints. Any form `Rgb` parses is accepted.
#[derive(Debug, Clone)]
pub struct CommandSampler {
    program: String,
    args: Vec<String>,
}

impl CommandSampler {
    /// `None` when `argv` is empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Sampler for CommandSampler {
    async fn sample(&self) -> anyhow::Result<Rgb> {
        let out = Command::new(&self.program)
            .args(&self.args)
            .stdin(std::process::Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("run {}", self.program))?;

        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            anyhow::bail!("{} exited with {}: {}", self.program, out.status, stderr.trim());
        }
        parse_sample_output(&String::from_utf8_lossy(&out.stdout))
            .with_context(|| format!("read color from {}", self.program))
    }
}

pub fn parse_sample_output(stdout: &str) -> anyhow::Result<Rgb> {
    let line = stdout
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .context("sampler printed nothing")?;
    line.parse()
}

/// Owns the ticker task. Stopping or dropping it aborts the task right away.
#[derive(Debug)]
pub struct PickHandle {
    task: JoinHandle<()>,
}

impl PickHandle {
    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for PickHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Sample every `interval` until the receiver goes away or the sampler
/// fails. A failure is reported once as `Event::SampleError` and ends the
/// task.
pub fn spawn_pick_task<S: Sampler>(
    sampler: Arc<S>,
    interval: Duration,
    tx: mpsc::Sender<Event>,
) -> PickHandle {
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            match sampler.sample().await {
                Ok(rgb) => {
                    if tx.send(Event::Sample(rgb)).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %format!("{e:#}"), "sampling failed; picking stopped");
                    let _ = tx.send(Event::SampleError(format!("{e:#}"))).await;
                    break;
                }
            }
        }
        tracing::debug!("pick task finished");
    });
    PickHandle { task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Cycle {
        colors: Vec<Rgb>,
        calls: AtomicUsize,
    }

    impl Sampler for Cycle {
        async fn sample(&self) -> anyhow::Result<Rgb> {
            let i = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.colors[i % self.colors.len()])
        }
    }

    struct Broken;

    impl Sampler for Broken {
        async fn sample(&self) -> anyhow::Result<Rgb> {
            anyhow::bail!("no display")
        }
    }

    #[test]
    fn test_parse_output() {
        assert_eq!(parse_sample_output("\n#FF8000\n").unwrap(), Rgb::new(255, 128, 0));
        assert_eq!(parse_sample_output("  12, 34, 56  ").unwrap(), Rgb::new(12, 34, 56));
        assert!(parse_sample_output("").is_err());
        assert!(parse_sample_output("hello").is_err());
    }

    #[test]
    fn test_empty_argv() {
        assert!(CommandSampler::from_argv(&[]).is_none());
        let s = CommandSampler::from_argv(&["echo".into(), "#010203".into()]).unwrap();
        assert_eq!(s.program(), "echo");
    }

    #[tokio::test]
    async fn test_pick_task_forwards_samples() {
        let (tx, mut rx) = mpsc::channel(16);
        let sampler = Arc::new(Cycle {
            colors: vec![Rgb::new(1, 1, 1), Rgb::new(2, 2, 2)],
            calls: AtomicUsize::new(0),
        });
        let handle = spawn_pick_task(sampler, Duration::from_millis(5), tx);

        let mut got = Vec::new();
        while got.len() < 3 {
            match rx.recv().await {
                Some(Event::Sample(rgb)) => got.push(rgb),
                other => panic!("unexpected event {other:?}"),
            }
        }
        handle.stop();
        assert_eq!(got, vec![Rgb::new(1, 1, 1), Rgb::new(2, 2, 2), Rgb::new(1, 1, 1)]);
    }

    #[tokio::test]
    async fn test_pick_task_stops_on_error() {
        let (tx, mut rx) = mpsc::channel(16);
        let handle = spawn_pick_task(Arc::new(Broken), Duration::from_millis(5), tx);
        match rx.recv().await {
            Some(Event::SampleError(msg)) => assert!(msg.contains("no display")),
            other => panic!("unexpected event {other:?}"),
        }
        // the task dropped its sender after reporting
        assert!(rx.recv().await.is_none());
        drop(handle);
    }

    #[tokio::test]
    async fn test_stop_aborts_task() {
        let (tx, mut rx) = mpsc::channel(16);
        let sampler = Arc::new(Cycle {
            colors: vec![Rgb::BLACK],
            calls: AtomicUsize::new(0),
        });
        let handle = spawn_pick_task(sampler, Duration::from_millis(5), tx);
        assert!(matches!(rx.recv().await, Some(Event::Sample(_))));
        handle.stop();
        // drain whatever was queued; the channel must close once the task is gone
        let closed = tokio::time::timeout(Duration::from_secs(1), async {
            while rx.recv().await.is_some() {}
        })
        .await;
        assert!(closed.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_sampler_reads_stdout() {
        let s = CommandSampler::from_argv(&["echo".into(), "#0A0B0C".into()]).unwrap();
        assert_eq!(s.sample().await.unwrap(), Rgb::new(10, 11, 12));

        let s = CommandSampler::from_argv(&["false".into()]).unwrap();
        assert!(s.sample().await.is_err());
    }
}
