use std::time::Duration;

use log::debug;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::types::Pipeline;
use super::view::{duration_raw, is_young, since_raw, LiveValues, PipelineView};
use crate::date::DateFormatter;

/// A millisecond value that advances by one interval per tick while ticking.
///
/// When not ticking the value stays frozen at its base. The ticker task is
/// aborted on [`ElapsedTime::stop`] or drop.
pub struct ElapsedTime {
    rx: watch::Receiver<Option<i64>>,
    task: Option<JoinHandle<()>>,
}

impl ElapsedTime {
    /// Starts ticking from `base` when `should_tick` is set and there is a
    /// base value. Must be called from within a tokio runtime when ticking.
    pub fn start(should_tick: bool, base: Option<i64>, interval: Duration) -> Self {
        let (tx, rx) = watch::channel(base);

        let task = match base {
            Some(base) if should_tick => Some(tokio::spawn(tick(tx, base, interval))),
            _ => None,
        };

        Self { rx, task }
    }

    pub fn value(&self) -> Option<i64> {
        *self.rx.borrow()
    }

    pub fn is_ticking(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<i64>> {
        self.rx.clone()
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for ElapsedTime {
    fn drop(&mut self) {
        self.stop();
    }
}

#[allow(clippy::cast_possible_truncation)]
async fn tick(tx: watch::Sender<Option<i64>>, base: i64, interval: Duration) {
    let step = interval.as_millis() as i64;
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first tick completes immediately
    ticker.tick().await;

    let mut value = base;
    loop {
        ticker.tick().await;
        value = value.saturating_add(step);
        if tx.send(Some(value)).is_err() {
            debug!("Elapsed time receiver dropped, stopping ticker");
            break;
        }
    }
}

/// Resolves on the next published value; a value that can no longer change
/// never resolves.
async fn next_change(rx: &mut watch::Receiver<Option<i64>>) {
    if rx.changed().await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Live inputs of a pipeline view.
///
/// `duration` carries the running time itself. `since` only signals when to
/// re-render: the creation time stays fixed and its age is taken from the
/// formatter's clock.
pub struct PipelineTickers {
    pub since: ElapsedTime,
    pub duration: ElapsedTime,
    since_base: i64,
    since_rx: watch::Receiver<Option<i64>>,
    duration_rx: watch::Receiver<Option<i64>>,
}

impl PipelineTickers {
    /// `since` ticks while the pipeline is under an hour old, `duration`
    /// while it is running.
    pub fn start(pipeline: &Pipeline, now_ms: i64, interval: Duration) -> Self {
        let since_base = since_raw(pipeline);
        let duration_base = duration_raw(pipeline, now_ms);

        let since = ElapsedTime::start(is_young(since_base, now_ms), Some(since_base), interval);
        let duration = ElapsedTime::start(pipeline.is_running(), Some(duration_base), interval);

        Self {
            since_rx: since.subscribe(),
            duration_rx: duration.subscribe(),
            since,
            duration,
            since_base,
        }
    }

    pub fn values(&self) -> LiveValues {
        LiveValues {
            since: self.since.value().map(|_| self.since_base),
            duration: self.duration.value(),
        }
    }

    pub fn any_ticking(&self) -> bool {
        self.since.is_ticking() || self.duration.is_ticking()
    }

    /// Stops the `since` ticker once the pipeline is more than an hour old.
    pub fn refresh(&mut self, now_ms: i64) {
        if self.since.is_ticking() && !is_young(self.since_base, now_ms) {
            debug!("Pipeline is older than an hour, stopping 'since' ticker");
            self.since.stop();
        }
    }

    /// Waits for the next tick of either ticker.
    pub async fn changed(&mut self) {
        tokio::select! {
            () = next_change(&mut self.since_rx) => {}
            () = next_change(&mut self.duration_rx) => {}
        }
    }
}

/// Re-renders `pipeline` after every tick until none of its time values
/// move any more.
pub async fn follow(
    pipeline: &Pipeline,
    formatter: &DateFormatter,
    tickers: &mut PipelineTickers,
    mut on_update: impl FnMut(&PipelineView),
) {
    while tickers.any_ticking() {
        tickers.changed().await;
        tickers.refresh(formatter.now_millis());
        on_update(&PipelineView::compose(pipeline, formatter, tickers.values()));
    }
}
