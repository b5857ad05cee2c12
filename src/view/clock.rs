//! Live clock for the list view.

use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use crossbeam::channel::Sender;
use serde::Serialize;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

const TICK: Duration = Duration::from_secs(1);

/// One clock reading, preformatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClockTick {
    /// `14:05:09`
    pub time: String,
    /// `Tuesday, 5 March 2024`
    pub date: String,
}

impl ClockTick {
    pub fn now() -> Self {
        Self::at(&Local::now().naive_local())
    }

    pub fn at(moment: &NaiveDateTime) -> Self {
        Self {
            time: moment.format("%H:%M:%S").to_string(),
            date: moment.format("%A, %-d %B %Y").to_string(),
        }
    }
}

/// Background task sending a [`ClockTick`] every second.
///
/// The task is aborted when the ticker is dropped.
#[derive(Debug)]
pub struct ClockTicker {
    task: JoinHandle<()>,
}

impl ClockTicker {
    pub fn start(runtime: &Handle, tx: Sender<ClockTick>) -> Self {
        let task = runtime.spawn(async move {
            let mut interval = tokio::time::interval(TICK);
            loop {
                interval.tick().await;
                if tx.send(ClockTick::now()).is_err() {
                    break;
                }
            }
        });
        Self { task }
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for ClockTicker {
    fn drop(&mut self) {
        self.task.abort();
    }
}
