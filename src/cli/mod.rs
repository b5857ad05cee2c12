//! Command-line interface module.

mod args;
pub mod check;
pub mod list;
pub mod serve;
pub mod show;
pub mod toc;

pub use args::{Cli, Commands};

use anyhow::{Context, Result};
use std::future::Future;

/// Run one future to completion on a fresh single-threaded runtime.
///
/// Used by the one-shot commands; `serve` owns a multi-threaded runtime.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;
    Ok(runtime.block_on(future))
}
