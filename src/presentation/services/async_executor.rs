use anyhow::{Context, Result};
use std::future::Future;
use std::sync::Arc;

/// Shared tokio runtime for catalog calls made from the UI thread.
pub struct AsyncExecutor {
    runtime: Arc<tokio::runtime::Runtime>,
}

impl AsyncExecutor {
    pub fn new() -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("sitescope-io")
            .enable_all()
            .build()
            .context("Failed to start async runtime")?;

        Ok(Self {
            runtime: Arc::new(runtime),
        })
    }

    pub fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.runtime.spawn(future);
    }
}

impl Clone for AsyncExecutor {
    fn clone(&self) -> Self {
        Self {
            runtime: Arc::clone(&self.runtime),
        }
    }
}
