use crate::application::UseCaseContainer;
use crate::domain::entities::{AreaRange, CatalogEntry, FilterOptions, FilterState};
use crate::presentation::services::AsyncExecutor;
use anyhow::Result;
use std::future::Future;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};

pub enum CatalogEvent {
    OptionsLoaded(FilterOptions),
    CitiesLoaded {
        region: String,
        cities: Vec<CatalogEntry>,
    },
    AreaRangeLoaded {
        request: u64,
        range: AreaRange,
    },
    Failed {
        task: &'static str,
        /// Set for area-range fetches so superseded failures can be dropped.
        request: Option<u64>,
        message: String,
    },
}

/// Runs catalog use cases in the background and hands results back to the UI
/// thread through a channel that is drained once per frame.
pub struct CatalogTasks {
    use_cases: Arc<UseCaseContainer>,
    executor: AsyncExecutor,
    sender: Sender<CatalogEvent>,
    receiver: Receiver<CatalogEvent>,
    in_flight: usize,
    latest_range_request: u64,
}

impl CatalogTasks {
    pub fn new(use_cases: Arc<UseCaseContainer>, executor: AsyncExecutor) -> Self {
        let (sender, receiver) = channel();
        Self {
            use_cases,
            executor,
            sender,
            receiver,
            in_flight: 0,
            latest_range_request: 0,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    pub fn load_options(&mut self) {
        let use_case = Arc::clone(&self.use_cases.load_filter_options);
        self.run(
            "load options",
            None,
            async move { use_case.execute().await },
            CatalogEvent::OptionsLoaded,
        );
    }

    pub fn load_cities(&mut self, region: String) {
        let use_case = Arc::clone(&self.use_cases.load_cities);
        let requested = region.clone();
        self.run(
            "load cities",
            None,
            async move { use_case.execute(&requested).await },
            move |cities| CatalogEvent::CitiesLoaded { region, cities },
        );
    }

    pub fn fetch_area_range(&mut self, filters: FilterState) {
        let use_case = Arc::clone(&self.use_cases.fetch_area_range);
        self.latest_range_request += 1;
        let request = self.latest_range_request;
        self.run(
            "fetch area range",
            Some(request),
            async move { use_case.execute(&filters).await },
            move |range| CatalogEvent::AreaRangeLoaded { request, range },
        );
    }

    /// Spawns `call` as its own task so that a panic still produces an event and
    /// the in-flight count always drains.
    fn run<T, Fut, F>(&mut self, task: &'static str, request: Option<u64>, call: Fut, done: F)
    where
        T: Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
        F: FnOnce(T) -> CatalogEvent + Send + 'static,
    {
        let sender = self.sender.clone();
        self.in_flight += 1;

        self.executor.spawn(async move {
            let event = match tokio::spawn(call).await {
                Ok(Ok(value)) => done(value),
                Ok(Err(e)) => CatalogEvent::Failed {
                    task,
                    request,
                    message: format!("{e:#}"),
                },
                Err(e) => {
                    let message = if e.is_panic() {
                        "task panicked".to_string()
                    } else {
                        "task was cancelled".to_string()
                    };
                    CatalogEvent::Failed {
                        task,
                        request,
                        message,
                    }
                }
            };
            let _ = sender.send(event);
        });
    }

    fn is_superseded(&self, event: &CatalogEvent) -> bool {
        match event {
            CatalogEvent::AreaRangeLoaded { request, .. }
            | CatalogEvent::Failed {
                request: Some(request),
                ..
            } => *request != self.latest_range_request,
            _ => false,
        }
    }

    /// Completed events since the last poll. Area-range results, successful or
    /// not, that answer a superseded request are dropped.
    pub fn poll(&mut self) -> Vec<CatalogEvent> {
        let mut events = Vec::new();

        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    if self.is_superseded(&event) {
                        tracing::debug!("Dropping result of superseded area range request");
                        continue;
                    }
                    events.push(event);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        events
    }
}
