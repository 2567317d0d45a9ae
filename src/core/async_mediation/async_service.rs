use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use log::debug;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::core::async_mediation::errors::{AsyncError, TaskFailure};
use crate::core::async_mediation::promise::{pending, run_guarded, Deferred, Promise};
use crate::core::data::canvas::TILE_FACTOR;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AsyncConfig {
    pub worker_threads: usize,
}

impl AsyncConfig {
    /// One worker per available core, but never fewer than `tile_factor`.
    #[must_use]
    pub fn for_tile_factor(tile_factor: u32) -> Self {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);

        Self {
            worker_threads: cores.max(tile_factor as usize),
        }
    }
}

impl Default for AsyncConfig {
    fn default() -> Self {
        Self::for_tile_factor(TILE_FACTOR)
    }
}

/// Submits work to a bounded worker pool and hands back [`Promise`]s for the
/// results. Cloning shares the pool.
#[derive(Clone)]
pub struct AsyncService {
    pool: Arc<ThreadPool>,
}

impl AsyncService {
    pub fn new(config: AsyncConfig) -> Result<Self, AsyncError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.worker_threads.max(1))
            .thread_name(|index| format!("tile-worker-{}", index))
            .build()
            .map_err(|err| AsyncError::PoolBuild(err.to_string()))?;

        debug!("started async worker pool with {} threads", pool.current_num_threads());

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    #[must_use]
    pub fn worker_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Schedules `task` on the pool. Its error, or a panic, fails the
    /// returned promise.
    pub fn submit<R, E, F>(&self, task: F) -> Promise<R>
    where
        R: Send + 'static,
        E: Into<TaskFailure>,
        F: FnOnce() -> Result<R, E> + Send + 'static,
    {
        let (deferred, promise) = pending(Arc::clone(&self.pool));

        self.pool
            .spawn(move || deferred.complete(run_guarded(task)));

        promise
    }

    /// Wraps `target` so calls made through it run on the pool.
    pub fn mediate<T>(&self, target: Arc<T>) -> Mediated<T>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        Mediated {
            target,
            service: self.clone(),
        }
    }

    /// Resolves once every promise has resolved. Fails with the failure of
    /// the earliest promise in `promises` that failed.
    pub fn all<T>(&self, promises: Vec<Promise<T>>) -> Promise<()>
    where
        T: Send + 'static,
    {
        let (deferred, joined) = pending(Arc::clone(&self.pool));

        if promises.is_empty() {
            deferred.complete(Ok(()));
            return joined;
        }

        let barrier = Arc::new(Barrier {
            remaining: AtomicUsize::new(promises.len()),
            failures: Mutex::new(Vec::new()),
            deferred: Mutex::new(Some(deferred)),
        });

        for (index, promise) in promises.into_iter().enumerate() {
            let barrier = Arc::clone(&barrier);
            promise.on_complete(Box::new(move |result| barrier.arrive(index, result.err())));
        }

        joined
    }
}

struct Barrier {
    remaining: AtomicUsize,
    failures: Mutex<Vec<(usize, AsyncError)>>,
    deferred: Mutex<Option<Deferred<()>>>,
}

impl Barrier {
    fn arrive(&self, index: usize, failure: Option<AsyncError>) {
        if let Some(failure) = failure {
            self.failures
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((index, failure));
        }

        if self.remaining.fetch_sub(1, Ordering::AcqRel) != 1 {
            return;
        }

        let first_failure = {
            let mut failures = self.failures.lock().unwrap_or_else(PoisonError::into_inner);
            failures.sort_by_key(|(index, _)| *index);
            failures.drain(..).next()
        };

        let deferred = self
            .deferred
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(deferred) = deferred {
            deferred.complete(match first_failure {
                Some((_, failure)) => Err(failure),
                None => Ok(()),
            });
        }
    }
}

/// A target whose calls are scheduled on the worker pool instead of running
/// on the caller's thread.
pub struct Mediated<T: ?Sized> {
    target: Arc<T>,
    service: AsyncService,
}

impl<T> Mediated<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    pub fn call<R, E, F>(&self, invocation: F) -> Promise<R>
    where
        R: Send + 'static,
        E: Into<TaskFailure>,
        F: FnOnce(&T) -> Result<R, E> + Send + 'static,
    {
        let target = Arc::clone(&self.target);
        self.service.submit(move || invocation(&*target))
    }
}
