use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use rayon::ThreadPool;

use crate::core::async_mediation::errors::{AsyncError, TaskFailure};

pub(crate) type Callback<T> = Box<dyn FnOnce(Result<T, AsyncError>) + Send + 'static>;

enum Slot<T> {
    Pending(Option<Callback<T>>),
    Resolved(Result<T, AsyncError>),
    Consumed,
}

struct Shared<T> {
    slot: Mutex<Slot<T>>,
    resolved: Condvar,
}

impl<T> Shared<T> {
    fn lock(&self) -> MutexGuard<'_, Slot<T>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A handle on a result some worker will produce later.
///
/// A promise has exactly one consumer: it is used up by [`Promise::wait`],
/// [`Promise::then_apply`] or by joining it into a barrier.
pub struct Promise<T> {
    shared: Arc<Shared<T>>,
    pool: Arc<ThreadPool>,
}

/// The producing half of a [`Promise`]. Dropping it unresolved fails the
/// promise with [`AsyncError::Abandoned`].
pub(crate) struct Deferred<T> {
    shared: Arc<Shared<T>>,
    settled: bool,
}

pub(crate) fn pending<T>(pool: Arc<ThreadPool>) -> (Deferred<T>, Promise<T>) {
    let shared = Arc::new(Shared {
        slot: Mutex::new(Slot::Pending(None)),
        resolved: Condvar::new(),
    });

    (
        Deferred {
            shared: Arc::clone(&shared),
            settled: false,
        },
        Promise { shared, pool },
    )
}

impl<T> Deferred<T> {
    pub(crate) fn complete(mut self, result: Result<T, AsyncError>) {
        self.settle(result);
    }

    fn settle(&mut self, result: Result<T, AsyncError>) {
        self.settled = true;

        let mut slot = self.shared.lock();
        let callback = match &mut *slot {
            Slot::Pending(callback) => callback.take(),
            _ => return,
        };

        match callback {
            Some(callback) => {
                *slot = Slot::Consumed;
                drop(slot);
                callback(result);
            }
            None => {
                *slot = Slot::Resolved(result);
                drop(slot);
                self.shared.resolved.notify_all();
            }
        }
    }
}

impl<T> Drop for Deferred<T> {
    fn drop(&mut self) {
        if !self.settled {
            self.settle(Err(AsyncError::Abandoned));
        }
    }
}

impl<T: Send + 'static> Promise<T> {
    /// Blocks the calling thread until the result is available.
    pub fn wait(self) -> Result<T, AsyncError> {
        let mut slot = self.shared.lock();

        loop {
            match std::mem::replace(&mut *slot, Slot::Consumed) {
                Slot::Resolved(result) => return result,
                Slot::Consumed => return Err(AsyncError::Abandoned),
                pending @ Slot::Pending(_) => {
                    *slot = pending;
                    slot = self
                        .shared
                        .resolved
                        .wait(slot)
                        .unwrap_or_else(PoisonError::into_inner);
                }
            }
        }
    }

    /// Runs `continuation` on a pool thread once this promise succeeds. A
    /// failure of either this promise or the continuation fails the
    /// returned promise.
    pub fn then_apply<U, E, F>(self, continuation: F) -> Promise<U>
    where
        U: Send + 'static,
        E: Into<TaskFailure>,
        F: FnOnce(T) -> Result<U, E> + Send + 'static,
    {
        let (deferred, chained) = pending(Arc::clone(&self.pool));
        let pool = Arc::clone(&self.pool);

        self.on_complete(Box::new(move |result| match result {
            Ok(value) => pool.spawn(move || deferred.complete(run_guarded(|| continuation(value)))),
            Err(err) => deferred.complete(Err(err)),
        }));

        chained
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !matches!(*self.shared.lock(), Slot::Pending(_))
    }

    pub(crate) fn on_complete(self, callback: Callback<T>) {
        let mut slot = self.shared.lock();

        match std::mem::replace(&mut *slot, Slot::Consumed) {
            Slot::Pending(_) => *slot = Slot::Pending(Some(callback)),
            Slot::Resolved(result) => {
                drop(slot);
                callback(result);
            }
            Slot::Consumed => {
                drop(slot);
                callback(Err(AsyncError::Abandoned));
            }
        }
    }
}

/// Runs `task`, turning both its error and any panic into an [`AsyncError`].
pub(crate) fn run_guarded<R, E, F>(task: F) -> Result<R, AsyncError>
where
    E: Into<TaskFailure>,
    F: FnOnce() -> Result<R, E>,
{
    match panic::catch_unwind(AssertUnwindSafe(task)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(AsyncError::Failed(err.into())),
        Err(payload) => Err(AsyncError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
