//! Single-worker FIFO queue for mutating operations.
//!
//! Each [`RowStore`](crate::RowStore) owns one [`TaskSerializer`]. Jobs are
//! sent over an unbounded channel to a dedicated tokio task that awaits them
//! one at a time, so a job's load/validate/save cycle never interleaves with
//! another's. A job keeps running even if its caller stops waiting.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;

use futures::FutureExt;
use tokio::sync::{mpsc, oneshot};

use crate::error::{StoreError, StoreResult};

type Job = Pin<Box<dyn Future<Output = ()> + Send>>;

pub struct TaskSerializer {
    sender: mpsc::UnboundedSender<Job>,
}

impl TaskSerializer {
    /// Spawn the worker task. Must be called from within a tokio runtime.
    ///
    /// The worker stops once the serializer is dropped and every queued job
    /// has finished.
    pub fn start() -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Job>();
        tokio::spawn(async move {
            while let Some(job) = receiver.recv().await {
                job.await;
            }
            tracing::debug!("Mutation queue closed, worker stopping");
        });
        Self { sender }
    }

    /// Run `task` after every previously queued task has settled and return
    /// its own outcome.
    ///
    /// A failing task only fails its caller. A panicking task is caught and
    /// reported as [`StoreError::TaskPanicked`]; the queue keeps going.
    pub async fn run_exclusive<T, F>(&self, task: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: Future<Output = StoreResult<T>> + Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        let job: Job = Box::pin(async move {
            let outcome = match AssertUnwindSafe(task).catch_unwind().await {
                Ok(result) => result,
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    tracing::error!(panic = %message, "Queued task panicked");
                    Err(StoreError::TaskPanicked(message))
                }
            };
            // The caller may have gone away; the work is done either way.
            let _ = reply_tx.send(outcome);
        });

        self.sender
            .send(job)
            .map_err(|_| StoreError::SerializerClosed)?;
        reply_rx.await.map_err(|_| StoreError::SerializerClosed)?
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use assert_matches::assert_matches;
    use landing_core::error::{CoreError, ErrorCode};

    #[tokio::test]
    async fn tasks_run_in_submission_order_without_overlap() {
        let serializer = TaskSerializer::start();
        let log = Arc::new(Mutex::new(Vec::new()));

        let task = |n: u32, delay_ms: u64| {
            let log = Arc::clone(&log);
            async move {
                log.lock().unwrap().push(format!("start {n}"));
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                log.lock().unwrap().push(format!("end {n}"));
                Ok::<_, StoreError>(n)
            }
        };

        // join_all polls in order, so submission order is 1, 2, 3.
        let results = futures::future::join_all(vec![
            serializer.run_exclusive(task(1, 30)),
            serializer.run_exclusive(task(2, 0)),
            serializer.run_exclusive(task(3, 10)),
        ])
        .await;

        let values: Vec<u32> = results.into_iter().map(Result::unwrap).collect();
        assert_eq!(values, [1, 2, 3]);
        assert_eq!(
            *log.lock().unwrap(),
            ["start 1", "end 1", "start 2", "end 2", "start 3", "end 3"]
        );
    }

    #[tokio::test]
    async fn failed_task_does_not_block_the_queue() {
        let serializer = TaskSerializer::start();

        let failed = serializer
            .run_exclusive(async {
                Err::<(), _>(StoreError::Core(CoreError::rejected(
                    ErrorCode::CardsMin,
                    "no cards",
                )))
            })
            .await;
        assert_matches!(failed, Err(StoreError::Core(_)));

        let next = serializer.run_exclusive(async { Ok(7) }).await;
        assert_eq!(next.unwrap(), 7);
    }

    #[tokio::test]
    async fn panicking_task_is_reported_and_queue_continues() {
        let serializer = TaskSerializer::start();

        let panicked = serializer
            .run_exclusive(async {
                if true {
                    panic!("boom");
                }
                Ok(())
            })
            .await;
        assert_matches!(panicked, Err(StoreError::TaskPanicked(msg)) if msg == "boom");

        let next = serializer.run_exclusive(async { Ok("still alive") }).await;
        assert_eq!(next.unwrap(), "still alive");
    }

    #[tokio::test]
    async fn abandoned_task_still_runs_to_completion() {
        let serializer = TaskSerializer::start();
        let done = Arc::new(Mutex::new(false));

        let flag = Arc::clone(&done);
        let waiting = serializer.run_exclusive(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            *flag.lock().unwrap() = true;
            Ok(())
        });
        // Poll once so the job is queued, then drop the caller.
        let _ = tokio::time::timeout(Duration::from_millis(1), waiting).await;

        serializer.run_exclusive(async { Ok(()) }).await.unwrap();
        assert!(*done.lock().unwrap());
    }
}
