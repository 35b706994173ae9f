/*
[INPUT]:  Task specs, a shared read-only session, an operation runner
[OUTPUT]: Outcomes of awaited tasks, handles of detached tasks
[POS]:    Dispatch layer - concurrent execution of independent operations
[UPDATE]: When changing spawn/join semantics
*/

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::auth::Session;
use crate::http::DeribitError;

use super::plan::{JoinPolicy, TaskOutcome, TaskSpec};
use super::runner::OperationRunner;

/// A task the dispatcher did not wait for
#[derive(Debug)]
pub struct DetachedTask {
    pub label: String,
    pub method: &'static str,
    /// Dropping the handle leaves the task running.
    pub handle: JoinHandle<()>,
}

#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Awaited tasks, in the order they were specified
    pub joined: Vec<TaskOutcome>,
    pub detached: Vec<DetachedTask>,
}

impl DispatchReport {
    pub fn failures(&self) -> impl Iterator<Item = &TaskOutcome> {
        self.joined.iter().filter(|outcome| outcome.result.is_err())
    }

    pub fn pending_detached(&self) -> usize {
        self.detached
            .iter()
            .filter(|task| !task.handle.is_finished())
            .count()
    }
}

/// Runs task specs as parallel tokio tasks sharing one session
#[derive(Debug)]
pub struct Dispatcher<R: ?Sized> {
    runner: Arc<R>,
}

impl<R: ?Sized> Clone for Dispatcher<R> {
    fn clone(&self) -> Self {
        Self {
            runner: Arc::clone(&self.runner),
        }
    }
}

impl<R> Dispatcher<R>
where
    R: OperationRunner + ?Sized + 'static,
{
    pub fn new(runner: Arc<R>) -> Self {
        Self { runner }
    }

    /// Spawn every spec, then wait only for the `JoinPolicy::Await` ones.
    ///
    /// Detached tasks may still be running when this returns; they log
    /// their own outcome since nobody observes it.
    pub async fn run_parallel(&self, session: Arc<Session>, specs: Vec<TaskSpec>) -> DispatchReport {
        let mut awaited = Vec::new();
        let mut report = DispatchReport::default();

        for TaskSpec {
            label,
            operation,
            policy,
        } in specs
        {
            let runner = Arc::clone(&self.runner);
            let session = Arc::clone(&session);
            let method = operation.method();

            match policy {
                JoinPolicy::Await => {
                    let handle =
                        tokio::spawn(async move { runner.run(&session, &operation).await });
                    awaited.push((label, method, handle));
                }
                JoinPolicy::Detach => {
                    tracing::warn!(
                        task = %label,
                        method,
                        "task detached; its outcome will not be returned to the caller"
                    );
                    let task_label = label.clone();
                    let handle = tokio::spawn(async move {
                        match runner.run(&session, &operation).await {
                            Ok(reply) => tracing::info!(
                                task = %task_label,
                                method,
                                latency_ms = reply.latency.as_secs_f64() * 1000.0,
                                "detached task finished"
                            ),
                            Err(err) => tracing::warn!(
                                task = %task_label,
                                method,
                                kind = err.kind().as_str(),
                                error = %err,
                                "detached task failed"
                            ),
                        }
                    });
                    report.detached.push(DetachedTask {
                        label,
                        method,
                        handle,
                    });
                }
            }
        }

        for (label, method, handle) in awaited {
            let result = match handle.await {
                Ok(result) => result,
                Err(join_err) if join_err.is_panic() => Err(DeribitError::TaskJoin(format!(
                    "task panicked task={label}: {join_err}"
                ))),
                Err(join_err) => Err(DeribitError::TaskJoin(format!(
                    "task join error task={label}: {join_err}"
                ))),
            };
            report.joined.push(TaskOutcome {
                label,
                method,
                result,
            });
        }

        tracing::debug!(
            joined = report.joined.len(),
            detached = report.detached.len(),
            "parallel dispatch returned"
        );
        report
    }
}
