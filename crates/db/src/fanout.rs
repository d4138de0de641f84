//! Concurrent sub-queries joined with an all-or-nothing barrier.
//!
//! Each logical query runs on its own Tokio task against a clone of the
//! shared pool. Callers join the tasks with `tokio::try_join!`:
//!
//! ```ignore
//! let types = spawn_query("types", async move { ... });
//! let moves = spawn_query("moves", async move { ... });
//! let (types, moves) = tokio::try_join!(types.join(), moves.join())?;
//! ```
//!
//! The first failure completes the join with that single error. Tasks
//! still in flight are detached, not aborted; their results are dropped.

use std::future::Future;

use tokio::task::JoinHandle;

use crate::error::DbError;

/// A named sub-query running on its own task.
#[derive(Debug)]
pub struct QueryTask<T> {
    name: &'static str,
    handle: JoinHandle<Result<T, sqlx::Error>>,
}

/// Start `query` on a new task. `name` identifies it in errors and logs.
pub fn spawn_query<T, F>(name: &'static str, query: F) -> QueryTask<T>
where
    F: Future<Output = Result<T, sqlx::Error>> + Send + 'static,
    T: Send + 'static,
{
    QueryTask {
        name,
        handle: tokio::spawn(query),
    }
}

impl<T> QueryTask<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Wait for the task, tagging a failure with the query name.
    pub async fn join(self) -> Result<T, DbError> {
        let Self { name, handle } = self;
        match handle.await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(source)) => {
                tracing::debug!(query = name, error = %source, "Fan-out query failed");
                Err(DbError::Query {
                    query: name,
                    source,
                })
            }
            Err(source) => Err(DbError::Worker {
                query: name,
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn all_successes_are_returned_in_declaration_order() {
        let a = spawn_query("a", async { Ok::<_, sqlx::Error>(1) });
        let b = spawn_query("b", async { Ok::<_, sqlx::Error>("two") });
        let c = spawn_query("c", async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok::<_, sqlx::Error>(vec![3])
        });

        let (a, b, c) = tokio::try_join!(a.join(), b.join(), c.join()).unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, "two");
        assert_eq!(c, vec![3]);
    }

    #[tokio::test]
    async fn failure_names_the_failing_query() {
        let ok = spawn_query("abilities", async { Ok::<_, sqlx::Error>(()) });
        let failing = spawn_query("moves", async { Err::<(), _>(sqlx::Error::RowNotFound) });

        let err = tokio::try_join!(ok.join(), failing.join()).unwrap_err();
        assert_matches!(err, DbError::Query { query: "moves", .. });
    }

    #[tokio::test]
    async fn first_failure_does_not_wait_for_slow_queries() {
        let slow = spawn_query("slow", async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<_, sqlx::Error>(())
        });
        let failing = spawn_query("failing", async { Err::<(), _>(sqlx::Error::PoolTimedOut) });

        let joined = tokio::time::timeout(
            Duration::from_secs(5),
            async { tokio::try_join!(slow.join(), failing.join()) },
        )
        .await
        .expect("join should short-circuit on the first error");

        assert_matches!(joined, Err(DbError::Query { query: "failing", .. }));
    }

    #[tokio::test]
    async fn panicking_worker_is_reported() {
        let panicking = spawn_query("boom", async {
            if true {
                panic!("worker panicked");
            }
            Ok::<(), sqlx::Error>(())
        });

        assert_matches!(
            panicking.join().await,
            Err(DbError::Worker { query: "boom", .. })
        );
    }

    #[test]
    fn task_keeps_its_name() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let task = spawn_query("count", async { Ok::<_, sqlx::Error>(0_i64) });
            assert_eq!(task.name(), "count");
            assert_eq!(task.join().await.unwrap(), 0);
        });
    }
}
