//! Smoke test for the task runtime: spawn a bunch of tasks that each bump a
//! shared atomic counter once, join them all, and check nothing was lost.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::debug;
use tokio::task::JoinError;

/// Number of tasks launched when no count is given on the command line.
pub const DEFAULT_TASKS: i64 = 4;

/// Task count from the first command-line argument, if any.
pub fn task_count(arg: Option<&str>) -> Result<i64, std::num::ParseIntError> {
    match arg {
        Some(s) => s.parse(),
        None => Ok(DEFAULT_TASKS),
    }
}

/// Spawns `count` tasks, each performing one atomic increment on a shared
/// counter, then joins them all and returns the final counter value.
///
/// Counts of zero or less launch nothing and return 0. The tasks complete in
/// no particular order; only the final value is meaningful, and it is read
/// strictly after every task has been joined.
pub async fn spawn_and_count(count: i64) -> Result<u64, JoinError> {
    let counter = Arc::new(AtomicU64::new(0));
    let mut handles = Vec::new();

    for i in 0..count.max(0) {
        let n = counter.clone();
        let t = tokio::spawn(async move {
            n.fetch_add(1, Ordering::SeqCst);
            debug!("task {} done", i);
        });

        handles.push(t);
    }

    for t in handles {
        t.await?;
    }

    Ok(counter.load(Ordering::SeqCst))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_parsing() {
        assert_eq!(task_count(None).unwrap(), DEFAULT_TASKS);
        assert_eq!(task_count(Some("12")).unwrap(), 12);
        assert_eq!(task_count(Some("-3")).unwrap(), -3);
        assert!(task_count(Some("twelve")).is_err());
    }

    #[tokio::test]
    async fn counts_each_task_once() {
        for n in &[1i64, 2, 7, 64] {
            assert_eq!(spawn_and_count(*n).await.unwrap(), *n as u64);
        }
    }

    #[tokio::test]
    async fn zero_tasks_leave_counter_at_zero() {
        assert_eq!(spawn_and_count(0).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn negative_count_launches_nothing() {
        assert_eq!(spawn_and_count(-5).await.unwrap(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn no_lost_updates_under_parallel_load() {
        for _ in 0..10 {
            assert_eq!(spawn_and_count(10_000).await.unwrap(), 10_000);
        }
    }
}
