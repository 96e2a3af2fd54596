//! Behavioural tests for the shared pool lifecycle.

use std::sync::Arc;
use std::time::Duration;

use backend::domain::ports::{ConnectionPool, PoolError, PoolStatus};
use backend::domain::{Database, PoolState, StartupError};
use backend::test_support::InMemoryPool;
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn failed_startup_leaves_no_connections() {
    let pool = InMemoryPool::unreachable(4);
    let database = Database::new(Arc::new(pool.clone()));

    let err = database.start().await.expect_err("startup fails");

    assert!(matches!(err, StartupError::ConnectivityCheck { .. }));
    assert_eq!(database.state(), PoolState::FailedStartup);
    assert!(pool.is_closed());
    assert_eq!(database.status(), PoolStatus::default());
}

#[rstest]
#[tokio::test]
async fn shutdown_closes_pool_exactly_once() {
    let pool = InMemoryPool::new(4);
    let database = Database::new(Arc::new(pool.clone()));
    database.start().await.expect("startup succeeds");
    let clone = database.clone();

    database.close();
    clone.close();

    assert!(pool.is_closed());
    assert_eq!(clone.state(), PoolState::Closed);
    assert_eq!(pool.status().connections, 0);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn cancelled_unit_of_work_returns_connection() {
    let pool = InMemoryPool::new(2);
    let database = Database::new(Arc::new(pool.clone()));
    database.start().await.expect("startup succeeds");
    let before = database.status();

    let work = async {
        let _cursor = database.cursor().await?;
        std::future::pending::<()>().await;
        Ok::<(), PoolError>(())
    };
    let outcome = tokio::time::timeout(Duration::from_secs(1), work).await;

    assert!(outcome.is_err(), "work should time out");
    assert_eq!(database.status(), before);
}

#[rstest]
#[tokio::test]
async fn cursor_held_past_close_is_discarded_on_drop() {
    let pool = InMemoryPool::new(2);
    let database = Database::new(Arc::new(pool.clone()));
    database.start().await.expect("startup succeeds");

    let cursor = database.cursor().await.expect("checkout succeeds");
    database.close();
    assert_eq!(pool.status().connections, 1);

    drop(cursor);
    assert_eq!(pool.status(), PoolStatus::default());
}
