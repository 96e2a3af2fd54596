//! Domain ports and supporting types for the hexagonal boundary.

mod connection_pool;
mod connectivity_check;

pub use connection_pool::{
    ConnectionPool, Cursor, PoolError, PoolErrorKind, PoolStatus, PooledCursor,
};
#[cfg(test)]
pub use connectivity_check::MockConnectivityCheck;
pub use connectivity_check::{ConnectivityCheck, ProbeSleeper, TokioSleeper};
