//! PostgreSQL persistence adapters using Diesel.
//!
//! Connections are managed via `bb8` pools with async integration through
//! `diesel-async`. Driver errors never cross this boundary; they are mapped
//! to the domain [`PoolError`](crate::domain::ports::PoolError).
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DieselPool, PoolConfig};
//!
//! let pool = DieselPool::connect_lazy(&PoolConfig::new("postgres://localhost/mydb"))?;
//! let database = Database::new(Arc::new(pool));
//! ```

mod pool;
mod probe;

pub use pool::{DieselPool, PoolConfig};
pub use probe::DsnConnectivityCheck;
