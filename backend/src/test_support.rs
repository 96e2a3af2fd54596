//! Test doubles shared by unit tests (in `src/`) and integration tests (in
//! `tests/`).
//!
//! Compiled for `cfg(test)` and behind the `test-support` feature.

pub mod clock;
pub mod pool;
pub mod probe;

pub use clock::FixtureClock;
pub use pool::InMemoryPool;
pub use probe::{RecordingSleeper, ScriptedConnectivityCheck};
