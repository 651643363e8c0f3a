//! Repository tests against in-memory SQLite with the real migrations.
//!
//! Each test opens its own single-connection pool so databases never leak
//! between tests.


pub use harness::*;
