//! Database layer for the academic records API.
//!
//! Provides SQLite connection pooling (via `r2d2`), WAL-mode
//! initialization, and embedded SQL migrations. Every table in the
//! system is created through versioned migrations managed by this
//! crate, and the fixed seed rows are inserted by a migration as well.
//!
//! # Design decisions
//!
//! - **SQLite with WAL mode**: a single-file store with no external
//!   database process. WAL mode allows concurrent readers with a single
//!   writer, which matches the one-connection-per-request access
//!   pattern of this service.
//! - **`r2d2` connection pool**: bounded connection reuse with scoped
//!   acquisition and guaranteed release on every path.
//! - **Embedded migrations**: SQL files are compiled into the binary
//!   via `include_str!`, so schema and seed data ship with the server
//!   and cannot drift from the code that depends on them.

mod migrations;
mod pool;

pub use migrations::{initialize, run_migrations, MigrationError};
pub use pool::{create_pool, DbPool, DbRuntimeSettings, PoolError};
