//! dbapi - a driver-agnostic database client protocol
//!
//! This crate defines the contract that concrete database drivers implement
//! so application code can connect, prepare statements, execute queries and
//! iterate results uniformly across backends. It ships no network code and
//! no SQL dialect; drivers supply those. What it does ship: the capability
//! traits ([`Driver`], [`Connection`], [`Statement`], [`Cursor`], [`Row`]),
//! default compositions (one-shot `execute`, generic batch `execute_many`
//! over a zero-copy column view), a keyed [`StatementCache`], and a fixed
//! error taxonomy every driver maps into.
//!
//! # Example
//! ```ignore
//! use dbapi::{Connection, Cursor, Parameters, Row, SqlValue};
//!
//! // `conn` is any type implementing dbapi::Connection.
//! let stmt = conn.prepare("SELECT id, name FROM users WHERE id = $1").await?;
//! let mut cursor = stmt.execute(Parameters::Positional(&[SqlValue::Int32(1)])).await?;
//! while let Some(row) = cursor.next_row().await? {
//!     let id = row.get("id")?;
//!     let name = row.get_index(1)?;
//! }
//! cursor.close().await?;
//! stmt.close().await?;
//! conn.close().await?;
//! ```

pub mod drivers;
pub mod error;
pub mod traits;
pub mod types;

mod cache;

// Re-export main types for convenient access
pub use cache::StatementCache;
pub use error::{DbError, Result, Warning};
pub use traits::{prepare_with, Connection, Cursor, Driver, Row, Statement};
pub use types::{ParameterColumns, Parameters, RowView, SqlValue};
