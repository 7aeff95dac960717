use async_trait::async_trait;

use crate::error::{DbError, Result};
use crate::types::SqlValue;

/// Capability set of an execution result: an iterable sequence of rows.
///
/// A cursor may hold zero rows (DDL/DML) but is still a valid, iterable
/// sequence — `execute` never returns an absent result. Closing a cursor
/// invalidates further iteration.
#[async_trait]
pub trait Cursor: Send {
    type Row: Row;

    /// Advance to the next row; `Ok(None)` once the sequence is exhausted.
    /// Drivers choose whether rows are streamed lazily or materialized.
    async fn next_row(&mut self) -> Result<Option<Self::Row>> {
        Err(DbError::not_implemented(
            "next_row",
            std::any::type_name::<Self>(),
        ))
    }

    /// Close the cursor and release its backend resources.
    async fn close(&mut self) -> Result<()> {
        Err(DbError::not_implemented(
            "close",
            std::any::type_name::<Self>(),
        ))
    }

    /// Row id generated by the statement that produced this cursor.
    /// Optional; backends without the notion keep the fallback.
    fn last_row_id(&self) -> Result<i64> {
        Err(DbError::not_implemented(
            "last_row_id",
            std::any::type_name::<Self>(),
        ))
    }
}

/// One record within a cursor, addressable by column name or position.
///
/// Positions are zero-based throughout this crate. A row's lifetime is bound
/// to its cursor's materialization strategy, which is driver-defined.
pub trait Row {
    /// Look up a value by column name.
    fn get(&self, name: &str) -> Result<&SqlValue> {
        let _ = name;
        Err(DbError::not_implemented(
            "get",
            std::any::type_name::<Self>(),
        ))
    }

    /// Look up a value by zero-based column position.
    fn get_index(&self, position: usize) -> Result<&SqlValue> {
        let _ = position;
        Err(DbError::not_implemented(
            "get_index",
            std::any::type_name::<Self>(),
        ))
    }

    /// Number of columns in this row.
    fn column_count(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.column_count() == 0
    }
}
