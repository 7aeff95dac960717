use async_trait::async_trait;

use crate::error::{DbError, Result};
use crate::traits::Cursor;
use crate::types::{ParameterColumns, Parameters};

/// Capability set of a prepared statement.
///
/// A statement is reusable across executions with different parameter sets
/// and stays valid only while its originating connection is open. Executing
/// a closed statement is a driver-reported error.
#[async_trait]
pub trait Statement: Send + Sync {
    type Cursor: Cursor;

    /// Execute with a single parameter set. Always produces a cursor, even
    /// for statements returning no rows.
    async fn execute(&self, params: Parameters<'_>) -> Result<Self::Cursor> {
        let _ = params;
        Err(DbError::not_implemented(
            "execute",
            std::any::type_name::<Self>(),
        ))
    }

    /// Execute once per row of a column-oriented parameter batch.
    ///
    /// The provided implementation defines batch execution in terms of
    /// [`execute`](Statement::execute): an empty batch executes once with no
    /// parameters; otherwise the columns are validated up front (a length
    /// mismatch fails before any row runs) and each row is executed through
    /// a zero-copy [`RowView`](crate::types::RowView), in order. Per-row
    /// cursors are discarded. Drivers with a native bulk path may override
    /// this, preserving the same observable behavior.
    async fn execute_many(&self, columns: &ParameterColumns) -> Result<()> {
        if columns.is_empty() {
            self.execute(Parameters::empty()).await?;
            return Ok(());
        }
        let rows = columns.validate()?;
        for index in 0..rows {
            self.execute(Parameters::Row(columns.row(index))).await?;
        }
        Ok(())
    }

    /// Close the statement; it must not be executed afterwards. Close
    /// idempotency is a documented driver choice.
    async fn close(&self) -> Result<()> {
        Err(DbError::not_implemented(
            "close",
            std::any::type_name::<Self>(),
        ))
    }
}
