use std::future::Future;

use async_trait::async_trait;

use crate::error::{DbError, Result};
use crate::traits::Statement;
use crate::types::{ParameterColumns, Parameters};

/// Capability set of a live connection to a database backend.
///
/// A connection is owned by the caller that obtained it and must be closed
/// explicitly. Statements prepared against it are valid only while it stays
/// open. Concurrent use of one connection from multiple tasks is not
/// guaranteed safe by this layer; a driver that provides safety must
/// document it.
///
/// Whether `close` on an already-closed connection is an error or a no-op is
/// a driver choice, but every driver must document which (no-op is
/// recommended).
#[async_trait]
pub trait Connection: Send + Sync {
    type Statement: Statement;

    /// Prepare `sql` for repeated execution. May block on backend I/O.
    async fn prepare(&self, sql: &str) -> Result<Self::Statement> {
        let _ = sql;
        Err(DbError::not_implemented(
            "prepare",
            std::any::type_name::<Self>(),
        ))
    }

    /// Close the connection, invalidating statements prepared against it.
    async fn close(&self) -> Result<()> {
        Err(DbError::not_implemented(
            "close",
            std::any::type_name::<Self>(),
        ))
    }

    /// One-shot execution: prepare `sql` and execute it with `params`.
    ///
    /// This default composition is the contract; drivers may override it
    /// only with a faster path that preserves identical semantics.
    async fn execute(
        &self,
        sql: &str,
        params: Parameters<'_>,
    ) -> Result<<Self::Statement as Statement>::Cursor> {
        let statement = self.prepare(sql).await?;
        statement.execute(params).await
    }

    /// One-shot batch execution: prepare `sql` and run it once per batch row.
    async fn execute_many(&self, sql: &str, columns: &ParameterColumns) -> Result<()> {
        let statement = self.prepare(sql).await?;
        statement.execute_many(columns).await
    }
}

/// Prepares a statement against a connection acquired on demand.
///
/// `connect` is only invoked when this function runs, deferring connection
/// acquisition until the statement is actually needed. The connection is
/// returned alongside the statement because the statement is only valid
/// while it remains open; the caller decides when to close it.
pub async fn prepare_with<C, F, Fut>(connect: F, sql: &str) -> Result<(C, C::Statement)>
where
    C: Connection,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<C>>,
{
    let connection = connect().await?;
    let statement = connection.prepare(sql).await?;
    Ok((connection, statement))
}
