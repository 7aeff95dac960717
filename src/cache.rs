use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::Result;
use crate::traits::{Connection, Statement};

/// Keyed cache of prepared statements.
///
/// The cache is an explicitly owned object, typically held by the
/// application's top-level context, mapping caller-chosen keys to shared
/// prepared statements. Entries persist for the cache's lifetime: there is
/// no eviction and no invalidation when a connection closes. Reusing a
/// cached statement after its underlying connection has been closed is a
/// caller error.
///
/// The connection acquired on a miss is dropped after preparing, not
/// closed; drivers whose statements need a live handle keep one inside the
/// statement itself.
pub struct StatementCache<S> {
    entries: Mutex<HashMap<String, Arc<S>>>,
}

impl<S: Statement> StatementCache<S> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the statement cached under `key`, preparing it on first
    /// access.
    ///
    /// `connect` supplies a connection and is invoked only on a miss, so
    /// connection acquisition is deferred until a statement is actually
    /// needed. The lock is held across the miss path: concurrent first
    /// accesses on one key perform exactly one `prepare`, and every caller
    /// receives the same `Arc`.
    pub async fn get_or_prepare<C, F, Fut>(
        &self,
        key: &str,
        connect: F,
        sql: &str,
    ) -> Result<Arc<S>>
    where
        C: Connection<Statement = S>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<C>>,
    {
        let mut entries = self.entries.lock().await;
        if let Some(statement) = entries.get(key) {
            return Ok(Arc::clone(statement));
        }
        let connection = connect().await?;
        let statement = Arc::new(connection.prepare(sql).await?);
        entries.insert(key.to_string(), Arc::clone(&statement));
        Ok(statement)
    }

    /// Number of cached statements.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

impl<S: Statement> Default for StatementCache<S> {
    fn default() -> Self {
        Self::new()
    }
}
