use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{DbError, Result, Warning};
use crate::traits::{Connection, Cursor, Driver, Row, Statement};
use crate::types::{Parameters, SqlValue};

/// A recorded statement execution for verification.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedExec {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

/// Result table returned by the in-memory driver for one execution.
#[derive(Debug, Clone)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<SqlValue>>,
    pub last_row_id: Option<i64>,
    pub warnings: Vec<Warning>,
}

impl ResultTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<SqlValue>>) -> Self {
        Self {
            columns,
            rows,
            last_row_id: None,
            warnings: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

// State shared by the driver and everything it hands out, so tests can
// inspect activity through the driver handle they kept.
#[derive(Debug)]
struct Shared {
    responses: Mutex<VecDeque<ResultTable>>,
    recorded: Mutex<Vec<RecordedExec>>,
    prepared: Mutex<Vec<String>>,
    default_response: Mutex<ResultTable>,
    connects: AtomicUsize,
}

/// An in-memory database driver implementing the full client contract.
///
/// Executions consume pre-configured responses in FIFO order and every
/// prepare/execute is recorded for verification, making this the reference
/// driver for contract tests. Closing any already-closed resource is a
/// no-op here (each driver must document its choice; this one picks no-op).
///
/// # Example
/// ```
/// use dbapi::drivers::{InMemoryDriver, ResponseBuilder};
/// use dbapi::SqlValue;
///
/// let driver = InMemoryDriver::new().with_response(
///     ResponseBuilder::new()
///         .columns(&["id", "name"])
///         .row(vec![SqlValue::Int32(1), SqlValue::from("Alice")])
///         .build(),
/// );
/// ```
pub struct InMemoryDriver {
    shared: Arc<Shared>,
}

impl InMemoryDriver {
    /// Create a new in-memory driver with no pre-configured responses.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                responses: Mutex::new(VecDeque::new()),
                recorded: Mutex::new(Vec::new()),
                prepared: Mutex::new(Vec::new()),
                default_response: Mutex::new(ResultTable::empty()),
                connects: AtomicUsize::new(0),
            }),
        }
    }

    /// Add a response to be returned by the next execution.
    /// Responses are consumed in FIFO order.
    pub fn with_response(self, response: ResultTable) -> Self {
        self.shared.responses.lock().unwrap().push_back(response);
        self
    }

    /// Add multiple responses to be returned by subsequent executions.
    pub fn with_responses(self, responses: impl IntoIterator<Item = ResultTable>) -> Self {
        let mut queue = self.shared.responses.lock().unwrap();
        for response in responses {
            queue.push_back(response);
        }
        drop(queue);
        self
    }

    /// Set a default response to use when no queued responses remain.
    pub fn with_default_response(self, response: ResultTable) -> Self {
        *self.shared.default_response.lock().unwrap() = response;
        self
    }

    /// All recorded executions, in order.
    pub fn recorded_execs(&self) -> Vec<RecordedExec> {
        self.shared.recorded.lock().unwrap().clone()
    }

    /// The most recent recorded execution, if any.
    pub fn last_exec(&self) -> Option<RecordedExec> {
        self.shared.recorded.lock().unwrap().last().cloned()
    }

    /// SQL texts passed to `prepare`, in order.
    pub fn prepared_sql(&self) -> Vec<String> {
        self.shared.prepared.lock().unwrap().clone()
    }

    /// Number of `prepare` calls made through this driver.
    pub fn prepare_count(&self) -> usize {
        self.shared.prepared.lock().unwrap().len()
    }

    /// Number of connections opened through this driver.
    pub fn connect_count(&self) -> usize {
        self.shared.connects.load(Ordering::SeqCst)
    }

    /// Clear all recorded executions and prepares.
    pub fn clear_recorded(&self) {
        self.shared.recorded.lock().unwrap().clear();
        self.shared.prepared.lock().unwrap().clear();
    }

    /// Assert that the last execution matches the expected SQL and parameters.
    pub fn assert_last_exec(&self, expected_sql: &str, expected_params: &[SqlValue]) {
        let last = self.last_exec().expect("no executions were recorded");
        assert_eq!(
            last.sql, expected_sql,
            "SQL mismatch.\nExpected: {}\nActual: {}",
            expected_sql, last.sql
        );
        assert_eq!(
            last.params, expected_params,
            "Parameters mismatch.\nExpected: {:?}\nActual: {:?}",
            expected_params, last.params
        );
    }

    /// Assert that exactly n executions happened.
    pub fn assert_exec_count(&self, expected: usize) {
        let actual = self.shared.recorded.lock().unwrap().len();
        assert_eq!(
            actual, expected,
            "Execution count mismatch. Expected: {}, Actual: {}",
            expected, actual
        );
    }
}

impl Default for InMemoryDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Driver for InMemoryDriver {
    type Connection = InMemoryConnection;

    async fn connect(&self, _target: &str) -> Result<InMemoryConnection> {
        self.shared.connects.fetch_add(1, Ordering::SeqCst);
        Ok(InMemoryConnection {
            shared: Arc::clone(&self.shared),
            closed: AtomicBool::new(false),
        })
    }
}

/// Connection handed out by [`InMemoryDriver`].
pub struct InMemoryConnection {
    shared: Arc<Shared>,
    closed: AtomicBool,
}

#[async_trait]
impl Connection for InMemoryConnection {
    type Statement = InMemoryStatement;

    async fn prepare(&self, sql: &str) -> Result<InMemoryStatement> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(DbError::Driver("connection is closed".to_string()));
        }
        self.shared.prepared.lock().unwrap().push(sql.to_string());
        Ok(InMemoryStatement {
            shared: Arc::clone(&self.shared),
            sql: sql.to_string(),
            closed: AtomicBool::new(false),
        })
    }

    async fn close(&self) -> Result<()> {
        // No-op when already closed.
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Prepared statement handed out by [`InMemoryConnection`]. Holds its own
/// handle to the driver state, so it stays executable for as long as tests
/// need it.
#[derive(Debug)]
pub struct InMemoryStatement {
    shared: Arc<Shared>,
    sql: String,
    closed: AtomicBool,
}

impl InMemoryStatement {
    pub fn sql(&self) -> &str {
        &self.sql
    }
}

#[async_trait]
impl Statement for InMemoryStatement {
    type Cursor = InMemoryCursor;

    async fn execute(&self, params: Parameters<'_>) -> Result<InMemoryCursor> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(DbError::Driver("statement is closed".to_string()));
        }

        // Record the execution
        self.shared.recorded.lock().unwrap().push(RecordedExec {
            sql: self.sql.clone(),
            params: params.to_vec(),
        });

        // Return next queued response or the default
        let response = self
            .shared
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.shared.default_response.lock().unwrap().clone());

        Ok(InMemoryCursor::from_table(response))
    }

    async fn close(&self) -> Result<()> {
        // No-op when already closed.
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Cursor over a [`ResultTable`]. Rows are materialized up front and popped
/// as iteration advances.
#[derive(Debug)]
pub struct InMemoryCursor {
    columns: Arc<Vec<String>>,
    rows: VecDeque<Vec<SqlValue>>,
    last_row_id: Option<i64>,
    warnings: Vec<Warning>,
    closed: bool,
}

impl InMemoryCursor {
    fn from_table(table: ResultTable) -> Self {
        Self {
            columns: Arc::new(table.columns),
            rows: table.rows.into(),
            last_row_id: table.last_row_id,
            warnings: table.warnings,
            closed: false,
        }
    }

    /// Advisory warnings attached to this result.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}

#[async_trait]
impl Cursor for InMemoryCursor {
    type Row = InMemoryRow;

    async fn next_row(&mut self) -> Result<Option<InMemoryRow>> {
        if self.closed {
            return Err(DbError::Driver("cursor is closed".to_string()));
        }
        Ok(self.rows.pop_front().map(|values| InMemoryRow {
            columns: Arc::clone(&self.columns),
            values,
        }))
    }

    async fn close(&mut self) -> Result<()> {
        // No-op when already closed.
        self.closed = true;
        self.rows.clear();
        Ok(())
    }

    fn last_row_id(&self) -> Result<i64> {
        self.last_row_id.ok_or_else(|| {
            DbError::not_implemented("last_row_id", std::any::type_name::<Self>())
        })
    }
}

/// Row yielded by [`InMemoryCursor`]; positions are zero-based.
#[derive(Debug, Clone)]
pub struct InMemoryRow {
    columns: Arc<Vec<String>>,
    values: Vec<SqlValue>,
}

impl Row for InMemoryRow {
    fn get(&self, name: &str) -> Result<&SqlValue> {
        self.columns
            .iter()
            .position(|column| column == name)
            .and_then(|position| self.values.get(position))
            .ok_or_else(|| DbError::ColumnNotFound(name.to_string()))
    }

    fn get_index(&self, position: usize) -> Result<&SqlValue> {
        self.values.get(position).ok_or(DbError::PositionOutOfRange {
            position,
            columns: self.values.len(),
        })
    }

    fn column_count(&self) -> usize {
        self.values.len()
    }
}

/// Builder for creating result tables easily.
pub struct ResponseBuilder {
    columns: Vec<String>,
    rows: Vec<Vec<SqlValue>>,
    last_row_id: Option<i64>,
    warnings: Vec<Warning>,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            last_row_id: None,
            warnings: Vec::new(),
        }
    }

    /// Set the column names for the response.
    pub fn columns(mut self, cols: &[&str]) -> Self {
        self.columns = cols.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Add a row of values.
    pub fn row(mut self, values: Vec<SqlValue>) -> Self {
        self.rows.push(values);
        self
    }

    /// Attach a generated row id to the response.
    pub fn last_row_id(mut self, id: i64) -> Self {
        self.last_row_id = Some(id);
        self
    }

    /// Attach an advisory warning to the response.
    pub fn warning(mut self, message: impl Into<String>) -> Self {
        self.warnings.push(Warning::new(message));
        self
    }

    /// Build the ResultTable.
    pub fn build(self) -> ResultTable {
        ResultTable {
            columns: self.columns,
            rows: self.rows,
            last_row_id: self.last_row_id,
            warnings: self.warnings,
        }
    }
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}
