mod in_memory;

pub use self::in_memory::{
    InMemoryConnection, InMemoryCursor, InMemoryDriver, InMemoryRow, InMemoryStatement,
    RecordedExec, ResponseBuilder, ResultTable,
};
