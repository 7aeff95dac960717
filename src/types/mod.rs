mod params;
mod sql_value;

pub use params::{ParameterColumns, Parameters, RowView};
pub use sql_value::SqlValue;
