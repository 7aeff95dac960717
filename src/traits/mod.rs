mod connection;
mod cursor;
mod driver;
mod statement;

pub use connection::{prepare_with, Connection};
pub use cursor::{Cursor, Row};
pub use driver::Driver;
pub use statement::Statement;
