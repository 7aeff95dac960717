use async_trait::async_trait;

use crate::error::{DbError, Result};
use crate::traits::Connection;

/// Entry-point capability of a database driver: opening connections.
///
/// `target` is a backend-specific connection string; this layer does not
/// interpret it. The fallback implementation reports the operation as
/// unimplemented, naming the driver type.
#[async_trait]
pub trait Driver: Send + Sync {
    type Connection: Connection;

    /// Open a connection to the backend. May block on network I/O.
    async fn connect(&self, target: &str) -> Result<Self::Connection> {
        let _ = target;
        Err(DbError::not_implemented(
            "connect",
            std::any::type_name::<Self>(),
        ))
    }
}
