use crate::{common::PayloadError, row::Row};

/// Opens one fresh database session per cycle.
#[allow(async_fn_in_trait)]
pub trait Connector {
    type Session: Session;

    /// # Errors
    ///
    /// When the database cannot be reached or rejects the credentials.
    async fn connect(&self) -> Result<Self::Session, PayloadError>;
}

/// A live connection with autocommit enabled. Every statement is durable
/// once the call returns.
#[allow(async_fn_in_trait)]
pub trait Session {
    /// Creates the target table unless it already exists.
    ///
    /// # Errors
    ///
    /// On statement failure.
    async fn ensure_table(&mut self, table: &str) -> Result<(), PayloadError>;

    /// # Errors
    ///
    /// On statement failure.
    async fn insert(&mut self, table: &str, data: &str) -> Result<(), PayloadError>;

    /// Deletes every row of the table, returning how many went away.
    ///
    /// # Errors
    ///
    /// On statement failure.
    async fn delete_all(&mut self, table: &str) -> Result<u64, PayloadError>;

    /// All rows of the table in `id` order.
    ///
    /// # Errors
    ///
    /// On statement failure.
    async fn rows(&mut self, table: &str) -> Result<Vec<Row>, PayloadError>;

    /// # Errors
    ///
    /// When the connection does not shut down cleanly.
    async fn close(self) -> Result<(), PayloadError>;
}
