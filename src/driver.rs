use std::{convert::Infallible, io::Write};

use log::debug;

use crate::{
    backend::{Connector, Session},
    common::PayloadError,
    config::Config,
    row::payload_for,
};

/// Drives the connect -> ensure schema -> burst -> clear -> disconnect cycle.
///
/// Console announcements go to `out`; diagnostics go through `log`.
pub struct LoopDriver<C, W> {
    config: Config,
    connector: C,
    out: W,
}

impl<C: Connector, W: Write> LoopDriver<C, W> {
    #[must_use]
    pub const fn new(config: Config, connector: C, out: W) -> Self {
        Self {
            config,
            connector,
            out,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn output(&self) -> &W {
        &self.out
    }

    /// Repeats cycles until one of them fails.
    ///
    /// # Errors
    ///
    /// The first connection, statement or console failure. There is no retry.
    pub async fn run(&mut self) -> Result<Infallible, PayloadError> {
        loop {
            self.run_cycle().await?;
        }
    }

    /// # Errors
    ///
    /// See [`LoopDriver::run`].
    pub async fn run_cycle(&mut self) -> Result<(), PayloadError> {
        let mut session = self.connector.connect().await?;

        self.ensure_schema(&mut session).await?;
        self.insert_burst(&mut session).await?;
        self.clear(&mut session).await?;

        session.close().await?;

        writeln!(self.out, "[LOOP] Restarting...")?;
        self.out.flush()?;
        Ok(())
    }

    /// # Errors
    ///
    /// On statement failure.
    pub async fn ensure_schema(&mut self, session: &mut C::Session) -> Result<(), PayloadError> {
        session.ensure_table(&self.config.table).await
    }

    /// Inserts `batch_size` rows, pausing one interval between two inserts.
    ///
    /// # Errors
    ///
    /// On statement or console failure.
    pub async fn insert_burst(&mut self, session: &mut C::Session) -> Result<(), PayloadError> {
        let batch_size = self.config.batch_size;

        writeln!(
            self.out,
            "\n[INFO] Inserting {} records (one every {} ms)...",
            batch_size,
            self.config.interval.as_millis()
        )?;

        for index in 0..batch_size {
            if index > 0 {
                tokio::time::sleep(self.config.interval).await;
            }

            let data = payload_for(index);
            session.insert(&self.config.table, &data).await?;
            writeln!(self.out, "[INSERT] {data}")?;
            self.out.flush()?;
        }

        Ok(())
    }

    /// Deletes every row of the table, not only the ones this burst wrote.
    ///
    /// # Errors
    ///
    /// On statement or console failure.
    pub async fn clear(&mut self, session: &mut C::Session) -> Result<u64, PayloadError> {
        writeln!(self.out, "\n[INFO] Deleting all records...")?;
        let deleted = session.delete_all(&self.config.table).await?;
        debug!("Deleted {deleted} rows from {}", self.config.table);
        Ok(deleted)
    }
}
