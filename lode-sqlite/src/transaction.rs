use crate::Connection;
use lode_core::{Result, TransactionType};
use std::ops::Deref;

/// An open transaction on a [`Connection`].
///
/// Ends with [`Transaction::commit`] or [`Transaction::rollback`]. Dropping it
/// unfinished rolls it back. Statements are prepared on the transaction itself, it
/// dereferences to the connection.
pub struct Transaction<'c> {
    connection: &'c Connection,
    finished: bool,
}

impl<'c> Transaction<'c> {
    pub fn new(connection: &'c Connection, kind: TransactionType) -> Result<Self> {
        connection.begin_transaction(kind)?;
        Ok(Self {
            connection,
            finished: false,
        })
    }

    /// On failure the transaction is still open and gets rolled back as the guard drops.
    pub fn commit(mut self) -> Result<()> {
        self.connection.commit()?;
        self.finished = true;
        Ok(())
    }

    pub fn rollback(mut self) -> Result<()> {
        self.connection.rollback()?;
        self.finished = true;
        Ok(())
    }
}

impl Deref for Transaction<'_> {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        self.connection
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        log::warn!("Transaction dropped without commit or rollback, rolling back");
        if let Err(error) = self.connection.rollback() {
            log::error!("{:#}", error);
        }
    }
}
