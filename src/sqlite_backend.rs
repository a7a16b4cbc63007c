use std::path::PathBuf;

use log::{debug, info};
use sqlite::{Connection, State};

use crate::{
    backend::{Connector, Session},
    common::PayloadError,
    row::Row,
};

pub struct SqliteConnector {
    path: PathBuf,
}

impl SqliteConnector {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Connector for SqliteConnector {
    type Session = SqliteSession;

    async fn connect(&self) -> Result<SqliteSession, PayloadError> {
        info!("Opening sqlite database {:?}", self.path);
        let conn = sqlite::open(&self.path)?;
        Ok(SqliteSession { conn })
    }
}

/// SQLite runs in autocommit mode unless a transaction is opened explicitly,
/// which this session never does.
pub struct SqliteSession {
    conn: Connection,
}

fn quote(table: &str) -> String {
    format!("\"{table}\"")
}

#[must_use]
pub fn create_table_sql(table: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {} (id INTEGER PRIMARY KEY AUTOINCREMENT, data VARCHAR(255))",
        quote(table)
    )
}

impl Session for SqliteSession {
    async fn ensure_table(&mut self, table: &str) -> Result<(), PayloadError> {
        self.conn.execute(create_table_sql(table))?;
        debug!("Table {table} ready");
        Ok(())
    }

    async fn insert(&mut self, table: &str, data: &str) -> Result<(), PayloadError> {
        let sql = format!("INSERT INTO {} (data) VALUES (?)", quote(table));
        let mut statement = self.conn.prepare(sql)?;
        statement.bind((1, data))?;
        while statement.next()? != State::Done {}
        Ok(())
    }

    async fn delete_all(&mut self, table: &str) -> Result<u64, PayloadError> {
        self.conn.execute(format!("DELETE FROM {}", quote(table)))?;
        Ok(self.conn.change_count() as u64)
    }

    async fn rows(&mut self, table: &str) -> Result<Vec<Row>, PayloadError> {
        let sql = format!("SELECT id, data FROM {} ORDER BY id", quote(table));
        let mut statement = self.conn.prepare(sql)?;

        let mut rows = vec![];
        while statement.next()? == State::Row {
            rows.push(Row {
                id: statement.read::<i64, _>(0)?,
                data: statement.read::<String, _>(1)?,
            });
        }

        Ok(rows)
    }

    async fn close(self) -> Result<(), PayloadError> {
        drop(self.conn);
        debug!("SQLite session closed");
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_create_table_sql() {
        assert_eq!(
            "CREATE TABLE IF NOT EXISTS \"payload_test\" (id INTEGER PRIMARY KEY AUTOINCREMENT, data VARCHAR(255))",
            create_table_sql("payload_test")
        );
    }

    #[tokio::test]
    async fn test_session_roundtrip_on_file() {
        let dir = tempfile::tempdir().unwrap();
        let connector = SqliteConnector::new(dir.path().join("session.db"));

        let mut session = connector.connect().await.unwrap();
        session.ensure_table("t").await.unwrap();
        session.insert("t", "first").await.unwrap();
        session.insert("t", "second").await.unwrap();

        let rows = session.rows("t").await.unwrap();
        assert_eq!(2, rows.len());
        assert_eq!("first", rows[0].data);
        assert_eq!("second", rows[1].data);
        assert!(rows[0].id < rows[1].id);

        assert_eq!(2, session.delete_all("t").await.unwrap());
        assert!(session.rows("t").await.unwrap().is_empty());
        session.close().await.unwrap();
    }
}
