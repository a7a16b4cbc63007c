use log::{debug, info};
use sqlx::{
    mysql::{MySqlConnectOptions, MySqlConnection},
    Connection,
};

use crate::{
    backend::{Connector, Session},
    common::PayloadError,
    config::Config,
    row::Row,
};

pub struct MySqlConnector {
    options: MySqlConnectOptions,
    target: String,
}

impl MySqlConnector {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        Self {
            options,
            target: format!(
                "{}@{}:{}/{}",
                config.user, config.host, config.port, config.database
            ),
        }
    }
}

impl Connector for MySqlConnector {
    type Session = MySqlSession;

    async fn connect(&self) -> Result<MySqlSession, PayloadError> {
        info!("Connecting to mysql://{}", self.target);

        let mut conn = MySqlConnection::connect_with(&self.options).await?;
        sqlx::query("SET autocommit = 1").execute(&mut conn).await?;

        Ok(MySqlSession { conn })
    }
}

pub struct MySqlSession {
    conn: MySqlConnection,
}

fn quote(table: &str) -> String {
    format!("`{table}`")
}

#[must_use]
pub fn create_table_sql(table: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {} (id INT AUTO_INCREMENT PRIMARY KEY, data VARCHAR(255))",
        quote(table)
    )
}

impl Session for MySqlSession {
    async fn ensure_table(&mut self, table: &str) -> Result<(), PayloadError> {
        sqlx::query(&create_table_sql(table))
            .execute(&mut self.conn)
            .await?;
        debug!("Table {table} ready");
        Ok(())
    }

    async fn insert(&mut self, table: &str, data: &str) -> Result<(), PayloadError> {
        let sql = format!("INSERT INTO {} (data) VALUES (?)", quote(table));
        sqlx::query(&sql).bind(data).execute(&mut self.conn).await?;
        Ok(())
    }

    async fn delete_all(&mut self, table: &str) -> Result<u64, PayloadError> {
        let sql = format!("DELETE FROM {}", quote(table));
        let result = sqlx::query(&sql).execute(&mut self.conn).await?;
        Ok(result.rows_affected())
    }

    async fn rows(&mut self, table: &str) -> Result<Vec<Row>, PayloadError> {
        let sql = format!("SELECT id, data FROM {} ORDER BY id", quote(table));
        let rows: Vec<(i64, String)> = sqlx::query_as(&sql).fetch_all(&mut self.conn).await?;
        Ok(rows.into_iter().map(|(id, data)| Row { id, data }).collect())
    }

    async fn close(self) -> Result<(), PayloadError> {
        self.conn.close().await?;
        debug!("MySQL session closed");
        Ok(())
    }
}
