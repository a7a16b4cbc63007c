use std::{io::stdout, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use log::info;

use payload::{
    backend::Connector,
    cli::{Args, Backend},
    config::Config,
    driver::LoopDriver,
    mysql_backend::MySqlConnector,
    sqlite_backend::SqliteConnector,
};

async fn drive<C: Connector>(config: Config, connector: C) -> anyhow::Result<()> {
    let table = config.table.clone();
    let mut driver = LoopDriver::new(config, connector, stdout().lock());

    let never = driver
        .run()
        .await
        .with_context(|| format!("Payload loop on table {table} stopped"))?;
    match never {}
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::resolve(Args::parse()).context("Invalid configuration")?;
    info!("Starting payload with {config:?}");

    match config.backend {
        Backend::Mysql => {
            let connector = MySqlConnector::new(&config);
            drive(config, connector).await
        }
        Backend::Sqlite => {
            let connector = SqliteConnector::new(PathBuf::from(&config.database));
            drive(config, connector).await
        }
    }
}
