#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]

pub mod backend;
pub mod cli;
pub mod common;
pub mod config;
pub mod driver;
pub mod mysql_backend;
pub mod row;
pub mod sqlite_backend;
