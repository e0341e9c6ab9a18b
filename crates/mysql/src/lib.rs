//! Runs statements one at a time over a plain MySQL connection, without the
//! online schema-change tool. This backend has no batch entry point.

mod adapter;

pub use adapter::{DEFAULT_MYSQL_HOST, DEFAULT_MYSQL_PORT, MysqlAdapter, connect};
