use std::error::Error as StdError;

use mysql::{Conn, OptsBuilder, prelude::Queryable};
use onlinealter_core::{ConnectionConfig, DatabaseAdapter, ExecutionError, Result, Statement};
use tracing::{debug, info};

const CONNECT_SQL: &str = "CONNECT mysql";
pub const DEFAULT_MYSQL_HOST: &str = "127.0.0.1";
pub const DEFAULT_MYSQL_PORT: u16 = 3306;

pub struct MysqlAdapter {
    connection: Conn,
    executed_statements: usize,
}

pub fn connect(config: &ConnectionConfig) -> Result<MysqlAdapter> {
    let mut builder = OptsBuilder::new()
        .ip_or_hostname(config.host.clone().or(Some(DEFAULT_MYSQL_HOST.to_string())))
        .tcp_port(config.port.unwrap_or(DEFAULT_MYSQL_PORT))
        .user(config.user.clone())
        .pass(config.password.clone())
        .db_name(Some(config.database.clone()));
    if let Some(socket) = &config.socket {
        builder = builder.socket(Some(socket.clone()));
    }

    let connection =
        Conn::new(builder).map_err(|source| execution_error(0, CONNECT_SQL, source))?;
    info!(database = %config.database, "connected to mysql");

    Ok(MysqlAdapter {
        connection,
        executed_statements: 0,
    })
}

impl MysqlAdapter {
    #[must_use]
    pub fn executed_statements(&self) -> usize {
        self.executed_statements
    }
}

impl DatabaseAdapter for MysqlAdapter {
    fn statement(&mut self, statement: &Statement) -> Result<()> {
        let sql = statement.as_str();
        debug!(sql, "executing statement");
        self.connection
            .query_drop(sql)
            .map_err(|source| execution_error(0, sql, source))?;
        self.executed_statements += 1;
        Ok(())
    }
}

fn execution_error<E>(statement_index: usize, sql: &str, source: E) -> onlinealter_core::Error
where
    E: StdError + Send + Sync + 'static,
{
    ExecutionError::statement_failed(statement_index, sql, source).into()
}
