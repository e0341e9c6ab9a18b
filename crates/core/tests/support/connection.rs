use onlinealter_core::ConnectionConfig;

pub fn sample_connection() -> ConnectionConfig {
    ConnectionConfig {
        host: Some("db.internal".to_string()),
        port: Some(3306),
        user: Some("migrator".to_string()),
        password: Some("s3cret".to_string()),
        database: "app".to_string(),
        socket: None,
    }
}
