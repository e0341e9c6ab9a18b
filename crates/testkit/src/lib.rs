use onlinealter_core::ConnectionConfig;

mod scripted_runner;
mod yaml_runner;

pub use scripted_runner::ScriptedToolRunner;
pub use yaml_runner::{TestCase, TestResult, load_test_cases_from_str, run_test};

pub const FIXTURE_USER: &str = "migrator";
pub const FIXTURE_PASSWORD: &str = "fixture-secret";

pub fn fixture_connection() -> ConnectionConfig {
    ConnectionConfig {
        host: Some("127.0.0.1".to_string()),
        port: Some(3306),
        user: Some(FIXTURE_USER.to_string()),
        password: Some(FIXTURE_PASSWORD.to_string()),
        database: "app".to_string(),
        socket: None,
    }
}
