use dotenvy::dotenv;
use std::env;

pub struct Config {
    /// Name of the database every request is routed to.
    pub db_name: String,
    pub http_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let db_name = match env::var("MAZE_DB_NAME") {
            Ok(val) if !val.trim().is_empty() => val.trim().to_string(),
            _ => "maze".to_string(),
        };

        let http_port = match env::var("MAZE_HTTP_PORT") {
            Ok(val) => val.parse::<u16>().unwrap_or(3000),
            Err(_) => 3000,
        };

        Self { db_name, http_port }
    }
}
