// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use clap::{builder::ValueParser, Parser};
use std::{collections::HashSet, path::PathBuf, sync::LazyLock};

#[cfg(not(test))]
pub static SETTINGS: LazyLock<Settings> = LazyLock::new(Settings::parse);

#[cfg(test)]
pub static SETTINGS: LazyLock<Settings> = LazyLock::new(Settings::new_for_test);

#[derive(Debug, Parser)]
#[clap(
    name = "mailsift",
    about = "A REST service for browsing, searching and categorizing email metadata stored in a relational database.",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Settings {
    /// mailsift log level (default: "info")
    #[clap(
        long,
        default_value = "info",
        env,
        help = "Set the log level for mailsift"
    )]
    pub mailsift_log_level: String,

    /// mailsift HTTP port (default: 8000)
    #[clap(
        long,
        default_value = "8000",
        env,
        help = "Set the HTTP port for mailsift",
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub mailsift_http_port: u16,

    /// The IPv4 address the HTTP server binds to.
    #[clap(
        long,
        env,
        default_value = "0.0.0.0",
        help = "The IPv4 address the HTTP server binds to (e.g., 127.0.0.1)",
        value_parser = ValueParser::new(|s: &str| {
            if s.parse::<std::net::Ipv4Addr>().is_err() {
                return Err("The bind IP address must be a valid IPv4 address.".to_string());
            }
            Ok(s.to_string())
        })
    )]
    pub mailsift_bind_ip: Option<String>,

    /// CORS allowed origins (default: "*")
    #[clap(
        long,
        default_value = "*",
        env,
        help = "Set the allowed CORS origins (comma-separated list, e.g., \"https://example.com, https://another.com\")",
        value_parser = ValueParser::new(|s: &str| -> Result<HashSet<String>, String> {
            let set: HashSet<String> = s.split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect();
            Ok(set)
        })
    )]
    pub mailsift_cors_origins: HashSet<String>,

    /// CORS max age in seconds (default: 86400)
    #[clap(
        long,
        default_value = "86400",
        env,
        help = "Set the CORS max age in seconds"
    )]
    pub mailsift_cors_max_age: i32,

    /// Enable ANSI logs (default: true)
    #[clap(long, default_value = "true", env, help = "Enable ANSI formatted logs")]
    pub mailsift_ansi_logs: bool,

    /// Enable log file output (default: false)
    /// If false, logs will be printed to stdout
    #[clap(
        long,
        default_value = "false",
        env,
        help = "Enable log file output (otherwise logs go to stdout)"
    )]
    pub mailsift_log_to_file: bool,

    /// Enable JSON logs (default: false)
    #[clap(
        long,
        default_value = "false",
        env,
        help = "Enable JSON formatted logs"
    )]
    pub mailsift_json_logs: bool,

    /// Maximum number of log files (default: 5)
    #[clap(
        long,
        default_value = "5",
        env,
        help = "Set the maximum number of server log files"
    )]
    pub mailsift_max_server_log_files: usize,

    #[clap(
        long,
        env,
        help = "Set the root directory for the mailsift database and logs",
        value_parser = ValueParser::new(|s: &str| {
            let path = PathBuf::from(s);
            if !path.is_absolute() {
                return Err("Path must be an absolute directory path".to_string());
            }
            if !path.exists() {
                return Err(format!("Path {:?} does not exist", path));
            }
            if !path.is_dir() {
                return Err(format!("Path {:?} is not a directory", path));
            }
            Ok(s.to_string())
        })
    )]
    pub mailsift_root_dir: String,

    /// Database connection URL. When unset, a SQLite file inside the root directory is used.
    #[clap(
        long,
        env,
        help = "Override the database URL (e.g., sqlite:///var/lib/mailsift/mail.db)"
    )]
    pub mailsift_database_url: Option<String>,

    #[clap(
        long,
        env,
        default_value = "10",
        help = "Maximum number of pooled database connections",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub mailsift_db_max_connections: u32,

    #[clap(
        long,
        env,
        default_value = "30",
        help = "Seconds to wait for a pooled database connection before failing the request",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub mailsift_db_acquire_timeout_secs: u64,

    #[clap(
        long,
        env,
        default_value = "30",
        help = "Default request timeout in seconds; clients may override it per request with the X-MailSift-Timeout-Seconds header",
        value_parser = clap::value_parser!(u64).range(1..=600)
    )]
    pub mailsift_request_timeout_secs: u64,

    #[clap(
        long,
        default_value = "true",
        env,
        help = "Enable compression for the open api server"
    )]
    pub mailsift_http_compression_enabled: bool,
}

impl Settings {
    #[cfg(test)]
    fn new_for_test() -> Self {
        Self {
            mailsift_log_level: "info".to_string(),
            mailsift_http_port: 8000,
            mailsift_bind_ip: Some("127.0.0.1".into()),
            mailsift_cors_origins: Default::default(),
            mailsift_cors_max_age: 86400,
            mailsift_ansi_logs: false,
            mailsift_log_to_file: false,
            mailsift_json_logs: false,
            mailsift_max_server_log_files: 5,
            mailsift_root_dir: std::env::temp_dir().to_string_lossy().into_owned(),
            mailsift_database_url: None,
            mailsift_db_max_connections: 4,
            mailsift_db_acquire_timeout_secs: 5,
            mailsift_request_timeout_secs: 30,
            mailsift_http_compression_enabled: false,
        }
    }
}
