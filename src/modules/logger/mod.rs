use crate::modules::logger::file::setup_file_logger;
use crate::modules::settings::cli::SETTINGS;
use chrono::Local;
use std::process;
use tracing::Level;
use tracing_subscriber::fmt::{format::Writer, time::FormatTime};

mod file;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z"))
    }
}

pub fn initialize_logging() {
    let level = parse_log_level(&SETTINGS.mailsift_log_level);
    let result = if SETTINGS.mailsift_log_to_file {
        setup_file_logger(level).map_err(|e| e.to_string())
    } else {
        setup_stdout_logger(level).map_err(|e| e.to_string())
    };
    if let Err(e) = result {
        eprintln!("Failed to install the log subscriber: {}", e);
        process::exit(1);
    }
}

fn setup_stdout_logger(level: Level) -> Result<(), tracing::dispatcher::SetGlobalDefaultError> {
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(SETTINGS.mailsift_ansi_logs)
        .with_writer(std::io::stdout)
        .with_level(true)
        .with_target(true)
        .with_timer(LocalTimer);

    if SETTINGS.mailsift_json_logs {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    }
}

fn parse_log_level(value: &str) -> Level {
    match value.parse::<Level>() {
        Ok(level) => level,
        Err(_) => {
            eprintln!(
                "Invalid log level specified. Use one of: error, warn, info, debug, trace.
        The log level you currently specified is 'mailsift_log_level'='{}'",
                value
            );
            process::exit(1);
        }
    }
}
