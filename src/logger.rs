use std::sync::OnceLock;

use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub struct Logger {
    tag: Option<String>,
}

impl Logger {
    fn new(tag: Option<String>) -> Self {
        Self { tag }
    }

    pub fn log(&self, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        match &self.tag {
            Some(tag) => println!("[{timestamp}][{tag}] {message}"),
            None => println!("[{timestamp}] {message}"),
        }
    }
}

/// Initializes the process-wide logger. Later calls keep the first tag.
pub fn init_logger(tag: Option<String>) {
    LOGGER.get_or_init(|| Logger::new(tag));
}

/// No-op until `init_logger` is called, so embedding applications that
/// bring their own logging stay silent.
pub fn log(message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(&format!($($arg)*))
    };
}
