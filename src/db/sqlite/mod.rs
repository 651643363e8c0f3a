mod activity_logs;
mod common;
mod email_queue;
mod log_settings;
mod records;
mod session;

pub use log_settings::SqliteLogSettingsRepo;
pub use records::SqliteRecordRepo;
pub use session::SqliteSession;
