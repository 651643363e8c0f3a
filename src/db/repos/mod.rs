mod activity_logs;
mod email_queue;
mod log_settings;
mod records;
mod session;

pub use activity_logs::*;
pub use email_queue::*;
pub use log_settings::*;
pub use records::*;
pub use session::*;
