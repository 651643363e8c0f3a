mod alert;
mod log_record;
mod log_settings;

pub use alert::*;
pub use log_record::*;
pub use log_settings::*;
