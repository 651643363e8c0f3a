//! Log retention: deleting old error logs, activity logs and queued emails.
//!
//! [`run_log_clean_up`] performs one pass using the retention windows stored in
//! the log settings. [`start_log_cleanup_worker`] repeats it on a fixed interval
//! in the background.
//!
//! The steps of a pass run in a fixed order: email queue, then error logs, then
//! activity logs. Every step is an age-based delete, so a pass interrupted
//! partway is completed by the next one.

mod cleanup;
mod worker;

pub use cleanup::{CleanupRunResult, clear_logs, run_log_clean_up};
pub use worker::start_log_cleanup_worker;
