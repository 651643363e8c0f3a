use serde::{Deserialize, Serialize};

/// Link target used in the alert message when none is configured.
pub const DEFAULT_ERROR_LOG_LIST_URL: &str = "/app/List/Error%20Log/List";

/// Notification payload returned when unseen error logs exist.
///
/// The message is always present; `show_alert` tells the caller whether to
/// surface it as a pop-up for the requesting user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnseenErrorAlert {
    pub show_alert: bool,
    pub message: String,
}

impl UnseenErrorAlert {
    pub fn new(show_alert: bool, error_log_list_url: &str) -> Self {
        Self {
            show_alert,
            message: unseen_error_message(error_log_list_url),
        }
    }
}

/// Build the link-bearing alert text.
pub fn unseen_error_message(error_log_list_url: &str) -> String {
    format!(
        "You have unseen <a href=\"{}\"> Error Logs </a>",
        error_log_list_url
    )
}
