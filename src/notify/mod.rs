pub mod alert;
pub mod notifier;

pub use alert::{AlertId, AlertNotification, Severity};
pub use notifier::{Notifier, DEFAULT_DISMISS_AFTER};
