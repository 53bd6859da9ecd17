pub mod dispatch_alert;
pub mod watch_log;

pub use dispatch_alert::*;
pub use watch_log::*;
