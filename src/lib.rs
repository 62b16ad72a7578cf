/// Macro for prefixed status logging to stderr (only when stderr is a terminal).
///
/// Usage:
/// ```ignore
/// log_status!("deploy", "Deploying stack {} on {}", name, host);
/// log_status!("push", "Pushing {}...", label);
/// ```
#[macro_export]
macro_rules! log_status {
    ($prefix:expr, $($arg:tt)*) => {
        if ::std::io::IsTerminal::is_terminal(&::std::io::stderr()) {
            eprintln!(concat!("[", $prefix, "] {}"), format_args!($($arg)*));
        }
    };
}

pub mod commands;
pub mod environment;
pub mod error;
pub mod host;
pub mod image;
pub mod process;
pub mod stack;

// Re-export common types for ergonomic library use
pub use error::{Error, Result};
pub use host::Host;
pub use image::{derive_label, split_label_and_tag, ImageLabel, TagMethod};
pub use process::{ProcessRunner, SystemRunner};
