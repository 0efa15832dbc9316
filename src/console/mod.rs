mod error;
mod handlers;
mod router;
mod types;

pub use error::ConsoleError;
pub use handlers::core::warn_load_failure;
pub use handlers::reports::render_report;
pub use router::run;
pub use types::{Session, SessionEnd};
