mod auth;
mod errorlog;
mod filter;

pub use auth::TokenManager;
pub use errorlog::ErrorLog;
pub use errorlog::LogEntry;
pub use filter::NameFilter;
