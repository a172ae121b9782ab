pub mod config;
pub mod save;
pub mod vault;
pub mod watch;
