mod check_config;
mod init;
mod stats;

pub use check_config::cmd_check_config;
pub use init::cmd_init;
pub use stats::cmd_stats;
