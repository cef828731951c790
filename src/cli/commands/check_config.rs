//! Config check command handler

use crate::config::Config;

pub fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    config.validate()?;

    println!("Configuration OK");
    println!("{:-<50}", "");
    println!("Database:        {}", config.general.database_path);
    println!("Server port:     {}", config.server.port);
    println!("Login path:      {}", config.server.login_path);
    println!("Page size:       {}", config.catalog.page_size);
    println!(
        "Sign-up:         {}",
        if config.security.allow_signup {
            "open"
        } else {
            "closed"
        }
    );
    println!(
        "Metrics:         {}",
        if config.observability.metrics_enabled {
            "enabled"
        } else {
            "disabled"
        }
    );

    Ok(())
}
