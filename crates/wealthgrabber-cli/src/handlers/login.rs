use crate::config::Config;
use crate::error::Result;

pub fn handle(config: &Config, username: Option<&str>, force: bool) -> Result<String> {
    super::connect(config, username, force)?;
    Ok("Login routine completed successfully.".to_string())
}
