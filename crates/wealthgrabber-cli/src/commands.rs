use super::args::{Cli, Commands};
use super::handlers;
use crate::config::{CONFIG_FILE, Config};
use crate::error::{Error, Result};
use crate::types::LogLevel;
use std::path::PathBuf;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.log_level.with_verbose(cli.verbose));

    let data_dir = expand_tilde(&cli.data_dir);
    let config = Config::load_from(&data_dir.join(CONFIG_FILE))
        .map_err(|e| Error::Config(format!("{:#}", e)))?;

    let output = match cli.command {
        Commands::Login { force, username } => {
            handlers::login::handle(&config, username.as_deref(), force)?
        }
        Commands::Logout {
            username,
            clear_email,
        } => handlers::logout::handle(&config, username.as_deref(), clear_email)?,
        Commands::List {
            show_zero,
            liquid_only,
            not_liquid,
            format,
        } => handlers::list::handle(
            &config,
            handlers::list::ListOptions {
                show_zero,
                liquid_only,
                not_liquid,
                format,
            },
        )?,
        Commands::Activities {
            account,
            dividends,
            limit,
            format,
        } => handlers::activities::handle(
            &config,
            handlers::activities::ActivitiesOptions {
                account,
                dividends,
                limit,
                format,
            },
        )?,
        Commands::Assets {
            account,
            by_account,
            profits,
            losses,
            format,
        } => handlers::assets::handle(
            &config,
            handlers::assets::AssetsOptions {
                account,
                by_account,
                profits,
                losses,
                format,
            },
        )?,
    };

    println!("{}", output);
    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over the command-line level when set
fn init_logging(level: LogLevel) {
    env_logger::Builder::new()
        .filter_level(level.to_filter())
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde_leaves_other_paths_alone() {
        assert_eq!(expand_tilde("/tmp/wg"), PathBuf::from("/tmp/wg"));
        assert_eq!(expand_tilde("relative/dir"), PathBuf::from("relative/dir"));
    }
}
