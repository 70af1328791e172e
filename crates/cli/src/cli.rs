//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Fetch NASA's Astronomy Picture of the Day, cache it and set it as the desktop background.
#[derive(Debug, Parser)]
#[command(name = "apod", version, about)]
pub struct Cli {
    /// Absolute path of the image cache directory (created if missing).
    ///
    /// Falls back to `cache_dir` from the configuration.
    pub cache_dir: Option<PathBuf>,

    /// APOD date as YYYY-MM-DD; defaults to today.
    pub date: Option<String>,

    /// TOML configuration file.
    #[arg(long, env = "APOD_CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Cache the image but leave the desktop background alone.
    #[arg(long)]
    pub no_wallpaper: bool,

    /// List cached images and exit.
    #[arg(long)]
    pub list: bool,

    /// Print `--list` output as JSON.
    #[arg(long, requires = "list")]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positional_arguments() {
        let cli = Cli::try_parse_from(["apod", "/var/cache/apod", "2024-01-15"]).unwrap();
        assert_eq!(cli.cache_dir, Some(PathBuf::from("/var/cache/apod")));
        assert_eq!(cli.date.as_deref(), Some("2024-01-15"));
        assert!(!cli.no_wallpaper);
        assert!(!cli.list);
    }

    #[test]
    fn test_json_requires_list() {
        assert!(Cli::try_parse_from(["apod", "/cache", "--json"]).is_err());
        assert!(Cli::try_parse_from(["apod", "/cache", "--list", "--json"]).is_ok());
    }
}
