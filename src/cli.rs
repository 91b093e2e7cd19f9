//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for bookmarkd using clap's derive macros.

use clap::Parser;

/// bookmarkd - A personal bookmarks manager backend
#[derive(Parser, Debug)]
#[command(name = "bookmarkd")]
#[command(version)]
#[command(about = "A personal bookmarks manager backend", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<String>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    pub generate_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_without_args() {
        let cli = Cli::try_parse_from(["bookmarkd"]).unwrap();
        assert!(cli.config.is_none());
        assert!(!cli.generate_config);
    }

    #[test]
    fn test_parse_config_path() {
        let cli = Cli::try_parse_from(["bookmarkd", "-c", "/etc/bookmarkd.toml"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("/etc/bookmarkd.toml"));

        let cli = Cli::try_parse_from(["bookmarkd", "--config", "local.toml"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("local.toml"));
    }

    #[test]
    fn test_parse_generate_config() {
        let cli = Cli::try_parse_from(["bookmarkd", "--generate-config"]).unwrap();
        assert!(cli.generate_config);
    }

    #[test]
    fn test_rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["bookmarkd", "add", "https://example.com"]).is_err());
    }
}
