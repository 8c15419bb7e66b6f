//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Home-server status dashboard and service action console",
    long_about = None,
    after_help = r"Examples:
  # Serve the dashboard (default)
  houndd --config /etc/hound/hound.toml

  # One collection pass, printed as text or JSON
  houndd status
  houndd status --json

  # Restart nginx and lock the environment, as a local operator
  houndd action nginx readonly"
)]
pub struct Cli {
    /// Configuration file path.
    #[arg(long, value_name = "CONFIG_FILE", default_value = "hound.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server.
    Serve,
    /// Run every probe once and print the result.
    Status {
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Run actions locally, without a token.
    Action {
        /// Action parameters, e.g. `nginx` or `readonly`.
        #[arg(required = true, value_name = "PARAM")]
        params: Vec<String>,
    },
}

impl Cli {
    /// The requested subcommand, `serve` when none was given.
    #[must_use]
    pub fn subcommand(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn should_pass_clap_debug_assertions() {
        Cli::command().debug_assert();
    }

    #[test]
    fn should_default_to_serve() {
        let cli = Cli::parse_from(["houndd"]);
        assert_eq!(cli.subcommand(), Command::Serve);
        assert_eq!(cli.config, PathBuf::from("hound.toml"));
    }

    #[test]
    fn should_parse_status_with_json() {
        let cli = Cli::parse_from(["houndd", "status", "--json", "--config", "/etc/hound.toml"]);
        assert_eq!(cli.subcommand(), Command::Status { json: true });
        assert_eq!(cli.config, PathBuf::from("/etc/hound.toml"));
    }

    #[test]
    fn should_parse_action_params() {
        let cli = Cli::parse_from(["houndd", "action", "nginx", "readonly"]);
        assert_eq!(
            cli.subcommand(),
            Command::Action {
                params: vec!["nginx".to_string(), "readonly".to_string()],
            }
        );
    }

    #[test]
    fn should_require_at_least_one_action_param() {
        assert!(Cli::try_parse_from(["houndd", "action"]).is_err());
    }
}
