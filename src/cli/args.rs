//! Command-line argument parsing.

use crate::config::DashboardConfig;
use crate::error::{DashError, DashResult};
use crate::models::ActionCommand;

/// What the binary should do.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Print the version and exit
    Version,
    /// Print usage and exit
    Help,
    /// One-shot status fetch
    Status,
    /// One-shot admin command; `yes` skips the confirmation prompt
    Action { cmd: ActionCommand, yes: bool },
    /// Run the dashboard (default)
    RunTui,
}

/// Parsed command plus the connection overrides given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedArgs {
    pub command: CliCommand,
    pub url: Option<String>,
    pub token: Option<String>,
}

impl ParsedArgs {
    /// Apply `--url` / `--token` on top of `config`.
    pub fn apply(&self, mut config: DashboardConfig) -> DashboardConfig {
        if let Some(url) = &self.url {
            config = config.with_base_url(url.as_str());
        }
        if let Some(token) = &self.token {
            config = config.with_auth_token(token.as_str());
        }
        config
    }
}

/// Parse `std::env::args()`-style arguments (program name first).
///
/// `--version` and `--help` win over everything else, as soon as they are
/// seen.
///
/// ```
/// use wendash::cli::{parse_args, CliCommand};
///
/// let args = vec!["wendash".to_string(), "status".to_string()];
/// assert_eq!(parse_args(args.into_iter()).unwrap().command, CliCommand::Status);
/// ```
pub fn parse_args<I>(args: I) -> DashResult<ParsedArgs>
where
    I: Iterator<Item = String>,
{
    let mut url = None;
    let mut token = None;
    let mut yes = false;
    let mut positionals: Vec<String> = Vec::new();

    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(bare(CliCommand::Version)),
            "--help" | "-h" => return Ok(bare(CliCommand::Help)),
            "--yes" | "-y" => yes = true,
            "--url" => url = Some(option_value("--url", args.next())?),
            "--token" => token = Some(option_value("--token", args.next())?),
            other => {
                if let Some(value) = other.strip_prefix("--url=") {
                    url = Some(value.to_string());
                } else if let Some(value) = other.strip_prefix("--token=") {
                    token = Some(value.to_string());
                } else if other.starts_with('-') {
                    return Err(DashError::Config(format!("unknown option '{}'", other)));
                } else {
                    positionals.push(other.to_string());
                }
            }
        }
    }

    let command = match positionals.as_slice() {
        [] => CliCommand::RunTui,
        [status] if status == "status" => CliCommand::Status,
        [action, name] if action == "action" => CliCommand::Action {
            cmd: name.parse::<ActionCommand>().map_err(DashError::Config)?,
            yes,
        },
        [action] if action == "action" => {
            return Err(DashError::Config(
                "'action' needs a command name".to_string(),
            ))
        }
        [first, ..] => {
            return Err(DashError::Config(format!("unexpected argument '{}'", first)))
        }
    };

    Ok(ParsedArgs {
        command,
        url,
        token,
    })
}

fn bare(command: CliCommand) -> ParsedArgs {
    ParsedArgs {
        command,
        url: None,
        token: None,
    }
}

fn option_value(flag: &str, value: Option<String>) -> DashResult<String> {
    value.ok_or_else(|| DashError::Config(format!("{} needs a value", flag)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> DashResult<ParsedArgs> {
        let mut all = vec!["wendash".to_string()];
        all.extend(args.iter().map(|s| s.to_string()));
        parse_args(all.into_iter())
    }

    #[test]
    fn test_parse_no_args() {
        let parsed = parse(&[]).unwrap();
        assert_eq!(parsed.command, CliCommand::RunTui);
        assert_eq!(parsed.url, None);
    }

    #[test]
    fn test_parse_version_flags() {
        assert_eq!(parse(&["--version"]).unwrap().command, CliCommand::Version);
        assert_eq!(parse(&["-V"]).unwrap().command, CliCommand::Version);
        // Later arguments are never looked at
        assert_eq!(parse(&["-V", "--bogus"]).unwrap().command, CliCommand::Version);
    }

    #[test]
    fn test_parse_help() {
        assert_eq!(parse(&["-h"]).unwrap().command, CliCommand::Help);
    }

    #[test]
    fn test_parse_status_with_overrides() {
        let parsed = parse(&["--url", "http://bot:8080/", "status", "--token=abc"]).unwrap();
        assert_eq!(parsed.command, CliCommand::Status);
        assert_eq!(parsed.url.as_deref(), Some("http://bot:8080/"));
        assert_eq!(parsed.token.as_deref(), Some("abc"));

        let config = parsed.apply(DashboardConfig::default());
        assert_eq!(config.base_url, "http://bot:8080");
        assert_eq!(config.auth_token, "abc");
    }

    #[test]
    fn test_parse_action() {
        assert_eq!(
            parse(&["action", "trigger_backup"]).unwrap().command,
            CliCommand::Action {
                cmd: ActionCommand::TriggerBackup,
                yes: false
            }
        );
        assert_eq!(
            parse(&["-y", "action", "restart_bot"]).unwrap().command,
            CliCommand::Action {
                cmd: ActionCommand::RestartBot,
                yes: true
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse(&["action"]), Err(DashError::Config(_))));
        assert!(matches!(parse(&["action", "reboot"]), Err(DashError::Config(_))));
        assert!(matches!(parse(&["--url"]), Err(DashError::Config(_))));
        assert!(matches!(parse(&["--unknown"]), Err(DashError::Config(_))));
        assert!(matches!(parse(&["status", "extra"]), Err(DashError::Config(_))));
    }

    #[test]
    fn test_apply_without_overrides_keeps_config() {
        let config = DashboardConfig::default().with_auth_token("env-token");
        let parsed = parse(&[]).unwrap();
        assert_eq!(parsed.apply(config.clone()), config);
    }
}
