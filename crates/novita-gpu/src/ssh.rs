//! SSH endpoint discovery.
//!
//! The platform publishes SSH access in one of two places: a ready-made
//! command in `connectComponentSSH`, or a public mapping of container port 22
//! in `portMappings`. The command takes precedence.

use crate::models::Instance;
use novita_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Port assumed when neither source names one.
pub const DEFAULT_SSH_PORT: u16 = 22;

/// User assumed when neither source names one.
pub const DEFAULT_SSH_USER: &str = "root";

/// Where and how to SSH into an instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshEndpoint {
    /// Login user
    pub user: String,
    /// Host name or IP address
    pub host: String,
    /// TCP port
    pub port: u16,
    /// Command line that opens the session
    pub command: String,
}

impl fmt::Display for SshEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "{}@[{}]:{}", self.user, self.host, self.port)
        } else {
            write!(f, "{}@{}:{}", self.user, self.host, self.port)
        }
    }
}

/// Pieces recovered from an `ssh ...` command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSshCommand {
    /// User from `user@host` or `-l user`
    pub user: Option<String>,
    /// Destination host
    pub host: Option<String>,
    /// Port from `-p N`, `-p=N` or `-pN`
    pub port: Option<u16>,
}

// ssh options that consume the following argument.
const OPTIONS_WITH_ARGUMENT: &[&str] = &[
    "-b", "-c", "-D", "-E", "-e", "-F", "-I", "-i", "-J", "-L", "-m", "-O", "-o", "-Q", "-R",
    "-S", "-W", "-w",
];

/// Parse an `ssh` command line.
///
/// Recognises `-p N`, `-p=N`, `-pN`, `-l user` and a `user@host` (or bare
/// `host`) destination. Anything after the destination is the remote command
/// and is ignored.
#[must_use]
pub fn parse_ssh_command(command: &str) -> ParsedSshCommand {
    let mut parsed = ParsedSshCommand::default();
    let mut tokens = command.split_whitespace().peekable();

    if tokens.peek().is_some_and(|first| first.ends_with("ssh")) {
        tokens.next();
    }

    while let Some(token) = tokens.next() {
        if token == "-p" {
            parsed.port = tokens.next().and_then(|port| port.parse().ok());
        } else if let Some(port) = token.strip_prefix("-p=") {
            parsed.port = port.parse().ok();
        } else if let Some(port) = token
            .strip_prefix("-p")
            .filter(|p| p.bytes().all(|b| b.is_ascii_digit()))
        {
            parsed.port = port.parse().ok();
        } else if token == "-l" {
            parsed.user = tokens.next().map(str::to_owned);
        } else if OPTIONS_WITH_ARGUMENT.contains(&token) {
            tokens.next();
        } else if token.starts_with('-') {
            continue;
        } else if parsed.host.is_none() {
            let destination = token.strip_prefix("ssh://").unwrap_or(token);
            let (user, host) = match destination.split_once('@') {
                Some((user, host)) => (Some(user), host),
                None => (None, destination),
            };
            if let Some(user) = user.filter(|u| !u.is_empty()) {
                parsed.user = Some(user.to_owned());
            }
            if token.starts_with("ssh://") {
                if let Some((host, port)) = normalize_endpoint(host) {
                    parsed.host = Some(host);
                    parsed.port = port.or(parsed.port);
                }
            } else if !host.is_empty() {
                parsed.host = Some(host.to_owned());
            }
        } else {
            // remote command
            break;
        }
    }

    parsed
}

/// Split a published endpoint into host and optional port.
///
/// Accepts `scheme://host:port`, `host:port`, `[ipv6]:port` and a bare host.
/// Returns `None` when no host can be found.
#[must_use]
pub fn normalize_endpoint(endpoint: &str) -> Option<(String, Option<u16>)> {
    let endpoint = endpoint.trim();
    let without_scheme = endpoint
        .split_once("://")
        .map_or(endpoint, |(_, rest)| rest);
    let authority = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();

    let (host, port) = if let Some(rest) = authority.strip_prefix('[') {
        let (host, after) = rest.split_once(']')?;
        let port = after.strip_prefix(':').and_then(|p| p.parse().ok());
        (host, port)
    } else if authority.matches(':').count() == 1 {
        let (host, port) = authority.split_once(':')?;
        (host, port.parse().ok())
    } else {
        (authority, None)
    };

    if host.is_empty() {
        None
    } else {
        Some((host.to_owned(), port))
    }
}

/// Work out the SSH endpoint of an instance.
///
/// # Errors
///
/// Returns [`Error::NotFound`] when the instance publishes neither an SSH
/// command nor a mapping for port 22.
pub fn extract(instance: &Instance) -> Result<SshEndpoint> {
    if let Some(component) = &instance.connect_component_ssh {
        let command = component.command.as_deref().map(str::trim).unwrap_or_default();
        if !command.is_empty() {
            let parsed = parse_ssh_command(command);
            if let Some(host) = parsed.host {
                let user = component
                    .user
                    .clone()
                    .filter(|user| !user.is_empty())
                    .or(parsed.user)
                    .unwrap_or_else(|| DEFAULT_SSH_USER.to_string());
                return Ok(SshEndpoint {
                    user,
                    host,
                    port: parsed.port.unwrap_or(DEFAULT_SSH_PORT),
                    command: command.to_string(),
                });
            }
        }
    }

    let mapped = instance
        .port_mappings
        .iter()
        .filter(|mapping| mapping.port == DEFAULT_SSH_PORT)
        .find_map(|mapping| mapping.endpoint.as_deref().and_then(normalize_endpoint));

    if let Some((host, port)) = mapped {
        let port = port.unwrap_or(DEFAULT_SSH_PORT);
        let user = DEFAULT_SSH_USER.to_string();
        let command = format!("ssh {user}@{host} -p {port}");
        return Ok(SshEndpoint {
            user,
            host,
            port,
            command,
        });
    }

    Err(Error::not_found(format!(
        "No SSH endpoint found for instance {}",
        instance.id
    )))
}
