// ============================
// linkkeeper-backend/src/remote.rs
// ============================
//! Remote command execution over SSH.
//!
//! Commands run through the system `ssh` client. Password logins go through
//! `sshpass -e` so the password never shows up in the process list.
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use metrics::counter;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::RemoteConfig;

/// `ssh` exits with 255 when it could not reach or log into the host
const SSH_CONNECTION_FAILURE: i32 = 255;

/// Captured output of a finished remote command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Remote exit code, absent if the process was killed by a signal
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("could not connect to remote host: {0}")]
    Connection(String),

    #[error("failed to start ssh client: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("remote command timed out after {0}s")]
    Timeout(u64),

    #[error("invalid remote command: {0}")]
    InvalidCommand(String),
}

/// Runs shell commands on a remote host
#[async_trait]
pub trait RemoteExecutor: Send + Sync {
    async fn execute(&self, command: &str) -> Result<CommandOutput, RemoteError>;
}

/// [`RemoteExecutor`] backed by the OpenSSH client
#[derive(Debug, Clone)]
pub struct SshExecutor {
    config: RemoteConfig,
}

impl SshExecutor {
    pub fn new(config: RemoteConfig) -> Self {
        Self { config }
    }

    /// Program and arguments for running `command` on the configured host
    pub fn command_line(&self, command: &str) -> (String, Vec<String>) {
        let cfg = &self.config;
        let mut args = Vec::new();

        let program = if cfg.password.is_some() {
            args.push("-e".to_string());
            args.push("ssh".to_string());
            "sshpass".to_string()
        } else {
            "ssh".to_string()
        };

        args.push("-p".to_string());
        args.push(cfg.port.to_string());
        args.push("-o".to_string());
        args.push(format!("ConnectTimeout={}", cfg.connect_timeout_secs));
        if cfg.password.is_none() {
            args.push("-o".to_string());
            args.push("BatchMode=yes".to_string());
        }
        args.push("-o".to_string());
        args.push(if cfg.accept_unknown_host_keys {
            "StrictHostKeyChecking=accept-new".to_string()
        } else {
            "StrictHostKeyChecking=yes".to_string()
        });
        if let Some(identity) = &cfg.identity_file {
            args.push("-i".to_string());
            args.push(identity.clone());
        }
        args.push(format!("{}@{}", cfg.user, cfg.host));
        args.push("--".to_string());
        args.push(command.to_string());

        (program, args)
    }
}

#[async_trait]
impl RemoteExecutor for SshExecutor {
    async fn execute(&self, command: &str) -> Result<CommandOutput, RemoteError> {
        if command.trim().is_empty() {
            return Err(RemoteError::InvalidCommand("command is empty".to_string()));
        }

        let (program, args) = self.command_line(command);
        debug!(host = %self.config.host, port = self.config.port, "running remote command");
        counter!(crate::metrics::REMOTE_COMMAND).increment(1);

        let mut cmd = Command::new(&program);
        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(password) = &self.config.password {
            cmd.env("SSHPASS", password);
        }

        let child = cmd.spawn().map_err(|e| {
            counter!(crate::metrics::REMOTE_COMMAND_FAILED).increment(1);
            RemoteError::Spawn(e)
        })?;

        let limit = self.config.command_timeout_secs;
        let output = match tokio::time::timeout(Duration::from_secs(limit), child.wait_with_output()).await {
            Ok(result) => result.map_err(RemoteError::Spawn)?,
            Err(_) => {
                counter!(crate::metrics::REMOTE_COMMAND_FAILED).increment(1);
                warn!(host = %self.config.host, "remote command timed out");
                return Err(RemoteError::Timeout(limit));
            },
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if output.status.code() == Some(SSH_CONNECTION_FAILURE) {
            counter!(crate::metrics::REMOTE_COMMAND_FAILED).increment(1);
            return Err(RemoteError::Connection(stderr.trim().to_string()));
        }

        Ok(CommandOutput {
            stdout,
            stderr,
            exit_code: output.status.code(),
        })
    }
}

/// Whether `name` is a plausible docker container name or id
fn valid_container_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(['-', '.'])
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

/// Shell text that runs `cmd` inside `container` on the remote host
pub fn docker_exec_line(container: &str, cmd: &str) -> Result<String, RemoteError> {
    if !valid_container_name(container) {
        return Err(RemoteError::InvalidCommand(format!(
            "invalid container name: {container:?}"
        )));
    }
    let escaped = cmd
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('$', "\\$")
        .replace('`', "\\`");
    Ok(format!("docker exec -i {container} /bin/sh -c \"{escaped}\""))
}

/// Run `cmd` with `/bin/sh` inside a container on the remote host
pub async fn docker_command(
    executor: &dyn RemoteExecutor,
    container: &str,
    cmd: &str,
) -> Result<CommandOutput, RemoteError> {
    let line = docker_exec_line(container, cmd)?;
    executor.execute(&line).await
}
