use std::sync::Mutex;

use async_trait::async_trait;
use linkkeeper_backend::remote::{docker_command, CommandOutput, RemoteError, RemoteExecutor};

/// Records commands instead of running them
#[derive(Default)]
struct RecordingExecutor {
    commands: Mutex<Vec<String>>,
    fail: bool,
}

#[async_trait]
impl RemoteExecutor for RecordingExecutor {
    async fn execute(&self, command: &str) -> Result<CommandOutput, RemoteError> {
        self.commands.lock().unwrap().push(command.to_string());
        if self.fail {
            return Err(RemoteError::Connection("connection refused".to_string()));
        }
        Ok(CommandOutput {
            stdout: "ok\n".to_string(),
            stderr: String::new(),
            exit_code: Some(0),
        })
    }
}

#[tokio::test]
async fn test_docker_command_wraps_in_shell() {
    let executor = RecordingExecutor::default();
    let output = docker_command(&executor, "db", "psql -c \"select 1\"")
        .await
        .unwrap();

    assert!(output.success());
    assert_eq!(output.stdout, "ok\n");
    assert_eq!(
        executor.commands.lock().unwrap().as_slice(),
        [r#"docker exec -i db /bin/sh -c "psql -c \"select 1\"""#]
    );
}

#[tokio::test]
async fn test_docker_command_rejects_bad_container() {
    let executor = RecordingExecutor::default();
    let result = docker_command(&executor, "db && reboot", "ls").await;

    assert!(matches!(result, Err(RemoteError::InvalidCommand(_))));
    assert!(executor.commands.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_connection_failure_is_typed() {
    let executor = RecordingExecutor {
        fail: true,
        ..RecordingExecutor::default()
    };
    let result = docker_command(&executor, "db", "ls").await;
    assert!(matches!(result, Err(RemoteError::Connection(_))));
}
