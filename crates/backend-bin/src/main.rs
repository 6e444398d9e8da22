use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use linkkeeper_backend::{
    config::Settings,
    logging,
    remote::{docker_command, CommandOutput, RemoteExecutor, SshExecutor},
    router,
    storage::MemoryLinkStore,
    AppState,
};
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "linkkeeper", version, about = "Bookmark link API")]
struct Cli {
    /// Config file (toml, yaml or json); defaults to ./config.{toml,yaml,json}
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Run a shell command on the configured SSH host
    Exec {
        command: String,
    },
    /// Run a shell command inside a container on the configured SSH host
    Docker {
        container: String,
        command: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .context("failed to load settings")?;

    logging::init(&settings)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(settings).await,
        Command::Exec { command } => {
            let executor = SshExecutor::new(settings.ssh.clone());
            report(executor.execute(&command).await)
        },
        Command::Docker { container, command } => {
            let executor = SshExecutor::new(settings.ssh.clone());
            report(docker_command(&executor, &container, &command).await)
        },
    }
}

async fn serve(settings: Settings) -> anyhow::Result<()> {
    if settings.tokens.is_empty() {
        info!("no tokens configured; every link request will be rejected");
    }

    let addr = settings.bind_addr;
    let state = Arc::new(AppState::new(MemoryLinkStore::new(), settings));
    let app = router::create_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}

fn report(result: Result<CommandOutput, linkkeeper_backend::remote::RemoteError>) -> anyhow::Result<()> {
    match result {
        Ok(output) => {
            print!("{}", output.stdout);
            eprint!("{}", output.stderr);
            if !output.success() {
                anyhow::bail!("remote command exited with {:?}", output.exit_code);
            }
            Ok(())
        },
        Err(e) => {
            error!(error = %e, "remote command failed");
            Err(e.into())
        },
    }
}
