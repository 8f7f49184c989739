use clap::Parser;

mod app;
mod commands;

use commands::cli::{Args, Commands};
use noted_core::api as core_api;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, core_api::CliError> {
    let args = Args::parse();
    let cfg = core_api::load_default().map_err(|e| core_api::CliError::Config(e.to_string()))?;
    init_tracing(&cfg.logging).map_err(core_api::CliError::Command)?;

    let mut app = app::App::build(&cfg, args.server_url.as_deref())?;

    match args.command {
        Commands::Register(a) => commands::auth::handle_register(&mut app, a).await?,
        Commands::Login(a) => commands::auth::handle_login(&mut app, a).await?,
        Commands::Logout => commands::auth::handle_logout(&mut app)?,
        Commands::List(a) => commands::notes::handle_list(&mut app, a).await?,
        Commands::Create(a) => commands::notes::handle_create(&mut app, a).await?,
        Commands::Edit(a) => commands::notes::handle_edit(&mut app, a).await?,
        Commands::Delete(a) => commands::notes::handle_delete(&mut app, a).await?,
        Commands::Share(a) => commands::notes::handle_share(&mut app, a).await?,
        Commands::Unshare(a) => commands::notes::handle_unshare(&mut app, a).await?,
    }

    Ok(0)
}

fn exit_code_for_error(e: &core_api::CliError) -> i32 {
    // 0: success
    // 11: config error
    // 20: transport/server failure
    // 50: internal/uncategorized
    match e {
        core_api::CliError::Config(_) => 11,
        core_api::CliError::Api(_) => 20,
        core_api::CliError::Command(_) => 1,
        core_api::CliError::Io(_) => 20,
        core_api::CliError::Anyhow(_) => 50,
    }
}

fn init_tracing(logging: &core_api::LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("NOTED_LOG") {
        Ok(v) if !v.trim().is_empty() => {
            EnvFilter::try_new(v).map_err(|e| e.to_string())?
        }
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(d),
            None => std::env::temp_dir().join("noted"),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let file_name = format!("noted.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    // Enabled but both sinks off is a valid quiet config; install nothing.
    if !logging.console && maybe_writer.is_none() {
        return Ok(());
    }

    let console_layer = logging.console.then(|| {
        use std::io::IsTerminal;
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_logging_config_is_not_an_error() {
        let logging = core_api::LoggingConfig {
            enabled: true,
            console: false,
            file: false,
            level: "info".to_string(),
            directory: None,
        };
        assert!(init_tracing(&logging).is_ok());
    }
}
