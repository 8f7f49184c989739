//! Session commands: register, login, logout.

use noted_core::api as core_api;

use crate::app::App;
use crate::commands::cli::AuthArgs;

pub async fn handle_register(app: &mut App, args: AuthArgs) -> Result<(), core_api::CliError> {
    authenticate(app, core_api::AuthKind::Register, args).await
}

pub async fn handle_login(app: &mut App, args: AuthArgs) -> Result<(), core_api::CliError> {
    authenticate(app, core_api::AuthKind::Login, args).await
}

async fn authenticate(
    app: &mut App,
    kind: core_api::AuthKind,
    args: AuthArgs,
) -> Result<(), core_api::CliError> {
    // Re-authenticating on top of a live session is not a supported path.
    if app.session.session().authenticated() {
        return Err(core_api::CliError::Command(
            "already logged in; run `noted logout` first".to_string(),
        ));
    }

    let session = app
        .session
        .authenticate(kind, &args.email, &args.password)
        .await;
    if !session.authenticated() {
        return Err(core_api::CliError::Command(app.latest_status()));
    }
    println!("{}", app.latest_status());

    // A fresh session triggers the initial collection refresh.
    app.notes.refresh(app.session.current_token()).await;
    println!("{}", app.latest_status());
    Ok(())
}

pub fn handle_logout(app: &mut App) -> Result<(), core_api::CliError> {
    app.session.logout();
    // Session-scoped state must not leak across sessions.
    app.notes.clear();
    println!("{}", app.latest_status());
    Ok(())
}
