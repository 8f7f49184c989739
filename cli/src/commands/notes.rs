//! Note commands: list, create, edit, delete, share, unshare.

use std::io::Write;

use noted_core::api as core_api;

use crate::app::App;
use crate::commands::cli::{CreateArgs, DeleteArgs, EditArgs, IdArgs, ListArgs, ShareArgs};

fn require_session(app: &App) -> Result<(), core_api::CliError> {
    if app.session.session().authenticated() {
        Ok(())
    } else {
        Err(core_api::CliError::Command(
            "not logged in; run `noted login` first".to_string(),
        ))
    }
}

pub async fn handle_list(app: &mut App, args: ListArgs) -> Result<(), core_api::CliError> {
    require_session(app)?;

    let token = app.session.current_token().map(str::to_string);
    if app.notes.refresh(token.as_deref()).await.is_none() {
        return Err(core_api::CliError::Command(app.latest_status()));
    }
    let notes = app.notes.notes();

    match args.format.as_str() {
        "json" => {
            let out = serde_json::to_string_pretty(notes)
                .map_err(|e| core_api::CliError::Command(format!("serialize failed: {e}")))?;
            println!("{out}");
        }
        _ => {
            if notes.is_empty() {
                println!("no notes");
            }
            for note in notes {
                let marker = if note.is_public { "public" } else { "private" };
                println!("{}  [{}]  {}", note.id, marker, note.title);
            }
        }
    }
    Ok(())
}

pub async fn handle_create(app: &mut App, args: CreateArgs) -> Result<(), core_api::CliError> {
    require_session(app)?;

    if args.title.trim().is_empty() {
        return Err(core_api::CliError::Command(
            "title must not be empty".to_string(),
        ));
    }

    let token = app.session.current_token().map(str::to_string);
    match app
        .notes
        .create(token.as_deref(), &args.title, &args.content)
        .await
    {
        Some(note) => {
            println!("created {}", note.id);
            Ok(())
        }
        None => Err(core_api::CliError::Command(app.latest_status())),
    }
}

pub async fn handle_edit(app: &mut App, args: EditArgs) -> Result<(), core_api::CliError> {
    require_session(app)?;

    if args.title.is_none() && args.content.is_none() {
        return Err(core_api::CliError::Command(
            "nothing to change; pass --title and/or --content".to_string(),
        ));
    }

    let patch = core_api::NotePatch {
        title: args.title,
        content: args.content,
        is_public: None,
    };
    let token = app.session.current_token().map(str::to_string);
    match app.notes.update(token.as_deref(), &args.id, patch).await {
        Some(note) => {
            println!("updated {}", note.id);
            Ok(())
        }
        None => Err(core_api::CliError::Command(app.latest_status())),
    }
}

pub async fn handle_delete(app: &mut App, args: DeleteArgs) -> Result<(), core_api::CliError> {
    require_session(app)?;

    // The store contract requires confirmation to be obtained before the
    // request is issued; the prompt lives here in the UI layer.
    if !args.yes && !confirm_delete(&args.id)? {
        println!("aborted");
        return Ok(());
    }

    let token = app.session.current_token().map(str::to_string);
    if app.notes.delete(token.as_deref(), &args.id).await {
        println!("deleted {}", args.id);
        Ok(())
    } else {
        Err(core_api::CliError::Command(app.latest_status()))
    }
}

pub async fn handle_share(app: &mut App, args: ShareArgs) -> Result<(), core_api::CliError> {
    require_session(app)?;

    let token = app.session.current_token().map(str::to_string);
    match app.notes.publish(token.as_deref(), &args.id).await {
        Some((_note, Some(url))) => {
            println!("{url}");
            if args.copy {
                copy_to_clipboard(&url);
            }
            Ok(())
        }
        Some((_note, None)) => {
            // published, but the server minted no link to print or copy
            println!("{}", app.latest_status());
            Ok(())
        }
        None => Err(core_api::CliError::Command(app.latest_status())),
    }
}

pub async fn handle_unshare(app: &mut App, args: IdArgs) -> Result<(), core_api::CliError> {
    require_session(app)?;

    let token = app.session.current_token().map(str::to_string);
    match app.notes.unpublish(token.as_deref(), &args.id).await {
        Some(note) => {
            println!("unshared {}", note.id);
            Ok(())
        }
        None => Err(core_api::CliError::Command(app.latest_status())),
    }
}

fn confirm_delete(id: &str) -> Result<bool, core_api::CliError> {
    print!("Delete note {id}? [y/N]: ");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin()
        .read_line(&mut input)
        .map_err(|e| core_api::CliError::Command(format!("Failed to read input: {}", e)))?;

    Ok(matches!(
        input.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// Best effort: clipboard may be unavailable (headless session); failures
/// are swallowed and the URL is still printed.
fn copy_to_clipboard(text: &str) {
    match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.to_string())) {
        Ok(()) => {}
        Err(err) => tracing::debug!(target: "noted.cli", "clipboard copy failed: {err}"),
    }
}
