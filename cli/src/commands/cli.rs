use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "noted", about = "Synchronized notes client", version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Override the configured server base URL.
    #[arg(long, global = true)]
    pub server_url: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct AuthArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ListArgs {
    /// Output format: text or json.
    #[arg(long, default_value = "text")]
    pub format: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct CreateArgs {
    /// Note title. Must not be blank.
    pub title: String,

    #[arg(long, default_value = "")]
    pub content: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct EditArgs {
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub content: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct DeleteArgs {
    pub id: String,

    /// Skip the confirmation prompt.
    #[arg(long)]
    pub yes: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ShareArgs {
    pub id: String,

    /// Copy the public URL to the clipboard (best effort).
    #[arg(long)]
    pub copy: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct IdArgs {
    pub id: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account and log in.
    Register(AuthArgs),
    /// Log in with existing credentials.
    Login(AuthArgs),
    /// Clear the stored session token.
    Logout,
    /// Fetch and print the note collection.
    List(ListArgs),
    /// Create a new note.
    Create(CreateArgs),
    /// Update fields of an existing note.
    Edit(EditArgs),
    /// Delete a note (asks for confirmation unless --yes).
    Delete(DeleteArgs),
    /// Publish a note and print its public URL.
    Share(ShareArgs),
    /// Make a published note private again.
    Unshare(IdArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create() {
        let args =
            Args::try_parse_from(["noted", "create", "Groceries", "--content", "milk"]).unwrap();
        match args.command {
            Commands::Create(c) => {
                assert_eq!(c.title, "Groceries");
                assert_eq!(c.content, "milk");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_server_url() {
        let args = Args::try_parse_from(["noted", "list", "--server-url", "http://x"]).unwrap();
        assert_eq!(args.server_url.as_deref(), Some("http://x"));
    }

    #[test]
    fn test_delete_requires_id() {
        assert!(Args::try_parse_from(["noted", "delete"]).is_err());
    }
}
