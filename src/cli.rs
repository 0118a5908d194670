use std::io::Write;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::AppState;

/// tokendesk — workspaces and revocable API tokens over flat CSV files
#[derive(Parser)]
#[command(name = "tokendesk", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to bind (defaults to TOKENDESK_PORT or 3000)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Manage workspaces
    Workspace {
        #[command(subcommand)]
        command: WorkspaceCommands,
    },

    /// Manage API tokens
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },

    /// Print bcrypt hashes for rows of users.csv
    HashPassword {
        #[arg(required = true)]
        passwords: Vec<String>,
        #[arg(long, default_value_t = 10)]
        cost: u32,
    },
}

#[derive(Subcommand)]
pub enum WorkspaceCommands {
    /// List all workspaces
    List,
    /// Create a workspace
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
}

#[derive(Subcommand)]
pub enum TokenCommands {
    /// Issue a token under a workspace (the secret is printed once)
    Create {
        #[arg(long)]
        workspace_id: String,
        #[arg(long)]
        name: String,
    },
    /// List tokens for a workspace
    List {
        #[arg(long)]
        workspace_id: String,
        /// Include revoked tokens
        #[arg(long)]
        all: bool,
    },
    /// Revoke a token
    Revoke {
        #[arg(long)]
        token_id: String,
    },
}

pub fn handle_workspace_command(
    cmd: WorkspaceCommands,
    state: &AppState,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match cmd {
        WorkspaceCommands::List => {
            let workspaces = state.workspaces.list();
            if workspaces.is_empty() {
                writeln!(out, "No workspaces found.")?;
            } else {
                writeln!(out, "{:<38} {:<20} DESCRIPTION", "ID", "TITLE")?;
                for w in workspaces {
                    writeln!(out, "{:<38} {:<20} {}", w.id, w.title, w.description)?;
                }
            }
        }
        WorkspaceCommands::Create { title, description } => {
            let ws = state.workspaces.create(&title, &description)?;
            writeln!(out, "Workspace created:\n  ID:    {}\n  Title: {}", ws.id, ws.title)?;
        }
    }
    Ok(())
}

pub fn handle_token_command(
    cmd: TokenCommands,
    state: &AppState,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match cmd {
        TokenCommands::Create { workspace_id, name } => {
            if state.workspaces.get(&workspace_id).is_none() {
                writeln!(out, "warning: no workspace with id {}", workspace_id)?;
            }
            let token = state.tokens.create(&workspace_id, &name)?;
            writeln!(
                out,
                "Token created:\n  ID:     {}\n  Name:   {}\n  Secret: {}",
                token.id, token.name, token.secret
            )?;
        }
        TokenCommands::List { workspace_id, all } => {
            let tokens: Vec<_> = if all {
                state
                    .tokens
                    .list_all()
                    .into_iter()
                    .filter(|t| t.workspace_id == workspace_id)
                    .collect()
            } else {
                state.tokens.list_active(&workspace_id)
            };
            if tokens.is_empty() {
                writeln!(out, "No tokens found.")?;
            } else {
                writeln!(out, "{:<38} {:<20} {:<26} REVOKED", "ID", "NAME", "CREATED")?;
                for t in tokens {
                    writeln!(
                        out,
                        "{:<38} {:<20} {:<26} {}",
                        t.id,
                        t.name,
                        t.created_at.as_str(),
                        t.revoked_at.as_ref().map(|r| r.as_str()).unwrap_or_default()
                    )?;
                }
            }
        }
        TokenCommands::Revoke { token_id } => match state.tokens.revoke(&token_id)? {
            Some(_) => writeln!(out, "Token revoked.")?,
            None => anyhow::bail!("token not found: {}", token_id),
        },
    }
    Ok(())
}

/// One bcrypt hash per line, in argument order.
pub fn hash_passwords(passwords: &[String], cost: u32, out: &mut impl Write) -> anyhow::Result<()> {
    for password in passwords {
        let hash = bcrypt::hash(password, cost).context("hashing password")?;
        writeln!(out, "{}", hash)?;
    }
    Ok(())
}
