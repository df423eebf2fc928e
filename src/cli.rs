use crate::auth::{AuthProvider, LocalSessionAuth};
use crate::router::{registry, resolve_initial_screen, AuthSignals, BackTarget, Shell};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fmt::Write as _;

/// Terminal client for the Courtside rec league
#[derive(Parser, Debug)]
#[command(name = "courtside", version, about = "Terminal client for the Courtside rec league", long_about = None)]
pub struct Cli {
    /// Launch location (`/auth/callback` and `/debug` open system screens)
    #[arg(long, default_value = "/", global = true)]
    pub path: String,

    /// League backend base URL (overrides config and COURTSIDE_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Log filter, e.g. `debug` or `courtside=trace` (overrides RUST_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List every screen with its shell and back target
    Screens,
    /// Show which screen the router picks for a session state
    Resolve {
        /// Auth is still loading
        #[arg(long)]
        loading: bool,
        /// A user is signed in
        #[arg(long)]
        authenticated: bool,
        /// The signed-in user finished onboarding
        #[arg(long)]
        onboarded: bool,
    },
    /// Show the stored session
    Whoami,
    /// Clear the stored session
    SignOut,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(&self) -> Result<()> {
        match &self.command {
            Some(Commands::Screens) => print!("{}", screens_table()),
            Some(Commands::Resolve {
                loading,
                authenticated,
                onboarded,
            }) => println!(
                "{}",
                resolve_report(&self.path, *loading, *authenticated, *onboarded)
            ),
            Some(Commands::Whoami) => Self::cmd_whoami()?,
            Some(Commands::SignOut) => Self::cmd_sign_out()?,
            None => {}
        }
        Ok(())
    }

    fn cmd_whoami() -> Result<()> {
        let auth = LocalSessionAuth::load(&crate::utils::get_session_path())
            .context("Failed to load session")?;

        match auth.current_user() {
            Some(user) => {
                println!("{} <{}>", user.display_name(), user.email);
                println!("id: {}", user.id);
                if let Some(at) = auth.signed_in_at() {
                    println!("signed in: {}", at.format("%Y-%m-%d %H:%M UTC"));
                }
            }
            None => println!("Not signed in."),
        }
        Ok(())
    }

    fn cmd_sign_out() -> Result<()> {
        let mut auth = LocalSessionAuth::load(&crate::utils::get_session_path())
            .context("Failed to load session")?;

        if auth.current_user().is_none() {
            println!("Not signed in.");
            return Ok(());
        }
        auth.sign_out().context("Failed to sign out")?;
        println!("Signed out.");
        Ok(())
    }
}

/// One line per registry entry.
pub fn screens_table() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<20} {:<16} {:<20} {}", "SCREEN", "SHELL", "BACK", "TITLE");
    for spec in registry::all() {
        let shell = match spec.shell {
            Shell::System => "system".to_string(),
            Shell::Entry => "entry".to_string(),
            Shell::Tabbed(tab) => format!("tab:{}", tab.label().to_lowercase()),
            Shell::Detail => "detail".to_string(),
        };
        let back = match spec.back {
            BackTarget::None => "-".to_string(),
            BackTarget::Screen(screen) => screen.to_string(),
            BackTarget::ActiveTab => "(active tab)".to_string(),
        };
        let title = if spec.captain_only {
            format!("{} [captain]", spec.title)
        } else {
            spec.title.to_string()
        };
        let _ = writeln!(out, "{:<20} {:<16} {:<20} {}", spec.screen, shell, back, title);
    }
    out
}

/// The screen the router would mount for the given inputs.
pub fn resolve_report(path: &str, loading: bool, authenticated: bool, onboarded: bool) -> String {
    let signals = AuthSignals {
        is_loading: loading,
        is_authenticated: authenticated,
        user_id: authenticated.then(|| "cli".to_string()),
        onboarding_completed: authenticated && onboarded,
        onboarding_known: authenticated,
    };
    resolve_initial_screen(path, &signals).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolve_flags() {
        let cli = Cli::parse_from([
            "courtside",
            "--path",
            "/debug",
            "resolve",
            "--authenticated",
            "--onboarded",
        ]);
        assert_eq!(cli.path, "/debug");
        assert_eq!(
            cli.command,
            Some(Commands::Resolve {
                loading: false,
                authenticated: true,
                onboarded: true
            })
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["courtside", "screens", "--api-url", "http://league.test/api"]);
        assert_eq!(cli.api_url.as_deref(), Some("http://league.test/api"));
        assert_eq!(cli.path, "/");
    }

    #[test]
    fn test_resolve_report() {
        assert_eq!(resolve_report("/", false, false, false), "welcome");
        assert_eq!(resolve_report("/", false, true, false), "onboarding");
        assert_eq!(resolve_report("/", false, true, true), "home");
        assert_eq!(resolve_report("/", true, false, false), "loading");
        assert_eq!(resolve_report("/debug", false, true, true), "debug");
        assert_eq!(resolve_report("/auth/callback", false, true, true), "oauth-callback");
    }

    #[test]
    fn test_screens_table_lists_every_screen() {
        let table = screens_table();
        assert_eq!(table.lines().count(), registry::all().len() + 1);
        assert!(table.contains("lineup-editor"));
        assert!(table.contains("[captain]"));
    }
}
