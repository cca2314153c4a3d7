//! Staple CLI
//!
//! Drives the client shell from the command line, one screen action per
//! subcommand. The session token is kept in a cookie file between runs.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Read};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use staple::{
    generate_default_config, Config, CookieFileStore, LoggingConfig, Resolution, Route, Screen,
    SessionContext, Shell, StapleClient, TerminalAlerter, ViewContext,
};

#[derive(Parser)]
#[command(name = "staple")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A stack based bookmark")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL (overrides the configuration)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and keep the session
    Login {
        email: String,
        /// Password (read from stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Create an account and log in
    Signup {
        email: String,
        /// Password (read twice from stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// End the session
    Logout,

    /// Mail a password reset code
    Reset { email: String },

    /// Confirm a password reset with the mailed code
    Verify { email: String, code: String },

    /// Show the stack and the next staple
    List,

    /// Push a new staple onto the stack
    Push {
        /// Title
        name: String,
        /// Content (read from stdin when omitted)
        content: Option<String>,
    },

    /// Archive the next staple
    ArchiveNext,

    /// Delete the next staple
    DeleteNext,

    /// List archived staples
    Archive,

    /// Show one archived staple
    Show { id: String },

    /// Delete one archived staple
    Delete { id: String },

    /// Show account settings
    Settings,

    /// Set the maximum number of staples
    SetMax { max: String },

    /// Change the password (read twice from stdin)
    ChangePassword,

    /// Print the navigation entries for the current session
    Nav,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    init_tracing(&config.logging);

    let store = CookieFileStore::new(config.session.cookie_path());
    let session = SessionContext::new(Arc::new(store));
    let client = StapleClient::new(&config.api, session)?;
    let ctx = ViewContext::new(client, Arc::new(TerminalAlerter));
    let mut shell = Shell::new(ctx.clone());

    match cli.command {
        Commands::Login { email, password } => {
            enter(&mut shell, Route::Login).await?;
            let password = password_or_prompt(password, "Password")?;
            let Screen::Login(view) = shell.screen_mut() else {
                bail!("Login screen not mounted");
            };
            view.form.email = email;
            view.form.password = password;
            let transition = view.submit(&ctx).await;
            shell.apply(transition).await;
        }

        Commands::Signup { email, password } => {
            enter(&mut shell, Route::Signup).await?;
            let (password, confirm) = match password {
                Some(password) => (password.clone(), password),
                None => (
                    read_line("Password")?,
                    read_line("Confirm Password")?,
                ),
            };
            let Screen::Signup(view) = shell.screen_mut() else {
                bail!("Signup screen not mounted");
            };
            view.form.email = email;
            view.form.password = password;
            view.form.confirm_password = confirm;
            if !view.can_submit() {
                bail!("Passwords must be non-empty and match");
            }
            let transition = view.submit(&ctx).await;
            shell.apply(transition).await;
        }

        Commands::Logout => {
            shell.logout().await;
        }

        Commands::Reset { email } => {
            enter(&mut shell, Route::Reset).await?;
            let Screen::Reset(view) = shell.screen_mut() else {
                bail!("Reset screen not mounted");
            };
            view.email = email;
            let transition = view.submit(&ctx).await;
            shell.apply(transition).await;
        }

        Commands::Verify { email, code } => {
            enter(&mut shell, Route::Reset).await?;
            let Screen::Reset(view) = shell.screen_mut() else {
                bail!("Reset screen not mounted");
            };
            view.email = email;
            view.enter_code(code);
            let transition = view.submit(&ctx).await;
            shell.apply(transition).await;
        }

        Commands::List => {
            enter(&mut shell, Route::Home).await?;
        }

        Commands::Push { name, content } => {
            enter(&mut shell, Route::NewStaple).await?;
            let content = match content {
                Some(content) => content,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let Screen::NewStaple(view) = shell.screen_mut() else {
                bail!("New staple screen not mounted");
            };
            view.form.name = name;
            view.form.content = content;
            if !view.can_submit() {
                bail!("Title and content must not be empty");
            }
            let transition = view.submit(&ctx).await;
            shell.apply(transition).await;
        }

        Commands::ArchiveNext => {
            enter(&mut shell, Route::Home).await?;
            let Screen::Home(view) = shell.screen_mut() else {
                bail!("Home screen not mounted");
            };
            let transition = view.archive_next(&ctx).await;
            shell.apply(transition).await;
        }

        Commands::DeleteNext => {
            enter(&mut shell, Route::Home).await?;
            let Screen::Home(view) = shell.screen_mut() else {
                bail!("Home screen not mounted");
            };
            let transition = view.delete_next(&ctx).await;
            shell.apply(transition).await;
        }

        Commands::Archive => {
            enter(&mut shell, Route::Archive).await?;
        }

        Commands::Show { id } => {
            enter(&mut shell, Route::Archive).await?;
            let Screen::Archive(view) = shell.screen_mut() else {
                bail!("Archive screen not mounted");
            };
            view.select(&ctx, &id.as_str().into()).await;
        }

        Commands::Delete { id } => {
            enter(&mut shell, Route::Archive).await?;
            let Screen::Archive(view) = shell.screen_mut() else {
                bail!("Archive screen not mounted");
            };
            view.select(&ctx, &id.as_str().into()).await;
            if view.selected().is_none() {
                bail!("Staple {} not found in the archive", id);
            }
            let transition = view.delete_selected(&ctx).await;
            shell.apply(transition).await;
        }

        Commands::Settings => {
            enter(&mut shell, Route::Settings).await?;
        }

        Commands::SetMax { max } => {
            enter(&mut shell, Route::Settings).await?;
            let Screen::Settings(view) = shell.screen_mut() else {
                bail!("Settings screen not mounted");
            };
            view.max_input = max;
            if !view.can_save() {
                bail!("Maximum staples must be a non-negative integer");
            }
            let transition = view.save_max_staples(&ctx).await;
            shell.apply(transition).await;
        }

        Commands::ChangePassword => {
            enter(&mut shell, Route::Settings).await?;
            let password = read_line("New password")?;
            let confirm = read_line("Confirm Password")?;
            let Screen::Settings(view) = shell.screen_mut() else {
                bail!("Settings screen not mounted");
            };
            view.password.password = password;
            view.password.confirm_password = confirm;
            if !view.can_change_password() {
                bail!("Passwords must be non-empty and match");
            }
            let transition = view.change_password(&ctx).await;
            shell.apply(transition).await;
        }

        Commands::Nav => {
            for item in shell.nav_items() {
                println!("{}", item.label);
            }
            return Ok(());
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
            return Ok(());
        }
    }

    println!("{}", shell.render());
    Ok(())
}

/// Navigate, failing when a guard sends the user elsewhere
async fn enter(shell: &mut Shell, route: Route) -> anyhow::Result<()> {
    if let Resolution::Redirect { from, to } = shell.navigate(route).await {
        bail!("{} is not available, redirected to {}", from, to);
    }
    Ok(())
}

fn password_or_prompt(password: Option<String>, label: &str) -> anyhow::Result<String> {
    match password {
        Some(password) => Ok(password),
        None => read_line(label),
    }
}

fn read_line(label: &str) -> anyhow::Result<String> {
    eprint!("{}: ", label);
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

fn init_tracing(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("staple={}", config.level).into());
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
