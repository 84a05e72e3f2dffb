//! User and session CLI commands
//!
//! Account management, login/logout, and the persisted theme flag.
//! Passwords are read from the terminal without echo; a `--password`
//! escape hatch exists for scripting.

use clap::Subcommand;

use crate::error::{HearthError, HearthResult};
use crate::models::{Role, UserId};
use crate::services::UserService;
use crate::storage::Storage;

/// User management subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Add a user
    Add {
        /// Username (unique, case-insensitive)
        username: String,

        /// Access role
        #[arg(short, long, value_enum, default_value_t = Role::User)]
        role: Role,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// List users
    List,

    /// Change a user's password
    Passwd {
        /// Username
        username: String,

        /// New password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Delete a user
    Delete {
        /// Username
        username: String,
    },
}

/// Theme subcommands
#[derive(Subcommand)]
pub enum ThemeCommands {
    /// Switch to the dark theme
    Dark,

    /// Switch to the light theme
    Light,

    /// Show the active theme
    Show,
}

/// Handle a user management command
pub fn handle_user_command(storage: &Storage, cmd: UserCommands) -> HearthResult<()> {
    let service = UserService::new(storage);

    match cmd {
        UserCommands::Add {
            username,
            role,
            password,
        } => {
            let password = password_or_prompt(password, "Password: ")?;
            let record = service.create(&username, &password, role)?;
            println!("Created {} '{}' ({})", record.role, record.username, record.id);
        }

        UserCommands::List => {
            let users = service.list()?;
            println!("{:<14}  {:<20}  {:<7}  {}", "ID", "Username", "Role", "Created");
            println!("{}", "-".repeat(60));
            for user in users {
                println!(
                    "{:<14}  {:<20}  {:<7}  {}",
                    user.id.to_string(),
                    user.username,
                    user.role.to_string(),
                    user.created_at.format("%Y-%m-%d")
                );
            }
        }

        UserCommands::Passwd { username, password } => {
            let id = find_user_id(&service, &username)?;
            let password = password_or_prompt(password, "New password: ")?;
            service.update(id, None, Some(&password))?;
            println!("Password updated for '{}'", username);
        }

        UserCommands::Delete { username } => {
            let id = find_user_id(&service, &username)?;
            service.delete(id)?;
            println!("Deleted user '{}'", username);
        }
    }

    Ok(())
}

/// Handle the login command
pub fn handle_login_command(
    storage: &Storage,
    username: String,
    password: Option<String>,
) -> HearthResult<()> {
    let service = UserService::new(storage);
    let password = password_or_prompt(password, "Password: ")?;

    let user = service.authenticate(&username, &password)?;
    println!("Logged in as '{}' ({})", user.username, user.role);
    Ok(())
}

/// Handle the logout command
pub fn handle_logout_command(storage: &Storage) -> HearthResult<()> {
    let service = UserService::new(storage);
    service.logout()?;
    println!("Logged out.");
    Ok(())
}

/// Handle the whoami command
pub fn handle_whoami_command(storage: &Storage) -> HearthResult<()> {
    let service = UserService::new(storage);
    match service.current_user() {
        Some(user) => println!("{} ({})", user.username, user.role),
        None => println!("Not logged in."),
    }
    Ok(())
}

/// Handle a theme command
pub fn handle_theme_command(storage: &Storage, cmd: ThemeCommands) -> HearthResult<()> {
    match cmd {
        ThemeCommands::Dark => {
            storage.session.set_dark_mode(true)?;
            println!("Theme set to dark.");
        }
        ThemeCommands::Light => {
            storage.session.set_dark_mode(false)?;
            println!("Theme set to light.");
        }
        ThemeCommands::Show => {
            let theme = if storage.session.dark_mode() {
                "dark"
            } else {
                "light"
            };
            println!("{}", theme);
        }
    }
    Ok(())
}

fn find_user_id(service: &UserService, username: &str) -> HearthResult<UserId> {
    let matches: Vec<UserId> = service
        .list()?
        .iter()
        .filter(|u| u.username_matches(username))
        .map(|u| u.id)
        .collect();

    match matches.as_slice() {
        [single] => Ok(*single),
        [] => Err(HearthError::user_not_found(username.to_string())),
        _ => Err(HearthError::Validation(format!(
            "Username '{}' matches multiple records",
            username
        ))),
    }
}

fn password_or_prompt(password: Option<String>, prompt: &str) -> HearthResult<String> {
    let password = match password {
        Some(p) => p,
        None => rpassword::prompt_password(prompt)
            .map_err(|e| HearthError::Account(format!("Failed to read password: {}", e)))?,
    };

    if password.is_empty() {
        return Err(HearthError::Validation(
            "Password cannot be empty".to_string(),
        ));
    }
    Ok(password)
}
