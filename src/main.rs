use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use hearth_budget::cli::{
    handle_expense_command, handle_export_command, handle_import_command, handle_income_command,
    handle_login_command, handle_logout_command, handle_rate_command, handle_saving_command,
    handle_statement_command, handle_summary_command, handle_sync_command, handle_theme_command,
    handle_timeline_command, handle_user_command, handle_whoami_command, RangeArgs,
};
use hearth_budget::config::{paths::HearthPaths, settings::Settings};
use hearth_budget::hosting::{InstallOutcome, ServiceManager, UninstallOutcome};
use hearth_budget::server::{self, ServeOptions};
use hearth_budget::services::UserService;
use hearth_budget::storage::Storage;

#[derive(Parser)]
#[command(
    name = "hearth",
    version,
    about = "Personal multi-currency household budgeting",
    long_about = "Hearth tracks incomes and two regional ledgers of expenses \
                  and savings, converts the secondary region through a \
                  configurable exchange rate, and reports monthly summaries, \
                  spending timelines, and a running-balance statement."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Income management commands
    #[command(subcommand)]
    Income(hearth_budget::cli::IncomeCommands),

    /// Expense management commands
    #[command(subcommand)]
    Expense(hearth_budget::cli::ExpenseCommands),

    /// Savings management commands
    #[command(subcommand)]
    Saving(hearth_budget::cli::SavingCommands),

    /// Exchange rate commands
    #[command(subcommand)]
    Rate(hearth_budget::cli::RateCommands),

    /// Show this month's income, spending, and remaining budget
    Summary,

    /// Show spending grouped by day
    Timeline {
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Show the running-balance statement
    Statement {
        #[command(flatten)]
        range: RangeArgs,
    },

    /// User management commands
    #[command(subcommand)]
    User(hearth_budget::cli::UserCommands),

    /// Log in as a user
    Login {
        /// Username (case-insensitive)
        username: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Log out the current user
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Export the budget and users to a JSON backup
    Export {
        /// Target file or directory (defaults to the backup directory)
        path: Option<PathBuf>,
    },

    /// Restore the budget from a JSON backup
    Import {
        /// Backup file to read
        file: PathBuf,
    },

    /// Remote mirror commands
    #[command(subcommand)]
    Sync(hearth_budget::cli::SyncCommands),

    /// Serve the browser bundle over HTTP
    Serve {
        /// Port to listen on (overrides settings)
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory with the built bundle (overrides settings)
        #[arg(long)]
        public_dir: Option<PathBuf>,
    },

    /// Background service commands
    #[command(subcommand)]
    Service(ServiceCommands),

    /// Theme commands
    #[command(subcommand)]
    Theme(hearth_budget::cli::ThemeCommands),

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

#[derive(Subcommand)]
enum ServiceCommands {
    /// Install and start the systemd user unit
    Install,

    /// Stop and remove the systemd user unit
    Uninstall,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hearth_budget=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = HearthPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    // An empty user directory gets a single bootstrap administrator
    if let Some(admin) = UserService::new(&storage).seed_if_empty()? {
        tracing::info!("Seeded administrator account '{}'", admin.username);
    }

    match cli.command {
        Some(Commands::Income(cmd)) => {
            handle_income_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Saving(cmd)) => {
            handle_saving_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Rate(cmd)) => {
            handle_rate_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Summary) => {
            handle_summary_command(&storage, &settings)?;
        }
        Some(Commands::Timeline { range }) => {
            handle_timeline_command(&storage, &settings, range)?;
        }
        Some(Commands::Statement { range }) => {
            handle_statement_command(&storage, &settings, range)?;
        }
        Some(Commands::User(cmd)) => {
            handle_user_command(&storage, cmd)?;
        }
        Some(Commands::Login { username, password }) => {
            handle_login_command(&storage, username, password)?;
        }
        Some(Commands::Logout) => {
            handle_logout_command(&storage)?;
        }
        Some(Commands::Whoami) => {
            handle_whoami_command(&storage)?;
        }
        Some(Commands::Export { path }) => {
            handle_export_command(&storage, path)?;
        }
        Some(Commands::Import { file }) => {
            handle_import_command(&storage, file)?;
        }
        Some(Commands::Sync(cmd)) => {
            handle_sync_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Serve { port, public_dir }) => {
            let options = ServeOptions {
                port: port.unwrap_or(settings.port),
                public_dir: public_dir.unwrap_or_else(|| settings.public_dir(&paths)),
                path_prefix: settings.path_prefix.clone(),
            };
            server::run(options)?;
        }
        Some(Commands::Service(cmd)) => {
            let manager = ServiceManager::new()?;
            match cmd {
                ServiceCommands::Install => match manager.install(settings.port)? {
                    InstallOutcome::Installed => {
                        println!("Service installed and started on port {}.", settings.port);
                    }
                    InstallOutcome::AlreadyInstalled => {
                        println!("Service is already installed.");
                    }
                },
                ServiceCommands::Uninstall => match manager.uninstall()? {
                    UninstallOutcome::Removed => println!("Service stopped and removed."),
                    UninstallOutcome::NotInstalled => println!("Service is not installed."),
                },
            }
        }
        Some(Commands::Theme(cmd)) => {
            handle_theme_command(&storage, cmd)?;
        }
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!("Hearth is already initialized at: {}", paths.base_dir().display());
            } else {
                settings.save(&paths)?;
                println!("Initialized Hearth at: {}", paths.data_dir().display());
                println!();
                println!("A 'root' administrator exists with the bootstrap password.");
                println!("Change it with 'hearth user passwd root'.");
            }
        }
        Some(Commands::Config) => {
            println!("Hearth Configuration");
            println!("====================");
            println!("Config directory: {}", paths.config_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Public directory: {}", settings.public_dir(&paths).display());
            println!();
            println!("Settings:");
            println!("  Port:             {}", settings.port);
            println!("  Path prefix:      {}", settings.path_prefix);
            println!("  Remote filename:  {}", settings.remote_filename);
            println!("  Primary symbol:   {}", settings.primary_symbol);
            println!("  Secondary symbol: {}", settings.secondary_symbol);
        }
        None => {
            println!("Hearth - personal multi-currency budgeting");
            println!();
            println!("Run 'hearth --help' for usage information.");
            println!("Run 'hearth summary' to see this month's numbers.");
        }
    }

    Ok(())
}
