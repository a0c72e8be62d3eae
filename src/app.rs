use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Crowdfund - register, log in and manage crowdfunding campaigns
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding users.json, projects.json and crowdfund.toml
    /// (default: storage.data_dir from the config, else the current directory)
    #[arg(long, global = true, env = "CROWDFUND_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file (default: <data-dir>/crowdfund.toml)
    #[arg(long, global = true, env = "CROWDFUND_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable JSON log format
    #[arg(long, global = true, env = "CROWDFUND_LOG_JSON")]
    pub log_json: bool,

    /// Log rotation period: daily, hourly, or never
    #[arg(long, global = true, env = "CROWDFUND_LOG_ROTATION")]
    pub log_rotation: Option<String>,

    /// Custom log directory (default: ~/.crowdfund/logs)
    #[arg(long, global = true, env = "CROWDFUND_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new account
    Register(RegisterArgs),
    /// Check credentials
    Login(Credentials),
    /// Manage projects
    #[command(subcommand)]
    Projects(ProjectCommand),
}

#[derive(ClapArgs, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub confirm_password: String,
    /// Egyptian mobile number (010, 011, 012 or 015 followed by 8 digits)
    #[arg(long)]
    pub phone: String,
}

#[derive(ClapArgs, Debug)]
pub struct Credentials {
    #[arg(long, env = "CROWDFUND_EMAIL")]
    pub email: String,
    #[arg(long, env = "CROWDFUND_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// Show every project
    List,
    /// Show your own projects
    Mine(Credentials),
    /// Create a project
    Create {
        #[command(flatten)]
        credentials: Credentials,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        details: String,
        /// Total target in EGP
        #[arg(long)]
        target: String,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: String,
    },
    /// Edit one of your projects; omitted fields keep their value
    Edit {
        #[command(flatten)]
        credentials: Credentials,
        /// Project number as shown by `projects mine`
        #[arg(long)]
        number: usize,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        details: Option<String>,
        #[arg(long)]
        target: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    /// Delete one of your projects
    Delete {
        #[command(flatten)]
        credentials: Credentials,
        /// Project number as shown by `projects mine`
        #[arg(long)]
        number: usize,
    },
    /// Show projects running on a date
    Search {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },
}
