//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use folio_core::config;
use folio_core::logging::{self, LogTarget};
use folio_core::projects::{MediaType, ProjectPatch};
use folio_core::theme::ThemePatch;

mod commands;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Terminal portfolio with an interactive shell")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Inspect and edit the project directory
    Projects {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Inspect and edit the site theme
    Theme {
        #[command(subcommand)]
        command: ThemeCommands,
    },
    /// Manage project media
    Media {
        #[command(subcommand)]
        command: MediaCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Print a fresh config generated from defaults
    Generate,
}

#[derive(clap::Subcommand)]
enum ProjectCommands {
    /// List projects (hidden ones only with --all)
    List {
        /// Include hidden projects
        #[arg(short, long)]
        all: bool,
    },
    /// Show a project as JSON
    Show {
        /// The ID of the project to show
        #[arg(value_name = "PROJECT_ID")]
        id: String,
    },
    /// Write sample projects (if no project file exists)
    Init,
    /// Add a project with a timestamp ID
    Add {
        /// Display name
        #[arg(value_name = "NAME")]
        name: String,
        #[command(flatten)]
        fields: ProjectFields,
    },
    /// Edit fields of an existing project
    Edit {
        #[arg(value_name = "PROJECT_ID")]
        id: String,
        /// New display name
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: ProjectFields,
    },
    /// Delete a project
    Remove {
        #[arg(value_name = "PROJECT_ID")]
        id: String,
        /// Confirm the deletion
        #[arg(short, long)]
        yes: bool,
    },
}

/// Editable project fields. An empty value clears a link.
#[derive(clap::Args)]
struct ProjectFields {
    #[arg(long)]
    description: Option<String>,
    /// Comma-separated technologies
    #[arg(long)]
    tech_stack: Option<String>,
    #[arg(long)]
    live_url: Option<String>,
    #[arg(long)]
    repo_url: Option<String>,
    /// Public media path, e.g. from `folio media add`
    #[arg(long)]
    media_path: Option<String>,
    #[arg(long, value_enum)]
    media_type: Option<MediaKind>,
    /// Hide from the gallery and plain `ls`
    #[arg(long, value_name = "BOOL")]
    hidden: Option<bool>,
}

impl ProjectFields {
    fn into_patch(self, name: Option<String>) -> ProjectPatch {
        ProjectPatch {
            name,
            description: self.description,
            tech_stack: self.tech_stack,
            live_url: self.live_url,
            repo_url: self.repo_url,
            media_path: self.media_path,
            media_type: self.media_type.map(MediaType::from),
            hidden: self.hidden,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum MediaKind {
    Image,
    Video,
}

impl From<MediaKind> for MediaType {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Image => MediaType::Image,
            MediaKind::Video => MediaType::Video,
        }
    }
}

#[derive(clap::Subcommand)]
enum ThemeCommands {
    /// Show the theme and the CSS variables derived from it
    Show,
    /// Update theme fields (colours must be #RRGGBB)
    Set {
        #[arg(long, value_name = "HEX")]
        primary_color: Option<String>,
        #[arg(long, value_name = "HEX")]
        background_color: Option<String>,
        #[arg(long, value_name = "HEX")]
        accent_color: Option<String>,
        #[arg(long)]
        font: Option<String>,
        #[arg(long)]
        welcome_message: Option<String>,
        #[arg(long)]
        prompt: Option<String>,
        #[arg(long)]
        loading_command: Option<String>,
    },
}

#[derive(clap::Subcommand)]
enum MediaCommands {
    /// Copy a file into the media directory and print its public path
    Add {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Attach the file to this project
        #[arg(long, value_name = "PROJECT_ID")]
        project: Option<String>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = config::Config::load().context("load config")?;

    // The viewer owns the screen, so it logs to file; one-shot commands use stderr.
    let target = if cli.command.is_none() {
        LogTarget::File
    } else {
        LogTarget::Stderr
    };
    let _log_guard = logging::init(&config.logging, target)?;

    // default to the portfolio viewer
    let Some(command) = cli.command else {
        return commands::portfolio::run(&config);
    };

    match command {
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
        },
        Commands::Projects { command } => match command {
            ProjectCommands::List { all } => commands::projects::list(&config, all),
            ProjectCommands::Show { id } => commands::projects::show(&config, &id),
            ProjectCommands::Init => commands::projects::init(&config),
            ProjectCommands::Add { name, fields } => {
                commands::projects::add(&config, fields.into_patch(Some(name)))
            }
            ProjectCommands::Edit { id, name, fields } => {
                commands::projects::edit(&config, &id, fields.into_patch(name))
            }
            ProjectCommands::Remove { id, yes } => commands::projects::remove(&config, &id, yes),
        },
        Commands::Theme { command } => match command {
            ThemeCommands::Show => commands::theme::show(&config),
            ThemeCommands::Set {
                primary_color,
                background_color,
                accent_color,
                font,
                welcome_message,
                prompt,
                loading_command,
            } => commands::theme::set(
                &config,
                ThemePatch {
                    primary_color,
                    background_color,
                    accent_color,
                    font,
                    welcome_message,
                    prompt,
                    loading_command,
                },
            ),
        },
        Commands::Media { command } => match command {
            MediaCommands::Add { file, project } => {
                commands::media::add(&config, &file, project.as_deref())
            }
        },
    }
}
