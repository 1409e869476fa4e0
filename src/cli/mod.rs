//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::Config;
use crate::logger::Logger;
use crate::shell::DirEnv;
use crate::storage::LocalStorage;

mod commands;

#[derive(Parser)]
#[command(name = "branchdo")]
#[command(version)]
#[command(about = "To-do lists and a timer for git branches")]
#[command(long_about = "\
branchdo ties to-do items to git repositories and branches without storing
any files in the repositories.

Run it without a command to open the list for the current branch, or to add
the first items when the branch has none.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Branch name to use instead of the checked out one
    #[arg(long, global = true, value_name = "NAME")]
    branch: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Add to-do items for the current branch
    ///
    /// Without arguments the editor opens for several items. Arguments are
    /// joined into a single item.
    Add {
        /// Put the item at the top of the list
        #[arg(short, long)]
        top: bool,

        #[arg(value_name = "WORDS")]
        words: Vec<String>,
    },

    /// Add to-do items to the repository queue
    Queue {
        #[arg(value_name = "WORDS")]
        words: Vec<String>,
    },

    /// Show what's next to do
    What,

    /// Mark the next item done and show the one after it
    Done,

    /// Show or set the name of the branch's to-do project
    Name {
        #[arg(value_name = "NAME")]
        name: Option<String>,
    },

    /// Start the timer for the current branch
    Start,

    /// Stop the timer, wherever it runs
    Stop,

    /// Run git commit with a message made of the done items
    ///
    /// Every argument is passed on to git. With --amend the items of the
    /// previous commit are included again; --amend --no-edit skips the
    /// message.
    Commit {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "GIT ARGS")]
        args: Vec<String>,
    },

    /// Print the items as a markdown changelist
    #[command(visible_alias = "cl")]
    Changelist {
        /// Show all items as a task list
        #[arg(short, long)]
        all: bool,

        /// Do not page the output
        #[arg(short, long)]
        no_pager: bool,
    },

    /// View the activity report
    Report {
        /// Number of days to look back
        #[arg(default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        days: u32,

        /// Start of the period (RFC 3339)
        #[arg(short, long, requires = "to")]
        from: Option<String>,

        /// End of the period (RFC 3339)
        #[arg(short, long, requires = "from")]
        to: Option<String>,

        /// Only repositories under this directory
        #[arg(short, long, value_name = "PATH")]
        dir: Option<std::path::PathBuf>,

        /// Print the report as JSON, timestamps in UTC
        #[arg(short, long)]
        json: bool,

        /// Use $PAGER for output, without colors
        #[arg(short, long)]
        pager: bool,
    },

    /// Check out or create a branch and add items in one go
    #[command(visible_alias = "p")]
    Pitch {
        #[arg(value_name = "BRANCH")]
        target: String,

        /// Items to add, one per argument
        #[arg(value_name = "ITEMS")]
        items: Vec<String>,

        /// Starting point of a new branch
        #[arg(short, long)]
        base: Option<String>,

        /// Project name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Maintenance of branch data
    Util {
        #[command(subcommand)]
        command: UtilCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum UtilCommands {
    /// List branches with data and their item counts
    List,
    /// Delete the data of the given branches
    Delete {
        /// Delete without asking
        #[arg(short, long)]
        yes: bool,

        #[arg(required = true, value_name = "BRANCH")]
        branches: Vec<String>,
    },
    /// Copy to-do items from one branch to another
    CopyItems {
        #[arg(value_name = "FROM")]
        from: String,
        #[arg(value_name = "TO")]
        to: String,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Write a default config file (if not present)
    Init,
    /// Show the path to the config file
    Path,
}

/// Everything a command needs: configuration, storage and the branch override.
pub(crate) struct AppContext {
    pub config: Config,
    pub storage: LocalStorage,
    branch: Option<String>,
    _logger: Logger,
}

impl AppContext {
    async fn open(branch: Option<String>) -> Result<Self> {
        let config = Config::load().context("load config")?;
        let logger = Logger::from_config(&config.logging)?;

        let path = config.database_path()?;
        log::debug!("Opening database {}", path.display());
        let storage = LocalStorage::open(&path).await?;

        Ok(Self {
            config,
            storage,
            branch,
            _logger: logger,
        })
    }

    /// Repository context, with the branch override and editor resolved.
    pub async fn dir_env(&self) -> Result<DirEnv> {
        let mut env = DirEnv::detect().await?;
        if let Some(branch) = &self.branch {
            env.branch = branch.clone();
        }
        env.editor = self.config.editor_command(&env.editor);
        Ok(env)
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    dispatch(cli).await
}

async fn dispatch(cli: Cli) -> Result<()> {
    // config commands must work even when the config is broken
    if let Some(Commands::Config { command }) = &cli.command {
        return match command {
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Path => commands::config::path(),
        };
    }

    let ctx = AppContext::open(cli.branch).await?;

    let Some(command) = cli.command else {
        return commands::items::list(&ctx).await;
    };

    match command {
        Commands::Add { top, words } => commands::items::add(&ctx, &words, top).await,
        Commands::Queue { words } => commands::items::queue(&ctx, &words).await,
        Commands::What => commands::items::what(&ctx).await,
        Commands::Done => commands::items::done(&ctx).await,
        Commands::Name { name } => commands::items::name(&ctx, name.as_deref()).await,

        Commands::Start => commands::timer::start(&ctx).await,
        Commands::Stop => commands::timer::stop(&ctx).await,

        Commands::Commit { args } => commands::commit::run(&ctx, &args).await,
        Commands::Changelist { all, no_pager } => commands::changelist::run(&ctx, all, no_pager).await,

        Commands::Report {
            days,
            from,
            to,
            dir,
            json,
            pager,
        } => {
            let options = commands::report::ReportOptions {
                days,
                range: from.zip(to),
                dir,
                json,
                pager,
            };
            commands::report::run(&ctx, options).await
        }

        Commands::Pitch {
            target,
            items,
            base,
            name,
        } => commands::pitch::run(&ctx, &target, &items, base.as_deref(), name.as_deref()).await,

        Commands::Util { command } => match command {
            UtilCommands::List => commands::util::list(&ctx).await,
            UtilCommands::Delete { yes, branches } => commands::util::delete(&ctx, &branches, yes).await,
            UtilCommands::CopyItems { from, to } => commands::util::copy_items(&ctx, &from, &to).await,
        },

        Commands::Config { .. } => Ok(()),
    }
}
