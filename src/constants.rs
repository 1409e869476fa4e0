//! Constants used throughout the application
//!
//! This module centralizes magic strings, UI text, and other constant values
//! to improve maintainability and consistency.

/// Branch name of the per-repository queue project.
pub const QUEUE_BRANCH: &str = "*";

/// Prefix of the stash message created for a to-do item, followed by its id.
pub const STASH_LABEL_PREFIX: &str = "branchdo_";

/// Prefix of scratch files handed to the editor.
pub const SCRATCH_FILE_PREFIX: &str = "branchdo_";

/// Environment variable overriding the database location.
pub const DB_PATH_ENV: &str = "BRANCHDO_DB";

/// Default database file name, placed in the home directory.
pub const DEFAULT_DB_FILE: &str = ".branchdo.db";

/// Scratch file template for adding several items at once. The cursor is
/// placed on [`ITEMS_TEMPLATE_START_LINE`].
pub const ITEMS_TEMPLATE: &str = "# Start a line with a hyphen (-) to indicate a new item.\n# Comments like this are ignored.\n- ";
pub const ITEMS_TEMPLATE_START_LINE: usize = 3;

// Confirmation prompts
pub const PROMPT_DELETE_ACTIVE: &str = "delete todo item: are you sure? (y/n) ";
pub const PROMPT_DELETE_QUEUE: &str = "delete queue item: are you sure? (y/n) ";
pub const PROMPT_PUSH_STASH: &str = "push changes to stash? (y/n) ";
pub const PROMPT_POP_STASH: &str = "pop changes from stash? (y/n) ";

// Footer hints
pub const HINT_ACTIVE: &str = "to-do items: toggle help with 'h' or '?'";
pub const HINT_QUEUE: &str = "queue items: toggle help with 'h' or '?'";

// Body section titles
pub const TITLE_ACTIVE: &str = "  TO-DO LIST:";
pub const TITLE_QUEUE: &str = "  QUEUE:";

// Item markers
pub const MARKER_COMMITTED: &str = "committed";
pub const MARKER_STASHED: &str = "stashed: ";

// CLI messages
pub const ALL_DONE: &str = "All done!";
pub const CONFIG_GENERATED: &str = "Generated default configuration file";
