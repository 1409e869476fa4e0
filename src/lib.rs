//! branchdo - to-do lists and a timer for git branches
//!
//! Items are tied to a repository folder and a branch without storing any
//! files in the repository. The heart of the tool is an interactive terminal
//! list built with Ratatui; the command line covers adding items, the timer,
//! commits prepared from finished work and activity reports.
//!
//! # Modules
//!
//! * [`cli`] - Command line parsing and command handlers
//! * [`config`] - Application configuration management
//! * [`storage`] - Local SQLite database and the [`storage::TodoStore`] seam
//! * [`shell`] - git, the user's editor and the pager
//! * [`ui`] - The interactive list
//! * [`report`] - Activity report aggregation
//! * [`utils`] - Date/time and word wrapping helpers

/// Command line interface
pub mod cli;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// SeaORM entity models for database tables
pub mod entities;

/// File logging behind the `log` facade
pub mod logger;

/// Activity reports over items and recorded time
pub mod report;

/// Repository layer for database operations
pub mod repositories;

/// External programs: git, editor and pager
pub mod shell;

/// Local storage of projects, items and timesheets
pub mod storage;

/// Terminal user interface components and rendering
pub mod ui;

/// Utility functions for date/time handling and text wrapping
pub mod utils;

// Re-export entity models for convenient access
pub use entities::{project, timesheet, todo};
