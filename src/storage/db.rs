use std::path::Path;

use anyhow::{Context, Result};
use sea_orm::sea_query::Index;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};

use crate::entities::{project, timesheet, todo};

/// Local storage manager backed by an embedded SQLite database.
#[derive(Clone)]
pub struct LocalStorage {
    pub(crate) conn: DatabaseConnection,
}

impl LocalStorage {
    /// Open (or create) the database file at `path`.
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create database directory: {}", parent.display()))?;
            }
        }

        let url = format!("sqlite://{}?mode=rwc", path.display());
        Self::connect(&url)
            .await
            .with_context(|| format!("Failed to open database: {}", path.display()))
    }

    /// Private in-memory database, used by tests and dry runs.
    pub async fn in_memory() -> Result<Self> {
        Self::connect("sqlite::memory:").await
    }

    async fn connect(url: &str) -> Result<Self> {
        let mut options = ConnectOptions::new(url.to_owned());
        // a single connection serializes statements and keeps in-memory databases alive
        options
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        let conn = Database::connect(options).await?;
        let storage = Self { conn };
        storage.init_schema().await?;
        log::debug!("Storage ready at {}", url);
        Ok(storage)
    }

    /// Create tables and indexes when they do not exist yet.
    async fn init_schema(&self) -> Result<()> {
        self.create_table(project::Entity).await?;
        self.create_table(todo::Entity).await?;
        self.create_table(timesheet::Entity).await?;

        let backend = self.conn.get_database_backend();

        let project_branch = Index::create()
            .name("idx_project_folder_branch")
            .table(project::Entity)
            .col(project::Column::Folder)
            .col(project::Column::Branch)
            .unique()
            .if_not_exists()
            .to_owned();
        self.conn.execute(backend.build(&project_branch)).await?;

        let todo_position = Index::create()
            .name("idx_todo_project_position")
            .table(todo::Entity)
            .col(todo::Column::ProjectId)
            .col(todo::Column::Position)
            .if_not_exists()
            .to_owned();
        self.conn.execute(backend.build(&todo_position)).await?;

        let timesheet_created = Index::create()
            .name("idx_timesheet_created_at")
            .table(timesheet::Entity)
            .col(timesheet::Column::CreatedAt)
            .if_not_exists()
            .to_owned();
        self.conn.execute(backend.build(&timesheet_created)).await?;

        Ok(())
    }

    async fn create_table<E>(&self, entity: E) -> Result<()>
    where
        E: EntityTrait,
    {
        let backend = self.conn.get_database_backend();
        let table = entity.table_name().to_owned();
        let schema = Schema::new(backend);
        let mut statement = schema.create_table_from_entity(entity);
        statement.if_not_exists();
        self.conn
            .execute(backend.build(&statement))
            .await
            .with_context(|| format!("Failed to create table {}", table))?;
        Ok(())
    }

    /// Reclaim unused space in the database file.
    pub async fn vacuum(&self) -> Result<()> {
        self.conn.execute_unprepared("VACUUM").await?;
        Ok(())
    }

    /// The underlying connection.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }
}
