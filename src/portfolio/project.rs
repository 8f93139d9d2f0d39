//! The project model, database queries and listing endpoint.

use axum::{Json, extract::State};
use rusqlite::{Connection, Row, types::Type};
use serde::Serialize;
use time::OffsetDateTime;

use crate::{AppState, DatabaseId, Error};

/// A project displayed on the portfolio site.
///
/// The `image_emoji` column is exposed on the wire as `image`, matching what
/// the frontend expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    /// The ID of the project.
    pub id: DatabaseId,
    /// The project title.
    pub title: String,
    /// What the project is about.
    pub description: String,
    /// The technologies used, in display order.
    pub technologies: Vec<String>,
    /// A short emoji used as the project thumbnail.
    #[serde(rename = "image")]
    pub image_emoji: String,
    /// Link to the source code, if public.
    pub link: Option<String>,
    /// Link to a live demo, if one exists.
    pub demo_link: Option<String>,
    /// Sort key, higher values are shown first.
    #[serde(skip)]
    pub sort_order: i64,
}

/// The data needed to create a new [Project].
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    /// The project title.
    pub title: String,
    /// What the project is about.
    pub description: String,
    /// The technologies used.
    pub technologies: Vec<String>,
    /// A short emoji used as the project thumbnail.
    pub image_emoji: String,
    /// Link to the source code, if public.
    pub link: Option<String>,
    /// Link to a live demo, if one exists.
    pub demo_link: Option<String>,
    /// Sort key, higher values are shown first.
    pub sort_order: i64,
}

/// Initialize the project table.
pub fn create_project_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS project (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            technologies TEXT NOT NULL,
            image_emoji TEXT NOT NULL DEFAULT '🚀',
            link TEXT,
            demo_link TEXT,
            sort_order INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// Create a project and return it with its generated ID.
pub fn create_project(new_project: NewProject, connection: &Connection) -> Result<Project, Error> {
    let technologies_json = serde_json::to_string(&new_project.technologies)
        .map_err(|error| Error::JsonSerializationError(error.to_string()))?;

    connection.execute(
        "INSERT INTO project (title, description, technologies, image_emoji, link, demo_link, sort_order, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        (
            &new_project.title,
            &new_project.description,
            &technologies_json,
            &new_project.image_emoji,
            &new_project.link,
            &new_project.demo_link,
            new_project.sort_order,
            OffsetDateTime::now_utc(),
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Project {
        id,
        title: new_project.title,
        description: new_project.description,
        technologies: new_project.technologies,
        image_emoji: new_project.image_emoji,
        link: new_project.link,
        demo_link: new_project.demo_link,
        sort_order: new_project.sort_order,
    })
}

/// Retrieve all projects ordered by (sort_order desc, created_at desc).
pub fn get_all_projects(connection: &Connection) -> Result<Vec<Project>, Error> {
    connection
        .prepare(
            "SELECT id, title, description, technologies, image_emoji, link, demo_link, sort_order
             FROM project
             ORDER BY sort_order DESC, created_at DESC;",
        )?
        .query_map([], map_row)?
        .map(|maybe_project| maybe_project.map_err(|error| error.into()))
        .collect()
}

fn map_row(row: &Row) -> Result<Project, rusqlite::Error> {
    let raw_technologies: String = row.get(3)?;
    let technologies = serde_json::from_str(&raw_technologies)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(error)))?;

    Ok(Project {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        technologies,
        image_emoji: row.get(4)?,
        link: row.get(5)?,
        demo_link: row.get(6)?,
        sort_order: row.get(7)?,
    })
}

/// List all projects, newest first per the entity's sort rule.
pub async fn get_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    Ok(Json(get_all_projects(&connection)?))
}
