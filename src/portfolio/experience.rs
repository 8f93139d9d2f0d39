//! The work experience model, database queries and listing endpoint.

use axum::{Json, extract::State};
use rusqlite::{Connection, Row, types::Type};
use serde::Serialize;
use time::OffsetDateTime;

use crate::{AppState, DatabaseId, Error};

/// A work experience entry displayed on the portfolio site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Experience {
    /// The ID of the experience entry.
    pub id: DatabaseId,
    /// The job title.
    pub title: String,
    /// The employer.
    pub company: String,
    /// The employment period as free text, e.g. "2021 - 2023".
    pub period: String,
    /// What the role involved.
    pub description: String,
    /// The technologies used in the role, in display order.
    pub technologies: Vec<String>,
    /// Sort key, higher values are shown first.
    #[serde(skip)]
    pub sort_order: i64,
}

/// The data needed to create a new [Experience].
#[derive(Debug, Clone, PartialEq)]
pub struct NewExperience {
    /// The job title.
    pub title: String,
    /// The employer.
    pub company: String,
    /// The employment period as free text.
    pub period: String,
    /// What the role involved.
    pub description: String,
    /// The technologies used in the role.
    pub technologies: Vec<String>,
    /// Sort key, higher values are shown first.
    pub sort_order: i64,
}

/// Initialize the experience table.
pub fn create_experience_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS experience (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            company TEXT NOT NULL,
            period TEXT NOT NULL,
            description TEXT NOT NULL,
            technologies TEXT NOT NULL,
            sort_order INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// Create an experience entry and return it with its generated ID.
pub fn create_experience(
    new_experience: NewExperience,
    connection: &Connection,
) -> Result<Experience, Error> {
    let technologies_json = serde_json::to_string(&new_experience.technologies)
        .map_err(|error| Error::JsonSerializationError(error.to_string()))?;

    connection.execute(
        "INSERT INTO experience (title, company, period, description, technologies, sort_order, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        (
            &new_experience.title,
            &new_experience.company,
            &new_experience.period,
            &new_experience.description,
            &technologies_json,
            new_experience.sort_order,
            OffsetDateTime::now_utc(),
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Experience {
        id,
        title: new_experience.title,
        company: new_experience.company,
        period: new_experience.period,
        description: new_experience.description,
        technologies: new_experience.technologies,
        sort_order: new_experience.sort_order,
    })
}

/// Retrieve all experience entries ordered by (sort_order desc, created_at desc).
pub fn get_all_experiences(connection: &Connection) -> Result<Vec<Experience>, Error> {
    connection
        .prepare(
            "SELECT id, title, company, period, description, technologies, sort_order
             FROM experience
             ORDER BY sort_order DESC, created_at DESC;",
        )?
        .query_map([], map_row)?
        .map(|maybe_experience| maybe_experience.map_err(|error| error.into()))
        .collect()
}

fn map_row(row: &Row) -> Result<Experience, rusqlite::Error> {
    let raw_technologies: String = row.get(5)?;
    let technologies = serde_json::from_str(&raw_technologies)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(error)))?;

    Ok(Experience {
        id: row.get(0)?,
        title: row.get(1)?,
        company: row.get(2)?,
        period: row.get(3)?,
        description: row.get(4)?,
        technologies,
        sort_order: row.get(6)?,
    })
}

/// List all experience entries, newest first per the entity's sort rule.
pub async fn get_experiences(State(state): State<AppState>) -> Result<Json<Vec<Experience>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    Ok(Json(get_all_experiences(&connection)?))
}

#[cfg(test)]
mod experience_tests {
    use rusqlite::Connection;

    use super::{NewExperience, create_experience, create_experience_table, get_all_experiences};

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_experience_table(&connection).expect("Could not create experience table");
        connection
    }

    fn new_experience(title: &str, sort_order: i64) -> NewExperience {
        NewExperience {
            title: title.to_owned(),
            company: "Acme Corp".to_owned(),
            period: "2021 - 2023".to_owned(),
            description: "Built backend services.".to_owned(),
            technologies: vec!["Rust".to_owned(), "SQLite".to_owned()],
            sort_order,
        }
    }

    #[test]
    fn create_experience_round_trips_technologies() {
        let connection = get_test_db_connection();

        let experience =
            create_experience(new_experience("Backend Developer", 1), &connection).unwrap();

        let experiences = get_all_experiences(&connection).unwrap();

        assert_eq!(experiences, vec![experience]);
        assert_eq!(experiences[0].technologies, vec!["Rust", "SQLite"]);
    }

    #[test]
    fn get_all_experiences_orders_by_sort_order_descending() {
        let connection = get_test_db_connection();

        create_experience(new_experience("Junior Developer", 1), &connection).unwrap();
        create_experience(new_experience("Senior Developer", 3), &connection).unwrap();
        create_experience(new_experience("Developer", 2), &connection).unwrap();

        let experiences = get_all_experiences(&connection).unwrap();

        let titles: Vec<_> = experiences
            .iter()
            .map(|experience| experience.title.as_str())
            .collect();
        assert_eq!(
            titles,
            vec!["Senior Developer", "Developer", "Junior Developer"]
        );
    }

    #[test]
    fn get_all_experiences_returns_empty_vec_for_empty_table() {
        let connection = get_test_db_connection();

        let experiences = get_all_experiences(&connection).unwrap();

        assert_eq!(experiences, vec![]);
    }
}
