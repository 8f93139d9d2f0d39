//! Contact message submission: form validation, the data model and the
//! public submission endpoint.
//!
//! Validation is an explicit step on the form type so that it can be tested
//! without going through the HTTP layer. Marking messages as read is an
//! admin-side concern and has no endpoint here.

use std::{collections::BTreeMap, str::FromStr};

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use email_address::EmailAddress;
use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::OffsetDateTime;

use crate::{AppState, DatabaseId, Error};

/// The maximum length of the sender name, in characters.
const MAX_NAME_LENGTH: usize = 100;
/// The maximum length of the subject line, in characters.
const MAX_SUBJECT_LENGTH: usize = 200;

/// Per-field error messages collected while validating a write request.
///
/// Serializes as a map from field name to a list of messages, e.g.
/// `{"email": ["Enter a valid email address."]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, Vec<String>>);

impl ValidationErrors {
    /// Record an error message against `field`.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    /// Whether any errors have been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether an error has been recorded against `field`.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }
}

/// A message sent through the portfolio site's contact form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactMessage {
    /// The ID of the message.
    pub id: DatabaseId,
    /// The sender's name.
    pub name: String,
    /// The sender's email address.
    pub email: String,
    /// The subject line.
    pub subject: String,
    /// The message body.
    pub message: String,
    /// Whether the site owner has read the message. Always false on creation.
    pub is_read: bool,
}

/// A validated contact message, ready to be inserted.
///
/// Obtained from [ContactMessageForm::validate].
#[derive(Debug, Clone, PartialEq)]
pub struct NewContactMessage {
    /// The sender's name.
    pub name: String,
    /// The sender's email address.
    pub email: String,
    /// The subject line.
    pub subject: String,
    /// The message body.
    pub message: String,
}

/// The raw submission payload before validation.
///
/// All fields default to empty strings so that missing JSON keys are reported
/// as validation errors rather than rejected during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactMessageForm {
    /// The sender's name.
    #[serde(default)]
    pub name: String,
    /// The sender's email address.
    #[serde(default)]
    pub email: String,
    /// The subject line.
    #[serde(default)]
    pub subject: String,
    /// The message body.
    #[serde(default)]
    pub message: String,
}

impl ContactMessageForm {
    /// Check the form and produce a [NewContactMessage], or the per-field
    /// errors if any field is missing or malformed.
    pub fn validate(self) -> Result<NewContactMessage, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.name.trim().is_empty() {
            errors.add("name", "This field is required.");
        } else if self.name.chars().count() > MAX_NAME_LENGTH {
            errors.add(
                "name",
                format!("Ensure this field has no more than {MAX_NAME_LENGTH} characters."),
            );
        }

        if self.email.trim().is_empty() {
            errors.add("email", "This field is required.");
        } else if EmailAddress::from_str(&self.email).is_err() {
            errors.add("email", "Enter a valid email address.");
        }

        if self.subject.trim().is_empty() {
            errors.add("subject", "This field is required.");
        } else if self.subject.chars().count() > MAX_SUBJECT_LENGTH {
            errors.add(
                "subject",
                format!("Ensure this field has no more than {MAX_SUBJECT_LENGTH} characters."),
            );
        }

        if self.message.trim().is_empty() {
            errors.add("message", "This field is required.");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewContactMessage {
            name: self.name,
            email: self.email,
            subject: self.subject,
            message: self.message,
        })
    }
}

/// Initialize the contact message table.
pub fn create_contact_message_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS contact_message (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            subject TEXT NOT NULL,
            message TEXT NOT NULL,
            is_read INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// Insert a contact message, unread, and return it with its generated ID.
pub fn create_contact_message(
    new_message: NewContactMessage,
    connection: &Connection,
) -> Result<ContactMessage, Error> {
    connection.execute(
        "INSERT INTO contact_message (name, email, subject, message, is_read, created_at)
         VALUES (?1, ?2, ?3, ?4, 0, ?5)",
        (
            &new_message.name,
            &new_message.email,
            &new_message.subject,
            &new_message.message,
            OffsetDateTime::now_utc(),
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(ContactMessage {
        id,
        name: new_message.name,
        email: new_message.email,
        subject: new_message.subject,
        message: new_message.message,
        is_read: false,
    })
}

/// Retrieve a single contact message by ID.
pub fn get_contact_message(
    id: DatabaseId,
    connection: &Connection,
) -> Result<ContactMessage, Error> {
    connection
        .prepare(
            "SELECT id, name, email, subject, message, is_read FROM contact_message
             WHERE id = :id;",
        )?
        .query_row(&[(":id", &id)], map_row)
        .map_err(|error| error.into())
}

/// Get the total number of contact messages in the database.
pub fn count_contact_messages(connection: &Connection) -> Result<usize, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM contact_message;", [], |row| {
            row.get::<_, i64>(0).map(|count| count as usize)
        })
        .map_err(|error| error.into())
}

fn map_row(row: &Row) -> Result<ContactMessage, rusqlite::Error> {
    Ok(ContactMessage {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        subject: row.get(3)?,
        message: row.get(4)?,
        is_read: row.get(5)?,
    })
}

/// Accept a contact message from the public site.
///
/// Invalid submissions get a 400 with the per-field error map and nothing is
/// persisted. Valid submissions insert a single unread row and get a 201.
pub async fn submit_contact_message(
    State(state): State<AppState>,
    Json(form): Json<ContactMessageForm>,
) -> Result<Response, Error> {
    let new_message = form.validate().map_err(Error::Validation)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let message = create_contact_message(new_message, &connection)?;
    tracing::info!("received contact message {}", message.id);

    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Thank you for your message!"})),
    )
        .into_response())
}

#[cfg(test)]
mod validation_tests {
    use super::ContactMessageForm;

    fn valid_form() -> ContactMessageForm {
        ContactMessageForm {
            name: "Ada Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            subject: "Hello".to_owned(),
            message: "I enjoyed your site.".to_owned(),
        }
    }

    #[test]
    fn valid_form_passes() {
        let new_message = valid_form().validate().expect("Form should be valid");

        assert_eq!(new_message.email, "ada@example.com");
    }

    #[test]
    fn empty_form_reports_every_field() {
        let errors = ContactMessageForm::default()
            .validate()
            .expect_err("Empty form should fail validation");

        assert!(errors.contains("name"));
        assert!(errors.contains("email"));
        assert!(errors.contains("subject"));
        assert!(errors.contains("message"));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let form = ContactMessageForm {
            email: "not-an-email".to_owned(),
            ..valid_form()
        };

        let errors = form.validate().expect_err("Email should be rejected");

        assert!(errors.contains("email"));
        assert!(!errors.contains("name"));
    }

    #[test]
    fn whitespace_only_fields_count_as_missing() {
        let form = ContactMessageForm {
            message: " \n\t ".to_owned(),
            ..valid_form()
        };

        let errors = form.validate().expect_err("Blank message should fail");

        assert!(errors.contains("message"));
    }

    #[test]
    fn oversized_name_is_rejected() {
        let form = ContactMessageForm {
            name: "x".repeat(101),
            ..valid_form()
        };

        let errors = form.validate().expect_err("Oversized name should fail");

        assert!(errors.contains("name"));
    }

    #[test]
    fn oversized_subject_is_rejected() {
        let form = ContactMessageForm {
            subject: "x".repeat(201),
            ..valid_form()
        };

        let errors = form.validate().expect_err("Oversized subject should fail");

        assert!(errors.contains("subject"));
    }
}

#[cfg(test)]
mod submit_endpoint_tests {
    use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
    use rusqlite::Connection;

    use crate::{AppState, Error};

    use super::{
        ContactMessageForm, count_contact_messages, get_contact_message, submit_contact_message,
    };

    fn get_test_app_state() -> AppState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");

        AppState::new(connection).expect("Could not initialize database")
    }

    #[tokio::test]
    async fn valid_submission_persists_one_unread_row() {
        let state = get_test_app_state();

        let response = submit_contact_message(
            State(state.clone()),
            Json(ContactMessageForm {
                name: "Ada Lovelace".to_owned(),
                email: "ada@example.com".to_owned(),
                subject: "Hello".to_owned(),
                message: "I enjoyed your site.".to_owned(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_contact_messages(&connection).unwrap(), 1);

        let message = get_contact_message(1, &connection).unwrap();
        assert!(!message.is_read);
        assert_eq!(message.email, "ada@example.com");
    }

    #[tokio::test]
    async fn invalid_email_is_rejected_and_nothing_is_persisted() {
        let state = get_test_app_state();

        let result = submit_contact_message(
            State(state.clone()),
            Json(ContactMessageForm {
                name: "Ada Lovelace".to_owned(),
                email: "not-an-email".to_owned(),
                subject: "Hello".to_owned(),
                message: "I enjoyed your site.".to_owned(),
            }),
        )
        .await;

        let error = result.expect_err("Submission should fail validation");
        let Error::Validation(errors) = error else {
            panic!("Expected a validation error, got {error:?}");
        };
        assert!(errors.contains("email"));

        let response = Error::Validation(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_contact_messages(&connection).unwrap(), 0);
    }
}
