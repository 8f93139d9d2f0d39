use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use finfolio::{
    initialize_db,
    portfolio::{
        NewAboutInfo, NewContactInfo, NewExperience, NewProject, NewSkill, create_about_info,
        create_contact_info, create_experience, create_project, create_skill,
    },
    transaction::{NewTransaction, TransactionType, create_transaction},
};

/// A utility for creating a demo database for the REST API server of finfolio.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating demo transactions...");
    create_demo_transactions(&conn)?;

    println!("Creating demo portfolio content...");
    create_demo_portfolio(&conn)?;

    println!("Success!");

    Ok(())
}

/// Seed a few months of income and expenses so the dashboard trend has data.
fn create_demo_transactions(conn: &Connection) -> Result<(), Box<dyn Error>> {
    let today = OffsetDateTime::now_utc().date();

    let rows = [
        ("Salary", 3500.0, "Income", TransactionType::Income, 24),
        ("Grocery Shopping", 85.5, "Food", TransactionType::Expense, 10),
        ("Gas Station", 45.2, "Transportation", TransactionType::Expense, 13),
        ("Movie Night", 32.0, "Entertainment", TransactionType::Expense, 18),
        ("Salary", 3500.0, "Income", TransactionType::Income, 55),
        ("Power Bill", 120.75, "Utilities", TransactionType::Expense, 40),
        ("New Headphones", 199.99, "Shopping", TransactionType::Expense, 47),
    ];

    for (description, amount, category, transaction_type, days_ago) in rows {
        create_transaction(
            NewTransaction {
                description: description.to_owned(),
                amount,
                category: category.to_owned(),
                date: today - Duration::days(days_ago),
                transaction_type,
            },
            conn,
        )?;
    }

    Ok(())
}

fn create_demo_portfolio(conn: &Connection) -> Result<(), Box<dyn Error>> {
    let skills = [
        ("Rust", 85, "Backend"),
        ("SQL", 80, "Backend"),
        ("React", 70, "Frontend"),
        ("TypeScript", 75, "Frontend"),
    ];

    for (name, level, category) in skills {
        create_skill(
            NewSkill {
                name: name.to_owned(),
                level,
                category: category.to_owned(),
            },
            conn,
        )?;
    }

    create_experience(
        NewExperience {
            title: "Backend Developer".to_owned(),
            company: "Acme Corp".to_owned(),
            period: "2021 - 2023".to_owned(),
            description: "Built and maintained JSON APIs for internal tooling.".to_owned(),
            technologies: vec!["Rust".to_owned(), "SQLite".to_owned()],
            sort_order: 1,
        },
        conn,
    )?;

    create_experience(
        NewExperience {
            title: "Senior Backend Developer".to_owned(),
            company: "Acme Corp".to_owned(),
            period: "2023 - Present".to_owned(),
            description: "Leads the services team and owns the billing pipeline.".to_owned(),
            technologies: vec!["Rust".to_owned(), "PostgreSQL".to_owned()],
            sort_order: 2,
        },
        conn,
    )?;

    create_project(
        NewProject {
            title: "Budget Tracker".to_owned(),
            description: "A personal-finance tracker with a dashboard of spending trends."
                .to_owned(),
            technologies: vec!["Rust".to_owned(), "Axum".to_owned(), "SQLite".to_owned()],
            image_emoji: "💰".to_owned(),
            link: Some("https://github.com/example/budget-tracker".to_owned()),
            demo_link: None,
            sort_order: 2,
        },
        conn,
    )?;

    create_project(
        NewProject {
            title: "Portfolio Site".to_owned(),
            description: "This site. A React frontend backed by a JSON API.".to_owned(),
            technologies: vec!["React".to_owned(), "TypeScript".to_owned()],
            image_emoji: "🚀".to_owned(),
            link: Some("https://github.com/example/portfolio".to_owned()),
            demo_link: Some("https://example.com".to_owned()),
            sort_order: 1,
        },
        conn,
    )?;

    create_contact_info(
        NewContactInfo {
            email: "hello@example.com".to_owned(),
            phone: "+64 21 555 0123".to_owned(),
            location: "Wellington, New Zealand".to_owned(),
            is_active: true,
        },
        conn,
    )?;

    create_about_info(
        NewAboutInfo {
            intro_text: "I build backend services and the occasional frontend.".to_owned(),
            years_experience: 5,
            projects_completed: 42,
            client_satisfaction: 98,
            is_active: true,
        },
        conn,
    )?;

    Ok(())
}
