//! The API endpoints URIs.

/// The route for listing recent finance transactions.
pub const TRANSACTIONS: &str = "/transactions/";
/// The route for the dashboard summary (totals, breakdown, monthly trend).
pub const DASHBOARD: &str = "/dashboard/";
/// The route for listing skills.
pub const SKILLS: &str = "/skills/";
/// The route for listing work experience.
pub const EXPERIENCES: &str = "/experiences/";
/// The route for listing projects.
pub const PROJECTS: &str = "/projects/";
/// The route for the active contact info.
pub const CONTACT_INFO: &str = "/contact-info/";
/// The route for the active about info.
pub const ABOUT_INFO: &str = "/about-info/";
/// The route for submitting a contact message.
pub const CONTACT_MESSAGE: &str = "/contact-message/";
