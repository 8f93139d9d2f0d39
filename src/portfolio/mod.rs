//! Portfolio content: skills, experience, projects, contact info, about info
//! and the contact-message inbox.
//!
//! Rows are admin-managed and read-only through the API, except contact
//! messages which are created by the public submission endpoint.

mod about_info;
mod contact_info;
mod contact_message;
mod experience;
mod project;
mod skill;

pub use about_info::{
    AboutInfo, NewAboutInfo, create_about_info, create_about_info_table, get_about_info,
    get_active_about_info,
};
pub use contact_info::{
    ContactInfo, NewContactInfo, create_contact_info, create_contact_info_table, get_contact_info,
    get_active_contact_info,
};
pub use contact_message::{
    ContactMessage, ContactMessageForm, NewContactMessage, ValidationErrors,
    count_contact_messages, create_contact_message, create_contact_message_table,
    get_contact_message, submit_contact_message,
};
pub use experience::{
    Experience, NewExperience, create_experience, create_experience_table, get_all_experiences,
    get_experiences,
};
pub use project::{
    NewProject, Project, create_project, create_project_table, get_all_projects, get_projects,
};
pub use skill::{NewSkill, Skill, create_skill, create_skill_table, get_all_skills, get_skills};
