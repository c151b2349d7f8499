pub mod contribution;
pub mod functions;
pub mod notification;
pub mod project;
pub mod submission;
pub mod user;
