pub mod backups;
pub mod dashboard;
pub mod messages;
pub mod status;
