pub mod backup_directory;
pub mod blob_properties;

pub use backup_directory::BackupDirectory;
