pub mod bytes;
pub mod filename;
pub mod messages;
