pub mod admission;
pub mod classifier;
pub mod drag_status;
pub mod dropzone;
pub mod error_display;
pub mod screening;
