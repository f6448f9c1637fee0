pub mod format;
pub mod payload;
