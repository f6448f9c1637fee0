// handlers/mod.rs - HTTP handlers, one module per route family
//
// Handlers only extract path/body and shape the envelope; all hierarchy
// logic lives in services.

pub mod institutions;
pub mod resources;
pub mod response;
pub mod system;

pub use response::{ApiResponse, ApiResult};
