//! Document shapes stored in the `educational_institutions` collection.
//!
//! One document per institution; classes, resources and comments live as
//! nested arrays inside it.

mod institution;
mod resource;

pub use institution::{ClassDoc, InstitutionDoc};
pub use resource::{CommentDoc, CommentImageDoc, FileDoc, ResourceDoc, ResourceType};
