pub mod ids;
pub mod manager;
pub mod memory;
pub mod models;
pub mod mongo;
pub mod store;
pub mod update;

pub use ids::{parse_object_id, InvalidIdentifier};
pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use store::InstitutionStore;
pub use update::{ConditionalUpdate, ResourceFields, UpdateCommand, UpdateOutcome};
