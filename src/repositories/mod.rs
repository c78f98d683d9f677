mod in_memory_contact_repository;
mod sqlite_contact_repository;
mod traits;

pub use in_memory_contact_repository::InMemoryContactRepository;
pub use sqlite_contact_repository::SqliteContactRepository;
pub use traits::ContactRepository;
