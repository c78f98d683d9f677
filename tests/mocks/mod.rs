mod mock_contact_manager;

pub use mock_contact_manager::MockContactManager;
