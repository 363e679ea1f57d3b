pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::collation::{EMAIL_COLLATION, compare_emails, with_email_collation};
pub use connection::pool::{open_pool, run_migrations};
pub use error::{DbError, Result};
pub use repositories::identity_repository::IdentityRepository;
pub use repositories::reference_repository::ReferenceRepository;
pub use repositories::relation_repository::RelationRepository;
