//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod admin_user;
pub mod contact_enquiry;
pub mod content;
pub mod gold_rate;
pub mod store;

pub use admin_user::AdminUserRepository;
pub use contact_enquiry::{ContactEnquiryRepository, CreateEnquiryInput, EnquiryError};
pub use content::{ContentError, ContentInput, ContentRecord, ContentRepository};
pub use gold_rate::{CreateGoldRateInput, GoldRateError, GoldRateRepository, sheet_of};
pub use store::{StoreError, StoreInput, StoreRepository};
