//! View models for clinic records.
//!
//! Each model is computed once per render context from cached entities and
//! the session [`Capabilities`](chairside_primitives::Capabilities): audit
//! rows and delete actions are simply absent when the role may not see them.

pub mod audit;
pub mod card;
pub mod format;
pub mod patient;
pub mod prompt;

pub use audit::{AuditRow, AuditRows, AuditStyle};
pub use card::InstallmentPaymentCard;
pub use format::Money;
pub use patient::PatientRow;
pub use prompt::DeletePrompt;
