//! Core vocabulary for the clinic client: entity ids and kinds, entity records,
//! form field values, audit stamps, and the session roles that gate them.

/// Audit stamps carried by every entity.
pub mod audit;
/// Entity records and the tagged [`Entity`] union.
pub mod entity;
/// Identifier types for entities and collections.
pub mod ids;
/// Payment type discriminator values.
pub mod payment;
/// Authenticated session and role capabilities.
pub mod session;
/// Dynamically typed form/payload field values.
pub mod value;

pub use audit::Audit;
pub use entity::{Entity, InstallmentPayment, Patient, Payment, Procedure, Record};
pub use ids::{CollectionKey, EntityId, EntityKind};
pub use payment::PaymentType;
pub use session::{Capabilities, Role, RoleParseError, Session, can_delete, can_view_audit};
pub use value::{FieldError, FieldValue, Fields};
