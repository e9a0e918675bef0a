//! Form validation layer.
//!
//! * [`rules`]: declarative per-field rules and [`validate`].
//! * [`schema`]: the rule sets and visibility of each entity form.
//! * [`branch`]: discriminator state machine that clears exclusive fields.
//! * [`form`]: live form state tying rules, readiness and submission together.
//!
//! Validation errors never leave this crate as anything but field-scoped
//! messages; they block dispatch and never reach the store.

pub mod branch;
pub mod form;
pub mod rules;
pub mod schema;

pub use branch::{BranchSpec, Discriminator, PAYMENT_TYPE, PaymentBranch, Transition};
pub use form::{FormState, SubmitBlocked};
pub use rules::{FieldRules, Rule, RuleSet, ValidationErrors, ValidationResult, validate};
pub use schema::{FormSchema, Readiness};
