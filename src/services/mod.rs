//! Services Layer
//!
//! Cross-cutting business rules shared by repositories and handlers.

pub mod validation;
