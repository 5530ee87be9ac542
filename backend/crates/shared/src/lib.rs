//! Shared Kernel
//!
//! Vocabulary shared by every backend crate:
//! - Error classification and the transport-level error type
//! - Typed identifiers
//!
//! Only things whose meaning is the same in every crate belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
