//! # blebridge-domain
//!
//! Pure domain model for the blebridge device-enumeration bridge.
//!
//! ## Responsibilities
//! - Define **Devices** (an identifier plus an optional human-readable name)
//! - Define **stable error codes** shared by every device capability
//! - Define the **domain error** that capabilities report and that is mapped
//!   1:1 onto the outbound error envelope
//! - Contain all invariant enforcement for the above
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod device;
pub mod error;
