//! Common error handling utilities for the Omnia SSO bridge
//!
//! Every crate in the workspace owns its own `thiserror` enum; this crate
//! provides what they share:
//!
//! - **Error kinds**: the terminal failure taxonomy of the sign-on flow
//! - **Error codes**: stable `SSO_xxxx` codes for pages and logs
//! - **Reporting**: rendering any classified error as an HTML message
//! - **Sanitization**: HTML escaping of messages before they are rendered
//!
//! # Example
//!
//! ```rust
//! use error_common::{ErrorKind, HtmlErrorPage};
//!
//! let page = HtmlErrorPage::new(ErrorKind::LocalUserNotFound, "Local user not found");
//! assert_eq!(page.status, 403);
//! assert!(page.body.contains("SSO_2001"));
//! ```

pub mod codes;
pub mod reporting;
pub mod sanitization;
pub mod types;

pub use reporting::*;
pub use sanitization::*;
pub use types::*;
