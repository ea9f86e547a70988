//! Reference parsing module.
//!
//! This module classifies repository reference strings (shorthand, SSH,
//! HTTPS, custom) and extracts the optional checkout fragment.
//!
//! # Example
//!
//! ```rust
//! use repofetch::parser::{parse_reference, RepoReference};
//!
//! let parsed = parse_reference("rust-lang/cargo#v1.0").unwrap();
//! assert!(matches!(parsed.repo, RepoReference::Shorthand { .. }));
//! assert_eq!(parsed.checkout, "v1.0");
//! ```

mod reference;

pub use reference::{parse_reference, ParsedReference, RepoReference, DEFAULT_HOST};
