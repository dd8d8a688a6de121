//! # streetkey
//!
//! Canonical street-address keys for deduplicating scraped property listings.
//!
//! Listing sources render the same property's address differently between
//! scrapes: `"unit 2a/62 The St"`, `"u2a, 62 The Street"` and `"2A/62 The
//! Street"` all denote one property. This crate derives a canonical,
//! structurally comparable key from such free-text fragments: a normalized
//! street-number token (ranges, combinations, sub-premise prefixes, letter
//! suffixes), a canonicalized street name, and a flag marking listings that
//! cover multiple distinct numbered properties. A set-based decomposition of
//! street numbers supports fuzzy matching of addresses whose number notation
//! differs (`"1"` vs `"1-3"`).
//!
//! ## Features
//!
//! - **Canonicalization**: multi-pass, rule-ordered token fusion covering
//!   the notation found in real listing text
//! - **Decomposition**: split a street number into sub-premise and
//!   primary-number sets, with ranges and combinations expanded to members
//! - **Closeness**: fuzzy address equality for record deduplication
//! - **Pure and thread safe**: no I/O, no shared state; every call is an
//!   independent synchronous computation
//!
//! ## Quick Start
//!
//! ```rust
//! use streetkey::{AddressParser, FullAddress};
//!
//! let parser = AddressParser::new();
//! let key = parser.parse("19 / 2-4 The St")?;
//! assert_eq!(key.street_number, "19/2-4");
//! assert_eq!(key.street_name, "The Street");
//! assert!(key.multi);
//!
//! let a = FullAddress::from_short_address("1 The St", "Bentley", "WA", "6102")?;
//! let b = FullAddress::from_short_address("1-3 The St", "Bentley", "WA", "6102")?;
//! assert!(a.close(&b));
//! # Ok::<(), streetkey::Error>(())
//! ```

#![deny(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod address;
pub mod error;
pub mod number;
pub mod parser;
pub mod rewrite;
pub mod token;

// Re-export main API
pub use address::FullAddress;
pub use error::{Error, Result};
pub use number::{DecomposedNumber, split_street_number, street_number_close};
pub use parser::{AddressParser, CanonicalAddress};
pub use rewrite::fuse;
pub use token::{Token, TokenClass, classify, tokenize};

/// Canonicalize a short address with default options.
///
/// This is a convenience wrapper around [`AddressParser`].
///
/// # Example
///
/// ```rust
/// use streetkey::canonicalize;
///
/// let key = canonicalize("SOLD1/77 Surrey Rd")?;
/// assert_eq!(key.street_number, "1/77");
/// assert_eq!(key.street_name, "Surrey Road");
/// # Ok::<(), streetkey::Error>(())
/// ```
pub fn canonicalize(short_address: &str) -> Result<CanonicalAddress> {
    AddressParser::new().parse(short_address)
}
