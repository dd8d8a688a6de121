//! End-to-end short-address canonicalization.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use crate::error::{Error, Result};
use crate::rewrite::fuse;
use crate::token::{Token, grammar, tokenize};

/// Maps trailing street-type abbreviations to their canonical full form.
///
/// Applied to the final street-name token before title-casing. The
/// `crescent` entry is the wrong way around (it contracts where every other
/// entry expands); it is preserved because existing address keys were built
/// with it.
static ROUTE_SUBSTITUTIONS: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    BTreeMap::from([
        ("st", "street"),
        ("ave", "avenue"),
        ("wy", "way"),
        ("pl", "place"),
        ("tce", "terrace"),
        ("hwy", "highway"),
        ("rd", "road"),
        ("esp", "esplanade"),
        ("ct", "court"),
        // these are the wrong way around
        ("crescent", "cres"),
    ])
});

/// High-level short-address parser.
///
/// The parser is stateless apart from its options; parsing is a pure,
/// synchronous computation, safe to call concurrently.
#[derive(Debug, Clone, Default)]
pub struct AddressParser {
    strict: bool,
}

impl AddressParser {
    /// Create a new parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat an unparseable street-number prefix as an error instead of
    /// logging a diagnostic and returning a best-effort result.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Canonicalize a short address into its comparable key.
    ///
    /// # Arguments
    ///
    /// * `short_address` - the free-text address fragment as rendered by the
    ///   listing source, excluding suburb/state/postcode
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyAddress`] for empty/whitespace-only input, and
    /// [`Error::ParseError`] in strict mode when no street-number prefix
    /// could be extracted. Otherwise parsing is best-effort and total: an
    /// address with no recognizable number yields an empty `street_number`
    /// and the whole input as `street_name` (with a `log::warn!`
    /// diagnostic).
    ///
    /// # Example
    ///
    /// ```rust
    /// use streetkey::AddressParser;
    ///
    /// let parser = AddressParser::new();
    /// let key = parser.parse("unit 2a/62 The St")?;
    /// assert_eq!(key.street_number, "2A/62");
    /// assert_eq!(key.street_name, "The Street");
    /// assert!(!key.multi);
    /// # Ok::<(), streetkey::Error>(())
    /// ```
    pub fn parse(&self, short_address: &str) -> Result<CanonicalAddress> {
        let mut tokens = tokenize(short_address);
        if tokens.is_empty() {
            return Err(Error::empty_address(format!("{short_address:?}")));
        }
        fuse(&mut tokens);

        let (number_tokens, name_start, multi) = extract_number_tokens(&tokens);
        if number_tokens.is_empty() {
            if self.strict {
                return Err(Error::parse_error(format!(
                    "failed to split {short_address:?}"
                )));
            }
            log::warn!("failed to split {short_address:?}");
        }

        let mut name_tokens: Vec<String> =
            tokens[name_start..].iter().map(|t| t.text().to_string()).collect();
        if let Some(last) = name_tokens.last_mut() {
            if let Some(expanded) = ROUTE_SUBSTITUTIONS.get(last.to_lowercase().as_str()) {
                *last = (*expanded).to_string();
            }
        }

        Ok(CanonicalAddress {
            street_number: number_tokens.join(" ").to_uppercase(),
            street_name: title_case(&name_tokens.join(" ")),
            multi,
        })
    }

    /// Canonicalize multiple short addresses in order.
    pub fn parse_batch(&self, short_addresses: &[&str]) -> Result<Vec<CanonicalAddress>> {
        short_addresses.iter().map(|addr| self.parse(addr)).collect()
    }

    /// Canonicalize multiple short addresses in parallel.
    ///
    /// Each result stays in input order; failed parses are returned as
    /// errors in the result vector.
    #[cfg(feature = "parallel")]
    pub fn parse_batch_parallel(
        &self,
        short_addresses: &[&str],
    ) -> Vec<Result<CanonicalAddress>> {
        use rayon::prelude::*;

        short_addresses
            .par_iter()
            .map(|addr| self.parse(addr))
            .collect()
    }

    /// Canonicalize multiple short addresses in parallel, keeping only the
    /// successful results.
    #[cfg(feature = "parallel")]
    pub fn parse_batch_parallel_ok(&self, short_addresses: &[&str]) -> Vec<CanonicalAddress> {
        self.parse_batch_parallel(short_addresses)
            .into_iter()
            .filter_map(|result| result.ok())
            .collect()
    }
}

/// The canonical, structurally comparable key derived from a short address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanonicalAddress {
    /// Upper-cased street-number token, e.g. `"2A/62"` or `"2-4"`. Empty
    /// when no number prefix could be extracted.
    pub street_number: String,
    /// Title-cased street name with the trailing abbreviation expanded,
    /// e.g. `"The Street"`.
    pub street_name: String,
    /// True when the listing covers more than one distinct numbered
    /// property (a range or combination).
    pub multi: bool,
}

impl CanonicalAddress {
    /// Rejoin the number and name into a single short-address string.
    ///
    /// Feeding the result back through [`AddressParser::parse`] yields the
    /// same key.
    pub fn rejoined(&self) -> String {
        if self.street_number.is_empty() {
            self.street_name.clone()
        } else {
            format!("{} {}", self.street_number, self.street_name)
        }
    }
}

impl fmt::Display for CanonicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rejoined())
    }
}

/// Consume the fused-token prefix that forms the street number.
///
/// Returns the consumed number tokens, the index where the street name
/// begins, and the multi flag. The final token is never consumed; the
/// street name is never empty for non-empty input.
fn extract_number_tokens(tokens: &[Token]) -> (Vec<String>, usize, bool) {
    let mut number_tokens = Vec::new();
    let mut multi = false;
    let mut i = 0;
    while i + 1 < tokens.len() {
        let text = tokens[i].text();
        if grammar::is_numal_subprem(text) {
            number_tokens.push(text.to_string());
        } else if grammar::is_numal_subprem_multi(text) {
            multi = true;
            number_tokens.push(text.to_string());
        } else if grammar::is_numal(text) {
            number_tokens.push(text.to_string());
        } else if grammar::is_numal_multi(text) {
            multi = true;
            number_tokens.push(text.to_string());
        } else if grammar::is_comment(text) {
            number_tokens.push(text.to_string());
        } else {
            break;
        }
        i += 1;
    }
    (number_tokens, i, multi)
}

/// Title-case a street name: the first alphabetic character of every cased
/// run is upper-cased, the rest lower-cased, and any non-alphabetic
/// character starts a new run (so `"(e)"` becomes `"(E)"` and `"g01"`
/// becomes `"G01"`).
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_cased {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_cased = true;
        } else {
            out.push(ch);
            prev_cased = false;
        }
    }
    out
}
