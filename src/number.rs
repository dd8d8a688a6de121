//! Street-number decomposition and fuzzy closeness.
//!
//! A canonical street-number string like `"1A/2-4"` decomposes into a
//! sub-premise set and a primary-number set. Ranges and combinations expand
//! to their literal members only (`"2-4"` becomes `{"2", "4"}`, never the
//! enumerated run): downstream deduplication needs set intersection, not a
//! continuum.

use std::collections::BTreeSet;

use crate::token::grammar;

/// A street number split into its sub-premise and primary-number sets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecomposedNumber {
    /// Unit/lot/flat qualifiers (`"2A"` in `"2A/62"`); may be empty.
    pub subpremises: BTreeSet<String>,
    /// The primary numbers; multiple entries for ranges and combinations.
    pub numbers: BTreeSet<String>,
}

/// Sub-premise accumulator while segments are being re-assigned. The
/// decomposer builds either nothing, one joined string, or an already
/// expanded set; everything collapses to a plain set at the boundary.
#[derive(Debug)]
enum Subpremise {
    Empty,
    Single(String),
    Set(BTreeSet<String>),
}

impl Subpremise {
    fn into_set(self) -> BTreeSet<String> {
        match self {
            Subpremise::Empty => BTreeSet::new(),
            Subpremise::Single(s) => expand_multi(&s).unwrap_or_else(|| BTreeSet::from([s])),
            Subpremise::Set(set) => set,
        }
    }
}

/// Expand a `&`/`+`/`-` joined group into its member set, if the string is
/// such a group. `"2-4"` and `"2&4"` both become `{"2", "4"}`; range
/// endpoints are kept literally.
fn expand_multi(s: &str) -> Option<BTreeSet<String>> {
    grammar::is_numal_multi(s)
        .then(|| s.split(['&', '+', '-']).map(str::to_string).collect())
}

/// Expand a finished primary-number string into its set form.
///
/// Multi-value groups expand to members; a bare run of letters degrades to
/// its character set (supports loosened matching across letter-only
/// sub-premises); anything else unparseable becomes a single-element set.
fn expand_number(s: &str) -> BTreeSet<String> {
    if s.is_empty() {
        return BTreeSet::new();
    }
    if let Some(set) = expand_multi(s) {
        return set;
    }
    if s.chars().all(|c| c.is_alphabetic()) {
        return s.chars().map(|c| c.to_string()).collect();
    }
    BTreeSet::from([s.to_string()])
}

/// Decompose a canonical street-number string.
///
/// A single number-letter compound splits at the digit/letter boundary (the
/// letter is the sub-premise). A slash-delimited string of up to three
/// segments re-assigns segments so that the last present one is the primary
/// number and everything before it accumulates into the sub-premise. Any
/// string matching none of the grammars becomes the whole primary number.
///
/// # Example
///
/// ```rust
/// use streetkey::split_street_number;
///
/// let d = split_street_number("1/2-4");
/// assert!(d.subpremises.contains("1"));
/// assert!(d.numbers.contains("2"));
/// assert!(d.numbers.contains("4"));
/// assert!(!d.numbers.contains("3"));
/// ```
pub fn split_street_number(street_number: &str) -> DecomposedNumber {
    let mut subprem = Subpremise::Empty;
    let mut number = street_number.to_string();

    if grammar::is_numal(street_number) {
        // 1A => subpremise {A}, number 1; A1 has no boundary and stays whole
        if let Some((digits, letters)) = grammar::split_compound(street_number) {
            subprem = Subpremise::Set(letters.chars().map(|c| c.to_string()).collect());
            number = digits.to_string();
        }
    } else if let Some(parts) = grammar::subprem_parts(street_number) {
        // subprem[/middle][/numal]: the last present segment is the number,
        // the rest accumulates into the sub-premise
        number = parts.subprem;
        if let Some(middle) = parts.middle {
            let mut accumulated = number;
            number = middle;
            if let Some(last) = parts.numal {
                accumulated = format!("{accumulated}/{number}");
                number = last;
            }
            subprem = Subpremise::Single(accumulated);
        } else if let Some(last) = parts.numal {
            subprem = Subpremise::Single(number);
            number = last;
        }
    }

    DecomposedNumber {
        subpremises: subprem.into_set(),
        numbers: expand_number(&number),
    }
}

/// Fuzzy equality over two street-number strings.
///
/// Both sides are decomposed; when both primary-number sets are non-empty
/// the numbers are close iff the sets intersect. If either decomposition
/// yields an empty number set, falls back to direct string equality.
///
/// # Example
///
/// ```rust
/// use streetkey::street_number_close;
///
/// assert!(street_number_close("1", "1-3"));
/// assert!(!street_number_close("5", "1-3"));
/// ```
pub fn street_number_close(a: &str, b: &str) -> bool {
    let num_a = split_street_number(a).numbers;
    let num_b = split_street_number(b).numbers;
    if !num_a.is_empty() && !num_b.is_empty() {
        num_a.intersection(&num_b).next().is_some()
    } else {
        a == b
    }
}
