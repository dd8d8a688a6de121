//! The full address value object used as a natural key for property records.

use std::fmt;

use crate::error::Result;
use crate::number::street_number_close;
use crate::parser::AddressParser;

/// A canonical full address.
///
/// All fields are canonical: trimmed, street number upper-case, street name
/// title-case with the trailing abbreviation expanded. Values are immutable
/// once constructed and compare by value, so a `FullAddress` can serve as a
/// composite map or index key. Two addresses are *exactly* equal only when
/// every field matches; they are [*close*](FullAddress::close) when the
/// street numbers fuzzily match and every other field is identical.
///
/// # Example
///
/// ```rust
/// use streetkey::FullAddress;
///
/// let a = FullAddress::from_short_address("1 The St", "Bentley", "WA", "6102")?;
/// let b = FullAddress::from_short_address("1-3 The St", "Bentley", "WA", "6102")?;
/// assert_ne!(a, b);
/// assert!(a.close(&b));
/// # Ok::<(), streetkey::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FullAddress {
    /// Canonical street-number token, upper-case.
    pub street_number: String,
    /// Canonical street name, title-case.
    pub street_name: String,
    /// Suburb, supplied out-of-band by the caller.
    pub suburb: String,
    /// State, supplied out-of-band by the caller.
    pub state: String,
    /// Postcode, supplied out-of-band by the caller.
    pub postcode: String,
}

impl FullAddress {
    /// Construct from already-canonical fields.
    pub fn new(
        street_number: impl Into<String>,
        street_name: impl Into<String>,
        suburb: impl Into<String>,
        state: impl Into<String>,
        postcode: impl Into<String>,
    ) -> Self {
        Self {
            street_number: street_number.into(),
            street_name: street_name.into(),
            suburb: suburb.into(),
            state: state.into(),
            postcode: postcode.into(),
        }
    }

    /// Construct by canonicalizing a scraped short address. Suburb, state
    /// and postcode are not parsed from the short address; the caller
    /// supplies them separately.
    ///
    /// # Errors
    ///
    /// Returns an error for empty/whitespace-only short addresses.
    pub fn from_short_address(
        short_address: &str,
        suburb: impl Into<String>,
        state: impl Into<String>,
        postcode: impl Into<String>,
    ) -> Result<Self> {
        let key = AddressParser::new().parse(short_address)?;
        Ok(Self {
            street_number: key.street_number,
            street_name: key.street_name,
            suburb: suburb.into(),
            state: state.into(),
            postcode: postcode.into(),
        })
    }

    /// Fuzzy equality for deduplication: every field except the street
    /// number must match exactly, and the street numbers must be
    /// [close](crate::street_number_close). Differently-notated listings of
    /// the same property (`"1"` vs `"1-3"`) compare close; sub-premises are
    /// not considered.
    pub fn close(&self, other: &FullAddress) -> bool {
        street_number_close(&self.street_number, &other.street_number)
            && self.street_name == other.street_name
            && self.suburb == other.suburb
            && self.state == other.state
            && self.postcode == other.postcode
    }
}

impl fmt::Display for FullAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}, {}, {} {}",
            self.street_number, self.street_name, self.suburb, self.state, self.postcode
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bentley(short: &str) -> FullAddress {
        FullAddress::from_short_address(short, "Bentley", "WA", "6102").expect("address")
    }

    #[test]
    fn test_from_short_address() {
        let addr = bentley("unit 2a/62 The St");
        assert_eq!(addr.street_number, "2A/62");
        assert_eq!(addr.street_name, "The Street");
        assert_eq!(addr.suburb, "Bentley");
        assert_eq!(addr.state, "WA");
        assert_eq!(addr.postcode, "6102");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            bentley("2 The St").to_string(),
            "2 The Street, Bentley, WA 6102"
        );
    }

    #[test]
    fn test_close_reflexive() {
        for short in ["2 The St", "2-4 The St", "unit 2a/62 The St"] {
            let addr = bentley(short);
            assert!(addr.close(&addr), "short address: {short:?}");
        }
    }

    #[test]
    fn test_close_symmetric() {
        let a = bentley("1 The St");
        let b = bentley("1-3 The St");
        assert_eq!(a.close(&b), b.close(&a));
        assert!(a.close(&b));
    }

    #[test]
    fn test_close_requires_other_fields_exact() {
        let a = bentley("1 The St");
        let b = FullAddress::from_short_address("1-3 The St", "Bentley", "WA", "6100")
            .expect("address");
        assert!(!a.close(&b));

        let c = bentley("1-3 Mars St");
        assert!(!a.close(&c));
    }

    #[test]
    fn test_close_disjoint_numbers() {
        let a = bentley("5 The St");
        let b = bentley("1-3 The St");
        assert!(!a.close(&b));
    }

    #[test]
    fn test_close_ignores_subpremise() {
        let a = bentley("1/62 The St");
        let b = bentley("2/62 The St");
        assert!(a.close(&b));
    }

    #[test]
    fn test_exact_equality_is_field_wise() {
        let a = bentley("2 The St");
        let b = bentley("2 The Street");
        assert_eq!(a, b);
    }
}
