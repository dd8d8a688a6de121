//! Tokenization and token classification for short addresses.
//!
//! A short address like `"unit 2a/62 The St"` is split into atomic tokens
//! (whitespace consumed, punctuation isolated) and each token is assigned a
//! [`TokenClass`]. The fusion pass in [`crate::rewrite`] then merges adjacent
//! tokens into composite street-number components.

use std::fmt;

/// Token categories, mutually exclusive, determined by pattern in a fixed
/// order (first match wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenClass {
    /// Sub-premise delimiter: `/`, `,` or `;`
    Separator,
    /// Combination connector: `&` or `+`
    Connector,
    /// An isolated `-` (only appears when whitespace-separated, `"2 - 4"`)
    RangeDash,
    /// The word `and`, treated like a connector
    Conjunction,
    /// `proposed` or `p`
    ProposedMarker,
    /// Sub-premise keyword: `lot`, `l`, `unit`, `u`, `flat`, `fl`, `villa`,
    /// `v`, `apt`, `ptn`, `pl`, `sold`
    SubpremKeyword,
    /// A bare digit run: `12`
    DigitRun,
    /// A single letter: `A`
    LetterRun,
    /// Letters joined by `&`/`+`/`-`: `A&B`, `A-C`
    LetterCombo,
    /// Digit run with one optional leading/trailing letter: `1A`, `A1`, `G01`
    NumberLetterCompound,
    /// Compounds joined by `&`/`+`/`-`: `1&2`, `2-4`, `1A-C`
    NumAlMulti,
    /// A parenthetical: `(Rear)`
    Comment,
    /// Anything else; street-name words end up here
    Word,
}

/// An immutable `(text, class)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    text: String,
    class: TokenClass,
}

impl Token {
    /// Create a token, classifying its text.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let class = classify(&text);
        Self { text, class }
    }

    /// The token text, exactly as it appeared (or was fused).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The token's class.
    pub fn class(&self) -> TokenClass {
        self.class
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Split a raw short address into tokens.
///
/// Splits on runs of whitespace and immediately before/after any separator or
/// connector character (`/ , ; & +`), so alphanumeric runs stay intact while
/// punctuation always becomes its own one-character token. A dash is *not* a
/// split character: `"2-4"` survives as one token, and an isolated `-` token
/// only occurs when the input spaced it out (`"2 - 4"`).
///
/// Returns an empty vector only for empty/whitespace-only input.
///
/// # Example
///
/// ```rust
/// use streetkey::tokenize;
///
/// let tokens = tokenize("19 / 2-4 The St");
/// let texts: Vec<&str> = tokens.iter().map(|t| t.text()).collect();
/// assert_eq!(texts, ["19", "/", "2-4", "The", "St"]);
/// ```
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for ch in input.chars() {
        if ch.is_whitespace() {
            if !current.is_empty() {
                tokens.push(Token::new(std::mem::take(&mut current)));
            }
        } else if matches!(ch, '/' | ',' | ';' | '&' | '+') {
            if !current.is_empty() {
                tokens.push(Token::new(std::mem::take(&mut current)));
            }
            tokens.push(Token::new(ch.to_string()));
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        tokens.push(Token::new(current));
    }
    tokens
}

/// Classify a single token.
///
/// Patterns are tried in the order the [`TokenClass`] variants are declared;
/// the first match wins, so e.g. `"p"` is a [`TokenClass::ProposedMarker`]
/// rather than a [`TokenClass::LetterRun`] and `"u"` is a
/// [`TokenClass::SubpremKeyword`].
pub fn classify(token: &str) -> TokenClass {
    if grammar::is_separator(token) {
        TokenClass::Separator
    } else if token == "&" || token == "+" {
        TokenClass::Connector
    } else if token == "-" {
        TokenClass::RangeDash
    } else if token.eq_ignore_ascii_case("and") {
        TokenClass::Conjunction
    } else if grammar::is_proposed(token) {
        TokenClass::ProposedMarker
    } else if grammar::is_subprem_keyword(token) {
        TokenClass::SubpremKeyword
    } else if grammar::is_digit_run(token) {
        TokenClass::DigitRun
    } else if grammar::is_letter(token) {
        TokenClass::LetterRun
    } else if grammar::is_letter_multi(token) {
        TokenClass::LetterCombo
    } else if grammar::is_numal(token) {
        TokenClass::NumberLetterCompound
    } else if grammar::is_numal_multi(token) {
        TokenClass::NumAlMulti
    } else if grammar::is_comment(token) {
        TokenClass::Comment
    } else {
        TokenClass::Word
    }
}

/// The token grammar, ported from the upstream scraper's regex table.
///
/// All patterns are anchored and case-insensitive; a token either fully
/// matches a grammar production or not at all.
pub(crate) mod grammar {
    use regex::Regex;
    use std::sync::LazyLock;

    /// Sub-premise separator characters.
    const SUB_SEP: &str = r"[/,;]";
    /// Multi-value combinator characters (range dash included).
    const MULTI_SEP: &str = r"[&+-]";
    /// A single letter.
    const AL: &str = r"[A-Z]";
    /// A street-number atom: `1`, `1A`, `A1`, `G01` or a bare letter.
    const NUMAL: &str = r"(?:[A-Z]?\d+[A-Z]?|[A-Z])";
    /// Sub-premise keywords seen in listing text.
    const KEYWORD: &str = r"l|lot|pl|fl|flat|u|unit|v|villa|sold|ptn|apt";

    fn anchored(pattern: &str) -> Regex {
        Regex::new(&format!("(?i)^(?:{pattern})$")).expect("valid grammar regex")
    }

    static RE_DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| anchored(r"\d+"));
    static RE_LETTER: LazyLock<Regex> = LazyLock::new(|| anchored(AL));
    static RE_LETTER_MULTI: LazyLock<Regex> =
        LazyLock::new(|| anchored(&format!("{AL}(?:{MULTI_SEP}{AL})*")));
    static RE_NUMAL: LazyLock<Regex> = LazyLock::new(|| anchored(NUMAL));
    static RE_NUMAL_MULTI: LazyLock<Regex> =
        LazyLock::new(|| anchored(&format!("{NUMAL}(?:{MULTI_SEP}{NUMAL})*")));
    static RE_NUMAL_SUBPREM: LazyLock<Regex> =
        LazyLock::new(|| anchored(&format!("{NUMAL}(?:{SUB_SEP}{NUMAL})?")));
    // subprem[/middle][/numal]; the named groups drive both the extractor's
    // multi detection and the decomposer's segment re-assignment.
    static RE_NUMAL_SUBPREM_MULTI: LazyLock<Regex> = LazyLock::new(|| {
        let numal_multi = format!("{NUMAL}(?:{MULTI_SEP}{NUMAL})*");
        anchored(&format!(
            "(?P<subprem>{numal_multi})(?:{SUB_SEP}(?P<middle>{NUMAL}))?(?:{SUB_SEP}(?P<numal>{numal_multi}))?"
        ))
    });
    static RE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| anchored(SUB_SEP));
    static RE_AND: LazyLock<Regex> = LazyLock::new(|| anchored(r"and|[&+]"));
    static RE_PROPOSED: LazyLock<Regex> = LazyLock::new(|| anchored(r"proposed|p"));
    static RE_LOT: LazyLock<Regex> = LazyLock::new(|| anchored(r"l|lot"));
    static RE_KEYWORD: LazyLock<Regex> = LazyLock::new(|| anchored(KEYWORD));
    // LOT1 | LOT1A | U1-2: keyword fused onto its number without whitespace.
    static RE_KEYWORD_NUMAL_MULTI: LazyLock<Regex> = LazyLock::new(|| {
        let numal_multi = format!("{NUMAL}(?:{MULTI_SEP}{NUMAL})*");
        anchored(&format!("(?P<subprem>{KEYWORD})(?P<numal>{numal_multi})"))
    });
    static RE_COMMENT: LazyLock<Regex> = LazyLock::new(|| anchored(r"\(.*\)"));

    pub(crate) fn is_digit_run(s: &str) -> bool {
        RE_DIGIT_RUN.is_match(s)
    }

    pub(crate) fn is_letter(s: &str) -> bool {
        RE_LETTER.is_match(s)
    }

    pub(crate) fn is_letter_multi(s: &str) -> bool {
        RE_LETTER_MULTI.is_match(s)
    }

    pub(crate) fn is_numal(s: &str) -> bool {
        RE_NUMAL.is_match(s)
    }

    pub(crate) fn is_numal_multi(s: &str) -> bool {
        RE_NUMAL_MULTI.is_match(s)
    }

    pub(crate) fn is_numal_subprem(s: &str) -> bool {
        RE_NUMAL_SUBPREM.is_match(s)
    }

    pub(crate) fn is_numal_subprem_multi(s: &str) -> bool {
        RE_NUMAL_SUBPREM_MULTI.is_match(s)
    }

    pub(crate) fn is_separator(s: &str) -> bool {
        RE_SEPARATOR.is_match(s)
    }

    pub(crate) fn is_and(s: &str) -> bool {
        RE_AND.is_match(s)
    }

    pub(crate) fn is_proposed(s: &str) -> bool {
        RE_PROPOSED.is_match(s)
    }

    pub(crate) fn is_lot(s: &str) -> bool {
        RE_LOT.is_match(s)
    }

    pub(crate) fn is_subprem_keyword(s: &str) -> bool {
        RE_KEYWORD.is_match(s)
    }

    pub(crate) fn is_comment(s: &str) -> bool {
        RE_COMMENT.is_match(s)
    }

    /// The `subprem`/`middle`/`numal` segments of a fused street-number
    /// token. `subprem` is always present on a match; the other two only
    /// when their slash-delimited segment exists.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) struct SubpremParts {
        pub(crate) subprem: String,
        pub(crate) middle: Option<String>,
        pub(crate) numal: Option<String>,
    }

    pub(crate) fn subprem_parts(s: &str) -> Option<SubpremParts> {
        let caps = RE_NUMAL_SUBPREM_MULTI.captures(s)?;
        Some(SubpremParts {
            subprem: caps["subprem"].to_string(),
            middle: caps.name("middle").map(|m| m.as_str().to_string()),
            numal: caps.name("numal").map(|m| m.as_str().to_string()),
        })
    }

    /// Split a keyword fused onto its number, e.g. `"lot1-4"` into
    /// `("lot", "1-4")`.
    pub(crate) fn keyword_split(s: &str) -> Option<(String, String)> {
        let caps = RE_KEYWORD_NUMAL_MULTI.captures(s)?;
        Some((caps["subprem"].to_string(), caps["numal"].to_string()))
    }

    /// Split a number-letter compound at the digit/letter boundary:
    /// `"1A"` into `("1", "A")`. `"A1"` has no such boundary and stays whole.
    pub(crate) fn split_compound(s: &str) -> Option<(&str, &str)> {
        let bytes = s.as_bytes();
        for i in 1..bytes.len() {
            if bytes[i - 1].is_ascii_digit() && bytes[i].is_ascii_alphabetic() {
                return Some((&s[..i], &s[i..]));
            }
        }
        None
    }
}
