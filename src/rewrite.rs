//! The fusion pass: merges adjacent tokens into composite street-number
//! components.
//!
//! A single pointer scans left to right. At each index the rules in [`RULES`]
//! are tried in priority order; the first rule whose guard holds rewrites the
//! span in place and the pointer stays put so follow-up fusions at the same
//! index can fire. If no rule matches, the pointer advances. The scan stops
//! once the pointer reaches the second-to-last token.
//!
//! Every rule except the keyword split strictly shrinks the token sequence,
//! and the keyword split's output can never re-trigger it, so the pass always
//! terminates in at most O(n) firings.

use crate::token::{Token, TokenClass, grammar};

/// A single prioritized fusion rule. `apply` returns true when the rule
/// fired, having already rewritten `tokens` around index `i`.
struct FusionRule {
    name: &'static str,
    apply: fn(tokens: &mut Vec<Token>, i: usize) -> bool,
}

/// Replace `tokens[i..i + span]` with one fused token.
fn splice(tokens: &mut Vec<Token>, i: usize, span: usize, fused: String) {
    tokens[i] = Token::new(fused);
    tokens.drain(i + 1..i + span);
}

// p / l => lot
fn proposed_slash_lot(tokens: &mut Vec<Token>, i: usize) -> bool {
    if i + 2 < tokens.len()
        && grammar::is_proposed(tokens[i].text())
        && tokens[i + 1].text() == "/"
        && grammar::is_lot(tokens[i + 2].text())
    {
        splice(tokens, i, 3, "lot".to_string());
        return true;
    }
    false
}

// u1 => u 1, lot1-4 => lot 1-4
fn split_fused_keyword(tokens: &mut Vec<Token>, i: usize) -> bool {
    if let Some((keyword, numal)) = grammar::keyword_split(tokens[i].text()) {
        tokens[i] = Token::new(numal);
        tokens.insert(i, Token::new(keyword));
        return true;
    }
    false
}

// X - Y => X-Y
fn fuse_range(tokens: &mut Vec<Token>, i: usize) -> bool {
    if i + 2 < tokens.len() && tokens[i + 1].class() == TokenClass::RangeDash {
        let fused = format!("{}-{}", tokens[i].text(), tokens[i + 2].text());
        splice(tokens, i, 3, fused);
        return true;
    }
    false
}

// X / Y => X/Y, X , Y => X/Y (comma and semicolon normalize to slash)
fn fuse_subpremise(tokens: &mut Vec<Token>, i: usize) -> bool {
    if i + 2 < tokens.len() && grammar::is_separator(tokens[i + 1].text()) {
        let fused = format!("{}/{}", tokens[i].text(), tokens[i + 2].text());
        splice(tokens, i, 3, fused);
        return true;
    }
    false
}

// X & Y => X&Y, X and Y => X&Y
fn fuse_combination(tokens: &mut Vec<Token>, i: usize) -> bool {
    if i + 2 < tokens.len() && grammar::is_and(tokens[i + 1].text()) {
        let fused = format!("{}&{}", tokens[i].text(), tokens[i + 2].text());
        splice(tokens, i, 3, fused);
        return true;
    }
    false
}

// 1 A => 1A, 2 a&b => 2a&b
fn fuse_letter_suffix(tokens: &mut Vec<Token>, i: usize) -> bool {
    if grammar::is_digit_run(tokens[i].text()) && grammar::is_letter_multi(tokens[i + 1].text()) {
        let fused = format!("{}{}", tokens[i].text(), tokens[i + 1].text());
        splice(tokens, i, 2, fused);
        return true;
    }
    false
}

// proposed lot => lot
fn drop_proposed(tokens: &mut Vec<Token>, i: usize) -> bool {
    if grammar::is_proposed(tokens[i].text())
        && grammar::is_subprem_keyword(tokens[i + 1].text())
    {
        tokens.remove(i);
        return true;
    }
    false
}

// lot X / Y => X/Y
fn keyword_number_sep_number(tokens: &mut Vec<Token>, i: usize) -> bool {
    if i + 3 < tokens.len()
        && grammar::is_subprem_keyword(tokens[i].text())
        && grammar::is_numal_multi(tokens[i + 1].text())
        && grammar::is_separator(tokens[i + 2].text())
        && grammar::is_numal_multi(tokens[i + 3].text())
    {
        let fused = format!("{}/{}", tokens[i + 1].text(), tokens[i + 3].text());
        splice(tokens, i, 4, fused);
        return true;
    }
    false
}

// lot X Y => X/Y (separator implicit)
fn keyword_number_number(tokens: &mut Vec<Token>, i: usize) -> bool {
    if i + 2 < tokens.len()
        && grammar::is_subprem_keyword(tokens[i].text())
        && grammar::is_numal_multi(tokens[i + 1].text())
        && grammar::is_numal_multi(tokens[i + 2].text())
    {
        let fused = format!("{}/{}", tokens[i + 1].text(), tokens[i + 2].text());
        splice(tokens, i, 3, fused);
        return true;
    }
    false
}

// lot X/Y => X/Y (the following token already encodes the sub-premise)
fn drop_keyword(tokens: &mut Vec<Token>, i: usize) -> bool {
    if grammar::is_subprem_keyword(tokens[i].text())
        && grammar::is_numal_subprem_multi(tokens[i + 1].text())
    {
        tokens.remove(i);
        return true;
    }
    false
}

/// The ordered rule table. First match wins; later rules assume earlier ones
/// already fired, so the order is load-bearing.
const RULES: &[FusionRule] = &[
    FusionRule { name: "proposed_slash_lot", apply: proposed_slash_lot },
    FusionRule { name: "split_fused_keyword", apply: split_fused_keyword },
    FusionRule { name: "fuse_range", apply: fuse_range },
    FusionRule { name: "fuse_subpremise", apply: fuse_subpremise },
    FusionRule { name: "fuse_combination", apply: fuse_combination },
    FusionRule { name: "fuse_letter_suffix", apply: fuse_letter_suffix },
    FusionRule { name: "drop_proposed", apply: drop_proposed },
    FusionRule { name: "keyword_number_sep_number", apply: keyword_number_sep_number },
    FusionRule { name: "keyword_number_number", apply: keyword_number_number },
    FusionRule { name: "drop_keyword", apply: drop_keyword },
];

/// Run the fusion pass to a fixed point.
///
/// # Example
///
/// ```rust
/// use streetkey::{fuse, tokenize};
///
/// let mut tokens = tokenize("lot 1,55 Mars St");
/// fuse(&mut tokens);
/// let texts: Vec<&str> = tokens.iter().map(|t| t.text()).collect();
/// assert_eq!(texts, ["1/55", "Mars", "St"]);
/// ```
pub fn fuse(tokens: &mut Vec<Token>) {
    let mut i = 0;
    while i + 1 < tokens.len() {
        match RULES.iter().find(|rule| (rule.apply)(tokens, i)) {
            Some(rule) => log::trace!("fusion rule {} fired at index {i}", rule.name),
            None => i += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::tokenize;

    fn fused(input: &str) -> Vec<String> {
        let mut tokens = tokenize(input);
        fuse(&mut tokens);
        tokens.iter().map(|t| t.text().to_string()).collect()
    }

    fn rule(name: &str) -> &'static FusionRule {
        RULES
            .iter()
            .find(|r| r.name == name)
            .unwrap_or_else(|| panic!("no rule named {name}"))
    }

    fn apply_rule(name: &str, input: &str) -> Option<Vec<String>> {
        let mut tokens = tokenize(input);
        let fired = (rule(name).apply)(&mut tokens, 0);
        fired.then(|| tokens.iter().map(|t| t.text().to_string()).collect())
    }

    #[test]
    fn test_rule_proposed_slash_lot() {
        assert_eq!(
            apply_rule("proposed_slash_lot", "p/l 18"),
            Some(vec!["lot".to_string(), "18".to_string()])
        );
        assert_eq!(apply_rule("proposed_slash_lot", "p & l"), None);
    }

    #[test]
    fn test_rule_split_fused_keyword() {
        assert_eq!(
            apply_rule("split_fused_keyword", "lot1-4 175"),
            Some(vec!["lot".to_string(), "1-4".to_string(), "175".to_string()])
        );
        assert_eq!(
            apply_rule("split_fused_keyword", "SOLD1 x"),
            Some(vec!["SOLD".to_string(), "1".to_string(), "x".to_string()])
        );
        // a bare keyword must not split
        assert_eq!(apply_rule("split_fused_keyword", "unit 5"), None);
    }

    #[test]
    fn test_rule_fuse_range() {
        assert_eq!(
            apply_rule("fuse_range", "2 - 4"),
            Some(vec!["2-4".to_string()])
        );
    }

    #[test]
    fn test_rule_fuse_subpremise_normalizes_comma() {
        assert_eq!(
            apply_rule("fuse_subpremise", "1 , 55"),
            Some(vec!["1/55".to_string()])
        );
        assert_eq!(
            apply_rule("fuse_subpremise", "19 / 2"),
            Some(vec!["19/2".to_string()])
        );
    }

    #[test]
    fn test_rule_fuse_combination() {
        assert_eq!(
            apply_rule("fuse_combination", "A and B"),
            Some(vec!["A&B".to_string()])
        );
        assert_eq!(
            apply_rule("fuse_combination", "2 & 4"),
            Some(vec!["2&4".to_string()])
        );
    }

    #[test]
    fn test_rule_fuse_letter_suffix() {
        assert_eq!(
            apply_rule("fuse_letter_suffix", "2 a"),
            Some(vec!["2a".to_string()])
        );
        assert_eq!(
            apply_rule("fuse_letter_suffix", "2 a&b"),
            Some(vec!["2a&b".to_string()])
        );
        // letter before digit never fuses
        assert_eq!(apply_rule("fuse_letter_suffix", "a 2"), None);
    }

    #[test]
    fn test_rule_drop_proposed() {
        assert_eq!(
            apply_rule("drop_proposed", "proposed lot"),
            Some(vec!["lot".to_string()])
        );
    }

    #[test]
    fn test_rule_keyword_fusions() {
        assert_eq!(
            apply_rule("keyword_number_sep_number", "lot 1 , 62"),
            Some(vec!["1/62".to_string()])
        );
        assert_eq!(
            apply_rule("keyword_number_number", "unit 1 21"),
            Some(vec!["1/21".to_string()])
        );
        // "38-42" alone already satisfies the fused-number grammar, so the
        // keyword is dropped and later slash fusion finishes the job
        assert_eq!(
            apply_rule("drop_keyword", "lot 38-42/2"),
            Some(vec!["38-42".to_string(), "/".to_string(), "2".to_string()])
        );
    }

    #[test]
    fn test_fuse_end_to_end_spans() {
        assert_eq!(fused("19 / 2-4 The St"), ["19/2-4", "The", "St"]);
        assert_eq!(fused("SOLD1/77 Surrey Rd"), ["1/77", "Surrey", "Rd"]);
        assert_eq!(fused("A and B/149 Manning Road"), ["A&B/149", "Manning", "Road"]);
        assert_eq!(fused("FL 1 12/4-8 Queen Street"), ["1/12/4-8", "Queen", "Street"]);
        assert_eq!(fused("p/l 1,55 Mars St"), ["1/55", "Mars", "St"]);
    }

    #[test]
    fn test_fuse_is_idempotent() {
        let mut tokens = tokenize("unit 2a/62 The St");
        fuse(&mut tokens);
        let once: Vec<String> = tokens.iter().map(|t| t.text().to_string()).collect();
        fuse(&mut tokens);
        let twice: Vec<String> = tokens.iter().map(|t| t.text().to_string()).collect();
        assert_eq!(once, twice);
        assert_eq!(once, ["2a/62", "The", "St"]);
    }

    #[test]
    fn test_fuse_leaves_plain_addresses_alone() {
        assert_eq!(fused("2 The St"), ["2", "The", "St"]);
        assert_eq!(fused("201 (Rear) Bishopsgate Street"), [
            "201",
            "(Rear)",
            "Bishopsgate",
            "Street"
        ]);
    }
}
