use glob::{MatchOptions, Pattern};
use tracing::debug;

use crate::flags::ScanFlags;

// ---------------------------------------------------------------------------
// Single-glob matching
// ---------------------------------------------------------------------------

fn options(flags: ScanFlags) -> MatchOptions {
    MatchOptions {
        case_sensitive: flags.contains(ScanFlags::USE_CASE),
        require_literal_separator: false,
        // `*` never matches a leading dot unless the caller opted into
        // seeing hidden entries.
        require_literal_leading_dot: !flags.contains(ScanFlags::SHOW_ALL),
    }
}

/// Match `name` against a single shell-style glob.
///
/// Without [`ScanFlags::USE_CASE`], name and pattern are compared
/// case-folded. Without [`ScanFlags::SHOW_ALL`], a wildcard never matches a
/// leading dot — `*.txt` does not match `.hidden.txt`.
///
/// A pattern that fails to compile matches nothing.
pub fn match_pattern(name: &str, pattern: &str, flags: ScanFlags) -> bool {
    match Pattern::new(pattern) {
        Ok(p) => p.matches_with(name, options(flags)),
        Err(e) => {
            debug!(pattern, error = %e, "unparseable glob treated as no match");
            false
        }
    }
}

// ---------------------------------------------------------------------------
// Combinator expressions
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq)]
enum Op {
    None,
    And,
    Or,
}

/// Match `name` against a boolean combinator expression over glob atoms.
///
/// Atoms are joined by `&` (and) and `|` (or); a `^` at the start of an atom
/// negates it. There are no parentheses and **no operator precedence**:
/// evaluation is strictly left to right, so `"a|b&c"` means `(a|b)` then
/// `&c`, not `a|(b&c)`. An `&` combination that comes out false stops
/// evaluation immediately. Existing search expressions rely on this exact
/// order; do not change it.
///
/// An empty expression matches everything. An expression with no operators
/// is a single [`match_pattern`] call. Trailing operators are ignored.
pub fn match_expr(name: &str, expr: &str, flags: ScanFlags) -> bool {
    let mut acc = true;
    let mut pending = Op::None;
    let mut negate = false;
    let mut atom = String::new();

    let combine = |acc: &mut bool, pending: Op, negate: &mut bool, atom: &mut String| -> bool {
        let mut hit = match_pattern(name, atom, flags);
        if *negate {
            hit = !hit;
            *negate = false;
        }
        atom.clear();
        *acc = match pending {
            Op::None => hit,
            Op::Or => *acc || hit,
            Op::And => *acc && hit,
        };
        // And short-circuits: a false conjunction ends the scan.
        !(pending == Op::And && !*acc)
    };

    for ch in expr.chars() {
        match ch {
            '^' if atom.is_empty() => negate = true,
            '&' | '|' => {
                if !combine(&mut acc, pending, &mut negate, &mut atom) {
                    return false;
                }
                pending = if ch == '&' { Op::And } else { Op::Or };
            }
            _ => atom.push(ch),
        }
    }

    // A trailing operator or lone `^` leaves an empty final atom; it is
    // ignored rather than evaluated.
    if !atom.is_empty() && !combine(&mut acc, pending, &mut negate, &mut atom) {
        return false;
    }

    acc
}

/// Check that every atom of `expr` is a compilable glob, returning the first
/// offending atom. The scanner validates its leaf expression up front so a
/// typo fails the load instead of silently matching nothing.
pub(crate) fn validate_expr(expr: &str) -> Result<(), String> {
    for raw in expr.split(['&', '|']) {
        let atom = raw.strip_prefix('^').unwrap_or(raw);
        if atom.is_empty() {
            continue;
        }
        if Pattern::new(atom).is_err() {
            return Err(atom.to_string());
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: ScanFlags = ScanFlags::empty();

    #[test]
    fn plain_glob() {
        assert!(match_pattern("notes.txt", "*.txt", NONE));
        assert!(!match_pattern("notes.md", "*.txt", NONE));
    }

    #[test]
    fn case_fold_by_default() {
        assert!(match_pattern("NOTES.TXT", "*.txt", NONE));
        assert!(!match_pattern("NOTES.TXT", "*.txt", ScanFlags::USE_CASE));
    }

    #[test]
    fn case_fold_equivalence() {
        // Folding by flag and folding by hand agree.
        for (name, pattern) in [("ReadMe.MD", "*.md"), ("ReadMe.MD", "read*"), ("x", "y")] {
            assert_eq!(
                match_pattern(name, pattern, NONE),
                match_pattern(
                    &name.to_lowercase(),
                    &pattern.to_lowercase(),
                    ScanFlags::USE_CASE
                ),
            );
        }
    }

    #[test]
    fn leading_dot_is_literal_by_default() {
        assert!(!match_pattern(".hidden", "*", NONE));
        assert!(match_pattern(".hidden", "*", ScanFlags::SHOW_ALL));
        // An explicit dot in the pattern always works.
        assert!(match_pattern(".hidden", ".h*", NONE));
    }

    #[test]
    fn expr_reduces_to_single_pattern() {
        assert_eq!(
            match_expr("a.txt", "*.txt", NONE),
            match_pattern("a.txt", "*.txt", NONE)
        );
    }

    #[test]
    fn expr_and() {
        assert!(match_expr("a.txt", "a*&*.txt", NONE));
        assert!(!match_expr("b.txt", "a*&*.txt", NONE));
    }

    #[test]
    fn expr_or() {
        assert!(match_expr("a.md", "*.txt|*.md", NONE));
        assert!(match_expr("a.txt", "*.txt|*.md", NONE));
        assert!(!match_expr("a.rs", "*.txt|*.md", NONE));
    }

    #[test]
    fn expr_negation() {
        assert!(!match_expr("a.txt", "^*.txt", NONE));
        assert!(match_expr("a.md", "^*.txt", NONE));
    }

    #[test]
    fn no_precedence_strict_left_to_right() {
        // "a|b&c" on a name matching only "a": (a|b) is true, &c is false.
        // Conventional precedence a|(b&c) would yield true instead.
        assert!(!match_expr("a", "a|b&c", NONE));
        // "a&b|c" on a name matching only "c": a fails, the And combination
        // is false and evaluation stops before "c" is ever considered.
        assert!(!match_expr("c", "a&b|c", NONE));
    }

    #[test]
    fn empty_expression_matches_everything() {
        assert!(match_expr("anything", "", NONE));
        assert!(match_expr("", "", NONE));
    }

    #[test]
    fn trailing_operators_are_ignored() {
        assert!(match_expr("a.txt", "*.txt&", NONE));
        assert!(match_expr("a.txt", "*.txt|", NONE));
        // A lone carried negation never applies.
        assert!(match_expr("a.txt", "^", NONE));
    }

    #[test]
    fn negation_mid_expression() {
        assert!(match_expr("a.txt", "a*&^*.md", NONE));
        assert!(!match_expr("a.md", "a*&^*.md", NONE));
    }

    #[test]
    fn caret_inside_atom_is_literal() {
        // Only a caret at the start of an atom negates; later ones belong
        // to the glob text itself.
        assert!(match_expr("x^y", "x^y", NONE));
        assert!(!match_expr("xy", "x^y", NONE));
        // Glob character-class negation uses `!` and passes through intact.
        assert!(match_expr("b", "[!a]", NONE));
        assert!(!match_expr("a", "[!a]", NONE));
    }

    #[test]
    fn validate_catches_bad_atom() {
        assert!(validate_expr("*.txt|*.md").is_ok());
        assert!(validate_expr("^*.txt&doc*").is_ok());
        assert_eq!(validate_expr("*.txt|[bad").unwrap_err(), "[bad");
    }
}
