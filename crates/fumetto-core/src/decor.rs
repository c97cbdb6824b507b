//! Decorative-text transformer: raw bubble text → styled segments.
//!
//! The first-letter rule (at most one is meaningful) runs first and splits
//! the leading character off into its own styled segment. All remaining
//! search/symbol rules are applied in a single tokenizer pass over the rest
//! of the text: at each step the earliest match position wins, ties go to
//! the longest search term, and remaining ties to rule declaration order.
//! One pass means later rules can never corrupt earlier replacements.

use crate::model::{DecorRule, TextSegment};

/// Built-in profanity-to-grawlix table for symbol-replace rules without an
/// explicit symbol. Unrecognized terms get the generic run.
fn symbol_substitute(term: &str) -> &'static str {
    match term.to_ascii_lowercase().as_str() {
        "damn" => "@#$%",
        "hell" => "#@%!",
        "crap" => "%@#&",
        "dang" => "@#%!",
        _ => "@#$%",
    }
}

/// What a matched term turns into.
#[derive(Debug, Clone, Copy)]
enum Replacement<'a> {
    /// Keep the matched text (search-replace).
    Keep,
    /// Substitute a symbol run (symbol-replace).
    Symbol(&'a str),
}

struct Term<'a> {
    search: &'a str,
    class: &'a str,
    replacement: Replacement<'a>,
}

/// Apply decorative-text rules to raw text, producing an ordered list of
/// plain and styled segments. With no applicable rules the output is a
/// single plain segment. Pure and deterministic.
#[must_use]
pub fn apply_decor(text: &str, rules: &[DecorRule]) -> Vec<TextSegment> {
    let first_letter_class = rules.iter().find_map(|r| match r {
        DecorRule::FirstLetter { class } => Some(class.as_str()),
        _ => None,
    });

    let terms: Vec<Term<'_>> = rules
        .iter()
        .filter_map(|r| match r {
            DecorRule::FirstLetter { .. } => None,
            DecorRule::SearchReplace { class, search } => Some(Term {
                search,
                class,
                replacement: Replacement::Keep,
            }),
            DecorRule::SymbolReplace {
                class,
                search,
                symbol,
            } => Some(Term {
                search,
                class,
                replacement: Replacement::Symbol(
                    symbol.as_deref().unwrap_or_else(|| symbol_substitute(search)),
                ),
            }),
        })
        .filter(|t| !t.search.is_empty())
        .collect();

    let mut segments = Vec::new();
    let mut rest = text;

    if let Some(class) = first_letter_class {
        if let Some(first) = text.chars().next() {
            segments.push(TextSegment::Styled {
                text: first.to_string(),
                class: class.to_string(),
            });
            rest = &text[first.len_utf8()..];
        }
    }

    tokenize(rest, &terms, &mut segments);

    if segments.is_empty() {
        segments.push(TextSegment::Plain(String::new()));
    }
    segments
}

/// Single-pass scan: split `text` on term matches, emitting plain segments
/// between matches and styled segments for the matches themselves.
fn tokenize(text: &str, terms: &[Term<'_>], out: &mut Vec<TextSegment>) {
    if terms.is_empty() {
        if !text.is_empty() {
            out.push(TextSegment::Plain(text.to_string()));
        }
        return;
    }

    let mut cursor = 0;
    while cursor < text.len() {
        match earliest_match(&text[cursor..], terms) {
            Some((at, term)) => {
                if at > 0 {
                    out.push(TextSegment::Plain(text[cursor..cursor + at].to_string()));
                }
                let matched = &text[cursor + at..cursor + at + term.search.len()];
                let styled = match term.replacement {
                    Replacement::Keep => matched.to_string(),
                    Replacement::Symbol(sym) => sym.to_string(),
                };
                out.push(TextSegment::Styled {
                    text: styled,
                    class: term.class.to_string(),
                });
                cursor += at + term.search.len();
            }
            None => {
                out.push(TextSegment::Plain(text[cursor..].to_string()));
                break;
            }
        }
    }
}

/// Find the earliest case-insensitive term match in `text`.
/// Returns the byte offset and the winning term. Longest term wins a
/// position tie; declaration order breaks exact ties.
fn earliest_match<'t, 'a>(text: &str, terms: &'t [Term<'a>]) -> Option<(usize, &'t Term<'a>)> {
    let mut best: Option<(usize, &Term<'_>)> = None;

    for (at, _) in text.char_indices() {
        for term in terms {
            if matches_at(text, at, term.search) {
                let better = match best {
                    None => true,
                    Some((best_at, best_term)) => {
                        at < best_at || (at == best_at && term.search.len() > best_term.search.len())
                    }
                };
                if better {
                    best = Some((at, term));
                }
            }
        }
        // Matches at later positions can't beat one already found here.
        if best.is_some_and(|(b, _)| b <= at) {
            break;
        }
    }
    best
}

/// ASCII-case-insensitive comparison of `needle` against `haystack[at..]`,
/// respecting char boundaries.
fn matches_at(haystack: &str, at: usize, needle: &str) -> bool {
    let end = at + needle.len();
    end <= haystack.len()
        && haystack.is_char_boundary(end)
        && haystack[at..end].eq_ignore_ascii_case(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn styled(text: &str, class: &str) -> TextSegment {
        TextSegment::Styled {
            text: text.into(),
            class: class.into(),
        }
    }

    #[test]
    fn no_rules_yields_single_plain_segment() {
        let segs = apply_decor("just words", &[]);
        assert_eq!(segs, vec![TextSegment::Plain("just words".into())]);
    }

    #[test]
    fn symbol_replace_uses_builtin_grawlix() {
        let rules = [DecorRule::SymbolReplace {
            class: "grawlix".into(),
            search: "damn".into(),
            symbol: None,
        }];
        let segs = apply_decor("damn that's cool", &rules);
        assert_eq!(
            segs,
            vec![
                styled("@#$%", "grawlix"),
                TextSegment::Plain(" that's cool".into()),
            ]
        );
    }

    #[test]
    fn first_letter_plus_search_replace() {
        let rules: smallvec::SmallVec<[DecorRule; 2]> = smallvec![
            DecorRule::FirstLetter {
                class: "dropcap".into()
            },
            DecorRule::SearchReplace {
                class: "em".into(),
                search: "world".into()
            },
        ];
        let segs = apply_decor("hello world", &rules);
        assert_eq!(
            segs,
            vec![
                styled("h", "dropcap"),
                TextSegment::Plain("ello ".into()),
                styled("world", "em"),
            ]
        );
    }

    #[test]
    fn matching_is_case_insensitive_and_keeps_original_text() {
        let rules = [DecorRule::SearchReplace {
            class: "em".into(),
            search: "wow".into(),
        }];
        let segs = apply_decor("WOW indeed", &rules);
        assert_eq!(
            segs,
            vec![styled("WOW", "em"), TextSegment::Plain(" indeed".into())]
        );
    }

    #[test]
    fn earliest_match_wins_over_declaration_order() {
        // "later" is declared first but matches after "sooner".
        let rules = [
            DecorRule::SearchReplace {
                class: "a".into(),
                search: "later".into(),
            },
            DecorRule::SearchReplace {
                class: "b".into(),
                search: "sooner".into(),
            },
        ];
        let segs = apply_decor("sooner or later", &rules);
        assert_eq!(
            segs,
            vec![
                styled("sooner", "b"),
                TextSegment::Plain(" or ".into()),
                styled("later", "a"),
            ]
        );
    }

    #[test]
    fn longest_term_wins_a_position_tie() {
        let rules = [
            DecorRule::SearchReplace {
                class: "short".into(),
                search: "over".into(),
            },
            DecorRule::SearchReplace {
                class: "long".into(),
                search: "overload".into(),
            },
        ];
        let segs = apply_decor("overload!", &rules);
        assert_eq!(
            segs,
            vec![styled("overload", "long"), TextSegment::Plain("!".into())]
        );
    }

    #[test]
    fn explicit_symbol_overrides_builtin() {
        let rules = [DecorRule::SymbolReplace {
            class: "grawlix".into(),
            search: "heck".into(),
            symbol: Some("✶✶✶".into()),
        }];
        let segs = apply_decor("heck yes", &rules);
        assert_eq!(
            segs,
            vec![styled("✶✶✶", "grawlix"), TextSegment::Plain(" yes".into())]
        );
    }

    #[test]
    fn deterministic_on_same_input() {
        let rules = [
            DecorRule::FirstLetter {
                class: "dropcap".into(),
            },
            DecorRule::SymbolReplace {
                class: "grawlix".into(),
                search: "darn".into(),
                symbol: None,
            },
        ];
        let a = apply_decor("well darn it", &rules);
        let b = apply_decor("well darn it", &rules);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_text_yields_single_empty_plain() {
        let rules = [DecorRule::FirstLetter {
            class: "dropcap".into(),
        }];
        let segs = apply_decor("", &rules);
        assert_eq!(segs, vec![TextSegment::Plain(String::new())]);
    }
}
