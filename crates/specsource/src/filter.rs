//! Glob matching for spec file filters.
//!
//! Supports `*` (within one path segment), `**` (across segments), `?`
//! (single character), and comma-separated alternative patterns. This is
//! the full feature set project filters need; anything fancier belongs to
//! the project configuration, not here.

/// Does `path` match the comma-separated glob `filter`?
///
/// An empty filter matches everything.
pub fn matches(filter: &str, path: &str) -> bool {
    let patterns: Vec<&str> = filter
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if patterns.is_empty() {
        return true;
    }
    patterns.iter().any(|p| glob_match(p, path))
}

/// Match a single glob pattern against a `/`-separated path.
fn glob_match(pattern: &str, path: &str) -> bool {
    let pat: Vec<char> = pattern.chars().collect();
    let txt: Vec<char> = path.chars().collect();
    match_from(&pat, &txt)
}

fn match_from(pat: &[char], txt: &[char]) -> bool {
    match pat.first() {
        None => txt.is_empty(),
        Some('*') => {
            // `**` spans directory separators, `*` stops at them.
            let double = pat.get(1) == Some(&'*');
            let rest = if double { &pat[2..] } else { &pat[1..] };
            // `**/` may also match zero segments.
            if double && rest.first() == Some(&'/') && match_from(&rest[1..], txt) {
                return true;
            }
            for i in 0..=txt.len() {
                if match_from(rest, &txt[i..]) {
                    return true;
                }
                if i < txt.len() && !double && txt[i] == '/' {
                    return false;
                }
            }
            false
        }
        Some('?') => !txt.is_empty() && txt[0] != '/' && match_from(&pat[1..], &txt[1..]),
        Some(c) => txt.first() == Some(c) && match_from(&pat[1..], &txt[1..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_patterns_match_exactly() {
        assert!(matches("cypress/e2e/a.cy.js", "cypress/e2e/a.cy.js"));
        assert!(!matches("cypress/e2e/a.cy.js", "cypress/e2e/b.cy.js"));
    }

    #[test]
    fn single_star_stays_within_a_segment() {
        assert!(matches("cypress/e2e/*.cy.js", "cypress/e2e/a.cy.js"));
        assert!(!matches("cypress/e2e/*.cy.js", "cypress/e2e/sub/a.cy.js"));
    }

    #[test]
    fn double_star_spans_segments() {
        assert!(matches("cypress/e2e/**", "cypress/e2e/a.cy.js"));
        assert!(matches("cypress/e2e/**", "cypress/e2e/sub/deep/a.cy.js"));
        assert!(matches("cypress/**/*.cy.js", "cypress/e2e/sub/a.cy.js"));
        assert!(!matches("cypress/e2e/**", "cypress/other/a.cy.js"));
    }

    #[test]
    fn double_star_slash_matches_zero_segments() {
        assert!(matches("cypress/**/a.cy.js", "cypress/a.cy.js"));
    }

    #[test]
    fn question_mark_matches_one_char() {
        assert!(matches("spec?.js", "spec1.js"));
        assert!(!matches("spec?.js", "spec12.js"));
        assert!(!matches("spec?.js", "spec/.js"));
    }

    #[test]
    fn comma_separates_alternatives() {
        assert!(matches("a/*.js, b/*.js", "b/x.js"));
        assert!(!matches("a/*.js, b/*.js", "c/x.js"));
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(matches("", "anything/at/all.js"));
        assert!(matches(" , ", "anything/at/all.js"));
    }
}
