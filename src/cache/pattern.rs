//! Glob Pattern Module
//!
//! Redis-compatible glob matching used by the in-process backend so that
//! `KEYS`/`SCAN MATCH` patterns behave the same on both backends.
//!
//! Supported syntax: `*`, `?`, `[abc]`, `[^abc]`, `[a-z]` and `\` escapes.

/// Returns true if `text` matches the glob `pattern`.
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    match_from(&pattern, &text)
}

/// Iterative matcher; on mismatch resumes just after the last `*`, one text
/// position further. Runs in O(|p| * |t|).
fn match_from(p: &[char], t: &[char]) -> bool {
    let mut pi = 0;
    let mut ti = 0;
    // (pattern index after the last `*`, text index it is tried against)
    let mut resume: Option<(usize, usize)> = None;

    while ti < t.len() {
        if pi < p.len() && p[pi] == '*' {
            while pi < p.len() && p[pi] == '*' {
                pi += 1;
            }
            resume = Some((pi, ti));
            continue;
        }

        if let Some(next) = match_one(p, pi, t[ti]) {
            pi = next;
            ti += 1;
            continue;
        }

        match resume {
            Some((star_pi, star_ti)) => {
                pi = star_pi;
                ti = star_ti + 1;
                resume = Some((star_pi, ti));
            }
            None => return false,
        }
    }

    while pi < p.len() && p[pi] == '*' {
        pi += 1;
    }
    pi == p.len()
}

/// Matches the single-character token at `p[pi]` against `c`.
///
/// Returns the pattern index after the token, or `None` on mismatch or at
/// the end of the pattern.
fn match_one(p: &[char], pi: usize, c: char) -> Option<usize> {
    match *p.get(pi)? {
        '?' => Some(pi + 1),
        '[' => {
            let (matched, next) = match_class(p, pi + 1, c);
            matched.then_some(next)
        }
        '\\' if pi + 1 < p.len() => (p[pi + 1] == c).then_some(pi + 2),
        literal => (literal == c).then_some(pi + 1),
    }
}

/// Matches `c` against the class starting at `p[start]` (just past `[`).
///
/// Returns whether it matched and the pattern index after the closing `]`.
/// An unterminated class runs to the end of the pattern, as in Redis.
fn match_class(p: &[char], start: usize, c: char) -> (bool, usize) {
    let mut i = start;
    let negate = i < p.len() && p[i] == '^';
    if negate {
        i += 1;
    }

    let mut matched = false;
    while i < p.len() && p[i] != ']' {
        if p[i] == '\\' && i + 1 < p.len() {
            matched |= p[i + 1] == c;
            i += 2;
        } else if i + 2 < p.len() && p[i + 1] == '-' && p[i + 2] != ']' {
            let (lo, hi) = if p[i] <= p[i + 2] {
                (p[i], p[i + 2])
            } else {
                (p[i + 2], p[i])
            };
            matched |= lo <= c && c <= hi;
            i += 3;
        } else {
            matched |= p[i] == c;
            i += 1;
        }
    }

    let next = if i < p.len() { i + 1 } else { i };
    (matched != negate, next)
}
