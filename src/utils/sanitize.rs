use std::collections::HashSet;

use crate::utils::constants::{DIGIT_PREFIX, EMPTY_NAME_PLACEHOLDER};

/// Map a raw variable label to an identifier-safe name matching
/// `^[A-Za-z_][A-Za-z0-9_]*$`.
///
/// Unit and punctuation characters get fixed substitutes (`/` becomes
/// `_per_`, the degree sign becomes `deg`, superscript 2/3 become plain
/// digits), anything else outside `[A-Za-z0-9_]` collapses to `_`.
/// Re-applying to an already-sanitized name is a no-op.
pub fn sanitize_variable_name(raw: &str) -> String {
    let mut name = String::with_capacity(raw.len());

    for c in raw.chars() {
        match c {
            '/' => name.push_str("_per_"),
            '°' => name.push_str("deg"),
            '²' => name.push('2'),
            '³' => name.push('3'),
            '(' | ')' | ' ' | ',' | '-' | '.' => name.push('_'),
            c if c.is_ascii_alphanumeric() || c == '_' => name.push(c),
            _ => name.push('_'),
        }
    }

    // Collapse runs of underscores and strip them from the edges
    let mut collapsed = String::with_capacity(name.len());
    let mut prev_underscore = false;
    for c in name.chars() {
        if c == '_' {
            if !prev_underscore {
                collapsed.push('_');
            }
            prev_underscore = true;
        } else {
            collapsed.push(c);
            prev_underscore = false;
        }
    }
    let trimmed = collapsed.trim_matches('_');

    if trimmed.is_empty() {
        return EMPTY_NAME_PLACEHOLDER.to_string();
    }

    if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        format!("{}{}", DIGIT_PREFIX, trimmed)
    } else {
        trimmed.to_string()
    }
}

/// Sanitize an ordered list of raw labels without ever merging two distinct
/// labels into one name: the first label to claim a sanitized name keeps it,
/// later collisions get a deterministic `_2`, `_3`, ... suffix.
pub fn sanitize_labels<'a, I>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut taken: HashSet<String> = HashSet::new();
    let mut out = Vec::new();

    for label in labels {
        let base = sanitize_variable_name(label);
        let name = if taken.contains(&base) {
            let mut n = 2;
            loop {
                let candidate = format!("{}_{}", base, n);
                if !taken.contains(&candidate) {
                    break candidate;
                }
                n += 1;
            }
        } else {
            base
        };
        taken.insert(name.clone());
        out.push(name);
    }

    out
}
