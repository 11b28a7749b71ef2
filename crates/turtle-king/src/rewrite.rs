//! Parallel string rewriting.
//!
//! Every pass replaces each symbol that has a rule with the rule's
//! replacement and copies every other symbol unchanged. Replacements are
//! not expanded again within the same pass, so the expansion depth is
//! exactly the number of iterations.
//!
//! Output length grows multiplicatively with no ceiling. A grammar like
//! `F -> FFFF` reaches 4^n symbols after n passes, so callers that take
//! iteration counts from users should use [`rewrite_bounded`].

use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewriteError {
    #[error("iteration {iteration} would produce {length} symbols (limit {limit})")]
    LengthLimit { iteration: u32, length: u64, limit: usize },
}

/// Expand `axiom` through `iterations` passes of `rules`.
pub fn rewrite(axiom: &str, rules: &BTreeMap<char, String>, iterations: u32) -> String {
    let mut current = axiom.to_string();

    for _ in 0..iterations {
        current = rewrite_pass(&current, rules, current.len());
    }

    tracing::debug!(iterations, length = current.len(), "rewrite finished");
    current
}

/// Like [`rewrite`], but refuses to build a string longer than `limit`
/// symbols. The length of each pass is predicted before it is built.
pub fn rewrite_bounded(
    axiom: &str,
    rules: &BTreeMap<char, String>,
    iterations: u32,
    limit: usize,
) -> Result<String, RewriteError> {
    let axiom_len = axiom.chars().count() as u64;
    if axiom_len > limit as u64 {
        return Err(RewriteError::LengthLimit { iteration: 0, length: axiom_len, limit });
    }

    let rule_lengths = replacement_lengths(rules);
    let mut current = axiom.to_string();

    for iteration in 1..=iterations {
        let next_len = current
            .chars()
            .map(|c| rule_lengths.get(&c).copied().unwrap_or(1))
            .fold(0u64, u64::saturating_add);

        if next_len > limit as u64 {
            tracing::warn!(iteration, length = next_len, limit, "rewrite length limit hit");
            return Err(RewriteError::LengthLimit { iteration, length: next_len, limit });
        }

        current = rewrite_pass(&current, rules, current.len());
    }

    Ok(current)
}

/// Length of the rewritten string after each pass, without building it.
///
/// Index 0 is the axiom length; index `n` is the length after `n` passes.
/// Lengths saturate at `u64::MAX`.
pub fn expansion_lengths(axiom: &str, rules: &BTreeMap<char, String>, iterations: u32) -> Vec<u64> {
    // Only symbol counts matter for length, not their order.
    let mut counts: BTreeMap<char, u64> = BTreeMap::new();
    for c in axiom.chars() {
        *counts.entry(c).or_default() += 1;
    }

    let mut lengths = Vec::with_capacity(iterations as usize + 1);
    lengths.push(total(&counts));

    for _ in 0..iterations {
        let mut next: BTreeMap<char, u64> = BTreeMap::new();
        for (&symbol, &count) in &counts {
            match rules.get(&symbol) {
                Some(replacement) => {
                    for c in replacement.chars() {
                        let slot = next.entry(c).or_default();
                        *slot = slot.saturating_add(count);
                    }
                }
                None => {
                    let slot = next.entry(symbol).or_default();
                    *slot = slot.saturating_add(count);
                }
            }
        }
        counts = next;
        lengths.push(total(&counts));
    }

    lengths
}

fn rewrite_pass(current: &str, rules: &BTreeMap<char, String>, capacity_hint: usize) -> String {
    let mut next = String::with_capacity(capacity_hint);
    for c in current.chars() {
        match rules.get(&c) {
            Some(replacement) => next.push_str(replacement),
            None => next.push(c), // constants pass through
        }
    }
    next
}

fn replacement_lengths(rules: &BTreeMap<char, String>) -> BTreeMap<char, u64> {
    rules
        .iter()
        .map(|(&symbol, replacement)| (symbol, replacement.chars().count() as u64))
        .collect()
}

fn total(counts: &BTreeMap<char, u64>) -> u64 {
    counts.values().fold(0u64, |acc, &n| acc.saturating_add(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(pairs: &[(char, &str)]) -> BTreeMap<char, String> {
        pairs.iter().map(|&(c, r)| (c, r.to_string())).collect()
    }

    #[test]
    fn zero_iterations_returns_axiom() {
        let r = rules(&[('F', "F+F-F-FF+F+F-F"), ('X', "XY")]);
        assert_eq!(rewrite("F-X[+F]", &r, 0), "F-X[+F]");
        assert_eq!(rewrite("", &r, 0), "");
    }

    #[test]
    fn fibonacci_word_lengths() {
        let r = rules(&[('A', "AB"), ('B', "A")]);
        let expected = [1, 2, 3, 5, 8, 13, 21, 34];
        for (n, &len) in expected.iter().enumerate() {
            assert_eq!(rewrite("A", &r, n as u32).len(), len, "iteration {n}");
        }
        assert_eq!(rewrite("A", &r, 4), "ABAABABA");
    }

    #[test]
    fn replacements_are_not_expanded_within_a_pass() {
        let r = rules(&[('A', "B"), ('B', "C")]);
        assert_eq!(rewrite("A", &r, 1), "B");
        assert_eq!(rewrite("A", &r, 2), "C");
    }

    #[test]
    fn constants_pass_through() {
        let r = rules(&[('F', "FF")]);
        assert_eq!(rewrite("+F[-F]", &r, 1), "+FF[-FF]");
    }

    #[test]
    fn uniform_expansion_grows_by_k_to_the_n() {
        let r = rules(&[('F', "FFF")]);
        assert_eq!(rewrite("FF", &r, 4).len(), 2 * 3usize.pow(4));
    }

    #[test]
    fn rewrite_is_deterministic() {
        let r = rules(&[('X', "F+[[X]-X]-F[-FX]+X"), ('F', "FF")]);
        assert_eq!(rewrite("X", &r, 3), rewrite("X", &r, 3));
    }

    #[test]
    fn predicted_lengths_match_actual() {
        let r = rules(&[('X', "F+[[X]-X]-F[-FX]+X"), ('F', "FF")]);
        let lengths = expansion_lengths("X", &r, 4);
        assert_eq!(lengths.len(), 5);
        for (n, &len) in lengths.iter().enumerate() {
            assert_eq!(len as usize, rewrite("X", &r, n as u32).len());
        }
    }

    #[test]
    fn predicted_lengths_count_chars_not_bytes() {
        let r = rules(&[('λ', "λλ")]);
        assert_eq!(expansion_lengths("λ", &r, 3), vec![1, 2, 4, 8]);
    }

    #[test]
    fn predicted_lengths_saturate() {
        let r = rules(&[('F', "FFFFFFFFFF")]);
        let lengths = expansion_lengths("F", &r, 40);
        assert_eq!(*lengths.last().unwrap(), u64::MAX);
    }

    #[test]
    fn bounded_rewrite_within_limit_matches_unbounded() {
        let r = rules(&[('A', "AB"), ('B', "A")]);
        assert_eq!(rewrite_bounded("A", &r, 5, 13).unwrap(), rewrite("A", &r, 5));
    }

    #[test]
    fn bounded_rewrite_reports_first_pass_over_limit() {
        let r = rules(&[('F', "FFFF")]);
        let err = rewrite_bounded("F", &r, 10, 100).unwrap_err();
        assert_eq!(err, RewriteError::LengthLimit { iteration: 4, length: 256, limit: 100 });
    }

    #[test]
    fn bounded_rewrite_checks_axiom() {
        let err = rewrite_bounded("FFF", &BTreeMap::new(), 0, 2).unwrap_err();
        assert_eq!(err, RewriteError::LengthLimit { iteration: 0, length: 3, limit: 2 });
    }
}
