use std::collections::BTreeSet;

use th_core::types::OrderPolicy;

pub const WILDCARD_PREFIX: &str = "*.";

/// Build the final, ordered rule list from a set of domains.
///
/// Input is deduplicated by exact string. With `expand_wildcard`, every domain
/// also yields `*.<domain>`. The result is ordered by `order` and does not
/// depend on the iteration order of the input.
pub fn build_rules<I, S>(domains: I, expand_wildcard: bool, order: OrderPolicy) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set: BTreeSet<String> = BTreeSet::new();

    for domain in domains {
        let domain = domain.as_ref();
        if domain.is_empty() {
            continue;
        }
        if expand_wildcard && !domain.starts_with(WILDCARD_PREFIX) {
            set.insert(format!("{WILDCARD_PREFIX}{domain}"));
        }
        set.insert(domain.to_string());
    }

    let mut rules: Vec<String> = set.into_iter().collect();
    sort_rules(&mut rules, order);
    rules
}

/// Sort rules in place per the ordering policy.
pub fn sort_rules(rules: &mut [String], order: OrderPolicy) {
    match order {
        OrderPolicy::Lexical => rules.sort_unstable(),
        OrderPolicy::Length => {
            rules.sort_unstable_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
        }
    }
}

/// Render rules as file content: one rule per line, each newline-terminated.
pub fn render_rules(rules: &[String]) -> String {
    let capacity = rules.iter().map(|r| r.len() + 1).sum();
    let mut out = String::with_capacity(capacity);
    for rule in rules {
        out.push_str(rule);
        out.push('\n');
    }
    out
}

/// Remove a leading `*.` if present.
#[inline]
pub fn strip_wildcard(rule: &str) -> &str {
    rule.strip_prefix(WILDCARD_PREFIX).unwrap_or(rule)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_and_sorts_lexically() {
        let rules = build_rules(["example.com", "example.co.uk"], true, OrderPolicy::Lexical);
        assert_eq!(
            rules,
            vec!["*.example.co.uk", "*.example.com", "example.co.uk", "example.com"]
        );
    }

    #[test]
    fn sorts_by_length_with_lexical_ties() {
        let rules = build_rules(["bbb.com", "a.com", "ccc.org", "aaa.com"], false, OrderPolicy::Length);
        assert_eq!(rules, vec!["a.com", "aaa.com", "bbb.com", "ccc.org"]);
    }

    #[test]
    fn deduplicates_exact_strings() {
        let rules = build_rules(["a.com", "a.com", "b.com", "a.com"], false, OrderPolicy::Lexical);
        assert_eq!(rules, vec!["a.com", "b.com"]);

        let expanded = build_rules(["a.com", "a.com", "b.com"], true, OrderPolicy::Lexical);
        assert_eq!(expanded.len(), 4);
    }

    #[test]
    fn does_not_double_wildcard() {
        let rules = build_rules(["*.a.com", "a.com"], true, OrderPolicy::Lexical);
        assert_eq!(rules, vec!["*.a.com", "a.com"]);
    }

    #[test]
    fn output_is_independent_of_input_order() {
        let forward = build_rules(["z.net", "a.org", "m.com"], true, OrderPolicy::Length);
        let backward = build_rules(["m.com", "a.org", "z.net"], true, OrderPolicy::Length);
        assert_eq!(forward, backward);
        assert_eq!(render_rules(&forward), render_rules(&build_rules(&forward, false, OrderPolicy::Length)));
    }

    #[test]
    fn renders_one_rule_per_line() {
        let rules = vec!["a.com".to_string(), "*.a.com".to_string()];
        assert_eq!(render_rules(&rules), "a.com\n*.a.com\n");
        assert_eq!(render_rules(&[]), "");
    }

    #[test]
    fn strips_wildcard_prefix() {
        assert_eq!(strip_wildcard("*.example.com"), "example.com");
        assert_eq!(strip_wildcard("example.com"), "example.com");
    }
}
