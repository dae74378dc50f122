/// One entry of a priority-ordered predicate table
pub struct Rule<P: 'static, L: 'static> {
    /// Stable name for logging and tests
    pub name: &'static str,
    pub predicate: P,
    pub label: L,
}

/// Ordered rule list: the first matching rule wins, later rules are not evaluated.
///
/// The table is generic over the predicate type so that predicates may take
/// borrowed inputs (`fn(&Input<'_>) -> bool`); callers supply how to apply one.
pub struct RuleTable<P: 'static, L: Copy + 'static> {
    rules: &'static [Rule<P, L>],
    default: L,
}

impl<P: 'static, L: Copy + 'static> RuleTable<P, L> {
    #[must_use]
    pub const fn new(rules: &'static [Rule<P, L>], default: L) -> Self {
        Self { rules, default }
    }

    /// First rule whose predicate passes `test`
    pub fn matching_rule(&self, mut test: impl FnMut(&P) -> bool) -> Option<&'static Rule<P, L>> {
        self.rules.iter().find(|rule| test(&rule.predicate))
    }

    /// Label of the first matching rule, or the table default
    pub fn evaluate(&self, test: impl FnMut(&P) -> bool) -> L {
        self.matching_rule(test)
            .map_or(self.default, |rule| rule.label)
    }

    /// Table default label
    #[must_use]
    pub const fn default_label(&self) -> L {
        self.default
    }

    /// Rule names in evaluation order
    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> {
        self.rules.iter().map(|rule| rule.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type IntPredicate = fn(i32) -> bool;

    fn negative(n: i32) -> bool {
        n < 0
    }

    fn small(n: i32) -> bool {
        n < 10
    }

    fn even(n: i32) -> bool {
        n % 2 == 0
    }

    static RULES: &[Rule<IntPredicate, &str>] = &[
        Rule {
            name: "negative",
            predicate: negative,
            label: "neg",
        },
        Rule {
            name: "small",
            predicate: small,
            label: "small",
        },
        Rule {
            name: "even",
            predicate: even,
            label: "even",
        },
    ];

    static TABLE: RuleTable<IntPredicate, &str> = RuleTable::new(RULES, "other");

    fn classify(n: i32) -> &'static str {
        TABLE.evaluate(|p| p(n))
    }

    #[test]
    fn first_match_wins() {
        assert_eq!(classify(-4), "neg");
        assert_eq!(classify(4), "small");
        assert_eq!(classify(12), "even");
    }

    #[test]
    fn falls_back_to_default() {
        assert_eq!(classify(13), "other");
        assert!(TABLE.matching_rule(|p| p(13)).is_none());
        assert_eq!(TABLE.default_label(), "other");
    }

    #[test]
    fn later_rules_are_not_evaluated() {
        let mut calls = 0;
        let label = TABLE.evaluate(|p| {
            calls += 1;
            p(-2)
        });
        assert_eq!(label, "neg");
        assert_eq!(calls, 1);
    }

    #[test]
    fn rule_order_is_auditable() {
        let names: Vec<_> = TABLE.rule_names().collect();
        assert_eq!(names, vec!["negative", "small", "even"]);
    }
}
