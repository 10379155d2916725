use std::collections::HashSet;

use super::{
    grammar::{Rule, Symbol},
    EmptyPolicy, Grammar,
};

impl Grammar {
    /// Rewrites every rule so that no alternative is empty.
    ///
    /// With [`EmptyPolicy::KeepOnStart`] a nullable start symbol keeps the single
    /// rule `Start → ε`. Nonterminals left without any rule (those that only ever
    /// derived ε) are removed together with the rules mentioning them.
    pub fn eliminate_epsilon(&self, policy: EmptyPolicy) -> Grammar {
        let nullable = self.nullable();

        let mut g = self.with_same_non_terminals();
        for nt in self.non_terminal_iter() {
            for production in &nt.productions {
                for variant in deletion_variants(production, &nullable) {
                    g.add_production(nt.name, variant);
                }
            }
        }

        let mut pruned: HashSet<char> = HashSet::new();
        loop {
            let emptied: HashSet<char> = g
                .non_terminal_iter()
                .filter(|nt| nt.productions.is_empty() && !pruned.contains(&nt.name))
                .map(|nt| nt.name)
                .collect();
            if emptied.is_empty() {
                break;
            }
            for nt in g.non_terminal_iter_mut() {
                nt.productions.retain(|production| {
                    !production
                        .iter()
                        .any(|s| s.non_terminal().map_or(false, |n| emptied.contains(&n)))
                });
            }
            g.retain_non_terminals(|nt| !emptied.contains(&nt.name));
            pruned.extend(emptied);
        }

        let start = g.start_symbol;
        if policy == EmptyPolicy::KeepOnStart && nullable.contains(&start) {
            g.add_production(start, Vec::new());
        }
        g
    }
}

/// Every way of keeping or dropping each nullable occurrence, minus the empty one.
fn deletion_variants(production: &[Symbol], nullable: &HashSet<char>) -> Vec<Rule> {
    production
        .iter()
        .fold(vec![Vec::new()], |prefixes: Vec<Rule>, &s| {
            let droppable = s.non_terminal().map_or(false, |n| nullable.contains(&n));
            prefixes
                .into_iter()
                .flat_map(|prefix| {
                    let mut kept = prefix.clone();
                    kept.push(s);
                    if droppable {
                        vec![kept, prefix]
                    } else {
                        vec![kept]
                    }
                })
                .collect()
        })
        .into_iter()
        .filter(|variant| !variant.is_empty())
        .collect()
}
