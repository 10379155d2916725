use std::collections::HashSet;

use super::{grammar::Symbol, Grammar};

impl Grammar {
    /// Nonterminals that derive ε, as a least fixpoint over the rule sets.
    pub fn nullable(&self) -> HashSet<char> {
        let mut nullable: HashSet<char> = self
            .non_terminal_iter()
            .filter(|nt| nt.has_empty_production())
            .map(|nt| nt.name)
            .collect();

        let mut changed = true;
        while changed {
            changed = false;
            for nt in self.non_terminal_iter() {
                if nullable.contains(&nt.name) {
                    continue;
                }
                let is_nullable = nt
                    .productions
                    .iter()
                    .any(|production| is_nullable_production(production, &nullable));
                if is_nullable {
                    nullable.insert(nt.name);
                    changed = true;
                }
            }
        }
        nullable
    }
}

pub fn is_nullable_production(production: &[Symbol], nullable: &HashSet<char>) -> bool {
    production.iter().all(|s| match s {
        Symbol::Terminal(_) => false,
        Symbol::NonTerminal(name) => nullable.contains(name),
    })
}
