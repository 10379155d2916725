use std::collections::HashSet;

use super::{grammar::Symbol, Grammar};

impl Grammar {
    /// Nonterminals that derive at least one terminal string.
    pub fn generating(&self) -> HashSet<char> {
        let mut generating: HashSet<char> = HashSet::new();
        let mut changed = true;
        while changed {
            changed = false;
            for nt in self.non_terminal_iter() {
                if generating.contains(&nt.name) {
                    continue;
                }
                let is_generating = nt.productions.iter().any(|production| {
                    production.iter().all(|s| match s {
                        Symbol::Terminal(_) => true,
                        Symbol::NonTerminal(name) => generating.contains(name),
                    })
                });
                if is_generating {
                    generating.insert(nt.name);
                    changed = true;
                }
            }
        }
        generating
    }

    /// Nonterminals reachable from the start symbol.
    pub fn reachable(&self) -> HashSet<char> {
        let mut reachable: HashSet<char> = HashSet::new();
        let mut stack = vec![self.start_symbol];
        while let Some(name) = stack.pop() {
            if !reachable.insert(name) {
                continue;
            }
            for production in self.productions(name) {
                stack.extend(
                    production
                        .iter()
                        .filter_map(|s| s.non_terminal())
                        .filter(|n| !reachable.contains(n)),
                );
            }
        }
        reachable
    }

    /// Removes non-generating and unreachable nonterminals until neither pass
    /// finds anything more to remove. The start symbol always stays, with no
    /// rules at all if the language is empty.
    pub fn eliminate_useless_symbols(&self) -> Grammar {
        let mut g = self.clone();
        loop {
            let size = (g.non_terminals.len(), g.production_count());

            let generating = g.generating();
            for nt in g.non_terminal_iter_mut() {
                nt.productions.retain(|production| {
                    production
                        .iter()
                        .filter_map(|s| s.non_terminal())
                        .all(|n| generating.contains(&n))
                });
            }
            g.retain_non_terminals(|nt| generating.contains(&nt.name));

            let reachable = g.reachable();
            g.retain_non_terminals(|nt| reachable.contains(&nt.name));

            if size == (g.non_terminals.len(), g.production_count()) {
                break;
            }
        }
        g
    }
}
