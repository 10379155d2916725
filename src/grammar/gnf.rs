use std::collections::HashSet;

use super::{
    eliminate_left_recursion::Escape,
    grammar::{NameAllocator, Rule, Symbol},
    EmptyPolicy, EmptyString, Grammar, GrammarError, Normalized,
};

impl Grammar {
    /// Converts to Greibach Normal Form: every rule starts with a terminal.
    ///
    /// GNF has no room for ε, so a nullable start symbol always loses it and the
    /// result reports [`EmptyString::Dropped`].
    pub fn to_gnf(&self, names: &mut NameAllocator) -> Result<Normalized, GrammarError> {
        let start_nullable = self.nullable().contains(&self.start_symbol);

        let g = self.eliminate_epsilon(EmptyPolicy::Drop);
        let units = g.eliminate_unit_productions();
        let g = units.grammar.eliminate_useless_symbols();
        let g = g.remove_left_recursion(names, Escape::Alternatives)?;
        let g = g.substitute_leading_non_terminals();

        Ok(Normalized {
            grammar: g,
            empty_string: EmptyString::resolve(start_nullable, EmptyPolicy::Drop),
            unit_cycles: units.cycles,
        })
    }

    /// Replaces a leading nonterminal by its rules once all of those are
    /// terminal-led. After left recursion removal the "leads with" relation is
    /// acyclic, so one pass per nonterminal is enough.
    fn substitute_leading_non_terminals(&self) -> Grammar {
        let mut g = self.clone();
        for _ in 0..=g.non_terminals.len() {
            let terminal_led: HashSet<char> = g
                .non_terminal_iter()
                .filter(|nt| nt.productions.iter().all(|p| starts_with_terminal(p)))
                .map(|nt| nt.name)
                .collect();
            if terminal_led.len() == g.non_terminals.len() {
                break;
            }

            let snapshot = g.clone();
            let mut changed = false;
            for nt in g.non_terminal_iter_mut() {
                if terminal_led.contains(&nt.name) {
                    continue;
                }
                let old_productions = std::mem::take(&mut nt.productions);
                for production in old_productions {
                    match production.first().and_then(|s| s.non_terminal()) {
                        Some(m) if terminal_led.contains(&m) => {
                            for prefix in snapshot.productions(m) {
                                let rule: Rule = prefix
                                    .iter()
                                    .chain(production.iter().skip(1))
                                    .cloned()
                                    .collect();
                                nt.add_production(rule);
                            }
                            changed = true;
                        }
                        _ => {
                            nt.add_production(production);
                        }
                    }
                }
            }
            if !changed {
                break;
            }
        }
        g
    }

    pub fn is_gnf(&self) -> bool {
        self.non_terminal_iter()
            .all(|nt| nt.productions.iter().all(|p| starts_with_terminal(p)))
    }
}

fn starts_with_terminal(production: &[Symbol]) -> bool {
    production.first().map_or(false, |s| s.is_terminal())
}
