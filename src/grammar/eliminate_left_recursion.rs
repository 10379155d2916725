use std::collections::HashMap;

use super::{
    grammar::{NameAllocator, NonTerminal, Rule, Symbol},
    Grammar, GrammarError,
};

/// How the fresh nonterminal of `N → β Z`, `Z → α Z` is allowed to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    /// `N → β Z`, `Z → α Z | ε`.
    Epsilon,
    /// `N → β | β Z`, `Z → α | α Z`, with no ε anywhere.
    Alternatives,
}

impl Grammar {
    /// Removes direct and indirect left recursion, escaping through `Z → ε`.
    ///
    /// Indirect recursion is only fully removed when the grammar has no ε or unit
    /// rules; [`Grammar::to_gnf`] takes care of that before calling in here.
    pub fn eliminate_left_recursion(
        &self,
        names: &mut NameAllocator,
    ) -> Result<Grammar, GrammarError> {
        self.remove_left_recursion(names, Escape::Epsilon)
    }

    pub fn remove_left_recursion(
        &self,
        names: &mut NameAllocator,
        escape: Escape,
    ) -> Result<Grammar, GrammarError> {
        let offset = self.non_terminals.len();
        let mut non_terminals = self.non_terminals.clone();
        let order: HashMap<char, usize> = non_terminals
            .iter()
            .enumerate()
            .map(|(i, nt)| (nt.name, i))
            .collect();

        let mut new_non_terminals: Vec<NonTerminal> = Vec::new();

        for i in 0..non_terminals.len() {
            let (replace, rest) = non_terminals.split_at_mut(i);
            let nt = &mut rest[0];

            // A_i → A_j γ with j < i: A_j is already done, so splice its rules in.
            for (j, earlier) in replace.iter().enumerate() {
                let old_productions = std::mem::take(&mut nt.productions);
                for production in old_productions {
                    let leading = production.first().and_then(|s| s.non_terminal());
                    if leading.and_then(|n| order.get(&n)) == Some(&j) {
                        for prefix in &earlier.productions {
                            nt.add_production(
                                prefix.iter().chain(production.iter().skip(1)).cloned().collect(),
                            );
                        }
                    } else {
                        nt.add_production(production);
                    }
                }
            }

            let mut recursive_productions: Vec<Rule> = Vec::new();
            let old_productions = std::mem::take(&mut nt.productions);
            for production in old_productions {
                if production.first() == Some(&Symbol::NonTerminal(nt.name)) {
                    // N → N contributes nothing
                    if production.len() > 1 {
                        recursive_productions.push(production[1..].to_vec());
                    }
                } else {
                    nt.productions.push(production);
                }
            }

            if recursive_productions.is_empty() {
                continue;
            }

            let nt_prime = names.fresh("left recursion removal")?;
            let mut prime = NonTerminal::new(offset + new_non_terminals.len(), nt_prime);
            let with_prime = |production: &Rule| -> Rule {
                production
                    .iter()
                    .cloned()
                    .chain(std::iter::once(Symbol::NonTerminal(nt_prime)))
                    .collect()
            };

            let betas = std::mem::take(&mut nt.productions);
            for beta in &betas {
                if escape == Escape::Alternatives {
                    nt.add_production(beta.clone());
                }
                nt.add_production(with_prime(beta));
            }
            for alpha in &recursive_productions {
                if escape == Escape::Alternatives {
                    prime.add_production(alpha.clone());
                }
                prime.add_production(with_prime(alpha));
            }
            if escape == Escape::Epsilon {
                prime.add_production(Vec::new());
            }
            new_non_terminals.push(prime);
        }

        let mut g = Grammar::new(self.start_symbol);
        for nt in non_terminals.into_iter().chain(new_non_terminals) {
            g.set_productions(nt.name, nt.productions);
        }
        Ok(g)
    }
}
