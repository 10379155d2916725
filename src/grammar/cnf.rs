use std::collections::HashMap;

use super::{
    grammar::{NameAllocator, Rule, Symbol},
    EmptyPolicy, EmptyString, Grammar, GrammarError, Normalized,
};

impl Grammar {
    /// Converts to Chomsky Normal Form.
    ///
    /// ε, unit rules and useless symbols are removed first. Then every terminal
    /// inside a longer rule is replaced by a nonterminal dedicated to it (TERM)
    /// and every rule longer than two is split into a right-branching chain of
    /// fresh nonterminals (BIN).
    pub fn to_cnf(
        &self,
        policy: EmptyPolicy,
        names: &mut NameAllocator,
    ) -> Result<Normalized, GrammarError> {
        let start_nullable = self.nullable().contains(&self.start_symbol);
        let empty_string = EmptyString::resolve(start_nullable, policy);

        let mut g = self.clone();
        // `S0 → ε` must not sit on a symbol that also occurs in a body.
        if empty_string == EmptyString::Kept && g.is_referenced(g.start_symbol) {
            let new_start = names.fresh("the new start symbol")?;
            g = g.with_start(new_start);
        }

        let g = g.eliminate_epsilon(policy);
        let units = g.eliminate_unit_productions();
        let g = units.grammar.eliminate_useless_symbols();
        let g = g.separate_terminals(names)?;
        let g = g.binarize(names)?;

        Ok(Normalized {
            grammar: g,
            empty_string,
            unit_cycles: units.cycles,
        })
    }

    /// A copy whose start is `new_start → old start`, listed first.
    fn with_start(&self, new_start: char) -> Grammar {
        let mut g = Grammar::new(new_start);
        g.add_production(new_start, vec![Symbol::NonTerminal(self.start_symbol)]);
        for nt in self.non_terminal_iter() {
            g.set_productions(nt.name, nt.productions.iter().cloned());
        }
        g
    }

    /// TERM: terminals in rules of length two or more become nonterminals.
    fn separate_terminals(&self, names: &mut NameAllocator) -> Result<Grammar, GrammarError> {
        let mut g = self.with_same_non_terminals();
        let mut dedicated: HashMap<char, char> = HashMap::new();
        let mut introduced: Vec<(char, char)> = Vec::new();

        for nt in self.non_terminal_iter() {
            for production in &nt.productions {
                if production.len() < 2 {
                    g.add_production(nt.name, production.clone());
                    continue;
                }
                let mut replaced: Rule = Vec::with_capacity(production.len());
                for s in production {
                    match s {
                        Symbol::Terminal(t) => {
                            let name = match dedicated.get(t) {
                                Some(&name) => name,
                                None => {
                                    let name = names.fresh("a terminal substitution")?;
                                    dedicated.insert(*t, name);
                                    introduced.push((name, *t));
                                    name
                                }
                            };
                            replaced.push(Symbol::NonTerminal(name));
                        }
                        Symbol::NonTerminal(_) => replaced.push(*s),
                    }
                }
                g.add_production(nt.name, replaced);
            }
        }

        for (name, t) in introduced {
            g.add_production(name, vec![Symbol::Terminal(t)]);
        }
        Ok(g)
    }

    /// BIN: `N → X1 X2 … Xk` becomes `N → X1 F1`, `F1 → X2 F2`, …, `Fk-2 → Xk-1 Xk`.
    fn binarize(&self, names: &mut NameAllocator) -> Result<Grammar, GrammarError> {
        let mut g = self.with_same_non_terminals();
        let mut chains: Vec<(char, Rule)> = Vec::new();

        for nt in self.non_terminal_iter() {
            for production in &nt.productions {
                if production.len() <= 2 {
                    g.add_production(nt.name, production.clone());
                    continue;
                }
                let mut left = nt.name;
                let last = production.len() - 2;
                for (i, s) in production[..last].iter().enumerate() {
                    let next = names.fresh("binarization")?;
                    let rule = vec![*s, Symbol::NonTerminal(next)];
                    if i == 0 {
                        g.add_production(left, rule);
                    } else {
                        chains.push((left, rule));
                    }
                    left = next;
                }
                chains.push((left, production[last..].to_vec()));
            }
        }

        for (name, rule) in chains {
            g.add_production(name, rule);
        }
        Ok(g)
    }

    /// Every rule is one terminal or two nonterminals; only the start may
    /// have `→ ε`, and then the start occurs in no body.
    pub fn is_cnf(&self) -> bool {
        let start = self.start_symbol;
        self.non_terminal_iter().all(|nt| {
            nt.productions.iter().all(|p| match p.as_slice() {
                [] => nt.name == start && !self.is_referenced(start),
                [Symbol::Terminal(_)] => true,
                [Symbol::NonTerminal(_), Symbol::NonTerminal(_)] => true,
                _ => false,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::grammar::{EmptyPolicy, EmptyString, Grammar, GrammarError, NameAllocator};

    fn cnf(text: &str, policy: EmptyPolicy) -> crate::grammar::Normalized {
        let g = Grammar::parse(text).unwrap();
        let mut names = NameAllocator::for_grammar(&g);
        g.to_cnf(policy, &mut names).unwrap()
    }

    fn plain(g: &Grammar) -> String {
        g.to_production_output_vec().to_plaintext()
    }

    #[test]
    fn already_in_normal_form() {
        let n = cnf("S → AB\nA → a\nB → b", EmptyPolicy::Drop);
        assert_eq!(plain(&n.grammar), "S → AB\nA → a\nB → b");
        assert_eq!(n.empty_string, EmptyString::NotDerived);
    }

    #[test]
    fn terminals_and_long_rules() {
        let n = cnf("S → aSb | ε", EmptyPolicy::Drop);
        assert_eq!(n.empty_string, EmptyString::Dropped);
        // a ↦ A, b ↦ B, then S → A S B is split through C.
        assert_eq!(plain(&n.grammar), "S → AC | AB\nA → a\nB → b\nC → SB");
        assert!(n.grammar.is_cnf());
    }

    #[test]
    fn right_branching_cascade() {
        let n = cnf("S → ABCD\nA → a\nB → b\nC → c\nD → d", EmptyPolicy::Drop);
        assert_eq!(
            plain(&n.grammar),
            "S → AE\nA → a\nB → b\nC → c\nD → d\nE → BF\nF → CD"
        );
    }

    #[test]
    fn kept_empty_string_moves_to_fresh_start() {
        let n = cnf("S → aSb | ε", EmptyPolicy::KeepOnStart);
        assert_eq!(n.empty_string, EmptyString::Kept);
        assert_eq!(n.grammar.start_symbol, 'A');
        assert!(n.grammar.productions('A').contains(&vec![]));
        assert!(n.grammar.is_cnf());
    }

    #[test]
    fn kept_empty_string_without_recursion_stays_on_start() {
        let n = cnf("S → ab | ε", EmptyPolicy::KeepOnStart);
        assert_eq!(n.grammar.start_symbol, 'S');
        assert_eq!(plain(&n.grammar), "S → AB | ε\nA → a\nB → b");
        assert!(n.grammar.is_cnf());
    }

    #[test]
    fn postcondition_holds() {
        for text in [
            "E → E+T | T\nT → T*F | F\nF → (E) | i",
            "S → ASA | aB\nA → B | S\nB → b | ε",
            "S → AbA\nA → a | ε",
            "S → A | s\nA → B | a\nB → S | b",
            "S → aSa | bSb | a | b | ε",
        ] {
            for policy in [EmptyPolicy::Drop, EmptyPolicy::KeepOnStart] {
                let n = cnf(text, policy);
                assert!(n.grammar.is_cnf(), "{}:\n{}", text, plain(&n.grammar));
            }
        }
    }

    #[test]
    fn exhaustion() {
        let text = "S → abcdefghijklmnopqrstuvwxyz";
        let g = Grammar::parse(text).unwrap();
        let mut names = NameAllocator::for_grammar(&g);
        assert!(matches!(
            g.to_cnf(EmptyPolicy::Drop, &mut names),
            Err(GrammarError::FreshNameExhaustion { .. })
        ));
    }
}
