use std::collections::HashSet;

use super::{grammar::unit_target, Grammar, UnitCycle};

#[derive(Debug, Clone)]
pub struct UnitElimination {
    pub grammar: Grammar,
    pub cycles: Vec<UnitCycle>,
}

impl Grammar {
    /// Replaces every unit rule `N → M` by the non-unit rules reachable from `M`
    /// through unit chains.
    ///
    /// Each `(N, M)` pair is expanded at most once. A chain that returns to `N`
    /// is reported in [`UnitElimination::cycles`] instead of being followed.
    pub fn eliminate_unit_productions(&self) -> UnitElimination {
        let mut g = self.with_same_non_terminals();
        let mut cycles = Vec::new();

        for nt in self.non_terminal_iter() {
            let mut resolved: HashSet<char> = HashSet::new();
            resolved.insert(nt.name);
            self.expand_unit_chain(nt.name, nt.name, &mut resolved, &mut g, &mut cycles);
        }

        UnitElimination { grammar: g, cycles }
    }

    fn expand_unit_chain(
        &self,
        root: char,
        current: char,
        resolved: &mut HashSet<char>,
        out: &mut Grammar,
        cycles: &mut Vec<UnitCycle>,
    ) {
        for production in self.productions(current) {
            match unit_target(production) {
                Some(m) if m == root => {
                    let cycle = UnitCycle {
                        non_terminal: root,
                        via: current,
                    };
                    if !cycles.contains(&cycle) {
                        cycles.push(cycle);
                    }
                }
                Some(m) => {
                    if resolved.insert(m) {
                        self.expand_unit_chain(root, m, resolved, out, cycles);
                    }
                }
                None => {
                    out.add_production(root, production.clone());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::grammar::{Grammar, UnitCycle};

    fn plain(g: &Grammar) -> String {
        g.to_production_output_vec().to_plaintext()
    }

    #[test]
    fn chain_is_flattened_in_place() {
        let g = Grammar::parse("S → A | b\nA → B\nB → aB | c").unwrap();
        let u = g.eliminate_unit_productions();
        assert_eq!(
            plain(&u.grammar),
            "S → aB | c | b\nA → aB | c\nB → aB | c"
        );
        assert!(u.cycles.is_empty());
    }

    #[test]
    fn shared_targets_are_merged_once() {
        let g = Grammar::parse("S → A | B\nA → C | a\nB → C\nC → c").unwrap();
        let u = g.eliminate_unit_productions();
        assert_eq!(u.grammar.productions('S').len(), 2);
        assert!(u.cycles.is_empty());
    }

    #[test]
    fn cycle_is_detected_and_terminates() {
        let g = Grammar::parse("S → A | s\nA → B | a\nB → S | b").unwrap();
        let u = g.eliminate_unit_productions();
        for name in ['S', 'A', 'B'] {
            assert_eq!(u.grammar.productions(name).len(), 3, "{}", name);
        }
        assert_eq!(
            u.cycles,
            vec![
                UnitCycle { non_terminal: 'S', via: 'B' },
                UnitCycle { non_terminal: 'A', via: 'S' },
                UnitCycle { non_terminal: 'B', via: 'A' },
            ]
        );
        assert_eq!(
            u.cycles[0].to_string(),
            "unit cycle detected: S → … → B → S"
        );
    }

    #[test]
    fn self_loop() {
        let g = Grammar::parse("S → S | a").unwrap();
        let u = g.eliminate_unit_productions();
        assert_eq!(plain(&u.grammar), "S → a");
        assert_eq!(u.cycles[0].to_string(), "unit cycle detected: S → S");
    }
}
