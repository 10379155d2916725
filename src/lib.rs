extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

pub mod grammar;
pub use grammar::{EmptyPolicy, EmptyString, Grammar, GrammarError, NameAllocator, Normalized};

pub fn parse(text: &str) -> Result<Grammar, GrammarError> {
    Grammar::parse(text)
}

/// ε, unit and useless-symbol elimination, in that order.
pub fn simplify(text: &str, policy: EmptyPolicy) -> Result<Normalized, GrammarError> {
    Ok(parse(text)?.simplify(policy))
}

pub fn to_cnf(text: &str, policy: EmptyPolicy) -> Result<Normalized, GrammarError> {
    let g = parse(text)?;
    let mut names = NameAllocator::for_grammar(&g);
    g.to_cnf(policy, &mut names)
}

pub fn to_gnf(text: &str) -> Result<Normalized, GrammarError> {
    let g = parse(text)?;
    let mut names = NameAllocator::for_grammar(&g);
    g.to_gnf(&mut names)
}

impl Grammar {
    pub fn simplify(&self, policy: EmptyPolicy) -> Normalized {
        let start_nullable = self.nullable().contains(&self.start_symbol);
        let units = self.eliminate_epsilon(policy).eliminate_unit_productions();
        Normalized {
            grammar: units.grammar.eliminate_useless_symbols(),
            empty_string: EmptyString::resolve(start_nullable, policy),
            unit_cycles: units.cycles,
        }
    }
}

fn policy_of(keep_empty: bool) -> EmptyPolicy {
    if keep_empty {
        EmptyPolicy::KeepOnStart
    } else {
        EmptyPolicy::Drop
    }
}

fn error_json(e: GrammarError) -> String {
    serde_json::json!({ "error": e.to_string() }).to_string()
}

#[wasm_bindgen]
pub fn nullable_to_json(grammar: &str) -> String {
    match parse(grammar) {
        Ok(g) => g.to_nullable_output_vec().to_json(),
        Err(e) => error_json(e),
    }
}

#[wasm_bindgen]
pub fn simplify_to_json(grammar: &str, keep_empty: bool) -> String {
    match simplify(grammar, policy_of(keep_empty)) {
        Ok(n) => n.to_json(),
        Err(e) => error_json(e),
    }
}

#[wasm_bindgen]
pub fn cnf_to_json(grammar: &str, keep_empty: bool) -> String {
    match to_cnf(grammar, policy_of(keep_empty)) {
        Ok(n) => n.to_json(),
        Err(e) => error_json(e),
    }
}

#[wasm_bindgen]
pub fn gnf_to_json(grammar: &str) -> String {
    match to_gnf(grammar) {
        Ok(n) => n.to_json(),
        Err(e) => error_json(e),
    }
}

#[cfg(test)]
mod pipeline_tests {
    use super::*;

    #[test]
    fn simplify_scenario() {
        let n = simplify("S → aSb | ε", EmptyPolicy::Drop).unwrap();
        assert_eq!(n.to_plaintext(), "S → aSb | ab");
        assert_eq!(n.empty_string, EmptyString::Dropped);

        let n = simplify("S → aSb | ε", EmptyPolicy::KeepOnStart).unwrap();
        assert_eq!(n.to_plaintext(), "S → aSb | ab | ε");
        assert_eq!(n.empty_string, EmptyString::Kept);
    }

    #[test]
    fn simplify_composes_all_three_stages() {
        let n = simplify("S → A | aB\nA → b | C\nB → Bb\nC → ε\nD → d", EmptyPolicy::Drop)
            .unwrap();
        assert_eq!(n.to_plaintext(), "S → b");
        assert_eq!(n.empty_string, EmptyString::Dropped);
    }

    #[test]
    fn simplified_symbols_are_useful() {
        for text in [
            "S → AB | a\nA → aA | B\nB → b | ε\nC → c",
            "S → XY | Z\nX → x | ε\nY → Yy\nZ → z | X",
        ] {
            let n = simplify(text, EmptyPolicy::Drop).unwrap();
            let reachable = n.grammar.reachable();
            let generating = n.grammar.generating();
            for nt in n.grammar.non_terminal_iter() {
                assert!(reachable.contains(&nt.name), "{}", text);
                assert!(generating.contains(&nt.name), "{}", text);
            }
        }
    }

    #[test]
    fn cnf_scenario() {
        let n = to_cnf("S → AB\nA → a\nB → b", EmptyPolicy::Drop).unwrap();
        assert_eq!(n.to_plaintext(), "S → AB\nA → a\nB → b");
    }

    #[test]
    fn gnf_scenario() {
        let n = to_gnf("S → aSa | b").unwrap();
        assert_eq!(n.to_plaintext(), "S → aSa | b");
    }

    #[test]
    fn errors_abort_the_call() {
        assert!(matches!(
            to_cnf("S → a\nS → b", EmptyPolicy::Drop),
            Err(GrammarError::DuplicateNonTerminal { .. })
        ));
        assert!(matches!(
            to_gnf("S → aB"),
            Err(GrammarError::UndefinedSymbol { name: 'B', .. })
        ));
    }

    #[test]
    fn unit_cycles_are_reported_not_fatal() {
        let n = simplify("S → A | a\nA → S | b", EmptyPolicy::Drop).unwrap();
        assert_eq!(n.unit_cycles.len(), 2);
        assert_eq!(n.to_plaintext(), "S → b | a");
    }

    #[test]
    fn json_entry_points() {
        assert_eq!(
            simplify_to_json("S → aSb | ε", true),
            r#"{"start":"S","productions":{"productions":[{"left":"S","rights":["aSb","ab","ε"]}]},"empty_string":"kept","unit_cycles":[]}"#
        );
        assert_eq!(
            gnf_to_json("S → a\nS → b"),
            r#"{"error":"line 2: nonterminal `S` is already defined on line 1"}"#
        );
        assert_eq!(
            nullable_to_json("S → A\nA → ε"),
            r#"{"data":[{"name":"S","nullable":true},{"name":"A","nullable":true}]}"#
        );
    }
}
