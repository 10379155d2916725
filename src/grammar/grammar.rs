use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;

use super::GrammarError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Terminal(char),
    NonTerminal(char),
}

impl Symbol {
    pub fn non_terminal(&self) -> Option<char> {
        match self {
            Symbol::NonTerminal(name) => Some(*name),
            Symbol::Terminal(_) => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn name(&self) -> char {
        match self {
            Symbol::NonTerminal(name) | Symbol::Terminal(name) => *name,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One right-hand side alternative. Empty means ε.
pub type Rule = Vec<Symbol>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonTerminal {
    pub index: usize,
    pub name: char,
    pub productions: Vec<Rule>,
}

impl NonTerminal {
    pub fn new(index: usize, name: char) -> Self {
        Self {
            index,
            name,
            productions: Vec::new(),
        }
    }

    /// Appends `rule` unless an identical alternative is already present.
    pub fn add_production(&mut self, rule: Rule) -> bool {
        if self.productions.contains(&rule) {
            false
        } else {
            self.productions.push(rule);
            true
        }
    }

    pub fn has_empty_production(&self) -> bool {
        self.productions.iter().any(|p| p.is_empty())
    }
}

/// The target `M` if `production` is the unit rule `→ M`.
pub fn unit_target(production: &[Symbol]) -> Option<char> {
    match production {
        [Symbol::NonTerminal(m)] => Some(*m),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    pub non_terminals: Vec<NonTerminal>,
    pub symbol_table: HashMap<char, usize>,
    pub start_symbol: char,
}

impl Grammar {
    pub fn new(start_symbol: char) -> Self {
        let mut g = Self {
            non_terminals: Vec::new(),
            symbol_table: HashMap::new(),
            start_symbol,
        };
        g.add_non_terminal(start_symbol);
        g
    }

    /// A grammar with the same nonterminals, in the same order, but no rules.
    pub fn with_same_non_terminals(&self) -> Self {
        let mut g = Self::new(self.start_symbol);
        for nt in self.non_terminal_iter() {
            g.add_non_terminal(nt.name);
        }
        g
    }

    pub fn non_terminal_iter(&self) -> impl Iterator<Item = &NonTerminal> {
        self.non_terminals.iter()
    }

    pub fn non_terminal_iter_mut(&mut self) -> impl Iterator<Item = &mut NonTerminal> {
        self.non_terminals.iter_mut()
    }

    pub fn names(&self) -> Vec<char> {
        self.non_terminals.iter().map(|nt| nt.name).collect()
    }

    pub fn get(&self, name: char) -> Option<&NonTerminal> {
        self.symbol_table.get(&name).map(|&idx| &self.non_terminals[idx])
    }

    pub fn contains(&self, name: char) -> bool {
        self.symbol_table.contains_key(&name)
    }

    pub fn productions(&self, name: char) -> &[Rule] {
        self.get(name)
            .map(|nt| nt.productions.as_slice())
            .unwrap_or(&[])
    }

    pub fn add_non_terminal(&mut self, name: char) -> usize {
        if let Some(&idx) = self.symbol_table.get(&name) {
            return idx;
        }
        let idx = self.non_terminals.len();
        self.non_terminals.push(NonTerminal::new(idx, name));
        self.symbol_table.insert(name, idx);
        idx
    }

    pub fn add_production(&mut self, left: char, right: Rule) -> bool {
        let idx = self.add_non_terminal(left);
        self.non_terminals[idx].add_production(right)
    }

    pub fn set_productions(&mut self, left: char, rights: impl IntoIterator<Item = Rule>) {
        let idx = self.add_non_terminal(left);
        self.non_terminals[idx].productions.clear();
        for right in rights {
            self.non_terminals[idx].add_production(right);
        }
    }

    /// Drops every nonterminal rejected by `keep`, except the start symbol.
    pub fn retain_non_terminals(&mut self, mut keep: impl FnMut(&NonTerminal) -> bool) {
        let start = self.start_symbol;
        let old = std::mem::take(&mut self.non_terminals);
        self.symbol_table.clear();
        for mut nt in old {
            if nt.name == start || keep(&nt) {
                nt.index = self.non_terminals.len();
                self.symbol_table.insert(nt.name, nt.index);
                self.non_terminals.push(nt);
            }
        }
    }

    pub fn production_count(&self) -> usize {
        self.non_terminals.iter().map(|nt| nt.productions.len()).sum()
    }

    /// Whether `name` occurs anywhere on a right-hand side.
    pub fn is_referenced(&self, name: char) -> bool {
        self.non_terminals
            .iter()
            .flat_map(|nt| nt.productions.iter().flatten())
            .any(|s| s.non_terminal() == Some(name))
    }

    /// Rules per nonterminal with ordering erased, for structural comparison.
    pub fn rule_sets(&self) -> BTreeMap<char, BTreeSet<Rule>> {
        self.non_terminals
            .iter()
            .map(|nt| (nt.name, nt.productions.iter().cloned().collect()))
            .collect()
    }
}

/// Hands out uppercase names the grammar it was built from does not use.
#[derive(Debug, Clone)]
pub struct NameAllocator {
    taken: HashSet<char>,
}

impl NameAllocator {
    pub fn for_grammar(g: &Grammar) -> Self {
        Self {
            taken: g.names().into_iter().collect(),
        }
    }

    pub fn fresh(&mut self, needed_for: &'static str) -> Result<char, GrammarError> {
        let name = ('A'..='Z')
            .find(|c| !self.taken.contains(c))
            .ok_or(GrammarError::FreshNameExhaustion { needed_for })?;
        self.taken.insert(name);
        Ok(name)
    }

    pub fn remaining(&self) -> usize {
        ('A'..='Z').filter(|c| !self.taken.contains(c)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_productions_collapse() {
        let mut g = Grammar::new('S');
        assert!(g.add_production('S', vec![Symbol::Terminal('a')]));
        assert!(!g.add_production('S', vec![Symbol::Terminal('a')]));
        assert_eq!(g.productions('S').len(), 1);
    }

    #[test]
    fn retain_keeps_start_and_reindexes() {
        let mut g = Grammar::new('S');
        g.add_production('A', vec![Symbol::Terminal('a')]);
        g.add_production('B', vec![Symbol::Terminal('b')]);
        g.retain_non_terminals(|nt| nt.name != 'A');
        assert_eq!(g.names(), vec!['S', 'B']);
        assert_eq!(g.get('B').unwrap().index, 1);
        assert!(!g.contains('A'));
    }

    #[test]
    fn allocator_skips_used_names() {
        let mut g = Grammar::new('A');
        g.add_non_terminal('C');
        let mut names = NameAllocator::for_grammar(&g);
        assert_eq!(names.fresh("test"), Ok('B'));
        assert_eq!(names.fresh("test"), Ok('D'));
        assert_eq!(names.remaining(), 22);
    }

    #[test]
    fn allocator_exhaustion_is_an_error() {
        let mut g = Grammar::new('A');
        for c in 'B'..='Y' {
            g.add_non_terminal(c);
        }
        let mut names = NameAllocator::for_grammar(&g);
        assert_eq!(names.fresh("test"), Ok('Z'));
        assert_eq!(
            names.fresh("test"),
            Err(GrammarError::FreshNameExhaustion { needed_for: "test" })
        );
    }
}
