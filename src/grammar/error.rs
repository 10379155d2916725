use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("missing \"→\"")]
    MissingArrow,
    #[error("too many \"→\"")]
    TooManyArrows,
    #[error("left side must be a single uppercase letter")]
    BadLeftSide,
    #[error("empty alternative")]
    EmptyAlternative,
    #[error("unsupported character `{0}` in right side")]
    BadSymbol(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("line {line}: {reason}: `{text}`")]
    MalformedLine {
        line: usize,
        text: String,
        reason: MalformedReason,
    },
    #[error("line {line}: nonterminal `{name}` is used but never defined")]
    UndefinedSymbol { name: char, line: usize },
    #[error("line {line}: nonterminal `{name}` is already defined on line {first}")]
    DuplicateNonTerminal { name: char, line: usize, first: usize },
    #[error("no fresh nonterminal name left for {needed_for}")]
    FreshNameExhaustion { needed_for: &'static str },
    #[error("grammar has no productions")]
    EmptyGrammar,
}

/// A unit chain that leads back to where it started, e.g. `A → B → A`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct UnitCycle {
    pub non_terminal: char,
    /// Last nonterminal of the chain before it returns.
    pub via: char,
}

impl fmt::Display for UnitCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.non_terminal == self.via {
            write!(f, "unit cycle detected: {0} → {0}", self.non_terminal)
        } else {
            write!(
                f,
                "unit cycle detected: {0} → … → {1} → {0}",
                self.non_terminal, self.via
            )
        }
    }
}
