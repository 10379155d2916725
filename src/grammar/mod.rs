pub mod cnf;
pub mod eliminate_left_recursion;
pub mod epsilon;
pub mod error;
pub mod gnf;
pub mod grammar;
pub mod nullable;
pub mod parse;
pub mod pretty_print;
pub mod unit;
pub mod useless;

pub use error::{GrammarError, MalformedReason, UnitCycle};
pub use grammar::{Grammar, NameAllocator, NonTerminal, Rule, Symbol};

pub const EPSILON: &str = "ε";
pub const ARROW: &str = "→";

/// What to do with the empty string when the start symbol is nullable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyPolicy {
    #[default]
    Drop,
    KeepOnStart,
}

/// Fate of the empty string after a normalization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyString {
    /// The source grammar never derived ε.
    NotDerived,
    /// ε was derived and survives as the single rule `Start → ε`.
    Kept,
    /// ε was derived and the output language no longer contains it.
    Dropped,
}

impl EmptyString {
    pub fn resolve(start_nullable: bool, policy: EmptyPolicy) -> Self {
        match (start_nullable, policy) {
            (false, _) => EmptyString::NotDerived,
            (true, EmptyPolicy::KeepOnStart) => EmptyString::Kept,
            (true, EmptyPolicy::Drop) => EmptyString::Dropped,
        }
    }
}

/// Result of a pipeline run: the grammar plus what the run had to report.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub grammar: Grammar,
    pub empty_string: EmptyString,
    pub unit_cycles: Vec<UnitCycle>,
}
