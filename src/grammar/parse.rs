use std::collections::HashMap;

use super::{grammar::Symbol, GrammarError, MalformedReason, ARROW, EPSILON};
use crate::Grammar;

impl Grammar {
    pub fn parse(grammar: &str) -> Result<Self, GrammarError> {
        let mut raw_productions: Vec<(usize, &str, char, &str)> = Vec::new();
        let mut defined_on: HashMap<char, usize> = HashMap::new();

        for (i, line) in grammar.lines().enumerate() {
            if line.chars().all(|c| c.is_whitespace()) {
                continue;
            }
            let malformed = |reason| GrammarError::MalformedLine {
                line: i + 1,
                text: line.to_string(),
                reason,
            };

            let parts: Vec<&str> = line.split(ARROW).collect();
            match parts.len() {
                1 => return Err(malformed(MalformedReason::MissingArrow)),
                2 => {}
                _ => return Err(malformed(MalformedReason::TooManyArrows)),
            }

            let mut left_chars = parts[0].trim().chars();
            let left = match (left_chars.next(), left_chars.next()) {
                (Some(c), None) if c.is_ascii_uppercase() => c,
                _ => return Err(malformed(MalformedReason::BadLeftSide)),
            };

            if let Some(&first) = defined_on.get(&left) {
                return Err(GrammarError::DuplicateNonTerminal {
                    name: left,
                    line: i + 1,
                    first,
                });
            }
            defined_on.insert(left, i + 1);

            raw_productions.push((i + 1, line, left, parts[1]));
        }

        let start_symbol = match raw_productions.first() {
            Some(&(_, _, left, _)) => left,
            None => return Err(GrammarError::EmptyGrammar),
        };

        let mut g = Self::new(start_symbol);
        for &(_, _, left, _) in &raw_productions {
            g.add_non_terminal(left);
        }

        for (line, text, left, rights) in raw_productions {
            for right in rights.split('|') {
                let production = parse_alternative(right.trim()).map_err(|reason| {
                    GrammarError::MalformedLine {
                        line,
                        text: text.to_string(),
                        reason,
                    }
                })?;
                if let Some(name) = production
                    .iter()
                    .filter_map(|s| s.non_terminal())
                    .find(|name| !g.contains(*name))
                {
                    return Err(GrammarError::UndefinedSymbol { name, line });
                }
                g.add_production(left, production);
            }
        }

        Ok(g)
    }
}

fn parse_alternative(right: &str) -> Result<Vec<Symbol>, MalformedReason> {
    if right.is_empty() {
        return Err(MalformedReason::EmptyAlternative);
    }
    if right == EPSILON {
        return Ok(Vec::new());
    }
    right
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            'A'..='Z' => Ok(Symbol::NonTerminal(c)),
            'ε' => Err(MalformedReason::BadSymbol(c)),
            c if c.is_ascii_graphic() => Ok(Symbol::Terminal(c)),
            c => Err(MalformedReason::BadSymbol(c)),
        })
        .collect()
}
