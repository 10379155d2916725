use crowbook_text_processing::escape;
use serde::Serialize;

use super::{grammar::Symbol, EmptyString, Grammar, Normalized, UnitCycle, ARROW, EPSILON};

pub fn production_to_string(production: &[Symbol]) -> String {
    if production.is_empty() {
        EPSILON.to_string()
    } else {
        production.iter().map(|s| s.name()).collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutput {
    pub left: String,
    pub rights: Vec<String>,
}

impl ProductionOutput {
    pub fn to_plaintext(&self) -> String {
        format!("{} {} {}", self.left, ARROW, self.rights.join(" | "))
    }

    pub fn to_latex(&self) -> String {
        let right = self
            .rights
            .iter()
            .map(|right| {
                if right == EPSILON {
                    return "\\epsilon".to_string();
                }
                right
                    .chars()
                    .map(|c| escape::tex(c.to_string()).to_string())
                    .collect::<Vec<_>>()
                    .join(" \\ ")
            })
            .collect::<Vec<_>>()
            .join(" \\mid ");

        format!("{} & \\rightarrow & {}", escape::tex(self.left.as_str()), right)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutputVec {
    productions: Vec<ProductionOutput>,
}

impl ProductionOutputVec {
    pub fn to_plaintext(&self) -> String {
        self.productions
            .iter()
            .map(|p| p.to_plaintext())
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        std::iter::once("\\[\\begin{array}{cll}".to_string())
            .chain(self.productions.iter().map(|p| p.to_latex()))
            .chain(std::iter::once("\\end{array}\\]".to_string()))
            .collect::<Vec<String>>()
            .join("\\\\\n")
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl Grammar {
    /// One entry per nonterminal that still has rules, in grammar order.
    pub fn to_production_output_vec(&self) -> ProductionOutputVec {
        let productions = self
            .non_terminal_iter()
            .filter(|nt| !nt.productions.is_empty())
            .map(|nt| ProductionOutput {
                left: nt.name.to_string(),
                rights: nt
                    .productions
                    .iter()
                    .map(|p| production_to_string(p))
                    .collect(),
            })
            .collect();
        ProductionOutputVec { productions }
    }
}

#[derive(Serialize)]
struct NullableOutput {
    name: char,
    nullable: bool,
}

#[derive(Serialize)]
pub struct NullableOutputVec {
    data: Vec<NullableOutput>,
}

impl NullableOutputVec {
    pub fn to_plaintext(&self) -> String {
        self.data
            .iter()
            .map(|e| format!("{} | {}", e.name, e.nullable))
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn to_latex(&self) -> String {
        let content = self
            .data
            .iter()
            .map(|e| format!("{} & {}", e.name, e.nullable))
            .collect::<Vec<_>>()
            .join("\\\\\n ");

        "\\begin{tabular}{c|c}\n".to_string()
            + "Symbol & Nullable\\\\\\hline\n"
            + &content
            + "\\\\\n\\end{tabular}"
    }
}

impl Grammar {
    pub fn to_nullable_output_vec(&self) -> NullableOutputVec {
        let nullable = self.nullable();
        NullableOutputVec {
            data: self
                .non_terminal_iter()
                .map(|nt| NullableOutput {
                    name: nt.name,
                    nullable: nullable.contains(&nt.name),
                })
                .collect(),
        }
    }
}

#[derive(Serialize)]
pub struct NormalizedOutput<'a> {
    pub start: char,
    pub productions: ProductionOutputVec,
    pub empty_string: EmptyString,
    pub unit_cycles: &'a [UnitCycle],
}

impl Normalized {
    pub fn to_output(&self) -> NormalizedOutput<'_> {
        NormalizedOutput {
            start: self.grammar.start_symbol,
            productions: self.grammar.to_production_output_vec(),
            empty_string: self.empty_string,
            unit_cycles: &self.unit_cycles,
        }
    }

    pub fn to_plaintext(&self) -> String {
        self.grammar.to_production_output_vec().to_plaintext()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.to_output()).unwrap_or_default()
    }
}
