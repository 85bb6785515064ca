use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrimitiveType {
    Int,
}

impl PrimitiveType {
    /// Map a type keyword from the source text to a primitive type.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "int" => Some(PrimitiveType::Int),
            _ => None,
        }
    }

    /// Number of bytes the runtime reserves for one slot of this type.
    pub fn size_in_bytes(&self) -> usize {
        match self {
            PrimitiveType::Int => 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variable {
    pub id: usize,
    pub primitive_type: PrimitiveType,
}

/// Flat name-to-variable registry for one compilation unit. Ids come from a
/// monotonically increasing counter and are never reused, even when a name
/// is redeclared; the old slot simply becomes unreachable.
#[derive(Debug, Default)]
pub struct SymbolTable {
    variables: HashMap<String, Variable>,
    next_variable_id: usize,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            variables: HashMap::new(),
            next_variable_id: 0,
        }
    }

    pub fn declare(&mut self, name: String, primitive_type: PrimitiveType) -> usize {
        let id = self.next_variable_id;
        self.next_variable_id += 1;

        self.variables.insert(name, Variable { id, primitive_type });
        id
    }

    pub fn lookup(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }
}
