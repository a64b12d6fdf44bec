use super::tokens::{Connective, Direction, Protocol, Type};

use serde::{Deserialize, Serialize};

use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Filter {
    expression: Expression,
}

impl Filter {
    pub(super) fn new(expression: Expression) -> Filter {
        Filter { expression }
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn qualifiers(&self) -> HashMap<&'static str, Vec<String>> {
        self.expression.qualifiers()
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Expression {
    terms: Vec<Term>,
}

impl Expression {
    pub(super) fn new(terms: Vec<Term>) -> Expression {
        Expression { terms }
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Maps every canonical qualifier keyword used in the expression to the
    /// ids of the primitives carrying that qualifier. Terms are walked in
    /// expression order and a primitive contributes its id once per qualifier,
    /// so one id may appear under several keys and ids may repeat.
    pub fn qualifiers(&self) -> HashMap<&'static str, Vec<String>> {
        let mut map: HashMap<&'static str, Vec<String>> = HashMap::new();

        for term in self.terms.iter() {
            for qualifier in term.primitive().qualifiers().iter() {
                if let Some(key) = qualifier.canonical_str() {
                    map.entry(key)
                        .or_insert_with(Vec::new)
                        .push(term.primitive().id().to_string());
                }
            }
        }

        map
    }
}

/// One primitive of the expression plus the connective joining it to the
/// next term, absent on the last term.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Term {
    primitive: Primitive,
    connective: Option<Connective>,
}

impl Term {
    pub(super) fn new(primitive: Primitive, connective: Option<Connective>) -> Term {
        Term {
            primitive,
            connective,
        }
    }

    pub fn primitive(&self) -> &Primitive {
        &self.primitive
    }

    pub fn connective(&self) -> Option<&Connective> {
        self.connective.as_ref()
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Primitive {
    qualifiers: Vec<Qualifier>,
    id: String,
}

impl Primitive {
    pub(super) fn new(qualifiers: Vec<Qualifier>, id: String) -> Primitive {
        Primitive { qualifiers, id }
    }

    pub fn qualifiers(&self) -> &[Qualifier] {
        &self.qualifiers
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Qualifier {
    Type(Type),
    Dir(Direction),
    Proto(Protocol),
}

impl Qualifier {
    /// Lowercase keyword form used as the aggregation key. `ether` has no
    /// canonical form and yields `None`.
    pub fn canonical_str(&self) -> Option<&'static str> {
        match self {
            Qualifier::Type(Type::Host) => Some("host"),
            Qualifier::Type(Type::Net) => Some("net"),
            Qualifier::Type(Type::Port) => Some("port"),

            Qualifier::Dir(Direction::Src) => Some("src"),
            Qualifier::Dir(Direction::Dst) => Some("dst"),

            Qualifier::Proto(Protocol::Tcp) => Some("tcp"),
            Qualifier::Proto(Protocol::Udp) => Some("udp"),
            Qualifier::Proto(Protocol::Ether) => None,
        }
    }

    /// Partial equality over qualifier classes: two qualifiers differ only
    /// when both populate the same class with different values. Qualifiers
    /// of different classes never contradict each other, so a type-only
    /// qualifier matches a direction-only one. Use `==` for structural
    /// equality instead.
    pub fn matches(&self, other: &Qualifier) -> bool {
        match (self, other) {
            (Qualifier::Type(a), Qualifier::Type(b)) => a == b,
            (Qualifier::Dir(a), Qualifier::Dir(b)) => a == b,
            (Qualifier::Proto(a), Qualifier::Proto(b)) => a == b,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests;
