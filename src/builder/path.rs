//! Coordinates addressing nodes of a prefilter tree.
//!
//! The first coordinate is always the prefilter slot (vertical index); an
//! invalid slot is reported as `IndexOutOfRange`, any deeper invalid index
//! as `StalePath`.

use std::fmt;

/// Address of an OR clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrPath {
    pub vertical: usize,
    pub or_clause: usize,
}

/// Address of a constraint (AND clause).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstraintPath {
    pub vertical: usize,
    pub or_clause: usize,
    pub constraint: usize,
}

/// Address of a monomial (additive term).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonomialPath {
    pub vertical: usize,
    pub or_clause: usize,
    pub constraint: usize,
    pub monomial: usize,
}

/// Address of a term (multiplicative factor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TermPath {
    pub vertical: usize,
    pub or_clause: usize,
    pub constraint: usize,
    pub monomial: usize,
    pub term: usize,
}

impl OrPath {
    pub fn new(vertical: usize, or_clause: usize) -> Self {
        Self {
            vertical,
            or_clause,
        }
    }

    pub fn constraint(self, constraint: usize) -> ConstraintPath {
        ConstraintPath {
            vertical: self.vertical,
            or_clause: self.or_clause,
            constraint,
        }
    }
}

impl ConstraintPath {
    pub fn new(vertical: usize, or_clause: usize, constraint: usize) -> Self {
        Self {
            vertical,
            or_clause,
            constraint,
        }
    }

    pub fn or_path(self) -> OrPath {
        OrPath::new(self.vertical, self.or_clause)
    }

    pub fn monomial(self, monomial: usize) -> MonomialPath {
        MonomialPath {
            vertical: self.vertical,
            or_clause: self.or_clause,
            constraint: self.constraint,
            monomial,
        }
    }
}

impl MonomialPath {
    pub fn new(vertical: usize, or_clause: usize, constraint: usize, monomial: usize) -> Self {
        Self {
            vertical,
            or_clause,
            constraint,
            monomial,
        }
    }

    pub fn constraint_path(self) -> ConstraintPath {
        ConstraintPath::new(self.vertical, self.or_clause, self.constraint)
    }

    pub fn term(self, term: usize) -> TermPath {
        TermPath {
            vertical: self.vertical,
            or_clause: self.or_clause,
            constraint: self.constraint,
            monomial: self.monomial,
            term,
        }
    }
}

impl TermPath {
    pub fn new(
        vertical: usize,
        or_clause: usize,
        constraint: usize,
        monomial: usize,
        term: usize,
    ) -> Self {
        Self {
            vertical,
            or_clause,
            constraint,
            monomial,
            term,
        }
    }

    pub fn monomial_path(self) -> MonomialPath {
        MonomialPath::new(self.vertical, self.or_clause, self.constraint, self.monomial)
    }
}

impl fmt::Display for OrPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vertical[{}].or[{}]", self.vertical, self.or_clause)
    }
}

impl fmt::Display for ConstraintPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.and[{}]", self.or_path(), self.constraint)
    }
}

impl fmt::Display for MonomialPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.monomial[{}]", self.constraint_path(), self.monomial)
    }
}

impl fmt::Display for TermPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.term[{}]", self.monomial_path(), self.term)
    }
}
