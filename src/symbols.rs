//! Symbol table for Mini-PL parsing.
//!
//! The parser uses the symbol table to catch redeclarations and uses of
//! undeclared variables while it builds the tree. It records names only:
//! types and values are resolved later by the interpreter, which keeps its
//! own variable store.
//!
//! # Scope Rules
//!
//! Mini-PL has a single flat namespace. A `for` loop does not open a scope;
//! its variable is an ordinary program variable declared before the loop.

use std::collections::HashMap;

use crate::ast::Span;

/// Set of declared identifiers for one compilation unit.
#[derive(Debug, Default)]
pub struct SymbolTable {
    /// Declared names and the location of their declaration.
    declared: HashMap<String, Span>,
}

impl SymbolTable {
    /// Creates an empty symbol table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `name`. Returns false if it was already declared, in which
    /// case the original declaration is kept.
    pub fn declare(&mut self, name: &str, span: Span) -> bool {
        if self.declared.contains_key(name) {
            return false;
        }
        self.declared.insert(name.to_string(), span);
        true
    }

    /// Returns true if `name` has been declared.
    pub fn exists(&self, name: &str) -> bool {
        self.declared.contains_key(name)
    }

    /// Location of the declaration of `name`, if declared.
    pub fn declaration(&self, name: &str) -> Option<Span> {
        self.declared.get(name).copied()
    }

    /// Forgets every declaration.
    pub fn reset(&mut self) {
        self.declared.clear();
    }

    /// Number of declared names.
    pub fn len(&self) -> usize {
        self.declared.len()
    }

    /// Returns true if nothing is declared.
    pub fn is_empty(&self) -> bool {
        self.declared.is_empty()
    }
}
