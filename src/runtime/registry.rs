//! Command registry.
//!
//! Maps every callable key, full names and one-letter aliases alike, to an [`Action`].
//! Builtin keys and grammar keywords are *reserved*: macros can never shadow them.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::{
    atoms::BuiltinFn,
    errors::{Result, TurtilleError},
    syntax::KEYWORDS,
};

#[derive(Clone)]
pub enum Action {
    Builtin(BuiltinFn),
    /// Resolved against the macro table at call time, so redefinitions reach every caller.
    Macro(String),
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Builtin(_) => f.write_str("Builtin"),
            Action::Macro(name) => write!(f, "Macro({name})"),
        }
    }
}

#[derive(Debug)]
pub struct Registry {
    entries: HashMap<String, Action>,
    reserved: HashSet<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            reserved: KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Registers a builtin under `name` and, if still free, under its first character.
    ///
    /// Only a duplicate full name is an error; a taken alias is skipped so the
    /// earlier registration keeps it.
    pub fn register(&mut self, name: &str, builtin: BuiltinFn) -> Result<()> {
        if self.entries.contains_key(name) {
            return Err(TurtilleError::Collision {
                name: name.to_string(),
            });
        }
        debug!("adding command: {name}");
        self.entries
            .insert(name.to_string(), Action::Builtin(builtin));
        self.reserved.insert(name.to_string());

        if let Some(first) = name.chars().next() {
            let alias = first.to_string();
            if !self.entries.contains_key(&alias) {
                debug!("adding shortcut: {alias}");
                self.entries.insert(alias.clone(), Action::Builtin(builtin));
                self.reserved.insert(alias);
            }
        }
        Ok(())
    }

    /// Points `name` at the macro of the same name.
    pub fn install_macro(&mut self, name: &str) -> Result<()> {
        if self.is_reserved(name) {
            return Err(TurtilleError::ReservedName {
                name: name.to_string(),
            });
        }
        self.entries
            .insert(name.to_string(), Action::Macro(name.to_string()));
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Action> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_reserved(&self, key: &str) -> bool {
        self.reserved.contains(key)
    }

    pub fn is_builtin(&self, key: &str) -> bool {
        matches!(self.entries.get(key), Some(Action::Builtin(_)))
    }

    /// Every callable key, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }
}
