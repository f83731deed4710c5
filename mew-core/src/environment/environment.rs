use std::collections::HashMap;

use super::prelude::Value;

/// Variable table of one run. Names are case-sensitive, entries are never removed.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Environment {
    store: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.store.get(name).copied()
    }

    /// Inserts `name` or overwrites its value. There is no separate declaration.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();

        match self.store.get_mut(&name) {
            Some(var) => *var = value,
            None => {
                self.store.insert(name, value);
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.store.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Variables sorted by name.
    pub fn variables(&self) -> Vec<(&str, Value)> {
        let mut variables = self.store.iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect::<Vec<(&str, Value)>>();

        variables.sort_by(|a, b| a.0.cmp(b.0));

        variables
    }
}
