use std::collections::HashMap;

use super::value::Value;

/// Chain of lexical scope frames. The innermost frame is the struct itself;
/// each frame owns its enclosing frame, so the chain is finite and acyclic by
/// construction. The outermost frame (no enclosing link) holds the globals
/// that persist across interactive inputs.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<Box<Environment>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` in the current frame. Redefinition overwrites.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Read the closest binding, walking from the current frame outward.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self.values.get(name) {
            Some(value) => Some(value),
            None => self.enclosing.as_deref().and_then(|env| env.get(name)),
        }
    }

    /// Mutate the closest binding. Never creates one; returns false when the
    /// name is bound nowhere on the chain.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
            return true;
        }
        match self.enclosing.as_deref_mut() {
            Some(enclosing) => enclosing.assign(name, value),
            None => false,
        }
    }

    /// Enter a nested frame enclosing the current one.
    pub fn push(&mut self) {
        let enclosing = std::mem::take(self);
        self.enclosing = Some(Box::new(enclosing));
    }

    /// Leave the current frame, restoring its enclosing frame. Popping the
    /// outermost frame is a no-op; pushes and pops are balanced by the
    /// evaluator.
    pub fn pop(&mut self) {
        if let Some(enclosing) = self.enclosing.take() {
            *self = *enclosing;
        }
    }
}
