//! Per-run variable storage shared by the steps of a chain.

use std::collections::HashMap;

use super::error::RunError;

/// Named string values available to templates during a single chain run.
///
/// The pool only grows: keys are never removed and never rebound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariablePool {
    vars: HashMap<String, String>,
}

impl VariablePool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Whether `name` is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Binds a new variable, refusing to rebind an existing name.
    pub fn insert_new(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), RunError> {
        let name = name.into();
        if self.vars.contains_key(&name) {
            return Err(RunError::OutputKeyCollision(name));
        }
        self.vars.insert(name, value.into());
        Ok(())
    }

    /// Number of bound variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether no variable is bound yet.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Consumes the pool, keeping only `keys`.
    pub(crate) fn project<'k>(
        mut self,
        keys: impl IntoIterator<Item = &'k str>,
    ) -> Result<HashMap<String, String>, RunError> {
        let mut out = HashMap::new();
        for key in keys {
            let value = self
                .vars
                .remove(key)
                .ok_or_else(|| RunError::UnknownOutputKey(key.to_string()))?;
            out.insert(key.to_string(), value);
        }
        Ok(out)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VariablePool {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
