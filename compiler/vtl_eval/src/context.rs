//! Variable bindings for one render.
//!
//! Bindings live in a single flat map. Loop variables are *shadowed* rather
//! than scoped: entering a loop iteration records the binding being replaced
//! on an undo stack, and leaving it pops that stack back to a mark, restoring
//! the old value or removing the name if it was undefined before.
//!
//! `#set` writes straight into the map and is never undone, except that a
//! `#set` of a name that is currently shadowed is lost when the shadow is
//! restored.

use rustc_hash::FxHashMap;

use crate::Value;

/// A binding replaced by a shadow, to be put back on restore.
#[derive(Clone, Debug)]
struct SavedBinding {
    name: String,
    previous: Option<Value>,
}

/// The mutable variable environment of one template evaluation.
#[derive(Clone, Debug, Default)]
pub struct EvaluationContext {
    variables: FxHashMap<String, Value>,
    saved: Vec<SavedBinding>,
}

impl EvaluationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context seeded with caller-supplied bindings.
    pub fn with_variables<K, V>(variables: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        EvaluationContext {
            variables: variables
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
            saved: Vec::new(),
        }
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Bind `name` permanently (`#set`).
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.variables.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Start a shadow scope. Pass the mark to [`shadow`](Self::shadow) and
    /// [`restore`](Self::restore).
    pub(crate) fn shadow_mark(&self) -> usize {
        self.saved.len()
    }

    /// Bind `name` to `value` until `restore(mark)`.
    ///
    /// Only the first shadow of a name since `mark` saves the previous
    /// binding, so rebinding the loop variable on every iteration still
    /// restores the value from before the loop.
    pub(crate) fn shadow(&mut self, mark: usize, name: &str, value: Value) {
        let already_saved = self.saved[mark..].iter().any(|saved| saved.name == name);
        let previous = self.variables.insert(name.to_owned(), value);
        if !already_saved {
            self.saved.push(SavedBinding {
                name: name.to_owned(),
                previous,
            });
        }
    }

    /// Undo every shadow recorded since `mark`, newest first.
    pub(crate) fn restore(&mut self, mark: usize) {
        while self.saved.len() > mark {
            let Some(SavedBinding { name, previous }) = self.saved.pop() else {
                break;
            };
            match previous {
                Some(value) => {
                    self.variables.insert(name, value);
                }
                None => {
                    self.variables.remove(&name);
                }
            }
        }
    }
}
