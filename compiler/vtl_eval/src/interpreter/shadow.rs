//! Scope guard for loop-variable shadowing.
//!
//! [`ShadowedInterpreter`] derefs to the [`Interpreter`] it borrows, so the
//! body of a loop renders through the guard. Every binding made with
//! [`bind`](ShadowedInterpreter::bind) is restored when the guard drops,
//! including when the body returns early with `?` or unwinds.

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::Value;

pub struct ShadowedInterpreter<'guard> {
    interpreter: &'guard mut Interpreter,
    mark: usize,
}

impl ShadowedInterpreter<'_> {
    /// Shadow `name` with `value` for the life of the guard.
    pub fn bind(&mut self, name: &str, value: Value) {
        let mark = self.mark;
        self.interpreter.context.shadow(mark, name, value);
    }
}

impl Drop for ShadowedInterpreter<'_> {
    fn drop(&mut self) {
        self.interpreter.context.restore(self.mark);
    }
}

impl Deref for ShadowedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ShadowedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Open a shadow scope that is restored when the guard drops.
    pub fn shadowed(&mut self) -> ShadowedInterpreter<'_> {
        let mark = self.context.shadow_mark();
        ShadowedInterpreter {
            interpreter: self,
            mark,
        }
    }
}
