//! Runtime variable scopes.
//!
//! An [`Environment`] is a cheap handle onto a shared frame; clones alias the
//! same frame, which is how closures keep their defining scope alive after the
//! block that created it has finished.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::debug;

use crate::error::RuntimeError;
use crate::token::Token;
use crate::value::Value;

/// Three‑state slot: a name missing from the map is *absent*.
#[derive(Debug, Clone)]
enum Slot {
    /// Declared with `var x;` and not yet assigned.
    Unassigned,
    Assigned(Value),
}

#[derive(Debug, Default)]
struct Frame {
    values: HashMap<String, Slot>,
    enclosing: Option<Environment>,
}

#[derive(Debug, Clone, Default)]
pub struct Environment {
    frame: Rc<RefCell<Frame>>,
}

impl Environment {
    /// A fresh top‑level (global) scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// A new scope nested inside `self`.
    pub fn child(&self) -> Self {
        Environment {
            frame: Rc::new(RefCell::new(Frame {
                values: HashMap::new(),
                enclosing: Some(self.clone()),
            })),
        }
    }

    pub fn enclosing(&self) -> Option<Environment> {
        self.frame.borrow().enclosing.clone()
    }

    /// Declare `name` in this scope, unassigned when `value` is `None`.
    /// Declaring a name twice in one scope is an error.
    pub fn define(&self, name: &Token, value: Option<Value>) -> Result<(), RuntimeError> {
        let mut frame = self.frame.borrow_mut();

        if frame.values.contains_key(&name.lexeme) {
            return Err(RuntimeError::new(
                name,
                format!("Variable {} already defined", name.lexeme),
            ));
        }

        debug!("Defining '{}'", name.lexeme);

        let slot = match value {
            Some(value) => Slot::Assigned(value),
            None => Slot::Unassigned,
        };
        frame.values.insert(name.lexeme.clone(), slot);

        Ok(())
    }

    /// Bind a name the program never declared itself (`this`, `super`,
    /// natives), replacing any previous binding.
    pub fn bind(&self, name: &str, value: Value) {
        self.frame
            .borrow_mut()
            .values
            .insert(name.to_string(), Slot::Assigned(value));
    }

    /// Look `name` up here, then outward.
    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        let mut env = self.clone();

        loop {
            let next = {
                let frame = env.frame.borrow();

                if let Some(slot) = frame.values.get(&name.lexeme) {
                    return read_slot(slot, name);
                }

                frame.enclosing.clone()
            };

            match next {
                Some(enclosing) => env = enclosing,
                None => return Err(undefined(name)),
            }
        }
    }

    /// Overwrite the nearest binding of `name`.
    pub fn assign(&self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        let mut env = self.clone();

        loop {
            let next = {
                let mut frame = env.frame.borrow_mut();

                if let Some(slot) = frame.values.get_mut(&name.lexeme) {
                    *slot = Slot::Assigned(value);
                    return Ok(());
                }

                frame.enclosing.clone()
            };

            match next {
                Some(enclosing) => env = enclosing,
                None => return Err(undefined(name)),
            }
        }
    }

    /// Read `name` from exactly `distance` scopes out.
    pub fn get_at(&self, distance: usize, name: &Token) -> Result<Value, RuntimeError> {
        let env = self.ancestor(distance).ok_or_else(|| undefined(name))?;
        let frame = env.frame.borrow();

        let value = match frame.values.get(&name.lexeme) {
            Some(slot) => read_slot(slot, name),
            None => Err(undefined(name)),
        };
        value
    }

    /// Write `name` exactly `distance` scopes out.
    pub fn assign_at(
        &self,
        distance: usize,
        name: &Token,
        value: Value,
    ) -> Result<(), RuntimeError> {
        let env = self.ancestor(distance).ok_or_else(|| undefined(name))?;
        let mut frame = env.frame.borrow_mut();

        let assigned = match frame.values.get_mut(&name.lexeme) {
            Some(slot) => {
                *slot = Slot::Assigned(value);
                Ok(())
            }
            None => Err(undefined(name)),
        };
        assigned
    }

    /// The scope `distance` hops out; `ancestor(0)` is `self`.
    pub fn ancestor(&self, distance: usize) -> Option<Environment> {
        let mut env = self.clone();
        for _ in 0..distance {
            env = env.enclosing()?;
        }
        Some(env)
    }
}

fn read_slot(slot: &Slot, name: &Token) -> Result<Value, RuntimeError> {
    match slot {
        Slot::Assigned(value) => Ok(value.clone()),
        Slot::Unassigned => Err(RuntimeError::new(
            name,
            format!("Unassigned variable {}", name.lexeme),
        )),
    }
}

fn undefined(name: &Token) -> RuntimeError {
    RuntimeError::new(name, format!("Undefined variable {}", name.lexeme))
}
