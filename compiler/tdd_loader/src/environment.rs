//! The evaluation environment that resolves calls with data loaders.

use tdd_eval::{
    CallSite, EvaluationEnvironment, Evaluator, Event, FrameId, HookError, Notification,
};
use tdd_ir::Value;
use thiserror::Error;

use crate::Engine;

/// Errors of the `get` function.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum LookupError {
    #[error("Function \"get\" needs at least 1 arguments. get(name, subName, subSubName, ...)")]
    NoArguments,

    #[error(
        "Parameters to function \"get\" must be strings, but parameter at position {position} \
         is a {type_name}."
    )]
    NotAString {
        position: usize,
        type_name: &'static str,
    },

    #[error("No variable with name \"{name}\" exists.")]
    NoSuchVariable { name: String },

    #[error(
        "No sub-variable with name \"{name}\" exists (referred by parameter at position \
         {position})."
    )]
    NoSuchSubVariable { name: String, position: usize },

    #[error(
        "Parameter at position {position} must be the name of a hash variable, but it is the \
         name of a {type_name} variable."
    )]
    NotAHash {
        position: usize,
        type_name: &'static str,
    },
}

/// Resolves calls through the engine's loader registry, and implements
/// `get(name, subName, ...)` against the hashes under construction and the
/// engine's data.
///
/// Only hashes that are not inside a sequence or a call's parameters are
/// visible to `get`. Inner hashes shadow outer ones.
pub struct DataLoaderEnvironment<'e> {
    engine: &'e dyn Engine,
    scopes: Vec<FrameId>,
    /// Depth of sequences and parameter lists being evaluated.
    suppressed: usize,
}

impl<'e> DataLoaderEnvironment<'e> {
    pub fn new(engine: &'e dyn Engine) -> Self {
        DataLoaderEnvironment {
            engine,
            scopes: Vec::new(),
            suppressed: 0,
        }
    }

    /// `get(name, subName, ...)`: walk down from a variable through nested hashes.
    fn get(&self, params: &[Value], ev: &Evaluator<'_>) -> Result<Value, LookupError> {
        let mut names = Vec::with_capacity(params.len());
        for (i, param) in params.iter().enumerate() {
            let Some(name) = param.as_str() else {
                return Err(LookupError::NotAString {
                    position: i + 1,
                    type_name: param.type_name(),
                });
            };
            names.push(name);
        }
        let Some((&first, rest)) = names.split_first() else {
            return Err(LookupError::NoArguments);
        };

        let mut current = self.lookup(first, ev).ok_or_else(|| LookupError::NoSuchVariable {
            name: first.to_owned(),
        })?;
        for (i, &name) in rest.iter().enumerate() {
            // Positions are 1-based and `rest` starts at the second parameter.
            let position = i + 2;
            let Value::Mapping(map) = current else {
                return Err(LookupError::NotAHash {
                    position: position - 1,
                    type_name: current.type_name(),
                });
            };
            current = map.get(name).ok_or_else(|| LookupError::NoSuchSubVariable {
                name: name.to_owned(),
                position,
            })?;
        }
        Ok(current.clone())
    }

    /// Innermost visible hash first, then the engine's data.
    fn lookup<'a>(&'a self, name: &str, ev: &'a Evaluator<'_>) -> Option<&'a Value> {
        self.scopes
            .iter()
            .rev()
            .filter_map(|&frame| ev.mapping(frame))
            .find_map(|map| map.get(name))
            .or_else(|| self.engine.get_data(name))
    }
}

impl EvaluationEnvironment for DataLoaderEnvironment<'_> {
    fn eval_function_call(
        &mut self,
        call: &CallSite<'_>,
        ev: &mut Evaluator<'_>,
    ) -> Result<Value, HookError> {
        let params = ev.eval_params(call, self)?;
        if call.name == "get" {
            return Ok(self.get(&params, ev)?);
        }
        let loader = self.engine.registry().resolve(call.name, self.engine)?;
        tracing::debug!(name = call.name, params = params.len(), "invoking data loader");
        Ok(loader.load(self.engine, &params)?)
    }

    fn notify(
        &mut self,
        event: Event<'_>,
        _ev: &mut Evaluator<'_>,
    ) -> Result<Notification, HookError> {
        match event {
            Event::EnterSequence { .. } | Event::EnterFunctionParams { .. } => self.suppressed += 1,
            Event::LeaveSequence { .. } | Event::LeaveFunctionParams { .. } => {
                self.suppressed = self.suppressed.saturating_sub(1);
            }
            Event::EnterHash { frame } if self.suppressed == 0 => self.scopes.push(frame),
            Event::LeaveHash { .. } if self.suppressed == 0 => {
                self.scopes.pop();
            }
            _ => {}
        }
        Ok(Notification::Continue)
    }
}
