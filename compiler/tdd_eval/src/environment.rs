//! The evaluation environment protocol.

use tdd_ir::{Span, Value};
use tdd_parse::ExprId;

use crate::{Evaluator, FrameId};

/// Error returned by environment hooks.
///
/// An [`crate::EvalError`] returned from a hook (for example from a nested
/// [`Evaluator::eval_params`]) is passed through unchanged where the
/// evaluator would otherwise wrap it.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Structural events, always emitted in enter/leave pairs.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Event<'e> {
    /// A mapping is about to be filled. The in-progress mapping is
    /// reachable through [`Evaluator::mapping_mut`].
    EnterHash { frame: FrameId },
    LeaveHash { frame: FrameId },
    /// A sequence is about to be filled.
    EnterSequence { frame: FrameId },
    LeaveSequence { frame: FrameId },
    /// A `key` or `key: value` entry is about to be bound.
    EnterHashKey { key: &'e str },
    LeaveHashKey { key: &'e str },
    /// The parameters of the call `name` are about to be evaluated.
    EnterFunctionParams { name: &'e str },
    LeaveFunctionParams { name: &'e str },
}

impl Event<'_> {
    /// `true` for the `Enter*` half of a pair.
    pub fn is_enter(&self) -> bool {
        matches!(
            self,
            Event::EnterHash { .. }
                | Event::EnterSequence { .. }
                | Event::EnterHashKey { .. }
                | Event::EnterFunctionParams { .. }
        )
    }
}

/// Answer to an event.
///
/// Only [`Event::EnterHashKey`] and the `EnterHash` of a `{...}` literal
/// act on it; every other event ignores it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Notification {
    #[default]
    Continue,
    /// Omit the entry; its value is not evaluated.
    Skip,
    /// Bind the raw source of the value (or of the whole `{...}` literal)
    /// as a [`tdd_ir::Fragment`] instead of evaluating it.
    UseRawFragment,
}

/// A call met by the evaluator, with its parameters still unevaluated.
#[derive(Copy, Clone, Debug)]
pub struct CallSite<'p> {
    pub name: &'p str,
    pub args: &'p [ExprId],
    /// From the start of the name to the closing parenthesis.
    pub span: Span,
}

/// Policy for calls and structural events.
pub trait EvaluationEnvironment {
    /// Resolve a call. Returning [`Value::Call`] (see
    /// [`Evaluator::unresolved`]) leaves it unresolved.
    fn eval_function_call(
        &mut self,
        call: &CallSite<'_>,
        ev: &mut Evaluator<'_>,
    ) -> Result<Value, HookError>;

    /// Observe a structural event. Failing an `Enter*` event suppresses
    /// the matching `Leave*`.
    fn notify(&mut self, event: Event<'_>, ev: &mut Evaluator<'_>) -> Result<Notification, HookError>;
}

/// Leaves every call unresolved and ignores all events.
#[derive(Copy, Clone, Default, Debug)]
pub struct SimpleEnvironment;

impl EvaluationEnvironment for SimpleEnvironment {
    fn eval_function_call(
        &mut self,
        call: &CallSite<'_>,
        ev: &mut Evaluator<'_>,
    ) -> Result<Value, HookError> {
        Ok(ev.unresolved(call, self)?)
    }

    fn notify(&mut self, _event: Event<'_>, _ev: &mut Evaluator<'_>) -> Result<Notification, HookError> {
        Ok(Notification::Continue)
    }
}
