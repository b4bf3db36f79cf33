//! Tree-walking evaluator.

use std::sync::Arc;

use tdd_diagnostic::SourceLocation;
use tdd_ir::{FunctionCall, Mapping, Span, Value};
use tdd_parse::{CallExpr, ExprId, ExprKind, HashEntry, Parsed, ParsedKind};
use tdd_stack::ensure_sufficient_stack;

use crate::{CallSite, EvalError, EvaluationEnvironment, Event, Notification};

/// Handle to a container under construction.
///
/// Valid between the `Enter*` and `Leave*` events that carry it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct FrameId(usize);

#[derive(Debug)]
enum Frame {
    Hash(Mapping),
    Sequence(Vec<Value>),
}

/// How the notification for a container's `Enter*` event is used.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Root {
    /// A `{...}` literal; `UseRawFragment` turns it into a fragment.
    Literal,
    /// The body of a `.tdd` file; the notification is ignored.
    Body,
}

/// State of one evaluation pass.
///
/// Environments receive the evaluator in every hook. They can read the
/// current position, reach the containers being built, and evaluate call
/// parameters.
pub struct Evaluator<'p> {
    parsed: &'p Parsed,
    frames: Vec<Frame>,
    position: u32,
}

impl<'p> Evaluator<'p> {
    pub fn new(parsed: &'p Parsed) -> Self {
        Evaluator {
            parsed,
            frames: Vec::new(),
            position: parsed.expr(parsed.root()).span.start,
        }
    }

    /// Byte offset of the expression being evaluated.
    #[inline]
    pub fn position(&self) -> u32 {
        self.position
    }

    /// The whole source text.
    #[inline]
    pub fn text(&self) -> &Arc<str> {
        self.parsed.text()
    }

    #[inline]
    pub fn file_name(&self) -> Option<&str> {
        self.parsed.file_name().map(|name| &**name)
    }

    /// Location of `offset` in the evaluated text.
    pub fn location(&self, offset: u32) -> SourceLocation {
        self.parsed.location(offset)
    }

    /// The mapping being built in `frame`.
    pub fn mapping(&self, frame: FrameId) -> Option<&Mapping> {
        match self.frames.get(frame.0)? {
            Frame::Hash(map) => Some(map),
            Frame::Sequence(_) => None,
        }
    }

    pub fn mapping_mut(&mut self, frame: FrameId) -> Option<&mut Mapping> {
        match self.frames.get_mut(frame.0)? {
            Frame::Hash(map) => Some(map),
            Frame::Sequence(_) => None,
        }
    }

    /// The sequence being built in `frame`.
    pub fn sequence(&self, frame: FrameId) -> Option<&[Value]> {
        match self.frames.get(frame.0)? {
            Frame::Sequence(items) => Some(items),
            Frame::Hash(_) => None,
        }
    }

    pub fn sequence_mut(&mut self, frame: FrameId) -> Option<&mut Vec<Value>> {
        match self.frames.get_mut(frame.0)? {
            Frame::Sequence(items) => Some(items),
            Frame::Hash(_) => None,
        }
    }

    /// Evaluate the whole tree.
    pub fn run(&mut self, env: &mut dyn EvaluationEnvironment) -> Result<Value, EvalError> {
        let parsed = self.parsed;
        let root = parsed.root();
        let expr = parsed.expr(root);
        match (&expr.kind, parsed.kind()) {
            (ExprKind::Hash(entries), ParsedKind::HashBody) => {
                self.eval_hash(env, entries, expr.span, Root::Body)
            }
            (ExprKind::Sequence(items), ParsedKind::SequenceBody) => {
                self.eval_sequence(env, items, expr.span)
            }
            _ => self.expr(env, root),
        }
    }

    /// Evaluate the parameters of `call`, emitting the params events.
    pub fn eval_params(
        &mut self,
        call: &CallSite<'_>,
        env: &mut dyn EvaluationEnvironment,
    ) -> Result<Vec<Value>, EvalError> {
        let at = call.span.start;
        self.position = at;
        self.notify(env, Event::EnterFunctionParams { name: call.name }, at)?;

        let body = self.eval_list(env, call.args);
        self.leave(env, Event::LeaveFunctionParams { name: call.name }, body)
    }

    /// The call with evaluated parameters, left for a later pass.
    pub fn unresolved(
        &mut self,
        call: &CallSite<'_>,
        env: &mut dyn EvaluationEnvironment,
    ) -> Result<Value, EvalError> {
        let params = self.eval_params(call, env)?;
        Ok(Value::Call(FunctionCall::new(call.name, params)))
    }

    fn expr(&mut self, env: &mut dyn EvaluationEnvironment, id: ExprId) -> Result<Value, EvalError> {
        ensure_sufficient_stack(|| self.expr_inner(env, id))
    }

    fn expr_inner(
        &mut self,
        env: &mut dyn EvaluationEnvironment,
        id: ExprId,
    ) -> Result<Value, EvalError> {
        let parsed = self.parsed;
        let expr = parsed.expr(id);
        self.position = expr.span.start;
        match &expr.kind {
            ExprKind::Str(s) => Ok(Value::Str(s.clone())),
            ExprKind::Number(n) => Ok(Value::Number(*n)),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::Sequence(items) => self.eval_sequence(env, items, expr.span),
            ExprKind::Hash(entries) => self.eval_hash(env, entries, expr.span, Root::Literal),
            ExprKind::Call(call) => self.eval_call(env, call, expr.span),
        }
    }

    fn eval_list(
        &mut self,
        env: &mut dyn EvaluationEnvironment,
        items: &[ExprId],
    ) -> Result<Vec<Value>, EvalError> {
        let mut values = Vec::with_capacity(items.len());
        for &item in items {
            values.push(self.expr(env, item)?);
        }
        Ok(values)
    }

    fn eval_call(
        &mut self,
        env: &mut dyn EvaluationEnvironment,
        call: &CallExpr,
        span: Span,
    ) -> Result<Value, EvalError> {
        let site = CallSite {
            name: &call.name,
            args: &call.args,
            span,
        };
        tracing::trace!(name = %call.name, "call");
        // Errors of the parameters surface as they are.
        env.eval_function_call(&site, self)
            .map_err(|e| match e.downcast::<EvalError>() {
                Ok(nested) => *nested,
                Err(e) => EvalError::call_failed(&call.name, e, self.location(span.start)),
            })
    }

    fn eval_sequence(
        &mut self,
        env: &mut dyn EvaluationEnvironment,
        items: &[ExprId],
        span: Span,
    ) -> Result<Value, EvalError> {
        let frame = self.push(Frame::Sequence(Vec::with_capacity(items.len())));
        if let Err(err) = self.notify(env, Event::EnterSequence { frame }, span.start) {
            self.frames.pop();
            return Err(err);
        }

        let body = self.fill_sequence(env, frame, items);
        let left = self.leave(env, Event::LeaveSequence { frame }, body);
        let built = self.frames.pop();
        left?;
        match built {
            Some(Frame::Sequence(items)) => Ok(Value::Sequence(items)),
            _ => Ok(Value::Sequence(Vec::new())),
        }
    }

    /// Items are appended as they are evaluated, so the environment sees
    /// the sequence grow.
    fn fill_sequence(
        &mut self,
        env: &mut dyn EvaluationEnvironment,
        frame: FrameId,
        items: &[ExprId],
    ) -> Result<(), EvalError> {
        for &item in items {
            let value = self.expr(env, item)?;
            if let Some(items) = self.sequence_mut(frame) {
                items.push(value);
            }
        }
        Ok(())
    }

    fn eval_hash(
        &mut self,
        env: &mut dyn EvaluationEnvironment,
        entries: &[HashEntry],
        span: Span,
        root: Root,
    ) -> Result<Value, EvalError> {
        let frame = self.push(Frame::Hash(Mapping::new()));
        let notification = match self.notify(env, Event::EnterHash { frame }, span.start) {
            Ok(n) => n,
            Err(err) => {
                self.frames.pop();
                return Err(err);
            }
        };

        let body = if root == Root::Literal && notification == Notification::UseRawFragment {
            self.raw_fragment(span).map(Some)
        } else {
            self.fill_hash(env, frame, entries).map(|()| None)
        };
        let left = self.leave(env, Event::LeaveHash { frame }, body);
        let built = self.frames.pop();
        if let Some(fragment) = left? {
            return Ok(fragment);
        }
        match built {
            Some(Frame::Hash(map)) => Ok(Value::Mapping(map)),
            _ => Ok(Value::Mapping(Mapping::new())),
        }
    }

    fn fill_hash(
        &mut self,
        env: &mut dyn EvaluationEnvironment,
        frame: FrameId,
        entries: &[HashEntry],
    ) -> Result<(), EvalError> {
        for entry in entries {
            self.hash_entry(env, entry, frame)?;
        }
        Ok(())
    }

    fn hash_entry(
        &mut self,
        env: &mut dyn EvaluationEnvironment,
        entry: &HashEntry,
        frame: FrameId,
    ) -> Result<(), EvalError> {
        let parsed = self.parsed;
        let key_expr = parsed.expr(entry.key);
        let key_at = key_expr.span.start;
        let key_is_call = matches!(key_expr.kind, ExprKind::Call(_));
        let key = self.expr(env, entry.key)?;

        match (entry.value, key) {
            (Some(value), Value::Str(key)) => self.bind(env, frame, key, key_at, Some(value)),
            (Some(_), Value::Call(_)) if key_is_call => Err(self.function_not_allowed(key_at)),
            (Some(_), other) => Err(EvalError::semantic(
                format!(
                    "The key must be a String, but it is a(n) {}.",
                    other.type_name()
                ),
                self.location(key_at),
            )),
            (None, Value::Mapping(addition)) => {
                if let Some(map) = self.mapping_mut(frame) {
                    map.merge(addition);
                }
                Ok(())
            }
            (None, Value::Str(key)) if !key_is_call => self.bind(env, frame, key, key_at, None),
            (None, Value::Call(_)) if key_is_call => Err(self.function_not_allowed(key_at)),
            (None, other) if key_is_call => Err(EvalError::semantic(
                format!(
                    "Function doesn't evaluate to a Map, but to {}, so it can't be merged into the hash.",
                    other.type_name()
                ),
                self.location(key_at),
            )),
            (None, other) => Err(EvalError::semantic(
                format!(
                    "This expression should be either a string or a hash, but it is a(n) {}.",
                    other.type_name()
                ),
                self.location(key_at),
            )),
        }
    }

    /// Bind `key` in `frame`, asking the environment first. Without a value
    /// expression the key is a flag and binds `true`.
    fn bind(
        &mut self,
        env: &mut dyn EvaluationEnvironment,
        frame: FrameId,
        key: String,
        key_at: u32,
        value: Option<ExprId>,
    ) -> Result<(), EvalError> {
        let notification = self.notify(env, Event::EnterHashKey { key: &key }, key_at)?;
        let body = match (notification, value) {
            (Notification::Skip, _) => Ok(None),
            (_, None) => Ok(Some(Value::Bool(true))),
            (Notification::Continue, Some(value)) => self.expr(env, value).map(Some),
            (Notification::UseRawFragment, Some(value)) => {
                let span = self.parsed.expr(value).span;
                self.raw_fragment(span).map(Some)
            }
        };
        let bound = self.leave(env, Event::LeaveHashKey { key: &key }, body)?;
        if let (Some(value), Some(map)) = (bound, self.mapping_mut(frame)) {
            map.insert(key, value);
        }
        Ok(())
    }

    fn raw_fragment(&self, span: Span) -> Result<Value, EvalError> {
        self.parsed
            .fragment(span)
            .map(Value::Fragment)
            .map_err(|e| EvalError::semantic(e.to_string(), self.location(span.start)))
    }

    fn function_not_allowed(&self, at: u32) -> EvalError {
        EvalError::semantic(
            "You can't use the function here, because it can't be evaluated in this context.",
            self.location(at),
        )
    }

    fn push(&mut self, frame: Frame) -> FrameId {
        self.frames.push(frame);
        FrameId(self.frames.len() - 1)
    }

    /// Emit an `Enter*` event; failures are located at `at`.
    fn notify(
        &mut self,
        env: &mut dyn EvaluationEnvironment,
        event: Event<'_>,
        at: u32,
    ) -> Result<Notification, EvalError> {
        self.position = at;
        env.notify(event, self)
            .map_err(|e| EvalError::from_hook(e, self.location(at)))
    }

    /// Emit a `Leave*` event after `body` ran, whatever its outcome. A
    /// failing leave replaces the body's error.
    fn leave<T>(
        &mut self,
        env: &mut dyn EvaluationEnvironment,
        event: Event<'_>,
        body: Result<T, EvalError>,
    ) -> Result<T, EvalError> {
        let at = self.position;
        env.notify(event, self)
            .map_err(|e| EvalError::from_hook(e, self.location(at)))?;
        body
    }
}
