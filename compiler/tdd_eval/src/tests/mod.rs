//! Evaluator tests.


use tdd_ir::{Fragment, Mapping, Value};
use tdd_parse::{ParseOptions, Parsed};

use crate::{CallSite, EvaluationEnvironment, Evaluator, Event, FrameId, HookError, Notification};

fn source(text: &str) -> Fragment {
    Fragment::whole(text, Some("test.tdd".into())).unwrap()
}

pub(crate) fn hash_body(text: &str) -> Parsed {
    tdd_parse::parse_hash_body(&source(text), ParseOptions::default()).unwrap()
}

pub(crate) fn sequence_body(text: &str) -> Parsed {
    tdd_parse::parse_sequence_body(&source(text), ParseOptions::default()).unwrap()
}

pub(crate) fn expression(text: &str) -> Parsed {
    tdd_parse::parse_expression(&source(text), ParseOptions::default()).unwrap()
}

pub(crate) fn keys(map: &Mapping) -> Vec<&str> {
    map.keys().map(String::as_str).collect()
}

fn label(event: &Event<'_>) -> String {
    match event {
        Event::EnterHash { .. } => "enter hash".to_owned(),
        Event::LeaveHash { .. } => "leave hash".to_owned(),
        Event::EnterSequence { .. } => "enter sequence".to_owned(),
        Event::LeaveSequence { .. } => "leave sequence".to_owned(),
        Event::EnterHashKey { key } => format!("enter key {key}"),
        Event::LeaveHashKey { key } => format!("leave key {key}"),
        Event::EnterFunctionParams { name } => format!("enter params {name}"),
        Event::LeaveFunctionParams { name } => format!("leave params {name}"),
    }
}

/// Logs every event and answers from a small script.
///
/// Calls: `ok(...)` evaluates its params and returns `"resolved"`, `map()`
/// returns `{m: true}`, `bad()` fails, anything else stays unresolved.
#[derive(Default)]
pub(crate) struct Recorder {
    pub log: Vec<String>,
    pub skip: Vec<&'static str>,
    pub raw: Vec<&'static str>,
    pub raw_hashes: bool,
    pub fail_on: Option<&'static str>,
    pub seen_lengths: Vec<usize>,
    frames: Vec<FrameId>,
}

impl EvaluationEnvironment for Recorder {
    fn eval_function_call(
        &mut self,
        call: &CallSite<'_>,
        ev: &mut Evaluator<'_>,
    ) -> Result<Value, HookError> {
        match call.name {
            "ok" => {
                ev.eval_params(call, self)?;
                Ok(Value::from("resolved"))
            }
            "map" => Ok(Value::Mapping(Mapping::from_iter([("m", true)]))),
            "bad" => Err("boom".into()),
            _ => Ok(ev.unresolved(call, self)?),
        }
    }

    fn notify(&mut self, event: Event<'_>, ev: &mut Evaluator<'_>) -> Result<Notification, HookError> {
        let label = label(&event);
        self.log.push(label.clone());
        if self.fail_on.is_some_and(|f| f == label) {
            return Err("nope".into());
        }
        match event {
            Event::EnterHash { frame } => {
                self.frames.push(frame);
                if self.raw_hashes {
                    return Ok(Notification::UseRawFragment);
                }
            }
            Event::LeaveHash { .. } => {
                self.frames.pop();
            }
            Event::EnterHashKey { key } => {
                if let Some(map) = self.frames.last().and_then(|f| ev.mapping(*f)) {
                    self.seen_lengths.push(map.len());
                }
                if self.skip.iter().any(|k| *k == key) {
                    return Ok(Notification::Skip);
                }
                if self.raw.iter().any(|k| *k == key) {
                    return Ok(Notification::UseRawFragment);
                }
            }
            _ => {}
        }
        Ok(Notification::Continue)
    }
}
