//! Stack growth for deeply nested TDD.
//!
//! TDD containers nest without limit (`[[[[...]]]]`), and both the parser and
//! the evaluator recurse once per nesting level. Every recursive step goes
//! through [`ensure_sufficient_stack`], which grows the stack on demand
//! instead of overflowing.
//!
//! On WASM targets the function is a plain call.

/// Grow the stack when less than this remains (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone is left.
///
/// ```text
/// fn parse_value(&mut self) -> Result<Expr, ParseError> {
///     ensure_sufficient_stack(|| {
///         // may call parse_value again for nested containers
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
