//! Local data written as a TDD hash.

use tdd_eval::EvalError;
use tdd_ir::{Fragment, Mapping, Value};
use tdd_loader::{DataLoaderEnvironment, Engine};
use tdd_parse::ParseOptions;

use crate::{BuildError, BuildMapping};

/// Evaluates a fragment such as `{title: Home, items: csv(items.csv)}`
/// with a [`DataLoaderEnvironment`].
///
/// Wrap it in a [`crate::CachingLocalDataBuilder`] to evaluate once per
/// session.
#[derive(Clone, Debug)]
pub struct TddHashLocalDataBuilder {
    fragment: Fragment,
}

impl TddHashLocalDataBuilder {
    pub fn new(fragment: Fragment) -> Self {
        TddHashLocalDataBuilder { fragment }
    }

    pub fn fragment(&self) -> &Fragment {
        &self.fragment
    }
}

impl BuildMapping for TddHashLocalDataBuilder {
    #[tracing::instrument(level = "debug", skip_all, fields(file = self.fragment.file_name()))]
    fn build_mapping(&self, engine: &dyn Engine) -> Result<Option<Mapping>, BuildError> {
        let parsed = tdd_parse::parse_expression(&self.fragment, ParseOptions::default())
            .map_err(EvalError::from)?;
        match tdd_eval::eval(&parsed, &mut DataLoaderEnvironment::new(engine))? {
            Value::Mapping(map) => Ok(Some(map)),
            other => Err(BuildError::NotAMapping {
                type_name: other.type_name(),
            }),
        }
    }
}
