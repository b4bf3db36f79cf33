//! `tdd` and `tddSequence`: TDD files evaluated with the calling
//! environment's loaders.

use tdd_ir::Value;
use tdd_parse::ParseOptions;

use super::file::DataFile;
use super::options::{check_arg_count, string_arg};
use crate::{load_tdd, DataLoader, DataLoaderEnvironment, Engine, LoaderError};

/// `tdd(path[, encoding])`: the file as a hash body.
#[derive(Copy, Clone, Default, Debug)]
pub struct TddLoader;

impl DataLoader for TddLoader {
    fn load(&self, engine: &dyn Engine, args: &[Value]) -> Result<Value, LoaderError> {
        check_arg_count(
            args,
            1,
            2,
            "tdd data loader needs 1 or 2 arguments: tdd(filename) or tdd(filename, encoding)",
        )?;
        let file = DataFile::read(engine, args)?;
        let source = file.fragment(load_tdd(&file.bytes, encoding(engine, args)?)?)?;
        let parsed = tdd_parse::parse_hash_body(&source, ParseOptions::default())
            .map_err(tdd_eval::EvalError::from)?;
        let map = tdd_eval::eval_as_hash(&parsed, &mut DataLoaderEnvironment::new(engine))?;
        Ok(Value::Mapping(map))
    }
}

/// `tddSequence(path[, encoding])`: the file as a sequence body.
#[derive(Copy, Clone, Default, Debug)]
pub struct TddSequenceLoader;

impl DataLoader for TddSequenceLoader {
    fn load(&self, engine: &dyn Engine, args: &[Value]) -> Result<Value, LoaderError> {
        check_arg_count(
            args,
            1,
            2,
            "tddSequence data loader needs 1 or 2 arguments: tddSequence(filename) or \
             tddSequence(filename, encoding)",
        )?;
        let file = DataFile::read(engine, args)?;
        let source = file.fragment(load_tdd(&file.bytes, encoding(engine, args)?)?)?;
        let parsed = tdd_parse::parse_sequence_body(&source, ParseOptions::default())
            .map_err(tdd_eval::EvalError::from)?;
        let items = tdd_eval::eval_as_sequence(&parsed, &mut DataLoaderEnvironment::new(engine))?;
        Ok(Value::Sequence(items))
    }
}

/// The explicit encoding argument, or the engine's default.
fn encoding<'a>(engine: &'a dyn Engine, args: &'a [Value]) -> Result<&'a str, LoaderError> {
    if args.len() > 1 {
        string_arg(args, 1, "encoding")
    } else {
        Ok(engine.source_encoding())
    }
}
