use squeak_eval::{install_default_builtins, Evaluator};

use super::common::{self, EXIT_REPORTED_ERROR, EXIT_RUNTIME_FAULT, EXIT_SUCCESS};
use crate::error::Result;

pub struct RunArgs {
    pub path: String,
    pub buffer_size: usize,
}

/// Parses, resolves and executes the program, printing script output to
/// stdout and any surviving exports to stderr once execution finishes.
pub fn run(args: RunArgs) -> Result<i32> {
    let source = common::read_source(&args.path)?;

    let Some((program, resolution)) = common::parse_and_resolve(&source, args.buffer_size)? else {
        return Ok(EXIT_REPORTED_ERROR);
    };

    let mut evaluator = Evaluator::new(Box::new(std::io::stdout()));
    install_default_builtins(evaluator.globals());

    if let Err(fault) = evaluator.execute(&program, &resolution) {
        eprintln!("runtime fault: {fault}");
        return Ok(EXIT_RUNTIME_FAULT);
    }

    for (name, value) in evaluator.exports() {
        eprintln!("{name} = {value}");
    }

    Ok(EXIT_SUCCESS)
}
