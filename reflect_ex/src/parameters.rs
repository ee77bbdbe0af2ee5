//! Parameter names recovered from a function's source text.
//!
//! This is a pattern match, not a parser: destructured parameters, defaults
//! containing parentheses or commas, and parameter lists that span several
//! lines in unusual ways are not understood.

use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

static CLASS_CONSTRUCTOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"constructor\(([^\)]*)\)").expect("constructor pattern is a valid regex")
});

/// Extracts the declared parameter names of the function called `name` from
/// its `source`.
///
/// Class sources yield the parameters of their `constructor(...)`. Anything
/// else must start with `name(...)`, `function name(...)` or `function(...)`.
/// Names keep default values and rest syntax verbatim. No match gives an
/// empty list.
pub fn parse_parameters(source: &str, name: &str) -> Vec<String> {
    let list = if source.starts_with("class") {
        capture(&CLASS_CONSTRUCTOR, source)
    } else {
        function_pattern(name).and_then(|pattern| capture(&pattern, source))
    };

    let parameters = match list {
        Some(list) => split_parameters(list),
        None => Vec::new(),
    };

    trace!("parameters of {}: {:?}", name, parameters);

    parameters
}

fn function_pattern(name: &str) -> Option<Regex> {
    let name = regex::escape(name);

    Regex::new(&format!(
        r"^(?:(?:{name})|(?:function(?:\s*{name})?))\s*\(([^\(]*)\)",
        name = name
    ))
    .ok()
}

fn capture<'s>(pattern: &Regex, source: &'s str) -> Option<&'s str> {
    pattern
        .captures(source)
        .and_then(|captures| captures.get(1))
        .map(|list| list.as_str())
}

fn split_parameters(list: &str) -> Vec<String> {
    let parameters: Vec<String> = list.split(',').map(|arg| arg.trim().to_owned()).collect();

    if parameters.len() == 1 && parameters[0].is_empty() {
        return Vec::new();
    }

    parameters
}
