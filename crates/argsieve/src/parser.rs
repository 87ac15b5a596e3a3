//! Single-pass token accumulation.

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde_json::Value;

use crate::classify::{OptionMatch, classify};
use crate::error::ParseError;
use crate::schema::{Resolved, Schema};
use crate::value::{Arity, InputRecord, Origin, ParamRecord, ParseResult};

/// Parse `tokens` against `schema`.
///
/// Tokens are consumed left to right. An option that takes a value and has
/// no inline value consumes the next token unconditionally. Once a swallow
/// option is seen, every remaining token is appended to it verbatim.
pub fn parse<S: AsRef<str>>(tokens: &[S], schema: &Schema) -> Result<ParseResult, ParseError> {
    schema.validate()?;

    let mut acc = Accumulator::default();
    let mut stream = tokens.iter().map(|t| t.as_ref()).enumerate();

    while let Some((index, token)) = stream.next() {
        if let Some(target) = &acc.swallow {
            tracing::trace!(index, token, option = %target, "swallowed");
            acc.append_swallowed(token, index);
            continue;
        }

        let Some(m) = classify(token) else {
            tracing::trace!(index, token, "input");
            acc.push_input(schema, token, index)?;
            continue;
        };
        tracing::trace!(index, token, option = m.name, form = ?m.form, "option");

        let resolved = schema
            .resolve(m.name, m.separated || m.value.is_some())
            .ok_or_else(|| ParseError::UnknownOption {
                token: token.to_string(),
            })?;

        if resolved.swallow {
            tracing::debug!(index, option = %resolved.name, "swallowing remaining tokens");
            acc.swallow = Some(resolved.name);
            continue;
        }

        let value = if resolved.is_flag {
            flag_value(token, &m)?
        } else {
            let raw = match m.value {
                Some(v) => v,
                None => stream
                    .next()
                    .map(|(_, next)| next)
                    .ok_or_else(|| ParseError::MissingValue {
                        token: token.to_string(),
                    })?,
            };
            convert(token, &resolved, raw)?
        };

        acc.merge(token, &resolved, value, Origin::Token(index))?;
    }

    let mut result = acc.into_result();
    finalize(&mut result, schema);
    Ok(result)
}

fn flag_value(token: &str, m: &OptionMatch<'_>) -> Result<Value, ParseError> {
    match m.value {
        Some(v) => Err(ParseError::UnexpectedValue {
            token: token.to_string(),
            value: v.to_string(),
        }),
        None => Ok(Value::Bool(true)),
    }
}

fn convert(token: &str, resolved: &Resolved<'_>, raw: &str) -> Result<Value, ParseError> {
    let Some(transform) = resolved.transform else {
        return Ok(Value::String(raw.to_string()));
    };
    transform(raw).map_err(|reason| ParseError::InvalidValue {
        token: token.to_string(),
        name: resolved.name.clone(),
        reason,
    })
}

fn snapshot(value: &Arity<Value>) -> Value {
    match value {
        Arity::Scalar(v) => v.clone(),
        Arity::Multi(vs) => Value::Array(vs.clone()),
    }
}

#[derive(Debug, Default)]
struct Accumulator {
    params: IndexMap<String, ParamRecord>,
    inputs: Vec<InputRecord>,
    swallow: Option<String>,
}

impl Accumulator {
    fn merge(
        &mut self,
        token: &str,
        resolved: &Resolved<'_>,
        value: Value,
        origin: Origin,
    ) -> Result<(), ParseError> {
        match self.params.entry(resolved.name.clone()) {
            Entry::Occupied(mut e) => {
                if !resolved.allow_multiple {
                    return Err(ParseError::DuplicateOption {
                        token: token.to_string(),
                        name: resolved.name.clone(),
                        previous: snapshot(e.get().value()),
                    });
                }
                e.get_mut().push(value, origin);
            }
            Entry::Vacant(e) => {
                let record = if resolved.allow_multiple {
                    ParamRecord::multi(value, origin)
                } else {
                    ParamRecord::scalar(value, origin)
                };
                e.insert(record);
            }
        }
        Ok(())
    }

    fn append_swallowed(&mut self, token: &str, index: usize) {
        let Some(target) = &self.swallow else {
            return;
        };
        let value = Value::String(token.to_string());
        let origin = Origin::Token(index);
        match self.params.get_mut(target) {
            Some(record) => record.push(value, origin),
            None => {
                self.params
                    .insert(target.clone(), ParamRecord::multi(value, origin));
            }
        }
    }

    fn push_input(&mut self, schema: &Schema, token: &str, index: usize) -> Result<(), ParseError> {
        if !schema.allows_bare_inputs() {
            return Err(ParseError::UnrecognizedArgument {
                token: token.to_string(),
            });
        }
        self.inputs.push(InputRecord {
            value: token.to_string(),
            origin: index,
        });
        Ok(())
    }

    fn into_result(self) -> ParseResult {
        ParseResult {
            params: self.params,
            inputs: self.inputs,
        }
    }
}

/// Inject declared defaults for parameters that never appeared.
fn finalize(result: &mut ParseResult, schema: &Schema) {
    for (name, default) in schema.defaults() {
        if result.params.contains_key(name) {
            continue;
        }
        tracing::debug!(option = name, "applying default");
        result.params.insert(
            name.to_string(),
            ParamRecord::scalar(default.clone(), Origin::Default),
        );
    }
}
