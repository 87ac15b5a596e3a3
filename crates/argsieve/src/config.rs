//! JSON schema files.
//!
//! This is a plain data model of [`Schema`] so schemas can live next to the
//! program that uses them. Function-valued transforms cannot be written in a
//! file, so `value-type` selects one of a few built-in conversions instead.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::{OptionSpec, Schema, Transform};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueType {
    #[default]
    String,
    Integer,
    Float,
    Boolean,
}

impl ValueType {
    fn transform(self) -> Option<Transform> {
        match self {
            ValueType::String => None,
            ValueType::Integer => Some(Arc::new(parse_integer)),
            ValueType::Float => Some(Arc::new(parse_float)),
            ValueType::Boolean => Some(Arc::new(parse_boolean)),
        }
    }
}

fn parse_integer(raw: &str) -> Result<Value, String> {
    raw.trim()
        .parse::<i64>()
        .map(Value::from)
        .map_err(|e| format!("expected an integer: {e}"))
}

fn parse_float(raw: &str) -> Result<Value, String> {
    let n = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("expected a number: {e}"))?;
    serde_json::Number::from_f64(n)
        .map(Value::Number)
        .ok_or_else(|| format!("not a finite number: {raw}"))
}

fn parse_boolean(raw: &str) -> Result<Value, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(Value::Bool(true)),
        "false" | "no" | "0" => Ok(Value::Bool(false)),
        other => Err(format!("expected a boolean, got '{other}'")),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OptionEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default)]
    pub multiple: bool,
    #[serde(default = "default_flag")]
    pub flag: bool,
    #[serde(default)]
    pub swallow: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default)]
    pub value_type: ValueType,
}

impl Default for OptionEntry {
    fn default() -> Self {
        Self {
            alias: None,
            multiple: false,
            flag: true,
            swallow: false,
            default: None,
            value_type: ValueType::String,
        }
    }
}

fn default_flag() -> bool {
    true
}

fn default_allow_bare_inputs() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SchemaFile {
    #[serde(default)]
    pub implicit: bool,
    #[serde(default = "default_allow_bare_inputs")]
    pub allow_bare_inputs: bool,
    #[serde(default)]
    pub parameters: IndexMap<String, OptionEntry>,
}

impl Default for SchemaFile {
    fn default() -> Self {
        Self {
            implicit: false,
            allow_bare_inputs: true,
            parameters: IndexMap::new(),
        }
    }
}

impl OptionEntry {
    fn to_spec(&self) -> OptionSpec {
        if let Some(target) = &self.alias {
            return OptionSpec::alias_of(target.clone());
        }
        let mut spec = OptionSpec::new()
            .flag(self.flag)
            .multiple(self.multiple)
            .swallow(self.swallow)
            .with_transform(self.value_type.transform());
        if let Some(default) = &self.default {
            spec = spec.default_value(default.clone());
        }
        spec
    }
}

impl SchemaFile {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("failed to parse schema JSON")
    }

    /// Build a validated [`Schema`].
    pub fn into_schema(self) -> Result<Schema> {
        let mut schema = Schema::new()
            .implicit(self.implicit)
            .allow_bare_inputs(self.allow_bare_inputs);
        for (name, entry) in &self.parameters {
            schema = schema.option(name.clone(), entry.to_spec());
        }
        schema.validate().context("invalid schema")?;
        Ok(schema)
    }
}

/// Read and validate a schema file.
pub fn load_schema(path: &Path) -> Result<Schema> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read schema: {}", path.display()))?;
    let file = SchemaFile::from_json(&contents)
        .with_context(|| format!("in schema file: {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        parameters = file.parameters.len(),
        "loaded schema"
    );
    file.into_schema()
        .with_context(|| format!("in schema file: {}", path.display()))
}
