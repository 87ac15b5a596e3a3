//! Parameter schema and option resolution.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::SchemaError;

/// User-supplied conversion from raw option text to a stored value.
pub type Transform = Arc<dyn Fn(&str) -> Result<Value, String> + Send + Sync>;

/// Declaration of a single named parameter.
///
/// If `alias` is set, every other field is ignored and lookups follow the
/// alias to the canonical entry.
#[derive(Clone)]
pub struct OptionSpec {
    alias: Option<String>,
    multiple: bool,
    flag: bool,
    swallow: bool,
    default: Option<Value>,
    transform: Option<Transform>,
}

impl Default for OptionSpec {
    fn default() -> Self {
        Self {
            alias: None,
            multiple: false,
            flag: true,
            swallow: false,
            default: None,
            transform: None,
        }
    }
}

impl fmt::Debug for OptionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionSpec")
            .field("alias", &self.alias)
            .field("multiple", &self.multiple)
            .field("flag", &self.flag)
            .field("swallow", &self.swallow)
            .field("default", &self.default)
            .field("transform", &self.transform.as_ref().map(|_| ".."))
            .finish()
    }
}

impl OptionSpec {
    /// A single-occurrence boolean flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// A single-occurrence option that takes a value.
    pub fn value() -> Self {
        Self::default().flag(false)
    }

    /// An entry that stands for `target`.
    pub fn alias_of(target: impl Into<String>) -> Self {
        Self {
            alias: Some(target.into()),
            ..Self::default()
        }
    }

    pub fn flag(mut self, flag: bool) -> Self {
        self.flag = flag;
        self
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    /// Consume every remaining token as a value of this option.
    ///
    /// Implies `multiple(true)` and `flag(false)`.
    pub fn swallow(mut self, swallow: bool) -> Self {
        self.swallow = swallow;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn transform<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(f));
        self
    }

    pub(crate) fn with_transform(mut self, transform: Option<Transform>) -> Self {
        self.transform = transform;
        self
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn is_flag(&self) -> bool {
        self.flag
    }

    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    pub fn is_swallow(&self) -> bool {
        self.swallow
    }

    pub fn declared_default(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// Effective behavior of an option occurrence after alias resolution.
#[derive(Clone)]
pub struct Resolved<'s> {
    /// Canonical parameter name (the alias target, if any).
    pub name: String,
    pub is_flag: bool,
    pub allow_multiple: bool,
    pub swallow: bool,
    pub transform: Option<&'s Transform>,
}

impl fmt::Debug for Resolved<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field("name", &self.name)
            .field("is_flag", &self.is_flag)
            .field("allow_multiple", &self.allow_multiple)
            .field("swallow", &self.swallow)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

/// The full parser configuration.
#[derive(Debug, Clone)]
pub struct Schema {
    implicit: bool,
    allow_bare_inputs: bool,
    options: IndexMap<String, OptionSpec>,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            implicit: false,
            allow_bare_inputs: true,
            options: IndexMap::new(),
        }
    }
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept undeclared options instead of rejecting them.
    pub fn implicit(mut self, implicit: bool) -> Self {
        self.implicit = implicit;
        self
    }

    /// Collect non-option tokens as inputs (`true`, the default) or reject them.
    pub fn allow_bare_inputs(mut self, allow: bool) -> Self {
        self.allow_bare_inputs = allow;
        self
    }

    /// Declare a parameter. Redeclaring a name replaces the earlier entry.
    pub fn option(mut self, name: impl Into<String>, spec: OptionSpec) -> Self {
        self.options.insert(name.into(), spec);
        self
    }

    pub fn is_implicit(&self) -> bool {
        self.implicit
    }

    pub fn allows_bare_inputs(&self) -> bool {
        self.allow_bare_inputs
    }

    pub fn get(&self, name: &str) -> Option<&OptionSpec> {
        self.options.get(name)
    }

    pub fn options(&self) -> impl Iterator<Item = (&str, &OptionSpec)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Check that every alias points at a real, non-alias entry.
    pub fn validate(&self) -> Result<(), SchemaError> {
        for (name, spec) in &self.options {
            let Some(target) = spec.alias() else {
                continue;
            };
            match self.options.get(target) {
                None => {
                    return Err(SchemaError::UnknownAliasTarget {
                        name: name.clone(),
                        target: target.to_string(),
                    });
                }
                Some(t) if t.alias().is_some() => {
                    return Err(SchemaError::AliasChain {
                        name: name.clone(),
                        target: target.to_string(),
                    });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Resolve an option name to its effective behavior.
    ///
    /// `has_inline` is whether the token carried a separator or value; it only
    /// matters for undeclared options in implicit mode. Returns `None` when the
    /// option is unknown and the schema is not implicit.
    pub fn resolve(&self, name: &str, has_inline: bool) -> Option<Resolved<'_>> {
        let Some((key, spec)) = self.options.get_key_value(name) else {
            if !self.implicit {
                return None;
            }
            return Some(Resolved {
                name: name.to_string(),
                is_flag: !has_inline,
                allow_multiple: true,
                swallow: false,
                transform: None,
            });
        };

        let (key, spec) = match spec.alias() {
            Some(target) => self.options.get_key_value(target)?,
            None => (key, spec),
        };

        Some(Resolved {
            name: key.clone(),
            is_flag: spec.flag && !spec.swallow,
            allow_multiple: spec.multiple || spec.swallow,
            swallow: spec.swallow,
            transform: spec.transform.as_ref(),
        })
    }

    /// Declared defaults, in declaration order. Alias entries are skipped.
    pub(crate) fn defaults(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.options.iter().filter_map(|(name, spec)| {
            if spec.alias.is_some() {
                return None;
            }
            spec.default.as_ref().map(|d| (name.as_str(), d))
        })
    }
}
