//! Token classification.
//!
//! A token is a short option (`-v`, `-ofile`, `-o=file`), a long option
//! (`--name`, `--name=value`, `--name value`), or a bare input. Both
//! classifiers are pure functions over a single token.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionForm {
    Short,
    Long,
}

/// A token that has option syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionMatch<'a> {
    pub form: OptionForm,
    pub name: &'a str,
    /// An explicit `=` or whitespace separator followed the name.
    pub separated: bool,
    /// Inline value text. `None` when nothing (or only whitespace) followed.
    pub value: Option<&'a str>,
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Split what follows an option name into (separated, value).
///
/// Accepts `\s*=\s*` or `\s+` as separator. Without a separator the whole
/// remainder is the value.
fn split_value(rest: &str) -> (bool, Option<&str>) {
    if rest.is_empty() {
        return (false, None);
    }
    let trimmed = rest.trim_start();
    let (separated, value) = if let Some(after_eq) = trimmed.strip_prefix('=') {
        (true, after_eq.trim_start())
    } else if trimmed.len() != rest.len() {
        (true, trimmed)
    } else {
        (false, rest)
    };
    (separated, (!value.is_empty()).then_some(value))
}

/// `-` followed by exactly one word character, then an optional value.
pub fn short_option(token: &str) -> Option<OptionMatch<'_>> {
    let rest = token.strip_prefix('-')?;
    let first = rest.chars().next()?;
    if !is_word_char(first) {
        return None;
    }
    // word chars are ASCII, so the name is exactly one byte
    let (name, rest) = rest.split_at(1);
    let (separated, value) = split_value(rest);
    Some(OptionMatch {
        form: OptionForm::Short,
        name,
        separated,
        value,
    })
}

/// `--` followed by a run of non-whitespace, non-`=` characters.
pub fn long_option(token: &str) -> Option<OptionMatch<'_>> {
    let rest = token.strip_prefix("--")?;
    let end = rest
        .find(|c: char| c.is_whitespace() || c == '=')
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let (name, rest) = rest.split_at(end);
    let (separated, value) = split_value(rest);
    Some(OptionMatch {
        form: OptionForm::Long,
        name,
        separated,
        value,
    })
}

/// Try the short form, then the long form.
pub fn classify(token: &str) -> Option<OptionMatch<'_>> {
    short_option(token).or_else(|| long_option(token))
}
