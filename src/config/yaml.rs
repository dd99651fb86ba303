//! Comment preserving dependabot.yml document
//!
//! The document keeps its original text. Reads go through serde_yaml; writes
//! splice freshly rendered entries into the text of the top-level `updates`
//! node so that comments, ordering and unrelated keys survive untouched.

use crate::config::document::ConfigDocument;
use crate::config::template::NEW_CONFIG_TEMPLATE;
use crate::domain::Update;
use crate::error::DocumentError;
use regex::Regex;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Dash indentation used when the `updates` sequence has no entries yet
const DEFAULT_INDENT: usize = 2;

/// Top-level `updates:` key, optionally quoted, with the rest of the line
static UPDATES_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:updates|"updates"|'updates')[ \t]*:(?P<rest>(?:[ \t].*)?)$"#)
        .expect("valid updates key pattern")
});

#[derive(Debug, Deserialize)]
struct RawUpdate {
    #[serde(rename = "package-ecosystem")]
    package_ecosystem: Option<String>,
    directory: Option<String>,
    #[serde(default)]
    directories: Vec<String>,
    schedule: Option<RawSchedule>,
}

#[derive(Debug, Deserialize)]
struct RawSchedule {
    interval: Option<String>,
}

/// A dependabot configuration held as its original YAML text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YamlDocument {
    path: PathBuf,
    source: String,
}

impl YamlDocument {
    /// Parse an existing document, failing on malformed YAML or a
    /// malformed `updates` node
    pub fn parse(path: impl Into<PathBuf>, source: impl Into<String>) -> Result<Self, DocumentError> {
        let document = Self {
            path: path.into(),
            source: source.into(),
        };
        document.declared_updates()?;
        Ok(document)
    }

    /// A fresh document with a version marker and an empty `updates` sequence
    pub fn template(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            source: NEW_CONFIG_TEMPLATE.to_string(),
        }
    }

    /// Current document text
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Consume the document, returning its text
    pub fn into_string(self) -> String {
        self.source
    }

    /// Parsed document with `<<` merge keys expanded
    fn load_value(&self) -> Result<Value, DocumentError> {
        if is_blank(&self.source) {
            return Ok(Value::Null);
        }
        let mut value: Value = serde_yaml::from_str(&self.source)
            .map_err(|e| DocumentError::parse(&self.path, e.to_string()))?;
        value
            .apply_merge()
            .map_err(|e| DocumentError::parse(&self.path, e.to_string()))?;
        Ok(value)
    }

    fn splice(&self, updates: &[Update]) -> Result<String, DocumentError> {
        let lines: Vec<&str> = self.source.split_inclusive('\n').collect();
        let newline = if self.source.contains("\r\n") { "\r\n" } else { "\n" };

        let found = lines.iter().enumerate().find_map(|(index, line)| {
            UPDATES_KEY
                .captures(trim_eol(line))
                .and_then(|caps| caps.name("rest"))
                .map(|rest| (index, rest.as_str().to_string()))
        });

        let Some((key_index, rest)) = found else {
            tracing::debug!("no `updates` key in {}, appending one", self.path.display());
            let mut out = self.source.clone();
            if !out.is_empty() && !out.ends_with('\n') {
                out.push_str(newline);
            }
            out.push_str("updates:");
            out.push_str(newline);
            out.push_str(&render_block(updates, DEFAULT_INDENT, newline)?);
            return Ok(out);
        };

        let (value, comment) = split_comment(rest.trim());
        match value {
            "" => self.splice_block(&lines, key_index, updates, newline),
            v if v.starts_with('&') && !v.contains(char::is_whitespace) => {
                self.splice_block(&lines, key_index, updates, newline)
            }
            "~" | "null" | "Null" | "NULL" | "[]" => {
                let mut out = String::new();
                lines[..key_index].iter().for_each(|l| out.push_str(l));
                out.push_str("updates:");
                if !comment.is_empty() {
                    out.push(' ');
                    out.push_str(comment);
                }
                out.push_str(newline);
                out.push_str(&render_block(updates, DEFAULT_INDENT, newline)?);
                lines[key_index + 1..].iter().for_each(|l| out.push_str(l));
                Ok(out)
            }
            v if v.starts_with('[') => {
                let line_start: usize = lines[..key_index].iter().map(|l| l.len()).sum();
                let bracket = lines[key_index].find('[').map(|i| line_start + i).ok_or_else(
                    || DocumentError::unsupported_layout(&self.path, "flow sequence not found"),
                )?;
                self.splice_flow(bracket, updates)
            }
            other => Err(DocumentError::unsupported_layout(
                &self.path,
                format!("unexpected value `{}`", other),
            )),
        }
    }

    /// Insert after the last content line of a block sequence
    fn splice_block(
        &self,
        lines: &[&str],
        key_index: usize,
        updates: &[Update],
        newline: &str,
    ) -> Result<String, DocumentError> {
        let mut first_content = None;
        let mut last_content = None;

        for (index, line) in lines.iter().enumerate().skip(key_index + 1) {
            let line = trim_eol(line);
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let indented = trimmed.len() != line.len();
            if indented || trimmed == "-" || trimmed.starts_with("- ") {
                first_content.get_or_insert(index);
                last_content = Some(index);
                continue;
            }
            break;
        }

        let (insert_after, indent) = match (first_content, last_content) {
            (Some(first), Some(last)) => {
                let line = trim_eol(lines[first]);
                let trimmed = line.trim_start();
                if !trimmed.starts_with('-') {
                    return Err(DocumentError::NotASequence {
                        path: self.path.clone(),
                    });
                }
                (last, line.len() - trimmed.len())
            }
            _ => (key_index, DEFAULT_INDENT),
        };

        let mut out = String::new();
        lines[..=insert_after].iter().for_each(|l| out.push_str(l));
        if !out.ends_with('\n') {
            out.push_str(newline);
        }
        out.push_str(&render_block(updates, indent, newline)?);
        lines[insert_after + 1..]
            .iter()
            .for_each(|l| out.push_str(l));
        Ok(out)
    }

    /// Insert before the closing bracket of a flow sequence starting at `open`
    fn splice_flow(&self, open: usize, updates: &[Update]) -> Result<String, DocumentError> {
        let bytes = self.source.as_bytes();
        let mut depth = 0usize;
        let mut quote: Option<u8> = None;
        let mut in_comment = false;
        let mut last_significant = open;
        let mut close = None;
        let mut index = open;

        while index < bytes.len() {
            let byte = bytes[index];
            if in_comment {
                if byte == b'\n' {
                    in_comment = false;
                }
            } else if let Some(q) = quote {
                if q == b'"' && byte == b'\\' {
                    index += 1;
                } else if byte == q {
                    if q == b'\'' && bytes.get(index + 1) == Some(&b'\'') {
                        index += 1;
                    } else {
                        quote = None;
                    }
                }
                last_significant = index;
            } else {
                match byte {
                    b'"' | b'\'' => quote = Some(byte),
                    b'#' if index > 0 && bytes[index - 1].is_ascii_whitespace() => {
                        in_comment = true;
                    }
                    b'[' | b'{' => depth += 1,
                    b']' | b'}' => {
                        depth = depth.saturating_sub(1);
                        if depth == 0 {
                            close = Some(index);
                            break;
                        }
                    }
                    _ => {}
                }
                if !in_comment && !byte.is_ascii_whitespace() {
                    last_significant = index;
                }
            }
            index += 1;
        }

        if close.is_none() {
            return Err(DocumentError::unsupported_layout(
                &self.path,
                "unterminated flow sequence",
            ));
        }

        let items = updates
            .iter()
            .map(render_flow)
            .collect::<Result<Vec<_>, _>>()?
            .join(", ");

        let insertion = match bytes[last_significant] {
            b'[' => items,
            b',' => format!(" {}", items),
            _ => format!(", {}", items),
        };

        let mut out = String::with_capacity(self.source.len() + insertion.len());
        out.push_str(&self.source[..=last_significant]);
        out.push_str(&insertion);
        out.push_str(&self.source[last_significant + 1..]);
        Ok(out)
    }
}

impl ConfigDocument for YamlDocument {
    fn declared_updates(&self) -> Result<Vec<Update>, DocumentError> {
        let value = self.load_value()?;
        if value.is_null() {
            return Ok(Vec::new());
        }
        if !value.is_mapping() {
            return Err(DocumentError::parse(
                &self.path,
                "top level is not a mapping",
            ));
        }

        let items = match value.get("updates") {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Sequence(items)) => items,
            Some(_) => {
                return Err(DocumentError::NotASequence {
                    path: self.path.clone(),
                })
            }
        };

        let mut declared = Vec::new();
        for (index, item) in items.iter().enumerate() {
            let raw: RawUpdate = serde_yaml::from_value(item.clone()).map_err(|e| {
                DocumentError::parse(&self.path, format!("updates[{}]: {}", index, e))
            })?;

            let Some(ecosystem) = raw.package_ecosystem else {
                tracing::warn!(
                    "updates[{}] in {} has no package-ecosystem, ignoring",
                    index,
                    self.path.display()
                );
                continue;
            };
            let interval = raw
                .schedule
                .and_then(|s| s.interval)
                .unwrap_or_default();

            let directories: Vec<String> = raw.directory.into_iter().chain(raw.directories).collect();
            if directories.is_empty() {
                tracing::warn!(
                    "updates[{}] in {} has no directory, ignoring",
                    index,
                    self.path.display()
                );
            }
            for directory in directories {
                declared.push(Update::new(ecosystem.clone(), directory, interval.clone()));
            }
        }

        Ok(declared)
    }

    fn append_updates(&mut self, updates: &[Update]) -> Result<(), DocumentError> {
        if updates.is_empty() {
            return Ok(());
        }

        let before = self.declared_updates()?;
        let (rest_before, items_before) = split_updates(self.load_value()?);
        let candidate = Self {
            path: self.path.clone(),
            source: self.splice(updates)?,
        };

        let (rest_after, items_after) = split_updates(
            candidate
                .load_value()
                .map_err(|e| DocumentError::splice_failed(&self.path, e.to_string()))?,
        );
        if rest_after != rest_before
            || items_after.get(..items_before.len()) != Some(items_before.as_slice())
        {
            return Err(DocumentError::splice_failed(
                &self.path,
                "existing content would change",
            ));
        }

        let after = candidate
            .declared_updates()
            .map_err(|e| DocumentError::splice_failed(&self.path, e.to_string()))?;
        if after.len() != before.len() + updates.len() {
            return Err(DocumentError::splice_failed(
                &self.path,
                format!(
                    "expected {} entries after merge, found {}",
                    before.len() + updates.len(),
                    after.len()
                ),
            ));
        }
        let keys: HashSet<_> = after.iter().map(Update::key).collect();
        if let Some(missing) = updates.iter().find(|u| !keys.contains(&u.key())) {
            return Err(DocumentError::splice_failed(
                &self.path,
                format!("entry `{}` missing after merge", missing),
            ));
        }

        self.source = candidate.source;
        Ok(())
    }
}

/// Split a document into its top level without `updates` and the `updates` items
fn split_updates(value: Value) -> (Value, Vec<Value>) {
    let mut value = if value.is_null() {
        Value::Mapping(Mapping::new())
    } else {
        value
    };
    let items = match value.as_mapping_mut().and_then(|m| m.remove("updates")) {
        Some(Value::Sequence(items)) => items,
        _ => Vec::new(),
    };
    (value, items)
}

/// Render entries as a block sequence with dashes at `indent` columns
fn render_block(updates: &[Update], indent: usize, newline: &str) -> Result<String, DocumentError> {
    let fragment = serde_yaml::to_string(updates).map_err(|e| DocumentError::Serialize {
        message: e.to_string(),
    })?;
    let fragment = fragment.strip_prefix("---\n").unwrap_or(&fragment);

    let pad = " ".repeat(indent);
    let mut out = String::with_capacity(fragment.len() + updates.len() * 4 * indent);
    for line in fragment.lines() {
        out.push_str(&pad);
        out.push_str(line);
        out.push_str(newline);
    }
    Ok(out)
}

/// Render one entry as a flow mapping
fn render_flow(update: &Update) -> Result<String, DocumentError> {
    let quote = |s: &str| {
        serde_json::to_string(s).map_err(|e| DocumentError::Serialize {
            message: e.to_string(),
        })
    };
    Ok(format!(
        "{{\"package-ecosystem\": {}, \"directory\": {}, \"schedule\": {{\"interval\": {}}}}}",
        quote(&update.ecosystem)?,
        quote(&update.directory)?,
        quote(update.interval())?
    ))
}

/// Split a value from a trailing `# comment`, ignoring `#` inside quotes
fn split_comment(text: &str) -> (&str, &str) {
    let mut quote: Option<char> = None;
    let mut previous_is_space = true;

    for (index, ch) in text.char_indices() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None if ch == '"' || ch == '\'' => quote = Some(ch),
            None if ch == '#' && previous_is_space => {
                return (text[..index].trim_end(), &text[index..]);
            }
            None => {}
        }
        previous_is_space = ch.is_whitespace();
    }
    (text, "")
}

fn trim_eol(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// True for text holding only whitespace, comments and document markers
fn is_blank(source: &str) -> bool {
    source.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}
