use crate::app::fs::FileSystem;
use crate::app::models::ResolvedName;
use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Component, Path};

/// `class Foo` at the start of a line, or a `* @class` doc tag.
static CLASS_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)(^|\*\s*@)class ").unwrap());

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\W_]+").unwrap());

/// Converts any mix of camelCase and separators to camelCase.
///
/// `capitalize` decides the case of the very first letter.
pub fn camelize(text: &str, capitalize: bool) -> String {
    let decamelized = decamelize(text);
    let separated = NON_WORD.replace_all(&decamelized, "-");
    let mut out = String::with_capacity(separated.len());

    for (i, word) in separated.split('-').filter(|w| !w.is_empty()).enumerate() {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if i > 0 || capitalize {
                out.extend(first.to_uppercase());
            } else {
                out.extend(first.to_lowercase());
            }
            out.push_str(chars.as_str());
        }
    }

    out
}

/// `fooBar` -> `foo-bar`.
fn decamelize(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    let mut prev: Option<char> = None;

    for c in text.chars() {
        if c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
            out.push('-');
        }
        out.extend(c.to_lowercase());
        prev = Some(c);
    }

    out
}

/// Upper-cases the first letter.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn declares_class(content: &str) -> bool {
    CLASS_PATTERN.is_match(content)
}

/// Turns file paths into dotted paths and identifiers.
pub struct NameResolver<'a, F: FileSystem> {
    fs: &'a F,
    root: &'a Path,
    prefix: String,
}

impl<'a, F: FileSystem> NameResolver<'a, F> {
    pub fn new(fs: &'a F, root: &'a Path, module_name: &str) -> Self {
        Self {
            fs,
            root,
            prefix: camelize(module_name, true),
        }
    }

    /// Returns `None` for files that must stay out of the index.
    pub fn resolve(&self, file: &Path) -> Result<Option<ResolvedName>> {
        let Some(stem) = file.file_stem().map(|s| s.to_string_lossy()) else {
            return Ok(None);
        };
        if stem.eq_ignore_ascii_case("index") {
            log::debug!("Skipping index file {}", file.display());
            return Ok(None);
        }

        let is_class = declares_class(&self.fs.read(file)?);
        let Some(relative) = pathdiff::diff_paths(file, self.root) else {
            return Ok(None);
        };

        let mut segments: Vec<String> = relative
            .parent()
            .into_iter()
            .flat_map(Path::components)
            .filter_map(|c| match c {
                Component::Normal(s) => Some(camelize(&s.to_string_lossy(), false)),
                _ => None,
            })
            .collect();
        segments.push(camelize(&stem, is_class));

        let identifier = segments.iter().fold(self.prefix.clone(), |mut acc, s| {
            acc.push_str(&capitalize(s));
            acc
        });

        Ok(Some(ResolvedName {
            dotted: segments.join("."),
            identifier,
        }))
    }
}
