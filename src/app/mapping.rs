use crate::app::models::{ImportEntry, ResolvedName};
use serde_json::{Map, Value};

/// Nested `segment -> (mapping | identifier)` tree plus the import list,
/// built one resolved file at a time.
#[derive(Debug, Default)]
pub struct ClassMap {
    pub classes: Map<String, Value>,
    pub imports: Vec<ImportEntry>,
}

impl ClassMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `name.identifier` at `name.dotted` and records its import.
    pub fn insert(&mut self, name: ResolvedName, file: String) {
        let segments: Vec<&str> = name.dotted.split('.').collect();
        let value = Value::String(name.identifier.clone());

        if let Some(previous) = set_path(&mut self.classes, &segments, value) {
            // Last writer wins.
            log::warn!(
                "Duplicate entry for `{}`: {} replaces {}",
                name.dotted,
                name.identifier,
                previous
            );
        }

        self.imports.push(ImportEntry {
            name: name.identifier,
            file,
            spaces: String::new(),
        });
    }

    /// Right-pads every import name to the longest one.
    pub fn align(&mut self) {
        let width = self
            .imports
            .iter()
            .map(|i| i.name.chars().count())
            .max()
            .unwrap_or(0);
        for entry in &mut self.imports {
            entry.spaces = " ".repeat(width - entry.name.chars().count());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }
}

/// Sets `value` at the nested key path, creating (or replacing leaves with)
/// intermediate mappings. Returns the leaf it overwrote.
fn set_path(node: &mut Map<String, Value>, segments: &[&str], value: Value) -> Option<Value> {
    match segments {
        [] => None,
        [leaf] => node.insert((*leaf).to_string(), value),
        [head, rest @ ..] => {
            let child = node
                .entry((*head).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            match child {
                Value::Object(map) => set_path(map, rest, value),
                _ => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn name(dotted: &str, identifier: &str) -> ResolvedName {
        ResolvedName {
            dotted: dotted.to_string(),
            identifier: identifier.to_string(),
        }
    }

    #[test]
    fn builds_nested_mapping_without_clobbering_siblings() {
        let mut map = ClassMap::new();
        map.insert(name("models.User", "DemoModelsUser"), "models/user.js".into());
        map.insert(name("models.Post", "DemoModelsPost"), "models/post.js".into());
        map.insert(name("utils.helpers", "DemoUtilsHelpers"), "utils/helpers.js".into());

        assert_eq!(
            Value::Object(map.classes),
            json!({
                "models": { "User": "DemoModelsUser", "Post": "DemoModelsPost" },
                "utils": { "helpers": "DemoUtilsHelpers" }
            })
        );
    }

    #[test]
    fn keeps_insertion_order() {
        let mut map = ClassMap::new();
        map.insert(name("zeta", "Zeta"), "zeta.js".into());
        map.insert(name("alpha", "Alpha"), "alpha.js".into());

        let keys: Vec<&String> = map.classes.keys().collect();
        assert_eq!(keys, ["zeta", "alpha"]);
    }

    #[test]
    fn duplicate_dotted_path_last_write_wins() {
        let mut map = ClassMap::new();
        map.insert(name("a.b", "First"), "a/b.js".into());
        map.insert(name("a.b", "Second"), "a/b.mjs".into());

        assert_eq!(map.classes["a"]["b"], json!("Second"));
        assert_eq!(map.imports.len(), 2);
    }

    #[test]
    fn leaf_is_replaced_by_branch() {
        let mut map = ClassMap::new();
        map.insert(name("models", "Models"), "models.js".into());
        map.insert(name("models.User", "ModelsUser"), "models/user.js".into());

        assert_eq!(map.classes["models"], json!({ "User": "ModelsUser" }));
    }

    #[test]
    fn align_pads_to_longest_name() {
        let mut map = ClassMap::new();
        map.insert(name("a", "A"), "a.js".into());
        map.insert(name("long", "LongerName"), "long.js".into());
        map.align();

        let width = map.imports.iter().map(|i| i.name.len()).max().unwrap();
        for entry in &map.imports {
            assert_eq!(entry.spaces.len(), width - entry.name.len());
        }
        assert_eq!(map.imports[0].spaces, " ".repeat(9));
        assert_eq!(map.imports[1].spaces, "");
    }

    #[test]
    fn align_counts_characters_not_bytes() {
        let mut map = ClassMap::new();
        map.insert(name("abcd", "DemoAbcd"), "abcd.js".into());
        map.insert(name("café", "DemoCafé"), "café.js".into());
        map.align();

        assert_eq!(map.imports[0].spaces, "");
        assert_eq!(map.imports[1].spaces, "");
    }

    #[test]
    fn align_on_empty_list_is_noop() {
        let mut map = ClassMap::new();
        map.align();
        assert!(map.is_empty());
    }
}
