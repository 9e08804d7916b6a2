use crate::app::fs::FileSystem;
use crate::app::mapping::ClassMap;
use crate::app::models::{BuiltinTemplate, ImportEntry, RuntimeConfig, TemplateSource};
use anyhow::{Context, Result};
use minijinja::Environment;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

const HEADER_TEMPLATE: &str = include_str!("../../tpl/header.jinja");
const NODE_TEMPLATE: &str = include_str!("../../tpl/node.jinja");
const ES6_TEMPLATE: &str = include_str!("../../tpl/es6.jinja");

impl BuiltinTemplate {
    fn source(self) -> &'static str {
        match self {
            Self::Node => NODE_TEMPLATE,
            Self::Es6 => ES6_TEMPLATE,
        }
    }
}

/// Everything a template can reference.
#[derive(Serialize)]
struct RenderContext<'a> {
    content: String,
    classes: &'a Map<String, Value>,
    created: &'a str,
    description: &'a str,
    extension: &'a str,
    footer: &'a str,
    header: &'a str,
    imports: &'a [ImportEntry],
    indir: String,
    name: &'a str,
    package: Option<String>,
    save: bool,
    tpl: Option<String>,
}

pub struct OutputGenerator;

impl OutputGenerator {
    /// JSON with four-space indentation.
    pub fn pretty_json(value: &impl Serialize) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut ser)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Pretty-prints the mapping as an unquoted object literal.
    pub fn format_classes(classes: &Map<String, Value>) -> Result<String> {
        let json = Self::pretty_json(classes)?;
        Ok(format!("{};", json.replace('"', "").replace(':', " :")))
    }

    /// Renders the index text, trimmed and ending in a single newline.
    pub fn render(fs: &impl FileSystem, config: &RuntimeConfig, map: &ClassMap) -> Result<String> {
        let source = match &config.template {
            Some(TemplateSource::Builtin(builtin)) => builtin.source().to_string(),
            Some(TemplateSource::File(path)) => fs
                .read(path)
                .with_context(|| format!("Failed to load template {}", path.display()))?,
            None => anyhow::bail!(
                "No template for extension `{}`; pass one with --tpl",
                config.extension
            ),
        };

        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_template("header", HEADER_TEMPLATE)?;
        let template = env
            .template_from_str(&source)
            .context("Failed to parse template")?;

        let ctx = RenderContext {
            content: Self::format_classes(&map.classes)?,
            classes: &map.classes,
            created: &config.created,
            description: &config.description,
            extension: &config.extension,
            footer: &config.footer,
            header: &config.header,
            imports: &map.imports,
            indir: config.indir.display().to_string(),
            name: &config.name,
            package: config.manifest.as_ref().map(|p| p.display().to_string()),
            save: config.save,
            tpl: match &config.template {
                Some(TemplateSource::File(path)) => Some(path.display().to_string()),
                _ => None,
            },
        };
        let rendered = template.render(ctx).context("Failed to render template")?;

        Ok(format!("{}\n", rendered.trim()))
    }

    /// Console form of the output: path, underline, content.
    pub fn preview(outfile: &str, content: &str) -> String {
        format!("{}\n{}\n{}\n", outfile, "-".repeat(outfile.chars().count()), content)
    }

    /// Saves the index or prints it, depending on `config.save`.
    pub fn emit(fs: &impl FileSystem, config: &RuntimeConfig, content: &str) -> Result<()> {
        let outfile = config.outfile();
        if config.save {
            fs.write(&outfile, content)?;
            log::info!("Wrote {}", outfile.display());
        } else {
            print!("{}", Self::preview(&outfile.display().to_string(), content));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::DEFAULT_FILE_PATTERN;
    use crate::app::fs::MockFileSystem;
    use crate::app::models::ResolvedName;
    use regex::Regex;
    use std::path::PathBuf;

    fn config(template: Option<TemplateSource>) -> RuntimeConfig {
        RuntimeConfig {
            indir: PathBuf::from("/p/src"),
            extension: "js".into(),
            template,
            name: "demo".into(),
            description: "Demo package".into(),
            header: "'use strict';".into(),
            footer: "// end".into(),
            file_pattern: Regex::new(DEFAULT_FILE_PATTERN).unwrap(),
            exclude: Vec::new(),
            manifest: None,
            save: true,
            created: "2024-01-02T03:04:05.000Z".into(),
        }
    }

    fn sample_map() -> ClassMap {
        let mut map = ClassMap::new();
        map.insert(
            ResolvedName {
                dotted: "models.User".into(),
                identifier: "DemoModelsUser".into(),
            },
            "models/user.js".into(),
        );
        map.insert(
            ResolvedName {
                dotted: "utils.helpers".into(),
                identifier: "DemoUtilsHelpers".into(),
            },
            "utils/helpers.js".into(),
        );
        map.align();
        map
    }

    #[test]
    fn format_classes_is_unquoted_object_literal() {
        let expected = "{\n    models : {\n        User : DemoModelsUser\n    },\n    utils : {\n        helpers : DemoUtilsHelpers\n    }\n};";
        assert_eq!(OutputGenerator::format_classes(&sample_map().classes).unwrap(), expected);
    }

    #[test]
    fn format_empty_classes() {
        assert_eq!(OutputGenerator::format_classes(&Map::new()).unwrap(), "{};");
    }

    #[test]
    fn renders_node_template() {
        let fs = MockFileSystem::new();
        let out = OutputGenerator::render(
            &fs,
            &config(Some(TemplateSource::Builtin(BuiltinTemplate::Node))),
            &sample_map(),
        )
        .unwrap();

        assert!(out.starts_with("/**\n * Demo package\n"));
        assert!(out.contains("2024-01-02T03:04:05.000Z"));
        assert!(out.contains("'use strict';"));
        assert!(out.contains("const DemoModelsUser   = require('./models/user.js');\n"));
        assert!(out.contains("const DemoUtilsHelpers = require('./utils/helpers.js');\n"));
        assert!(out.contains("module.exports = {\n    models : {"));
        assert!(out.ends_with("};\n\n// end\n"));
    }

    #[test]
    fn renders_es6_template() {
        let fs = MockFileSystem::new();
        let out = OutputGenerator::render(
            &fs,
            &config(Some(TemplateSource::Builtin(BuiltinTemplate::Es6))),
            &sample_map(),
        )
        .unwrap();

        assert!(out.contains("import DemoModelsUser   from './models/user.js';\n"));
        assert!(out.contains("export {\n    DemoModelsUser,\n    DemoUtilsHelpers\n};"));
        assert!(out.contains("export default {\n"));
    }

    #[test]
    fn renders_custom_template_from_disk() {
        let fs = MockFileSystem::new().with_file(
            "/tpl/custom.jinja",
            "{{ name }}|{% for i in imports %}{{ i.name }}={{ i.file }};{% endfor %}\n\n",
        );
        let out = OutputGenerator::render(
            &fs,
            &config(Some(TemplateSource::File(PathBuf::from("/tpl/custom.jinja")))),
            &sample_map(),
        )
        .unwrap();

        assert_eq!(
            out,
            "demo|DemoModelsUser=models/user.js;DemoUtilsHelpers=utils/helpers.js;\n"
        );
    }

    #[test]
    fn missing_template_file_names_the_path() {
        let fs = MockFileSystem::new();
        let err = OutputGenerator::render(
            &fs,
            &config(Some(TemplateSource::File(PathBuf::from("/tpl/gone.jinja")))),
            &sample_map(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("/tpl/gone.jinja"));
    }

    #[test]
    fn unknown_extension_without_template_fails() {
        let fs = MockFileSystem::new();
        let mut cfg = config(None);
        cfg.extension = "ts".into();
        let err = OutputGenerator::render(&fs, &cfg, &sample_map()).unwrap_err();
        assert!(err.to_string().contains("`ts`"));
    }

    #[test]
    fn emit_saves_to_indir_index_file() {
        let fs = MockFileSystem::new();
        OutputGenerator::emit(&fs, &config(None), "content\n").unwrap();
        assert_eq!(fs.get("/p/src/index.js").as_deref(), Some("content\n"));
    }

    #[test]
    fn preview_underlines_outfile() {
        assert_eq!(
            OutputGenerator::preview("/p/index.js", "x\n"),
            "/p/index.js\n-----------\nx\n\n"
        );
    }
}
