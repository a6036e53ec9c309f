//! Rust source rendering of the fetched services and schemas
//!
//! One function per data shape. Every string-keyed map is a `BTreeMap`, so
//! iteration is already sorted and the output is byte-for-byte reproducible.

use taskcluster_cli_common::{ApiEntry, SchemaSet, ServiceMap, ServiceReference};

const INDENT: &str = "    ";

/// Line-oriented buffer with indentation tracking
struct SourceWriter {
    buf: String,
    depth: usize,
}

impl SourceWriter {
    fn new() -> Self {
        Self {
            buf: String::new(),
            depth: 0,
        }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.buf.push_str(INDENT);
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    fn open(&mut self, text: &str) {
        self.line(text);
        self.depth += 1;
    }

    fn close(&mut self, text: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
    }

    fn field(&mut self, name: &str, value: &str) {
        self.line(&format!("{}: {},", name, value));
    }

    fn finish(self) -> String {
        self.buf
    }
}

/// Rust string literal for `s`
fn str_literal(s: &str) -> String {
    format!("{:?}", s)
}

fn option_literal(value: &Option<String>) -> String {
    match value.as_deref() {
        Some(url) if !url.is_empty() => format!("Some({})", str_literal(url)),
        _ => "None".to_string(),
    }
}

fn slice_literal(values: &[String]) -> String {
    let items: Vec<String> = values.iter().map(|v| str_literal(v)).collect();
    format!("&[{}]", items.join(", "))
}

/// `pub static <var>: &[(&str, Service)] = &[...];`
pub fn emit_services(var: &str, services: &ServiceMap) -> String {
    let mut w = SourceWriter::new();
    if services.is_empty() {
        w.line(&format!("pub static {}: &[(&str, Service)] = &[];", var));
        return w.finish();
    }

    w.open(&format!("pub static {}: &[(&str, Service)] = &[", var));
    for (name, service) in services {
        w.open("(");
        w.line(&format!("{},", str_literal(name)));
        write_service(&mut w, service);
        w.close("),");
    }
    w.close("];");
    w.finish()
}

fn write_service(w: &mut SourceWriter, service: &ServiceReference) {
    w.open("Service {");
    w.field("title", &str_literal(&service.title));
    w.field("description", &str_literal(&service.description));
    w.field("base_url", &str_literal(&service.base_url));
    if service.entries.is_empty() {
        w.field("entries", "&[]");
    } else {
        w.open("entries: &[");
        for entry in &service.entries {
            write_entry(w, entry);
        }
        w.close("],");
    }
    w.close("},");
}

fn write_entry(w: &mut SourceWriter, entry: &ApiEntry) {
    w.open("Entry {");
    w.field("entry_type", &str_literal(&entry.entry_type));
    w.field("method", &str_literal(&entry.method));
    w.field("route", &str_literal(&entry.route));
    w.field("args", &slice_literal(&entry.args));
    w.field("query", &slice_literal(&entry.query));
    w.field("name", &str_literal(&entry.name));
    w.field("stability", &str_literal(&entry.stability));
    w.field("input", &option_literal(&entry.input));
    w.field("output", &option_literal(&entry.output));
    w.field("title", &str_literal(&entry.title));
    w.field("description", &str_literal(&entry.description));
    w.close("},");
}

/// `pub static <var>: &[(&str, &str)] = &[...];`
pub fn emit_schemas(var: &str, schemas: &SchemaSet) -> String {
    let mut w = SourceWriter::new();
    if schemas.is_empty() {
        w.line(&format!("pub static {}: &[(&str, &str)] = &[];", var));
        return w.finish();
    }

    w.open(&format!("pub static {}: &[(&str, &str)] = &[", var));
    for (url, schema) in schemas {
        w.open("(");
        w.line(&format!("{},", str_literal(url)));
        w.line(&format!("{},", str_literal(schema)));
        w.close("),");
    }
    w.close("];");
    w.finish()
}

/// Strict and reserved keywords, across editions
const KEYWORDS: &[&str] = &[
    "Self", "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if",
    "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv",
    "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Path segments allowed at the start of a module path
const PATH_ROOTS: &[&str] = &["crate", "self", "super"];

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    name != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Whether `name` can be used as the name of a generated static
pub fn is_valid_binding(name: &str) -> bool {
    is_identifier(name) && KEYWORDS.binary_search(&name).is_err()
}

/// Whether `path` is a module path usable in the generated `use` line
///
/// `crate`, `self` and `super` are only accepted as leading segments, and
/// `super` may repeat.
pub fn is_valid_module_path(path: &str) -> bool {
    let mut leading = true;
    let mut previous = "";
    for segment in path.split("::") {
        let root = leading
            && PATH_ROOTS.contains(&segment)
            && (previous.is_empty() || (previous == "super" && segment == "super"));
        if root {
            previous = segment;
            continue;
        }
        if !is_valid_binding(segment) {
            return false;
        }
        leading = false;
        previous = segment;
    }
    !leading
}
