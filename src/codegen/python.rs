//! Python output target.
//!
//! The contract is an `abc.ABC` subclass; entries without variables become
//! `@property` accessors and the rest become methods returning f-strings, so
//! interpolation happens on every call.

use crate::codegen::ir::{
    AbstractAccessor, AccessorDoc, ConcreteAccessor, Contract, Facade, Implementation, Module,
    Param, Shape, Signature,
};
use crate::codegen::target::{NameRole, Target, GENERATED_NOTICE};
use crate::codegen::template::{Segment, Template};
use crate::codegen::writer::{escape_string, quote, SourceWriter};
use crate::l10n::{float_literal, DefaultValue, VarType};

pub struct PythonTarget;

const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

impl Target for PythonTarget {
    fn name(&self) -> &'static str {
        "python"
    }

    fn is_reserved(&self, name: &str, role: NameRole) -> bool {
        KEYWORDS.contains(&name) || (role == NameRole::Parameter && name == "self")
    }

    fn render(&self, module: &Module) -> String {
        let mut w = SourceWriter::new("    ");

        w.line(format!("# {}", GENERATED_NOTICE));
        w.blank();
        w.line("import abc");
        w.blank();
        w.blank();
        write_support(&mut w);

        w.blank();
        w.blank();
        write_contract(&mut w, &module.contract);

        for implementation in &module.implementations {
            w.blank();
            w.blank();
            write_implementation(&mut w, implementation, &module.contract.name);
        }

        w.blank();
        w.blank();
        write_facade(&mut w, &module.facade);

        w.finish()
    }
}

fn type_name(var_type: VarType) -> &'static str {
    match var_type {
        VarType::String => "str",
        VarType::Int => "int",
        VarType::Float => "float",
    }
}

fn literal(value: &DefaultValue) -> String {
    match value {
        DefaultValue::String(s) => quote(s),
        DefaultValue::Int(i) => i.to_string(),
        DefaultValue::Float(f) => float_literal(*f),
    }
}

fn write_support(w: &mut SourceWriter) {
    w.line("class UnsupportedLocaleError(ValueError):");
    w.indent();
    w.line("\"\"\"Raised when no implementation exists for the requested locale.\"\"\"");
    w.dedent();
}

fn param_list(params: &[Param]) -> String {
    params
        .iter()
        .map(|p| match &p.default {
            None => format!(", {}: {}", p.name, type_name(p.var_type)),
            Some(value) => format!(", {}: {} = {}", p.name, type_name(p.var_type), literal(value)),
        })
        .collect()
}

fn write_def(w: &mut SourceWriter, signature: &Signature, abstract_method: bool) {
    if signature.shape == Shape::Property {
        w.line("@property");
    }
    if abstract_method {
        w.line("@abc.abstractmethod");
    }
    w.line(format!(
        "def {}(self{}) -> str:",
        signature.name,
        param_list(signature.shape.params())
    ));
}

fn docstring_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

fn write_docstring(w: &mut SourceWriter, doc: &AccessorDoc) {
    if doc.example.is_none() && doc.variables.is_empty() && !doc.description.contains('\n') {
        w.line(format!("\"\"\"{}\"\"\"", docstring_escape(&doc.description)));
        return;
    }

    let mut lines: Vec<String> = doc
        .description
        .lines()
        .map(docstring_escape)
        .collect();

    if let Some(example) = &doc.example {
        lines.push(String::new());
        let mut example_lines = example.lines().map(docstring_escape);
        let first = example_lines.next().unwrap_or_default();
        lines.push(format!("Example: {}", first));
        lines.extend(example_lines);
    }

    if !doc.variables.is_empty() {
        lines.push(String::new());
        lines.push("Args:".to_string());
        for var in &doc.variables {
            lines.push(match &var.default {
                None => format!("    {} ({})", var.name, type_name(var.var_type)),
                Some(value) => format!(
                    "    {} ({}): Default value: {}.",
                    var.name,
                    type_name(var.var_type),
                    docstring_escape(&value.to_string())
                ),
            });
        }
    }

    w.line(format!("\"\"\"{}", lines.first().map(String::as_str).unwrap_or("")));
    for line in lines.iter().skip(1) {
        if line.is_empty() {
            w.blank();
        } else {
            w.line(line);
        }
    }
    w.line("\"\"\"");
}

fn write_contract(w: &mut SourceWriter, contract: &Contract) {
    w.line(format!("class {}(abc.ABC):", contract.name));
    w.indent();
    if contract.accessors.is_empty() {
        w.line("pass");
    }
    for (i, AbstractAccessor { signature, doc }) in contract.accessors.iter().enumerate() {
        if i > 0 {
            w.blank();
        }
        write_def(w, signature, true);
        w.indent();
        write_docstring(w, doc);
        w.dedent();
    }
    w.dedent();
}

/// Expression returning the accessor's text.
fn body_expr(body: &Template) -> String {
    if body.is_static() {
        return quote(&body.literal_text());
    }

    let mut out = String::from("f\"");
    for segment in body.segments() {
        match segment {
            Segment::Literal(text) => {
                out.push_str(&escape_string(text).replace('{', "{{").replace('}', "}}"))
            }
            Segment::Variable(name) => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
    }
    out.push('"');
    out
}

fn write_implementation(w: &mut SourceWriter, implementation: &Implementation, contract: &str) {
    w.line(format!("class {}({}):", implementation.name, contract));
    w.indent();
    if implementation.accessors.is_empty() {
        w.line("pass");
    }
    for (i, ConcreteAccessor { signature, body, fallback_from }) in
        implementation.accessors.iter().enumerate()
    {
        if i > 0 {
            w.blank();
        }
        if let Some(source) = fallback_from {
            w.line(format!(
                "# Fallback: missing in '{}', using '{}'.",
                implementation.locale_code, source
            ));
        }
        write_def(w, signature, false);
        w.indent();
        w.line(format!("return {}", body_expr(body)));
        w.dedent();
    }
    w.dedent();
}

fn write_facade(w: &mut SourceWriter, facade: &Facade) {
    let default = quote(&facade.default_locale);

    w.line(format!("class {}:", facade.name));
    w.indent();

    w.line(format!("def __init__(self, locale: str = {}):", default));
    w.indent();
    w.line("self.__locale = locale");
    w.dedent();
    w.blank();

    w.line("@property");
    w.line("def default_locale(self) -> str:");
    w.indent();
    w.line(format!("return {}", default));
    w.dedent();
    w.blank();

    w.line("@property");
    w.line("def current_locale(self) -> str:");
    w.indent();
    w.line("return self.__locale");
    w.dedent();
    w.blank();

    w.line("@property");
    w.line("def locales(self) -> list[str]:");
    w.indent();
    if facade.locales.is_empty() {
        w.line("return []");
    } else {
        w.line("return [");
        w.indent();
        for (code, _) in &facade.locales {
            w.line(format!("{},", quote(code)));
        }
        w.dedent();
        w.line("]");
    }
    w.dedent();
    w.blank();

    w.line(format!("def of(self) -> {}:", facade.contract_name));
    w.indent();
    for (code, implementation) in &facade.locales {
        w.line(format!("if self.__locale == {}:", quote(code)));
        w.indent();
        w.line(format!("return {}()", implementation));
        w.dedent();
    }
    w.line("raise UnsupportedLocaleError(f\"No {self.__locale} localization.\")");
    w.dedent();

    w.dedent();
}
