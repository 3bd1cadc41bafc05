//! TypeScript output target.

use crate::codegen::ir::{
    AccessorDoc, Contract, Facade, Implementation, Module, Param, Shape, Signature,
};
use crate::codegen::target::{NameRole, Target, GENERATED_NOTICE};
use crate::codegen::template::{Segment, Template};
use crate::codegen::writer::{quote, SourceWriter};
use crate::l10n::{float_literal, DefaultValue, VarType};

pub struct TypeScriptTarget;

/// Words that cannot name a binding in strict-mode module code.
const RESERVED: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let", "new",
    "null", "package", "private", "protected", "public", "return", "static", "super", "switch",
    "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

impl Target for TypeScriptTarget {
    fn name(&self) -> &'static str {
        "typescript"
    }

    fn is_reserved(&self, name: &str, role: NameRole) -> bool {
        match role {
            // Class members may use keywords, but `constructor` is taken
            NameRole::Accessor => name == "constructor",
            NameRole::Type | NameRole::Parameter => RESERVED.contains(&name),
        }
    }

    fn render(&self, module: &Module) -> String {
        let mut w = SourceWriter::new("  ");

        w.line(format!("// {}", GENERATED_NOTICE));
        w.blank();
        write_support(&mut w);
        w.blank();
        write_contract(&mut w, &module.contract);

        for implementation in &module.implementations {
            w.blank();
            write_implementation(&mut w, implementation, &module.contract.name);
        }

        w.blank();
        write_facade(&mut w, &module.facade);

        w.finish()
    }
}

fn type_name(var_type: VarType) -> &'static str {
    match var_type {
        VarType::String => "string",
        VarType::Int | VarType::Float => "number",
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
    w.line("export class UnsupportedLocaleError extends Error {");
    w.indent();
    w.line("constructor(locale: string) {");
    w.indent();
    w.line("super(`No ${locale} localization.`);");
    w.line("this.name = \"UnsupportedLocaleError\";");
    w.dedent();
    w.line("}");
    w.dedent();
    w.line("}");
}

/// Parameter list. Abstract declarations cannot carry initializers, so
/// defaulted parameters are marked optional there instead.
fn param_list(params: &[Param], declaration_only: bool) -> String {
    params
        .iter()
        .map(|p| match &p.default {
            None => format!("{}: {}", p.name, type_name(p.var_type)),
            Some(_) if declaration_only => format!("{}?: {}", p.name, type_name(p.var_type)),
            Some(value) => format!("{}: {} = {}", p.name, type_name(p.var_type), literal(value)),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn head(signature: &Signature, declaration_only: bool) -> String {
    match &signature.shape {
        Shape::Property => format!("get {}(): string", signature.name),
        Shape::Method(params) => format!(
            "{}({}): string",
            signature.name,
            param_list(params, declaration_only)
        ),
    }
}

fn jsdoc_escape(text: &str) -> String {
    text.replace("*/", "*\\/")
}

fn write_jsdoc(w: &mut SourceWriter, doc: &AccessorDoc) {
    w.line("/**");
    for line in doc.description.lines() {
        w.line(format!(" * {}", jsdoc_escape(line)).trim_end());
    }
    if let Some(example) = &doc.example {
        w.line(" *");
        let mut example_lines = example.lines().map(jsdoc_escape);
        let first = example_lines.next().unwrap_or_default();
        w.line(format!(" * @example {}", first).trim_end());
        for line in example_lines {
            w.line(format!(" * {}", line).trim_end());
        }
    }
    if !doc.variables.is_empty() {
        w.line(" *");
        for var in &doc.variables {
            w.line(match &var.default {
                None => format!(" * @param {} {}", var.name, type_name(var.var_type)),
                Some(value) => format!(
                    " * @param {} {}, default: {}",
                    var.name,
                    type_name(var.var_type),
                    jsdoc_escape(&value.to_string())
                ),
            });
        }
    }
    w.line(" */");
}

fn write_contract(w: &mut SourceWriter, contract: &Contract) {
    w.line(format!("export abstract class {} {{", contract.name));
    w.indent();
    for (i, accessor) in contract.accessors.iter().enumerate() {
        if i > 0 {
            w.blank();
        }
        write_jsdoc(w, &accessor.doc);
        w.line(format!("abstract {};", head(&accessor.signature, true)));
    }
    w.dedent();
    w.line("}");
}

/// Expression returning the accessor's text.
fn body_expr(body: &Template) -> String {
    if body.is_static() {
        return quote(&body.literal_text());
    }

    let mut out = String::from("`");
    for segment in body.segments() {
        match segment {
            Segment::Literal(text) => out.push_str(&template_escape(text)),
            Segment::Variable(name) => {
                out.push_str("${");
                out.push_str(name);
                out.push('}');
            }
        }
    }
    out.push('`');
    out
}

fn template_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() && c != '\n' && c != '\t' => {
                out.push_str(&format!("\\u{:04x}", c as u32))
            }
            c => out.push(c),
        }
    }
    out
}

fn write_implementation(w: &mut SourceWriter, implementation: &Implementation, contract: &str) {
    w.line(format!(
        "export class {} extends {} {{",
        implementation.name, contract
    ));
    w.indent();
    for (i, accessor) in implementation.accessors.iter().enumerate() {
        if i > 0 {
            w.blank();
        }
        if let Some(source) = &accessor.fallback_from {
            w.line(format!(
                "// Fallback: missing in '{}', using '{}'.",
                implementation.locale_code, source
            ));
        }
        w.line(format!("{} {{", head(&accessor.signature, false)));
        w.indent();
        w.line(format!("return {};", body_expr(&accessor.body)));
        w.dedent();
        w.line("}");
    }
    w.dedent();
    w.line("}");
}

fn write_facade(w: &mut SourceWriter, facade: &Facade) {
    let default = quote(&facade.default_locale);

    w.line(format!("export class {} {{", facade.name));
    w.indent();
    w.line("private readonly locale: string;");
    w.blank();

    w.line(format!("constructor(locale: string = {}) {{", default));
    w.indent();
    w.line("this.locale = locale;");
    w.dedent();
    w.line("}");
    w.blank();

    w.line("get defaultLocale(): string {");
    w.indent();
    w.line(format!("return {};", default));
    w.dedent();
    w.line("}");
    w.blank();

    w.line("get currentLocale(): string {");
    w.indent();
    w.line("return this.locale;");
    w.dedent();
    w.line("}");
    w.blank();

    let codes: Vec<String> = facade.locales.iter().map(|(code, _)| quote(code)).collect();
    w.line("get locales(): string[] {");
    w.indent();
    w.line(format!("return [{}];", codes.join(", ")));
    w.dedent();
    w.line("}");
    w.blank();

    w.line(format!("of(): {} {{", facade.contract_name));
    w.indent();
    w.line("switch (this.locale) {");
    w.indent();
    for (code, implementation) in &facade.locales {
        w.line(format!("case {}:", quote(code)));
        w.indent();
        w.line(format!("return new {}();", implementation));
        w.dedent();
    }
    w.line("default:");
    w.indent();
    w.line("throw new UnsupportedLocaleError(this.locale);");
    w.dedent();
    w.dedent();
    w.line("}");
    w.dedent();
    w.line("}");

    w.dedent();
    w.line("}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::CodeSynthesizer;
    use crate::l10n::{LocaleRegistry, TranslationParser};

    const EN: &str = r##"{
        "helloWorld": "Hello World",
        "bye": "Bye {value}",
        "#bye": {"variables": {"value": {"defaultValue": "World", "type": "string"}}}
    }"##;
    const RU: &str = r#"{"helloWorld": "Привет"}"#;

    fn render() -> String {
        let mut registry = LocaleRegistry::new();
        registry
            .register("en", TranslationParser::parse("en", EN).unwrap())
            .unwrap();
        registry
            .register("ru", TranslationParser::parse("ru", RU).unwrap())
            .unwrap();
        CodeSynthesizer::new("AppLocalization")
            .generate(&registry, "en", &TypeScriptTarget)
            .unwrap()
    }

    #[test]
    fn test_contract_declarations() {
        let out = render();
        assert!(out.starts_with("// NOTE: THIS IS AN AUTO-GENERATED FILE, DO NOT EDIT IT.\n"));
        assert!(out.contains("export abstract class BaseAppLocalization {"));
        assert!(out.contains("  abstract get helloWorld(): string;"));
        assert!(out.contains("  abstract bye(value?: string): string;"));
    }

    #[test]
    fn test_implementations() {
        let out = render();
        assert!(out.contains("export class AppLocalizationRu extends BaseAppLocalization {"));
        assert!(out.contains("  get helloWorld(): string {\n    return \"Привет\";\n  }"));
        assert_eq!(
            out.matches("  bye(value: string = \"World\"): string {\n    return `Bye ${value}`;\n  }")
                .count(),
            2
        );
    }

    #[test]
    fn test_facade() {
        let out = render();
        assert!(out.contains("constructor(locale: string = \"en\") {"));
        assert!(out.contains("return [\"en\", \"ru\"];"));
        assert!(out.contains("case \"ru\":\n        return new AppLocalizationRu();"));
        assert!(out.contains("throw new UnsupportedLocaleError(this.locale);"));
    }

    #[test]
    fn test_multiline_example_stays_in_comment() {
        let mut registry = LocaleRegistry::new();
        let raw = r##"{"steps": "Go", "#steps": {"example": "First\nSecond"}}"##;
        registry
            .register("en", TranslationParser::parse("en", raw).unwrap())
            .unwrap();
        let out = CodeSynthesizer::new("AppLocalization")
            .generate(&registry, "en", &TypeScriptTarget)
            .unwrap();
        assert!(out.contains("   * @example First\n   * Second\n   */\n"));
    }

    #[test]
    fn test_reserved_names() {
        assert!(TypeScriptTarget.is_reserved("constructor", NameRole::Accessor));
        assert!(!TypeScriptTarget.is_reserved("delete", NameRole::Accessor));
        assert!(TypeScriptTarget.is_reserved("delete", NameRole::Parameter));
        assert!(TypeScriptTarget.is_reserved("class", NameRole::Type));
        assert!(!TypeScriptTarget.is_reserved("value", NameRole::Parameter));
    }

    #[test]
    fn test_template_escape() {
        assert_eq!(template_escape("cost ${x} `q` \\"), "cost \\${x} \\`q\\` \\\\");
        assert_eq!(template_escape("$5"), "$5");
    }
}
