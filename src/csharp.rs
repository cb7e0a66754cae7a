//! C# backend: one static wrapper class per module in `.cs` files, with
//! interop-friendly value types.
//!
//! Layout is enforced through framework marshaling metadata instead of
//! compiler packing or explicit coders: packed structures carry
//! `[StructLayout(LayoutKind.Sequential, Pack=1)]` and array fields carry a
//! fixed-size `[MarshalAs(UnmanagedType.ByValArray, SizeConst=N)]`
//! annotation. C# has no durable cross-file type alias, so aliases render as
//! single-field wrapper structs with an implicit conversion from the
//! underlying type. Modules share one namespace, so no per-import directive
//! is emitted.

use crate::model::{
    ArrayLayout, ArraySize, Attribute, Entry, Field, Format, Module, Protocol, Reference, Scalar,
    Structure, Type, Value,
};
use crate::printer::{Backend, PrintError};

const TAB: &str = "    ";

fn tab(n: usize) -> String {
    TAB.repeat(n)
}

pub struct CSharpBackend;

impl Backend for CSharpBackend {
    fn name(&self) -> &'static str {
        "csharp"
    }

    fn extension(&self) -> &'static str {
        ".cs"
    }

    fn module_text(&self, protocol: &Protocol, module: &Module) -> Result<String, PrintError> {
        let printer = CSharpTypePrinter { current_module: module.name() };
        let body = module
            .entries()
            .map(|(name, entry)| printer.entry_text(name, entry))
            .collect::<Result<Vec<_>, _>>()?
            .join("\n");
        let mut text = String::from("using System;\n");
        text.push_str("using System.Runtime.InteropServices;\n");
        text.push_str("\n\n");
        text.push_str(&format!("namespace {}\n{{\n", protocol.name()));
        text.push_str(&format!("internal static class {}\n{{", module.name()));
        text.push_str(&body);
        text.push_str("\n}");
        text.push_str("\n}\n");
        Ok(text)
    }
}

struct CSharpTypePrinter<'a> {
    current_module: &'a str,
}

/// Renders a (type, value) pair as a C# literal expression. `indent` is the
/// current nesting depth, used when an array carries the per-line layout
/// hint.
pub fn literal(ty: &Type, value: &Value, indent: usize) -> Result<String, PrintError> {
    // Aggregate literals name their type, so the printer that knows type
    // names does the real work; current-module context is irrelevant for
    // literal-capable types.
    CSharpTypePrinter { current_module: "" }.literal(ty, value, indent)
}

fn scalar_literal(kind: Scalar, format: Format, n: i64) -> String {
    let cast = scalar_name(kind);
    let suffix = if kind.is_signed() { "" } else { "u" };
    match format {
        Format::Dec => format!("({}){}{}", cast, n, suffix),
        Format::Hex => {
            let digits = (kind.bits() / 4) as usize;
            if n < 0 {
                let mask = (1u64 << kind.bits()) - 1;
                format!("({})0x{:0digits$x}{}", cast, (n as u64) & mask, suffix, digits = digits)
            } else {
                format!("({})0x{:0digits$x}{}", cast, n, suffix, digits = digits)
            }
        }
    }
}

/// Plain decimal rendering used for fixed-field constructor assignments.
fn plain_value(value: &Value) -> String {
    match value {
        Value::Int(n) => n.to_string(),
        Value::List(items) => {
            let parts: Vec<_> = items.iter().map(plain_value).collect();
            format!("{{{}}}", parts.join(", "))
        }
    }
}

impl CSharpTypePrinter<'_> {
    fn literal(&self, ty: &Type, value: &Value, indent: usize) -> Result<String, PrintError> {
        match (ty, value) {
            (Type::Scalar { kind, format }, Value::Int(n)) => {
                Ok(scalar_literal(*kind, *format, *n))
            }
            (Type::Array { element, layout, .. }, Value::List(items)) => {
                let parts = items
                    .iter()
                    .map(|v| self.literal(element, v, indent + 1))
                    .collect::<Result<Vec<_>, _>>()?;
                let aggregate = match layout {
                    ArrayLayout::Inline => format!("{{{}}}", parts.join(", ")),
                    ArrayLayout::PerLine => {
                        let lines = parts
                            .iter()
                            .map(|p| format!("\n{}{}", tab(indent + 1), p))
                            .collect::<Vec<_>>()
                            .join(",");
                        format!("{{{}\n{}}}", lines, tab(indent))
                    }
                };
                Ok(format!("new {} {}", self.type_name(ty), aggregate))
            }
            (Type::Pointer { .. }, _) => {
                Err(PrintError::UnsupportedLiteral { backend: "csharp", kind: "pointer" })
            }
            (Type::Reference(_), _) => {
                Err(PrintError::UnsupportedLiteral { backend: "csharp", kind: "reference" })
            }
            _ => Err(PrintError::UnsupportedLiteral {
                backend: "csharp",
                kind: "mismatched value",
            }),
        }
    }

    /// Qualified `Module.Name` for cross-module references, bare otherwise.
    fn reference(&self, r: &Reference) -> String {
        match &r.module {
            Some(module) if module != self.current_module => {
                format!("{}.{}", module, r.name)
            }
            _ => r.name.clone(),
        }
    }

    fn array_size(&self, size: &ArraySize) -> String {
        match size {
            ArraySize::Fixed(n) => n.to_string(),
            ArraySize::Named(r) => self.reference(r),
        }
    }

    fn type_name(&self, ty: &Type) -> String {
        match ty {
            Type::Scalar { kind, .. } => scalar_name(*kind).to_string(),
            // Fixed size lives in the MarshalAs annotation, not the type.
            Type::Array { element, .. } => format!("{}[]", self.type_name(element)),
            Type::Pointer { element } => format!("{}[]", self.type_name(element)),
            Type::Reference(r) => self.reference(r),
        }
    }

    /// Marshaling annotation line, only meaningful for array types.
    fn marshal_as(&self, ty: &Type, indent: usize) -> Option<String> {
        match ty {
            Type::Array { size, .. } => Some(format!(
                "{}[MarshalAs(UnmanagedType.ByValArray, SizeConst={})]\n",
                tab(indent),
                self.array_size(size)
            )),
            _ => None,
        }
    }

    /// Aliases become wrapper structs: C# type aliases are file-scoped, so a
    /// durable alias needs a real type with an implicit conversion.
    fn alias_text(&self, name: &str, ty: &Type) -> String {
        let underlying = self.type_name(ty);
        let mut text = format!("public struct {}\n{{\n", name);
        if let Some(marshal) = self.marshal_as(ty, 0) {
            text.push_str(&tab(1));
            text.push_str(&marshal);
        }
        text.push_str(&format!("{}public {} Value;\n", tab(1), underlying));
        text.push_str(&format!(
            "{}public static implicit operator {1}({2} v) => new {1}() {{ Value = v }};\n",
            tab(1),
            name,
            underlying
        ));
        text.push_str("}\n");
        text
    }

    fn constant_text(&self, name: &str, ty: &Type, value: &Value) -> Result<String, PrintError> {
        // Array constants cannot be `const` in C#.
        let modifier = if matches!(ty, Type::Array { .. }) { "static readonly" } else { "const" };
        Ok(format!(
            "public {} {} {} = {};",
            modifier,
            self.type_name(ty),
            name,
            self.literal(ty, value, 0)?
        ))
    }

    fn field_text(&self, field: &Field, indent: usize) -> String {
        let mut text = format!(
            "{}public {} {};\n",
            tab(indent),
            self.type_name(&field.ty),
            field.name
        );
        if let Some(marshal) = self.marshal_as(&field.ty, indent) {
            text = marshal + &text;
        }
        text
    }

    fn structure_text(&self, name: &str, structure: &Structure) -> String {
        let mut text = String::new();
        for attribute in &structure.attributes {
            match attribute {
                Attribute::Packed => {
                    text.push_str("[StructLayout(LayoutKind.Sequential, Pack=1)]\n");
                }
            }
        }
        text.push_str(&format!("public struct {}\n{{\n", name));
        for field in structure.fields() {
            text.push_str(&self.field_text(field, 1));
        }
        text.push('\n');
        // Constructor arguments are the fields without a fixed value, in
        // declared order; the body assigns every field.
        let arguments = structure
            .fields()
            .iter()
            .filter(|f| f.fixed.is_none())
            .map(|f| format!("{} {}_", self.type_name(&f.ty), f.name))
            .collect::<Vec<_>>()
            .join(", ");
        text.push_str(&format!("{}public {}({})\n", tab(1), name, arguments));
        text.push_str(&format!("{}{{\n", tab(1)));
        for field in structure.fields() {
            let assignment = match &field.fixed {
                None => format!("this.{0} = {0}_;", field.name),
                Some(value) => format!("this.{} = {};", field.name, plain_value(value)),
            };
            text.push_str(&format!("{}{}\n", tab(2), assignment));
        }
        text.push_str(&format!("{}}}\n", tab(1)));
        text.push_str("}\n");
        text
    }

    fn entry_text(&self, name: &str, entry: &Entry) -> Result<String, PrintError> {
        match entry {
            Entry::Alias { ty } => Ok(self.alias_text(name, ty)),
            Entry::Constant { ty, value } => self.constant_text(name, ty, value),
            Entry::Structure(s) => Ok(self.structure_text(name, s)),
            Entry::LineComment(text) => Ok(format!("// {}", text)),
            Entry::BlockComment(text) => Ok(format!("/* {} */", text)),
            Entry::Blank => Ok(String::new()),
        }
    }
}

fn scalar_name(kind: Scalar) -> &'static str {
    match kind {
        Scalar::PartByte => "byte",
        Scalar::U8 => "byte",
        Scalar::I8 => "sbyte",
        Scalar::U16 => "ushort",
        Scalar::I16 => "short",
        Scalar::U32 => "uint",
        Scalar::I32 => "int",
    }
}
