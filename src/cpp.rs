//! C++ backend: namespaced `.hpp` files with `using` aliases, `constexpr`
//! constants, constructors, and explicit per-structure encode/decode.
//!
//! Wire compatibility does not depend on in-memory layout here: every
//! structure gets four free functions (`encode`, `decode`, `encode_be`,
//! `decode_be`) that visit fields in declared order and delegate the
//! per-field byte work to the hand-written `codec.hpp` primitives
//! (`codec::encode_any` and friends). `codec.hpp` is shipped as a support
//! file next to the generated output.

use crate::model::{
    ArraySize, Entry, Field, Format, Module, Protocol, Reference, Scalar, Structure, Type, Value,
};
use crate::printer::{Backend, PrintError};

const TAB: &str = "    ";

/// Runtime support header required by the generated encode/decode functions.
pub const CODEC_HPP: &str = include_str!("../support/codec.hpp");

pub struct CppBackend;

impl Backend for CppBackend {
    fn name(&self) -> &'static str {
        "cpp"
    }

    fn extension(&self) -> &'static str {
        ".hpp"
    }

    fn module_text(&self, protocol: &Protocol, module: &Module) -> Result<String, PrintError> {
        let printer = CppTypePrinter { current_module: module.name() };
        let body = module
            .entries()
            .map(|(name, entry)| printer.entry_text(name, entry))
            .collect::<Result<Vec<_>, _>>()?
            .join("\n");
        let mut text = self.header(protocol, module);
        text.push_str(&format!("namespace {}\n{{\n", module.name()));
        text.push_str(&body);
        text.push_str("}\n");
        text.push_str("\n}\n");
        Ok(text)
    }

    fn support_files(&self) -> Vec<(&'static str, &'static str)> {
        vec![("codec.hpp", CODEC_HPP)]
    }
}

impl CppBackend {
    fn header(&self, protocol: &Protocol, module: &Module) -> String {
        let imports = module
            .imports()
            .iter()
            .map(|m| format!("#include \"{}\"", self.file_name(protocol, m)))
            .collect::<Vec<_>>()
            .join("\n");
        let mut header = String::from("#pragma once\n\n");
        header.push_str("#include <cstdint>\n");
        header.push_str("#include <array>\n");
        header.push_str("#include \"codec.hpp\"\n");
        header.push_str(&imports);
        header.push_str("\n\n");
        header.push_str(&format!("namespace {}\n{{\n", protocol.name()));
        header
    }
}

/// Renders a (type, value) pair as a C++ literal expression.
pub fn literal(ty: &Type, value: &Value) -> Result<String, PrintError> {
    match (ty, value) {
        (Type::Scalar { kind, format }, Value::Int(n)) => {
            Ok(scalar_literal(*kind, *format, *n))
        }
        (Type::Array { element, .. }, Value::List(items)) => {
            let parts = items
                .iter()
                .map(|v| literal(element, v))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(format!("{{{}}}", parts.join(", ")))
        }
        (Type::Pointer { .. }, _) => {
            Err(PrintError::UnsupportedLiteral { backend: "cpp", kind: "pointer" })
        }
        (Type::Reference(_), _) => {
            Err(PrintError::UnsupportedLiteral { backend: "cpp", kind: "reference" })
        }
        _ => Err(PrintError::UnsupportedLiteral { backend: "cpp", kind: "mismatched value" }),
    }
}

fn scalar_literal(kind: Scalar, format: Format, n: i64) -> String {
    let suffix = if kind.is_signed() { "" } else { "u" };
    match format {
        Format::Dec => format!("{}{}", n, suffix),
        Format::Hex => {
            let digits = (kind.bits() / 4) as usize;
            if n < 0 {
                let mask = (1u64 << kind.bits()) - 1;
                format!("0x{:0digits$x}{}", (n as u64) & mask, suffix, digits = digits)
            } else {
                format!("0x{:0digits$x}{}", n, suffix, digits = digits)
            }
        }
    }
}

/// Plain decimal rendering used for fixed-field default member initializers.
fn plain_value(value: &Value) -> String {
    match value {
        Value::Int(n) => n.to_string(),
        Value::List(items) => {
            let parts: Vec<_> = items.iter().map(plain_value).collect();
            format!("{{{}}}", parts.join(", "))
        }
    }
}

struct CppTypePrinter<'a> {
    current_module: &'a str,
}

impl CppTypePrinter<'_> {
    /// Qualified `Module::Name` for cross-module references, bare otherwise.
    fn reference(&self, r: &Reference) -> String {
        match &r.module {
            Some(module) if module != self.current_module => {
                format!("{}::{}", module, r.name)
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
            Type::Array { element, size, .. } => format!(
                "std::array<{}, {}>",
                self.type_name(element),
                self.array_size(size)
            ),
            Type::Pointer { element } => format!("{}*", self.type_name(element)),
            Type::Reference(r) => self.reference(r),
        }
    }

    fn field_text(&self, field: &Field) -> String {
        match &field.fixed {
            None => format!("{} {};\n", self.type_name(&field.ty), field.name),
            Some(value) => format!(
                "{} {} = {};\n",
                self.type_name(&field.ty),
                field.name,
                plain_value(value)
            ),
        }
    }

    /// Defaulted constructor plus, when any field lacks a fixed value, a
    /// field constructor taking exactly those fields in declared order.
    fn constructor_text(&self, name: &str, structure: &Structure) -> String {
        let mut text = format!("{}{}() = default;\n", TAB, name);
        let settable: Vec<&Field> =
            structure.fields().iter().filter(|f| f.fixed.is_none()).collect();
        if !settable.is_empty() {
            let arguments = settable
                .iter()
                .map(|f| format!("{} {}_", self.type_name(&f.ty), f.name))
                .collect::<Vec<_>>()
                .join(", ");
            let assignments = settable
                .iter()
                .map(|f| format!("{0}{{ {0}_ }}", f.name))
                .collect::<Vec<_>>()
                .join(", ");
            text.push_str(&format!(
                "{}{}({}) :\n{}{}{}\n",
                TAB, name, arguments, TAB, TAB, assignments
            ));
            text.push_str(&format!("{}{{}}\n", TAB));
        }
        text
    }

    /// The four free functions making wire order operationally explicit.
    fn coder_text(&self, name: &str, structure: &Structure) -> String {
        let mut text = String::new();
        for (signature, call) in [
            (
                format!("inline std::uint8_t* encode(const {}& data, std::uint8_t* buffer)", name),
                "codec::encode_any",
            ),
            (
                format!("inline const std::uint8_t* decode({}& data, const std::uint8_t* buffer)", name),
                "codec::decode_any",
            ),
            (
                format!("inline std::uint8_t* encode_be(const {}& data, std::uint8_t* buffer)", name),
                "codec::encode_any_be",
            ),
            (
                format!("inline const std::uint8_t* decode_be({}& data, const std::uint8_t* buffer)", name),
                "codec::decode_any_be",
            ),
        ] {
            text.push_str(&signature);
            text.push_str("\n{\n");
            for field in structure.fields() {
                text.push_str(&format!(
                    "{}buffer = {}(data.{}, buffer);\n",
                    TAB, call, field.name
                ));
            }
            text.push_str(&format!("{}return buffer;\n}}\n", TAB));
        }
        text
    }

    fn structure_text(&self, name: &str, structure: &Structure) -> String {
        let mut text = format!("struct {}\n{{\n", name);
        for field in structure.fields() {
            text.push_str(TAB);
            text.push_str(&self.field_text(field));
        }
        text.push('\n');
        text.push_str(&self.constructor_text(name, structure));
        // The packed attribute has no C++ spelling here; encode/decode make
        // in-memory layout irrelevant.
        text.push_str("} ;\n");
        text.push('\n');
        text.push_str(&self.coder_text(name, structure));
        text
    }

    fn entry_text(&self, name: &str, entry: &Entry) -> Result<String, PrintError> {
        match entry {
            Entry::Alias { ty } => {
                Ok(format!("using {} = {};\n", name, self.type_name(ty)))
            }
            Entry::Constant { ty, value } => Ok(format!(
                "constexpr {} {} = {};",
                self.type_name(ty),
                name,
                literal(ty, value)?
            )),
            Entry::Structure(s) => Ok(self.structure_text(name, s)),
            Entry::LineComment(text) => Ok(format!("// {}", text)),
            Entry::BlockComment(text) => Ok(format!("/* {} */", text)),
            Entry::Blank => Ok(String::new()),
        }
    }
}

fn scalar_name(kind: Scalar) -> &'static str {
    match kind {
        Scalar::PartByte => "codec::partbyte",
        Scalar::U8 => "std::uint8_t",
        Scalar::I8 => "std::int8_t",
        Scalar::U16 => "std::uint16_t",
        Scalar::I16 => "std::int16_t",
        Scalar::U32 => "std::uint32_t",
        Scalar::I32 => "std::int32_t",
    }
}
