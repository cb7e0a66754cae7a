//! C backend: header-guarded `.h` files with typedefs, `#define` constants
//! and `PACKED` struct declarations.
//!
//! C has no namespaces, so every declared name is flattened to
//! `Module_Name`; references with a stated module flatten the same way
//! (same-module references included, since the declaration itself carries
//! the prefix). Wire compatibility relies on the `PACKED` attribute macro,
//! with a GCC-style fallback definition emitted in every header.

use crate::model::{
    ArraySize, Attribute, Entry, Field, Format, Module, Protocol, Reference, Scalar, Structure,
    Type, Value,
};
use crate::printer::{Backend, PrintError};

const TAB: &str = "    ";

pub struct CBackend;

impl Backend for CBackend {
    fn name(&self) -> &'static str {
        "c"
    }

    fn extension(&self) -> &'static str {
        ".h"
    }

    fn module_text(&self, protocol: &Protocol, module: &Module) -> Result<String, PrintError> {
        let printer = CTypePrinter { current_module: module.name() };
        let body = module
            .entries()
            .map(|(name, entry)| printer.entry_text(name, entry))
            .collect::<Result<Vec<_>, _>>()?
            .join("\n");
        Ok(format!("{}{}", self.header(protocol, module), body))
    }
}

impl CBackend {
    fn header(&self, protocol: &Protocol, module: &Module) -> String {
        let imports = module
            .imports()
            .iter()
            .map(|m| format!("#include \"{}\"", self.file_name(protocol, m)))
            .collect::<Vec<_>>()
            .join("\n");
        let mut header = String::from("#pragma once\n\n");
        header.push_str("#include <stdint.h>\n");
        header.push_str("#include <stddef.h>\n");
        header.push_str(&imports);
        header.push('\n');
        header.push_str("#ifndef PACKED\n");
        header.push_str("#define PACKED __attribute__ ((__packed__))\n");
        header.push_str("#endif\n\n");
        header
    }
}

/// Renders a (type, value) pair as a C literal expression. Exhaustive over
/// the scalar kinds; pointer and reference values have no literal form.
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
            Err(PrintError::UnsupportedLiteral { backend: "c", kind: "pointer" })
        }
        (Type::Reference(_), _) => {
            Err(PrintError::UnsupportedLiteral { backend: "c", kind: "reference" })
        }
        _ => Err(PrintError::UnsupportedLiteral { backend: "c", kind: "mismatched value" }),
    }
}

fn scalar_literal(kind: Scalar, format: Format, n: i64) -> String {
    let suffix = if kind.is_signed() { "" } else { "u" };
    match format {
        Format::Dec => format!("{}{}", n, suffix),
        Format::Hex => format!("0x{}{}", hex_body(kind, n), suffix),
    }
}

/// Zero-padded hex digits matching the scalar's bit width (2/4/8 digits).
/// Negative values render as their two's-complement bit pattern.
fn hex_body(kind: Scalar, n: i64) -> String {
    let digits = (kind.bits() / 4) as usize;
    if n < 0 {
        let mask = (1u64 << kind.bits()) - 1;
        format!("{:0digits$x}", (n as u64) & mask, digits = digits)
    } else {
        format!("{:0digits$x}", n, digits = digits)
    }
}

/// Plain decimal rendering used by the `Must be:` field annotations.
fn plain_value(value: &Value) -> String {
    match value {
        Value::Int(n) => n.to_string(),
        Value::List(items) => {
            let parts: Vec<_> = items.iter().map(plain_value).collect();
            format!("{{{}}}", parts.join(", "))
        }
    }
}

struct CTypePrinter<'a> {
    current_module: &'a str,
}

impl CTypePrinter<'_> {
    /// Name the current module declares `name` under.
    fn scoped(&self, name: &str) -> String {
        format!("{}_{}", self.current_module, name)
    }

    /// Flattened `Module_Name` when a module is stated, bare name otherwise.
    fn reference(&self, r: &Reference) -> String {
        match &r.module {
            Some(module) => format!("{}_{}", module, r.name),
            None => r.name.clone(),
        }
    }

    fn array_size(&self, size: &ArraySize) -> String {
        match size {
            ArraySize::Fixed(n) => n.to_string(),
            ArraySize::Named(r) => self.reference(r),
        }
    }

    /// Type text in expression position (casts, non-declarator uses).
    fn type_name(&self, ty: &Type) -> String {
        match ty {
            Type::Scalar { kind, .. } => scalar_name(*kind).to_string(),
            Type::Array { element, size, .. } => {
                format!("{}[{}]", self.type_name(element), self.array_size(size))
            }
            Type::Pointer { element } => format!("{}*", self.type_name(element)),
            Type::Reference(r) => self.reference(r),
        }
    }

    /// C declarator: arrays wrap the name (`uint8_t name[6]`), everything
    /// else is `type name`.
    fn declarator(&self, ty: &Type, name: &str) -> String {
        match ty {
            Type::Array { element, size, .. } => format!(
                "{} {}[{}]",
                self.type_name(element),
                name,
                self.array_size(size)
            ),
            _ => format!("{} {}", self.type_name(ty), name),
        }
    }

    fn field_text(&self, field: &Field) -> String {
        let mut line = format!("{};", self.declarator(&field.ty, &field.name));
        if let Some(value) = &field.fixed {
            line.push_str(&format!("// Must be: {}", plain_value(value)));
        }
        line.push('\n');
        line
    }

    fn structure_text(&self, name: &str, structure: &Structure) -> String {
        let attributes = structure
            .attributes
            .iter()
            .map(|a| match a {
                Attribute::Packed => "PACKED",
            })
            .collect::<Vec<_>>()
            .join(" ");
        let mut text = format!("typedef struct {}\n{{\n", attributes);
        for field in structure.fields() {
            text.push_str(TAB);
            text.push_str(&self.field_text(field));
        }
        text.push_str(&format!("}} {};\n", self.scoped(name)));
        text
    }

    fn alias_text(&self, name: &str, ty: &Type) -> String {
        format!("typedef {};\n", self.declarator(ty, &self.scoped(name)))
    }

    fn constant_text(&self, name: &str, ty: &Type, value: &Value) -> Result<String, PrintError> {
        // Aggregates cannot be cast in a macro; scalars carry the type cast.
        if matches!(ty, Type::Array { .. }) {
            Ok(format!("#define {} {}", self.scoped(name), literal(ty, value)?))
        } else {
            Ok(format!(
                "#define {} ({}){}",
                self.scoped(name),
                self.type_name(ty),
                literal(ty, value)?
            ))
        }
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
        Scalar::PartByte => "uint8_t",
        Scalar::U8 => "uint8_t",
        Scalar::I8 => "int8_t",
        Scalar::U16 => "uint16_t",
        Scalar::I16 => "int16_t",
        Scalar::U32 => "uint32_t",
        Scalar::I32 => "int32_t",
    }
}
