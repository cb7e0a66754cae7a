//! Descriptor model for binary wire-format structures.
//!
//! Protocols are built programmatically (no textual schema): scalar types,
//! arrays, pointers, named references, fields, structures, constants and
//! aliases, grouped into ordered modules. Everything is constructed once
//! before rendering and traversed read-only by the backends.
//!
//! Insertion order is significant throughout: field order within a
//! [`Structure`] is on-wire order, and entry order within a [`Module`] is
//! emitted declaration order.

/// How a scalar literal is rendered. Affects literal text only, never layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Dec,
    Hex,
}

/// Closed set of scalar wire types.
///
/// `PartByte` is one byte of a multi-byte big integer (e.g. a MAC address
/// octet); arrays of it are byte-reversed by the big-endian C++ codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    PartByte,
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
}

impl Scalar {
    /// Bit width of the scalar on the wire.
    pub fn bits(self) -> u32 {
        match self {
            Scalar::PartByte | Scalar::U8 | Scalar::I8 => 8,
            Scalar::U16 | Scalar::I16 => 16,
            Scalar::U32 | Scalar::I32 => 32,
        }
    }

    pub fn is_signed(self) -> bool {
        matches!(self, Scalar::I8 | Scalar::I16 | Scalar::I32)
    }
}

/// Layout hint for rendered array literals. `PerLine` puts one element per
/// line where the backend supports it (C# aggregate initializers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayLayout {
    Inline,
    PerLine,
}

/// An unresolved, name-based link to an object declared elsewhere, possibly
/// in another module. Resolved only by textual match at render time; the
/// model never confirms the referent exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub name: String,
    pub module: Option<String>,
}

impl Reference {
    /// Reference to a name in the current module (renders bare).
    pub fn local(name: impl Into<String>) -> Self {
        Reference { name: name.into(), module: None }
    }

    /// Reference to a name declared in `module`.
    pub fn to(name: impl Into<String>, module: impl Into<String>) -> Self {
        Reference { name: name.into(), module: Some(module.into()) }
    }
}

/// Array element count: a literal, or a named constant.
#[derive(Debug, Clone, PartialEq)]
pub enum ArraySize {
    Fixed(u64),
    Named(Reference),
}

/// Closed set of type descriptors.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Scalar { kind: Scalar, format: Format },
    Array { element: Box<Type>, size: ArraySize, layout: ArrayLayout },
    Pointer { element: Box<Type> },
    Reference(Reference),
}

impl Type {
    pub fn partbyte() -> Self {
        Type::Scalar { kind: Scalar::PartByte, format: Format::Dec }
    }

    pub fn uint8(format: Format) -> Self {
        Type::Scalar { kind: Scalar::U8, format }
    }

    pub fn int8(format: Format) -> Self {
        Type::Scalar { kind: Scalar::I8, format }
    }

    pub fn uint16(format: Format) -> Self {
        Type::Scalar { kind: Scalar::U16, format }
    }

    pub fn int16(format: Format) -> Self {
        Type::Scalar { kind: Scalar::I16, format }
    }

    pub fn uint32(format: Format) -> Self {
        Type::Scalar { kind: Scalar::U32, format }
    }

    pub fn int32(format: Format) -> Self {
        Type::Scalar { kind: Scalar::I32, format }
    }

    /// Fixed-size array with the default inline literal layout.
    pub fn array(element: Type, size: u64) -> Self {
        Type::Array {
            element: Box::new(element),
            size: ArraySize::Fixed(size),
            layout: ArrayLayout::Inline,
        }
    }

    pub fn pointer(element: Type) -> Self {
        Type::Pointer { element: Box::new(element) }
    }

    pub fn reference(r: Reference) -> Self {
        Type::Reference(r)
    }
}

/// A literal value attached to a constant or a fixed field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    List(Vec<Value>),
}

/// A named, typed structure member. A fixed value excludes the field from
/// generated constructors; it is assigned from the literal instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: Type,
    pub fixed: Option<Value>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Field { name: name.into(), ty, fixed: None }
    }

    pub fn fixed(name: impl Into<String>, ty: Type, value: Value) -> Self {
        Field { name: name.into(), ty, fixed: Some(value) }
    }
}

/// Structure-level attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    /// No implicit padding between fields: in-memory layout matches wire layout.
    Packed,
}

/// An ordered collection of named fields representing one fixed-layout wire
/// record. Field order is on-wire order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Structure {
    pub attributes: Vec<Attribute>,
    fields: Vec<Field>,
}

impl Structure {
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Structure { attributes, fields: Vec::new() }
    }

    /// Build a structure from an ordered field list. Duplicate field names
    /// are rejected.
    pub fn with_fields(
        attributes: Vec<Attribute>,
        fields: Vec<Field>,
    ) -> Result<Self, ModelError> {
        let mut s = Structure::new(attributes);
        for f in fields {
            s.push_field(f)?;
        }
        Ok(s)
    }

    /// Append a field, preserving insertion order.
    pub fn push_field(&mut self, field: Field) -> Result<(), ModelError> {
        if self.fields.iter().any(|f| f.name == field.name) {
            return Err(ModelError::DuplicateField { name: field.name });
        }
        self.fields.push(field);
        Ok(())
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

/// Closed set of module entries. The entry's name lives in the module's
/// ordered (name, entry) sequence, not in the entry itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// A named alias for an underlying type.
    Alias { ty: Type },
    /// A compile-time named value.
    Constant { ty: Type, value: Value },
    Structure(Structure),
    /// Formatting markers with no semantic payload.
    LineComment(String),
    BlockComment(String),
    Blank,
}

impl Entry {
    pub fn constant(ty: Type, value: i64) -> Self {
        Entry::Constant { ty, value: Value::Int(value) }
    }

    pub fn alias(ty: Type) -> Self {
        Entry::Alias { ty }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("duplicate entry `{name}` in module `{module}`")]
    DuplicateEntry { module: String, name: String },
    #[error("empty entry name in module `{module}` (use insert_anonymous)")]
    EmptyName { module: String },
    #[error("duplicate field `{name}` in structure")]
    DuplicateField { name: String },
}

/// A named, ordered sequence of (name, entry) declarations plus the list of
/// modules it imports.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    name: String,
    entries: Vec<(String, Entry)>,
    imports: Vec<String>,
    anonymous_counter: u32,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Module {
            name: name.into(),
            entries: Vec::new(),
            imports: Vec::new(),
            anonymous_counter: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert a named entry at the end of the declaration order. Duplicate
    /// and empty names are rejected; anonymous entries go through
    /// [`Module::insert_anonymous`].
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        entry: Entry,
    ) -> Result<(), ModelError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ModelError::EmptyName { module: self.name.clone() });
        }
        if self.entries.iter().any(|(n, _)| *n == name) {
            return Err(ModelError::DuplicateEntry { module: self.name.clone(), name });
        }
        self.entries.push((name, entry));
        Ok(())
    }

    /// Insert an entry under a generated `__internal__<N>` name (used for
    /// comments and blank lines that need no external identity). Returns the
    /// generated name; N increases monotonically per module.
    pub fn insert_anonymous(&mut self, entry: Entry) -> String {
        self.anonymous_counter += 1;
        let name = format!("__internal__{}", self.anonymous_counter);
        self.entries.push((name.clone(), entry));
        name
    }

    /// Record an import of another module, in declaration order. Backends
    /// emit one include/using directive per import where the target language
    /// has file-level imports.
    pub fn add_import(&mut self, module: &Module) {
        self.imports.push(module.name.clone());
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(n, e)| (n.as_str(), e))
    }

    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, e)| e)
    }
}

/// A named, ordered collection of modules: the unit handed to a backend for
/// full generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Protocol {
    name: String,
    modules: Vec<Module>,
}

impl Protocol {
    pub fn new(name: impl Into<String>, modules: Vec<Module>) -> Self {
        Protocol { name: name.into(), modules }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_module(&mut self, module: Module) {
        self.modules.push(module);
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_names_are_distinct_and_ordered() {
        let mut m = Module::new("M");
        let a = m.insert_anonymous(Entry::Blank);
        let b = m.insert_anonymous(Entry::LineComment("x".to_string()));
        assert_eq!(a, "__internal__1");
        assert_eq!(b, "__internal__2");
        let names: Vec<_> = m.entries().map(|(n, _)| n.to_string()).collect();
        assert_eq!(names, vec!["__internal__1", "__internal__2"]);
    }

    #[test]
    fn duplicate_entry_is_rejected() {
        let mut m = Module::new("M");
        m.insert("x", Entry::constant(Type::uint8(Format::Dec), 1)).expect("first");
        let err = m.insert("x", Entry::constant(Type::uint8(Format::Dec), 2));
        assert!(matches!(err, Err(ModelError::DuplicateEntry { .. })));
        // The original entry survives untouched.
        assert_eq!(
            m.get("x"),
            Some(&Entry::constant(Type::uint8(Format::Dec), 1))
        );
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut m = Module::new("M");
        assert!(matches!(
            m.insert("", Entry::Blank),
            Err(ModelError::EmptyName { .. })
        ));
    }

    #[test]
    fn duplicate_field_is_rejected() {
        let err = Structure::with_fields(
            vec![],
            vec![
                Field::new("a", Type::uint8(Format::Dec)),
                Field::new("a", Type::uint16(Format::Dec)),
            ],
        );
        assert!(matches!(err, Err(ModelError::DuplicateField { .. })));
    }
}
