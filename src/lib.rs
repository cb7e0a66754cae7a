//! # protoprint — wire-format structure generator
//!
//! A schema-driven generator that turns an in-memory description of binary
//! wire-format structures (protocol headers, fixed-layout records) into
//! struct definitions, named constants and explicit byte-level encode/decode
//! routines, rendered identically in three target languages.
//!
//! ## Model
//!
//! Descriptors are built programmatically (no textual schema language):
//! scalar types (`partbyte`, `uint8`..`int32`, each with a dec/hex display
//! format), arrays, pointers and deferred named references; fields,
//! structures, constants, type aliases and comments, grouped into ordered
//! modules inside a [`model::Protocol`]. Insertion order is on-wire order
//! and emitted declaration order; duplicate names are rejected at insert
//! time.
//!
//! ## Backends
//!
//! - [`c::CBackend`] — `.h` headers: typedefs, `#define` constants, `PACKED`
//!   aggregate types, flattened `Module_Name` identifiers.
//! - [`cpp::CppBackend`] — `.hpp` headers: namespaces, `using` aliases,
//!   `constexpr` constants, generated constructors, and four free
//!   `encode`/`decode`(`_be`) functions per structure delegating to the
//!   hand-written `codec.hpp` shipped next to the output.
//! - [`csharp::CSharpBackend`] — `.cs` files: a static class per module,
//!   sequential 1-byte-packed value types with array marshaling metadata,
//!   wrapper-struct aliases.
//!
//! ## Usage
//!
//! ```no_run
//! use protoprint::{c::CBackend, ethernet, printer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let protocol = ethernet::ethernet_protocol()?;
//! printer::write_protocol(&CBackend, &protocol, "out/c".as_ref())?;
//! # Ok(())
//! # }
//! ```
//!
//! The `print_protocols` binary writes all three output trees at once.

pub mod c;
pub mod cpp;
pub mod csharp;
pub mod ethernet;
pub mod model;
pub mod printer;

pub use c::CBackend;
pub use cpp::CppBackend;
pub use csharp::CSharpBackend;
pub use model::{
    ArrayLayout, ArraySize, Attribute, Entry, Field, Format, ModelError, Module, Protocol,
    Reference, Scalar, Structure, Type, Value,
};
pub use printer::{print_protocol, write_protocol, Backend, PrintError};
