//! Backend contract and printer driver.
//!
//! A [`Backend`] turns one module into its full generated file text; the
//! driver iterates a protocol's modules in declaration order and emits each
//! rendering to a stream or to one file per module. Renderings are
//! independent: a write failure aborts the run where it happened, but files
//! already written stay on disk.

use crate::model::{Module, Protocol};
use std::fs;
use std::io::Write;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum PrintError {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    /// A (type, value) pair with no literal form in the target grammar, or a
    /// value whose shape does not match its type. Always a generator defect
    /// to fix, never a data condition to tolerate.
    #[error("{backend}: no literal form for {kind}")]
    UnsupportedLiteral { backend: &'static str, kind: &'static str },
}

/// One target-language renderer. Implementations map every descriptor kind
/// to target text; optional renderings (attributes a language does not
/// express, marshaling hints that only apply to arrays) resolve to an
/// explicit empty result inside `module_text`, never to a silent skip of a
/// whole kind.
pub trait Backend {
    /// Short tag used in error messages.
    fn name(&self) -> &'static str;

    /// Generated file extension, including the dot.
    fn extension(&self) -> &'static str;

    /// Full file text for one module: header boilerplate (fixed includes
    /// plus one import directive per declared import, where the language has
    /// file-level imports), entries in declaration order, footer.
    fn module_text(&self, protocol: &Protocol, module: &Module) -> Result<String, PrintError>;

    /// Hand-written support files copied verbatim next to the generated
    /// output. Empty for most backends.
    fn support_files(&self) -> Vec<(&'static str, &'static str)> {
        Vec::new()
    }

    fn file_name(&self, protocol: &Protocol, module_name: &str) -> String {
        format!("{}_{}{}", protocol.name(), module_name, self.extension())
    }
}

/// Render every module of `protocol` into `out_dir`, one file per module,
/// then copy the backend's support files. The directory is created if
/// missing; pre-existing is not an error. No rollback: a failure leaves
/// earlier files in place.
pub fn write_protocol(
    backend: &dyn Backend,
    protocol: &Protocol,
    out_dir: &Path,
) -> Result<(), PrintError> {
    fs::create_dir_all(out_dir)?;
    for module in protocol.modules() {
        let text = backend.module_text(protocol, module)?;
        let path = out_dir.join(backend.file_name(protocol, module.name()));
        fs::write(path, text)?;
    }
    for (name, contents) in backend.support_files() {
        fs::write(out_dir.join(name), contents)?;
    }
    Ok(())
}

/// Render every module of `protocol` to one stream, in declaration order.
pub fn print_protocol(
    backend: &dyn Backend,
    protocol: &Protocol,
    writer: &mut dyn Write,
) -> Result<(), PrintError> {
    for module in protocol.modules() {
        let text = backend.module_text(protocol, module)?;
        writeln!(writer, "{}", text)?;
    }
    Ok(())
}
