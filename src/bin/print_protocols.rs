//! Generate the example Ethernet/ARP protocol in all three target
//! languages: `out/c`, `out/cpp` (with `codec.hpp` copied alongside) and
//! `out/cs`. An optional positional argument overrides the output root.
//!
//! With `--stdout`, renders every module to standard output instead of
//! writing files.

use protoprint::{c::CBackend, cpp::CppBackend, csharp::CSharpBackend, ethernet, printer};
use protoprint::printer::Backend;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let to_stdout = if let Some(pos) = args.iter().position(|a| a == "--stdout") {
        args.remove(pos);
        true
    } else {
        false
    };
    let out_root = PathBuf::from(args.first().map(String::as_str).unwrap_or("out"));

    let protocol = ethernet::ethernet_protocol()?;
    let backends: [(&dyn Backend, &str); 3] =
        [(&CBackend, "c"), (&CppBackend, "cpp"), (&CSharpBackend, "cs")];

    if to_stdout {
        let mut stdout = std::io::stdout();
        for (backend, _) in backends {
            printer::print_protocol(backend, &protocol, &mut stdout)?;
        }
        return Ok(());
    }

    for (backend, subdir) in backends {
        printer::write_protocol(backend, &protocol, &out_root.join(subdir))?;
    }
    Ok(())
}
