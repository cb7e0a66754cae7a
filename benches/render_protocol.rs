//! Benchmark: render the Ethernet/ARP protocol through each backend.
//! Measures full module text generation (header, entries, coders), no file
//! I/O.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use protoprint::printer::Backend;
use protoprint::{ethernet, CBackend, CSharpBackend, CppBackend};

fn bench_render(c: &mut Criterion) {
    let protocol = ethernet::ethernet_protocol().expect("protocol");
    let backends: [(&dyn Backend, &str); 3] =
        [(&CBackend, "c"), (&CppBackend, "cpp"), (&CSharpBackend, "csharp")];

    for (backend, name) in backends {
        c.bench_function(&format!("render_{}", name), |b| {
            b.iter(|| {
                for module in protocol.modules() {
                    let text = backend
                        .module_text(black_box(&protocol), black_box(module))
                        .expect("render");
                    black_box(text);
                }
            })
        });
    }
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
