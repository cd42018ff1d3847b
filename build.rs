use rustc_version::{version_meta, Channel};

// `#[bench]` needs the unstable `test` crate, so benchmarks are only
// compiled on nightly.
fn main() {
    let meta = version_meta().unwrap();
    if meta.channel == Channel::Nightly {
        println!("cargo:rustc-cfg=rustc_nightly");
    }
    println!("cargo:rerun-if-changed=build.rs");
}
