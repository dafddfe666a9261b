use rustc_version::{version_meta, Channel};

// NOTE: This is used to activate the 'nightly' feature described in the Cargo.toml file, as we want
//       to support using the on_unimplemented messages for the `Parser` trait.
fn main() -> Result<(), rustc_version::Error> {
    if version_meta()?.channel == Channel::Nightly {
        println!("cargo:rustc-cfg=feature=\"nightly\"");
    }
    Ok(())
}
