//! UniFFI bindgen CLI tool for generating language bindings.
//!
//! Generates Swift, Kotlin, Python, and Ruby bindings for the ingredient
//! index and recipe ranking exposed by pantry-find.
//!
//! ## Usage
//!
//! Generate Python bindings:
//! ```bash
//! cargo run --features cli --bin uniffi-bindgen generate --library target/release/libpantry_find.so --language python --out-dir ./bindings
//! ```
//!
//! Generate Kotlin bindings:
//! ```bash
//! cargo run --features cli --bin uniffi-bindgen generate --library target/release/libpantry_find.so --language kotlin --out-dir ./bindings
//! ```

fn main() {
    uniffi::uniffi_bindgen_main()
}
