// not every test file uses every helper
#![allow(dead_code)]

mod fixtures;
mod pline_modifiers;
mod shape_properties;

pub use fixtures::*;
pub use pline_modifiers::*;
pub use shape_properties::*;

/// Route `log` output of the crate to the test output, `RUST_LOG=debug` to see it.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
