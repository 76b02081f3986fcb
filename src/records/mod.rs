//! Record shapes and field access
//!
//! Records expose optional, string-valued candidate fields. Access goes
//! through typed accessors held in a fixed priority order rather than
//! probing properties by name at runtime.

mod fields;
mod types;

pub use fields::*;
pub use types::*;
