//! Search term matching
//!
//! A [`SearchPattern`] is compiled once per filter call and tested against
//! record fields by a [`MultiFieldMatcher`].

mod multi_field;
mod pattern;

pub use multi_field::*;
pub use pattern::*;
