//! media-filter: case-insensitive multi-field filtering of catalogue records
//!
//! Records (movies, shows, people) expose optional title fields. A search
//! term is compiled once as a case-insensitive regular expression and each
//! record is tested against its fields in a fixed priority order; the first
//! field present on the record decides whether it is kept.
//!
//! ```
//! use media_filter::{filter, MediaRecord};
//!
//! let records = vec![MediaRecord::movie("Dune"), MediaRecord::tv("Dark")];
//! let kept = filter(&records, "dun").unwrap();
//! assert_eq!(kept, vec![&records[0]]);
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod matcher;
pub mod records;

pub use config::Settings;
pub use error::{FilterError, Result};
pub use filter::{filter, RecordFilter};
pub use matcher::{FallthroughPolicy, MultiFieldMatcher, PatternMode, PatternOptions, SearchPattern};
pub use records::{Field, FieldAccessor, FieldPriorityList, MediaRecord, MediaType, Searchable};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
