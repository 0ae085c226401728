//! Zero-copy record and field views.
//!
//! - [`Record`] - One line of input, borrowed from the scan buffer
//! - [`Fields`] - Lazy iterator over a record's delimiter-separated fields

mod fields;
mod view;

pub use fields::Fields;
pub use view::Record;
