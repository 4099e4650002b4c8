//! Reading and writing WKB and EWKB.
//!
//! Readers accept both dialects in either byte order. Writers emit ISO WKB, or EWKB when an SRID
//! is attached.

mod common;
mod reader;
mod writer;

pub use common::{Endianness, WKBType};
pub use reader::{read_wkb, read_wkb_with_options, WkbReadOptions};
pub use writer::{geometry_wkb_size, to_wkb, write_wkb, write_wkb_with_options, WkbWriteOptions};
