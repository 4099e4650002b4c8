//! KML 2.2 geometry encoding.
//!
//! Elements carry no namespace prefix. There is no KML reader.

mod writer;

pub use writer::write_kml;
