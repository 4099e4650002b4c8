//! GML 3.2 geometry encoding.
//!
//! Elements use the `gml:` prefix. The namespace declaration is only emitted on request, so the
//! output can be embedded in a document that already declares it. There is no GML reader.

mod writer;

pub use writer::{write_gml, write_gml_with_options, GmlWriteOptions, GML_NAMESPACE};
