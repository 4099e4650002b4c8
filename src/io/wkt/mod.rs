//! Read and write geometries as [Well-Known Text](https://libgeos.org/specifications/wkt/),
//! including the `SRID=<n>;` prefix of extended WKT.

pub use reader::read_wkt;
pub use writer::{write_wkt, write_wkt_with_options, WktWriteOptions};

mod reader;
mod scanner;
mod writer;
