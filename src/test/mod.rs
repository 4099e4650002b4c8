pub(crate) mod geometrycollection;
pub(crate) mod linestring;
pub(crate) mod multilinestring;
pub(crate) mod multipoint;
pub(crate) mod properties;
