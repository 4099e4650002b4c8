use crate::datatypes::{Dimension, GeometryType};
use crate::error::{GeoError, Result};
use crate::geometry::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};
use crate::io::wkt::scanner::Scanner;
use crate::io::{nesting_message, MAX_NESTING_DEPTH};

/// Parse a WKT string with an optional `SRID=<n>;` prefix.
///
/// The geometry keyword may carry a `Z`, `M` or `ZM` suffix, attached (`POINTZ`) or separated
/// by whitespace (`POINT Z`). Without a suffix the dimension is inferred from the number of
/// values in the first coordinate, and every later coordinate must have the same number.
///
/// ```
/// use geofeatures::io::wkt::read_wkt;
///
/// let (geometry, srid) = read_wkt(b"SRID=4326;POINT(1 2)").unwrap();
/// assert_eq!(srid, Some(4326));
/// assert_eq!(geometry.geometry_type().name(), "Point");
/// ```
pub fn read_wkt(input: &[u8]) -> Result<(Geometry, Option<u32>)> {
    let mut parser = Parser::new(input);
    let srid = parser.scanner.scan_srid()?;
    let geometry = parser.scan_geometry(0)?;
    if !parser.scanner.at_end() {
        return Err(parser.scanner.syntax_error("unexpected trailing input"));
    }
    tracing::debug!(
        kind = %geometry.geometry_type(),
        dimension = %geometry.dim(),
        srid = ?srid,
        "decoded WKT"
    );
    Ok((geometry, srid))
}

/// Split a keyword such as `MULTIPOLYGONZM` into its kind and attached dimension suffix.
fn split_keyword(ident: &str) -> Option<(GeometryType, Option<Dimension>)> {
    if let Some(kind) = GeometryType::from_wkt_keyword(ident) {
        return Some((kind, None));
    }
    [
        ("ZM", Dimension::XYZM),
        ("Z", Dimension::XYZ),
        ("M", Dimension::XYM),
    ]
    .into_iter()
    .find_map(|(suffix, dim)| {
        ident
            .strip_suffix(suffix)
            .and_then(GeometryType::from_wkt_keyword)
            .map(|kind| (kind, Some(dim)))
    })
}

fn suffix_dimension(ident: &str) -> Option<Dimension> {
    match ident {
        "Z" => Some(Dimension::XYZ),
        "M" => Some(Dimension::XYM),
        "ZM" => Some(Dimension::XYZM),
        _ => None,
    }
}

/// The header of a tagged geometry: kind, declared dimension and whether it is `EMPTY`.
struct Keyword {
    kind: GeometryType,
    dim: Option<Dimension>,
    empty: bool,
}

/// Flat coordinates of one geometry. The dimension is fixed by the keyword suffix or, in the
/// plain dialect, by the first coordinate.
struct CoordBuffer {
    dim: Option<Dimension>,
    coords: Vec<f64>,
}

impl CoordBuffer {
    fn new(dim: Option<Dimension>) -> Self {
        Self {
            dim,
            coords: vec![],
        }
    }

    fn dim(&self) -> Dimension {
        self.dim.unwrap_or_default()
    }

    /// Number of complete coordinates.
    fn len(&self) -> usize {
        self.coords.len() / self.dim().size()
    }

    fn coord(&self, i: usize) -> &[f64] {
        let size = self.dim().size();
        &self.coords[i * size..(i + 1) * size]
    }
}

struct Parser<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            scanner: Scanner::new(input),
        }
    }

    fn structural(&self, message: impl std::fmt::Display) -> GeoError {
        GeoError::StructuralViolation(format!("{message} at offset {}", self.scanner.position()))
    }

    fn scan_keyword(&mut self) -> Result<Keyword> {
        self.scanner.skip_whitespace();
        let start = self.scanner.position();
        let ident = self.scanner.scan_ident()?;
        let (kind, mut dim) = split_keyword(&ident).ok_or_else(|| {
            GeoError::UnsupportedVariant(format!("unknown geometry '{ident}' at offset {start}"))
        })?;

        let mut empty = false;
        while !empty && self.scanner.peek_ident() {
            let modifier_start = self.scanner.position();
            let modifier = self.scanner.scan_ident()?;
            match (modifier.as_str(), suffix_dimension(&modifier)) {
                ("EMPTY", _) => empty = true,
                (_, Some(suffix)) if dim.is_none() => dim = Some(suffix),
                _ => {
                    return Err(GeoError::MalformedSyntax(format!(
                        "unexpected '{modifier}' at offset {modifier_start}"
                    )))
                }
            }
        }
        Ok(Keyword { kind, dim, empty })
    }

    /// Parse one tagged geometry (without SRID prefix) nested `depth` collections deep.
    fn scan_geometry(&mut self, depth: usize) -> Result<Geometry> {
        if depth > MAX_NESTING_DEPTH {
            return Err(self.scanner.syntax_error(nesting_message()));
        }
        let keyword = self.scan_keyword()?;
        if keyword.empty {
            return Ok(empty_geometry(keyword.kind, keyword.dim.unwrap_or_default()));
        }

        let mut buffer = CoordBuffer::new(keyword.dim);
        let geometry = match keyword.kind {
            GeometryType::Point => {
                self.scanner.scan_start()?;
                self.scan_coord(&mut buffer)?;
                if self.scanner.scan_continue()? {
                    return Err(self.structural("POINT must have exactly one coordinate"));
                }
                Point::try_new(buffer.dim(), buffer.coords)?.into()
            }
            GeometryType::LineString => {
                let count = self.scan_coord_list(&mut buffer)?;
                if count < 2 {
                    return Err(self.structural(format!(
                        "a linestring must have at least 2 points, got {count}"
                    )));
                }
                LineString::try_new(buffer.dim(), buffer.coords)?.into()
            }
            GeometryType::MultiPoint => {
                self.scan_multi_point(&mut buffer)?;
                MultiPoint::try_new(buffer.dim(), buffer.coords)?.into()
            }
            GeometryType::Polygon => {
                let mut ring_offsets = vec![0];
                self.scan_polygon(&mut buffer, &mut ring_offsets)?;
                Polygon::try_new(buffer.dim(), buffer.coords, ring_offsets)?.into()
            }
            GeometryType::MultiLineString => {
                let mut line_offsets = vec![0];
                self.scanner.scan_start()?;
                loop {
                    let count = self.scan_coord_list(&mut buffer)?;
                    if count < 2 {
                        return Err(self.structural(format!(
                            "a linestring must have at least 2 points, got {count}"
                        )));
                    }
                    line_offsets.push(buffer.len());
                    if !self.scanner.scan_continue()? {
                        break;
                    }
                }
                MultiLineString::try_new(buffer.dim(), buffer.coords, line_offsets)?.into()
            }
            GeometryType::MultiPolygon => {
                let mut polygon_offsets = vec![0];
                let mut ring_offsets = vec![0];
                self.scanner.scan_start()?;
                loop {
                    self.scan_polygon(&mut buffer, &mut ring_offsets)?;
                    polygon_offsets.push(ring_offsets.len() - 1);
                    if !self.scanner.scan_continue()? {
                        break;
                    }
                }
                MultiPolygon::try_new(buffer.dim(), buffer.coords, polygon_offsets, ring_offsets)?
                    .into()
            }
            GeometryType::GeometryCollection => {
                let mut members = vec![];
                self.scanner.scan_start()?;
                loop {
                    members.push(self.scan_geometry(depth + 1)?);
                    if !self.scanner.scan_continue()? {
                        break;
                    }
                }
                match keyword.dim {
                    Some(dim) => GeometryCollection::with_dim(members, dim),
                    None => GeometryCollection::new(members),
                }
                .into()
            }
        };
        Ok(geometry)
    }

    /// One coordinate: 2 to 4 whitespace separated numbers ending at `,` or `)`.
    fn scan_coord(&mut self, buffer: &mut CoordBuffer) -> Result<()> {
        self.scanner.skip_whitespace();
        let start = self.scanner.position();
        let mut count = 0;
        loop {
            buffer.coords.push(self.scanner.scan_number()?);
            count += 1;
            if self.scanner.peek_delimiter()? {
                break;
            }
            if count == 4 {
                return Err(GeoError::StructuralViolation(format!(
                    "coordinate at offset {start} has more than 4 values"
                )));
            }
        }

        match buffer.dim {
            Some(dim) if dim.size() != count => Err(GeoError::StructuralViolation(format!(
                "coordinate at offset {start} has {count} values, expected {} for {dim}",
                dim.size()
            ))),
            Some(_) => Ok(()),
            None => {
                let dim = Dimension::from_arity(count).map_err(|_| {
                    GeoError::StructuralViolation(format!(
                        "coordinate at offset {start} has {count} values"
                    ))
                })?;
                buffer.dim = Some(dim);
                Ok(())
            }
        }
    }

    /// `(` coord {`,` coord} `)`, returning the number of coordinates read.
    fn scan_coord_list(&mut self, buffer: &mut CoordBuffer) -> Result<usize> {
        self.scanner.scan_start()?;
        let mut count = 0;
        loop {
            self.scan_coord(buffer)?;
            count += 1;
            if !self.scanner.scan_continue()? {
                return Ok(count);
            }
        }
    }

    /// Accepts both `MULTIPOINT(1 2, 3 4)` and `MULTIPOINT((1 2), (3 4))`.
    fn scan_multi_point(&mut self, buffer: &mut CoordBuffer) -> Result<()> {
        self.scanner.scan_start()?;
        let wrapped = self.scanner.peek_start()?;
        loop {
            if wrapped {
                self.scanner.scan_start()?;
                self.scan_coord(buffer)?;
                if self.scanner.scan_continue()? {
                    return Err(self.scanner.syntax_error("expected ')', got ','"));
                }
            } else {
                self.scan_coord(buffer)?;
            }
            if !self.scanner.scan_continue()? {
                return Ok(());
            }
        }
    }

    /// A parenthesized list of closed rings of at least 4 coordinates.
    fn scan_polygon(&mut self, buffer: &mut CoordBuffer, ring_offsets: &mut Vec<usize>) -> Result<()> {
        self.scanner.scan_start()?;
        loop {
            let first = buffer.len();
            let count = self.scan_coord_list(buffer)?;
            if count < 4 {
                return Err(self.structural(format!(
                    "a polygon ring must have at least 4 points, got {count}"
                )));
            }
            if buffer.coord(first) != buffer.coord(first + count - 1) {
                return Err(self.structural("a polygon ring must be closed"));
            }
            ring_offsets.push(buffer.len());
            if !self.scanner.scan_continue()? {
                return Ok(());
            }
        }
    }
}

fn empty_geometry(kind: GeometryType, dim: Dimension) -> Geometry {
    match kind {
        GeometryType::Point => Point::empty(dim).into(),
        GeometryType::LineString => LineString::empty(dim).into(),
        GeometryType::Polygon => Polygon::empty(dim).into(),
        GeometryType::MultiPoint => MultiPoint::empty(dim).into(),
        GeometryType::MultiLineString => MultiLineString::empty(dim).into(),
        GeometryType::MultiPolygon => MultiPolygon::empty(dim).into(),
        GeometryType::GeometryCollection => GeometryCollection::with_dim(vec![], dim).into(),
    }
}
