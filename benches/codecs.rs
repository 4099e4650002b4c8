use criterion::{criterion_group, criterion_main, Criterion};
use geofeatures::geometry::{Geometry, GeometryData, MultiPolygon};
use geofeatures::io::{geojson, wkb, wkt};

/// A grid of unit squares, each with a small square hole.
fn grid(size: usize) -> Geometry {
    let mut polygons = vec![];
    for i in 0..size {
        for j in 0..size {
            let (x, y) = (i as f64 * 1.5, j as f64 * 1.5);
            polygons.push(vec![
                vec![[x, y], [x + 1., y], [x + 1., y + 1.], [x, y + 1.], [x, y]],
                vec![
                    [x + 0.25, y + 0.25],
                    [x + 0.75, y + 0.25],
                    [x + 0.75, y + 0.75],
                    [x + 0.25, y + 0.75],
                    [x + 0.25, y + 0.25],
                ],
            ]);
        }
    }
    MultiPolygon::from(polygons).into()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let geometry = grid(100);
    let srid = Some(3857);

    let wkt_text = wkt::write_wkt(&geometry, srid);
    c.bench_function("encode WKT", |b| {
        b.iter(|| wkt::write_wkt(&geometry, srid))
    });
    c.bench_function("decode WKT", |b| {
        b.iter(|| wkt::read_wkt(wkt_text.as_bytes()).unwrap())
    });

    let ewkb = wkb::to_wkb(&geometry, srid).unwrap();
    c.bench_function("encode EWKB", |b| {
        b.iter(|| wkb::to_wkb(&geometry, srid).unwrap())
    });
    c.bench_function("decode EWKB", |b| {
        b.iter(|| wkb::read_wkb(ewkb.as_slice()).unwrap())
    });

    let data = GeometryData::from(geometry.clone());
    let json = geojson::to_string(&data).unwrap();
    c.bench_function("encode GeoJSON", |b| {
        b.iter(|| geojson::to_string(&data).unwrap())
    });
    c.bench_function("decode GeoJSON", |b| {
        b.iter(|| geojson::read_geometry(json.as_bytes()).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
