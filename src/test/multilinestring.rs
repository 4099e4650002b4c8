use crate::geometry::MultiLineString;

pub(crate) fn ml0() -> MultiLineString {
    vec![vec![[0., 1.], [1., 2.]], vec![[3., 4.], [5., 6.]]].into()
}

pub(crate) fn ml_z() -> MultiLineString {
    vec![
        vec![[0., 1., 2.], [1., 2., 3.]],
        vec![[3., 4., 5.], [5., 6., 7.]],
    ]
    .into()
}
