/// Trait representing a real number used for floating point geometry (normals, offset joins,
/// intersection parameters) computed on top of the fixed point coordinates.
pub trait Real:
    num_traits::real::Real
    + super::FuzzyEq
    + std::default::Default
    + std::fmt::Debug
    + 'static
{
    /// Cast a fixed point coordinate into this real type.
    #[inline]
    fn from_coord(value: i64) -> Self {
        <Self as num_traits::NumCast>::from(value).unwrap_or_else(Self::zero)
    }
}

impl Real for f64 {
    #[inline]
    fn from_coord(value: i64) -> Self {
        value as f64
    }
}
