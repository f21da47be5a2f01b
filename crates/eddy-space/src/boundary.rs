//! Outer-edge behaviour of a lattice.

/// How values leaving the grid through its outer edge are handled.
///
/// Exactly one mode applies per engine. It is independent of the solid
/// wall, which is always enforced when configured.
///
/// # Examples
///
/// ```
/// use eddy_space::{BoundaryMode, Lattice};
///
/// let torus = Lattice::new(4, 4, BoundaryMode::Periodic).unwrap();
/// assert_eq!(torus.resolve_axis(-1, 4), Some(3));
///
/// let boxed = Lattice::new(4, 4, BoundaryMode::Reflective).unwrap();
/// assert_eq!(boxed.resolve_axis(-1, 4), None);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoundaryMode {
    /// Destinations outside the grid wrap modulo the grid dimensions
    /// (torus topology).
    #[default]
    Periodic,
    /// Destinations outside the grid are not propagated. Field values are
    /// absorbed; particles flip the violated velocity component and are
    /// clamped back inside.
    Reflective,
}
