//! Handle types for tetrahedral mesh elements.
//!
//! Every arena in [`TetMesh`](super::TetMesh) is addressed by a typed handle.
//! Handles are generic over the underlying integer so that very large clouds
//! can switch to 64-bit indices. The maximum value of the integer is reserved
//! as the "absent" sentinel, which is how a missing neighbour or an outer
//! tetrahedron's vertices are represented.

use std::fmt::{self, Debug};
use std::hash::Hash;

/// Trait for integer types usable as mesh handles.
pub trait MeshIndex:
    Copy + Clone + Eq + PartialEq + Ord + PartialOrd + Hash + Debug + Send + Sync + 'static
{
    /// The largest valid index value.
    const MAX: Self;

    /// Sentinel value marking an absent link.
    const INVALID: Self;

    /// Convert from usize.
    ///
    /// # Panics
    /// Panics in debug builds if the value does not fit.
    fn from_usize(v: usize) -> Self;

    /// Convert to usize.
    fn to_usize(self) -> usize;

    /// Check if this is a valid (non-sentinel) index.
    fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

macro_rules! impl_mesh_index {
    ($ty:ty) => {
        impl MeshIndex for $ty {
            const MAX: Self = <$ty>::MAX - 1;
            const INVALID: Self = <$ty>::MAX;

            #[inline]
            fn from_usize(v: usize) -> Self {
                debug_assert!(
                    v as u128 <= Self::MAX as u128,
                    "index {} too large for {}",
                    v,
                    stringify!($ty)
                );
                v as $ty
            }

            #[inline]
            fn to_usize(self) -> usize {
                self as usize
            }
        }
    };
}

impl_mesh_index!(u16);
impl_mesh_index!(u32);
impl_mesh_index!(u64);

/// A handle to a point in the point store.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct VertexId<I: MeshIndex = u32>(I);

/// A handle to an (unordered) edge.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct EdgeId<I: MeshIndex = u32>(I);

/// A handle to a triangle shared by one or two tetrahedra.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct TriangleId<I: MeshIndex = u32>(I);

/// A handle to a tetrahedron.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct TetraId<I: MeshIndex = u32>(I);

macro_rules! impl_index_type {
    ($name:ident, $display:literal) => {
        impl<I: MeshIndex> $name<I> {
            /// Create a new handle from a raw value.
            #[inline]
            pub fn new(index: usize) -> Self {
                Self(I::from_usize(index))
            }

            /// Create the absent handle.
            #[inline]
            pub fn invalid() -> Self {
                Self(I::INVALID)
            }

            /// Get the raw index value.
            #[inline]
            pub fn index(self) -> usize {
                self.0.to_usize()
            }

            /// Get the raw value of the underlying type.
            #[inline]
            pub fn raw(self) -> I {
                self.0
            }

            /// Check if this handle refers to an element.
            #[inline]
            pub fn is_valid(self) -> bool {
                self.0.is_valid()
            }

            /// Convert to `Some(self)` when valid.
            #[inline]
            pub fn valid(self) -> Option<Self> {
                if self.is_valid() {
                    Some(self)
                } else {
                    None
                }
            }
        }

        impl<I: MeshIndex> Debug for $name<I> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", $display, self.index())
                } else {
                    write!(f, "{}(INVALID)", $display)
                }
            }
        }

        impl<I: MeshIndex> Default for $name<I> {
            fn default() -> Self {
                Self::invalid()
            }
        }

        impl<I: MeshIndex> From<usize> for $name<I> {
            fn from(v: usize) -> Self {
                Self::new(v)
            }
        }
    };
}

impl_index_type!(VertexId, "V");
impl_index_type!(EdgeId, "E");
impl_index_type!(TriangleId, "T");
impl_index_type!(TetraId, "Tet");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tetra_id() {
        let t: TetraId = TetraId::new(42);
        assert_eq!(t.index(), 42);
        assert!(t.is_valid());
        assert_eq!(t.valid(), Some(t));

        let invalid: TetraId = TetraId::invalid();
        assert!(!invalid.is_valid());
        assert_eq!(invalid.valid(), None);
        assert_eq!(TetraId::<u32>::default(), invalid);
    }

    #[test]
    fn test_ordering_follows_raw_value() {
        let a: TriangleId = TriangleId::new(3);
        let b: TriangleId = TriangleId::new(10);
        assert!(a < b);
        // The sentinel sorts after every real handle.
        assert!(b < TriangleId::invalid());
    }

    #[test]
    fn test_small_indices() {
        let v: VertexId<u16> = VertexId::new(1000);
        assert_eq!(v.index(), 1000);
        assert_eq!(<u16 as MeshIndex>::INVALID, u16::MAX);
    }

    #[test]
    fn test_debug_format() {
        let t: TetraId = TetraId::new(7);
        assert_eq!(format!("{:?}", t), "Tet(7)");

        let invalid: EdgeId = EdgeId::invalid();
        assert_eq!(format!("{:?}", invalid), "E(INVALID)");
    }
}
