//! Plane selection strategies for BSP tree construction.
//!
//! The choice of splitting plane affects tree balance and the number of
//! polygon splits during construction.

use crate::Polygon;

/// Strategy for selecting which polygon's plane splits a BSP node.
pub trait PlaneSelector {
    /// Returns the index of the polygon to split on.
    ///
    /// Returns `None` if the slice is empty. The index must be in bounds.
    fn select(&self, polygons: &[Polygon]) -> Option<usize>;
}

/// Selects the first polygon in the list.
///
/// The simplest and fastest selector. It makes no attempt at balancing: the
/// tree shape follows input order and may degrade to a linear chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstPolygon;

impl PlaneSelector for FirstPolygon {
    fn select(&self, polygons: &[Polygon]) -> Option<usize> {
        (!polygons.is_empty()).then_some(0)
    }
}
