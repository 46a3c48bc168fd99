//! Callbacks for ordered tree traversal.

use crate::Polygon;

/// Receives polygon groups during a BSP traversal.
///
/// Each call carries one node's splitter followed by the polygons coplanar
/// with it. Closures taking `&[Polygon]` are visitors too.
pub trait BspVisitor {
    fn visit(&mut self, polygons: &[Polygon]);
}

impl<F> BspVisitor for F
where
    F: FnMut(&[Polygon]),
{
    fn visit(&mut self, polygons: &[Polygon]) {
        self(polygons)
    }
}

/// Records visited polygons along with the node group each came from.
#[derive(Debug, Default)]
pub struct OrderRecorder {
    polygons: Vec<Polygon>,
    group_starts: Vec<usize>,
}

impl OrderRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// All visited polygons, in visit order.
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn into_polygons(self) -> Vec<Polygon> {
        self.polygons
    }

    /// Number of node groups visited.
    pub fn group_count(&self) -> usize {
        self.group_starts.len()
    }

    /// The visited node groups, in visit order.
    pub fn groups(&self) -> impl Iterator<Item = &[Polygon]> + '_ {
        let ends = self.group_starts.iter().skip(1).copied().chain([self.polygons.len()]);
        self.group_starts
            .iter()
            .zip(ends)
            .map(|(&start, end)| &self.polygons[start..end])
    }
}

impl BspVisitor for OrderRecorder {
    fn visit(&mut self, polygons: &[Polygon]) {
        self.group_starts.push(self.polygons.len());
        self.polygons.extend_from_slice(polygons);
    }
}
