//! Broad-phase indexes over a static collection of line segments.

use itertools::Itertools;
use rstar::{RTree, RTreeObject, AABB};

use crate::{Aabb, LineSegment};

/// Answers "which segments may overlap this box?".
///
/// Implementations must be conservative: every segment whose path
/// comes within one pixel of `area` has to be returned. Extra
/// candidates are fine; the narrow phase rejects them. Indices are
/// positions in the segment collection the index was built over,
/// sorted and without duplicates.
pub trait CandidateIndex: Send + Sync {
    fn candidates(&self, area: &Aabb) -> Vec<usize>;
}

#[derive(Debug, Clone)]
struct IndexedEnvelope {
    envelope: AABB<[i32; 2]>,
    index: usize,
}

impl RTreeObject for IndexedEnvelope {
    type Envelope = AABB<[i32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// An R-tree over segment bounding boxes.
///
/// Each box is padded by one pixel so that rasterized pixels a little
/// off the geometric path still find their segment.
pub struct RTreeIndex {
    tree: RTree<IndexedEnvelope>,
}

impl RTreeIndex {
    pub fn new<'a, I>(segments: I) -> Self
    where
        I: IntoIterator<Item = &'a LineSegment>,
    {
        let items = segments
            .into_iter()
            .enumerate()
            .map(|(index, segment)| {
                let bbox = Aabb::of_segment(segment, 1);
                IndexedEnvelope {
                    envelope: AABB::from_corners(
                        [bbox.min_x(), bbox.min_y()],
                        [bbox.max_x(), bbox.max_y()],
                    ),
                    index,
                }
            })
            .collect();
        RTreeIndex {
            tree: RTree::bulk_load(items),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CandidateIndex for RTreeIndex {
    fn candidates(&self, area: &Aabb) -> Vec<usize> {
        let query = AABB::from_corners([area.min_x(), area.min_y()], [area.max_x(), area.max_y()]);
        self.tree
            .locate_in_envelope_intersecting(&query)
            .map(|item| item.index)
            .sorted_unstable()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::{clip::clip_segment, Point2D, UniformGrid};

    #[test]
    fn rtree_finds_touching_segments() {
        let lines = vec![
            LineSegment::from([(0, 0), (10, 10)]),
            LineSegment::from([(50, 50), (60, 40)]),
            LineSegment::from([(5, 30), (5, 30)]),
        ];
        let index = RTreeIndex::new(lines.iter());
        assert_eq!(index.len(), 3);
        assert_eq!(index.candidates(&Aabb::new(8, 20, 8, 20)), vec![0]);
        assert_eq!(index.candidates(&Aabb::new(0, 100, 0, 100)), vec![0, 1, 2]);
        assert_eq!(index.candidates(&Aabb::new(6, 6, 31, 31)), vec![2]);
        assert!(index.candidates(&Aabb::new(200, 300, 200, 300)).is_empty());
    }

    #[test]
    fn rtree_and_grid_cover_the_same_lines() {
        let mut rng = StdRng::seed_from_u64(5);
        let lines: Vec<_> = (0..300)
            .map(|_| {
                let mut p = || Point2D::new(rng.gen_range(0..500), rng.gen_range(0..500));
                LineSegment::new(p(), p())
            })
            .collect();
        let rtree = RTreeIndex::new(lines.iter());
        let grid = UniformGrid::from_segments(500, 500, 25, lines.iter()).unwrap();
        let indexes: [&dyn CandidateIndex; 2] = [&rtree, &grid];

        for _ in 0..100 {
            let x = rng.gen_range(0..450);
            let y = rng.gen_range(0..450);
            let area = Aabb::new(x, x + 40, y, y + 40);
            let touching: Vec<_> = lines
                .iter()
                .enumerate()
                .filter(|(_, l)| clip_segment(l, &area, 0).is_some())
                .map(|(i, _)| i)
                .collect();
            for index in indexes.iter() {
                let found = index.candidates(&area);
                assert!(found.windows(2).all(|w| w[0] < w[1]));
                for i in touching.iter() {
                    assert!(found.binary_search(i).is_ok());
                }
            }
        }
    }
}
