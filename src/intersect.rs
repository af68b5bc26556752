//! Shape vs shape and shape vs lines overlap queries.
//!
//! A query runs in a fixed order:
//!
//! 1. Resolve the footprints of both shapes through the
//!    [`FootprintCache`].
//! 1. Count the pixels the two footprints share.
//! 1. Ask the broad phase (a [`CandidateIndex`], or every line when none
//!    is given) for the lines near the target.
//! 1. For each candidate: reject on bounding boxes, clip to the target
//!    box, rasterize the clipped part and look every pixel up in the
//!    target footprint.
//!
//! In fast mode the query stops as soon as the total number of hits
//! reaches the marker cap.

use std::time::{Duration, Instant};

use itertools::Either;
use log::{debug, trace};

use crate::{
    clip::clip_segment, raster::rasterize, Aabb, CandidateIndex, EngineConfig, Footprint,
    FootprintCache, LineSegment, Point2D, Result, Shape,
};

/// Padding applied to the target box for the broad phase.
const QUERY_PADDING: i32 = 2;
/// Padding of a line's own box in the cheap rejection test.
const LINE_BOX_PADDING: i32 = 1;
/// Padding of the target box a candidate is clipped to.
const CLIP_PADDING: i32 = 2;

/// Wall-clock time spent in each phase of a query.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhaseTimings {
    /// Resolving both footprints; near zero when both were cached.
    pub build_footprints: Duration,
    /// Picking candidate lines, from the index or the full range.
    pub grid_query: Duration,
    /// Shape overlap plus the per-candidate checks.
    pub narrow_phase: Duration,
    /// Moving the markers into the result.
    pub collect_results: Duration,
}

/// Outcome of one query.
#[derive(Debug, Clone, Default)]
pub struct IntersectionResult {
    pub elapsed: Duration,
    pub timings: PhaseTimings,

    /// Pixels shared with the other shape
    pub total_hits_shapes: usize,
    /// Rasterized line pixels inside the target footprint
    pub total_hits_lines: usize,

    /// Hit locations, at most `limit_used` of them
    pub markers: Vec<Point2D>,
    pub limit_used: usize,
    pub stopped_early: bool,

    pub target_box: Aabb,
    pub other_box: Aabb,
    /// How many of the two footprints were built by this query
    pub footprints_rebuilt: usize,

    pub candidate_count: usize,
    pub rejected_by_line_aabb: usize,
    pub rejected_by_segment_clip: usize,
    pub rasterized_segments: usize,
}

impl IntersectionResult {
    #[inline]
    pub fn total_hits(&self) -> usize {
        self.total_hits_shapes + self.total_hits_lines
    }
}

/// Collects hits against the marker cap and decides early stops.
struct HitSink<'a> {
    markers: &'a mut Vec<Point2D>,
    cap: usize,
    fast_mode: bool,
    total: usize,
}

impl<'a> HitSink<'a> {
    /// Record a hit; returns `true` when the query must stop.
    #[inline]
    fn record(&mut self, p: Point2D) -> bool {
        self.total += 1;
        if self.markers.len() < self.cap {
            self.markers.push(p);
        }
        self.fast_mode && self.cap > 0 && self.total >= self.cap
    }
}

/// Runs overlap queries, memoizing shape footprints across calls.
#[derive(Debug, Default)]
pub struct IntersectionEngine {
    cache: FootprintCache,
}

impl IntersectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn cache(&self) -> &FootprintCache {
        &self.cache
    }

    /// Forget every cached footprint.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }

    /// Find where `target` overlaps `other` and `lines`.
    ///
    /// `index` must have been built over `lines`, with each segment's
    /// position as its index. Without one, every line is a candidate.
    /// The configuration is validated first; an invalid one fails the
    /// query before any work is done.
    pub fn intersect(
        &self,
        target: &Shape,
        other: &Shape,
        lines: &[LineSegment],
        config: &EngineConfig,
        index: Option<&dyn CandidateIndex>,
    ) -> Result<IntersectionResult> {
        config.validate()?;
        let started = Instant::now();
        let mut result = IntersectionResult {
            limit_used: config.max_markers,
            ..Default::default()
        };

        // Footprints
        let phase = Instant::now();
        let (target_fp, target_built) = self.cache.get_or_build(target, config);
        let (other_fp, other_built) = self.cache.get_or_build(other, config);
        result.timings.build_footprints = phase.elapsed();
        result.footprints_rebuilt = target_built as usize + other_built as usize;
        result.target_box = target_fp.bbox();
        result.other_box = other_fp.bbox();

        // Broad phase
        let phase = Instant::now();
        let query_box = if target_fp.is_empty() {
            None
        } else {
            target_fp
                .bbox()
                .inflate_clamped(QUERY_PADDING, config.canvas_width, config.canvas_height)
        };
        let candidates = match (query_box, index) {
            (None, _) => Either::Left(Vec::new().into_iter()),
            (Some(area), Some(index)) => Either::Left(index.candidates(&area).into_iter()),
            (Some(_), None) => Either::Right(0..lines.len()),
        };
        result.candidate_count = candidates.len();
        result.timings.grid_query = phase.elapsed();

        // Narrow phase
        let phase = Instant::now();
        let mut markers = Vec::new();
        let mut sink = HitSink {
            markers: &mut markers,
            cap: config.max_markers,
            fast_mode: config.fast_mode,
            total: 0,
        };

        let stopped = shape_overlap(&target_fp, &other_fp, &mut sink);
        result.total_hits_shapes = sink.total;
        result.stopped_early = stopped;

        if let (false, Some(query_box)) = (stopped, query_box) {
            for i in candidates {
                let line = match lines.get(i) {
                    Some(line) => line,
                    None => continue,
                };
                if !query_box.intersects(&Aabb::of_segment(line, LINE_BOX_PADDING)) {
                    result.rejected_by_line_aabb += 1;
                    continue;
                }
                let clipped = match clip_segment(line, &target_fp.bbox(), CLIP_PADDING) {
                    Some(clipped) => clipped,
                    None => {
                        result.rejected_by_segment_clip += 1;
                        continue;
                    }
                };
                result.rasterized_segments += 1;
                trace!("line {i}: {line:?} clipped to {clipped:?}");

                if line_hits(&clipped, &target_fp, &mut sink) {
                    result.stopped_early = true;
                    break;
                }
            }
        }
        result.total_hits_lines = sink.total - result.total_hits_shapes;
        result.timings.narrow_phase = phase.elapsed();

        // Collect
        let phase = Instant::now();
        result.markers = markers;
        result.timings.collect_results = phase.elapsed();
        result.elapsed = started.elapsed();

        debug!(
            "shape {} vs shape {}: {} shape hits, {} line hits from {} candidates \
             ({} rasterized, {} box rejects, {} clip rejects){} in {:?}",
            target.id(),
            other.id(),
            result.total_hits_shapes,
            result.total_hits_lines,
            result.candidate_count,
            result.rasterized_segments,
            result.rejected_by_line_aabb,
            result.rejected_by_segment_clip,
            if result.stopped_early { ", stopped early" } else { "" },
            result.elapsed,
        );
        Ok(result)
    }
}

/// Count pixels shared by two footprints, walking the smaller one.
/// Returns `true` if the sink asked to stop.
fn shape_overlap(target: &Footprint, other: &Footprint, sink: &mut HitSink<'_>) -> bool {
    let (small, large) = if target.len() <= other.len() {
        (target, other)
    } else {
        (other, target)
    };
    for &key in small.pixels() {
        if large.contains_key(key) && sink.record(small.canvas().unpack(key)) {
            return true;
        }
    }
    false
}

/// Look up every pixel of `segment` in `footprint`. Returns `true` if
/// the sink asked to stop.
fn line_hits(segment: &LineSegment, footprint: &Footprint, sink: &mut HitSink<'_>) -> bool {
    let canvas = footprint.canvas();
    for p in rasterize(segment) {
        let hit = canvas
            .pack(p)
            .map_or(false, |key| footprint.contains_key(key));
        if hit && sink.record(p) {
            return true;
        }
    }
    false
}
