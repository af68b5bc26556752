//! Rasterized shape footprints and their per-shape cache.

use std::{
    collections::{hash_map::DefaultHasher, HashMap, HashSet},
    hash::{Hash, Hasher},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, OnceLock,
    },
};

use log::{debug, trace};
use parking_lot::RwLock;

use crate::{aabb::BoundsTracker, Aabb, CoordinateMode, EngineConfig, Point2D, Pose, Shape, ShapeId};

/// A canvas pixel packed as `y * stride + x`.
pub type PixelKey = u64;

/// Canvas extents and key packing used to build a footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pub stride: u32,
}

impl Canvas {
    /// Checks if `p` lies in `[0, width) x [0, height)`.
    #[inline]
    pub fn contains(&self, p: Point2D) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as u32) < self.width && (p.y as u32) < self.height
    }

    /// Key of an on-canvas pixel.
    #[inline]
    pub fn pack(&self, p: Point2D) -> Option<PixelKey> {
        if self.contains(p) {
            Some(p.y as u64 * self.stride as u64 + p.x as u64)
        } else {
            None
        }
    }

    #[inline]
    pub fn unpack(&self, key: PixelKey) -> Point2D {
        let stride = self.stride as u64;
        Point2D::new((key % stride) as i32, (key / stride) as i32)
    }
}

impl From<&EngineConfig> for Canvas {
    fn from(config: &EngineConfig) -> Self {
        Canvas {
            width: config.canvas_width,
            height: config.canvas_height,
            stride: config.stride,
        }
    }
}

/// Stable fingerprint of a pose.
///
/// The rotation is rounded to three decimals so that poses differing
/// only by input noise (e.g. a slider) share a fingerprint.
pub fn pose_hash(pose: &Pose, mode: CoordinateMode) -> u64 {
    let rotation_millis = (pose.rotation_deg * 1000.).round() as i64;
    let mut hasher = DefaultHasher::new();
    (pose.translate_x, pose.translate_y, rotation_millis, mode).hash(&mut hasher);
    hasher.finish()
}

/// The pixels a shape covers under one pose.
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    pose_hash: u64,
    canvas: Canvas,
    pixels: HashSet<PixelKey>,
    bbox: Aabb,
}

impl Footprint {
    /// Transform every point of `shape` and keep the ones on the
    /// canvas.
    ///
    /// The bounding box spans all transformed points, including those
    /// off the canvas. If no point lands on the canvas, it collapses
    /// to `(0, 0, 0, 0)`.
    pub fn build(shape: &Shape, canvas: Canvas, mode: CoordinateMode) -> Self {
        let mut pixels = HashSet::with_capacity(shape.points().len());
        let mut bounds = BoundsTracker::default();
        for p in shape.world_points(mode) {
            bounds.push(p);
            if let Some(key) = canvas.pack(p) {
                pixels.insert(key);
            }
        }
        let bbox = match bounds.finish() {
            Some(bbox) if !pixels.is_empty() => bbox,
            _ => Aabb::default(),
        };
        Footprint {
            pose_hash: pose_hash(shape.pose(), mode),
            canvas,
            pixels,
            bbox,
        }
    }

    #[inline]
    pub fn pose_hash(&self) -> u64 {
        self.pose_hash
    }

    #[inline]
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    #[inline]
    pub fn pixels(&self) -> &HashSet<PixelKey> {
        &self.pixels
    }

    #[inline]
    pub fn bbox(&self) -> Aabb {
        self.bbox
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline]
    pub fn contains_key(&self, key: PixelKey) -> bool {
        self.pixels.contains(&key)
    }

    /// Checks if the footprint covers canvas pixel `p`.
    #[inline]
    pub fn contains(&self, p: Point2D) -> bool {
        self.canvas
            .pack(p)
            .map_or(false, |key| self.pixels.contains(&key))
    }

    /// Covered pixels in no particular order.
    pub fn points(&self) -> impl Iterator<Item = Point2D> + '_ {
        self.pixels.iter().map(move |&key| self.canvas.unpack(key))
    }
}

/// One cache entry: the footprint for a given pose, built at most once.
#[derive(Debug)]
struct Slot {
    pose_hash: u64,
    canvas: Canvas,
    footprint: OnceLock<Arc<Footprint>>,
}

impl Slot {
    fn new(pose_hash: u64, canvas: Canvas) -> Self {
        Slot {
            pose_hash,
            canvas,
            footprint: OnceLock::new(),
        }
    }

    #[inline]
    fn matches(&self, pose_hash: u64, canvas: Canvas) -> bool {
        self.pose_hash == pose_hash && self.canvas == canvas
    }
}

/// Per-shape memo of the last built footprint.
///
/// Lookups for different shapes only contend on a short map lock. For
/// one shape and pose, concurrent lookups share a single build: one
/// caller builds while the others block until the footprint is ready.
/// A pose change swaps in a fresh entry; callers still holding the old
/// one finish with the old footprint, so nobody observes a partial
/// build.
#[derive(Debug, Default)]
pub struct FootprintCache {
    slots: RwLock<HashMap<ShapeId, Arc<Slot>>>,
    builds: AtomicUsize,
}

impl FootprintCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Footprint of `shape` under its current pose, and whether this
    /// call built it.
    pub fn get_or_build(&self, shape: &Shape, config: &EngineConfig) -> (Arc<Footprint>, bool) {
        let canvas = Canvas::from(config);
        let mode = config.coordinate_mode;
        let hash = pose_hash(shape.pose(), mode);
        let slot = self.slot(shape.id(), hash, canvas);

        let mut built = false;
        let footprint = slot
            .footprint
            .get_or_init(|| {
                built = true;
                self.builds.fetch_add(1, Ordering::Relaxed);
                let footprint = Footprint::build(shape, canvas, mode);
                debug!(
                    "footprint: built shape {} ({} pixels, bbox {:?})",
                    shape.id(),
                    footprint.len(),
                    footprint.bbox()
                );
                Arc::new(footprint)
            })
            .clone();
        (footprint, built)
    }

    fn slot(&self, id: ShapeId, pose_hash: u64, canvas: Canvas) -> Arc<Slot> {
        if let Some(slot) = self.slots.read().get(&id) {
            if slot.matches(pose_hash, canvas) {
                return slot.clone();
            }
        }

        let mut slots = self.slots.write();
        match slots.get(&id) {
            Some(slot) if slot.matches(pose_hash, canvas) => slot.clone(),
            stale => {
                if stale.is_some() {
                    trace!("footprint: shape {id} moved, dropping cached entry");
                }
                let slot = Arc::new(Slot::new(pose_hash, canvas));
                slots.insert(id, slot.clone());
                slot
            }
        }
    }

    /// Drop the entry of one shape. Returns `true` if there was one.
    pub fn invalidate(&self, id: ShapeId) -> bool {
        self.slots.write().remove(&id).is_some()
    }

    pub fn invalidate_all(&self) {
        self.slots.write().clear();
    }

    /// Number of shapes with an entry.
    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of footprints built by this cache.
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }
}
