use crate::circular_queue::CircularQueue;
use crate::config::{DuplicateFramePolicy, PipelineConfig};
use crate::error::Error;
use crate::geometry::{self, Point2D};

use log::{debug, warn};
use serde_derive::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PointId(pub u64);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One manual measurement: where the object was on a given frame, in pixels.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrackedPoint {
    pub id: PointId,
    pub frame_number: u32,
    pub time: f64, // in seconds
    pub pixel_x: f64,
    pub pixel_y: f64,
}

impl TrackedPoint {
    #[inline]
    pub fn pixel(&self) -> Point2D {
        geometry::point(self.pixel_x, self.pixel_y)
    }
}

/// A point as it arrives from the tracking UI, before it has an id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewPoint {
    pub frame_number: u32,
    pub time: f64,
    pub pixel_x: f64,
    pub pixel_y: f64,
}

impl NewPoint {
    pub fn new(frame_number: u32, time: f64, pixel: Point2D) -> Self {
        Self {
            frame_number,
            time,
            pixel_x: pixel.x,
            pixel_y: pixel.y,
        }
    }
}

/// The tracked points of one session with a bounded, linear undo history.
///
/// Points are stored in insertion order. Each `add`, `update` and `delete`
/// is one undo step; `hydrate` starts a fresh baseline and drops history.
/// Selection is UI state and never part of the history.
#[derive(Debug, Clone)]
pub struct TrackedPointSet {
    points: Vec<TrackedPoint>,
    /// `None` once every id has been handed out.
    next_id: Option<u64>,
    selected: Option<PointId>,
    duplicate_frames: DuplicateFramePolicy,
    undo: CircularQueue<Vec<TrackedPoint>>,
    redo: CircularQueue<Vec<TrackedPoint>>,
}

/// Frame order with ties kept in slice order. Every sequential consumer of
/// tracked points goes through this.
pub fn sort_by_frame(points: &[TrackedPoint]) -> Vec<&TrackedPoint> {
    let mut sorted: Vec<_> = points.iter().collect();
    sorted.sort_by_key(|p| p.frame_number);
    sorted
}

impl Default for TrackedPointSet {
    fn default() -> Self {
        Self::new(&PipelineConfig::default())
    }
}

impl TrackedPointSet {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            points: Vec::new(),
            next_id: Some(1),
            selected: None,
            duplicate_frames: config.duplicate_frames,
            undo: CircularQueue::with_capacity(config.history_capacity),
            redo: CircularQueue::with_capacity(config.history_capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Storage order, which is not frame order.
    #[inline]
    pub fn as_slice(&self) -> &[TrackedPoint] {
        &self.points
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &TrackedPoint> {
        self.points.iter()
    }

    /// Sorted by frame number, ties kept in insertion order.
    pub fn sorted(&self) -> Vec<&TrackedPoint> {
        sort_by_frame(&self.points)
    }

    #[inline]
    pub fn history_capacity(&self) -> usize {
        self.undo.capacity()
    }

    pub fn get(&self, id: PointId) -> Option<&TrackedPoint> {
        self.points.iter().find(|p| p.id == id)
    }

    pub fn point_on_frame(&self, frame_number: u32) -> Option<&TrackedPoint> {
        self.points.iter().find(|p| p.frame_number == frame_number)
    }

    pub fn add(&mut self, point: NewPoint) -> Result<PointId, Error> {
        if self.duplicate_frames == DuplicateFramePolicy::Reject
            && self.point_on_frame(point.frame_number).is_some()
        {
            return Err(Error::DuplicateFrame(point.frame_number));
        }

        let id = self.next_id.ok_or(Error::IdSpaceExhausted)?;

        self.checkpoint();

        self.next_id = id.checked_add(1);
        let id = PointId(id);

        self.points.push(TrackedPoint {
            id,
            frame_number: point.frame_number,
            time: point.time,
            pixel_x: point.pixel_x,
            pixel_y: point.pixel_y,
        });

        debug!("added point {} on frame {}", id, point.frame_number);

        Ok(id)
    }

    /// Moves a point. Frame and time are left alone. Returns false for an
    /// unknown id.
    pub fn update(&mut self, id: PointId, pixel: Point2D) -> bool {
        let idx = match self.position(id) {
            Some(idx) => idx,
            None => {
                warn!("update of unknown point {} ignored", id);
                return false;
            }
        };

        self.checkpoint();

        let p = &mut self.points[idx];
        p.pixel_x = pixel.x;
        p.pixel_y = pixel.y;

        debug!("moved point {} to ({}, {})", id, pixel.x, pixel.y);

        true
    }

    pub fn delete(&mut self, id: PointId) -> Option<TrackedPoint> {
        let idx = match self.position(id) {
            Some(idx) => idx,
            None => {
                warn!("delete of unknown point {} ignored", id);
                return None;
            }
        };

        self.checkpoint();

        let removed = self.points.remove(idx);

        if self.selected == Some(id) {
            self.selected = None;
        }

        debug!("deleted point {}", id);

        Some(removed)
    }

    /// Replaces every point with stored data. Not undoable; clears history and
    /// selection. Stored duplicates on a frame are kept.
    pub fn hydrate(&mut self, points: Vec<TrackedPoint>) {
        let mut frames: Vec<u32> = points.iter().map(|p| p.frame_number).collect();
        frames.sort_unstable();

        let duplicates = frames.windows(2).filter(|w| w[0] == w[1]).count();
        if duplicates > 0 {
            warn!("hydrated {} points with {} duplicated frames", points.len(), duplicates);
        }

        // ids stay monotonic across loads; past u64::MAX nothing is left to hand out
        if let Some(max_id) = points.iter().map(|p| p.id.0).max() {
            self.next_id = match (self.next_id, max_id.checked_add(1)) {
                (Some(next), Some(after_max)) => Some(next.max(after_max)),
                _ => None,
            };
        }

        self.points = points;
        self.selected = None;
        self.undo.clear();
        self.redo.clear();

        debug!("hydrated {} points", self.points.len());
    }

    pub fn select(&mut self, id: PointId) -> bool {
        if self.position(id).is_none() {
            warn!("selection of unknown point {} ignored", id);
            return false;
        }

        self.selected = Some(id);
        true
    }

    #[inline]
    pub fn selected(&self) -> Option<PointId> {
        self.selected
    }

    #[inline]
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo(&mut self) -> bool {
        let previous = match self.undo.pop() {
            Some(previous) => previous,
            None => return false,
        };

        let current = std::mem::replace(&mut self.points, previous);
        self.redo.push(current);
        self.drop_stale_selection();

        debug!("undo, {} steps left", self.undo.len());

        true
    }

    pub fn redo(&mut self) -> bool {
        let next = match self.redo.pop() {
            Some(next) => next,
            None => return false,
        };

        let current = std::mem::replace(&mut self.points, next);
        self.undo.push(current);
        self.drop_stale_selection();

        debug!("redo, {} steps left", self.redo.len());

        true
    }

    #[inline]
    fn position(&self, id: PointId) -> Option<usize> {
        self.points.iter().position(|p| p.id == id)
    }

    fn checkpoint(&mut self) {
        self.undo.push(self.points.clone());
        self.redo.clear();
    }

    fn drop_stale_selection(&mut self) {
        if let Some(id) = self.selected {
            if self.position(id).is_none() {
                self.selected = None;
            }
        }
    }
}
