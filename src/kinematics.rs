//! Central-difference velocity and acceleration over a time-ordered sequence
//! of world positions.
//!
//! Endpoints never get an estimate: for `n` samples velocity exists on
//! `1..n-1` and acceleration on `2..n-2`. Time steps need not be uniform.

use crate::geometry::{self, Point2D};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: f64, // in seconds
    pub x: f64,
    pub y: f64,
}

impl Sample {
    #[inline]
    pub fn new(time: f64, pos: Point2D) -> Self {
        Self {
            time,
            x: pos.x,
            y: pos.y,
        }
    }

    #[inline]
    pub fn position(&self) -> Point2D {
        geometry::point(self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity {
    pub vx: f64,
    pub vy: f64,
    pub speed: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Acceleration {
    pub ax: f64,
    pub ay: f64,
}

/// `None` at either end of `data` or when the neighbours share a timestamp.
pub fn velocity(data: &[Sample], i: usize) -> Option<Velocity> {
    if i == 0 || i + 1 >= data.len() {
        return None;
    }

    let (prev, next) = (&data[i - 1], &data[i + 1]);
    let dt = next.time - prev.time;

    if dt == 0.0 {
        return None;
    }

    let vx = (next.x - prev.x) / dt;
    let vy = (next.y - prev.y) / dt;

    Some(Velocity {
        vx,
        vy,
        speed: (vx * vx + vy * vy).sqrt(),
    })
}

/// Central difference of the neighbouring velocities, so `None` within two
/// samples of either end.
pub fn acceleration(data: &[Sample], i: usize) -> Option<Acceleration> {
    if i < 2 || i + 2 >= data.len() {
        return None;
    }

    let prev = velocity(data, i - 1)?;
    let next = velocity(data, i + 1)?;

    let dt = data[i + 1].time - data[i - 1].time;

    if dt == 0.0 {
        return None;
    }

    Some(Acceleration {
        ax: (next.vx - prev.vx) / dt,
        ay: (next.vy - prev.vy) / dt,
    })
}

/// Velocity and acceleration for every index of `data`.
pub fn derivatives(data: &[Sample]) -> Vec<(Option<Velocity>, Option<Acceleration>)> {
    (0..data.len())
        .map(|i| (velocity(data, i), acceleration(data, i)))
        .collect()
}
