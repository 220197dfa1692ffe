use crate::error::Error;
use crate::geometry::{self, Point2D};
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// Label attached to world values. Never converted between units.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScaleUnit {
    #[default]
    M,
    Cm,
    Mm,
    Ft,
    In,
}

impl ScaleUnit {
    pub fn label(&self) -> &'static str {
        match self {
            ScaleUnit::M => "m",
            ScaleUnit::Cm => "cm",
            ScaleUnit::Mm => "mm",
            ScaleUnit::Ft => "ft",
            ScaleUnit::In => "in",
        }
    }
}

impl fmt::Display for ScaleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The user supplied inputs of a coordinate system. This is what gets
/// persisted; the pixel scale is always derived from it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Calibration {
    pub scale_point1: Option<Point2D>,
    pub scale_point2: Option<Point2D>,
    pub scale_distance: Option<f64>,
    pub scale_unit: ScaleUnit,
    /// Pixel mapped to world (0, 0).
    pub origin: Point2D,
    /// Axis tilt in degrees.
    pub rotation: f64,
    /// Screen-down pixel Y maps to world-down Y when false.
    pub y_axis_up: bool,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            scale_point1: None,
            scale_point2: None,
            scale_distance: None,
            scale_unit: ScaleUnit::M,
            origin: geometry::point(0.0, 0.0),
            rotation: 0.0,
            y_axis_up: true,
        }
    }
}

impl Calibration {
    /// Pixels per world unit, or `None` unless both scale points are set and
    /// the distance is a positive finite number.
    pub fn pixels_per_unit(&self) -> Option<f64> {
        let p1 = self.scale_point1.as_ref()?;
        let p2 = self.scale_point2.as_ref()?;
        let distance = self.scale_distance?;

        if !distance.is_finite() || distance <= 0.0 {
            return None;
        }

        Some(geometry::distance(p1, p2) / distance)
    }
}

/// Maps pixel coordinates to calibrated world coordinates and back.
///
/// The pixel scale is recomputed by every setter touching the scale points or
/// distance, so it can never drift from its inputs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(from = "Calibration", into = "Calibration")]
pub struct CoordinateSystem {
    calibration: Calibration,
    pixels_per_unit: Option<f64>,
}

impl From<Calibration> for CoordinateSystem {
    fn from(calibration: Calibration) -> Self {
        let pixels_per_unit = calibration.pixels_per_unit();

        Self {
            calibration,
            pixels_per_unit,
        }
    }
}

impl From<CoordinateSystem> for Calibration {
    fn from(system: CoordinateSystem) -> Self {
        system.calibration
    }
}

impl Default for CoordinateSystem {
    fn default() -> Self {
        Calibration::default().into()
    }
}

impl CoordinateSystem {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    #[inline]
    pub fn pixels_per_unit(&self) -> Option<f64> {
        self.pixels_per_unit
    }

    /// True when world coordinates can be computed.
    #[inline]
    pub fn is_calibrated(&self) -> bool {
        self.scale().is_some()
    }

    #[inline]
    pub fn scale_point1(&self) -> Option<Point2D> {
        self.calibration.scale_point1
    }

    #[inline]
    pub fn scale_point2(&self) -> Option<Point2D> {
        self.calibration.scale_point2
    }

    #[inline]
    pub fn scale_distance(&self) -> Option<f64> {
        self.calibration.scale_distance
    }

    #[inline]
    pub fn scale_unit(&self) -> ScaleUnit {
        self.calibration.scale_unit
    }

    #[inline]
    pub fn origin(&self) -> Point2D {
        self.calibration.origin
    }

    #[inline]
    pub fn rotation(&self) -> f64 {
        self.calibration.rotation
    }

    #[inline]
    pub fn y_axis_up(&self) -> bool {
        self.calibration.y_axis_up
    }

    pub fn set_scale_point1(&mut self, p: Option<Point2D>) {
        self.calibration.scale_point1 = p;
        self.recompute();
    }

    pub fn set_scale_point2(&mut self, p: Option<Point2D>) {
        self.calibration.scale_point2 = p;
        self.recompute();
    }

    pub fn set_scale_distance(&mut self, distance: Option<f64>) {
        self.calibration.scale_distance = distance;
        self.recompute();
    }

    pub fn set_scale_unit(&mut self, unit: ScaleUnit) {
        self.calibration.scale_unit = unit;
    }

    pub fn set_origin(&mut self, origin: Point2D) {
        self.calibration.origin = origin;
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        self.calibration.rotation = degrees;
    }

    pub fn set_y_axis_up(&mut self, y_axis_up: bool) {
        self.calibration.y_axis_up = y_axis_up;
    }

    /// Sets both scale points and the distance at once, refusing input that
    /// would leave the system uncalibrated. Nothing changes on error.
    pub fn calibrate(&mut self, p1: Point2D, p2: Point2D, distance: f64) -> Result<f64, Error> {
        if !distance.is_finite() || distance <= 0.0 {
            return Err(Error::InvalidScaleDistance(distance));
        }

        if geometry::distance(&p1, &p2) <= f64::EPSILON {
            return Err(Error::CoincidentScalePoints);
        }

        self.calibration.scale_point1 = Some(p1);
        self.calibration.scale_point2 = Some(p2);
        self.calibration.scale_distance = Some(distance);
        self.recompute();

        Ok(geometry::distance(&p1, &p2) / distance)
    }

    /// Back to an uncalibrated system with default axes.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn recompute(&mut self) {
        self.pixels_per_unit = self.calibration.pixels_per_unit();
    }

    #[inline]
    fn scale(&self) -> Option<f64> {
        self.pixels_per_unit.filter(|ppu| ppu.abs() > f64::EPSILON)
    }

    /// Translate, de-rotate, flip Y, scale. `None` while uncalibrated.
    pub fn pixel_to_world(&self, pixel: &Point2D) -> Option<Point2D> {
        let ppu = self.scale()?;

        let translated = *pixel - self.calibration.origin;
        let mut v = geometry::rotate_deg(translated, -self.calibration.rotation);

        if self.calibration.y_axis_up {
            v.y = -v.y;
        }

        Some(Point2D::from(v / ppu))
    }

    /// Exact inverse of `pixel_to_world`.
    pub fn world_to_pixel(&self, world: &Point2D) -> Option<Point2D> {
        let ppu = self.scale()?;

        let mut v = world.coords * ppu;

        if self.calibration.y_axis_up {
            v.y = -v.y;
        }

        let v = geometry::rotate_deg(v, self.calibration.rotation);

        Some(self.calibration.origin + v)
    }
}
