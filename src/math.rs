//! Floating-point helpers used while building the mounting offset and
//! converting driver units

use core::f32::consts::PI;

use nalgebra::Vector3;

/// Degrees to radians
pub const DEG_TO_RAD: f32 = PI / 180.0;

/// Deci-degrees (the driver's native angular unit) to radians
pub const DECIDEG_TO_RAD: f32 = PI / 1800.0;

/// Angular unit conversions on nalgebra vectors
pub trait Vector3Ext {
    fn deg_to_rad(&self) -> Vector3<f32>;

    /// Scale deci-degrees (or deci-degrees per second) to radians
    fn decideg_to_rad(&self) -> Vector3<f32>;
}

impl Vector3Ext for Vector3<f32> {
    fn deg_to_rad(&self) -> Vector3<f32> {
        self.scale(DEG_TO_RAD)
    }

    fn decideg_to_rad(&self) -> Vector3<f32> {
        self.scale(DECIDEG_TO_RAD)
    }
}

/// `(sin, cos)` of half of `radians`
pub(crate) fn half_angle(radians: f32) -> (f32, f32) {
    let half = radians * 0.5;
    (libm::sinf(half), libm::cosf(half))
}
