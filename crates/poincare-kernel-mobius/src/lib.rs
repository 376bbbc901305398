#![warn(missing_docs)]

//! Möbius isometries of the Poincaré disk.
//!
//! A transform is a 2x2 complex matrix `[[a, b], [c, d]]` acting as
//! `z ↦ (az + b) / (cz + d)`, together with an [`Orientation`]. Reversing
//! transforms (reflections) conjugate their input before the matrix acts.
//!
//! # Example
//!
//! ```
//! use poincare_kernel_math::Complex;
//! use poincare_kernel_mobius::Mobius;
//!
//! let t = Mobius::translation(0.5, 0.0);
//! let z = t.apply(Complex::new(0.0, 0.0));
//! assert!((z - Complex::new(0.5, 0.0)).norm() < 1e-12);
//! ```

use std::ops::Mul;

use nalgebra::Matrix2;
use poincare_kernel_math::Complex;

/// Whether a transform preserves or reverses orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Rotations, translations and their compositions (`R = +1`).
    Preserving,
    /// Reflections (`R = -1`): the input is conjugated before the matrix acts.
    Reversing,
}

impl Mul for Orientation {
    type Output = Orientation;

    fn mul(self, rhs: Orientation) -> Orientation {
        if self == rhs {
            Orientation::Preserving
        } else {
            Orientation::Reversing
        }
    }
}

/// A Möbius transform of the complex plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mobius {
    /// Coefficient matrix `[[a, b], [c, d]]`.
    pub matrix: Matrix2<Complex>,
    /// Orientation of the map.
    pub orientation: Orientation,
}

impl Mobius {
    /// Transform with coefficients `a, b, c, d`.
    pub fn new(a: Complex, b: Complex, c: Complex, d: Complex, orientation: Orientation) -> Self {
        Self {
            matrix: Matrix2::new(a, b, c, d),
            orientation,
        }
    }

    /// The identity map.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix2::identity(),
            orientation: Orientation::Preserving,
        }
    }

    /// Coefficient `a`.
    pub fn a(&self) -> Complex {
        self.matrix[(0, 0)]
    }

    /// Coefficient `b`.
    pub fn b(&self) -> Complex {
        self.matrix[(0, 1)]
    }

    /// Coefficient `c`.
    pub fn c(&self) -> Complex {
        self.matrix[(1, 0)]
    }

    /// Coefficient `d`.
    pub fn d(&self) -> Complex {
        self.matrix[(1, 1)]
    }

    /// Rotation about the origin: `a = e^{i·angle}`, `d = 1`.
    pub fn rotation(angle: f64) -> Self {
        Self::new(
            Complex::from_polar(1.0, angle),
            Complex::new(0.0, 0.0),
            Complex::new(0.0, 0.0),
            Complex::new(1.0, 0.0),
            Orientation::Preserving,
        )
    }

    /// Hyperbolic translation moving the origin to `x + iy`.
    pub fn translation(x: f64, y: f64) -> Self {
        let b = Complex::new(x, y);
        Self::new(
            Complex::new(1.0, 0.0),
            b,
            b.conj(),
            Complex::new(1.0, 0.0),
            Orientation::Preserving,
        )
    }

    /// Reflection across the real axis.
    pub fn conjugation() -> Self {
        Self {
            matrix: Matrix2::identity(),
            orientation: Orientation::Reversing,
        }
    }

    /// Reflection across the geodesic through `l0` and `l1`.
    ///
    /// Moves `l0` to the origin, turns the image of `l1` onto the real axis,
    /// reflects there and undoes both steps.
    pub fn reflection_across_line(l0: Complex, l1: Complex) -> Self {
        let to_origin = Self::translation(-l0.re, -l0.im);
        let from_origin = Self::translation(l0.re, l0.im);

        let moved = to_origin.apply(l1);
        let angle = moved.im.atan2(moved.re);
        let to_axis = Self::rotation(-angle);
        let from_axis = Self::rotation(angle);

        from_origin * from_axis * Self::conjugation() * to_axis * to_origin
    }

    /// Apply the transform to a point.
    pub fn apply(&self, z: Complex) -> Complex {
        let z = match self.orientation {
            Orientation::Preserving => z,
            Orientation::Reversing => z.conj(),
        };
        (self.a() * z + self.b()) / (self.c() * z + self.d())
    }
}

/// Composition: `(f1 * f0)(z) == f1(f0(z))`.
impl Mul for Mobius {
    type Output = Mobius;

    fn mul(self, inner: Mobius) -> Mobius {
        // A reversing outer map sees the conjugate of the inner map.
        let inner_matrix = match self.orientation {
            Orientation::Preserving => inner.matrix,
            Orientation::Reversing => inner.matrix.map(|z| z.conj()),
        };
        Mobius {
            matrix: self.matrix * inner_matrix,
            orientation: self.orientation * inner.orientation,
        }
    }
}
