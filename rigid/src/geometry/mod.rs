//! Geometry

// Define macros for property based testing.
#[cfg(test)]
#[macro_export]
macro_rules! prop_range {
    ($name: ident, $t: ty, $r: expr) => {
        prop_compose! {
            fn $name()(f in $r) -> $t {
                f
            }
        }
    };
}

#[cfg(test)]
#[macro_export]
macro_rules! prop_non_zero_range {
    ($name: ident, $t: ty, $r: expr) => {
        prop_compose! {
            fn $name()(f in $r.prop_filter("non-zero", |x| *x != 0.0)) -> $t {
                f
            }
        }
    };
}

#[cfg(test)]
#[macro_export]
macro_rules! prop_vector3 {
    ($name: ident, $t: ty, $xr: expr, $yr: expr, $zr: expr) => {
        prop_compose! {
            fn $name()(x in $xr, y in $yr, z in $zr) -> Vector3<$t> {
                Vector3 { x, y, z }
            }
        }
    };
}

/// Generates unit quaternions from an axis (rejecting near-zero axes) and an
/// angle in degrees.
#[cfg(test)]
#[macro_export]
macro_rules! prop_unit_quaternion {
    ($name: ident, $ar: expr, $degr: expr) => {
        prop_compose! {
            fn $name()(
                x in $ar, y in $ar, z in $ar, deg in $degr
            ) -> Quaternion {
                let axis = Vector3::new(x, y, z);
                if axis.length_squared() < 1e-4 {
                    Quaternion::default()
                } else {
                    Quaternion::from_axis_angle(&axis, deg)
                }
            }
        }
    };
}

/// Generates rigid transforms from a translation range and a unit
/// quaternion strategy.
#[cfg(test)]
#[macro_export]
macro_rules! prop_rigid_transform {
    ($name: ident, $tr: expr, $q: expr) => {
        prop_compose! {
            fn $name()(
                x in $tr, y in $tr, z in $tr, r in $q
            ) -> RigidTransform {
                RigidTransform::new(Vector3::new(x, y, z), r)
            }
        }
    };
}

mod common;
mod frame;
mod matrix4x4;
mod quaternion;
mod rigid_transform;
mod vector3;
mod vector4;

// Re-export
pub use common::*;
pub use frame::*;
pub use matrix4x4::*;
pub use quaternion::*;
pub use rigid_transform::*;
pub use vector3::*;
pub use vector4::*;
