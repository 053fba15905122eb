//! # Collar Features
//!
//! Solids for everything except the slot cutters, already placed in collar
//! space: the base body (or its two boolean operands), ramp deflectors, the
//! torch hole cutter and the seating lip.

use crate::dimensions::{CollarDimensions, LipDimensions, RampDimensions};
use crate::slot::SlotDescriptor;
use glam::DVec3;
use solid_mesh::primitives::{create_box, create_cup, create_cylinder, create_tube};
use solid_mesh::{MeshError, Solid, Transform};

/// Outer cylinder standing on z = 0 and the hollowing cutter.
///
/// The cutter starts at the floor top and reaches `top_overshoot` past the
/// collar top so the boolean never meets a coplanar face there.
pub fn base_operands(dims: &CollarDimensions) -> Result<(Solid, Solid), MeshError> {
    let outer = Transform::translation(DVec3::new(0.0, 0.0, dims.height / 2.0))
        .apply(&create_cylinder(dims.outer_radius, dims.height, dims.segments)?);

    let hollow_height = dims.height - dims.floor + dims.top_overshoot;
    let hollow = Transform::translation(DVec3::new(0.0, 0.0, dims.floor + hollow_height / 2.0))
        .apply(&create_cylinder(dims.hollow_radius, hollow_height, dims.segments)?);

    Ok((outer, hollow))
}

/// The hollow base authored directly, no boolean involved.
pub fn authored_base(dims: &CollarDimensions) -> Result<Solid, MeshError> {
    create_cup(
        dims.outer_radius,
        dims.hollow_radius,
        dims.height,
        dims.floor,
        dims.segments,
    )
}

/// Deflector plate for `slot`.
///
/// Tilted about its long axis first, then yawed and placed like a cutter
/// with its centre at the trailing-edge offset.
pub fn ramp_deflector(ramp: &RampDimensions, slot: &SlotDescriptor) -> Result<Solid, MeshError> {
    let plate = create_box(DVec3::new(ramp.length, ramp.thickness, ramp.height))?;
    let anchor = DVec3::new(ramp.center_radius, ramp.offset, ramp.center_z);
    let placement = Transform::rotation_y(ramp.tilt).then(slot.placement(ramp.yaw, anchor));
    Ok(placement.apply(&plate))
}

/// Torch entry cutter: three floor thicknesses tall, centred on the floor's
/// mid-plane so it pierces both floor faces.
pub fn torch_cutter(dims: &CollarDimensions) -> Result<Solid, MeshError> {
    let cutter = create_cylinder(dims.torch_radius, dims.floor * 3.0, dims.hole_segments)?;
    Ok(Transform::translation(DVec3::new(0.0, 0.0, dims.floor / 2.0)).apply(&cutter))
}

/// Seating lip ring, sunk slightly into the collar top.
pub fn lip_ring(dims: &CollarDimensions, lip: &LipDimensions) -> Result<Solid, MeshError> {
    let ring = create_tube(lip.outer_radius, lip.inner_radius, lip.height, dims.segments)?;
    Ok(Transform::translation(DVec3::new(0.0, 0.0, lip.bottom)).apply(&ring))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::CollarParameters;
    use approx::assert_relative_eq;
    use solid_mesh::is_watertight;

    fn dims(iteration: u32) -> CollarDimensions {
        let mut params = CollarParameters::iteration(iteration).unwrap();
        params.segments = 24;
        CollarDimensions::from(&params)
    }

    #[test]
    fn test_base_operands() {
        let d = dims(3);
        let (outer, hollow) = base_operands(&d).unwrap();
        let ob = outer.bounding_box();
        assert_relative_eq!(ob.min.z, 0.0, epsilon = 1e-9);
        assert_relative_eq!(ob.max.z, 63.5, epsilon = 1e-9);
        assert_relative_eq!(ob.extents().x, 152.4, epsilon = 1e-9);

        let hb = hollow.bounding_box();
        assert_relative_eq!(hb.min.z, d.floor, epsilon = 1e-9);
        assert!(hb.max.z > ob.max.z);
    }

    #[test]
    fn test_authored_base() {
        let d = dims(2);
        let cup = authored_base(&d).unwrap();
        assert!(is_watertight(&cup));
        assert!(!cup.contains_point(DVec3::new(0.0, 0.0, d.floor + 1.0)));
        assert!(cup.contains_point(DVec3::new(0.0, 0.0, d.floor / 2.0)));
    }

    #[test]
    fn test_ramp_deflector_position() {
        let d = dims(3);
        let ramp = d.ramps.clone().unwrap();
        let slot = SlotDescriptor::new(0, 6, d.slots.ramp_angle);
        let plate = ramp_deflector(&ramp, &slot).unwrap();
        assert!(is_watertight(&plate));
        assert!(plate.contains_point(DVec3::new(ramp.center_radius, ramp.offset, ramp.center_z)));
        assert_relative_eq!(
            plate.signed_volume(),
            ramp.length * ramp.thickness * ramp.height,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_tilted_deflector_rises_inward() {
        let d = dims(4);
        let ramp = d.ramps.clone().unwrap();
        assert!(ramp.tilt > 0.0);
        let slot = SlotDescriptor::new(0, 6, 0.0);
        let level = RampDimensions { tilt: 0.0, ..ramp.clone() };
        let tilted = ramp_deflector(&ramp, &slot).unwrap();
        let flat = ramp_deflector(&level, &slot).unwrap();
        assert!(tilted.bounding_box().max.z > flat.bounding_box().max.z);
    }

    #[test]
    fn test_torch_cutter_spans_floor() {
        let d = dims(3);
        let bbox = torch_cutter(&d).unwrap().bounding_box();
        assert_relative_eq!(bbox.min.z, -d.floor, epsilon = 1e-9);
        assert_relative_eq!(bbox.max.z, 2.0 * d.floor, epsilon = 1e-9);
        assert_relative_eq!(bbox.extents().x, 2.0 * d.torch_radius, epsilon = 1e-9);
    }

    #[test]
    fn test_lip_ring() {
        let d = dims(4);
        let lip = d.lip.clone().unwrap();
        let ring = lip_ring(&d, &lip).unwrap();
        assert!(is_watertight(&ring));
        let bbox = ring.bounding_box();
        assert!(bbox.min.z < d.height);
        assert_relative_eq!(bbox.max.z, d.overall_height(), epsilon = 1e-9);
    }
}
