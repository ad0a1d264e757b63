use glam::{Mat3, Quat, Vec3};

/// Rotation matrix for XYZ Euler angles (radians), applied X first, then Y, then Z.
pub(crate) fn euler_xyz_to_quat(euler: Vec3) -> Quat {
    Quat::from_rotation_z(euler.z) * Quat::from_rotation_y(euler.y) * Quat::from_rotation_x(euler.x)
}

/// Inverse of [`euler_xyz_to_quat`] for a pure rotation matrix.
pub(crate) fn mat3_to_euler_xyz(m: Mat3) -> Vec3 {
    // R = Rz(c) * Ry(b) * Rx(a); columns are (r00, r10, r20), (r01, r11, r21), (r02, r12, r22).
    let r00 = m.x_axis.x;
    let r10 = m.x_axis.y;
    let r20 = m.x_axis.z;
    let r21 = m.y_axis.z;
    let r22 = m.z_axis.z;

    let b = (-r20).clamp(-1.0, 1.0).asin();
    if r20.abs() < 1.0 - 1e-6 {
        Vec3::new(r21.atan2(r22), b, r10.atan2(r00))
    } else {
        // gimbal lock: fold the whole yaw into x
        let r01 = m.y_axis.x;
        let r11 = m.y_axis.y;
        Vec3::new((-r20 * r01).atan2(r11), b, 0.0)
    }
}

/// Euler rotation that points an object's local -Z axis from `from` toward `target`, keeping
/// its local +Y axis as close to world +Z as possible.
pub(crate) fn track_to_euler(from: Vec3, target: Vec3) -> Vec3 {
    let forward = (target - from).normalize_or_zero();
    if forward == Vec3::ZERO {
        return Vec3::ZERO;
    }

    let mut right = forward.cross(Vec3::Z);
    if right.length_squared() < 1e-12 {
        right = Vec3::X;
    }
    let right = right.normalize();
    let up = right.cross(forward);

    mat3_to_euler_xyz(Mat3::from_cols(right, up, -forward))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
