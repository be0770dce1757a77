use burrow_geom::{Mat4, Vec3, wrap_radians};
use proptest::num::f32::NORMAL;
use proptest::prelude::*;
use proptest::strategy::Strategy;

fn approx_abs_rel(a: f32, b: f32, atol: f32, rtol: f32) -> bool {
    let diff = (a - b).abs();
    let scale = a.abs().max(b.abs());
    diff <= atol + rtol * scale
}

fn vapprox_abs_rel(a: Vec3, b: Vec3, atol: f32, rtol: f32) -> bool {
    approx_abs_rel(a.x, b.x, atol, rtol)
        && approx_abs_rel(a.y, b.y, atol, rtol)
        && approx_abs_rel(a.z, b.z, atol, rtol)
}

fn bounded_f32() -> impl Strategy<Value = f32> {
    NORMAL.prop_filter("bounded", |v| v.is_finite() && v.abs() <= 1e4)
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_f32(), bounded_f32(), bounded_f32()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    // Rotation about Y keeps lengths and the Y component
    #[test]
    fn rotation_y_is_rigid(v in arb_vec3(), angle in -10.0f32..10.0) {
        let r = Mat4::rotation_y(angle).transform_vector(v);
        prop_assert!(approx_abs_rel(r.length(), v.length(), 1e-3, 1e-4));
        prop_assert!(approx_abs_rel(r.y, v.y, 1e-6, 1e-6));
    }

    // Translating then un-translating is the identity on points
    #[test]
    fn translation_inverse(p in arb_vec3(), t in arb_vec3()) {
        let m = Mat4::translation(-t) * Mat4::translation(t);
        prop_assert!(vapprox_abs_rel(m.transform_point(p), p, 1e-2, 1e-4));
    }

    // Vectors never pick up translation
    #[test]
    fn vectors_ignore_translation(v in arb_vec3(), t in arb_vec3()) {
        prop_assert_eq!(Mat4::translation(t).transform_vector(v), v);
    }

    #[test]
    fn wrap_radians_range(a in -100.0f32..100.0) {
        let w = wrap_radians(a);
        prop_assert!(w >= 0.0);
        prop_assert!(w < std::f32::consts::TAU);
    }
}
