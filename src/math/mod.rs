use std::ops;

#[derive(Clone, Copy, Debug)]
pub struct V3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A ray with origin `x` and direction `d`. `d` is kept normalized by
/// construction everywhere rays are built.
#[derive(Clone, Debug)]
pub struct Ray {
    pub x: V3,
    pub d: V3,
}

pub fn v(x: f64, y: f64, z: f64) -> V3 {
    V3 { x, y, z }
}

pub fn sub(x: &V3, y: &V3) -> V3 {
    V3 {
        x: x.x - y.x,
        y: x.y - y.y,
        z: x.z - y.z,
    }
}

pub fn add(x: &V3, y: &V3) -> V3 {
    V3 {
        x: x.x + y.x,
        y: x.y + y.y,
        z: x.z + y.z,
    }
}

pub fn mul(scalar: f64, x: &V3) -> V3 {
    V3 {
        x: x.x * scalar,
        y: x.y * scalar,
        z: x.z * scalar,
    }
}

pub fn abs2(x: &V3) -> f64 {
    x.x * x.x + x.y * x.y + x.z * x.z
}

pub fn abs(x: &V3) -> f64 {
    abs2(x).sqrt()
}

pub fn dist(x: &V3, y: &V3) -> f64 {
    abs(&sub(x, y))
}

pub fn normalize(x: &V3) -> V3 {
    mul(1. / abs(x), x)
}

pub fn dot(x: &V3, y: &V3) -> f64 {
    x.x * y.x + x.y * y.y + x.z * y.z
}

/// Component-wise power, used for gamma encoding a linear color.
pub fn powv(x: &V3, e: f64) -> V3 {
    V3 {
        x: x.x.powf(e),
        y: x.y.powf(e),
        z: x.z.powf(e),
    }
}

impl ops::Add<V3> for V3 {
    type Output = V3;

    fn add(self, rhs: V3) -> V3 {
        add(&self, &rhs)
    }
}

impl ops::Sub<V3> for V3 {
    type Output = V3;

    fn sub(self, rhs: V3) -> V3 {
        sub(&self, &rhs)
    }
}

impl ops::Mul<V3> for f64 {
    type Output = V3;

    fn mul(self, rhs: V3) -> Self::Output {
        mul(self, &rhs)
    }
}

pub const B1: V3 = V3 {
    x: 1.,
    y: 0.,
    z: 0.,
};

pub const B2: V3 = V3 {
    x: 0.,
    y: 1.,
    z: 0.,
};

pub const B3: V3 = V3 {
    x: 0.,
    y: 0.,
    z: 1.,
};

pub const O: V3 = V3 {
    x: 0.,
    y: 0.,
    z: 0.,
};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn basis_is_orthonormal() {
        assert_eq!(dot(&B1, &B2), 0.);
        assert_eq!(dot(&B2, &B3), 0.);
        assert_eq!(dot(&B1, &B3), 0.);
        assert_eq!(abs(&B1), 1.);
        assert_eq!(abs(&B2), 1.);
        assert_eq!(abs(&B3), 1.);
    }

    #[test]
    fn operators_match_free_functions() {
        let a = v(1., -2., 3.);
        let b = v(0.5, 4., -1.);
        let s = a + b;
        let d = a - b;
        let m = 2.0 * a;
        assert_eq!((s.x, s.y, s.z), (1.5, 2., 2.));
        assert_eq!((d.x, d.y, d.z), (0.5, -6., 4.));
        assert_eq!((m.x, m.y, m.z), (2., -4., 6.));
    }

    #[test]
    fn powv_applies_per_channel() {
        let g = powv(&v(0., 0.25, 1.), 0.5);
        assert!(g.x == 0. && (g.y - 0.5).abs() < 1e-12 && g.z == 1.);
    }

    proptest! {
        #[test]
        fn normalize_yields_unit_vectors(
            x in -100.0..100.0f64,
            y in -100.0..100.0f64,
            z in -100.0..100.0f64,
        ) {
            let p = v(x, y, z);
            prop_assume!(abs2(&p) > 1e-6);
            prop_assert!((abs(&normalize(&p)) - 1.).abs() < 1e-9);
        }

        #[test]
        fn dist_is_symmetric(
            x in -100.0..100.0f64,
            y in -100.0..100.0f64,
            z in -100.0..100.0f64,
        ) {
            let p = v(x, y, z);
            let q = v(z, x, y);
            prop_assert!((dist(&p, &q) - dist(&q, &p)).abs() < 1e-12);
        }
    }
}
