use crate::math::{abs, add, dot, mul, normalize, powv, sub, v, Ray, B1, B2, B3, O, V3};
use rand::{thread_rng, Rng};
use rayon::prelude::*;

pub const MAX_STEPS: usize = 100;
pub const HIT_EPS: f64 = 0.001;
pub const MAX_DIST: f64 = 20.0;
const NORMAL_EPS: f64 = 1e-4;
const GAMMA_EXP: f64 = 0.4545;

/// Uniforms for one frame, snapshotted by the host before rendering starts.
/// The pointer position rides along like the other uniforms even though the
/// current scene never samples it.
#[derive(Clone, Copy, Debug)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub mouse: (f64, f64),
    pub time: f64,
}

pub trait Renderable {
    fn sdf(&self, x: &V3) -> f64;
}

pub struct Sphere {
    pub center: V3,
    pub radius: f64,
}

/// Half-space below `y = height`, i.e. a ground plane.
pub struct Ground {
    pub height: f64,
}

/// Soft Boolean union: folds `smin` over its members, so surfaces melt into
/// each other instead of meeting at a crease. `k` is the blend radius.
pub struct SoftUnion {
    pub renderables: Vec<Box<dyn Renderable>>,
    pub k: f64,
}

impl Renderable for Sphere {
    fn sdf(&self, x: &V3) -> f64 {
        abs(&sub(x, &self.center)) - self.radius
    }
}

impl Renderable for Ground {
    fn sdf(&self, x: &V3) -> f64 {
        x.y - self.height
    }
}

impl Renderable for SoftUnion {
    fn sdf(&self, x: &V3) -> f64 {
        let mut members = self.renderables.iter();
        let first = match members.next() {
            None => return 0.,
            Some(r) => r.sdf(x),
        };
        members.fold(first, |acc, r| smin(acc, r.sdf(x), self.k))
    }
}

/// Polynomial smooth minimum. Equals `min(a, b)` once `|a - b| >= k`.
pub fn smin(a: f64, b: f64, k: f64) -> f64 {
    let h = (k - (a - b).abs()).max(0.);
    a.min(b) - h * h / (4. * k)
}

/// The animated scene: two orbiting spheres melted together, the pair melted
/// into a ground plane with a tighter blend.
pub fn scene(time: f64) -> SoftUnion {
    let bob = Sphere {
        center: v(time.sin() * 0.2, time.cos() * 0.3, time.sin() * 0.2),
        radius: 0.8,
    };
    let orbiter = Sphere {
        center: v(-time.sin(), -time.cos(), time.cos()),
        radius: 0.7,
    };
    let blob = SoftUnion {
        renderables: vec![Box::new(bob), Box::new(orbiter)],
        k: 1.8,
    };
    SoftUnion {
        // the plane seeds the fold so the blend runs plane-vs-blob
        renderables: vec![Box::new(Ground { height: -1.1 }), Box::new(blob)],
        k: 0.8,
    }
}

/// Outcome of sphere tracing a ray. `signed_distance` collapses it back to
/// the `-1` miss sentinel where a plain scalar is wanted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum March {
    Hit(f64),
    Miss,
}

impl March {
    pub fn signed_distance(&self) -> f64 {
        match self {
            March::Hit(t) => *t,
            March::Miss => -1.,
        }
    }
}

/// Sphere tracing: step by the field value, which never overshoots because
/// the field underestimates the distance to the surface.
pub fn cast_ray(s: &impl Renderable, origin: &V3, dir: &V3) -> March {
    let mut t = 0.;
    for _ in 0..MAX_STEPS {
        let pos = add(origin, &mul(t, dir));
        let h = s.sdf(&pos);
        if h < HIT_EPS {
            break;
        }
        t += h;
        if t > MAX_DIST {
            break;
        }
    }
    if t > MAX_DIST {
        March::Miss
    } else {
        March::Hit(t)
    }
}

/// Central-difference gradient of the field, normalized.
pub fn calc_normal(s: &impl Renderable, x: &V3) -> V3 {
    let dx = mul(NORMAL_EPS, &B1);
    let dy = mul(NORMAL_EPS, &B2);
    let dz = mul(NORMAL_EPS, &B3);

    normalize(&v(
        s.sdf(&add(x, &dx)) - s.sdf(&sub(x, &dx)),
        s.sdf(&add(x, &dy)) - s.sdf(&sub(x, &dy)),
        s.sdf(&add(x, &dz)) - s.sdf(&sub(x, &dz)),
    ))
}

fn lambert(normal: &V3, light_dir: &V3) -> f64 {
    dot(normal, light_dir).clamp(0., 1.)
}

/// Schlick-style rim term: brightest where the view grazes the surface.
fn fresnel(normal: &V3, view_dir: &V3) -> f64 {
    let bias = 0.;
    let intensity = 0.5;
    let power = 2.;
    (bias + intensity * (1. + dot(view_dir, normal)).abs().powf(power)).clamp(0., 1.)
}

/// Binary shadow: re-march from just above the surface toward the light and
/// call the point lit iff the ray escapes the scene.
pub fn shadow(s: &impl Renderable, pos: &V3, normal: &V3, light_dir: &V3) -> f64 {
    let lifted = add(pos, &mul(HIT_EPS, normal));
    if cast_ray(s, &lifted, light_dir).signed_distance() <= 0. {
        1.
    } else {
        0.
    }
}

/// Shade one ray against the scene. Returns linear color; rays that escape
/// stay black.
pub fn render(s: &impl Renderable, origin: &V3, dir: &V3) -> V3 {
    let t = match cast_ray(s, origin, dir) {
        March::Miss => return O,
        March::Hit(t) => t,
    };
    let pos = add(origin, &mul(t, dir));
    let normal = calc_normal(s, &pos);

    let sun_dir = normalize(&v(0.8, 0.4, -0.2));
    let sky_dir = B2;
    let albedo = v(0.8, 0.3, 0.2);

    let sun = lambert(&normal, &sun_dir) * shadow(s, &pos, &normal, &sun_dir);
    let sky = lambert(&normal, &sky_dir) * shadow(s, &pos, &normal, &sky_dir);

    let mut col = mul(0.15, &albedo);
    col = add(&col, &mul(0.5 * fresnel(&normal, dir), &v(1., 1., 1.)));
    col = add(&col, &mul(sun, &v(0.8, 0.5, 0.2)));
    col = add(&col, &mul(sky, &v(0.7, 0.7, 0.8)));
    col
}

/// Gamma-encode a linear color for display.
pub fn gamma(col: &V3) -> V3 {
    powv(col, GAMMA_EXP)
}

pub const VIEW_POSITION: V3 = V3 {
    x: 0.,
    y: 0.,
    z: 6.,
};
const FOCAL: f64 = -3.5;

/// Camera ray through a fragment coordinate. `frag_y` counts from the bottom
/// edge up, GL style; the caller flips image rows.
pub fn primary_ray(frame: &Frame, frag_x: f64, frag_y: f64) -> Ray {
    let px = (2. * frag_x - frame.width as f64) / frame.height as f64;
    let py = (2. * frag_y - frame.height as f64) / frame.height as f64;
    Ray {
        x: VIEW_POSITION,
        d: normalize(&v(px, py, FOCAL)),
    }
}

/// Render a whole frame, one independent evaluation per pixel, `antialias`²
/// subsamples each. Returns gamma-encoded colors in row-major order, top row
/// first. With `jitter` the subsample offsets are randomized instead of a
/// fixed grid.
pub fn render_frame(frame: &Frame, antialias: u32, jitter: bool) -> Vec<V3> {
    let w = frame.width as usize;
    let h = frame.height as usize;
    let frame = *frame;
    let antialias = antialias.max(1);
    (0..w * h)
        .into_par_iter()
        .map(move |i| (i % w, i / w))
        .map(move |(x, y)| {
            let s = scene(frame.time);
            let mut rng = thread_rng();
            let subpixel_width = 1. / antialias as f64;
            let mut pix_sum = O;
            for x_jitter in 0..antialias {
                for y_jitter in 0..antialias {
                    let (off_x, off_y) = if jitter {
                        (
                            (x_jitter as f64 + rng.gen::<f64>()) * subpixel_width,
                            (y_jitter as f64 + rng.gen::<f64>()) * subpixel_width,
                        )
                    } else {
                        (
                            (x_jitter as f64 + 0.5) * subpixel_width,
                            (y_jitter as f64 + 0.5) * subpixel_width,
                        )
                    };
                    let frag_x = x as f64 + off_x;
                    let frag_y = (h - 1 - y) as f64 + off_y;
                    let ray = primary_ray(&frame, frag_x, frag_y);
                    pix_sum = pix_sum + render(&s, &ray.x, &ray.d);
                }
            }
            gamma(&mul(
                1. / (antialias as f64 * antialias as f64),
                &pix_sum,
            ))
        })
        .collect()
}
