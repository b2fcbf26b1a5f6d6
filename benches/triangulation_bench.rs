use criterion::{criterion_group, criterion_main, Criterion};
use geo_kernel::mesh::Wire;
use geo_kernel::{triangulation, triangulation_skeleton};
use geo_kernel::SharedBuf;
use glam::DVec3;
use std::f64::consts::TAU;

/// A convex N-gon inscribed in a unit circle: easy for ear-clipping, and a
/// baseline the skeleton fallback should roughly match in triangle count.
fn convex_ngon(n: usize) -> Vec<DVec3> {
  (0..n)
    .map(|i| {
      let a = TAU * i as f64 / n as f64;
      DVec3::new(a.cos(), a.sin(), 0.0)
    })
    .collect()
}

/// A "comb" polygon with many reflex vertices, the pathological case for
/// ear-clipping's vertex-containment check.
fn comb(teeth: usize) -> Vec<DVec3> {
  let mut pts = vec![DVec3::new(0.0, 0.0, 0.0)];
  for t in 0..teeth {
    let x0 = t as f64;
    pts.push(DVec3::new(x0 + 0.3, 1.0, 0.0));
    pts.push(DVec3::new(x0 + 0.5, 0.2, 0.0));
    pts.push(DVec3::new(x0 + 0.7, 1.0, 0.0));
  }
  pts.push(DVec3::new(teeth as f64, 0.0, 0.0));
  pts
}

fn bench_earclip_convex(c: &mut Criterion) {
  let pts = convex_ngon(64);
  let indices: Vec<u32> = (0..pts.len() as u32).collect();
  c.bench_function("triangulation_convex_64gon", |b| {
    b.iter(|| {
      let points = SharedBuf::new(pts.clone());
      let wire = Wire::<()>::from_indices(points, indices.clone());
      triangulation(&wire, Some(DVec3::Z)).unwrap()
    });
  });
}

fn bench_skeleton_comb(c: &mut Criterion) {
  let pts = comb(16);
  let indices: Vec<u32> = (0..pts.len() as u32).collect();
  c.bench_function("triangulation_skeleton_comb_16_teeth", |b| {
    b.iter(|| {
      let points = SharedBuf::new(pts.clone());
      triangulation_skeleton::<()>(points, &indices, Some(DVec3::Z), SharedBuf::new(vec![()])).unwrap()
    });
  });
}

criterion_group!(benches, bench_earclip_convex, bench_skeleton_comb);
criterion_main!(benches);
