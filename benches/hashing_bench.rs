use criterion::{criterion_group, criterion_main, Criterion};
use geo_kernel::hashing::Space;
use geo_kernel::mesh::Mesh;
use geo_kernel::PositionMap;
use glam::DVec3;

fn grid_points(n: usize) -> Vec<DVec3> {
  let mut points = Vec::with_capacity(n * n);
  for i in 0..n {
    for j in 0..n {
      points.push(DVec3::new(i as f64 * 0.37, j as f64 * 0.37, 0.0));
    }
  }
  points
}

fn bench_position_map_insert(c: &mut Criterion) {
  let points = grid_points(64);
  c.bench_function("position_map_insert_4096", |b| {
    b.iter(|| {
      let mut map = PositionMap::new(1.0);
      for (i, &p) in points.iter().enumerate() {
        map.add(Space::Point(p), i as u32);
      }
      map
    });
  });
}

fn bench_mesh_mergeclose(c: &mut Criterion) {
  let points = grid_points(32);
  let n = points.len() as u32;
  let mut faces = Vec::new();
  let width = 32u32;
  for i in 0..width - 1 {
    for j in 0..width - 1 {
      let a = i * width + j;
      let b = a + 1;
      let c2 = a + width;
      let d = c2 + 1;
      if a < n && b < n && c2 < n && d < n {
        faces.push([a, b, d]);
        faces.push([a, d, c2]);
      }
    }
  }
  c.bench_function("mesh_mergeclose_32x32_grid", |b| {
    b.iter(|| {
      let mut mesh = Mesh::<()>::from_faces(points.clone(), faces.clone());
      mesh.mergeclose(1e-9);
      mesh
    });
  });
}

criterion_group!(benches, bench_position_map_insert, bench_mesh_mergeclose);
criterion_main!(benches);
