use super::*;

#[test]
fn edgekey_is_order_independent() {
  assert_eq!(edgekey(3, 1), edgekey(1, 3));
}

#[test]
fn connef_maps_oriented_edges_to_their_face() {
  let faces = [[0u32, 1, 2]];
  let map = connef(&faces);
  assert_eq!(map[&(0, 1)], 0);
  assert_eq!(map[&(1, 2)], 0);
  assert_eq!(map[&(2, 0)], 0);
  assert!(!map.contains_key(&(1, 0)));
}

#[test]
fn connpe_lists_both_endpoints() {
  let edges = [(0u32, 1u32), (1, 2)];
  let map = connpe(&edges);
  assert_eq!(map[&1].len(), 2);
  assert_eq!(map[&0].len(), 1);
}

#[test]
fn connexity_counts_degree() {
  let edges = [(0u32, 1u32), (1, 2), (2, 0)];
  let map = connexity(&edges);
  assert_eq!(map[&0], 2);
  assert_eq!(map[&1], 2);
}

#[test]
fn lineedges_does_not_close_the_loop() {
  let indices = [0u32, 1, 2, 3];
  let edges = lineedges(&indices);
  assert_eq!(edges, vec![(0, 1), (1, 2), (2, 3)]);
}

#[test]
fn suites_chains_a_simple_path() {
  let edges = [(0u32, 1u32), (1, 2), (2, 3)];
  let result = suites(&edges, true, false, false);
  assert_eq!(result, vec![vec![0, 1, 2, 3]]);
}

#[test]
fn suites_closes_a_loop_first_closure_wins() {
  let edges = [(0u32, 1u32), (1, 2), (2, 0)];
  let result = suites(&edges, false, false, true);
  assert_eq!(result.len(), 1);
  let chain = &result[0];
  assert_eq!(chain.first(), chain.last());
  assert_eq!(chain.len(), 4);
}

#[test]
fn suites_cut_stops_at_a_branch_point() {
  // point 1 has three incident edges: a branch.
  let edges = [(0u32, 1u32), (1, 2), (1, 3)];
  let result = suites(&edges, false, true, false);
  assert!(result.iter().all(|s| s.len() <= 2));
}
