use common::{Particle, Vec2};
use fxhash::FxHashMap;
use rand::prelude::*;
use ztree::{build, morton, walk, Tree, Visit};

fn random_particles(seed: u64, n: usize, half_extent: f32) -> Vec<Particle> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            Particle::new(
                Vec2::new(
                    rng.gen_range(-half_extent..half_extent),
                    rng.gen_range(-half_extent..half_extent),
                ),
                Vec2::zeros(),
                rng.gen_range(0.1..4.0),
                0.05,
            )
        })
        .collect()
}

fn sorted_with_codes(mut particles: Vec<Particle>) -> Vec<Particle> {
    for p in particles.iter_mut() {
        p.code = morton::encode(p.xy);
    }
    particles.sort_by_key(|p| p.code);
    particles
}

fn masked(p: &Particle, mask: u64) -> Option<u64> {
    p.code.map(|z| z & mask)
}

fn build_sorted(particles: &[Particle]) -> Tree {
    build(particles, masked).expect("non-empty build")
}

#[test]
fn empty_input_builds_no_tree() {
    assert!(build(&[], masked).is_none());
}

#[test]
fn single_particle_builds_a_lone_root() {
    let particles = sorted_with_codes(vec![Particle::new(
        Vec2::new(0.5, -0.25),
        Vec2::zeros(),
        2.0,
        0.1,
    )]);
    let tree = build_sorted(&particles);
    assert_eq!(tree.node_count(), 1);
    let root = tree.node(tree.root());
    assert_eq!((root.first(), root.last()), (0, 1));
    assert!(root.is_leaf());
    assert_eq!(root.aggregate().mass, 2.0);
    assert_eq!(root.aggregate().center, Vec2::new(0.5, -0.25));
}

#[test]
fn morton_sort_partitions_the_plane_into_quadrant_runs() {
    // 10k uniform points in [-1, 1]^2 at the default precision. Masking the
    // key down to 24 bits per component groups points into grid cells of
    // 256 fixed-point units (0.5 world units), i.e. a 4x4 tiling of the
    // region: 16 groups, each a contiguous run of the sorted array, each
    // spatially confined to its own cell.
    let particles = sorted_with_codes(random_particles(1234, 10_000, 1.0));
    let mask = !0u64 << 16;

    let mut runs: FxHashMap<u64, (usize, usize)> = FxHashMap::default();
    let mut current: Option<(u64, usize)> = None;
    for (i, p) in particles.iter().enumerate() {
        let key = p.code.expect("in range") & mask;
        match current {
            Some((k, _)) if k == key => {}
            Some((k, start)) => {
                assert!(
                    runs.insert(k, (start, i)).is_none(),
                    "masked code {k:#x} split across non-adjacent runs"
                );
                current = Some((key, i));
            }
            None => current = Some((key, 0)),
        }
    }
    let (k, start) = current.unwrap();
    assert!(runs.insert(k, (start, particles.len())).is_none());
    assert_eq!(runs.len(), 16);

    // Each run sits inside one axis-aligned cell of the fixed-point grid.
    let cell_of = |p: &Particle| {
        let xu = ((p.xy.x * morton::DEFAULT_PRECISION) as i32 as u32) ^ 0x8000_0000;
        let yu = ((p.xy.y * morton::DEFAULT_PRECISION) as i32 as u32) ^ 0x8000_0000;
        (xu >> 8, yu >> 8)
    };
    let mut seen_cells = FxHashMap::default();
    for (&key, &(start, end)) in runs.iter() {
        let cell = cell_of(&particles[start]);
        for p in &particles[start..end] {
            assert_eq!(cell_of(p), cell);
        }
        assert!(
            seen_cells.insert(cell, key).is_none(),
            "two runs share cell {cell:?}"
        );
    }
}

#[test]
fn child_ranges_partition_every_parent() {
    let particles = sorted_with_codes(random_particles(99, 2_000, 2.0));
    let tree = build_sorted(&particles);

    let root = tree.node(tree.root());
    assert_eq!((root.first(), root.last()), (0, particles.len()));

    let mut stack = vec![tree.root()];
    while let Some(handle) = stack.pop() {
        let node = tree.node(handle);
        if node.is_leaf() {
            continue;
        }
        let mut cursor = node.first();
        for child in tree.children(handle) {
            let c = tree.node(child);
            assert_eq!(c.first(), cursor, "gap or overlap in child ranges");
            assert!(c.last() > c.first());
            cursor = c.last();
            stack.push(child);
        }
        assert_eq!(cursor, node.last(), "children do not cover the parent");
    }
}

#[test]
fn every_particle_lies_inside_its_ancestors_bounding_circles() {
    let particles = sorted_with_codes(random_particles(7, 1_500, 3.0));
    let tree = build_sorted(&particles);

    let mut stack = vec![tree.root()];
    while let Some(handle) = stack.pop() {
        let node = tree.node(handle);
        let agg = node.aggregate();
        for p in &particles[node.first()..node.last()] {
            let d = (p.xy - agg.center).norm();
            assert!(
                d <= agg.radius + 1e-3,
                "particle at {:?} escapes node [{}, {}): d = {d}, radius = {}",
                p.xy,
                node.first(),
                node.last(),
                agg.radius
            );
        }
        for child in tree.children(handle) {
            stack.push(child);
        }
    }
}

#[test]
fn sibling_order_follows_the_sorted_array() {
    let particles = sorted_with_codes(random_particles(21, 800, 2.0));
    let tree = build_sorted(&particles);
    let mut stack = vec![tree.root()];
    while let Some(handle) = stack.pop() {
        let mut prev_first = None;
        for child in tree.children(handle) {
            let c = tree.node(child);
            if let Some(prev) = prev_first {
                assert!(c.first() > prev);
            }
            prev_first = Some(c.first());
            stack.push(child);
        }
    }
}

#[test]
fn traversal_presents_each_node_at_most_once() {
    let particles = sorted_with_codes(random_particles(5, 600, 2.0));
    let tree = build_sorted(&particles);

    let mut visited = 0usize;
    walk(&tree, |_, _| {
        visited += 1;
        Visit::Deeper
    });
    // The root is never presented.
    assert_eq!(visited, tree.node_count() - 1);

    let mut pruned_visits = 0usize;
    walk(&tree, |_, _| {
        pruned_visits += 1;
        Visit::Ignore
    });
    assert_eq!(pruned_visits, tree.children(tree.root()).count());
}

#[test]
fn aggregates_conserve_mass_up_the_tree() {
    let particles = sorted_with_codes(random_particles(11, 1_000, 2.0));
    let tree = build_sorted(&particles);
    let total: f32 = particles.iter().map(|p| p.mass).sum();
    let root_mass = tree.node(tree.root()).aggregate().mass;
    assert!((root_mass - total).abs() <= total * 1e-4);

    let mut stack = vec![tree.root()];
    while let Some(handle) = stack.pop() {
        let node = tree.node(handle);
        if node.is_leaf() {
            continue;
        }
        let child_mass: f32 = tree
            .children(handle)
            .map(|c| tree.node(c).aggregate().mass)
            .sum();
        let own = node.aggregate().mass;
        assert!((child_mass - own).abs() <= own * 1e-4);
        for child in tree.children(handle) {
            stack.push(child);
        }
    }
}

#[test]
fn identical_positions_collapse_into_one_group() {
    // Every particle shares every prefix; the root's single child spans the
    // whole range.
    let particles = sorted_with_codes(vec![
        Particle::new(Vec2::new(0.25, 0.25), Vec2::zeros(), 1.0, 0.1);
        8
    ]);
    let tree = build_sorted(&particles);
    let root = tree.node(tree.root());
    assert_eq!((root.first(), root.last()), (0, 8));
    let children: Vec<_> = tree.children(tree.root()).collect();
    assert_eq!(children.len(), 1);
    let only = tree.node(children[0]);
    assert_eq!((only.first(), only.last()), (0, 8));
    assert_eq!(tree.children(children[0]).count(), 8);
}

#[test]
fn out_of_range_particles_still_join_the_tree() {
    let mut particles = random_particles(3, 50, 1.0);
    // Push two particles far outside the representable grid.
    particles.push(Particle::new(
        Vec2::new(5.0e6, 0.0),
        Vec2::zeros(),
        1.0,
        0.1,
    ));
    particles.push(Particle::new(
        Vec2::new(-5.0e6, 1.0),
        Vec2::zeros(),
        1.0,
        0.1,
    ));
    let particles = sorted_with_codes(particles);
    assert!(particles[0].code.is_none());
    assert!(particles[1].code.is_none());

    let tree = build_sorted(&particles);
    let root = tree.node(tree.root());
    assert_eq!((root.first(), root.last()), (0, particles.len()));
    let total: f32 = particles.iter().map(|p| p.mass).sum();
    assert!((root.aggregate().mass - total).abs() <= total * 1e-4);
}
