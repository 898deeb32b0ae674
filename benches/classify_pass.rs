//! Measure a full classification pass, the work done once per game tick
//!
//! Player stands in the middle of an open Region with every tile around them
//! tracked, so each candidate within the radius needs its own search
//!

use bevy_one_click_tiles_plugin::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// An open Region and a tracked square of `2 * half + 1` tiles a side around (32, 32)
fn prepare(half: i32) -> (CollisionMap, TrackedTiles) {
	let builder = FlagRegionBuilder::new();
	let map = CollisionMap::from_builders([(RegionID::new(0, 0), &builder)]).unwrap();
	map.get_store().decompress_all();
	let tracked = (32 - half..=32 + half)
		.flat_map(|y| (32 - half..=32 + half).map(move |x| Tile::new(x, y, 0)))
		.collect();
	(map, tracked)
}

pub fn criterion_benchmark(c: &mut Criterion) {
	let transports = TransportGraph::default();
	let settings = ReachSettings::default();
	let mut group = c.benchmark_group("classification");
	group.significance_level(0.05).sample_size(50);
	let (map, tracked) = prepare(5);
	group.bench_function("classify_11x11_tracked", |b| {
		b.iter(|| {
			classify(
				&map,
				&transports,
				black_box(Tile::new(32, 32, 0)),
				black_box(&tracked),
				&settings,
			)
		})
	});
	let (map, tracked) = prepare(15);
	group.bench_function("classify_31x31_tracked", |b| {
		b.iter(|| {
			classify(
				&map,
				&transports,
				black_box(Tile::new(32, 32, 0)),
				black_box(&tracked),
				&settings,
			)
		})
	});
	group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
