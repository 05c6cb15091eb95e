//! Spawn point generation for battle setup

use crate::components::Vec2;
use rand::Rng;

/// Give up re-rolling after this many tries and take the last roll
const MAX_SPAWN_ATTEMPTS: u32 = 1000;

/// Area ships may spawn in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnArea {
    pub width: f32,
    pub height: f32,
    /// Distance kept clear of every edge
    pub margin: f32,
}

impl SpawnArea {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Uniform random point inside the margins
    pub fn random_point(&self, rng: &mut impl Rng) -> Vec2 {
        Vec2::new(
            axis(rng, self.margin, self.width - self.margin),
            axis(rng, self.margin, self.height - self.margin),
        )
    }
}

fn axis(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        (lo + hi) / 2.0
    }
}

/// Pick `count` enemy positions, each at least `min_distance` from `avoid`.
///
/// Points are re-rolled until they are far enough away. If the area is too
/// small for that, the last roll is used after [`MAX_SPAWN_ATTEMPTS`].
pub fn enemy_spawn_points(
    area: &SpawnArea,
    count: u32,
    avoid: Vec2,
    min_distance: f32,
    rng: &mut impl Rng,
) -> Vec<Vec2> {
    let mut points = Vec::with_capacity(count as usize);

    for _ in 0..count {
        let mut point = area.random_point(rng);
        let mut attempts = 1;
        while !is_clear(point, avoid, min_distance) && attempts < MAX_SPAWN_ATTEMPTS {
            point = area.random_point(rng);
            attempts += 1;
        }
        if !is_clear(point, avoid, min_distance) {
            log::warn!("no spawn point {} from {:?}, using {:?}", min_distance, avoid, point);
        }
        points.push(point);
    }

    points
}

fn is_clear(point: Vec2, avoid: Vec2, min_distance: f32) -> bool {
    point.distance(&avoid) >= min_distance
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn arena() -> SpawnArea {
        SpawnArea {
            width: 1280.0,
            height: 720.0,
            margin: 100.0,
        }
    }

    #[test]
    fn test_spawn_points_respect_margin_and_distance() {
        let mut rng = StdRng::seed_from_u64(42);
        let area = arena();
        let points = enemy_spawn_points(&area, 50, area.center(), 300.0, &mut rng);

        assert_eq!(points.len(), 50);
        for p in points {
            assert!(p.x >= 100.0 && p.x <= 1180.0);
            assert!(p.y >= 100.0 && p.y <= 620.0);
            assert!(p.distance(&area.center()) >= 300.0);
        }
    }

    #[test]
    fn test_spawn_points_are_seeded() {
        let area = arena();
        let a = enemy_spawn_points(&area, 3, area.center(), 300.0, &mut StdRng::seed_from_u64(7));
        let b = enemy_spawn_points(&area, 3, area.center(), 300.0, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_exact_min_distance_is_clear() {
        assert!(is_clear(Vec2::new(300.0, 0.0), Vec2::ZERO, 300.0));
        assert!(!is_clear(Vec2::new(299.9, 0.0), Vec2::ZERO, 300.0));
    }

    #[test]
    fn test_impossible_distance_still_terminates() {
        let mut rng = StdRng::seed_from_u64(1);
        let area = SpawnArea {
            width: 200.0,
            height: 200.0,
            margin: 100.0,
        };
        let points = enemy_spawn_points(&area, 2, area.center(), 1000.0, &mut rng);
        assert_eq!(points, vec![Vec2::new(100.0, 100.0); 2]);
    }
}
