use crate::math::{Color, RandomSource};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

pub const CLUSTER_CENTER: (f32, f32) = (400.0, 300.0);
pub const CLUSTER_RING_RADIUS: f32 = 200.0;
pub const POINTS_PER_USER: usize = 50;
pub const SPREAD_MIN: f64 = 20.0;
pub const SPREAD_MAX: f64 = 80.0;
/// Vertical squash applied to each cluster so its points stay inside the
/// 80x60 boundary ellipse drawn around the cluster mean.
pub const SPREAD_ASPECT: f64 = 60.0 / 80.0;

pub const USER_PALETTE: [Color; 5] = [
    Color::RED_500,
    Color::BLUE_500,
    Color::GREEN_500,
    Color::AMBER_500,
    Color::VIOLET_500,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterPoint {
    pub x: f32,
    pub y: f32,
    pub user: usize,
    pub color: Color,
}

/// Centre of the `user`-th cluster out of `user_count`, evenly spaced on the ring.
pub fn cluster_center(user: usize, user_count: usize) -> (f32, f32) {
    let angle = user as f64 * 2.0 * PI / user_count.max(1) as f64;
    (
        (angle.cos() * CLUSTER_RING_RADIUS as f64) as f32 + CLUSTER_CENTER.0,
        (angle.sin() * CLUSTER_RING_RADIUS as f64) as f32 + CLUSTER_CENTER.1,
    )
}

/// Fake t-SNE embedding: `POINTS_PER_USER` points per user scattered
/// around their cluster centre.
pub fn generate_clusters(user_count: usize, rng: &mut dyn RandomSource) -> Vec<ClusterPoint> {
    let mut points = Vec::with_capacity(user_count * POINTS_PER_USER);
    for user in 0..user_count {
        let (cx, cy) = cluster_center(user, user_count);
        let color = USER_PALETTE[user % USER_PALETTE.len()];
        for _ in 0..POINTS_PER_USER {
            let angle = rng.next_unit() * 2.0 * PI;
            let radius = rng.uniform(SPREAD_MIN, SPREAD_MAX);
            points.push(ClusterPoint {
                x: cx + (angle.cos() * radius) as f32,
                y: cy + (angle.sin() * radius * SPREAD_ASPECT) as f32,
                user,
                color,
            });
        }
    }
    points
}
