//! One-shot procedural placement of the goal relative to the player.

use crate::entity::Piece;
use log::debug;
use rand::Rng;
use shared::Settings;
use std::f32::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    /// Sampled gap between the two circles' edges.
    pub distance: f32,
    pub angle: f32,
    /// Center-to-center offset before any axis was mirrored.
    pub offset: (f32, f32),
}

/// Picks a goal center at a random gap and angle from the player.
///
/// An axis whose candidate would leave the screen is mirrored through the
/// player instead of clamped, so each offset component keeps its magnitude.
/// The result is on-screen when `settings` passed validation and the player
/// center lies inside the goal's own bounds (see [`Player::spawn`]).
///
/// [`Player::spawn`]: crate::entity::Player::spawn
pub fn place_goal<R: Rng + ?Sized>(player: &Piece, settings: &Settings, rng: &mut R) -> Placement {
    let goal_r = settings.goal_radius;

    let distance = if settings.distance_min < settings.distance_max {
        rng.gen_range(settings.distance_min..=settings.distance_max)
    } else {
        settings.distance_min
    };
    let angle = rng.gen_range(0.0..TAU);

    let total = distance + player.r + goal_r;
    let offset = (total * angle.cos(), total * angle.sin());

    let x = mirror_axis(player.x, offset.0, goal_r, settings.screen_width);
    let y = mirror_axis(player.y, offset.1, goal_r, settings.screen_height);

    debug!(
        "Goal placed at ({:.1}, {:.1}): distance {:.1}, angle {:.3}, player ({}, {})",
        x, y, distance, angle, player.x, player.y
    );

    Placement {
        x,
        y,
        distance,
        angle,
        offset,
    }
}

fn mirror_axis(origin: f32, offset: f32, r: f32, extent: f32) -> f32 {
    let candidate = origin + offset;
    if candidate + r > extent || candidate - r < 0.0 {
        origin - offset
    } else {
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Player;
    use assert_approx_eq::assert_approx_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_valid(placement: &Placement, player: &Piece, settings: &Settings) {
        let r = settings.goal_radius;
        let eps = 1e-3;
        assert!(placement.x >= r - eps && placement.x <= settings.screen_width - r + eps);
        assert!(placement.y >= r - eps && placement.y <= settings.screen_height - r + eps);

        assert!(placement.distance >= settings.distance_min);
        assert!(placement.distance <= settings.distance_max);

        // Mirroring only flips signs.
        assert_approx_eq!((placement.x - player.x).abs(), placement.offset.0.abs(), 1e-3);
        assert_approx_eq!((placement.y - player.y).abs(), placement.offset.1.abs(), 1e-3);

        let total = settings.distance_min + player.r + r;
        let reach = (placement.offset.0.powi(2) + placement.offset.1.powi(2)).sqrt();
        assert!(reach >= total - 1e-3);
        assert!(reach <= settings.distance_max + player.r + r + 1e-3);
    }

    #[test]
    fn test_centered_player_over_many_seeds() {
        let settings = Settings::default();
        let player = Player::at(&settings, 320.0, 240.0);

        for seed in 0..10_000u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let placement = place_goal(&player.piece, &settings, &mut rng);
            assert_valid(&placement, &player.piece, &settings);
        }
    }

    #[test]
    fn test_corner_players_mirror_back_on_screen() {
        let settings = Settings::default();
        let corners = [(30.0, 30.0), (610.0, 30.0), (30.0, 450.0), (610.0, 450.0)];

        for &(x, y) in &corners {
            let player = Player::at(&settings, x, y);
            for seed in 0..2_000u64 {
                let mut rng = StdRng::seed_from_u64(seed);
                let placement = place_goal(&player.piece, &settings, &mut rng);
                assert_valid(&placement, &player.piece, &settings);
            }
        }
    }

    #[test]
    fn test_random_players_always_valid() {
        let settings = Settings::default();
        let mut rng = StdRng::seed_from_u64(1234);

        for _ in 0..5_000 {
            let player = Player::spawn(&settings, &mut rng);
            let placement = place_goal(&player.piece, &settings, &mut rng);
            assert_valid(&placement, &player.piece, &settings);
        }
    }

    #[test]
    fn test_mirror_axis_flips_only_when_off_screen() {
        assert_eq!(mirror_axis(100.0, 50.0, 30.0, 640.0), 150.0);
        // 600 + 50 + 30 > 640
        assert_eq!(mirror_axis(600.0, 50.0, 30.0, 640.0), 550.0);
        // 40 - 50 - 30 < 0
        assert_eq!(mirror_axis(40.0, -50.0, 30.0, 640.0), 90.0);
    }

    #[test]
    fn test_fixed_distance_range() {
        let settings = Settings {
            distance_min: 100.0,
            distance_max: 100.0,
            ..Settings::default()
        };
        let player = Player::at(&settings, 320.0, 240.0);
        let mut rng = StdRng::seed_from_u64(3);

        let placement = place_goal(&player.piece, &settings, &mut rng);
        assert_eq!(placement.distance, 100.0);
        assert_valid(&placement, &player.piece, &settings);
    }
}
