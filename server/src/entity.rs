use rand::Rng;
use shared::render::{Drawable, Surface};
use shared::{Axis, Color, Settings};

/// Circular piece moving on a bounded plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub color: Color,
    pub r: f32,
    pub x: f32,
    pub y: f32,
    pub dx: i8,
    pub dy: i8,
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Piece {
    fn new(color: Color, r: f32, settings: &Settings) -> Self {
        Self {
            color,
            r,
            x: 0.0,
            y: 0.0,
            dx: 0,
            dy: 0,
            min_x: r,
            min_y: r,
            max_x: settings.screen_width - r,
            max_y: settings.screen_height - r,
        }
    }

    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        (self.min_x, self.min_y, self.max_x, self.max_y)
    }

    pub fn set_velocity(&mut self, axis: Axis, value: i8) {
        let value = value.signum();
        match axis {
            Axis::Horizontal => self.dx = value,
            Axis::Vertical => self.dy = value,
        }
    }

    /// Integrates `ticks` unit steps, bouncing back off the bounds.
    pub fn advance(&mut self, ticks: u32) {
        let ticks = ticks as f32;
        self.x = reflect(self.x + ticks * self.dx as f32, self.min_x, self.max_x);
        self.y = reflect(self.y + ticks * self.dy as f32, self.min_y, self.max_y);
    }
}

/// Elastic bounce: overshoot past a bound is mirrored back inside, never
/// crossing the opposite bound.
fn reflect(position: f32, min: f32, max: f32) -> f32 {
    let mut position = position;
    if position > max {
        position = min.max(max - (position - max));
    }
    if position < min {
        position = max.min(min + (min - position));
    }
    position
}

/// Circles overlap when their centers are closer than the sum of the radii.
pub fn is_touching(a: &Piece, b: &Piece) -> bool {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let distance_squared = dx * dx + dy * dy;

    distance_squared < (a.r + b.r).powi(2)
}

impl Drawable for Piece {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.draw_circle(self.x, self.y, self.r, self.color);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub piece: Piece,
}

impl Player {
    /// Spawns at a uniformly random whole-pixel position inside the bounds.
    ///
    /// The spawn band is also kept inside the goal's bounds: with the player
    /// closer to an edge than the goal radius, no mirrored goal can fit.
    pub fn spawn<R: Rng + ?Sized>(settings: &Settings, rng: &mut R) -> Self {
        let mut piece = Piece::new(settings.player_color, settings.player_radius, settings);
        let margin = settings.player_radius.max(settings.goal_radius);
        let (min_x, max_x) = (margin, settings.screen_width - margin);
        let (min_y, max_y) = (margin, settings.screen_height - margin);
        piece.x = rng.gen_range(min_x.ceil() as i32..=max_x.floor() as i32) as f32;
        piece.y = rng.gen_range(min_y.ceil() as i32..=max_y.floor() as i32) as f32;
        Self { piece }
    }

    pub fn at(settings: &Settings, x: f32, y: f32) -> Self {
        let mut piece = Piece::new(settings.player_color, settings.player_radius, settings);
        piece.x = x;
        piece.y = y;
        Self { piece }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub piece: Piece,
}

impl Goal {
    /// Places the goal relative to `player`; see [`crate::placement`].
    pub fn place<R: Rng + ?Sized>(player: &Player, settings: &Settings, rng: &mut R) -> Self {
        let mut piece = Piece::new(settings.goal_color, settings.goal_radius, settings);
        let placement = crate::placement::place_goal(&player.piece, settings, rng);
        piece.x = placement.x;
        piece.y = placement.y;
        Self { piece }
    }

    pub fn at(settings: &Settings, x: f32, y: f32) -> Self {
        let mut piece = Piece::new(settings.goal_color, settings.goal_radius, settings);
        piece.x = x;
        piece.y = y;
        Self { piece }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn settings() -> Settings {
        Settings::default()
    }

    #[test]
    fn test_advance_unit_step() {
        let mut player = Player::at(&settings(), 100.0, 100.0);
        player.piece.dx = 1;
        player.piece.dy = 1;
        player.piece.advance(1);
        assert_approx_eq!(player.piece.x, 101.0);
        assert_approx_eq!(player.piece.y, 101.0);
    }

    #[test]
    fn test_advance_zero_ticks_is_noop() {
        let mut player = Player::at(&settings(), 100.0, 200.0);
        player.piece.dx = -1;
        player.piece.advance(0);
        assert_eq!(player.piece.x, 100.0);
        assert_eq!(player.piece.y, 200.0);
    }

    #[test]
    fn test_reflect_off_upper_bound() {
        // max_x = 640 - 20 = 620
        let mut player = Player::at(&settings(), 618.0, 100.0);
        player.piece.dx = 1;
        player.piece.advance(5);
        // 623 overshoots by 3 and bounces back to 617
        assert_approx_eq!(player.piece.x, 617.0);
    }

    #[test]
    fn test_reflect_off_lower_bound() {
        // min_y = 20
        let mut player = Player::at(&settings(), 100.0, 22.0);
        player.piece.dy = -1;
        player.piece.advance(4);
        assert_approx_eq!(player.piece.y, 22.0);
    }

    #[test]
    fn test_reflect_never_crosses_opposite_bound() {
        assert_eq!(reflect(10_000.0, 20.0, 620.0), 20.0);
        assert_eq!(reflect(-10_000.0, 20.0, 620.0), 620.0);
        assert_eq!(reflect(300.0, 20.0, 620.0), 300.0);
        assert_eq!(reflect(620.0, 20.0, 620.0), 620.0);
    }

    #[test]
    fn test_position_stays_in_bounds_for_all_velocities() {
        let settings = settings();
        let starts = [(20.0, 20.0), (620.0, 460.0), (320.0, 240.0), (21.0, 459.0)];
        let tick_counts = [0u32, 1, 2, 7, 59, 600, 1_000, 100_000];

        for &(x, y) in &starts {
            for dx in -1i8..=1 {
                for dy in -1i8..=1 {
                    for &ticks in &tick_counts {
                        let mut player = Player::at(&settings, x, y);
                        player.piece.dx = dx;
                        player.piece.dy = dy;
                        for _ in 0..3 {
                            player.piece.advance(ticks);
                            let (min_x, min_y, max_x, max_y) = player.piece.bounds();
                            assert!(player.piece.x >= min_x && player.piece.x <= max_x);
                            assert!(player.piece.y >= min_y && player.piece.y <= max_y);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_set_velocity_is_unit() {
        let mut player = Player::at(&settings(), 100.0, 100.0);
        player.piece.set_velocity(Axis::Horizontal, 5);
        player.piece.set_velocity(Axis::Vertical, -3);
        assert_eq!((player.piece.dx, player.piece.dy), (1, -1));
        player.piece.set_velocity(Axis::Horizontal, 0);
        assert_eq!(player.piece.dx, 0);
    }

    #[test]
    fn test_is_touching_overlap_and_gap() {
        let settings = settings();
        let player = Player::at(&settings, 100.0, 100.0);

        // radii sum to 50
        let close = Goal::at(&settings, 140.0, 100.0);
        let exact = Goal::at(&settings, 150.0, 100.0);
        let far = Goal::at(&settings, 300.0, 300.0);

        assert!(is_touching(&player.piece, &close.piece));
        assert!(!is_touching(&player.piece, &exact.piece));
        assert!(!is_touching(&player.piece, &far.piece));
    }

    #[test]
    fn test_is_touching_is_symmetric() {
        let settings = settings();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..1_000 {
            let mut a = Player::at(
                &settings,
                rng.gen_range(0.0..640.0),
                rng.gen_range(0.0..480.0),
            )
            .piece;
            let mut b = Goal::at(
                &settings,
                rng.gen_range(0.0..640.0),
                rng.gen_range(0.0..480.0),
            )
            .piece;
            a.r = rng.gen_range(1.0..100.0);
            b.r = rng.gen_range(1.0..100.0);

            assert_eq!(is_touching(&a, &b), is_touching(&b, &a));
        }
    }

    #[test]
    fn test_spawn_within_bounds() {
        let settings = settings();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..1_000 {
            let player = Player::spawn(&settings, &mut rng);
            let (min_x, min_y, max_x, max_y) = player.piece.bounds();
            assert!(player.piece.x >= min_x && player.piece.x <= max_x);
            assert!(player.piece.y >= min_y && player.piece.y <= max_y);
            // goal radius 30 is the wider margin
            assert!(player.piece.x >= 30.0 && player.piece.x <= 610.0);
            assert!(player.piece.y >= 30.0 && player.piece.y <= 450.0);
            assert_eq!(player.piece.x.fract(), 0.0);
            assert_eq!((player.piece.dx, player.piece.dy), (0, 0));
        }
    }
}
