//! Territory-driven speed and perturbation
//!
//! Two policies, picked by the ball's `Motion` variant:
//! - Polar: speed follows a Bezier easing of the faction's territory share,
//!   and the heading gets a random nudge that shrinks as territory grows.
//! - Vector: the velocity gets small independent noise per axis and is kept
//!   within [MIN_SPEED, VECTOR_MAX_SPEED] per component.

use rand::Rng;

use super::state::{Ball, Motion, SpeedSample};
use crate::consts::*;
use crate::normalize_angle;

/// Interior Bezier control values (y-coordinates of (0.11, 0.46) and (0.5, -0.14))
const BEZIER_P1: f32 = 0.46;
const BEZIER_P2: f32 = -0.14;

/// Speed multiplier for a territory ratio.
///
/// The ratio is used directly as the curve parameter t; the endpoints are
/// pinned at 0 and 1 and the negative control value puts a dip in the middle.
pub fn bezier_speed_curve(t: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * t * BEZIER_P1 + 3.0 * u * t * t * BEZIER_P2 + t * t * t
}

/// Maximum heading perturbation for a territory ratio
#[inline]
pub fn perturbation_strength(ratio: f32) -> f32 {
    PERTURBATION_SPAN * (1.0 - ratio) + PERTURBATION_FLOOR
}

/// Apply the speed model for this ball's motion variant.
///
/// `count` is the faction's cell count from this frame's scan.
pub fn update_speed<R: Rng>(
    ball: &mut Ball,
    count: usize,
    total_cells: usize,
    rng: &mut R,
) -> SpeedSample {
    let ratio = count as f32 / total_cells.max(1) as f32;
    match ball.motion {
        Motion::Polar { .. } => update_polar(ball, ratio, rng),
        Motion::Vector { .. } => update_vector(ball, ratio, rng),
    }
}

fn update_polar<R: Rng>(ball: &mut Ball, ratio: f32, rng: &mut R) -> SpeedSample {
    let speed = MAX_SPEED * bezier_speed_curve(ratio);
    let strength = perturbation_strength(ratio);
    let nudge = strength * (1.0 - 2.0 * rng.random::<f32>());

    if let Motion::Polar { angle, speed: s } = &mut ball.motion {
        *s = speed;
        *angle = normalize_angle(*angle + nudge);
    }

    SpeedSample {
        speed,
        ratio,
        perturbation: strength,
    }
}

fn update_vector<R: Rng>(ball: &mut Ball, ratio: f32, rng: &mut R) -> SpeedSample {
    if let Motion::Vector { vel } = &mut ball.motion {
        vel.x = jitter_component(vel.x, rng);
        vel.y = jitter_component(vel.y, rng);
    }

    SpeedSample {
        speed: ball.motion.speed(),
        ratio,
        perturbation: 0.0,
    }
}

fn jitter_component<R: Rng>(v: f32, rng: &mut R) -> f32 {
    let noise = rng.random_range(-VECTOR_NOISE..=VECTOR_NOISE);
    let v = (v + noise).clamp(-VECTOR_MAX_SPEED, VECTOR_MAX_SPEED);
    if v.abs() < MIN_SPEED {
        // Exact zero has no sign; push it positive
        if v < 0.0 { -MIN_SPEED } else { MIN_SPEED }
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::faction::Faction;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn polar_ball(angle: f32) -> Ball {
        Ball::new(
            Faction::Wei,
            Vec2::new(100.0, 100.0),
            Motion::Polar { angle, speed: 3.0 },
        )
    }

    #[test]
    fn test_bezier_endpoints() {
        assert_eq!(bezier_speed_curve(0.0), 0.0);
        assert_eq!(bezier_speed_curve(1.0), 1.0);
    }

    #[test]
    fn test_bezier_midpoint() {
        // 3*(1/4)*(1/2)*0.46 + 3*(1/2)*(1/4)*(-0.14) + 1/8
        let expected = 0.1725 - 0.0525 + 0.125;
        assert!((bezier_speed_curve(0.5) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_full_conquest() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut ball = polar_ball(1.0);
        let sample = update_speed(&mut ball, 1200, 1200, &mut rng);
        assert_eq!(sample.ratio, 1.0);
        assert_eq!(sample.speed, MAX_SPEED);
        assert_eq!(sample.perturbation, 0.005);
        assert_eq!(ball.motion.speed(), MAX_SPEED);
    }

    #[test]
    fn test_zero_territory_stalls() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut ball = polar_ball(1.0);
        let sample = update_speed(&mut ball, 0, 1200, &mut rng);
        assert_eq!(sample.speed, 0.0);
        assert!((sample.perturbation - 0.055).abs() < 1e-6);
    }

    #[test]
    fn test_vector_snaps_to_min_speed() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut ball = Ball::new(
            Faction::Shu,
            Vec2::new(100.0, 100.0),
            Motion::Vector { vel: Vec2::new(-1.0, 0.5) },
        );
        update_speed(&mut ball, 300, 1200, &mut rng);
        assert_eq!(ball.motion.velocity(), Vec2::new(-MIN_SPEED, MIN_SPEED));
    }

    #[test]
    fn test_vector_clamps_to_max_speed() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut ball = Ball::new(
            Faction::Shu,
            Vec2::new(100.0, 100.0),
            Motion::Vector { vel: Vec2::new(50.0, -50.0) },
        );
        update_speed(&mut ball, 300, 1200, &mut rng);
        assert_eq!(
            ball.motion.velocity(),
            Vec2::new(VECTOR_MAX_SPEED, -VECTOR_MAX_SPEED)
        );
    }

    proptest! {
        #[test]
        fn perturbation_is_bounded(seed in any::<u64>(), count in 0usize..=1200, angle in 0.5f32..5.5) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut ball = polar_ball(angle);
            let sample = update_speed(&mut ball, count, 1200, &mut rng);
            let Motion::Polar { angle: after, .. } = ball.motion else {
                panic!("motion variant changed");
            };
            // Angle stays away from the wrap point, so the difference is the nudge
            let applied = after - angle;
            prop_assert!(applied.abs() <= sample.perturbation + 1e-5);
            prop_assert!(
                (sample.perturbation - perturbation_strength(sample.ratio)).abs() < 1e-7
            );
        }

        #[test]
        fn speed_stays_within_curve_range(count in 0usize..=1200) {
            let mut rng = Pcg32::seed_from_u64(1);
            let mut ball = polar_ball(1.0);
            let sample = update_speed(&mut ball, count, 1200, &mut rng);
            prop_assert!(sample.speed.is_finite());
            prop_assert!(sample.speed <= MAX_SPEED + 1e-4);
            prop_assert!(sample.speed >= -MAX_SPEED * 0.1);
        }

        #[test]
        fn vector_components_stay_in_band(seed in any::<u64>(), x in -30.0f32..30.0, y in -30.0f32..30.0) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut ball = Ball::new(
                Faction::Wu,
                Vec2::new(100.0, 100.0),
                Motion::Vector { vel: Vec2::new(x, y) },
            );
            update_speed(&mut ball, 100, 1200, &mut rng);
            let v = ball.motion.velocity();
            for c in [v.x, v.y] {
                prop_assert!(c.abs() >= MIN_SPEED && c.abs() <= VECTOR_MAX_SPEED);
            }
        }
    }
}
