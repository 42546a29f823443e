use glam::Vec2;
use rand::Rng;

use crate::color::{Rgb, GOLD};

/// Vertical offset of the celebration burst for a new post.
const POST_BANNER_Y: f32 = 200.0;

/// Height of the strip along the top edge used for message bursts.
const MESSAGE_STRIP_HEIGHT: f32 = 100.0;

/// Feed-side happenings that are rewarded with a firework burst. The feed
/// itself never talks to the engine; it raises one of these and the mapping
/// below picks the burst parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedEvent {
    PostCreated,
    PostLiked,
    MessageSent,
}

/// Burst origin and color for a feed event on a viewport of the given size.
pub fn burst_params(event: FeedEvent, viewport: Vec2, rng: &mut impl Rng) -> (Vec2, Rgb) {
    let origin = match event {
        FeedEvent::PostCreated => Vec2::new(viewport.x / 2.0, POST_BANNER_Y),
        FeedEvent::PostLiked => Vec2::new(
            random_to(rng, viewport.x),
            random_to(rng, viewport.y / 2.0),
        ),
        FeedEvent::MessageSent => Vec2::new(
            random_to(rng, viewport.x),
            random_to(rng, MESSAGE_STRIP_HEIGHT),
        ),
    };

    (origin, GOLD)
}

/// Uniform in `[0, max)`, tolerating the zero-sized viewport of a minimized
/// window.
fn random_to(rng: &mut impl Rng, max: f32) -> f32 {
    if max > 0.0 {
        rng.gen_range(0.0..max)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

    #[test]
    fn post_bursts_from_top_center() {
        let mut rng = StdRng::seed_from_u64(1);
        let (origin, color) = burst_params(FeedEvent::PostCreated, VIEWPORT, &mut rng);
        assert_eq!(origin, Vec2::new(640.0, POST_BANNER_Y));
        assert_eq!(color, GOLD);
    }

    #[test]
    fn like_bursts_land_in_upper_half() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            let (origin, color) = burst_params(FeedEvent::PostLiked, VIEWPORT, &mut rng);
            assert!((0.0..VIEWPORT.x).contains(&origin.x));
            assert!((0.0..VIEWPORT.y / 2.0).contains(&origin.y));
            assert_eq!(color, GOLD);
        }
    }

    #[test]
    fn message_bursts_land_in_top_strip() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let (origin, _) = burst_params(FeedEvent::MessageSent, VIEWPORT, &mut rng);
            assert!((0.0..VIEWPORT.x).contains(&origin.x));
            assert!((0.0..MESSAGE_STRIP_HEIGHT).contains(&origin.y));
        }
    }

    #[test]
    fn zero_sized_viewport_does_not_panic() {
        let mut rng = StdRng::seed_from_u64(4);
        let (origin, _) = burst_params(FeedEvent::PostLiked, Vec2::ZERO, &mut rng);
        assert_eq!(origin, Vec2::ZERO);
    }
}
