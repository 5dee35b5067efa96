//! Position bookkeeping for the looping slide track.
//!
//! The track holds `slides` real slides with [`CLONE_MARGIN`] copies on each
//! edge: the last ones in front, the first ones behind. The visible index
//! lives in `[CLONE_MARGIN, slides + CLONE_MARGIN)` at rest. One animated step
//! may leave it on a clone, and [`Track::settle`] moves it back by exactly
//! `slides` positions once the animation finishes.

use crate::config::CarouselConfig;

/// Copies of real slides placed on each edge of the track.
pub const CLONE_MARGIN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn delta(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// How the track should be moved to its new offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Animated,
    Instant,
}

/// Live measurements taken from the page before each reposition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub slide_width: f64,
    pub gap: f64,
    pub wrapper_width: f64,
    pub viewport_width: f64,
}

impl Layout {
    pub fn stride(&self) -> f64 {
        self.slide_width + self.gap
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    slides: usize,
    index: usize,
    transitioning: bool,
}

impl Track {
    /// Returns `None` when there are no real slides to show.
    pub fn new(slides: usize) -> Option<Self> {
        if slides == 0 {
            return None;
        }
        Some(Self {
            slides,
            index: CLONE_MARGIN,
            transitioning: false,
        })
    }

    pub fn slides(&self) -> usize {
        self.slides
    }

    pub fn len(&self) -> usize {
        self.slides + 2 * CLONE_MARGIN
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Real slide indices to copy in front of the first real slide, in order.
    pub fn leading_sources(&self) -> Vec<usize> {
        (0..CLONE_MARGIN)
            .map(|k| self.wrap(k as isize - CLONE_MARGIN as isize))
            .collect()
    }

    /// Real slide indices to append after the last real slide, in order.
    pub fn trailing_sources(&self) -> Vec<usize> {
        (0..CLONE_MARGIN).map(|k| self.wrap(k as isize)).collect()
    }

    /// Moves one slide. Refused while a step is still animating or when the
    /// step would leave the track.
    pub fn advance(&mut self, direction: Direction) -> Option<Motion> {
        if self.transitioning {
            return None;
        }
        let next = self.index as isize + direction.delta();
        if next < 0 || next as usize >= self.len() {
            return None;
        }
        self.index = next as usize;
        self.transitioning = true;
        Some(Motion::Animated)
    }

    /// Moves straight to a real slide. Selecting the slide already shown does
    /// nothing, since no transition would run to clear the in-flight flag.
    pub fn jump_to(&mut self, real_index: usize) -> Option<Motion> {
        if self.transitioning || real_index >= self.slides {
            return None;
        }
        let target = real_index + CLONE_MARGIN;
        if target == self.index {
            return None;
        }
        self.index = target;
        self.transitioning = true;
        Some(Motion::Animated)
    }

    /// Called when the animated step finishes. If it landed on a clone, jumps
    /// to the matching real slide without animation.
    pub fn settle(&mut self) -> Option<Motion> {
        self.transitioning = false;
        self.fold().then_some(Motion::Instant)
    }

    /// Repositions without animation, e.g. after the viewport changed size.
    /// Cutting the transition short means no `transitionend` follows, so a
    /// step that stopped on a clone is folded back here instead.
    pub fn resync(&mut self) -> Motion {
        self.transitioning = false;
        self.fold();
        Motion::Instant
    }

    /// Moves the index from a clone onto the real slide it copies. Returns
    /// whether it moved.
    fn fold(&mut self) -> bool {
        if self.index >= self.slides + CLONE_MARGIN {
            self.index -= self.slides;
            true
        } else if self.index < CLONE_MARGIN {
            self.index += self.slides;
            true
        } else {
            false
        }
    }

    /// Real slide shown at the current index, wrapping clones onto the slide
    /// they copy.
    pub fn active_dot(&self) -> usize {
        self.wrap(self.index as isize - CLONE_MARGIN as isize)
    }

    /// Horizontal translation for the track, in pixels.
    pub fn offset(&self, layout: &Layout, config: &CarouselConfig) -> f64 {
        let mut offset = -(self.index as f64 * layout.stride());
        if layout.viewport_width <= config.center_below_px {
            offset += (layout.wrapper_width - layout.slide_width) / 2.0 - config.wrapper_padding_px;
        }
        offset
    }

    fn wrap(&self, position: isize) -> usize {
        position.rem_euclid(self.slides as isize) as usize
    }
}

/// Parses the leading number of a CSS length such as `"30px"`.
pub fn parse_px(value: &str) -> Option<f64> {
    let value = value.trim();
    let end = value
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && c == '-')))
        .map_or(value.len(), |(i, _)| i);
    value[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DESKTOP: Layout = Layout {
        slide_width: 300.0,
        gap: 30.0,
        wrapper_width: 1200.0,
        viewport_width: 1440.0,
    };

    fn settled(track: &mut Track, direction: Direction) {
        assert_eq!(track.advance(direction), Some(Motion::Animated));
        track.settle();
    }

    #[test]
    fn no_slides_means_no_track() {
        assert!(Track::new(0).is_none());
    }

    #[test]
    fn starts_on_first_real_slide() {
        let track = Track::new(5).unwrap();
        assert_eq!(track.len(), 9);
        assert_eq!(track.index(), 2);
        assert_eq!(track.active_dot(), 0);
        assert!(!track.is_transitioning());
    }

    #[test]
    fn clone_sources_mirror_the_edges() {
        let track = Track::new(5).unwrap();
        assert_eq!(track.leading_sources(), vec![3, 4]);
        assert_eq!(track.trailing_sources(), vec![0, 1]);
    }

    #[test]
    fn clone_sources_wrap_for_short_tracks() {
        let single = Track::new(1).unwrap();
        assert_eq!(single.leading_sources(), vec![0, 0]);
        assert_eq!(single.trailing_sources(), vec![0, 0]);
        assert_eq!(single.len(), 5);
    }

    #[test]
    fn forward_past_last_slide_snaps_to_first() {
        let mut track = Track::new(4).unwrap();
        for _ in 0..3 {
            settled(&mut track, Direction::Forward);
        }
        assert_eq!(track.index(), 5);
        assert_eq!(track.active_dot(), 3);

        track.advance(Direction::Forward);
        assert_eq!(track.index(), 6);
        assert_eq!(track.active_dot(), 0);
        assert_eq!(track.settle(), Some(Motion::Instant));
        assert_eq!(track.index(), 2);
        assert!(!track.is_transitioning());
    }

    #[test]
    fn backward_from_first_slide_snaps_to_last() {
        let mut track = Track::new(4).unwrap();
        track.advance(Direction::Backward);
        assert_eq!(track.index(), 1);
        assert_eq!(track.active_dot(), 3);
        assert_eq!(track.settle(), Some(Motion::Instant));
        assert_eq!(track.index(), 5);
    }

    #[test]
    fn second_step_during_transition_is_ignored() {
        let mut track = Track::new(3).unwrap();
        assert!(track.advance(Direction::Forward).is_some());
        assert!(track.advance(Direction::Forward).is_none());
        assert!(track.jump_to(0).is_none());
        assert_eq!(track.index(), 3);
        assert_eq!(track.settle(), None);
        assert_eq!(track.active_dot(), 1);
    }

    #[test]
    fn jump_to_selects_real_slide() {
        let mut track = Track::new(6).unwrap();
        assert_eq!(track.jump_to(4), Some(Motion::Animated));
        assert_eq!(track.index(), 6);
        track.settle();
        assert_eq!(track.active_dot(), 4);
    }

    #[test]
    fn jump_to_current_or_missing_slide_does_nothing() {
        let mut track = Track::new(3).unwrap();
        assert_eq!(track.jump_to(0), None);
        assert_eq!(track.jump_to(3), None);
        assert!(!track.is_transitioning());
    }

    #[test]
    fn resync_clears_in_flight_flag() {
        let mut track = Track::new(3).unwrap();
        track.advance(Direction::Forward);
        assert_eq!(track.resync(), Motion::Instant);
        assert!(!track.is_transitioning());
        assert_eq!(track.index(), 3);
    }

    #[test]
    fn resize_mid_step_onto_trailing_clone_folds_back() {
        let mut track = Track::new(3).unwrap();
        settled(&mut track, Direction::Forward);
        settled(&mut track, Direction::Forward);
        assert_eq!(track.index(), 4);

        // The resize cancels the transition, so no settle follows.
        track.advance(Direction::Forward);
        assert_eq!(track.index(), 5);
        track.resync();
        assert_eq!(track.index(), 2);
        assert_eq!(track.active_dot(), 0);

        track.advance(Direction::Forward);
        track.resync();
        assert_eq!(track.index(), 3);
        assert_eq!(track.advance(Direction::Forward), Some(Motion::Animated));
    }

    #[test]
    fn resize_mid_step_onto_leading_clone_folds_back() {
        let mut track = Track::new(3).unwrap();
        track.advance(Direction::Backward);
        assert_eq!(track.index(), 1);
        track.resync();
        assert_eq!(track.index(), 4);
        assert_eq!(track.active_dot(), 2);

        track.advance(Direction::Backward);
        track.resync();
        assert_eq!(track.index(), 3);
        assert_eq!(track.advance(Direction::Backward), Some(Motion::Animated));
    }

    #[test]
    fn margin_keeps_short_tracks_looping() {
        let mut track = Track::new(3).unwrap();
        assert_eq!(track.len(), 3 + 2 * CLONE_MARGIN);
        for _ in 0..3 {
            settled(&mut track, Direction::Forward);
        }
        assert_eq!(track.index(), CLONE_MARGIN);
    }

    #[test]
    fn instant_reposition_is_stable() {
        let mut track = Track::new(4).unwrap();
        let config = CarouselConfig::default();
        track.resync();
        let first = track.offset(&DESKTOP, &config);
        track.resync();
        assert_eq!(first, track.offset(&DESKTOP, &config));
        assert_eq!(first, -660.0);
    }

    #[test]
    fn narrow_viewports_center_the_active_slide() {
        let track = Track::new(4).unwrap();
        let config = CarouselConfig::default();
        let tablet = Layout {
            slide_width: 280.0,
            gap: 20.0,
            wrapper_width: 700.0,
            viewport_width: 1024.0,
        };
        // -(2 * 300) + (700 - 280) / 2 - 10
        assert_eq!(track.offset(&tablet, &config), -400.0);
    }

    #[test]
    fn parses_css_lengths() {
        assert_eq!(parse_px("30px"), Some(30.0));
        assert_eq!(parse_px(" 12.5px "), Some(12.5));
        assert_eq!(parse_px("0px"), Some(0.0));
        assert_eq!(parse_px("normal"), None);
        assert_eq!(parse_px(""), None);
    }

    proptest! {
        #[test]
        fn dot_follows_forward_steps(slides in 1usize..12, steps in 0usize..60) {
            let mut track = Track::new(slides).unwrap();
            for _ in 0..steps {
                prop_assert!(track.advance(Direction::Forward).is_some());
                track.settle();
            }
            prop_assert_eq!(track.active_dot(), steps % slides);
        }

        #[test]
        fn full_cycle_returns_home(slides in 1usize..12, backward in any::<bool>()) {
            let direction = if backward { Direction::Backward } else { Direction::Forward };
            let mut track = Track::new(slides).unwrap();
            let start = track.index();
            for _ in 0..slides {
                track.advance(direction);
                track.settle();
            }
            prop_assert_eq!(track.index(), start);
        }

        #[test]
        fn settled_index_stays_in_real_window(
            slides in 1usize..10,
            moves in proptest::collection::vec(any::<bool>(), 0..40),
        ) {
            let mut track = Track::new(slides).unwrap();
            for forward in moves {
                let direction = if forward { Direction::Forward } else { Direction::Backward };
                track.advance(direction);
                prop_assert!(track.index() < track.len());
                track.settle();
                prop_assert!(track.index() >= 2 && track.index() < slides + 2);
            }
        }

        #[test]
        fn interrupted_steps_never_stall(
            slides in 1usize..10,
            moves in proptest::collection::vec((any::<bool>(), any::<bool>()), 0..40),
        ) {
            let mut track = Track::new(slides).unwrap();
            for (forward, interrupted) in moves {
                let direction = if forward { Direction::Forward } else { Direction::Backward };
                prop_assert!(track.advance(direction).is_some());
                if interrupted {
                    track.resync();
                } else {
                    track.settle();
                }
                prop_assert!(
                    track.index() >= CLONE_MARGIN && track.index() < slides + CLONE_MARGIN
                );
            }
        }
    }
}
