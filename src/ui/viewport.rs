//! Bitmap viewport state machine.
//!
//! [`transition`] is a pure function from `(state, event)` to `(state, effects)`. The bitmap
//! window executes the effects against the window system; nothing in here touches the platform.
//!
//! Vertical origin depends on row order. For a top-down bitmap (negative height) row 0 is the
//! top row, so the origin equals the scroll position. For a bottom-up bitmap the blit source is
//! measured from the bottom row, so the origin is mirrored:
//!
//! ```text
//! top-down:   y = pos
//! bottom-up:  y = max(|height| - client_height, 0) - pos
//! ```

use crate::platform::{Axis, Point, ResizeKind, ScrollAction, Size, WindowEvent};

/// Model of one native scrollbar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollBarState {
    pub enabled: bool,
    pub min: i32,
    pub max: i32,
    pub pos: i32,
}

impl ScrollBarState {
    /// Clamp like the native scrollbar does.
    #[inline]
    pub fn clamp(&self, pos: i32) -> i32 {
        pos.clamp(self.min, self.max.max(self.min))
    }
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Blit the bitmap from `origin` over a client area of `size`.
    Paint { origin: Point, size: Size },
    /// Schedule a repaint of the whole client area.
    Invalidate,
    EnableScrollBar { axis: Axis, enabled: bool },
    SetScrollRange { axis: Axis, min: i32, max: i32 },
    SetScrollPos { axis: Axis, pos: i32 },
    /// Answer the size-constraint query.
    SetMaxTrackSize(Size),
    /// Not handled here; use default window processing.
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportState {
    bitmap_width: i32,
    /// Signed, negative for top-down.
    bitmap_height: i32,
    client: Size,
    horizontal: ScrollBarState,
    vertical: ScrollBarState,
    origin: Point,
}

impl ViewportState {
    pub fn new(bitmap_width: i32, bitmap_height: i32) -> Self {
        Self {
            bitmap_width,
            bitmap_height,
            client: Size::default(),
            horizontal: ScrollBarState::default(),
            vertical: ScrollBarState::default(),
            origin: Point::ORIGIN,
        }
    }

    /// Natural bitmap size.
    #[inline]
    pub fn bitmap_size(&self) -> Size {
        Size::new(self.bitmap_width, self.bitmap_height.abs())
    }

    #[inline]
    pub fn is_top_down(&self) -> bool {
        self.bitmap_height < 0
    }

    #[inline]
    pub fn client(&self) -> Size {
        self.client
    }

    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn scroll_bar(&self, axis: Axis) -> &ScrollBarState {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }

    fn scroll_bar_mut(&mut self, axis: Axis) -> &mut ScrollBarState {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }

    /// Viewport origin for the given scroll positions, honoring row order.
    pub fn origin_for(&self, horz: i32, vert: i32) -> Point {
        let y = if self.is_top_down() {
            vert
        } else {
            (self.bitmap_height - self.client.height).max(0) - vert
        };
        Point::new(horz, y)
    }

    /// Recompute the origin from the given (or current) positions and schedule a repaint.
    pub fn draw_bitmap(&mut self, horz: Option<i32>, vert: Option<i32>) -> Effect {
        let horz = horz.unwrap_or(self.horizontal.pos);
        let vert = vert.unwrap_or(self.vertical.pos);
        self.origin = self.origin_for(horz, vert);
        Effect::Invalidate
    }

    /// Apply `event` in place and return the effects to execute.
    pub fn apply(&mut self, event: &WindowEvent) -> Vec<Effect> {
        let (next, effects) = transition(self, event);
        *self = next;
        effects
    }

    fn scroll(&mut self, axis: Axis, action: ScrollAction) -> Vec<Effect> {
        match action {
            ScrollAction::ThumbTrack(pos) => {
                let pos = self.scroll_bar(axis).clamp(pos);
                let effect = match axis {
                    Axis::Horizontal => self.draw_bitmap(Some(pos), None),
                    Axis::Vertical => self.draw_bitmap(None, Some(pos)),
                };
                vec![effect]
            }
            ScrollAction::ThumbPosition(pos) => {
                let bar = self.scroll_bar_mut(axis);
                let pos = bar.clamp(pos);
                bar.pos = pos;
                // Tracking already moved the picture; only the bar needs snapping.
                self.origin = self.origin_for(self.horizontal.pos, self.vertical.pos);
                vec![Effect::SetScrollPos { axis, pos }]
            }
            ScrollAction::LineBackward => self.step(axis, -1),
            ScrollAction::LineForward => self.step(axis, 1),
            ScrollAction::Other => Vec::new(),
        }
    }

    fn step(&mut self, axis: Axis, delta: i32) -> Vec<Effect> {
        let bar = self.scroll_bar_mut(axis);
        let pos = bar.clamp(bar.pos + delta);
        bar.pos = pos;
        vec![Effect::SetScrollPos { axis, pos }, self.draw_bitmap(None, None)]
    }

    fn resize(&mut self, client: Size) -> Vec<Effect> {
        self.client = client;
        let bitmap = self.bitmap_size();
        let mut effects = Vec::with_capacity(7);

        for axis in Axis::ALL {
            let extent = bitmap.along(axis);
            let visible = client.along(axis);
            let bar = self.scroll_bar_mut(axis);

            if extent > visible {
                let max = extent - visible;
                let pos = bar.pos.clamp(0, max);
                let moved = pos != bar.pos;
                *bar = ScrollBarState {
                    enabled: true,
                    min: 0,
                    max,
                    pos,
                };
                effects.push(Effect::SetScrollRange { axis, min: 0, max });
                effects.push(Effect::EnableScrollBar {
                    axis,
                    enabled: true,
                });
                if moved {
                    effects.push(Effect::SetScrollPos { axis, pos });
                }
            } else {
                *bar = ScrollBarState::default();
                effects.push(Effect::SetScrollPos { axis, pos: 0 });
                effects.push(Effect::EnableScrollBar {
                    axis,
                    enabled: false,
                });
            }
        }

        effects.push(self.draw_bitmap(None, None));
        effects
    }
}

/// Pure transition: `(state, event) -> (new state, effects)`.
pub fn transition(state: &ViewportState, event: &WindowEvent) -> (ViewportState, Vec<Effect>) {
    let mut next = *state;
    let effects = match *event {
        WindowEvent::Repaint => vec![Effect::Paint {
            origin: next.origin,
            size: next.client,
        }],
        WindowEvent::ScrollH(action) => next.scroll(Axis::Horizontal, action),
        WindowEvent::ScrollV(action) => next.scroll(Axis::Vertical, action),
        WindowEvent::SizeQuery { frame, scrollbars } => {
            let bitmap = next.bitmap_size();
            vec![Effect::SetMaxTrackSize(Size::new(
                bitmap.width + frame.width + scrollbars.width,
                bitmap.height + frame.height + scrollbars.height,
            ))]
        }
        WindowEvent::Resize {
            kind: ResizeKind::Restored,
            width,
            height,
        } => next.resize(Size::new(width, height)),
        WindowEvent::Resize { .. } | WindowEvent::Destroyed | WindowEvent::Other => {
            vec![Effect::Default]
        }
    };
    (next, effects)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resized(state: &mut ViewportState, width: i32, height: i32) -> Vec<Effect> {
        state.apply(&WindowEvent::Resize {
            kind: ResizeKind::Restored,
            width,
            height,
        })
    }

    #[test]
    fn top_down_vertical_scroll_moves_down() {
        let mut state = ViewportState::new(100, -50);
        resized(&mut state, 100, 30);

        let v = state.scroll_bar(Axis::Vertical);
        assert!(v.enabled);
        assert_eq!((v.min, v.max), (0, 20));
        assert!(!state.scroll_bar(Axis::Horizontal).enabled);

        state.apply(&WindowEvent::ScrollV(ScrollAction::ThumbTrack(20)));
        assert_eq!(state.origin(), Point::new(0, 20));
    }

    #[test]
    fn bottom_up_origin_mirrors_top_down() {
        let mut top_down = ViewportState::new(100, -50);
        let mut bottom_up = ViewportState::new(100, 50);
        resized(&mut top_down, 60, 30);
        resized(&mut bottom_up, 60, 30);

        for pos in 0..=20 {
            let a = top_down.origin_for(0, pos);
            let b = bottom_up.origin_for(0, pos);
            assert_eq!(b.y, 20 - a.y);
            assert!((0..=20).contains(&a.y));
            assert!((0..=20).contains(&b.y));
        }
    }

    #[test]
    fn resize_larger_than_bitmap_disables_and_resets() {
        let mut state = ViewportState::new(100, 80);
        resized(&mut state, 50, 40);
        state.apply(&WindowEvent::ScrollH(ScrollAction::ThumbPosition(30)));
        assert_eq!(state.scroll_bar(Axis::Horizontal).pos, 30);

        let effects = resized(&mut state, 100, 90);
        let h = state.scroll_bar(Axis::Horizontal);
        assert!(!h.enabled);
        assert_eq!(h.pos, 0);
        assert!(effects.contains(&Effect::EnableScrollBar {
            axis: Axis::Horizontal,
            enabled: false
        }));
        assert!(effects.contains(&Effect::SetScrollPos {
            axis: Axis::Horizontal,
            pos: 0
        }));
        assert_eq!(effects.last(), Some(&Effect::Invalidate));
    }

    #[test]
    fn shrinking_clamps_position_into_new_range() {
        let mut state = ViewportState::new(200, -200);
        resized(&mut state, 100, 100);
        state.apply(&WindowEvent::ScrollV(ScrollAction::ThumbPosition(100)));

        let effects = resized(&mut state, 100, 150);
        assert_eq!(state.scroll_bar(Axis::Vertical).max, 50);
        assert_eq!(state.scroll_bar(Axis::Vertical).pos, 50);
        assert!(effects.contains(&Effect::SetScrollPos {
            axis: Axis::Vertical,
            pos: 50
        }));
        assert_eq!(state.origin().y, 50);
    }

    #[test]
    fn line_steps_move_by_one_and_stop_at_range() {
        let mut state = ViewportState::new(12, -10);
        resized(&mut state, 10, 10);

        let effects = state.apply(&WindowEvent::ScrollH(ScrollAction::LineForward));
        assert_eq!(
            effects,
            vec![
                Effect::SetScrollPos {
                    axis: Axis::Horizontal,
                    pos: 1
                },
                Effect::Invalidate
            ]
        );
        state.apply(&WindowEvent::ScrollH(ScrollAction::LineForward));
        state.apply(&WindowEvent::ScrollH(ScrollAction::LineForward));
        assert_eq!(state.scroll_bar(Axis::Horizontal).pos, 2);

        state.apply(&WindowEvent::ScrollH(ScrollAction::LineBackward));
        assert_eq!(state.origin().x, 1);
    }

    #[test]
    fn thumb_position_only_snaps_the_bar() {
        let mut state = ViewportState::new(300, -300);
        resized(&mut state, 100, 100);
        let effects = state.apply(&WindowEvent::ScrollV(ScrollAction::ThumbPosition(150)));
        assert_eq!(
            effects,
            vec![Effect::SetScrollPos {
                axis: Axis::Vertical,
                pos: 150
            }]
        );
    }

    #[test]
    fn size_query_caps_to_content() {
        let mut state = ViewportState::new(640, 480);
        let effects = state.apply(&WindowEvent::SizeQuery {
            frame: Size::new(16, 39),
            scrollbars: Size::new(17, 17),
        });
        assert_eq!(effects, vec![Effect::SetMaxTrackSize(Size::new(673, 536))]);
    }

    #[test]
    fn repaint_spans_client() {
        let mut state = ViewportState::new(100, 100);
        resized(&mut state, 40, 30);
        state.apply(&WindowEvent::ScrollH(ScrollAction::ThumbTrack(10)));
        let effects = state.apply(&WindowEvent::Repaint);
        assert_eq!(
            effects,
            vec![Effect::Paint {
                origin: Point::new(10, 70),
                size: Size::new(40, 30)
            }]
        );
    }

    #[test]
    fn minimized_resize_falls_through() {
        let mut state = ViewportState::new(100, 100);
        let before = state;
        let effects = state.apply(&WindowEvent::Resize {
            kind: ResizeKind::Minimized,
            width: 0,
            height: 0,
        });
        assert_eq!(effects, vec![Effect::Default]);
        assert_eq!(state, before);
    }

    #[test]
    fn transition_leaves_input_untouched() {
        let state = ViewportState::new(100, -50);
        let (next, _) = transition(
            &state,
            &WindowEvent::Resize {
                kind: ResizeKind::Restored,
                width: 100,
                height: 30,
            },
        );
        assert_eq!(state.client(), Size::default());
        assert_eq!(next.client(), Size::new(100, 30));
    }
}
