//! Animation channels for skinned characters.
//!
//! An [`AnimationChannel`] plays one segment at a time and keeps a short queue
//! of follow-up segments. Pushing a segment with
//! [`add_segment`](AnimationChannel::add_segment) replaces the current one
//! immediately (the old segment fades out over the new one's fade-in time);
//! [`queue_segment`](AnimationChannel::queue_segment) appends a segment that
//! starts only once the current one has finished.
//!
//! Time is measured in animation frames (60 per second). Fade-in times and
//! clip start offsets are frames too.
//!
//! A [`Skeleton`] bundles the three channels the player drives: legs, arms
//! and body rotation.

use bevy_ecs::prelude::Component;
use smallvec::SmallVec;

use crate::resources::assetregistry::{ActionBinding, ActionId};

/// Playback parameters for a pushed or queued segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionSettings {
    /// Frames for the segment to reach full blend weight.
    pub fade_in: f32,
    /// Playback speed multiplier.
    pub speed: f32,
    /// Playhead position the segment starts at.
    pub clip_start: f32,
}

impl Default for ActionSettings {
    fn default() -> Self {
        Self {
            fade_in: 0.0,
            speed: 1.0,
            clip_start: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Segment {
    pub action: ActionBinding,
    pub settings: ActionSettings,
    pub playhead: f32,
    /// Frames since the segment started playing.
    pub age: f32,
}

impl Segment {
    fn new(action: ActionBinding, settings: ActionSettings) -> Self {
        Self {
            playhead: settings.clip_start.min(action.length),
            action,
            settings,
            age: 0.0,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.playhead >= self.action.length
    }

    /// Blend weight in `[0, 1]` from the fade-in ramp.
    pub fn blend_weight(&self) -> f32 {
        if self.settings.fade_in <= 0.0 {
            1.0
        } else {
            (self.age / self.settings.fade_in).min(1.0)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnimationChannel {
    current: Option<Segment>,
    fading_out: Option<Segment>,
    queue: SmallVec<[Segment; 2]>,
}

impl AnimationChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_action(&self) -> Option<ActionId> {
        self.current.as_ref().map(|s| s.action.id)
    }

    pub fn current_segment(&self) -> Option<&Segment> {
        self.current.as_ref()
    }

    /// Segment being blended out underneath the current one, if any.
    pub fn fading_segment(&self) -> Option<&Segment> {
        self.fading_out.as_ref()
    }

    pub fn has_queued_segments(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn queued_action(&self) -> Option<ActionId> {
        self.queue.first().map(|s| s.action.id)
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Start `action` now, fading out whatever was playing.
    pub fn add_segment(&mut self, action: &ActionBinding, settings: ActionSettings) {
        self.fading_out = self.current.take();
        self.current = Some(Segment::new(action.clone(), settings));
    }

    /// Play `action` after the current segment (and any already queued) ends.
    pub fn queue_segment(&mut self, action: &ActionBinding, settings: ActionSettings) {
        if self.current.is_none() {
            self.current = Some(Segment::new(action.clone(), settings));
        } else {
            self.queue.push(Segment::new(action.clone(), settings));
        }
    }

    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }

    /// True when nothing is playing or the current segment reached its end.
    pub fn is_complete(&self) -> bool {
        self.current.as_ref().is_none_or(Segment::is_complete)
    }

    pub fn playhead(&self) -> f32 {
        self.current.as_ref().map(|s| s.playhead).unwrap_or(0.0)
    }

    /// Move the current segment's playhead, clamped to the action length.
    /// Used by tracks whose timing comes from gameplay instead of playback.
    pub fn set_playhead(&mut self, playhead: f32) {
        if let Some(segment) = self.current.as_mut() {
            segment.playhead = playhead.clamp(0.0, segment.action.length);
        }
    }

    /// Advance playback by `frames`. A finished segment hands over to the
    /// next queued one; without a queue it holds its last frame.
    pub fn update(&mut self, frames: f32) {
        if let Some(segment) = self.current.as_mut() {
            segment.age += frames;
            segment.playhead = (segment.playhead + frames * segment.settings.speed)
                .min(segment.action.length);
        }
        if let Some(old) = self.fading_out.as_mut() {
            old.playhead = (old.playhead + frames * old.settings.speed).min(old.action.length);
        }

        if self.is_complete() && !self.queue.is_empty() {
            let next = self.queue.remove(0);
            self.fading_out = self.current.replace(next);
        }

        let settled = self
            .current
            .as_ref()
            .is_none_or(|s| s.blend_weight() >= 1.0);
        if settled {
            self.fading_out = None;
        }
    }
}

/// The three channels of the player's rig.
#[derive(Component, Debug, Clone, Default)]
pub struct Skeleton {
    pub legs: AnimationChannel,
    pub arms: AnimationChannel,
    pub rotation: AnimationChannel,
}

impl Skeleton {
    pub fn update(&mut self, frames: f32) {
        self.legs.update(frames);
        self.arms.update(frames);
        self.rotation.update(frames);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn action(id: u32, length: f32) -> ActionBinding {
        ActionBinding {
            id: ActionId(id),
            name: Arc::from(format!("action{id}")),
            length,
        }
    }

    fn settings(fade_in: f32) -> ActionSettings {
        ActionSettings {
            fade_in,
            ..ActionSettings::default()
        }
    }

    #[test]
    fn add_segment_replaces_current_and_keeps_old_for_fade() {
        let mut channel = AnimationChannel::new();
        channel.add_segment(&action(1, 40.0), settings(0.0));
        channel.add_segment(&action(2, 40.0), settings(20.0));

        assert_eq!(channel.current_action(), Some(ActionId(2)));
        assert_eq!(
            channel.fading_segment().map(|s| s.action.id),
            Some(ActionId(1))
        );

        channel.update(10.0);
        assert!(channel.fading_segment().is_some());
        channel.update(10.0);
        assert!(channel.fading_segment().is_none());
    }

    #[test]
    fn queued_segment_starts_after_current_completes() {
        let mut channel = AnimationChannel::new();
        channel.add_segment(&action(1, 10.0), settings(0.0));
        channel.queue_segment(&action(2, 10.0), settings(0.0));
        assert!(channel.has_queued_segments());

        channel.update(5.0);
        assert_eq!(channel.current_action(), Some(ActionId(1)));

        channel.update(5.0);
        assert_eq!(channel.current_action(), Some(ActionId(2)));
        assert!(!channel.has_queued_segments());
    }

    #[test]
    fn segment_holds_last_frame_without_queue() {
        let mut channel = AnimationChannel::new();
        channel.add_segment(&action(1, 10.0), settings(0.0));
        channel.update(25.0);
        assert!(channel.is_complete());
        assert_eq!(channel.playhead(), 10.0);
        assert_eq!(channel.current_action(), Some(ActionId(1)));
    }

    #[test]
    fn clip_start_and_speed_shape_playhead() {
        let mut channel = AnimationChannel::new();
        channel.add_segment(
            &action(1, 100.0),
            ActionSettings {
                fade_in: 2.0,
                speed: 1.5,
                clip_start: 30.0,
            },
        );
        assert_eq!(channel.playhead(), 30.0);
        channel.update(10.0);
        assert_eq!(channel.playhead(), 45.0);
    }

    #[test]
    fn set_playhead_is_clamped_to_the_action() {
        let mut channel = AnimationChannel::new();
        channel.set_playhead(5.0);
        assert_eq!(channel.playhead(), 0.0);

        channel.add_segment(&action(1, 40.0), settings(0.0));
        channel.set_playhead(12.5);
        assert_eq!(channel.playhead(), 12.5);
        channel.set_playhead(90.0);
        assert_eq!(channel.playhead(), 40.0);
    }

    #[test]
    fn queue_on_empty_channel_plays_immediately() {
        let mut channel = AnimationChannel::new();
        assert!(channel.is_complete());
        channel.queue_segment(&action(3, 10.0), settings(0.0));
        assert_eq!(channel.current_action(), Some(ActionId(3)));
        assert!(!channel.has_queued_segments());
    }

    #[test]
    fn clear_queue_drops_pending_segments() {
        let mut channel = AnimationChannel::new();
        channel.add_segment(&action(1, 10.0), settings(0.0));
        channel.queue_segment(&action(2, 10.0), settings(0.0));
        channel.queue_segment(&action(3, 10.0), settings(0.0));
        assert_eq!(channel.queue_len(), 2);
        channel.clear_queue();
        assert!(!channel.has_queued_segments());
    }
}
