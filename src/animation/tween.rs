//! In-process tween engine.
//!
//! Tweens interpolate numeric properties of indexed records (particles) toward end values over a
//! duration, after an optional delay. Tweens are grouped so a caller can wait for "all of this
//! batch finished" without callbacks: the engine is ticked once per frame and reports completions.

use crate::animation::ease::Ease;

/// Animatable property of an indexed record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Prop {
    /// Horizontal position.
    X,
    /// Vertical position.
    Y,
    /// Opacity in `[0, 1]`.
    Opacity,
    /// Radius.
    Size,
}

/// Collection of records whose properties a [`TweenEngine`] may read and write.
pub trait Animatable {
    /// Current value of `prop` on record `index`, or `None` when the record does not exist.
    fn prop(&self, index: usize, prop: Prop) -> Option<f64>;

    /// Overwrite `prop` on record `index`. Unknown indices are ignored.
    fn set_prop(&mut self, index: usize, prop: Prop, value: f64);
}

/// End values for a tween. Unset properties are left alone.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PropTargets {
    /// End value for [`Prop::X`].
    pub x: Option<f64>,
    /// End value for [`Prop::Y`].
    pub y: Option<f64>,
    /// End value for [`Prop::Opacity`].
    pub opacity: Option<f64>,
    /// End value for [`Prop::Size`].
    pub size: Option<f64>,
}

impl PropTargets {
    fn entries(&self) -> [(Prop, Option<f64>); 4] {
        [
            (Prop::X, self.x),
            (Prop::Y, self.y),
            (Prop::Opacity, self.opacity),
            (Prop::Size, self.size),
        ]
    }
}

/// Description of one tween on one record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenSpec {
    /// Record index.
    pub index: usize,
    /// End values.
    pub to: PropTargets,
    /// Duration in seconds.
    pub duration: f64,
    /// Delay before the tween starts, in seconds.
    pub delay: f64,
    /// Easing applied to progress.
    pub ease: Ease,
}

impl TweenSpec {
    /// Start a spec for `index` with no end values and no delay.
    pub fn new(index: usize, duration: f64, ease: Ease) -> Self {
        Self {
            index,
            to: PropTargets::default(),
            duration,
            delay: 0.0,
            ease,
        }
    }

    /// Tween position to `(x, y)`.
    pub fn to_xy(mut self, x: f64, y: f64) -> Self {
        self.to.x = Some(x);
        self.to.y = Some(y);
        self
    }

    /// Tween opacity.
    pub fn to_opacity(mut self, opacity: f64) -> Self {
        self.to.opacity = Some(opacity);
        self
    }

    /// Tween size.
    pub fn to_size(mut self, size: f64) -> Self {
        self.to.size = Some(size);
        self
    }

    /// Delay the start.
    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay.max(0.0);
        self
    }
}

/// Identifier for a batch of tweens started together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(u64);

/// A tween that ran to completion during a [`TweenEngine::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Finished {
    /// Group the tween belonged to.
    pub group: GroupId,
    /// Record index the tween drove.
    pub index: usize,
}

#[derive(Clone, Debug)]
struct ActiveTween {
    spec: TweenSpec,
    group: GroupId,
    elapsed: f64,
    // Captured when the delay elapses.
    from: Option<[Option<f64>; 4]>,
}

/// Frame-ticked tween engine.
#[derive(Debug, Default)]
pub struct TweenEngine {
    tweens: Vec<ActiveTween>,
    next_group: u64,
}

impl TweenEngine {
    /// Create an engine with no active tweens.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new group and start every spec in it.
    pub fn start_group(&mut self, specs: impl IntoIterator<Item = TweenSpec>) -> GroupId {
        let group = GroupId(self.next_group);
        self.next_group += 1;
        for spec in specs {
            self.push(group, spec);
        }
        group
    }

    /// Add one more tween to an existing group.
    pub fn push(&mut self, group: GroupId, spec: TweenSpec) {
        self.tweens.push(ActiveTween {
            spec,
            group,
            elapsed: 0.0,
            from: None,
        });
    }

    /// Advance all tweens by `dt` seconds, writing interpolated values into `target`.
    ///
    /// Returns every tween that reached its end this tick. A finished tween writes its exact end
    /// values. Tweens on records that no longer exist are dropped without being reported.
    pub fn tick<A: Animatable + ?Sized>(&mut self, dt: f64, target: &mut A) -> Vec<Finished> {
        let dt = dt.max(0.0);
        let mut finished = Vec::new();

        self.tweens.retain_mut(|tw| {
            tw.elapsed += dt;
            if tw.elapsed < tw.spec.delay {
                return true;
            }

            let index = tw.spec.index;
            let entries = tw.spec.to.entries();
            let from = match tw.from {
                Some(from) => from,
                None => {
                    if target.prop(index, Prop::X).is_none() {
                        return false;
                    }
                    let captured = entries.map(|(prop, end)| end.and(target.prop(index, prop)));
                    tw.from = Some(captured);
                    captured
                }
            };

            let local = tw.elapsed - tw.spec.delay;
            let t = if tw.spec.duration <= 0.0 {
                1.0
            } else {
                (local / tw.spec.duration).min(1.0)
            };
            let done = t >= 1.0;

            for ((prop, end), start) in entries.into_iter().zip(from) {
                let (Some(end), Some(start)) = (end, start) else {
                    continue;
                };
                let value = if done {
                    end
                } else {
                    start + (end - start) * tw.spec.ease.apply(t)
                };
                target.set_prop(index, prop, value);
            }

            if done {
                finished.push(Finished {
                    group: tw.group,
                    index,
                });
            }
            !done
        });

        finished
    }

    /// Return `true` when no tween of `group` remains active.
    pub fn group_done(&self, group: GroupId) -> bool {
        !self.tweens.iter().any(|tw| tw.group == group)
    }

    /// Stop every tween of `group` where it stands.
    pub fn kill_group(&mut self, group: GroupId) {
        self.tweens.retain(|tw| tw.group != group);
    }

    /// Stop every tween driving record `index`.
    pub fn kill_index(&mut self, index: usize) {
        self.tweens.retain(|tw| tw.spec.index != index);
    }

    /// Number of tweens still pending or running.
    pub fn active_count(&self) -> usize {
        self.tweens.len()
    }

    /// Return `true` when nothing is animating.
    pub fn is_idle(&self) -> bool {
        self.tweens.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
