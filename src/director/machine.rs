//! Page transition state machine.
//!
//! A transition is planned up front as a queue of steps and driven one frame at a time by
//! [`Director::update`]. Steps that animate particles hand interpolation to the [`TweenEngine`]
//! and complete when their tween group drains, so the whole sequence is observable without real
//! timers.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::animation::ease::Ease;
use crate::animation::tween::{Finished, GroupId, TweenEngine, TweenSpec};
use crate::config::{HoldMode, TransitionConfig};
use crate::director::assign::shuffled_order;
use crate::director::pages::PageHost;
use crate::foundation::core::Point;
use crate::particles::store::ParticleStore;
use crate::site::router::Route;
use crate::text::sample::TextSampler;

/// Everything a transition reads or mutates, borrowed for one call.
pub struct Stage<'a> {
    /// Particle records.
    pub store: &'a mut ParticleStore,
    /// Tween engine writing into `store`.
    pub tweens: &'a mut TweenEngine,
    /// Page containers.
    pub pages: &'a mut dyn PageHost,
    /// Text-to-points sampler.
    pub text: &'a mut TextSampler,
}

/// Transition flavour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    /// Fade, morph particles into the target page's title, switch, fade in.
    Full,
    /// Fade and switch only, dispersing a held formation. Used for returning home.
    Quick,
}

/// Externally visible director state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectorState {
    /// No transition running, particles drifting.
    Idle,
    /// A transition sequence is running; new requests are dropped.
    Transitioning,
    /// No transition running; particles breathe around a text formation.
    MorphedHeld,
}

/// Outcome of [`Director::request`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Request {
    /// The transition was planned and started.
    Accepted,
    /// A transition was already running; nothing changed.
    Dropped,
}

#[derive(Clone, Debug, PartialEq)]
enum Step {
    FadeOut { route: Route, duration: f64 },
    Morph { title: String },
    Hold { secs: f64 },
    Disperse { wait: bool },
    Swap { from: Route, to: Route },
    FadeIn { route: Route, duration: f64 },
    Settle,
}

#[derive(Clone, Copy, Debug)]
struct Fade {
    route: Route,
    elapsed: f64,
    duration: f64,
    ease: Ease,
    from: (f64, f64),
    to: (f64, f64),
}

impl Fade {
    /// Advance and apply; returns `true` once finished.
    fn advance(&mut self, dt: f64, pages: &mut dyn PageHost) -> bool {
        self.elapsed += dt;
        let t = (self.elapsed / self.duration).min(1.0);
        let e = self.ease.apply(t);
        let opacity = self.from.0 + (self.to.0 - self.from.0) * e;
        let offset = self.from.1 + (self.to.1 - self.from.1) * e;
        pages.set_content(self.route, opacity, offset);
        t >= 1.0
    }
}

#[derive(Clone, Copy, Debug)]
enum Active {
    Fade(Fade),
    Morph(Option<GroupId>),
    Hold { remaining: f64 },
    AwaitDisperse,
}

#[derive(Debug)]
struct Running {
    kind: TransitionKind,
    steps: VecDeque<Step>,
    active: Option<Active>,
}

#[derive(Debug)]
struct Formation {
    // anchors[i] is the target of particle i
    anchors: Vec<Point>,
    breathing: Option<GroupId>,
}

/// Orchestrates page transitions over the particle store.
#[derive(Debug)]
pub struct Director {
    cfg: TransitionConfig,
    rng: StdRng,
    running: Option<Running>,
    formation: Option<Formation>,
    pending_morph: Option<Vec<Point>>,
    disperse: Option<GroupId>,
    started: u64,
    dropped: u64,
}

impl Director {
    /// Idle director.
    pub fn new(cfg: TransitionConfig, seed: u64) -> Self {
        Self {
            cfg,
            rng: StdRng::seed_from_u64(seed),
            running: None,
            formation: None,
            pending_morph: None,
            disperse: None,
            started: 0,
            dropped: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> DirectorState {
        if self.running.is_some() {
            DirectorState::Transitioning
        } else if self.formation.is_some() {
            DirectorState::MorphedHeld
        } else {
            DirectorState::Idle
        }
    }

    /// Kind of the running transition.
    pub fn running_kind(&self) -> Option<TransitionKind> {
        self.running.as_ref().map(|r| r.kind)
    }

    /// Number of transitions accepted so far.
    pub fn started(&self) -> u64 {
        self.started
    }

    /// Number of requests dropped because a transition was running.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Formation targets currently held, indexed by particle.
    pub fn held_targets(&self) -> Option<&[Point]> {
        self.formation.as_ref().map(|f| f.anchors.as_slice())
    }

    /// Plan and start a transition from `from` to `to`.
    ///
    /// Requests made while a transition runs are dropped: no queueing, no replacement.
    #[tracing::instrument(level = "debug", skip(self, stage))]
    pub fn request(
        &mut self,
        from: Route,
        to: Route,
        kind: TransitionKind,
        stage: &mut Stage<'_>,
    ) -> Request {
        if self.running.is_some() {
            self.dropped += 1;
            tracing::debug!("transition already running, request dropped");
            return Request::Dropped;
        }

        let steps = match kind {
            TransitionKind::Full => self.plan_full(from, to, &*stage.pages),
            TransitionKind::Quick => self.plan_quick(from, to, &*stage.pages),
        };
        tracing::debug!(steps = steps.len(), "transition planned");
        self.started += 1;
        self.running = Some(Running {
            kind,
            steps,
            active: None,
        });
        self.update(0.0, &[], stage);
        Request::Accepted
    }

    fn fade_out(&self, route: Route, duration: f64, pages: &dyn PageHost) -> Option<Step> {
        pages
            .page(route)
            .filter(|p| p.has_content)
            .map(|_| Step::FadeOut { route, duration })
    }

    fn fade_in(&self, route: Route, duration: f64, pages: &dyn PageHost) -> Option<Step> {
        pages
            .page(route)
            .filter(|p| p.has_content)
            .map(|_| Step::FadeIn { route, duration })
    }

    fn plan_full(&self, from: Route, to: Route, pages: &dyn PageHost) -> VecDeque<Step> {
        let timings = self.cfg.full;
        let title = pages.page(to).and_then(|p| p.title);

        let mut steps = VecDeque::new();
        steps.extend(self.fade_out(from, timings.fade_out, pages));
        match title {
            Some(title) => {
                steps.push_back(Step::Morph { title });
                if let HoldMode::Brief { hold_secs } = self.cfg.hold {
                    steps.push_back(Step::Hold { secs: hold_secs });
                    steps.push_back(Step::Disperse { wait: true });
                }
            }
            None if self.formation.is_some() => steps.push_back(Step::Disperse { wait: true }),
            None => {}
        }
        steps.push_back(Step::Swap { from, to });
        steps.extend(self.fade_in(to, timings.fade_in, pages));
        steps
    }

    fn plan_quick(&self, from: Route, to: Route, pages: &dyn PageHost) -> VecDeque<Step> {
        let timings = self.cfg.quick;
        let held = self.formation.is_some();

        let mut steps = VecDeque::new();
        if held {
            steps.push_back(Step::Disperse { wait: false });
        }
        steps.extend(self.fade_out(from, timings.fade_out, pages));
        steps.push_back(Step::Swap { from, to });
        steps.extend(self.fade_in(to, timings.fade_in, pages));
        if held {
            steps.push_back(Step::Settle);
        }
        steps
    }

    /// Advance by `dt` seconds.
    ///
    /// `finished` are the tweens the engine completed this frame; call after ticking the engine.
    pub fn update(&mut self, dt: f64, finished: &[Finished], stage: &mut Stage<'_>) {
        self.settle_disperse(stage);
        self.rebreathe(finished, stage);

        let Some(mut run) = self.running.take() else {
            return;
        };

        let mut dt = dt;
        loop {
            let Some(active) = run.active.as_mut() else {
                match run.steps.pop_front() {
                    Some(step) => {
                        tracing::trace!(?step, "transition step");
                        run.active = self.begin(step, stage);
                        continue;
                    }
                    None => {
                        tracing::debug!(kind = ?run.kind, "transition complete");
                        return;
                    }
                }
            };

            if !self.poll(active, dt, stage) {
                self.running = Some(run);
                return;
            }
            run.active = None;
            dt = 0.0;
        }
    }

    fn begin(&mut self, step: Step, stage: &mut Stage<'_>) -> Option<Active> {
        let slide = self.cfg.slide_px;
        match step {
            Step::FadeOut { route, duration } => Some(Active::Fade(Fade {
                route,
                elapsed: 0.0,
                duration,
                ease: self.cfg.fade_out_ease,
                from: (1.0, 0.0),
                to: (0.0, -slide),
            })),
            Step::FadeIn { route, duration } => {
                stage.pages.set_content(route, 0.0, slide);
                Some(Active::Fade(Fade {
                    route,
                    elapsed: 0.0,
                    duration,
                    ease: self.cfg.fade_in_ease,
                    from: (0.0, slide),
                    to: (1.0, 0.0),
                }))
            }
            Step::Morph { title } => Some(Active::Morph(self.begin_morph(&title, stage))),
            Step::Hold { secs } => Some(Active::Hold { remaining: secs }),
            Step::Disperse { wait } => {
                self.begin_disperse(stage);
                wait.then_some(Active::AwaitDisperse)
            }
            Step::Settle => Some(Active::AwaitDisperse),
            Step::Swap { from, to } => {
                stage.pages.set_active(from, false);
                stage.pages.set_active(to, true);
                None
            }
        }
    }

    fn poll(&mut self, active: &mut Active, dt: f64, stage: &mut Stage<'_>) -> bool {
        match active {
            Active::Fade(fade) => fade.advance(dt, stage.pages),
            Active::Morph(group) => {
                let done = group.is_none_or(|g| stage.tweens.group_done(g));
                if done {
                    self.hold_formation(stage);
                }
                done
            }
            Active::Hold { remaining } => {
                *remaining -= dt;
                *remaining <= 0.0
            }
            Active::AwaitDisperse => self.disperse.is_none(),
        }
    }

    fn stop_breathing(&mut self, stage: &mut Stage<'_>) {
        if let Some(f) = self.formation.take()
            && let Some(g) = f.breathing
        {
            stage.tweens.kill_group(g);
        }
    }

    fn begin_morph(&mut self, title: &str, stage: &mut Stage<'_>) -> Option<GroupId> {
        let viewport = stage.store.viewport();
        let cloud = stage.text.sample(title, viewport);
        if cloud.is_empty() {
            tracing::debug!(title, "title produced no points, skipping morph");
            if self.formation.is_some() {
                self.begin_disperse(stage);
            }
            return None;
        }

        self.stop_breathing(stage);
        if let Some(g) = self.disperse.take() {
            stage.tweens.kill_group(g);
        }

        stage.store.grow(cloud.len());
        let order = shuffled_order(cloud.len(), &mut self.rng);
        let center = viewport.center();
        let cfg = &self.cfg;

        let mut anchors = Vec::with_capacity(cloud.len());
        let mut specs = Vec::with_capacity(stage.store.len());
        for slot in 0..stage.store.len() {
            stage.tweens.kill_index(slot);
            let delay = self.rng.random_range(0.0..=cfg.morph.stagger);
            let spec = TweenSpec::new(slot, cfg.morph.duration, cfg.morph.ease).with_delay(delay);
            match order.get(slot) {
                Some(&point) => {
                    let target = center + cloud.points[point];
                    stage.store.claim(slot, Some(target));
                    anchors.push(target);
                    specs.push(
                        spec.to_xy(target.x, target.y)
                            .to_opacity(cfg.morph_opacity.sample(&mut self.rng))
                            .to_size(cfg.morph_size.sample(&mut self.rng)),
                    );
                }
                None => {
                    stage.store.release(slot);
                    specs.push(spec.to_opacity(cfg.extra_opacity));
                }
            }
        }

        tracing::debug!(
            title,
            points = anchors.len(),
            particles = stage.store.len(),
            "morphing to text"
        );
        self.pending_morph = Some(anchors);
        Some(stage.tweens.start_group(specs))
    }

    fn hold_formation(&mut self, stage: &mut Stage<'_>) {
        let Some(anchors) = self.pending_morph.take() else {
            return;
        };
        let mut formation = Formation {
            anchors,
            breathing: None,
        };
        let group = stage.tweens.start_group(std::iter::empty());
        for index in 0..formation.anchors.len() {
            let spec = self.breath(index, formation.anchors[index]);
            stage.tweens.push(group, spec);
        }
        formation.breathing = Some(group);
        self.formation = Some(formation);
    }

    fn breath(&mut self, index: usize, anchor: Point) -> TweenSpec {
        let b = self.cfg.breathing;
        let amp = b.amplitude.abs();
        let dx = self.rng.random_range(-amp..=amp);
        let dy = self.rng.random_range(-amp..=amp);
        TweenSpec::new(index, b.period.sample(&mut self.rng), Ease::InOutSine)
            .to_xy(anchor.x + dx, anchor.y + dy)
    }

    fn rebreathe(&mut self, finished: &[Finished], stage: &mut Stage<'_>) {
        let Some(formation) = self.formation.as_ref() else {
            return;
        };
        let Some(group) = formation.breathing else {
            return;
        };
        let due: Vec<(usize, Point)> = finished
            .iter()
            .filter(|f| f.group == group)
            .filter_map(|f| formation.anchors.get(f.index).map(|&a| (f.index, a)))
            .collect();
        for (index, anchor) in due {
            let spec = self.breath(index, anchor);
            stage.tweens.push(group, spec);
        }
    }

    fn begin_disperse(&mut self, stage: &mut Stage<'_>) {
        self.stop_breathing(stage);
        self.pending_morph = None;

        let viewport = stage.store.viewport();
        let pcfg = stage.store.config().clone();
        let timing = self.cfg.disperse;

        let mut specs = Vec::with_capacity(stage.store.len());
        for index in 0..stage.store.len() {
            stage.tweens.kill_index(index);
            let target = stage.store.get(index).and_then(|p| p.target);
            stage.store.claim(index, target);
            let x = self.rng.random_range(0.0..=viewport.width());
            let y = self.rng.random_range(0.0..=viewport.height());
            specs.push(
                TweenSpec::new(index, timing.duration, timing.ease)
                    .to_xy(x, y)
                    .to_size(pcfg.size.sample(&mut self.rng))
                    .to_opacity(pcfg.opacity.sample(&mut self.rng))
                    .with_delay(self.rng.random_range(0.0..=timing.stagger)),
            );
        }
        tracing::debug!(particles = specs.len(), "dispersing");
        self.disperse = Some(stage.tweens.start_group(specs));
    }

    fn settle_disperse(&mut self, stage: &mut Stage<'_>) {
        if let Some(g) = self.disperse
            && stage.tweens.group_done(g)
        {
            stage.store.release_all_targets();
            self.disperse = None;
            tracing::trace!("disperse settled, particles free");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/director/machine.rs"]
mod tests;
