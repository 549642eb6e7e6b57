use std::cell::Cell;

use super::*;
use crate::foundation::core::{Circle, Rgba8};

#[derive(Default)]
struct Counter {
    steps: Vec<f64>,
    paints: Cell<usize>,
}

impl Scene for Counter {
    fn advance(&mut self, dt_ms: f64) {
        self.steps.push(dt_ms);
    }

    fn paint(&self, surface: &mut dyn Surface) {
        self.paints.set(self.paints.get() + 1);
        surface.clear(Rgba8::transparent());
    }
}

struct Null;

impl Surface for Null {
    fn size(&self) -> (u32, u32) {
        (1, 1)
    }
    fn clear(&mut self, _color: Rgba8) {}
    fn fill_circle(&mut self, _circle: Circle, _color: Rgba8) {}
}

#[test]
fn stopped_loop_produces_no_frames() {
    let mut lp = RenderLoop::new();
    let mut scene = Counter::default();
    assert!(!lp.is_running());
    assert_eq!(lp.tick(16.0, &mut scene, &mut Null), None);
    assert!(scene.steps.is_empty());
}

#[test]
fn first_frame_is_zero_then_elapsed_is_clamped() {
    let mut lp = RenderLoop::new();
    let mut scene = Counter::default();
    lp.start();
    assert_eq!(lp.tick(5_000.0, &mut scene, &mut Null), Some(0.0));
    assert_eq!(lp.tick(5_016.0, &mut scene, &mut Null), Some(16.0));
    assert_eq!(lp.tick(9_000.0, &mut scene, &mut Null), Some(MAX_FRAME_MS));
    assert_eq!(lp.tick(8_000.0, &mut scene, &mut Null), Some(0.0));
    assert_eq!(scene.steps, vec![0.0, 16.0, MAX_FRAME_MS, 0.0]);
    assert_eq!(scene.paints.get(), 4);
    assert_eq!(lp.frames(), 4);
}

#[test]
fn cancel_token_stops_the_loop_and_restart_resets_timing() {
    let mut lp = RenderLoop::new();
    let mut scene = Counter::default();
    let token = lp.start();
    lp.tick(0.0, &mut scene, &mut Null);
    token.cancel();
    assert!(!lp.is_running());
    assert_eq!(lp.tick(16.0, &mut scene, &mut Null), None);

    let again = lp.start();
    assert!(lp.is_running());
    assert!(token.is_cancelled());
    assert!(!again.is_cancelled());
    assert_eq!(lp.tick(100.0, &mut scene, &mut Null), Some(0.0));
    lp.stop();
    lp.stop();
    assert!(again.is_cancelled());
}

#[test]
fn run_follows_the_clock_until_the_callback_breaks() {
    let mut lp = RenderLoop::new();
    let mut scene = Counter::default();
    let mut clock = FixedClock::new(50.0).unwrap();
    lp.start();
    let produced: Result<u64, ()> = lp.run(&mut clock, &mut scene, &mut Null, |frame, _, _| {
        Ok(if frame == 4 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        })
    });
    assert_eq!(produced, Ok(5));
    assert_eq!(scene.steps, vec![0.0, 20.0, 20.0, 20.0, 20.0]);
    assert!(!lp.is_running());
}

#[test]
fn run_propagates_callback_errors() {
    let mut lp = RenderLoop::new();
    let mut scene = Counter::default();
    let mut clock = FixedClock::new(60.0).unwrap();
    lp.start();
    let out = lp.run(&mut clock, &mut scene, &mut Null, |_, _, _| Err("disk full"));
    assert_eq!(out, Err("disk full"));
    assert_eq!(scene.steps.len(), 1);
}

#[test]
fn run_on_a_stopped_loop_returns_immediately() {
    let mut lp = RenderLoop::new();
    let mut clock = FixedClock::new(30.0).unwrap();
    let out: Result<u64, ()> = lp.run(&mut clock, &mut Counter::default(), &mut Null, |_, _, _| {
        Ok(ControlFlow::Continue(()))
    });
    assert_eq!(out, Ok(0));
}

#[test]
fn fixed_clock_starts_at_zero() {
    assert!(FixedClock::new(0.0).is_err());
    assert!(FixedClock::new(f64::INFINITY).is_err());
    let mut clock = FixedClock::new(4.0).unwrap();
    assert_eq!(clock.interval_ms(), 250.0);
    assert_eq!(clock.next_frame(), 0.0);
    assert_eq!(clock.next_frame(), 250.0);
}
