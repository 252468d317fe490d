use crate::ant::AntId;
use crate::render::{Renderer, TunnelPath, Vec3};
use std::collections::HashMap;
use std::f64::consts::{PI, TAU};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::trace;

/// Radius of the orbit an ant draws around a tunnel's centre line
const TUNNEL_ORBIT: f64 = 1.2 * 0.3;
/// Peak height of the hop used when there is no tunnel curve
const HOP_HEIGHT: f64 = 5.0;

/// Cubic ease-out: fast start, soft landing
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// How an animation task ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationOutcome {
    Completed,
    Cancelled,
}

/// One ant travelling from one room to another
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationRequest {
    pub ant: AntId,
    pub from: Vec3,
    pub to: Vec3,
    pub path: Option<TunnelPath>,
    pub duration: Duration,
}

impl AnimationRequest {
    /// Position of the ant at linear progress `progress` in `[0, 1]`
    pub fn sample(&self, progress: f64) -> Vec3 {
        let progress = progress.clamp(0.0, 1.0);
        let eased = ease_out_cubic(progress);

        match &self.path {
            Some(path) => {
                let mut point = path.point_at(eased);
                let phase = (self.ant as f64 * 0.5) % TAU + progress * TAU;
                point.x += phase.cos() * TUNNEL_ORBIT;
                point.z += phase.sin() * TUNNEL_ORBIT;
                point
            }
            None => {
                let mut point = self.from.lerp(self.to, eased);
                point.y += (eased * PI).sin() * HOP_HEIGHT;
                point
            }
        }
    }

    fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

/// Handle on a running animation task.
///
/// Clones share the task. [`cancel`](Self::cancel) is idempotent, and every
/// task publishes an outcome when it ends, however it ends, so
/// [`finished`](Self::finished) never hangs. Dropping every clone cancels
/// the task.
#[derive(Clone, Debug)]
pub struct AnimationHandle {
    ant: AntId,
    cancel: Arc<watch::Sender<bool>>,
    done: watch::Receiver<Option<AnimationOutcome>>,
}

impl AnimationHandle {
    pub fn ant(&self) -> AntId {
        self.ant
    }

    /// Ask the task to stop at its next frame
    pub fn cancel(&self) {
        self.cancel.send_replace(true);
    }

    pub fn is_finished(&self) -> bool {
        self.done.borrow().is_some()
    }

    /// Wait until the task has ended
    pub async fn finished(&mut self) -> AnimationOutcome {
        loop {
            let current = *self.done.borrow_and_update();
            if let Some(outcome) = current {
                return outcome;
            }
            if self.done.changed().await.is_err() {
                // the task went away, possibly without reporting (panic or runtime shutdown)
                let last = *self.done.borrow();
                return last.unwrap_or(AnimationOutcome::Cancelled);
            }
        }
    }
}

/// Spawns and tracks per-ant movement animations
#[derive(Debug)]
pub struct AnimationCoordinator {
    frame_interval: Duration,
    active: HashMap<AntId, AnimationHandle>,
}

impl AnimationCoordinator {
    pub fn new(frame_interval: Duration) -> Self {
        Self {
            frame_interval: frame_interval.max(Duration::from_millis(1)),
            active: HashMap::new(),
        }
    }

    /// Start animating `request.ant`; a previous animation of the same ant is
    /// cancelled and forgotten.
    pub fn animate(&mut self, request: AnimationRequest, renderer: &Arc<dyn Renderer>) -> AnimationHandle {
        let ant = request.ant;
        if let Some(previous) = self.active.remove(&ant) {
            trace!(ant, "superseding running animation");
            previous.cancel();
        }

        let (cancel_tx, cancel_rx) = watch::channel(false);
        let (done_tx, done_rx) = watch::channel(None);
        let renderer = Arc::clone(renderer);
        let frame_interval = self.frame_interval;

        tokio::spawn(async move {
            let outcome = run(request, renderer, frame_interval, cancel_rx).await;
            trace!(ant, ?outcome, "animation ended");
            done_tx.send_replace(Some(outcome));
        });

        let handle = AnimationHandle {
            ant,
            cancel: Arc::new(cancel_tx),
            done: done_rx,
        };
        self.active.insert(ant, handle.clone());
        handle
    }

    /// Cancel every tracked animation and stop tracking them.
    ///
    /// The returned handles let the caller wait for the tasks to wind down.
    pub fn cancel_all(&mut self) -> Vec<AnimationHandle> {
        let handles: Vec<AnimationHandle> = self.active.drain().map(|(_, h)| h).collect();
        for handle in &handles {
            handle.cancel();
        }
        handles
    }

    /// Forget animations that have already ended
    pub fn prune(&mut self) {
        self.active.retain(|_, handle| !handle.is_finished());
    }
}

async fn run(
    request: AnimationRequest,
    renderer: Arc<dyn Renderer>,
    frame_interval: Duration,
    mut cancel: watch::Receiver<bool>,
) -> AnimationOutcome {
    let started = Instant::now();
    let mut frames = tokio::time::interval(frame_interval);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            changed = cancel.changed() => {
                // an error means every handle has been dropped
                if changed.is_err() || *cancel.borrow_and_update() {
                    return AnimationOutcome::Cancelled;
                }
            }
            _ = frames.tick() => {
                let progress = request.progress(started.elapsed());
                renderer.place_ant(request.ant, request.sample(progress));
                if progress >= 1.0 {
                    return AnimationOutcome::Completed;
                }
            }
        }
    }
}
