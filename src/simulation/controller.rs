//! Playback controller.
//!
//! The controller runs as a single task that owns [`SimulationState`]. Callers
//! talk to it through a [`ControllerHandle`]: commands go in over a channel,
//! [`Snapshot`]s come out over a watch channel. Because every state change
//! happens inside one `select!` loop, a turn's moves are applied only after
//! all of its animations have resolved, and no command can interleave with
//! that commit.

use crate::ant::Move;
use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::render::{place_at_rest, Renderer};
use crate::simulation::animation::{AnimationCoordinator, AnimationHandle, AnimationRequest};
use crate::simulation::snapshot::{PlaybackStatus, SimStats, Snapshot};
use crate::simulation::state::SimulationState;
use crate::simulation::turns::TurnIndex;
use crate::world::ParsedGraph;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, trace};

/// Requests a UI can make
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Play,
    Pause,
    Stop,
    StepForward,
    GoToTurn(usize),
}

struct Envelope {
    command: Command,
    done: oneshot::Sender<()>,
}

/// Cloneable front end of a running controller
#[derive(Clone, Debug)]
pub struct ControllerHandle {
    commands: mpsc::UnboundedSender<Envelope>,
    snapshots: watch::Receiver<Snapshot>,
}

impl ControllerHandle {
    async fn send(&self, command: Command) -> Result<(), SimulationError> {
        let (done, ack) = oneshot::channel();
        self.commands
            .send(Envelope { command, done })
            .map_err(|_| SimulationError::ControllerClosed)?;
        ack.await.map_err(|_| SimulationError::ControllerClosed)
    }

    /// Start or resume auto-advancing; returns once the request is taken
    pub async fn play(&self) -> Result<(), SimulationError> {
        self.send(Command::Play).await
    }

    /// Stop scheduling turns; a turn in flight still finishes
    pub async fn pause(&self) -> Result<(), SimulationError> {
        self.send(Command::Pause).await
    }

    /// Cancel animations and rewind to turn 0
    pub async fn stop(&self) -> Result<(), SimulationError> {
        self.send(Command::Stop).await
    }

    /// Play exactly one turn; returns once that turn has settled.
    /// Ignored while a turn is in flight.
    pub async fn step_forward(&self) -> Result<(), SimulationError> {
        self.send(Command::StepForward).await
    }

    /// Jump to `turn` without animating. Ignored while a turn is in flight.
    pub async fn go_to_turn(&self, turn: usize) -> Result<(), SimulationError> {
        self.send(Command::GoToTurn(turn)).await
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    pub fn stats(&self) -> SimStats {
        self.snapshots.borrow().stats()
    }

    /// Receiver notified on every snapshot change
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// Wait for the first snapshot, current one included, matching `predicate`
    pub async fn wait_for(
        &self,
        mut predicate: impl FnMut(&Snapshot) -> bool,
    ) -> Result<Snapshot, SimulationError> {
        let mut snapshots = self.snapshots.clone();
        loop {
            {
                let current = snapshots.borrow_and_update();
                if predicate(&current) {
                    return Ok(current.clone());
                }
            }
            snapshots
                .changed()
                .await
                .map_err(|_| SimulationError::ControllerClosed)?;
        }
    }
}

/// A turn whose animations are running
struct InFlightTurn {
    index: usize,
    moves: Vec<Move>,
    animations: Vec<AnimationHandle>,
    stepping: bool,
    ack: Option<oneshot::Sender<()>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimerKind {
    /// Start the next turn
    NextTurn,
    /// Rewind after dwelling on the last turn
    LoopReset,
    /// Replay from turn 0 after a loop reset
    LoopRestart,
}

#[derive(Clone, Copy, Debug)]
struct Timer {
    at: Instant,
    kind: TimerKind,
}

/// Owner of the replay state; see the module docs
pub struct SimulationController {
    index: Arc<TurnIndex>,
    state: SimulationState,
    coordinator: AnimationCoordinator,
    renderer: Arc<dyn Renderer>,
    config: SimulationConfig,
    /// Auto-advance engaged; consulted before every scheduled turn
    auto: bool,
    in_flight: Option<InFlightTurn>,
    timer: Option<Timer>,
    acks: Vec<oneshot::Sender<()>>,
    snapshots: watch::Sender<Snapshot>,
}

impl SimulationController {
    /// Build the turn index and seed every moving ant in the start room
    pub fn new(graph: &ParsedGraph, renderer: Arc<dyn Renderer>, config: SimulationConfig) -> Self {
        let index = TurnIndex::build(graph.moves());
        let state = SimulationState::new(graph.start_room().id.clone(), index.ants());
        let (snapshots, _) = watch::channel(Snapshot::default());

        let mut controller = Self {
            index: Arc::new(index),
            state,
            coordinator: AnimationCoordinator::new(config.frame_interval),
            renderer,
            config,
            auto: false,
            in_flight: None,
            timer: None,
            acks: Vec::new(),
            snapshots,
        };
        controller.rest();
        controller.flush();
        controller
    }

    /// The turn index this controller replays
    pub fn turn_index(&self) -> Arc<TurnIndex> {
        Arc::clone(&self.index)
    }

    /// Run the controller on the current runtime.
    ///
    /// The task ends once every [`ControllerHandle`] has been dropped.
    pub fn spawn(self) -> (ControllerHandle, JoinHandle<()>) {
        let (commands, inbox) = mpsc::unbounded_channel();
        let handle = ControllerHandle {
            commands,
            snapshots: self.snapshots.subscribe(),
        };
        let task = tokio::spawn(self.run(inbox));
        (handle, task)
    }

    async fn run(mut self, mut inbox: mpsc::UnboundedReceiver<Envelope>) {
        info!(
            turns = self.index.turn_count(),
            ants = self.state.total_ants(),
            "controller started"
        );

        loop {
            let deadline = self.timer.map(|timer| timer.at);
            tokio::select! {
                envelope = inbox.recv() => {
                    let Some(Envelope { command, done }) = envelope else {
                        break;
                    };
                    self.handle(command, done).await;
                }
                () = settle(self.in_flight.as_mut()) => self.finish_turn(),
                () = sleep_until(deadline) => self.fire_timer(),
            }
            self.flush();
        }

        for handle in self.coordinator.cancel_all() {
            trace!(ant = handle.ant(), "cancelled on shutdown");
        }
        debug!("controller stopped");
    }

    async fn handle(&mut self, command: Command, done: oneshot::Sender<()>) {
        debug!(?command, turn = self.state.current_turn(), "command");
        match command {
            Command::Play => self.play(),
            Command::Pause => self.pause(),
            Command::Stop => self.stop().await,
            Command::StepForward => {
                if self.step_forward().await {
                    // acknowledged once the stepped turn settles
                    if let Some(turn) = self.in_flight.as_mut() {
                        turn.ack = Some(done);
                        return;
                    }
                }
            }
            Command::GoToTurn(turn) => self.go_to_turn(turn).await,
        }
        self.acks.push(done);
    }

    fn play(&mut self) {
        if self.index.is_empty() {
            return;
        }
        self.auto = true;
        if let Some(turn) = self.in_flight.as_mut() {
            // the running turn hands over to auto-advance when it settles
            turn.stepping = false;
            return;
        }
        self.timer = None;
        self.advance_playback();
    }

    fn pause(&mut self) {
        self.auto = false;
        self.timer = None;
    }

    async fn stop(&mut self) {
        self.auto = false;
        self.timer = None;
        self.discard_in_flight().await;
        self.state.reset();
        self.rest();
        info!("simulation reset");
    }

    /// Returns whether a turn was started
    async fn step_forward(&mut self) -> bool {
        if self.in_flight.is_some() {
            trace!("step ignored, turn in flight");
            return false;
        }
        self.auto = false;
        self.timer = None;
        if self.is_complete() {
            self.stop().await;
            return false;
        }
        self.execute_turn(self.state.current_turn(), true)
    }

    async fn go_to_turn(&mut self, turn: usize) {
        if self.in_flight.is_some() {
            trace!(turn, "seek ignored, turn in flight");
            return;
        }
        let target = turn.min(self.index.turn_count());
        self.stop().await;

        for i in 0..target {
            for mv in self.index.moves_at(i) {
                self.state.apply(mv);
            }
        }
        self.state.set_turn(target, self.index.turn_count());
        self.rest();
        info!(turn = target, "seeked");
    }

    /// Start the turn at position `turn_index` and animate its moves
    fn execute_turn(&mut self, turn_index: usize, stepping: bool) -> bool {
        if self.in_flight.is_some() || turn_index >= self.index.turn_count() {
            return false;
        }

        let moves = self.index.moves_at(turn_index).to_vec();
        let mut animations = Vec::with_capacity(moves.len());
        for mv in &moves {
            self.state.mark_moving(mv.ant);
            match self.animation_request(mv) {
                Some(request) => animations.push(self.coordinator.animate(request, &self.renderer)),
                None => debug!(ant = mv.ant, room = %mv.room, "no scene position, move will not animate"),
            }
        }

        info!(
            turn = ?self.index.turn_number(turn_index),
            moves = moves.len(),
            "turn started"
        );
        self.in_flight = Some(InFlightTurn {
            index: turn_index,
            moves,
            animations,
            stepping,
            ack: None,
        });
        true
    }

    fn animation_request(&self, mv: &Move) -> Option<AnimationRequest> {
        let from_room = self.state.position(mv.ant)?;
        Some(AnimationRequest {
            ant: mv.ant,
            from: self.renderer.room_position(from_room)?,
            to: self.renderer.room_position(&mv.room)?,
            path: self.renderer.tunnel_path(from_room, &mv.room),
            duration: self.config.move_duration,
        })
    }

    /// Commit a turn whose animations have all resolved
    fn finish_turn(&mut self) {
        let Some(mut turn) = self.in_flight.take() else {
            return;
        };
        for mv in &turn.moves {
            self.state.apply(mv);
            self.state.clear_moving(mv.ant);
        }
        self.state.advance();
        self.coordinator.prune();
        info!(
            turn = ?self.index.turn_number(turn.index),
            current = self.state.current_turn(),
            "turn settled"
        );

        if let Some(ack) = turn.ack.take() {
            self.acks.push(ack);
        }
        if !self.auto {
            return;
        }
        if self.is_complete() {
            self.advance_playback();
        } else {
            self.schedule(TimerKind::NextTurn, self.config.inter_turn_delay());
        }
    }

    fn fire_timer(&mut self) {
        let Some(timer) = self.timer.take() else {
            return;
        };
        if !self.auto {
            return;
        }
        match timer.kind {
            TimerKind::NextTurn | TimerKind::LoopRestart => self.advance_playback(),
            TimerKind::LoopReset => {
                self.state.reset();
                self.rest();
                info!("looping playback");
                self.schedule(TimerKind::LoopRestart, self.config.restart_delay);
            }
        }
    }

    /// Auto-advance step: play the current turn, or loop/finish at the end
    fn advance_playback(&mut self) {
        if !self.is_complete() {
            self.execute_turn(self.state.current_turn(), false);
        } else if self.config.loop_playback {
            self.schedule(TimerKind::LoopReset, self.config.complete_dwell);
        } else {
            self.auto = false;
            info!("playback complete");
        }
    }

    /// Cancel the in-flight turn without applying it and wait for every
    /// animation task to wind down
    async fn discard_in_flight(&mut self) {
        let tracked = self.coordinator.cancel_all();
        if let Some(mut turn) = self.in_flight.take() {
            debug!(turn = ?self.index.turn_number(turn.index), "discarding in-flight turn");
            for animation in &mut turn.animations {
                animation.cancel();
                animation.finished().await;
            }
            if let Some(ack) = turn.ack.take() {
                self.acks.push(ack);
            }
        }
        for mut animation in tracked {
            animation.finished().await;
        }
    }

    fn schedule(&mut self, kind: TimerKind, delay: Duration) {
        trace!(?kind, ?delay, "timer set");
        self.timer = Some(Timer {
            at: Instant::now() + delay,
            kind,
        });
    }

    fn rest(&self) {
        place_at_rest(self.renderer.as_ref(), self.state.positions());
    }

    fn is_complete(&self) -> bool {
        self.state.is_complete(self.index.turn_count())
    }

    fn status(&self) -> PlaybackStatus {
        match &self.in_flight {
            Some(turn) if turn.stepping => PlaybackStatus::Stepping,
            Some(_) if self.auto => PlaybackStatus::Playing,
            Some(_) => PlaybackStatus::Paused,
            None if self.state.current_turn() == 0 && !self.auto => PlaybackStatus::Idle,
            None if self.is_complete() => PlaybackStatus::Complete,
            None if self.auto => PlaybackStatus::Playing,
            None => PlaybackStatus::Paused,
        }
    }

    fn snapshot(&self) -> Snapshot {
        let current_turn = self.state.current_turn();
        Snapshot {
            status: self.status(),
            current_turn,
            total_turns: self.index.turn_count(),
            last_turn_number: current_turn
                .checked_sub(1)
                .and_then(|i| self.index.turn_number(i)),
            positions: self.state.positions().clone(),
            moving: self.state.moving().clone(),
            animating: self.in_flight.is_some(),
            looping: self.config.loop_playback,
        }
    }

    /// Publish the current snapshot, then release pending acknowledgements
    fn flush(&mut self) {
        let snapshot = self.snapshot();
        self.snapshots.send_if_modified(|current| {
            if *current == snapshot {
                return false;
            }
            *current = snapshot;
            true
        });
        for ack in self.acks.drain(..) {
            let _ = ack.send(());
        }
    }
}

/// Resolves once every animation of the turn has resolved; never without a turn
async fn settle(turn: Option<&mut InFlightTurn>) {
    match turn {
        Some(turn) => {
            for animation in &mut turn.animations {
                animation.finished().await;
            }
        }
        None => std::future::pending().await,
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}
