// Playback properties checked through the public controller API.
// Every test runs on a paused clock, so animation timing is virtual.

use ant_farm::prelude::*;
use ant_farm::render::Vec3;
use ant_farm::world::parse;
use ant_farm::AntId;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

const FARM: &str = "\
3
##start
S 0 0 0
M 5 0 0
N 5 5 0
##end
E 10 0 0
S-M
S-N
M-E
N-E
L1-M L2-N
L1-E L2-E L3-M
L3-E
";

fn controller(src: &str) -> ControllerHandle {
    let graph = parse(src).unwrap();
    let layout = Arc::new(SceneLayout::new(&graph, 1.0, &mut fastrand::Rng::with_seed(3)));
    let config = SimulationConfig {
        loop_playback: false,
        ..SimulationConfig::default()
    };
    let (handle, _task) = SimulationController::new(&graph, layout, config).spawn();
    handle
}

#[tokio::test(start_paused = true)]
async fn two_ants_reach_b_after_one_turn() {
    let src = "2\n##start\nA 0 0\n##end\nB 1 0\nA-B\nL1-B L2-B\n";
    let graph = parse(src).unwrap();
    assert_eq!(graph.start_room().id, "A");
    assert_eq!(graph.end_room().id, "B");
    assert_eq!(graph.tunnels().len(), 1);
    assert_eq!(graph.moves().len(), 2);

    let handle = controller(src);

    handle.go_to_turn(1).await.unwrap();

    let snap = handle.snapshot();
    assert_eq!(snap.position(1), Some("B"));
    assert_eq!(snap.position(2), Some("B"));
    assert_eq!(snap.status, PlaybackStatus::Complete);
}

#[tokio::test(start_paused = true)]
async fn seeking_matches_stepping() {
    let handle = controller(FARM);

    for n in 0..=3 {
        handle.go_to_turn(n).await.unwrap();
        let seeked = handle.snapshot().positions;

        handle.stop().await.unwrap();
        for _ in 0..n {
            handle.step_forward().await.unwrap();
        }
        let stepped = handle.snapshot();

        assert_eq!(stepped.current_turn, n);
        assert_eq!(stepped.positions, seeked, "turn {n}");
    }
}

#[tokio::test(start_paused = true)]
async fn moves_commit_only_when_turn_settles() {
    let handle = controller(FARM);

    handle.play().await.unwrap();
    sleep(Duration::from_millis(1000)).await;

    let mid_turn = handle.snapshot();
    assert!(mid_turn.animating);
    assert_eq!(mid_turn.current_turn, 0);
    assert_eq!(mid_turn.moving, [1, 2].into());
    assert_eq!(mid_turn.position(1), Some("S"));
    assert_eq!(mid_turn.stats().moving_agents, 2);

    sleep(Duration::from_millis(600)).await;
    let settled = handle.snapshot();
    assert!(!settled.animating);
    assert_eq!(settled.current_turn, 1);
    assert!(settled.moving.is_empty());
    assert_eq!(settled.position(1), Some("M"));
    assert_eq!(settled.position(2), Some("N"));
    assert_eq!(settled.position(3), Some("S"));

    // second turn starts 2000ms after the first one
    sleep(Duration::from_millis(1000)).await;
    let second = handle.snapshot();
    assert!(second.animating);
    assert_eq!(second.current_turn, 1);
    assert_eq!(second.moving, [1, 2, 3].into());
    assert_eq!(second.position(3), Some("S"));
}

/// Scene that cannot place one room, so moves into it are never animated
struct Partial {
    scene: SceneLayout,
    hidden: &'static str,
}

impl Renderer for Partial {
    fn room_position(&self, room: &str) -> Option<Vec3> {
        if room == self.hidden {
            return None;
        }
        self.scene.room_position(room)
    }

    fn place_ant(&self, ant: AntId, position: Vec3) {
        self.scene.place_ant(ant, position);
    }
}

#[tokio::test(start_paused = true)]
async fn unanimated_move_waits_for_rest_of_turn() {
    let src = "2\n##start\nS 0 0 0\nM 5 0 0\nX 0 5 0\n##end\nE 10 0 0\nS-M\nS-X\nM-E\nX-E\nL1-M L2-X\nL1-E L2-E\n";
    let graph = parse(src).unwrap();
    let renderer = Arc::new(Partial {
        scene: SceneLayout::new(&graph, 1.0, &mut fastrand::Rng::with_seed(3)),
        hidden: "X",
    });
    let config = SimulationConfig {
        loop_playback: false,
        ..SimulationConfig::default()
    };
    let (handle, _task) = SimulationController::new(&graph, renderer, config).spawn();

    handle.play().await.unwrap();
    sleep(Duration::from_millis(1000)).await;

    // ant 2 has nothing to animate but is held back with ant 1
    let mid_turn = handle.snapshot();
    assert!(mid_turn.animating);
    assert_eq!(mid_turn.current_turn, 0);
    assert_eq!(mid_turn.position(2), Some("S"));
    assert!(mid_turn.moving.contains(&2));

    sleep(Duration::from_millis(600)).await;
    let settled = handle.snapshot();
    assert_eq!(settled.current_turn, 1);
    assert_eq!(settled.position(1), Some("M"));
    assert_eq!(settled.position(2), Some("X"));
    assert!(settled.moving.is_empty());
}

#[tokio::test(start_paused = true)]
async fn stop_mid_turn_discards_it() {
    let handle = controller(FARM);

    handle.play().await.unwrap();
    sleep(Duration::from_millis(700)).await;
    handle.stop().await.unwrap();

    let snap = handle.snapshot();
    assert_eq!(snap.status, PlaybackStatus::Idle);
    assert_eq!(snap.current_turn, 0);
    assert!(snap.moving.is_empty());
    assert!(!snap.animating);
    assert!(snap.positions.values().all(|room| room == "S"));

    // nothing resumes on its own
    sleep(Duration::from_secs(10)).await;
    assert_eq!(handle.snapshot(), snap);
}

#[tokio::test(start_paused = true)]
async fn stop_releases_pending_step() {
    let handle = controller(FARM);
    let stepper = handle.clone();

    let step = tokio::spawn(async move { stepper.step_forward().await });
    handle.wait_for(|s| s.animating).await.unwrap();
    assert_eq!(handle.snapshot().status, PlaybackStatus::Stepping);

    handle.stop().await.unwrap();
    step.await.unwrap().unwrap();
    assert_eq!(handle.snapshot().current_turn, 0);
}

#[tokio::test(start_paused = true)]
async fn pause_is_idempotent() {
    let handle = controller(FARM);

    handle.play().await.unwrap();
    handle.pause().await.unwrap();
    let once = handle.snapshot();
    handle.pause().await.unwrap();
    assert_eq!(handle.snapshot(), once);

    // the turn already in flight still lands, then playback holds
    sleep(Duration::from_secs(10)).await;
    let held = handle.snapshot();
    assert_eq!(held.current_turn, 1);
    assert_eq!(held.status, PlaybackStatus::Paused);
}

#[tokio::test(start_paused = true)]
async fn play_resumes_after_pause() {
    let handle = controller(FARM);

    handle.step_forward().await.unwrap();
    handle.play().await.unwrap();

    let done = handle
        .wait_for(|s| s.status == PlaybackStatus::Complete)
        .await
        .unwrap();
    assert!(done.positions.values().all(|room| room == "E"));
}

#[tokio::test(start_paused = true)]
async fn seek_is_idempotent() {
    let handle = controller(FARM);

    handle.go_to_turn(2).await.unwrap();
    let first = handle.snapshot();
    handle.go_to_turn(2).await.unwrap();

    assert_eq!(handle.snapshot(), first);
    assert_eq!(first.status, PlaybackStatus::Paused);
    assert_eq!(first.turn_label(), "2");
}

#[tokio::test(start_paused = true)]
async fn snapshot_updates_are_observable() {
    let handle = controller(FARM);
    let mut updates = handle.subscribe();

    handle.step_forward().await.unwrap();
    assert!(updates.has_changed().unwrap());
    assert_eq!(updates.borrow_and_update().current_turn, 1);
    assert_eq!(handle.stats().current_turn, 1);
    assert_eq!(handle.stats().total_agents, 3);
}
