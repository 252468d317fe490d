use ant_farm::prelude::*;
use ant_farm::report;
use ant_farm::simulation::TurnIndex;
use ant_farm::world::parse_file;
use clap::Parser;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let graph = match parse_file(&args.map) {
        Ok(graph) => graph,
        Err(err) => {
            report::print_error(&err);
            std::process::exit(1);
        }
    };

    if args.check {
        report::print_summary(&graph.stats(), None);
        return Ok(());
    }

    let mut rng = if let Some(seed) = args.seed {
        fastrand::Rng::with_seed(seed)
    } else {
        fastrand::Rng::new()
    };
    let layout = Arc::new(SceneLayout::new(&graph, SceneLayout::DEFAULT_SCALE, &mut rng));

    let controller = SimulationController::new(&graph, layout, SimulationConfig::from(&args));
    let turns = controller.turn_index();
    let (handle, task) = controller.spawn();

    let started = Instant::now();
    replay(&args, &handle, &turns).await?;
    drop(handle);
    task.await?;

    report::print_summary(&graph.stats(), Some(started.elapsed()));
    Ok(())
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Play the farm, printing each turn as it settles, until playback completes
/// or, when looping, until Ctrl-C
async fn replay(
    args: &Args,
    handle: &ControllerHandle,
    turns: &TurnIndex,
) -> std::result::Result<(), SimulationError> {
    let mut printed = 0;
    if let Some(turn) = args.seek {
        handle.go_to_turn(turn).await?;
        printed = handle.snapshot().current_turn;
    }
    handle.play().await?;

    let mut snapshots = handle.subscribe();
    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    loop {
        let snapshot = snapshots.borrow_and_update().clone();
        if snapshot.current_turn < printed {
            printed = 0;
            if !args.quiet {
                report::print_loop();
            }
        }
        for i in printed..snapshot.current_turn {
            if !args.quiet {
                report::print_turn(turns.turn_number(i).unwrap_or_default(), turns.moves_at(i));
            }
        }
        printed = snapshot.current_turn;

        if !args.loop_playback && snapshot.is_complete() && !snapshot.animating {
            return Ok(());
        }

        tokio::select! {
            changed = snapshots.changed() => {
                changed.map_err(|_| SimulationError::ControllerClosed)?;
            }
            _ = &mut interrupt => {
                handle.stop().await?;
                return Ok(());
            }
        }
    }
}
