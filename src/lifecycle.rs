#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::{info, trace};

use crate::components::{ClearedRows, GameState, Input, Key, Phase};
use crate::config::rules::Rules;
use crate::gravity::DropScheduler;
use crate::grid::Grid;
use crate::piece::PieceController;
use crate::queue::PieceQueue;
use crate::systems;

#[must_use]
pub fn create_world(rules: Rules) -> World {
    let mut world = World::new();
    world.insert_resource(Grid::new());
    world.insert_resource(PieceController::new(rules.shift_rate));
    world.insert_resource(DropScheduler::default());
    world.insert_resource(PieceQueue::new(rules.rng()));
    world.insert_resource(GameState {
        drop_rate: rules.initial_drop_rate,
        ..GameState::default()
    });
    world.insert_resource(Input::default());
    world.insert_resource(ClearedRows::default());
    world.insert_resource(rules);
    world
}

// Used from both Idle and GameOver
pub fn start_game(world: &mut World) {
    let rules = world.resource::<Rules>().clone();
    world.resource_mut::<Grid>().clear();
    world.resource_mut::<PieceController>().reset();
    world.resource_mut::<DropScheduler>().reset();
    world.resource_mut::<ClearedRows>().rows.clear();

    let mut state = world.resource_mut::<GameState>();
    state.reset(&rules);
    state.phase = Phase::Running;
    info!("Game started");
}

/// One simulation step. Input edges in `Input` are read but not cleared;
/// the caller ends the input frame after rendering.
pub fn frame_system(world: &mut World, delta_seconds: f32) {
    if !world.resource::<GameState>().running() {
        if world.resource::<Input>().key_pressed(Key::Down) {
            start_game(world);
        }
        return;
    }
    trace!("Frame with delta: {delta_seconds}");

    systems::clear_transient_system(world);

    if systems::spawn_system(world) {
        systems::rotation_system(world);
        systems::shift_system(world, delta_seconds);
        systems::gravity_system(world, delta_seconds);
    }

    systems::paint_system(world);
}

/// Stops the simulation. Safe to call more than once per frame.
pub fn end_game(world: &mut World) {
    let mut state = world.resource_mut::<GameState>();
    if state.phase == Phase::GameOver {
        return;
    }
    state.phase = Phase::GameOver;
    info!("Game over with {} lines", state.lines);
}
