#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;
use std::time::Instant;

use crate::Time;
use crate::components::{GameState, Input, Key};
use crate::config::{Config, ControlsConfig};
use crate::lifecycle;
use crate::render::{RenderSink, present_system};

pub struct App {
    pub world: World,
    pub config: Config,
    pub should_quit: bool,
    // The terminal reports key releases, so keys never time out
    pub keyboard_enhanced: bool,
}

impl App {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let mut world = lifecycle::create_world(config.rules.clone());
        world.insert_resource(Time::new());

        Self {
            world,
            config,
            should_quit: false,
            keyboard_enhanced: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        debug!("Key event: {key:?}");

        if key.kind != KeyEventKind::Release
            && (key.code == KeyCode::Char(self.config.controls.quit)
                || (key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL)))
        {
            self.should_quit = true;
            return;
        }

        let Some(game_key) = map_key(key.code, &self.config.controls) else {
            return;
        };

        let mut input = self.world.resource_mut::<Input>();
        match key.kind {
            KeyEventKind::Press if self.keyboard_enhanced => input.press(game_key),
            KeyEventKind::Repeat if self.keyboard_enhanced => {}
            KeyEventKind::Press | KeyEventKind::Repeat => input.press_at(game_key, now),
            KeyEventKind::Release => input.release(game_key),
        }
    }

    /// Advances the clock and runs one simulation frame. Returns the delta used.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let delta_seconds = {
            let mut time = self.world.resource_mut::<Time>();
            time.update();
            time.delta_seconds()
        };

        if !self.keyboard_enhanced {
            let hold = self.config.terminal.key_hold();
            self.world
                .resource_mut::<Input>()
                .release_stale(now, hold);
        }

        lifecycle::frame_system(&mut self.world, delta_seconds);
        delta_seconds
    }

    /// Pushes the frame to `sink` and closes the input frame.
    pub fn present<S: RenderSink>(&mut self, sink: &mut S) -> Result<(), S::Error> {
        let result = present_system(&mut self.world, sink);
        self.world.resource_mut::<Input>().end_frame();
        result
    }

    #[must_use]
    pub fn game_state(&self) -> &GameState {
        self.world.resource::<GameState>()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[must_use]
pub fn map_key(code: KeyCode, controls: &ControlsConfig) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Up => Some(Key::RotateCw),
        KeyCode::Char(c) if c.eq_ignore_ascii_case(&controls.rotate_cw) => Some(Key::RotateCw),
        KeyCode::Char(c) if c.eq_ignore_ascii_case(&controls.rotate_ccw) => Some(Key::RotateCcw),
        _ => None,
    }
}
