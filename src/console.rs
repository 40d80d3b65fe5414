use crate::animation::{Animation, AnimationStep};
use crate::autocomplete::complete;
use crate::command::{CommandRegistry, Effect};
use crate::config::ConsoleConfig;
use crate::content::Content;
use crate::context::SessionState;
use crate::dispatch;
use crate::error::{ConsoleError, Result};
use crate::history::HistoryCursor;
use crate::output::OutputRecord;
use crate::render::Renderer;
use crate::surface::Surface;
use crate::vfs::{normalize, VirtualFileSystem};
use std::time::Duration;
use tracing::{debug, info};

/// Keys the input field reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    ArrowUp,
    ArrowDown,
    Tab,
    Escape,
    Other,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Enter" => Key::Enter,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "Tab" => Key::Tab,
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }

    /// Keys pressed outside the input field only bring focus back to it.
    pub fn scoped(self, in_input: bool) -> Self {
        if in_input {
            self
        } else {
            Key::Other
        }
    }

    /// true for keys the console consumes, so the browser default is skipped
    pub fn is_handled(self) -> bool {
        self != Key::Other
    }
}

/// What the host should do after a call to [`Console::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// call `tick` again after this long
    Wait(Duration),
    /// nothing left to play until the next key press
    Idle,
    /// leave the page
    Navigate(String),
}

/// Owns the current session and everything that drives the screen.
///
/// Key presses go through [`Console::handle_key`]; the host then keeps
/// calling [`Console::tick`] until it reports `Idle`.
pub struct Console {
    session: SessionState,
    renderer: Renderer,
    history: HistoryCursor,
    animation: Option<Animation>,
    pending_navigation: Option<String>,
    welcome: Vec<String>,
    frame_interval: Duration,
}

impl Console {
    pub fn new(config: &ConsoleConfig, content: &Content) -> Result<Self> {
        config.validate()?;
        let vfs = VirtualFileSystem::from_seed(content.filesystem())?;
        let start = normalize("/", &config.start_directory);
        if !vfs.is_dir(&start) {
            return Err(ConsoleError::Config(format!("startDirectory '{}' is not a directory", start)));
        }
        let commands = CommandRegistry::default_commands(content, config);
        info!(commands = commands.get_command_names().len(), cwd = %start, "console ready");

        Ok(Self {
            session: SessionState::new(vfs, commands).with_cwd(start),
            renderer: Renderer::new(config),
            history: HistoryCursor::new(),
            animation: None,
            pending_navigation: None,
            welcome: content.welcome_lines().map(str::to_string).collect(),
            frame_interval: config.frame_interval(),
        })
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn history(&self) -> &HistoryCursor {
        &self.history
    }

    /// true while output is still being typed, a flipbook is playing or an
    /// exit is pending
    pub fn is_busy(&self) -> bool {
        self.renderer.is_busy() || self.animation.is_some() || self.pending_navigation.is_some()
    }

    /// Replaces the log with the welcome banner and starts typing it.
    pub fn boot(&mut self) {
        let banner = self.welcome.iter().map(OutputRecord::text).collect();
        self.session = self.session.with_outputs(banner);
        self.renderer.render(self.session.outputs(), false);
    }

    /// Returns true when the host needs to start ticking.
    pub fn handle_key(&mut self, key: Key, surface: &mut dyn Surface) -> bool {
        match key {
            Key::Enter => {
                if self.is_busy() {
                    debug!("input refused while busy");
                    return false;
                }
                let line = surface.input_value();
                surface.set_input_value("");
                self.submit(&line);
                true
            }
            Key::ArrowUp => {
                surface.set_input_value(&self.history.up());
                false
            }
            Key::ArrowDown => {
                surface.set_input_value(&self.history.down());
                false
            }
            Key::Tab => {
                let completed = complete(&self.session, &surface.input_value());
                surface.set_input_value(&completed);
                false
            }
            Key::Escape => {
                surface.set_input_value("");
                false
            }
            Key::Other => {
                surface.focus_input();
                false
            }
        }
    }

    /// Runs one command line and queues its output.
    pub fn submit(&mut self, line: &str) {
        self.history.record(line);
        let exec = dispatch::execute(&self.session, line);
        self.session = exec.session;

        match exec.effect {
            None => self.renderer.render(self.session.outputs(), false),
            Some(Effect::Animate(sequence)) => {
                self.renderer.render_holding_input(self.session.outputs());
                self.animation = Some(Animation::start(sequence, self.session.clone(), self.frame_interval));
            }
            Some(Effect::Navigate(location)) => {
                self.renderer.render_holding_input(self.session.outputs());
                self.pending_navigation = Some(location);
            }
        }
    }

    pub fn tick(&mut self, surface: &mut dyn Surface) -> Tick {
        if let Some(delay) = self.renderer.tick(surface) {
            return Tick::Wait(delay);
        }

        if let Some(animation) = self.animation.as_mut() {
            match animation.advance(&mut self.renderer) {
                AnimationStep::Frame(interval) => {
                    // frames are appended without typing
                    self.renderer.flush(surface);
                    return Tick::Wait(interval);
                }
                AnimationStep::Finished(session) => {
                    self.session = session;
                    self.animation = None;
                    return self.tick(surface);
                }
            }
        }

        if let Some(location) = self.pending_navigation.take() {
            info!(%location, "navigating away");
            return Tick::Navigate(location);
        }
        Tick::Idle
    }

    /// Ticks until idle without sleeping. Returns the final tick.
    pub fn run_until_idle(&mut self, surface: &mut dyn Surface) -> Tick {
        loop {
            match self.tick(surface) {
                Tick::Wait(_) => continue,
                done => return done,
            }
        }
    }
}
