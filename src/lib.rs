// interactive console for the browser
// fake filesystem, a fixed command table and typewriter output
pub mod animation;
pub mod autocomplete;
pub mod command;
pub mod commands;
pub mod config;
pub mod console;
pub mod content;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod history;
pub mod output;
pub mod render;
pub mod surface;
pub mod vfs;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use command::{Command, CommandOutcome, CommandRegistry, Effect, OptionDef, ParsedArgs, StatePatch};
pub use config::ConsoleConfig;
pub use console::{Console, Key, Tick};
pub use content::Content;
pub use context::SessionState;
pub use error::{ConsoleError, Result};
pub use output::{LineClass, OutputRecord};
pub use surface::{MemorySurface, Surface};
pub use vfs::VirtualFileSystem;

#[cfg(target_arch = "wasm32")]
pub use web::WebConsole;

#[cfg(target_arch = "wasm32")]
mod web {
    use crate::config::ConsoleConfig;
    use crate::console::{Console, Key, Tick};
    use crate::content::Content;
    use crate::dom::DomSurface;
    use crate::error::ConsoleError;
    use gloo_timers::future::TimeoutFuture;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::spawn_local;
    use web_sys::KeyboardEvent;

    fn to_js(err: ConsoleError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }

    // main console object - js keeps one per page
    // console = session + renderer, surface = the dom it draws on
    #[wasm_bindgen]
    pub struct WebConsole {
        console: Rc<RefCell<Console>>,
        surface: Rc<RefCell<DomSurface>>,
        pumping: Rc<Cell<bool>>,
    }

    #[wasm_bindgen]
    impl WebConsole {
        /// `config_json` is an optional partial `ConsoleConfig` object.
        #[wasm_bindgen(constructor)]
        pub fn new(input_id: &str, output_id: &str, config_json: Option<String>) -> Result<WebConsole, JsValue> {
            let config = match config_json {
                Some(json) => ConsoleConfig::from_json(&json).map_err(to_js)?,
                None => ConsoleConfig::default(),
            };
            let content = Content::bundled().map_err(to_js)?;
            let console = Console::new(&config, &content).map_err(to_js)?;
            let surface = DomSurface::from_ids(input_id, output_id)?;
            web_sys::console::log_1(&"[console] ready".into());

            Ok(WebConsole {
                console: Rc::new(RefCell::new(console)),
                surface: Rc::new(RefCell::new(surface)),
                pumping: Rc::new(Cell::new(false)),
            })
        }

        /// Hooks up the keyboard and types the welcome banner.
        #[wasm_bindgen]
        pub fn start(&self) -> Result<(), JsValue> {
            self.register_keys()?;
            self.console.borrow_mut().boot();
            pump(&self.console, &self.surface, &self.pumping);
            Ok(())
        }

        /// The output log as `[{type, content}]`.
        #[wasm_bindgen]
        pub fn outputs(&self) -> Result<JsValue, JsValue> {
            Ok(serde_wasm_bindgen::to_value(self.console.borrow().session().outputs())?)
        }

        #[wasm_bindgen]
        pub fn current_directory(&self) -> String {
            self.console.borrow().session().cwd().to_string()
        }

        #[wasm_bindgen]
        pub fn is_busy(&self) -> bool {
            self.console.borrow().is_busy()
        }

        fn register_keys(&self) -> Result<(), JsValue> {
            let console = Rc::clone(&self.console);
            let surface = Rc::clone(&self.surface);
            let pumping = Rc::clone(&self.pumping);

            let handler = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
                let from_input = surface.borrow().is_input(event.target().as_ref());
                let key = Key::from_dom(&event.key()).scoped(from_input);
                if key.is_handled() {
                    event.prevent_default();
                }
                let started = console.borrow_mut().handle_key(key, &mut *surface.borrow_mut());
                if started {
                    pump(&console, &surface, &pumping);
                }
            });
            self.surface
                .borrow()
                .document()
                .add_event_listener_with_callback("keydown", handler.as_ref().unchecked_ref())?;
            // listener lives as long as the page
            handler.forget();
            Ok(())
        }
    }

    // drives Console::tick from timers until idle; one pump at a time
    fn pump(console: &Rc<RefCell<Console>>, surface: &Rc<RefCell<DomSurface>>, pumping: &Rc<Cell<bool>>) {
        if pumping.replace(true) {
            return;
        }
        let console = Rc::clone(console);
        let surface = Rc::clone(surface);
        let pumping = Rc::clone(pumping);

        spawn_local(async move {
            loop {
                let tick = console.borrow_mut().tick(&mut *surface.borrow_mut());
                match tick {
                    Tick::Wait(delay) => {
                        let ms = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
                        TimeoutFuture::new(ms).await;
                    }
                    Tick::Idle => break,
                    Tick::Navigate(location) => {
                        navigate(&location);
                        break;
                    }
                }
            }
            pumping.set(false);
        });
    }

    fn navigate(location: &str) {
        let Some(window) = web_sys::window() else {
            web_sys::console::error_1(&"[console] no window to navigate".into());
            return;
        };
        if let Err(e) = window.location().set_href(location) {
            web_sys::console::error_2(&"[console] navigation failed".into(), &e);
        }
    }
}
