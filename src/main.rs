// native front end: same console, drawn on an ansi terminal

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use anyhow::Context;
    use clap::Parser;
    use std::io::{self, BufRead, Write};
    use std::path::PathBuf;
    use tracing::{info, warn};
    use tracing_subscriber::EnvFilter;
    use whconsole::render::Segment;
    use whconsole::{Console, ConsoleConfig, Content, Key, LineClass, Surface, Tick};

    #[derive(Parser, Debug)]
    #[command(name = "whconsole", about = "Interactive console in the terminal")]
    struct Args {
        /// JSON file with console settings
        #[arg(long)]
        config: Option<PathBuf>,

        /// print output without the typewriter delays
        #[arg(long)]
        instant: bool,
    }

    const RESET: &str = "\x1b[0m";

    fn color(class: LineClass) -> &'static str {
        match class {
            LineClass::Text => "",
            LineClass::Error => "\x1b[31m",
            LineClass::Header => "\x1b[1;32m",
        }
    }

    fn hyperlink(url: &str) -> String {
        format!("\x1b]8;;{url}\x1b\\{url}\x1b]8;;\x1b\\")
    }

    /// Stdout as a console surface. The cursor sits at the end of the last
    /// line while `open`; the next line starts with a newline.
    struct TerminalSurface {
        out: io::Stdout,
        input: String,
        lines: usize,
        open: bool,
        class: LineClass,
    }

    impl TerminalSurface {
        fn new() -> Self {
            Self { out: io::stdout(), input: String::new(), lines: 0, open: false, class: LineClass::Text }
        }

        fn emit(&mut self, s: &str) {
            if let Err(e) = self.out.write_all(s.as_bytes()) {
                warn!(error = %e, "stdout write failed");
            }
        }

        fn flush(&mut self) {
            if let Err(e) = self.out.flush() {
                warn!(error = %e, "stdout flush failed");
            }
        }

        fn close_line(&mut self) {
            if self.open {
                self.emit(RESET);
                self.emit("\n");
                self.open = false;
            }
        }
    }

    impl Surface for TerminalSurface {
        // the terminal has no separate input widget
        fn set_input_enabled(&mut self, _enabled: bool) {}

        fn focus_input(&mut self) {}

        fn input_value(&self) -> String {
            self.input.clone()
        }

        fn set_input_value(&mut self, value: &str) {
            self.input = value.to_string();
        }

        fn clear(&mut self) {
            self.emit("\x1b[2J\x1b[H");
            self.lines = 0;
            self.open = false;
        }

        fn append_line(&mut self, class: LineClass, text: &str) {
            if class == LineClass::Header && !self.open {
                // overwrite the prompt line the user just typed on
                self.emit("\x1b[1A\r\x1b[2K");
            } else {
                self.close_line();
            }
            self.class = class;
            self.emit(color(class));
            self.emit(text);
            self.lines += 1;
            self.open = true;
        }

        fn push_char(&mut self, ch: char) {
            let mut buf = [0u8; 4];
            self.emit(ch.encode_utf8(&mut buf));
        }

        fn seal_line(&mut self, segments: &[Segment]) {
            if !segments.iter().any(|s| matches!(s, Segment::Link(_))) {
                return;
            }
            let mut line = format!("\r\x1b[2K{}", color(self.class));
            for segment in segments {
                match segment {
                    Segment::Text(text) => line.push_str(text),
                    Segment::Link(url) => line.push_str(&hyperlink(url)),
                }
            }
            self.emit(&line);
        }

        fn remove_last_line(&mut self) {
            if self.lines == 0 {
                return;
            }
            self.emit(RESET);
            self.emit("\r\x1b[2K");
            self.lines -= 1;
            if self.lines > 0 {
                self.emit("\x1b[1A");
            } else {
                self.open = false;
            }
        }

        fn scroll_to_end(&mut self) {
            self.flush();
        }
    }

    fn load_config(args: &Args) -> anyhow::Result<ConsoleConfig> {
        let mut config = match &args.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                ConsoleConfig::from_json(&json)?
            }
            None => ConsoleConfig::default(),
        };
        if args.instant {
            config.char_delay_ms = 0;
            config.line_delay_ms = 0;
        }
        Ok(config)
    }

    // returns the navigation target once exit runs
    fn drive(console: &mut Console, surface: &mut TerminalSurface) -> Option<String> {
        loop {
            match console.tick(surface) {
                Tick::Wait(delay) => {
                    surface.flush();
                    if !delay.is_zero() {
                        std::thread::sleep(delay);
                    }
                }
                Tick::Idle => return None,
                Tick::Navigate(location) => return Some(location),
            }
        }
    }

    pub fn run() -> anyhow::Result<()> {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
            .with_writer(io::stderr)
            .init();

        let args = Args::parse();
        let config = load_config(&args)?;
        let content = Content::bundled()?;
        let mut console = Console::new(&config, &content)?;
        let mut surface = TerminalSurface::new();

        console.boot();
        drive(&mut console, &mut surface);

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            surface.close_line();
            surface.emit(&config.header_prefix);
            surface.flush();

            let Some(line) = lines.next() else {
                break;
            };
            let line = line.context("reading stdin")?;
            surface.set_input_value(&line);
            console.handle_key(Key::Enter, &mut surface);

            if let Some(location) = drive(&mut console, &mut surface) {
                info!(%location, "exit requested");
                break;
            }
        }
        surface.close_line();
        surface.flush();
        Ok(())
    }
}
