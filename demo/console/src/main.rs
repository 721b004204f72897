// terrapin/demo/console/src/main.rs
//
// Copyright © 2020 The Terrapin Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Interactive console front-end for the turtle engine: stdin is the input
//! surface, a retaining log-backed canvas is the display surface, and the
//! engine ticks at a fixed rate until input runs dry.

mod svg;

use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::{App, Arg};
use tracing::{debug, error, info};

use terrapin_command::CommandError;
use terrapin_engine::{DisplaySurface, Engine, InputSurface, FRAME_DURATION};
use terrapin_program::script::ScriptReader;
use terrapin_turtle::scene::DisplayElement;

const TITLE: &str = "Terrapin";
const CURRENT_VERSION: &str = "0.1.0";

// Lines typed into the terminal, handed over one per tick. The reader
// thread drops its sender on EOF; the drained flag tells the main loop the
// buffer is empty for good.
struct StdinSurface {
    receiver: Receiver<String>,
    drained: Arc<AtomicBool>,
}

impl StdinSurface {
    fn spawn() -> (StdinSurface, Arc<AtomicBool>) {
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(_) => break,
                };
                if sender.send(line).is_err() {
                    break;
                }
            }
        });
        let drained = Arc::new(AtomicBool::new(false));
        let surface = StdinSurface {
            receiver,
            drained: Arc::clone(&drained),
        };
        (surface, drained)
    }
}

impl InputSurface for StdinSurface {
    fn pending_line(&mut self) -> Option<String> {
        match self.receiver.try_recv() {
            Ok(line) => Some(line),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.drained.store(true, Ordering::SeqCst);
                None
            }
        }
    }
}

/// The console "canvas": retains what is currently shown so the final scene
/// can be exported, and narrates changes through the log.
#[derive(Default)]
struct ConsoleDisplay {
    current: Vec<DisplayElement>,
}

impl DisplaySurface for ConsoleDisplay {
    fn add_primitive(&mut self, element: &DisplayElement) {
        debug!("add {:?}", element);
        self.current.push(element.clone());
    }

    fn remove_primitive(&mut self, element: &DisplayElement) {
        if let Some(index) = self.current.iter().position(|shown| shown == element) {
            self.current.remove(index);
        }
    }

    fn show_error(&mut self, error: &CommandError) {
        error!("{}", error);
    }
}

fn main() {
    let matches = App::new(TITLE)
        .version(CURRENT_VERSION)
        .about("Interactive turtle graphics: type `logo` or `lsv` to begin, `exit` to quit")
        .arg(
            Arg::with_name("data")
                .long("data")
                .takes_value(true)
                .default_value("data")
                .help("Directory script files are loaded from"),
        )
        .arg(
            Arg::with_name("fps")
                .long("fps")
                .takes_value(true)
                .help("Ticks per second (default 60)"),
        )
        .arg(
            Arg::with_name("svg-out")
                .long("svg-out")
                .takes_value(true)
                .help("Write the final canvas to this SVG file on exit"),
        )
        .get_matches();

    tracing_subscriber::fmt().with_env_filter("info").init();

    let period = matches
        .value_of("fps")
        .and_then(|fps| fps.parse::<u64>().ok())
        .filter(|fps| *fps > 0)
        .map(|fps| Duration::from_micros(1_000_000 / fps))
        .unwrap_or(FRAME_DURATION);

    let scripts = ScriptReader::with_root(matches.value_of("data").unwrap_or("data"));
    let (input, drained) = StdinSurface::spawn();
    let mut engine = Engine::new(ConsoleDisplay::default(), input, scripts);

    info!("{} {}", TITLE, CURRENT_VERSION);

    while !drained.load(Ordering::SeqCst) {
        engine.tick();
        thread::sleep(period);
    }
    // Input is gone; let any queued script work finish rendering.
    while engine.has_pending_work() {
        engine.tick();
        thread::sleep(period);
    }

    if let Some(path) = matches.value_of("svg-out") {
        match svg::write_scene(path, &engine.display().current) {
            Ok(()) => info!("wrote {}", path),
            Err(err) => error!("failed to write {}: {}", path, err),
        }
    }
}
