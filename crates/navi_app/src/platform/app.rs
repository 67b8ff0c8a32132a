use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use navi_core::{update, AppState, ListingKey, Msg};
use navi_engine::EngineHandle;
use navi_logging::{navi_info, navi_warn};

use super::effects::{record_from_file, EffectRunner};
use super::input::{self, Command};
use super::render::Renderer;
use super::{config, logging};
use crate::cli::CliArgs;

const POLL_INTERVAL: Duration = Duration::from_millis(25);

pub fn run_app(args: CliArgs) -> anyhow::Result<()> {
    logging::initialize(args.log.into(), Path::new(logging::LOG_FILE));

    let config_path = args.resolve_config_path();
    let mut config = config::load(&config_path);
    config.apply_overrides(&args);

    let engine = EngineHandle::new(config.engine_settings()).context("starting engine")?;
    let mut session = Session {
        state: Some(AppState::with_settings(config.settings(), Utc::now())),
        runner: EffectRunner::new(engine, config.delays()),
        renderer: Renderer::default(),
        out: io::stdout(),
    };
    navi_info!("navi started; documents go to {:?}", config.output_dir);

    writeln!(session.out, "Type /help for commands.")?;
    session.redraw()?;

    let lines = spawn_stdin_reader();
    let mut input_open = true;
    loop {
        if input_open {
            match lines.recv_timeout(POLL_INTERVAL) {
                Ok(line) => {
                    if session.handle_line(&line)? == Flow::Quit {
                        break;
                    }
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => input_open = false,
            }
        } else {
            // Piped input ended; let a running search or autofill finish.
            if session.state()?.pending_ticket().is_none() {
                break;
            }
            thread::sleep(POLL_INTERVAL);
        }
        for msg in session.runner.poll() {
            session.dispatch(msg)?;
        }
    }

    session.dispatch(Msg::NavigatedAway)?;
    navi_info!("navi stopped");
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct Session {
    // Always Some between dispatches; taken while `update` owns the state.
    state: Option<AppState>,
    runner: EffectRunner,
    renderer: Renderer,
    out: io::Stdout,
}

impl Session {
    fn state(&self) -> anyhow::Result<&AppState> {
        self.state.as_ref().context("session state missing")
    }

    fn dispatch(&mut self, msg: Msg) -> anyhow::Result<()> {
        let state = self.state.take().context("session state missing")?;
        navi_logging::set_turn(state.turn() + 1);
        let (mut state, effects) = update(state, msg);
        navi_logging::set_turn(state.turn());

        self.runner.enqueue(effects);
        let dirty = state.consume_dirty();
        self.state = Some(state);
        if dirty {
            self.redraw()?;
        }
        Ok(())
    }

    fn redraw(&mut self) -> anyhow::Result<()> {
        let view = self.state()?.view();
        for line in self.renderer.render(&view) {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> anyhow::Result<Flow> {
        let command = match input::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(err) => {
                writeln!(self.out, "  {err}")?;
                return Ok(Flow::Continue);
            }
        };

        let at = Utc::now();
        let msg = match command {
            Command::Say(text) => Msg::TextSubmitted { text, at },
            Command::Upload(file_name) => Msg::FileUploaded { file_name, at },
            Command::Record(path) => record_from_file(&path),
            Command::Service(card) => Msg::ServicePicked { card, at },
            Command::Save(position) => match self.listing_key(position)? {
                Some(key) => Msg::ListingSaved { key, at },
                None => return Ok(Flow::Continue),
            },
            Command::Apply(position) => match self.listing_key(position)? {
                Some(key) => Msg::AutofillRequested { key, at },
                None => return Ok(Flow::Continue),
            },
            Command::Download => Msg::DownloadRequested { at },
            Command::Accept => Msg::FollowUpAnswered { accepted: true, at },
            Command::Decline => Msg::FollowUpAnswered {
                accepted: false,
                at,
            },
            Command::Transcript(id) => Msg::TranscriptToggled(id),
            Command::Audio(option) => Msg::AudioOptionChanged(option),
            Command::Language(language) => {
                writeln!(self.out, "  Language set to {}.", language.label())?;
                Msg::LanguageChanged(language)
            }
            Command::Away => Msg::NavigatedAway,
            Command::SignOut => Msg::SignedOut { at },
            Command::DeleteAccount => Msg::AccountDeleted { at },
            Command::Help => {
                writeln!(self.out, "{}", input::HELP)?;
                return Ok(Flow::Continue);
            }
            Command::Quit => return Ok(Flow::Quit),
        };

        self.dispatch(msg)?;
        Ok(Flow::Continue)
    }

    /// Resolves a 1-based position in the listings on screen.
    fn listing_key(&mut self, position: usize) -> anyhow::Result<Option<ListingKey>> {
        let listing = self
            .state()?
            .view()
            .listings
            .get(position.saturating_sub(1))
            .copied();
        if listing.is_none() {
            writeln!(self.out, "  There is no listing {position} on screen.")?;
        }
        Ok(listing.map(|listing| listing.key()))
    }
}

/// Reads stdin on its own thread so engine results keep flowing while the
/// user is typing. The channel closes at end of input.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    navi_warn!("stdin read failed: {}", err);
                    break;
                }
            }
        }
    });
    rx
}
