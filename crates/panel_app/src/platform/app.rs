use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Context};
use panel_core::{update, Msg, PanelState, PhaseKind, ResumeFile};
use panel_logging::{panel_debug, panel_info};

use super::effects::EffectRunner;
use super::ui::input::{self, InputCommand};
use super::ui::render::{blocker_reason, render};
use crate::cli::ScoreArgs;
use crate::config::AppConfig;

/// Everything the event loop reacts to, from the keyboard or from the engine.
#[derive(Debug)]
pub enum LoopEvent {
    Input(InputCommand),
    InputClosed,
    Msg(Msg),
}

/// Single owner of the panel state; every mutation goes through [`update`].
struct Panel {
    state: PanelState,
    effects: EffectRunner,
}

impl Panel {
    fn new(effects: EffectRunner) -> Self {
        Self {
            state: PanelState::new(),
            effects,
        }
    }

    /// Applies `msg` and runs its effects. Returns how many effects were issued.
    fn dispatch(&mut self, msg: Msg) -> usize {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        let issued = effects.len();
        self.effects.run(effects);
        issued
    }

    fn print(&self) {
        print_lines(&render(&self.state.view()));
    }

    fn print_if_dirty(&mut self) {
        if self.state.consume_dirty() {
            self.print();
        }
    }
}

pub fn run_interactive(config: &AppConfig) -> anyhow::Result<()> {
    let (loop_tx, loop_rx) = mpsc::channel::<LoopEvent>();
    let effects = EffectRunner::new(config.client_settings(), loop_tx.clone())
        .context("failed to set up the HTTP client")?;
    let mut panel = Panel::new(effects);
    spawn_stdin_reader(loop_tx);

    panel_info!("Interactive panel started against {}", config.base_url);
    print_lines(input::HELP);
    panel.print();
    panel.state.consume_dirty();

    let mut input_closed = false;
    while let Ok(event) = loop_rx.recv() {
        match event {
            LoopEvent::Msg(msg) => {
                panel.dispatch(msg);
            }
            LoopEvent::InputClosed => input_closed = true,
            LoopEvent::Input(InputCommand::Quit) => break,
            LoopEvent::Input(command) => handle_command(&mut panel, command),
        }
        panel.print_if_dirty();

        // With stdin gone, stay only as long as a response is still owed.
        if input_closed && !panel.state.phase().in_flight() {
            break;
        }
    }
    Ok(())
}

fn handle_command(panel: &mut Panel, command: InputCommand) {
    let msg = match command {
        InputCommand::Upload(path) => Msg::FileSelected(path.map(ResumeFile::new)),
        InputCommand::SetJobDescription(text) => Msg::JobDescriptionChanged(text),
        InputCommand::AppendJobDescription(line) => Msg::JobDescriptionChanged(
            input::append_line(panel.state.job_description(), &line),
        ),
        InputCommand::LoadJobDescription(path) => match fs::read_to_string(&path) {
            Ok(text) => Msg::JobDescriptionChanged(text.trim_end().to_string()),
            Err(err) => {
                println!("Could not read {}: {}", path.display(), err);
                return;
            }
        },
        InputCommand::Analyze => {
            if let Some(blocker) = panel.state.analyze_blocker() {
                println!("Cannot check yet: {}", blocker_reason(blocker));
                return;
            }
            Msg::AnalyzeClicked
        }
        InputCommand::Reset => Msg::ResetClicked,
        InputCommand::Show => {
            panel.print();
            return;
        }
        InputCommand::Help => {
            print_lines(input::HELP);
            return;
        }
        InputCommand::Unknown(line) => {
            println!("Unknown command: {line}");
            print_lines(input::HELP);
            return;
        }
        InputCommand::Quit => return,
    };
    panel.dispatch(msg);
}

fn spawn_stdin_reader(loop_tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if let Some(command) = input::parse_line(&line) {
                if loop_tx.send(LoopEvent::Input(command)).is_err() {
                    return;
                }
            }
        }
        let _ = loop_tx.send(LoopEvent::InputClosed);
    });
}

/// Upload, wait, analyze, wait, print. Drives the same state machine the
/// interactive panel uses.
pub fn run_score(config: &AppConfig, args: &ScoreArgs) -> anyhow::Result<()> {
    let job_description = read_job_description(&args.job)?;
    let (loop_tx, loop_rx) = mpsc::channel::<LoopEvent>();
    let effects = EffectRunner::new(config.client_settings(), loop_tx)
        .context("failed to set up the HTTP client")?;
    let mut panel = Panel::new(effects);
    // Connect and read timeouts are enforced per request by the engine; this
    // bound only guards against a response that never gets delivered.
    let deadline = config.request_timeout * 2 + Duration::from_secs(5);

    panel.dispatch(Msg::JobDescriptionChanged(job_description));
    if panel.dispatch(Msg::FileSelected(Some(ResumeFile::new(&args.resume)))) == 0 {
        panel.print();
        bail!("{} is not a PDF résumé", args.resume.display());
    }
    wait_until_settled(&mut panel, &loop_rx, deadline)?;
    if panel.state.phase().kind() != PhaseKind::Uploaded {
        panel.print();
        bail!("résumé upload failed");
    }

    if let Some(blocker) = panel.state.analyze_blocker() {
        panel.print();
        bail!("cannot check the match: {}", blocker_reason(blocker));
    }
    panel.dispatch(Msg::AnalyzeClicked);
    wait_until_settled(&mut panel, &loop_rx, deadline)?;

    panel.print();
    match panel.state.analysis_error() {
        Some(error) => Err(anyhow!("scoring failed: {error}")),
        None => Ok(()),
    }
}

fn wait_until_settled(
    panel: &mut Panel,
    loop_rx: &mpsc::Receiver<LoopEvent>,
    timeout: Duration,
) -> anyhow::Result<()> {
    let started = Instant::now();
    while panel.state.phase().in_flight() {
        let remaining = timeout
            .checked_sub(started.elapsed())
            .ok_or_else(|| anyhow!("no response from the backend within {timeout:?}"))?;
        match loop_rx.recv_timeout(remaining) {
            Ok(LoopEvent::Msg(msg)) => {
                panel.dispatch(msg);
            }
            Ok(other) => panel_debug!("Ignoring {:?} in one-shot mode", other),
            Err(mpsc::RecvTimeoutError::Timeout) => {
                bail!("no response from the backend within {timeout:?}")
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => bail!("engine stopped unexpectedly"),
        }
    }
    Ok(())
}

fn read_job_description(source: &Path) -> anyhow::Result<String> {
    let text = if source == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read the job description from stdin")?;
        text
    } else {
        fs::read_to_string(source)
            .with_context(|| format!("failed to read job description {}", source.display()))?
    };
    Ok(text.trim_end().to_string())
}

fn print_lines<S: AsRef<str>>(lines: &[S]) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in lines {
        let _ = writeln!(out, "{}", line.as_ref());
    }
    let _ = out.flush();
}
