//! The demo: panels, stage order, and the key loop around them.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, terminal};
use futures::{Stream, StreamExt};
use highlight::TargetId;
use typewriter::{ScheduleState, SequenceOutcome, Sequencer, Stage};

use crate::assets::Script;
use crate::config::Config;
use crate::error::{LivetypeError, Result};
use crate::prefix::StaticPrefix;
use crate::screen::{Panel, Screen};
use crate::terminal::TerminalSurface;

pub const STYLE_PANEL: &str = "style";
pub const WORK_PANEL: &str = "work";
pub const KEY_PANEL: &str = "key";

/// Pause between showing the key panel and typing into it.
pub const KEY_PANEL_DELAY: Duration = Duration::from_secs(1);

/// The three demo panels. The key panel stays hidden until its stage.
pub fn demo_screen<W: Write>(out: W, cols: u16, rows: u16) -> Screen<W> {
    Screen::new(out, cols, rows)
        .with_panel(Panel::styled(STYLE_PANEL, "style.css"))
        .with_panel(Panel::plain(WORK_PANEL, "notes"))
        .with_panel(Panel::plain(KEY_PANEL, "public key").hidden())
}

/// Stylesheet part, notes, part, key panel, part, key, part.
pub fn demo_sequence<W: Write + 'static>(
    script: Script,
    config: &Config,
    control: ScheduleState,
) -> Sequencer<TerminalSurface<W>> {
    let Script { styles, work, key } = script;
    let [intro, highlighting, key_panel, outro] = styles;

    Sequencer::new(control)
        .with_pacing(config.pacing())
        .stage(Stage::styled(STYLE_PANEL, intro))
        .stage(Stage::plain(WORK_PANEL, work))
        .stage(Stage::styled(STYLE_PANEL, highlighting))
        .stage(Stage::effect(
            "show key panel",
            |surface: &mut TerminalSurface<W>| surface.show_panel(&TargetId::from(KEY_PANEL)),
        ))
        .stage(Stage::delay(KEY_PANEL_DELAY))
        .stage(Stage::styled(STYLE_PANEL, key_panel))
        .stage(Stage::plain(KEY_PANEL, key).with_pacing(config.key_pacing()))
        .stage(Stage::styled(STYLE_PANEL, outro))
}

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    Skip,
    Quit,
    Ignore,
}

/// Map a key to a command. `finished` is whether the sequence is over.
pub fn command_for(key: KeyEvent, finished: bool) -> Command {
    if key.kind != KeyEventKind::Press {
        return Command::Ignore;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,
        KeyCode::Char('q') if finished => Command::Quit,
        KeyCode::Char('p') if !finished => Command::TogglePause,
        KeyCode::Char('s') | KeyCode::Esc if !finished => Command::Skip,
        _ => Command::Ignore,
    }
}

/// Run the demo on the real terminal until the user quits.
pub fn run(config: Config) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| LivetypeError::RuntimeInit(e.to_string()))?;
    runtime.block_on(run_async(config))
}

/// Like [`run`], from inside an existing runtime.
pub async fn run_async(config: Config) -> Result<()> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let result = event_loop(config).await;

    // Cleanup: Restore terminal state on exit
    execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    result
}

async fn event_loop(config: Config) -> Result<()> {
    let (cols, rows) = terminal::size()?;
    let surface = TerminalSurface::new(demo_screen(io::stdout(), cols, rows));
    surface.redraw()?;

    let control = ScheduleState::new();
    let script = Script::bundled(&StaticPrefix::new(config.prefix.clone()));
    let mut sequencer = demo_sequence(script, &config, control.clone());

    let outcome = drive(&mut sequencer, surface, control, EventStream::new()).await?;
    log::info!("livetype: exiting after {outcome:?}");
    Ok(())
}

/// Run `sequencer` against `surface` while reacting to `events`.
///
/// Returns once the user quits, or once the sequence is over and the event
/// stream has ended. The outcome is `None` when the user quit mid-sequence.
pub async fn drive<W, E>(
    sequencer: &mut Sequencer<TerminalSurface<W>>,
    surface: TerminalSurface<W>,
    control: ScheduleState,
    mut events: E,
) -> Result<Option<SequenceOutcome>>
where
    W: Write,
    E: Stream<Item = io::Result<Event>> + Unpin,
{
    let mut typing = surface.clone();
    let sequence = sequencer.run(&mut typing);
    tokio::pin!(sequence);

    let mut outcome = None;
    let mut events_done = false;

    loop {
        tokio::select! {
            result = &mut sequence, if outcome.is_none() => {
                let finished = result?;
                log::info!("livetype: sequence {finished:?}");
                surface.finish(finished == SequenceOutcome::Revealed)?;
                outcome = Some(finished);
                if events_done {
                    break;
                }
            }

            maybe_event = events.next(), if !events_done => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => match command_for(key, outcome.is_some()) {
                        Command::TogglePause => {
                            let paused = control.toggle_pause();
                            surface.set_paused(paused)?;
                        }
                        Command::Skip => control.cancel(),
                        Command::Quit => break,
                        Command::Ignore => {}
                    },
                    Some(Ok(Event::Resize(cols, rows))) => surface.resize(cols, rows)?,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(LivetypeError::IO(e)),
                    None => {
                        log::debug!("livetype: event stream ended");
                        events_done = true;
                        if outcome.is_some() {
                            break;
                        }
                    }
                }
            }
        }
    }

    Ok(outcome)
}
