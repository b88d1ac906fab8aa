//! The full demo driven by scripted key events on virtual time.

use std::io;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Color;
use futures::channel::mpsc;
use highlight::TargetId;
use highlight::markup::strip_markup;
use livetype::app::{KEY_PANEL, STYLE_PANEL, WORK_PANEL, demo_screen, demo_sequence, drive};
use livetype::assets::{KEY, Script, WORK};
use livetype::prefix::StaticPrefix;
use livetype::{Config, TerminalSurface};
use typewriter::{ScheduleState, SequenceOutcome};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn key(code: KeyCode) -> io::Result<Event> {
    Ok(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
}

struct Demo {
    surface: TerminalSurface<Vec<u8>>,
    control: ScheduleState,
    script: Script,
    config: Config,
}

fn demo(interval: Duration) -> Demo {
    Demo {
        surface: TerminalSurface::new(demo_screen(Vec::new(), 100, 30)),
        control: ScheduleState::new(),
        script: Script::bundled(&StaticPrefix::new("moz")),
        config: Config::default().with_interval(interval),
    }
}

fn panel(surface: &TerminalSurface<Vec<u8>>, id: &str) -> String {
    surface
        .inspect(|screen| screen.markup(&TargetId::from(id)))
        .unwrap()
        .unwrap()
}

fn assert_everything_shown(demo: &Demo) {
    let style = strip_markup(&panel(&demo.surface, STYLE_PANEL)).unwrap();
    assert_eq!(style, demo.script.stylesheet());
    assert_eq!(panel(&demo.surface, WORK_PANEL), WORK);
    assert_eq!(panel(&demo.surface, KEY_PANEL), KEY);

    let key_visible = demo
        .surface
        .inspect(|screen| screen.panel(&TargetId::from(KEY_PANEL)).unwrap().visible)
        .unwrap();
    assert!(key_visible);
}

// =============================================================================
// Uninterrupted
// =============================================================================

#[tokio::test(start_paused = true)]
async fn runs_to_completion_without_input() {
    let demo = demo(Duration::ZERO);
    let mut sequencer = demo_sequence(demo.script.clone(), &demo.config, demo.control.clone());
    let (tx, rx) = mpsc::unbounded::<io::Result<Event>>();
    drop(tx);

    let outcome = drive(&mut sequencer, demo.surface.clone(), demo.control.clone(), rx)
        .await
        .unwrap();

    assert_eq!(outcome, Some(SequenceOutcome::Completed));
    assert_everything_shown(&demo);

    let (status, sheet, key_border) = demo
        .surface
        .inspect(|screen| {
            (
                screen.status().clone(),
                screen.stylesheet().to_string(),
                screen.theme().panel(KEY_PANEL).border,
            )
        })
        .unwrap();
    assert!(status.finished && !status.revealed);
    assert!(sheet.contains("-moz-transform"));
    assert!(!sheet.contains("/*"));
    assert!(sheet.trim_end().ends_with('}'));
    assert_eq!(
        key_border,
        Some(Color::Rgb {
            r: 0x8c,
            g: 0x94,
            b: 0x40
        })
    );
}

// =============================================================================
// Keys
// =============================================================================

#[tokio::test(start_paused = true)]
async fn skip_reveals_everything_then_quit() {
    let demo = demo(ms(1));
    let mut sequencer = demo_sequence(demo.script.clone(), &demo.config, demo.control.clone());
    let (tx, rx) = mpsc::unbounded();

    let keys = async move {
        tokio::time::sleep(ms(200)).await;
        tx.unbounded_send(key(KeyCode::Char('s'))).unwrap();
        tokio::time::sleep(ms(100)).await;
        tx.unbounded_send(key(KeyCode::Char('q'))).unwrap();
    };
    let (outcome, ()) = tokio::join!(
        drive(&mut sequencer, demo.surface.clone(), demo.control.clone(), rx),
        keys
    );

    assert_eq!(outcome.unwrap(), Some(SequenceOutcome::Revealed));
    assert_everything_shown(&demo);
    let status = demo.surface.inspect(|s| s.status().clone()).unwrap();
    assert!(status.finished && status.revealed);
}

#[tokio::test(start_paused = true)]
async fn pause_key_freezes_typing() {
    let demo = demo(ms(1));
    let mut sequencer = demo_sequence(demo.script.clone(), &demo.config, demo.control.clone());
    let (tx, rx) = mpsc::unbounded();
    let surface = demo.surface.clone();

    let keys = async move {
        tokio::time::sleep(ms(50)).await;
        tx.unbounded_send(key(KeyCode::Char('p'))).unwrap();
        tokio::time::sleep(ms(100)).await;

        let frozen = panel(&surface, STYLE_PANEL);
        assert!(surface.inspect(|s| s.status().paused).unwrap());
        tokio::time::sleep(ms(2000)).await;
        assert_eq!(panel(&surface, STYLE_PANEL), frozen);

        tx.unbounded_send(key(KeyCode::Char('p'))).unwrap();
        tokio::time::sleep(ms(100)).await;
        assert_ne!(panel(&surface, STYLE_PANEL), frozen);

        tx.unbounded_send(key(KeyCode::Esc)).unwrap();
        tokio::time::sleep(ms(100)).await;
        tx.unbounded_send(key(KeyCode::Char('q'))).unwrap();
    };
    let (outcome, ()) = tokio::join!(
        drive(&mut sequencer, demo.surface.clone(), demo.control.clone(), rx),
        keys
    );

    assert_eq!(outcome.unwrap(), Some(SequenceOutcome::Revealed));
    assert_everything_shown(&demo);
}

#[tokio::test(start_paused = true)]
async fn ctrl_c_quits_mid_sequence() {
    let demo = demo(ms(1));
    let mut sequencer = demo_sequence(demo.script.clone(), &demo.config, demo.control.clone());
    let (tx, rx) = mpsc::unbounded();

    let keys = async move {
        tokio::time::sleep(ms(30)).await;
        tx.unbounded_send(Ok(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        ))))
        .unwrap();
        // keep the stream open until drive has returned
        tokio::time::sleep(ms(10_000)).await;
    };
    let (outcome, ()) = tokio::join!(
        drive(&mut sequencer, demo.surface.clone(), demo.control.clone(), rx),
        keys
    );

    assert_eq!(outcome.unwrap(), None);
    assert_ne!(panel(&demo.surface, WORK_PANEL), WORK);
}

#[tokio::test(start_paused = true)]
async fn resize_redraws_at_new_size() {
    let demo = demo(ms(1));
    let mut sequencer = demo_sequence(demo.script.clone(), &demo.config, demo.control.clone());
    let (tx, rx) = mpsc::unbounded();

    let keys = async move {
        tokio::time::sleep(ms(20)).await;
        tx.unbounded_send(Ok(Event::Resize(50, 10))).unwrap();
        tx.unbounded_send(key(KeyCode::Char('s'))).unwrap();
        tokio::time::sleep(ms(50)).await;
        tx.unbounded_send(key(KeyCode::Char('q'))).unwrap();
    };
    let (outcome, ()) = tokio::join!(
        drive(&mut sequencer, demo.surface.clone(), demo.control.clone(), rx),
        keys
    );

    assert!(outcome.unwrap().is_some());
    assert_eq!(demo.surface.inspect(|s| s.size()).unwrap(), (50, 10));
}
