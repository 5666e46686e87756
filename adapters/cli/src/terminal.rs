//! Crossterm backend drawing frames in the terminal's alternate screen.

use crate::input::{KeyMapper, KEY_HELP};
use anyhow::{Context, Result};
use bayou_rendering::{Color, Frame, FrameInput, Glyph, Presentation, RenderingBackend, Scene};
use crossterm::{
    cursor,
    event::{self, Event, KeyEventKind},
    execute, queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::{
    io::{self, Stdout, Write},
    thread,
};

/// Rendering backend for interactive terminals.
#[derive(Debug, Default)]
pub(crate) struct TerminalBackend;

impl TerminalBackend {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl RenderingBackend for TerminalBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(FrameInput, &mut Scene),
    {
        let Presentation {
            title,
            banner,
            projectile_step,
            mut scene,
        } = presentation;
        let mut screen = Screen::enter()?;
        let mut keys = KeyMapper::default();
        let mut header = vec![banner, title.clone()];

        screen.draw(&header, &scene.frame, &footer(&scene, &keys))?;
        while !scene.finished {
            let Event::Key(key) = event::read().context("failed to read terminal input")? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            let Some(input) = keys.map(key, scene.prompt) else {
                screen.draw(&header, &scene.frame, &footer(&scene, &keys))?;
                continue;
            };
            update_scene(input, &mut scene);
            header = vec![title_line(&title, &scene)];

            if let Some(step) = projectile_step {
                for frame in scene.animation_frames() {
                    screen.draw(&header, &frame, &[] as &[String])?;
                    thread::sleep(step);
                }
            }
            screen.draw(&header, &scene.frame, &footer(&scene, &keys))?;
        }

        let mut closing = footer(&scene, &keys);
        closing.push("The session is over. Press any key to continue.".to_owned());
        screen.draw(&header, &scene.frame, &closing)?;
        wait_for_key()
    }
}

fn title_line(title: &str, scene: &Scene) -> String {
    if scene.frame.hud().boss.is_some() {
        format!("{title} - boss arena")
    } else {
        title.to_owned()
    }
}

fn footer(scene: &Scene, keys: &KeyMapper) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(notice) = &scene.notice {
        lines.push(notice.clone());
    }
    if let Some(prompt) = scene.prompt {
        lines.push(prompt.text().to_owned());
    } else if let Some(hint) = keys.pending_hint() {
        lines.push(hint.to_owned());
    } else if !scene.finished {
        lines.push(KEY_HELP.to_owned());
    }
    lines
}

fn wait_for_key() -> Result<()> {
    loop {
        if let Event::Key(key) = event::read().context("failed to read terminal input")? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}

/// Raw-mode alternate screen restored when dropped.
struct Screen {
    out: Stdout,
}

impl Screen {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        let mut out = io::stdout();
        if let Err(error) = execute!(out, EnterAlternateScreen, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(error).context("failed to enter the alternate screen");
        }
        Ok(Self { out })
    }

    fn draw<H, L>(&mut self, header: &[H], frame: &Frame, footer: &[L]) -> Result<()>
    where
        H: AsRef<str>,
        L: AsRef<str>,
    {
        queue!(self.out, terminal::Clear(ClearType::All))?;
        let mut row: u16 = 0;

        for line in header {
            queue!(self.out, cursor::MoveTo(0, row), Print(line.as_ref()))?;
            row = row.saturating_add(1);
        }
        row = row.saturating_add(1);

        for glyphs in frame.grid_rows() {
            queue!(self.out, cursor::MoveTo(0, row))?;
            for glyph in glyphs {
                self.put(*glyph)?;
            }
            row = row.saturating_add(1);
        }
        row = row.saturating_add(1);

        for line in frame.hud().lines() {
            queue!(self.out, cursor::MoveTo(0, row), Print(line))?;
            row = row.saturating_add(1);
        }
        for line in footer {
            queue!(self.out, cursor::MoveTo(0, row), Print(line.as_ref()))?;
            row = row.saturating_add(1);
        }

        self.out.flush().context("failed to flush the terminal")
    }

    fn put(&mut self, glyph: Glyph) -> io::Result<()> {
        if glyph.bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if let Some(color) = glyph.color {
            queue!(self.out, SetForegroundColor(terminal_color(color)))?;
        }
        queue!(
            self.out,
            Print(glyph.symbol),
            Print(' '),
            SetAttribute(Attribute::Reset),
            ResetColor
        )
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(self.out, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn terminal_color(color: Color) -> crossterm::style::Color {
    crossterm::style::Color::Rgb {
        r: color.red,
        g: color.green,
        b: color.blue,
    }
}
