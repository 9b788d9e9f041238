use crossterm::{
    cursor::{Hide, MoveTo, Show},
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
    ExecutableCommand,
};
use pacman_core::{GameState, Position};
use std::io::{self, Stdout, Write};
use std::thread;
use std::time::Duration;

/// How frames are drawn while a game is played.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DisplayMode {
    /// Nothing is drawn.
    Quiet,
    /// Plain text frames appended to stdout.
    Text,
    /// Coloured frames redrawn in place.
    Terminal,
}

pub struct Display {
    mode: DisplayMode,
    frame_delay: Duration,
    stdout: Stdout,
}

impl Display {
    pub fn new(mode: DisplayMode, frame_delay: Duration) -> Self {
        Self {
            mode,
            frame_delay,
            stdout: io::stdout(),
        }
    }

    pub fn begin(&mut self) -> io::Result<()> {
        if self.mode == DisplayMode::Terminal {
            self.stdout.execute(Hide)?;
            self.stdout.execute(Clear(ClearType::All))?;
        }
        Ok(())
    }

    pub fn finish(&mut self) -> io::Result<()> {
        if self.mode == DisplayMode::Terminal {
            self.stdout.execute(ResetColor)?;
            self.stdout.execute(Show)?;
        }
        Ok(())
    }

    pub fn draw(&mut self, state: &GameState) -> io::Result<()> {
        match self.mode {
            DisplayMode::Quiet => return Ok(()),
            DisplayMode::Text => writeln!(self.stdout, "{}\n", state)?,
            DisplayMode::Terminal => self.draw_coloured(state)?,
        }

        self.stdout.flush()?;
        if !self.frame_delay.is_zero() {
            thread::sleep(self.frame_delay);
        }
        Ok(())
    }

    fn draw_coloured(&mut self, state: &GameState) -> io::Result<()> {
        self.stdout.execute(MoveTo(0, 0))?;

        let walls = state.walls();
        for y in 0..walls.height() as i32 {
            for x in 0..walls.width() as i32 {
                let glyph = state.cell_glyph(Position::new(x, y));
                self.stdout.execute(SetForegroundColor(glyph_colour(glyph)))?;
                self.stdout.execute(Print(glyph))?;
            }
            self.stdout.execute(ResetColor)?;
            self.stdout.execute(Clear(ClearType::UntilNewLine))?;
            self.stdout.execute(Print("\n"))?;
        }

        self.stdout.execute(Clear(ClearType::CurrentLine))?;
        self.stdout.execute(Print(format!(
            "Score: {}   Food left: {}\n",
            state.score(),
            state.num_food()
        )))?;
        Ok(())
    }
}

fn glyph_colour(glyph: char) -> TermColor {
    match glyph {
        '%' => TermColor::Blue,
        '.' => TermColor::White,
        'o' => TermColor::Magenta,
        'G' => TermColor::Red,
        'S' => TermColor::Cyan,
        ' ' => TermColor::Reset,
        _ => TermColor::Yellow,
    }
}
