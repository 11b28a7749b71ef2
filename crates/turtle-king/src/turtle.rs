//! Turtle-graphics interpretation of rewritten L-system strings.
//!
//! | Symbol | Effect |
//! |--------|--------|
//! | `+` | turn left by the angle increment |
//! | `-` | turn right by the angle increment |
//! | `[` | save position and heading |
//! | `]` | restore the last saved state (ignored when nothing is saved) |
//! | `F` | draw forward |
//! | other letters | draw forward when `all_letter_forward` is set |
//!
//! Every other symbol is ignored. Nothing here fails: a hand-written grammar
//! with a stray bracket or an unknown symbol still renders.

use std::collections::BTreeMap;

use crate::color::Palette;
use crate::geometry::{Point, Segment};
use crate::scene::Scene;

/// The symbol that always draws, regardless of `all_letter_forward`.
pub const DRAW_SYMBOL: char = 'F';

/// Parameters that drive the turtle.
#[derive(Debug, Clone, PartialEq)]
pub struct TurtleParams {
    /// Distance moved per draw command
    pub step_length: f64,
    /// Turn per `+`/`-`, in degrees
    pub angle_increment: f64,
    /// Whether any letter draws, or only `F`
    pub all_letter_forward: bool,
    /// Per-symbol segment colors
    pub palette: Palette,
}

impl Default for TurtleParams {
    fn default() -> Self {
        Self {
            step_length: 1.0,
            angle_increment: 90.0,
            all_letter_forward: true,
            palette: Palette::default(),
        }
    }
}

/// Position and heading of the turtle.
///
/// `angle` is in radians, counter-clockwise from the +x axis of the turtle
/// frame. Display rotation happens later, in the viewport transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurtleState {
    pub x: f64,
    pub y: f64,
    pub angle: f64,
}

impl TurtleState {
    /// The origin, facing +x.
    pub const INITIAL: TurtleState = TurtleState { x: 0.0, y: 0.0, angle: 0.0 };

    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Where a step of `step` would land, without moving.
    #[inline]
    pub fn ahead(&self, step: f64) -> Point {
        Point::new(self.x + step * self.angle.cos(), self.y + step * self.angle.sin())
    }
}

/// Saved turtle states for `[` / `]`.
///
/// ## Rust Lesson #9: Copy vs. Reference
///
/// `TurtleState` is `Copy`, so `push` stores a *copy* of the current state
/// and `pop` hands one back by value. The stack never holds a reference
/// to the live turtle, so restoring a branch can't see later moves.
#[derive(Debug, Clone, Default)]
pub struct BranchStack {
    states: Vec<TurtleState>,
}

impl BranchStack {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, state: TurtleState) {
        self.states.push(state);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<TurtleState> {
        self.states.pop()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Anomalies seen while interpreting. None of them stop interpretation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// `]` with nothing to restore
    pub unmatched_closes: usize,
    /// `[` still open when the input ended
    pub unclosed_branches: usize,
    /// Symbols that had no effect, with how often each appeared
    pub ignored_symbols: BTreeMap<char, usize>,
    /// Deepest branch nesting reached
    pub max_depth: usize,
}

impl Diagnostics {
    /// True when brackets balanced and every symbol did something.
    pub fn is_clean(&self) -> bool {
        self.unmatched_closes == 0 && self.unclosed_branches == 0 && self.ignored_symbols.is_empty()
    }
}

/// Interpret `commands` and return the drawn segments.
pub fn interpret(commands: &str, params: &TurtleParams) -> Scene {
    interpret_with_diagnostics(commands, params).0
}

/// Interpret `commands`, also reporting anything that was tolerated.
pub fn interpret_with_diagnostics(commands: &str, params: &TurtleParams) -> (Scene, Diagnostics) {
    let step = params.step_length;
    let turn = params.angle_increment.to_radians();

    let mut state = TurtleState::INITIAL;
    let mut stack = BranchStack::new();
    let mut segments = Vec::new();
    let mut diagnostics = Diagnostics::default();

    for c in commands.chars() {
        match c {
            '+' => state.angle += turn,
            '-' => state.angle -= turn,
            '[' => {
                stack.push(state);
                diagnostics.max_depth = diagnostics.max_depth.max(stack.depth());
            }
            ']' => match stack.pop() {
                Some(saved) => state = saved,
                None => diagnostics.unmatched_closes += 1,
            },
            c if draws_forward(c, params.all_letter_forward) => {
                let to = state.ahead(step);
                segments.push(Segment::new(state.x, state.y, to.x, to.y, params.palette.color_for(c)));
                state.x = to.x;
                state.y = to.y;
            }
            c => *diagnostics.ignored_symbols.entry(c).or_default() += 1,
        }
    }

    diagnostics.unclosed_branches = stack.depth();

    tracing::debug!(
        symbols = commands.len(),
        segments = segments.len(),
        clean = diagnostics.is_clean(),
        "interpretation finished"
    );

    (Scene::new(segments), diagnostics)
}

/// A "letter" is an alphabetic char that is not also numeric, so letter-like
/// numerals such as `Ⅻ` stay silent. Combining vowel signs (Unicode
/// Other_Alphabetic, e.g. `ा`) still count as letters here.
#[inline]
fn draws_forward(c: char, all_letter_forward: bool) -> bool {
    c == DRAW_SYMBOL || (all_letter_forward && c.is_alphabetic() && !c.is_numeric())
}
