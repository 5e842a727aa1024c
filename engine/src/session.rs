//! Draw session: sampling without replacement from `1..=size`.
//!
//! The session is a plain value. Mutators return either the draw outcome or a
//! snapshot of the resulting state, so it can be driven and inspected without
//! any rendering layer.

use std::collections::VecDeque;

use rand::Rng;

use bingo_types::{BallNumber, PendingSize, UniverseSize};

/// Whether any number is still left to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    Drawn(BallNumber),
    /// Every number was already drawn; nothing changed.
    Exhausted,
}

/// Owned copy of the session state at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub size: UniverseSize,
    /// Most recent first.
    pub drawn: Vec<BallNumber>,
    pub last_drawn: Option<BallNumber>,
    pub state: SessionState,
}

#[derive(Debug, Clone)]
pub struct DrawSession {
    size: UniverseSize,
    /// Most recent first.
    drawn: VecDeque<BallNumber>,
    /// `marks[n]` is set once `n` has been drawn. Index 0 is unused.
    marks: Vec<bool>,
}

impl DrawSession {
    #[must_use]
    pub fn new(size: UniverseSize) -> Self {
        Self {
            size,
            drawn: VecDeque::with_capacity(size.as_usize()),
            marks: vec![false; size.as_usize() + 1],
        }
    }

    #[must_use]
    pub fn size(&self) -> UniverseSize {
        self.size
    }

    /// Drawn numbers, most recent first.
    pub fn drawn(&self) -> impl ExactSizeIterator<Item = BallNumber> + '_ {
        self.drawn.iter().copied()
    }

    #[must_use]
    pub fn drawn_count(&self) -> usize {
        self.drawn.len()
    }

    #[must_use]
    pub fn last_drawn(&self) -> Option<BallNumber> {
        self.drawn.front().copied()
    }

    #[must_use]
    pub fn is_drawn(&self, number: BallNumber) -> bool {
        self.marks.get(number.index()).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.size.as_usize().saturating_sub(self.drawn.len())
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.drawn.len() >= self.size.as_usize() {
            SessionState::Exhausted
        } else {
            SessionState::Active
        }
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.state() == SessionState::Exhausted
    }

    /// Draws a number not drawn before, or does nothing once exhausted.
    ///
    /// Rejection sampling: a uniform pick over the whole range is retried until
    /// it lands on an unmarked number. Terminates while Active because at least
    /// one number is unmarked.
    pub fn draw<R: Rng>(&mut self, rng: &mut R) -> DrawOutcome {
        if self.is_exhausted() {
            return DrawOutcome::Exhausted;
        }

        let max = self.size.get();
        let ball = loop {
            let candidate = rng.random_range(1..=max);
            if let Some(ball) = BallNumber::new(candidate)
                && !self.is_drawn(ball)
            {
                break ball;
            }
        };

        self.marks[ball.index()] = true;
        self.drawn.push_front(ball);
        tracing::debug!(number = %ball, drawn = self.drawn.len(), size = max, "Drew number");
        DrawOutcome::Drawn(ball)
    }

    /// Clears all draws and starts over with the resolved pending size.
    pub fn reset(&mut self, pending: PendingSize) -> SessionSnapshot {
        let size = pending.resolve();
        *self = Self::new(size);
        self.snapshot()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            size: self.size,
            drawn: self.drawn.iter().copied().collect(),
            last_drawn: self.last_drawn(),
            state: self.state(),
        }
    }
}

impl Default for DrawSession {
    fn default() -> Self {
        Self::new(UniverseSize::DEFAULT)
    }
}
