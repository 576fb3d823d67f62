//! Scoped move application.

use std::ops::{Deref, DerefMut};

use chess_core::Move;

use crate::GameState;

/// A move applied to a [`GameState`] for the lifetime of the guard.
///
/// Dropping the guard undoes every move applied since it was created, so the
/// state is restored on early returns and unwinding alike. Moves applied
/// through the guard (for example by a nested search) are taken back too.
pub struct Probe<'a> {
    state: &'a mut GameState,
    base_len: usize,
}

impl<'a> Probe<'a> {
    pub(crate) fn new(state: &'a mut GameState, m: Move) -> Self {
        let base_len = state.move_log().len();
        state.apply_move(m);
        Probe { state, base_len }
    }
}

impl Deref for Probe<'_> {
    type Target = GameState;

    fn deref(&self) -> &GameState {
        &*self.state
    }
}

impl DerefMut for Probe<'_> {
    fn deref_mut(&mut self) -> &mut GameState {
        &mut *self.state
    }
}

impl Drop for Probe<'_> {
    fn drop(&mut self) {
        while self.state.move_log().len() > self.base_len {
            self.state.undo_move();
        }
    }
}
