//! The two ways a search steps from a position into one of its children.
//!
//! A `Searcher` is parameterized by exactly one of these, so a single search
//! never mixes copy-on-move and push/pop traversal.

use std::ops::{Deref, DerefMut};

use super::traits::{GameState, PersistentState, UndoState};
use super::SearchError;

pub trait Apply<S: GameState> {
    /// Runs `visit` on the position reached by playing `game_move` from `state`.
    /// `state` is observably unchanged once this returns, on every exit path.
    fn with_child<T, F>(state: &mut S, game_move: &S::Move, visit: F) -> Result<T, SearchError>
    where
        F: FnOnce(&mut S) -> Result<T, SearchError>;
}

/// Builds a fresh child position for every move and discards it afterwards.
#[derive(Clone, Copy, Debug, Default)]
pub struct Persistent;

impl<S: PersistentState> Apply<S> for Persistent {
    #[inline]
    fn with_child<T, F>(state: &mut S, game_move: &S::Move, visit: F) -> Result<T, SearchError>
    where
        F: FnOnce(&mut S) -> Result<T, SearchError>,
    {
        let mut child = state.apply(game_move);
        visit(&mut child)
    }
}

/// Pushes the move onto the shared position and pops it when the child
/// search is done.
#[derive(Clone, Copy, Debug, Default)]
pub struct MutateUndo;

impl<S: UndoState> Apply<S> for MutateUndo {
    #[inline]
    fn with_child<T, F>(state: &mut S, game_move: &S::Move, visit: F) -> Result<T, SearchError>
    where
        F: FnOnce(&mut S) -> Result<T, SearchError>,
    {
        let mut guard = UndoGuard::push(state, game_move);
        visit(&mut *guard)
    }
}

/// Pops the pushed move when dropped, including while unwinding.
struct UndoGuard<'a, S: UndoState> {
    state: &'a mut S,
}

impl<'a, S: UndoState> UndoGuard<'a, S> {
    fn push(state: &'a mut S, game_move: &S::Move) -> Self {
        state.push(game_move);
        Self { state }
    }
}

impl<S: UndoState> Deref for UndoGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.state
    }
}

impl<S: UndoState> DerefMut for UndoGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.state
    }
}

impl<S: UndoState> Drop for UndoGuard<'_, S> {
    fn drop(&mut self) {
        self.state.pop();
    }
}
