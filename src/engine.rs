//! A chess-playing bot: one position, one search engine instance and one
//! evaluation cache.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use log::{debug, info};
use shakmaty::{Chess, Move, Role};
use thiserror::Error;

use crate::chess_state::{uci, CanonicalKey, ChessState, StateError};
use crate::evaluate::{
    CachedEvaluator, CompoundEvaluator, EvaluatorWeights, PieceValues, PositionCache, WeightError,
};
use crate::search::{
    GameState, MutateUndo, Persistent, PersistentState, Score, SearchError, SearchResult,
    Searcher, Winner,
};

/// Which search algorithm a bot runs. Minimax walks persistent child
/// positions, alpha-beta mutates and restores a single position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Minimax,
    AlphaBeta,
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimax" => Ok(Algorithm::Minimax),
            "alpha-beta" | "alphabeta" => Ok(Algorithm::AlphaBeta),
            _ => Err(format!("unknown algorithm `{}`", s)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Minimax => write!(f, "minimax"),
            Algorithm::AlphaBeta => write!(f, "alpha-beta"),
        }
    }
}

/// When the evaluation cache is cleared as moves are played.
///
/// Keys fully describe the evaluated position, so clearing is never needed
/// for correctness; `IrreversibleMoves` only bounds the cache's growth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheInvalidation {
    Never,
    IrreversibleMoves,
}

impl FromStr for CacheInvalidation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "never" => Ok(CacheInvalidation::Never),
            "irreversible" => Ok(CacheInvalidation::IrreversibleMoves),
            _ => Err(format!("unknown cache invalidation policy `{}`", s)),
        }
    }
}

/// Core engine configuration
#[derive(Clone)]
pub struct EngineConfig {
    pub search_depth: u8,
    pub algorithm: Algorithm,
    pub invalidation: CacheInvalidation,
    pub weights: EvaluatorWeights,
    pub piece_values: PieceValues,
    pub starting_position: Chess,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_depth: 4, // Default search depth
            algorithm: Algorithm::AlphaBeta,
            invalidation: CacheInvalidation::Never,
            weights: EvaluatorWeights::default(),
            piece_values: PieceValues::default(),
            starting_position: Chess::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("illegal move: {uci}")]
    IllegalMove { uci: String },
    #[error("no available moves")]
    NoAvailableMoves,
    #[error("search error: {0}")]
    Search(#[from] SearchError),
    #[error("state error: {0}")]
    State(#[from] StateError),
    #[error("invalid evaluator weights: {0}")]
    Weights(#[from] WeightError),
}

enum Strategy {
    Minimax(Searcher<Persistent>),
    AlphaBeta(Searcher<MutateUndo>),
}

impl Strategy {
    fn new(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Minimax => Strategy::Minimax(Searcher::new()),
            Algorithm::AlphaBeta => Strategy::AlphaBeta(Searcher::new()),
        }
    }
}

/// A bot that owns its position, search engine and evaluation cache.
///
/// Every bot is built from its own config; nothing is shared between bots
/// unless the caller shares it explicitly.
pub struct Engine {
    state: ChessState,
    strategy: Strategy,
    cache: Rc<PositionCache<CanonicalKey>>,
    search_depth: u8,
    invalidation: CacheInvalidation,
    move_history: Vec<Move>,
    last_score: Option<Score>,
}

impl Default for Engine {
    fn default() -> Self {
        // default weights are always in range
        Self::build(EngineConfig::default())
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a bot, rejecting evaluator weights that could overflow the
    /// heuristic range before any search runs.
    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        config.weights.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        let cache = Rc::new(PositionCache::new());
        let evaluator = CachedEvaluator::with_cache(
            CompoundEvaluator::<Chess>::from_weights(config.weights, config.piece_values),
            Rc::clone(&cache),
        );

        Self {
            state: ChessState::new(config.starting_position, Rc::new(evaluator)),
            strategy: Strategy::new(config.algorithm),
            cache,
            search_depth: config.search_depth,
            invalidation: config.invalidation,
            move_history: Vec::new(),
            last_score: None,
        }
    }

    pub fn state(&self) -> &ChessState {
        &self.state
    }

    pub fn cache(&self) -> &PositionCache<CanonicalKey> {
        &self.cache
    }

    pub fn move_history(&self) -> &[Move] {
        &self.move_history
    }

    pub fn last_score(&self) -> Option<Score> {
        self.last_score
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_terminal()
    }

    /// Returns the result of the game, or `None` while it is still in progress.
    pub fn outcome(&self) -> Option<Winner> {
        match self.state.winner() {
            Winner::NotTerminal => None,
            winner => Some(winner),
        }
    }

    /// Resolves a move typed in UCI notation against the legal moves.
    pub fn parse_move(&self, text: &str) -> Result<Move, EngineError> {
        self.state
            .find_uci_move(text)
            .ok_or_else(|| EngineError::IllegalMove {
                uci: text.to_string(),
            })
    }

    /// Searches for the best move of the side to move and returns it with its value.
    ///
    /// The bot owns its position and depth, so the searching player is always
    /// the side to move (white maximizes) and the depth is the configured
    /// `search_depth`. Callers wanting another player or depth use a
    /// [`Searcher`] directly. The position is left unchanged.
    pub fn choose_move(&mut self) -> Result<(Score, Move), EngineError> {
        let player = self.state.player_to_move();
        let depth = self.search_depth;

        let result: SearchResult<Move> = match &mut self.strategy {
            Strategy::Minimax(searcher) => searcher.minimax(&mut self.state, player, depth)?,
            Strategy::AlphaBeta(searcher) => searcher.alphabeta(&mut self.state, player, depth)?,
        };

        let best_move = result.best_move.ok_or(EngineError::NoAvailableMoves)?;
        self.last_score = Some(result.value);

        debug!(
            "chose {} (value {}) for {:?}; cache holds {} positions, {} hits, {} misses",
            uci(&best_move),
            result.value,
            player,
            self.cache.len(),
            self.cache.hit_count(),
            self.cache.miss_count()
        );

        Ok((result.value, best_move))
    }

    /// Plays a legal move on the bot's position, clearing the evaluation
    /// cache first if the configured policy asks for it.
    pub fn apply_move(&mut self, game_move: &Move) -> Result<(), EngineError> {
        if !self.state.legal_moves().contains(game_move) {
            return Err(EngineError::IllegalMove {
                uci: uci(game_move),
            });
        }

        let irreversible = game_move.is_capture() || game_move.role() == Role::Pawn;
        if self.invalidation == CacheInvalidation::IrreversibleMoves && irreversible {
            debug!("clearing evaluation cache after {}", uci(game_move));
            self.cache.clear();
        }

        self.state = self.state.apply(game_move);
        self.move_history.push(game_move.clone());
        info!("played {}, position {}", uci(game_move), self.state.fen());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_state::{parse_fen, STARTING_POSITION_FEN};
    use crate::search::WIN;

    fn engine(fen: &str, depth: u8, algorithm: Algorithm) -> Engine {
        Engine::with_config(EngineConfig {
            search_depth: depth,
            algorithm,
            starting_position: parse_fen(fen).unwrap(),
            ..EngineConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_choose_move_from_start_at_depth_1() {
        for &algorithm in &[Algorithm::Minimax, Algorithm::AlphaBeta] {
            let mut engine = engine(STARTING_POSITION_FEN, 1, algorithm);

            let (score, best_move) = engine.choose_move().unwrap();

            assert_eq!(score, 0);
            assert!(engine.state().legal_moves().contains(&best_move));
            assert_eq!(engine.state().fen(), STARTING_POSITION_FEN);
        }
    }

    #[test]
    fn test_choose_move_finds_mate() {
        let mut engine = engine("1Q6/8/8/8/8/8/k1K5/8 w - - 0 1", 2, Algorithm::AlphaBeta);

        let (score, best_move) = engine.choose_move().unwrap();
        engine.apply_move(&best_move).unwrap();

        assert_eq!(score, WIN);
        assert!(engine.is_game_over());
        assert_eq!(engine.outcome(), Some(Winner::Maximizer));
        assert_eq!(engine.last_score(), Some(WIN));
    }

    #[test]
    fn test_choose_move_when_game_is_over() {
        let mut engine = engine("k1Q5/8/1K6/8/8/8/8/8 b - - 0 1", 3, Algorithm::Minimax);

        assert!(matches!(
            engine.choose_move(),
            Err(EngineError::NoAvailableMoves)
        ));
    }

    #[test]
    fn test_apply_move_rejects_illegal_move() {
        let other = engine("4k3/8/8/8/8/8/8/R3K3 w - - 0 1", 1, Algorithm::AlphaBeta);
        let foreign_move = other.parse_move("a1a8").unwrap();
        let mut bot = engine(STARTING_POSITION_FEN, 1, Algorithm::AlphaBeta);

        assert!(matches!(
            bot.apply_move(&foreign_move),
            Err(EngineError::IllegalMove { .. })
        ));
        assert!(matches!(
            bot.parse_move("e2e5"),
            Err(EngineError::IllegalMove { .. })
        ));
        assert!(bot.move_history().is_empty());
    }

    #[test]
    fn test_irreversible_moves_clear_cache() {
        let mut engine = Engine::with_config(EngineConfig {
            search_depth: 1,
            invalidation: CacheInvalidation::IrreversibleMoves,
            ..EngineConfig::default()
        })
        .unwrap();

        engine.choose_move().unwrap();
        assert!(!engine.cache().is_empty());

        let knight_move = engine.parse_move("g1f3").unwrap();
        engine.apply_move(&knight_move).unwrap();
        assert!(!engine.cache().is_empty(), "knight moves are reversible");

        let pawn_move = engine.parse_move("e7e5").unwrap();
        engine.apply_move(&pawn_move).unwrap();
        assert!(engine.cache().is_empty());
    }

    #[test]
    fn test_cache_kept_without_invalidation() {
        let mut engine = engine(STARTING_POSITION_FEN, 1, Algorithm::AlphaBeta);

        engine.choose_move().unwrap();
        let cached = engine.cache().len();
        let pawn_move = engine.parse_move("e2e4").unwrap();
        engine.apply_move(&pawn_move).unwrap();

        assert_eq!(engine.cache().len(), cached);
        assert_eq!(engine.move_history().len(), 1);
    }

    #[test]
    fn test_with_config_rejects_overflowing_weights() {
        let result = Engine::with_config(EngineConfig {
            weights: EvaluatorWeights {
                material: 858_993_460,
                ..EvaluatorWeights::default()
            },
            ..EngineConfig::default()
        });

        assert!(matches!(
            result,
            Err(EngineError::Weights(WeightError::OutOfRange {
                name: "material",
                ..
            }))
        ));
    }

    #[test]
    fn test_choose_move_searches_for_side_to_move() {
        let mut engine = engine(STARTING_POSITION_FEN, 1, Algorithm::AlphaBeta);
        let e4 = engine.parse_move("e2e4").unwrap();
        engine.apply_move(&e4).unwrap();

        let (score, reply) = engine.choose_move().unwrap();

        assert_eq!(engine.state().player_to_move(), crate::search::Player::Minimizer);
        assert_eq!(score, 0);
        assert!(engine.apply_move(&reply).is_ok());
    }

    #[test]
    fn test_parse_algorithm() {
        assert_eq!("minimax".parse::<Algorithm>(), Ok(Algorithm::Minimax));
        assert_eq!("alpha-beta".parse::<Algorithm>(), Ok(Algorithm::AlphaBeta));
        assert!("negamax".parse::<Algorithm>().is_err());
        assert_eq!(
            "irreversible".parse::<CacheInvalidation>(),
            Ok(CacheInvalidation::IrreversibleMoves)
        );
    }
}
