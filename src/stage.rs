//! Stage definitions as delivered by the stage data collaborator, and the play session built on one.

use std::collections::HashSet;

use log::{debug, warn};
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, BoardError, TileIndex};
use crate::pattern::{CellMatrix, PatternError};

/// Reasons a stage definition cannot be played.
#[derive(Debug, Error)]
pub enum StageError {
    /// The initial pattern is malformed.
    #[error("initial pattern: {0}")]
    InitialPattern(#[source] PatternError),
    /// The target pattern is malformed.
    #[error("target pattern: {0}")]
    TargetPattern(#[source] PatternError),
    /// The star thresholds are not `0 < three stars < two stars`.
    #[error("invalid star condition: {three} moves for three stars, {two} for two")]
    InvalidStarCondition {
        /// Move limit for three stars.
        three: u32,
        /// Move limit for two stars.
        two: u32,
    },
    /// The stage data is not valid JSON for a stage collection.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Problems with a stage that still allow it to be played.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StageWarning {
    /// Initial and target patterns put tiles in different places, so the target can never match.
    OccupancyMismatch,
}

/// Move limits for the star rating.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StarCondition {
    /// Clearing in at most this many moves earns three stars.
    #[serde(rename = "toGet3Stars")]
    pub to_get_3_stars: u32,
    /// Clearing in at most this many moves earns two stars.
    #[serde(rename = "toGet2Stars")]
    pub to_get_2_stars: u32,
}

impl Default for StarCondition {
    fn default() -> Self {
        Self {
            to_get_3_stars: 10,
            to_get_2_stars: 15,
        }
    }
}

impl StarCondition {
    /// Three stars must need fewer moves than two.
    pub fn is_valid(&self) -> bool {
        self.to_get_3_stars > 0 && self.to_get_2_stars > self.to_get_3_stars
    }

    /// Stars earned for clearing in `moves` moves.
    pub fn rating(&self, moves: u32) -> u8 {
        if moves <= self.to_get_3_stars {
            3
        } else if moves <= self.to_get_2_stars {
            2
        } else {
            1
        }
    }
}

/// One stage: its patterns, tiling parity and star thresholds.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StageDefinition {
    /// Positive, unique within a collection; generated stages use `-1`.
    pub stage_id: i32,
    /// Characters per pattern row.
    pub width: usize,
    /// Rows per pattern.
    pub height: usize,
    /// Starting faces, top row first.
    pub initial_pattern: Vec<String>,
    /// Faces to reach, top row first.
    pub target_pattern: Vec<String>,
    /// Whether the top left triangle points down.
    pub is_top_left_triangle_downward: bool,
    /// Move limits for the rating.
    pub star_condition: StarCondition,
}

impl Default for StageDefinition {
    fn default() -> Self {
        Self {
            stage_id: 1,
            width: 1,
            height: 1,
            initial_pattern: Vec::new(),
            target_pattern: Vec::new(),
            is_top_left_triangle_downward: true,
            star_condition: StarCondition::default(),
        }
    }
}

impl StageDefinition {
    /// Parse the initial pattern against the declared dimensions.
    pub fn initial_matrix(&self) -> Result<CellMatrix, StageError> {
        CellMatrix::parse_with_dims(&self.initial_pattern, self.width, self.height, self.is_top_left_triangle_downward)
            .map_err(StageError::InitialPattern)
    }

    /// Parse the target pattern against the declared dimensions.
    pub fn target_matrix(&self) -> Result<CellMatrix, StageError> {
        CellMatrix::parse_with_dims(&self.target_pattern, self.width, self.height, self.is_top_left_triangle_downward)
            .map_err(StageError::TargetPattern)
    }

    /// Both patterns have the declared shape and only pattern characters.
    pub fn validate_patterns(&self) -> Result<(), StageError> {
        self.initial_matrix()?;
        self.target_matrix()?;
        Ok(())
    }

    /// Patterns are well formed and put tiles in the same places.
    pub fn validate_consistency(&self) -> Result<Vec<StageWarning>, StageError> {
        let initial = self.initial_matrix()?;
        let target = self.target_matrix()?;
        Ok(if initial.same_occupancy(&target) { Vec::new() } else { vec![StageWarning::OccupancyMismatch] })
    }

    /// Every check the stage data collaborator runs: patterns, occupancy and star condition.
    pub fn validate(&self) -> Result<(), StageError> {
        let condition = self.star_condition;
        if !condition.is_valid() {
            return Err(StageError::InvalidStarCondition { three: condition.to_get_3_stars, two: condition.to_get_2_stars });
        }

        self.validate_consistency()?;
        Ok(())
    }
}

/// A set of stages, as stored in stage data.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StageCollection {
    /// Stages in listing order.
    pub stages: Vec<StageDefinition>,
}

impl StageCollection {
    /// Decode a collection from JSON.
    pub fn from_json(json: &str) -> Result<Self, StageError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode this collection as JSON.
    pub fn to_json(&self) -> Result<String, StageError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look a stage up by id.
    pub fn stage_by_id(&self, stage_id: i32) -> Option<&StageDefinition> {
        self.stages.iter().find(|stage| stage.stage_id == stage_id)
    }

    /// Stage ids are positive and unique.
    pub fn validate_ids(&self) -> bool {
        let mut used = HashSet::with_capacity(self.stages.len());
        self.stages.iter().all(|stage| stage.stage_id > 0 && used.insert(stage.stage_id))
    }

    /// Ids are valid and every stage is well formed, with consistent occupancy.
    pub fn validate_all(&self) -> bool {
        self.validate_ids()
            && self.stages.iter().all(|stage| stage.validate().is_ok()
                && stage.validate_consistency().is_ok_and(|warnings| warnings.is_empty()))
    }
}

/// A stage being played: the live board, the target and the move count.
#[derive(Clone, Debug)]
pub struct Stage {
    definition: StageDefinition,
    board: Board,
    target: Array1<bool>,
    moves: u32,
    warnings: Vec<StageWarning>,
}

impl Stage {
    /// Load a stage.
    ///
    /// Malformed patterns are fatal. Patterns with different occupancy load anyway, with a
    /// [`StageWarning::OccupancyMismatch`] the caller may treat as fatal.
    pub fn new(definition: StageDefinition) -> Result<Self, StageError> {
        let initial = definition.initial_matrix()?;
        let target = definition.target_matrix()?;

        let mut warnings = Vec::new();
        if !initial.same_occupancy(&target) {
            warn!("stage {}: initial and target patterns place tiles differently", definition.stage_id);
            warnings.push(StageWarning::OccupancyMismatch);
        }

        let board = Board::from(&initial);
        debug!("loaded stage {} with {} tiles", definition.stage_id, board.size());

        Ok(Self {
            definition,
            board,
            target: target.bits(),
            moves: 0,
            warnings,
        })
    }

    /// The definition this stage was loaded from.
    pub fn definition(&self) -> &StageDefinition {
        &self.definition
    }

    /// The live board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Target faces in tile index order.
    pub fn target(&self) -> ArrayView1<'_, bool> {
        self.target.view()
    }

    /// Recoverable problems found while loading.
    pub fn warnings(&self) -> &[StageWarning] {
        &self.warnings
    }

    /// Moves made since loading or the last retry.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Press a tile and count the move.
    pub fn press(&mut self, index: TileIndex) -> Result<(), BoardError> {
        self.board.press(index)?;
        self.moves += 1;
        Ok(())
    }

    /// Whether the board shows the target.
    pub fn is_cleared(&self) -> bool {
        self.board.matches_pattern(self.target.view())
    }

    /// Stars earned with the moves made so far.
    pub fn rating(&self) -> u8 {
        self.definition.star_condition.rating(self.moves)
    }

    /// Start over from the initial faces.
    pub fn retry(&mut self) {
        self.board.reset();
        self.moves = 0;
    }
}
