//! Random stages which are solvable by construction.
//!
//! The target is produced by pressing tiles of the initial board, so pressing the same tiles
//! again solves the stage, and the press count bounds the optimal solution from above.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::Board;
use crate::builder::{BoardBuilder, BuilderInvalidReason};
use crate::stage::{StageDefinition, StarCondition};

/// Reasons a [`StageGenerator`] cannot produce a stage.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum GeneratorError {
    /// The template is not a valid pattern.
    #[error("invalid template: {0}")]
    Template(#[from] BuilderInvalidReason),
    /// The template has no tiles, so there is nothing to press.
    #[error("template has no tiles")]
    NoTiles,
}

/// Settings for [`StageGenerator`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Shape to generate on, top row first. Faces in it are the starting point for inversion.
    pub template: Vec<String>,
    /// Tiling parity of the template.
    pub top_left_downward: bool,
    /// Chance that each tile of the template is turned over before the target is derived.
    pub invert_chance: f64,
    /// Chance that each tile is pressed to derive the target.
    pub press_chance: f64,
    /// Two-star move limit as a multiple of the three-star one.
    pub two_star_scale: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            template: ["0212120", "2121212", "1212121", "0000010"].map(String::from).to_vec(),
            top_left_downward: true,
            invert_chance: 0.5,
            press_chance: 0.25,
            two_star_scale: 2.,
        }
    }
}

/// Builds random stages from a [`GeneratorConfig`].
#[derive(Clone, Debug, Default)]
pub struct StageGenerator {
    config: GeneratorConfig,
}

impl StageGenerator {
    /// A generator using `config`.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// The settings in use.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate one stage.
    ///
    /// Fails if the template is not a valid pattern or holds no tiles.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<StageDefinition, GeneratorError> {
        let mut builder = BoardBuilder::from_rows(&self.config.template, self.config.top_left_downward);
        let template = builder.matrix().map_err(|reasons| reasons[0].clone())?.clone();
        if template.occupied_count() == 0 {
            return Err(GeneratorError::NoTiles);
        }

        let invert_chance = self.config.invert_chance.clamp(0., 1.);
        for (location, _) in template.occupied() {
            if rng.random_bool(invert_chance) {
                builder.invert_cell(location);
            }
        }
        let initial = builder.matrix().map_err(|reasons| reasons[0].clone())?.clone();

        let mut target = Board::from(&initial);
        let press_chance = self.config.press_chance.clamp(0., 1.);
        let mut presses: Vec<usize> = (0..target.size())
            .filter(|_| rng.random_bool(press_chance))
            .collect();
        if presses.is_empty() {
            presses.push(rng.random_range(0..target.size()));
        }

        for index in &presses {
            // indices come from 0..size
            target.press(*index).map_err(|_| BuilderInvalidReason::FeatureOutOfBounds)?;
        }

        let three = presses.len() as u32;
        let two = ((three as f64 * self.config.two_star_scale).ceil() as u32).max(three + 1);
        debug!("generated stage with {} tiles, pressed {:?}", target.size(), presses);

        Ok(StageDefinition {
            stage_id: -1,
            width: initial.width(),
            height: initial.height(),
            initial_pattern: initial.to_rows(),
            target_pattern: target.to_rows(),
            is_top_left_triangle_downward: initial.top_left_downward(),
            star_condition: StarCondition {
                to_get_3_stars: three,
                to_get_2_stars: two,
            },
        })
    }
}
