//! Challenge runs: a fixed number of generated stages played back to back, stars summed.

use log::{debug, info};
use rand::Rng;

use crate::generator::{GeneratorError, StageGenerator};
use crate::stage::StageDefinition;

/// Stages in a challenge run.
pub const CHALLENGE_STAGES: usize = 4;

/// What a run does after a stage is completed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChallengeProgress {
    /// A new stage was generated and is ready to play.
    NextStage,
    /// Every stage is done.
    Complete {
        /// Stars summed over the run.
        total_stars: u32,
    },
}

/// A challenge run in progress.
///
/// Stages come from a [`StageGenerator`]; the caller plays each one and reports the stars earned.
#[derive(Clone, Debug)]
pub struct Challenge {
    generator: StageGenerator,
    total_stages: usize,
    // index of the stage being played; equals total_stages once complete
    current: usize,
    stage_stars: Vec<u8>,
    total_stars: u32,
    stage: StageDefinition,
}

impl Challenge {
    /// Start a run of [`CHALLENGE_STAGES`] stages, generating the first one.
    pub fn start<R: Rng + ?Sized>(generator: StageGenerator, rng: &mut R) -> Result<Self, GeneratorError> {
        Self::with_stages(generator, CHALLENGE_STAGES, rng)
    }

    /// Start a run of `total_stages` stages, at least one.
    pub fn with_stages<R: Rng + ?Sized>(
        generator: StageGenerator,
        total_stages: usize,
        rng: &mut R,
    ) -> Result<Self, GeneratorError> {
        let stage = generator.generate(rng)?;
        debug!("starting challenge of {} stages", total_stages.max(1));

        Ok(Self {
            generator,
            total_stages: total_stages.max(1),
            current: 0,
            stage_stars: Vec::with_capacity(total_stages),
            total_stars: 0,
            stage,
        })
    }

    /// Record the stars earned on the current stage, then generate the next one or finish.
    ///
    /// Once the run is complete, further calls record nothing.
    pub fn on_stage_complete<R: Rng + ?Sized>(&mut self, stars: u8, rng: &mut R) -> Result<ChallengeProgress, GeneratorError> {
        if self.is_complete() {
            return Ok(ChallengeProgress::Complete { total_stars: self.total_stars });
        }

        // generate first so a failure leaves the run where it was
        let next = match self.current + 1 < self.total_stages {
            true => Some(self.generator.generate(rng)?),
            false => None,
        };

        self.stage_stars.push(stars);
        self.total_stars += u32::from(stars);
        self.current += 1;

        match next {
            Some(stage) => {
                self.stage = stage;
                debug!("challenge stage {} of {}", self.current_stage_number(), self.total_stages);
                Ok(ChallengeProgress::NextStage)
            }
            None => {
                info!("challenge complete with {} stars", self.total_stars);
                Ok(ChallengeProgress::Complete { total_stars: self.total_stars })
            }
        }
    }

    /// The stage to play now; the last one played once the run is complete.
    pub fn current_stage(&self) -> &StageDefinition {
        &self.stage
    }

    /// 1-based number of the stage being played.
    pub fn current_stage_number(&self) -> usize {
        self.current.min(self.total_stages - 1) + 1
    }

    /// Stages in this run.
    pub fn total_stages(&self) -> usize {
        self.total_stages
    }

    /// Stars earned on each completed stage, in order.
    pub fn stage_stars(&self) -> &[u8] {
        &self.stage_stars
    }

    /// Stars earned so far.
    pub fn total_stars(&self) -> u32 {
        self.total_stars
    }

    /// Whether every stage has been completed.
    pub fn is_complete(&self) -> bool {
        self.current >= self.total_stages
    }
}
