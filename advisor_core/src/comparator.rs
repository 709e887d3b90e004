//! GPU Comparator
//!
//! Relative performance of two descriptors from their capability indices:
//!
//! ```text
//! difference_percent = (index2 - index1) / index1 x 100
//! ```
//!
//! With a game, both descriptors are also run through the predictor at the
//! table's comparison resolution/quality so the index delta can be checked
//! against the fps delta. Resolution and quality scaling are sub-linear, so
//! the two percentages differ in size; memory penalties can also flip the fps
//! ranking for a card with more throughput but too little memory. The two
//! deltas are therefore not forced to share a sign: a disagreement is
//! reported through `deltas_agree`, never adjusted away (DESIGN.md, Open
//! Question 4).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

use crate::errors::CatalogError;
use crate::float_compare::percent_change;
use crate::gpu_catalog::GpuCatalog;
use crate::predictor::Predictor;
use crate::scaling_tables::ScalingTables;
use crate::types::{CapabilityIndex, HardwareDescriptor, PredictionResult, QualityPreset, ResolutionSpec, ResolvedGame};

/// Predicted fps for both descriptors on one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameComparison {
    pub game: String,
    pub resolution: ResolutionSpec,
    pub quality: QualityPreset,
    pub gpu1: PredictionResult,
    pub gpu2: PredictionResult,
    /// (fps2 - fps1) / fps1 x 100, from the rounded averages
    pub fps_difference_percent: f64,
    /// Index delta and fps delta point the same way (or one of them is zero).
    pub deltas_agree: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuComparison {
    pub gpu1: String,
    pub gpu2: String,
    pub index1: CapabilityIndex,
    pub index2: CapabilityIndex,
    /// Positive when gpu2 is faster.
    pub performance_difference_percent: f64,
    /// Label of the faster descriptor; `None` when the indices are equal.
    pub faster: Option<String>,
    pub game: Option<GameComparison>,
}

#[derive(Debug, Clone, Copy)]
pub struct Comparator<'a> {
    predictor: Predictor<'a>,
}

impl<'a> Comparator<'a> {
    pub fn new(tables: &'a ScalingTables) -> Self {
        Self {
            predictor: Predictor::new(tables),
        }
    }

    pub fn compare_gpus(
        &self,
        hw1: &HardwareDescriptor,
        hw2: &HardwareDescriptor,
        game: Option<&ResolvedGame>,
    ) -> GpuComparison {
        let scorer = self.predictor.scorer();
        let index1 = scorer.score(hw1);
        let index2 = scorer.score(hw2);
        let difference = percent_change(index1.value(), index2.value());
        // `faster` follows the reported sign so the two never contradict.
        let index_order = difference.partial_cmp(&0.0).unwrap_or(Ordering::Equal);

        let faster = match index_order {
            Ordering::Greater => Some(hw2.label.clone()),
            Ordering::Less => Some(hw1.label.clone()),
            Ordering::Equal => None,
        };

        let game = game.map(|game| self.compare_on_game(hw1, hw2, game, index_order));

        debug!(
            gpu1 = %hw1.label,
            gpu2 = %hw2.label,
            index1 = index1.value(),
            index2 = index2.value(),
            difference_percent = difference,
            deltas_agree = game.as_ref().map(|g| g.deltas_agree),
            "Compared GPUs"
        );

        GpuComparison {
            gpu1: hw1.label.clone(),
            gpu2: hw2.label.clone(),
            index1,
            index2,
            performance_difference_percent: difference,
            faster,
            game,
        }
    }

    /// Compare against a catalog model looked up by name.
    pub fn compare_named(
        &self,
        hw1: &HardwareDescriptor,
        gpu2_name: &str,
        catalog: &GpuCatalog,
        game: Option<&ResolvedGame>,
    ) -> Result<GpuComparison, CatalogError> {
        let hw2 = catalog.lookup(gpu2_name)?;
        Ok(self.compare_gpus(hw1, &hw2, game))
    }

    fn compare_on_game(
        &self,
        hw1: &HardwareDescriptor,
        hw2: &HardwareDescriptor,
        game: &ResolvedGame,
        index_order: Ordering,
    ) -> GameComparison {
        let model = &self.predictor.tables().model;
        let (resolution, quality) = (model.comparison_resolution, model.comparison_quality);
        let gpu1 = self.predictor.predict(hw1, game, resolution, quality);
        let gpu2 = self.predictor.predict(hw2, game, resolution, quality);

        let fps_difference_percent = percent_change(gpu1.fps_average as f64, gpu2.fps_average as f64);
        let fps_order = gpu2.fps_average.cmp(&gpu1.fps_average);
        let deltas_agree = fps_order == index_order || fps_order == Ordering::Equal || index_order == Ordering::Equal;

        GameComparison {
            game: game.title().to_string(),
            resolution,
            quality,
            gpu1,
            gpu2,
            fps_difference_percent,
            deltas_agree,
        }
    }
}
