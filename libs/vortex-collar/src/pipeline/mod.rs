//! # Collar Pipeline
//!
//! Builds the collar as a fixed sequence of stages:
//!
//! ```text
//! Init → BaseHollowed → SlotsCut(i)… → RampsUnioned(i)… → HoleCut → [LipUnioned] → Validated → Done
//! ```
//!
//! Only the base is load-bearing: if it cannot be built the run fails. Any
//! other feature whose authoring or boolean fails is recorded in the report
//! and skipped, and the pipeline keeps going with the solid it had.

mod engine;

#[cfg(test)]
mod tests;

pub use engine::{BspEngine, CsgEngine};

use crate::authoring::{cutter_for, Provenance};
use crate::dimensions::CollarDimensions;
use crate::error::CollarError;
use crate::features::{authored_base, base_operands, lip_ring, ramp_deflector, torch_cutter};
use crate::params::{BaseConstruction, CollarParameters};
use crate::report::{
    BuildReport, Feature, FeatureOutcome, FeatureStatus, SolidSummary, ValidationSummary,
};
use crate::slot::SlotDescriptor;
use serde::Serialize;
use solid_mesh::{inspect, repair, MeshError, Solid};
use std::fmt;
use tracing::{info, instrument, warn};

/// Pipeline stage, recorded when the stage completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "index", rename_all = "kebab-case")]
pub enum PipelineState {
    Init,
    BaseHollowed,
    SlotsCut(u32),
    RampsUnioned(u32),
    HoleCut,
    LipUnioned,
    Validated,
    Done,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => f.write_str("init"),
            Self::BaseHollowed => f.write_str("base hollowed"),
            Self::SlotsCut(i) => write!(f, "slot {i} cut"),
            Self::RampsUnioned(i) => write!(f, "ramp {i} unioned"),
            Self::HoleCut => f.write_str("hole cut"),
            Self::LipUnioned => f.write_str("lip unioned"),
            Self::Validated => f.write_str("validated"),
            Self::Done => f.write_str("done"),
        }
    }
}

/// The finished solid and how it was built.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub solid: Solid,
    pub report: BuildReport,
}

/// Collar builder over a boolean backend.
#[derive(Debug)]
pub struct CollarPipeline<E = BspEngine> {
    params: CollarParameters,
    dims: CollarDimensions,
    engine: E,
}

impl CollarPipeline<BspEngine> {
    /// Validates `params` and prepares a pipeline on the BSP backend.
    pub fn new(params: CollarParameters) -> Result<Self, CollarError> {
        Self::with_engine(params, BspEngine)
    }
}

impl<E: CsgEngine> CollarPipeline<E> {
    /// Validates `params` and prepares a pipeline on `engine`.
    pub fn with_engine(params: CollarParameters, engine: E) -> Result<Self, CollarError> {
        params.validate()?;
        let dims = CollarDimensions::from(&params);
        Ok(Self {
            params,
            dims,
            engine,
        })
    }

    pub fn params(&self) -> &CollarParameters {
        &self.params
    }

    pub fn dimensions(&self) -> &CollarDimensions {
        &self.dims
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Slot descriptors in cutting order.
    pub fn slots(&self) -> Vec<SlotDescriptor> {
        SlotDescriptor::all(self.dims.slots.count, self.dims.slots.ramp_angle)
    }

    /// Runs every stage and returns the solid with its report.
    #[instrument(skip(self), fields(strategy = %self.params.slots.strategy, slots = self.dims.slots.count))]
    pub fn run(&mut self) -> Result<BuildOutput, CollarError> {
        let mut log = BuildLog::default();
        log.states.push(PipelineState::Init);

        let mut solid = self.base()?;
        log.applied(Feature::Base, Some(Provenance::Primitive));
        log.enter(PipelineState::BaseHollowed, &solid);

        let slots = self.slots();
        let cutter = cutter_for(self.dims.slots.strategy);
        for slot in &slots {
            let tool = cutter
                .author(&self.dims, slot)
                .map(|authored| (authored.place(slot), authored.provenance));
            apply(
                &mut self.engine,
                &mut solid,
                &mut log,
                Feature::Slot(slot.index),
                Combine::Difference,
                tool,
            );
            log.enter(PipelineState::SlotsCut(slot.index), &solid);
        }

        if let Some(ramp) = &self.dims.ramps {
            for slot in &slots {
                let tool = ramp_deflector(ramp, slot).map(|plate| (plate, Provenance::Primitive));
                apply(
                    &mut self.engine,
                    &mut solid,
                    &mut log,
                    Feature::Ramp(slot.index),
                    Combine::Union,
                    tool,
                );
                log.enter(PipelineState::RampsUnioned(slot.index), &solid);
            }
        }

        let tool = torch_cutter(&self.dims).map(|cutter| (cutter, Provenance::Primitive));
        apply(
            &mut self.engine,
            &mut solid,
            &mut log,
            Feature::TorchHole,
            Combine::Difference,
            tool,
        );
        log.enter(PipelineState::HoleCut, &solid);

        if let Some(lip) = &self.dims.lip {
            let tool = lip_ring(&self.dims, lip).map(|ring| (ring, Provenance::Primitive));
            apply(
                &mut self.engine,
                &mut solid,
                &mut log,
                Feature::Lip,
                Combine::Union,
                tool,
            );
            log.enter(PipelineState::LipUnioned, &solid);
        }

        let before = inspect(&solid);
        let (solid, after) = if before.is_watertight() {
            (solid, None)
        } else {
            warn!(report = %before, "result not watertight, repairing");
            let repaired = repair(solid);
            let after = inspect(&repaired);
            if !after.is_watertight() {
                warn!(report = %after, "repair left the solid open");
            }
            (repaired, Some(after))
        };
        log.enter(PipelineState::Validated, &solid);

        let summary = SolidSummary::of(&solid, self.dims.unit_scale);
        log.states.push(PipelineState::Done);
        info!(
            vertices = summary.vertex_count,
            faces = summary.face_count,
            watertight = summary.watertight,
            skipped = log.features.iter().filter(|o| !o.is_applied()).count(),
            "collar complete"
        );

        Ok(BuildOutput {
            solid,
            report: BuildReport {
                strategy: self.dims.slots.strategy,
                states: log.states,
                features: log.features,
                validation: ValidationSummary { before, after },
                summary,
            },
        })
    }

    fn base(&mut self) -> Result<Solid, CollarError> {
        match self.params.base {
            BaseConstruction::Boolean => {
                let (outer, hollow) = base_operands(&self.dims).map_err(CollarError::Base)?;
                self.engine
                    .difference(&outer, &hollow)
                    .map_err(CollarError::Base)
            }
            BaseConstruction::Authored => authored_base(&self.dims).map_err(CollarError::Base),
        }
    }
}

/// Validates `params` and builds the collar on the BSP backend.
pub fn build(params: CollarParameters) -> Result<BuildOutput, CollarError> {
    CollarPipeline::new(params)?.run()
}

#[derive(Debug, Clone, Copy)]
enum Combine {
    Union,
    Difference,
}

#[derive(Debug, Default)]
struct BuildLog {
    states: Vec<PipelineState>,
    features: Vec<FeatureOutcome>,
}

impl BuildLog {
    fn enter(&mut self, state: PipelineState, solid: &Solid) {
        info!(%state, vertices = solid.vertex_count(), faces = solid.face_count(), "stage complete");
        self.states.push(state);
    }

    fn applied(&mut self, feature: Feature, provenance: Option<Provenance>) {
        self.features.push(FeatureOutcome {
            feature,
            status: FeatureStatus::Applied,
            provenance,
        });
    }

    fn skipped(&mut self, feature: Feature, provenance: Option<Provenance>, err: &MeshError) {
        warn!(%feature, error = %err, "feature skipped");
        self.features.push(FeatureOutcome {
            feature,
            status: FeatureStatus::Skipped {
                reason: err.to_string(),
            },
            provenance,
        });
    }
}

/// Combines `tool` into `solid`, leaving `solid` untouched on failure.
fn apply<E: CsgEngine>(
    engine: &mut E,
    solid: &mut Solid,
    log: &mut BuildLog,
    feature: Feature,
    combine: Combine,
    tool: Result<(Solid, Provenance), MeshError>,
) {
    let (tool, provenance) = match tool {
        Ok(tool) => tool,
        Err(err) => {
            log.skipped(feature, None, &err);
            return;
        }
    };

    let result = match combine {
        Combine::Union => engine.union(solid, &tool),
        Combine::Difference => engine.difference(solid, &tool),
    };
    match result {
        Ok(next) => {
            *solid = next;
            log.applied(feature, Some(provenance));
        }
        Err(err) => log.skipped(feature, Some(provenance), &err),
    }
}
