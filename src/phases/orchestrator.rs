//! Orchestrator for a complete conversion run
//!
//! Coordinates all phases behind one call. Model groups are independent, so
//! extraction and resolution run in parallel across groups. Writing only
//! starts once every group has been resolved and planned without error.

use std::path::{Path, PathBuf};

use log::{debug, info};
use rayon::prelude::*;

use super::{phase1, phase2, phase4, phase5};
use super::{ModelGroup, OutputMode, PrintQueue};
use crate::archive;
use crate::error::Result;
use crate::registry::Registry;
use crate::render::RenderOptions;

/// Options of a conversion run
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Directory receiving the `.txt` files
    pub output_dir: PathBuf,
    pub mode: OutputMode,
    pub render: RenderOptions,
}

impl ConvertOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            mode: OutputMode::default(),
            render: RenderOptions::default(),
        }
    }
}

/// A model group with its artifacts in output order
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub group: ModelGroup,
    pub registry: Registry,
    pub queue: PrintQueue,
}

/// Outcome of converting one model group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupReport {
    pub name: String,
    pub artifacts: usize,
    pub files: Vec<PathBuf>,
}

/// Outcome of a conversion run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub groups: Vec<GroupReport>,
}

impl ConversionReport {
    /// Total number of converted artifacts
    pub fn artifact_count(&self) -> usize {
        self.groups.iter().map(|group| group.artifacts).sum()
    }

    /// All written files, group by group
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.groups
            .iter()
            .flat_map(|group| group.files.iter().map(PathBuf::as_path))
    }
}

/// Discover, extract and order every model group below `root` (Phases 1-4)
///
/// Every group is resolved, so unknown and cyclic references fail the run in
/// both modes. [`OutputMode::Merge`] uses the resolved print order;
/// [`OutputMode::Separate`] keeps registration order.
pub fn load(root: &Path, mode: OutputMode) -> Result<Vec<LoadedModel>> {
    let groups = phase1::execute(root)?;

    let loaded: Vec<Result<LoadedModel>> = groups
        .into_par_iter()
        .map(|group| load_group(group, mode))
        .collect();

    // First failure in discovery order, independent of scheduling
    loaded.into_iter().collect()
}

fn load_group(group: ModelGroup, mode: OutputMode) -> Result<LoadedModel> {
    let registry = phase2::execute(&group)?;

    let resolved = phase4::resolve(&registry)?;

    let queue = match mode {
        OutputMode::Merge => resolved,
        OutputMode::Separate => PrintQueue::new(
            registry
                .iter()
                .map(|artifact| artifact.name().to_string())
                .collect(),
        ),
    };
    debug!("Model '{}' print order: {:?}", group.name(), queue.order);

    Ok(LoadedModel {
        group,
        registry,
        queue,
    })
}

/// Execute a complete conversion run
///
/// `input` is a directory tree or a zip archive of one. Nothing is written
/// unless every model group converts successfully.
pub fn convert(input: &Path, options: &ConvertOptions) -> Result<ConversionReport> {
    let source = archive::prepare(input)?;
    let models = load(source.root(), options.mode)?;

    let plans: Vec<phase5::WritePlan<'_>> = models
        .iter()
        .map(|model| {
            phase5::plan(
                &model.group,
                model.queue.artifacts(&model.registry),
                options.mode,
                &options.output_dir,
            )
        })
        .collect();
    phase5::check_collisions(&plans)?;

    let mut report = ConversionReport::default();
    for plan in &plans {
        let files = phase5::execute(plan, &options.render)?;
        report.groups.push(GroupReport {
            name: plan.group.clone(),
            artifacts: plan.entries.len(),
            files,
        });
    }

    info!(
        "Converted {} artifact(s) from {} model(s)",
        report.artifact_count(),
        report.groups.len()
    );
    Ok(report)
}
