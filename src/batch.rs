//! Orienting many meshes at once
//!
//! Every mesh is searched independently with the shared, read-only
//! [`OrientParams`]. Results land in the caller's [`OrientItem`] slots, so
//! there is nothing to merge afterwards. The stop predicate is polled before
//! each mesh starts; a mesh that has started always finishes.

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::model::Mesh;
use crate::orient::AutoOrienter;
use crate::params::OrientParams;
use crate::rotation::MeshOrientation;

/// One mesh of a batch and the slot its result is written to
#[derive(Debug, Clone)]
pub struct OrientItem<'a> {
    /// Name passed to the progress callback
    pub name: String,
    /// Mesh to orient
    pub mesh: &'a Mesh,
    /// Per-mesh overhang angle in degrees, overriding the batch setting
    pub overhang_angle: Option<f64>,
    /// Chosen orientation, written once the mesh has been processed
    pub result: Option<MeshOrientation>,
}

impl<'a> OrientItem<'a> {
    /// Create an item using the batch's overhang angle
    pub fn new(name: impl Into<String>, mesh: &'a Mesh) -> Self {
        Self {
            name: name.into(),
            mesh,
            overhang_angle: None,
            result: None,
        }
    }

    /// Override the overhang angle for this mesh
    pub fn with_overhang_angle(mut self, degrees: f64) -> Self {
        self.overhang_angle = Some(degrees);
        self
    }
}

/// What happened to the items of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    /// Meshes that were oriented
    pub completed: usize,
    /// Meshes without triangles; they receive the identity orientation
    pub skipped: usize,
    /// Meshes never started because the stop predicate fired
    pub cancelled: usize,
}

enum ItemOutcome {
    Completed,
    Skipped,
}

/// Orient every item of a batch
///
/// `progress(index, name)` is called right before a mesh starts. In
/// sequential mode calls arrive in index order; in parallel mode they may
/// interleave. `stop()` is polled before every mesh: once it returns `true`
/// no further mesh is started, and already written results are left intact.
///
/// Runs on the rayon thread pool when `params.parallel` is set and the
/// `parallel` feature is enabled, sequentially otherwise. Both modes produce
/// identical results.
///
/// A mesh without triangles gets the same identity orientation
/// [`crate::orient_mesh`] returns for it, and is counted as skipped.
///
/// # Errors
/// Returns [`crate::Error::InvalidParameter`] if `params`, or `params` with
/// any item's overhang angle applied, fails validation. No mesh is touched
/// in that case.
///
/// # Example
///
/// ```
/// use autoorient::{orient_meshes, Mesh, OrientItem, OrientParams};
///
/// let mesh = Mesh::new();
/// let mut items = vec![OrientItem::new("empty", &mesh)];
/// let summary = orient_meshes(&mut items, &OrientParams::default(), |_, _| {}, || false).unwrap();
/// assert_eq!(summary.skipped, 1);
/// ```
pub fn orient_meshes<P, S>(
    items: &mut [OrientItem<'_>],
    params: &OrientParams,
    progress: P,
    stop: S,
) -> Result<BatchSummary>
where
    P: Fn(usize, &str) + Sync,
    S: Fn() -> bool + Sync,
{
    params.validate()?;
    let item_params = items
        .iter()
        .map(|item| {
            let item_params = match item.overhang_angle {
                Some(degrees) => params.for_overhang_angle(degrees),
                None => params.clone(),
            };
            item_params.validate().map(|()| item_params)
        })
        .collect::<Result<Vec<_>>>()?;

    info!(
        meshes = items.len(),
        parallel = params.parallel,
        "Orienting meshes"
    );

    #[cfg(feature = "parallel")]
    if params.parallel {
        return Ok(orient_parallel(items, &item_params, &progress, &stop));
    }

    Ok(orient_sequential(items, &item_params, &progress, &stop))
}

fn orient_sequential<P, S>(
    items: &mut [OrientItem<'_>],
    item_params: &[OrientParams],
    progress: &P,
    stop: &S,
) -> BatchSummary
where
    P: Fn(usize, &str),
    S: Fn() -> bool,
{
    let mut summary = BatchSummary::default();
    for (index, (item, params)) in items.iter_mut().zip(item_params).enumerate() {
        if stop() {
            summary.cancelled = item_params.len() - index;
            info!(remaining = summary.cancelled, "Orientation cancelled");
            break;
        }
        progress(index, &item.name);
        match orient_item(item, params) {
            ItemOutcome::Completed => summary.completed += 1,
            ItemOutcome::Skipped => summary.skipped += 1,
        }
    }
    summary
}

#[cfg(feature = "parallel")]
fn orient_parallel<P, S>(
    items: &mut [OrientItem<'_>],
    item_params: &[OrientParams],
    progress: &P,
    stop: &S,
) -> BatchSummary
where
    P: Fn(usize, &str) + Sync,
    S: Fn() -> bool + Sync,
{
    use rayon::prelude::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    let stopped = AtomicBool::new(false);
    let completed = AtomicUsize::new(0);
    let skipped = AtomicUsize::new(0);

    items
        .par_iter_mut()
        .zip(item_params.par_iter())
        .enumerate()
        .for_each(|(index, (item, params))| {
            if stopped.load(Ordering::Relaxed) || stop() {
                stopped.store(true, Ordering::Relaxed);
                return;
            }
            progress(index, &item.name);
            let counter = match orient_item(item, params) {
                ItemOutcome::Completed => &completed,
                ItemOutcome::Skipped => &skipped,
            };
            counter.fetch_add(1, Ordering::Relaxed);
        });

    let completed = completed.into_inner();
    let skipped = skipped.into_inner();
    let cancelled = item_params.len() - completed - skipped;
    if cancelled > 0 {
        info!(remaining = cancelled, "Orientation cancelled");
    }

    BatchSummary {
        completed,
        skipped,
        cancelled,
    }
}

fn orient_item(item: &mut OrientItem<'_>, params: &OrientParams) -> ItemOutcome {
    let outcome = AutoOrienter::prepare(item.mesh, params).process();
    let orientation = MeshOrientation::from_up(outcome.up, outcome.costs);

    if item.mesh.is_empty() {
        warn!(name = %item.name, "Mesh without triangles keeps its pose");
        item.result = Some(orientation);
        return ItemOutcome::Skipped;
    }

    info!(
        name = %item.name,
        axis = ?(orientation.axis.x, orientation.axis.y, orientation.axis.z),
        angle = orientation.angle,
        "Rotation chosen"
    );
    debug!(
        name = %item.name,
        euler = ?(orientation.euler_angles.x, orientation.euler_angles.y, orientation.euler_angles.z),
        "Euler angles"
    );

    item.result = Some(orientation);
    ItemOutcome::Completed
}
