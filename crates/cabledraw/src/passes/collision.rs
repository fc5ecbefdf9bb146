//! Label placement and overlap resolution.
//!
//! Labels are placed in two stages.
//!
//! 1. **Anchor placement.** Each label gets a base position from its anchor
//!    feature plus its own offset, independent of every other label.
//! 2. **Overlap resolution.** Each label occupies a box (its own width and
//!    height, or the configured default) centered on its position. Boxes that
//!    intersect are pushed apart along one axis by the minimum distance that
//!    separates them, split evenly between the two labels. Connector labels
//!    prefer to stack vertically, cable and dimension labels prefer to spread
//!    horizontally; a pair that disagrees separates along its axis of least
//!    penetration.
//!
//! Pairs are visited in ascending `(lower index, higher index)` order and each
//! push applies immediately, so the outcome depends only on the input. When
//! two labels sit exactly on top of each other along the chosen axis, the
//! lower index stays put and the higher index moves right or down.
//!
//! Boxes that merely touch do not intersect and are left alone. Every push
//! lands on the two-decimal output grid, so the positions that were checked
//! are exactly the positions that get reported.
//!
//! If overlaps survive the iteration cap, each connected group of labels
//! still in conflict is stacked vertically in index order below its lowest
//! index and a [`RenderWarning::CollisionFallback`] is reported per group.
//! The render never fails because of overlaps.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace, warn};
use serde::Serialize;

use cabledraw_core::{
    design::{Anchor, Label},
    geometry::{Axis, Bounds, Point, Size, round2},
};

use super::{Pass, TopologyResult};
use crate::{
    config::CollisionConfig,
    context::RenderContext,
    error::{RenderError, RenderWarning},
};

/// Distance labels are pushed beyond touching. Kept well above the 0.01
/// that snapping both labels to the output grid can take away.
const CLEARANCE: f64 = 0.05;

/// A label with its final position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustedLabel<'a> {
    /// The label exactly as it appears in the design
    pub original: &'a Label,
    pub x: f64,
    pub y: f64,
}

impl AdjustedLabel<'_> {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Final label positions, one per design label in design order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollisionResult<'a> {
    pub adjusted_labels: Vec<AdjustedLabel<'a>>,
    #[serde(skip)]
    pub warnings: Vec<RenderWarning>,
}

/// Positions labels relative to their anchors and resolves overlaps.
#[derive(Debug, Clone, Default)]
pub struct CollisionPass {
    config: CollisionConfig,
}

impl CollisionPass {
    pub fn new(config: CollisionConfig) -> Self {
        Self { config }
    }

    /// Returns the footprint used for a label during resolution
    pub fn footprint(&self, label: &Label) -> Size {
        let default = self.config.label_size();
        Size::new(
            label.width().unwrap_or(default.width()),
            label.height().unwrap_or(default.height()),
        )
    }
}

impl Pass for CollisionPass {
    type Output<'a> = CollisionResult<'a>;

    fn name(&self) -> &'static str {
        "collision"
    }

    fn run<'a>(&self, ctx: &RenderContext<'a>) -> Result<CollisionResult<'a>, RenderError> {
        let topology = ctx.topology(self.name())?;
        let labels = ctx.design().labels();

        let mut placed = labels
            .iter()
            .enumerate()
            .map(|(index, label)| self.place(index, label, topology))
            .collect::<Result<Vec<_>, _>>()?;

        let mut warnings = Vec::new();
        match resolve_overlaps(&mut placed, self.config.max_iterations()) {
            Resolution::Resolved { iterations } => {
                debug!(labels = placed.len(), iterations; "Label overlaps resolved");
            }
            Resolution::Unresolved { iterations, groups } => {
                for group in groups {
                    stack_vertically(&mut placed, &group);
                    let warning = RenderWarning::CollisionFallback {
                        labels: group,
                        iterations,
                    };
                    warn!(iterations; "{warning}");
                    warnings.push(warning);
                }
            }
        }

        if let Some(index) = placed.iter().position(|label| !label.center.is_finite()) {
            return Err(RenderError::InvalidInput(format!(
                "label {index} footprint is too large to place"
            )));
        }

        let adjusted_labels = labels
            .iter()
            .zip(&placed)
            .map(|(original, label)| {
                let position = label.center.rounded();
                AdjustedLabel {
                    original,
                    x: position.x(),
                    y: position.y(),
                }
            })
            .collect();

        Ok(CollisionResult {
            adjusted_labels,
            warnings,
        })
    }
}

impl CollisionPass {
    /// Stage 1: base position and footprint of a single label.
    fn place(
        &self,
        index: usize,
        label: &Label,
        topology: &TopologyResult,
    ) -> Result<PlacedLabel, RenderError> {
        let anchor = label
            .anchor()
            .map_err(|err| RenderError::InvalidAnchor { index, anchor: err.0 })?;

        let offset = Point::new(label.offset_x(), label.offset_y());
        if !offset.is_finite() {
            return Err(RenderError::InvalidInput(format!(
                "label {index} has a non-finite offset"
            )));
        }

        let size = self.footprint(label);
        let valid_extent = |v: f64| v.is_finite() && v >= 0.0;
        if !valid_extent(size.width()) || !valid_extent(size.height()) {
            return Err(RenderError::InvalidInput(format!(
                "label {index} footprint {}x{} must be finite and non-negative",
                size.width(),
                size.height()
            )));
        }

        let center = anchor_point(anchor, topology).add_point(offset).rounded();
        trace!(index, anchor = anchor.as_str(), x = center.x(), y = center.y(); "Label placed");

        Ok(PlacedLabel {
            anchor,
            center,
            size,
        })
    }
}

/// The point a label sits at before its own offset is applied.
fn anchor_point(anchor: Anchor, topology: &TopologyResult) -> Point {
    let TopologyResult {
        end_a,
        end_b,
        cable_region: cable,
    } = topology;

    match anchor {
        Anchor::EndA => Point::new(end_a.x(), end_a.y() - 5.0),
        Anchor::EndB => Point::new(end_b.x(), end_b.y() - 5.0),
        Anchor::Cable => Point::new(cable.center_x(), cable.y() - 10.0),
        Anchor::Dimension => Point::new(cable.center_x(), cable.bottom() + 20.0),
    }
}

#[derive(Debug, Clone, Copy)]
struct PlacedLabel {
    anchor: Anchor,
    center: Point,
    size: Size,
}

impl PlacedLabel {
    /// Penetration depth with `other` along `axis`; negative when apart.
    fn penetration(&self, other: &PlacedLabel, axis: Axis) -> f64 {
        (self.size.along(axis) + other.size.along(axis)) / 2.0
            - (other.center.along(axis) - self.center.along(axis)).abs()
    }

    fn bounds(&self) -> Bounds {
        self.center.to_bounds(self.size)
    }

    /// True when the interiors of the two boxes intersect. Touching edges
    /// do not collide.
    fn collides(&self, other: &PlacedLabel) -> bool {
        self.bounds().intersects(&other.bounds())
    }
}

#[derive(Debug, PartialEq)]
enum Resolution {
    Resolved { iterations: usize },
    Unresolved {
        iterations: usize,
        groups: Vec<Vec<usize>>,
    },
}

/// Stage 2: iteratively push colliding pairs apart.
fn resolve_overlaps(labels: &mut [PlacedLabel], max_iterations: usize) -> Resolution {
    let mut iterations = 0;

    while iterations < max_iterations {
        let mut collided = false;

        for i in 0..labels.len() {
            for j in (i + 1)..labels.len() {
                if labels[i].collides(&labels[j]) {
                    collided = true;
                    separate(labels, i, j);
                }
            }
        }

        if !collided {
            return Resolution::Resolved { iterations };
        }
        iterations += 1;
    }

    let groups = conflict_groups(labels);
    if groups.is_empty() {
        Resolution::Resolved { iterations }
    } else {
        Resolution::Unresolved { iterations, groups }
    }
}

/// Pushes labels `i < j` apart by the minimum translation along one axis.
fn separate(labels: &mut [PlacedLabel], i: usize, j: usize) {
    let (a, b) = (labels[i], labels[j]);
    let axis = separation_axis(&a, &b);
    let distance = a.penetration(&b, axis) + CLEARANCE;
    let delta = b.center.along(axis) - a.center.along(axis);

    if delta == 0.0 {
        labels[j].center = b.center.shift(axis, distance).rounded();
    } else {
        let half = distance.copysign(delta) / 2.0;
        labels[i].center = a.center.shift(axis, -half).rounded();
        labels[j].center = b.center.shift(axis, half).rounded();
    }
}

fn separation_axis(a: &PlacedLabel, b: &PlacedLabel) -> Axis {
    let preferred = a.anchor.preferred_axis();
    if preferred == b.anchor.preferred_axis() {
        return preferred;
    }

    if a.penetration(b, Axis::Horizontal) < a.penetration(b, Axis::Vertical) {
        Axis::Horizontal
    } else {
        Axis::Vertical
    }
}

/// Labels that still collide, split into connected groups. Each group is
/// ascending and groups are ordered by their lowest index.
fn conflict_groups(labels: &[PlacedLabel]) -> Vec<Vec<usize>> {
    let mut neighbors: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for i in 0..labels.len() {
        for j in (i + 1)..labels.len() {
            if labels[i].collides(&labels[j]) {
                neighbors.entry(i).or_default().push(j);
                neighbors.entry(j).or_default().push(i);
            }
        }
    }

    let mut visited = BTreeSet::new();
    let mut groups = Vec::new();
    for &start in neighbors.keys() {
        if !visited.insert(start) {
            continue;
        }

        let mut group = BTreeSet::from([start]);
        let mut pending = vec![start];
        while let Some(index) = pending.pop() {
            for &next in &neighbors[&index] {
                if visited.insert(next) {
                    group.insert(next);
                    pending.push(next);
                }
            }
        }
        groups.push(group.into_iter().collect());
    }
    groups
}

/// Fallback: stack `group` (ascending indices) one box height apart below
/// its first label.
fn stack_vertically(labels: &mut [PlacedLabel], group: &[usize]) {
    let Some((&first, rest)) = group.split_first() else {
        return;
    };

    let mut previous = labels[first];
    for &index in rest {
        let label = &mut labels[index];
        let y = previous.center.y()
            + previous.size.height() / 2.0
            + label.size.height() / 2.0
            + CLEARANCE;
        label.center = Point::new(previous.center.x(), round2(y));
        previous = *label;
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use cabledraw_core::{
        design::{CableDesign, Dimensions},
        geometry::{Bounds, Rect},
        viewport::Viewport,
    };

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn anchor_strategy() -> impl Strategy<Value = Anchor> {
        prop_oneof![
            Just(Anchor::EndA),
            Just(Anchor::EndB),
            Just(Anchor::Cable),
            Just(Anchor::Dimension),
        ]
    }

    fn label_strategy() -> impl Strategy<Value = Label> {
        (
            anchor_strategy(),
            -30.0f64..30.0,
            -30.0f64..30.0,
            prop::option::of((1.0f64..60.0, 1.0f64..12.0)),
        )
            .prop_map(|(anchor, ox, oy, footprint)| {
                let label = Label::new(anchor).with_offset(ox, oy);
                match footprint {
                    Some((w, h)) => label.with_footprint(w, h),
                    None => label,
                }
            })
    }

    fn design_strategy() -> impl Strategy<Value = CableDesign> {
        prop::collection::vec(label_strategy(), 0..12).prop_map(|labels| {
            labels
                .into_iter()
                .fold(CableDesign::new(Dimensions::new(150.0, 2.0)), |d, l| {
                    d.with_label(l)
                })
        })
    }

    fn context(design: &CableDesign) -> RenderContext<'_> {
        RenderContext::new(design, Viewport::new(0.0, 0.0, 400.0, 100.0)).with_topology(
            TopologyResult {
                end_a: Rect::new(40.0, 35.0, 20.0, 15.0),
                end_b: Rect::new(340.0, 35.0, 20.0, 15.0),
                cable_region: Rect::new(60.0, 30.0, 280.0, 40.0),
            },
        )
    }

    // ===================
    // Property Test Functions
    // ===================

    /// One entry per label, in order, each pointing at its own label.
    fn check_order_preserved(design: CableDesign) -> Result<(), TestCaseError> {
        let result = CollisionPass::default().run(&context(&design)).unwrap();

        prop_assert_eq!(result.adjusted_labels.len(), design.labels().len());
        for (adjusted, original) in result.adjusted_labels.iter().zip(design.labels()) {
            prop_assert!(std::ptr::eq(adjusted.original, original));
        }
        Ok(())
    }

    /// Labels outside the fallback group never overlap.
    fn check_no_overlap_outside_fallback(design: CableDesign) -> Result<(), TestCaseError> {
        let pass = CollisionPass::default();
        let result = pass.run(&context(&design)).unwrap();

        let stacked: BTreeSet<usize> = result
            .warnings
            .iter()
            .flat_map(|RenderWarning::CollisionFallback { labels, .. }| labels.iter().copied())
            .collect();

        let bounds: Vec<Bounds> = result
            .adjusted_labels
            .iter()
            .map(|label| label.position().to_bounds(pass.footprint(label.original)))
            .collect();

        for i in 0..bounds.len() {
            for j in (i + 1)..bounds.len() {
                if stacked.contains(&i) || stacked.contains(&j) {
                    continue;
                }
                prop_assert!(
                    bounds[i].overlap(&bounds[j]).is_none(),
                    "labels {} and {} overlap",
                    i,
                    j
                );
            }
        }
        Ok(())
    }

    /// Output coordinates carry at most two decimals.
    fn check_coordinates_rounded(design: CableDesign) -> Result<(), TestCaseError> {
        let result = CollisionPass::default().run(&context(&design)).unwrap();

        for label in &result.adjusted_labels {
            prop_assert!(label.x.is_finite() && label.y.is_finite());
            prop_assert_eq!(round2(label.x), label.x);
            prop_assert_eq!(round2(label.y), label.y);
        }
        Ok(())
    }

    /// Running twice gives identical positions.
    fn check_deterministic(design: CableDesign) -> Result<(), TestCaseError> {
        let pass = CollisionPass::default();
        let first = pass.run(&context(&design)).unwrap();
        let second = pass.run(&context(&design)).unwrap();
        prop_assert_eq!(first, second);
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn order_preserved(design in design_strategy()) {
            check_order_preserved(design)?;
        }

        #[test]
        fn no_overlap_outside_fallback(design in design_strategy()) {
            check_no_overlap_outside_fallback(design)?;
        }

        #[test]
        fn coordinates_rounded(design in design_strategy()) {
            check_coordinates_rounded(design)?;
        }

        #[test]
        fn deterministic(design in design_strategy()) {
            check_deterministic(design)?;
        }
    }
}
