//! Render plan for the settings panel
//!
//! Converts a [`ConfigDsl`] plus the live settings into an ordered list of
//! blocks the panel draws top to bottom. Standalone controls are their own
//! block; runs of adjacent groups share one accordion container.

use super::coerce::values_equal;
use super::schema::{ConfigDsl, ControlConfig, LayoutItem};
use serde::Serialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Id of the group synthesized when a DSL carries no layout
pub const IMPLICIT_GROUP_ID: &str = "__all__";

/// Label of the synthesized group
pub const IMPLICIT_GROUP_LABEL: &str = "Settings";

/// A control together with the value the panel should display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedControl {
    pub config: ControlConfig,
    /// Live value, or the control default when no live value exists
    pub value: Value,
    /// Whether the displayed value differs from the control default
    pub modified: bool,
}

/// One collapsible section inside an accordion
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedGroup {
    pub id: String,
    pub label: String,
    pub controls: Vec<ResolvedControl>,
    pub expanded: bool,
}

/// A top-level block of the panel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "camelCase")]
pub enum RenderBlock {
    Standalone(ResolvedControl),
    Accordion(Vec<ResolvedGroup>),
}

/// Ordered blocks for the settings panel
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RenderPlan {
    pub blocks: Vec<RenderBlock>,
}

impl RenderPlan {
    /// Every resolved control in display order
    pub fn controls(&self) -> impl Iterator<Item = &ResolvedControl> + '_ {
        self.blocks.iter().flat_map(|block| {
            let (single, groups): (Option<&ResolvedControl>, &[ResolvedGroup]) = match block {
                RenderBlock::Standalone(control) => (Some(control), &[]),
                RenderBlock::Accordion(groups) => (None, groups.as_slice()),
            };
            single
                .into_iter()
                .chain(groups.iter().flat_map(|g| g.controls.iter()))
        })
    }

    /// Every group in display order
    pub fn groups(&self) -> impl Iterator<Item = &ResolvedGroup> + '_ {
        self.blocks.iter().flat_map(|block| match block {
            RenderBlock::Accordion(groups) => groups.as_slice(),
            RenderBlock::Standalone(_) => &[] as &[ResolvedGroup],
        })
    }

    /// Find a resolved control by id
    pub fn control(&self, id: &str) -> Option<&ResolvedControl> {
        self.controls().find(|c| c.config.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Unit of the layout walk, before segment merging
enum Unit<'a> {
    Standalone(&'a ControlConfig),
    Group {
        id: String,
        label: String,
        controls: Vec<&'a ControlConfig>,
    },
}

/// Resolve a DSL against live settings with every group collapsed
pub fn resolve(dsl: &ConfigDsl, live: &serde_json::Map<String, Value>) -> RenderPlan {
    resolve_with_expanded(dsl, live, &HashSet::new())
}

/// Resolve a DSL against live settings, marking the given groups expanded
pub fn resolve_with_expanded(
    dsl: &ConfigDsl,
    live: &serde_json::Map<String, Value>,
    expanded: &HashSet<String>,
) -> RenderPlan {
    let lookup: HashMap<&str, &ControlConfig> =
        dsl.controls.iter().map(|c| (c.id.as_str(), c)).collect();

    let units = match &dsl.layout {
        Some(layout) => layout_units(layout, &lookup),
        None => vec![Unit::Group {
            id: IMPLICIT_GROUP_ID.to_string(),
            label: IMPLICIT_GROUP_LABEL.to_string(),
            controls: dsl.controls.iter().collect(),
        }],
    };

    let mut blocks: Vec<RenderBlock> = Vec::new();
    for unit in units {
        match unit {
            Unit::Standalone(config) => {
                blocks.push(RenderBlock::Standalone(resolve_control(config, live)));
            }
            Unit::Group {
                id,
                label,
                controls,
            } => {
                let group = ResolvedGroup {
                    expanded: expanded.contains(&id),
                    id,
                    label,
                    controls: controls
                        .into_iter()
                        .map(|c| resolve_control(c, live))
                        .collect(),
                };
                // Adjacent groups share one accordion
                match blocks.last_mut() {
                    Some(RenderBlock::Accordion(groups)) => groups.push(group),
                    _ => blocks.push(RenderBlock::Accordion(vec![group])),
                }
            }
        }
    }

    RenderPlan { blocks }
}

fn layout_units<'a>(
    layout: &[LayoutItem],
    lookup: &HashMap<&str, &'a ControlConfig>,
) -> Vec<Unit<'a>> {
    layout
        .iter()
        .filter_map(|item| match item {
            LayoutItem::Standalone(entry) => match lookup.get(entry.control_id.as_str()).copied() {
                Some(config) => Some(Unit::Standalone(config)),
                None => {
                    tracing::warn!(
                        "Layout references unknown control '{}', dropping it",
                        entry.control_id
                    );
                    None
                }
            },
            LayoutItem::Group(group) => {
                let controls = group
                    .control_ids
                    .iter()
                    .filter_map(|id| {
                        let found = lookup.get(id.as_str()).copied();
                        if found.is_none() {
                            tracing::warn!(
                                "Group '{}' references unknown control '{}', dropping it",
                                group.id,
                                id
                            );
                        }
                        found
                    })
                    .collect();
                Some(Unit::Group {
                    id: group.id.clone(),
                    label: group.label.clone(),
                    controls,
                })
            }
        })
        .collect()
}

/// Resolve the displayed value of one control
pub fn resolve_control(
    config: &ControlConfig,
    live: &serde_json::Map<String, Value>,
) -> ResolvedControl {
    let default = config.default_value();
    let value = live.get(&config.id).cloned().unwrap_or_else(|| default.clone());
    let modified = !values_equal(&config.kind, &value, &default);
    ResolvedControl {
        config: config.clone(),
        value,
        modified,
    }
}
