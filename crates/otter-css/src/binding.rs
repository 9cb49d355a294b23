//! Render-loop binding.
//!
//! UI layers typically rebuild their style description on every render.
//! [`StyleBinding`] remembers what it saw last time: the first render
//! creates the styles, later renders only reconcile entries whose
//! resolved description changed, and every render returns the same class
//! names.

use crate::error::Result;
use crate::extend::resolve_extends;
use crate::node::{StyleNode, StyleSheetDesc};
use crate::registry::{ClassNames, StyleRegistry};
use crate::sheet::RuleList;
use otter_common::names::NameGenerator;

/// What the previous render produced.
#[derive(Debug, Clone)]
struct Rendered {
    desc: StyleSheetDesc,
    resolved: Vec<(String, StyleNode)>,
    class_names: ClassNames,
}

impl Rendered {
    fn resolved(&self, entry: &str) -> Option<&StyleNode> {
        self.resolved
            .iter()
            .find(|(name, _)| name == entry)
            .map(|(_, node)| node)
    }
}

/// Per-component style state kept across renders.
#[derive(Debug, Clone, Default)]
pub struct StyleBinding {
    state: Option<Rendered>,
}

impl StyleBinding {
    /// A binding that has not rendered yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { state: None }
    }

    /// Class names from the first render, if there was one.
    #[must_use]
    pub fn class_names(&self) -> Option<&ClassNames> {
        self.state.as_ref().map(|rendered| &rendered.class_names)
    }

    /// Sync `registry`'s sheet with `desc` and return the class names.
    ///
    /// Entries are compared after `extend` resolution, so changing a base
    /// entry also updates every entry that inherits from it. Entries added
    /// after the first render get no class name; entries removed since the
    /// previous render are left as they are in the sheet.
    ///
    /// # Errors
    ///
    /// Errors from [`StyleRegistry::create_style`] on the first render, or
    /// from extend resolution and [`StyleRegistry::update_style`] later.
    /// A failed render keeps the previous state.
    pub fn render<S: RuleList, N: NameGenerator>(
        &mut self,
        registry: &mut StyleRegistry<S, N>,
        desc: &StyleSheetDesc,
    ) -> Result<ClassNames> {
        let Some(previous) = &self.state else {
            let resolved = resolve_extends(desc)?;
            let class_names = registry.create_style(desc)?;
            self.state = Some(Rendered {
                desc: desc.clone(),
                resolved,
                class_names: class_names.clone(),
            });
            return Ok(class_names);
        };

        if previous.desc == *desc {
            return Ok(previous.class_names.clone());
        }

        let resolved = resolve_extends(desc)?;
        for (entry, class_name) in previous.class_names.iter() {
            let Some((_, node)) = resolved.iter().find(|(name, _)| name == entry) else {
                continue;
            };
            if previous.resolved(entry) == Some(node) {
                continue;
            }
            log::debug!(target: "otter::binding", "{entry} changed, updating .{class_name}");
            registry.update_style(class_name, node)?;
        }

        let class_names = previous.class_names.clone();
        self.state = Some(Rendered {
            desc: desc.clone(),
            resolved,
            class_names: class_names.clone(),
        });
        Ok(class_names)
    }
}
