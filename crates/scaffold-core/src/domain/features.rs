//! Feature bundle discovery and activation.
//!
//! Every top-level section of the defaults document that is not a core
//! section is a *bundle*. A bundle is switched on by a truthy
//! `features.<bundle>` entry in the project document. Disabled bundles are
//! still present in the merged output, but with every leaf replaced by an
//! inert value of the same shape.

use std::collections::BTreeMap;

use serde_yaml::{Number, Value};
use tracing::{debug, instrument};

use crate::domain::document::{Document, deep_merge};

/// Sections that are always copied from defaults, regardless of flags.
pub const CORE_SECTIONS: [&str; 6] = [
    "organization",
    "metadata",
    "build",
    "image",
    "documentation",
    "template",
];

/// Key in the project document holding the feature toggles.
pub const FEATURES_KEY: &str = "features";

pub fn is_core_section(name: &str) -> bool {
    CORE_SECTIONS.contains(&name)
}

/// Names of every bundle in `defaults`, sorted.
pub fn feature_bundles(defaults: &Document) -> Vec<String> {
    let mut bundles: Vec<String> = defaults
        .keys()
        .filter_map(Value::as_str)
        .filter(|key| !is_core_section(key))
        .map(str::to_owned)
        .collect();
    bundles.sort();
    bundles
}

/// Inert replacement for a disabled bundle's value.
///
/// Mappings keep their keys, sequences become empty, booleans become
/// `false`, numbers become `0` and strings are kept. Anything else is null.
pub fn safe_default(value: &Value) -> Value {
    match value {
        Value::Mapping(map) => Value::Mapping(
            map.iter()
                .map(|(k, v)| (k.clone(), safe_default(v)))
                .collect(),
        ),
        Value::Sequence(_) => Value::Sequence(Vec::new()),
        Value::Bool(_) => Value::Bool(false),
        Value::Number(_) => Value::Number(Number::from(0)),
        Value::String(s) => Value::String(s.clone()),
        Value::Null | Value::Tagged(_) => Value::Null,
    }
}

/// Feature toggles read from the project document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    flags: BTreeMap<String, bool>,
    order: Vec<String>,
}

impl FeatureFlags {
    /// Read `features` from the project document.
    ///
    /// A missing or non-mapping `features` key yields an empty set.
    pub fn from_project(project: &Document) -> Self {
        let mut flags = Self::default();
        let Some(Value::Mapping(features)) = project.get(FEATURES_KEY) else {
            return flags;
        };

        for (name, value) in features {
            if let Some(name) = name.as_str() {
                flags.set(name, is_truthy(value));
            }
        }
        flags
    }

    pub fn set(&mut self, name: &str, enabled: bool) {
        if self.flags.insert(name.to_owned(), enabled).is_none() {
            self.order.push(name.to_owned());
        }
    }

    /// Absent flags are disabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    /// Flags in the order they were declared.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.order
            .iter()
            .map(|name| (name.as_str(), self.is_enabled(name)))
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Build the merged document from defaults and the project document.
///
/// 1. Core sections are copied from defaults.
/// 2. Each bundle is copied when its flag is on, otherwise replaced by its
///    [`safe_default`].
/// 3. The whole project document is deep-merged on top.
///
/// Step 3 is unconditional, so values the project supplies for a disabled
/// bundle still reach the output.
#[instrument(skip_all, fields(defaults_keys = defaults.len(), project_keys = project.len()))]
pub fn activate(defaults: &Document, project: &Document) -> Document {
    let flags = FeatureFlags::from_project(project);
    let mut merged = Document::new();

    for section in CORE_SECTIONS {
        if let Some(value) = defaults.get(section) {
            merged.insert(Value::from(section), value.clone());
        }
    }

    // Keys that are neither core sections nor string bundle names pass through.
    for (key, value) in defaults {
        if key.as_str().is_none() {
            merged.insert(key.clone(), value.clone());
        }
    }

    for bundle in feature_bundles(defaults) {
        let Some(value) = defaults.get(bundle.as_str()) else {
            continue;
        };
        let enabled = flags.is_enabled(&bundle);
        debug!(bundle = %bundle, enabled, "Resolving feature bundle");

        let resolved = if enabled {
            value.clone()
        } else {
            safe_default(value)
        };
        merged.insert(Value::from(bundle), resolved);
    }

    deep_merge(&merged, project)
}

/// YAML truthiness, used for feature flag values.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}
