//! Which font serves which script

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::traits::{FontResolver, MetricsProvider};
use crate::types::ScriptTag;

/// Fonts keyed by script bucket, with a default for everything else
#[derive(Clone, Default)]
pub struct FontSet {
    default: Option<Arc<dyn MetricsProvider>>,
    by_script: HashMap<ScriptTag, Arc<dyn MetricsProvider>>,
}

impl FontSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set where one font serves every script
    pub fn single(font: Arc<dyn MetricsProvider>) -> Self {
        Self {
            default: Some(font),
            by_script: HashMap::new(),
        }
    }

    pub fn set_default(&mut self, font: Arc<dyn MetricsProvider>) {
        self.default = Some(font);
    }

    /// Route one script bucket to a dedicated font
    pub fn insert(&mut self, script: ScriptTag, font: Arc<dyn MetricsProvider>) {
        self.by_script.insert(script, font);
    }

    pub fn with_script(mut self, script: ScriptTag, font: Arc<dyn MetricsProvider>) -> Self {
        self.insert(script, font);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.default.is_none() && self.by_script.is_empty()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Family names of the fonts in this set, default font first
    ///
    /// Script fonts follow in script order; duplicates are dropped.
    pub fn family_names(&self) -> Vec<String> {
        let script_fonts = self
            .scripts()
            .into_iter()
            .filter_map(|script| self.by_script.get(&script).cloned());
        let mut names: Vec<String> = Vec::new();
        for font in self.default.iter().cloned().chain(script_fonts) {
            if let Some(name) = font.family_name() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Script buckets with a dedicated font, sorted
    pub fn scripts(&self) -> Vec<ScriptTag> {
        let mut scripts: Vec<ScriptTag> = self.by_script.keys().copied().collect();
        scripts.sort();
        scripts
    }
}

impl FontResolver for FontSet {
    fn font_for(&self, script: ScriptTag) -> Option<Arc<dyn MetricsProvider>> {
        self.by_script
            .get(&script)
            .or(self.default.as_ref())
            .cloned()
    }
}

impl fmt::Debug for FontSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontSet")
            .field("default", &self.default.is_some())
            .field("scripts", &self.scripts())
            .finish()
    }
}
