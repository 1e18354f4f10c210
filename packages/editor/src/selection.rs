//! Canvas UI state that lives alongside the document but outside history

use crate::config::ZoomConfig;
use blockcraft_document::{BlockId, Breakpoint};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InserterState {
    pub open: bool,
    pub search_term: String,
}

/// Selection, inserter, preview flag, device and zoom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorUiState {
    /// Selected blocks in selection order; the last one is primary
    selected: Vec<BlockId>,
    focused: Option<BlockId>,
    inserter: InserterState,
    preview: bool,
    device: Breakpoint,
    zoom: f64,
    #[serde(skip)]
    zoom_limits: ZoomConfig,
}

impl Default for EditorUiState {
    fn default() -> Self {
        Self::new(Breakpoint::default(), ZoomConfig::default())
    }
}

impl EditorUiState {
    pub fn new(device: Breakpoint, zoom_limits: ZoomConfig) -> Self {
        Self {
            selected: Vec::new(),
            focused: None,
            inserter: InserterState::default(),
            preview: false,
            device,
            zoom: zoom_limits.clamp(1.0),
            zoom_limits,
        }
    }

    // ---- selection ----

    pub fn selected(&self) -> &[BlockId] {
        &self.selected
    }

    pub fn primary_selection(&self) -> Option<&BlockId> {
        self.selected.last()
    }

    pub fn is_selected(&self, id: &BlockId) -> bool {
        self.selected.contains(id)
    }

    /// Replace the selection with `id`
    pub fn select(&mut self, id: BlockId) {
        self.selected.clear();
        self.selected.push(id);
    }

    pub fn add_to_selection(&mut self, id: BlockId) {
        if !self.selected.contains(&id) {
            self.selected.push(id);
        }
    }

    /// Add or remove `id`. Returns whether it is selected afterwards.
    pub fn toggle_selection(&mut self, id: BlockId) -> bool {
        match self.selected.iter().position(|s| s == &id) {
            Some(pos) => {
                self.selected.remove(pos);
                false
            }
            None => {
                self.selected.push(id);
                true
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.focused = None;
    }

    pub fn focused(&self) -> Option<&BlockId> {
        self.focused.as_ref()
    }

    pub fn focus(&mut self, id: Option<BlockId>) {
        self.focused = id;
    }

    /// Drop selected and focused ids that fail `exists`.
    /// Returns true if anything changed.
    pub fn prune(&mut self, exists: impl Fn(&BlockId) -> bool) -> bool {
        let before = self.selected.len();
        self.selected.retain(|id| exists(id));
        let mut changed = before != self.selected.len();

        if self.focused.as_ref().is_some_and(|id| !exists(id)) {
            self.focused = None;
            changed = true;
        }
        changed
    }

    // ---- inserter ----

    pub fn inserter(&self) -> &InserterState {
        &self.inserter
    }

    pub fn open_inserter(&mut self, search_term: impl Into<String>) {
        self.inserter.open = true;
        self.inserter.search_term = search_term.into();
    }

    pub fn set_inserter_search(&mut self, search_term: impl Into<String>) {
        self.inserter.search_term = search_term.into();
    }

    pub fn close_inserter(&mut self) {
        self.inserter = InserterState::default();
    }

    // ---- preview / device / zoom ----

    pub fn is_preview(&self) -> bool {
        self.preview
    }

    /// Flip preview mode. Entering preview closes the inserter.
    pub fn toggle_preview(&mut self) -> bool {
        self.preview = !self.preview;
        if self.preview {
            self.close_inserter();
        }
        self.preview
    }

    pub fn device(&self) -> Breakpoint {
        self.device
    }

    pub fn set_device(&mut self, device: Breakpoint) {
        self.device = device;
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        self.zoom = self.zoom_limits.clamp(zoom);
        self.zoom
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.set_zoom(self.zoom + self.zoom_limits.step)
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.set_zoom(self.zoom - self.zoom_limits.step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_replaces() {
        let mut ui = EditorUiState::default();
        ui.select("a".into());
        ui.select("b".into());
        assert_eq!(ui.selected(), &[BlockId::from("b")]);
    }

    #[test]
    fn test_toggle_selection() {
        let mut ui = EditorUiState::default();
        assert!(ui.toggle_selection("a".into()));
        assert!(ui.toggle_selection("b".into()));
        assert_eq!(ui.primary_selection(), Some(&BlockId::from("b")));
        assert!(!ui.toggle_selection("a".into()));
        assert_eq!(ui.selected(), &[BlockId::from("b")]);
    }

    #[test]
    fn test_prune_drops_missing() {
        let mut ui = EditorUiState::default();
        ui.select("a".into());
        ui.add_to_selection("b".into());
        ui.focus(Some("b".into()));

        assert!(ui.prune(|id| id == "a"));
        assert_eq!(ui.selected(), &[BlockId::from("a")]);
        assert_eq!(ui.focused(), None);
        assert!(!ui.prune(|id| id == "a"));
    }

    #[test]
    fn test_preview_closes_inserter() {
        let mut ui = EditorUiState::default();
        ui.open_inserter("head");
        assert!(ui.inserter().open);

        assert!(ui.toggle_preview());
        assert_eq!(ui.inserter(), &InserterState::default());
        assert!(!ui.toggle_preview());
    }

    #[test]
    fn test_zoom_steps_are_clamped() {
        let mut ui = EditorUiState::new(Breakpoint::Tablet, ZoomConfig::default());
        assert_eq!(ui.zoom(), 1.0);
        assert_eq!(ui.zoom_in(), 1.25);
        for _ in 0..10 {
            ui.zoom_in();
        }
        assert_eq!(ui.zoom(), 2.0);
        assert_eq!(ui.set_zoom(0.01), 0.25);
        assert_eq!(ui.device(), Breakpoint::Tablet);
    }
}
