//! Dense lookup tables rebuilt by one pass over the layers.

/// Settled mapping between physical, visual and renderable indexes of one axis.
#[derive(Debug, Clone, Default)]
pub(crate) struct IndexCache {
    pub(crate) visual_to_physical: Vec<usize>,
    pub(crate) physical_to_visual: Vec<Option<usize>>,
    pub(crate) renderable_to_visual: Vec<usize>,
    pub(crate) renderable_to_physical: Vec<usize>,
    pub(crate) visual_to_renderable: Vec<Option<usize>>,
    pub(crate) trimmed: Vec<bool>,
    pub(crate) hidden: Vec<bool>,
}

impl IndexCache {
    /// Builds the tables from a full physical sequence and the combined flags.
    ///
    /// `sequence` lists every physical index in ordering-layer order; trimmed
    /// entries are skipped when numbering visual slots and hidden entries are
    /// skipped when numbering renderable slots.
    pub(crate) fn build(sequence: &[usize], trimmed: Vec<bool>, hidden: Vec<bool>) -> Self {
        let len = trimmed.len();
        let mut visual_to_physical = Vec::with_capacity(len);
        let mut physical_to_visual = vec![None; len];

        for &physical in sequence {
            if trimmed.get(physical).copied().unwrap_or(true) {
                continue;
            }
            if let Some(slot) = physical_to_visual.get_mut(physical) {
                *slot = Some(visual_to_physical.len());
            }
            visual_to_physical.push(physical);
        }

        let mut renderable_to_visual = Vec::with_capacity(visual_to_physical.len());
        let mut renderable_to_physical = Vec::with_capacity(visual_to_physical.len());
        let mut visual_to_renderable = vec![None; visual_to_physical.len()];

        for (visual, &physical) in visual_to_physical.iter().enumerate() {
            if hidden.get(physical).copied().unwrap_or(false) {
                continue;
            }
            if let Some(slot) = visual_to_renderable.get_mut(visual) {
                *slot = Some(renderable_to_visual.len());
            }
            renderable_to_visual.push(visual);
            renderable_to_physical.push(physical);
        }

        Self {
            visual_to_physical,
            physical_to_visual,
            renderable_to_visual,
            renderable_to_physical,
            visual_to_renderable,
            trimmed,
            hidden,
        }
    }

    pub(crate) fn count_visual(&self) -> usize {
        self.visual_to_physical.len()
    }

    pub(crate) fn count_renderable(&self) -> usize {
        self.renderable_to_visual.len()
    }

    pub(crate) fn is_visual_hidden(&self, visual: usize) -> Option<bool> {
        self.visual_to_physical
            .get(visual)
            .map(|&physical| self.hidden.get(physical).copied().unwrap_or(false))
    }
}
