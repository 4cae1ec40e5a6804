//! Collapse/TOC synchronization model.
//!
//! One [`Outline`] value is the authoritative source of truth for collapse
//! state. The in-content headings and the TOC panel are both projections of
//! it: user toggles from either surface go through [`Outline::toggle`], and
//! the DOM/view layers apply the resulting flags one-directionally. Handlers
//! never call the other side's handler, so cross-surface re-entry cannot
//! happen by construction.

pub mod panel;
pub mod reading;

/// One heading of the document plus its mirror row in the TOC.
///
/// `collapsed` is canonical; `hidden` is derived (an entry is hidden iff any
/// entry in its ancestor chain is collapsed) and recomputed after every
/// mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Heading level, 1..=6. Immutable after the scan.
    pub level: u8,
    /// Heading text at scan time; the TOC row label.
    pub label: String,
    /// Whether this heading's scope is collapsed.
    pub collapsed: bool,
    /// Whether this TOC row is hidden because an ancestor is collapsed.
    pub hidden: bool,
}

/// Ordered collapse state for every heading of the page.
///
/// Entries correspond to headings positionally, in document order. Position
/// is the only correlation — two headings with identical text are distinct
/// entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    entries: Vec<Entry>,
}

impl Outline {
    /// Builds the outline from scanned headings. `collapsed` flags may come
    /// from pre-collapsed server-rendered markup and are honored as-is.
    pub fn from_headings<I>(headings: I) -> Self
    where
        I: IntoIterator<Item = (u8, String, bool)>,
    {
        let entries = headings
            .into_iter()
            .map(|(level, label, collapsed)| Entry {
                level: level.clamp(1, 6),
                label,
                collapsed,
                hidden: false,
            })
            .collect();
        let mut outline = Outline {
            entries,
        };
        outline.recompute_hidden();
        outline
    }

    /// Number of headings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the page has no headings at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries in document order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entry at `index`, if the page has that many headings.
    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Canonical toggle: flips the collapsed flag at `index` and recomputes
    /// derived visibility. Returns the new collapsed value, or `None` when
    /// the index does not exist (a normal page variation, never an error).
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let collapsed = !self.entries.get(index)?.collapsed;
        self.set_collapsed(index, collapsed);
        Some(collapsed)
    }

    /// State-set used when one surface syncs the other: applies an already
    /// decided flag without re-invoking any toggle handler. Returns whether
    /// anything changed.
    pub fn set_collapsed(&mut self, index: usize, collapsed: bool) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) if entry.collapsed != collapsed => {
                entry.collapsed = collapsed;
                self.recompute_hidden();
                true
            },
            _ => false,
        }
    }

    /// Exclusive end of the scope of the heading at `index`: the position of
    /// the next heading with an equal-or-shallower level.
    pub fn scope_end(&self, index: usize) -> usize {
        let Some(entry) = self.entries.get(index) else {
            return self.entries.len();
        };
        self.entries
            .iter()
            .enumerate()
            .skip(index + 1)
            .find(|(_, e)| e.level <= entry.level)
            .map(|(i, _)| i)
            .unwrap_or(self.entries.len())
    }

    /// Whether the content directly scoped by the heading at `index` should
    /// be visible: the heading's own row is visible and it is not collapsed.
    pub fn content_visible(&self, index: usize) -> bool {
        self.entries
            .get(index)
            .map(|e| !e.hidden && !e.collapsed)
            .unwrap_or(false)
    }

    /// Recomputes every `hidden` flag from the collapse flags.
    ///
    /// An entry is hidden iff its ancestor chain — the nearest preceding
    /// entry with a shallower level, then that entry's own chain — contains
    /// a collapsed entry at any level. Direct children of a collapsed entry
    /// always follow it; deeper entries additionally require every
    /// intermediate ancestor to be expanded.
    fn recompute_hidden(&mut self) {
        // Stack of (level, effectively_hidden) for the open ancestor chain.
        let mut chain: Vec<(u8, bool)> = Vec::new();
        for i in 0..self.entries.len() {
            let level = self.entries[i].level;
            while chain.last().is_some_and(|&(l, _)| l >= level) {
                chain.pop();
            }
            let hidden = chain.last().is_some_and(|&(_, h)| h);
            self.entries[i].hidden = hidden;
            let scope_hidden = hidden || self.entries[i].collapsed;
            chain.push((level, scope_hidden));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outline(levels: &[u8]) -> Outline {
        Outline::from_headings(
            levels
                .iter()
                .enumerate()
                .map(|(i, &level)| (level, format!("h{i}"), false)),
        )
    }

    fn hidden_rows(o: &Outline) -> Vec<usize> {
        o.entries()
            .iter()
            .enumerate()
            .filter(|(_, e)| e.hidden)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn collapsing_a_level_one_heading_hides_its_whole_scope() {
        // Levels [1,2,2,3,1]: collapsing 0 hides 1,2,3; the level-1 sibling
        // at 4 ends the scope and stays visible.
        let mut o = outline(&[1, 2, 2, 3, 1]);
        o.toggle(0);
        assert_eq!(hidden_rows(&o), vec![1, 2, 3]);
        assert!(!o.entry(4).unwrap().hidden);
    }

    #[test]
    fn collapsing_a_mid_level_heading_hides_only_its_children() {
        // [1,2,3,2,1]: collapsing 1 (level 2) hides only 2 (its level-3
        // child); the level-2 sibling at 3 ends the scope and stays visible.
        let mut o = outline(&[1, 2, 3, 2, 1]);
        o.toggle(1);
        assert_eq!(hidden_rows(&o), vec![2]);
        assert!(!o.entry(3).unwrap().hidden);
    }

    #[test]
    fn equal_level_sibling_ends_the_scope_immediately() {
        // [1,2,2,3,1]: the level-3 heading at 3 is scoped by the SECOND
        // level-2 heading, so collapsing the first one hides nothing; its
        // scope ends right at the equal-level sibling.
        let mut o = outline(&[1, 2, 2, 3, 1]);
        o.toggle(1);
        assert!(hidden_rows(&o).is_empty());
        assert_eq!(o.scope_end(1), 2);
        o.toggle(2);
        assert_eq!(hidden_rows(&o), vec![3]);
    }

    #[test]
    fn expanding_keeps_independently_collapsed_descendants_hidden() {
        let mut o = outline(&[1, 2, 3, 4, 2, 1]);
        o.toggle(2); // collapse the level-3 heading
        o.toggle(0); // collapse the whole level-1 scope
        assert_eq!(hidden_rows(&o), vec![1, 2, 3, 4]);

        o.toggle(0); // expand the level-1 scope again
        // Rows 1 and 2 reappear but the still-collapsed level-3 heading
        // keeps its own child at 3 hidden.
        assert!(!o.entry(1).unwrap().hidden);
        assert!(!o.entry(2).unwrap().hidden);
        assert!(o.entry(2).unwrap().collapsed);
        assert!(!o.entry(4).unwrap().hidden);
        assert_eq!(hidden_rows(&o), vec![3]);
    }

    #[test]
    fn toggle_round_trip_restores_original_state() {
        let mut o = outline(&[1, 2, 3, 2, 4, 1, 2]);
        o.toggle(3);
        let before = o.clone();
        o.toggle(1);
        o.toggle(1);
        assert_eq!(o, before);
    }

    #[test]
    fn toggle_out_of_range_is_a_silent_no_op() {
        let mut o = outline(&[1, 2]);
        let before = o.clone();
        assert_eq!(o.toggle(9), None);
        assert_eq!(o, before);
    }

    #[test]
    fn last_heading_has_an_empty_scope() {
        let mut o = outline(&[1, 2, 3]);
        assert_eq!(o.scope_end(2), 3);
        // Toggling it flips the flag but hides nothing.
        o.toggle(2);
        assert!(o.entry(2).unwrap().collapsed);
        assert!(hidden_rows(&o).is_empty());
    }

    #[test]
    fn deep_entries_need_every_intermediate_ancestor_expanded() {
        // [1,2,3,4]: collapse 2 (level 3) => 3 hidden. Collapse and expand
        // 0: 3 must stay hidden because its level-3 ancestor is collapsed,
        // even though 0 and 1 are expanded.
        let mut o = outline(&[1, 2, 3, 4]);
        o.toggle(2);
        o.toggle(0);
        o.toggle(0);
        assert_eq!(hidden_rows(&o), vec![3]);
        assert!(!o.entry(2).unwrap().hidden);
    }

    #[test]
    fn set_collapsed_is_idempotent() {
        let mut o = outline(&[1, 2]);
        assert!(o.set_collapsed(0, true));
        assert!(!o.set_collapsed(0, true));
        assert_eq!(hidden_rows(&o), vec![1]);
    }

    #[test]
    fn collapsed_flags_never_diverge_between_surfaces() {
        // Heading-side toggles and TOC-side toggles both go through the same
        // store, so after any sequence the flags agree by definition; this
        // pins the invariant against regressions that split the state.
        let mut o = outline(&[1, 2, 2, 3, 1, 2]);
        let sequence = [0usize, 3, 1, 0, 5, 3, 2, 0];
        for &i in &sequence {
            o.toggle(i);
        }
        // Derived hidden flags are consistent with a fresh recompute.
        let rebuilt = Outline::from_headings(
            o.entries()
                .iter()
                .map(|e| (e.level, e.label.clone(), e.collapsed)),
        );
        assert_eq!(o, rebuilt);
    }

    #[test]
    fn pre_collapsed_markup_is_honored_on_build() {
        let o = Outline::from_headings(vec![
            (1, "a".to_string(), true),
            (2, "b".to_string(), false),
            (1, "c".to_string(), false),
        ]);
        assert!(o.entry(0).unwrap().collapsed);
        assert_eq!(hidden_rows(&o), vec![1]);
        assert!(!o.content_visible(0));
        assert!(o.content_visible(2));
    }

    #[test]
    fn content_visibility_tracks_both_own_and_ancestor_state() {
        let mut o = outline(&[1, 2, 3]);
        assert!(o.content_visible(1));
        o.toggle(0);
        // Row 1 is hidden by its ancestor, so its content is not visible
        // even though it is not itself collapsed.
        assert!(!o.content_visible(1));
        o.toggle(0);
        o.toggle(1);
        assert!(!o.content_visible(1));
        assert!(o.content_visible(0));
    }
}
