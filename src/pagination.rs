use std::ops::RangeInclusive;

use serde::Serialize;

/// Number of page buttons shown around the current page.
pub const WINDOW_SIZE: usize = 5;

/// Total number of pages, never less than one.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Contiguous run of page numbers centered on `page`.
///
/// The window is `min(WINDOW_SIZE, pages)` wide and shifts left near the end
/// so that the last pages stay visible.
pub fn page_window(page: usize, pages: usize) -> RangeInclusive<usize> {
    let mut start = page.saturating_sub(WINDOW_SIZE / 2).max(1);
    let end = pages.min(start.saturating_add(WINDOW_SIZE - 1));
    if end.saturating_add(1).saturating_sub(start) < WINDOW_SIZE {
        start = end.saturating_sub(WINDOW_SIZE - 1).max(1);
    }
    start..=end
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    First,
    Prev,
    Page,
    Next,
    Last,
}

/// One button of the pagination bar.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PageControl {
    pub kind: ControlKind,
    pub label: String,
    /// Page requested when the control is clicked.
    pub target: usize,
    pub disabled: bool,
    pub active: bool,
    /// Jump link, present only for enabled controls once bound.
    pub href: Option<String>,
}

impl PageControl {
    fn new(kind: ControlKind, label: impl Into<String>, target: usize, disabled: bool) -> Self {
        Self {
            kind,
            label: label.into(),
            target,
            disabled,
            active: false,
            href: None,
        }
    }
}

/// Stateless pagination bar computed from `{total, page, page_size}`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PaginationBar {
    pub page: usize,
    pub pages: usize,
    pub total: usize,
    pub controls: Vec<PageControl>,
    pub summary: String,
}

impl PaginationBar {
    pub fn new(total: usize, page: usize, page_size: usize) -> Self {
        let page = if page == 0 { 1 } else { page };
        let pages = total_pages(total, page_size);
        let at_start = page == 1;
        let at_end = page == pages;

        let mut controls = Vec::with_capacity(WINDOW_SIZE + 4);
        controls.push(PageControl::new(ControlKind::First, "« First", 1, at_start));
        controls.push(PageControl::new(
            ControlKind::Prev,
            "‹ Prev",
            page.saturating_sub(1).clamp(1, pages),
            at_start,
        ));
        controls.extend(page_window(page, pages).map(|number| PageControl {
            active: number == page,
            ..PageControl::new(ControlKind::Page, number.to_string(), number, false)
        }));
        controls.push(PageControl::new(
            ControlKind::Next,
            "Next ›",
            pages.min(page.saturating_add(1)),
            at_end,
        ));
        controls.push(PageControl::new(ControlKind::Last, "Last »", pages, at_end));

        Self {
            page,
            pages,
            total,
            controls,
            summary: format!("Page {page} of {pages} • {total} books"),
        }
    }

    /// Attaches a jump link to every enabled control.
    #[must_use]
    pub fn bind<F>(mut self, mut on_jump: F) -> Self
    where
        F: FnMut(usize) -> Option<String>,
    {
        for control in self.controls.iter_mut().filter(|c| !c.disabled) {
            control.href = on_jump(control.target);
        }
        self
    }

    /// Numbered buttons only.
    pub fn window(&self) -> impl Iterator<Item = &PageControl> {
        self.controls
            .iter()
            .filter(|c| c.kind == ControlKind::Page)
    }

    pub fn control(&self, kind: ControlKind) -> Option<&PageControl> {
        self.controls.iter().find(|c| c.kind == kind)
    }
}
