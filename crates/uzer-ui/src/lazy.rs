//! Windowed lists.
//!
//! A lazy list only builds the items whose slots intersect the viewport,
//! plus [`BUFFER`] slots on either side. Skipped slots are replaced by one
//! leading and one trailing spacer so the content keeps its full extent and
//! the scroll range does not jump as items come and go.
//!
//! Items are assumed to share one main-axis extent (`item_extent_dp`); it
//! only drives the window math, real item sizes come from layout.

use std::cell::Cell;
use std::ops::Range;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use uzer_core::*;

/// Slots built beyond each edge of the viewport.
pub const BUFFER: usize = 2;

/// Viewport assumed until the first layout reports the real one.
pub const DEFAULT_VIEWPORT_PX: f32 = 600.0;

static NEXT_STATE_ID: AtomicU64 = AtomicU64::new(1);

/// Scroll position of a lazy list. All values are px along the list axis.
pub struct LazyListState {
    id: u64,
    offset: Cell<f32>,
    viewport: Cell<f32>,
    content: Cell<f32>,
}

impl Default for LazyListState {
    fn default() -> Self {
        Self::new()
    }
}

impl LazyListState {
    pub fn new() -> Self {
        Self {
            id: NEXT_STATE_ID.fetch_add(1, Ordering::Relaxed),
            offset: Cell::new(0.0),
            viewport: Cell::new(DEFAULT_VIEWPORT_PX),
            content: Cell::new(0.0),
        }
    }

    /// Stable identity, used to key item scopes.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn offset(&self) -> f32 {
        self.offset.get()
    }

    pub fn viewport(&self) -> f32 {
        self.viewport.get()
    }

    pub fn content(&self) -> f32 {
        self.content.get()
    }

    fn max_offset(&self) -> f32 {
        (self.content.get() - self.viewport.get()).max(0.0)
    }

    fn clamp(&self) {
        let o = self.offset.get().clamp(0.0, self.max_offset());
        self.offset.set(o);
    }

    pub fn set_viewport(&self, px: f32) {
        self.viewport.set(px.max(0.0));
        self.clamp();
    }

    pub fn set_content(&self, px: f32) {
        self.content.set(px.max(0.0));
        self.clamp();
    }

    /// Consume `delta` px, clamped to `[0, content - viewport]`. Returns the
    /// part that could not be consumed, for an enclosing scroller.
    pub fn scroll_by(&self, delta: f32) -> f32 {
        let before = self.offset.get();
        let after = (before + delta).clamp(0.0, self.max_offset());
        self.offset.set(after);
        let consumed = after - before;
        if consumed != 0.0 {
            log::debug!(
                "lazy list {}: offset {:.1} -> {:.1} (max {:.1})",
                self.id,
                before,
                after,
                self.max_offset()
            );
        }
        delta - consumed
    }

    /// Slots to build for `count` items spaced `stride` px apart.
    pub fn visible_range(&self, count: usize, stride: f32) -> Range<usize> {
        if count == 0 || stride <= 0.0 {
            return 0..0;
        }
        let o = self.offset.get();
        let v = self.viewport.get();
        let first = (o / stride).floor().max(0.0) as usize;
        let last = ((o + v) / stride).ceil().max(0.0) as usize;

        let end = (last + BUFFER).min(count);
        let start = first.saturating_sub(BUFFER).min(end);
        start..end
    }
}

/// Vertically scrolling list that builds only the visible items.
///
/// `modifier.spacing` is the gap between items; the rest of the modifier
/// applies to the viewport.
pub fn LazyColumn(
    count: usize,
    item_extent_dp: f32,
    state: Rc<LazyListState>,
    modifier: Modifier,
    item_builder: impl Fn(usize) -> View,
) -> View {
    lazy_list(
        Axis::Vertical,
        count,
        item_extent_dp,
        state,
        modifier,
        item_builder,
    )
}

/// Horizontally scrolling list that builds only the visible items.
pub fn LazyRow(
    count: usize,
    item_extent_dp: f32,
    state: Rc<LazyListState>,
    modifier: Modifier,
    item_builder: impl Fn(usize) -> View,
) -> View {
    lazy_list(
        Axis::Horizontal,
        count,
        item_extent_dp,
        state,
        modifier,
        item_builder,
    )
}

fn spacer(axis: Axis, extent_dp: f32) -> View {
    let m = match axis {
        Axis::Horizontal => Modifier::new().width(extent_dp),
        Axis::Vertical => Modifier::new().height(extent_dp),
    };
    crate::Box(m.flex_shrink(0.0))
}

fn lazy_list(
    axis: Axis,
    count: usize,
    item_extent_dp: f32,
    state: Rc<LazyListState>,
    modifier: Modifier,
    item_builder: impl Fn(usize) -> View,
) -> View {
    let gap_dp = modifier.spacing.unwrap_or(0.0);
    let stride_dp = item_extent_dp + gap_dp;
    let window = state.visible_range(count, dp_to_px(stride_dp));
    log::trace!(
        "lazy list {}: building {:?} of {} (offset {:.1}px)",
        state.id(),
        window,
        count,
        state.offset()
    );

    let mut children = Vec::with_capacity(window.len() + 2);
    if window.start > 0 {
        children.push(spacer(axis, window.start as f32 * stride_dp - gap_dp));
    }
    for i in window.clone() {
        children.push(key(format!("lazy{}:{i}", state.id()), || item_builder(i)));
    }
    if window.end < count {
        children.push(spacer(
            axis,
            (count - window.end) as f32 * stride_dp - gap_dp,
        ));
    }

    let content_modifier = Modifier::new().spaced_by(gap_dp).flex_shrink(0.0);
    let content = match axis {
        Axis::Horizontal => crate::Row(content_modifier),
        Axis::Vertical => crate::Column(content_modifier),
    }
    .with_children(children);

    let on_scroll: ScrollCallback = {
        let st = state.clone();
        Rc::new(move |d: Vec2| d.with_along(axis, st.scroll_by(d.along(axis))))
    };
    let set_viewport: ExtentCallback = {
        let st = state.clone();
        Rc::new(move |px| st.set_viewport(px))
    };
    let set_content: ExtentCallback = {
        let st = state.clone();
        Rc::new(move |px| st.set_content(px))
    };
    let get_offset: OffsetGetter = Rc::new(move || state.offset());

    View::new(
        0,
        ViewKind::Scroll {
            axis,
            on_scroll: Some(on_scroll),
            set_viewport_extent: Some(set_viewport),
            set_content_extent: Some(set_content),
            get_scroll_offset: Some(get_offset),
        },
    )
    .modifier(Modifier {
        spacing: None,
        ..modifier
    })
    .with_children(vec![content])
}
