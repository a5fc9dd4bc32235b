//! Flexbox layout over taffy and painting into a [`Scene`].
//!
//! All modifier lengths are dp and converted with the current [`Density`];
//! text sizes are sp and additionally scaled by [`TextScale`]. Everything
//! leaving this module is px.

use std::collections::HashMap;

use taffy::style_helpers::{length, percent};
use taffy::{
    AvailableSpace, Display, FlexDirection, JustifyContent, NodeId, Overflow, Point, Style,
    TaffyError, TaffyTree,
};
use uzer_core::*;
use uzer_text::LineStyle;

#[derive(Clone, Debug)]
enum NodeCtx {
    Text { text: String, line: LineStyle },
    Container,
}

/// Lay out `root` in a `size_px` window and paint it.
///
/// Returns the scene, the scroll hit regions (outermost first) and the
/// semantics nodes in tree order.
pub fn layout_and_paint(root: &View, size_px: (u32, u32)) -> LayoutOutput {
    match layout_and_paint_inner(root, size_px) {
        Ok(out) => out,
        Err(e) => {
            log::error!("layout failed: {e}");
            (
                Scene {
                    clear_color: theme().background,
                    nodes: vec![],
                },
                vec![],
                vec![],
            )
        }
    }
}

fn line_style(style: &TextStyle) -> LineStyle {
    LineStyle {
        size_px: sp_to_px(style.font_size),
        line_height_px: sp_to_px(style.line_height),
        weight: style.weight.0,
        letter_spacing_px: sp_to_px(style.letter_spacing),
    }
}

/// Main axis of a container kind; `None` for leaves and plain boxes.
fn main_axis(kind: &ViewKind) -> Option<Axis> {
    match kind {
        ViewKind::Row => Some(Axis::Horizontal),
        ViewKind::Column | ViewKind::Surface => Some(Axis::Vertical),
        ViewKind::Scroll { axis, .. } => Some(*axis),
        _ => None,
    }
}

fn edges<T: taffy::style_helpers::FromLength>(p: PaddingValues) -> taffy::Rect<T> {
    taffy::Rect {
        left: length(dp_to_px(p.left)),
        right: length(dp_to_px(p.right)),
        top: length(dp_to_px(p.top)),
        bottom: length(dp_to_px(p.bottom)),
    }
}

fn style_from_modifier(m: &Modifier, kind: &ViewKind) -> Style {
    let px = dp_to_px;
    let mut s = Style {
        display: Display::Flex,
        ..Style::default()
    };
    let axis = main_axis(kind);

    s.flex_direction = match axis {
        Some(Axis::Horizontal) => FlexDirection::Row,
        _ => FlexDirection::Column,
    };
    s.align_items = Some(if axis.is_some() {
        AlignItems::Stretch
    } else {
        AlignItems::FlexStart
    });
    if let Some(a) = m.align_items_container {
        s.align_items = Some(a);
    }
    s.justify_content = Some(JustifyContent::FlexStart);

    if let Some(sh) = m.flex_shrink {
        s.flex_shrink = sh;
    }
    if let Some(gap) = m.spacing {
        let g = length(px(gap.max(0.0)));
        s.gap = taffy::Size {
            width: g,
            height: g,
        };
    }

    // Scroll viewports clip along their axis only, so the cross axis still
    // hugs the content.
    if let ViewKind::Scroll { axis, .. } = kind {
        s.overflow = match axis {
            Axis::Horizontal => Point {
                x: Overflow::Hidden,
                y: Overflow::Visible,
            },
            Axis::Vertical => Point {
                x: Overflow::Visible,
                y: Overflow::Hidden,
            },
        };
    }

    if let Some(p) = m.padding {
        s.padding = edges(p);
    }
    if let Some(mg) = m.margin {
        s.margin = edges(mg);
    }

    let mut width_set = false;
    let mut height_set = false;
    if let Some(sz) = m.size {
        s.size.width = length(px(sz.width.max(0.0)));
        s.size.height = length(px(sz.height.max(0.0)));
        width_set = true;
        height_set = true;
    }
    if let Some(w) = m.width {
        s.size.width = length(px(w.max(0.0)));
        width_set = true;
    }
    if let Some(h) = m.height {
        s.size.height = length(px(h.max(0.0)));
        height_set = true;
    }

    // Main axis fill -> weight (flex: 1 1 0%), cross axis fill -> tight 100%
    if m.fill_max {
        let (main_set, cross_set) = match axis {
            Some(Axis::Horizontal) => (width_set, height_set),
            _ => (height_set, width_set),
        };
        if !main_set {
            s.flex_grow = 1.0;
            s.flex_shrink = s.flex_shrink.max(1.0);
            s.flex_basis = length(0.0);
            match axis {
                Some(Axis::Horizontal) => s.min_size.width = length(0.0),
                _ => s.min_size.height = length(0.0),
            }
        }
        if !cross_set {
            match axis {
                Some(Axis::Horizontal) => {
                    s.min_size.height = percent(1.0);
                    s.max_size.height = percent(1.0);
                }
                _ => {
                    s.min_size.width = percent(1.0);
                    s.max_size.width = percent(1.0);
                }
            }
        }
    }

    s
}

fn build_node(
    v: &View,
    t: &mut TaffyTree<NodeCtx>,
    nodes: &mut HashMap<ViewId, NodeId>,
) -> Result<NodeId, TaffyError> {
    let style = style_from_modifier(&v.modifier, &v.kind);

    let node = match &v.kind {
        ViewKind::Text { text, style: ts, .. } => t.new_leaf_with_context(
            style,
            NodeCtx::Text {
                text: text.clone(),
                line: line_style(ts),
            },
        )?,
        ViewKind::Image { .. } => t.new_leaf_with_context(style, NodeCtx::Container)?,
        _ => {
            let children = v
                .children
                .iter()
                .map(|c| build_node(c, t, nodes))
                .collect::<Result<Vec<_>, _>>()?;
            let n = t.new_with_children(style, &children)?;
            t.set_node_context(n, Some(NodeCtx::Container))?;
            n
        }
    };

    nodes.insert(v.id, node);
    Ok(node)
}

fn layout_and_paint_inner(root: &View, size_px: (u32, u32)) -> Result<LayoutOutput, TaffyError> {
    // Assign ids
    let mut id = 1u64;
    fn stamp(mut v: View, id: &mut u64) -> View {
        v.id = *id;
        *id += 1;
        v.children = v.children.into_iter().map(|c| stamp(c, id)).collect();
        v
    }
    let root = stamp(root.clone(), &mut id);

    let mut taffy: TaffyTree<NodeCtx> = TaffyTree::new();
    let mut nodes = HashMap::new();
    let root_node = build_node(&root, &mut taffy, &mut nodes)?;

    let (w, h) = (size_px.0 as f32, size_px.1 as f32);
    let mut rs = taffy.style(root_node)?.clone();
    rs.size.width = length(w);
    rs.size.height = length(h);
    taffy.set_style(root_node, rs)?;

    let available = taffy::Size {
        width: AvailableSpace::Definite(w),
        height: AvailableSpace::Definite(h),
    };

    let mut text_widths: HashMap<NodeId, f32> = HashMap::new();
    taffy.compute_layout_with_measure(root_node, available, |known, _avail, node, ctx, _style| {
        match ctx {
            Some(NodeCtx::Text { text, line }) => {
                // Single line; an empty string still takes one line height.
                let width = known.width.unwrap_or_else(|| {
                    *text_widths
                        .entry(node)
                        .or_insert_with(|| uzer_text::measure_line(text, *line))
                });
                taffy::Size {
                    width,
                    height: known.height.unwrap_or(line.line_height_px),
                }
            }
            Some(NodeCtx::Container) | None => taffy::Size::ZERO,
        }
    })?;

    let mut painter = Painter {
        t: &taffy,
        nodes: &nodes,
        scene: Scene {
            clear_color: theme().background,
            nodes: vec![],
        },
        hits: vec![],
        sems: vec![],
    };
    painter.walk(&root, (0.0, 0.0))?;
    log::trace!(
        "layout {}x{}: {} scene nodes, {} scroll regions",
        size_px.0,
        size_px.1,
        painter.scene.nodes.len(),
        painter.hits.len()
    );

    Ok((painter.scene, painter.hits, painter.sems))
}

fn layout_rect(t: &TaffyTree<NodeCtx>, node: NodeId) -> Result<Rect, TaffyError> {
    let l = t.layout(node)?;
    Ok(Rect {
        x: l.location.x,
        y: l.location.y,
        w: l.size.width,
        h: l.size.height,
    })
}

fn inset(r: Rect, p: Option<PaddingValues>) -> Rect {
    match p {
        None => r,
        Some(p) => {
            let (l, rt, t, b) = (
                dp_to_px(p.left),
                dp_to_px(p.right),
                dp_to_px(p.top),
                dp_to_px(p.bottom),
            );
            Rect {
                x: r.x + l,
                y: r.y + t,
                w: (r.w - l - rt).max(0.0),
                h: (r.h - t - b).max(0.0),
            }
        }
    }
}

struct Painter<'a> {
    t: &'a TaffyTree<NodeCtx>,
    nodes: &'a HashMap<ViewId, NodeId>,
    scene: Scene,
    hits: Vec<HitRegion>,
    sems: Vec<SemNode>,
}

impl Painter<'_> {
    fn walk(&mut self, v: &View, parent_offset: (f32, f32)) -> Result<(), TaffyError> {
        let node = self.nodes[&v.id];
        let rect = layout_rect(self.t, node)?.translate(parent_offset.0, parent_offset.1);
        let content = inset(rect, v.modifier.padding);
        let radius = v.modifier.clip_rounded.map(dp_to_px).unwrap_or(0.0);
        let tag = v.modifier.test_tag;

        if let Some(e) = v.modifier.elevation
            && e > 0.0
        {
            self.scene.nodes.push(SceneNode::Shadow {
                rect,
                radius,
                elevation: dp_to_px(e),
                color: theme().shadow,
            });
        }
        if let Some(bg) = v.modifier.background {
            self.scene.nodes.push(SceneNode::Rect {
                rect,
                color: bg,
                radius,
            });
        }

        match &v.kind {
            ViewKind::Text { text, style, color } => {
                let line = line_style(style);
                // Vertically center the line in the content box.
                let dy = ((content.h - line.line_height_px) * 0.5).max(0.0);
                self.scene.nodes.push(SceneNode::Text {
                    rect: Rect {
                        x: content.x,
                        y: content.y + dy,
                        w: content.w,
                        h: line.line_height_px,
                    },
                    text: text.clone(),
                    color: *color,
                    size: line.size_px,
                    weight: style.weight,
                    letter_spacing: line.letter_spacing_px,
                });
                self.sems.push(SemNode {
                    id: v.id,
                    role: Role::Text,
                    label: Some(text.clone()),
                    tag,
                    rect,
                });
            }
            ViewKind::Image {
                image,
                content_scale,
                content_description,
            } => {
                self.scene.nodes.push(SceneNode::Image {
                    rect: content,
                    image: *image,
                    content_scale: *content_scale,
                    radius,
                });
                self.sems.push(SemNode {
                    id: v.id,
                    role: Role::Image,
                    label: content_description.clone(),
                    tag,
                    rect,
                });
            }
            ViewKind::Scroll {
                axis,
                on_scroll,
                set_viewport_extent,
                set_content_extent,
                get_scroll_offset,
            } => {
                self.push_container_sem(v, rect);
                return self.walk_scroll(
                    v,
                    rect,
                    content,
                    *axis,
                    on_scroll,
                    set_viewport_extent,
                    set_content_extent,
                    get_scroll_offset,
                );
            }
            _ => self.push_container_sem(v, rect),
        }

        for c in &v.children {
            self.walk(c, (rect.x, rect.y))?;
        }
        Ok(())
    }

    fn push_container_sem(&mut self, v: &View, rect: Rect) {
        if let Some(tag) = v.modifier.test_tag {
            self.sems.push(SemNode {
                id: v.id,
                role: Role::Container,
                label: None,
                tag: Some(tag),
                rect,
            });
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn walk_scroll(
        &mut self,
        v: &View,
        rect: Rect,
        vp: Rect,
        axis: Axis,
        on_scroll: &Option<ScrollCallback>,
        set_viewport_extent: &Option<ExtentCallback>,
        set_content_extent: &Option<ExtentCallback>,
        get_scroll_offset: &Option<OffsetGetter>,
    ) -> Result<(), TaffyError> {
        // Outer rect, so the padding scrolls too. Registered before the
        // children so inner scrollers come later and win.
        self.hits.push(HitRegion {
            id: v.id,
            rect,
            on_scroll: on_scroll.clone(),
        });

        let (vp_extent, lead) = match axis {
            Axis::Horizontal => (vp.w, vp.x - rect.x),
            Axis::Vertical => (vp.h, vp.y - rect.y),
        };
        if let Some(set) = set_viewport_extent {
            set(vp_extent);
        }

        let mut content_extent = 0.0f32;
        for c in &v.children {
            let l = self.t.layout(self.nodes[&c.id])?;
            let end = match axis {
                Axis::Horizontal => l.location.x + l.size.width,
                Axis::Vertical => l.location.y + l.size.height,
            };
            content_extent = content_extent.max(end - lead);
        }
        if let Some(set) = set_content_extent {
            set(content_extent);
        }

        let off = get_scroll_offset.as_ref().map(|g| g()).unwrap_or(0.0);
        let child_offset = match axis {
            Axis::Horizontal => (rect.x - off, rect.y),
            Axis::Vertical => (rect.x, rect.y - off),
        };

        self.scene.nodes.push(SceneNode::PushClip {
            rect: vp,
            radius: 0.0,
        });
        let hit_start = self.hits.len();
        for c in &v.children {
            self.walk(c, child_offset)?;
        }
        // Clip descendant hit regions to the viewport
        let inner = self.hits.split_off(hit_start);
        self.hits.extend(inner.into_iter().filter_map(|mut h| {
            h.rect = h.rect.intersect(&vp)?;
            Some(h)
        }));
        self.scene.nodes.push(SceneNode::PopClip);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::*;
    use std::rc::Rc;

    fn rect_of(sems: &[SemNode], tag: &str) -> Rect {
        sems.iter()
            .find(|s| s.tag == Some(tag))
            .map(|s| s.rect)
            .unwrap_or_else(|| panic!("no node tagged {tag}"))
    }

    #[test]
    fn padding_gap_and_margin() {
        let root = Column(Modifier::new().padding(10.0).spaced_by(5.0)).child((
            Box(Modifier::new().size(20.0, 30.0).test_tag("a")),
            Box(Modifier::new().size(20.0, 30.0).margin(2.0).test_tag("b")),
        ));
        let (_, _, sems) = layout_and_paint(&root, (200, 200));
        let a = rect_of(&sems, "a");
        let b = rect_of(&sems, "b");
        assert_eq!((a.x, a.y, a.w, a.h), (10.0, 10.0, 20.0, 30.0));
        // 10 pad + 30 a + 5 gap + 2 margin
        assert_eq!((b.x, b.y), (12.0, 47.0));
    }

    #[test]
    fn density_scales_lengths() {
        let root = Column(Modifier::new()).child(Box(Modifier::new().size(150.0, 200.0).test_tag("img")));
        let (_, _, sems) = with_density(Density { scale: 2.0 }, || layout_and_paint(&root, (800, 800)));
        let r = rect_of(&sems, "img");
        assert_eq!((r.w, r.h), (300.0, 400.0));
    }

    #[test]
    fn empty_text_keeps_line_height() {
        let tall = |s: &str| {
            let root = Column(Modifier::new()).child(
                Column(Modifier::new().test_tag("col")).child(Text(s).text_style(theme().typography.h6)),
            );
            let (_, _, sems) = layout_and_paint(&root, (300, 300));
            rect_of(&sems, "col").h
        };
        assert_eq!(tall(""), 26.0);
        assert_eq!(tall("Titre"), tall(""));
    }

    #[test]
    fn elevated_rounded_background_paints_shadow_first() {
        let root = Column(Modifier::new()).child(Card(4.0, Modifier::new(), Box(Modifier::new().size(10.0, 10.0))));
        let (scene, _, _) = layout_and_paint(&root, (100, 100));
        let kinds: Vec<_> = scene
            .nodes
            .iter()
            .map(|n| match n {
                SceneNode::Shadow { elevation, radius, .. } => format!("shadow {elevation} {radius}"),
                SceneNode::Rect { radius, .. } => format!("rect {radius}"),
                other => format!("{other:?}"),
            })
            .collect();
        assert_eq!(kinds, vec!["shadow 4 4", "rect 4"]);
    }

    #[test]
    fn image_node_carries_crop_and_clip() {
        static IMG: ImageRes = ImageRes::new("px", &[]);
        let root = Column(Modifier::new().padding(10.0)).child(
            Image(Modifier::new().size(150.0, 200.0).clip_rounded(4.0), IMG)
                .content_scale(ContentScale::Crop)
                .content_description("Image"),
        );
        let (scene, _, sems) = layout_and_paint(&root, (400, 400));
        let img = scene
            .nodes
            .iter()
            .find_map(|n| match n {
                SceneNode::Image {
                    rect,
                    content_scale,
                    radius,
                    ..
                } => Some((*rect, *content_scale, *radius)),
                _ => None,
            })
            .expect("image node");
        assert_eq!(
            img,
            (
                Rect {
                    x: 10.0,
                    y: 10.0,
                    w: 150.0,
                    h: 200.0
                },
                ContentScale::Crop,
                4.0
            )
        );
        let sem = sems.iter().find(|s| s.role == Role::Image).expect("image sem");
        assert_eq!(sem.label.as_deref(), Some("Image"));
    }

    #[test]
    fn horizontal_list_reports_extents_and_clips() {
        let st = Rc::new(LazyListState::new());
        let build = |st: &Rc<LazyListState>| {
            Column(Modifier::new()).child(LazyRow(
                10,
                50.0,
                st.clone(),
                Modifier::new().spaced_by(10.0),
                |i| Box(Modifier::new().size(50.0, 40.0).test_tag(if i == 0 { "first" } else { "item" })),
            ))
        };
        let (scene, hits, _) = layout_and_paint(&build(&st), (120, 100));
        assert_eq!(st.viewport(), 120.0);
        assert_eq!(st.content(), 10.0 * 60.0 - 10.0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].rect.h, 40.0);
        assert!(matches!(scene.nodes.first(), Some(SceneNode::PushClip { .. })));
        assert!(matches!(scene.nodes.last(), Some(SceneNode::PopClip)));

        // Scroll by 100px; the first item moves left of the viewport.
        assert!(Frame {
            root: build(&st),
            scene,
            hit_regions: hits,
            semantics_nodes: vec![],
        }
        .dispatch_scroll(Vec2 { x: 10.0, y: 10.0 }, Vec2 { x: 100.0, y: 0.0 }));
        assert_eq!(st.offset(), 100.0);
        let (_, _, sems) = layout_and_paint(&build(&st), (120, 100));
        assert_eq!(rect_of(&sems, "first").x, -100.0);
    }

    #[test]
    fn nested_lists_hand_leftover_outwards() {
        let outer = Rc::new(LazyListState::new());
        let inner = Rc::new(LazyListState::new());
        let root = LazyColumn(
            20,
            50.0,
            outer.clone(),
            Modifier::new().fill_max_size(),
            |_| {
                LazyRow(3, 50.0, inner.clone(), Modifier::new(), |_| {
                    Box(Modifier::new().size(50.0, 50.0))
                })
            },
        );
        let mut sched = Scheduler::with_size((100, 200));
        let frame = sched.compose(|_| root.clone(), layout_and_paint);
        // Inner row is 150 wide in a 100 viewport: takes 50 of x, no y.
        assert!(frame.dispatch_scroll(Vec2 { x: 10.0, y: 10.0 }, Vec2 { x: 80.0, y: 30.0 }));
        assert_eq!(inner.offset(), 50.0);
        assert_eq!(outer.offset(), 30.0);
    }
}
