use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::{Rect, Scene, ScrollCallback, View, semantics::Role};

thread_local! {
    pub static COMPOSER: RefCell<Composer> = RefCell::new(Composer::default());
}

#[derive(Default)]
pub struct Composer {
    pub keyed_slots: HashMap<String, Box<dyn Any>>,
    /// Active `key(..)` segments, outermost first.
    pub key_path: Vec<String>,
}

impl Composer {
    fn scoped_key(&self, key: &str) -> String {
        if self.key_path.is_empty() {
            key.to_string()
        } else {
            format!("{}/{}", self.key_path.join("/"), key)
        }
    }
}

/// Marks a composition pass; key scopes never leak across passes.
pub struct ComposeGuard {
    _private: (),
}

impl ComposeGuard {
    pub fn begin() -> Self {
        COMPOSER.with(|c| {
            c.borrow_mut().key_path.clear();
        });
        ComposeGuard { _private: () }
    }
}

impl Drop for ComposeGuard {
    fn drop(&mut self) {
        COMPOSER.with(|c| c.borrow_mut().key_path.clear());
    }
}

/// Key-based remember. The key is resolved relative to the enclosing
/// [`key`] scopes, so the same literal key inside two list slots refers to
/// two different values.
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    // `init` may itself compose; run it outside the borrow.
    let full = COMPOSER.with(|c| c.borrow().scoped_key(&key.into()));

    let existing = COMPOSER.with(|c| {
        let c = c.borrow();
        match c.keyed_slots.get(&full) {
            Some(b) => match b.downcast_ref::<Rc<T>>() {
                Some(rc) => Some(rc.clone()),
                None => {
                    log::warn!(
                        "remember_with_key: key '{}' reused with a different type; replacing.",
                        full
                    );
                    None
                }
            },
            None => None,
        }
    });
    if let Some(rc) = existing {
        return rc;
    }

    let rc: Rc<T> = Rc::new(init());
    COMPOSER.with(|c| {
        c.borrow_mut().keyed_slots.insert(full, Box::new(rc.clone()));
    });
    rc
}

/// Run `f` with `segment` appended to the key path used by
/// [`remember_with_key`].
pub fn key<R>(segment: impl std::fmt::Display, f: impl FnOnce() -> R) -> R {
    struct Pop;
    impl Drop for Pop {
        fn drop(&mut self) {
            COMPOSER.with(|c| {
                c.borrow_mut().key_path.pop();
            });
        }
    }
    COMPOSER.with(|c| c.borrow_mut().key_path.push(segment.to_string()));
    let _pop = Pop;
    f()
}

/// Output of one composition pass: the tree, its scene, scroll regions and
/// semantics.
pub struct Frame {
    pub root: View,
    pub scene: Scene,
    pub hit_regions: Vec<HitRegion>,
    pub semantics_nodes: Vec<SemNode>,
}

#[derive(Clone)]
pub struct HitRegion {
    pub id: u64,
    pub rect: Rect,
    pub on_scroll: Option<ScrollCallback>,
}

impl std::fmt::Debug for HitRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitRegion")
            .field("id", &self.id)
            .field("rect", &self.rect)
            .field("on_scroll", &self.on_scroll.as_ref().map(|_| "..."))
            .finish()
    }
}

/// Flattened semantics node produced by `layout_and_paint`: resolved
/// screen rect, role and label.
#[derive(Clone, Debug, PartialEq)]
pub struct SemNode {
    pub id: u64,
    pub role: Role,
    pub label: Option<String>,
    pub tag: Option<&'static str>,
    pub rect: Rect,
}

pub type LayoutOutput = (Scene, Vec<HitRegion>, Vec<SemNode>);

pub struct Scheduler {
    /// Framebuffer size in px.
    pub size: (u32, u32),
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self { size: (1280, 800) }
    }

    pub fn with_size(size: (u32, u32)) -> Self {
        Self { size }
    }

    /// Rebuild the tree from scratch and lay it out.
    pub fn compose<F>(
        &mut self,
        mut build_root: F,
        layout_paint: impl Fn(&View, (u32, u32)) -> LayoutOutput,
    ) -> Frame
    where
        F: FnMut(&mut Scheduler) -> View,
    {
        let guard = ComposeGuard::begin();
        let root = build_root(self);
        drop(guard);
        let (scene, hits, sem) = layout_paint(&root, self.size);

        Frame {
            root,
            scene,
            hit_regions: hits,
            semantics_nodes: sem,
        }
    }
}

impl Frame {
    /// Offer a scroll delta to every scroll region under `pos`, innermost
    /// first, passing the unconsumed remainder outwards. Returns `true` if
    /// any region consumed part of it.
    pub fn dispatch_scroll(&self, pos: crate::Vec2, delta: crate::Vec2) -> bool {
        let mut left = delta;
        let mut consumed = false;
        for hit in self.hit_regions.iter().rev().filter(|h| h.rect.contains(pos)) {
            if let Some(cb) = &hit.on_scroll {
                let after = cb(left);
                if (after.x - left.x).abs() > 0.001 || (after.y - left.y).abs() > 0.001 {
                    consumed = true;
                }
                left = after;
                if left.x.abs() <= 0.001 && left.y.abs() <= 0.001 {
                    break;
                }
            }
        }
        consumed
    }
}
