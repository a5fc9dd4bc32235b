#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::*;

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#FF5733");
        assert_eq!(c, Color(255, 87, 51, 255));

        let c_alpha = Color::from_hex("#FF5733AA");
        assert_eq!(c_alpha, Color(255, 87, 51, 170));
    }

    #[test]
    fn test_color_from_argb() {
        assert_eq!(Color::from_argb(0xFFBB86FC), Color(0xBB, 0x86, 0xFC, 0xFF));
        assert_eq!(Color::from_argb(0x80000000), Color(0, 0, 0, 0x80));
    }

    #[test]
    fn test_composite_opaque_over_opaque() {
        let base = Color::from_rgb(0, 0, 0);
        assert_eq!(base.composite(Color::WHITE), Color::WHITE);
        assert_eq!(base.composite(Color::TRANSPARENT), base);
        let half = base.composite(Color::WHITE.with_alpha(128));
        assert_eq!(half.3, 255);
        assert!((half.0 as i32 - 128).abs() <= 1);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect {
            x: 10.0,
            y: 10.0,
            w: 100.0,
            h: 50.0,
        };

        assert!(rect.contains(Vec2 { x: 50.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 5.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 50.0, y: 70.0 }));
    }

    #[test]
    fn test_rect_intersect() {
        let a = Rect {
            x: 0.0,
            y: 0.0,
            w: 100.0,
            h: 100.0,
        };
        let b = Rect {
            x: 50.0,
            y: 80.0,
            w: 100.0,
            h: 100.0,
        };
        assert_eq!(
            a.intersect(&b),
            Some(Rect {
                x: 50.0,
                y: 80.0,
                w: 50.0,
                h: 20.0
            })
        );
        let far = b.translate(500.0, 0.0);
        assert_eq!(a.intersect(&far), None);
    }

    #[test]
    fn test_crop_covers_box() {
        let dst = Rect {
            x: 0.0,
            y: 0.0,
            w: 150.0,
            h: 200.0,
        };
        let src = Size {
            width: 300.0,
            height: 300.0,
        };
        let placed = ContentScale::Crop.place(src, dst);
        assert_eq!(placed.w, 200.0);
        assert_eq!(placed.h, 200.0);
        assert_eq!(placed.x, -25.0);
        assert_eq!(placed.y, 0.0);

        let fit = ContentScale::Fit.place(src, dst);
        assert_eq!((fit.w, fit.h), (150.0, 150.0));
        assert_eq!(fit.y, 25.0);

        let fill = ContentScale::FillBounds.place(src, dst);
        assert_eq!(fill, dst);
    }

    #[test]
    fn test_key_based_remember() {
        COMPOSER.with(|c| c.borrow_mut().keyed_slots.clear());

        let val1 = remember_with_key("test", || 42);
        let val2 = remember_with_key("test", || 100);

        assert_eq!(*val1, 42);
        assert_eq!(*val2, 42); // Not 100, because key exists
    }

    #[test]
    fn test_key_scopes_separate_slots() {
        COMPOSER.with(|c| c.borrow_mut().keyed_slots.clear());

        let inits = Rc::new(Cell::new(0));
        let make = |seg: usize| {
            let inits = inits.clone();
            key(seg, move || {
                remember_with_key("state", move || {
                    inits.set(inits.get() + 1);
                    seg
                })
            })
        };
        assert_eq!(*make(0), 0);
        assert_eq!(*make(1), 1);
        assert_eq!(*make(0), 0);
        assert_eq!(inits.get(), 2);

        COMPOSER.with(|c| {
            let c = c.borrow();
            assert!(c.keyed_slots.contains_key("0/state"));
            assert!(c.keyed_slots.contains_key("1/state"));
            assert!(c.key_path.is_empty());
        });
    }

    #[test]
    fn test_locals_scoping_and_defaults() {
        assert_eq!(density().scale, 1.0);
        assert!(!is_system_in_dark_theme());
        with_density(Density { scale: 2.5 }, || {
            assert_eq!(dp_to_px(10.0), 25.0);
            with_text_scale(TextScale(2.0), || assert_eq!(sp_to_px(10.0), 50.0));
        });
        assert_eq!(dp_to_px(10.0), 10.0);

        let insets = PaddingValues::all(12.0);
        with_window_insets(insets, || {
            with_system_dark(true, || {
                assert_eq!(window_insets(), insets);
                assert!(is_system_in_dark_theme());
            })
        });
        assert_eq!(window_insets(), PaddingValues::ZERO);
    }

    #[test]
    fn test_dark_surface_overlay_grows_with_elevation() {
        let dark = Theme {
            surface: Color::from_hex("#121212"),
            on_surface: Color::WHITE,
            is_light: false,
            ..Theme::default()
        };
        let flat = dark.surface_at(0.0);
        let raised = dark.surface_at(4.0);
        let higher = dark.surface_at(16.0);
        assert_eq!(flat, dark.surface);
        assert!(raised.0 > flat.0);
        assert!(higher.0 > raised.0);

        let light = Theme::default();
        assert_eq!(light.surface_at(8.0), light.surface);
    }

    #[test]
    fn test_dispatch_scroll_passes_leftover_outwards() {
        let outer_seen = Rc::new(Cell::new(Vec2::ZERO));
        let rect = Rect {
            x: 0.0,
            y: 0.0,
            w: 100.0,
            h: 100.0,
        };
        let outer = {
            let seen = outer_seen.clone();
            HitRegion {
                id: 1,
                rect,
                on_scroll: Some(Rc::new(move |d: Vec2| {
                    seen.set(d);
                    Vec2 { x: d.x, y: 0.0 }
                })),
            }
        };
        // Inner consumes x only.
        let inner = HitRegion {
            id: 2,
            rect,
            on_scroll: Some(Rc::new(|d: Vec2| Vec2 { x: 0.0, y: d.y })),
        };
        let frame = Frame {
            root: View::new(0, ViewKind::Box),
            scene: Scene::default(),
            hit_regions: vec![outer, inner],
            semantics_nodes: vec![],
        };
        assert!(frame.dispatch_scroll(Vec2 { x: 5.0, y: 5.0 }, Vec2 { x: 30.0, y: 40.0 }));
        assert_eq!(outer_seen.get(), Vec2 { x: 0.0, y: 40.0 });

        outer_seen.set(Vec2::ZERO);
        assert!(!frame.dispatch_scroll(Vec2 { x: 500.0, y: 5.0 }, Vec2 { x: 1.0, y: 1.0 }));
        assert_eq!(outer_seen.get(), Vec2::ZERO);
    }
}
