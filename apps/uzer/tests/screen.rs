use uzer::*;
use uzer_core::*;
use uzer_ui::{Column, Surface, layout_and_paint};

fn app(_s: &mut Scheduler) -> View {
    UzerTestTheme(false, || {
        Surface(
            Modifier::new().fill_max_size().background(theme().background),
            UzerScreen(),
        )
    })
}

fn captions(v: &View) -> Vec<&str> {
    v.texts()
        .into_iter()
        .filter(|t| t.starts_with("Card n°"))
        .collect()
}

fn sem_center(frame: &Frame, label: &str) -> Vec2 {
    let r = frame
        .semantics_nodes
        .iter()
        .find(|s| s.label.as_deref() == Some(label))
        .map(|s| s.rect)
        .unwrap_or_else(|| panic!("no node labelled {label}"));
    Vec2 {
        x: r.x + r.w / 2.0,
        y: r.y + r.h / 2.0,
    }
}

#[test]
fn screen_holds_two_sections_of_five_cards() {
    let v = UzerScreen();
    let sections = v.find_tagged("UzerSection");
    assert_eq!(sections.len(), 2);
    for s in sections {
        assert_eq!(s.texts()[0], "Titre");
        assert_eq!(s.find_tagged("UzerCard").len(), 5);
        assert_eq!(
            captions(s),
            vec!["Card n°0", "Card n°1", "Card n°2", "Card n°3", "Card n°4"]
        );
    }
}

#[test]
fn section_title_does_not_change_the_cards() {
    for title in ["", "Titre", "Un titre bien plus long que la carte"] {
        let v = uzer_section(SectionArgs {
            title: title.to_string(),
        });
        assert_eq!(v.texts()[0], title);
        assert_eq!(v.find_tagged("UzerCard").len(), 5);
    }
}

#[test]
fn default_card_shows_placeholder() {
    let v = UzerCard();
    assert_eq!(v.texts(), vec!["Un texte"]);
    insta::assert_snapshot!(v.outline(), @r#"
    Surface #UzerCard
      Column
        Image unsplash Crop "Image"
        Box
        Text "Un texte"
    "#);
}

#[test]
fn recomposition_is_idempotent() {
    assert_eq!(UzerScreen().outline(), UzerScreen().outline());

    let mut sched = Scheduler::with_size((412, 915));
    sched.compose(app, layout_and_paint);
    let a = sched.compose(app, layout_and_paint);
    let b = sched.compose(app, layout_and_paint);
    assert_eq!(a.root.outline(), b.root.outline());
}

#[test]
fn empty_title_keeps_section_height() {
    let height = |title: &str| {
        let root = Column(Modifier::new()).with_children(vec![uzer_section(SectionArgs {
            title: title.to_string(),
        })]);
        let (_, _, sems) = layout_and_paint(&root, (412, 915));
        sems.iter()
            .find(|s| s.tag == Some("UzerSection"))
            .map(|s| s.rect.h)
            .expect("section node")
    };
    // 10 + 26 title + 10 + 250 card + 10
    assert_eq!(height("Titre"), 306.0);
    assert_eq!(height(""), height("Titre"));
}

#[test]
fn images_lay_out_at_150_by_200() {
    let mut sched = Scheduler::with_size((412, 915));
    let frame = sched.compose(app, layout_and_paint);
    let images: Vec<_> = frame
        .semantics_nodes
        .iter()
        .filter(|s| s.role == Role::Image)
        .collect();
    assert!(!images.is_empty());
    for img in images {
        assert_eq!(img.label.as_deref(), Some("Image"));
        assert_eq!((img.rect.w, img.rect.h), (150.0, 200.0));
    }
}

#[test]
fn scrolling_the_first_row_reveals_every_card_in_order() {
    let mut sched = Scheduler::with_size((360, 915));
    // The first frame measures the viewports; the second builds only what fits.
    sched.compose(app, layout_and_paint);
    let before = sched.compose(app, layout_and_paint);
    let sections = before.root.find_tagged("UzerSection");
    assert_eq!(sections.len(), 2);
    let shown = captions(sections[0]);
    assert_eq!(shown, vec!["Card n°0", "Card n°1", "Card n°2", "Card n°3"]);

    let at = sem_center(&before, "Card n°0");
    assert!(before.dispatch_scroll(at, Vec2 { x: 600.0, y: 0.0 }));

    let after = sched.compose(app, layout_and_paint);
    let sections = after.root.find_tagged("UzerSection");
    let scrolled = captions(sections[0]);
    assert_eq!(scrolled, vec!["Card n°1", "Card n°2", "Card n°3", "Card n°4"]);
    // The second row did not move.
    assert_eq!(captions(sections[1])[0], "Card n°0");

    // Row viewport spans x = 22..338.
    let last = after
        .semantics_nodes
        .iter()
        .find(|s| s.label.as_deref() == Some("Card n°4"))
        .map(|s| s.rect)
        .expect("last caption");
    assert!(last.x >= 22.0 && last.right() <= 338.0, "{last:?}");

    let mut seen: Vec<&str> = shown;
    for c in scrolled {
        if !seen.contains(&c) {
            seen.push(c);
        }
    }
    assert_eq!(
        seen,
        vec!["Card n°0", "Card n°1", "Card n°2", "Card n°3", "Card n°4"]
    );
}
