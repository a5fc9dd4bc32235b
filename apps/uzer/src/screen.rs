//! Screen, section and card composables.

use uzer_core::*;
use uzer_ui::*;

use crate::R;

pub const SECTION_COUNT: usize = 2;
pub const CARDS_PER_SECTION: usize = 5;

/// Main-axis extent (dp) of one card: 150 image + 2 * 10 padding.
const CARD_WIDTH_DP: f32 = 170.0;
/// Main-axis extent (dp) of one section, margins included.
const SECTION_HEIGHT_DP: f32 = 310.0;

/// The whole screen: two sections in a vertical lazy list.
pub fn UzerScreen() -> View {
    Scaffold(Modifier::new(), |inner_padding| {
        let list = remember_with_key("uzer_screen.list", LazyListState::new);
        Column(Modifier::new().fill_max_size().padding_values(inner_padding)).child(LazyColumn(
            SECTION_COUNT,
            SECTION_HEIGHT_DP,
            list,
            Modifier::new().fill_max_size().padding(10.0).spaced_by(10.0),
            |_| UzerSection(),
        ))
    })
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionArgs {
    pub title: String,
}

impl Default for SectionArgs {
    fn default() -> Self {
        Self {
            title: "Titre".to_string(),
        }
    }
}

/// A section with the default title.
pub fn UzerSection() -> View {
    uzer_section(SectionArgs::default())
}

/// Titled card holding a horizontal row of cards.
pub fn uzer_section(args: SectionArgs) -> View {
    let th = theme();
    let row = remember_with_key("uzer_section.row", LazyListState::new);
    Card(
        4.0,
        Modifier::new().margin(2.0).test_tag("UzerSection"),
        Column(Modifier::new().padding(10.0)).child((
            Text(args.title)
                .text_style(th.typography.h6)
                .modifier(Modifier::new().padding_values(PaddingValues::bottom(10.0))),
            LazyRow(
                CARDS_PER_SECTION,
                CARD_WIDTH_DP,
                row,
                Modifier::new().spaced_by(8.0),
                |i| {
                    uzer_card(CardArgs {
                        text: format!("Card n°{i}"),
                        ..CardArgs::default()
                    })
                },
            ),
        )),
    )
}

#[derive(Clone, Debug)]
pub struct CardArgs {
    pub image: ImageRes,
    pub text: String,
}

impl Default for CardArgs {
    fn default() -> Self {
        Self {
            image: R::drawable::UNSPLASH,
            text: "Un texte".to_string(),
        }
    }
}

/// A card with the default image and caption.
pub fn UzerCard() -> View {
    uzer_card(CardArgs::default())
}

/// Image above a caption, centered horizontally.
pub fn uzer_card(args: CardArgs) -> View {
    let th = theme();
    Card(
        4.0,
        Modifier::new().test_tag("UzerCard"),
        Column(Modifier::new().padding(10.0).center_horizontally()).child((
            Image(
                Modifier::new()
                    .size(150.0, 200.0)
                    .clip_rounded(th.shapes.small),
                args.image,
            )
            .content_scale(ContentScale::Crop)
            .content_description("Image"),
            Spacer(Modifier::new().height(6.0)),
            Text(args.text),
        )),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_rows_remember_state_per_slot() {
        let a = key("a", || remember_with_key("uzer_section.row", LazyListState::new));
        let b = key("b", || remember_with_key("uzer_section.row", LazyListState::new));
        assert_ne!(a.id(), b.id());
    }
}
