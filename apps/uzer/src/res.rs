//! Bundled resources.

pub mod R {
    pub mod drawable {
        use uzer_core::ImageRes;

        /// Sample photo shown by every card.
        pub const UNSPLASH: ImageRes =
            ImageRes::new("unsplash", include_bytes!("../assets/unsplash.png"));
    }
}
