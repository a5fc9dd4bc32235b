use crate::view::Scene;

/// Something that turns a [`Scene`] into pixels.
pub trait RenderBackend {
    type Error: std::error::Error + Send + Sync + 'static;

    fn configure_surface(&mut self, width: u32, height: u32);
    fn frame(&mut self, scene: &Scene) -> Result<(), Self::Error>;
}
