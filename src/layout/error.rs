use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    /// The computed canvas extent cannot be allocated. Depth and node-count
    /// caps degrade the diagram instead; only this case reaches the caller.
    #[error("canvas size {width:.0}x{height:.0} is outside the renderable range")]
    UnrenderableSize { width: f32, height: f32 },
}
