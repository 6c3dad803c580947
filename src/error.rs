use thiserror::Error;

/// Rejected screen construction. Never corrected silently.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("viewport must be absent when view size equals world size ({width}x{height})")]
    UnexpectedViewport { width: u32, height: u32 },

    #[error(
        "viewport is required when view size ({view_width}x{view_height}) differs from world size ({world_width}x{world_height})"
    )]
    MissingViewport {
        view_width: u32,
        view_height: u32,
        world_width: u32,
        world_height: u32,
    },

    #[error("{what} size must be non-zero, got {width}x{height}")]
    EmptyView {
        what: &'static str,
        width: u32,
        height: u32,
    },

    #[error("padded surface for a {width}x{height} world with a {padding}px border does not fit in u32")]
    SurfaceTooLarge { width: u32, height: u32, padding: f64 },
}
