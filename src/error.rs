use thiserror::Error;

/// Errors raised while building the engine's fixed inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid layout: canvas size {canvas_size}, {rows} rows, {cols} cols")]
    InvalidLayout { canvas_size: f64, rows: u32, cols: u32 },

    #[error("invalid hex color {0:?}, expected #RRGGBB")]
    InvalidHexColor(String),

    #[error("invalid color ramp: {colors} colors over band {band}")]
    InvalidRamp { colors: usize, band: f64 },

    #[error("unknown animation selection {0:?}")]
    UnknownSelection(String),
}

pub type Result<T> = std::result::Result<T, Error>;
