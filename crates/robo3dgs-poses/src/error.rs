/// An error type for the poses module.
#[derive(thiserror::Error, Debug)]
pub enum PoseError {
    /// The sweep step is zero, negative or not finite.
    #[error("step along y must be a positive number, got {0}")]
    InvalidStep(f64),

    /// The sweep bounds are not finite numbers.
    #[error("sweep bounds must be finite, got {start} to {end}")]
    InvalidRange {
        /// First y position.
        start: f64,
        /// End of the sweep.
        end: f64,
    },

    /// The sweep has more keyframes than frame ids can number.
    #[error("sweep of {0} keyframes exceeds the u32 frame ids")]
    TooManyKeyframes(f64),

    /// No headings would be generated per position.
    #[error("at least one rotation per position is required")]
    NoRotations,

    /// Error writing the output.
    #[error("error writing keyframes. {0}")]
    IoError(#[from] std::io::Error),
}
