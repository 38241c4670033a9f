use thiserror::Error;

/// Errors that abort a layout invocation.
///
/// Degenerate sizing (minimums exceeding available space) and malformed
/// keyword props are recovered locally and never surface here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The tree contains a text element but no measurement function was
    /// supplied to the invocation.
    #[error("text element {id:?} requires a measurement function, but none was supplied")]
    MeasureFnMissing { id: String },

    /// A description references a composite component tag that was never
    /// registered.
    #[error("unresolvable component tag {tag:?}")]
    UnknownComponent { tag: String },
}
