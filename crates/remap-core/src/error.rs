/// A computed coordinate fell outside the valid domain of its projection.
///
/// Replaces the shader-style `(-1,-1)` sentinel plus global transparency
/// flag: callers composite a fully transparent premultiplied pixel for any
/// sample that errors with this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("coordinate falls outside the projection's valid domain")]
pub struct OutOfDomain;
