use crate::shared::Result;

/// OutputPresenter port for the destination of a rendered report
/// (stdout or a file)
pub trait OutputPresenter {
    /// Writes the rendered report
    ///
    /// # Errors
    /// Fails when the destination cannot be written, e.g. a missing parent
    /// directory or a symlinked target file.
    fn present(&self, content: &str) -> Result<()>;
}
