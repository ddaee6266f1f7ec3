/// ProgressReporter port for user feedback during an analysis run
///
/// Everything reported here is diagnostic. Reports themselves go through
/// [`OutputPresenter`](super::OutputPresenter), so an implementation writing
/// to stderr never mixes with report output on stdout.
pub trait ProgressReporter {
    /// Reports a step of the run (solution read, projects found, ...)
    fn report(&self, message: &str);

    /// Reports that `current` of `total` projects have been expanded
    ///
    /// # Arguments
    /// * `message` - Optional label, usually the project just finished
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a warning or error; the run continues
    fn report_error(&self, message: &str);

    /// Reports the end of the expansion phase
    fn report_completion(&self, message: &str);
}
