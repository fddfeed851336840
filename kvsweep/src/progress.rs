/// Progress bar over sweep points that tracing logs are written through, so
/// that log lines are printed above the bar instead of scattered across it.
#[derive(Clone)]
pub struct TracingProgressBar {
    progress: indicatif::ProgressBar,
}

impl TracingProgressBar {
    pub fn new(len: usize) -> Self {
        let style = indicatif::ProgressStyle::default_bar().template(
            "[{elapsed_precise}] {wide_bar:.green} {pos:>2}/{len:2} (ETA {eta})",
        );
        let progress = indicatif::ProgressBar::new(len as u64);
        progress.set_style(style);
        Self { progress }
    }

    /// A progress bar that draws nothing.
    pub fn hidden() -> Self {
        Self {
            progress: indicatif::ProgressBar::hidden(),
        }
    }

    /// Creates a progress bar and installs the global tracing subscriber,
    /// filtered by `RUST_LOG`, writing through it.
    pub fn init(len: usize) -> Self {
        let progress = Self::new(len);
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(progress.clone())
            .init();
        progress
    }

    pub fn inc(&self) {
        self.progress.inc(1);
    }

    pub fn position(&self) -> usize {
        self.progress.position() as usize
    }

    pub fn finish(&self) {
        self.progress.finish();
    }
}

impl std::io::Write for TracingProgressBar {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        // each event is formatted with its own trailing newline, which
        // `println` already adds
        let line = String::from_utf8_lossy(buf);
        self.progress.println(line.trim_end_matches('\n'));
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for TracingProgressBar {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
