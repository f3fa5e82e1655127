use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::entities::report::ReportData;
use crate::usecase::ports::report_source::{ReportError, ReportSource};

/// Holds the active report source and the last report it produced.
///
/// The cache is owned by whoever owns the service; there is no global copy.
#[derive(Default)]
pub struct ReportService {
    source: Option<Arc<dyn ReportSource>>,
    cached: Option<Arc<ReportData>>,
}

impl ReportService {
    pub fn new(source: Arc<dyn ReportSource>) -> Self {
        Self {
            source: Some(source),
            cached: None,
        }
    }

    pub fn source_label(&self) -> Option<String> {
        self.source.as_ref().map(|source| source.describe())
    }

    /// Swaps in a new source and drops whatever the old one produced.
    pub fn set_source(&mut self, source: Arc<dyn ReportSource>) {
        debug!(source = %source.describe(), "report source changed");
        self.source = Some(source);
        self.invalidate();
    }

    pub fn current(&self) -> Option<Arc<ReportData>> {
        self.cached.clone()
    }

    /// Returns the cached report, loading it first if needed.
    pub fn load(&mut self) -> Result<Arc<ReportData>, ReportError> {
        if let Some(report) = &self.cached {
            return Ok(Arc::clone(report));
        }
        let source = self.source.as_ref().ok_or(ReportError::NotLoaded)?;
        let report = Arc::new(source.load()?);
        info!(
            source = %source.describe(),
            report_date = %report.report_date,
            "report cached"
        );
        self.cached = Some(Arc::clone(&report));
        Ok(report)
    }

    /// Always goes back to the source. The previous report stays cached if
    /// the reload fails.
    pub fn reload(&mut self) -> Result<Arc<ReportData>, ReportError> {
        let previous = self.cached.take();
        match self.load() {
            Ok(report) => Ok(report),
            Err(err) => {
                self.cached = previous;
                Err(err)
            }
        }
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    struct CountingSource {
        loads: AtomicUsize,
        fail: Mutex<bool>,
    }

    impl CountingSource {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                loads: AtomicUsize::new(0),
                fail: Mutex::new(false),
            })
        }
    }

    impl ReportSource for CountingSource {
        fn describe(&self) -> String {
            "counting".to_string()
        }

        fn load(&self) -> Result<ReportData, ReportError> {
            if *self.fail.lock().expect("lock should not be poisoned") {
                return Err(ReportError::NotLoaded);
            }
            let n = self.loads.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(ReportData {
                report_date: format!("load-{n}"),
                ..ReportData::default()
            })
        }
    }

    #[test]
    fn load_is_cached_until_invalidated() {
        let source = CountingSource::new();
        let mut service = ReportService::new(source.clone());

        let first = service.load().expect("should load");
        let second = service.load().expect("should hit cache");
        assert_eq!(first.report_date, "load-1");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.loads.load(Ordering::SeqCst), 1);

        service.invalidate();
        assert!(service.current().is_none());
        let third = service.load().expect("should load again");
        assert_eq!(third.report_date, "load-2");
    }

    #[test]
    fn reload_always_hits_source() {
        let source = CountingSource::new();
        let mut service = ReportService::new(source.clone());
        service.load().expect("should load");

        let reloaded = service.reload().expect("should reload");

        assert_eq!(reloaded.report_date, "load-2");
        assert_eq!(source.loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failed_reload_keeps_previous_report() {
        let source = CountingSource::new();
        let mut service = ReportService::new(source.clone());
        service.load().expect("should load");
        *source.fail.lock().expect("lock should not be poisoned") = true;

        assert!(service.reload().is_err());

        let current = service.current().expect("previous report should survive");
        assert_eq!(current.report_date, "load-1");
    }

    #[test]
    fn no_source_is_not_loaded() {
        let mut service = ReportService::default();

        assert!(matches!(service.load(), Err(ReportError::NotLoaded)));
        assert_eq!(service.source_label(), None);
    }

    #[test]
    fn changing_source_drops_cache() {
        let mut service = ReportService::new(CountingSource::new());
        service.load().expect("should load");

        service.set_source(CountingSource::new());

        assert!(service.current().is_none());
        assert_eq!(service.load().expect("should load").report_date, "load-1");
    }
}
