// src/scrape.rs
use std::{
    fmt, thread, time::Duration,
    sync::{ mpsc, atomic::{ AtomicUsize, Ordering }}
};

use tracing::{error, info};

use crate::{
    config::options::{ PageSelector, ScrapeOptions },
    core::net::{ self, FetchError },
    model::MonsterRecord,
    progress::Progress,
    specs::{ self, PageRef },
};

pub use crate::specs::monster::FailureKind;

/// One page that produced no record, and why.
#[derive(Debug)]
pub struct PageFailure {
    pub page: PageRef,
    pub kind: FailureKind,
}

impl fmt::Display for PageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {} ({}): {}: {}", self.page.id, self.page.name, self.kind.label(), self.kind)
    }
}

/// Outcome of a batch. Both lists are sorted by page id.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub records: Vec<MonsterRecord>,
    pub failures: Vec<PageFailure>,
}

impl BatchReport {
    pub fn attempted(&self) -> usize {
        self.records.len() + self.failures.len()
    }
}

/// Resolve the page selection, then fetch and extract every page.
/// Only a failure to build the client or to read the listing page is fatal.
pub fn collect_monsters(
    opts: &ScrapeOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<BatchReport, FetchError> {
    let client = net::client()?;

    let pages = match &opts.pages {
        PageSelector::All => {
            if let Some(p) = progress.as_deref_mut() {
                p.log("Fetching monster list…");
            }
            specs::monster_list::fetch(&client)?
        }
        PageSelector::Ids(ids) => ids.iter().copied().map(PageRef::bare).collect(),
    };

    Ok(collect_with(&pages, opts, progress, |page| specs::monster::fetch(&client, page)))
}

/// Batch driver over an arbitrary fetch function.
///
/// Workers pull the next index from a shared counter, fetch and extract the
/// page, send the result back, then pause before the next request. The
/// calling thread is the sole receiver and the only one touching `progress`.
pub fn collect_with<F>(
    pages: &[PageRef],
    opts: &ScrapeOptions,
    mut progress: Option<&mut dyn Progress>,
    fetch: F,
) -> BatchReport
where
    F: Fn(&PageRef) -> Result<String, FetchError> + Sync,
{
    if let Some(p) = progress.as_deref_mut() {
        p.begin(pages.len());
    }

    type Outcome = (usize, Result<MonsterRecord, FailureKind>);

    let counter = AtomicUsize::new(0);
    let workers = opts.worker_count(pages.len());
    let mut done: Vec<(usize, MonsterRecord)> = Vec::new();
    let mut failed: Vec<(usize, FailureKind)> = Vec::new();

    thread::scope(|scope| {
        let (res_tx, res_rx) = mpsc::channel::<Outcome>();

        for _ in 0..workers {
            let tx = res_tx.clone();
            let (counter, fetch) = (&counter, &fetch);
            scope.spawn(move || {
                loop {
                    let i = counter.fetch_add(1, Ordering::Relaxed);
                    let Some(page) = pages.get(i) else { break };
                    let result = fetch(page)
                        .map_err(FailureKind::from)
                        .and_then(|markup| specs::monster::extract(page, &markup).map_err(FailureKind::from));
                    if tx.send((i, result)).is_err() {
                        break;
                    }
                    thread::sleep(Duration::from_millis(opts.pause_for(page.id))); // be polite
                }
            });
        }
        drop(res_tx); // main thread is sole receiver now

        for (i, result) in res_rx {
            let page = &pages[i];
            match result {
                Ok(record) => {
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(page.id, &page.name);
                    }
                    done.push((i, record));
                }
                Err(kind) => {
                    error!(id = page.id, name = %page.name, kind = kind.label(), "{kind}");
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_failed(page.id, &page.name, &kind.to_string());
                    }
                    failed.push((i, kind));
                }
            }
        }
    });

    done.sort_by_key(|(i, _)| pages[*i].id);
    failed.sort_by_key(|(i, _)| pages[*i].id);

    let report = BatchReport {
        records: done.into_iter().map(|(_, r)| r).collect(),
        failures: failed
            .into_iter()
            .map(|(i, kind)| PageFailure { page: pages[i].clone(), kind })
            .collect(),
    };
    info!(ok = report.records.len(), failed = report.failures.len(), "batch finished");

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::lookup::Section;
    use crate::engine::ExtractError;

    fn quiet() -> ScrapeOptions {
        ScrapeOptions { workers: 2, pause_ms: 0, jitter_ms: 0, ..ScrapeOptions::default() }
    }

    #[derive(Default)]
    struct Recorder {
        total: usize,
        done: Vec<u32>,
        failed: Vec<u32>,
        finished: bool,
    }

    impl Progress for Recorder {
        fn begin(&mut self, total: usize) { self.total = total; }
        fn item_done(&mut self, id: u32, _name: &str) { self.done.push(id); }
        fn item_failed(&mut self, id: u32, _name: &str, _err: &str) { self.failed.push(id); }
        fn finish(&mut self) { self.finished = true; }
    }

    #[test]
    fn failures_are_isolated_and_sorted() {
        let pages: Vec<PageRef> = [5, 3, 9].into_iter().map(PageRef::bare).collect();
        let mut rec = Recorder::default();

        let report = collect_with(&pages, &quiet(), Some(&mut rec), |page| match page.id {
            3 => Err(FetchError::Status { url: s!("x"), status: 503 }),
            _ => Ok(s!("<html><body><p>no sections</p></body></html>")),
        });

        assert!(report.records.is_empty());
        assert_eq!(report.attempted(), 3);
        let ids: Vec<u32> = report.failures.iter().map(|f| f.page.id).collect();
        assert_eq!(ids, vec![3, 5, 9]);
        assert_eq!(report.failures[0].kind.label(), "fetch");
        assert!(matches!(
            report.failures[1].kind,
            FailureKind::Extract(ExtractError::SectionNotFound(Section::Info))
        ));

        assert_eq!(rec.total, 3);
        rec.failed.sort_unstable();
        assert_eq!(rec.failed, vec![3, 5, 9]);
        assert!(rec.done.is_empty());
        assert!(rec.finished);
    }

    #[test]
    fn empty_batch() {
        let report = collect_with(&[], &quiet(), None, |_| unreachable!());
        assert_eq!(report.attempted(), 0);
    }

    #[test]
    fn failure_display() {
        let f = PageFailure {
            page: PageRef::new(7, "Rathian"),
            kind: FailureKind::Fetch(FetchError::Status { url: s!("u"), status: 404 }),
        };
        assert_eq!(f.to_string(), "page 7 (Rathian): fetch: HTTP 404 for u");
    }
}
