// tests/batch.rs
use std::sync::atomic::{AtomicUsize, Ordering};

use mhr_scrape::config::options::ScrapeOptions;
use mhr_scrape::core::net::FetchError;
use mhr_scrape::progress::Progress;
use mhr_scrape::scrape::{collect_with, FailureKind};
use mhr_scrape::specs::{monster_list, PageRef};
use scraper::Html;

const PAGE: &str = include_str!("fixtures/monster_page.html");

fn quiet(workers: usize) -> ScrapeOptions {
    ScrapeOptions { workers, pause_ms: 0, jitter_ms: 0, ..ScrapeOptions::default() }
}

#[derive(Default)]
struct Tally {
    begun: usize,
    done: usize,
    failed: usize,
    finished: bool,
}

impl Progress for Tally {
    fn begin(&mut self, total: usize) { self.begun = total; }
    fn item_done(&mut self, _id: u32, _name: &str) { self.done += 1; }
    fn item_failed(&mut self, _id: u32, _name: &str, _err: &str) { self.failed += 1; }
    fn finish(&mut self) { self.finished = true; }
}

#[test]
fn one_bad_page_does_not_stop_the_batch() {
    let pages: Vec<PageRef> = (1..=6).map(|id| PageRef::new(id, format!("Monster {id}"))).collect();
    let calls = AtomicUsize::new(0);
    let mut tally = Tally::default();

    let report = collect_with(&pages, &quiet(3), Some(&mut tally), |page| {
        calls.fetch_add(1, Ordering::Relaxed);
        match page.id {
            2 => Err(FetchError::Status { url: format!("page/{}", page.id), status: 500 }),
            4 => Ok(PAGE.replace("Weapon Damage Breakdown", "Weapon Notes")),
            _ => Ok(PAGE.to_string()),
        }
    });

    assert_eq!(calls.load(Ordering::Relaxed), 6);
    assert_eq!(report.records.len(), 4);
    assert_eq!(report.failures.len(), 2);
    assert!(report.records.iter().all(|r| r.info.name == "Rathalos"));

    let failed: Vec<(u32, &str)> = report.failures.iter().map(|f| (f.page.id, f.kind.label())).collect();
    assert_eq!(failed, vec![(2, "fetch"), (4, "section-not-found")]);
    assert!(matches!(report.failures[0].kind, FailureKind::Fetch(_)));
    assert_eq!(
        report.failures[0].to_string(),
        "page 2 (Monster 2): fetch: HTTP 500 for page/2"
    );

    assert_eq!((tally.begun, tally.done, tally.failed), (6, 4, 2));
    assert!(tally.finished);
}

#[test]
fn single_worker_visits_every_page() {
    let pages: Vec<PageRef> = [30, 10, 20].into_iter().map(PageRef::bare).collect();
    let report = collect_with(&pages, &quiet(1), None, |_| Ok(PAGE.to_string()));
    assert_eq!(report.records.len(), 3);
    assert!(report.failures.is_empty());
}

#[test]
fn listing_links_come_from_tables_only() {
    let doc = Html::parse_document(PAGE);
    let pages = monster_list::parse_list(&doc);
    assert_eq!(pages, vec![PageRef::new(337_002, "Rathian")]);
}
