// src/cli.rs
use std::{fs, path::PathBuf};

use clap::Parser;
use color_eyre::eyre::{bail, Result, WrapErr};

use crate::{
    config::{ consts::WORKERS, options::{ PageSelector, ScrapeOptions } },
    core::net,
    file,
    progress::Progress,
    scrape,
    specs::{ self, PageRef },
};

/// Extract Monster Hunter Rise monster data from Game8 monster pages into JSON.
#[derive(Debug, Parser)]
#[command(name = "mhr_scrape", version, about)]
pub struct Args {
    /// Page ids to scrape, e.g. `1,2,10-12`. Default: every monster on the listing page.
    #[arg(long, value_parser = parse_ids_list)]
    pub ids: Option<IdList>,

    /// Extract from a saved page instead of fetching.
    #[arg(long, conflicts_with_all = ["ids", "list"])]
    pub file: Option<PathBuf>,

    /// Print the discovered `id,name` pairs and exit.
    #[arg(long)]
    pub list: bool,

    /// Output path. Default: stdout.
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Concurrent page fetches.
    #[arg(long, default_value_t = WORKERS)]
    pub workers: usize,

    /// Indented JSON.
    #[arg(long)]
    pub pretty: bool,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn scrape_options(&self) -> ScrapeOptions {
        ScrapeOptions {
            pages: match &self.ids {
                Some(IdList(ids)) => PageSelector::Ids(ids.clone()),
                None => PageSelector::All,
            },
            workers: self.workers,
            out: self.out.clone(),
            pretty: self.pretty,
            ..ScrapeOptions::default()
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    crate::log::init(args.verbose);

    if args.list {
        let client = net::client()?;
        for PageRef { id, name } in specs::monster_list::fetch(&client)? {
            println!("{id},{name}");
        }
        return Ok(());
    }

    if let Some(path) = &args.file {
        let markup = fs::read_to_string(path)
            .wrap_err_with(|| format!("reading {}", path.display()))?;
        let page = PageRef::new(0, path.display().to_string());
        let record = match specs::monster::extract(&page, &markup) {
            Ok(r) => r,
            Err(e) => bail!("{}: {}: {e}", page.name, e.label()),
        };
        file::write_json(&[record], args.out.as_deref(), args.pretty)?;
        return Ok(());
    }

    let opts = args.scrape_options();
    let mut progress = StderrProgress::default();
    let report = scrape::collect_monsters(&opts, Some(&mut progress))?;

    for failure in &report.failures {
        eprintln!("{failure}");
    }
    file::write_json(&report.records, opts.out.as_deref(), opts.pretty)?;
    Ok(())
}

/// Single-line status on stderr.
#[derive(Default)]
struct StderrProgress {
    total: usize,
    seen: usize,
}

impl Progress for StderrProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, id: u32, name: &str) {
        self.seen += 1;
        eprintln!("[{}/{}] {name} ({id})", self.seen, self.total);
    }
    fn item_failed(&mut self, id: u32, name: &str, _err: &str) {
        self.seen += 1;
        eprintln!("[{}/{}] {name} ({id}) failed", self.seen, self.total);
    }
    fn finish(&mut self) {
        eprintln!("Done: {} page(s).", self.seen);
    }
}

/// One `--ids` value, already expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdList(pub Vec<u32>);

/// `1,2,10-12` → `[1, 2, 10, 11, 12]`, sorted and deduplicated.
pub fn parse_ids_list(s: &str) -> Result<IdList, String> {
    let num = |t: &str| t.trim().parse::<u32>().map_err(|e| format!("'{}': {e}", t.trim()));

    let mut out = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() { continue; }
        if let Some((a, b)) = part.split_once('-') {
            let (a, b) = (num(a)?, num(b)?);
            if a > b { return Err(format!("Invalid range: {part}")); }
            out.extend(a..=b);
        } else {
            out.push(num(part)?);
        }
    }
    if out.is_empty() {
        return Err(s!("no page ids given"));
    }
    out.sort_unstable();
    out.dedup();
    Ok(IdList(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_list_with_ranges() {
        assert_eq!(parse_ids_list("12, 3,10-11,3").unwrap(), IdList(vec![3, 10, 11, 12]));
    }

    #[test]
    fn ids_list_rejects_bad_input() {
        assert!(parse_ids_list("5-2").is_err());
        assert!(parse_ids_list("x").is_err());
        assert!(parse_ids_list(" , ").is_err());
    }

    #[test]
    fn args_map_to_options() {
        let args = Args::try_parse_from(["mhr_scrape", "--ids", "7,9", "--workers", "1", "--pretty"]).unwrap();
        let opts = args.scrape_options();
        assert_eq!(opts.pages, PageSelector::Ids(vec![7, 9]));
        assert_eq!(opts.workers, 1);
        assert!(opts.pretty);

        let args = Args::try_parse_from(["mhr_scrape", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert_eq!(args.scrape_options().pages, PageSelector::All);
    }

    #[test]
    fn file_conflicts_with_ids() {
        assert!(Args::try_parse_from(["mhr_scrape", "--file", "a.html", "--ids", "1"]).is_err());
    }
}
