use std::collections::HashMap;
use std::fs;
use std::path::Path;

use th_compiler::{run, Fetch, FetchError, OutputSpec, PipelineConfig, PipelineError};
use th_core::types::{OrderPolicy, SkipReason};

const SOURCE: &str = "mem://trackers.txt";
const CDN: &str = "mem://cdn.txt";

/// In-memory sources keyed by URL; anything else fails to connect.
struct StaticFetcher {
    bodies: HashMap<&'static str, &'static str>,
}

impl StaticFetcher {
    fn new(bodies: &[(&'static str, &'static str)]) -> Self {
        Self {
            bodies: bodies.iter().copied().collect(),
        }
    }
}

impl Fetch for StaticFetcher {
    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.bodies
            .get(url)
            .map(|body| body.to_string())
            .ok_or_else(|| FetchError::Connect { url: url.to_string() })
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("output should exist")
        .lines()
        .map(str::to_string)
        .collect()
}

fn config(dir: &Path, allowlist_urls: Vec<String>) -> PipelineConfig {
    PipelineConfig {
        source_url: SOURCE.to_string(),
        allowlist_urls,
        outputs: vec![
            OutputSpec::hosts(dir.join("out/hosts.txt"), OrderPolicy::Lexical),
            OutputSpec::domains(dir.join("out/wildcard.txt"), true, OrderPolicy::Lexical),
        ],
        ..Default::default()
    }
}

#[test]
fn scenario_a_raw_hosts() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = StaticFetcher::new(&[(
        SOURCE,
        "http://t.example.com:80/announce\nudp://1.2.3.4:6969\nnot-a-url\nhttps://T.Example.com/a\n",
    )]);

    let summary = run(&config(dir.path(), vec![]), &fetcher).expect("run should succeed");

    assert_eq!(read_lines(&dir.path().join("out/hosts.txt")), vec!["t.example.com"]);
    assert_eq!(summary.non_blank_lines, 4);
    assert_eq!(summary.unique_hosts, 1);
    assert_eq!(summary.skipped.get(&SkipReason::IpLiteral), Some(&1));
    assert_eq!(summary.outputs[0].rules, 1);
    assert_eq!(summary.outputs[0].dropped, 3);
}

#[test]
fn scenario_b_wildcard_domains() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = StaticFetcher::new(&[(
        SOURCE,
        "udp://a.tracker.example.co.uk:6969/announce\nhttps://b.example.com/announce\n",
    )]);

    let summary = run(&config(dir.path(), vec![]), &fetcher).unwrap();

    assert_eq!(
        read_lines(&dir.path().join("out/wildcard.txt")),
        vec!["*.example.co.uk", "*.example.com", "example.co.uk", "example.com"]
    );
    assert_eq!(
        read_lines(&dir.path().join("out/hosts.txt")),
        vec!["a.tracker.example.co.uk", "b.example.com"]
    );
    assert_eq!(summary.outputs[1].rules, 4);
    assert!(!summary.is_empty());
}

#[test]
fn scenario_c_allowlisted_domain_removed() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = StaticFetcher::new(&[
        (
            SOURCE,
            "udp://a.tracker.example.co.uk:6969/announce\nhttps://b.example.com/announce\n",
        ),
        (CDN, "example.com\n"),
    ]);

    let summary = run(&config(dir.path(), vec![CDN.to_string()]), &fetcher).unwrap();

    assert_eq!(
        read_lines(&dir.path().join("out/wildcard.txt")),
        vec!["*.example.co.uk", "example.co.uk"]
    );
    // Raw hostnames are never filtered.
    assert_eq!(read_lines(&dir.path().join("out/hosts.txt")).len(), 2);
    assert_eq!(summary.allowlist_entries, 1);
    assert_eq!(summary.outputs[1].allowlisted, 1);
    assert_eq!(summary.allowlisted_domains, 1);
    // Allowlisting counts domains, not input lines.
    assert!(summary.skipped.is_empty(), "{:?}", summary.skipped);
}

#[test]
fn scenario_d_allowlist_failure_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = StaticFetcher::new(&[(SOURCE, "https://b.example.com/announce\n")]);

    let summary = run(
        &config(dir.path(), vec!["mem://unreachable.txt".to_string()]),
        &fetcher,
    )
    .expect("allowlist failure must not abort the run");

    assert_eq!(summary.failed_allowlists.len(), 1);
    assert_eq!(summary.failed_allowlists[0].url, "mem://unreachable.txt");
    assert_eq!(summary.allowlist_entries, 0);
    assert_eq!(
        read_lines(&dir.path().join("out/wildcard.txt")),
        vec!["*.example.com", "example.com"]
    );
}

#[test]
fn source_failure_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = StaticFetcher::new(&[]);

    let err = run(&config(dir.path(), vec![]), &fetcher).unwrap_err();

    assert!(matches!(err, PipelineError::Fetch { ref url, .. } if url == SOURCE));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn empty_source_is_distinct_from_failure() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = StaticFetcher::new(&[(SOURCE, "# nothing here\n\n")]);

    let summary = run(&config(dir.path(), vec![]), &fetcher).unwrap();

    assert!(summary.is_empty());
    assert_eq!(fs::read_to_string(dir.path().join("out/hosts.txt")).unwrap(), "");
}

#[test]
fn reruns_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = StaticFetcher::new(&[(
        SOURCE,
        "wss://z.example.org/\nudp://a.example.net:1/\nhttp://m.example.com/\nudp://a.example.net:2/\n",
    )]);
    let cfg = config(dir.path(), vec![]);

    run(&cfg, &fetcher).unwrap();
    let first = fs::read(dir.path().join("out/wildcard.txt")).unwrap();
    run(&cfg, &fetcher).unwrap();
    let second = fs::read(dir.path().join("out/wildcard.txt")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn length_order_applies_per_output() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = StaticFetcher::new(&[(
        SOURCE,
        "http://tracker.longname-example.com/\nhttp://t.ab.io/\nhttp://x.example.org/\n",
    )]);
    let cfg = PipelineConfig {
        source_url: SOURCE.to_string(),
        outputs: vec![OutputSpec::hosts(dir.path().join("hosts.txt"), OrderPolicy::Length)],
        ..Default::default()
    };

    run(&cfg, &fetcher).unwrap();

    assert_eq!(
        read_lines(&dir.path().join("hosts.txt")),
        vec!["t.ab.io", "x.example.org", "tracker.longname-example.com"]
    );
}
