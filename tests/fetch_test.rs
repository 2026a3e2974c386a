mod common;

use album_parser::{DocumentFetcher, FetchError, ParserConfig};
use common::{fixture, FixtureClient, BUGS_URL, MELON_URL};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn dumping_fetcher(client: FixtureClient, debug_dir: &Path) -> DocumentFetcher {
    let config = ParserConfig {
        debug_save_responses: true,
        debug_dir: debug_dir.to_path_buf(),
        ..ParserConfig::default()
    };
    DocumentFetcher::new(Box::new(client), config)
}

fn dumped_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

#[test_log::test(tokio::test)]
async fn test_fetch_decodes_utf8_despite_declared_charset() {
    let client = FixtureClient::new().page(BUGS_URL, fixture("bugs_450734.html"));
    let fetcher = DocumentFetcher::new(Box::new(client), ParserConfig::default());

    let document = fetcher.fetch(BUGS_URL).await.unwrap();
    assert_eq!(document.url, BUGS_URL);
    assert_eq!(document.status, 200);
    assert_eq!(document.declared_charset.as_deref(), Some("EUC-KR"));
    assert_eq!(document.encoding(), "UTF-8");
    assert!(document.body.contains("하늘 위로"));
}

#[test_log::test(tokio::test)]
async fn test_successful_page_is_dumped() {
    let temp_dir = TempDir::new().unwrap();
    let client = FixtureClient::new().page(BUGS_URL, fixture("bugs_450734.html"));
    let fetcher = dumping_fetcher(client, temp_dir.path());

    fetcher.fetch(BUGS_URL).await.unwrap();

    let files = dumped_files(temp_dir.path());
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("_status200.html"), "{files:?}");
    assert!(files[0].contains("music.bugs.co.kr_album_450734"), "{files:?}");

    let saved = fs::read_to_string(temp_dir.path().join(&files[0])).unwrap();
    assert!(saved.contains("하늘 위로"));
}

#[test_log::test(tokio::test)]
async fn test_error_page_is_dumped() {
    let temp_dir = TempDir::new().unwrap();
    let client = FixtureClient::new().status(MELON_URL, 503);
    let fetcher = dumping_fetcher(client, temp_dir.path());

    let err = fetcher.fetch(MELON_URL).await.unwrap_err();
    assert_eq!(
        err,
        FetchError::Status {
            url: MELON_URL.to_string(),
            status: 503
        }
    );

    let files = dumped_files(temp_dir.path());
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("_status503.html"), "{files:?}");
}

#[test_log::test(tokio::test)]
async fn test_unknown_page_dumps_its_body() {
    let temp_dir = TempDir::new().unwrap();
    let fetcher = dumping_fetcher(FixtureClient::new(), temp_dir.path());

    assert!(fetcher.fetch(BUGS_URL).await.is_err());

    let files = dumped_files(temp_dir.path());
    assert_eq!(files.len(), 1);
    let saved = fs::read_to_string(temp_dir.path().join(&files[0])).unwrap();
    assert_eq!(saved, "not found");
}

#[test_log::test(tokio::test)]
async fn test_dump_write_failure_does_not_fail_fetch() {
    let temp_dir = TempDir::new().unwrap();
    // A regular file where the dump directory should be
    let blocker = temp_dir.path().join("not-a-dir");
    fs::write(&blocker, "occupied").unwrap();

    let client = FixtureClient::new().page(BUGS_URL, fixture("bugs_450734.html"));
    let fetcher = dumping_fetcher(client, &blocker.join("dumps"));

    let document = fetcher.fetch(BUGS_URL).await.unwrap();
    assert!(document.body.contains("하늘 위로"));
    assert!(blocker.is_file());
}

#[test_log::test(tokio::test)]
async fn test_no_dump_when_disabled() {
    let temp_dir = TempDir::new().unwrap();
    let client = FixtureClient::new().status(BUGS_URL, 500);
    let config = ParserConfig {
        debug_dir: temp_dir.path().join("dumps"),
        ..ParserConfig::default()
    };
    let fetcher = DocumentFetcher::new(Box::new(client), config);

    assert!(fetcher.fetch(BUGS_URL).await.is_err());
    assert!(!temp_dir.path().join("dumps").exists());
}
