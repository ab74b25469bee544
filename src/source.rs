//! Retrieval of the three source documents.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use isahc::config::{Configurable, RedirectPolicy};
use isahc::{ReadResponseExt, Request, RequestExt};

use crate::error::{Error, Result};

/// The source documents the tables are compiled from.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum SourceTable {
    /// `Scripts.txt`, script ranges.
    Scripts,
    /// `ArabicShaping.txt`, joining types used by CONTEXTJ rule A.1.
    JoiningTypes,
    /// The IANA registry classifying code points into PVALID, CONTEXTJ, ...
    IdnaTables,
}

impl SourceTable {
    pub fn file_name(self) -> &'static str {
        match self {
            SourceTable::Scripts => "Scripts.txt",
            SourceTable::JoiningTypes => "ArabicShaping.txt",
            SourceTable::IdnaTables => "idna-tables.xml",
        }
    }
}

impl fmt::Display for SourceTable {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(match self {
            SourceTable::Scripts => "scripts",
            SourceTable::JoiningTypes => "joining types",
            SourceTable::IdnaTables => "IDNA properties",
        })
    }
}

/// Something that can turn a locator into the text of a source document.
pub trait Fetch {
    fn fetch(&self, locator: &str) -> Result<String>;
}

/// Fetches documents over HTTP(S), following redirects.
#[derive(Debug, Default)]
pub struct HttpFetcher;

impl Fetch for HttpFetcher {
    fn fetch(&self, locator: &str) -> Result<String> {
        log::info!("fetching {}", locator);

        let mut response = Request::get(locator)
            .redirect_policy(RedirectPolicy::Follow)
            .body(())
            .map_err(|err| Error::fetch(locator, err))?
            .send()
            .map_err(|err| Error::fetch(locator, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch(locator, format!("HTTP status {}", status)));
        }

        let text = response.text().map_err(|err| Error::fetch(locator, err))?;
        log::debug!("{}: {} bytes", locator, text.len());
        Ok(text)
    }
}

/// Reads previously downloaded documents from a directory.  A locator is
/// resolved to the file in `root` named by its last path segment, so
/// `http://www.unicode.org/Public/UNIDATA/Scripts.txt` is read from
/// `root/Scripts.txt`.
#[derive(Debug)]
pub struct DirectoryFetcher {
    root: PathBuf,
}

impl DirectoryFetcher {
    pub fn new<P: Into<PathBuf>>(root: P) -> DirectoryFetcher {
        DirectoryFetcher { root: root.into() }
    }

    pub fn path_for(&self, locator: &str) -> PathBuf {
        let name = locator.rsplit('/').next().unwrap_or(locator);
        self.root.join(name)
    }
}

impl Fetch for DirectoryFetcher {
    fn fetch(&self, locator: &str) -> Result<String> {
        let path = self.path_for(locator);
        log::info!("reading {} for {}", path.display(), locator);
        fs::read_to_string(&path)
            .map_err(|err| Error::fetch(locator, format!("{}: {}", path.display(), err)))
    }
}

#[test]
fn directory_fetcher_resolves_last_segment() {
    let fetcher = DirectoryFetcher::new("/srv/unicode");
    assert_eq!(
        fetcher.path_for("http://www.unicode.org/Public/UNIDATA/Scripts.txt"),
        PathBuf::from("/srv/unicode/Scripts.txt")
    );
    assert_eq!(
        fetcher.path_for(
            "http://www.iana.org/assignments/idna-tables-6.3.0/idna-tables-6.3.0.xml"
        ),
        PathBuf::from("/srv/unicode/idna-tables-6.3.0.xml")
    );
}

#[test]
fn directory_fetcher_reads_files() {
    let dir = tempfile::tempdir().expect("temporary directory");
    fs::write(dir.path().join("ArabicShaping.txt"), "0627; ALEF; R; ALEF\n").expect("write");

    let fetcher = DirectoryFetcher::new(dir.path());
    let text = fetcher
        .fetch("http://www.unicode.org/Public/UNIDATA/ArabicShaping.txt")
        .expect("file exists");
    assert_eq!(text, "0627; ALEF; R; ALEF\n");

    match fetcher.fetch("http://www.unicode.org/Public/UNIDATA/Scripts.txt") {
        Err(Error::Fetch { locator, .. }) => {
            assert_eq!(locator, "http://www.unicode.org/Public/UNIDATA/Scripts.txt")
        }
        _ => panic!("missing file must be a fetch error"),
    }
}
