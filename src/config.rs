//! Command line configuration: which release to compile and where its source
//! documents live.

use std::path::PathBuf;

use structopt::StructOpt;

use crate::error::{Error, Result};

pub const SCRIPTS_URL: &str = "http://www.unicode.org/Public/UNIDATA/Scripts.txt";
pub const JOINING_TYPES_URL: &str = "http://www.unicode.org/Public/UNIDATA/ArabicShaping.txt";
pub const IDNA_TABLES_URL: &str =
    "http://www.iana.org/assignments/idna-tables-{version}/idna-tables-{version}.xml";

/// Placeholder in [`IDNA_TABLES_URL`] replaced by the release identifier.
const VERSION_PLACEHOLDER: &str = "{version}";

#[derive(Debug, StructOpt)]
#[structopt(
    name = "build_idna_data",
    about = "compile Unicode and IANA IDNA reference tables into range-encoded Rust tables"
)]
pub struct Config {
    /// Unicode/IANA release to compile, e.g. 6.3.0
    #[structopt(env = "IDNA_RELEASE", value_name = "RELEASE")]
    pub release: String,

    /// Location of Scripts.txt
    #[structopt(long, default_value = SCRIPTS_URL)]
    pub scripts_url: String,

    /// Location of ArabicShaping.txt
    #[structopt(long, default_value = JOINING_TYPES_URL)]
    pub joining_types_url: String,

    /// Location of the IDNA registry; `{version}` is replaced by RELEASE
    #[structopt(long, default_value = IDNA_TABLES_URL)]
    pub idna_tables_url: String,

    /// Read source documents from this directory instead of fetching them.
    /// Files are looked up by the last path segment of their location.
    #[structopt(long, parse(from_os_str))]
    pub source_dir: Option<PathBuf>,

    /// Write the generated tables here instead of to standard output
    #[structopt(short, long, parse(from_os_str))]
    pub output: Option<PathBuf>,

    /// Log more (repeatable)
    #[structopt(short, long, parse(from_occurrences))]
    pub verbose: u8,

    /// Log errors only
    #[structopt(short, long)]
    pub quiet: bool,
}

/// Where to find each source document for one release.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locators {
    pub release: String,
    pub scripts: String,
    pub joining_types: String,
    pub idna_tables: String,
}

impl Locators {
    /// The default locations for `release`.
    pub fn for_release(release: &str) -> Result<Locators> {
        Locators::new(release, SCRIPTS_URL, JOINING_TYPES_URL, IDNA_TABLES_URL)
    }

    pub fn new(
        release: &str,
        scripts: &str,
        joining_types: &str,
        idna_tables_template: &str,
    ) -> Result<Locators> {
        validate_release(release)?;
        if !idna_tables_template.contains(VERSION_PLACEHOLDER) {
            return Err(Error::Config(format!(
                "IDNA tables location `{}` has no {} placeholder",
                idna_tables_template, VERSION_PLACEHOLDER
            )));
        }

        Ok(Locators {
            release: release.to_string(),
            scripts: scripts.to_string(),
            joining_types: joining_types.to_string(),
            idna_tables: idna_tables_template.replace(VERSION_PLACEHOLDER, release),
        })
    }
}

impl Config {
    pub fn locators(&self) -> Result<Locators> {
        Locators::new(
            &self.release,
            &self.scripts_url,
            &self.joining_types_url,
            &self.idna_tables_url,
        )
    }
}

/// A release identifier is dot-separated decimal components: `6.3.0`.
fn validate_release(release: &str) -> Result<()> {
    let valid = !release.is_empty()
        && release
            .split('.')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()));
    if valid {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "`{}` is not a release identifier such as 6.3.0",
            release
        )))
    }
}

#[test]
fn idna_tables_locator_names_release() {
    let locators = Locators::for_release("6.3.0").expect("valid release");
    assert_eq!(
        locators.idna_tables,
        "http://www.iana.org/assignments/idna-tables-6.3.0/idna-tables-6.3.0.xml"
    );
    assert_eq!(locators.scripts, SCRIPTS_URL);
    assert_eq!(locators.joining_types, JOINING_TYPES_URL);
}

#[test]
fn bad_releases_are_rejected() {
    for release in &["", "6..0", "6.3.0-rc1", "latest", "../6.3.0"] {
        assert!(
            Locators::for_release(release).is_err(),
            "{:?} must be rejected",
            release
        );
    }
    assert!(Locators::for_release("12.1").is_ok());
}

#[test]
fn template_needs_placeholder() {
    let result = Locators::new(
        "6.3.0",
        SCRIPTS_URL,
        JOINING_TYPES_URL,
        "http://example.invalid/t.xml",
    );
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn command_line() {
    let config = Config::from_iter_safe(&[
        "build_idna_data",
        "6.3.0",
        "--source-dir",
        "/srv/unicode",
        "-vv",
    ])
    .expect("valid arguments");
    assert_eq!(config.release, "6.3.0");
    assert_eq!(config.source_dir, Some(PathBuf::from("/srv/unicode")));
    assert_eq!(config.verbose, 2);
    assert!(!config.quiet);
    assert_eq!(config.scripts_url, SCRIPTS_URL);
    assert_eq!(
        config.locators().expect("valid").idna_tables,
        "http://www.iana.org/assignments/idna-tables-6.3.0/idna-tables-6.3.0.xml"
    );
}
