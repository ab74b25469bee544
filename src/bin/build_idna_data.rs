extern crate idna_data;

use std::fs;
use std::io::{self, Write};
use std::process;

use idna_data::config::Config;
use idna_data::error::Result;
use idna_data::logging::StderrLogger;
use idna_data::pipeline;
use idna_data::source::{DirectoryFetcher, Fetch, HttpFetcher};
use structopt::StructOpt;

fn run(config: &Config) -> Result<()> {
    let locators = config.locators()?;

    let fetcher: Box<dyn Fetch> = match &config.source_dir {
        Some(dir) => Box::new(DirectoryFetcher::new(dir)),
        None => Box::new(HttpFetcher),
    };

    let rendered = pipeline::compile(&locators, fetcher.as_ref())?.render()?;

    match &config.output {
        Some(path) => {
            fs::write(path, rendered)?;
            log::info!("wrote {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut stdout = stdout.lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn main() {
    let config = Config::from_args();
    StderrLogger::new(StderrLogger::level_for(config.verbose, config.quiet)).init();

    if let Err(err) = run(&config) {
        log::error!("{}", err);
        process::exit(1);
    }
}
