mod cli;
mod config;
mod escape;
mod lines;
mod logging;
mod preview;
mod resolve;
mod runner;
mod util;

fn main() -> anyhow::Result<()> {
    let app = cli::parse();
    logging::init(app.verbose);
    runner::run(app)
}
