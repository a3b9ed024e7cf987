use structopt::StructOpt;

use postdump::{Config, Registry};

#[allow(missing_docs)]
#[derive(Debug, StructOpt)]
#[structopt(
    name = "postdump",
    about = "Convert the codereview, webapps and workplace post dumps into csv datasets."
)]
#[structopt(setting = structopt::clap::AppSettings::ColoredHelp)]
struct App {}

impl App {
    fn run(self) -> anyhow::Result<()> {
        let config = Config::default();
        Registry::stackexchange().run(&config)?;
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    App::from_args().run()
}
