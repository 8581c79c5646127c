//! Demo application showing verbs, typed parameters and async executors.

use std::time::Duration;

use cliverb::logging::init_logging;
use cliverb::{CliApp, CliCommand, CliParam, CliVerb, CommandExecutor, ExecutorError, Param};

/// `greet --name <NAME> [--times <N>] [--shout]`
struct Greet {
    name: Param<String>,
    times: Param<u32>,
    shout: Param<bool>,
}

impl Greet {
    fn new() -> Self {
        Self {
            name: Param::new(["--name", "-n"]).with_help("Who to greet"),
            times: Param::new(["--times", "-t"])
                .with_help("How often to greet")
                .with_default(1),
            shout: Param::flag(["--shout", "-s"]).with_help("Greet in capitals"),
        }
    }
}

impl CliCommand for Greet {
    fn help_text(&self) -> Option<&str> {
        Some("Print a greeting")
    }

    fn params(&self) -> Vec<&dyn CliParam> {
        vec![&self.name, &self.times, &self.shout]
    }

    fn executor(&self) -> CommandExecutor<'_> {
        CommandExecutor::from_action(move || {
            let mut greeting = format!("Hello, {}!", self.name.value()?);
            if self.shout.value()? {
                greeting = greeting.to_uppercase();
            }
            for _ in 0..self.times.value()? {
                println!("{}", greeting);
            }
            Ok(())
        })
    }
}

/// `sleep [--millis <MS>]`, exits with 1 for zero
struct Sleep {
    millis: Param<u64>,
}

impl CliCommand for Sleep {
    fn help_text(&self) -> Option<&str> {
        Some("Sleep asynchronously, then exit")
    }

    fn params(&self) -> Vec<&dyn CliParam> {
        vec![&self.millis]
    }

    fn executor(&self) -> CommandExecutor<'_> {
        CommandExecutor::from_async(move || async move {
            let millis = self.millis.value()?;
            tokio::time::sleep(Duration::from_millis(millis)).await;
            Ok::<_, ExecutorError>(if millis == 0 { 1 } else { 0 })
        })
    }
}

fn build_app() -> CliApp {
    CliApp::with_verbs(
        "cliverb-demo",
        vec![
            CliVerb::new("greet", Greet::new()).with_alias("hi"),
            CliVerb::group(
                "time",
                vec![CliVerb::new(
                    "sleep",
                    Sleep {
                        millis: Param::new(["--millis", "-m"]).with_default(100),
                    },
                )],
            )
            .with_help("Time related commands"),
        ],
    )
    .about("Demo of the cliverb command framework")
    .version(env!("CARGO_PKG_VERSION"))
}

fn main() {
    init_logging(
        std::env::var("CLIVERB_DEMO_VERBOSITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0),
    );

    let app = match build_app().with_loaded_settings() {
        Ok(app) => app,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(e.exit_code());
        }
    };

    std::process::exit(app.run_from_env());
}
