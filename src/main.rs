//! cmdconsole demo
//!
//! A console for a toy video phone that can place a call, switch the video
//! source mid-call and hang up.

use clap::Parser;
use cmdconsole::args::Arg;
use cmdconsole::commands::Command;
use cmdconsole::console::Console;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Demo configuration
#[derive(Debug, Parser)]
#[command(name = "cmdconsole", version, about = "Interactive video phone console")]
struct Config {
    /// Name shown in the prompt and the help banner
    #[arg(short, long, default_value = "phone")]
    name: String,

    /// Log filter, e.g. "warn" or "cmdconsole=debug" (RUST_LOG takes precedence)
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

/// Video phone that can call a remote phone and send some video.
#[derive(Debug, Default)]
struct VideoPhone {
    /// Address of the active call
    active: Option<String>,
}

impl VideoPhone {
    fn call(&mut self, address: &str, bitrate: u32, source: &str, codec: &str) {
        println!(
            "Creating call to: address={} bitrate={} source={} codec={}",
            address, bitrate, source, codec
        );
        self.active = Some(address.to_string());
    }

    fn change_video_source(&mut self, source: &str) -> anyhow::Result<()> {
        match &self.active {
            Some(address) => {
                println!("Changing source of call to {} to: {}", address, source);
                Ok(())
            }
            None => anyhow::bail!("no active call"),
        }
    }

    fn disconnect(&mut self, call: &str) -> anyhow::Result<()> {
        match self.active.take() {
            Some(address) if address == call => {
                println!("Disconnecting {}", address);
                Ok(())
            }
            Some(address) => {
                self.active = Some(address);
                anyhow::bail!("no call to {}", call)
            }
            None => anyhow::bail!("no active call"),
        }
    }
}

fn phone_commands(phone: &Rc<RefCell<VideoPhone>>) -> anyhow::Result<Vec<Command>> {
    let call = {
        let phone = Rc::clone(phone);
        Command::with_args(
            "call",
            "c",
            "create new call",
            vec![
                // Required positional, parsing fails without it
                Arg::positional("address", "Remote address"),
                Arg::option("bitrate", "b", "Call bitrate", "1024"),
                Arg::option("source", "s", "Video source", "test-media/1.mp4"),
                Arg::option("video-codec", "v", "Video codec", "h264")
                    .with_values(["h264", "vp8", "vp9"]),
            ],
        )?
        .handler(move |args| {
            phone.borrow_mut().call(
                args.get("address")?,
                args.get_as("bitrate")?,
                args.get("source")?,
                args.get("video-codec")?,
            );
            Ok(())
        })
    };

    let change_source = {
        let phone = Rc::clone(phone);
        Command::with_args(
            "change-source",
            "s",
            "change video source",
            vec![Arg::positional("source", "New video source")],
        )?
        .handler(move |args| phone.borrow_mut().change_video_source(args.get("source")?))
    };

    let disconnect = {
        let phone = Rc::clone(phone);
        Command::with_args(
            "disconnect",
            "d",
            "disconnect a call",
            vec![Arg::required("call", "c", "Call identifier")],
        )?
        .handler(move |args| phone.borrow_mut().disconnect(args.get("call")?))
    };

    Ok(vec![call, change_source, disconnect])
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so they never interleave with the prompt
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let _subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    let phone = Rc::new(RefCell::new(VideoPhone::default()));
    let mut console = Console::new(&config.name, cmdconsole::VERSION, phone_commands(&phone)?)?;
    info!(console = %config.name, "Console ready");

    console.help()?;
    console.run()?;

    info!("Console closed");
    Ok(())
}
