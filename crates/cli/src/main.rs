//! Muninn archive stanza inspector.
//!
//! Decodes XEP-0136 list/retrieve response stanzas from a file or stdin and
//! prints the result as a debug rendering, pretty JSON or re-encoded wire
//! XML. Useful for poking at captured stanzas without a running session.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use muninn_archive::{ChatList, Transcript};
use muninn_xml::{ToXml, from_xml_str, to_xml_string};

/// Inspect XEP-0136 message-archive stanzas.
#[derive(Parser)]
#[command(name = "muninn", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a chat-list response stanza.
    List(InputArgs),
    /// Decode a retrieve (transcript) response stanza.
    Retrieve(InputArgs),
}

#[derive(Args)]
struct InputArgs {
    /// Path to the stanza XML, or '-' for stdin.
    input: PathBuf,

    /// Print the decoded entity as pretty JSON.
    #[arg(long, conflicts_with = "emit")]
    json: bool,

    /// Re-encode the entity and print the wire XML.
    #[arg(long)]
    emit: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::List(args) => {
            let xml = read_input(&args.input)?;
            let list: ChatList = from_xml_str(&xml)?;
            debug!(chats = list.len(), paged = list.paging.is_some(), "decoded list response");
            render(&list, &args)
        }
        Command::Retrieve(args) => {
            let xml = read_input(&args.input)?;
            let transcript: Transcript = from_xml_str(&xml)?;
            debug!(
                messages = transcript.len(),
                with = transcript.with.as_deref().unwrap_or("<unset>"),
                "decoded retrieve response"
            );
            render(&transcript, &args)
        }
    }
}

fn render<T>(entity: &T, args: &InputArgs) -> anyhow::Result<()>
where
    T: std::fmt::Debug + Serialize + ToXml,
{
    if args.json {
        println!("{}", serde_json::to_string_pretty(entity)?);
    } else if args.emit {
        println!("{}", to_xml_string(entity)?);
    } else {
        println!("{entity:#?}");
    }
    Ok(())
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut xml = String::new();
        std::io::stdin()
            .read_to_string(&mut xml)
            .context("reading stanza from stdin")?;
        Ok(xml)
    } else {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}
