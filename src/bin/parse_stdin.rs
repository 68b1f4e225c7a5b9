//! Reads a BCL page from stdin and writes its blocks to stdout.
//!
//! Usage: `parse_stdin [--markdown] [--skip kind,kind] [--selector css]`
//!
//! JSON (`{"blocks": [...], "links": [...]}`) by default, markdown with
//! `--markdown`. Set `RUST_LOG=debug` to see skipped elements on stderr.

use std::collections::BTreeSet;
use std::io::{self, Read};
use std::process::ExitCode;

use rs_bcl_blocks::encoding::transcode_to_utf8;
use rs_bcl_blocks::{parse_page_with_options, BlockKind, MarkdownConverter, Options};
use tracing::error;

struct Args {
    markdown: bool,
    options: Options,
}

fn parse_args() -> Result<Args, String> {
    let mut markdown = false;
    let mut options = Options::default();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--markdown" => markdown = true,
            "--skip" => {
                let list = args.next().ok_or("--skip needs a value")?;
                options.skip_types = parse_skip_list(&list)?;
            }
            "--selector" => {
                options.main_content_selector = args.next().ok_or("--selector needs a value")?;
            }
            other => return Err(format!("unknown argument '{other}'")),
        }
    }

    Ok(Args { markdown, options })
}

fn parse_skip_list(list: &str) -> Result<BTreeSet<BlockKind>, String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| name.parse::<BlockKind>().map_err(|e| e.to_string()))
        .collect()
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("usage: parse_stdin [--markdown] [--skip kind,kind] [--selector css]");
            return ExitCode::from(2);
        }
    };

    let mut raw = Vec::new();
    if let Err(err) = io::stdin().read_to_end(&mut raw) {
        error!(error = %err, "failed to read stdin");
        return ExitCode::FAILURE;
    }

    let html = transcode_to_utf8(&raw);
    let result = parse_page_with_options(&html, &args.options);

    if args.markdown {
        println!("{}", MarkdownConverter::new(args.options.skip_types).convert(&result.blocks));
        return ExitCode::SUCCESS;
    }

    match result.to_json() {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "failed to serialize result");
            ExitCode::FAILURE
        }
    }
}
