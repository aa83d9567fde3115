mod cli;
mod log;

use std::io::{Read, Write};

use anyhow::Context;
use clap::Parser;
use content_core::{ChannelListener, ContentConfig, ContentNotification, TextContent};

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    log::init()?;

    let text = read_input(args.path.as_deref())?;
    let mut config = ContentConfig::default();

    if let Some(delimiter) = args.delimiter {
        config = config.with_line_delimiter(delimiter);
    }

    let mut content = TextContent::with_config(config);
    let (listener, receiver) = ChannelListener::unbounded();

    content.add_text_change_listener(listener)?;
    content.set_text(&text);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for edit in &args.edits {
        tracing::debug!(%edit, "applying edit");

        content
            .replace_text_range(edit.start, edit.len, &edit.text)
            .with_context(|| format!("edit {edit} failed"))?;
    }

    for notification in receiver.try_iter() {
        write_notification(&mut out, &notification)?;
    }

    write_line_table(&mut out, &content)?;

    Ok(())
}

fn read_input(path: Option<&std::path::Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();

            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;

            Ok(text)
        }
    }
}

fn write_notification(out: &mut impl Write, notification: &ContentNotification) -> anyhow::Result<()> {
    match notification {
        ContentNotification::Set {
            char_count,
            line_count,
        } => writeln!(out, "set       chars={char_count} lines={line_count}")?,
        ContentNotification::Changing(change) | ContentNotification::Changed(change) => {
            let label = match notification {
                ContentNotification::Changing(_) => "changing",
                _ => "changed",
            };

            writeln!(
                out,
                "{label:<9} start={} replace={}/{} new={}/{} text={:?}",
                change.start,
                change.replace_char_count,
                change.replace_line_count,
                change.new_char_count,
                change.new_line_count,
                change.new_text,
            )?;
        }
    }

    Ok(())
}

fn write_line_table(out: &mut impl Write, content: &TextContent) -> anyhow::Result<()> {
    writeln!(
        out,
        "{} chars, {} lines",
        content.char_count(),
        content.line_count()
    )?;

    for (line_idx, range) in content.lines() {
        let delimiter = content
            .line_delimiter_at(line_idx)?
            .map_or_else(|| "-".to_owned(), |delimiter| delimiter.to_string());
        let line = content.line(line_idx)?;

        writeln!(out, "{line_idx:>5} {:>7} {delimiter:<4} {line:?}", range.start)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_line_table() {
        let mut content = TextContent::new();
        let mut out = Vec::new();

        content.set_text("one\r\ntwo\rthree");
        write_line_table(&mut out, &content).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "14 chars, 3 lines\n\
             \x20   0       0 CRLF \"one\"\n\
             \x20   1       5 CR   \"two\"\n\
             \x20   2       9 -    \"three\"\n"
        );
    }

    #[test]
    fn test_notification_lines() {
        let mut content = TextContent::new();
        let (listener, receiver) = ChannelListener::unbounded();
        let mut out = Vec::new();

        content.add_text_change_listener(listener).unwrap();
        content.set_text("ab");
        content.replace_text_range(1, 0, "\n").unwrap();

        for notification in receiver.try_iter() {
            write_notification(&mut out, &notification).unwrap();
        }

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "set       chars=2 lines=1\n\
             changing  start=1 replace=0/0 new=1/1 text=\"\\n\"\n\
             changed   start=1 replace=0/0 new=1/1 text=\"\\n\"\n"
        );
    }
}
