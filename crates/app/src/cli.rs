use clap::Parser;

/// Loads text into a line-indexed buffer, applies edits and prints the
/// resulting line table along with every change notification.
#[derive(Debug, Parser)]
#[command(name = "content-probe", version)]
pub struct Args {
    /// File to load. Reads stdin when omitted.
    pub path: Option<std::path::PathBuf>,

    /// Replace LEN characters at START with TEXT. TEXT understands the
    /// escapes \r, \n, \t and \\. May be repeated; edits apply in order.
    #[arg(long = "edit", value_name = "START:LEN:TEXT", value_parser = parse_edit)]
    pub edits: Vec<Edit>,

    /// Delimiter reported for new lines (lf, cr or crlf).
    #[arg(long, value_name = "DELIMITER")]
    pub delimiter: Option<content_core::LineDelimiter>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edit {
    pub start: usize,
    pub len: usize,
    pub text: String,
}

impl std::fmt::Display for Edit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{:?}", self.start, self.len, self.text)
    }
}

pub fn parse_edit(raw: &str) -> Result<Edit, String> {
    let mut parts = raw.splitn(3, ':');
    let (Some(start), Some(len), Some(text)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected START:LEN:TEXT, got {raw:?}"));
    };
    let start = start
        .trim()
        .parse()
        .map_err(|err| format!("bad START {start:?}: {err}"))?;
    let len = len
        .trim()
        .parse()
        .map_err(|err| format!("bad LEN {len:?}: {err}"))?;

    Ok(Edit {
        start,
        len,
        text: unescape(text)?,
    })
}

fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match chars.next() {
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => return Err(format!("unknown escape \\{other}")),
            None => return Err("dangling \\ at end of TEXT".to_owned()),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_edit_with_escapes() {
        assert_eq!(
            parse_edit("3:1:a\\r\\nb:c").unwrap(),
            Edit {
                start: 3,
                len: 1,
                text: "a\r\nb:c".to_owned(),
            }
        );
        assert_eq!(parse_edit("0:0:").unwrap().text, "");
    }

    #[test]
    fn test_parse_edit_errors() {
        assert!(parse_edit("3:1").is_err());
        assert!(parse_edit("x:1:a").is_err());
        assert!(parse_edit("1:1:\\q").is_err());
        assert!(parse_edit("1:1:a\\").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "content-probe",
            "notes.txt",
            "--edit",
            "0:0:\\n",
            "--edit",
            "1:2:x",
            "--delimiter",
            "crlf",
        ])
        .unwrap();

        assert_eq!(args.path, Some(std::path::PathBuf::from("notes.txt")));
        assert_eq!(args.edits.len(), 2);
        assert_eq!(args.delimiter, Some(content_core::LineDelimiter::CrLf));
    }
}
