//! Line-driven interactive session: open a directory, assign categories,
//! generate and save documents.

use crate::commands::open_in_background;
use crate::output;
use anyhow::{Context, Result};
use filecat_core::clipboard::{Clipboard, CopyOutcome};
use filecat_core::{Category, ExportKind, Session};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

const HELP: &str = "\
commands:
  open <path>                    list the files under <path>
  list                           show the listing with current categories
  assign <n|name> <category>     file a listing entry under a category;
                                 quote names that are all digits: \"2024\"
  formats [excel word pdf|none]  choose the documents to generate
  generate                       build the selected documents
  save [dir]                     write generated documents to dir
  copy <n>                       copy the path of entry n
  status                         show the session state
  help                           show this text
  quit                           end the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileRef {
    /// Zero-based position in the listing.
    Index(usize),
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(String),
    List,
    Assign { file: FileRef, category: Category },
    /// `None` shows the current selection.
    Formats(Option<Vec<ExportKind>>),
    Generate,
    Save(Option<PathBuf>),
    Copy(usize),
    Status,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `None`. Entry numbers are shown
/// and accepted 1-based.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let command = match word.to_ascii_lowercase().as_str() {
        "open" if !rest.is_empty() => Command::Open(rest.to_string()),
        "open" => return Err("usage: open <path>".into()),
        "list" | "ls" => Command::List,
        "assign" => {
            let (file, category) = rest
                .rsplit_once(char::is_whitespace)
                .ok_or("usage: assign <n|name> <category>")?;
            let category = category.parse::<Category>().map_err(|e| e.to_string())?;
            let file = file.trim();
            let quoted = file
                .strip_prefix('"')
                .and_then(|f| f.strip_suffix('"'))
                .filter(|f| !f.is_empty());
            let file = match (quoted, file.parse::<usize>()) {
                (Some(name), _) => FileRef::Name(name.to_string()),
                (None, Ok(n)) => FileRef::Index(entry_index(n)?),
                (None, Err(_)) => FileRef::Name(file.to_string()),
            };
            Command::Assign { file, category }
        }
        "formats" if rest.is_empty() => Command::Formats(None),
        "formats" if rest.eq_ignore_ascii_case("none") => Command::Formats(Some(Vec::new())),
        "formats" => {
            let formats = rest
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|s| !s.is_empty())
                .map(|s| s.parse::<ExportKind>().map_err(|e| e.to_string()))
                .collect::<Result<Vec<_>, _>>()?;
            Command::Formats(Some(formats))
        }
        "generate" => Command::Generate,
        "save" => Command::Save((!rest.is_empty()).then(|| PathBuf::from(rest))),
        "copy" => {
            let n = rest
                .parse::<usize>()
                .map_err(|_| "usage: copy <n>".to_string())?;
            Command::Copy(entry_index(n)?)
        }
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command `{other}`; try `help`")),
    };
    Ok(Some(command))
}

fn entry_index(n: usize) -> Result<usize, String> {
    n.checked_sub(1)
        .ok_or_else(|| "entries are numbered from 1".to_string())
}

/// Runs commands from `input` until `quit` or end of input, writing replies to
/// `out`. Command failures are reported and the loop continues.
pub async fn run<R, W>(
    mut session: Session,
    input: R,
    out: &mut W,
    mut clipboard: Option<&mut dyn Clipboard>,
    output_dir: &Path,
) -> Result<Session>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "type `help` for commands")?;
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.context("reading command")? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(out, "error: {message}")?;
                continue;
            }
        };
        debug!(?command, "session command");
        match command {
            Command::Quit => break,
            Command::Open(path) => {
                let (returned, opened) = open_in_background(session, path.clone()).await?;
                session = returned;
                match opened {
                    Ok(count) => writeln!(out, "listed {count} files under {path}")?,
                    Err(err) => writeln!(out, "error: {err}")?,
                }
            }
            Command::Copy(index) => {
                let outcome = match clipboard.as_mut() {
                    Some(clipboard) => session.copy_path(index, Some(&mut **clipboard)),
                    None => session.copy_path(index, None),
                };
                match outcome {
                    Ok(CopyOutcome::Copied(path)) => writeln!(out, "copied: {path}")?,
                    Ok(CopyOutcome::Manual(path)) => writeln!(out, "copy manually: {path}")?,
                    Err(err) => writeln!(out, "error: {err}")?,
                }
            }
            Command::Save(dir) => {
                let dir = dir.unwrap_or_else(|| output_dir.to_path_buf());
                if session.exports().next().is_none() {
                    writeln!(out, "nothing to save; run `generate` first")?;
                    continue;
                }
                match output::write_exports(&dir, session.exports()).await {
                    Ok(written) => {
                        for file in written {
                            writeln!(out, "saved {} ({})", file.path.display(), file.mime)?;
                        }
                    }
                    Err(err) => writeln!(out, "error: {err:#}")?,
                }
            }
            other => {
                if let Err(err) = apply(&mut session, other, out) {
                    writeln!(out, "error: {err}")?;
                }
            }
        }
    }
    Ok(session)
}

/// Commands that only touch the session in memory.
fn apply<W: Write>(session: &mut Session, command: Command, out: &mut W) -> Result<()> {
    match command {
        Command::List => {
            if session.files().is_empty() {
                writeln!(out, "no files listed")?;
            }
            for (index, file) in session.files().iter().enumerate() {
                let category = session.category_of(index).unwrap_or_default();
                writeln!(
                    out,
                    "{:>4}. [{category}] {}  {}  {}",
                    index + 1,
                    file.name,
                    file.modified,
                    file.relative_path
                )?;
            }
        }
        Command::Assign { file, category } => match file {
            FileRef::Index(index) => {
                session.assign(index, category)?;
                writeln!(out, "entry {} -> {category}", index + 1)?;
            }
            FileRef::Name(name) => {
                let matched = session.assign_name(&name, category)?;
                writeln!(out, "{name} ({matched} entries) -> {category}")?;
            }
        },
        Command::Formats(formats) => {
            if let Some(formats) = formats {
                session.set_formats(formats);
            }
            let selected: Vec<&str> = session.formats().iter().map(|k| k.label()).collect();
            if selected.is_empty() {
                writeln!(out, "formats: none")?;
            } else {
                writeln!(out, "formats: {}", selected.join(", "))?;
            }
        }
        Command::Generate => {
            let report = session.generate()?;
            if report.generated.is_empty() && report.failures.is_empty() {
                writeln!(out, "no formats selected; use `formats excel word pdf`")?;
            }
            for kind in &report.generated {
                writeln!(out, "generated {}", kind.file_name())?;
            }
            for failure in &report.failures {
                writeln!(out, "failed: {failure}")?;
            }
        }
        Command::Status => {
            writeln!(out, "state: {:?}", session.state())?;
            if let Some(base) = session.display_base() {
                writeln!(out, "directory: {base} ({} files)", session.files().len())?;
            }
            let ready: Vec<&str> = session.exports().map(|b| b.file_name()).collect();
            if !ready.is_empty() {
                writeln!(out, "ready: {}", ready.join(", "))?;
            }
        }
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Open(_) | Command::Copy(_) | Command::Save(_) | Command::Quit => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_assign_by_number_and_name() {
        assert_eq!(
            parse_command("assign 2 safety").unwrap(),
            Some(Command::Assign {
                file: FileRef::Index(1),
                category: Category::Safety
            })
        );
        assert_eq!(
            parse_command("assign site plan.pdf Architectural").unwrap(),
            Some(Command::Assign {
                file: FileRef::Name("site plan.pdf".into()),
                category: Category::Architectural
            })
        );
    }

    #[test]
    fn quoted_names_are_never_entry_numbers() {
        assert_eq!(
            parse_command(r#"assign "2024" safety"#).unwrap(),
            Some(Command::Assign {
                file: FileRef::Name("2024".into()),
                category: Category::Safety
            })
        );
        assert_eq!(
            parse_command(r#"assign "site plan.pdf" other"#).unwrap(),
            Some(Command::Assign {
                file: FileRef::Name("site plan.pdf".into()),
                category: Category::Other
            })
        );
    }

    #[test]
    fn parses_format_lists() {
        assert_eq!(
            parse_command("formats excel, PDF").unwrap(),
            Some(Command::Formats(Some(vec![ExportKind::Excel, ExportKind::Pdf])))
        );
        assert_eq!(parse_command("formats").unwrap(), Some(Command::Formats(None)));
        assert_eq!(
            parse_command("formats none").unwrap(),
            Some(Command::Formats(Some(Vec::new())))
        );
        assert!(parse_command("formats csv").is_err());
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(parse_command("   ").unwrap(), None);
        assert!(parse_command("copy 0").is_err());
        assert!(parse_command("assign 1").is_err());
        assert!(parse_command("open").is_err());
        assert!(parse_command("frobnicate").is_err());
    }

    #[test]
    fn open_keeps_spaces_in_paths() {
        assert_eq!(
            parse_command(r"open Z:\Projects\Site A").unwrap(),
            Some(Command::Open(r"Z:\Projects\Site A".into()))
        );
    }
}
