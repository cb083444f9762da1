//! ctxsearch - Folder content search with keyword highlighting
//!
//! Starts the terminal UI, or runs a single search (`--list`) or highlight
//! (`--preview`) and prints the result.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use ctxsearch::clipboard::SystemClipboard;
use ctxsearch::render::ui::{ColorTheme, TerminalUI};
use ctxsearch::search::{ContentLoader, FsContentLoader};
use ctxsearch::{highlight, search, Application, ExtensionSet, MatchMode, SearchSession};
use std::fs::File;
use std::path::{Path, PathBuf};

fn cli() -> Command {
    Command::new("ctxsearch")
        .version(ctxsearch::VERSION)
        .about("Search a folder for files containing a keyword")
        .long_about(
            "ctxsearch walks a folder recursively, inspects every file whose extension \
             is selected, and lists the files whose content matches the keyword, either \
             literally or as a regular expression. The terminal UI previews each match \
             with the keyword highlighted.",
        )
        .arg(
            Arg::new("folder")
                .help("Folder to search")
                .index(1),
        )
        .arg(
            Arg::new("keyword")
                .short('k')
                .long("keyword")
                .help("Keyword to search for"),
        )
        .arg(
            Arg::new("regex")
                .short('r')
                .long("regex")
                .action(ArgAction::SetTrue)
                .help("Interpret the keyword as a regular expression"),
        )
        .arg(
            Arg::new("ext")
                .short('e')
                .long("ext")
                .action(ArgAction::Append)
                .value_delimiter(',')
                .help("File extension to include (repeatable, default: txt,pdf,docx,xlsx,pptx)"),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .action(ArgAction::SetTrue)
                .conflicts_with("preview")
                .help("Print matching paths instead of starting the terminal UI"),
        )
        .arg(
            Arg::new("preview")
                .long("preview")
                .value_name("FILE")
                .help("Print FILE as HTML with the keyword highlighted"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("PATH")
                .help("Write log output to PATH instead of stderr"),
        )
        .arg(
            Arg::new("monochrome")
                .long("monochrome")
                .action(ArgAction::SetTrue)
                .help("Use a monochrome color theme"),
        )
}

/// Initialize env_logger; level comes from RUST_LOG
fn init_logging(log_file: Option<&String>) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Cannot create log file: {}", path))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

/// Session pre-filled from the command line
fn session_from_args(matches: &ArgMatches) -> SearchSession {
    let mut session = SearchSession::new();
    if let Some(folder) = matches.get_one::<String>("folder") {
        session.folder = folder.clone();
    }
    if let Some(keyword) = matches.get_one::<String>("keyword") {
        session.keyword = keyword.clone();
    }
    if matches.get_flag("regex") {
        session.mode = MatchMode::Regex;
    }
    if let Some(exts) = matches.get_many::<String>("ext") {
        session.set_extensions(exts.collect::<ExtensionSet>());
    }
    session
}

/// Matching paths, one display string per result
fn list_matches(session: &SearchSession) -> Result<Vec<String>> {
    let config = session.build_config()?;
    let result = search(&config)?;
    Ok(result
        .iter()
        .map(|path| path.display().to_string())
        .collect())
}

fn preview_html(session: &SearchSession, file: &Path) -> Result<String> {
    let content = FsContentLoader.load(file)?;
    Ok(highlight(&content, session.keyword.trim(), session.mode)?)
}

fn run_list(session: &SearchSession) -> Result<()> {
    for line in list_matches(session)? {
        println!("{}", line);
    }
    Ok(())
}

fn run_preview(session: &SearchSession, file: &Path) -> Result<()> {
    println!("{}", preview_html(session, file)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_logging(matches.get_one::<String>("log-file"))?;

    let session = session_from_args(&matches);

    if matches.get_flag("list") {
        return run_list(&session);
    }

    if let Some(file) = matches.get_one::<String>("preview") {
        return run_preview(&session, &PathBuf::from(file));
    }

    let theme = if matches.get_flag("monochrome") {
        ColorTheme::monochrome()
    } else {
        ColorTheme::default()
    };

    let ui_renderer = Box::new(TerminalUI::with_theme(theme)?);
    let clipboard = Box::new(SystemClipboard::new());
    let mut app = Application::new(session, ui_renderer, clipboard)?;

    app.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constant() {
        assert!(!ctxsearch::VERSION.is_empty());
    }

    #[test]
    fn test_cli_definition() {
        cli().debug_assert();
    }

    #[test]
    fn test_session_from_args() {
        let matches = cli().get_matches_from([
            "ctxsearch", "/data", "-k", "foo", "-r", "-e", "md,TXT", "-e", ".json",
        ]);
        let session = session_from_args(&matches);

        assert_eq!(session.folder, "/data");
        assert_eq!(session.keyword, "foo");
        assert_eq!(session.mode, MatchMode::Regex);
        let exts: Vec<&str> = session.extensions().iter().collect();
        assert_eq!(exts, vec!["json", "md", "txt"]);
    }

    #[test]
    fn test_default_extensions() {
        let matches = cli().get_matches_from(["ctxsearch"]);
        let session = session_from_args(&matches);
        assert_eq!(session.extensions(), &ExtensionSet::default_selection());
        assert!(session.folder.is_empty());
        assert_eq!(session.mode, MatchMode::Literal);
    }

    #[test]
    fn test_list_conflicts_with_preview() {
        assert!(cli()
            .try_get_matches_from(["ctxsearch", "--list", "--preview", "a.txt"])
            .is_err());
    }

    fn session_for(folder: &Path, keyword: &str, mode: MatchMode) -> SearchSession {
        let mut session = SearchSession::new();
        session.folder = folder.display().to_string();
        session.keyword = keyword.to_string();
        session.mode = mode;
        session.set_extensions(["txt", "md"].into_iter().collect());
        session
    }

    #[test]
    fn test_list_matches() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "hello world").unwrap();
        std::fs::write(dir.path().join("b.md"), "goodbye").unwrap();
        std::fs::write(dir.path().join("c.csv"), "hello").unwrap();

        let lines = list_matches(&session_for(dir.path(), "hello", MatchMode::Literal)).unwrap();
        assert_eq!(lines, vec![dir.path().join("a.txt").display().to_string()]);

        let lines = list_matches(&session_for(dir.path(), "^g", MatchMode::Regex)).unwrap();
        assert_eq!(lines, vec![dir.path().join("b.md").display().to_string()]);
    }

    #[test]
    fn test_list_matches_rejects_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_matches(&session_for(dir.path(), "  ", MatchMode::Literal)).is_err());
        assert!(list_matches(&session_for(dir.path(), "(", MatchMode::Regex)).is_err());
    }

    #[test]
    fn test_preview_html() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        std::fs::write(&file, "<b>hello</b>").unwrap();

        let html = preview_html(&session_for(dir.path(), "hello", MatchMode::Literal), &file)
            .unwrap();
        assert_eq!(
            html,
            r#"&lt;b&gt;<span style="color: #8B0000;">hello</span>&lt;/b&gt;"#
        );

        let missing = dir.path().join("missing.txt");
        assert!(preview_html(&session_for(dir.path(), "hello", MatchMode::Literal), &missing)
            .is_err());
    }
}
