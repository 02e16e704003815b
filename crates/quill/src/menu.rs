//! Interactive numbered menu.
//!
//! Reads choices line by line from any `BufRead` and writes prompts and
//! results to any `Write`, so the whole loop can be driven from tests.

use anyhow::{bail, Context};
use quill_core::{EditorSession, UndoOutcome};
use quill_history::HistoryConfig;
use quill_search::{FileSearch, KeywordIndex, WalkOptions};
use quill_storage::{DocumentStore, JsonDocumentStore};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Line that ends multi-line edit input.
pub const EDIT_TERMINATOR: &str = "exit";

const MENU: &[&str] = &[
    "1. Open file",
    "2. Edit content",
    "3. Undo",
    "4. Save file",
    "5. Search files",
    "6. Index directory",
    "7. Print index",
    "8. Exit",
    "9. Export document",
    "10. Import document",
    "11. Show history",
    "12. Show changes",
];

/// The interactive editing loop.
pub struct Menu<R, W> {
    input: R,
    output: W,
    cwd: PathBuf,
    root: Option<PathBuf>,
    session: EditorSession,
    search: FileSearch,
    index: KeywordIndex,
    documents: JsonDocumentStore,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    /// Create a menu resolving relative paths against `cwd`.
    pub fn new(input: R, output: W, cwd: impl Into<PathBuf>) -> Self {
        let cwd = cwd.into();
        Self {
            input,
            output,
            documents: JsonDocumentStore::new(&cwd),
            cwd,
            root: None,
            session: EditorSession::new(),
            search: FileSearch::new(),
            index: KeywordIndex::new(),
        }
    }

    /// Use `root` for search and indexing instead of prompting for it.
    pub fn with_root(mut self, root: Option<PathBuf>) -> Self {
        self.root = root.map(|r| quill_util::path::absolutize(&r, &self.cwd));
        self
    }

    /// Select which files search and indexing look at.
    pub fn with_walk_options(mut self, options: WalkOptions) -> Self {
        self.search = FileSearch::with_options(options.clone());
        self.index = KeywordIndex::with_options(options);
        self
    }

    pub fn with_history_config(mut self, config: HistoryConfig) -> anyhow::Result<Self> {
        self.session = self.session.with_history_config(config)?;
        Ok(self)
    }

    /// Run until the user chooses exit or input ends.
    pub fn run(&mut self) -> anyhow::Result<()> {
        if self.root.is_none() {
            let Some(answer) = self.prompt("Directory to work in: ")? else {
                return Ok(());
            };
            self.root = Some(if answer.trim().is_empty() {
                self.cwd.clone()
            } else {
                quill_util::path::absolutize(Path::new(answer.trim()), &self.cwd)
            });
        }

        loop {
            writeln!(self.output)?;
            for line in MENU {
                writeln!(self.output, "{line}")?;
            }
            let Some(choice) = self.prompt("Enter choice: ")? else {
                break;
            };
            debug!(choice = %choice.trim(), "Menu choice");

            let result = match choice.trim() {
                "1" => self.open(),
                "2" => self.edit(),
                "3" => self.undo(),
                "4" => self.save(),
                "5" => self.search(),
                "6" => self.build_index(),
                "7" => self.print_index(),
                "8" => break,
                "9" => self.export(),
                "10" => self.import(),
                "11" => self.show_history(),
                "12" => self.show_changes(),
                _ => {
                    writeln!(self.output, "Invalid choice.")?;
                    Ok(())
                }
            };

            if let Err(e) = result {
                warn!(error = %e, "Menu action failed");
                writeln!(self.output, "Error: {e:#}")?;
            }
        }
        Ok(())
    }

    fn open(&mut self) -> anyhow::Result<()> {
        let path = self.require("Enter file path: ")?;
        self.session.open(path.trim())?;
        writeln!(self.output, "File opened.")?;
        Ok(())
    }

    fn edit(&mut self) -> anyhow::Result<()> {
        if !self.session.is_open() {
            bail!("no file is open");
        }
        writeln!(
            self.output,
            "Enter new content (a line '{EDIT_TERMINATOR}' finishes):"
        )?;

        let mut lines = Vec::new();
        while let Some(line) = self.read_line()? {
            if line == EDIT_TERMINATOR {
                break;
            }
            lines.push(line);
        }
        self.session.edit(lines.join("\n"))?;
        writeln!(self.output, "Content edited.")?;
        Ok(())
    }

    fn undo(&mut self) -> anyhow::Result<()> {
        match self.session.undo() {
            UndoOutcome::Restored => writeln!(self.output, "Last change undone.")?,
            UndoOutcome::NoOp => writeln!(self.output, "Nothing to undo.")?,
        }
        Ok(())
    }

    fn save(&mut self) -> anyhow::Result<()> {
        let answer = self.require("Enter path to save to (empty for the opened file): ")?;
        let path = if answer.trim().is_empty() {
            self.session.save_in_place()?
        } else {
            let path = PathBuf::from(answer.trim());
            self.session.save(&path)?;
            path
        };
        writeln!(self.output, "File saved to {}.", path.display())?;
        Ok(())
    }

    fn search(&mut self) -> anyhow::Result<()> {
        let keyword = self.require("Enter keyword to search for: ")?;
        let root = self.root()?;
        let mut found = 0;
        for path in self.search.search_files(&root, &keyword) {
            let path = path.with_context(|| format!("Search failed under {}", root.display()))?;
            writeln!(
                self.output,
                "{}",
                quill_util::path::display_relative(&path, &root)
            )?;
            found += 1;
        }
        if found == 0 {
            writeln!(self.output, "No files found.")?;
        }
        Ok(())
    }

    fn build_index(&mut self) -> anyhow::Result<()> {
        let keyword = self.require("Enter keyword to index: ")?;
        let root = self.root()?;
        let count = self.index.index_directory(&root, &keyword)?;
        writeln!(self.output, "Directory indexed ({count} matching files).")?;
        Ok(())
    }

    fn print_index(&mut self) -> anyhow::Result<()> {
        let listing = self.index.to_string();
        if listing.is_empty() {
            writeln!(self.output, "Index is empty.")?;
        } else {
            write!(self.output, "{listing}")?;
        }
        Ok(())
    }

    fn export(&mut self) -> anyhow::Result<()> {
        let location = self.require("Enter export path: ")?;
        let location = Path::new(location.trim());
        let document = self.session.to_document()?;
        if self.documents.exists(location)? {
            writeln!(self.output, "Replacing existing document.")?;
        }
        self.documents.save(location, &document)?;
        writeln!(self.output, "Document exported.")?;
        Ok(())
    }

    fn import(&mut self) -> anyhow::Result<()> {
        let location = self.require("Enter import path: ")?;
        let document = self.documents.load(Path::new(location.trim()))?;
        self.session.restore_document(document)?;
        writeln!(self.output, "Document imported.")?;
        Ok(())
    }

    fn show_history(&mut self) -> anyhow::Result<()> {
        if !self.session.is_open() {
            bail!("no file is open");
        }
        let history = self.session.history();
        if history.is_empty() {
            writeln!(self.output, "History is empty.")?;
            return Ok(());
        }
        for (n, snapshot) in history.iter().enumerate() {
            let time = snapshot.timestamp().with_timezone(&chrono::Local);
            writeln!(
                self.output,
                "{:>3}. {}  {}  {} bytes",
                n + 1,
                snapshot.id().short(),
                time.format("%H:%M:%S"),
                snapshot.len()
            )?;
        }
        Ok(())
    }

    /// Print a unified diff from the file on disk to the current content.
    fn show_changes(&mut self) -> anyhow::Result<()> {
        let diff = self.session.diff_against_saved()?;
        if diff.lines().nth(2).is_none() {
            writeln!(self.output, "No unsaved changes.")?;
        } else {
            write!(self.output, "{diff}")?;
        }
        Ok(())
    }

    fn root(&self) -> anyhow::Result<PathBuf> {
        self.root
            .clone()
            .context("no working directory selected")
    }

    /// Prompt and read a line, treating end of input as an error.
    fn require(&mut self, label: &str) -> anyhow::Result<String> {
        self.prompt(label)?.context("unexpected end of input")
    }

    fn prompt(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Next input line without its line ending, or `None` at end of input.
    fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_test_utils::TestProject;
    use std::io::Cursor;

    fn run(project: &Path, script: &str) -> (String, Menu<Cursor<Vec<u8>>, Vec<u8>>) {
        let mut menu = Menu::new(Cursor::new(script.as_bytes().to_vec()), Vec::new(), project)
            .with_root(Some(project.to_path_buf()));
        menu.run().unwrap();
        let output = String::from_utf8(menu.output.clone()).unwrap();
        (output, menu)
    }

    #[test]
    fn test_open_edit_undo_save() {
        let project = TestProject::new().with_file("note.txt", "first").build();
        let script = "1\nnote.txt\n2\nline one\nline two\nexit\n3\n4\n\n8\n";

        // Relative paths resolve against the process cwd, so use an absolute one.
        let script = script.replace("note.txt", &project.join("note.txt").display().to_string());
        let (output, menu) = run(project.path(), &script);

        assert!(output.contains("File opened."));
        assert!(output.contains("Content edited."));
        assert!(output.contains("Last change undone."));
        assert_eq!(menu.session.content(), Some("first"));
        assert_eq!(project.read_file("note.txt"), "first");
    }

    #[test]
    fn test_edit_joins_lines_until_terminator() {
        let project = TestProject::new().with_file("n.txt", "").build();
        let path = project.join("n.txt").display().to_string();
        let script = format!("1\n{path}\n2\nalpha\nbeta\nexit\n4\n\n8\n");

        let (_, menu) = run(project.path(), &script);
        assert_eq!(menu.session.content(), Some("alpha\nbeta"));
        assert_eq!(project.read_file("n.txt"), "alpha\nbeta");
    }

    #[test]
    fn test_search_and_index() {
        let project = TestProject::new().with_greetings().build();
        let (output, menu) = run(project.path(), "5\nworld\n6\nthere\n7\n8\n");

        assert!(output.contains("Enter keyword to search for: a.txt\n"));
        assert!(output.contains("Directory indexed (1 matching files)."));
        assert!(output.contains(&format!(
            "Keyword: there\n  {}\n",
            project.join("b.txt").display()
        )));
        assert_eq!(menu.index.len(), 1);
    }

    #[test]
    fn test_errors_do_not_end_loop() {
        let project = TestProject::new().build();
        let missing = project.join("missing.txt").display().to_string();
        let script = format!("2\n1\n{missing}\n4\nout.txt\n42\n3\n8\n");

        let (output, menu) = run(project.path(), &script);
        assert!(output.contains("Error: no file is open"));
        assert!(output.contains("Error: file not found"));
        assert!(output.contains("Invalid choice."));
        assert!(output.contains("Nothing to undo."));
        assert!(!menu.session.is_open());
    }

    #[test]
    fn test_print_empty_index() {
        let project = TestProject::new().build();
        let (output, menu) = run(project.path(), "7\n6\nabsent\n7\n8\n");
        assert_eq!(output.matches("Index is empty.").count(), 2);
        assert!(!output.contains("Keyword: absent"));
        assert_eq!(menu.index.len(), 1);
    }

    #[test]
    fn test_end_of_input_exits() {
        let project = TestProject::new().build();
        let (output, _) = run(project.path(), "3\n");
        assert!(output.contains("Nothing to undo."));
    }

    #[test]
    fn test_prompts_for_root() {
        let project = TestProject::new().with_greetings().build();
        let script = format!("{}\n5\nthere\n8\n", project.path().display());

        let mut menu = Menu::new(Cursor::new(script.into_bytes()), Vec::new(), "/");
        menu.run().unwrap();
        let output = String::from_utf8(menu.output).unwrap();

        assert!(output.starts_with("Directory to work in: "));
        assert!(output.contains("Enter keyword to search for: b.txt\n"));
    }

    #[test]
    fn test_search_prints_paths_relative_to_root() {
        let project = TestProject::new()
            .with_file("nested/deep.txt", "needle")
            .build();
        let (output, _) = run(project.path(), "5\nneedle\n5\nabsent\n8\n");

        let expected = Path::new("nested").join("deep.txt");
        assert!(output.contains(&format!(
            "Enter keyword to search for: {}\n",
            expected.display()
        )));
        assert!(output.contains("No files found."));
    }

    #[test]
    fn test_show_changes() {
        let project = TestProject::new().with_file("c.txt", "alpha\nbeta\n").build();
        let path = project.join("c.txt").display().to_string();
        let script = format!("12\n1\n{path}\n12\n2\nalpha\ngamma\n\nexit\n12\n8\n");

        let (output, _) = run(project.path(), &script);
        assert!(output.contains("Error: no file is open"));
        assert!(output.contains("No unsaved changes."));
        assert!(output.contains("-beta\n"));
        assert!(output.contains("+gamma\n"));
    }

    #[test]
    fn test_export_import_and_history() {
        let project = TestProject::new().with_file("doc.txt", "v1").build();
        let path = project.join("doc.txt").display().to_string();
        let script = format!(
            "1\n{path}\n2\nv2\nexit\n9\nsaved.json\n9\nsaved.json\n3\n10\nsaved.json\n11\n8\n"
        );

        let (output, menu) = run(project.path(), &script);
        assert_eq!(output.matches("Document exported.").count(), 2);
        assert_eq!(output.matches("Replacing existing document.").count(), 1);
        assert!(output.contains("Document imported."));
        assert!(output.contains("  1. "));
        assert!(project.join("saved.json").exists());
        assert_eq!(menu.session.content(), Some("v2"));
        assert_eq!(menu.session.history().len(), 1);
    }

    #[test]
    fn test_history_depth_applies() {
        let project = TestProject::new().with_file("d.txt", "0").build();
        let path = project.join("d.txt").display().to_string();
        let script = format!("1\n{path}\n2\n1\nexit\n2\n2\nexit\n8\n");

        let mut menu = Menu::new(Cursor::new(script.into_bytes()), Vec::new(), project.path())
            .with_root(Some(project.path().to_path_buf()))
            .with_history_config(HistoryConfig { max_depth: Some(2) })
            .unwrap();
        menu.run().unwrap();

        assert_eq!(menu.session.history().len(), 2);
    }
}
