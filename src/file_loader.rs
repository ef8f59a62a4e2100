//! Loading and saving maze documents on disk.

use std::{fs, path::Path};

use color_eyre::eyre::{Result, WrapErr as _};

use crate::maze::{Maze, MazeDocument};

/// Reads a maze document from a JSON file.
///
/// # Errors
///
/// Fails if the file cannot be read or does not hold a maze document.
pub(crate) fn load_document(path: &Path) -> Result<MazeDocument> {
    let contents = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read maze file {}", path.display()))?;

    parse_document(&contents).wrap_err_with(|| format!("invalid maze file {}", path.display()))
}

/// Reads a maze file and builds the maze it describes, returning the document alongside it.
///
/// # Errors
///
/// Fails like [`load_document`], or if the document describes an invalid maze.
pub(crate) fn load_maze(path: &Path) -> Result<(Maze, MazeDocument)> {
    let document = load_document(path)?;
    let maze = Maze::from_document(&document)
        .wrap_err_with(|| format!("invalid maze in {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        size = %document.grid_size,
        entrance = %document.entrance,
        "loaded maze"
    );
    Ok((maze, document))
}

/// Writes a maze document as pretty-printed JSON.
///
/// # Errors
///
/// Fails if the file cannot be written.
pub(crate) fn save_document(path: &Path, document: &MazeDocument) -> Result<()> {
    fs::write(path, render_document(document)?)
        .wrap_err_with(|| format!("failed to write maze file {}", path.display()))
}

/// Parses the JSON text of a maze document.
///
/// # Errors
///
/// Fails if the text is not a maze document.
pub(crate) fn parse_document(input: &str) -> Result<MazeDocument> {
    Ok(serde_json::from_str(input.trim())?)
}

/// Serializes a maze document as pretty-printed JSON with a trailing newline.
///
/// # Errors
///
/// Fails if serialization fails.
pub(crate) fn render_document(document: &MazeDocument) -> Result<String> {
    let mut text = serde_json::to_string_pretty(document)?;
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document_valid() {
        let document = parse_document(r#"{"entrance":"B1","gridSize":"3x3","walls":["A1","C1"]}"#)
            .expect("document parses");

        assert_eq!(document.entrance, "B1");
        assert_eq!(document.grid_size, "3x3");
        assert_eq!(document.walls, vec!["A1", "C1"]);
        assert!(document.path.is_empty());
    }

    #[test]
    fn test_parse_document_surrounding_whitespace() {
        let document = parse_document("\n  {\"entrance\":\"A1\",\"gridSize\":\"2x2\"}\n\n")
            .expect("document parses");
        assert!(document.walls.is_empty());
    }

    #[test]
    fn test_parse_document_missing_field() {
        assert!(parse_document(r#"{"entrance":"B1"}"#).is_err());
    }

    #[test]
    fn test_parse_document_not_json() {
        assert!(parse_document("2222\n2134\n2222").is_err());
        assert!(parse_document("").is_err());
    }

    #[test]
    fn test_render_document_round_trip() {
        let document = MazeDocument {
            id: None,
            entrance: "B1".to_owned(),
            grid_size: "3x3".to_owned(),
            walls: vec!["A1".to_owned()],
            path: vec!["B1".to_owned(), "B2".to_owned()],
        };
        let text = render_document(&document).expect("document serializes");

        assert!(text.ends_with('\n'));
        assert!(text.contains("\"gridSize\": \"3x3\""));
        assert_eq!(parse_document(&text).expect("output parses"), document);
    }

    #[test]
    fn test_save_and_load_maze() {
        let dir = tempfile::tempdir().expect("temporary directory is created");
        let path = dir.path().join("maze.json");
        let document = MazeDocument {
            id: Some("7".to_owned()),
            entrance: "B1".to_owned(),
            grid_size: "3x3".to_owned(),
            walls: vec!["A1".to_owned(), "C1".to_owned()],
            path: Vec::new(),
        };

        save_document(&path, &document).expect("temporary file is writable");
        let (maze, loaded) = load_maze(&path).expect("saved maze loads");

        assert_eq!(loaded, document);
        assert_eq!(maze.id.as_deref(), Some("7"));
        assert!(maze.grid.is_wall(2, 0));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().expect("temporary directory is created");
        let path = dir.path().join("missing.json");
        let err = load_document(&path).expect_err("missing file is an error");
        assert!(err.to_string().contains("failed to read maze file"));
    }
}
