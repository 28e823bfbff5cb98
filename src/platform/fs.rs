// Autoreg - platform/fs.rs
//
// Filesystem operations at the run boundary: reading the dump, preparing the
// output directory, copying the template, writing the split text.
// Each is performed once per run with no retries.

use crate::util::error::{InputError, OutputError};
use std::path::Path;

/// Read the full dump as a string.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn read_dump(path: &Path) -> Result<String, InputError> {
    let bytes = std::fs::read(path).map_err(|e| InputError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                "Dump is not valid UTF-8; invalid sequences replaced"
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    })
}

/// Create `dir` (with parents) unless it already exists as a directory.
pub fn ensure_dir(dir: &Path) -> Result<(), OutputError> {
    if dir.is_dir() {
        return Ok(());
    }
    if dir.exists() {
        return Err(OutputError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }
    std::fs::create_dir_all(dir).map_err(|e| OutputError::CreateDir {
        path: dir.to_path_buf(),
        source: e,
    })?;
    tracing::info!(dir = %dir.display(), "Created output directory");
    Ok(())
}

/// Copy the spreadsheet template byte-for-byte to `dest`.
///
/// The template must be a regular file. Copying a file onto itself is a no-op.
pub fn copy_template(template: &Path, dest: &Path) -> Result<(), OutputError> {
    let meta = std::fs::metadata(template).map_err(|e| OutputError::CopyTemplate {
        from: template.to_path_buf(),
        to: dest.to_path_buf(),
        source: e,
    })?;
    if !meta.is_file() {
        return Err(OutputError::TemplateNotAFile {
            path: template.to_path_buf(),
        });
    }

    if let (Ok(a), Ok(b)) = (template.canonicalize(), dest.canonicalize()) {
        if a == b {
            return Ok(());
        }
    }

    let bytes = std::fs::copy(template, dest).map_err(|e| OutputError::CopyTemplate {
        from: template.to_path_buf(),
        to: dest.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(
        from = %template.display(),
        to = %dest.display(),
        bytes,
        "Template copied"
    );
    Ok(())
}

/// Write the split text artifact, replacing any existing file.
pub fn write_text(path: &Path, text: &str) -> Result<(), OutputError> {
    std::fs::write(path, text).map_err(|e| OutputError::WriteText {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_dump_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_dump(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, InputError::Read { .. }));
    }

    #[test]
    fn test_read_dump_lossy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dump.txt");
        std::fs::write(&path, b"ok\xffline").unwrap();
        let text = read_dump(&path).unwrap();
        assert!(text.starts_with("ok"));
        assert!(text.ends_with("line"));
    }

    #[test]
    fn test_ensure_dir_creates_nested() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        // Second call on an existing directory is fine.
        ensure_dir(&nested).unwrap();
    }

    #[test]
    fn test_ensure_dir_rejects_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file");
        std::fs::write(&file, "x").unwrap();
        assert!(matches!(
            ensure_dir(&file).unwrap_err(),
            OutputError::NotADirectory { .. }
        ));
    }

    #[test]
    fn test_copy_template_copies_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("template.xlsx");
        let dst = dir.path().join("out.xlsx");
        std::fs::write(&src, b"PK\x03\x04template").unwrap();
        copy_template(&src, &dst).unwrap();
        assert_eq!(std::fs::read(&dst).unwrap(), b"PK\x03\x04template");
    }

    #[test]
    fn test_copy_template_rejects_directory_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("out.xlsx");
        assert!(matches!(
            copy_template(dir.path(), &dst).unwrap_err(),
            OutputError::TemplateNotAFile { .. }
        ));
        assert!(matches!(
            copy_template(&dir.path().join("nope.xlsx"), &dst).unwrap_err(),
            OutputError::CopyTemplate { .. }
        ));
    }
}
