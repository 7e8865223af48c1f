//! Writes the rendered page to disk.

use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::error::Result;
use crate::render::OutputStream;

const FILE_NAME: &str = "index.html";

/// The `index.html` file of a dashboard inside an output directory.
pub struct OutputFile {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl OutputFile {
    /// Creates (or truncates) `index.html` inside the directory `path`.
    pub fn new(path: &Path) -> Result<OutputFile> {
        let path = path.join(FILE_NAME);
        let file = File::create(&path)?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    /// Flushes everything written so far to disk and returns the path of
    /// the written file.
    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer.flush()?;
        Ok(self.path)
    }
}

impl OutputStream for OutputFile {
    fn write(&mut self, data: &str) -> Result<()> {
        self.writer.write_all(data.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn writes_index_html_into_the_directory() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join(FILE_NAME), "stale")?;

        let mut output = OutputFile::new(dir.path())?;
        output.write("<html>")?;
        output.write("</html>")?;
        let path = output.finish()?;

        assert_eq!(path, dir.path().join("index.html"));
        assert_eq!(fs::read_to_string(&path)?, "<html></html>");

        Ok(())
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let result = OutputFile::new(Path::new("/nonexistent/repostats"));

        assert!(matches!(result, Err(crate::error::VisError::Io(_))));
    }
}
