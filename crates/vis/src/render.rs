//! Renders the dashboard into an HTML page.

pub mod output;
mod view;

use crate::error::Result;

/// A sink the rendered page is written to.
pub trait OutputStream {
    /// Appends `data` to the output.
    fn write(&mut self, data: &str) -> Result<()>;
}

impl OutputStream for String {
    fn write(&mut self, data: &str) -> Result<()> {
        self.push_str(data);
        Ok(())
    }
}

/// Something that can be written out as part of the page.
pub trait Render {
    /// Writes `self` as HTML to `output`.
    fn render<O>(&self, output: &mut O) -> Result<()>
    where
        O: OutputStream;
}
