use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::ParserError;
use crate::mtl::types::MtlAsset;

pub struct MtlWriter {}

impl MtlWriter {
    /// Synthesises the declaration line and appends the raw property text verbatim.
    pub fn write_material<W: Write>(w: &mut W, name: &str, body: &str) -> Result<(), ParserError> {
        writeln!(w, "newmtl {}", name)?;
        if !body.is_empty() {
            writeln!(w, "{}", body)?;
        }
        Ok(())
    }

    pub fn write_material_file(path: &Path, name: &str, body: &str) -> Result<(), ParserError> {
        let mut w = BufWriter::new(File::create(path)?);
        Self::write_material(&mut w, name, body)?;
        w.flush()?;
        Ok(())
    }

    pub fn write_asset<W: Write>(w: &mut W, asset: &MtlAsset) -> Result<(), ParserError> {
        for line in &asset.preamble {
            writeln!(w, "{}", line)?;
        }

        for material in &asset.materials {
            writeln!(w, "newmtl {}", material.name)?;
            for line in &material.properties {
                writeln!(w, "{}", line)?;
            }
        }

        Ok(())
    }

    pub fn write_asset_file(path: &Path, asset: &MtlAsset) -> Result<(), ParserError> {
        let mut w = BufWriter::new(File::create(path)?);
        Self::write_asset(&mut w, asset)?;
        w.flush()?;
        Ok(())
    }
}
